//! # Admin Console Demo
//!
//! Walks one session through the console:
//! 1.  Boot on `/home` and get sent to the login page.
//! 2.  Fail a login, then sign in as `admin`.
//! 3.  List the sidebar, switch to the `manager` role and list it again.
//! 4.  Quick-login as a guest, then log out.

use admin_console::lifecycle::{setup_tracing, AdminConsole, ConsoleConfig};
use admin_console::model::{Credentials, MenuEntry, Role, UserInfo};
use tracing::{info, Instrument};

fn describe(entries: &[MenuEntry]) -> String {
    entries
        .iter()
        .map(|e| e.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ConsoleConfig::from_env().map_err(|e| e.to_string())?;
    let console = AdminConsole::start(&config).map_err(|e| e.to_string())?;

    let landing = console.boot("/home").await.map_err(|e| e.to_string())?;
    info!(location = ?landing.location(), "Booted");

    let span = tracing::info_span!("sign_in");
    async {
        let outcome = console
            .login(Credentials::new("admin", "wrong"))
            .await
            .map_err(|e| e.to_string())?;
        info!(?outcome, "First attempt");

        let outcome = console
            .login(Credentials::new("admin", "admin123"))
            .await
            .map_err(|e| e.to_string())?;
        info!(?outcome, "Second attempt");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let home = console.navigate("/login").await.map_err(|e| e.to_string())?;
    info!(
        location = ?home.location(),
        selected = ?home.menu.selected_keys,
        menu = %describe(&home.menu.entries),
        "Signed in"
    );

    console
        .switch_role(Role::Manager)
        .await
        .map_err(|e| e.to_string())?;
    let menu = console.settle_menu().await.map_err(|e| e.to_string())?;
    info!(menu = %describe(&menu.entries), "Switched to manager");

    let settings = console.click("/settings").await.map_err(|e| e.to_string())?;
    info!(selected = ?settings.menu.selected_keys, "Opened settings");

    let collapsed = console.toggle_sidebar().await.map_err(|e| e.to_string())?;
    info!(collapsed = collapsed.collapsed, "Toggled sidebar");

    console
        .quick_login(UserInfo::new("4", "guest", Role::Guest))
        .await
        .map_err(|e| e.to_string())?;
    let menu = console.settle_menu().await.map_err(|e| e.to_string())?;
    info!(entries = menu.entries.len(), "Quick login as guest");

    console.logout().await.map_err(|e| e.to_string())?;
    let after = console.navigate("/settings").await.map_err(|e| e.to_string())?;
    info!(location = ?after.location(), "Logged out");

    console.shutdown().await.map_err(|e| e.to_string())?;
    Ok(())
}
