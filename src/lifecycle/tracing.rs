//! # Observability & Tracing
//!
//! [`setup_tracing`] initialises structured logging for the console: both stores, the
//! clients and the collaborators log through `tracing`.
//!
//! ## Configuration
//!
//! Compact format without the module prefix (`with_target(false)`); stores identify
//! themselves with a `store_type` field instead. Levels come from `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run
//!
//! # Commands and settled outcomes
//! RUST_LOG=debug cargo run
//!
//! # Only the store plumbing
//! RUST_LOG=admin_console::framework=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: `Store started` / `Shutdown` per store
//! - **Session transitions**: login, restore, role switch, logout at `info`
//! - **Absorbed failures**: lookup, logout and storage failures at `warn`; they never
//!   surface as errors, so this is the only place they show up
//! - **Client calls**: one span per client method (`login`, `sync_path`, ...)
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Store started store_type="Session"
//! INFO Store started store_type="MenuState"
//! INFO login: Login rejected username="admin" message="Invalid username or password"
//! INFO login: Logged in username="admin" role=admin
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // stores log a store_type field instead
        .compact()
        .init();
}
