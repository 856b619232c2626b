//! The application's route table and its flat menu configuration.

use crate::menu::join_path;
use crate::model::{Icon, MenuConfig, Role, RouteDescriptor};

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// Route tree of the console.
///
/// The layout at `/` is hidden from the menu so its pages appear at the top level of the
/// sidebar.
pub fn app_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new(LOGIN_PATH, "Login"),
        RouteDescriptor::new(ROOT_PATH, "Layout")
            .hide_in_menu()
            .children(vec![
                RouteDescriptor::index("Home"),
                RouteDescriptor::new("home", "Home")
                    .title("Home")
                    .icon("HomeOutlined")
                    .order(1)
                    .roles([Role::Admin, Role::User, Role::Manager])
                    .require_auth(),
                RouteDescriptor::new("about", "About")
                    .title("About")
                    .icon("InfoCircleOutlined")
                    .order(2)
                    .roles([Role::Admin])
                    .require_auth(),
                RouteDescriptor::new("user-management", "UserManagement")
                    .title("User Management")
                    .icon("UserOutlined")
                    .order(3)
                    .roles([Role::Admin])
                    .require_auth(),
                RouteDescriptor::new("settings", "Settings")
                    .title("Settings")
                    .icon("SettingOutlined")
                    .order(4)
                    .roles([Role::Admin, Role::Manager])
                    .require_auth(),
                RouteDescriptor::new("playground", "Playground")
                    .title("Playground")
                    .icon("ExperimentOutlined")
                    .order(5)
                    .roles([Role::Admin])
                    .require_auth(),
                RouteDescriptor::new("*", "NotFound").hide_in_menu(),
            ]),
    ]
}

/// Flat equivalent of the visible part of [`app_routes`], one row per page.
pub fn menu_configs() -> Vec<MenuConfig> {
    fn row(path: &str, label: &str, icon: &str, order: u32, roles: &[Role]) -> MenuConfig {
        MenuConfig {
            key: path.to_string(),
            path: path.to_string(),
            label: label.to_string(),
            icon: Some(Icon::from(icon)),
            roles: roles.to_vec(),
            require_auth: true,
            order: Some(order),
        }
    }

    vec![
        row("/home", "Home", "HomeOutlined", 1, &[Role::Admin, Role::User, Role::Manager]),
        row("/about", "About", "InfoCircleOutlined", 2, &[Role::Admin]),
        row("/user-management", "User Management", "UserOutlined", 3, &[Role::Admin]),
        row("/settings", "Settings", "SettingOutlined", 4, &[Role::Admin, Role::Manager]),
        row("/playground", "Playground", "ExperimentOutlined", 5, &[Role::Admin]),
    ]
}

/// Finds the node whose resolved absolute path equals `path`.
///
/// Index routes resolve to their parent's path; the parent wins.
pub fn find<'a>(routes: &'a [RouteDescriptor], path: &str) -> Option<&'a RouteDescriptor> {
    find_under(routes, "", path)
}

fn find_under<'a>(
    routes: &'a [RouteDescriptor],
    parent_path: &str,
    path: &str,
) -> Option<&'a RouteDescriptor> {
    for route in routes {
        let full_path = join_path(parent_path, &route.path);
        if full_path == path {
            return Some(route);
        }
        if let Some(found) = find_under(&route.children, &full_path, path) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{project, project_config};

    #[test]
    fn test_find_resolves_nested_paths() {
        let routes = app_routes();
        assert_eq!(find(&routes, "/settings").map(|r| r.element.0.as_str()), Some("Settings"));
        assert_eq!(find(&routes, "/").map(|r| r.element.0.as_str()), Some("Layout"));
        assert!(find(&routes, "/missing").is_none());
    }

    #[test]
    fn test_admin_sees_every_page_in_order() {
        let entries = project(&app_routes(), Some(Role::Admin), true);
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["/home", "/about", "/user-management", "/settings", "/playground"]
        );
    }

    #[test]
    fn test_guest_and_anonymous_see_nothing() {
        assert!(project(&app_routes(), Some(Role::Guest), true).is_empty());
        assert!(project(&app_routes(), None, false).is_empty());
    }

    #[test]
    fn test_route_table_and_flat_config_agree() {
        for role in Role::ALL {
            assert_eq!(
                project(&app_routes(), Some(role), true),
                project_config(&menu_configs(), Some(role), true),
                "menus differ for {role}"
            );
        }
    }
}
