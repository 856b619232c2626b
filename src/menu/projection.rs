//! Route tree → sidebar entries.

use crate::model::{MenuConfig, MenuEntry, Role, RouteDescriptor};
use crate::permission::is_visible;

/// Sort rank for siblings without an explicit order.
pub const UNORDERED: u32 = 999;

/// Joins a route path onto its parent's absolute path.
///
/// Absolute paths are returned as-is, an empty path resolves to the parent, and relative
/// segments are appended with a single `/`.
pub fn join_path(parent: &str, path: &str) -> String {
    if path.is_empty() {
        return parent.to_string();
    }
    if path.starts_with('/') {
        return path.to_string();
    }
    collapse_separators(&format!("{}/{}", parent, path))
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                out.push(c);
            }
            previous_slash = true;
        } else {
            out.push(c);
            previous_slash = false;
        }
    }
    out
}

/// Projects a route tree onto the menu entries visible to `role`.
///
/// - nodes failing [`is_visible`] are dropped together with their subtree
/// - nodes marked `hide_in_menu` emit no entry of their own; their visible descendants are
///   lifted to the hidden node's level
/// - a node with children becomes a group only if at least one child survives
/// - a leaf becomes an entry only if it has a title
/// - siblings are ordered by `order` (missing = [`UNORDERED`], an explicit 0 comes first),
///   ties keep input order
pub fn project(
    routes: &[RouteDescriptor],
    role: Option<Role>,
    is_authenticated: bool,
) -> Vec<MenuEntry> {
    project_level(routes, "", role, is_authenticated)
        .into_iter()
        .map(|(_, entry)| entry)
        .collect()
}

fn project_level(
    routes: &[RouteDescriptor],
    parent_path: &str,
    role: Option<Role>,
    is_authenticated: bool,
) -> Vec<(u32, MenuEntry)> {
    let mut ranked = Vec::new();

    for route in routes {
        if !is_visible(route, role, is_authenticated) {
            continue;
        }

        let full_path = join_path(parent_path, &route.path);

        if route.is_hidden() {
            ranked.extend(project_level(
                &route.children,
                &full_path,
                role,
                is_authenticated,
            ));
            continue;
        }

        let rank = route.order_value().unwrap_or(UNORDERED);

        if !route.children.is_empty() {
            let children: Vec<MenuEntry> =
                project_level(&route.children, &full_path, role, is_authenticated)
                    .into_iter()
                    .map(|(_, entry)| entry)
                    .collect();
            if children.is_empty() {
                continue;
            }
            let label = route.title_text().unwrap_or(&route.path).to_string();
            ranked.push((
                rank,
                MenuEntry {
                    key: full_path,
                    label,
                    icon: route.icon_handle().cloned(),
                    children,
                },
            ));
        } else if let Some(title) = route.title_text() {
            ranked.push((
                rank,
                MenuEntry::leaf(full_path, title, route.icon_handle().cloned()),
            ));
        }
    }

    // sort_by_key is stable
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked
}

/// Projects a flat menu configuration: filter by permission, order, map to leaves.
pub fn project_config(
    configs: &[MenuConfig],
    role: Option<Role>,
    is_authenticated: bool,
) -> Vec<MenuEntry> {
    let mut visible: Vec<&MenuConfig> = configs
        .iter()
        .filter(|config| is_visible(*config, role, is_authenticated))
        .collect();
    visible.sort_by_key(|config| config.order.unwrap_or(UNORDERED));
    visible
        .into_iter()
        .map(|config| MenuEntry::leaf(&config.key, &config.label, config.icon.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: &str, title: &str) -> RouteDescriptor {
        RouteDescriptor::new(path, title).title(title)
    }

    fn keys(entries: &[MenuEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "/login"), "/login");
        assert_eq!(join_path("/", "home"), "/home");
        assert_eq!(join_path("/system/", "/users"), "/users");
        assert_eq!(join_path("/system/", "users"), "/system/users");
        assert_eq!(join_path("/system", ""), "/system");
        assert_eq!(join_path("", "a//b"), "/a/b");
    }

    #[test]
    fn test_role_filter_example() {
        let routes = vec![
            leaf("/home", "Home").roles([Role::Admin, Role::User, Role::Manager]),
            leaf("/about", "About").roles([Role::Admin]),
        ];
        let entries = project(&routes, Some(Role::User), true);
        assert_eq!(keys(&entries), vec!["/home"]);
    }

    #[test]
    fn test_siblings_sorted_by_order_with_stable_ties() {
        let routes = vec![
            leaf("/c", "C"),
            leaf("/b", "B").order(2),
            leaf("/d", "D"),
            leaf("/a", "A").order(1),
            leaf("/e", "E").order(2),
        ];
        let entries = project(&routes, Some(Role::Admin), true);
        assert_eq!(keys(&entries), vec!["/a", "/b", "/e", "/c", "/d"]);
    }

    #[test]
    fn test_explicit_zero_order_sorts_first() {
        let routes = vec![leaf("/b", "B").order(1), leaf("/c", "C"), leaf("/a", "A").order(0)];
        assert_eq!(keys(&project(&routes, None, false)), vec!["/a", "/b", "/c"]);

        let mut configs = crate::routes::menu_configs();
        configs[4].order = Some(0);
        let entries = project_config(&configs, Some(Role::Admin), true);
        assert_eq!(entries[0].key, "/playground");
    }

    #[test]
    fn test_group_dropped_when_no_child_survives() {
        let routes = vec![RouteDescriptor::new("/system", "System")
            .title("System")
            .children(vec![leaf("users", "Users").roles([Role::Admin])])];

        assert!(project(&routes, Some(Role::Guest), true).is_empty());

        let entries = project(&routes, Some(Role::Admin), true);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "/system");
        assert_eq!(keys(&entries[0].children), vec!["/system/users"]);
    }

    #[test]
    fn test_untitled_leaves_and_index_route_are_skipped() {
        let routes = vec![RouteDescriptor::new("/", "Layout")
            .hide_in_menu()
            .children(vec![
                RouteDescriptor::index("Redirect"),
                leaf("home", "Home"),
                RouteDescriptor::new("*", "NotFound"),
            ])];
        let entries = project(&routes, None, false);
        assert_eq!(keys(&entries), vec!["/home"]);
    }

    #[test]
    fn test_hidden_parent_lifts_visible_children() {
        let routes = vec![
            leaf("/z", "Z").order(3),
            RouteDescriptor::new("/", "Layout").hide_in_menu().children(vec![
                leaf("b", "B").order(2),
                leaf("a", "A").order(1),
            ]),
        ];
        let entries = project(&routes, Some(Role::Admin), true);
        assert_eq!(keys(&entries), vec!["/a", "/b", "/z"]);
    }

    #[test]
    fn test_denied_parent_hides_subtree() {
        let routes = vec![RouteDescriptor::new("/admin", "Admin")
            .hide_in_menu()
            .roles([Role::Admin])
            .children(vec![leaf("audit", "Audit")])];
        assert!(project(&routes, Some(Role::User), true).is_empty());
        assert_eq!(
            keys(&project(&routes, Some(Role::Admin), true)),
            vec!["/admin/audit"]
        );
    }

    #[test]
    fn test_group_label_falls_back_to_path() {
        let routes = vec![RouteDescriptor::new("reports", "Reports")
            .children(vec![leaf("daily", "Daily")])];
        let entries = project(&routes, None, false);
        assert_eq!(entries[0].label, "reports");
        assert_eq!(entries[0].key, "/reports");
        assert_eq!(entries[0].children[0].key, "/reports/daily");
    }

    #[test]
    fn test_every_entry_is_visible_and_titled_or_grouped() {
        let routes = crate::routes::app_routes();
        for role in Role::ALL {
            for entry in project(&routes, Some(role), true) {
                let node = crate::routes::find(&routes, &entry.key)
                    .expect("entry must come from a route");
                assert!(is_visible(node, Some(role), true));
                assert!(node.title_text().is_some() || !entry.children.is_empty());
            }
        }
    }

    #[test]
    fn test_project_config_orders_and_filters() {
        let configs = crate::routes::menu_configs();
        let entries = project_config(&configs, Some(Role::Manager), true);
        assert_eq!(keys(&entries), vec!["/home", "/settings"]);
        assert!(project_config(&configs, Some(Role::Admin), false).is_empty());
    }
}
