use crate::model::Role;
use serde::{Deserialize, Serialize};

/// Opaque icon handle. The core only carries it from descriptor to menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Icon(pub String);

impl From<&str> for Icon {
    fn from(name: &str) -> Self {
        Icon(name.to_string())
    }
}

/// Opaque reference to the page a route renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element(pub String);

impl From<&str> for Element {
    fn from(name: &str) -> Self {
        Element(name.to_string())
    }
}

/// Display and permission metadata attached to a route.
///
/// An empty `roles` list means the route is open to every role; `require_auth` is checked
/// independently of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub icon: Option<Icon>,
    pub hide_in_menu: bool,
    pub order: Option<u32>,
    pub roles: Vec<Role>,
    pub require_auth: bool,
}

/// A node of the route tree.
///
/// `path` is either absolute (`/login`) or a segment relative to the parent (`home`).
/// The index route of a layout has an empty path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub path: String,
    pub element: Element,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RouteMeta>,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, element: impl Into<Element>) -> Self {
        Self {
            path: path.into(),
            element: element.into(),
            children: Vec::new(),
            meta: None,
        }
    }

    /// Index route of a layout: empty path, no metadata.
    pub fn index(element: impl Into<Element>) -> Self {
        Self::new("", element)
    }

    pub fn children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children = children;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta_mut().title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<Icon>) -> Self {
        self.meta_mut().icon = Some(icon.into());
        self
    }

    pub fn order(mut self, order: u32) -> Self {
        self.meta_mut().order = Some(order);
        self
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.meta_mut().roles = roles.into_iter().collect();
        self
    }

    pub fn require_auth(mut self) -> Self {
        self.meta_mut().require_auth = true;
        self
    }

    pub fn hide_in_menu(mut self) -> Self {
        self.meta_mut().hide_in_menu = true;
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.hide_in_menu)
    }

    pub fn title_text(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.title.as_deref())
    }

    pub fn order_value(&self) -> Option<u32> {
        self.meta.as_ref().and_then(|m| m.order)
    }

    pub fn icon_handle(&self) -> Option<&Icon> {
        self.meta.as_ref().and_then(|m| m.icon.as_ref())
    }

    fn meta_mut(&mut self) -> &mut RouteMeta {
        self.meta.get_or_insert_with(RouteMeta::default)
    }
}
