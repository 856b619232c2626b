use crate::model::{Icon, Role};
use serde::{Deserialize, Serialize};

/// One entry of the navigation sidebar.
///
/// Derived data: recomputed from the route table whenever role, authentication or path
/// changes, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    pub fn leaf(key: impl Into<String>, label: impl Into<String>, icon: Option<Icon>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Keys of this entry and all its descendants, depth-first.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = vec![self.key.as_str()];
        for child in &self.children {
            keys.extend(child.keys());
        }
        keys
    }
}

/// Flat menu configuration row: one sidebar item per path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    pub key: String,
    pub path: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub require_auth: bool,
    #[serde(default)]
    pub order: Option<u32>,
}
