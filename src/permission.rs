//! Permission filter: decides whether a route or menu row is visible to a user.

use crate::model::{MenuConfig, Role, RouteDescriptor};

/// Anything carrying a role requirement and an authentication requirement.
pub trait Gated {
    /// Roles allowed to see the item. Empty means every role.
    fn allowed_roles(&self) -> &[Role];

    fn requires_auth(&self) -> bool;
}

impl Gated for RouteDescriptor {
    fn allowed_roles(&self) -> &[Role] {
        self.meta.as_ref().map(|m| m.roles.as_slice()).unwrap_or(&[])
    }

    fn requires_auth(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.require_auth)
    }
}

impl Gated for MenuConfig {
    fn allowed_roles(&self) -> &[Role] {
        &self.roles
    }

    fn requires_auth(&self) -> bool {
        self.require_auth
    }
}

/// Whether `node` is visible to a user with `role` and the given authentication state.
///
/// Evaluation order:
/// 1. auth required but not authenticated: hidden
/// 2. no role restriction: visible
/// 3. no role (anonymous) but roles restricted: hidden
/// 4. otherwise: visible iff the role is listed
pub fn is_visible<G: Gated + ?Sized>(node: &G, role: Option<Role>, is_authenticated: bool) -> bool {
    if node.requires_auth() && !is_authenticated {
        return false;
    }

    let roles = node.allowed_roles();
    if roles.is_empty() {
        return true;
    }

    match role {
        Some(role) => roles.contains(&role),
        None => false,
    }
}
