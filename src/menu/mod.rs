//! Pure menu derivation: route tree projection and path-derived keys.

pub mod keys;
pub mod projection;

pub use keys::{open_keys, selected_keys, HOME_KEY};
pub use projection::{join_path, project, project_config, UNORDERED};
