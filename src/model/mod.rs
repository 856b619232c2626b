//! Plain data types shared by the stores, the projection and the collaborators.

pub mod menu;
pub mod role;
pub mod route;
pub mod user;

pub use menu::*;
pub use role::*;
pub use route::*;
pub use user::*;
