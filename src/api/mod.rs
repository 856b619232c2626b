pub mod mock_api;

pub use mock_api::{Latency, MenuItemData, MockApi, RoleOption};
