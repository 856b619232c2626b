//! # Admin Console
//!
//! > **Session, permission and navigation core for a role-based admin console.**
//!
//! The crate decides who is signed in, what each role may see, and what the sidebar shows.
//! Rendering is left to whoever consumes the published state.
//!
//! ## 🏗️ Design
//!
//! ### Stores as Actors
//! The two mutable state containers, the session and the menu, each run as a
//! [`StoreActor`](framework::StoreActor) on their own Tokio task. Commands are applied one
//! at a time; observers read snapshots from a `watch` channel. A snapshot is published only
//! when a command begins and when it settles, so a login that sets the user, the
//! authentication flag and the loading flag is observed as one step.
//!
//! ### Pure Core
//! Permission checks ([`permission`]), menu projection ([`menu`]) and the navigation guard
//! ([`guard`]) are plain functions over plain data. They are tested without a runtime.
//!
//! ### Collaborators Behind Traits
//! The authentication service and the persisted key/value store are reached through
//! [`AuthService`](ports::AuthService) and [`KeyValueStore`](ports::KeyValueStore).
//! [`MockApi`](api::MockApi) is the seeded implementation the demo runs against; tests use
//! the doubles in [`mock`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Generic store plumbing: command channel, publication, client handle.
//! - **Key items**: [`StoreState`](framework::StoreState), [`StoreActor`](framework::StoreActor),
//!   [`StoreHandle`](framework::StoreHandle).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: Builds both stores, wires the session into the menu, shuts everything down.
//! - **Key items**: [`AdminConsole`](lifecycle::AdminConsole),
//!   [`ConsoleConfig`](lifecycle::ConsoleConfig).
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: Domain methods (`login`, `switch_role`, `sync_path`, ...) over the generic client.
//!
//! ### 4. The Stores ([`session_actor`], [`menu_actor`])
//! - **Role**: The two [`StoreState`](framework::StoreState) implementations.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ADMIN_CONSOLE_CONFIG=console.json RUST_LOG=debug cargo run
//! ```

pub mod api;
pub mod clients;
pub mod framework;
pub mod guard;
pub mod lifecycle;
pub mod menu;
pub mod menu_actor;
pub mod mock;
pub mod model;
pub mod permission;
pub mod ports;
pub mod routes;
pub mod session_actor;
