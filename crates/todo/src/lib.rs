//! Todo is a multi-tenant to-do service.
//!
//! # Features
//!
//! - Accounts (tenants) own items; users belong to accounts through
//!   memberships carrying a permission bitmask
//! - One active account per session, switchable between memberships
//! - Member management within the active account
//! - Site administrators with a separate capability bitmask and an opt-in
//!   cross-account view (`?admin=true`)
//! - Pluggable storage through the auth and meta adapter traits

// Re-export shared types and adapter traits from todo-types
pub use todo_types::admin_permission;
pub use todo_types::auth_adapter;
pub use todo_types::error;
pub use todo_types::meta_adapter;
pub use todo_types::permission;
pub use todo_types::session;
pub use todo_types::types;

// Feature crate re-exports
pub use todo_account as account;
pub use todo_admin as admin;
pub use todo_auth as auth;
pub use todo_core::authz;
pub use todo_items as items;

// Local modules
pub mod app;
pub mod bootstrap;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
