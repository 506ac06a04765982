//! Core infrastructure for the Todo service.
//!
//! This crate holds the authorization gate every resource handler calls,
//! the middleware that turns an access token into a `SessionContext`, the
//! extractors handlers use to receive it, and the shared app state.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod authz;
pub mod extract;
pub mod middleware;
pub mod prelude;
pub mod token;

// Re-export commonly used types
pub use app::{Adapters, App, AppBuilderOpts, AppState};
pub use authz::{Decision, Scope};
pub use extract::{AdminView, Auth, OptionalAuth};
pub use middleware::{PermissionCheckOutput, optional_auth, require_auth};

// vim: ts=4
