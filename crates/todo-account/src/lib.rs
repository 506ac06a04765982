//! Account member management.
//!
//! Members are always managed within the session's active account. Every
//! handler asks the authorization gate for the manage-members capability and
//! takes the account id from the approved filter, never from the request.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod handler;

mod prelude;

// vim: ts=4
