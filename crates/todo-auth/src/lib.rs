//! Authentication subsystem.
//!
//! Issues access tokens bound to an active account and lets a user move the
//! binding between the accounts they belong to.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod handler;

mod prelude;

// vim: ts=4
