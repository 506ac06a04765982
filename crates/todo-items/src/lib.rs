//! Items API.
//!
//! Every handler resolves the request scope, asks the authorization gate for
//! the capability its operation needs and passes the approved account filter
//! to the metadata adapter.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod handler;

mod prelude;

// vim: ts=4
