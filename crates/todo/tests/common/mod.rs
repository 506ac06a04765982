//! Common test utilities and helpers
//!
//! In-memory adapters plus a seeded world of users, accounts and items that
//! the HTTP-level tests drive through the real router.

#![allow(dead_code)]

pub mod adapters;
pub mod fixtures;

pub use adapters::*;
pub use fixtures::*;

// vim: ts=4
