//! Shared types, adapter traits, and core utilities for the Todo service.
//!
//! This crate contains the foundational types shared between the HTTP
//! feature crates and the storage adapters: the permission bitmasks, the
//! per-request session snapshot, identifiers, the error type and the adapter
//! traits the storage backends implement.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod admin_permission;
pub mod auth_adapter;
pub mod error;
pub mod meta_adapter;
pub mod permission;
pub mod prelude;
pub mod session;
pub mod types;

// vim: ts=4
