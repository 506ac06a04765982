//! Custom extractors for Todo-specific data

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::prelude::*;
use todo_types::session::SessionContext;

// Auth //
//******//
/// The session snapshot `require_auth` attached to the request
#[derive(Debug, Clone)]
pub struct Auth(pub SessionContext);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::PermissionDenied)
		}
	}
}

// OptionalAuth //
//***************//
/// Optional auth extractor that doesn't fail if auth is missing
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<SessionContext>);

impl<S> FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth = parts.extensions.get::<Auth>().cloned().map(|a| a.0);
		Ok(OptionalAuth(auth))
	}
}

// AdminView //
//***********//
/// Per-request opt-in to the cross-account view (`?admin=true`).
///
/// Only expresses the request. Whether it is honored is decided by
/// `Scope::resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminView(pub bool);

#[derive(Deserialize)]
struct AdminQuery {
	admin: Option<String>,
}

impl<S> FromRequestParts<S> for AdminView
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let requested = Query::<AdminQuery>::try_from_uri(&parts.uri)
			.ok()
			.and_then(|Query(q)| q.admin)
			.is_some_and(|v| parse_bool(&v));
		Ok(AdminView(requested))
	}
}

/// Lenient boolean for query flags. Anything unrecognised is `false`.
pub fn parse_bool(value: &str) -> bool {
	matches!(value, "1" | "t" | "T" | "true" | "TRUE" | "True")
}


// vim: ts=4
