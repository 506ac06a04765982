//! Custom middlewares

use axum::{
	body::Body,
	extract::{Request, State},
	http::{HeaderMap, header},
	middleware::Next,
	response::Response,
};
use std::{future::Future, pin::Pin};

use crate::extract::Auth;
use crate::prelude::*;
use crate::token;
use todo_types::session::SessionContext;

/// Return type of the permission check middleware factories
pub type PermissionCheckOutput = Pin<Box<dyn Future<Output = ClResult<Response>> + Send>>;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	headers
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim)
		.filter(|t| !t.is_empty())
}

/// Turns a validated access token into a session snapshot.
///
/// The user and their memberships are re-read from the identity store, so
/// the snapshot reflects the store at the time of the request.
pub async fn load_session(app: &App, token: &str) -> ClResult<SessionContext> {
	let claims = token::validate_access_token(&app.opts, token)?;

	let user = app.auth_adapter.read_user(claims.uid).await.map_err(|e| match e {
		Error::NotFound => Error::Unauthorized,
		e => e,
	})?;
	if user.reputation.is_locked_out() {
		warn!(
			user_id = %user.user_id,
			reputation = %user.reputation,
			"Rejected request from locked out user"
		);
		return Err(Error::PermissionDenied);
	}

	let memberships = app.auth_adapter.list_memberships(user.user_id).await?;
	SessionContext::from_memberships(user.requester(), claims.acc, &memberships)
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response> {
	let token = bearer_token(req.headers()).ok_or(Error::Unauthorized)?;
	let ctx = load_session(&app, token).await?;

	req.extensions_mut().insert(Auth(ctx));

	Ok(next.run(req).await)
}

/// Attaches a session when a token is presented. An invalid token is still
/// an error.
pub async fn optional_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response> {
	if let Some(token) = bearer_token(req.headers()) {
		let ctx = load_session(&app, token).await?;
		req.extensions_mut().insert(Auth(ctx));
	}

	Ok(next.run(req).await)
}


// vim: ts=4
