//! Site admin permission middleware

use axum::{extract::Request, middleware::Next, response::Response};

use crate::prelude::*;
use todo_core::PermissionCheckOutput;
use todo_core::authz;
use todo_core::extract::Auth;
use todo_types::admin_permission::SiteAdminPermissions;

/// Middleware factory that requires a specific site-admin capability.
///
/// Holding some other admin bit is not enough: a user who may ban users is
/// still refused when `required` is `TERMINATE_ACCOUNTS`.
pub fn require_admin_perm(
	required: SiteAdminPermissions,
) -> impl Fn(Auth, Request, Next) -> PermissionCheckOutput + Clone {
	move |auth, req, next| Box::pin(check_admin_perm(auth, req, next, required))
}

async fn check_admin_perm(
	Auth(ctx): Auth,
	req: Request,
	next: Next,
	required: SiteAdminPermissions,
) -> ClResult<Response> {
	authz::grant_admin(&ctx, required)?;

	Ok(next.run(req).await)
}

// vim: ts=4
