use axum::{
	Json,
	extract::{
		Path, State,
		rejection::{JsonRejection, PathRejection},
	},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use todo_core::extract::Auth;
use todo_types::session::Reputation;
use todo_types::types::ApiResponse;

/// # POST /api/admin/users/{user_id}/ban
#[derive(Debug, Default, Deserialize)]
pub struct BanUserReq {
	reason: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationChange {
	user_id: UserId,
	reputation: Reputation,
}

pub async fn post_ban_user(
	State(app): State<App>,
	Auth(ctx): Auth,
	user_id: Result<Path<UserId>, PathRejection>,
	req: Result<Option<Json<BanUserReq>>, JsonRejection>,
) -> ClResult<(StatusCode, Json<ApiResponse<ReputationChange>>)> {
	let Path(user_id) = user_id?;
	let req = req?;
	if user_id == ctx.user_id() {
		return Err(Error::ValidationError("cannot ban yourself".into()));
	}
	let reason = req.and_then(|Json(req)| req.reason);

	app.auth_adapter
		.update_user_reputation(user_id, Reputation::Banned, reason.as_deref())
		.await?;
	info!(
		admin = %ctx.user_id(),
		user_id = %user_id,
		reason = reason.as_deref().unwrap_or_default(),
		"User banned"
	);

	let change = ReputationChange { user_id, reputation: Reputation::Banned };
	Ok((StatusCode::OK, Json(ApiResponse::new(change))))
}

/// # POST /api/admin/accounts/{account_id}/terminate
pub async fn post_terminate_account(
	State(app): State<App>,
	Auth(ctx): Auth,
	account_id: Result<Path<AccountId>, PathRejection>,
) -> ClResult<StatusCode> {
	let Path(account_id) = account_id?;
	app.auth_adapter.terminate_account(account_id).await?;
	info!(admin = %ctx.user_id(), account_id = %account_id, "Account terminated");

	Ok(StatusCode::NO_CONTENT)
}

// vim: ts=4
