use axum::{
	Json,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::prelude::*;
use todo_core::extract::{Auth, OptionalAuth};
use todo_core::token;
use todo_types::admin_permission::SiteAdminPermissionsSummary;
use todo_types::auth_adapter::default_account;
use todo_types::permission::{AccountPermissions, AccountPermissionsSummary};
use todo_types::session::Reputation;
use todo_types::types::ApiResponse;

/// # Login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
	user_id: UserId,
	account_id: AccountId,
	token: Box<str>,
	is_service_admin: bool,
	requires_password_change: bool,
}

/// # POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginReq {
	username: String,
	password: String,
}

pub async fn post_login(
	State(app): State<App>,
	login: Result<Json<LoginReq>, JsonRejection>,
) -> ClResult<(StatusCode, Json<ApiResponse<Login>>)> {
	let Json(login) = login?;
	let Ok(user) = app.auth_adapter.check_user_password(&login.username, &login.password).await
	else {
		info!(username = %login.username, "Login failed");
		tokio::time::sleep(std::time::Duration::from_secs(1)).await;
		return Err(Error::PermissionDenied);
	};

	if user.reputation.is_locked_out() {
		warn!(user_id = %user.user_id, reputation = %user.reputation, "Login from locked out user");
		return Err(Error::PermissionDenied);
	}

	let memberships = app.auth_adapter.list_memberships(user.user_id).await?;
	let Some(account_id) = default_account(&memberships) else {
		warn!(user_id = %user.user_id, "Login from user without any account");
		return Err(Error::PermissionDenied);
	};

	let token = token::generate_access_token(&app.opts, user.user_id, account_id)?;
	info!(user_id = %user.user_id, account_id = %account_id, "Login");

	let login = Login {
		user_id: user.user_id,
		account_id,
		token,
		is_service_admin: user.site_admin.is_service_admin(),
		requires_password_change: user.requires_password_change,
	};
	Ok((StatusCode::OK, Json(ApiResponse::new(login))))
}

/// # GET /api/auth/status
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
	is_authenticated: bool,
	user_id: Option<UserId>,
	active_account: Option<AccountId>,
	permissions: Option<AccountPermissionsSummary>,
	user_reputation: Option<Reputation>,
	requires_password_change: bool,
	is_service_admin: bool,
	site_admin: Option<SiteAdminPermissionsSummary>,
}

pub async fn get_status(
	OptionalAuth(auth): OptionalAuth,
) -> ClResult<(StatusCode, Json<ApiResponse<AuthStatus>>)> {
	let status = match auth {
		Some(ctx) => AuthStatus {
			is_authenticated: true,
			user_id: Some(ctx.user_id()),
			active_account: Some(ctx.active_account_id()),
			permissions: ctx.active_permissions().map(AccountPermissions::summary),
			user_reputation: Some(ctx.reputation()),
			requires_password_change: ctx.requires_password_change(),
			is_service_admin: ctx.is_service_admin(),
			site_admin: ctx.site_admin_permissions().summary(),
		},
		None => AuthStatus {
			is_authenticated: false,
			user_id: None,
			active_account: None,
			permissions: None,
			user_reputation: None,
			requires_password_change: false,
			is_service_admin: false,
			site_admin: None,
		},
	};

	Ok((StatusCode::OK, Json(ApiResponse::new(status))))
}

/// # POST /api/auth/change-account
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAccountReq {
	account_id: AccountId,
}

pub async fn post_change_account(
	State(app): State<App>,
	Auth(ctx): Auth,
	req: Result<Json<ChangeAccountReq>, JsonRejection>,
) -> ClResult<(StatusCode, Json<ApiResponse<Login>>)> {
	let Json(req) = req?;
	// Memberships were loaded from the store for this request
	if ctx.membership(req.account_id).is_none() {
		warn!(
			user_id = %ctx.user_id(),
			account_id = %req.account_id,
			"Account change to an account the user is not a member of"
		);
		return Err(Error::Unauthorized);
	}

	let token = token::generate_access_token(&app.opts, ctx.user_id(), req.account_id)?;
	info!(
		user_id = %ctx.user_id(),
		from = %ctx.active_account_id(),
		to = %req.account_id,
		"Active account changed"
	);

	let login = Login {
		user_id: ctx.user_id(),
		account_id: req.account_id,
		token,
		is_service_admin: ctx.is_service_admin(),
		requires_password_change: ctx.requires_password_change(),
	};
	Ok((StatusCode::OK, Json(ApiResponse::new(login))))
}

/// # POST /api/auth/default-account
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultAccountReq {
	account_id: AccountId,
}

/// Picks the account later logins are bound to
pub async fn post_default_account(
	State(app): State<App>,
	Auth(ctx): Auth,
	req: Result<Json<DefaultAccountReq>, JsonRejection>,
) -> ClResult<StatusCode> {
	let Json(req) = req?;
	if ctx.membership(req.account_id).is_none() {
		warn!(
			user_id = %ctx.user_id(),
			account_id = %req.account_id,
			"Default account outside the user's memberships"
		);
		return Err(Error::Unauthorized);
	}

	app.auth_adapter.set_default_account(ctx.user_id(), req.account_id).await?;
	info!(user_id = %ctx.user_id(), account_id = %req.account_id, "Default account changed");

	Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/auth/memberships
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipView {
	account_id: AccountId,
	account_name: Box<str>,
	permissions: AccountPermissions,
	summary: AccountPermissionsSummary,
	default_account: bool,
	active: bool,
}

pub async fn get_memberships(
	State(app): State<App>,
	Auth(ctx): Auth,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<MembershipView>>>)> {
	let rows = app.auth_adapter.list_memberships(ctx.user_id()).await?;
	let memberships = rows
		.into_iter()
		.map(|row| MembershipView {
			active: row.account_id == ctx.active_account_id(),
			account_id: row.account_id,
			account_name: row.account_name,
			permissions: row.permissions,
			summary: row.permissions.summary(),
			default_account: row.default_account,
		})
		.collect();

	Ok((StatusCode::OK, Json(ApiResponse::new(memberships))))
}

// vim: ts=4
