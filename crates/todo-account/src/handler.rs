use axum::{
	Json,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use todo_core::authz::{self, Scope};
use todo_core::extract::Auth;
use todo_types::auth_adapter::AccountMember;
use todo_types::permission::{AccountPermissions, AccountPermissionsSummary};
use todo_types::session::SessionContext;
use todo_types::types::ApiResponse;

/// Approves member management and returns the account it applies to
fn managed_account(ctx: &SessionContext) -> ClResult<AccountId> {
	let filter = authz::grant(ctx, AccountPermissions::MANAGE_MEMBERS, Scope::ActiveAccount)?;
	filter
		.account_id()
		.ok_or_else(|| Error::Internal("member management without an account".into()))
}

/// A manager only hands out, and only touches members holding, bits they
/// hold themselves in the active account.
fn check_covered(ctx: &SessionContext, perms: AccountPermissions) -> ClResult<()> {
	let own = ctx.active_permissions().unwrap_or_default();
	if own.contains(perms) {
		Ok(())
	} else {
		warn!(
			user_id = %ctx.user_id(),
			account_id = %ctx.active_account_id(),
			held = ?own,
			requested = ?perms,
			"Member change beyond the caller's own permissions"
		);
		Err(Error::PermissionDenied)
	}
}

fn check_not_self(ctx: &SessionContext, user_id: UserId) -> ClResult<()> {
	if user_id == ctx.user_id() {
		return Err(Error::ValidationError("cannot change your own membership".into()));
	}
	Ok(())
}

async fn read_member(app: &App, account_id: AccountId, user_id: UserId) -> ClResult<AccountMember> {
	app.auth_adapter
		.list_account_members(account_id)
		.await?
		.into_iter()
		.find(|m| m.user_id == user_id)
		.ok_or(Error::NotFound)
}

/// # Member
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
	user_id: UserId,
	username: Option<Box<str>>,
	permissions: AccountPermissions,
	summary: AccountPermissionsSummary,
}

impl MemberView {
	fn new(user_id: UserId, username: Option<Box<str>>, permissions: AccountPermissions) -> Self {
		Self { user_id, username, permissions, summary: permissions.summary() }
	}
}

impl From<AccountMember> for MemberView {
	fn from(member: AccountMember) -> Self {
		Self::new(member.user_id, Some(member.username), member.permissions)
	}
}

/// # GET /api/account/members
pub async fn list_members(
	State(app): State<App>,
	Auth(ctx): Auth,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<MemberView>>>)> {
	let account_id = managed_account(&ctx)?;

	let members: Vec<MemberView> = app
		.auth_adapter
		.list_account_members(account_id)
		.await?
		.into_iter()
		.map(MemberView::from)
		.collect();
	debug!(account_id = %account_id, count = members.len(), "Listed members");

	Ok((StatusCode::OK, Json(ApiResponse::new(members))))
}

/// # POST /api/account/members
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberReq {
	user_id: UserId,
	#[serde(default)]
	permissions: AccountPermissions,
}

pub async fn post_member(
	State(app): State<App>,
	Auth(ctx): Auth,
	req: Result<Json<AddMemberReq>, JsonRejection>,
) -> ClResult<(StatusCode, Json<ApiResponse<MemberView>>)> {
	let account_id = managed_account(&ctx)?;
	let Json(req) = req?;
	check_covered(&ctx, req.permissions)?;

	app.auth_adapter.add_account_member(account_id, req.user_id, req.permissions).await?;
	info!(
		user_id = %ctx.user_id(),
		account_id = %account_id,
		member = %req.user_id,
		permissions = ?req.permissions,
		"Member added"
	);

	let member = MemberView::new(req.user_id, None, req.permissions);
	Ok((StatusCode::CREATED, Json(ApiResponse::new(member))))
}

/// # PATCH /api/account/members/{user_id}/permissions
#[derive(Debug, Default, Deserialize)]
pub struct ChangePermissionsReq {
	#[serde(default)]
	grant: AccountPermissions,
	#[serde(default)]
	revoke: AccountPermissions,
}

impl ChangePermissionsReq {
	fn apply(&self, current: AccountPermissions) -> AccountPermissions {
		current.union(self.grant).without(self.revoke)
	}
}

pub async fn patch_member_permissions(
	State(app): State<App>,
	Auth(ctx): Auth,
	user_id: Result<Path<UserId>, PathRejection>,
	req: Result<Json<ChangePermissionsReq>, JsonRejection>,
) -> ClResult<(StatusCode, Json<ApiResponse<MemberView>>)> {
	let account_id = managed_account(&ctx)?;
	let (Path(user_id), Json(req)) = (user_id?, req?);
	check_not_self(&ctx, user_id)?;

	let member = read_member(&app, account_id, user_id).await?;
	check_covered(&ctx, member.permissions)?;
	check_covered(&ctx, req.grant)?;
	let permissions = req.apply(member.permissions);

	app.auth_adapter.update_member_permissions(account_id, user_id, permissions).await?;
	info!(
		user_id = %ctx.user_id(),
		account_id = %account_id,
		member = %user_id,
		from = ?member.permissions,
		to = ?permissions,
		"Member permissions changed"
	);

	let member = MemberView::new(user_id, Some(member.username), permissions);
	Ok((StatusCode::OK, Json(ApiResponse::new(member))))
}

/// # DELETE /api/account/members/{user_id}
#[derive(Debug, Default, Deserialize)]
pub struct RemoveMemberQuery {
	reason: Option<String>,
}

pub async fn delete_member(
	State(app): State<App>,
	Auth(ctx): Auth,
	user_id: Result<Path<UserId>, PathRejection>,
	query: Result<Query<RemoveMemberQuery>, QueryRejection>,
) -> ClResult<StatusCode> {
	let account_id = managed_account(&ctx)?;
	let (Path(user_id), Query(query)) = (user_id?, query?);
	check_not_self(&ctx, user_id)?;

	let member = read_member(&app, account_id, user_id).await?;
	check_covered(&ctx, member.permissions)?;

	app.auth_adapter.remove_account_member(account_id, user_id).await?;
	info!(
		user_id = %ctx.user_id(),
		account_id = %account_id,
		member = %user_id,
		reason = query.reason.as_deref().unwrap_or_default(),
		"Member removed"
	);

	Ok(StatusCode::NO_CONTENT)
}


// vim: ts=4
