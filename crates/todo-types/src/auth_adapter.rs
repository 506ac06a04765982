//! Adapter that manages and stores users, accounts and account memberships.
//!
//! This is the identity store the authentication middleware reads from when
//! it builds a `SessionContext`.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use crate::admin_permission::SiteAdminPermissions;
use crate::permission::AccountPermissions;
use crate::prelude::*;
use crate::session::{AccountMembership, Reputation, Requester};

/// Default access token lifetime in seconds
pub const ACCESS_TOKEN_EXPIRY: i64 = 3600;

/// Stored user record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
	pub user_id: UserId,
	pub username: Box<str>,
	pub reputation: Reputation,
	pub reputation_explanation: Option<Box<str>>,
	pub site_admin: SiteAdminPermissions,
	pub requires_password_change: bool,
	pub created_at: Timestamp,
}

impl UserRecord {
	pub fn requester(&self) -> Requester {
		Requester {
			user_id: self.user_id,
			reputation: self.reputation,
			site_admin: self.site_admin,
			requires_password_change: self.requires_password_change,
		}
	}
}

/// Data needed to create a new user
#[derive(Debug)]
pub struct CreateUserData<'a> {
	pub username: &'a str,
	pub password: &'a str,
	pub reputation: Reputation,
	pub site_admin: SiteAdminPermissions,
}

/// A member row of one account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMember {
	pub user_id: UserId,
	pub username: Box<str>,
	pub permissions: AccountPermissions,
	pub default_account: bool,
}

/// Picks the account a fresh login is bound to: the flagged default
/// membership, or the lowest account id when none is flagged.
pub fn default_account(memberships: &[AccountMembership]) -> Option<AccountId> {
	memberships
		.iter()
		.find(|m| m.default_account)
		.or_else(|| memberships.iter().min_by_key(|m| m.account_id))
		.map(|m| m.account_id)
}

#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	// Users
	async fn create_user(&self, data: CreateUserData<'_>) -> ClResult<UserId>;
	async fn read_user(&self, user_id: UserId) -> ClResult<UserRecord>;
	async fn read_user_id(&self, username: &str) -> ClResult<UserId>;
	/// Returns the user when the password matches, `PermissionDenied` otherwise
	async fn check_user_password(&self, username: &str, password: &str) -> ClResult<UserRecord>;
	async fn update_user_reputation(
		&self,
		user_id: UserId,
		reputation: Reputation,
		explanation: Option<&str>,
	) -> ClResult<()>;

	// Accounts
	/// Creates an account and makes `owner` a member holding `owner_permissions`
	async fn create_account(
		&self,
		name: &str,
		owner: UserId,
		owner_permissions: AccountPermissions,
	) -> ClResult<AccountId>;
	/// Adds `user_id` to an account.
	///
	/// `NotFound` when the account or the user does not exist, `Conflict` when
	/// the user is already a member. A user's first membership becomes their
	/// default account.
	async fn add_account_member(
		&self,
		account_id: AccountId,
		user_id: UserId,
		permissions: AccountPermissions,
	) -> ClResult<()>;
	/// Replaces the bits of an existing membership, `NotFound` if there is none
	async fn update_member_permissions(
		&self,
		account_id: AccountId,
		user_id: UserId,
		permissions: AccountPermissions,
	) -> ClResult<()>;
	async fn remove_account_member(&self, account_id: AccountId, user_id: UserId) -> ClResult<()>;
	/// Flags one membership as the default and clears the flag on the others
	async fn set_default_account(&self, user_id: UserId, account_id: AccountId) -> ClResult<()>;
	/// Members of one account, ordered by user id
	async fn list_account_members(&self, account_id: AccountId) -> ClResult<Vec<AccountMember>>;
	/// Memberships of `user_id` in accounts that are not terminated
	async fn list_memberships(&self, user_id: UserId) -> ClResult<Vec<AccountMembership>>;
	async fn terminate_account(&self, account_id: AccountId) -> ClResult<()>;
}


// vim: ts=4
