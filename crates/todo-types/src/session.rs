//! Per-request identity snapshot.
//!
//! A `SessionContext` is built once per request from already-fetched identity
//! data and never changes afterwards. It holds no handles into storage.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::admin_permission::SiteAdminPermissions;
use crate::permission::AccountPermissions;
use crate::prelude::*;

// Reputation //
//************//
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reputation {
	#[default]
	Good,
	Unverified,
	Banned,
	Terminated,
}

impl Reputation {
	pub fn as_str(self) -> &'static str {
		match self {
			Reputation::Good => "good",
			Reputation::Unverified => "unverified",
			Reputation::Banned => "banned",
			Reputation::Terminated => "terminated",
		}
	}

	/// Banned and terminated users may not make authenticated requests
	pub fn is_locked_out(self) -> bool {
		matches!(self, Reputation::Banned | Reputation::Terminated)
	}
}

impl std::str::FromStr for Reputation {
	type Err = Error;

	fn from_str(s: &str) -> ClResult<Self> {
		match s {
			"good" => Ok(Reputation::Good),
			"unverified" => Ok(Reputation::Unverified),
			"banned" => Ok(Reputation::Banned),
			"terminated" => Ok(Reputation::Terminated),
			_ => Err(Error::Parse),
		}
	}
}

impl std::fmt::Display for Reputation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

// AccountMembership //
//*******************//
/// One membership row as returned by the identity store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMembership {
	pub account_id: AccountId,
	pub account_name: Box<str>,
	pub permissions: AccountPermissions,
	pub default_account: bool,
}

// Requester //
//***********//
/// The authenticated user behind a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
	pub user_id: UserId,
	pub reputation: Reputation,
	pub site_admin: SiteAdminPermissions,
	pub requires_password_change: bool,
}

impl Requester {
	pub fn new(user_id: UserId, site_admin: SiteAdminPermissions) -> Self {
		Self { user_id, reputation: Reputation::Good, site_admin, requires_password_change: false }
	}
}

// SessionContext //
//****************//
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
	requester: Requester,
	active_account_id: AccountId,
	memberships: HashMap<AccountId, AccountPermissions>,
}

impl SessionContext {
	/// Builds a session for a user in good standing.
	///
	/// Fails with `Error::InvalidSession` when `active_account_id` is not a key
	/// of `memberships`. There is no fallback account.
	pub fn build(
		user_id: UserId,
		active_account_id: AccountId,
		memberships: HashMap<AccountId, AccountPermissions>,
		site_admin: SiteAdminPermissions,
	) -> ClResult<Self> {
		Self::for_requester(Requester::new(user_id, site_admin), active_account_id, memberships)
	}

	pub fn for_requester(
		requester: Requester,
		active_account_id: AccountId,
		memberships: HashMap<AccountId, AccountPermissions>,
	) -> ClResult<Self> {
		if !memberships.contains_key(&active_account_id) {
			debug!(
				user_id = %requester.user_id,
				active_account_id = %active_account_id,
				accounts = ?memberships.keys().collect::<Vec<_>>(),
				"Active account is not among the user's memberships"
			);
			return Err(Error::InvalidSession);
		}

		Ok(Self { requester, active_account_id, memberships })
	}

	/// Builds the membership index from identity-store rows
	pub fn from_memberships(
		requester: Requester,
		active_account_id: AccountId,
		rows: &[AccountMembership],
	) -> ClResult<Self> {
		let memberships = rows.iter().map(|row| (row.account_id, row.permissions)).collect();
		Self::for_requester(requester, active_account_id, memberships)
	}

	pub fn requester(&self) -> &Requester {
		&self.requester
	}

	pub fn user_id(&self) -> UserId {
		self.requester.user_id
	}

	pub fn active_account_id(&self) -> AccountId {
		self.active_account_id
	}

	pub fn site_admin_permissions(&self) -> SiteAdminPermissions {
		self.requester.site_admin
	}

	pub fn is_service_admin(&self) -> bool {
		self.requester.site_admin.is_service_admin()
	}

	pub fn reputation(&self) -> Reputation {
		self.requester.reputation
	}

	pub fn requires_password_change(&self) -> bool {
		self.requester.requires_password_change
	}

	/// Permissions held in `account_id`; `None` means no membership at all
	pub fn membership(&self, account_id: AccountId) -> Option<AccountPermissions> {
		self.memberships.get(&account_id).copied()
	}

	pub fn active_permissions(&self) -> Option<AccountPermissions> {
		self.membership(self.active_account_id)
	}

	pub fn memberships(&self) -> &HashMap<AccountId, AccountPermissions> {
		&self.memberships
	}

	pub fn account_ids(&self) -> Vec<AccountId> {
		let mut ids: Vec<AccountId> = self.memberships.keys().copied().collect();
		ids.sort_unstable();
		ids
	}
}


// vim: ts=4
