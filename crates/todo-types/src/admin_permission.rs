//! Site-wide administrative capability bitmask.
//!
//! Independent of account memberships. Holding any bit at all makes the
//! principal a service admin (`is_service_admin`), which is a separate
//! question from holding one specific bit.
//!
//! Bits 4..=63 are reserved; assigned bits are never renumbered.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteAdminPermissions(u64);

impl SiteAdminPermissions {
	pub const EMPTY: Self = Self(0);

	pub const CYCLE_COOKIE_SECRET: Self = Self(1 << 0);
	pub const BAN_USERS: Self = Self(1 << 1);
	pub const TERMINATE_ACCOUNTS: Self = Self(1 << 2);
	pub const IMPERSONATE_ACCOUNTS: Self = Self(1 << 3);

	pub const ALL_KNOWN: Self = Self((1 << 4) - 1);
	pub const RESERVED: Self = Self(!Self::ALL_KNOWN.0);

	const NAMED: [(Self, &'static str); 4] = [
		(Self::CYCLE_COOKIE_SECRET, "cycle_cookie_secret"),
		(Self::BAN_USERS, "ban_users"),
		(Self::TERMINATE_ACCOUNTS, "terminate_accounts"),
		(Self::IMPERSONATE_ACCOUNTS, "impersonate_accounts"),
	];

	pub const fn new(raw: u64) -> Self {
		Self(raw)
	}

	pub const fn bits(self) -> u64 {
		self.0
	}

	pub const fn has_permission(self, flag: Self) -> bool {
		self.0 & flag.0 != 0
	}

	pub const fn union(self, other: Self) -> Self {
		Self(self.0 | other.0)
	}

	pub const fn without(self, other: Self) -> Self {
		Self(self.0 & !other.0)
	}

	/// True for any nonzero vector, whichever bit is set
	pub const fn is_service_admin(self) -> bool {
		self.0 != 0
	}

	pub fn capability_names(self) -> Vec<&'static str> {
		Self::NAMED
			.iter()
			.filter(|(flag, _)| self.has_permission(*flag))
			.map(|(_, name)| *name)
			.collect()
	}

	pub fn can_cycle_cookie_secrets(self) -> bool {
		self.has_permission(Self::CYCLE_COOKIE_SECRET)
	}

	pub fn can_ban_users(self) -> bool {
		self.has_permission(Self::BAN_USERS)
	}

	pub fn can_terminate_accounts(self) -> bool {
		self.has_permission(Self::TERMINATE_ACCOUNTS)
	}

	pub fn can_impersonate_accounts(self) -> bool {
		self.has_permission(Self::IMPERSONATE_ACCOUNTS)
	}

	/// Named-boolean view; `None` for non-admins
	pub fn summary(self) -> Option<SiteAdminPermissionsSummary> {
		if !self.is_service_admin() {
			return None;
		}

		Some(SiteAdminPermissionsSummary {
			can_cycle_cookie_secrets: self.can_cycle_cookie_secrets(),
			can_ban_users: self.can_ban_users(),
			can_terminate_accounts: self.can_terminate_accounts(),
			can_impersonate_accounts: self.can_impersonate_accounts(),
		})
	}
}

impl BitOr for SiteAdminPermissions {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		self.union(rhs)
	}
}

impl std::fmt::Debug for SiteAdminPermissions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "SiteAdminPermissions({:#x} {:?})", self.0, self.capability_names())
	}
}

impl From<u64> for SiteAdminPermissions {
	fn from(raw: u64) -> Self {
		Self(raw)
	}
}

/// Storage codec. SQL integer columns are signed, so the high bit is
/// carried through a bit-preserving reinterpretation.
impl From<SiteAdminPermissions> for i64 {
	fn from(perms: SiteAdminPermissions) -> Self {
		perms.0.cast_signed()
	}
}

impl From<i64> for SiteAdminPermissions {
	fn from(value: i64) -> Self {
		Self(value.cast_unsigned())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAdminPermissionsSummary {
	pub can_cycle_cookie_secrets: bool,
	pub can_ban_users: bool,
	pub can_terminate_accounts: bool,
	pub can_impersonate_accounts: bool,
}


// vim: ts=4
