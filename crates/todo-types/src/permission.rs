//! Per-account capability bitmask.
//!
//! An `AccountPermissions` value is what a user holds inside one account
//! membership. Every capability is a single bit, grouped four to a resource
//! kind (read, create, update, archive).
//!
//! The bit layout is a wire format: values are persisted as integers and
//! surfaced raw to clients. Bits 15..=31 are reserved. A bit keeps its
//! meaning forever once assigned; new capabilities are appended from bit 15
//! upward and existing bits are never renumbered. Unknown bits are carried
//! through untouched.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

use crate::prelude::*;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountPermissions(u32);

impl AccountPermissions {
	pub const EMPTY: Self = Self(0);

	// Items
	pub const READ_ITEMS: Self = Self(1 << 0);
	pub const CREATE_ITEMS: Self = Self(1 << 1);
	pub const UPDATE_ITEMS: Self = Self(1 << 2);
	pub const ARCHIVE_ITEMS: Self = Self(1 << 3);

	// Webhooks
	pub const READ_WEBHOOKS: Self = Self(1 << 4);
	pub const CREATE_WEBHOOKS: Self = Self(1 << 5);
	pub const UPDATE_WEBHOOKS: Self = Self(1 << 6);
	pub const ARCHIVE_WEBHOOKS: Self = Self(1 << 7);

	// API clients
	pub const READ_API_CLIENTS: Self = Self(1 << 8);
	pub const CREATE_API_CLIENTS: Self = Self(1 << 9);
	pub const UPDATE_API_CLIENTS: Self = Self(1 << 10);
	pub const ARCHIVE_API_CLIENTS: Self = Self(1 << 11);

	// Account-level
	pub const READ_AUDIT_LOG_ENTRIES: Self = Self(1 << 12);
	pub const TRANSFER_ACCOUNT_OWNERSHIP: Self = Self(1 << 13);
	pub const MANAGE_MEMBERS: Self = Self(1 << 14);

	/// Every bit that has been assigned a meaning
	pub const ALL_KNOWN: Self = Self((1 << 15) - 1);
	/// Bits that are not assigned yet. Never reinterpret these.
	pub const RESERVED: Self = Self(!Self::ALL_KNOWN.0);

	const NAMED: [(Self, &'static str); 15] = [
		(Self::READ_ITEMS, "read_items"),
		(Self::CREATE_ITEMS, "create_items"),
		(Self::UPDATE_ITEMS, "update_items"),
		(Self::ARCHIVE_ITEMS, "archive_items"),
		(Self::READ_WEBHOOKS, "read_webhooks"),
		(Self::CREATE_WEBHOOKS, "create_webhooks"),
		(Self::UPDATE_WEBHOOKS, "update_webhooks"),
		(Self::ARCHIVE_WEBHOOKS, "archive_webhooks"),
		(Self::READ_API_CLIENTS, "read_api_clients"),
		(Self::CREATE_API_CLIENTS, "create_api_clients"),
		(Self::UPDATE_API_CLIENTS, "update_api_clients"),
		(Self::ARCHIVE_API_CLIENTS, "archive_api_clients"),
		(Self::READ_AUDIT_LOG_ENTRIES, "read_audit_log_entries"),
		(Self::TRANSFER_ACCOUNT_OWNERSHIP, "transfer_account_ownership"),
		(Self::MANAGE_MEMBERS, "manage_members"),
	];

	/// Wraps a raw bit pattern. No validation: unknown bits are preserved.
	pub const fn new(raw: u32) -> Self {
		Self(raw)
	}

	pub const fn bits(self) -> u32 {
		self.0
	}

	pub const fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// True iff any bit of `flag` is also set in `self`
	pub const fn has_permission(self, flag: Self) -> bool {
		self.0 & flag.0 != 0
	}

	/// True iff every bit of `other` is also set in `self`
	pub const fn contains(self, other: Self) -> bool {
		self.0 & other.0 == other.0
	}

	/// Returns a new set holding the bits of both
	pub const fn union(self, other: Self) -> Self {
		Self(self.0 | other.0)
	}

	/// Returns a new set with the bits of `other` cleared
	pub const fn without(self, other: Self) -> Self {
		Self(self.0 & !other.0)
	}

	/// Names of the assigned capabilities present in this set
	pub fn capability_names(self) -> Vec<&'static str> {
		Self::NAMED
			.iter()
			.filter(|(flag, _)| self.has_permission(*flag))
			.map(|(_, name)| *name)
			.collect()
	}

	pub fn can_read_items(self) -> bool {
		self.has_permission(Self::READ_ITEMS)
	}
	pub fn can_create_items(self) -> bool {
		self.has_permission(Self::CREATE_ITEMS)
	}
	pub fn can_update_items(self) -> bool {
		self.has_permission(Self::UPDATE_ITEMS)
	}
	pub fn can_archive_items(self) -> bool {
		self.has_permission(Self::ARCHIVE_ITEMS)
	}

	pub fn can_read_webhooks(self) -> bool {
		self.has_permission(Self::READ_WEBHOOKS)
	}
	pub fn can_create_webhooks(self) -> bool {
		self.has_permission(Self::CREATE_WEBHOOKS)
	}
	pub fn can_update_webhooks(self) -> bool {
		self.has_permission(Self::UPDATE_WEBHOOKS)
	}
	pub fn can_archive_webhooks(self) -> bool {
		self.has_permission(Self::ARCHIVE_WEBHOOKS)
	}

	pub fn can_read_api_clients(self) -> bool {
		self.has_permission(Self::READ_API_CLIENTS)
	}
	pub fn can_create_api_clients(self) -> bool {
		self.has_permission(Self::CREATE_API_CLIENTS)
	}
	pub fn can_update_api_clients(self) -> bool {
		self.has_permission(Self::UPDATE_API_CLIENTS)
	}
	pub fn can_archive_api_clients(self) -> bool {
		self.has_permission(Self::ARCHIVE_API_CLIENTS)
	}

	pub fn can_read_audit_log_entries(self) -> bool {
		self.has_permission(Self::READ_AUDIT_LOG_ENTRIES)
	}
	pub fn can_transfer_account_ownership(self) -> bool {
		self.has_permission(Self::TRANSFER_ACCOUNT_OWNERSHIP)
	}
	pub fn can_manage_members(self) -> bool {
		self.has_permission(Self::MANAGE_MEMBERS)
	}

	pub fn summary(self) -> AccountPermissionsSummary {
		AccountPermissionsSummary {
			can_read_items: self.can_read_items(),
			can_create_items: self.can_create_items(),
			can_update_items: self.can_update_items(),
			can_archive_items: self.can_archive_items(),
			can_read_webhooks: self.can_read_webhooks(),
			can_create_webhooks: self.can_create_webhooks(),
			can_update_webhooks: self.can_update_webhooks(),
			can_archive_webhooks: self.can_archive_webhooks(),
			can_read_api_clients: self.can_read_api_clients(),
			can_create_api_clients: self.can_create_api_clients(),
			can_update_api_clients: self.can_update_api_clients(),
			can_archive_api_clients: self.can_archive_api_clients(),
			can_read_audit_log_entries: self.can_read_audit_log_entries(),
			can_transfer_account_ownership: self.can_transfer_account_ownership(),
			can_manage_members: self.can_manage_members(),
		}
	}
}

impl BitOr for AccountPermissions {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		self.union(rhs)
	}
}

impl std::fmt::Debug for AccountPermissions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "AccountPermissions({:#x} {:?})", self.0, self.capability_names())
	}
}

impl From<u32> for AccountPermissions {
	fn from(raw: u32) -> Self {
		Self(raw)
	}
}

impl From<AccountPermissions> for i64 {
	fn from(perms: AccountPermissions) -> Self {
		i64::from(perms.0)
	}
}

/// Storage codec: loads a value from a scalar integer column.
impl TryFrom<i64> for AccountPermissions {
	type Error = Error;

	fn try_from(value: i64) -> ClResult<Self> {
		u32::try_from(value).map(Self).map_err(|_| {
			warn!("Account permission value out of range: {}", value);
			Error::Parse
		})
	}
}

/// Named-boolean view of an `AccountPermissions` value for clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPermissionsSummary {
	pub can_read_items: bool,
	pub can_create_items: bool,
	pub can_update_items: bool,
	pub can_archive_items: bool,
	pub can_read_webhooks: bool,
	pub can_create_webhooks: bool,
	pub can_update_webhooks: bool,
	pub can_archive_webhooks: bool,
	pub can_read_api_clients: bool,
	pub can_create_api_clients: bool,
	pub can_update_api_clients: bool,
	pub can_archive_api_clients: bool,
	pub can_read_audit_log_entries: bool,
	pub can_transfer_account_ownership: bool,
	pub can_manage_members: bool,
}


// vim: ts=4
