//! Adapter that stores tenant-scoped resources.
//!
//! Every query takes the account scope explicitly. Implementations must
//! never derive the scope themselves: handlers pass the `AccountFilter` the
//! authorization gate handed out.

use async_trait::async_trait;
use serde::Serialize;
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

/// Account scope of a storage query, as approved by the authorization gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountFilter {
	/// Only rows owned by this account
	Account(AccountId),
	/// No account filter (site-admin view)
	All,
}

impl AccountFilter {
	pub fn account_id(self) -> Option<AccountId> {
		match self {
			AccountFilter::Account(account_id) => Some(account_id),
			AccountFilter::All => None,
		}
	}

	pub fn admits(self, account_id: AccountId) -> bool {
		match self {
			AccountFilter::Account(allowed) => allowed == account_id,
			AccountFilter::All => true,
		}
	}
}

/// A to-do item
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
	pub item_id: ItemId,
	pub name: Box<str>,
	pub details: Box<str>,
	pub belongs_to_account: AccountId,
	pub created_by: UserId,
	pub created_at: Timestamp,
	pub updated_at: Option<Timestamp>,
}

#[derive(Debug)]
pub struct CreateItemData<'a> {
	pub name: &'a str,
	pub details: &'a str,
}

#[derive(Debug, Default)]
pub struct UpdateItemData<'a> {
	pub name: Option<&'a str>,
	pub details: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct ListItemOptions {
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	/// Lists non-archived items within `filter`, newest first
	async fn list_items(&self, filter: AccountFilter, opts: &ListItemOptions)
	-> ClResult<Vec<Item>>;
	async fn count_items(&self, filter: AccountFilter) -> ClResult<u64>;
	async fn create_item(
		&self,
		account_id: AccountId,
		created_by: UserId,
		data: CreateItemData<'_>,
	) -> ClResult<Item>;
	/// `NotFound` when the item is archived or outside `filter`
	async fn read_item(&self, filter: AccountFilter, item_id: ItemId) -> ClResult<Item>;
	async fn update_item(
		&self,
		filter: AccountFilter,
		item_id: ItemId,
		data: UpdateItemData<'_>,
	) -> ClResult<Item>;
	async fn archive_item(&self, filter: AccountFilter, item_id: ItemId) -> ClResult<()>;
}


// vim: ts=4
