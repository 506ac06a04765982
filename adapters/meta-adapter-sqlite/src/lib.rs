//! SQLite item store for the Todo service.
//!
//! The adapter never decides the account scope itself. Each call receives the
//! `AccountFilter` the authorization gate produced and turns it into a WHERE
//! condition on `belongs_to_account`.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use todo_types::meta_adapter::{
	AccountFilter, CreateItemData, Item, ListItemOptions, MetaAdapter, UpdateItemData,
};
use todo_types::prelude::*;

mod item;
mod schema;
mod utils;

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	/// Opens (or creates) `meta.db` in `path`
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		tokio::fs::create_dir_all(path.as_ref()).await?;
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref().join("meta.db"))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl MetaAdapter for MetaAdapterSqlite {
	async fn list_items(
		&self,
		filter: AccountFilter,
		opts: &ListItemOptions,
	) -> ClResult<Vec<Item>> {
		item::list(&self.db, filter, opts).await
	}

	async fn count_items(&self, filter: AccountFilter) -> ClResult<u64> {
		item::count(&self.db, filter).await
	}

	async fn create_item(
		&self,
		account_id: AccountId,
		created_by: UserId,
		data: CreateItemData<'_>,
	) -> ClResult<Item> {
		item::create(&self.db, account_id, created_by, data).await
	}

	async fn read_item(&self, filter: AccountFilter, item_id: ItemId) -> ClResult<Item> {
		item::read(&self.db, filter, item_id).await
	}

	async fn update_item(
		&self,
		filter: AccountFilter,
		item_id: ItemId,
		data: UpdateItemData<'_>,
	) -> ClResult<Item> {
		item::update(&self.db, filter, item_id, data).await
	}

	async fn archive_item(&self, filter: AccountFilter, item_id: ItemId) -> ClResult<()> {
		item::archive(&self.db, filter, item_id).await
	}
}

// vim: ts=4
