//! Item persistence
//!
//! Every read and write carries the `AccountFilter` it was handed. An item
//! outside the filter behaves exactly like a missing one.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use todo_types::meta_adapter::{
	AccountFilter, CreateItemData, Item, ListItemOptions, UpdateItemData,
};
use todo_types::prelude::*;

const ITEM_COLUMNS: &str =
	"item_id, name, details, belongs_to_account, created_by, created_at, updated_at";

fn item_from_row(row: &SqliteRow) -> Result<Item, sqlx::Error> {
	Ok(Item {
		item_id: ItemId(from_db_id(row.try_get("item_id")?)),
		name: row.try_get::<String, _>("name")?.into(),
		details: row.try_get::<String, _>("details")?.into(),
		belongs_to_account: AccountId(from_db_id(row.try_get("belongs_to_account")?)),
		created_by: UserId(from_db_id(row.try_get("created_by")?)),
		created_at: Timestamp(row.try_get("created_at")?),
		updated_at: row.try_get::<Option<i64>, _>("updated_at")?.map(Timestamp),
	})
}

pub(crate) async fn list(
	db: &SqlitePool,
	filter: AccountFilter,
	opts: &ListItemOptions,
) -> ClResult<Vec<Item>> {
	let mut query = sqlx::QueryBuilder::new(format!(
		"SELECT {} FROM items WHERE archived_at IS NULL",
		ITEM_COLUMNS
	));
	push_account_filter(&mut query, filter);

	// SQLite needs a LIMIT before OFFSET, -1 means unbounded
	query.push(" ORDER BY item_id DESC LIMIT ");
	query.push_bind(opts.limit.map_or(-1, i64::from));
	query.push(" OFFSET ").push_bind(i64::from(opts.offset.unwrap_or(0)));

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	collect_res(rows.iter().map(item_from_row))
}

pub(crate) async fn count(db: &SqlitePool, filter: AccountFilter) -> ClResult<u64> {
	let mut query = sqlx::QueryBuilder::new("SELECT count(*) FROM items WHERE archived_at IS NULL");
	push_account_filter(&mut query, filter);

	let count: i64 = query
		.build_query_scalar()
		.fetch_one(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(count.cast_unsigned())
}

pub(crate) async fn create(
	db: &SqlitePool,
	account_id: AccountId,
	created_by: UserId,
	data: CreateItemData<'_>,
) -> ClResult<Item> {
	let res = sqlx::query(&format!(
		"INSERT INTO items (name, details, belongs_to_account, created_by) VALUES (?1, ?2, ?3, ?4)
		RETURNING {}",
		ITEM_COLUMNS
	))
	.bind(data.name)
	.bind(data.details)
	.bind(db_id(account_id.0))
	.bind(db_id(created_by.0))
	.fetch_one(db)
	.await;

	map_res(res, item_from_row)
}

pub(crate) async fn read(
	db: &SqlitePool,
	filter: AccountFilter,
	item_id: ItemId,
) -> ClResult<Item> {
	let mut query = sqlx::QueryBuilder::new(format!(
		"SELECT {} FROM items WHERE archived_at IS NULL AND item_id=",
		ITEM_COLUMNS
	));
	query.push_bind(db_id(item_id.0));
	push_account_filter(&mut query, filter);

	let res = query.build().fetch_one(db).await;
	map_res(res, item_from_row)
}

pub(crate) async fn update(
	db: &SqlitePool,
	filter: AccountFilter,
	item_id: ItemId,
	data: UpdateItemData<'_>,
) -> ClResult<Item> {
	let mut query = sqlx::QueryBuilder::new("UPDATE items SET updated_at=unixepoch()");
	if let Some(name) = data.name {
		query.push(", name=").push_bind(name);
	}
	if let Some(details) = data.details {
		query.push(", details=").push_bind(details);
	}
	query.push(" WHERE archived_at IS NULL AND item_id=").push_bind(db_id(item_id.0));
	push_account_filter(&mut query, filter);
	query.push(" RETURNING ").push(ITEM_COLUMNS);

	let res = query.build().fetch_one(db).await;
	map_res(res, item_from_row)
}

pub(crate) async fn archive(
	db: &SqlitePool,
	filter: AccountFilter,
	item_id: ItemId,
) -> ClResult<()> {
	let mut query = sqlx::QueryBuilder::new(
		"UPDATE items SET archived_at=unixepoch() WHERE archived_at IS NULL AND item_id=",
	);
	query.push_bind(db_id(item_id.0));
	push_account_filter(&mut query, filter);

	let res = query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// vim: ts=4
