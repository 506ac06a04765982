//! Utility functions for database operations

use sqlx::sqlite::{Sqlite, SqliteRow};

use todo_types::meta_adapter::AccountFilter;
use todo_types::prelude::*;

pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> ClResult<T>
where
	F: FnOnce(&SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(ref row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> ClResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

/// Appends the account condition of `filter` to a WHERE clause
///
/// `AccountFilter::All` adds nothing.
pub(crate) fn push_account_filter(
	query: &mut sqlx::QueryBuilder<'_, Sqlite>,
	filter: AccountFilter,
) {
	if let AccountFilter::Account(account_id) = filter {
		query.push(" AND belongs_to_account=").push_bind(db_id(account_id.0));
	}
}

pub(crate) fn db_id(id: u64) -> i64 {
	id.cast_signed()
}

pub(crate) fn from_db_id(id: i64) -> u64 {
	id.cast_unsigned()
}

// vim: ts=4
