//! Utility functions for database operations

use sqlx::sqlite::SqliteRow;

use todo_types::prelude::*;

/// Log database errors
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a query result to a value using a closure
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

/// Collect result iterator into a vector
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> ClResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

/// Map an UPDATE/DELETE result, turning zero affected rows into `NotFound`
pub(crate) fn affected_res(
	res: Result<sqlx::sqlite::SqliteQueryResult, sqlx::Error>,
) -> ClResult<()> {
	match res {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => Ok(()),
		Err(e) => {
			inspect(&e);
			Err(Error::DbError)
		}
	}
}

/// Ids are unsigned in the API and signed in SQLite
pub(crate) fn db_id(id: u64) -> i64 {
	id.cast_signed()
}

pub(crate) fn from_db_id(id: i64) -> u64 {
	id.cast_unsigned()
}

pub(crate) fn decode_err(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
	sqlx::Error::Decode(Box::new(err))
}

// vim: ts=4
