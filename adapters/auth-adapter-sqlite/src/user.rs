//! User management operations

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::crypto;
use crate::utils::*;
use todo_types::admin_permission::SiteAdminPermissions;
use todo_types::auth_adapter::{CreateUserData, UserRecord};
use todo_types::prelude::*;
use todo_types::session::Reputation;

const USER_COLUMNS: &str = "user_id, username, reputation, reputation_explanation, site_admin, \
	requires_password_change, created_at";

fn user_from_row(row: &SqliteRow) -> Result<UserRecord, sqlx::Error> {
	let reputation: String = row.try_get("reputation")?;
	let site_admin: i64 = row.try_get("site_admin")?;
	Ok(UserRecord {
		user_id: UserId(from_db_id(row.try_get("user_id")?)),
		username: row.try_get::<String, _>("username")?.into(),
		reputation: reputation.parse::<Reputation>().map_err(decode_err)?,
		reputation_explanation: row
			.try_get::<Option<String>, _>("reputation_explanation")?
			.map(Into::into),
		site_admin: SiteAdminPermissions::from(site_admin),
		requires_password_change: row.try_get("requires_password_change")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create_user(db: &SqlitePool, data: CreateUserData<'_>) -> ClResult<UserId> {
	let password_hash = crypto::generate_password_hash(data.password.into()).await?;

	let res = sqlx::query(
		"INSERT INTO users (username, password, reputation, site_admin) VALUES (?1, ?2, ?3, ?4)
		RETURNING user_id",
	)
	.bind(data.username)
	.bind(password_hash.as_ref())
	.bind(data.reputation.as_str())
	.bind(i64::from(data.site_admin))
	.fetch_one(db)
	.await;

	match res {
		Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
			Err(Error::Conflict(format!("username {} is taken", data.username)))
		}
		res => map_res(res, |row| row.try_get("user_id").map(from_db_id).map(UserId)),
	}
}

pub(crate) async fn read_user(db: &SqlitePool, user_id: UserId) -> ClResult<UserRecord> {
	let res = sqlx::query(&format!("SELECT {} FROM users WHERE user_id = ?1", USER_COLUMNS))
		.bind(db_id(user_id.0))
		.fetch_one(db)
		.await;

	map_res(res, user_from_row)
}

pub(crate) async fn read_user_id(db: &SqlitePool, username: &str) -> ClResult<UserId> {
	let res = sqlx::query("SELECT user_id FROM users WHERE username = ?1")
		.bind(username)
		.fetch_one(db)
		.await;

	map_res(res, |row| row.try_get("user_id").map(from_db_id).map(UserId))
}

pub(crate) async fn check_user_password(
	db: &SqlitePool,
	username: &str,
	password: &str,
) -> ClResult<UserRecord> {
	let query = format!("SELECT {}, password FROM users WHERE username = ?1", USER_COLUMNS);
	let res = sqlx::query(&query).bind(username).fetch_one(db).await;

	let (user, password_hash) = map_res(res, |row| {
		Ok((user_from_row(row)?, row.try_get::<String, _>("password")?))
	})
	.map_err(|e| match e {
		Error::NotFound => Error::PermissionDenied,
		e => e,
	})?;

	crypto::check_password(password.into(), password_hash.into()).await?;
	Ok(user)
}

pub(crate) async fn update_user_reputation(
	db: &SqlitePool,
	user_id: UserId,
	reputation: Reputation,
	explanation: Option<&str>,
) -> ClResult<()> {
	let res = sqlx::query(
		"UPDATE users SET reputation = ?2, reputation_explanation = ?3, updated_at = unixepoch()
		WHERE user_id = ?1",
	)
	.bind(db_id(user_id.0))
	.bind(reputation.as_str())
	.bind(explanation)
	.execute(db)
	.await;

	affected_res(res)
}

// vim: ts=4
