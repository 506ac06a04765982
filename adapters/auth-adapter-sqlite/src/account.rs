//! Accounts and account memberships

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use todo_types::auth_adapter::AccountMember;
use todo_types::permission::AccountPermissions;
use todo_types::prelude::*;
use todo_types::session::AccountMembership;

pub(crate) async fn create_account(
	db: &SqlitePool,
	name: &str,
	owner: UserId,
	owner_permissions: AccountPermissions,
) -> ClResult<AccountId> {
	let mut tx = db.begin().await.inspect_err(inspect).or(Err(Error::DbError))?;

	let res = sqlx::query("INSERT INTO accounts (name, owner) VALUES (?1, ?2) RETURNING account_id")
		.bind(name)
		.bind(db_id(owner.0))
		.fetch_one(&mut *tx)
		.await;
	let account_id = map_res(res, |row| row.try_get("account_id").map(from_db_id).map(AccountId))?;

	// The first account of a user becomes their default
	sqlx::query(
		"INSERT INTO account_members (account_id, user_id, permissions, default_account)
		VALUES (?1, ?2, ?3, NOT EXISTS (SELECT 1 FROM account_members WHERE user_id = ?2))",
	)
	.bind(db_id(account_id.0))
	.bind(db_id(owner.0))
	.bind(i64::from(owner_permissions))
	.execute(&mut *tx)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	tx.commit().await.inspect_err(inspect).or(Err(Error::DbError))?;
	Ok(account_id)
}

pub(crate) async fn add_account_member(
	db: &SqlitePool,
	account_id: AccountId,
	user_id: UserId,
	permissions: AccountPermissions,
) -> ClResult<()> {
	let mut tx = db.begin().await.inspect_err(inspect).or(Err(Error::DbError))?;

	let found = sqlx::query(
		"SELECT (SELECT count(*) FROM accounts WHERE account_id = ?1 AND status = 'A')
			+ (SELECT count(*) FROM users WHERE user_id = ?2) AS found",
	)
	.bind(db_id(account_id.0))
	.bind(db_id(user_id.0))
	.fetch_one(&mut *tx)
	.await;
	if map_res(found, |row| row.try_get::<i64, _>("found"))? < 2 {
		return Err(Error::NotFound);
	}

	let res = sqlx::query(
		"INSERT INTO account_members (account_id, user_id, permissions, default_account)
		VALUES (?1, ?2, ?3, NOT EXISTS (SELECT 1 FROM account_members WHERE user_id = ?2))",
	)
	.bind(db_id(account_id.0))
	.bind(db_id(user_id.0))
	.bind(i64::from(permissions))
	.execute(&mut *tx)
	.await;
	match res {
		Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
			return Err(Error::Conflict(format!("user {} is already a member", user_id)));
		}
		res => {
			res.inspect_err(inspect).or(Err(Error::DbError))?;
		}
	}

	tx.commit().await.inspect_err(inspect).or(Err(Error::DbError))?;
	Ok(())
}

pub(crate) async fn update_member_permissions(
	db: &SqlitePool,
	account_id: AccountId,
	user_id: UserId,
	permissions: AccountPermissions,
) -> ClResult<()> {
	let res = sqlx::query(
		"UPDATE account_members SET permissions = ?3, updated_at = unixepoch()
		WHERE account_id = ?1 AND user_id = ?2",
	)
	.bind(db_id(account_id.0))
	.bind(db_id(user_id.0))
	.bind(i64::from(permissions))
	.execute(db)
	.await;

	affected_res(res)
}

pub(crate) async fn remove_account_member(
	db: &SqlitePool,
	account_id: AccountId,
	user_id: UserId,
) -> ClResult<()> {
	let res = sqlx::query("DELETE FROM account_members WHERE account_id = ?1 AND user_id = ?2")
		.bind(db_id(account_id.0))
		.bind(db_id(user_id.0))
		.execute(db)
		.await;

	affected_res(res)
}

pub(crate) async fn set_default_account(
	db: &SqlitePool,
	user_id: UserId,
	account_id: AccountId,
) -> ClResult<()> {
	let mut tx = db.begin().await.inspect_err(inspect).or(Err(Error::DbError))?;

	let res = sqlx::query(
		"UPDATE account_members SET default_account = 1, updated_at = unixepoch()
		WHERE account_id = ?1 AND user_id = ?2",
	)
	.bind(db_id(account_id.0))
	.bind(db_id(user_id.0))
	.execute(&mut *tx)
	.await;
	// Dropping the transaction rolls back on NotFound
	affected_res(res)?;

	sqlx::query(
		"UPDATE account_members SET default_account = 0, updated_at = unixepoch()
		WHERE user_id = ?1 AND account_id != ?2 AND default_account != 0",
	)
	.bind(db_id(user_id.0))
	.bind(db_id(account_id.0))
	.execute(&mut *tx)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	tx.commit().await.inspect_err(inspect).or(Err(Error::DbError))?;
	Ok(())
}

pub(crate) async fn list_account_members(
	db: &SqlitePool,
	account_id: AccountId,
) -> ClResult<Vec<AccountMember>> {
	let rows = sqlx::query(
		"SELECT m.user_id, u.username, m.permissions, m.default_account
		FROM account_members m JOIN users u ON u.user_id = m.user_id
		WHERE m.account_id = ?1
		ORDER BY m.user_id",
	)
	.bind(db_id(account_id.0))
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	collect_res(rows.iter().map(|row| {
		let permissions: i64 = row.try_get("permissions")?;
		Ok(AccountMember {
			user_id: UserId(from_db_id(row.try_get("user_id")?)),
			username: row.try_get::<String, _>("username")?.into(),
			permissions: AccountPermissions::try_from(permissions).map_err(decode_err)?,
			default_account: row.try_get("default_account")?,
		})
	}))
}

pub(crate) async fn list_memberships(
	db: &SqlitePool,
	user_id: UserId,
) -> ClResult<Vec<AccountMembership>> {
	let rows = sqlx::query(
		"SELECT m.account_id, a.name, m.permissions, m.default_account
		FROM account_members m JOIN accounts a ON a.account_id = m.account_id
		WHERE m.user_id = ?1 AND a.status = 'A'
		ORDER BY m.account_id",
	)
	.bind(db_id(user_id.0))
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	collect_res(rows.iter().map(|row| {
		let permissions: i64 = row.try_get("permissions")?;
		Ok(AccountMembership {
			account_id: AccountId(from_db_id(row.try_get("account_id")?)),
			account_name: row.try_get::<String, _>("name")?.into(),
			permissions: AccountPermissions::try_from(permissions).map_err(decode_err)?,
			default_account: row.try_get("default_account")?,
		})
	}))
}

pub(crate) async fn terminate_account(db: &SqlitePool, account_id: AccountId) -> ClResult<()> {
	let res = sqlx::query(
		"UPDATE accounts SET status = 'T', updated_at = unixepoch()
		WHERE account_id = ?1 AND status = 'A'",
	)
	.bind(db_id(account_id.0))
	.execute(db)
	.await;

	affected_res(res)
}

// vim: ts=4
