//! SQLite identity store: users, accounts and account memberships.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use todo_types::auth_adapter::{AccountMember, AuthAdapter, CreateUserData, UserRecord};
use todo_types::permission::AccountPermissions;
use todo_types::prelude::*;
use todo_types::session::{AccountMembership, Reputation};

mod account;
mod crypto;
mod schema;
mod user;
mod utils;

#[derive(Debug)]
pub struct AuthAdapterSqlite {
	db: SqlitePool,
}

impl AuthAdapterSqlite {
	/// Opens (or creates) `auth.db` in `path`
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		tokio::fs::create_dir_all(path.as_ref()).await?;
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref().join("auth.db"))
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
impl AuthAdapter for AuthAdapterSqlite {
	// Users
	//*******
	async fn create_user(&self, data: CreateUserData<'_>) -> ClResult<UserId> {
		user::create_user(&self.db, data).await
	}

	async fn read_user(&self, user_id: UserId) -> ClResult<UserRecord> {
		user::read_user(&self.db, user_id).await
	}

	async fn read_user_id(&self, username: &str) -> ClResult<UserId> {
		user::read_user_id(&self.db, username).await
	}

	async fn check_user_password(&self, username: &str, password: &str) -> ClResult<UserRecord> {
		user::check_user_password(&self.db, username, password).await
	}

	async fn update_user_reputation(
		&self,
		user_id: UserId,
		reputation: Reputation,
		explanation: Option<&str>,
	) -> ClResult<()> {
		user::update_user_reputation(&self.db, user_id, reputation, explanation).await
	}

	// Accounts
	//**********
	async fn create_account(
		&self,
		name: &str,
		owner: UserId,
		owner_permissions: AccountPermissions,
	) -> ClResult<AccountId> {
		account::create_account(&self.db, name, owner, owner_permissions).await
	}

	async fn add_account_member(
		&self,
		account_id: AccountId,
		user_id: UserId,
		permissions: AccountPermissions,
	) -> ClResult<()> {
		account::add_account_member(&self.db, account_id, user_id, permissions).await
	}

	async fn update_member_permissions(
		&self,
		account_id: AccountId,
		user_id: UserId,
		permissions: AccountPermissions,
	) -> ClResult<()> {
		account::update_member_permissions(&self.db, account_id, user_id, permissions).await
	}

	async fn remove_account_member(&self, account_id: AccountId, user_id: UserId) -> ClResult<()> {
		account::remove_account_member(&self.db, account_id, user_id).await
	}

	async fn set_default_account(&self, user_id: UserId, account_id: AccountId) -> ClResult<()> {
		account::set_default_account(&self.db, user_id, account_id).await
	}

	async fn list_account_members(&self, account_id: AccountId) -> ClResult<Vec<AccountMember>> {
		account::list_account_members(&self.db, account_id).await
	}

	async fn list_memberships(&self, user_id: UserId) -> ClResult<Vec<AccountMembership>> {
		account::list_memberships(&self.db, user_id).await
	}

	async fn terminate_account(&self, account_id: AccountId) -> ClResult<()> {
		account::terminate_account(&self.db, account_id).await
	}
}

// vim: ts=4
