//! Identity store tests
//!
//! Users, passwords, accounts and the membership rows the session middleware
//! builds a `SessionContext` from.

#[cfg(test)]
mod tests {
	use tempfile::TempDir;
	use todo_auth_adapter_sqlite::AuthAdapterSqlite;
	use todo_types::admin_permission::SiteAdminPermissions;
	use todo_types::auth_adapter::{AuthAdapter, CreateUserData, default_account};
	use todo_types::permission::AccountPermissions;
	use todo_types::prelude::*;
	use todo_types::session::{Reputation, SessionContext};

	async fn create_test_adapter() -> (AuthAdapterSqlite, TempDir) {
		let tmp_dir = TempDir::new().unwrap();
		let adapter = AuthAdapterSqlite::new(tmp_dir.path()).await.unwrap();
		(adapter, tmp_dir)
	}

	async fn create_test_user(adapter: &AuthAdapterSqlite, username: &str) -> UserId {
		adapter
			.create_user(CreateUserData {
				username,
				password: "correct_password_123",
				reputation: Reputation::Good,
				site_admin: SiteAdminPermissions::EMPTY,
			})
			.await
			.unwrap()
	}

	async fn create_test_account(
		adapter: &AuthAdapterSqlite,
		name: &str,
		owner: UserId,
	) -> AccountId {
		adapter.create_account(name, owner, AccountPermissions::ALL_KNOWN).await.unwrap()
	}

	#[tokio::test]
	async fn test_password_verification() {
		let (adapter, _tmp) = create_test_adapter().await;
		let user_id = create_test_user(&adapter, "alice").await;

		let user = adapter.check_user_password("alice", "correct_password_123").await.unwrap();
		assert_eq!(user.user_id, user_id);
		assert_eq!(user.username.as_ref(), "alice");

		let res = adapter.check_user_password("alice", "wrong_password").await;
		assert!(matches!(res, Err(Error::PermissionDenied)));

		let res = adapter.check_user_password("nobody", "correct_password_123").await;
		assert!(matches!(res, Err(Error::PermissionDenied)));
	}

	#[tokio::test]
	async fn test_duplicate_username_conflicts() {
		let (adapter, _tmp) = create_test_adapter().await;
		create_test_user(&adapter, "alice").await;

		let res = adapter
			.create_user(CreateUserData {
				username: "alice",
				password: "x",
				reputation: Reputation::Good,
				site_admin: SiteAdminPermissions::EMPTY,
			})
			.await;
		assert!(matches!(res, Err(Error::Conflict(_))));
	}

	#[tokio::test]
	async fn test_site_admin_bits_are_stored_losslessly() {
		let (adapter, _tmp) = create_test_adapter().await;

		let high = SiteAdminPermissions::new(u64::MAX);
		let user_id = adapter
			.create_user(CreateUserData {
				username: "admin",
				password: "x",
				reputation: Reputation::Good,
				site_admin: high,
			})
			.await
			.unwrap();
		let user = adapter.read_user(user_id).await.unwrap();
		assert_eq!(user.site_admin, high);
		assert!(user.site_admin.is_service_admin());
	}

	#[tokio::test]
	async fn test_memberships_and_default_account() {
		let (adapter, _tmp) = create_test_adapter().await;
		let owner = create_test_user(&adapter, "owner").await;
		let member = create_test_user(&adapter, "member").await;

		let first = create_test_account(&adapter, "first", owner).await;
		let second = create_test_account(&adapter, "second", owner).await;

		let rows = adapter.list_memberships(owner).await.unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(default_account(&rows), Some(first));
		assert!(rows.iter().any(|m| m.account_id == second && !m.default_account));

		// the first membership of a user is their default
		adapter.add_account_member(second, member, AccountPermissions::READ_ITEMS).await.unwrap();
		let rows = adapter.list_memberships(member).await.unwrap();
		assert_eq!(rows.len(), 1);
		assert!(rows[0].default_account);

		let empty = AccountPermissions::EMPTY;
		let res = adapter.add_account_member(second, member, empty).await;
		assert!(matches!(res, Err(Error::Conflict(_))));
		let res = adapter.add_account_member(AccountId(999), member, empty).await;
		assert!(matches!(res, Err(Error::NotFound)));
		let res = adapter.add_account_member(first, UserId(999), empty).await;
		assert!(matches!(res, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_member_permissions_and_removal() {
		let (adapter, _tmp) = create_test_adapter().await;
		let owner = create_test_user(&adapter, "owner").await;
		let member = create_test_user(&adapter, "member").await;
		let account_id = create_test_account(&adapter, "acct", owner).await;
		let read = AccountPermissions::READ_ITEMS;
		adapter.add_account_member(account_id, member, read).await.unwrap();

		let read_create = AccountPermissions::READ_ITEMS | AccountPermissions::CREATE_ITEMS;
		adapter.update_member_permissions(account_id, member, read_create).await.unwrap();
		let members = adapter.list_account_members(account_id).await.unwrap();
		let ids: Vec<_> = members.iter().map(|m| m.user_id).collect();
		assert_eq!(ids, vec![owner, member]);
		assert_eq!(members[1].username.as_ref(), "member");
		assert_eq!(members[1].permissions, read_create);

		adapter.remove_account_member(account_id, member).await.unwrap();
		assert!(adapter.list_memberships(member).await.unwrap().is_empty());
		assert_eq!(adapter.list_account_members(account_id).await.unwrap().len(), 1);

		let res = adapter.remove_account_member(account_id, member).await;
		assert!(matches!(res, Err(Error::NotFound)));
		let res = adapter.update_member_permissions(account_id, member, read_create).await;
		assert!(matches!(res, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_set_default_account_moves_the_flag() {
		let (adapter, _tmp) = create_test_adapter().await;
		let owner = create_test_user(&adapter, "owner").await;
		let stranger = create_test_user(&adapter, "stranger").await;
		let first = create_test_account(&adapter, "first", owner).await;
		let second = create_test_account(&adapter, "second", owner).await;
		let foreign = create_test_account(&adapter, "foreign", stranger).await;

		adapter.set_default_account(owner, second).await.unwrap();
		let rows = adapter.list_memberships(owner).await.unwrap();
		assert_eq!(default_account(&rows), Some(second));
		assert_eq!(rows.iter().filter(|m| m.default_account).count(), 1);

		// not a member, nothing changes
		let res = adapter.set_default_account(owner, foreign).await;
		assert!(matches!(res, Err(Error::NotFound)));
		let rows = adapter.list_memberships(owner).await.unwrap();
		assert_eq!(default_account(&rows), Some(second));
		assert!(rows.iter().any(|m| m.account_id == first && !m.default_account));
	}

	#[tokio::test]
	async fn test_reserved_permission_bits_survive_storage() {
		let (adapter, _tmp) = create_test_adapter().await;
		let owner = create_test_user(&adapter, "owner").await;

		let raw = AccountPermissions::new(u32::MAX);
		let account_id = adapter.create_account("acct", owner, raw).await.unwrap();
		let rows = adapter.list_memberships(owner).await.unwrap();
		assert_eq!(rows[0].account_id, account_id);
		assert_eq!(rows[0].permissions.bits(), u32::MAX);
	}

	#[tokio::test]
	async fn test_terminated_account_drops_out_of_sessions() {
		let (adapter, _tmp) = create_test_adapter().await;
		let owner = create_test_user(&adapter, "owner").await;
		let account_id = create_test_account(&adapter, "acct", owner).await;

		let user = adapter.read_user(owner).await.unwrap();
		let rows = adapter.list_memberships(owner).await.unwrap();
		assert!(SessionContext::from_memberships(user.requester(), account_id, &rows).is_ok());

		adapter.terminate_account(account_id).await.unwrap();
		let rows = adapter.list_memberships(owner).await.unwrap();
		assert!(rows.is_empty());
		let res = SessionContext::from_memberships(user.requester(), account_id, &rows);
		assert!(matches!(res, Err(Error::InvalidSession)));

		// terminating twice is not found
		let res = adapter.terminate_account(account_id).await;
		assert!(matches!(res, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_reputation_update() {
		let (adapter, _tmp) = create_test_adapter().await;
		let user_id = create_test_user(&adapter, "spammer").await;

		adapter
			.update_user_reputation(user_id, Reputation::Banned, Some("spam"))
			.await
			.unwrap();
		let user = adapter.read_user(user_id).await.unwrap();
		assert_eq!(user.reputation, Reputation::Banned);
		assert_eq!(user.reputation_explanation.as_deref(), Some("spam"));
		assert!(user.reputation.is_locked_out());

		// the password still matches, the lockout is enforced by the caller
		assert!(adapter.check_user_password("spammer", "correct_password_123").await.is_ok());
	}

	#[tokio::test]
	async fn test_reopen_keeps_data() {
		let tmp_dir = TempDir::new().unwrap();
		let user_id = {
			let adapter = AuthAdapterSqlite::new(tmp_dir.path()).await.unwrap();
			create_test_user(&adapter, "alice").await
		};

		let adapter = AuthAdapterSqlite::new(tmp_dir.path()).await.unwrap();
		assert_eq!(adapter.read_user_id("alice").await.unwrap(), user_id);
	}
}

// vim: ts=4
