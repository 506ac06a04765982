//! In-memory adapters for HTTP-level tests

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use todo::auth_adapter::{AccountMember, AuthAdapter, CreateUserData, UserRecord};
use todo::error::{ClResult, Error};
use todo::meta_adapter::{
	AccountFilter, CreateItemData, Item, ListItemOptions, MetaAdapter, UpdateItemData,
};
use todo::permission::AccountPermissions;
use todo::session::{AccountMembership, Reputation};
use todo::types::{AccountId, ItemId, Timestamp, UserId};

// FakeAuthAdapter //
//*****************//
#[derive(Debug, Default)]
struct AuthState {
	next_id: u64,
	users: HashMap<UserId, (UserRecord, String)>,
	accounts: BTreeMap<AccountId, (String, bool)>,
	members: BTreeMap<(AccountId, UserId), (AccountPermissions, bool)>,
}

impl AuthState {
	fn add_member(&mut self, account_id: AccountId, user_id: UserId, perms: AccountPermissions) {
		let first = !self.members.keys().any(|(_, uid)| *uid == user_id);
		self.members.insert((account_id, user_id), (perms, first));
	}
}

#[derive(Debug, Default)]
pub struct FakeAuthAdapter {
	state: Mutex<AuthState>,
	fail_create_account: AtomicBool,
}

impl FakeAuthAdapter {
	/// Makes the next `create_account` call fail with a database error
	pub fn fail_next_create_account(&self) {
		self.fail_create_account.store(true, Ordering::SeqCst);
	}

	/// Raw membership rows, terminated accounts included
	pub fn member_permissions(
		&self,
		account_id: AccountId,
		user_id: UserId,
	) -> Option<AccountPermissions> {
		let state = self.state.lock().unwrap();
		state.members.get(&(account_id, user_id)).map(|(perms, _)| *perms)
	}

	pub fn reputation(&self, user_id: UserId) -> Option<Reputation> {
		let state = self.state.lock().unwrap();
		state.users.get(&user_id).map(|(user, _)| user.reputation)
	}
}

#[async_trait]
impl AuthAdapter for FakeAuthAdapter {
	async fn create_user(&self, data: CreateUserData<'_>) -> ClResult<UserId> {
		let mut state = self.state.lock().unwrap();
		if state.users.values().any(|(u, _)| u.username.as_ref() == data.username) {
			return Err(Error::Conflict("username taken".into()));
		}
		state.next_id += 1;
		let user_id = UserId(state.next_id);
		let user = UserRecord {
			user_id,
			username: data.username.into(),
			reputation: data.reputation,
			reputation_explanation: None,
			site_admin: data.site_admin,
			requires_password_change: false,
			created_at: Timestamp::now(),
		};
		state.users.insert(user_id, (user, data.password.to_string()));
		Ok(user_id)
	}

	async fn read_user(&self, user_id: UserId) -> ClResult<UserRecord> {
		let state = self.state.lock().unwrap();
		state.users.get(&user_id).map(|(u, _)| u.clone()).ok_or(Error::NotFound)
	}

	async fn read_user_id(&self, username: &str) -> ClResult<UserId> {
		let state = self.state.lock().unwrap();
		state
			.users
			.values()
			.find(|(u, _)| u.username.as_ref() == username)
			.map(|(u, _)| u.user_id)
			.ok_or(Error::NotFound)
	}

	async fn check_user_password(&self, username: &str, password: &str) -> ClResult<UserRecord> {
		let state = self.state.lock().unwrap();
		state
			.users
			.values()
			.find(|(u, p)| u.username.as_ref() == username && p == password)
			.map(|(u, _)| u.clone())
			.ok_or(Error::PermissionDenied)
	}

	async fn update_user_reputation(
		&self,
		user_id: UserId,
		reputation: Reputation,
		explanation: Option<&str>,
	) -> ClResult<()> {
		let mut state = self.state.lock().unwrap();
		let (user, _) = state.users.get_mut(&user_id).ok_or(Error::NotFound)?;
		user.reputation = reputation;
		user.reputation_explanation = explanation.map(Into::into);
		Ok(())
	}

	async fn create_account(
		&self,
		name: &str,
		owner: UserId,
		owner_permissions: AccountPermissions,
	) -> ClResult<AccountId> {
		if self.fail_create_account.swap(false, Ordering::SeqCst) {
			return Err(Error::DbError);
		}
		let mut state = self.state.lock().unwrap();
		state.next_id += 1;
		let account_id = AccountId(state.next_id);
		state.accounts.insert(account_id, (name.to_string(), false));
		state.add_member(account_id, owner, owner_permissions);
		Ok(account_id)
	}

	async fn add_account_member(
		&self,
		account_id: AccountId,
		user_id: UserId,
		permissions: AccountPermissions,
	) -> ClResult<()> {
		let mut state = self.state.lock().unwrap();
		let active = state.accounts.get(&account_id).is_some_and(|(_, terminated)| !terminated);
		if !active || !state.users.contains_key(&user_id) {
			return Err(Error::NotFound);
		}
		if state.members.contains_key(&(account_id, user_id)) {
			return Err(Error::Conflict("already a member".into()));
		}
		state.add_member(account_id, user_id, permissions);
		Ok(())
	}

	async fn update_member_permissions(
		&self,
		account_id: AccountId,
		user_id: UserId,
		permissions: AccountPermissions,
	) -> ClResult<()> {
		let mut state = self.state.lock().unwrap();
		let (perms, _) = state.members.get_mut(&(account_id, user_id)).ok_or(Error::NotFound)?;
		*perms = permissions;
		Ok(())
	}

	async fn remove_account_member(&self, account_id: AccountId, user_id: UserId) -> ClResult<()> {
		let mut state = self.state.lock().unwrap();
		state.members.remove(&(account_id, user_id)).map(|_| ()).ok_or(Error::NotFound)
	}

	async fn set_default_account(&self, user_id: UserId, account_id: AccountId) -> ClResult<()> {
		let mut state = self.state.lock().unwrap();
		if !state.members.contains_key(&(account_id, user_id)) {
			return Err(Error::NotFound);
		}
		for ((aid, uid), (_, default_account)) in &mut state.members {
			if *uid == user_id {
				*default_account = *aid == account_id;
			}
		}
		Ok(())
	}

	async fn list_account_members(&self, account_id: AccountId) -> ClResult<Vec<AccountMember>> {
		let state = self.state.lock().unwrap();
		let mut members: Vec<_> = state
			.members
			.iter()
			.filter(|((aid, _), _)| *aid == account_id)
			.filter_map(|((_, user_id), (perms, default_account))| {
				let (user, _) = state.users.get(user_id)?;
				Some(AccountMember {
					user_id: *user_id,
					username: user.username.clone(),
					permissions: *perms,
					default_account: *default_account,
				})
			})
			.collect();
		members.sort_by_key(|m| m.user_id);
		Ok(members)
	}

	async fn list_memberships(&self, user_id: UserId) -> ClResult<Vec<AccountMembership>> {
		let state = self.state.lock().unwrap();
		Ok(state
			.members
			.iter()
			.filter(|((_, uid), _)| *uid == user_id)
			.filter_map(|((account_id, _), (perms, default_account))| {
				let (name, terminated) = state.accounts.get(account_id)?;
				(!terminated).then(|| AccountMembership {
					account_id: *account_id,
					account_name: name.as_str().into(),
					permissions: *perms,
					default_account: *default_account,
				})
			})
			.collect())
	}

	async fn terminate_account(&self, account_id: AccountId) -> ClResult<()> {
		let mut state = self.state.lock().unwrap();
		let (_, terminated) = state.accounts.get_mut(&account_id).ok_or(Error::NotFound)?;
		*terminated = true;
		Ok(())
	}
}

// FakeMetaAdapter //
//*****************//
#[derive(Debug, Default)]
struct MetaState {
	next_id: u64,
	items: Vec<(Item, bool)>,
	filters: Vec<AccountFilter>,
}

/// Stores items in memory and records every account filter it is handed
#[derive(Debug, Default)]
pub struct FakeMetaAdapter {
	state: Mutex<MetaState>,
}

impl FakeMetaAdapter {
	/// Account filters received so far, in call order
	pub fn filters(&self) -> Vec<AccountFilter> {
		self.state.lock().unwrap().filters.clone()
	}

	pub fn storage_calls(&self) -> usize {
		self.state.lock().unwrap().filters.len()
	}

	pub fn all_items(&self) -> Vec<Item> {
		self.state.lock().unwrap().items.iter().map(|(item, _)| item.clone()).collect()
	}
}

#[async_trait]
impl MetaAdapter for FakeMetaAdapter {
	async fn list_items(
		&self,
		filter: AccountFilter,
		opts: &ListItemOptions,
	) -> ClResult<Vec<Item>> {
		let mut state = self.state.lock().unwrap();
		state.filters.push(filter);
		let offset = opts.offset.unwrap_or(0) as usize;
		let limit = opts.limit.unwrap_or(u32::MAX) as usize;
		Ok(state
			.items
			.iter()
			.rev()
			.filter(|(item, archived)| !archived && filter.admits(item.belongs_to_account))
			.skip(offset)
			.take(limit)
			.map(|(item, _)| item.clone())
			.collect())
	}

	async fn count_items(&self, filter: AccountFilter) -> ClResult<u64> {
		let state = self.state.lock().unwrap();
		let count = state
			.items
			.iter()
			.filter(|(item, archived)| !archived && filter.admits(item.belongs_to_account))
			.count();
		Ok(count as u64)
	}

	async fn create_item(
		&self,
		account_id: AccountId,
		created_by: UserId,
		data: CreateItemData<'_>,
	) -> ClResult<Item> {
		let mut state = self.state.lock().unwrap();
		state.filters.push(AccountFilter::Account(account_id));
		state.next_id += 1;
		let item = Item {
			item_id: ItemId(state.next_id),
			name: data.name.into(),
			details: data.details.into(),
			belongs_to_account: account_id,
			created_by,
			created_at: Timestamp::now(),
			updated_at: None,
		};
		state.items.push((item.clone(), false));
		Ok(item)
	}

	async fn read_item(&self, filter: AccountFilter, item_id: ItemId) -> ClResult<Item> {
		let mut state = self.state.lock().unwrap();
		state.filters.push(filter);
		state
			.items
			.iter()
			.find(|(item, archived)| {
				item.item_id == item_id && !archived && filter.admits(item.belongs_to_account)
			})
			.map(|(item, _)| item.clone())
			.ok_or(Error::NotFound)
	}

	async fn update_item(
		&self,
		filter: AccountFilter,
		item_id: ItemId,
		data: UpdateItemData<'_>,
	) -> ClResult<Item> {
		let mut state = self.state.lock().unwrap();
		state.filters.push(filter);
		let (item, _) = state
			.items
			.iter_mut()
			.find(|(item, archived)| {
				item.item_id == item_id && !archived && filter.admits(item.belongs_to_account)
			})
			.ok_or(Error::NotFound)?;
		if let Some(name) = data.name {
			item.name = name.into();
		}
		if let Some(details) = data.details {
			item.details = details.into();
		}
		item.updated_at = Some(Timestamp::now());
		Ok(item.clone())
	}

	async fn archive_item(&self, filter: AccountFilter, item_id: ItemId) -> ClResult<()> {
		let mut state = self.state.lock().unwrap();
		state.filters.push(filter);
		let (_, archived) = state
			.items
			.iter_mut()
			.find(|(item, archived)| {
				item.item_id == item_id && !*archived && filter.admits(item.belongs_to_account)
			})
			.ok_or(Error::NotFound)?;
		*archived = true;
		Ok(())
	}
}

// vim: ts=4
