//! Bootstrap of the first site administrator

use crate::auth_adapter::CreateUserData;
use crate::prelude::*;
use todo_types::admin_permission::SiteAdminPermissions;
use todo_types::permission::AccountPermissions;
use todo_types::session::Reputation;

const DEFAULT_BASE_ACCOUNT: &str = "admin";

/// Creates the base administrator with its own account when configured and
/// not yet present. Running it again is a no-op.
///
/// The user and the account are stored in two steps. A base user that exists
/// without any live membership gets its account on the next run.
pub async fn bootstrap(app: &App) -> ClResult<Option<UserId>> {
	let opts = &app.opts;
	let (Some(username), Some(password)) = (&opts.base_username, &opts.base_password) else {
		debug!("No base user configured, skipping bootstrap");
		return Ok(None);
	};

	let user_id = match app.auth_adapter.read_user_id(username).await {
		Ok(user_id) => {
			if !app.auth_adapter.list_memberships(user_id).await?.is_empty() {
				debug!(user_id = %user_id, "Base user already exists, skipping bootstrap");
				return Ok(None);
			}
			warn!(user_id = %user_id, "Base user has no account, completing bootstrap");
			user_id
		}
		Err(Error::NotFound) => {
			info!("Creating base user: {}", username);
			app.auth_adapter
				.create_user(CreateUserData {
					username,
					password,
					reputation: Reputation::Good,
					site_admin: SiteAdminPermissions::ALL_KNOWN,
				})
				.await
				.map_err(|e| {
					warn!(error = %e, username = %username, "Failed to create base user");
					e
				})?
		}
		Err(e) => return Err(e),
	};

	let account_name = opts.base_account.as_deref().unwrap_or(DEFAULT_BASE_ACCOUNT);
	let account_id = app
		.auth_adapter
		.create_account(account_name, user_id, AccountPermissions::ALL_KNOWN)
		.await
		.map_err(|e| {
			warn!(error = %e, user_id = %user_id, "Failed to create base account");
			e
		})?;
	info!(user_id = %user_id, account_id = %account_id, "Base user and account created");

	Ok(Some(user_id))
}

// vim: ts=4
