//! Authorization gate.
//!
//! The single decision point every resource handler calls before it reads or
//! mutates tenant data. Decisions are pure functions of the session snapshot,
//! the required capability and the requested scope.
//!
//! Handler integration:
//! 1. resolve the scope with [`Scope::resolve`] from the `admin` query flag,
//! 2. call [`grant`] with the capability matching the operation,
//! 3. pass the returned [`AccountFilter`] to the storage adapter unchanged.
//!
//! The filter is derived from the session, never from a client-supplied
//! account id.

use todo_types::admin_permission::SiteAdminPermissions;
use todo_types::meta_adapter::AccountFilter;
use todo_types::permission::AccountPermissions;
use todo_types::session::SessionContext;

use crate::prelude::*;

// Scope //
//*******//
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
	/// Operate within the session's active account
	ActiveAccount,
	/// Cross-tenant site-admin view
	AllAccounts,
}

impl Scope {
	/// Elevated scope needs both admin bits and an explicit opt-in for this
	/// request. Anything else stays in the active account.
	pub fn resolve(ctx: &SessionContext, admin_requested: bool) -> Scope {
		if admin_requested && ctx.is_service_admin() {
			Scope::AllAccounts
		} else {
			Scope::ActiveAccount
		}
	}
}

// Decision //
//**********//
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	Allow,
	Deny,
}

impl Decision {
	pub fn is_allowed(self) -> bool {
		self == Decision::Allow
	}
}

impl From<bool> for Decision {
	fn from(allowed: bool) -> Self {
		if allowed { Decision::Allow } else { Decision::Deny }
	}
}

/// Decides whether `ctx` may exercise `required` within `scope`.
///
/// A missing membership for the active account is a deny. The all-accounts
/// scope is allowed for service admins only, whatever `required` is.
pub fn authorize(ctx: &SessionContext, required: AccountPermissions, scope: Scope) -> Decision {
	match scope {
		Scope::ActiveAccount => match ctx.active_permissions() {
			Some(perms) => perms.has_permission(required).into(),
			None => Decision::Deny,
		},
		Scope::AllAccounts => ctx.is_service_admin().into(),
	}
}

/// Decides whether `ctx` holds the specific site-admin capability `required`
pub fn authorize_admin(ctx: &SessionContext, required: SiteAdminPermissions) -> Decision {
	ctx.site_admin_permissions().has_permission(required).into()
}

/// Runs the gate and hands out the storage filter on `Allow`.
///
/// `Deny` becomes `Error::PermissionDenied`; there is no reduced-scope
/// fallback.
pub fn grant(
	ctx: &SessionContext,
	required: AccountPermissions,
	scope: Scope,
) -> ClResult<AccountFilter> {
	match authorize(ctx, required, scope) {
		Decision::Allow => Ok(match scope {
			Scope::ActiveAccount => AccountFilter::Account(ctx.active_account_id()),
			Scope::AllAccounts => AccountFilter::All,
		}),
		Decision::Deny => {
			warn!(
				user_id = %ctx.user_id(),
				account_id = %ctx.active_account_id(),
				required = ?required,
				scope = ?scope,
				"Permission denied"
			);
			Err(Error::PermissionDenied)
		}
	}
}

/// Site-admin counterpart of [`grant`]
pub fn grant_admin(ctx: &SessionContext, required: SiteAdminPermissions) -> ClResult<()> {
	if authorize_admin(ctx, required).is_allowed() {
		Ok(())
	} else {
		warn!(
			user_id = %ctx.user_id(),
			required = ?required,
			held = ?ctx.site_admin_permissions(),
			"Site admin permission denied"
		);
		Err(Error::PermissionDenied)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	const ACCOUNT_A: AccountId = AccountId(1);
	const ACCOUNT_B: AccountId = AccountId(2);

	fn session(
		active: AccountId,
		memberships: &[(AccountId, AccountPermissions)],
		site_admin: SiteAdminPermissions,
	) -> SessionContext {
		SessionContext::build(
			UserId(10),
			active,
			memberships.iter().copied().collect::<HashMap<_, _>>(),
			site_admin,
		)
		.unwrap()
	}

	fn regular_user() -> SessionContext {
		session(
			ACCOUNT_A,
			&[(ACCOUNT_A, AccountPermissions::READ_ITEMS | AccountPermissions::CREATE_ITEMS)],
			SiteAdminPermissions::EMPTY,
		)
	}

	fn ban_only_admin() -> SessionContext {
		session(
			ACCOUNT_B,
			&[(ACCOUNT_B, AccountPermissions::EMPTY)],
			SiteAdminPermissions::BAN_USERS,
		)
	}

	#[test]
	fn test_active_account_checks_capability() {
		let ctx = regular_user();
		assert_eq!(
			authorize(&ctx, AccountPermissions::ARCHIVE_ITEMS, Scope::ActiveAccount),
			Decision::Deny
		);
		assert_eq!(
			authorize(&ctx, AccountPermissions::READ_ITEMS, Scope::ActiveAccount),
			Decision::Allow
		);
		assert_eq!(
			authorize(&ctx, AccountPermissions::CREATE_ITEMS, Scope::ActiveAccount),
			Decision::Allow
		);
	}

	#[test]
	fn test_non_admin_never_gets_all_accounts() {
		let ctx = regular_user();
		assert_eq!(
			authorize(&ctx, AccountPermissions::READ_ITEMS, Scope::AllAccounts),
			Decision::Deny
		);
		for raw in [0, 1, 0xff, u32::MAX] {
			assert_eq!(
				authorize(&ctx, AccountPermissions::new(raw), Scope::AllAccounts),
				Decision::Deny
			);
		}
	}

	#[test]
	fn test_admin_without_account_bits() {
		let ctx = ban_only_admin();
		assert_eq!(
			authorize(&ctx, AccountPermissions::READ_ITEMS, Scope::ActiveAccount),
			Decision::Deny
		);
		assert_eq!(
			authorize(&ctx, AccountPermissions::READ_ITEMS, Scope::AllAccounts),
			Decision::Allow
		);
	}

	#[test]
	fn test_zero_capability_is_denied() {
		let ctx = session(
			ACCOUNT_A,
			&[(ACCOUNT_A, AccountPermissions::ALL_KNOWN)],
			SiteAdminPermissions::EMPTY,
		);
		assert_eq!(
			authorize(&ctx, AccountPermissions::EMPTY, Scope::ActiveAccount),
			Decision::Deny
		);
	}

	#[test]
	fn test_membership_in_other_account_does_not_leak() {
		let ctx = session(
			ACCOUNT_A,
			&[(ACCOUNT_A, AccountPermissions::EMPTY), (ACCOUNT_B, AccountPermissions::ALL_KNOWN)],
			SiteAdminPermissions::EMPTY,
		);
		assert_eq!(
			authorize(&ctx, AccountPermissions::READ_ITEMS, Scope::ActiveAccount),
			Decision::Deny
		);
	}

	#[test]
	fn test_authorize_is_deterministic() {
		let ctx = regular_user();
		let before = ctx.clone();
		for _ in 0..3 {
			assert_eq!(
				authorize(&ctx, AccountPermissions::READ_ITEMS, Scope::ActiveAccount),
				Decision::Allow
			);
			assert_eq!(
				authorize(&ctx, AccountPermissions::UPDATE_ITEMS, Scope::ActiveAccount),
				Decision::Deny
			);
		}
		assert_eq!(ctx, before);
	}

	#[test]
	fn test_scope_resolution_needs_both_gates() {
		let user = regular_user();
		let admin = ban_only_admin();

		assert_eq!(Scope::resolve(&user, false), Scope::ActiveAccount);
		assert_eq!(Scope::resolve(&user, true), Scope::ActiveAccount);
		assert_eq!(Scope::resolve(&admin, false), Scope::ActiveAccount);
		assert_eq!(Scope::resolve(&admin, true), Scope::AllAccounts);
	}

	#[test]
	fn test_grant_returns_session_account() {
		let ctx = regular_user();
		let filter = grant(&ctx, AccountPermissions::READ_ITEMS, Scope::ActiveAccount).unwrap();
		assert_eq!(filter, AccountFilter::Account(ACCOUNT_A));

		let denied = grant(&ctx, AccountPermissions::ARCHIVE_ITEMS, Scope::ActiveAccount);
		assert!(matches!(denied, Err(Error::PermissionDenied)));

		let denied = grant(&ctx, AccountPermissions::READ_ITEMS, Scope::AllAccounts);
		assert!(matches!(denied, Err(Error::PermissionDenied)));
	}

	#[test]
	fn test_grant_admin_view_is_unfiltered() {
		let ctx = ban_only_admin();
		let scope = Scope::resolve(&ctx, true);
		assert_eq!(grant(&ctx, AccountPermissions::READ_ITEMS, scope).unwrap(), AccountFilter::All);
	}

	#[test]
	fn test_authorize_admin_checks_specific_bit() {
		let ctx = ban_only_admin();
		assert!(authorize_admin(&ctx, SiteAdminPermissions::BAN_USERS).is_allowed());
		assert_eq!(
			authorize_admin(&ctx, SiteAdminPermissions::TERMINATE_ACCOUNTS),
			Decision::Deny
		);
		assert!(grant_admin(&ctx, SiteAdminPermissions::BAN_USERS).is_ok());
		assert!(matches!(
			grant_admin(&regular_user(), SiteAdminPermissions::BAN_USERS),
			Err(Error::PermissionDenied)
		));
	}
}

// vim: ts=4
