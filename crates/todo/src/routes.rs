use axum::{
	Router,
	middleware::{from_fn, from_fn_with_state},
	routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::prelude::*;
use todo_admin::perm::require_admin_perm;
use todo_core::{optional_auth, require_auth};
use todo_types::admin_permission::SiteAdminPermissions;

pub fn init(app: App) -> Router {
	let public_router = Router::new()
		.route("/api/auth/login", post(todo_auth::handler::post_login))
		.route(
			"/api/auth/status",
			get(todo_auth::handler::get_status)
				.route_layer(from_fn_with_state(app.clone(), optional_auth)),
		);

	let protected_router = Router::new()
		// --- Auth ---
		.route("/api/auth/change-account", post(todo_auth::handler::post_change_account))
		.route("/api/auth/memberships", get(todo_auth::handler::get_memberships))
		.route("/api/auth/default-account", post(todo_auth::handler::post_default_account))
		// --- Account members ---
		.route(
			"/api/account/members",
			get(todo_account::handler::list_members).post(todo_account::handler::post_member),
		)
		.route("/api/account/members/{user_id}", delete(todo_account::handler::delete_member))
		.route(
			"/api/account/members/{user_id}/permissions",
			patch(todo_account::handler::patch_member_permissions),
		)
		// --- Items ---
		.route(
			"/api/items",
			get(todo_items::handler::list_items).post(todo_items::handler::create_item),
		)
		.route(
			"/api/items/{item_id}",
			get(todo_items::handler::get_item)
				.head(todo_items::handler::head_item)
				.put(todo_items::handler::update_item)
				.delete(todo_items::handler::archive_item),
		)
		// --- Admin ---
		.route(
			"/api/admin/users/{user_id}/ban",
			post(todo_admin::handler::post_ban_user)
				.route_layer(from_fn(require_admin_perm(SiteAdminPermissions::BAN_USERS))),
		)
		.route(
			"/api/admin/accounts/{account_id}/terminate",
			post(todo_admin::handler::post_terminate_account).route_layer(from_fn(
				require_admin_perm(SiteAdminPermissions::TERMINATE_ACCOUNTS),
			)),
		)
		.route_layer(from_fn_with_state(app.clone(), require_auth));

	Router::new()
		.merge(public_router)
		.merge(protected_router)
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
