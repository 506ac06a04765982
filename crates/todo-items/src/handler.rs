use axum::{
	Json,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::StatusCode,
};
use serde::Deserialize;

use crate::prelude::*;
use todo_core::authz::{self, Scope};
use todo_core::extract::{AdminView, Auth};
use todo_types::meta_adapter::{CreateItemData, Item, ListItemOptions, UpdateItemData};
use todo_types::permission::AccountPermissions;
use todo_types::types::ApiResponse;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 250;
const MAX_NAME_LEN: usize = 256;

fn validate_name(name: &str) -> ClResult<&str> {
	let name = name.trim();
	if name.is_empty() {
		return Err(Error::ValidationError("name is required".into()));
	}
	if name.len() > MAX_NAME_LEN {
		return Err(Error::ValidationError("name is too long".into()));
	}
	Ok(name)
}

/// # GET /api/items
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
	limit: Option<u32>,
	offset: Option<u32>,
}

pub async fn list_items(
	State(app): State<App>,
	Auth(ctx): Auth,
	AdminView(admin): AdminView,
	query: Result<Query<ListItemsQuery>, QueryRejection>,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<Item>>>)> {
	let scope = Scope::resolve(&ctx, admin);
	let filter = authz::grant(&ctx, AccountPermissions::READ_ITEMS, scope)?;
	let Query(query) = query?;

	let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
	let offset = query.offset.unwrap_or(0);
	let opts = ListItemOptions { limit: Some(limit), offset: Some(offset) };

	let items = app.meta_adapter.list_items(filter, &opts).await?;
	let total = app.meta_adapter.count_items(filter).await?;
	debug!(user_id = %ctx.user_id(), scope = ?scope, count = items.len(), "Listed items");

	let total = usize::try_from(total).unwrap_or(usize::MAX);
	let response = ApiResponse::with_pagination(items, offset as usize, limit as usize, total);
	Ok((StatusCode::OK, Json(response)))
}

/// # POST /api/items
#[derive(Debug, Deserialize)]
pub struct CreateItemReq {
	name: String,
	#[serde(default)]
	details: String,
}

pub async fn create_item(
	State(app): State<App>,
	Auth(ctx): Auth,
	req: Result<Json<CreateItemReq>, JsonRejection>,
) -> ClResult<(StatusCode, Json<ApiResponse<Item>>)> {
	let filter = authz::grant(&ctx, AccountPermissions::CREATE_ITEMS, Scope::ActiveAccount)?;
	let Some(account_id) = filter.account_id() else {
		return Err(Error::Internal("create without an owning account".into()));
	};
	let Json(req) = req?;
	let name = validate_name(&req.name)?;

	let item = app
		.meta_adapter
		.create_item(account_id, ctx.user_id(), CreateItemData { name, details: &req.details })
		.await?;
	info!(
		user_id = %ctx.user_id(),
		account_id = %account_id,
		item_id = %item.item_id,
		"Item created"
	);

	Ok((StatusCode::CREATED, Json(ApiResponse::new(item))))
}

/// # GET /api/items/{item_id}
pub async fn get_item(
	State(app): State<App>,
	Auth(ctx): Auth,
	AdminView(admin): AdminView,
	item_id: Result<Path<ItemId>, PathRejection>,
) -> ClResult<(StatusCode, Json<ApiResponse<Item>>)> {
	let scope = Scope::resolve(&ctx, admin);
	let filter = authz::grant(&ctx, AccountPermissions::READ_ITEMS, scope)?;
	let Path(item_id) = item_id?;

	let item = app.meta_adapter.read_item(filter, item_id).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(item))))
}

/// # HEAD /api/items/{item_id}
pub async fn head_item(
	State(app): State<App>,
	Auth(ctx): Auth,
	item_id: Result<Path<ItemId>, PathRejection>,
) -> ClResult<StatusCode> {
	let filter = authz::grant(&ctx, AccountPermissions::READ_ITEMS, Scope::ActiveAccount)?;
	let Path(item_id) = item_id?;

	app.meta_adapter.read_item(filter, item_id).await?;
	Ok(StatusCode::OK)
}

/// # PUT /api/items/{item_id}
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemReq {
	name: Option<String>,
	details: Option<String>,
}

pub async fn update_item(
	State(app): State<App>,
	Auth(ctx): Auth,
	item_id: Result<Path<ItemId>, PathRejection>,
	req: Result<Json<UpdateItemReq>, JsonRejection>,
) -> ClResult<(StatusCode, Json<ApiResponse<Item>>)> {
	let filter = authz::grant(&ctx, AccountPermissions::UPDATE_ITEMS, Scope::ActiveAccount)?;
	let (Path(item_id), Json(req)) = (item_id?, req?);
	let name = req.name.as_deref().map(validate_name).transpose()?;

	let item = app
		.meta_adapter
		.update_item(filter, item_id, UpdateItemData { name, details: req.details.as_deref() })
		.await?;
	info!(user_id = %ctx.user_id(), item_id = %item_id, "Item updated");

	Ok((StatusCode::OK, Json(ApiResponse::new(item))))
}

/// # DELETE /api/items/{item_id}
pub async fn archive_item(
	State(app): State<App>,
	Auth(ctx): Auth,
	item_id: Result<Path<ItemId>, PathRejection>,
) -> ClResult<StatusCode> {
	let filter = authz::grant(&ctx, AccountPermissions::ARCHIVE_ITEMS, Scope::ActiveAccount)?;
	let Path(item_id) = item_id?;

	app.meta_adapter.archive_item(filter, item_id).await?;
	info!(user_id = %ctx.user_id(), item_id = %item_id, "Item archived");

	Ok(StatusCode::NO_CONTENT)
}


// vim: ts=4
