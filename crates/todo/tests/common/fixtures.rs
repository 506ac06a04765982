//! Seeded test world and request helpers

use axum::{
	Router,
	body::Body,
	http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use todo::admin_permission::SiteAdminPermissions;
use todo::auth_adapter::{AuthAdapter, CreateUserData};
use todo::meta_adapter::{CreateItemData, MetaAdapter};
use todo::permission::AccountPermissions;
use todo::session::Reputation;
use todo::types::{AccountId, ItemId, UserId};
use todo::{App, AppBuilder, routes};

use super::adapters::{FakeAuthAdapter, FakeMetaAdapter};

pub const JWT_SECRET: &str = "test-jwt-secret";
pub const PASSWORD: &str = "correct horse";

/// Two tenants, a regular member of the first and a ban-only site admin
/// whose own account grants nothing.
pub struct World {
	pub app: App,
	pub router: Router,
	pub auth: Arc<FakeAuthAdapter>,
	pub meta: Arc<FakeMetaAdapter>,

	/// Member of `account_a` with every known bit
	pub owner: UserId,
	/// Member of `account_a` with read and create
	pub user: UserId,
	/// Site admin holding only the ban bit, member of `account_b` with no bits
	pub admin: UserId,
	pub account_a: AccountId,
	pub account_b: AccountId,
	pub item_a: ItemId,
	pub item_b: ItemId,
}

async fn create_user(
	auth: &FakeAuthAdapter,
	username: &str,
	site_admin: SiteAdminPermissions,
) -> UserId {
	auth.create_user(CreateUserData {
		username,
		password: PASSWORD,
		reputation: Reputation::Good,
		site_admin,
	})
	.await
	.unwrap()
}

impl World {
	pub async fn new() -> Self {
		let auth = Arc::new(FakeAuthAdapter::default());
		let meta = Arc::new(FakeMetaAdapter::default());

		let owner = create_user(&auth, "owner", SiteAdminPermissions::EMPTY).await;
		let user = create_user(&auth, "user", SiteAdminPermissions::EMPTY).await;
		let admin = create_user(&auth, "admin", SiteAdminPermissions::BAN_USERS).await;

		let account_a =
			auth.create_account("Account A", owner, AccountPermissions::ALL_KNOWN).await.unwrap();
		let account_b =
			auth.create_account("Account B", admin, AccountPermissions::EMPTY).await.unwrap();
		auth.add_account_member(
			account_a,
			user,
			AccountPermissions::READ_ITEMS | AccountPermissions::CREATE_ITEMS,
		)
		.await
		.unwrap();

		let item_a = meta
			.create_item(account_a, owner, CreateItemData { name: "a item", details: "" })
			.await
			.unwrap()
			.item_id;
		let item_b = meta
			.create_item(account_b, admin, CreateItemData { name: "b item", details: "" })
			.await
			.unwrap()
			.item_id;

		let mut builder = AppBuilder::new();
		builder.jwt_secret(JWT_SECRET).auth_adapter(auth.clone()).meta_adapter(meta.clone());
		let app = builder.build().unwrap();
		let router = routes::init(app.clone());

		World { app, router, auth, meta, owner, user, admin, account_a, account_b, item_a, item_b }
	}

	pub fn token(&self, user_id: UserId, account_id: AccountId) -> String {
		todo_core::token::generate_access_token(&self.app.opts, user_id, account_id)
			.unwrap()
			.to_string()
	}

	pub fn owner_token(&self) -> String {
		self.token(self.owner, self.account_a)
	}

	pub fn user_token(&self) -> String {
		self.token(self.user, self.account_a)
	}

	pub fn admin_token(&self) -> String {
		self.token(self.admin, self.account_b)
	}

	pub async fn send(
		&self,
		method: Method,
		uri: &str,
		token: Option<&str>,
		body: Option<Value>,
	) -> (StatusCode, Value) {
		self.send_raw(method, uri, token, body.map(|body| body.to_string())).await
	}

	/// Sends `body` verbatim as a JSON request body
	pub async fn send_raw(
		&self,
		method: Method,
		uri: &str,
		token: Option<&str>,
		body: Option<String>,
	) -> (StatusCode, Value) {
		request(self.router.clone(), method, uri, token, body).await
	}

	pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
		self.send(Method::GET, uri, Some(token), None).await
	}
}

/// Runs one request through `router` and decodes the JSON body, if any
pub async fn request(
	router: Router,
	method: Method,
	uri: &str,
	token: Option<&str>,
	body: Option<String>,
) -> (StatusCode, Value) {
	let mut req = Request::builder().method(method).uri(uri);
	if let Some(token) = token {
		req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
	}
	let req = match body {
		Some(body) => {
			req.header(header::CONTENT_TYPE, "application/json").body(Body::from(body)).unwrap()
		}
		None => req.body(Body::empty()).unwrap(),
	};

	let res = router.oneshot(req).await.unwrap();
	let status = res.status();
	let bytes = res.into_body().collect().await.unwrap().to_bytes();
	let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
	(status, json)
}

/// Item ids of a list response
pub fn item_ids(body: &Value) -> Vec<u64> {
	body["data"]
		.as_array()
		.unwrap()
		.iter()
		.map(|item| item["itemId"].as_u64().unwrap())
		.collect()
}

/// Asserts the error body of a request that could not be parsed
pub fn assert_parse_error(status: StatusCode, body: &Value) {
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"]["code"], "E-CORE-PARSE");
}

/// Asserts the generic authorization failure response
pub fn assert_denied(status: StatusCode, body: &Value) {
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["error"]["code"], "E-AUTH-NOPERM");
}

// vim: ts=4
