//! App state type

use std::sync::Arc;

use todo_types::auth_adapter::{ACCESS_TOKEN_EXPIRY, AuthAdapter};
use todo_types::meta_adapter::MetaAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub auth_adapter: Arc<dyn AuthAdapter>,
	pub meta_adapter: Arc<dyn MetaAdapter>,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub auth_adapter: Option<Arc<dyn AuthAdapter>>,
	pub meta_adapter: Option<Arc<dyn MetaAdapter>>,
}

pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// HMAC secret for access tokens
	pub jwt_secret: Box<str>,
	/// Access token lifetime in seconds
	pub token_expiry: i64,
	/// Bootstrap administrator, created on first start
	pub base_username: Option<Box<str>>,
	pub base_password: Option<Box<str>>,
	pub base_account: Option<Box<str>>,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		Self {
			listen: "127.0.0.1:8080".into(),
			jwt_secret: "".into(),
			token_expiry: ACCESS_TOKEN_EXPIRY,
			base_username: None,
			base_password: None,
			base_account: None,
		}
	}
}

impl std::fmt::Debug for AppBuilderOpts {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppBuilderOpts")
			.field("listen", &self.listen)
			.field("jwt_secret", &"<redacted>")
			.field("token_expiry", &self.token_expiry)
			.field("base_username", &self.base_username)
			.field("base_account", &self.base_account)
			.finish_non_exhaustive()
	}
}

// vim: ts=4
