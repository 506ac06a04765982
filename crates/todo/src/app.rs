//! App builder - constructs and runs the Todo application

use std::sync::Arc;

use crate::auth_adapter::AuthAdapter;
use crate::meta_adapter::MetaAdapter;
use crate::prelude::*;
use crate::{bootstrap, routes};
pub use todo_core::app::{Adapters, App, AppBuilderOpts, AppState, VERSION};

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		// A subscriber may already be installed (tests build several apps)
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts::default(),
			adapters: Adapters { auth_adapter: None, meta_adapter: None },
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn jwt_secret(&mut self, jwt_secret: impl Into<Box<str>>) -> &mut Self {
		self.opts.jwt_secret = jwt_secret.into();
		self
	}
	pub fn token_expiry(&mut self, seconds: i64) -> &mut Self {
		self.opts.token_expiry = seconds;
		self
	}
	pub fn base_username(&mut self, base_username: impl Into<Box<str>>) -> &mut Self {
		self.opts.base_username = Some(base_username.into());
		self
	}
	pub fn base_password(&mut self, base_password: impl Into<Box<str>>) -> &mut Self {
		self.opts.base_password = Some(base_password.into());
		self
	}
	pub fn base_account(&mut self, base_account: impl Into<Box<str>>) -> &mut Self {
		self.opts.base_account = Some(base_account.into());
		self
	}

	// Adapters
	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self {
		self.adapters.auth_adapter = Some(auth_adapter);
		self
	}
	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self {
		self.adapters.meta_adapter = Some(meta_adapter);
		self
	}

	/// Validates the configuration and assembles the shared app state
	pub fn build(self) -> ClResult<App> {
		if self.opts.jwt_secret.is_empty() {
			error!("FATAL: No JWT secret configured");
			return Err(Error::Internal("No JWT secret configured".to_string()));
		}
		if self.opts.token_expiry <= 0 {
			error!("FATAL: Invalid token expiry: {}", self.opts.token_expiry);
			return Err(Error::Internal("Invalid token expiry".to_string()));
		}
		let Some(auth_adapter) = self.adapters.auth_adapter else {
			error!("FATAL: No auth adapter configured");
			return Err(Error::Internal("No auth adapter configured".to_string()));
		};
		let Some(meta_adapter) = self.adapters.meta_adapter else {
			error!("FATAL: No meta adapter configured");
			return Err(Error::Internal("No meta adapter configured".to_string()));
		};

		Ok(Arc::new(AppState { opts: self.opts, auth_adapter, meta_adapter }))
	}

	pub async fn run(self) -> ClResult<()> {
		info!("Todo V{}", VERSION);

		let app = self.build()?;

		// Run bootstrapper synchronously - fail if bootstrap fails
		bootstrap::bootstrap(&app).await.map_err(|e| {
			error!("FATAL: Bootstrap failed: {}", e);
			e
		})?;

		let router = routes::init(app.clone());
		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on HTTP {}", app.opts.listen);

		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4
