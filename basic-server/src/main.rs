#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use std::{env, path, sync::Arc};

use todo::AppBuilder;
use todo::error::{ClResult, Error};
use todo_auth_adapter_sqlite::AuthAdapterSqlite;
use todo_meta_adapter_sqlite::MetaAdapterSqlite;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub jwt_secret: String,
	pub token_expiry: Option<i64>,
	pub base_username: Option<String>,
	pub base_password: Option<String>,
	pub base_account: Option<String>,
}

impl Config {
	fn from_env() -> ClResult<Self> {
		let token_expiry = match env::var("TOKEN_EXPIRY").ok() {
			Some(v) => Some(
				v.parse()
					.map_err(|_| Error::Internal(format!("invalid TOKEN_EXPIRY: {}", v)))?,
			),
			None => None,
		};
		Ok(Config {
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
			db_dir: env::var("DB_DIR").map_or_else(|_| path::PathBuf::from("./data"), Into::into),
			jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
			token_expiry,
			base_username: env::var("BASE_USERNAME").ok(),
			base_password: env::var("BASE_PASSWORD").ok(),
			base_account: env::var("BASE_ACCOUNT").ok(),
		})
	}
}

#[tokio::main]
async fn main() -> ClResult<()> {
	let config = Config::from_env()?;

	let auth_adapter = Arc::new(AuthAdapterSqlite::new(&config.db_dir).await?);
	let meta_adapter = Arc::new(MetaAdapterSqlite::new(&config.db_dir).await?);

	let mut builder = AppBuilder::new();
	builder
		.listen(config.listen)
		.jwt_secret(config.jwt_secret)
		.auth_adapter(auth_adapter)
		.meta_adapter(meta_adapter);
	if let Some(token_expiry) = config.token_expiry {
		builder.token_expiry(token_expiry);
	}
	if let Some(base_username) = config.base_username {
		builder.base_username(base_username);
	}
	if let Some(base_password) = config.base_password {
		builder.base_password(base_password);
	}
	if let Some(base_account) = config.base_account {
		builder.base_account(base_account);
	}
	builder.run().await
}

// vim: ts=4
