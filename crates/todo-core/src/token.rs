//! Access tokens.
//!
//! An access token binds a user to the account they are acting in. The
//! account binding is re-validated against the identity store on every
//! request, so a token for an account the user has since left is useless.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::app::AppBuilderOpts;
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
	pub uid: UserId,
	pub acc: AccountId,
	pub iat: Timestamp,
	pub exp: Timestamp,
}

pub fn generate_access_token(
	opts: &AppBuilderOpts,
	user_id: UserId,
	account_id: AccountId,
) -> ClResult<Box<str>> {
	let iat = Timestamp::now();
	let claims =
		AccessClaims {
			uid: user_id,
			acc: account_id,
			iat,
			exp: iat.add_seconds(opts.token_expiry),
		};
	encode_claims(&claims, &opts.jwt_secret)
}

fn encode_claims(claims: &AccessClaims, secret: &str) -> ClResult<Box<str>> {
	jsonwebtoken::encode(
		&Header::new(Algorithm::HS256),
		claims,
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.map(Into::into)
	.map_err(|e| {
		warn!("JWT encode error: {:?}", e);
		Error::Internal("JWT encode error".into())
	})
}

/// Decodes and validates an access token, checking signature and expiry
pub fn validate_access_token(opts: &AppBuilderOpts, token: &str) -> ClResult<AccessClaims> {
	let validation = Validation::new(Algorithm::HS256);
	let token_data = jsonwebtoken::decode::<AccessClaims>(
		token,
		&DecodingKey::from_secret(opts.jwt_secret.as_bytes()),
		&validation,
	)
	.map_err(|e| {
		debug!("JWT decode error: {:?}", e);
		Error::Unauthorized
	})?;

	Ok(token_data.claims)
}


// vim: ts=4
