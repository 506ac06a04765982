//! Password hashing

use todo_types::prelude::*;

const BCRYPT_COST: u32 = 10;

fn generate_password_hash_sync(password: &str) -> ClResult<Box<str>> {
	let hash = bcrypt::hash(password, BCRYPT_COST).map_err(|e| {
		warn!("bcrypt hash error: {:?}", e);
		Error::Internal("password hash error".into())
	})?;

	Ok(hash.into())
}

/// Runs on the blocking thread pool
pub(crate) async fn generate_password_hash(password: Box<str>) -> ClResult<Box<str>> {
	tokio::task::spawn_blocking(move || generate_password_hash_sync(&password))
		.await
		.map_err(|_| Error::Internal("password hash task failed".into()))?
}

fn check_password_sync(password: &str, password_hash: &str) -> ClResult<()> {
	let res = bcrypt::verify(password, password_hash).map_err(|_| Error::PermissionDenied)?;
	if res { Ok(()) } else { Err(Error::PermissionDenied) }
}

pub(crate) async fn check_password(password: Box<str>, password_hash: Box<str>) -> ClResult<()> {
	tokio::task::spawn_blocking(move || check_password_sync(&password, &password_hash))
		.await
		.map_err(|_| Error::PermissionDenied)?
}


// vim: ts=4
