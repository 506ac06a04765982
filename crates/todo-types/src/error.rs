//! Error type shared by every crate of the service.
//!
//! Authorization failures (`PermissionDenied`, `Unauthorized`,
//! `InvalidSession`) all render the same generic body, so a client cannot
//! tell "you lack permission" apart from "not in your scope".

use axum::{
	Json,
	extract::rejection::{JsonRejection, PathRejection, QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
};

use crate::types::ErrorResponse;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	Unauthorized,
	/// The active account of a session is not among the caller's memberships
	InvalidSession,
	ValidationError(String),
	Conflict(String),
	Parse,
	DbError,
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::debug!("JSON decode error: {}", err);
		Self::Parse
	}
}

// Extractor rejections are rendered through the common error body
impl From<JsonRejection> for Error {
	fn from(err: JsonRejection) -> Self {
		tracing::debug!("JSON body rejected: {}", err.body_text());
		Self::Parse
	}
}

impl From<QueryRejection> for Error {
	fn from(err: QueryRejection) -> Self {
		tracing::debug!("Query string rejected: {}", err.body_text());
		Self::Parse
	}
}

impl From<PathRejection> for Error {
	fn from(err: PathRejection) -> Self {
		match err {
			PathRejection::MissingPathParams(err) => Self::Internal(err.body_text()),
			err => {
				tracing::debug!("Path rejected: {}", err.body_text());
				Self::Parse
			}
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::InvalidSession => write!(f, "invalid session"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::Conflict(msg) => write!(f, "conflict: {}", msg),
			Error::Parse => write!(f, "parse error"),
			Error::DbError => write!(f, "database error"),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let (status, code, message) = match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "E-CORE-NOTFOUND", "not found".to_string()),
			Error::PermissionDenied | Error::Unauthorized | Error::InvalidSession => {
				(StatusCode::UNAUTHORIZED, "E-AUTH-NOPERM", "unauthorized".to_string())
			}
			Error::ValidationError(msg) => (StatusCode::BAD_REQUEST, "E-VAL-INVALID", msg),
			Error::Parse => {
				(StatusCode::BAD_REQUEST, "E-CORE-PARSE", "invalid request content".to_string())
			}
			Error::Conflict(msg) => (StatusCode::CONFLICT, "E-CORE-CONFLICT", msg),
			Error::DbError | Error::Internal(_) | Error::Io(_) => {
				tracing::error!("Internal error: {}", self);
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"E-CORE-INTERNAL",
					"internal server error".to_string(),
				)
			}
		};

		(status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
	}
}


// vim: ts=4
