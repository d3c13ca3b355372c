// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	extract::rejection::{JsonRejection, PathRejection, QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use taskhub_server_api::{ErrorResponse, FieldError};
use taskhub_server_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Database error from taskhub-server-db.
	#[error("Database error: {0}")]
	Db(#[from] DbError),

	#[error("Not found: {0}")]
	NotFound(String),

	/// Unique username or email already taken.
	#[error("Conflict: {0}")]
	Conflict(String),

	/// Request could not be read at all (malformed JSON, bad path segment).
	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// One or more fields failed validation.
	#[error("Validation failed: {} field error(s)", .0.len())]
	Validation(Vec<FieldError>),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl ServerError {
	/// Validation failure on a single field.
	pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation(vec![FieldError::new(field, message)])
	}

	pub fn status(&self) -> StatusCode {
		match self {
			ServerError::Db(DbError::NotFound(_)) | ServerError::NotFound(_) => StatusCode::NOT_FOUND,
			ServerError::Db(DbError::Conflict(_)) | ServerError::Conflict(_) => StatusCode::CONFLICT,
			ServerError::BadRequest(_) | ServerError::Validation(_) => StatusCode::BAD_REQUEST,
			ServerError::Db(_) | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<JsonRejection> for ServerError {
	fn from(rejection: JsonRejection) -> Self {
		ServerError::BadRequest(rejection.body_text())
	}
}

impl From<QueryRejection> for ServerError {
	fn from(rejection: QueryRejection) -> Self {
		ServerError::BadRequest(rejection.body_text())
	}
}

impl From<PathRejection> for ServerError {
	fn from(rejection: PathRejection) -> Self {
		ServerError::BadRequest(rejection.body_text())
	}
}

fn body(error: &str, message: impl Into<String>) -> ErrorResponse {
	ErrorResponse {
		error: error.to_string(),
		message: message.into(),
		fields: Vec::new(),
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let status = self.status();
		let error_response = match self {
			ServerError::Db(DbError::NotFound(what)) | ServerError::NotFound(what) => {
				body("not_found", format!("{what} not found"))
			}
			ServerError::Db(DbError::Conflict(msg)) | ServerError::Conflict(msg) => {
				body("conflict", msg)
			}
			ServerError::Db(e) => {
				tracing::error!(error = %e, "database error");
				body("database_error", "A database error occurred")
			}
			ServerError::BadRequest(msg) => body("bad_request", msg),
			ServerError::Validation(fields) => {
				tracing::debug!(?fields, "request failed validation");
				ErrorResponse {
					error: "validation_failed".to_string(),
					message: "One or more fields are invalid".to_string(),
					fields,
				}
			}
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				body("internal_error", "An internal error occurred")
			}
		};

		(status, Json(error_response)).into_response()
	}
}
