// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! API response helpers and macros.
//!
//! Handlers return `{error, message}` JSON bodies for failures; these
//! helpers keep the status/code pairing consistent across resources.
//! Uniqueness conflicts map to 422, the same status as validation
//! failures - that pairing is part of the public API contract.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Trait for API error response types that have `error` and `message` fields.
pub trait ApiErrorResponse: Serialize + Send {
	fn new(error: impl Into<String>, message: impl Into<String>) -> Self;
}

/// Implement `ApiErrorResponse` for a struct with `error` and `message` fields.
///
/// # Example
///
/// ```ignore
/// impl_api_error_response!(NoteErrorResponse);
/// ```
#[macro_export]
macro_rules! impl_api_error_response {
	($ty:ty) => {
		impl $crate::api_response::ApiErrorResponse for $ty {
			fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
				Self {
					error: error.into(),
					message: message.into(),
				}
			}
		}
	};
}

/// Create a 422 Unprocessable Entity response for invalid input.
pub fn validation_error<T: ApiErrorResponse>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	(
		StatusCode::UNPROCESSABLE_ENTITY,
		Json(T::new("validation_error", message)),
	)
}

/// Create a 422 Unprocessable Entity response for a uniqueness conflict.
pub fn conflict<T: ApiErrorResponse>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	(
		StatusCode::UNPROCESSABLE_ENTITY,
		Json(T::new("conflict", message)),
	)
}

/// Create a 401 Unauthorized response.
pub fn unauthorized<T: ApiErrorResponse>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	(
		StatusCode::UNAUTHORIZED,
		Json(T::new("unauthorized", message)),
	)
}

/// Create a 404 Not Found response.
pub fn not_found<T: ApiErrorResponse>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	(StatusCode::NOT_FOUND, Json(T::new("not_found", message)))
}

/// Create a 500 Internal Server Error response.
///
/// The message must stay generic; failure detail belongs in the server
/// logs, never in the body.
pub fn internal_error<T: ApiErrorResponse>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	(
		StatusCode::INTERNAL_SERVER_ERROR,
		Json(T::new("internal_error", message)),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(serde::Serialize)]
	struct TestErrorResponse {
		error: String,
		message: String,
	}

	impl_api_error_response!(TestErrorResponse);

	#[test]
	fn conflict_is_422() {
		let (status, body) = conflict::<TestErrorResponse>("taken");
		assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(body.0.error, "conflict");
	}

	#[test]
	fn validation_error_is_422() {
		let (status, body) = validation_error::<TestErrorResponse>("missing field");
		assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(body.0.error, "validation_error");
		assert_eq!(body.0.message, "missing field");
	}

	#[test]
	fn unauthorized_is_401() {
		let (status, body) = unauthorized::<TestErrorResponse>("Not logged in");
		assert_eq!(status, StatusCode::UNAUTHORIZED);
		assert_eq!(body.0.error, "unauthorized");
	}
}
