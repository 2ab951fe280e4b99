// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// Request to create a local account.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SignupRequest {
	pub username: Option<String>,
	pub password: Option<String>,
}

/// Request to log in with a local credential.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginRequest {
	pub username: Option<String>,
	pub password: Option<String>,
}

/// Query parameters GitHub appends to the OAuth callback.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct OAuthCallbackQuery {
	pub code: Option<String>,
	pub state: Option<String>,
	/// Set instead of `code` when the user denied the authorization.
	pub error: Option<String>,
}

/// Request to link a GitHub identity to the current account.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LinkGithubRequest {
	pub github_id: Option<String>,
	pub avatar_url: Option<String>,
}

/// Response for the OAuth status probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct OAuthStatusResponse {
	pub is_oauth_user: bool,
	pub has_github_linked: bool,
	pub avatar_url: Option<String>,
}

/// Success response for auth operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AuthSuccessResponse {
	pub message: String,
}

/// Error response for auth operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AuthErrorResponse {
	pub error: String,
	pub message: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn signup_request_tolerates_missing_fields() {
		let req: SignupRequest = serde_json::from_str("{}").unwrap();
		assert!(req.username.is_none());
		assert!(req.password.is_none());
	}

	#[test]
	fn link_request_parses_numeric_free_github_id() {
		let req: LinkGithubRequest =
			serde_json::from_str(r#"{"github_id": "12345", "avatar_url": null}"#).unwrap();
		assert_eq!(req.github_id.as_deref(), Some("12345"));
		assert!(req.avatar_url.is_none());
	}
}
