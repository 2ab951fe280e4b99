// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! GitHub OAuth 2.0 authentication for Cuppa.
//!
//! Implements the authorization code flow used to sign users in with their
//! GitHub accounts:
//!
//! 1. Generate an authorization URL carrying a CSRF `state` parameter and
//!    redirect the browser to GitHub.
//! 2. GitHub redirects back to the configured `redirect_uri` with a `code`
//!    and the `state`.
//! 3. Exchange the code for an access token.
//! 4. Fetch the user's profile and, when the profile carries no email,
//!    their verified email list ([`resolve_verified_email`]).
//!
//! # Security Considerations
//!
//! - The `client_secret` and access tokens are wrapped in [`SecretString`]
//!   so they cannot leak through `Debug` output or logs.
//! - Always validate the `state` parameter in callbacks to prevent CSRF.

use cuppa_common_secret::SecretString;
use serde::Deserialize;
use std::env;
use url::Url;

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_API_URL: &str = "https://api.github.com/user";
const GITHUB_EMAILS_API_URL: &str = "https://api.github.com/user/emails";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A required environment variable was not set.
	#[error("missing environment variable: {0}")]
	MissingEnvVar(String),

	/// A configuration value was empty or invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Errors that can occur during OAuth operations.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
	/// The HTTP request to GitHub failed (network error, timeout, etc.).
	#[error("HTTP request failed: {0}")]
	HttpRequest(#[from] reqwest::Error),

	/// The response from GitHub could not be parsed as expected.
	#[error("failed to parse response: {0}")]
	ParseError(String),

	/// GitHub returned an error response (invalid code, expired token, etc.).
	#[error("GitHub API error: {0}")]
	GitHubError(String),
}

/// Configuration for the GitHub OAuth client.
#[derive(Debug, Clone)]
pub struct GitHubOAuthConfig {
	/// The OAuth application client ID.
	pub client_id: String,
	/// The OAuth application client secret (wrapped to prevent logging).
	pub client_secret: SecretString,
	/// The callback URL where GitHub redirects after authorization.
	pub redirect_uri: String,
	/// OAuth scopes to request (e.g., "user:email", "read:user").
	pub scopes: Vec<String>,
}

impl GitHubOAuthConfig {
	/// Default scopes: enough to read the profile and verified emails.
	pub fn default_scopes() -> Vec<String> {
		vec!["user:email".to_string(), "read:user".to_string()]
	}

	/// Load configuration from environment variables.
	///
	/// # Required Environment Variables
	///
	/// - `CUPPA_SERVER_GITHUB_CLIENT_ID`
	/// - `CUPPA_SERVER_GITHUB_CLIENT_SECRET`
	/// - `CUPPA_SERVER_GITHUB_REDIRECT_URI`
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingEnvVar`] if any required variable is not set.
	pub fn from_env() -> Result<Self, ConfigError> {
		let require = |name: &str| {
			env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
		};

		Ok(Self {
			client_id: require("CUPPA_SERVER_GITHUB_CLIENT_ID")?,
			client_secret: SecretString::new(require("CUPPA_SERVER_GITHUB_CLIENT_SECRET")?),
			redirect_uri: require("CUPPA_SERVER_GITHUB_REDIRECT_URI")?,
			scopes: Self::default_scopes(),
		})
	}

	/// Validate that all configuration fields are non-empty.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidConfig`] if any field is empty.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"client_id cannot be empty".to_string(),
			));
		}
		if self.client_secret.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"client_secret cannot be empty".to_string(),
			));
		}
		if self.redirect_uri.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"redirect_uri cannot be empty".to_string(),
			));
		}
		Ok(())
	}

	/// Join scopes into a space-separated string for the authorization URL.
	pub fn scopes_string(&self) -> String {
		self.scopes.join(" ")
	}
}

/// Response from GitHub's token endpoint after exchanging an authorization
/// code. The access token is wrapped in [`SecretString`]; use `.expose()`
/// when making API calls.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubTokenResponse {
	/// The access token for API requests (wrapped to prevent logging).
	#[serde(deserialize_with = "deserialize_secret_string")]
	pub access_token: SecretString,
	/// The token type (always "bearer").
	pub token_type: String,
	/// Granted OAuth scopes (comma or space-separated).
	pub scope: String,
}

fn deserialize_secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let s = String::deserialize(deserializer)?;
	Ok(SecretString::new(s))
}

/// User profile information from GitHub's `/user` API endpoint.
///
/// `id` is GitHub's stable numeric user id; `login` is the username and may
/// change over time. `email` is only the public profile email - many users
/// leave it unset, in which case the `/user/emails` endpoint must be
/// consulted.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
	/// GitHub's unique numeric user ID.
	pub id: i64,
	/// The GitHub username.
	pub login: String,
	/// Display name (optional, may be null).
	pub name: Option<String>,
	/// Public email address (optional, may be null).
	pub email: Option<String>,
	/// Avatar image URL (optional, may be null).
	pub avatar_url: Option<String>,
}

/// One email address from GitHub's `/user/emails` API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEmail {
	/// The email address.
	pub email: String,
	/// Whether this is the primary email.
	pub primary: bool,
	/// Whether this email has been verified by GitHub.
	pub verified: bool,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorResponse {
	error: String,
	error_description: Option<String>,
}

/// Pick the email address to identify a user by.
///
/// Prefers the profile's public email; otherwise falls back to the first
/// entry of the email list that is both primary and verified. Returns
/// `None` when neither exists - the login flow must then abort without
/// creating an account.
pub fn resolve_verified_email(user: &GitHubUser, emails: &[GitHubEmail]) -> Option<String> {
	if let Some(email) = user.email.as_deref().filter(|e| !e.is_empty()) {
		return Some(email.to_string());
	}

	emails
		.iter()
		.find(|e| e.primary && e.verified)
		.map(|e| e.email.clone())
}

/// OAuth client for authenticating users via GitHub.
///
/// # Example
///
/// ```rust,no_run
/// use cuppa_server_auth_github::{GitHubOAuthClient, GitHubOAuthConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GitHubOAuthConfig::from_env()?;
/// let client = GitHubOAuthClient::new(config);
///
/// let auth_url = client.authorization_url("csrf-state");
/// // Redirect the browser to auth_url; on callback:
/// let token = client.exchange_code("authorization-code").await?;
/// let user = client.get_user(token.access_token.expose()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubOAuthClient {
	config: GitHubOAuthConfig,
	http_client: reqwest::Client,
}

impl GitHubOAuthClient {
	/// Create a new GitHub OAuth client with the given configuration.
	///
	/// # Panics
	///
	/// Panics if the HTTP client cannot be built (should never happen in practice).
	pub fn new(config: GitHubOAuthConfig) -> Self {
		let http_client = cuppa_common_http::builder()
			.build()
			.expect("failed to build HTTP client");

		Self {
			config,
			http_client,
		}
	}

	/// Generate the GitHub authorization URL for the OAuth flow.
	///
	/// # Arguments
	///
	/// - `state`: a random, unguessable value stored server-side and checked
	///   when the user is redirected back, to prevent CSRF.
	#[tracing::instrument(skip(self), fields(client_id = %self.config.client_id))]
	pub fn authorization_url(&self, state: &str) -> String {
		let mut url = Url::parse(GITHUB_AUTHORIZE_URL).expect("invalid authorize URL");

		url
			.query_pairs_mut()
			.append_pair("client_id", &self.config.client_id)
			.append_pair("redirect_uri", &self.config.redirect_uri)
			.append_pair("scope", &self.config.scopes_string())
			.append_pair("state", state);

		url.to_string()
	}

	/// Exchange an authorization code for an access token.
	///
	/// # Errors
	///
	/// - [`OAuthError::HttpRequest`]: network error or timeout.
	/// - [`OAuthError::GitHubError`]: GitHub rejected the code (expired, invalid, etc.).
	/// - [`OAuthError::ParseError`]: unexpected response format.
	#[tracing::instrument(skip(self, code), name = "GitHubOAuthClient::exchange_code")]
	pub async fn exchange_code(&self, code: &str) -> Result<GitHubTokenResponse, OAuthError> {
		tracing::debug!("exchanging authorization code for access token");

		let response = self
			.http_client
			.post(GITHUB_TOKEN_URL)
			.header("Accept", "application/json")
			.form(&[
				("client_id", self.config.client_id.as_str()),
				("client_secret", self.config.client_secret.expose().as_str()),
				("code", code),
				("redirect_uri", self.config.redirect_uri.as_str()),
			])
			.send()
			.await?;

		let body = response.text().await?;

		// GitHub reports errors with 200 status; sniff the body first.
		if let Ok(error_response) = serde_json::from_str::<GitHubErrorResponse>(&body) {
			if !error_response.error.is_empty() {
				let message = error_response
					.error_description
					.unwrap_or(error_response.error);
				return Err(OAuthError::GitHubError(message));
			}
		}

		serde_json::from_str(&body)
			.map_err(|e| OAuthError::ParseError(format!("failed to parse token response: {e}")))
	}

	/// Fetch the authenticated user's profile from GitHub.
	#[tracing::instrument(skip(self, access_token), name = "GitHubOAuthClient::get_user")]
	pub async fn get_user(&self, access_token: &str) -> Result<GitHubUser, OAuthError> {
		tracing::debug!("fetching GitHub user info");
		self.get_api(GITHUB_USER_API_URL, access_token, "user").await
	}

	/// Fetch all email addresses associated with the authenticated user.
	///
	/// Unlike the `email` field on [`GitHubUser`], this includes private
	/// addresses. Look for `primary: true` and `verified: true` entries;
	/// [`resolve_verified_email`] implements that selection.
	#[tracing::instrument(skip(self, access_token), name = "GitHubOAuthClient::get_emails")]
	pub async fn get_emails(&self, access_token: &str) -> Result<Vec<GitHubEmail>, OAuthError> {
		tracing::debug!("fetching GitHub user emails");
		self.get_api(GITHUB_EMAILS_API_URL, access_token, "emails").await
	}

	async fn get_api<T: serde::de::DeserializeOwned>(
		&self,
		url: &str,
		access_token: &str,
		what: &str,
	) -> Result<T, OAuthError> {
		let response = self
			.http_client
			.get(url)
			.header("Accept", "application/vnd.github+json")
			.header("Authorization", format!("Bearer {access_token}"))
			.header("X-GitHub-Api-Version", "2022-11-28")
			.send()
			.await?;

		if !response.status().is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(OAuthError::GitHubError(format!(
				"failed to get {what}: {body}"
			)));
		}

		response
			.json()
			.await
			.map_err(|e| OAuthError::ParseError(format!("failed to parse {what} response: {e}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn make_config() -> GitHubOAuthConfig {
		GitHubOAuthConfig {
			client_id: "test_client_id".to_string(),
			client_secret: SecretString::new("test_secret".to_string()),
			redirect_uri: "https://example.com/callback".to_string(),
			scopes: GitHubOAuthConfig::default_scopes(),
		}
	}

	#[test]
	fn authorization_url_contains_required_params() {
		let client = GitHubOAuthClient::new(make_config());
		let url = client.authorization_url("test_state_123");

		assert!(url.starts_with("https://github.com/login/oauth/authorize"));
		assert!(url.contains("client_id=test_client_id"));
		assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcallback"));
		assert!(url.contains("state=test_state_123"));
		assert!(url.contains("scope=user%3Aemail+read%3Auser"));
	}

	#[test]
	fn github_user_deserializes() {
		let json = r#"{
            "id": 12345,
            "login": "testuser",
            "name": "Test User",
            "email": "test@example.com",
            "avatar_url": "https://avatars.githubusercontent.com/u/12345"
        }"#;

		let user: GitHubUser = serde_json::from_str(json).unwrap();
		assert_eq!(user.id, 12345);
		assert_eq!(user.login, "testuser");
		assert_eq!(user.email, Some("test@example.com".to_string()));
	}

	#[test]
	fn github_user_deserializes_with_null_fields() {
		let json = r#"{
            "id": 12345,
            "login": "testuser",
            "name": null,
            "email": null,
            "avatar_url": null
        }"#;

		let user: GitHubUser = serde_json::from_str(json).unwrap();
		assert!(user.name.is_none());
		assert!(user.email.is_none());
		assert!(user.avatar_url.is_none());
	}

	#[test]
	fn github_token_response_deserializes() {
		let json = r#"{
            "access_token": "gho_xxxxxxxxxxxx",
            "token_type": "bearer",
            "scope": "user:email,read:user"
        }"#;

		let token: GitHubTokenResponse = serde_json::from_str(json).unwrap();
		assert_eq!(token.access_token.expose(), "gho_xxxxxxxxxxxx");
		assert_eq!(token.token_type, "bearer");
	}

	#[test]
	fn config_validation_rejects_empty_fields() {
		let mut config = make_config();
		config.client_id = String::new();
		assert!(config.validate().is_err());

		let mut config = make_config();
		config.client_secret = SecretString::new(String::new());
		assert!(config.validate().is_err());

		let mut config = make_config();
		config.redirect_uri = String::new();
		assert!(config.validate().is_err());

		assert!(make_config().validate().is_ok());
	}

	#[test]
	fn scopes_string_joins_with_space() {
		let config = make_config();
		assert_eq!(config.scopes_string(), "user:email read:user");
	}

	mod resolve_verified_email {
		use super::*;

		fn user_with_email(email: Option<&str>) -> GitHubUser {
			GitHubUser {
				id: 1,
				login: "testuser".to_string(),
				name: None,
				email: email.map(|e| e.to_string()),
				avatar_url: None,
			}
		}

		#[test]
		fn prefers_profile_email() {
			let user = user_with_email(Some("profile@example.com"));
			let emails = vec![GitHubEmail {
				email: "other@example.com".to_string(),
				primary: true,
				verified: true,
			}];
			assert_eq!(
				resolve_verified_email(&user, &emails),
				Some("profile@example.com".to_string())
			);
		}

		#[test]
		fn falls_back_to_primary_verified() {
			let user = user_with_email(None);
			let emails = vec![
				GitHubEmail {
					email: "secondary@example.com".to_string(),
					primary: false,
					verified: true,
				},
				GitHubEmail {
					email: "primary@example.com".to_string(),
					primary: true,
					verified: true,
				},
			];
			assert_eq!(
				resolve_verified_email(&user, &emails),
				Some("primary@example.com".to_string())
			);
		}

		#[test]
		fn rejects_primary_but_unverified() {
			let user = user_with_email(None);
			let emails = vec![GitHubEmail {
				email: "primary@example.com".to_string(),
				primary: true,
				verified: false,
			}];
			assert_eq!(resolve_verified_email(&user, &emails), None);
		}

		#[test]
		fn empty_profile_email_is_ignored() {
			let user = user_with_email(Some(""));
			assert_eq!(resolve_verified_email(&user, &[]), None);
		}

		#[test]
		fn none_when_no_candidates() {
			let user = user_with_email(None);
			assert_eq!(resolve_verified_email(&user, &[]), None);
		}
	}

	mod redaction {
		use super::*;

		#[test]
		fn access_token_is_not_logged() {
			let json = r#"{
                "access_token": "gho_supersecrettoken",
                "token_type": "bearer",
                "scope": "user:email"
            }"#;

			let token: GitHubTokenResponse = serde_json::from_str(json).unwrap();
			let debug_output = format!("{token:?}");

			assert!(!debug_output.contains("gho_supersecrettoken"));
			assert!(debug_output.contains("[REDACTED]"));
		}

		#[test]
		fn client_secret_is_not_logged() {
			let config = GitHubOAuthConfig {
				client_id: "test_id".to_string(),
				client_secret: SecretString::new("super_secret_value".to_string()),
				redirect_uri: "https://example.com".to_string(),
				scopes: vec![],
			};
			let debug_output = format!("{config:?}");

			assert!(!debug_output.contains("super_secret_value"));
			assert!(debug_output.contains("[REDACTED]"));
		}
	}
}

#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		/// Authorization URLs must always contain required OAuth parameters
		/// regardless of the input values.
		#[test]
		fn authorization_url_always_has_required_params(
			client_id in "[a-zA-Z0-9]{1,40}",
			redirect_uri in "https://[a-z]{1,20}\\.[a-z]{2,5}/[a-z]{1,20}",
			state in "[a-zA-Z0-9]{1,64}",
		) {
			let config = GitHubOAuthConfig {
				client_id,
				client_secret: SecretString::new("secret".to_string()),
				redirect_uri,
				scopes: GitHubOAuthConfig::default_scopes(),
			};

			let client = GitHubOAuthClient::new(config);
			let url = client.authorization_url(&state);

			prop_assert!(url.starts_with(GITHUB_AUTHORIZE_URL));
			prop_assert!(url.contains("client_id="));
			prop_assert!(url.contains("redirect_uri="));
			prop_assert!(url.contains("scope="));
			prop_assert!(url.contains("state="));
		}

		/// The resolved email is always drawn from the inputs.
		#[test]
		fn resolved_email_comes_from_inputs(
			profile_email in proptest::option::of("[a-z]{1,10}@[a-z]{1,10}\\.com"),
			primary in any::<bool>(),
			verified in any::<bool>(),
		) {
			let user = GitHubUser {
				id: 1,
				login: "someone".to_string(),
				name: None,
				email: profile_email.clone(),
				avatar_url: None,
			};
			let emails = vec![GitHubEmail {
				email: "listed@example.com".to_string(),
				primary,
				verified,
			}];

			match resolve_verified_email(&user, &emails) {
				Some(email) => prop_assert!(
					Some(&email) == profile_email.as_ref() || email == "listed@example.com"
				),
				None => {
					prop_assert!(profile_email.is_none());
					prop_assert!(!(primary && verified));
				}
			}
		}

		/// Client secret should never appear in debug output.
		#[test]
		fn client_secret_never_in_debug(
			secret in "[a-z0-9]{10,40}"
		) {

			let config = GitHubOAuthConfig {
				client_id: "id".to_string(),
				client_secret: SecretString::new(secret.clone()),
				redirect_uri: "https://example.com".to_string(),
				scopes: vec![],
			};

			let debug = format!("{config:?}");
			prop_assert!(!debug.contains(&secret));
		}
	}
}
