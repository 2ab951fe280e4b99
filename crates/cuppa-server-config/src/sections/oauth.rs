// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! OAuth provider configuration.

use cuppa_common_secret::SecretString;
use serde::Deserialize;

/// Resolved OAuth configuration. A provider is present only when all of its
/// required credentials were supplied.
#[derive(Debug, Clone, Default)]
pub struct OAuthConfig {
	pub github: Option<GitHubOAuthSettings>,
}

/// Resolved GitHub OAuth credentials.
#[derive(Debug, Clone)]
pub struct GitHubOAuthSettings {
	pub client_id: String,
	pub client_secret: SecretString,
	pub redirect_uri: String,
	/// OAuth scopes to request. Defaults to `user:email` and `read:user`.
	pub scopes: Vec<String>,
}

fn default_scopes() -> Vec<String> {
	vec!["user:email".to_string(), "read:user".to_string()]
}

/// OAuth configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthConfigLayer {
	#[serde(default)]
	pub github: GitHubOAuthConfigLayer,
}

/// GitHub OAuth configuration layer (partial, for merging).
///
/// The client secret is accepted as a plain string here (TOML/env input) and
/// wrapped in [`SecretString`] the moment the layer is finalized.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubOAuthConfigLayer {
	#[serde(default)]
	pub client_id: Option<String>,
	#[serde(default)]
	pub client_secret: Option<String>,
	#[serde(default)]
	pub redirect_uri: Option<String>,
	#[serde(default)]
	pub scopes: Option<Vec<String>>,
}

impl OAuthConfigLayer {
	pub fn merge(&mut self, other: OAuthConfigLayer) {
		self.github.merge(other.github);
	}

	pub fn finalize(self) -> OAuthConfig {
		OAuthConfig {
			github: self.github.finalize(),
		}
	}
}

impl GitHubOAuthConfigLayer {
	pub fn merge(&mut self, other: GitHubOAuthConfigLayer) {
		if other.client_id.is_some() {
			self.client_id = other.client_id;
		}
		if other.client_secret.is_some() {
			self.client_secret = other.client_secret;
		}
		if other.redirect_uri.is_some() {
			self.redirect_uri = other.redirect_uri;
		}
		if other.scopes.is_some() {
			self.scopes = other.scopes;
		}
	}

	/// Finalize into resolved settings, or `None` if any required credential
	/// is missing (GitHub login is then simply not offered).
	pub fn finalize(self) -> Option<GitHubOAuthSettings> {
		match (self.client_id, self.client_secret, self.redirect_uri) {
			(Some(client_id), Some(client_secret), Some(redirect_uri)) => {
				Some(GitHubOAuthSettings {
					client_id,
					client_secret: SecretString::new(client_secret),
					redirect_uri,
					scopes: self.scopes.unwrap_or_else(default_scopes),
				})
			}
			_ => None,
		}
	}
}
