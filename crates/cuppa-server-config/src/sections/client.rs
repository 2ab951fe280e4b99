// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Client application configuration.
//!
//! The OAuth flow ends with browser redirects into the front-end
//! application; these URLs say where.

use serde::Deserialize;

/// Client application configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Landing page of the client application.
	pub app_url: String,
	/// Where to send the browser when OAuth login cannot resolve a usable
	/// verified email.
	pub login_error_url: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			app_url: "http://localhost:3000".to_string(),
			login_error_url: "http://localhost:3000/login?error=email-not-found".to_string(),
		}
	}
}

/// Client application configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfigLayer {
	#[serde(default)]
	pub app_url: Option<String>,
	#[serde(default)]
	pub login_error_url: Option<String>,
}

impl ClientConfigLayer {
	pub fn merge(&mut self, other: ClientConfigLayer) {
		if other.app_url.is_some() {
			self.app_url = other.app_url;
		}
		if other.login_error_url.is_some() {
			self.login_error_url = other.login_error_url;
		}
	}

	pub fn finalize(self) -> ClientConfig {
		let defaults = ClientConfig::default();
		ClientConfig {
			app_url: self.app_url.unwrap_or(defaults.app_url),
			login_error_url: self.login_error_url.unwrap_or(defaults.login_error_url),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = ClientConfigLayer::default().finalize();
		assert_eq!(config.app_url, "http://localhost:3000");
		assert!(config.login_error_url.contains("error=email-not-found"));
	}
}
