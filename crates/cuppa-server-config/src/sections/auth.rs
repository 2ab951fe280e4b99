// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Authentication and session configuration.

use serde::Deserialize;

/// Default session lifetime in days.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

/// Default lifetime of a pending OAuth state entry, in seconds.
pub const DEFAULT_OAUTH_STATE_TTL_SECS: u64 = 600;

/// Authentication configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Deployment environment name ("development", "production", ...).
	pub environment: String,
	/// Bypass authentication for local development. Must never be enabled
	/// in production; `validate_config` rejects that combination.
	pub dev_mode: bool,
	/// Name of the session cookie.
	pub session_cookie_name: String,
	/// Session lifetime in days.
	pub session_ttl_days: i64,
	/// Lifetime of a pending OAuth CSRF state entry, in seconds.
	pub oauth_state_ttl_secs: u64,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			environment: "development".to_string(),
			dev_mode: false,
			session_cookie_name: "cuppa_session".to_string(),
			session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
			oauth_state_ttl_secs: DEFAULT_OAUTH_STATE_TTL_SECS,
		}
	}
}

/// Authentication configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub environment: Option<String>,
	#[serde(default)]
	pub dev_mode: Option<bool>,
	#[serde(default)]
	pub session_cookie_name: Option<String>,
	#[serde(default)]
	pub session_ttl_days: Option<i64>,
	#[serde(default)]
	pub oauth_state_ttl_secs: Option<u64>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.environment.is_some() {
			self.environment = other.environment;
		}
		if other.dev_mode.is_some() {
			self.dev_mode = other.dev_mode;
		}
		if other.session_cookie_name.is_some() {
			self.session_cookie_name = other.session_cookie_name;
		}
		if other.session_ttl_days.is_some() {
			self.session_ttl_days = other.session_ttl_days;
		}
		if other.oauth_state_ttl_secs.is_some() {
			self.oauth_state_ttl_secs = other.oauth_state_ttl_secs;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		let defaults = AuthConfig::default();
		AuthConfig {
			environment: self.environment.unwrap_or(defaults.environment),
			dev_mode: self.dev_mode.unwrap_or(defaults.dev_mode),
			session_cookie_name: self
				.session_cookie_name
				.unwrap_or(defaults.session_cookie_name),
			session_ttl_days: self.session_ttl_days.unwrap_or(defaults.session_ttl_days),
			oauth_state_ttl_secs: self
				.oauth_state_ttl_secs
				.unwrap_or(defaults.oauth_state_ttl_secs),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = AuthConfigLayer::default().finalize();
		assert_eq!(config.environment, "development");
		assert!(!config.dev_mode);
		assert_eq!(config.session_cookie_name, "cuppa_session");
		assert_eq!(config.session_ttl_days, DEFAULT_SESSION_TTL_DAYS);
	}

	#[test]
	fn test_merge_overrides_cookie_name() {
		let mut base = AuthConfigLayer::default();
		base.merge(AuthConfigLayer {
			session_cookie_name: Some("custom_session".to_string()),
			..Default::default()
		});
		assert_eq!(
			base.finalize().session_cookie_name,
			"custom_session"
		);
	}
}
