// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! User entity and username rules.
//!
//! This module provides:
//! - [`User`] - core user entity, local-credential or OAuth-created
//! - [`validate_username`] / [`generate_username_base`] - username rules

use chrono::{DateTime, Utc};

use crate::types::UserId;

/// Reserved usernames that cannot be used.
/// These are reserved for system use or would collide with routes.
pub const RESERVED_USERNAMES: &[&str] = &[
	// System/admin
	"root",
	"admin",
	"administrator",
	"system",
	"support",
	"help",
	"info",
	"contact",
	"noreply",
	"no-reply",
	// Cuppa-specific / route collisions
	"cuppa",
	"api",
	"auth",
	"oauth",
	"github",
	"login",
	"logout",
	"signup",
	"check_session",
	"notes",
	"coffees",
	"cafes",
	"health",
	"settings",
	"profile",
	"account",
	// Misc reserved
	"null",
	"undefined",
	"none",
	"anonymous",
	"guest",
	"user",
	"users",
	"test",
	"demo",
	"example",
];

/// Check if a username is reserved.
pub fn is_username_reserved(username: &str) -> bool {
	let lower = username.to_lowercase();
	RESERVED_USERNAMES.iter().any(|&reserved| reserved == lower)
}

/// A user in the system.
///
/// A user either holds a local credential (`password_hash` present) or was
/// created through the OAuth callback (`is_oauth_user` true, no hash). A
/// GitHub identity may be linked to either kind later without changing
/// `is_oauth_user`.
///
/// # PII Handling
///
/// `email` and `avatar_url` are user PII and should be redacted in logs.
/// `password_hash` must never leave the server; this struct deliberately
/// does not implement `Serialize` — API payloads go through explicit
/// response types instead.
#[derive(Debug, Clone)]
pub struct User {
	/// Unique identifier for this user.
	pub id: UserId,

	/// Unique username, chosen at signup or derived from the OAuth profile.
	pub username: String,

	/// Argon2id hash of the local password. Present iff a local credential
	/// exists; OAuth-created users have none until they set one.
	pub password_hash: Option<String>,

	/// Unique email address. Required for OAuth-created accounts, optional
	/// for local signups.
	pub email: Option<String>,

	/// GitHub account id linked to this user, unique across all users.
	pub github_id: Option<String>,

	/// URL to the user's avatar image.
	pub avatar_url: Option<String>,

	/// Whether this account was created through the OAuth callback.
	/// Set at creation and never derived from other fields.
	pub is_oauth_user: bool,

	/// When the user was created.
	pub created_at: DateTime<Utc>,

	/// When the user was last updated.
	pub updated_at: DateTime<Utc>,
}

impl User {
	/// Returns true if this user can log in with a password.
	pub fn has_local_credential(&self) -> bool {
		self.password_hash.is_some()
	}

	/// Returns true if a GitHub identity is linked to this user.
	pub fn has_github_linked(&self) -> bool {
		self.github_id.is_some()
	}
}

/// Validates a username.
/// Rules:
/// - 3-39 characters
/// - Alphanumeric and underscores only
/// - Cannot start with underscore
/// - Cannot be all numeric
/// - Cannot be a reserved username
pub fn validate_username(username: &str) -> Result<(), &'static str> {
	if username.len() < 3 {
		return Err("Username must be at least 3 characters");
	}
	if username.len() > 39 {
		return Err("Username must be at most 39 characters");
	}
	if !username
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || c == '_')
	{
		return Err("Username can only contain letters, numbers, and underscores");
	}
	if username.starts_with('_') {
		return Err("Username cannot start with underscore");
	}
	if username.chars().all(|c| c.is_ascii_digit()) {
		return Err("Username cannot be all numbers");
	}
	if is_username_reserved(username) {
		return Err("This username is reserved");
	}
	Ok(())
}

/// Generates a username from a display name or email.
/// Sanitizes to alphanumeric + underscore, lowercases.
pub fn generate_username_base(source: &str) -> String {
	let base = if let Some(at_pos) = source.find('@') {
		&source[..at_pos]
	} else {
		source
	};

	let sanitized: String = base
		.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() {
				c.to_ascii_lowercase()
			} else {
				'_'
			}
		})
		.collect();

	let collapsed: String = sanitized
		.trim_start_matches('_')
		.split('_')
		.filter(|s| !s.is_empty())
		.collect::<Vec<_>>()
		.join("_");

	if collapsed.len() < 3 {
		format!("user_{}", collapsed)
	} else if collapsed.len() > 39 {
		collapsed[..39].to_string()
	} else {
		collapsed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn make_test_user() -> User {
		User {
			id: UserId::generate(),
			username: "amy".to_string(),
			password_hash: Some("$argon2id$stub".to_string()),
			email: Some("amy@example.com".to_string()),
			github_id: None,
			avatar_url: None,
			is_oauth_user: false,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		}
	}

	mod user {
		use super::*;

		#[test]
		fn has_local_credential_tracks_password_hash() {
			let mut user = make_test_user();
			assert!(user.has_local_credential());

			user.password_hash = None;
			assert!(!user.has_local_credential());
		}

		#[test]
		fn has_github_linked_tracks_github_id() {
			let mut user = make_test_user();
			assert!(!user.has_github_linked());

			user.github_id = Some("12345".to_string());
			assert!(user.has_github_linked());
		}

		#[test]
		fn linking_does_not_change_oauth_flag() {
			let mut user = make_test_user();
			assert!(!user.is_oauth_user);

			user.github_id = Some("12345".to_string());
			assert!(!user.is_oauth_user);
		}
	}

	mod validate_username {
		use super::*;

		#[test]
		fn test_validate_username_valid() {
			assert!(validate_username("alice").is_ok());
			assert!(validate_username("bob123").is_ok());
			assert!(validate_username("user_name").is_ok());
			assert!(validate_username("a1b").is_ok());
		}

		#[test]
		fn test_validate_username_too_short() {
			assert!(validate_username("ab").is_err());
			assert!(validate_username("a").is_err());
			assert!(validate_username("").is_err());
		}

		#[test]
		fn test_validate_username_too_long() {
			let long = "a".repeat(40);
			assert!(validate_username(&long).is_err());
		}

		#[test]
		fn test_validate_username_invalid_chars() {
			assert!(validate_username("user@name").is_err());
			assert!(validate_username("user.name").is_err());
			assert!(validate_username("user-name").is_err());
			assert!(validate_username("user name").is_err());
		}

		#[test]
		fn test_validate_username_starts_with_underscore() {
			assert!(validate_username("_username").is_err());
		}

		#[test]
		fn test_validate_username_all_numbers() {
			assert!(validate_username("12345").is_err());
			assert!(validate_username("123").is_err());
		}

		#[test]
		fn test_validate_username_reserved() {
			assert!(validate_username("root").is_err());
			assert!(validate_username("admin").is_err());
			assert!(validate_username("cafes").is_err());
		}
	}

	mod reserved_usernames {
		use super::*;

		#[test]
		fn test_reserved_usernames() {
			assert!(is_username_reserved("root"));
			assert!(is_username_reserved("ROOT")); // case insensitive
			assert!(is_username_reserved("cuppa"));
			assert!(is_username_reserved("notes"));
			assert!(!is_username_reserved("alice"));
			assert!(!is_username_reserved("bob123"));
		}
	}

	mod generate_username {
		use super::*;

		#[test]
		fn test_generate_username_from_email() {
			assert_eq!(generate_username_base("alice@example.com"), "alice");
			assert_eq!(generate_username_base("bob.smith@gmail.com"), "bob_smith");
		}

		#[test]
		fn test_generate_username_from_name() {
			assert_eq!(generate_username_base("Alice Smith"), "alice_smith");
			assert_eq!(generate_username_base("Bob"), "bob");
		}

		#[test]
		fn test_generate_username_special_chars() {
			assert_eq!(generate_username_base("user@#$%name"), "user");
		}

		#[test]
		fn test_generate_username_short_input() {
			assert_eq!(generate_username_base("ab"), "user_ab");
		}

		#[test]
		fn test_generate_username_long_input() {
			let long = "a".repeat(50);
			let result = generate_username_base(&long);
			assert!(result.len() <= 39);
		}
	}

	mod username_proptests {
		use super::*;
		use proptest::prelude::*;

		proptest! {
				#[test]
				fn prop_valid_username_format(
						prefix in "[a-z][a-z0-9_]{2,20}"
				) {
						// Generated strings may still hit the reserved list.
						if !is_username_reserved(&prefix) {
								prop_assert!(validate_username(&prefix).is_ok());
						}
				}

				#[test]
				fn prop_generated_username_is_well_formed(
						input in "[a-zA-Z0-9@._\\- ]{1,50}"
				) {
						let generated = generate_username_base(&input);
						prop_assert!(generated.len() >= 3);
						prop_assert!(generated.len() <= 39);
						prop_assert!(generated.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
				}

				#[test]
				fn prop_reserved_usernames_rejected(
						reserved in proptest::sample::select(RESERVED_USERNAMES.to_vec())
				) {
						prop_assert!(validate_username(reserved).is_err());
				}
		}
	}
}
