// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server-side sessions and opaque session tokens.
//!
//! A session binds a browser to exactly one user. The browser holds an
//! opaque random token in an HttpOnly cookie; the database stores only the
//! SHA-256 hash of that token, so a leaked database cannot be replayed
//! against the API.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::types::{SessionId, UserId};

/// Prefix for session tokens, making them recognizable in logs redaction
/// and support tickets without revealing the value.
pub const SESSION_TOKEN_PREFIX: &str = "cs_";

/// Number of random bytes in a session token.
const SESSION_TOKEN_BYTES: usize = 32;

/// A server-side session.
///
/// Created on successful login, signup, or OAuth callback; deleted on
/// logout. A session is either fully bound to one user or absent - there is
/// no partial state.
#[derive(Debug, Clone)]
pub struct Session {
	/// Unique identifier for this session.
	pub id: SessionId,
	/// The user this session is bound to.
	pub user_id: UserId,
	/// SHA-256 hex of the opaque cookie token. The raw token is never stored.
	pub token_hash: String,
	/// When the session was created.
	pub created_at: DateTime<Utc>,
	/// When the session stops being honored.
	pub expires_at: DateTime<Utc>,
}

impl Session {
	/// Create a new session for a user.
	///
	/// # Arguments
	/// * `user_id` - the user to bind
	/// * `token_hash` - hash of the freshly generated token ([`hash_session_token`])
	/// * `ttl_days` - session lifetime
	pub fn new(user_id: UserId, token_hash: String, ttl_days: i64) -> Self {
		let now = Utc::now();
		Self {
			id: SessionId::generate(),
			user_id,
			token_hash,
			created_at: now,
			expires_at: now + Duration::days(ttl_days),
		}
	}

	/// Returns true if this session is past its expiry.
	pub fn is_expired(&self) -> bool {
		Utc::now() > self.expires_at
	}
}

/// Generate a fresh opaque session token.
///
/// Format: `cs_` + 64 hex chars (32 random bytes from the OS RNG).
/// The caller sends this to the browser and stores only its hash.
pub fn generate_session_token() -> String {
	let mut bytes = [0u8; SESSION_TOKEN_BYTES];
	rand::rngs::OsRng.fill_bytes(&mut bytes);
	format!("{SESSION_TOKEN_PREFIX}{}", hex::encode(bytes))
}

/// Hash a session token for storage or lookup.
///
/// SHA-256 is sufficient here: tokens are high-entropy random values, so no
/// salt or slow hash is needed.
pub fn hash_session_token(token: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_tokens_have_prefix_and_length() {
		let token = generate_session_token();
		assert!(token.starts_with(SESSION_TOKEN_PREFIX));
		assert_eq!(token.len(), SESSION_TOKEN_PREFIX.len() + SESSION_TOKEN_BYTES * 2);
	}

	#[test]
	fn generated_tokens_are_unique() {
		assert_ne!(generate_session_token(), generate_session_token());
	}

	#[test]
	fn token_hash_is_deterministic_and_not_identity() {
		let token = generate_session_token();
		let hash = hash_session_token(&token);
		assert_eq!(hash, hash_session_token(&token));
		assert_ne!(hash, token);
		assert_eq!(hash.len(), 64);
	}

	#[test]
	fn new_session_expires_in_the_future() {
		let session = Session::new(UserId::generate(), "hash".to_string(), 30);
		assert!(!session.is_expired());
		assert!(session.expires_at > session.created_at);
	}

	#[test]
	fn session_with_past_expiry_is_expired() {
		let mut session = Session::new(UserId::generate(), "hash".to_string(), 30);
		session.expires_at = Utc::now() - Duration::hours(1);
		assert!(session.is_expired());
	}
}
