// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id and a per-password random salt; the
//! raw password is never stored. Verification parses the stored PHC string,
//! so parameters can be strengthened over time without invalidating
//! existing hashes.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::argon2_config::argon2_instance;

/// Errors that can occur while hashing a password.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
	/// The hashing operation itself failed (invalid params, OOM, ...).
	#[error("failed to hash password: {0}")]
	Hash(String),
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// Returns the PHC-format hash string suitable for storage.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if the underlying hasher fails; the
/// raw password never appears in the error.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify a password against a stored PHC-format hash.
///
/// Returns false for a malformed stored hash rather than erroring; a user
/// row with a corrupt hash simply cannot log in with a password.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
	let Ok(parsed) = PasswordHash::new(stored_hash) else {
		return false;
	};
	argon2_instance()
		.verify_password(password.as_bytes(), &parsed)
		.is_ok()
}
