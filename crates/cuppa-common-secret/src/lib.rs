// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret handling for Cuppa.
//!
//! This crate provides:
//! - [`SecretString`] - a string wrapper that redacts itself in `Debug` and
//!   `Display` output and zeroizes its memory on drop
//! - [`load_secret_env`] - environment-based secret loading with `_FILE`
//!   indirection for file-mounted secrets
//!
//! Any credential, token, or password that passes through the system should
//! be wrapped in [`SecretString`] as early as possible so it cannot leak
//! through logs or error messages.

use std::path::PathBuf;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string holding a secret value.
///
/// The value is never printed: both `Debug` and `Display` render as
/// `[REDACTED]`. The underlying memory is zeroized when the value is dropped.
/// Call [`SecretString::expose`] to access the secret where it is actually
/// needed (e.g., an outgoing HTTP request).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
	/// Wrap a secret value.
	pub fn new(value: String) -> Self {
		Self(value)
	}

	/// Access the secret value.
	///
	/// Keep the borrow as short-lived as possible; do not store the exposed
	/// value in longer-lived non-secret types.
	pub fn expose(&self) -> &String {
		&self.0
	}

	/// Returns true if the wrapped value is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl std::fmt::Debug for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "SecretString([REDACTED])")
	}
}

impl std::fmt::Display for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

/// Errors that can occur when loading secrets.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
	/// A `_FILE`-indirected secret could not be read.
	#[error("failed to read secret file {path}: {source}")]
	FileRead {
		path: PathBuf,
		source: std::io::Error,
	},

	/// Both the direct and `_FILE` variants of a variable were set.
	#[error("both {0} and {0}_FILE are set; use one")]
	Ambiguous(String),
}

/// Load a secret from the environment.
///
/// Checks `name` first, then `name_FILE` (the path of a file whose trimmed
/// contents are the secret, for secrets mounted by the deployment platform).
/// An unset or empty variable yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`SecretError::Ambiguous`] if both variants are set, or
/// [`SecretError::FileRead`] if the indirected file cannot be read.
pub fn load_secret_env(name: &str) -> Result<Option<SecretString>, SecretError> {
	let direct = std::env::var(name).ok().filter(|v| !v.is_empty());
	let file_var = format!("{name}_FILE");
	let file = std::env::var(&file_var).ok().filter(|v| !v.is_empty());

	match (direct, file) {
		(Some(_), Some(_)) => Err(SecretError::Ambiguous(name.to_string())),
		(Some(value), None) => Ok(Some(SecretString::new(value))),
		(None, Some(path)) => {
			let path = PathBuf::from(path);
			let contents =
				std::fs::read_to_string(&path).map_err(|source| SecretError::FileRead {
					path: path.clone(),
					source,
				})?;
			let trimmed = contents.trim();
			if trimmed.is_empty() {
				Ok(None)
			} else {
				Ok(Some(SecretString::new(trimmed.to_string())))
			}
		}
		(None, None) => Ok(None),
	}
}
