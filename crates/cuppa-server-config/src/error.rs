// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A config file exists but could not be read.
	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		source: std::io::Error,
	},

	/// A config file could not be parsed as TOML.
	#[error("failed to parse config file {path}: {source}")]
	TomlParse {
		path: PathBuf,
		source: toml::de::Error,
	},

	/// An environment variable held a value of the wrong shape.
	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	/// A secret could not be loaded.
	#[error("secret error: {0}")]
	Secret(String),

	/// Cross-field validation failed.
	#[error("invalid configuration: {0}")]
	Validation(String),
}
