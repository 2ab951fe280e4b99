// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Database error types.
//!
//! Uniqueness races (concurrent signups with the same username, concurrent
//! GitHub links with the same id) are resolved here: the database enforces
//! the constraint atomically and the resulting driver error is mapped to
//! [`DbError::Conflict`]. Callers never pre-check and insert.

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(sqlx::Error),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Invalid data: {0}")]
	InvalidData(String),

	#[error("Internal: {0}")]
	Internal(String),
}

impl From<sqlx::Error> for DbError {
	fn from(e: sqlx::Error) -> Self {
		if let sqlx::Error::Database(ref db_err) = e {
			match db_err.kind() {
				// A UNIQUE constraint lost a race or an existing row claimed
				// the value first; either way the write must not happen.
				sqlx::error::ErrorKind::UniqueViolation => {
					return DbError::Conflict(db_err.message().to_string());
				}
				// A foreign key points at a row that is not there.
				sqlx::error::ErrorKind::ForeignKeyViolation => {
					return DbError::NotFound(db_err.message().to_string());
				}
				_ => {}
			}
		}
		DbError::Sqlx(e)
	}
}

pub type Result<T> = std::result::Result<T, DbError>;
