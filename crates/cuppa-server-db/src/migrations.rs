// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Embedded schema setup.
//!
//! Every statement is `IF NOT EXISTS`, so running this at startup against an
//! existing database is a no-op.

use sqlx::sqlite::SqlitePool;

use crate::error::Result;

/// Create all tables and indexes if they do not exist yet.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS users (
			id TEXT PRIMARY KEY,
			username TEXT NOT NULL UNIQUE,
			password_hash TEXT,
			email TEXT UNIQUE,
			github_id TEXT UNIQUE,
			avatar_url TEXT,
			is_oauth_user INTEGER NOT NULL DEFAULT 0,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS sessions (
			id TEXT PRIMARY KEY,
			user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
			token_hash TEXT NOT NULL UNIQUE,
			created_at TEXT NOT NULL,
			expires_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_token_hash ON sessions(token_hash)")
		.execute(pool)
		.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS cafes (
			id TEXT PRIMARY KEY,
			name TEXT NOT NULL,
			location TEXT NOT NULL,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS coffees (
			id TEXT PRIMARY KEY,
			name TEXT NOT NULL,
			description TEXT,
			cafe_id TEXT NOT NULL REFERENCES cafes(id) ON DELETE CASCADE,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS notes (
			id TEXT PRIMARY KEY,
			rating INTEGER NOT NULL,
			comment TEXT,
			user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
			coffee_id TEXT NOT NULL REFERENCES coffees(id) ON DELETE CASCADE,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_user_id ON notes(user_id)")
		.execute(pool)
		.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_coffee_id ON notes(coffee_id)")
		.execute(pool)
		.await?;

	tracing::debug!("database schema ready");
	Ok(())
}
