// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! User repository for database operations.
//!
//! This module is the identity store: users are found by id, username,
//! email, or linked GitHub id, and created either with a local credential
//! or from an OAuth profile. Uniqueness of username, email, and github_id
//! is enforced by the database; see [`crate::error::DbError`] for how
//! constraint violations surface as `Conflict`.

use chrono::{DateTime, Utc};
use cuppa_server_auth::{User, UserId};
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::error::{DbError, Result};

const USER_COLUMNS: &str = "id, username, password_hash, email, github_id, avatar_url, \
	 is_oauth_user, created_at, updated_at";

/// Repository for user database operations.
///
/// All IDs are UUIDs stored as strings in SQLite; timestamps are RFC 3339
/// strings.
#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
	id: String,
	username: String,
	password_hash: Option<String>,
	email: Option<String>,
	github_id: Option<String>,
	avatar_url: Option<String>,
	is_oauth_user: i64,
	created_at: String,
	updated_at: String,
}

impl TryFrom<UserRow> for User {
	type Error = DbError;

	fn try_from(row: UserRow) -> Result<Self> {
		Ok(User {
			id: UserId::new(
				Uuid::parse_str(&row.id)
					.map_err(|_| DbError::InvalidData("invalid user ID".into()))?,
			),
			username: row.username,
			password_hash: row.password_hash,
			email: row.email,
			github_id: row.github_id,
			avatar_url: row.avatar_url,
			is_oauth_user: row.is_oauth_user != 0,
			created_at: parse_timestamp(&row.created_at, "created_at")?,
			updated_at: parse_timestamp(&row.updated_at, "updated_at")?,
		})
	}
}

fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::InvalidData(format!("invalid {field}: {e}")))
}

impl UserRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a user with a local credential.
	///
	/// # Arguments
	/// * `username` - the unique username (already validated)
	/// * `password_hash` - Argon2id PHC string; never the raw password
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the username is already taken - the
	/// UNIQUE constraint is the only arbiter, so two racing signups cannot
	/// both succeed.
	#[tracing::instrument(skip(self, password_hash), fields(username = %username))]
	pub async fn create_local(&self, username: &str, password_hash: &str) -> Result<User> {
		let user = User {
			id: UserId::generate(),
			username: username.to_string(),
			password_hash: Some(password_hash.to_string()),
			email: None,
			github_id: None,
			avatar_url: None,
			is_oauth_user: false,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		};

		self.insert(&user).await?;
		Ok(user)
	}

	/// Create a user from an OAuth profile.
	///
	/// The account carries no password hash; `is_oauth_user` is set at
	/// creation and stays true even if a password is added later.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the username or email is already taken.
	#[tracing::instrument(skip(self), fields(username = %username))]
	pub async fn create_oauth(
		&self,
		username: &str,
		email: &str,
		avatar_url: Option<&str>,
	) -> Result<User> {
		let user = User {
			id: UserId::generate(),
			username: username.to_string(),
			password_hash: None,
			email: Some(email.to_string()),
			github_id: None,
			avatar_url: avatar_url.map(|s| s.to_string()),
			is_oauth_user: true,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		};

		self.insert(&user).await?;
		Ok(user)
	}

	async fn insert(&self, user: &User) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO users (id, username, password_hash, email, github_id, avatar_url,
				is_oauth_user, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.to_string())
		.bind(&user.username)
		.bind(&user.password_hash)
		.bind(&user.email)
		.bind(&user.github_id)
		.bind(&user.avatar_url)
		.bind(if user.is_oauth_user { 1 } else { 0 })
		.bind(user.created_at.to_rfc3339())
		.bind(user.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	/// Look up a user by id.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
		let row = sqlx::query_as::<_, UserRow>(&format!(
			"SELECT {USER_COLUMNS} FROM users WHERE id = ?"
		))
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// Look up a user by username.
	#[tracing::instrument(skip(self), fields(username = %username))]
	pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
		let row = sqlx::query_as::<_, UserRow>(&format!(
			"SELECT {USER_COLUMNS} FROM users WHERE username = ?"
		))
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// Look up a user by email.
	#[tracing::instrument(skip(self, email))]
	pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
		let row = sqlx::query_as::<_, UserRow>(&format!(
			"SELECT {USER_COLUMNS} FROM users WHERE email = ?"
		))
		.bind(email)
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// Look up a user by linked GitHub id.
	#[tracing::instrument(skip(self), fields(github_id = %github_id))]
	pub async fn find_by_github_id(&self, github_id: &str) -> Result<Option<User>> {
		let row = sqlx::query_as::<_, UserRow>(&format!(
			"SELECT {USER_COLUMNS} FROM users WHERE github_id = ?"
		))
		.bind(github_id)
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// Link a GitHub identity to an existing user.
	///
	/// A single UPDATE; the `github_id` UNIQUE constraint arbitrates
	/// concurrent link attempts, so a violation means the id is already
	/// claimed by some user and nothing was written.
	///
	/// # Errors
	/// - `DbError::Conflict` if the GitHub id is linked to another user
	/// - `DbError::NotFound` if the user row does not exist
	#[tracing::instrument(skip(self), fields(user_id = %user_id, github_id = %github_id))]
	pub async fn link_github(
		&self,
		user_id: &UserId,
		github_id: &str,
		avatar_url: Option<&str>,
	) -> Result<User> {
		let result = sqlx::query(
			r#"
			UPDATE users
			SET github_id = ?, avatar_url = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(github_id)
		.bind(avatar_url)
		.bind(Utc::now().to_rfc3339())
		.bind(user_id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("user {user_id}")));
		}

		self.find_by_id(user_id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("user {user_id}")))
	}
}
