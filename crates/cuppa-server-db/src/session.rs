// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Session repository for database operations.
//!
//! Sessions are looked up by the SHA-256 hash of the cookie token; expired
//! rows are invisible to lookups and can be purged with
//! [`SessionRepository::delete_expired`].

use chrono::{DateTime, Utc};
use cuppa_server_auth::{Session, SessionId, UserId};
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::error::{DbError, Result};

/// Repository for session database operations.
#[derive(Clone)]
pub struct SessionRepository {
	pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
	id: String,
	user_id: String,
	token_hash: String,
	created_at: String,
	expires_at: String,
}

impl TryFrom<SessionRow> for Session {
	type Error = DbError;

	fn try_from(row: SessionRow) -> Result<Self> {
		Ok(Session {
			id: SessionId::new(
				Uuid::parse_str(&row.id)
					.map_err(|_| DbError::InvalidData("invalid session ID".into()))?,
			),
			user_id: UserId::new(
				Uuid::parse_str(&row.user_id)
					.map_err(|_| DbError::InvalidData("invalid user ID".into()))?,
			),
			token_hash: row.token_hash,
			created_at: parse_timestamp(&row.created_at, "created_at")?,
			expires_at: parse_timestamp(&row.expires_at, "expires_at")?,
		})
	}
}

fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::InvalidData(format!("invalid {field}: {e}")))
}

impl SessionRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Persist a new session.
	#[tracing::instrument(skip(self, session), fields(session_id = %session.id, user_id = %session.user_id))]
	pub async fn create(&self, session: &Session) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO sessions (id, user_id, token_hash, created_at, expires_at)
			VALUES (?, ?, ?, ?, ?)
			"#,
		)
		.bind(session.id.to_string())
		.bind(session.user_id.to_string())
		.bind(&session.token_hash)
		.bind(session.created_at.to_rfc3339())
		.bind(session.expires_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	/// Resolve a token hash to a live (unexpired) session.
	#[tracing::instrument(skip(self, token_hash))]
	pub async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>> {
		let row = sqlx::query_as::<_, SessionRow>(
			r#"
			SELECT id, user_id, token_hash, created_at, expires_at
			FROM sessions
			WHERE token_hash = ? AND expires_at > ?
			"#,
		)
		.bind(token_hash)
		.bind(Utc::now().to_rfc3339())
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// Delete the session for a token hash (logout).
	///
	/// Returns true if a row was deleted. Deleting an unknown hash is not
	/// an error - logout is idempotent.
	#[tracing::instrument(skip(self, token_hash))]
	pub async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool> {
		let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
			.bind(token_hash)
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Delete all sessions bound to a user.
	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn delete_for_user(&self, user_id: &UserId) -> Result<u64> {
		let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
			.bind(user_id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected())
	}

	/// Purge expired sessions.
	#[tracing::instrument(skip(self))]
	pub async fn delete_expired(&self) -> Result<u64> {
		let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
			.bind(Utc::now().to_rfc3339())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_schema_test_pool;
	use crate::user::UserRepository;
	use chrono::Duration;

	async fn setup() -> (SessionRepository, UserRepository, UserId) {
		let pool = create_schema_test_pool().await;
		let users = UserRepository::new(pool.clone());
		let user = users.create_local("amy", "hash").await.unwrap();
		(SessionRepository::new(pool), users, user.id)
	}

	#[tokio::test]
	async fn create_then_find_by_token_hash() {
		let (sessions, _, user_id) = setup().await;

		let session = Session::new(user_id, "hash_abc".to_string(), 30);
		sessions.create(&session).await.unwrap();

		let found = sessions
			.find_by_token_hash("hash_abc")
			.await
			.unwrap()
			.unwrap();
		assert_eq!(found.id, session.id);
		assert_eq!(found.user_id, user_id);
	}

	#[tokio::test]
	async fn unknown_token_hash_is_none() {
		let (sessions, _, _) = setup().await;
		assert!(sessions.find_by_token_hash("nope").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn expired_sessions_are_invisible() {
		let (sessions, _, user_id) = setup().await;

		let mut session = Session::new(user_id, "hash_old".to_string(), 30);
		session.expires_at = Utc::now() - Duration::hours(1);
		sessions.create(&session).await.unwrap();

		assert!(sessions
			.find_by_token_hash("hash_old")
			.await
			.unwrap()
			.is_none());
		assert_eq!(sessions.delete_expired().await.unwrap(), 1);
	}

	#[tokio::test]
	async fn delete_by_token_hash_is_idempotent() {
		let (sessions, _, user_id) = setup().await;

		let session = Session::new(user_id, "hash_abc".to_string(), 30);
		sessions.create(&session).await.unwrap();

		assert!(sessions.delete_by_token_hash("hash_abc").await.unwrap());
		assert!(!sessions.delete_by_token_hash("hash_abc").await.unwrap());
		assert!(sessions
			.find_by_token_hash("hash_abc")
			.await
			.unwrap()
			.is_none());
	}

	#[tokio::test]
	async fn delete_for_user_removes_all_sessions() {
		let (sessions, _, user_id) = setup().await;

		sessions
			.create(&Session::new(user_id, "h1".to_string(), 30))
			.await
			.unwrap();
		sessions
			.create(&Session::new(user_id, "h2".to_string(), 30))
			.await
			.unwrap();

		assert_eq!(sessions.delete_for_user(&user_id).await.unwrap(), 2);
		assert!(sessions.find_by_token_hash("h1").await.unwrap().is_none());
	}
}
