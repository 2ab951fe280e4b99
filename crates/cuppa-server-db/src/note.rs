// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tasting note entity and repository.
//!
//! Notes are owned resources: every query here is scoped to a user id, so a
//! caller can only ever see or touch their own notes. There is deliberately
//! no "load all notes for a coffee" path that could leak another user's
//! reviews into a response.

use chrono::{DateTime, Utc};
use cuppa_server_auth::{CoffeeId, NoteId, UserId};
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::error::{DbError, Result};

/// A tasting note: one user's review of one coffee.
#[derive(Debug, Clone)]
pub struct Note {
	pub id: NoteId,
	/// Rating from 1 to 5. Range is validated at the API boundary.
	pub rating: i32,
	pub comment: Option<String>,
	pub user_id: UserId,
	pub coffee_id: CoffeeId,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Note {
	/// Build a new note ready for insertion.
	pub fn new(rating: i32, comment: Option<&str>, user_id: UserId, coffee_id: CoffeeId) -> Self {
		let now = Utc::now();
		Self {
			id: NoteId::generate(),
			rating,
			comment: comment.map(|s| s.to_string()),
			user_id,
			coffee_id,
			created_at: now,
			updated_at: now,
		}
	}
}

/// Repository for note database operations.
#[derive(Clone)]
pub struct NoteRepository {
	pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct NoteRow {
	id: String,
	rating: i64,
	comment: Option<String>,
	user_id: String,
	coffee_id: String,
	created_at: String,
	updated_at: String,
}

impl TryFrom<NoteRow> for Note {
	type Error = DbError;

	fn try_from(row: NoteRow) -> Result<Self> {
		Ok(Note {
			id: NoteId::new(
				Uuid::parse_str(&row.id)
					.map_err(|_| DbError::InvalidData("invalid note ID".into()))?,
			),
			rating: row.rating as i32,
			comment: row.comment,
			user_id: UserId::new(
				Uuid::parse_str(&row.user_id)
					.map_err(|_| DbError::InvalidData("invalid user ID".into()))?,
			),
			coffee_id: CoffeeId::new(
				Uuid::parse_str(&row.coffee_id)
					.map_err(|_| DbError::InvalidData("invalid coffee ID".into()))?,
			),
			created_at: parse_timestamp(&row.created_at)?,
			updated_at: parse_timestamp(&row.updated_at)?,
		})
	}
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::InvalidData(format!("invalid timestamp: {e}")))
}

impl NoteRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Persist a new note.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the referenced coffee or user does
	/// not exist (foreign key violation).
	#[tracing::instrument(skip(self, note), fields(note_id = %note.id, user_id = %note.user_id))]
	pub async fn create(&self, note: &Note) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO notes (id, rating, comment, user_id, coffee_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(note.id.to_string())
		.bind(note.rating)
		.bind(&note.comment)
		.bind(note.user_id.to_string())
		.bind(note.coffee_id.to_string())
		.bind(note.created_at.to_rfc3339())
		.bind(note.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	/// Fetch a note by id, only if it belongs to the given user.
	///
	/// Another user's note is indistinguishable from a missing one.
	#[tracing::instrument(skip(self), fields(note_id = %id, user_id = %user_id))]
	pub async fn get_for_user(&self, id: &NoteId, user_id: &UserId) -> Result<Option<Note>> {
		let row = sqlx::query_as::<_, NoteRow>(
			r#"
			SELECT id, rating, comment, user_id, coffee_id, created_at, updated_at
			FROM notes
			WHERE id = ? AND user_id = ?
			"#,
		)
		.bind(id.to_string())
		.bind(user_id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// List exactly the notes authored by the given user.
	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Note>> {
		let rows = sqlx::query_as::<_, NoteRow>(
			r#"
			SELECT id, rating, comment, user_id, coffee_id, created_at, updated_at
			FROM notes
			WHERE user_id = ?
			ORDER BY created_at DESC
			"#,
		)
		.bind(user_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(TryInto::try_into).collect()
	}

	/// Apply a partial update to the user's own note.
	///
	/// Returns the updated note, or `None` if the note does not exist or
	/// belongs to someone else.
	#[tracing::instrument(skip(self), fields(note_id = %id, user_id = %user_id))]
	pub async fn update_for_user(
		&self,
		id: &NoteId,
		user_id: &UserId,
		rating: Option<i32>,
		comment: Option<&str>,
	) -> Result<Option<Note>> {
		let result = sqlx::query(
			r#"
			UPDATE notes
			SET rating = COALESCE(?, rating),
				comment = COALESCE(?, comment),
				updated_at = ?
			WHERE id = ? AND user_id = ?
			"#,
		)
		.bind(rating)
		.bind(comment)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.bind(user_id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Ok(None);
		}
		self.get_for_user(id, user_id).await
	}

	/// Delete the user's own note. Returns false if it does not exist or
	/// belongs to someone else.
	#[tracing::instrument(skip(self), fields(note_id = %id, user_id = %user_id))]
	pub async fn delete_for_user(&self, id: &NoteId, user_id: &UserId) -> Result<bool> {
		let result = sqlx::query("DELETE FROM notes WHERE id = ? AND user_id = ?")
			.bind(id.to_string())
			.bind(user_id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}
