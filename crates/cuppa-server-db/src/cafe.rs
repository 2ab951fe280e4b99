// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cafe entity and repository.

use chrono::{DateTime, Utc};
use cuppa_server_auth::CafeId;
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::error::{DbError, Result};

/// A cafe that serves coffees.
#[derive(Debug, Clone)]
pub struct Cafe {
	pub id: CafeId,
	pub name: String,
	pub location: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Cafe {
	/// Build a new cafe ready for insertion.
	pub fn new(name: &str, location: &str) -> Self {
		let now = Utc::now();
		Self {
			id: CafeId::generate(),
			name: name.to_string(),
			location: location.to_string(),
			created_at: now,
			updated_at: now,
		}
	}
}

/// Repository for cafe database operations.
#[derive(Clone)]
pub struct CafeRepository {
	pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct CafeRow {
	id: String,
	name: String,
	location: String,
	created_at: String,
	updated_at: String,
}

impl TryFrom<CafeRow> for Cafe {
	type Error = DbError;

	fn try_from(row: CafeRow) -> Result<Self> {
		Ok(Cafe {
			id: CafeId::new(
				Uuid::parse_str(&row.id)
					.map_err(|_| DbError::InvalidData("invalid cafe ID".into()))?,
			),
			name: row.name,
			location: row.location,
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

impl CafeRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Persist a new cafe.
	#[tracing::instrument(skip(self, cafe), fields(cafe_id = %cafe.id))]
	pub async fn create(&self, cafe: &Cafe) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO cafes (id, name, location, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?)
			"#,
		)
		.bind(cafe.id.to_string())
		.bind(&cafe.name)
		.bind(&cafe.location)
		.bind(cafe.created_at.to_rfc3339())
		.bind(cafe.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	/// Fetch a cafe by id.
	#[tracing::instrument(skip(self), fields(cafe_id = %id))]
	pub async fn get(&self, id: &CafeId) -> Result<Option<Cafe>> {
		let row = sqlx::query_as::<_, CafeRow>(
			"SELECT id, name, location, created_at, updated_at FROM cafes WHERE id = ?",
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// List all cafes.
	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Cafe>> {
		let rows = sqlx::query_as::<_, CafeRow>(
			"SELECT id, name, location, created_at, updated_at FROM cafes ORDER BY name",
		)
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(TryInto::try_into).collect()
	}

	/// Apply a partial update; absent fields keep their value.
	///
	/// Returns the updated cafe, or `None` if the id does not exist.
	#[tracing::instrument(skip(self), fields(cafe_id = %id))]
	pub async fn update(
		&self,
		id: &CafeId,
		name: Option<&str>,
		location: Option<&str>,
	) -> Result<Option<Cafe>> {
		let result = sqlx::query(
			r#"
			UPDATE cafes
			SET name = COALESCE(?, name),
				location = COALESCE(?, location),
				updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(name)
		.bind(location)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Ok(None);
		}
		self.get(id).await
	}

	/// Delete a cafe; its coffees and their notes go with it (FK cascade).
	#[tracing::instrument(skip(self), fields(cafe_id = %id))]
	pub async fn delete(&self, id: &CafeId) -> Result<bool> {
		let result = sqlx::query("DELETE FROM cafes WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}
