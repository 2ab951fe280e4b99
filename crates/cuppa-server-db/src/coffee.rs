// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Coffee entity and repository.

use chrono::{DateTime, Utc};
use cuppa_server_auth::{CafeId, CoffeeId};
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::error::{DbError, Result};

/// A coffee served at a cafe.
#[derive(Debug, Clone)]
pub struct Coffee {
	pub id: CoffeeId,
	pub name: String,
	pub description: Option<String>,
	pub cafe_id: CafeId,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Coffee {
	/// Build a new coffee ready for insertion.
	pub fn new(name: &str, description: Option<&str>, cafe_id: CafeId) -> Self {
		let now = Utc::now();
		Self {
			id: CoffeeId::generate(),
			name: name.to_string(),
			description: description.map(|s| s.to_string()),
			cafe_id,
			created_at: now,
			updated_at: now,
		}
	}
}

/// Repository for coffee database operations.
#[derive(Clone)]
pub struct CoffeeRepository {
	pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct CoffeeRow {
	id: String,
	name: String,
	description: Option<String>,
	cafe_id: String,
	created_at: String,
	updated_at: String,
}

impl TryFrom<CoffeeRow> for Coffee {
	type Error = DbError;

	fn try_from(row: CoffeeRow) -> Result<Self> {
		Ok(Coffee {
			id: CoffeeId::new(
				Uuid::parse_str(&row.id)
					.map_err(|_| DbError::InvalidData("invalid coffee ID".into()))?,
			),
			name: row.name,
			description: row.description,
			cafe_id: CafeId::new(
				Uuid::parse_str(&row.cafe_id)
					.map_err(|_| DbError::InvalidData("invalid cafe ID".into()))?,
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

impl CoffeeRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Persist a new coffee.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the referenced cafe does not exist
	/// (foreign key violation).
	#[tracing::instrument(skip(self, coffee), fields(coffee_id = %coffee.id, cafe_id = %coffee.cafe_id))]
	pub async fn create(&self, coffee: &Coffee) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO coffees (id, name, description, cafe_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(coffee.id.to_string())
		.bind(&coffee.name)
		.bind(&coffee.description)
		.bind(coffee.cafe_id.to_string())
		.bind(coffee.created_at.to_rfc3339())
		.bind(coffee.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	/// Fetch a coffee by id.
	#[tracing::instrument(skip(self), fields(coffee_id = %id))]
	pub async fn get(&self, id: &CoffeeId) -> Result<Option<Coffee>> {
		let row = sqlx::query_as::<_, CoffeeRow>(
			r#"
			SELECT id, name, description, cafe_id, created_at, updated_at
			FROM coffees
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// List all coffees.
	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Coffee>> {
		let rows = sqlx::query_as::<_, CoffeeRow>(
			r#"
			SELECT id, name, description, cafe_id, created_at, updated_at
			FROM coffees
			ORDER BY name
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(TryInto::try_into).collect()
	}

	/// Apply a partial update; absent fields keep their value.
	#[tracing::instrument(skip(self), fields(coffee_id = %id))]
	pub async fn update(
		&self,
		id: &CoffeeId,
		name: Option<&str>,
		description: Option<&str>,
	) -> Result<Option<Coffee>> {
		let result = sqlx::query(
			r#"
			UPDATE coffees
			SET name = COALESCE(?, name),
				description = COALESCE(?, description),
				updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(name)
		.bind(description)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Ok(None);
		}
		self.get(id).await
	}

	/// Delete a coffee; its notes go with it (FK cascade).
	#[tracing::instrument(skip(self), fields(coffee_id = %id))]
	pub async fn delete(&self, id: &CoffeeId) -> Result<bool> {
		let result = sqlx::query("DELETE FROM coffees WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cafe::{Cafe, CafeRepository};
	use crate::testing::create_schema_test_pool;

	async fn setup() -> (CoffeeRepository, CafeId) {
		let pool = create_schema_test_pool().await;
		let cafes = CafeRepository::new(pool.clone());
		let cafe = Cafe::new("Sightglass", "San Francisco");
		cafes.create(&cafe).await.unwrap();
		(CoffeeRepository::new(pool), cafe.id)
	}

	#[tokio::test]
	async fn create_get_roundtrip() {
		let (repo, cafe_id) = setup().await;

		let coffee = Coffee::new("Owl's Howl", Some("espresso blend"), cafe_id);
		repo.create(&coffee).await.unwrap();

		let found = repo.get(&coffee.id).await.unwrap().unwrap();
		assert_eq!(found.name, "Owl's Howl");
		assert_eq!(found.description.as_deref(), Some("espresso blend"));
		assert_eq!(found.cafe_id, cafe_id);
	}

	#[tokio::test]
	async fn create_with_missing_cafe_is_not_found() {
		let (repo, _) = setup().await;

		let coffee = Coffee::new("Orphan", None, CafeId::generate());
		let err = repo.create(&coffee).await.unwrap_err();
		assert!(matches!(err, DbError::NotFound(_)), "got: {err:?}");
	}

	#[tokio::test]
	async fn update_is_partial() {
		let (repo, cafe_id) = setup().await;

		let coffee = Coffee::new("Owl's Howl", Some("espresso blend"), cafe_id);
		repo.create(&coffee).await.unwrap();

		let updated = repo
			.update(&coffee.id, None, Some("single origin"))
			.await
			.unwrap()
			.unwrap();
		assert_eq!(updated.name, "Owl's Howl");
		assert_eq!(updated.description.as_deref(), Some("single origin"));
	}

	#[tokio::test]
	async fn delete_cascades_from_cafe() {
		let pool = create_schema_test_pool().await;
		let cafes = CafeRepository::new(pool.clone());
		let coffees = CoffeeRepository::new(pool);

		let cafe = Cafe::new("Sightglass", "San Francisco");
		cafes.create(&cafe).await.unwrap();
		let coffee = Coffee::new("Owl's Howl", None, cafe.id);
		coffees.create(&coffee).await.unwrap();

		assert!(cafes.delete(&cafe.id).await.unwrap());
		assert!(coffees.get(&coffee.id).await.unwrap().is_none());
	}
}
