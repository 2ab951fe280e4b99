// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to create a coffee.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateCoffeeRequest {
	pub name: Option<String>,
	pub description: Option<String>,
	pub cafe_id: Option<String>,
}

/// Request to update a coffee. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateCoffeeRequest {
	pub name: Option<String>,
	pub description: Option<String>,
}

/// A coffee in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CoffeeResponse {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
	pub cafe_id: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Response for listing coffees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListCoffeesResponse {
	pub coffees: Vec<CoffeeResponse>,
}

/// Success response for coffee operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CoffeeSuccessResponse {
	pub message: String,
}

/// Error response for coffee operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CoffeeErrorResponse {
	pub error: String,
	pub message: String,
}
