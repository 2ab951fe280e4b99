// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to create a tasting note.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateNoteRequest {
	pub rating: Option<i32>,
	pub comment: Option<String>,
	pub coffee_id: Option<String>,
}

/// Request to update a tasting note. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateNoteRequest {
	pub rating: Option<i32>,
	pub comment: Option<String>,
}

/// A tasting note in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NoteResponse {
	pub id: String,
	pub rating: i32,
	pub comment: Option<String>,
	pub user_id: String,
	pub coffee_id: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Response for listing the current user's notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListNotesResponse {
	pub notes: Vec<NoteResponse>,
}

/// Success response for note operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NoteSuccessResponse {
	pub message: String,
}

/// Error response for note operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NoteErrorResponse {
	pub error: String,
	pub message: String,
}
