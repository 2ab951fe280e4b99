// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notes::NoteResponse;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A user in API responses.
///
/// Never carries the password hash - that stays in the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserResponse {
	pub id: String,
	pub username: String,
	pub email: Option<String>,
	pub github_id: Option<String>,
	pub avatar_url: Option<String>,
	pub is_oauth_user: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Response for the session probe: the current user plus exactly the notes
/// they authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CheckSessionResponse {
	#[serde(flatten)]
	pub user: UserResponse,
	pub notes: Vec<NoteResponse>,
}
