// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared validation utilities for API handlers.

use cuppa_server_auth::{CafeId, CoffeeId, NoteId};
use uuid::Uuid;

/// Parse a path segment as a NoteId.
///
/// A malformed id cannot name any resource, so callers respond 404.
pub fn parse_note_id(id_str: &str) -> Option<NoteId> {
	Uuid::parse_str(id_str).map(NoteId::new).ok()
}

/// Parse a path segment as a CoffeeId.
pub fn parse_coffee_id(id_str: &str) -> Option<CoffeeId> {
	Uuid::parse_str(id_str).map(CoffeeId::new).ok()
}

/// Parse a path segment as a CafeId.
pub fn parse_cafe_id(id_str: &str) -> Option<CafeId> {
	Uuid::parse_str(id_str).map(CafeId::new).ok()
}

/// Rating bounds for tasting notes.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Validate a note rating.
pub fn validate_rating(rating: i32) -> Result<(), &'static str> {
	if (MIN_RATING..=MAX_RATING).contains(&rating) {
		Ok(())
	} else {
		Err("Rating must be between 1 and 5")
	}
}
