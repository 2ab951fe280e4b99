// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Core type definitions for authentication and persistence.
//!
//! ID newtypes are type-safe wrappers around UUIDs for the different entity
//! types ([`UserId`], [`SessionId`], [`NoteId`], [`CoffeeId`], [`CafeId`]),
//! preventing accidental mixing. All ID types implement transparent serde
//! serialization (as UUID strings) and provide conversion to/from
//! [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(SessionId, "Unique identifier for a session.");
define_id_type!(NoteId, "Unique identifier for a tasting note.");
define_id_type!(CoffeeId, "Unique identifier for a coffee.");
define_id_type!(CafeId, "Unique identifier for a cafe.");

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn user_id_roundtrips() {
		let uuid = Uuid::new_v4();
		let user_id = UserId::new(uuid);
		assert_eq!(user_id.into_inner(), uuid);
	}

	#[test]
	fn user_id_generates_unique() {
		let id1 = UserId::generate();
		let id2 = UserId::generate();
		assert_ne!(id1, id2);
	}

	#[test]
	fn user_id_serializes_as_uuid() {
		let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
		let user_id = UserId::new(uuid);
		let json = serde_json::to_string(&user_id).unwrap();
		assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
	}

	#[test]
	fn user_id_deserializes_from_uuid() {
		let json = "\"550e8400-e29b-41d4-a716-446655440000\"";
		let user_id: UserId = serde_json::from_str(json).unwrap();
		assert_eq!(
			user_id.into_inner(),
			Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()
		);
	}

	proptest! {
			#[test]
			fn user_id_roundtrip_any_uuid(
					a: u128
			) {
					let uuid = Uuid::from_u128(a);
					let user_id = UserId::new(uuid);
					prop_assert_eq!(user_id.into_inner(), uuid);
					prop_assert_eq!(Uuid::from(user_id), uuid);
			}

			#[test]
			fn session_id_roundtrip_any_uuid(
					a: u128
			) {
					let uuid = Uuid::from_u128(a);
					let session_id = SessionId::new(uuid);
					prop_assert_eq!(session_id.into_inner(), uuid);
			}

			#[test]
			fn note_id_serde_roundtrip(
					a: u128
			) {
					let note_id = NoteId::new(Uuid::from_u128(a));
					let json = serde_json::to_string(&note_id).unwrap();
					let deserialized: NoteId = serde_json::from_str(&json).unwrap();
					prop_assert_eq!(note_id, deserialized);
			}

			#[test]
			fn cafe_id_display_matches_uuid(
					a: u128
			) {
					let uuid = Uuid::from_u128(a);
					let cafe_id = CafeId::new(uuid);
					prop_assert_eq!(cafe_id.to_string(), uuid.to_string());
			}
	}
}
