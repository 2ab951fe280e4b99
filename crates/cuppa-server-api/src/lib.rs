// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request and response types for the Cuppa HTTP API.
//!
//! Incoming payloads are explicit per-endpoint structs; required fields are
//! modeled as `Option` and validated by the handlers so that a missing field
//! yields the same structured 422 as an empty one. With the `openapi`
//! feature enabled, every type derives `utoipa::ToSchema`.

pub mod auth;
pub mod cafes;
pub mod coffees;
pub mod notes;
pub mod users;

pub use auth::{
	AuthErrorResponse, AuthSuccessResponse, LinkGithubRequest, LoginRequest, OAuthCallbackQuery,
	OAuthStatusResponse, SignupRequest,
};
pub use cafes::{
	CafeErrorResponse, CafeResponse, CafeSuccessResponse, CreateCafeRequest, ListCafesResponse,
	UpdateCafeRequest,
};
pub use coffees::{
	CoffeeErrorResponse, CoffeeResponse, CoffeeSuccessResponse, CreateCoffeeRequest,
	ListCoffeesResponse, UpdateCoffeeRequest,
};
pub use notes::{
	CreateNoteRequest, ListNotesResponse, NoteErrorResponse, NoteResponse, NoteSuccessResponse,
	UpdateNoteRequest,
};
pub use users::{CheckSessionResponse, UserResponse};
