// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tasting note HTTP handlers.
//!
//! Notes are owned resources: every repository call is scoped to the
//! authenticated user, so a note belonging to someone else is
//! indistinguishable from one that does not exist.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use cuppa_server_db::{DbError, Note};

pub use cuppa_server_api::notes::*;

use crate::{
	api::AppState,
	api_response::{internal_error, not_found, validation_error},
	auth_middleware::RequireAuth,
	impl_api_error_response,
	validation::{parse_coffee_id, parse_note_id, validate_rating},
};

impl_api_error_response!(NoteErrorResponse);

pub(crate) fn note_to_response(note: &Note) -> NoteResponse {
	NoteResponse {
		id: note.id.to_string(),
		rating: note.rating,
		comment: note.comment.clone(),
		user_id: note.user_id.to_string(),
		coffee_id: note.coffee_id.to_string(),
		created_at: note.created_at,
		updated_at: note.updated_at,
	}
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "The current user's notes", body = ListNotesResponse),
        (status = 401, description = "Not logged in", body = NoteErrorResponse)
    ),
    tag = "notes"
)]
/// GET /notes - list the current user's notes.
pub async fn list_notes(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> Response {
	match state.note_repo.list_for_user(&current_user.user.id).await {
		Ok(notes) => Json(ListNotesResponse {
			notes: notes.iter().map(note_to_response).collect(),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to list notes");
			internal_error::<NoteErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 401, description = "Not logged in", body = NoteErrorResponse),
        (status = 404, description = "Coffee not found", body = NoteErrorResponse),
        (status = 422, description = "Missing or invalid fields", body = NoteErrorResponse)
    ),
    tag = "notes"
)]
/// POST /notes - review a coffee.
pub async fn create_note(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Json(req): Json<CreateNoteRequest>,
) -> Response {
	let Some(rating) = req.rating else {
		return validation_error::<NoteErrorResponse>("Rating and coffee_id are required")
			.into_response();
	};
	if let Err(reason) = validate_rating(rating) {
		return validation_error::<NoteErrorResponse>(reason).into_response();
	}

	let Some(coffee_id_str) = req.coffee_id.as_deref() else {
		return validation_error::<NoteErrorResponse>("Rating and coffee_id are required")
			.into_response();
	};
	let Some(coffee_id) = parse_coffee_id(coffee_id_str) else {
		return not_found::<NoteErrorResponse>("Coffee not found").into_response();
	};

	let note = Note::new(rating, req.comment.as_deref(), current_user.user.id, coffee_id);
	match state.note_repo.create(&note).await {
		Ok(()) => (StatusCode::CREATED, Json(note_to_response(&note))).into_response(),
		Err(DbError::NotFound(_)) => {
			not_found::<NoteErrorResponse>("Coffee not found").into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, "failed to create note");
			internal_error::<NoteErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(("id" = String, Path, description = "Note ID")),
    responses(
        (status = 200, description = "The note", body = NoteResponse),
        (status = 401, description = "Not logged in", body = NoteErrorResponse),
        (status = 404, description = "Note not found", body = NoteErrorResponse)
    ),
    tag = "notes"
)]
/// GET /notes/{id} - fetch one of the current user's notes.
pub async fn get_note(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(id): Path<String>,
) -> Response {
	let Some(note_id) = parse_note_id(&id) else {
		return not_found::<NoteErrorResponse>("Note not found").into_response();
	};

	match state
		.note_repo
		.get_for_user(&note_id, &current_user.user.id)
		.await
	{
		Ok(Some(note)) => Json(note_to_response(&note)).into_response(),
		Ok(None) => not_found::<NoteErrorResponse>("Note not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to fetch note");
			internal_error::<NoteErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    patch,
    path = "/notes/{id}",
    params(("id" = String, Path, description = "Note ID")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Updated note", body = NoteResponse),
        (status = 401, description = "Not logged in", body = NoteErrorResponse),
        (status = 404, description = "Note not found", body = NoteErrorResponse),
        (status = 422, description = "Invalid rating", body = NoteErrorResponse)
    ),
    tag = "notes"
)]
/// PATCH /notes/{id} - update rating and/or comment.
pub async fn update_note(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(id): Path<String>,
	Json(req): Json<UpdateNoteRequest>,
) -> Response {
	let Some(note_id) = parse_note_id(&id) else {
		return not_found::<NoteErrorResponse>("Note not found").into_response();
	};

	if let Some(rating) = req.rating {
		if let Err(reason) = validate_rating(rating) {
			return validation_error::<NoteErrorResponse>(reason).into_response();
		}
	}

	match state
		.note_repo
		.update_for_user(
			&note_id,
			&current_user.user.id,
			req.rating,
			req.comment.as_deref(),
		)
		.await
	{
		Ok(Some(note)) => Json(note_to_response(&note)).into_response(),
		Ok(None) => not_found::<NoteErrorResponse>("Note not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to update note");
			internal_error::<NoteErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(("id" = String, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note deleted", body = NoteSuccessResponse),
        (status = 401, description = "Not logged in", body = NoteErrorResponse),
        (status = 404, description = "Note not found", body = NoteErrorResponse)
    ),
    tag = "notes"
)]
/// DELETE /notes/{id} - delete one of the current user's notes.
pub async fn delete_note(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(id): Path<String>,
) -> Response {
	let Some(note_id) = parse_note_id(&id) else {
		return not_found::<NoteErrorResponse>("Note not found").into_response();
	};

	match state
		.note_repo
		.delete_for_user(&note_id, &current_user.user.id)
		.await
	{
		Ok(true) => Json(NoteSuccessResponse {
			message: "Note deleted successfully".to_string(),
		})
		.into_response(),
		Ok(false) => not_found::<NoteErrorResponse>("Note not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to delete note");
			internal_error::<NoteErrorResponse>("Something went wrong").into_response()
		}
	}
}
