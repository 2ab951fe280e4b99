// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cafe HTTP handlers.
//!
//! Cafes are shared resources: any authenticated user may create, update,
//! or delete them.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use cuppa_server_db::Cafe;

pub use cuppa_server_api::cafes::*;

use crate::{
	api::AppState,
	api_response::{internal_error, not_found, validation_error},
	auth_middleware::RequireAuth,
	impl_api_error_response,
	validation::parse_cafe_id,
};

impl_api_error_response!(CafeErrorResponse);

fn cafe_to_response(cafe: &Cafe) -> CafeResponse {
	CafeResponse {
		id: cafe.id.to_string(),
		name: cafe.name.clone(),
		location: cafe.location.clone(),
		created_at: cafe.created_at,
		updated_at: cafe.updated_at,
	}
}

#[utoipa::path(
    get,
    path = "/cafes",
    responses(
        (status = 200, description = "All cafes", body = ListCafesResponse),
        (status = 401, description = "Not logged in", body = CafeErrorResponse)
    ),
    tag = "cafes"
)]
/// GET /cafes - list all cafes.
pub async fn list_cafes(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
) -> Response {
	match state.cafe_repo.list().await {
		Ok(cafes) => Json(ListCafesResponse {
			cafes: cafes.iter().map(cafe_to_response).collect(),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to list cafes");
			internal_error::<CafeErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/cafes",
    request_body = CreateCafeRequest,
    responses(
        (status = 201, description = "Cafe created", body = CafeResponse),
        (status = 401, description = "Not logged in", body = CafeErrorResponse),
        (status = 422, description = "Missing fields", body = CafeErrorResponse)
    ),
    tag = "cafes"
)]
/// POST /cafes - add a cafe.
pub async fn create_cafe(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Json(req): Json<CreateCafeRequest>,
) -> Response {
	let name = req.name.as_deref().map(str::trim).unwrap_or_default();
	let location = req.location.as_deref().map(str::trim).unwrap_or_default();
	if name.is_empty() || location.is_empty() {
		return validation_error::<CafeErrorResponse>("Name and location are required")
			.into_response();
	}

	let cafe = Cafe::new(name, location);
	match state.cafe_repo.create(&cafe).await {
		Ok(()) => (StatusCode::CREATED, Json(cafe_to_response(&cafe))).into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to create cafe");
			internal_error::<CafeErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/cafes/{id}",
    params(("id" = String, Path, description = "Cafe ID")),
    responses(
        (status = 200, description = "The cafe", body = CafeResponse),
        (status = 401, description = "Not logged in", body = CafeErrorResponse),
        (status = 404, description = "Cafe not found", body = CafeErrorResponse)
    ),
    tag = "cafes"
)]
/// GET /cafes/{id} - fetch a cafe.
pub async fn get_cafe(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<String>,
) -> Response {
	let Some(cafe_id) = parse_cafe_id(&id) else {
		return not_found::<CafeErrorResponse>("Cafe not found").into_response();
	};

	match state.cafe_repo.get(&cafe_id).await {
		Ok(Some(cafe)) => Json(cafe_to_response(&cafe)).into_response(),
		Ok(None) => not_found::<CafeErrorResponse>("Cafe not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to fetch cafe");
			internal_error::<CafeErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    patch,
    path = "/cafes/{id}",
    params(("id" = String, Path, description = "Cafe ID")),
    request_body = UpdateCafeRequest,
    responses(
        (status = 200, description = "Updated cafe", body = CafeResponse),
        (status = 401, description = "Not logged in", body = CafeErrorResponse),
        (status = 404, description = "Cafe not found", body = CafeErrorResponse)
    ),
    tag = "cafes"
)]
/// PATCH /cafes/{id} - update name and/or location.
pub async fn update_cafe(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<String>,
	Json(req): Json<UpdateCafeRequest>,
) -> Response {
	let Some(cafe_id) = parse_cafe_id(&id) else {
		return not_found::<CafeErrorResponse>("Cafe not found").into_response();
	};

	match state
		.cafe_repo
		.update(&cafe_id, req.name.as_deref(), req.location.as_deref())
		.await
	{
		Ok(Some(cafe)) => Json(cafe_to_response(&cafe)).into_response(),
		Ok(None) => not_found::<CafeErrorResponse>("Cafe not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to update cafe");
			internal_error::<CafeErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    delete,
    path = "/cafes/{id}",
    params(("id" = String, Path, description = "Cafe ID")),
    responses(
        (status = 200, description = "Cafe deleted", body = CafeSuccessResponse),
        (status = 401, description = "Not logged in", body = CafeErrorResponse),
        (status = 404, description = "Cafe not found", body = CafeErrorResponse)
    ),
    tag = "cafes"
)]
/// DELETE /cafes/{id} - remove a cafe (and, via cascade, its coffees and
/// their notes).
pub async fn delete_cafe(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<String>,
) -> Response {
	let Some(cafe_id) = parse_cafe_id(&id) else {
		return not_found::<CafeErrorResponse>("Cafe not found").into_response();
	};

	match state.cafe_repo.delete(&cafe_id).await {
		Ok(true) => Json(CafeSuccessResponse {
			message: "Cafe deleted successfully".to_string(),
		})
		.into_response(),
		Ok(false) => not_found::<CafeErrorResponse>("Cafe not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to delete cafe");
			internal_error::<CafeErrorResponse>("Something went wrong").into_response()
		}
	}
}
