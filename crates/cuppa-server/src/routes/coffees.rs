// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Coffee HTTP handlers.
//!
//! Coffees are shared resources: any authenticated user may create,
//! update, or delete them.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use cuppa_server_db::{Coffee, DbError};

pub use cuppa_server_api::coffees::*;

use crate::{
	api::AppState,
	api_response::{internal_error, not_found, validation_error},
	auth_middleware::RequireAuth,
	impl_api_error_response,
	validation::{parse_cafe_id, parse_coffee_id},
};

impl_api_error_response!(CoffeeErrorResponse);

fn coffee_to_response(coffee: &Coffee) -> CoffeeResponse {
	CoffeeResponse {
		id: coffee.id.to_string(),
		name: coffee.name.clone(),
		description: coffee.description.clone(),
		cafe_id: coffee.cafe_id.to_string(),
		created_at: coffee.created_at,
		updated_at: coffee.updated_at,
	}
}

#[utoipa::path(
    get,
    path = "/coffees",
    responses(
        (status = 200, description = "All coffees", body = ListCoffeesResponse),
        (status = 401, description = "Not logged in", body = CoffeeErrorResponse)
    ),
    tag = "coffees"
)]
/// GET /coffees - list all coffees.
pub async fn list_coffees(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
) -> Response {
	match state.coffee_repo.list().await {
		Ok(coffees) => Json(ListCoffeesResponse {
			coffees: coffees.iter().map(coffee_to_response).collect(),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to list coffees");
			internal_error::<CoffeeErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/coffees",
    request_body = CreateCoffeeRequest,
    responses(
        (status = 201, description = "Coffee created", body = CoffeeResponse),
        (status = 401, description = "Not logged in", body = CoffeeErrorResponse),
        (status = 404, description = "Cafe not found", body = CoffeeErrorResponse),
        (status = 422, description = "Missing fields", body = CoffeeErrorResponse)
    ),
    tag = "coffees"
)]
/// POST /coffees - add a coffee to a cafe's menu.
pub async fn create_coffee(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Json(req): Json<CreateCoffeeRequest>,
) -> Response {
	let name = req.name.as_deref().map(str::trim).unwrap_or_default();
	let Some(cafe_id_str) = req.cafe_id.as_deref() else {
		return validation_error::<CoffeeErrorResponse>("Name and cafe_id are required")
			.into_response();
	};
	if name.is_empty() {
		return validation_error::<CoffeeErrorResponse>("Name and cafe_id are required")
			.into_response();
	}
	let Some(cafe_id) = parse_cafe_id(cafe_id_str) else {
		return not_found::<CoffeeErrorResponse>("Cafe not found").into_response();
	};

	let coffee = Coffee::new(name, req.description.as_deref(), cafe_id);
	match state.coffee_repo.create(&coffee).await {
		Ok(()) => (StatusCode::CREATED, Json(coffee_to_response(&coffee))).into_response(),
		Err(DbError::NotFound(_)) => {
			not_found::<CoffeeErrorResponse>("Cafe not found").into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, "failed to create coffee");
			internal_error::<CoffeeErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/coffees/{id}",
    params(("id" = String, Path, description = "Coffee ID")),
    responses(
        (status = 200, description = "The coffee", body = CoffeeResponse),
        (status = 401, description = "Not logged in", body = CoffeeErrorResponse),
        (status = 404, description = "Coffee not found", body = CoffeeErrorResponse)
    ),
    tag = "coffees"
)]
/// GET /coffees/{id} - fetch a coffee.
pub async fn get_coffee(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<String>,
) -> Response {
	let Some(coffee_id) = parse_coffee_id(&id) else {
		return not_found::<CoffeeErrorResponse>("Coffee not found").into_response();
	};

	match state.coffee_repo.get(&coffee_id).await {
		Ok(Some(coffee)) => Json(coffee_to_response(&coffee)).into_response(),
		Ok(None) => not_found::<CoffeeErrorResponse>("Coffee not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to fetch coffee");
			internal_error::<CoffeeErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    patch,
    path = "/coffees/{id}",
    params(("id" = String, Path, description = "Coffee ID")),
    request_body = UpdateCoffeeRequest,
    responses(
        (status = 200, description = "Updated coffee", body = CoffeeResponse),
        (status = 401, description = "Not logged in", body = CoffeeErrorResponse),
        (status = 404, description = "Coffee not found", body = CoffeeErrorResponse)
    ),
    tag = "coffees"
)]
/// PATCH /coffees/{id} - update name and/or description.
pub async fn update_coffee(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<String>,
	Json(req): Json<UpdateCoffeeRequest>,
) -> Response {
	let Some(coffee_id) = parse_coffee_id(&id) else {
		return not_found::<CoffeeErrorResponse>("Coffee not found").into_response();
	};

	match state
		.coffee_repo
		.update(&coffee_id, req.name.as_deref(), req.description.as_deref())
		.await
	{
		Ok(Some(coffee)) => Json(coffee_to_response(&coffee)).into_response(),
		Ok(None) => not_found::<CoffeeErrorResponse>("Coffee not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to update coffee");
			internal_error::<CoffeeErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    delete,
    path = "/coffees/{id}",
    params(("id" = String, Path, description = "Coffee ID")),
    responses(
        (status = 200, description = "Coffee deleted", body = CoffeeSuccessResponse),
        (status = 401, description = "Not logged in", body = CoffeeErrorResponse),
        (status = 404, description = "Coffee not found", body = CoffeeErrorResponse)
    ),
    tag = "coffees"
)]
/// DELETE /coffees/{id} - remove a coffee (and, via cascade, its notes).
pub async fn delete_coffee(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<String>,
) -> Response {
	let Some(coffee_id) = parse_coffee_id(&id) else {
		return not_found::<CoffeeErrorResponse>("Coffee not found").into_response();
	};

	match state.coffee_repo.delete(&coffee_id).await {
		Ok(true) => Json(CoffeeSuccessResponse {
			message: "Coffee deleted successfully".to_string(),
		})
		.into_response(),
		Ok(false) => not_found::<CoffeeErrorResponse>("Coffee not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to delete coffee");
			internal_error::<CoffeeErrorResponse>("Something went wrong").into_response()
		}
	}
}
