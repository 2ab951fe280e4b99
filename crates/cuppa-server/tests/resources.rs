// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! End-to-end tests for the protected resource endpoints: the uniform
//! authorization gate and the notes/coffees/cafes CRUD.

mod common;

use axum::http::StatusCode;
use common::{body_json, request, seed_coffee, signup, test_app};

#[tokio::test]
async fn every_resource_endpoint_is_gated() {
	let app = test_app().await;

	let attempts = [
		("GET", "/notes"),
		("POST", "/notes"),
		("GET", "/coffees"),
		("POST", "/coffees"),
		("GET", "/cafes"),
		("POST", "/cafes"),
		("GET", "/notes/550e8400-e29b-41d4-a716-446655440000"),
		("PATCH", "/coffees/550e8400-e29b-41d4-a716-446655440000"),
		("DELETE", "/cafes/550e8400-e29b-41d4-a716-446655440000"),
	];

	for (method, uri) in attempts {
		let body = matches!(method, "POST" | "PATCH").then(|| serde_json::json!({}));
		let response = request(&app, method, uri, None, body).await;
		assert_eq!(
			response.status(),
			StatusCode::UNAUTHORIZED,
			"{method} {uri} must require a session"
		);
		let error = body_json(response).await;
		assert_eq!(error["error"], "unauthorized");
		assert_eq!(error["message"], "Not logged in");
	}
}

#[tokio::test]
async fn cafe_crud_roundtrip() {
	let app = test_app().await;
	let (cookie, _) = signup(&app, "amy", "espresso4life").await;

	let response = request(
		&app,
		"POST",
		"/cafes",
		Some(&cookie),
		Some(serde_json::json!({"name": "Sightglass", "location": "San Francisco"})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let cafe = body_json(response).await;
	let cafe_id = cafe["id"].as_str().unwrap();

	let response = request(&app, "GET", "/cafes", Some(&cookie), None).await;
	let list = body_json(response).await;
	assert_eq!(list["cafes"].as_array().unwrap().len(), 1);

	let response = request(
		&app,
		"PATCH",
		&format!("/cafes/{cafe_id}"),
		Some(&cookie),
		Some(serde_json::json!({"location": "Oakland"})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::OK);
	let updated = body_json(response).await;
	assert_eq!(updated["name"], "Sightglass");
	assert_eq!(updated["location"], "Oakland");

	let response = request(
		&app,
		"DELETE",
		&format!("/cafes/{cafe_id}"),
		Some(&cookie),
		None,
	)
	.await;
	assert_eq!(response.status(), StatusCode::OK);

	let response = request(
		&app,
		"GET",
		&format!("/cafes/{cafe_id}"),
		Some(&cookie),
		None,
	)
	.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cafe_create_requires_name_and_location() {
	let app = test_app().await;
	let (cookie, _) = signup(&app, "amy", "espresso4life").await;

	let response = request(
		&app,
		"POST",
		"/cafes",
		Some(&cookie),
		Some(serde_json::json!({"name": "Sightglass"})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn coffee_create_requires_existing_cafe() {
	let app = test_app().await;
	let (cookie, _) = signup(&app, "amy", "espresso4life").await;

	let response = request(
		&app,
		"POST",
		"/coffees",
		Some(&cookie),
		Some(serde_json::json!({
			"name": "Orphan",
			"cafe_id": "550e8400-e29b-41d4-a716-446655440000",
		})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	let error = body_json(response).await;
	assert_eq!(error["message"], "Cafe not found");
}

#[tokio::test]
async fn any_authenticated_user_may_mutate_shared_resources() {
	let app = test_app().await;
	let (amy_cookie, _) = signup(&app, "amy", "espresso4life").await;
	let (ben_cookie, _) = signup(&app, "ben", "flatwhite").await;

	let coffee_id = seed_coffee(&app, &amy_cookie).await;

	// Ben did not create the coffee but may update it.
	let response = request(
		&app,
		"PATCH",
		&format!("/coffees/{coffee_id}"),
		Some(&ben_cookie),
		Some(serde_json::json!({"description": "single origin"})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::OK);
	let updated = body_json(response).await;
	assert_eq!(updated["description"], "single origin");
}

#[tokio::test]
async fn note_crud_roundtrip() {
	let app = test_app().await;
	let (cookie, user) = signup(&app, "amy", "espresso4life").await;
	let coffee_id = seed_coffee(&app, &cookie).await;

	let response = request(
		&app,
		"POST",
		"/notes",
		Some(&cookie),
		Some(serde_json::json!({
			"rating": 4,
			"comment": "bright, plummy",
			"coffee_id": coffee_id,
		})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let note = body_json(response).await;
	assert_eq!(note["user_id"], user["id"]);
	let note_id = note["id"].as_str().unwrap();

	let response = request(
		&app,
		"PATCH",
		&format!("/notes/{note_id}"),
		Some(&cookie),
		Some(serde_json::json!({"rating": 5})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::OK);
	let updated = body_json(response).await;
	assert_eq!(updated["rating"], 5);
	assert_eq!(updated["comment"], "bright, plummy");

	let response = request(
		&app,
		"DELETE",
		&format!("/notes/{note_id}"),
		Some(&cookie),
		None,
	)
	.await;
	assert_eq!(response.status(), StatusCode::OK);

	let response = request(
		&app,
		"GET",
		&format!("/notes/{note_id}"),
		Some(&cookie),
		None,
	)
	.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn note_rating_is_validated() {
	let app = test_app().await;
	let (cookie, _) = signup(&app, "amy", "espresso4life").await;
	let coffee_id = seed_coffee(&app, &cookie).await;

	for rating in [0, 6, -1] {
		let response = request(
			&app,
			"POST",
			"/notes",
			Some(&cookie),
			Some(serde_json::json!({"rating": rating, "coffee_id": coffee_id})),
		)
		.await;
		assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
	}

	let response = request(
		&app,
		"POST",
		"/notes",
		Some(&cookie),
		Some(serde_json::json!({"comment": "no rating", "coffee_id": coffee_id})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn foreign_notes_are_invisible() {
	let app = test_app().await;
	let (amy_cookie, _) = signup(&app, "amy", "espresso4life").await;
	let (ben_cookie, _) = signup(&app, "ben", "flatwhite").await;
	let coffee_id = seed_coffee(&app, &amy_cookie).await;

	let response = request(
		&app,
		"POST",
		"/notes",
		Some(&amy_cookie),
		Some(serde_json::json!({"rating": 4, "coffee_id": coffee_id})),
	)
	.await;
	let note_id = body_json(response).await["id"].as_str().unwrap().to_string();

	// Ben sees amy's note as missing, on every verb.
	for (method, body) in [
		("GET", None),
		("PATCH", Some(serde_json::json!({"rating": 1}))),
		("DELETE", None),
	] {
		let response = request(
			&app,
			method,
			&format!("/notes/{note_id}"),
			Some(&ben_cookie),
			body,
		)
		.await;
		assert_eq!(
			response.status(),
			StatusCode::NOT_FOUND,
			"{method} on a foreign note must 404"
		);
	}

	// And amy's note is untouched.
	let response = request(
		&app,
		"GET",
		&format!("/notes/{note_id}"),
		Some(&amy_cookie),
		None,
	)
	.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await["rating"], 4);
}

#[tokio::test]
async fn malformed_ids_read_as_missing_resources() {
	let app = test_app().await;
	let (cookie, _) = signup(&app, "amy", "espresso4life").await;

	for uri in ["/notes/42", "/coffees/not-a-uuid", "/cafes/xyz"] {
		let response = request(&app, "GET", uri, Some(&cookie), None).await;
		assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
	}
}

#[tokio::test]
async fn health_is_public() {
	let app = test_app().await;
	let response = request(&app, "GET", "/health", None, None).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await["status"], "ok");
}
