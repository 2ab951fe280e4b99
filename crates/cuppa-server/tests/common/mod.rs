// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared helpers for router-level integration tests.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use cuppa_server::{create_app_state, create_router};
use cuppa_server_config::ServerConfig;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a router backed by a fresh in-memory database.
pub async fn test_app() -> Router {
	let pool = cuppa_server_db::testing::create_schema_test_pool().await;
	let config = ServerConfig::default();
	create_router(create_app_state(pool, &config))
}

/// Issue a JSON request and return the response.
pub async fn request(
	app: &Router,
	method: &str,
	uri: &str,
	cookie: Option<&str>,
	body: Option<serde_json::Value>,
) -> Response<axum::body::Body> {
	let mut builder = Request::builder().method(method).uri(uri);
	if let Some(cookie) = cookie {
		builder = builder.header(header::COOKIE, cookie);
	}

	let request = match body {
		Some(json) => builder
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(json.to_string()))
			.unwrap(),
		None => builder.body(Body::empty()).unwrap(),
	};

	app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<axum::body::Body>) -> serde_json::Value {
	let bytes = response.into_body().collect().await.unwrap().to_bytes();
	serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as raw bytes.
pub async fn body_bytes(response: Response<axum::body::Body>) -> Vec<u8> {
	response
		.into_body()
		.collect()
		.await
		.unwrap()
		.to_bytes()
		.to_vec()
}

/// Extract the session cookie pair (`name=token`) from a Set-Cookie header.
pub fn session_cookie(response: &Response<axum::body::Body>) -> Option<String> {
	response
		.headers()
		.get(header::SET_COOKIE)?
		.to_str()
		.ok()?
		.split(';')
		.next()
		.map(|pair| pair.trim().to_string())
}

/// Sign a user up and return their session cookie and serialized user.
pub async fn signup(app: &Router, username: &str, password: &str) -> (String, serde_json::Value) {
	let response = request(
		app,
		"POST",
		"/signup",
		None,
		Some(serde_json::json!({"username": username, "password": password})),
	)
	.await;

	assert_eq!(response.status(), StatusCode::OK, "signup should succeed");
	let cookie = session_cookie(&response).expect("signup must set the session cookie");
	let user = body_json(response).await;
	(cookie, user)
}

/// Create a cafe and a coffee, returning the coffee id.
pub async fn seed_coffee(app: &Router, cookie: &str) -> String {
	let response = request(
		app,
		"POST",
		"/cafes",
		Some(cookie),
		Some(serde_json::json!({"name": "Sightglass", "location": "San Francisco"})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let cafe = body_json(response).await;

	let response = request(
		app,
		"POST",
		"/coffees",
		Some(cookie),
		Some(serde_json::json!({
			"name": "Owl's Howl",
			"description": "espresso blend",
			"cafe_id": cafe["id"],
		})),
	)
	.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	body_json(response).await["id"].as_str().unwrap().to_string()
}
