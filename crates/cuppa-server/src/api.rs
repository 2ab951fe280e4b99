// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and HTTP routing.

use axum::routing::{delete, get, post};
use axum::{Json, Router};
use cuppa_server_auth_github::{GitHubOAuthClient, GitHubOAuthConfig};
use cuppa_server_config::ServerConfig;
use cuppa_server_db::{
	CafeRepository, CoffeeRepository, NoteRepository, SessionRepository, UserRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;

use crate::oauth_state::OAuthStateStore;
use crate::routes;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub user_repo: Arc<UserRepository>,
	pub session_repo: Arc<SessionRepository>,
	pub note_repo: Arc<NoteRepository>,
	pub coffee_repo: Arc<CoffeeRepository>,
	pub cafe_repo: Arc<CafeRepository>,
	/// Present only when GitHub OAuth credentials are configured.
	pub github_oauth: Option<Arc<GitHubOAuthClient>>,
	pub oauth_state_store: Arc<OAuthStateStore>,
	pub auth: cuppa_server_config::AuthConfig,
	pub client: cuppa_server_config::ClientConfig,
	pub pool: SqlitePool,
}

/// Creates the application state, initializing optional components.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let github_oauth = config.oauth.github.as_ref().map(|settings| {
		Arc::new(GitHubOAuthClient::new(GitHubOAuthConfig {
			client_id: settings.client_id.clone(),
			client_secret: settings.client_secret.clone(),
			redirect_uri: settings.redirect_uri.clone(),
			scopes: settings.scopes.clone(),
		}))
	});

	AppState {
		user_repo: Arc::new(UserRepository::new(pool.clone())),
		session_repo: Arc::new(SessionRepository::new(pool.clone())),
		note_repo: Arc::new(NoteRepository::new(pool.clone())),
		coffee_repo: Arc::new(CoffeeRepository::new(pool.clone())),
		cafe_repo: Arc::new(CafeRepository::new(pool.clone())),
		github_oauth,
		oauth_state_store: Arc::new(OAuthStateStore::new(Duration::from_secs(
			config.auth.oauth_state_ttl_secs,
		))),
		auth: config.auth.clone(),
		client: config.client.clone(),
		pool,
	}
}

/// OpenAPI document for the Cuppa API.
#[derive(OpenApi)]
#[openapi(
	info(
		title = "Cuppa API",
		description = "Session-authenticated REST API for coffee and cafe reviews"
	),
	paths(
		routes::auth::signup,
		routes::auth::login,
		routes::auth::logout,
		routes::auth::check_session,
		routes::auth::link_github,
		routes::auth::oauth_status,
		routes::notes::list_notes,
		routes::notes::create_note,
		routes::notes::get_note,
		routes::notes::update_note,
		routes::notes::delete_note,
		routes::coffees::list_coffees,
		routes::coffees::create_coffee,
		routes::coffees::get_coffee,
		routes::coffees::update_coffee,
		routes::coffees::delete_coffee,
		routes::cafes::list_cafes,
		routes::cafes::create_cafe,
		routes::cafes::get_cafe,
		routes::cafes::update_cafe,
		routes::cafes::delete_cafe,
	),
	tags(
		(name = "auth", description = "Signup, login, sessions, GitHub OAuth"),
		(name = "notes", description = "The current user's tasting notes"),
		(name = "coffees", description = "Coffees served at cafes"),
		(name = "cafes", description = "Cafes")
	)
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
	Json(ApiDoc::openapi())
}

/// Creates the router with all routes configured.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/signup", post(routes::auth::signup))
		.route("/check_session", get(routes::auth::check_session))
		.route("/login", post(routes::auth::login))
		.route("/logout", delete(routes::auth::logout))
		.route("/auth/github", get(routes::auth::login_github))
		.route("/auth/github/callback", get(routes::auth::callback_github))
		.route("/auth/github/link", post(routes::auth::link_github))
		.route("/auth/status", get(routes::auth::oauth_status))
		.route(
			"/notes",
			get(routes::notes::list_notes).post(routes::notes::create_note),
		)
		.route(
			"/notes/{id}",
			get(routes::notes::get_note)
				.patch(routes::notes::update_note)
				.delete(routes::notes::delete_note),
		)
		.route(
			"/coffees",
			get(routes::coffees::list_coffees).post(routes::coffees::create_coffee),
		)
		.route(
			"/coffees/{id}",
			get(routes::coffees::get_coffee)
				.patch(routes::coffees::update_coffee)
				.delete(routes::coffees::delete_coffee),
		)
		.route(
			"/cafes",
			get(routes::cafes::list_cafes).post(routes::cafes::create_cafe),
		)
		.route(
			"/cafes/{id}",
			get(routes::cafes::get_cafe)
				.patch(routes::cafes::update_cafe)
				.delete(routes::cafes::delete_cafe),
		)
		.route("/api-docs/openapi.json", get(openapi_json))
		.with_state(state)
}
