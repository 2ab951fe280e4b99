// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Authentication HTTP handlers.
//!
//! Local flow: signup, login, logout, and the session probe. OAuth flow:
//! GitHub redirect, callback, account linking, and the status probe.
//!
//! Two rules shape the error handling here:
//! - Login failures are uniform ("Invalid username or password") whether
//!   the username exists or not, so the endpoint cannot be used to
//!   enumerate accounts.
//! - OAuth provider failures never surface as API errors; the callback
//!   degrades to a redirect without a session, and the detail goes to the
//!   server log only.

use axum::{
	extract::{Query, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Redirect, Response},
	Json,
};
use cuppa_server_auth::{
	extract_session_cookie_with_name, generate_session_token, generate_username_base,
	hash_password, hash_session_token, validate_username, verify_password, Session, User, UserId,
};
use cuppa_server_auth_github::{resolve_verified_email, GitHubOAuthClient, OAuthError};
use cuppa_server_db::DbError;
use http::header::{HeaderValue, SET_COOKIE};
use rand::RngCore;

pub use cuppa_server_api::auth::*;
use cuppa_server_api::{CheckSessionResponse, UserResponse};

use crate::{
	api::AppState,
	api_response::{conflict, internal_error, not_found, unauthorized, validation_error},
	auth_middleware::{clear_session_cookie, session_cookie, RequireAuth},
	impl_api_error_response,
	routes::notes::note_to_response,
};

impl_api_error_response!(AuthErrorResponse);

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub(crate) fn user_to_response(user: &User) -> UserResponse {
	UserResponse {
		id: user.id.to_string(),
		username: user.username.clone(),
		email: user.email.clone(),
		github_id: user.github_id.clone(),
		avatar_url: user.avatar_url.clone(),
		is_oauth_user: user.is_oauth_user,
		created_at: user.created_at,
		updated_at: user.updated_at,
	}
}

/// Create a session row for the user and return the Set-Cookie header that
/// hands the token to the browser.
async fn establish_session(state: &AppState, user_id: UserId) -> Result<HeaderValue, DbError> {
	let token = generate_session_token();
	let session = Session::new(
		user_id,
		hash_session_token(&token),
		state.auth.session_ttl_days,
	);
	state.session_repo.create(&session).await?;

	Ok(session_cookie(
		&state.auth.session_cookie_name,
		&token,
		state.auth.session_ttl_days * 24 * 60 * 60,
	))
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created, session established", body = UserResponse),
        (status = 422, description = "Missing/invalid input or username taken", body = AuthErrorResponse),
        (status = 500, description = "Account could not be created", body = AuthErrorResponse)
    ),
    tag = "auth"
)]
/// POST /signup - create a local account.
///
/// There is no existence pre-check: the insert runs and the username's
/// UNIQUE constraint decides, so two concurrent signups for the same name
/// produce exactly one account and one conflict.
pub async fn signup(
	State(state): State<AppState>,
	Json(req): Json<SignupRequest>,
) -> Response {
	let username = req.username.as_deref().map(str::trim).unwrap_or_default();
	let password = req.password.as_deref().unwrap_or_default();

	if username.is_empty() || password.is_empty() {
		return validation_error::<AuthErrorResponse>("Username and password are required")
			.into_response();
	}
	if let Err(reason) = validate_username(username) {
		return validation_error::<AuthErrorResponse>(reason).into_response();
	}

	let password_hash = match hash_password(password) {
		Ok(hash) => hash,
		Err(e) => {
			tracing::error!(error = %e, "password hashing failed");
			return internal_error::<AuthErrorResponse>("Failed to create account")
				.into_response();
		}
	};

	match state.user_repo.create_local(username, &password_hash).await {
		Ok(user) => match establish_session(&state, user.id).await {
			Ok(cookie) => {
				tracing::info!(user_id = %user.id, "user signed up");
				([(SET_COOKIE, cookie)], Json(user_to_response(&user))).into_response()
			}
			Err(e) => {
				tracing::error!(error = %e, "failed to establish session after signup");
				internal_error::<AuthErrorResponse>("Failed to create account").into_response()
			}
		},
		Err(DbError::Conflict(_)) => {
			conflict::<AuthErrorResponse>("Username already exists").into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, "signup failed");
			internal_error::<AuthErrorResponse>("Failed to create account").into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = UserResponse),
        (status = 401, description = "Invalid username or password", body = AuthErrorResponse)
    ),
    tag = "auth"
)]
/// POST /login - log in with a local credential.
///
/// Unknown username, wrong password, and password-less (OAuth-only)
/// accounts all produce the same 401 body.
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
	let username = req.username.as_deref().unwrap_or_default();
	let password = req.password.as_deref().unwrap_or_default();

	let user = match state.user_repo.find_by_username(username).await {
		Ok(user) => user,
		Err(e) => {
			tracing::error!(error = %e, "login lookup failed");
			return internal_error::<AuthErrorResponse>("Something went wrong").into_response();
		}
	};

	let authenticated = user.as_ref().and_then(|u| {
		u.password_hash
			.as_deref()
			.filter(|hash| verify_password(password, hash))
			.map(|_| u)
	});

	let Some(user) = authenticated else {
		return unauthorized::<AuthErrorResponse>(INVALID_CREDENTIALS).into_response();
	};

	match establish_session(&state, user.id).await {
		Ok(cookie) => {
			tracing::info!(user_id = %user.id, "user logged in");
			([(SET_COOKIE, cookie)], Json(user_to_response(user))).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, "failed to establish session after login");
			internal_error::<AuthErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    delete,
    path = "/logout",
    responses(
        (status = 204, description = "Session cleared (idempotent)")
    ),
    tag = "auth"
)]
/// DELETE /logout - clear the session.
///
/// Always succeeds with 204, whether or not a session existed; the cookie
/// is cleared either way.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
	if let Some(token) =
		extract_session_cookie_with_name(&headers, &state.auth.session_cookie_name)
	{
		let token_hash = hash_session_token(&token);
		if let Err(e) = state.session_repo.delete_by_token_hash(&token_hash).await {
			// Still clear the cookie; the row can be purged later.
			tracing::error!(error = %e, "failed to delete session on logout");
		}
	}

	(
		StatusCode::NO_CONTENT,
		[(SET_COOKIE, clear_session_cookie(&state.auth.session_cookie_name))],
	)
		.into_response()
}

#[utoipa::path(
    get,
    path = "/check_session",
    responses(
        (status = 200, description = "Current user with their own notes", body = CheckSessionResponse),
        (status = 401, description = "Not logged in", body = AuthErrorResponse)
    ),
    tag = "auth"
)]
/// GET /check_session - the session probe.
///
/// The nested notes come from the explicit authored-by-this-user query,
/// never from a broader association, so another user's notes cannot appear
/// in the payload.
pub async fn check_session(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> Response {
	match state.note_repo.list_for_user(&current_user.user.id).await {
		Ok(notes) => Json(CheckSessionResponse {
			user: user_to_response(&current_user.user),
			notes: notes.iter().map(note_to_response).collect(),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to load notes for session probe");
			internal_error::<AuthErrorResponse>("Something went wrong").into_response()
		}
	}
}

/// GET /auth/github - start the OAuth flow.
///
/// Purges stale CSRF states left by abandoned flows, then redirects the
/// browser to GitHub with a fresh single-use state. No session yet.
pub async fn login_github(State(state): State<AppState>) -> Response {
	let Some(client) = state.github_oauth.as_ref() else {
		return not_found::<AuthErrorResponse>("GitHub login is not configured").into_response();
	};

	let csrf_state = state.oauth_state_store.issue();
	Redirect::to(&client.authorization_url(&csrf_state)).into_response()
}

/// GET /auth/github/callback - GitHub redirects back here.
///
/// Fail-open on redirect, fail-closed on authentication state: every
/// failure path sends the browser somewhere sensible, but only the fully
/// successful path establishes a session.
pub async fn callback_github(
	State(state): State<AppState>,
	Query(query): Query<OAuthCallbackQuery>,
) -> Response {
	let Some(client) = state.github_oauth.as_ref() else {
		return Redirect::to(&state.client.app_url).into_response();
	};

	let state_ok = query
		.state
		.as_deref()
		.is_some_and(|s| state.oauth_state_store.consume(s));
	if !state_ok {
		tracing::warn!("OAuth callback with missing, unknown, or expired state");
		return Redirect::to(&state.client.app_url).into_response();
	}

	let Some(code) = query.code.as_deref() else {
		tracing::warn!(error = ?query.error, "OAuth callback without authorization code");
		return Redirect::to(&state.client.app_url).into_response();
	};

	let (profile, email) = match fetch_github_identity(client, code).await {
		Ok(identity) => identity,
		Err(e) => {
			tracing::error!(error = %e, "OAuth token exchange or profile fetch failed");
			return Redirect::to(&state.client.app_url).into_response();
		}
	};

	let Some(email) = email else {
		tracing::warn!(login = %profile.login, "no verified email on GitHub account");
		return Redirect::to(&state.client.login_error_url).into_response();
	};

	let user = match find_or_create_oauth_user(
		&state,
		&profile.login,
		&email,
		profile.avatar_url.as_deref(),
	)
	.await
	{
		Ok(user) => user,
		Err(e) => {
			tracing::error!(error = %e, "failed to resolve user for OAuth login");
			return Redirect::to(&state.client.app_url).into_response();
		}
	};

	match establish_session(&state, user.id).await {
		Ok(cookie) => {
			tracing::info!(user_id = %user.id, "user logged in via GitHub");
			([(SET_COOKIE, cookie)], Redirect::to(&state.client.app_url)).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, "failed to establish session after OAuth login");
			Redirect::to(&state.client.app_url).into_response()
		}
	}
}

/// Exchange the code and resolve the profile plus a usable email.
async fn fetch_github_identity(
	client: &GitHubOAuthClient,
	code: &str,
) -> Result<(cuppa_server_auth_github::GitHubUser, Option<String>), OAuthError> {
	let token = client.exchange_code(code).await?;
	let access_token = token.access_token.expose();

	let profile = client.get_user(access_token).await?;

	// The public profile email is often unset; fall back to the verified
	// email list.
	let email = if profile.email.as_deref().is_some_and(|e| !e.is_empty()) {
		resolve_verified_email(&profile, &[])
	} else {
		let emails = client.get_emails(access_token).await?;
		resolve_verified_email(&profile, &emails)
	};

	Ok((profile, email))
}

/// Resolve the callback's email to a user, creating one if needed.
///
/// The email lookup is only an optimization; creation still races through
/// the UNIQUE constraints, and a conflict is retried as "someone else just
/// created this identity" before giving up.
async fn find_or_create_oauth_user(
	state: &AppState,
	login: &str,
	email: &str,
	avatar_url: Option<&str>,
) -> Result<User, DbError> {
	if let Some(user) = state.user_repo.find_by_email(email).await? {
		return Ok(user);
	}

	let username = if validate_username(login).is_ok() {
		login.to_string()
	} else {
		generate_username_base(email)
	};

	match state
		.user_repo
		.create_oauth(&username, email, avatar_url)
		.await
	{
		Ok(user) => Ok(user),
		Err(DbError::Conflict(_)) => {
			// Either a concurrent callback created the same email, or the
			// username is taken by someone else.
			if let Some(user) = state.user_repo.find_by_email(email).await? {
				return Ok(user);
			}
			let mut suffix = [0u8; 2];
			rand::rngs::OsRng.fill_bytes(&mut suffix);
			state
				.user_repo
				.create_oauth(
					&format!("{username}_{}", hex::encode(suffix)),
					email,
					avatar_url,
				)
				.await
		}
		Err(e) => Err(e),
	}
}

#[utoipa::path(
    post,
    path = "/auth/github/link",
    request_body = LinkGithubRequest,
    responses(
        (status = 200, description = "GitHub identity linked", body = AuthSuccessResponse),
        (status = 401, description = "Not logged in", body = AuthErrorResponse),
        (status = 422, description = "Missing id or id already linked", body = AuthErrorResponse)
    ),
    tag = "auth"
)]
/// POST /auth/github/link - attach a GitHub identity to the current account.
///
/// The `github_id` UNIQUE constraint arbitrates: if the id is already
/// claimed by any other user, nothing is written and the caller gets a
/// conflict.
pub async fn link_github(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Json(req): Json<LinkGithubRequest>,
) -> Response {
	let github_id = req.github_id.as_deref().map(str::trim).unwrap_or_default();
	if github_id.is_empty() {
		return validation_error::<AuthErrorResponse>("GitHub ID required").into_response();
	}

	match state
		.user_repo
		.link_github(&current_user.user.id, github_id, req.avatar_url.as_deref())
		.await
	{
		Ok(_) => {
			tracing::info!(user_id = %current_user.user.id, "GitHub account linked");
			Json(AuthSuccessResponse {
				message: "GitHub account linked successfully".to_string(),
			})
			.into_response()
		}
		Err(DbError::Conflict(_)) => {
			conflict::<AuthErrorResponse>("GitHub account already linked to another user")
				.into_response()
		}
		Err(DbError::NotFound(_)) => {
			not_found::<AuthErrorResponse>("User not found").into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, "failed to link GitHub account");
			internal_error::<AuthErrorResponse>("Something went wrong").into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/auth/status",
    responses(
        (status = 200, description = "OAuth linkage for the current user", body = OAuthStatusResponse),
        (status = 401, description = "Not logged in", body = AuthErrorResponse),
        (status = 404, description = "User no longer exists", body = AuthErrorResponse)
    ),
    tag = "auth"
)]
/// GET /auth/status - read-only OAuth linkage probe.
///
/// Re-reads the user row so a deletion racing this request shows up as 404
/// rather than stale data.
pub async fn oauth_status(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> Response {
	match state.user_repo.find_by_id(&current_user.user.id).await {
		Ok(Some(user)) => Json(OAuthStatusResponse {
			is_oauth_user: user.is_oauth_user,
			has_github_linked: user.has_github_linked(),
			avatar_url: user.avatar_url,
		})
		.into_response(),
		Ok(None) => not_found::<AuthErrorResponse>("User not found").into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to load user for OAuth status");
			internal_error::<AuthErrorResponse>("Something went wrong").into_response()
		}
	}
}
