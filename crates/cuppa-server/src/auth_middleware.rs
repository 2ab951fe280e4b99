// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The resource gate: session resolution for protected handlers.
//!
//! [`RequireAuth`] is the single authorization check for the whole API.
//! Every protected handler takes it as an extractor argument; the check runs
//! before the handler body, so an unauthenticated request never reaches
//! persistence. The rejection is one uniform 401 body regardless of why the
//! session failed to resolve (no cookie, unknown token, expired session,
//! deleted user).

use axum::{
	extract::FromRequestParts,
	http::request::Parts,
	response::{IntoResponse, Response},
};
use cuppa_server_api::AuthErrorResponse;
use cuppa_server_auth::{extract_session_cookie_with_name, hash_session_token, CurrentUser};
use http::header::HeaderValue;

use crate::api::AppState;
use crate::api_response::{internal_error, unauthorized};

/// Extractor that requires a valid session, yielding the [`CurrentUser`].
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
	type Rejection = Response;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		match resolve_current_user(&parts.headers, state).await {
			Ok(Some(current_user)) => Ok(RequireAuth(current_user)),
			Ok(None) => Err(unauthorized_response()),
			Err(e) => {
				tracing::error!(error = %e, "session resolution failed");
				Err(internal_error::<AuthErrorResponse>("Something went wrong").into_response())
			}
		}
	}
}

/// Resolve the request's session cookie to a user, if any.
///
/// Returns `Ok(None)` for every non-error miss: absent cookie, unknown or
/// expired token, or a user row that no longer exists.
pub async fn resolve_current_user(
	headers: &http::HeaderMap,
	state: &AppState,
) -> Result<Option<CurrentUser>, cuppa_server_db::DbError> {
	let Some(token) = extract_session_cookie_with_name(headers, &state.auth.session_cookie_name)
	else {
		return Ok(None);
	};

	let token_hash = hash_session_token(&token);
	let Some(session) = state.session_repo.find_by_token_hash(&token_hash).await? else {
		return Ok(None);
	};

	let Some(user) = state.user_repo.find_by_id(&session.user_id).await? else {
		// The user was deleted out from under a live session; treat the
		// session as dead.
		return Ok(None);
	};

	Ok(Some(CurrentUser::from_session(user, session.id)))
}

/// The uniform 401 rejection body.
pub fn unauthorized_response() -> Response {
	unauthorized::<AuthErrorResponse>("Not logged in").into_response()
}

/// Build the Set-Cookie header establishing a session.
///
/// HttpOnly keeps the token away from scripts; SameSite=Lax still allows
/// the OAuth redirect round-trip to carry it.
pub fn session_cookie(name: &str, token: &str, max_age_secs: i64) -> HeaderValue {
	let cookie = format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
	HeaderValue::from_str(&cookie).expect("cookie token is always header-safe")
}

/// Build the Set-Cookie header clearing the session cookie.
pub fn clear_session_cookie(name: &str) -> HeaderValue {
	let cookie = format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
	HeaderValue::from_str(&cookie).expect("cookie name is always header-safe")
}
