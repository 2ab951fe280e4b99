// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request-side session plumbing: cookie extraction and the authenticated
//! user context.
//!
//! # Authentication Flow
//!
//! ```text
//! Request → Cookie header → session token → hash → session lookup → CurrentUser
//! ```
//!
//! # Security Notes
//!
//! - Session tokens are extracted from cookies (HttpOnly, SameSite=Lax)
//! - Token values are never logged

use http::header::COOKIE;
use http::HeaderMap;

use crate::types::SessionId;
use crate::user::User;

/// Default name for the session cookie.
pub const SESSION_COOKIE_NAME: &str = "cuppa_session";

/// The currently authenticated user, resolved from the request's session
/// cookie.
///
/// Handlers receive this explicitly instead of reading ambient request
/// state; everything needed for authorization decisions travels with it.
#[derive(Debug, Clone)]
pub struct CurrentUser {
	/// The authenticated user.
	pub user: User,
	/// The session that authenticated this request.
	pub session_id: SessionId,
}

impl CurrentUser {
	/// Create a new CurrentUser from a resolved session.
	pub fn from_session(user: User, session_id: SessionId) -> Self {
		Self { user, session_id }
	}
}

/// Extract the session token from the Cookie header.
///
/// Parses the Cookie header to find the session cookie (default:
/// `cuppa_session`).
///
/// # Returns
///
/// The session token value if found, or `None` if the cookie is not present.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
	extract_session_cookie_with_name(headers, SESSION_COOKIE_NAME)
}

/// Extract the session token from the Cookie header with a custom cookie name.
pub fn extract_session_cookie_with_name(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
	headers
		.get(COOKIE)?
		.to_str()
		.ok()?
		.split(';')
		.find_map(|cookie| {
			let cookie = cookie.trim();
			let (name, value) = cookie.split_once('=')?;

			if name == cookie_name {
				Some(value.to_string())
			} else {
				None
			}
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::header::HeaderValue;

	#[test]
	fn extracts_session_from_single_cookie() {
		let mut headers = HeaderMap::new();
		headers.insert(COOKIE, HeaderValue::from_static("cuppa_session=abc123"));

		assert_eq!(extract_session_cookie(&headers), Some("abc123".to_string()));
	}

	#[test]
	fn extracts_session_from_multiple_cookies() {
		let mut headers = HeaderMap::new();
		headers.insert(
			COOKIE,
			HeaderValue::from_static("other=value; cuppa_session=xyz789; another=test"),
		);

		assert_eq!(extract_session_cookie(&headers), Some("xyz789".to_string()));
	}

	#[test]
	fn returns_none_when_no_cookie_header() {
		let headers = HeaderMap::new();
		assert_eq!(extract_session_cookie(&headers), None);
	}

	#[test]
	fn returns_none_when_session_cookie_missing() {
		let mut headers = HeaderMap::new();
		headers.insert(COOKIE, HeaderValue::from_static("other=value; another=test"));

		assert_eq!(extract_session_cookie(&headers), None);
	}

	#[test]
	fn handles_whitespace_around_cookies() {
		let mut headers = HeaderMap::new();
		headers.insert(
			COOKIE,
			HeaderValue::from_static("  cuppa_session=token123  ; other=val  "),
		);

		assert_eq!(
			extract_session_cookie(&headers),
			Some("token123".to_string())
		);
	}

	#[test]
	fn extracts_with_custom_cookie_name() {
		let mut headers = HeaderMap::new();
		headers.insert(
			COOKIE,
			HeaderValue::from_static("custom_session=mytoken; cuppa_session=other"),
		);

		assert_eq!(
			extract_session_cookie_with_name(&headers, "custom_session"),
			Some("mytoken".to_string())
		);
	}
}
