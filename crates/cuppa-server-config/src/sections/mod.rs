// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration sections.
//!
//! Each section defines a resolved config struct and a partial layer struct
//! with `merge`/`finalize`, so sources can be stacked in precedence order.

mod auth;
mod client;
mod database;
mod http;
mod logging;
mod oauth;

pub use auth::{
	AuthConfig, AuthConfigLayer, DEFAULT_OAUTH_STATE_TTL_SECS, DEFAULT_SESSION_TTL_DAYS,
};
pub use client::{ClientConfig, ClientConfigLayer};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use oauth::{GitHubOAuthConfigLayer, GitHubOAuthSettings, OAuthConfig, OAuthConfigLayer};
