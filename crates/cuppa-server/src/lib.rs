// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cuppa HTTP server library.
//!
//! The binary in `main.rs` wires configuration, the database pool, and the
//! router together; everything reusable (and testable) lives here.

pub mod api;
pub mod api_response;
pub mod auth_middleware;
pub mod oauth_state;
pub mod routes;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use cuppa_server_db as db;
