// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Cuppa.
//!
//! Provides a pre-configured HTTP client builder with a consistent
//! User-Agent header so every outbound request identifies itself the
//! same way.

mod client;

pub use client::{builder, new_client, new_client_with_timeout, user_agent};
