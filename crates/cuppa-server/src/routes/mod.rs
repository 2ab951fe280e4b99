// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod cafes;
pub mod coffees;
pub mod health;
pub mod notes;
