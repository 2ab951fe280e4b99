// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! SQLite persistence layer for the Cuppa server.
//!
//! This crate provides:
//! - Pool creation with WAL mode and foreign keys ([`create_pool`])
//! - Embedded schema setup ([`run_migrations`])
//! - Repositories for users, sessions, notes, coffees, and cafes
//! - [`DbError`] with unique-violation → `Conflict` mapping, so uniqueness
//!   races are settled by the database rather than check-then-act code

pub mod cafe;
pub mod coffee;
pub mod error;
pub mod migrations;
pub mod note;
pub mod pool;
pub mod session;
pub mod testing;
pub mod user;

pub use cafe::{Cafe, CafeRepository};
pub use coffee::{Coffee, CoffeeRepository};
pub use error::DbError;
pub use migrations::run_migrations;
pub use note::{Note, NoteRepository};
pub use pool::create_pool;
pub use session::SessionRepository;
pub use user::UserRepository;
