// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Single-use CSRF state for the OAuth redirect flow.
//!
//! Initiating a login issues a random state value that GitHub echoes back on
//! the callback; the callback consumes it exactly once. Entries live only
//! in memory - an abandoned flow simply expires. There is no background
//! cleanup task: stale entries are purged whenever a new flow starts, which
//! also bounds the map for retried or abandoned logins.

use rand::RngCore;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// In-memory store of pending OAuth state values.
pub struct OAuthStateStore {
	ttl: Duration,
	states: Mutex<HashMap<String, Instant>>,
}

impl OAuthStateStore {
	/// Create a store whose entries expire after `ttl`.
	pub fn new(ttl: Duration) -> Self {
		Self {
			ttl,
			states: Mutex::new(HashMap::new()),
		}
	}

	/// Issue a fresh state value, purging expired entries first.
	pub fn issue(&self) -> String {
		let mut bytes = [0u8; 16];
		rand::rngs::OsRng.fill_bytes(&mut bytes);
		let state = hex::encode(bytes);

		let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
		let now = Instant::now();
		states.retain(|_, issued_at| now.duration_since(*issued_at) < self.ttl);
		states.insert(state.clone(), now);

		state
	}

	/// Consume a state value. Returns true only for a known, unexpired
	/// entry; the entry is removed either way, so a value cannot be
	/// replayed.
	pub fn consume(&self, state: &str) -> bool {
		let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
		match states.remove(state) {
			Some(issued_at) => Instant::now().duration_since(issued_at) < self.ttl,
			None => false,
		}
	}

	/// Number of pending entries (expired or not).
	pub fn pending(&self) -> usize {
		self.states.lock().unwrap_or_else(|e| e.into_inner()).len()
	}
}
