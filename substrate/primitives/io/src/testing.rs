// This file is part of Substrate.

// Copyright (C) Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: Apache-2.0

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An in-memory implementation of [`Externalities`] for tests and block authoring tools.

use crate::{hashing::blake2_256, Externalities, OverlayedChanges, Storage};
use codec::Encode;

/// Simple in-memory externalities: a committed [`Storage`] plus pending overlay changes.
#[derive(Clone, Debug, Default)]
pub struct TestExternalities {
	backend: Storage,
	overlay: OverlayedChanges,
}

impl TestExternalities {
	/// Create a new instance on top of `storage`.
	pub fn new(storage: Storage) -> Self {
		Self { backend: storage, overlay: Default::default() }
	}

	/// Create a new instance with empty storage.
	pub fn new_empty() -> Self {
		Self::default()
	}

	/// Run `f` against these externalities.
	pub fn execute_with<R>(&mut self, f: impl FnOnce(&mut dyn Externalities) -> R) -> R {
		f(self)
	}

	/// Write directly into the backend, bypassing the overlay.
	pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
		self.backend.insert(key, value);
	}

	/// Number of storage transactions currently open.
	pub fn transaction_depth(&self) -> usize {
		self.overlay.transaction_depth()
	}

	/// Move all committed overlay changes into the backend.
	pub fn commit_all(&mut self) -> Result<(), &'static str> {
		let changes = self
			.overlay
			.drain_committed()
			.map_err(|()| "Cannot commit with open storage transactions")?;
		for (key, value) in changes {
			match value {
				Some(value) => self.backend.insert(key, value),
				None => self.backend.remove(&key),
			};
		}
		Ok(())
	}

	/// A copy of the full state as seen through the overlay.
	pub fn snapshot(&self) -> Storage {
		let mut state = self.backend.clone();
		for (key, value) in self.overlay.merged() {
			match value {
				Some(value) => state.insert(key, value),
				None => state.remove(&key),
			};
		}
		state
	}

	/// Consume the externalities, returning the state as seen through the overlay.
	pub fn into_storage(self) -> Storage {
		self.snapshot()
	}
}

impl From<Storage> for TestExternalities {
	fn from(storage: Storage) -> Self {
		Self::new(storage)
	}
}

impl Externalities for TestExternalities {
	fn storage(&self, key: &[u8]) -> Option<Vec<u8>> {
		match self.overlay.storage(key) {
			Some(value) => value.map(|v| v.to_vec()),
			None => self.backend.get(key).cloned(),
		}
	}

	fn set_storage(&mut self, key: Vec<u8>, value: Vec<u8>) {
		self.overlay.set(key, Some(value));
	}

	fn clear_storage(&mut self, key: &[u8]) {
		self.overlay.set(key.to_vec(), None);
	}

	fn clear_prefix(&mut self, prefix: &[u8], limit: Option<u32>) -> u32 {
		let limit = limit.map(|l| l as usize).unwrap_or(usize::MAX);
		let keys = self
			.snapshot()
			.into_keys()
			.filter(|k| k.starts_with(prefix))
			.take(limit)
			.collect::<Vec<_>>();
		let removed = keys.len() as u32;
		keys.into_iter().for_each(|k| self.overlay.set(k, None));
		removed
	}

	fn next_storage_key(&self, key: &[u8]) -> Option<Vec<u8>> {
		use core::ops::Bound;
		self.snapshot()
			.range::<[u8], _>((Bound::Excluded(key), Bound::Unbounded))
			.next()
			.map(|(k, _)| k.clone())
	}

	fn storage_root(&mut self) -> Vec<u8> {
		let pairs = self.snapshot().into_iter().collect::<Vec<_>>();
		blake2_256(&pairs.encode()).to_vec()
	}

	fn storage_start_transaction(&mut self) {
		self.overlay.start_transaction();
	}

	fn storage_rollback_transaction(&mut self) -> Result<(), ()> {
		self.overlay.rollback_transaction()
	}

	fn storage_commit_transaction(&mut self) -> Result<(), ()> {
		self.overlay.commit_transaction()
	}
}
