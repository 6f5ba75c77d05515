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

//! The narrow boundary between the state transition function and its host.
//!
//! Everything the runtime learns about the world passes through [`Externalities`]: reading and
//! writing the key/value store, opening nested storage transactions and computing the state root.
//! The trait is object safe and handed explicitly to every function that needs it, so two block
//! executions never share hidden state.

#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

mod overlay;
#[cfg(feature = "std")]
mod testing;

pub use overlay::OverlayedChanges;
#[cfg(feature = "std")]
pub use testing::TestExternalities;

/// In-memory key/value storage, as used for genesis and test states.
pub type Storage = alloc::collections::BTreeMap<Vec<u8>, Vec<u8>>;

/// Hashing functions offered by the host.
pub mod hashing {
	pub use sp_crypto_hashing::{
		blake2_128, blake2_256, keccak_256, sha2_256, twox_128, twox_256, twox_64,
	};
}

/// Storage access offered by the host.
///
/// Writes made while a storage transaction is open are only visible to subsequent reads until
/// the transaction is rolled back; committing folds them into the enclosing layer.
pub trait Externalities {
	/// Read the value under `key`.
	fn storage(&self, key: &[u8]) -> Option<Vec<u8>>;

	/// Set `key` to `value`.
	fn set_storage(&mut self, key: Vec<u8>, value: Vec<u8>);

	/// Remove the value under `key`.
	fn clear_storage(&mut self, key: &[u8]);

	/// Whether a value is stored under `key`.
	fn exists_storage(&self, key: &[u8]) -> bool {
		self.storage(key).is_some()
	}

	/// Remove up to `limit` keys starting with `prefix`, returning how many were removed.
	fn clear_prefix(&mut self, prefix: &[u8], limit: Option<u32>) -> u32;

	/// The first key strictly greater than `key`, if any.
	fn next_storage_key(&self, key: &[u8]) -> Option<Vec<u8>>;

	/// Root of the current state, open transactions included.
	fn storage_root(&mut self) -> Vec<u8>;

	/// Open a new nested storage transaction.
	fn storage_start_transaction(&mut self);

	/// Discard every change made since the matching [`Self::storage_start_transaction`].
	///
	/// Fails if no transaction is open.
	fn storage_rollback_transaction(&mut self) -> Result<(), ()>;

	/// Keep every change made since the matching [`Self::storage_start_transaction`].
	///
	/// Fails if no transaction is open.
	fn storage_commit_transaction(&mut self) -> Result<(), ()>;
}
