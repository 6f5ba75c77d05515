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

//! Contains the [`crate::StorageNoopGuard`] for conveniently asserting
//! that no storage mutation has been made by a whole code block.

use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};
use sp_io::Externalities;

/// Asserts that no storage changes took place between con- and destruction of [`Self`].
///
/// The guard borrows the storage for its whole lifetime and hands it out again through
/// `Deref`, so code under test runs against the guard itself.
///
/// This is easier than wrapping the whole code-block inside a `assert_storage_noop!`.
///
/// # Example
///
/// ```should_panic
/// use stf_support::{StorageNoopGuard, storage::unhashed::put};
///
/// sp_io::TestExternalities::new_empty().execute_with(|ext| {
/// 	let mut guard = StorageNoopGuard::new(ext);
/// 	put(&mut *guard, b"key", b"value");
/// 	// Panics since there are storage changes.
/// });
/// ```
#[must_use]
pub struct StorageNoopGuard<'a> {
	ext: &'a mut dyn Externalities,
	storage_root: Vec<u8>,
	error_message: &'a str,
}

impl<'a> StorageNoopGuard<'a> {
	/// Start guarding `ext` with the default error message.
	pub fn new(ext: &'a mut dyn Externalities) -> Self {
		Self::from_error_message(ext, "`StorageNoopGuard` detected an attempted storage change.")
	}

	/// Creates a new [`StorageNoopGuard`] with a custom error message.
	pub fn from_error_message(ext: &'a mut dyn Externalities, error_message: &'a str) -> Self {
		let storage_root = ext.storage_root();
		Self { ext, storage_root, error_message }
	}

	/// Sets a custom error message for a [`StorageNoopGuard`].
	pub fn set_error_message(&mut self, error_message: &'a str) {
		self.error_message = error_message;
	}
}

impl<'a> Deref for StorageNoopGuard<'a> {
	type Target = dyn Externalities + 'a;

	fn deref(&self) -> &Self::Target {
		&*self.ext
	}
}

impl<'a> DerefMut for StorageNoopGuard<'a> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut *self.ext
	}
}

impl<'a> Drop for StorageNoopGuard<'a> {
	fn drop(&mut self) {
		// No need to double panic, eg. inside a test assertion failure.
		if std::thread::panicking() {
			return
		}
		assert_eq!(self.ext.storage_root(), self.storage_root, "{}", self.error_message);
	}
}
