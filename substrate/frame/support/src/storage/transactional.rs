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

//! Provides functionality around the transaction storage.
//!
//! Transactional layers are nested scopes over the storage overlay: everything written inside a
//! layer is either committed into the parent or thrown away. The current depth is persisted under
//! [`TRANSACTION_LEVEL_KEY`] and bounded by [`TRANSACTIONAL_LIMIT`].

use super::{unhashed, LOG_TARGET};
use sp_io::Externalities;
use sp_runtime::{DispatchError, TransactionOutcome, TransactionalError};

/// The type that is being used to store the current number of active layers.
pub type Layer = u32;
/// The key that is holds the current number of active layers.
///
/// Encodes to `0x3a7472616e73616374696f6e5f6c6576656c3a`.
pub const TRANSACTION_LEVEL_KEY: &[u8] = b":transaction_level:";
/// The maximum number of nested layers.
pub const TRANSACTIONAL_LIMIT: Layer = 255;

/// Returns the current number of nested transactional layers.
fn get_transaction_level(ext: &dyn Externalities) -> Layer {
	unhashed::get_or_default::<Layer>(ext, TRANSACTION_LEVEL_KEY)
}

/// Set the current number of nested transactional layers.
fn set_transaction_level(ext: &mut dyn Externalities, level: Layer) {
	if level == 0 {
		unhashed::kill(ext, TRANSACTION_LEVEL_KEY);
	} else {
		unhashed::put::<Layer>(ext, TRANSACTION_LEVEL_KEY, &level);
	}
}

/// Increments the transaction level. Returns an error if levels go past the limit.
fn inc_transaction_level(ext: &mut dyn Externalities) -> Result<(), ()> {
	let existing_levels = get_transaction_level(ext);
	if existing_levels >= TRANSACTIONAL_LIMIT {
		return Err(())
	}
	// Cannot overflow because of check above.
	set_transaction_level(ext, existing_levels + 1);
	Ok(())
}

/// Decrements the transaction level, never going below zero.
fn dec_transaction_level(ext: &mut dyn Externalities) {
	let existing_levels = get_transaction_level(ext);
	if existing_levels == 0 {
		log::warn!(
			target: LOG_TARGET,
			"We are underflowing with calculating transactional levels. Not great, but let's not panic...",
		);
		return
	}
	set_transaction_level(ext, existing_levels - 1);
}

/// Check if the current call is within a transactional layer.
pub fn is_transactional(ext: &dyn Externalities) -> bool {
	get_transaction_level(ext) > 0
}

/// Ensure the current call is within a transactional layer.
pub fn require_transactional(ext: &dyn Externalities) -> Result<(), DispatchError> {
	if is_transactional(ext) {
		Ok(())
	} else {
		Err(TransactionalError::NoLayer.into())
	}
}

/// An open storage layer together with its slot in the transaction level.
///
/// Dropping the guard without closing it rolls the layer back and lowers the level, so a
/// function unwinding out of a layer never leaves either behind.
struct StorageLayerGuard<'a> {
	ext: &'a mut dyn Externalities,
	closed: bool,
}

impl<'a> StorageLayerGuard<'a> {
	fn open(ext: &'a mut dyn Externalities) -> Result<Self, ()> {
		inc_transaction_level(ext)?;
		ext.storage_start_transaction();
		Ok(Self { ext, closed: false })
	}

	fn close(&mut self, commit: bool) {
		if self.closed {
			return
		}
		self.closed = true;
		if commit {
			if self.ext.storage_commit_transaction().is_err() {
				log::error!(target: LOG_TARGET, "Committing a layer that was never started");
			}
		} else if self.ext.storage_rollback_transaction().is_err() {
			log::error!(target: LOG_TARGET, "Rolling back a layer that was never started");
		}
		// The level key lives outside the layer that was just closed.
		dec_transaction_level(self.ext);
	}
}

impl Drop for StorageLayerGuard<'_> {
	fn drop(&mut self) {
		if !self.closed {
			log::warn!(target: LOG_TARGET, "Storage layer abandoned, rolling it back");
			self.close(false);
		}
	}
}

/// Execute the supplied function in a new storage transaction.
///
/// All changes to storage performed by the supplied function are discarded if the returned
/// outcome is `TransactionOutcome::Rollback`.
///
/// Transactions can be nested up to `TRANSACTIONAL_LIMIT` times; more than that will result in an
/// error. The level is restored on every exit path, unwinding included, so a failing layer never
/// leaves the counter raised.
///
/// Commits happen to the parent transaction.
pub fn with_transaction<T, E, F>(ext: &mut dyn Externalities, f: F) -> Result<T, E>
where
	E: From<DispatchError>,
	F: FnOnce(&mut dyn Externalities) -> TransactionOutcome<Result<T, E>>,
{
	let Ok(mut guard) = StorageLayerGuard::open(ext) else {
		return Err(E::from(TransactionalError::LimitReached.into()))
	};

	match f(&mut *guard.ext) {
		TransactionOutcome::Commit(res) => {
			guard.close(true);
			res
		},
		TransactionOutcome::Rollback(res) => {
			guard.close(false);
			res
		},
	}
}

/// Execute the supplied function, adding a new storage layer.
///
/// This is the same as `with_transaction`, but assuming that any function returning an `Err`
/// should rollback, and any function returning `Ok` should commit. This provides a cleaner API to
/// the developer who wants this behavior.
pub fn with_storage_layer<T, E, F>(ext: &mut dyn Externalities, f: F) -> Result<T, E>
where
	E: From<DispatchError>,
	F: FnOnce(&mut dyn Externalities) -> Result<T, E>,
{
	with_transaction(ext, |ext| {
		let r = f(ext);
		if r.is_ok() {
			TransactionOutcome::Commit(r)
		} else {
			TransactionOutcome::Rollback(r)
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{assert_noop, assert_ok};
	use sp_io::TestExternalities;

	fn write(ext: &mut dyn Externalities, key: &[u8], value: u32) {
		unhashed::put(ext, key, &value);
	}

	#[test]
	fn is_transactional_should_return_false() {
		TestExternalities::new_empty().execute_with(|ext| {
			assert!(!is_transactional(ext));
			assert_eq!(
				require_transactional(ext),
				Err(DispatchError::Transactional(TransactionalError::NoLayer))
			);
		});
	}

	#[test]
	fn is_transactional_should_not_error_in_with_transaction() {
		TestExternalities::new_empty().execute_with(|ext| {
			assert_ok!(with_transaction(ext, |ext| -> TransactionOutcome<
				Result<(), DispatchError>,
			> {
				assert!(is_transactional(ext));
				TransactionOutcome::Commit(require_transactional(ext))
			}));

			assert_ok!(with_transaction(ext, |ext| -> TransactionOutcome<
				Result<(), DispatchError>,
			> {
				assert!(is_transactional(ext));
				TransactionOutcome::Rollback(require_transactional(ext))
			}));
			assert!(!is_transactional(ext));
		});
	}

	#[test]
	fn storage_layer_commits_ok_and_rolls_back_err() {
		TestExternalities::new_empty().execute_with(|ext| {
			assert_ok!(with_storage_layer(ext, |ext| -> Result<(), DispatchError> {
				write(ext, b"kept", 1);
				Ok(())
			}));
			assert_eq!(unhashed::get::<u32>(ext, b"kept"), Some(1));

			assert_noop!(
				ext,
				with_storage_layer(ext, |ext| -> Result<(), DispatchError> {
					write(ext, b"dropped", 2);
					write(ext, b"kept", 3);
					Err("failed".into())
				}),
				DispatchError::Other("failed")
			);
			assert_eq!(unhashed::get::<u32>(ext, b"dropped"), None);
			assert!(!unhashed::exists(ext, TRANSACTION_LEVEL_KEY));
		});
	}

	#[test]
	fn nested_layers_roll_back_independently() {
		TestExternalities::new_empty().execute_with(|ext| {
			let outer = with_storage_layer(ext, |ext| -> Result<(), DispatchError> {
				write(ext, b"outer", 1);
				let inner = with_storage_layer(ext, |ext| -> Result<(), DispatchError> {
					write(ext, b"inner", 2);
					assert_eq!(get_transaction_level(ext), 2);
					Err(DispatchError::Corruption)
				});
				assert_eq!(inner, Err(DispatchError::Corruption));
				assert_eq!(get_transaction_level(ext), 1);
				Ok(())
			});
			assert_ok!(outer);
			assert_eq!(unhashed::get::<u32>(ext, b"outer"), Some(1));
			assert_eq!(unhashed::get::<u32>(ext, b"inner"), None);
		});
	}

	fn recurse(ext: &mut dyn Externalities, depth: u32) -> Result<u32, DispatchError> {
		with_storage_layer(ext, |ext| {
			write(ext, b"depth", depth);
			if depth == TRANSACTIONAL_LIMIT + 1 {
				Ok(depth)
			} else {
				recurse(ext, depth + 1)
			}
		})
	}

	#[test]
	fn transaction_limit_should_work() {
		TestExternalities::new_empty().execute_with(|ext| {
			assert_eq!(
				recurse(ext, 1),
				Err(DispatchError::Transactional(TransactionalError::LimitReached))
			);
			// Every layer failed and was rolled back, leaving the level untouched.
			assert_eq!(get_transaction_level(ext), 0);
			assert_eq!(unhashed::get::<u32>(ext, b"depth"), None);
		});
	}

	#[test]
	fn panicking_layer_is_rolled_back() {
		let mut ext = TestExternalities::new_empty();
		ext.execute_with(|ext| {
			write(ext, b"kept", 1);
			let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
				let _ = with_storage_layer(ext, |ext| -> Result<(), DispatchError> {
					write(ext, b"kept", 2);
					write(ext, b"lost", 3);
					panic!("layer aborted");
				});
			}));
			assert!(unwound.is_err());

			assert_eq!(get_transaction_level(ext), 0);
			assert!(!unhashed::exists(ext, TRANSACTION_LEVEL_KEY));
			assert_eq!(unhashed::get::<u32>(ext, b"kept"), Some(1));
			assert_eq!(unhashed::get::<u32>(ext, b"lost"), None);
		});
		assert_eq!(ext.transaction_depth(), 0);
	}

	#[test]
	fn transaction_limit_allows_exactly_the_maximum_depth() {
		fn nest(ext: &mut dyn Externalities, remaining: u32) -> Result<(), DispatchError> {
			with_storage_layer(ext, |ext| if remaining == 1 { Ok(()) } else { nest(ext, remaining - 1) })
		}
		TestExternalities::new_empty().execute_with(|ext| {
			assert_ok!(nest(ext, TRANSACTIONAL_LIMIT));
			assert_eq!(
				nest(ext, TRANSACTIONAL_LIMIT + 1),
				Err(DispatchError::Transactional(TransactionalError::LimitReached))
			);
			assert_eq!(get_transaction_level(ext), 0);
		});
	}
}
