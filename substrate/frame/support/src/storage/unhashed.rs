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

//! Operation on unhashed runtime storage.

use super::LOG_TARGET;
use alloc::vec::Vec;
use codec::{Decode, Encode};
use sp_io::Externalities;

/// Return the value of the item in storage under `key`, or `None` if there is no explicit entry.
pub fn get<T: Decode + Sized>(ext: &dyn Externalities, key: &[u8]) -> Option<T> {
	ext.storage(key).and_then(|val| {
		Decode::decode(&mut &val[..]).map(Some).unwrap_or_else(|e| {
			log::error!(
				target: LOG_TARGET,
				"Corrupted state at `{:?}`: {:?}",
				key,
				e,
			);
			None
		})
	})
}

/// Return the value of the item in storage under `key`, or the type's default if there is no
/// explicit entry.
pub fn get_or_default<T: Decode + Sized + Default>(ext: &dyn Externalities, key: &[u8]) -> T {
	get(ext, key).unwrap_or_default()
}

/// Return the value of the item in storage under `key`, or `default_value` if there is no
/// explicit entry.
pub fn get_or<T: Decode + Sized>(ext: &dyn Externalities, key: &[u8], default_value: T) -> T {
	get(ext, key).unwrap_or(default_value)
}

/// Return the value of the item in storage under `key`, or `default_value()` if there is no
/// explicit entry.
pub fn get_or_else<T: Decode + Sized, F: FnOnce() -> T>(
	ext: &dyn Externalities,
	key: &[u8],
	default_value: F,
) -> T {
	get(ext, key).unwrap_or_else(default_value)
}

/// Put `value` in storage under `key`.
pub fn put<T: Encode + ?Sized>(ext: &mut dyn Externalities, key: &[u8], value: &T) {
	value.using_encoded(|slice| ext.set_storage(key.to_vec(), slice.to_vec()));
}

/// Remove `key` from storage, returning its value if it had an explicit entry or `None` otherwise.
pub fn take<T: Decode + Sized>(ext: &mut dyn Externalities, key: &[u8]) -> Option<T> {
	let r = get(ext, key);
	if r.is_some() {
		kill(ext, key);
	}
	r
}

/// Remove `key` from storage, returning its value, or, if there was no explicit entry in storage,
/// the default for its type.
pub fn take_or_default<T: Decode + Sized + Default>(ext: &mut dyn Externalities, key: &[u8]) -> T {
	take(ext, key).unwrap_or_default()
}

/// Check to see if `key` has an explicit entry in storage.
pub fn exists(ext: &dyn Externalities, key: &[u8]) -> bool {
	ext.exists_storage(key)
}

/// Ensure `key` has no explicit entry in storage.
pub fn kill(ext: &mut dyn Externalities, key: &[u8]) {
	ext.clear_storage(key);
}

/// Remove up to `limit` keys starting with `prefix`, returning how many were removed.
pub fn clear_prefix(ext: &mut dyn Externalities, prefix: &[u8], limit: Option<u32>) -> u32 {
	ext.clear_prefix(prefix, limit)
}

/// Get a Vec of bytes from storage.
pub fn get_raw(ext: &dyn Externalities, key: &[u8]) -> Option<Vec<u8>> {
	ext.storage(key)
}

/// Put a raw byte slice into storage.
pub fn put_raw(ext: &mut dyn Externalities, key: &[u8], value: &[u8]) {
	ext.set_storage(key.to_vec(), value.to_vec())
}

/// All keys starting with `prefix`, in ascending order.
pub fn keys_with_prefix(ext: &dyn Externalities, prefix: &[u8]) -> Vec<Vec<u8>> {
	let mut keys = Vec::new();
	let mut previous = prefix.to_vec();
	if ext.exists_storage(prefix) {
		keys.push(prefix.to_vec());
	}
	while let Some(next) = ext.next_storage_key(&previous) {
		if !next.starts_with(prefix) {
			break
		}
		keys.push(next.clone());
		previous = next;
	}
	keys
}

#[cfg(test)]
mod tests {
	use super::*;
	use sp_io::TestExternalities;

	#[test]
	fn typed_access_round_trips() {
		TestExternalities::new_empty().execute_with(|ext| {
			assert_eq!(get::<u32>(ext, b"a"), None);
			assert_eq!(get_or_default::<u32>(ext, b"a"), 0);
			assert_eq!(get_or(ext, b"a", 5u32), 5);

			put(ext, b"a", &7u32);
			assert!(exists(ext, b"a"));
			assert_eq!(take::<u32>(ext, b"a"), Some(7));
			assert!(!exists(ext, b"a"));
			assert_eq!(take_or_default::<u32>(ext, b"a"), 0);
		});
	}

	#[test]
	fn corrupted_values_read_as_missing() {
		TestExternalities::new_empty().execute_with(|ext| {
			put_raw(ext, b"a", &[1]);
			assert_eq!(get::<u64>(ext, b"a"), None);
			assert_eq!(get_raw(ext, b"a"), Some(vec![1]));
		});
	}

	#[test]
	fn prefix_operations() {
		TestExternalities::new_empty().execute_with(|ext| {
			put(ext, b"ab", &1u8);
			put(ext, b"abc", &2u8);
			put(ext, b"abd", &3u8);
			put(ext, b"b", &4u8);
			assert_eq!(
				keys_with_prefix(ext, b"ab"),
				vec![b"ab".to_vec(), b"abc".to_vec(), b"abd".to_vec()]
			);
			assert_eq!(clear_prefix(ext, b"ab", Some(2)), 2);
			assert_eq!(keys_with_prefix(ext, b"ab"), vec![b"abd".to_vec()]);
			assert!(exists(ext, b"b"));
		});
	}
}
