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

//! Stuff to do with the runtime's storage.

use alloc::vec::Vec;
use codec::{Compact, Decode, EncodeAppend, EncodeLike};
use sp_io::{hashing::twox_128, Externalities};

#[cfg(feature = "std")]
pub mod storage_noop_guard;
pub mod transactional;
pub mod types;
pub mod unhashed;

pub use transactional::{
	is_transactional, require_transactional, with_storage_layer, with_transaction,
};

const LOG_TARGET: &str = "runtime::storage";

/// Declares the prefix of a storage item: the module it belongs to and its own name.
///
/// The final key of the item is `twox_128(PALLET_PREFIX) ++ twox_128(STORAGE_PREFIX)`.
pub trait StorageInstance {
	/// Prefix of the module the storage belongs to.
	const PALLET_PREFIX: &'static str;
	/// Prefix given to the storage item.
	const STORAGE_PREFIX: &'static str;

	/// Final full prefix that prefixes all keys.
	fn prefix_hash() -> [u8; 32] {
		storage_prefix(Self::PALLET_PREFIX.as_bytes(), Self::STORAGE_PREFIX.as_bytes())
	}
}

/// Returns the storage prefix for a specific pallet name and storage name.
///
/// The storage prefix is `concat(twox_128(pallet_name), twox_128(storage_name))`.
pub fn storage_prefix(pallet_name: &[u8], storage_name: &[u8]) -> [u8; 32] {
	let pallet_hash = twox_128(pallet_name);
	let storage_hash = twox_128(storage_name);

	let mut final_key = [0u8; 32];
	final_key[..16].copy_from_slice(&pallet_hash);
	final_key[16..].copy_from_slice(&storage_hash);

	final_key
}

/// Declare [`StorageInstance`] types for the storage items of a module.
///
/// ```
/// stf_support::storage_prefix! {
/// 	/// Prefix of the `Value` item of the `Example` module.
/// 	pub ValuePrefix => ("Example", "Value");
/// }
/// ```
#[macro_export]
macro_rules! storage_prefix {
	( $( $( #[ $attr:meta ] )* $vis:vis $name:ident => ($pallet:expr, $item:expr); )* ) => {
		$(
			$( #[ $attr ] )*
			$vis struct $name;

			impl $crate::storage::StorageInstance for $name {
				const PALLET_PREFIX: &'static str = $pallet;
				const STORAGE_PREFIX: &'static str = $item;
			}
		)*
	};
}

/// A storage value type whose length can be read without decoding the value itself.
pub trait StorageDecodeLength: Decode {
	/// Decode the length of the storage value at `key`.
	///
	/// This function assumes that the length is at the beginning of the encoded object
	/// and is a `Compact<u32>`.
	fn decode_len(encoded: &[u8]) -> Result<usize, codec::Error> {
		let len = <Compact<u32>>::decode(&mut &encoded[..])?;
		Ok(len.0 as usize)
	}
}

impl<T: Decode> StorageDecodeLength for Vec<T> {}

/// Append `item` to the sequence stored at `key` without decoding it.
///
/// A missing or undecodable value is replaced by a one-item sequence.
pub(crate) fn append<V, I>(ext: &mut dyn Externalities, key: &[u8], item: I)
where
	V: EncodeAppend,
	I: EncodeLike<V::Item>,
{
	let mut encoded = ext.storage(key).unwrap_or_default();
	if <Compact<u32>>::decode(&mut &encoded[..]).is_err() {
		encoded.clear();
	}
	match V::append_or_new(encoded, core::iter::once(item)) {
		Ok(new) => ext.set_storage(key.to_vec(), new),
		Err(e) => log::error!(target: LOG_TARGET, "Failed to append to {:?}: {:?}", key, e),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use sp_io::TestExternalities;

	#[test]
	fn storage_prefix_concatenates_hashes() {
		let prefix = storage_prefix(b"System", b"Number");
		assert_eq!(&prefix[..16], &twox_128(b"System"));
		assert_eq!(&prefix[16..], &twox_128(b"Number"));
	}

	#[test]
	fn append_replaces_undecodable_values() {
		TestExternalities::new_empty().execute_with(|ext| {
			ext.set_storage(b"key".to_vec(), vec![0xff]);
			append::<Vec<u32>, _>(ext, b"key", 1u32);
			append::<Vec<u32>, _>(ext, b"key", 2u32);
			assert_eq!(unhashed::get::<Vec<u32>>(ext, b"key"), Some(vec![1, 2]));
			assert_eq!(
				<Vec<u32> as StorageDecodeLength>::decode_len(&ext.storage(b"key").unwrap()),
				Ok(2)
			);
		});
	}
}
