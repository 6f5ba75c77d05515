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

//! Hash utilities.

use alloc::vec::Vec;
use codec::{Codec, MaxEncodedLen};
use sp_io::hashing::{blake2_128, blake2_256, twox_128, twox_256, twox_64};

/// Hasher to use to hash keys to insert to storage.
pub trait StorageHasher: 'static {
	/// Output of the hasher.
	type Output: AsRef<[u8]>;
	/// Compute the hash of `x`.
	fn hash(x: &[u8]) -> Self::Output;

	/// The max length of the final hash, for the given key type.
	fn max_len<K: MaxEncodedLen>() -> usize;
}

/// Hasher to use to hash keys to insert to storage.
///
/// Reversible hasher store the encoded key after the hash part.
pub trait ReversibleStorageHasher: StorageHasher {
	/// Split the hash to return the unhashed part.
	///
	/// Returns an error if the hash is not long enough.
	fn reverse(x: &[u8]) -> Result<&[u8], &'static str>;
}

/// Store the key directly.
pub struct Identity;
impl StorageHasher for Identity {
	type Output = Vec<u8>;
	fn hash(x: &[u8]) -> Vec<u8> {
		x.to_vec()
	}
	fn max_len<K: MaxEncodedLen>() -> usize {
		K::max_encoded_len()
	}
}
impl ReversibleStorageHasher for Identity {
	fn reverse(x: &[u8]) -> Result<&[u8], &'static str> {
		Ok(x)
	}
}

/// Hash storage keys with `concat(twox64(key), key)`
pub struct Twox64Concat;
impl StorageHasher for Twox64Concat {
	type Output = Vec<u8>;
	fn hash(x: &[u8]) -> Vec<u8> {
		twox_64(x).iter().chain(x.iter()).cloned().collect::<Vec<_>>()
	}
	fn max_len<K: MaxEncodedLen>() -> usize {
		K::max_encoded_len().saturating_add(8)
	}
}
impl ReversibleStorageHasher for Twox64Concat {
	fn reverse(x: &[u8]) -> Result<&[u8], &'static str> {
		if x.len() < 8 {
			return Err("Invalid reverse: hash length too short")
		}
		Ok(&x[8..])
	}
}

/// Hash storage keys with `concat(blake2_128(key), key)`
pub struct Blake2_128Concat;
impl StorageHasher for Blake2_128Concat {
	type Output = Vec<u8>;
	fn hash(x: &[u8]) -> Vec<u8> {
		blake2_128(x).iter().chain(x.iter()).cloned().collect::<Vec<_>>()
	}
	fn max_len<K: MaxEncodedLen>() -> usize {
		K::max_encoded_len().saturating_add(16)
	}
}
impl ReversibleStorageHasher for Blake2_128Concat {
	fn reverse(x: &[u8]) -> Result<&[u8], &'static str> {
		if x.len() < 16 {
			return Err("Invalid reverse: hash length too short")
		}
		Ok(&x[16..])
	}
}

/// Hash storage keys with blake2 128
pub struct Blake2_128;
impl StorageHasher for Blake2_128 {
	type Output = [u8; 16];
	fn hash(x: &[u8]) -> [u8; 16] {
		blake2_128(x)
	}
	fn max_len<K: MaxEncodedLen>() -> usize {
		16
	}
}

/// Hash storage keys with blake2 256
pub struct Blake2_256;
impl StorageHasher for Blake2_256 {
	type Output = [u8; 32];
	fn hash(x: &[u8]) -> [u8; 32] {
		blake2_256(x)
	}
	fn max_len<K: MaxEncodedLen>() -> usize {
		32
	}
}

/// Hash storage keys with twox 128
pub struct Twox128;
impl StorageHasher for Twox128 {
	type Output = [u8; 16];
	fn hash(x: &[u8]) -> [u8; 16] {
		twox_128(x)
	}
	fn max_len<K: MaxEncodedLen>() -> usize {
		16
	}
}

/// Hash storage keys with twox 256
pub struct Twox256;
impl StorageHasher for Twox256 {
	type Output = [u8; 32];
	fn hash(x: &[u8]) -> [u8; 32] {
		twox_256(x)
	}
	fn max_len<K: MaxEncodedLen>() -> usize {
		32
	}
}

/// Decode the key stored after a reversible hasher's hash part.
pub fn decode_reversed<H: ReversibleStorageHasher, K: Codec>(
	hashed: &[u8],
) -> Result<K, codec::Error> {
	let raw = H::reverse(hashed)?;
	K::decode(&mut &raw[..])
}

#[cfg(test)]
mod tests {
	use super::*;
	use codec::Encode;

	#[test]
	fn test_twox_64_concat() {
		let r = Twox64Concat::hash(b"foo");
		assert_eq!(r.split_at(8), (&twox_64(b"foo")[..], &b"foo"[..]))
	}

	#[test]
	fn test_blake2_128_concat() {
		let r = Blake2_128Concat::hash(b"foo");
		assert_eq!(r.split_at(16), (&blake2_128(b"foo")[..], &b"foo"[..]))
	}

	#[test]
	fn reversible_hashers_recover_the_key() {
		let key = (7u32, 9u64);
		let hashed = Blake2_128Concat::hash(&key.encode());
		assert_eq!(decode_reversed::<Blake2_128Concat, (u32, u64)>(&hashed), Ok(key));
		assert!(Twox64Concat::reverse(&[1, 2, 3]).is_err());
		assert_eq!(Identity::reverse(b"abc"), Ok(&b"abc"[..]));
	}

	#[test]
	fn max_lengths() {
		use codec::MaxEncodedLen;
		assert_eq!(Twox64Concat::max_len::<u64>(), u64::max_encoded_len() + 8);
		assert_eq!(Blake2_128Concat::max_len::<u64>(), u64::max_encoded_len() + 16);
		assert_eq!(Identity::max_len::<u64>(), u64::max_encoded_len());
		assert_eq!(Blake2_128::max_len::<u64>(), 16);
		assert_eq!(Twox128::max_len::<u64>(), 16);
		assert_eq!(Blake2_256::max_len::<u64>(), 32);
		assert_eq!(Twox256::max_len::<u64>(), 32);
	}
}
