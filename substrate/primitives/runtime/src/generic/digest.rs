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

//! Generic implementation of a digest.

use alloc::vec::Vec;
use codec::{Decode, Encode};
use scale_info::TypeInfo;

/// Consensus engine unique ID.
pub type ConsensusEngineId = [u8; 4];

/// Generic header digest.
#[derive(PartialEq, Eq, Clone, Encode, Decode, Debug, TypeInfo, Default)]
pub struct Digest {
	/// A list of logs in the digest.
	pub logs: Vec<DigestItem>,
}

impl Digest {
	/// Get reference to all digest items.
	pub fn logs(&self) -> &[DigestItem] {
		&self.logs
	}

	/// Push new digest item.
	pub fn push(&mut self, item: DigestItem) {
		self.logs.push(item);
	}

	/// Pop a digest item.
	pub fn pop(&mut self) -> Option<DigestItem> {
		self.logs.pop()
	}

	/// Get reference to the first digest item that matches the passed predicate.
	pub fn log<T: ?Sized, F: Fn(&DigestItem) -> Option<&T>>(&self, predicate: F) -> Option<&T> {
		self.logs().iter().find_map(predicate)
	}
}

/// Digest item that is able to encode/decode 'system' digest items and
/// provide opaque access to other items.
///
/// The discriminants are fixed; decoding an unknown one fails.
#[derive(PartialEq, Eq, Clone, Encode, Decode, Debug, TypeInfo)]
pub enum DigestItem {
	/// Some other thing. Unsupported and experimental.
	#[codec(index = 0)]
	Other(Vec<u8>),

	/// A message from the runtime to the consensus engine. This should *never*
	/// be generated by the native code of any consensus engine, but this is not
	/// enforced by the runtime.
	#[codec(index = 4)]
	Consensus(ConsensusEngineId, Vec<u8>),

	/// Put a Seal on it. This is only used by native code, and is never seen
	/// by runtimes.
	#[codec(index = 5)]
	Seal(ConsensusEngineId, Vec<u8>),

	/// A pre-runtime digest.
	///
	/// These are messages from the consensus engine to the runtime, although
	/// the consensus engine can (and should) read them itself to avoid
	/// code and state duplication. It is erroneous for a runtime to produce
	/// these, but this is not (yet) checked.
	#[codec(index = 6)]
	PreRuntime(ConsensusEngineId, Vec<u8>),

	/// Digest item that contains signal from changes tries manager to the
	/// native code.
	#[codec(index = 8)]
	RuntimeEnvironmentUpdated,
}

impl DigestItem {
	/// Returns `Some` if this entry is the `PreRuntime` entry.
	pub fn as_pre_runtime(&self) -> Option<(ConsensusEngineId, &[u8])> {
		match self {
			Self::PreRuntime(id, data) => Some((*id, data)),
			_ => None,
		}
	}

	/// Returns `Some` if this entry is the `Consensus` entry.
	pub fn as_consensus(&self) -> Option<(ConsensusEngineId, &[u8])> {
		match self {
			Self::Consensus(id, data) => Some((*id, data)),
			_ => None,
		}
	}

	/// Returns `Some` if this entry is the `Seal` entry.
	pub fn as_seal(&self) -> Option<(ConsensusEngineId, &[u8])> {
		match self {
			Self::Seal(id, data) => Some((*id, data)),
			_ => None,
		}
	}

	/// Returns Some if `self` is a `DigestItem::Other`.
	pub fn as_other(&self) -> Option<&[u8]> {
		match self {
			Self::Other(subject) => Some(subject),
			_ => None,
		}
	}

	/// Try to decode the payload of a `PreRuntime` item produced by engine `id`.
	pub fn pre_runtime_try_to<T: Decode>(&self, id: &ConsensusEngineId) -> Option<T> {
		self.as_pre_runtime()
			.filter(|(engine, _)| engine == id)
			.and_then(|(_, mut data)| T::decode(&mut data).ok())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn discriminants_are_stable() {
		assert_eq!(DigestItem::Other(vec![1]).encode(), vec![0, 4, 1]);
		assert_eq!(DigestItem::Seal(*b"test", vec![]).encode(), vec![5, b't', b'e', b's', b't', 0]);
		assert_eq!(DigestItem::RuntimeEnvironmentUpdated.encode(), vec![8]);
	}

	#[test]
	fn unknown_discriminant_fails_to_decode() {
		assert!(DigestItem::decode(&mut &[7u8, 0][..]).is_err());
	}

	#[test]
	fn pre_runtime_payload_is_filtered_by_engine() {
		let item = DigestItem::PreRuntime(*b"aura", 42u64.encode());
		assert_eq!(item.pre_runtime_try_to::<u64>(b"aura"), Some(42));
		assert_eq!(item.pre_runtime_try_to::<u64>(b"babe"), None);
		assert!(item.as_seal().is_none());

		let digest = Digest { logs: vec![DigestItem::Other(vec![9]), item] };
		assert_eq!(digest.log(DigestItem::as_other), Some(&[9u8][..]));
	}
}
