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

//! MultiAddress type is a wrapper for multiple downstream account formats.

use alloc::vec::Vec;
use codec::{Decode, Encode};

/// A multi-format address wrapper for on-chain accounts.
#[derive(Encode, Decode, PartialEq, Eq, Clone, Debug, scale_info::TypeInfo)]
#[cfg_attr(feature = "std", derive(Hash))]
pub enum MultiAddress<AccountId, AccountIndex> {
	/// It's an account ID (pubkey).
	Id(AccountId),
	/// It's an account index.
	Index(#[codec(compact)] AccountIndex),
	/// It's some arbitrary raw bytes.
	Raw(Vec<u8>),
	/// It's a 32 byte representation.
	Address32([u8; 32]),
	/// It's a 20 byte representation.
	Address20([u8; 20]),
}

#[cfg(feature = "std")]
impl<AccountId, AccountIndex> std::fmt::Display for MultiAddress<AccountId, AccountIndex>
where
	AccountId: std::fmt::Debug,
	AccountIndex: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		if let Self::Raw(inner) = self {
			write!(f, "MultiAddress::Raw({})", array_bytes::bytes2hex("", inner))
		} else {
			write!(f, "{:?}", self)
		}
	}
}

impl<AccountId, AccountIndex> From<AccountId> for MultiAddress<AccountId, AccountIndex> {
	fn from(a: AccountId) -> Self {
		Self::Id(a)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn index_is_compact_encoded() {
		let addr = MultiAddress::<u64, u32>::Index(1);
		assert_eq!(addr.encode(), vec![1, 1 << 2]);
		assert_eq!(MultiAddress::<u64, u32>::decode(&mut &addr.encode()[..]).unwrap(), addr);
	}

	#[test]
	fn display_shows_raw_bytes_as_hex() {
		let addr = MultiAddress::<u64, u32>::Raw(vec![0xde, 0xad]);
		assert_eq!(addr.to_string(), "MultiAddress::Raw(dead)");
		assert_eq!(MultiAddress::<u64, u32>::from(3).to_string(), "Id(3)");
	}
}
