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

//! Generic implementation of a block and associated items.

use crate::traits::{self, Header as HeaderT, Member};
use alloc::vec::Vec;
use codec::{Codec, Decode, Encode};
use core::fmt::Debug;

/// Abstraction over a substrate block.
#[derive(PartialEq, Eq, Clone, Encode, Decode, Debug)]
pub struct Block<Header, Extrinsic> {
	/// The block header.
	pub header: Header,
	/// The accompanying extrinsics.
	pub extrinsics: Vec<Extrinsic>,
}

impl<Header, Extrinsic> traits::Block for Block<Header, Extrinsic>
where
	Header: HeaderT,
	Extrinsic: Member + Codec + traits::Extrinsic,
	Block<Header, Extrinsic>: Codec + Eq + Debug + Clone + Send + Sync + 'static,
{
	type Extrinsic = Extrinsic;
	type Header = Header;
	type Hash = <Self::Header as traits::Header>::Hash;

	fn header(&self) -> &Self::Header {
		&self.header
	}
	fn extrinsics(&self) -> &[Self::Extrinsic] {
		&self.extrinsics[..]
	}
	fn deconstruct(self) -> (Self::Header, Vec<Self::Extrinsic>) {
		(self.header, self.extrinsics)
	}
	fn new(header: Self::Header, extrinsics: Vec<Self::Extrinsic>) -> Self {
		Block { header, extrinsics }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::traits::{Block as BlockT, Extrinsic};
	use crate::{
		generic::{Digest, Header},
		traits::BlakeTwo256,
		H256,
	};

	#[derive(PartialEq, Eq, Clone, Encode, Decode, Debug)]
	struct Xt(u8, bool);

	impl Extrinsic for Xt {
		type Call = u8;
		type SignaturePayload = ();

		fn is_signed(&self) -> Option<bool> {
			Some(self.1)
		}
		fn new(call: u8, signed: Option<()>) -> Option<Self> {
			Some(Xt(call, signed.is_some()))
		}
		fn new_inherent(call: u8) -> Self {
			Xt(call, false)
		}
		fn call(&self) -> &u8 {
			&self.0
		}
	}

	type TestBlock = Block<Header<u64, BlakeTwo256>, Xt>;

	#[test]
	fn block_hash_is_header_hash() {
		let header = Header::<u64, BlakeTwo256> {
			parent_hash: H256::zero(),
			number: 3,
			state_root: H256::zero(),
			extrinsics_root: H256::zero(),
			digest: Digest::default(),
		};
		let block = TestBlock::new(header.clone(), vec![Xt(1, false), Xt(2, true)]);
		assert_eq!(BlockT::hash(&block), header.hash());
		assert_eq!(block.extrinsics().len(), 2);

		let (h, xts) = block.deconstruct();
		assert_eq!(h, header);
		assert_eq!(xts[1], Xt(2, true));
	}
}
