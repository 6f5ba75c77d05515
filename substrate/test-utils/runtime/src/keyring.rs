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

//! A set of well-known test accounts and the means to sign extrinsics with them.

use crate::{
	AccountId, Balance, Nonce, RuntimeCall, Signature, SignedExtra, SignedPayload,
	UncheckedExtrinsic,
};
use codec::Encode;
use sp_io::Externalities;
use sp_runtime::{
	crypto::ed25519::{Pair, Public},
	generic::Era,
	traits::IdentifyAccount,
	transaction_validity::TransactionValidityError,
};

/// Set of test accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Keyring {
	Alice,
	Bob,
	Charlie,
	Dave,
	Eve,
	Ferdie,
}

impl Keyring {
	const ALL: [Keyring; 6] = [
		Keyring::Alice,
		Keyring::Bob,
		Keyring::Charlie,
		Keyring::Dave,
		Keyring::Eve,
		Keyring::Ferdie,
	];

	pub fn from_public(who: &Public) -> Option<Keyring> {
		Self::iter().find(|&k| &k.public() == who)
	}

	pub fn from_account_id(who: &AccountId) -> Option<Keyring> {
		Self::iter().find(|&k| &k.to_account_id() == who)
	}

	pub fn to_account_id(self) -> AccountId {
		self.public().into_account()
	}

	pub fn sign(self, msg: &[u8]) -> Signature {
		self.pair().sign(msg)
	}

	pub fn pair(self) -> Pair {
		Pair::from_phrase(&self.to_seed())
	}

	pub fn public(self) -> Public {
		self.pair().public()
	}

	pub fn to_seed(self) -> String {
		format!("//{}", <&'static str>::from(self))
	}

	/// Returns an iterator over all test accounts.
	pub fn iter() -> impl Iterator<Item = Keyring> {
		Self::ALL.into_iter()
	}
}

impl From<Keyring> for &'static str {
	fn from(k: Keyring) -> Self {
		match k {
			Keyring::Alice => "Alice",
			Keyring::Bob => "Bob",
			Keyring::Charlie => "Charlie",
			Keyring::Dave => "Dave",
			Keyring::Eve => "Eve",
			Keyring::Ferdie => "Ferdie",
		}
	}
}

impl From<Keyring> for sp_runtime::AccountId32 {
	fn from(k: Keyring) -> Self {
		k.to_account_id()
	}
}

/// Alice's account id.
pub fn alice() -> AccountId {
	Keyring::Alice.into()
}

/// Bob's account id.
pub fn bob() -> AccountId {
	Keyring::Bob.into()
}

/// Charlie's account id.
pub fn charlie() -> AccountId {
	Keyring::Charlie.into()
}

/// Returns transaction extra.
pub fn signed_extra(nonce: Nonce, tip: Balance) -> SignedExtra {
	(
		frame_system::CheckNonZeroSender::new(),
		frame_system::CheckSpecVersion::new(),
		frame_system::CheckTxVersion::new(),
		frame_system::CheckGenesis::new(),
		frame_system::CheckMortality::from(Era::mortal(256, 0)),
		frame_system::CheckNonce::from(nonce),
		frame_system::CheckWeight::new(),
		pallet_transaction_payment::ChargeTransactionPayment::from(tip),
	)
}

/// Sign `call` as `signer`.
///
/// The data every extension adds to the signed payload is read from `ext`, which should hold
/// the state the extrinsic is going to be validated against.
pub fn sign(
	ext: &dyn Externalities,
	signer: Keyring,
	call: RuntimeCall,
	extra: SignedExtra,
) -> Result<UncheckedExtrinsic, TransactionValidityError> {
	let payload = SignedPayload::new(ext, call, extra)?;
	let signature = payload.using_encoded(|b| signer.sign(b));
	let (call, extra, _) = payload.deconstruct();
	Ok(UncheckedExtrinsic::new_signed(call, signer.to_account_id().into(), signature, extra))
}
