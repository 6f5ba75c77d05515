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

//! Account identifiers and the ed25519 signature scheme used by signed extrinsics.

use crate::traits::{IdentifyAccount, Verify};
use alloc::string::String;
use codec::{Decode, Encode, MaxEncodedLen};
use core::fmt;
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// An opaque 32-byte cryptographic identifier.
#[derive(
	Clone,
	Copy,
	Eq,
	PartialEq,
	Ord,
	PartialOrd,
	Hash,
	Default,
	Encode,
	Decode,
	MaxEncodedLen,
	TypeInfo,
	Serialize,
	Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId32([u8; 32]);

impl AccountId32 {
	/// Create a new instance from its raw inner byte value.
	///
	/// Equivalent to this types `From<[u8; 32]>` implementation. For the lack of const
	/// support in traits we have this constructor.
	pub const fn new(inner: [u8; 32]) -> Self {
		Self(inner)
	}

	/// The raw bytes of the identifier.
	pub fn as_array(&self) -> &[u8; 32] {
		&self.0
	}
}

impl From<[u8; 32]> for AccountId32 {
	fn from(x: [u8; 32]) -> Self {
		Self::new(x)
	}
}

impl From<AccountId32> for [u8; 32] {
	fn from(x: AccountId32) -> [u8; 32] {
		x.0
	}
}

impl From<primitive_types::H256> for AccountId32 {
	fn from(h: primitive_types::H256) -> Self {
		Self(h.0)
	}
}

impl AsRef<[u8]> for AccountId32 {
	fn as_ref(&self) -> &[u8] {
		&self.0[..]
	}
}

impl AsMut<[u8]> for AccountId32 {
	fn as_mut(&mut self) -> &mut [u8] {
		&mut self.0[..]
	}
}

impl fmt::Display for AccountId32 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", array_bytes::bytes2hex("0x", self.0))
	}
}

impl fmt::Debug for AccountId32 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let s = array_bytes::bytes2hex("", self.0);
		write!(f, "{}…", &s[0..8])
	}
}

impl core::str::FromStr for AccountId32 {
	type Err = &'static str;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		array_bytes::hex2array(s).map(Self).map_err(|_| "invalid hex address.")
	}
}

impl TryFrom<String> for AccountId32 {
	type Error = &'static str;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

impl From<AccountId32> for String {
	fn from(a: AccountId32) -> String {
		alloc::format!("{}", a)
	}
}

/// Ed25519 keys and signatures.
pub mod ed25519 {
	use super::*;

	/// A public key.
	#[derive(
		Clone,
		Copy,
		Eq,
		PartialEq,
		Ord,
		PartialOrd,
		Hash,
		Encode,
		Decode,
		MaxEncodedLen,
		TypeInfo,
		Debug,
	)]
	pub struct Public(pub [u8; 32]);

	impl IdentifyAccount for Public {
		type AccountId = AccountId32;

		fn into_account(self) -> AccountId32 {
			AccountId32::new(self.0)
		}
	}

	impl From<Public> for AccountId32 {
		fn from(p: Public) -> Self {
			p.into_account()
		}
	}

	/// A signature over a message.
	#[derive(Clone, Copy, Eq, PartialEq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
	pub struct Signature(pub [u8; 64]);

	impl Verify for Signature {
		type Signer = Public;

		fn verify(&self, msg: &[u8], signer: &AccountId32) -> bool {
			use ed25519_dalek::Verifier;

			let Ok(public) = ed25519_dalek::VerifyingKey::from_bytes(signer.as_array()) else {
				return false
			};
			public.verify(msg, &ed25519_dalek::Signature::from_bytes(&self.0)).is_ok()
		}
	}

	/// A key pair able to produce signatures.
	#[cfg(feature = "std")]
	#[derive(Clone)]
	pub struct Pair(ed25519_dalek::SigningKey);

	#[cfg(feature = "std")]
	impl Pair {
		/// Make a new key pair from a 32-byte secret seed.
		pub fn from_seed(seed: &[u8; 32]) -> Self {
			Self(ed25519_dalek::SigningKey::from_bytes(seed))
		}

		/// Derive a key pair from an arbitrary phrase, e.g. `//Alice`.
		pub fn from_phrase(phrase: &str) -> Self {
			Self::from_seed(&sp_io::hashing::blake2_256(phrase.as_bytes()))
		}

		/// The public half of the pair.
		pub fn public(&self) -> Public {
			Public(self.0.verifying_key().to_bytes())
		}

		/// Sign a message.
		pub fn sign(&self, msg: &[u8]) -> Signature {
			use ed25519_dalek::Signer;
			Signature(self.0.sign(msg).to_bytes())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{ed25519::Pair, *};

	#[test]
	fn signatures_verify_against_the_signing_account() {
		let alice = Pair::from_phrase("//Alice");
		let bob = Pair::from_phrase("//Bob");
		let sig = alice.sign(b"hello");

		assert!(sig.verify(b"hello", &alice.public().into_account()));
		assert!(!sig.verify(b"hello!", &alice.public().into_account()));
		assert!(!sig.verify(b"hello", &bob.public().into_account()));
	}

	#[test]
	fn malformed_signer_is_rejected() {
		let sig = Pair::from_seed(&[1; 32]).sign(b"x");
		// an account that never signed anything
		let bogus = AccountId32::new([0xff; 32]);
		assert!(!sig.verify(b"x", &bogus));
	}

	#[test]
	fn account_id_hex_roundtrips_through_serde() {
		let account = Pair::from_phrase("//Alice").public().into_account();
		let json = serde_json::to_string(&account).unwrap();
		assert!(json.starts_with("\"0x"));
		assert_eq!(serde_json::from_str::<AccountId32>(&json).unwrap(), account);
		assert_eq!(format!("{:?}", AccountId32::new([0xab; 32])), "abababab…");
	}
}
