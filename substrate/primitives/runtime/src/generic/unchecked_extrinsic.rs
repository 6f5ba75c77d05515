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

//! Generic implementation of an unchecked (pre-verification) extrinsic.

use crate::{
	generic::CheckedExtrinsic,
	traits::{self, Checkable, Extrinsic, IdentifyAccount, Member, SignedExtension},
	transaction_validity::{InvalidTransaction, TransactionValidityError},
};
use alloc::vec::Vec;
use codec::{Compact, Decode, Encode, EncodeLike, Error, Input};
use core::fmt;
use sp_io::{hashing::blake2_256, Externalities};

/// Current version of the [`UncheckedExtrinsic`] encoded format.
///
/// This version needs to be bumped if the encoded representation changes.
/// It ensures that if the representation is changed and the format is not known,
/// the decoding fails.
pub const EXTRINSIC_FORMAT_VERSION: u8 = 4;

/// The `SignaturePayload` of `UncheckedExtrinsic`.
type UncheckedSignaturePayload<Address, Signature, Extra> = (Address, Signature, Extra);

/// An extrinsic right from the external world. This is unchecked and so can contain a signature.
///
/// The encoding is a compact length prefix followed by a version byte whose top bit marks a
/// signed extrinsic, the optional `(address, signature, extra)` triple, and finally the call.
#[derive(PartialEq, Eq, Clone)]
pub struct UncheckedExtrinsic<Address, Call, Signature, Extra>
where
	Extra: SignedExtension,
{
	/// The signature, address, number of extrinsics have come before from
	/// the same signer and an era describing the longevity of this transaction,
	/// if this is a signed extrinsic.
	pub signature: Option<UncheckedSignaturePayload<Address, Signature, Extra>>,
	/// The function that should be called.
	pub function: Call,
}

impl<Address, Call, Signature, Extra: SignedExtension>
	UncheckedExtrinsic<Address, Call, Signature, Extra>
{
	/// New instance of a signed extrinsic aka "transaction".
	pub fn new_signed(function: Call, signed: Address, signature: Signature, extra: Extra) -> Self {
		Self { signature: Some((signed, signature, extra)), function }
	}

	/// New instance of an unsigned extrinsic aka "inherent".
	pub fn new_unsigned(function: Call) -> Self {
		Self { signature: None, function }
	}
}

impl<Address, Call, Signature, Extra: SignedExtension> Extrinsic
	for UncheckedExtrinsic<Address, Call, Signature, Extra>
{
	type Call = Call;

	type SignaturePayload = UncheckedSignaturePayload<Address, Signature, Extra>;

	fn is_signed(&self) -> Option<bool> {
		Some(self.signature.is_some())
	}

	fn new(function: Call, signed_data: Option<Self::SignaturePayload>) -> Option<Self> {
		Some(if let Some((address, signature, extra)) = signed_data {
			Self::new_signed(function, address, signature, extra)
		} else {
			Self::new_unsigned(function)
		})
	}

	fn new_inherent(function: Call) -> Self {
		Self::new_unsigned(function)
	}

	fn call(&self) -> &Call {
		&self.function
	}
}

impl<LookupSource, AccountId, Call, Signature, Extra, Lookup> Checkable<Lookup>
	for UncheckedExtrinsic<LookupSource, Call, Signature, Extra>
where
	LookupSource: Member,
	Call: Encode + Member,
	Signature: Member + traits::Verify,
	<Signature as traits::Verify>::Signer: IdentifyAccount<AccountId = AccountId>,
	Extra: SignedExtension<AccountId = AccountId>,
	AccountId: Member,
	Lookup: traits::Lookup<Source = LookupSource, Target = AccountId>,
{
	type Checked = CheckedExtrinsic<AccountId, Call, Extra>;

	fn check(
		self,
		ext: &dyn Externalities,
		lookup: &Lookup,
	) -> Result<Self::Checked, TransactionValidityError> {
		Ok(match self.signature {
			Some((signed, signature, extra)) => {
				let signed = lookup.lookup(signed)?;
				let raw_payload = SignedPayload::new(ext, self.function, extra)?;
				if !raw_payload.using_encoded(|payload| signature.verify(payload, &signed)) {
					return Err(InvalidTransaction::BadProof.into())
				}

				let (function, extra, _) = raw_payload.deconstruct();
				CheckedExtrinsic { signed: Some((signed, extra)), function }
			},
			None => CheckedExtrinsic { signed: None, function: self.function },
		})
	}
}

/// A payload that has been signed for an unchecked extrinsics.
///
/// Note that the payload that we sign to produce unchecked extrinsic signature
/// is going to be different than the `SignaturePayload` - so the thing the extrinsic
/// actually contains.
pub struct SignedPayload<Call, Extra: SignedExtension>((Call, Extra, Extra::AdditionalSigned));

impl<Call, Extra> SignedPayload<Call, Extra>
where
	Call: Encode,
	Extra: SignedExtension,
{
	/// Create new `SignedPayload`.
	///
	/// This function may fail if `additional_signed` of `Extra` is not available.
	pub fn new(
		ext: &dyn Externalities,
		call: Call,
		extra: Extra,
	) -> Result<Self, TransactionValidityError> {
		let additional_signed = extra.additional_signed(ext)?;
		let raw_payload = (call, extra, additional_signed);
		Ok(Self(raw_payload))
	}

	/// Create new `SignedPayload` from raw components.
	pub fn from_raw(call: Call, extra: Extra, additional_signed: Extra::AdditionalSigned) -> Self {
		Self((call, extra, additional_signed))
	}

	/// Deconstruct the payload into it's components.
	pub fn deconstruct(self) -> (Call, Extra, Extra::AdditionalSigned) {
		self.0
	}
}

impl<Call, Extra> Encode for SignedPayload<Call, Extra>
where
	Call: Encode,
	Extra: SignedExtension,
{
	/// Get an encoded version of this payload.
	///
	/// Payloads longer than 256 bytes are going to be `blake2_256`-hashed.
	fn using_encoded<R, F: FnOnce(&[u8]) -> R>(&self, f: F) -> R {
		self.0.using_encoded(|payload| {
			if payload.len() > 256 {
				f(&blake2_256(payload)[..])
			} else {
				f(payload)
			}
		})
	}
}

impl<Call, Extra> EncodeLike for SignedPayload<Call, Extra>
where
	Call: Encode,
	Extra: SignedExtension,
{
}

impl<Address, Call, Signature, Extra> Decode for UncheckedExtrinsic<Address, Call, Signature, Extra>
where
	Address: Decode,
	Signature: Decode,
	Call: Decode,
	Extra: SignedExtension,
{
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		// This is a little more complicated than usual since the binary format must be compatible
		// with SCALE's generic `Vec<u8>` type. Basically this just means accepting that there
		// will be a prefix of vector length.
		let expected_length: Compact<u32> = Decode::decode(input)?;
		let before_length = input.remaining_len()?;

		let version = input.read_byte()?;

		let is_signed = version & 0b1000_0000 != 0;
		let version = version & 0b0111_1111;
		if version != EXTRINSIC_FORMAT_VERSION {
			return Err("Invalid transaction version".into())
		}

		let signature = is_signed.then(|| Decode::decode(input)).transpose()?;
		let function = Decode::decode(input)?;

		if let Some((before_length, after_length)) =
			input.remaining_len()?.and_then(|a| before_length.map(|b| (b, a)))
		{
			let length = before_length.saturating_sub(after_length);

			if length != expected_length.0 as usize {
				return Err("Invalid length prefix".into())
			}
		}

		Ok(Self { signature, function })
	}
}

impl<Address, Call, Signature, Extra> Encode for UncheckedExtrinsic<Address, Call, Signature, Extra>
where
	Address: Encode,
	Signature: Encode,
	Call: Encode,
	Extra: SignedExtension,
{
	fn encode(&self) -> Vec<u8> {
		let mut tmp = Vec::with_capacity(core::mem::size_of::<Self>());

		// 1 byte version id.
		match self.signature.as_ref() {
			Some(s) => {
				tmp.push(EXTRINSIC_FORMAT_VERSION | 0b1000_0000);
				s.encode_to(&mut tmp);
			},
			None => {
				tmp.push(EXTRINSIC_FORMAT_VERSION & 0b0111_1111);
			},
		}
		self.function.encode_to(&mut tmp);

		let compact_len = Compact::<u32>(tmp.len() as u32);

		// Allocate the output buffer with the correct length
		let mut output = Vec::with_capacity(compact_len.size_hint() + tmp.len());

		compact_len.encode_to(&mut output);
		output.extend(tmp);

		output
	}
}

impl<Address, Call, Signature, Extra> EncodeLike
	for UncheckedExtrinsic<Address, Call, Signature, Extra>
where
	Address: Encode,
	Signature: Encode,
	Call: Encode,
	Extra: SignedExtension,
{
}

impl<Address, Call, Signature, Extra> fmt::Debug
	for UncheckedExtrinsic<Address, Call, Signature, Extra>
where
	Address: fmt::Debug,
	Call: fmt::Debug,
	Extra: SignedExtension,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"UncheckedExtrinsic({:?}, {:?})",
			self.signature.as_ref().map(|x| (&x.0, &x.2)),
			self.function,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		traits::{DispatchInfoOf, Dispatchable, IdentityLookup, Verify},
		DispatchResultWithInfo,
	};
	use sp_io::TestExternalities;

	#[derive(Encode, Decode, Clone, Debug, PartialEq, Eq)]
	struct TestCall(Vec<u8>);

	impl Dispatchable for TestCall {
		type RuntimeOrigin = Option<u64>;
		type Info = ();
		type PostInfo = ();

		fn dispatch(
			self,
			_ext: &mut dyn Externalities,
			_origin: Self::RuntimeOrigin,
		) -> DispatchResultWithInfo<()> {
			Ok(())
		}
	}

	/// Signature that is valid when the signer matches and the message is the expected one.
	#[derive(Encode, Decode, Clone, Debug, PartialEq, Eq)]
	struct TestSig(u64, Vec<u8>);

	struct TestSigner;

	impl IdentifyAccount for TestSigner {
		type AccountId = u64;
		fn into_account(self) -> u64 {
			0
		}
	}

	impl Verify for TestSig {
		type Signer = TestSigner;
		fn verify(&self, msg: &[u8], signer: &u64) -> bool {
			*signer == self.0 && msg == &self.1[..]
		}
	}

	const KEY: &[u8] = b":extra_additional";

	#[derive(Debug, Encode, Decode, Clone, Eq, PartialEq, Ord, PartialOrd)]
	struct TestExtra;

	impl SignedExtension for TestExtra {
		const IDENTIFIER: &'static str = "TestExtra";
		type AccountId = u64;
		type Call = TestCall;
		type AdditionalSigned = u32;
		type Pre = ();

		fn additional_signed(
			&self,
			ext: &dyn Externalities,
		) -> Result<u32, TransactionValidityError> {
			ext.storage(KEY)
				.and_then(|v| u32::decode(&mut &v[..]).ok())
				.ok_or(InvalidTransaction::Stale.into())
		}

		fn pre_dispatch(
			self,
			_ext: &mut dyn Externalities,
			_who: &u64,
			_call: &TestCall,
			_info: &DispatchInfoOf<TestCall>,
			_len: usize,
		) -> Result<(), TransactionValidityError> {
			Ok(())
		}
	}

	type Ex = UncheckedExtrinsic<u64, TestCall, TestSig, TestExtra>;
	type CEx = CheckedExtrinsic<u64, TestCall, TestExtra>;

	fn new_test_ext() -> TestExternalities {
		let mut t = TestExternalities::new_empty();
		t.insert(KEY.to_vec(), 7u32.encode());
		t
	}

	#[test]
	fn unsigned_codec_should_work() {
		let ux = Ex::new_unsigned(TestCall(vec![0u8; 0]));
		let encoded = ux.encode();
		assert_eq!(Ex::decode(&mut &encoded[..]), Ok(ux));
	}

	#[test]
	fn invalid_length_prefix_is_detected() {
		let ux = Ex::new_unsigned(TestCall(vec![0u8; 0]));
		let mut encoded = ux.encode();

		let length = Compact::<u32>::decode(&mut &encoded[..]).unwrap();
		Compact(length.0 + 10).encode_to(&mut &mut encoded[..1]);

		assert_eq!(Ex::decode(&mut &encoded[..]), Err("Invalid length prefix".into()));
	}

	#[test]
	fn unknown_version_is_rejected() {
		let mut encoded = Ex::new_unsigned(TestCall(vec![1])).encode();
		encoded[1] = 3;
		assert_eq!(Ex::decode(&mut &encoded[..]), Err("Invalid transaction version".into()));
	}

	#[test]
	fn signed_codec_should_work() {
		let ux = Ex::new_signed(TestCall(vec![0u8; 0]), 1, TestSig(1, vec![1]), TestExtra);
		let encoded = ux.encode();
		assert_eq!(encoded[1], EXTRINSIC_FORMAT_VERSION | 0b1000_0000);
		assert_eq!(Ex::decode(&mut &encoded[..]), Ok(ux));
		assert_eq!(Ex::decode(&mut &encoded[..]).unwrap().is_signed(), Some(true));
	}

	#[test]
	fn large_signed_codec_should_work() {
		let ux = Ex::new_signed(TestCall(vec![0u8; 257]), 1, TestSig(1, vec![1]), TestExtra);
		let encoded = ux.encode();
		assert_eq!(Ex::decode(&mut &encoded[..]), Ok(ux));
	}

	#[test]
	fn encoding_matches_vec() {
		let ex = Ex::new_unsigned(TestCall(vec![0u8; 0]));
		let encoded = ex.encode();
		let decoded = Ex::decode(&mut encoded.as_slice()).unwrap();
		assert_eq!(decoded, ex);
		let as_vec: Vec<u8> = Decode::decode(&mut encoded.as_slice()).unwrap();
		assert_eq!(as_vec.encode(), encoded);
	}

	#[test]
	fn unsigned_check_should_work() {
		let ux = Ex::new_unsigned(TestCall(vec![0u8; 0]));
		assert!(!ux.is_signed().unwrap_or(false));
		new_test_ext().execute_with(|ext| {
			assert!(<Ex as Checkable<IdentityLookup<u64>>>::check(
				ux,
				ext,
				&Default::default()
			)
			.is_ok());
		});
	}

	#[test]
	fn badly_signed_check_should_fail() {
		let ux = Ex::new_signed(TestCall(vec![0u8; 0]), 1, TestSig(1, vec![0u8; 0]), TestExtra);
		assert!(ux.is_signed().unwrap_or(false));
		new_test_ext().execute_with(|ext| {
			assert_eq!(
				<Ex as Checkable<IdentityLookup<u64>>>::check(ux, ext, &Default::default()),
				Err(InvalidTransaction::BadProof.into()),
			);
		});
	}

	#[test]
	fn signed_check_should_work() {
		let payload = (TestCall(vec![0u8; 0]), TestExtra, 7u32).encode();
		let ux = Ex::new_signed(TestCall(vec![0u8; 0]), 1, TestSig(1, payload), TestExtra);
		new_test_ext().execute_with(|ext| {
			assert_eq!(
				<Ex as Checkable<IdentityLookup<u64>>>::check(ux, ext, &Default::default()),
				Ok(CEx { signed: Some((1, TestExtra)), function: TestCall(vec![0u8; 0]) }),
			);
		});
	}

	#[test]
	fn missing_additional_signed_data_is_reported() {
		let ux = Ex::new_signed(TestCall(vec![]), 1, TestSig(1, vec![]), TestExtra);
		TestExternalities::new_empty().execute_with(|ext| {
			assert_eq!(
				<Ex as Checkable<IdentityLookup<u64>>>::check(ux, ext, &Default::default()),
				Err(InvalidTransaction::Stale.into()),
			);
		});
	}

	#[test]
	fn long_payloads_are_signed_by_hash() {
		let call = TestCall(vec![1u8; 300]);
		let payload = SignedPayload::from_raw(call.clone(), TestExtra, 7u32);
		let raw = (call, TestExtra, 7u32).encode();
		payload.using_encoded(|signed| assert_eq!(signed, &blake2_256(&raw)[..]));
	}
}
