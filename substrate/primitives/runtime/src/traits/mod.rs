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

//! Primitive traits for the runtime.

use crate::{
	generic::Digest,
	transaction_validity::{
		TransactionSource, TransactionValidity, TransactionValidityError, UnknownTransaction,
	},
	DispatchResultWithInfo, MultiAddress,
};
use alloc::vec::Vec;
use codec::{Codec, Decode, Encode, FullCodec, HasCompact, MaxEncodedLen};
use core::{fmt::Debug, marker::PhantomData};
use scale_info::TypeInfo;
use sp_io::Externalities;

pub use sp_arithmetic::traits::{
	AtLeast32Bit, AtLeast32BitUnsigned, BaseArithmetic, Bounded, CheckedAdd, CheckedDiv,
	CheckedMul, CheckedSub, One, SaturatedConversion, Saturating, UniqueSaturatedFrom,
	UniqueSaturatedInto, Zero,
};

mod signed_extension;

pub use signed_extension::SignedExtension;

/// A trait for querying a single value from a type.
///
/// It is not required that the value is constant.
pub trait Get<T> {
	/// Return the current value.
	fn get() -> T;
}

impl<T: Default> Get<T> for () {
	fn get() -> T {
		T::default()
	}
}

macro_rules! impl_const_get {
	($name:ident, $t:ty) => {
		/// Const getter for a basic type.
		#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
		pub struct $name<const T: $t>;

		impl<const T: $t> Get<$t> for $name<T> {
			fn get() -> $t {
				T
			}
		}

		impl<const T: $t> Get<Option<$t>> for $name<T> {
			fn get() -> Option<$t> {
				Some(T)
			}
		}
	};
}

impl_const_get!(ConstBool, bool);
impl_const_get!(ConstU8, u8);
impl_const_get!(ConstU16, u16);
impl_const_get!(ConstU32, u32);
impl_const_get!(ConstU64, u64);
impl_const_get!(ConstU128, u128);

/// A type that can be used in runtime structures.
pub trait Member: Send + Sync + Sized + Debug + Eq + PartialEq + Clone + 'static {}
impl<T: Send + Sync + Sized + Debug + Eq + PartialEq + Clone + 'static> Member for T {}

/// A type that implements Serialize, DeserializeOwned and Debug when in std environment.
#[cfg(feature = "std")]
pub trait MaybeSerializeDeserialize: Debug + serde::Serialize + serde::de::DeserializeOwned {}
#[cfg(feature = "std")]
impl<T: Debug + serde::Serialize + serde::de::DeserializeOwned> MaybeSerializeDeserialize for T {}

/// A type that implements Serialize, DeserializeOwned and Debug when in std environment.
#[cfg(not(feature = "std"))]
pub trait MaybeSerializeDeserialize {}
#[cfg(not(feature = "std"))]
impl<T> MaybeSerializeDeserialize for T {}

/// Abstraction around hashing.
pub trait Hash: 'static + Debug + Clone + Eq + PartialEq + Send + Sync {
	/// The hash type produced.
	type Output: Member
		+ Ord
		+ Default
		+ Copy
		+ core::hash::Hash
		+ AsRef<[u8]>
		+ AsMut<[u8]>
		+ Codec
		+ TypeInfo
		+ MaxEncodedLen;

	/// Produce the hash of some byte-slice.
	fn hash(s: &[u8]) -> Self::Output;

	/// Produce the hash of some codec-encodable value.
	fn hash_of<S: Encode>(s: &S) -> Self::Output {
		Encode::using_encoded(s, Self::hash)
	}

	/// The root committing to an ordered list of values, such as the extrinsics of a block.
	fn ordered_trie_root(input: Vec<Vec<u8>>) -> Self::Output {
		Self::hash_of(&input)
	}
}

/// Blake2-256 Hash implementation.
#[derive(PartialEq, Eq, Clone, Debug, TypeInfo)]
pub struct BlakeTwo256;

impl Hash for BlakeTwo256 {
	type Output = primitive_types::H256;

	fn hash(s: &[u8]) -> Self::Output {
		sp_io::hashing::blake2_256(s).into()
	}
}

/// Super trait with all the attributes for a block number.
pub trait BlockNumber:
	Member
	+ Copy
	+ Default
	+ core::hash::Hash
	+ AtLeast32BitUnsigned
	+ FullCodec
	+ HasCompact
	+ MaxEncodedLen
	+ TypeInfo
{
}

impl<
		T: Member
			+ Copy
			+ Default
			+ core::hash::Hash
			+ AtLeast32BitUnsigned
			+ FullCodec
			+ HasCompact
			+ MaxEncodedLen
			+ TypeInfo,
	> BlockNumber for T
{
}

/// Something which fulfills the abstract idea of a Substrate header. It has types for a `Number`,
/// a `Hash` and a `Hashing`. It provides access to an `extrinsics_root`, `state_root` and
/// `parent_hash`, as well as a `digest` and a block `number`.
pub trait Header: Clone + Send + Sync + Codec + Eq + Debug + TypeInfo + 'static {
	/// Header number.
	type Number: BlockNumber;
	/// Header hash type
	type Hash: Member
		+ Ord
		+ Default
		+ Copy
		+ core::hash::Hash
		+ AsRef<[u8]>
		+ AsMut<[u8]>
		+ Codec
		+ TypeInfo
		+ MaxEncodedLen;
	/// Hashing algorithm
	type Hashing: Hash<Output = Self::Hash>;

	/// Creates new header.
	fn new(
		number: Self::Number,
		extrinsics_root: Self::Hash,
		state_root: Self::Hash,
		parent_hash: Self::Hash,
		digest: Digest,
	) -> Self;

	/// Returns a reference to the header number.
	fn number(&self) -> &Self::Number;
	/// Sets the header number.
	fn set_number(&mut self, number: Self::Number);

	/// Returns a reference to the extrinsics root.
	fn extrinsics_root(&self) -> &Self::Hash;
	/// Sets the extrinsic root.
	fn set_extrinsics_root(&mut self, root: Self::Hash);

	/// Returns a reference to the state root.
	fn state_root(&self) -> &Self::Hash;
	/// Sets the state root.
	fn set_state_root(&mut self, root: Self::Hash);

	/// Returns a reference to the parent hash.
	fn parent_hash(&self) -> &Self::Hash;
	/// Sets the parent hash.
	fn set_parent_hash(&mut self, hash: Self::Hash);

	/// Returns a reference to the digest.
	fn digest(&self) -> &Digest;
	/// Get a mutable reference to the digest.
	fn digest_mut(&mut self) -> &mut Digest;

	/// Returns the hash of the header.
	fn hash(&self) -> Self::Hash {
		<Self::Hashing as Hash>::hash_of(self)
	}
}

/// Something which fulfills the abstract idea of a Substrate block. It has types for
/// `Extrinsic` pieces of information as well as a `Header`.
pub trait Block: Clone + Send + Sync + Codec + Eq + Debug + 'static {
	/// Type for extrinsics.
	type Extrinsic: Member + Codec + Extrinsic;
	/// Header type.
	type Header: Header<Hash = Self::Hash>;
	/// Block hash type.
	type Hash: Member
		+ Ord
		+ Default
		+ Copy
		+ core::hash::Hash
		+ AsRef<[u8]>
		+ AsMut<[u8]>
		+ Codec
		+ TypeInfo
		+ MaxEncodedLen;

	/// Returns a reference to the header.
	fn header(&self) -> &Self::Header;
	/// Returns a reference to the list of extrinsics.
	fn extrinsics(&self) -> &[Self::Extrinsic];
	/// Split the block into header and list of extrinsics.
	fn deconstruct(self) -> (Self::Header, Vec<Self::Extrinsic>);
	/// Creates new block from header and extrinsics.
	fn new(header: Self::Header, extrinsics: Vec<Self::Extrinsic>) -> Self;
	/// Returns the hash of the block.
	fn hash(&self) -> Self::Hash {
		<<Self::Header as Header>::Hashing as Hash>::hash_of(self.header())
	}
}

/// Something that acts like an `Extrinsic`.
pub trait Extrinsic: Sized {
	/// The function call.
	type Call;

	/// The payload we carry for signed extrinsics.
	///
	/// Usually it will contain a `Signature` and
	/// may include some additional data that are specific to signed
	/// extrinsics.
	type SignaturePayload;

	/// Is this `Extrinsic` signed?
	/// If no information are available about signed/unsigned, `None` should be returned.
	fn is_signed(&self) -> Option<bool> {
		None
	}

	/// Create new instance of the extrinsic.
	///
	/// Extrinsics can be split into:
	/// 1. Inherents (no signature; created by validators during block production)
	/// 2. Unsigned Transactions (no signature; represent "system calls" or other special kinds of
	/// calls) 3. Signed Transactions (with signature; a regular transactions with known origin)
	fn new(call: Self::Call, signed_data: Option<Self::SignaturePayload>) -> Option<Self>;

	/// Create an unsigned extrinsic carrying an inherent call.
	fn new_inherent(call: Self::Call) -> Self;

	/// The call carried by this extrinsic.
	fn call(&self) -> &Self::Call;
}

/// A "checkable" piece of information, used by the standard Substrate Executive in order to
/// check the validity of a piece of extrinsic information, usually by verifying the signature.
/// Implement for pieces of information that require some additional context `Context` in order to
/// be checked.
pub trait Checkable<Context>: Sized {
	/// Returned if `check` succeeds.
	type Checked;

	/// Check self, given an instance of Context.
	fn check(
		self,
		ext: &dyn Externalities,
		c: &Context,
	) -> Result<Self::Checked, TransactionValidityError>;
}

/// An "executable" piece of information, used by the standard Substrate Executive in order to
/// enact a piece of extrinsic information by marshalling and dispatching to a named function
/// call.
///
/// Also provides information on to whom this information is attributable and an index that allows
/// each piece of attributable information to be disambiguated.
pub trait Applyable: Sized + Send + Sync {
	/// Type by which we can dispatch. Restricts the `UnsignedValidator` type.
	type Call: Dispatchable;

	/// Checks to see if this is a valid *transaction*. It returns information on it if so.
	fn validate<V: ValidateUnsigned<Call = Self::Call>>(
		&self,
		ext: &dyn Externalities,
		source: TransactionSource,
		info: &DispatchInfoOf<Self::Call>,
		len: usize,
	) -> TransactionValidity;

	/// Executes all necessary logic needed prior to dispatch and deconstructs into function call,
	/// index and sender.
	fn apply<V: ValidateUnsigned<Call = Self::Call>>(
		self,
		ext: &mut dyn Externalities,
		info: &DispatchInfoOf<Self::Call>,
		len: usize,
	) -> crate::ApplyExtrinsicResultWithInfo<PostDispatchInfoOf<Self::Call>>;
}

/// A lazy call (module function and argument values) that can be executed via its `dispatch`
/// method.
pub trait Dispatchable {
	/// Every function call from your runtime has an origin, which specifies where the extrinsic
	/// was generated from. In the case of a signed extrinsic (transaction), the origin contains an
	/// identifier for the caller. The origin can be empty in the case of an inherent extrinsic.
	type RuntimeOrigin: Debug;
	/// An opaque set of information attached to the transaction. This could be constructed anywhere
	/// down the line in a runtime. The current Substrate runtime uses a struct with the same name
	/// to represent the dispatch class and weight.
	type Info;
	/// Additional information that is returned by `dispatch`. Can be used to supply the caller
	/// with information about a `Dispatchable` that is only known post dispatch.
	type PostInfo: Eq + PartialEq + Clone + Copy + Encode + Decode;
	/// Actually dispatch this call and return the result of it.
	fn dispatch(
		self,
		ext: &mut dyn Externalities,
		origin: Self::RuntimeOrigin,
	) -> DispatchResultWithInfo<Self::PostInfo>;
}

/// Shortcut to reference the `Info` type of a `Dispatchable`.
pub type DispatchInfoOf<T> = <T as Dispatchable>::Info;
/// Shortcut to reference the `PostInfo` type of a `Dispatchable`.
pub type PostDispatchInfoOf<T> = <T as Dispatchable>::PostInfo;

/// Provide validation for unsigned extrinsics.
///
/// This trait provides two functions [`pre_dispatch`](Self::pre_dispatch) and
/// [`validate_unsigned`](Self::validate_unsigned). The [`pre_dispatch`](Self::pre_dispatch)
/// function is called right before dispatching the call wrapped by an unsigned extrinsic. The
/// [`validate_unsigned`](Self::validate_unsigned) function is mainly being used in the context of
/// the transaction pool to check the validity of the call wrapped by an unsigned extrinsic.
pub trait ValidateUnsigned {
	/// The call to validate
	type Call;

	/// Validate the call right before dispatch.
	///
	/// By default it runs the same checks as [`Self::validate_unsigned`]; a runtime that knows
	/// no unsigned validator for a call may let it through here and leave the decision to the
	/// call's own origin check.
	fn pre_dispatch(
		ext: &dyn Externalities,
		call: &Self::Call,
	) -> Result<(), TransactionValidityError> {
		Self::validate_unsigned(ext, TransactionSource::InBlock, call)
			.map(|_| ())
			.map_err(Into::into)
	}

	/// Return the validity of the call
	///
	/// This method has no side-effects. It merely checks whether the call would be rejected
	/// by the runtime in an unsigned extrinsic.
	fn validate_unsigned(
		ext: &dyn Externalities,
		source: TransactionSource,
		call: &Self::Call,
	) -> TransactionValidity;
}

/// An error type that indicates that the origin is invalid.
#[derive(Encode, Decode, Debug, PartialEq, Eq)]
pub struct BadOrigin;

impl From<BadOrigin> for &'static str {
	fn from(_: BadOrigin) -> &'static str {
		"Bad origin"
	}
}

/// An error that indicates that a lookup failed.
#[derive(Encode, Decode, Debug, PartialEq, Eq)]
pub struct LookupError;

impl From<LookupError> for &'static str {
	fn from(_: LookupError) -> &'static str {
		"Can not lookup"
	}
}

impl From<LookupError> for TransactionValidityError {
	fn from(_: LookupError) -> Self {
		UnknownTransaction::CannotLookup.into()
	}
}

/// Means of changing one type into another in a manner dependent on the source type.
pub trait Lookup {
	/// Type to lookup from.
	type Source;
	/// Type to lookup into.
	type Target;
	/// Attempt a lookup.
	fn lookup(&self, s: Self::Source) -> Result<Self::Target, LookupError>;
}

/// Means of changing one type into another in a manner dependent on the source type.
/// This variant is different to `Lookup` in that it doesn't (can cannot) require any
/// context.
pub trait StaticLookup {
	/// Type to lookup from.
	type Source: Codec + Clone + PartialEq + Eq + Debug + TypeInfo;
	/// Type to lookup into.
	type Target;
	/// Attempt a lookup.
	fn lookup(s: Self::Source) -> Result<Self::Target, LookupError>;
	/// Convert from Target back to Source.
	fn unlookup(t: Self::Target) -> Self::Source;
}

/// A lookup implementation returning the input value.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct IdentityLookup<T>(PhantomData<T>);

impl<T: Codec + Clone + Eq + Debug + TypeInfo> StaticLookup for IdentityLookup<T> {
	type Source = T;
	type Target = T;
	fn lookup(x: T) -> Result<T, LookupError> {
		Ok(x)
	}
	fn unlookup(x: T) -> T {
		x
	}
}

impl<T> Lookup for IdentityLookup<T> {
	type Source = T;
	type Target = T;
	fn lookup(&self, x: T) -> Result<T, LookupError> {
		Ok(x)
	}
}

/// A lookup implementation returning the `AccountId` from a `MultiAddress`.
pub struct AccountIdLookup<AccountId, AccountIndex>(PhantomData<(AccountId, AccountIndex)>);

impl<AccountId, AccountIndex> StaticLookup for AccountIdLookup<AccountId, AccountIndex>
where
	AccountId: Codec + Clone + Eq + Debug + TypeInfo + 'static,
	AccountIndex: HasCompact + Codec + Clone + Eq + Debug + TypeInfo + 'static,
{
	type Source = MultiAddress<AccountId, AccountIndex>;
	type Target = AccountId;

	fn lookup(x: Self::Source) -> Result<Self::Target, LookupError> {
		match x {
			MultiAddress::Id(i) => Ok(i),
			_ => Err(LookupError),
		}
	}

	fn unlookup(x: Self::Target) -> Self::Source {
		MultiAddress::Id(x)
	}
}

/// Some type that is able to be collapsed into an account ID. It is not possible to recreate the
/// original value from the account ID.
pub trait IdentifyAccount {
	/// The account ID that this can be transformed into.
	type AccountId;
	/// Transform into an account.
	fn into_account(self) -> Self::AccountId;
}

/// Means of signature verification.
pub trait Verify {
	/// Type of the signer.
	type Signer: IdentifyAccount;

	/// Verify a signature.
	///
	/// Return `true` if signature is valid for the value.
	fn verify(
		&self,
		msg: &[u8],
		signer: &<Self::Signer as IdentifyAccount>::AccountId,
	) -> bool;
}

/// Extensible conversion trait. Generic over both source and destination types.
pub trait Convert<A, B> {
	/// Make conversion.
	fn convert(a: A) -> B;
}

impl<A, B: Default> Convert<A, B> for () {
	fn convert(_: A) -> B {
		Default::default()
	}
}

/// A structure that performs identity conversion.
pub struct Identity;

impl<T> Convert<T, T> for Identity {
	fn convert(a: T) -> T {
		a
	}
}
