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

//! # System Module
//!
//! The System module provides low-level access to core types and cross-cutting utilities.
//! It acts as the base layer for other modules to interact with the runtime and the block
//! under construction.
//!
//! ## Overview
//!
//! The System module defines the core data types used in a runtime. It also provides several
//! utility functions for other modules.
//!
//! In addition, it manages the storage items for extrinsic data, indices, event records, and
//! digest items, among other things that support the execution of the current block.
//!
//! It also handles low-level tasks like depositing logs, basic set up and take down of temporary
//! storage entries, and access to previous block hashes.
//!
//! Every function that touches state receives the storage handle it should work on: read-only
//! paths take `&dyn Externalities`, mutating paths `&mut dyn Externalities`.
//!
//! ### Dispatchable Functions
//!
//! - `remark`: make some on-chain remark.
//! - `remark_with_event`: make some on-chain remark and emit an event.
//! - `set_code`: set the new runtime code.
//! - `set_storage`, `kill_storage`, `kill_prefix`: raw storage surgery, root only.
//! - `authorize_upgrade`, `apply_authorized_upgrade`: two-step code upgrade where anyone may
//!   supply the code once root has authorized its hash.
//!
//! ### Signed Extensions
//!
//! The System module defines the following extensions:
//!
//!   - [`CheckWeight`]: Checks the weight and length of the block and ensure that it does not
//!     exceed the limits.
//!   - [`CheckNonce`]: Checks the nonce of the transaction. Contains a single payload of type
//!     `T::Nonce`.
//!   - [`CheckMortality`]: Checks the mortality of the transaction. The extension's payload is
//!     an [`Era`](sp_runtime::generic::Era) and it signs the hash of the era's birth block.
//!   - [`CheckGenesis`]: Checks the provided genesis hash of the transaction. Must be a part of
//!     the signed payload of the transaction.
//!   - [`CheckSpecVersion`]: Checks that the runtime version is the same as the one used to sign
//!     the transaction.
//!   - [`CheckTxVersion`]: Checks that the transaction version is the same as the one used to
//!     sign the transaction.
//!   - [`CheckNonZeroSender`]: Rejects transactions signed by the all-zero account.
//!
//! Lookup the runtime aggregator file (e.g. `node/runtime`) to see the full list of signed
//! extensions included in a chain.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::{borrow::Cow, vec, vec::Vec};
use codec::{Decode, Encode, HasCompact, MaxEncodedLen};
use core::{fmt::Debug, marker::PhantomData};
use frame_support::{
	dispatch::{
		extract_actual_pays_fee, extract_actual_weight, DispatchClass, DispatchInfo,
		DispatchResultWithPostInfo, GetDispatchInfo, Pays, PerDispatchClass, PostDispatchInfo,
		UnfilteredDispatchable,
	},
	ensure,
	storage::unhashed,
	storage_prefix,
	traits::{
		OnFinalize, OnIdle, OnInitialize, OnKilledAccount, OnNewAccount, OnRuntimeUpgrade,
		PalletInfo, StoredMap,
	},
	Blake2_128Concat, Never, Parameter, StorageMap, StorageValue, Twox64Concat, ValueQuery,
};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_io::Externalities;
use sp_runtime::{
	generic,
	traits::{
		AtLeast32Bit, BadOrigin, Block as BlockT, Dispatchable, Get, Hash as HashT,
		Header as HeaderT, Lookup, LookupError, MaybeSerializeDeserialize, Member, One,
		Saturating, StaticLookup, ValidateUnsigned, Zero,
	},
	transaction_validity::{
		InvalidTransaction, TransactionLongevity, TransactionSource, TransactionValidity,
		TransactionValidityError, UnknownTransaction, ValidTransaction,
	},
	version::RuntimeVersion,
	weights::RuntimeDbWeight,
	DispatchError, DispatchResult, Weight,
};

#[cfg(feature = "std")]
use sp_runtime::BuildStorage;

pub use frame_support::dispatch::RawOrigin;

mod extensions;
pub mod limits;
#[cfg(test)]
pub(crate) mod mock;
pub mod weights;

#[cfg(test)]
mod tests;

pub use extensions::{
	check_genesis::CheckGenesis, check_mortality::CheckMortality,
	check_non_zero_sender::CheckNonZeroSender, check_nonce::CheckNonce,
	check_spec_version::CheckSpecVersion, check_tx_version::CheckTxVersion,
	check_weight::CheckWeight,
};
pub use extensions::check_weight::calculate_consumed_weight;
pub use weights::WeightInfo;

const LOG_TARGET: &str = "runtime::system";

/// Storage keys with a meaning fixed outside of any module.
pub mod well_known_keys {
	/// Wasm code of the runtime.
	pub const CODE: &[u8] = b":code";

	/// Current extrinsic index (u32) is stored under this key.
	pub const EXTRINSIC_INDEX: &[u8] = b":extrinsic_index";
}

/// Compute the trie root of a list of extrinsics.
///
/// The merkle proof is using the same trie as runtime state with
/// `state_version` 0.
pub fn extrinsics_root<H: HashT, E: codec::Encode>(extrinsics: &[E]) -> H::Output {
	extrinsics_data_root::<H>(extrinsics.iter().map(codec::Encode::encode).collect())
}

/// Compute the trie root of a list of extrinsics.
pub fn extrinsics_data_root<H: HashT>(xts: Vec<Vec<u8>>) -> H::Output {
	H::ordered_trie_root(xts)
}

/// An object to track the currently used extrinsic weight in a block.
pub type ConsumedWeight = PerDispatchClass<Weight>;

/// Type used to encode the number of references an account has.
pub type RefCount = u32;

/// The header type of the configured block.
pub type HeaderFor<T> = <<T as Config>::Block as BlockT>::Header;

/// The block number type of the configured block.
pub type BlockNumberFor<T> = <HeaderFor<T> as HeaderT>::Number;

/// The origin a dispatchable of a runtime configured with `T` is called with.
pub type OriginFor<T> = RawOrigin<<T as Config>::AccountId>;

/// A raw storage key.
pub type Key = Vec<u8>;

/// A raw storage key together with its value.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// System configuration trait. Implemented by runtime.
pub trait Config: 'static + Eq + Clone + Debug + Send + Sync {
	/// The aggregated `RuntimeCall` type.
	type RuntimeCall: Parameter
		+ Member
		+ Dispatchable<
			RuntimeOrigin = OriginFor<Self>,
			Info = DispatchInfo,
			PostInfo = PostDispatchInfo,
		> + GetDispatchInfo;

	/// The aggregated event type of the runtime.
	type RuntimeEvent: Parameter + Member + From<Event<Self>>;

	/// This stores the number of previous transactions associated with a sender account.
	type Nonce: Parameter
		+ Member
		+ HasCompact
		+ MaybeSerializeDeserialize
		+ Default
		+ AtLeast32Bit
		+ Copy
		+ MaxEncodedLen;

	/// The output of the `Hashing` function.
	type Hash: Parameter
		+ Member
		+ Ord
		+ Default
		+ Copy
		+ core::hash::Hash
		+ AsRef<[u8]>
		+ AsMut<[u8]>
		+ MaxEncodedLen;

	/// The hashing system (algorithm) being used in the runtime (e.g. Blake2).
	type Hashing: HashT<Output = Self::Hash> + TypeInfo;

	/// The user account identifier type for the runtime.
	type AccountId: Parameter + Member + MaybeSerializeDeserialize + Ord + MaxEncodedLen;

	/// Converting trait to take a source type and convert to `AccountId`.
	///
	/// Used to define the type and conversion mechanism for referencing accounts in
	/// transactions. It's perfectly reasonable for this to be an identity conversion (with the
	/// source type being `AccountId`), but other modules (e.g. Indices module) may provide more
	/// functional/efficient alternatives.
	type Lookup: StaticLookup<Target = Self::AccountId>;

	/// The Block type used by the runtime. This is used by the executive to decode and execute
	/// blocks.
	type Block: BlockT<Hash = Self::Hash>;

	/// Maximum number of block number to block hash mappings to keep (oldest pruned first).
	type BlockHashCount: Get<BlockNumberFor<Self>>;

	/// Block & extrinsics weights: base values and limits.
	type BlockWeights: Get<limits::BlockWeights>;

	/// The maximum length of a block (in bytes).
	type BlockLength: Get<limits::BlockLength>;

	/// The weight of runtime database operations the runtime can invoke.
	type DbWeight: Get<RuntimeDbWeight>;

	/// Get the chain's in-code version.
	type Version: Get<RuntimeVersion>;

	/// Provides information about the modules setup in the runtime.
	///
	/// Expected to be generated for the whole runtime: every module knows its own index.
	type PalletInfo: PalletInfo;

	/// Data to be associated with an account (other than nonce/transaction counter, which this
	/// module does regardless).
	type AccountData: Member + codec::FullCodec + Clone + Default + TypeInfo + MaxEncodedLen;

	/// Handler for when a new account has just been created.
	type OnNewAccount: OnNewAccount<Self::AccountId>;

	/// A function that is invoked when an account has been determined to be dead.
	///
	/// All resources should be cleaned up associated with the given account.
	type OnKilledAccount: OnKilledAccount<Self::AccountId>;

	/// Weight information for the extrinsics of this module.
	type SystemWeightInfo: WeightInfo;
}

/// Information of an account.
#[derive(Clone, Eq, PartialEq, Default, Debug, Encode, Decode, TypeInfo, MaxEncodedLen)]
pub struct AccountInfo<Nonce, AccountData> {
	/// The number of transactions this account has sent.
	pub nonce: Nonce,
	/// The number of other modules that currently depend on this account's existence. The account
	/// cannot be reaped until this is zero.
	pub consumers: RefCount,
	/// The number of other modules that allow this account to exist. The account may not be reaped
	/// until this and `sufficients` are both zero.
	pub providers: RefCount,
	/// The number of modules that allow this account to exist for their own purposes only. The
	/// account may not be reaped until this and `providers` are both zero.
	pub sufficients: RefCount,
	/// The additional data that belongs to this account. Used to store the balance(s) in a lot of
	/// chains.
	pub data: AccountData,
}

/// A phase of a block's execution.
#[derive(Encode, Decode, Debug, TypeInfo, MaxEncodedLen, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum Phase {
	/// Applying an extrinsic.
	ApplyExtrinsic(u32),
	/// Finalizing the block.
	Finalization,
	/// Initializing the block.
	Initialization,
}

impl Default for Phase {
	fn default() -> Self {
		Self::Initialization
	}
}

/// Record of an event happening.
#[derive(Encode, Decode, Debug, TypeInfo, PartialEq, Eq, Clone)]
pub struct EventRecord<E: Parameter + Member, T> {
	/// The phase of the block it happened in.
	pub phase: Phase,
	/// The event itself.
	pub event: E,
	/// The list of the topics this event has.
	pub topics: Vec<T>,
}

/// Stores the `spec_version` and `spec_name` of when the last runtime upgrade happened.
#[derive(Encode, Decode, Debug, TypeInfo, PartialEq, Eq, Clone)]
pub struct LastRuntimeUpgradeInfo {
	pub spec_version: codec::Compact<u32>,
	pub spec_name: Cow<'static, str>,
}

impl LastRuntimeUpgradeInfo {
	/// Returns if the runtime was upgraded in comparison of `self` and `current`.
	///
	/// Checks if either the `spec_version` increased or the `spec_name` changed.
	pub fn was_upgraded(&self, current: &RuntimeVersion) -> bool {
		current.is_upgrade_from(self.spec_version.0, &self.spec_name)
	}
}

impl From<RuntimeVersion> for LastRuntimeUpgradeInfo {
	fn from(version: RuntimeVersion) -> Self {
		Self { spec_version: version.spec_version.into(), spec_name: version.spec_name }
	}
}

/// Reference status; can be either referenced or unreferenced.
#[derive(Debug, Eq, PartialEq)]
pub enum RefStatus {
	Referenced,
	Unreferenced,
}

/// Some resultant status relevant to incrementing a provider/self-sufficient reference.
#[derive(Eq, PartialEq, Debug)]
pub enum IncRefStatus {
	/// Account was created.
	Created,
	/// Account already existed.
	Existed,
}

/// Some resultant status relevant to decrementing a provider/self-sufficient reference.
#[derive(Eq, PartialEq, Debug)]
pub enum DecRefStatus {
	/// Account was destroyed.
	Reaped,
	/// Account still exists.
	Exists,
}

storage_prefix! {
	pub AccountPrefix => ("System", "Account");
	pub ExtrinsicCountPrefix => ("System", "ExtrinsicCount");
	pub BlockWeightPrefix => ("System", "BlockWeight");
	pub AllExtrinsicsLenPrefix => ("System", "AllExtrinsicsLen");
	pub BlockHashPrefix => ("System", "BlockHash");
	pub ExtrinsicDataPrefix => ("System", "ExtrinsicData");
	pub NumberPrefix => ("System", "Number");
	pub ParentHashPrefix => ("System", "ParentHash");
	pub DigestPrefix => ("System", "Digest");
	pub EventsPrefix => ("System", "Events");
	pub EventCountPrefix => ("System", "EventCount");
	pub LastRuntimeUpgradePrefix => ("System", "LastRuntimeUpgrade");
	pub ExecutionPhasePrefix => ("System", "ExecutionPhase");
	pub AuthorizedUpgradePrefix => ("System", "AuthorizedUpgrade");
}

/// The full account information for a particular account ID.
pub type Account<T> = StorageMap<
	AccountPrefix,
	Blake2_128Concat,
	<T as Config>::AccountId,
	AccountInfo<<T as Config>::Nonce, <T as Config>::AccountData>,
	ValueQuery,
>;

/// Total extrinsics count for the current block.
pub type ExtrinsicCount = StorageValue<ExtrinsicCountPrefix, u32>;

/// The current weight for the block.
pub type BlockWeight = StorageValue<BlockWeightPrefix, ConsumedWeight, ValueQuery>;

/// Total length (in bytes) for all extrinsics put together, for the current block.
pub type AllExtrinsicsLen = StorageValue<AllExtrinsicsLenPrefix, u32>;

/// Map of block numbers to block hashes.
pub type BlockHash<T> =
	StorageMap<BlockHashPrefix, Twox64Concat, BlockNumberFor<T>, <T as Config>::Hash, ValueQuery>;

/// Extrinsics data for the current block (maps an extrinsic's index to its data).
pub type ExtrinsicData = StorageMap<ExtrinsicDataPrefix, Twox64Concat, u32, Vec<u8>, ValueQuery>;

/// The current block number being processed. Set by `execute_block`.
pub type Number<T> = StorageValue<NumberPrefix, BlockNumberFor<T>, ValueQuery>;

/// Hash of the previous block.
pub type ParentHash<T> = StorageValue<ParentHashPrefix, <T as Config>::Hash, ValueQuery>;

/// Digest of the current block, also part of the block header.
pub type Digest = StorageValue<DigestPrefix, generic::Digest, ValueQuery>;

/// Events deposited for the current block.
///
/// NOTE: The item is unbound and should therefore never be read on chain.
/// It could otherwise inflate the PoV size of a block.
pub type Events<T> = StorageValue<
	EventsPrefix,
	Vec<EventRecord<<T as Config>::RuntimeEvent, <T as Config>::Hash>>,
	ValueQuery,
>;

/// The number of events in the `Events<T>` list.
pub type EventCount = StorageValue<EventCountPrefix, u32, ValueQuery>;

/// Stores the `spec_version` and `spec_name` of when the last runtime upgrade happened.
pub type LastRuntimeUpgrade = StorageValue<LastRuntimeUpgradePrefix, LastRuntimeUpgradeInfo>;

/// The execution phase of the block.
pub type ExecutionPhase = StorageValue<ExecutionPhasePrefix, Phase>;

/// The code hash root has authorized for an upgrade, if any.
pub type AuthorizedUpgrade<T> = StorageValue<AuthorizedUpgradePrefix, <T as Config>::Hash>;

/// Event for the System module.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
#[scale_info(skip_type_params(T))]
pub enum Event<T: Config> {
	/// An extrinsic completed successfully.
	ExtrinsicSuccess { dispatch_info: DispatchInfo },
	/// An extrinsic failed.
	ExtrinsicFailed { dispatch_error: DispatchError, dispatch_info: DispatchInfo },
	/// `:code` was updated.
	CodeUpdated,
	/// A new account was created.
	NewAccount { account: T::AccountId },
	/// An account was reaped.
	KilledAccount { account: T::AccountId },
	/// On on-chain remark happened.
	Remarked { sender: T::AccountId, hash: T::Hash },
	/// An upgrade was authorized.
	UpgradeAuthorized { code_hash: T::Hash },
}

/// Error for the System module.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
#[scale_info(skip_type_params(T))]
pub enum Error<T> {
	#[doc(hidden)]
	#[codec(skip)]
	__Ignore(PhantomData<T>, Never),
	/// No upgrade authorized.
	NothingAuthorized,
	/// The submitted code is not authorized.
	Unauthorized,
}

impl<T: Config> From<Error<T>> for DispatchError {
	fn from(err: Error<T>) -> Self {
		let (index, message) = match err {
			Error::__Ignore(_, never) => match never {},
			Error::NothingAuthorized => (0, "NothingAuthorized"),
			Error::Unauthorized => (1, "Unauthorized"),
		};
		frame_support::dispatch::module_error::<T::PalletInfo, Pallet<T>>(index, message)
	}
}

/// Dispatchable calls of the System module.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
#[scale_info(skip_type_params(T))]
#[allow(non_camel_case_types)]
pub enum Call<T: Config> {
	#[doc(hidden)]
	#[codec(skip)]
	__Ignore(PhantomData<T>, Never),
	/// Make some on-chain remark.
	#[codec(index = 0)]
	remark { remark: Vec<u8> },
	/// Set the new runtime code.
	#[codec(index = 2)]
	set_code { code: Vec<u8> },
	/// Set some items of storage.
	#[codec(index = 4)]
	set_storage { items: Vec<KeyValue> },
	/// Kill some items from storage.
	#[codec(index = 5)]
	kill_storage { keys: Vec<Key> },
	/// Kill all storage items with a key that starts with the given prefix.
	#[codec(index = 6)]
	kill_prefix { prefix: Key, subkeys: u32 },
	/// Make some on-chain remark and emit event.
	#[codec(index = 7)]
	remark_with_event { remark: Vec<u8> },
	/// Authorize an upgrade to a given `code_hash` for the runtime.
	#[codec(index = 9)]
	authorize_upgrade { code_hash: T::Hash },
	/// Provide the preimage (runtime binary) `code` for an upgrade that has been authorized.
	#[codec(index = 11)]
	apply_authorized_upgrade { code: Vec<u8> },
}

impl<T: Config> GetDispatchInfo for Call<T> {
	fn get_dispatch_info(&self) -> DispatchInfo {
		let (weight, class, pays_fee) = match self {
			Call::__Ignore(_, never) => match *never {},
			Call::remark { remark } => (
				T::SystemWeightInfo::remark(remark.len() as u32),
				DispatchClass::Normal,
				Pays::Yes,
			),
			Call::set_code { .. } =>
				(T::SystemWeightInfo::set_code(), DispatchClass::Operational, Pays::Yes),
			Call::set_storage { items } => (
				T::SystemWeightInfo::set_storage(items.len() as u32),
				DispatchClass::Operational,
				Pays::Yes,
			),
			Call::kill_storage { keys } => (
				T::SystemWeightInfo::kill_storage(keys.len() as u32),
				DispatchClass::Operational,
				Pays::Yes,
			),
			Call::kill_prefix { subkeys, .. } => (
				T::SystemWeightInfo::kill_prefix(subkeys.saturating_add(1)),
				DispatchClass::Operational,
				Pays::Yes,
			),
			Call::remark_with_event { remark } => (
				T::SystemWeightInfo::remark_with_event(remark.len() as u32),
				DispatchClass::Normal,
				Pays::Yes,
			),
			Call::authorize_upgrade { .. } =>
				(T::SystemWeightInfo::authorize_upgrade(), DispatchClass::Operational, Pays::Yes),
			Call::apply_authorized_upgrade { .. } => (
				T::SystemWeightInfo::apply_authorized_upgrade(),
				DispatchClass::Operational,
				Pays::Yes,
			),
		};
		DispatchInfo { weight, class, pays_fee }
	}
}

impl<T: Config> UnfilteredDispatchable for Call<T> {
	type RuntimeOrigin = OriginFor<T>;

	fn dispatch_bypass_filter(
		self,
		ext: &mut dyn Externalities,
		origin: Self::RuntimeOrigin,
	) -> DispatchResultWithPostInfo {
		frame_support::storage::with_storage_layer(ext, |ext| {
			match self {
				Call::__Ignore(_, never) => match never {},
				Call::remark { remark } => Pallet::<T>::remark(ext, origin, remark),
				Call::set_code { code } => Pallet::<T>::set_code(ext, origin, code),
				Call::set_storage { items } => Pallet::<T>::set_storage(ext, origin, items),
				Call::kill_storage { keys } => Pallet::<T>::kill_storage(ext, origin, keys),
				Call::kill_prefix { prefix, subkeys } =>
					Pallet::<T>::kill_prefix(ext, origin, prefix, subkeys),
				Call::remark_with_event { remark } =>
					Pallet::<T>::remark_with_event(ext, origin, remark).map(Into::into).map_err(Into::into),
				Call::authorize_upgrade { code_hash } =>
					Pallet::<T>::authorize_upgrade(ext, origin, code_hash)
						.map(Into::into)
						.map_err(Into::into),
				Call::apply_authorized_upgrade { code } =>
					Pallet::<T>::apply_authorized_upgrade(ext, origin, code),
			}
		})
	}
}

/// The System module.
pub struct Pallet<T>(PhantomData<T>);

// Dispatchables.
impl<T: Config> Pallet<T> {
	/// Make some on-chain remark.
	///
	/// Can be executed by every `origin`.
	pub fn remark(
		_ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		_remark: Vec<u8>,
	) -> DispatchResultWithPostInfo {
		let _ = ensure_signed_or_root(origin)?;
		Ok(().into())
	}

	/// Set the new runtime code.
	pub fn set_code(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		code: Vec<u8>,
	) -> DispatchResultWithPostInfo {
		ensure_root(origin)?;
		Self::update_code_in_storage(ext, &code);
		Ok(().into())
	}

	/// Set some items of storage.
	pub fn set_storage(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		items: Vec<KeyValue>,
	) -> DispatchResultWithPostInfo {
		ensure_root(origin)?;
		for (key, value) in items {
			unhashed::put_raw(ext, &key, &value);
		}
		Ok(().into())
	}

	/// Kill some items from storage.
	pub fn kill_storage(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		keys: Vec<Key>,
	) -> DispatchResultWithPostInfo {
		ensure_root(origin)?;
		for key in &keys {
			unhashed::kill(ext, key);
		}
		Ok(().into())
	}

	/// Kill all storage items with a key that starts with the given prefix.
	///
	/// **NOTE:** We rely on the Root origin to provide us the number of subkeys under
	/// the prefix we are removing to accurately calculate the weight of this function.
	pub fn kill_prefix(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		prefix: Key,
		subkeys: u32,
	) -> DispatchResultWithPostInfo {
		ensure_root(origin)?;
		let _ = unhashed::clear_prefix(ext, &prefix, Some(subkeys));
		Ok(().into())
	}

	/// Make some on-chain remark and emit event.
	pub fn remark_with_event(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		remark: Vec<u8>,
	) -> DispatchResult {
		let who = ensure_signed(origin)?;
		let hash = T::Hashing::hash(&remark[..]);
		Self::deposit_event(ext, Event::Remarked { sender: who, hash });
		Ok(())
	}

	/// Authorize an upgrade to a given `code_hash` for the runtime. The runtime can be supplied
	/// later.
	///
	/// This call requires Root origin.
	pub fn authorize_upgrade(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		code_hash: T::Hash,
	) -> DispatchResult {
		ensure_root(origin)?;
		AuthorizedUpgrade::<T>::put(ext, code_hash);
		Self::deposit_event(ext, Event::UpgradeAuthorized { code_hash });
		Ok(())
	}

	/// Provide the preimage (runtime binary) `code` for an upgrade that has been authorized.
	///
	/// If the authorization required a version check, this call will ensure the spec name
	/// remains unchanged and that the spec version has increased.
	///
	/// All origins are allowed.
	pub fn apply_authorized_upgrade(
		ext: &mut dyn Externalities,
		_origin: OriginFor<T>,
		code: Vec<u8>,
	) -> DispatchResultWithPostInfo {
		Self::validate_authorized_upgrade(ext, &code[..])?;
		AuthorizedUpgrade::<T>::kill(ext);
		Self::update_code_in_storage(ext, &code);
		Ok(PostDispatchInfo { actual_weight: None, pays_fee: Pays::No })
	}
}


impl<T: Config> Pallet<T> {
	/// Returns the `spec_version` of the last runtime upgrade.
	pub fn last_runtime_upgrade_spec_version(ext: &dyn Externalities) -> u32 {
		LastRuntimeUpgrade::get(ext).map_or(0, |l| l.spec_version.0)
	}

	/// Returns true if the given account exists.
	pub fn account_exists(ext: &dyn Externalities, who: &T::AccountId) -> bool {
		Account::<T>::contains_key(ext, who)
	}

	/// The full account record of `who`, or the default record if the account does not exist.
	pub fn account(ext: &dyn Externalities, who: &T::AccountId) -> AccountInfo<T::Nonce, T::AccountData> {
		Account::<T>::get(ext, who)
	}

	/// Write code to the storage and emit related events and digest items.
	///
	/// Note this function almost never should be used directly. It is exposed
	/// for `OnSetCode` implementations that defer actual code being written to
	/// the storage (for instance in case of parachains).
	pub fn update_code_in_storage(ext: &mut dyn Externalities, code: &[u8]) {
		unhashed::put_raw(ext, well_known_keys::CODE, code);
		Self::deposit_log(ext, generic::DigestItem::RuntimeEnvironmentUpdated);
		Self::deposit_event(ext, Event::CodeUpdated);
	}

	/// Check that provided `code` can be upgraded to. Namely, check that its hash matches an
	/// existing authorization.
	pub fn validate_authorized_upgrade(
		ext: &dyn Externalities,
		code: &[u8],
	) -> Result<T::Hash, DispatchError> {
		let expected = AuthorizedUpgrade::<T>::get(ext).ok_or(Error::<T>::NothingAuthorized)?;
		let actual = T::Hashing::hash(code);
		ensure!(actual == expected, Error::<T>::Unauthorized);
		Ok(actual)
	}

	/// Increment the reference counter on an account.
	pub fn inc_consumers(ext: &mut dyn Externalities, who: &T::AccountId) -> Result<(), DispatchError> {
		Account::<T>::try_mutate(ext, who, |a| {
			if a.providers > 0 {
				a.consumers = a.consumers.saturating_add(1);
				Ok(())
			} else {
				Err(DispatchError::NoProviders)
			}
		})
	}

	/// Decrement the reference counter on an account. This *MUST* only be done once for every time
	/// you called `inc_consumers` on `who`.
	pub fn dec_consumers(ext: &mut dyn Externalities, who: &T::AccountId) {
		Account::<T>::mutate(ext, who, |a| {
			if a.consumers > 0 {
				a.consumers -= 1;
			} else {
				log::error!(
					target: LOG_TARGET,
					"Logic error: Unexpected underflow in reducing consumer",
				);
			}
		})
	}

	/// Increment the provider reference counter on an account.
	pub fn inc_providers(ext: &mut dyn Externalities, who: &T::AccountId) -> IncRefStatus {
		let (created, status) = Account::<T>::mutate(ext, who, |a| {
			if a.providers == 0 && a.sufficients == 0 {
				// Account is being created.
				a.providers = 1;
				(true, IncRefStatus::Created)
			} else {
				a.providers = a.providers.saturating_add(1);
				(false, IncRefStatus::Existed)
			}
		});
		if created {
			Self::on_created_account(ext, who.clone());
		}
		status
	}

	/// Decrement the provider reference counter on an account.
	///
	/// This *MUST* only be done once for every time you called `inc_providers` on `who`.
	pub fn dec_providers(
		ext: &mut dyn Externalities,
		who: &T::AccountId,
	) -> Result<DecRefStatus, DispatchError> {
		let mut reaped = false;
		let status = Account::<T>::try_mutate_exists(ext, who, |maybe_account| {
			if let Some(mut account) = maybe_account.take() {
				if account.providers == 0 {
					// Logic error - cannot decrement beyond zero.
					log::error!(
						target: LOG_TARGET,
						"Logic error: Unexpected underflow in reducing provider",
					);
					account.providers = 1;
				}
				match (account.providers, account.consumers, account.sufficients) {
					(1, 0, 0) => {
						// No providers left (and no consumers) and no sufficients. Account dead.
						reaped = true;
						Ok(DecRefStatus::Reaped)
					},
					(1, c, _) if c > 0 => {
						// Cannot remove last provider if there are consumers.
						*maybe_account = Some(account);
						Err(DispatchError::ConsumerRemaining)
					},
					(x, _, _) => {
						// Account will continue to exist as there is either > 1 provider or
						// > 0 sufficients.
						account.providers = x - 1;
						*maybe_account = Some(account);
						Ok(DecRefStatus::Exists)
					},
				}
			} else {
				log::error!(
					target: LOG_TARGET,
					"Logic error: Account already dead when reducing provider",
				);
				Ok(DecRefStatus::Reaped)
			}
		})?;
		if reaped {
			Self::on_killed_account(ext, who.clone());
		}
		Ok(status)
	}

	/// Increment the self-sufficient reference counter on an account.
	pub fn inc_sufficients(ext: &mut dyn Externalities, who: &T::AccountId) -> IncRefStatus {
		let (created, status) = Account::<T>::mutate(ext, who, |a| {
			if a.providers + a.sufficients == 0 {
				// Account is being created.
				a.sufficients = 1;
				(true, IncRefStatus::Created)
			} else {
				a.sufficients = a.sufficients.saturating_add(1);
				(false, IncRefStatus::Existed)
			}
		});
		if created {
			Self::on_created_account(ext, who.clone());
		}
		status
	}

	/// Decrement the sufficients reference counter on an account.
	///
	/// This *MUST* only be done once for every time you called `inc_sufficients` on `who`.
	pub fn dec_sufficients(ext: &mut dyn Externalities, who: &T::AccountId) -> DecRefStatus {
		let mut reaped = false;
		let status = Account::<T>::mutate_exists(ext, who, |maybe_account| {
			if let Some(mut account) = maybe_account.take() {
				if account.sufficients == 0 {
					// Logic error - cannot decrement beyond zero.
					log::error!(
						target: LOG_TARGET,
						"Logic error: Unexpected underflow in reducing sufficients",
					);
				}
				match (account.sufficients, account.providers) {
					(0, 0) | (1, 0) => {
						reaped = true;
						DecRefStatus::Reaped
					},
					(x, _) => {
						account.sufficients = x.saturating_sub(1);
						*maybe_account = Some(account);
						DecRefStatus::Exists
					},
				}
			} else {
				log::error!(
					target: LOG_TARGET,
					"Logic error: Account already dead when reducing provider",
				);
				DecRefStatus::Reaped
			}
		});
		if reaped {
			Self::on_killed_account(ext, who.clone());
		}
		status
	}

	/// The number of outstanding provider references for the account `who`.
	pub fn providers(ext: &dyn Externalities, who: &T::AccountId) -> RefCount {
		Account::<T>::get(ext, who).providers
	}

	/// The number of outstanding sufficient references for the account `who`.
	pub fn sufficients(ext: &dyn Externalities, who: &T::AccountId) -> RefCount {
		Account::<T>::get(ext, who).sufficients
	}

	/// The number of outstanding provider and sufficient references for the account `who`.
	pub fn reference_count(ext: &dyn Externalities, who: &T::AccountId) -> RefCount {
		let a = Account::<T>::get(ext, who);
		a.providers + a.sufficients
	}

	/// The number of outstanding consumer references for the account `who`.
	pub fn consumers(ext: &dyn Externalities, who: &T::AccountId) -> RefCount {
		Account::<T>::get(ext, who).consumers
	}

	/// True if the account has some outstanding consumer references.
	pub fn is_provider_required(ext: &dyn Externalities, who: &T::AccountId) -> bool {
		Account::<T>::get(ext, who).consumers != 0
	}

	/// True if the account has no outstanding consumer references or more than one provider.
	pub fn can_dec_provider(ext: &dyn Externalities, who: &T::AccountId) -> bool {
		let a = Account::<T>::get(ext, who);
		a.consumers == 0 || a.providers > 1
	}

	/// True if the account has at least one provider reference.
	pub fn can_inc_consumer(ext: &dyn Externalities, who: &T::AccountId) -> bool {
		Account::<T>::get(ext, who).providers > 0
	}

	/// Deposits an event into this block's event record.
	///
	/// NOTE: Events not registered at the genesis block and quietly omitted.
	pub fn deposit_event(ext: &mut dyn Externalities, event: impl Into<T::RuntimeEvent>) {
		Self::deposit_event_indexed(ext, &[], event.into());
	}

	/// Deposits an event into this block's event record adding this event
	/// to the corresponding topic indexes.
	///
	/// This will update storage entries that correspond to the specified topics.
	/// It is expected that light-clients could subscribe to this topics.
	///
	/// NOTE: Events not registered at the genesis block and quietly omitted.
	pub fn deposit_event_indexed(
		ext: &mut dyn Externalities,
		topics: &[T::Hash],
		event: T::RuntimeEvent,
	) {
		let block_number = Self::block_number(ext);

		// Don't populate events on genesis.
		if block_number.is_zero() {
			return
		}

		let phase = ExecutionPhase::get(ext).unwrap_or_default();
		let event = EventRecord { phase, event, topics: topics.to_vec() };

		// Index of the event to be added.
		let event_idx = {
			let old_event_count = EventCount::get(ext);
			let new_event_count = match old_event_count.checked_add(1) {
				// We've reached the maximum number of events at this block, just
				// don't do anything and leave the event_count unaltered.
				None => return,
				Some(nc) => nc,
			};
			EventCount::put(ext, new_event_count);
			old_event_count
		};

		log::trace!(target: LOG_TARGET, "deposited event #{} in block {:?}", event_idx, block_number);

		Events::<T>::append(ext, event);
	}

	/// Gets the index of extrinsic that is currently executing.
	pub fn extrinsic_index(ext: &dyn Externalities) -> Option<u32> {
		unhashed::get(ext, well_known_keys::EXTRINSIC_INDEX)
	}

	/// Gets extrinsics count.
	pub fn extrinsic_count(ext: &dyn Externalities) -> u32 {
		ExtrinsicCount::get(ext).unwrap_or_default()
	}

	/// Total length of all extrinsics applied so far in the current block.
	pub fn all_extrinsics_len(ext: &dyn Externalities) -> u32 {
		AllExtrinsicsLen::get(ext).unwrap_or_default()
	}

	/// The weight consumed so far by the current block, per dispatch class.
	pub fn block_weight(ext: &dyn Externalities) -> ConsumedWeight {
		BlockWeight::get(ext)
	}

	/// Inform the system module of some additional weight that should be accounted for, in the
	/// current block.
	///
	/// NOTE: use with extra care; this function is made public only be used for certain modules
	/// that need it. A runtime that does not have dynamic calls should never need this and should
	/// stick to static weights. A typical use case for this is inner calls or smart contract calls.
	/// Furthermore, it only makes sense to use this when it is presented with an arbitrary
	/// weight that could not be accounted for before dispatch.
	///
	/// Another potential use-case could be for the `on_initialize` and `on_finalize` hooks.
	pub fn register_extra_weight_unchecked(
		ext: &mut dyn Externalities,
		weight: Weight,
		class: DispatchClass,
	) {
		BlockWeight::mutate(ext, |current_weight| {
			current_weight.accrue(weight, class);
		});
	}

	/// Start the execution of a particular block.
	pub fn initialize(
		ext: &mut dyn Externalities,
		number: &BlockNumberFor<T>,
		parent_hash: &T::Hash,
		digest: &generic::Digest,
	) {
		// populate environment
		ExecutionPhase::put(ext, Phase::Initialization);
		unhashed::put(ext, well_known_keys::EXTRINSIC_INDEX, &0u32);
		Number::<T>::put(ext, number);
		Digest::put(ext, digest);
		ParentHash::<T>::put(ext, parent_hash);
		BlockHash::<T>::insert(ext, number.saturating_sub(One::one()), parent_hash);

		// Remove previous block data from storage
		BlockWeight::kill(ext);
	}

	/// Remove temporary "environment" entries in storage, compute the storage root and return the
	/// resulting header for this block.
	pub fn finalize(ext: &mut dyn Externalities) -> HeaderFor<T> {
		let length_limit = T::BlockLength::get();
		let weight_limits = T::BlockWeights::get();
		let consumed = Self::block_weight(ext);
		let len = Self::all_extrinsics_len(ext);
		let len_percent = |class| {
			sp_runtime::Percent::from_rational(len, *length_limit.max.get(class)).deconstruct()
		};
		let weight_percent = |class| {
			sp_runtime::Percent::from_rational(
				consumed.get(class).ref_time(),
				weight_limits.get(class).max_total.unwrap_or(Weight::MAX).ref_time(),
			)
			.deconstruct()
		};
		log::debug!(
			target: LOG_TARGET,
			"[{:?}] {} extrinsics, length: {} (normal {}%, op: {}%, mandatory {}%) / normal weight:\
			 {:?} ({}%) op weight {:?} ({}%) / mandatory weight {:?} ({}%)",
			Self::block_number(ext),
			Self::extrinsic_count(ext),
			len,
			len_percent(DispatchClass::Normal),
			len_percent(DispatchClass::Operational),
			len_percent(DispatchClass::Mandatory),
			consumed.get(DispatchClass::Normal),
			weight_percent(DispatchClass::Normal),
			consumed.get(DispatchClass::Operational),
			weight_percent(DispatchClass::Operational),
			consumed.get(DispatchClass::Mandatory),
			weight_percent(DispatchClass::Mandatory),
		);
		ExecutionPhase::kill(ext);
		AllExtrinsicsLen::kill(ext);

		// The following fields
		//
		// - <Events<T>>
		// - <EventCount<T>>
		//
		// stay to be inspected by the client and will be cleared by `Self::initialize`.
		let number = Number::<T>::get(ext);
		let parent_hash = ParentHash::<T>::get(ext);
		let digest = Digest::get(ext);

		let extrinsics = (0..ExtrinsicCount::take(ext).unwrap_or_default())
			.map(|i| ExtrinsicData::take(ext, i))
			.collect::<Vec<_>>();
		let extrinsics_root = extrinsics_data_root::<T::Hashing>(extrinsics);

		// move block hash pruning window by one block
		let block_hash_count = T::BlockHashCount::get();
		let to_remove = number.saturating_sub(block_hash_count).saturating_sub(One::one());

		// keep genesis hash
		if !to_remove.is_zero() {
			BlockHash::<T>::remove(ext, to_remove);
		}

		let storage_root = T::Hash::decode(&mut &ext.storage_root()[..])
			.expect("Node is configured to use the same hash; qed");

		<HeaderFor<T> as HeaderT>::new(number, extrinsics_root, storage_root, parent_hash, digest)
	}

	/// Deposits a log and ensures it matches the block's log data.
	pub fn deposit_log(ext: &mut dyn Externalities, item: generic::DigestItem) {
		Digest::mutate(ext, |digest| digest.push(item));
	}

	/// Get the basic externalities for this module, useful for tests.
	#[cfg(feature = "std")]
	pub fn externalities() -> sp_io::TestExternalities {
		let mut storage = sp_runtime::Storage::new();
		storage.insert(BlockHash::<T>::hashed_key_for(BlockNumberFor::<T>::zero()), [69u8; 32].to_vec());
		storage.insert(Number::<T>::hashed_key().to_vec(), BlockNumberFor::<T>::one().encode());
		storage.insert(ParentHash::<T>::hashed_key().to_vec(), [69u8; 32].to_vec());
		sp_io::TestExternalities::new(storage)
	}

	/// Get the current events deposited by the runtime.
	///
	/// NOTE: This should only be used in tests. Reading events from the runtime can have a large
	/// impact on the PoV size of a block. Users should use alternative and well bounded storage
	/// items for any behavior like this.
	pub fn events(ext: &dyn Externalities) -> Vec<EventRecord<T::RuntimeEvent, T::Hash>> {
		Events::<T>::get(ext)
	}

	/// The current block number being processed.
	pub fn block_number(ext: &dyn Externalities) -> BlockNumberFor<T> {
		Number::<T>::get(ext)
	}

	/// Hash of the previous block.
	pub fn parent_hash(ext: &dyn Externalities) -> T::Hash {
		ParentHash::<T>::get(ext)
	}

	/// Digest of the current block.
	pub fn digest(ext: &dyn Externalities) -> generic::Digest {
		Digest::get(ext)
	}

	/// The hash of a known block, or the default hash if it is unknown or pruned.
	pub fn block_hash(ext: &dyn Externalities, number: BlockNumberFor<T>) -> T::Hash {
		BlockHash::<T>::get(ext, number)
	}

	/// The in-code version of the runtime.
	pub fn runtime_version() -> RuntimeVersion {
		T::Version::get()
	}

	/// Set the block number to something in particular. Can be used as an alternative to
	/// `initialize` for tests that don't need to bother with the other environment entries.
	#[cfg(any(feature = "std", test))]
	pub fn set_block_number(ext: &mut dyn Externalities, n: BlockNumberFor<T>) {
		Number::<T>::put(ext, n);
	}

	/// Sets the index of extrinsic that is currently executing.
	#[cfg(any(feature = "std", test))]
	pub fn set_extrinsic_index(ext: &mut dyn Externalities, extrinsic_index: u32) {
		unhashed::put(ext, well_known_keys::EXTRINSIC_INDEX, &extrinsic_index)
	}

	/// Set the parent hash number to something in particular. Can be used as an alternative to
	/// `initialize` for tests that don't need to bother with the other environment entries.
	#[cfg(any(feature = "std", test))]
	pub fn set_parent_hash(ext: &mut dyn Externalities, n: T::Hash) {
		ParentHash::<T>::put(ext, n);
	}

	/// Set the current block weight. This should only be used in some integration tests.
	#[cfg(any(feature = "std", test))]
	pub fn set_block_consumed_resources(ext: &mut dyn Externalities, weight: Weight, len: usize) {
		BlockWeight::mutate(ext, |current_weight| {
			current_weight.set(weight, DispatchClass::Normal)
		});
		AllExtrinsicsLen::put(ext, len as u32);
	}

	/// Reset events.
	///
	/// This needs to be used in prior calling [`initialize`](Self::initialize) for each new block
	/// to clear events from previous block.
	pub fn reset_events(ext: &mut dyn Externalities) {
		Events::<T>::kill(ext);
		EventCount::kill(ext);
	}

	/// Assert the given `event` exists.
	#[cfg(any(feature = "std", test))]
	#[track_caller]
	pub fn assert_has_event(ext: &dyn Externalities, event: T::RuntimeEvent) {
		let events = Self::events(ext);
		assert!(
			events.iter().any(|record| record.event == event),
			"expected event {event:?} not found in events {events:?}",
		);
	}

	/// Assert the last event equal to the given `event`.
	#[cfg(any(feature = "std", test))]
	#[track_caller]
	pub fn assert_last_event(ext: &dyn Externalities, event: T::RuntimeEvent) {
		let last_event = Self::events(ext).last().expect("events expected").event.clone();
		assert_eq!(
			last_event, event,
			"expected event {event:?} is not equal to the last event {last_event:?}",
		);
	}

	/// Return the chain's current runtime version.
	pub fn version() -> RuntimeVersion {
		T::Version::get()
	}

	/// Retrieve the account transaction counter from storage.
	pub fn account_nonce(ext: &dyn Externalities, who: impl codec::EncodeLike<T::AccountId>) -> T::Nonce {
		Account::<T>::get(ext, who).nonce
	}

	/// Increment a particular account's nonce by 1.
	pub fn inc_account_nonce(ext: &mut dyn Externalities, who: impl codec::EncodeLike<T::AccountId>) {
		Account::<T>::mutate(ext, who, |a| a.nonce += T::Nonce::one());
	}

	/// Note what the extrinsic data of the current extrinsic index is.
	///
	/// This is required to be called before applying an extrinsic. The data will used
	/// in [`Self::finalize`] to calculate the correct extrinsics root.
	pub fn note_extrinsic(ext: &mut dyn Externalities, encoded_xt: Vec<u8>) {
		let index = Self::extrinsic_index(ext).unwrap_or_default();
		ExtrinsicData::insert(ext, index, encoded_xt);
	}

	/// To be called immediately after an extrinsic has been applied.
	///
	/// Emits an `ExtrinsicSuccess` or `ExtrinsicFailed` event depending on the outcome.
	/// The emitted event contains the post-dispatch corrected weight including
	/// the base-weight for its dispatch class.
	pub fn note_applied_extrinsic(
		ext: &mut dyn Externalities,
		r: &DispatchResultWithPostInfo,
		mut info: DispatchInfo,
	) {
		info.weight = extract_actual_weight(r, &info)
			.saturating_add(T::BlockWeights::get().get(info.class).base_extrinsic);
		info.pays_fee = extract_actual_pays_fee(r, &info);

		let event = match r {
			Ok(_) => Event::ExtrinsicSuccess { dispatch_info: info },
			Err(err) => {
				log::trace!(
					target: LOG_TARGET,
					"Extrinsic failed at block({:?}): {:?}",
					Self::block_number(ext),
					err,
				);
				Event::ExtrinsicFailed { dispatch_error: err.error, dispatch_info: info }
			},
		};
		Self::deposit_event(ext, event);

		let next_extrinsic_index = Self::extrinsic_index(ext).unwrap_or_default() + 1u32;

		unhashed::put(ext, well_known_keys::EXTRINSIC_INDEX, &next_extrinsic_index);
		ExecutionPhase::put(ext, Phase::ApplyExtrinsic(next_extrinsic_index));
	}

	/// To be called immediately after `note_applied_extrinsic` of the last extrinsic of the block
	/// has been called.
	pub fn note_finished_extrinsics(ext: &mut dyn Externalities) {
		let extrinsic_index: u32 =
			unhashed::take(ext, well_known_keys::EXTRINSIC_INDEX).unwrap_or_default();
		ExtrinsicCount::put(ext, extrinsic_index);
		ExecutionPhase::put(ext, Phase::Finalization);
	}

	/// To be called immediately after finishing the initialization of the block
	/// (e.g., called `on_initialize` for all modules).
	pub fn note_finished_initialize(ext: &mut dyn Externalities) {
		ExecutionPhase::put(ext, Phase::ApplyExtrinsic(0))
	}

	/// An account is being created.
	pub fn on_created_account(ext: &mut dyn Externalities, who: T::AccountId) {
		T::OnNewAccount::on_new_account(ext, &who);
		Self::deposit_event(ext, Event::NewAccount { account: who });
	}

	/// Do anything that needs to be done after an account has been killed.
	fn on_killed_account(ext: &mut dyn Externalities, who: T::AccountId) {
		T::OnKilledAccount::on_killed_account(ext, &who);
		Self::deposit_event(ext, Event::KilledAccount { account: who });
	}
}

// The system module does its block bookkeeping through the executive and keeps its hooks empty.
impl<T: Config> OnInitialize<BlockNumberFor<T>> for Pallet<T> {}
impl<T: Config> OnIdle<BlockNumberFor<T>> for Pallet<T> {}
impl<T: Config> OnFinalize<BlockNumberFor<T>> for Pallet<T> {}
impl<T: Config> OnRuntimeUpgrade for Pallet<T> {}

/// Event handler which registers a provider when created.
pub struct Provider<T>(PhantomData<T>);
impl<T: Config> Provider<T> {
	/// Register a provider reference for `t`.
	pub fn created(ext: &mut dyn Externalities, t: &T::AccountId) -> Result<(), DispatchError> {
		Pallet::<T>::inc_providers(ext, t);
		Ok(())
	}

	/// Release the provider reference of `t`.
	pub fn killed(ext: &mut dyn Externalities, t: &T::AccountId) -> Result<(), DispatchError> {
		Pallet::<T>::dec_providers(ext, t).map(|_| ())
	}
}

/// Implement StoredMap for a simple single-item, provide-when-not-default system. This works fine
/// for storing a single item which allows the account to continue existing as long as it's not
/// empty/default.
///
/// Anything more complex will need more sophisticated logic.
impl<T: Config> StoredMap<T::AccountId, T::AccountData> for Pallet<T> {
	fn get(ext: &dyn Externalities, k: &T::AccountId) -> T::AccountData {
		Account::<T>::get(ext, k).data
	}

	fn try_mutate_exists<R, E: From<DispatchError>>(
		ext: &mut dyn Externalities,
		k: &T::AccountId,
		f: impl FnOnce(&mut Option<T::AccountData>) -> Result<R, E>,
	) -> Result<R, E> {
		let account = Account::<T>::get(ext, k);
		let is_default = account.data == T::AccountData::default();
		let mut some_data = if is_default { None } else { Some(account.data) };
		let result = f(&mut some_data)?;
		if Self::providers(ext, k) > 0 || Self::sufficients(ext, k) > 0 {
			Account::<T>::mutate(ext, k, |a| a.data = some_data.unwrap_or_default());
		} else {
			Account::<T>::remove(ext, k)
		}
		Ok(result)
	}
}

/// Split an `option` into two constituent options, as defined by a `splitter` function.
pub fn split_inner<T, R, S>(
	option: Option<T>,
	splitter: impl FnOnce(T) -> (R, S),
) -> (Option<R>, Option<S>) {
	match option {
		Some(inner) => {
			let (r, s) = splitter(inner);
			(Some(r), Some(s))
		},
		None => (None, None),
	}
}

/// The lookup context used while checking extrinsics: resolves addresses with `T::Lookup`.
pub struct ChainContext<T>(PhantomData<T>);
impl<T> Default for ChainContext<T> {
	fn default() -> Self {
		ChainContext(PhantomData)
	}
}

impl<T: Config> Lookup for ChainContext<T> {
	type Source = <T::Lookup as StaticLookup>::Source;
	type Target = <T::Lookup as StaticLookup>::Target;

	fn lookup(&self, s: Self::Source) -> Result<Self::Target, LookupError> {
		<T::Lookup as StaticLookup>::lookup(s)
	}
}

impl<T: Config> ValidateUnsigned for Pallet<T> {
	type Call = Call<T>;

	fn validate_unsigned(
		ext: &dyn Externalities,
		_source: TransactionSource,
		call: &Self::Call,
	) -> TransactionValidity {
		if let Call::apply_authorized_upgrade { ref code } = call {
			if let Ok(hash) = Self::validate_authorized_upgrade(ext, &code[..]) {
				return Ok(ValidTransaction {
					priority: 100,
					requires: Vec::new(),
					provides: vec![hash.as_ref().to_vec()],
					longevity: TransactionLongevity::MAX,
					propagate: true,
				})
			}
			return Err(InvalidTransaction::Call.into())
		}
		Err(UnknownTransaction::NoUnsignedValidator.into())
	}

	fn pre_dispatch(ext: &dyn Externalities, call: &Self::Call) -> Result<(), TransactionValidityError> {
		match call {
			Call::apply_authorized_upgrade { ref code } => Self::validate_authorized_upgrade(ext, &code[..])
				.map(|_| ())
				.map_err(|_| InvalidTransaction::Call.into()),
			_ => Ok(()),
		}
	}
}

/// Genesis configuration of the System module.
#[derive(Debug)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase", deny_unknown_fields))]
pub struct GenesisConfig<T: Config> {
	#[cfg_attr(feature = "std", serde(skip))]
	pub _config: PhantomData<T>,
}

impl<T: Config> Default for GenesisConfig<T> {
	fn default() -> Self {
		Self { _config: PhantomData }
	}
}

impl<T: Config> GenesisConfig<T> {
	/// Write the genesis state of the module.
	pub fn build(&self, ext: &mut dyn Externalities) {
		let hash69 = hash69::<T::Hash>();
		BlockHash::<T>::insert(ext, BlockNumberFor::<T>::zero(), hash69);
		ParentHash::<T>::put(ext, hash69);
		LastRuntimeUpgrade::put(ext, LastRuntimeUpgradeInfo::from(T::Version::get()));
		ExtrinsicCount::kill(ext);
	}
}

#[cfg(feature = "std")]
impl<T: Config> BuildStorage for GenesisConfig<T> {
	fn assimilate_storage(&self, storage: &mut sp_runtime::Storage) -> Result<(), String> {
		let mut ext = sp_io::TestExternalities::new(core::mem::take(storage));
		ext.execute_with(|ext| self.build(ext));
		*storage = ext.into_storage();
		Ok(())
	}
}

/// A hash with every byte set to 69, recorded as the genesis block hash.
fn hash69<T: AsMut<[u8]> + Default>() -> T {
	let mut h = T::default();
	h.as_mut().iter_mut().for_each(|byte| *byte = 69);
	h
}

/// Ensure that the origin `o` represents a signed extrinsic (i.e. transaction).
/// Returns `Ok` with the account that signed the extrinsic or an `Err` otherwise.
pub fn ensure_signed<AccountId>(o: RawOrigin<AccountId>) -> Result<AccountId, BadOrigin> {
	match o {
		RawOrigin::Signed(t) => Ok(t),
		_ => Err(BadOrigin),
	}
}

/// Ensure that the origin `o` represents either a signed extrinsic (i.e. transaction) or the root.
/// Returns `Ok` with the account that signed the extrinsic, `None` if it was root,  or an `Err`
/// otherwise.
pub fn ensure_signed_or_root<AccountId>(
	o: RawOrigin<AccountId>,
) -> Result<Option<AccountId>, BadOrigin> {
	match o {
		RawOrigin::Root => Ok(None),
		RawOrigin::Signed(t) => Ok(Some(t)),
		_ => Err(BadOrigin),
	}
}

/// Ensure that the origin `o` represents the root. Returns `Ok` or an `Err` otherwise.
pub fn ensure_root<AccountId>(o: RawOrigin<AccountId>) -> Result<(), BadOrigin> {
	match o {
		RawOrigin::Root => Ok(()),
		_ => Err(BadOrigin),
	}
}

/// Ensure that the origin `o` represents an unsigned extrinsic. Returns `Ok` or an `Err` otherwise.
pub fn ensure_none<AccountId>(o: RawOrigin<AccountId>) -> Result<(), BadOrigin> {
	match o {
		RawOrigin::None => Ok(()),
		_ => Err(BadOrigin),
	}
}

/// Prelude to be used alongside the System module.
pub mod pallet_prelude {
	pub use crate::{ensure_none, ensure_root, ensure_signed, ensure_signed_or_root};

	/// Type alias for the `Origin` associated type of system config.
	pub type OriginFor<T> = crate::OriginFor<T>;

	/// Type alias for the `Header`.
	pub type HeaderFor<T> = crate::HeaderFor<T>;

	/// Type alias for the `BlockNumber` associated type of system config.
	pub type BlockNumberFor<T> = crate::BlockNumberFor<T>;

	/// Type alias for the `Extrinsic` associated type of system config.
	pub type ExtrinsicFor<T> =
		<<T as crate::Config>::Block as sp_runtime::traits::Block>::Extrinsic;

	/// Type alias for the `RuntimeCall` associated type of system config.
	pub type RuntimeCallFor<T> = <T as crate::Config>::RuntimeCall;
}
