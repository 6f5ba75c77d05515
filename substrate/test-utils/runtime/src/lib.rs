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

//! The test runtime: every module of the state transition function wired into one concrete
//! runtime, reachable through the byte-level entry points in [`api`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod api;
#[cfg(feature = "std")]
pub mod genesis;
#[cfg(feature = "std")]
pub mod keyring;
pub mod timestamp;


use alloc::{borrow::Cow, vec::Vec};
use codec::{Decode, Encode};
use frame_support::{
	dispatch::{DispatchInfo, GetDispatchInfo, PostDispatchInfo, UnfilteredDispatchable},
	inherent::{self, CheckInherentsResult, InherentData, RuntimeInherents},
	parameter_types,
	traits::IsSubType,
	weights::{
		constants::WEIGHT_REF_TIME_PER_SECOND, ConstantMultiplier, IdentityFee, RocksDbWeight,
		Weight,
	},
};
use frame_system::{
	limits::{BlockLength, BlockWeights},
	pallet_prelude::OriginFor,
};
use pallet_transaction_payment::{CurrencyAdapter, Multiplier, TargetedFeeAdjustment};
use scale_info::TypeInfo;
use sp_io::Externalities;
use sp_runtime::{
	crypto::ed25519,
	generic,
	traits::{
		AccountIdLookup, BlakeTwo256, Bounded, Dispatchable, IdentifyAccount, ValidateUnsigned,
		Verify,
	},
	transaction_validity::{
		TransactionSource, TransactionValidity, TransactionValidityError, UnknownTransaction,
	},
	version::RuntimeVersion,
	DispatchResultWithInfo, FixedPointNumber, MultiAddress, Perbill, Perquintill,
};

/// Test runtime version.
pub const VERSION: RuntimeVersion = RuntimeVersion {
	spec_name: Cow::Borrowed("stf-test"),
	impl_name: Cow::Borrowed("parity-stf-test"),
	authoring_version: 1,
	spec_version: 2,
	impl_version: 2,
	transaction_version: 1,
};

/// Signature of an extrinsic.
pub type Signature = ed25519::Signature;
/// An identifier for an account.
pub type AccountId = <<Signature as Verify>::Signer as IdentifyAccount>::AccountId;
/// The address format for describing accounts.
pub type Address = MultiAddress<AccountId, ()>;
/// Balance of an account.
pub type Balance = u64;
/// Index of a transaction.
pub type Nonce = u32;
/// The block number type used in this runtime.
pub type BlockNumber = u32;
/// The hash type used in this runtime.
pub type Hash = sp_runtime::H256;
/// Milliseconds since the unix epoch.
pub type Moment = u64;

/// The signed extensions every transaction is checked with, in order.
pub type SignedExtra = (
	frame_system::CheckNonZeroSender<Runtime>,
	frame_system::CheckSpecVersion<Runtime>,
	frame_system::CheckTxVersion<Runtime>,
	frame_system::CheckGenesis<Runtime>,
	frame_system::CheckMortality<Runtime>,
	frame_system::CheckNonce<Runtime>,
	frame_system::CheckWeight<Runtime>,
	pallet_transaction_payment::ChargeTransactionPayment<Runtime>,
);
/// Unchecked extrinsic type as expected by this runtime.
pub type UncheckedExtrinsic =
	generic::UncheckedExtrinsic<Address, RuntimeCall, Signature, SignedExtra>;
/// The payload being signed in transactions.
pub type SignedPayload = generic::SignedPayload<RuntimeCall, SignedExtra>;
/// Extrinsic type that has already been checked.
pub type CheckedExtrinsic = generic::CheckedExtrinsic<AccountId, RuntimeCall, SignedExtra>;
/// A test block's header.
pub type Header = generic::Header<BlockNumber, BlakeTwo256>;
/// A test block.
pub type Block = generic::Block<Header, UncheckedExtrinsic>;

pub type System = frame_system::Pallet<Runtime>;
pub type Timestamp = timestamp::Pallet<Runtime>;
pub type Balances = pallet_balances::Pallet<Runtime>;
pub type TransactionPayment = pallet_transaction_payment::Pallet<Runtime>;

/// The hooks of every module, in the order they run.
pub type AllPalletsWithSystem = (System, Timestamp, Balances, TransactionPayment);

/// Executive: handles dispatch to the various modules.
pub type Executive = frame_executive::Executive<
	Runtime,
	Block,
	frame_system::ChainContext<Runtime>,
	Runtime,
	AllPalletsWithSystem,
	(),
	Inherents,
>;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Runtime;

/// Every dispatchable of the runtime.
///
/// The encoding starts with the module index followed by the index of the function inside the
/// module; see [`CALL_REGISTRY`].
#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode, TypeInfo)]
pub enum RuntimeCall {
	#[codec(index = 0)]
	System(frame_system::Call<Runtime>),
	#[codec(index = 1)]
	Timestamp(timestamp::Call<Runtime>),
	#[codec(index = 2)]
	Balances(pallet_balances::Call<Runtime>),
}

/// The dispatchables of the runtime, keyed by `(module_index, function_index)`.
pub const CALL_REGISTRY: &[((u8, u8), &str, &str)] = &[
	((0, 0), "System", "remark"),
	((0, 2), "System", "set_code"),
	((0, 4), "System", "set_storage"),
	((0, 5), "System", "kill_storage"),
	((0, 6), "System", "kill_prefix"),
	((0, 7), "System", "remark_with_event"),
	((0, 9), "System", "authorize_upgrade"),
	((0, 11), "System", "apply_authorized_upgrade"),
	((1, 0), "Timestamp", "set"),
	((2, 0), "Balances", "transfer_allow_death"),
	((2, 2), "Balances", "force_transfer"),
	((2, 3), "Balances", "transfer_keep_alive"),
	((2, 8), "Balances", "force_set_balance"),
];

/// The module and function name registered under `index`.
pub fn call_name(index: (u8, u8)) -> Option<(&'static str, &'static str)> {
	CALL_REGISTRY
		.iter()
		.find(|(i, _, _)| *i == index)
		.map(|(_, module, function)| (*module, *function))
}

impl RuntimeCall {
	/// The `(module_index, function_index)` pair this call is registered under.
	pub fn call_index(&self) -> (u8, u8) {
		self.using_encoded(|encoded| (encoded[0], encoded[1]))
	}
}

impl Dispatchable for RuntimeCall {
	type RuntimeOrigin = OriginFor<Runtime>;
	type Info = DispatchInfo;
	type PostInfo = PostDispatchInfo;

	fn dispatch(
		self,
		ext: &mut dyn Externalities,
		origin: Self::RuntimeOrigin,
	) -> DispatchResultWithInfo<PostDispatchInfo> {
		match self {
			RuntimeCall::System(call) => call.dispatch_bypass_filter(ext, origin),
			RuntimeCall::Timestamp(call) => call.dispatch_bypass_filter(ext, origin),
			RuntimeCall::Balances(call) => call.dispatch_bypass_filter(ext, origin),
		}
	}
}

impl GetDispatchInfo for RuntimeCall {
	fn get_dispatch_info(&self) -> DispatchInfo {
		match self {
			RuntimeCall::System(call) => call.get_dispatch_info(),
			RuntimeCall::Timestamp(call) => call.get_dispatch_info(),
			RuntimeCall::Balances(call) => call.get_dispatch_info(),
		}
	}
}

impl From<frame_system::Call<Runtime>> for RuntimeCall {
	fn from(call: frame_system::Call<Runtime>) -> Self {
		RuntimeCall::System(call)
	}
}

impl From<timestamp::Call<Runtime>> for RuntimeCall {
	fn from(call: timestamp::Call<Runtime>) -> Self {
		RuntimeCall::Timestamp(call)
	}
}

impl From<pallet_balances::Call<Runtime>> for RuntimeCall {
	fn from(call: pallet_balances::Call<Runtime>) -> Self {
		RuntimeCall::Balances(call)
	}
}

impl IsSubType<timestamp::Call<Runtime>> for RuntimeCall {
	fn is_sub_type(&self) -> Option<&timestamp::Call<Runtime>> {
		match self {
			RuntimeCall::Timestamp(call) => Some(call),
			_ => None,
		}
	}
}

#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode, TypeInfo)]
pub enum RuntimeEvent {
	#[codec(index = 0)]
	System(frame_system::Event<Runtime>),
	#[codec(index = 2)]
	Balances(pallet_balances::Event<Runtime>),
	#[codec(index = 3)]
	TransactionPayment(pallet_transaction_payment::Event<Runtime>),
}

impl From<frame_system::Event<Runtime>> for RuntimeEvent {
	fn from(event: frame_system::Event<Runtime>) -> Self {
		RuntimeEvent::System(event)
	}
}

impl From<pallet_balances::Event<Runtime>> for RuntimeEvent {
	fn from(event: pallet_balances::Event<Runtime>) -> Self {
		RuntimeEvent::Balances(event)
	}
}

impl From<pallet_transaction_payment::Event<Runtime>> for RuntimeEvent {
	fn from(event: pallet_transaction_payment::Event<Runtime>) -> Self {
		RuntimeEvent::TransactionPayment(event)
	}
}

/// Index and name of every module, as used in module errors.
pub struct PalletInfo;

impl frame_support::traits::PalletInfo for PalletInfo {
	fn index<P: 'static>() -> Option<usize> {
		let type_id = core::any::TypeId::of::<P>();
		[
			core::any::TypeId::of::<System>(),
			core::any::TypeId::of::<Timestamp>(),
			core::any::TypeId::of::<Balances>(),
			core::any::TypeId::of::<TransactionPayment>(),
		]
		.iter()
		.position(|id| *id == type_id)
	}

	fn name<P: 'static>() -> Option<&'static str> {
		Self::index::<P>().map(|i| ["System", "Timestamp", "Balances", "TransactionPayment"][i])
	}
}

impl ValidateUnsigned for Runtime {
	type Call = RuntimeCall;

	fn pre_dispatch(
		ext: &dyn Externalities,
		call: &Self::Call,
	) -> Result<(), TransactionValidityError> {
		match call {
			RuntimeCall::System(call) => System::pre_dispatch(ext, call),
			// Without a validator the call's own origin check decides.
			RuntimeCall::Timestamp(_) | RuntimeCall::Balances(_) => Ok(()),
		}
	}

	fn validate_unsigned(
		ext: &dyn Externalities,
		source: TransactionSource,
		call: &Self::Call,
	) -> TransactionValidity {
		match call {
			RuntimeCall::System(call) => System::validate_unsigned(ext, source, call),
			RuntimeCall::Timestamp(_) | RuntimeCall::Balances(_) =>
				Err(UnknownTransaction::NoUnsignedValidator.into()),
		}
	}
}

/// The inherents of the runtime.
pub struct Inherents;

impl RuntimeInherents<RuntimeCall> for Inherents {
	fn create_inherents(ext: &dyn Externalities, data: &InherentData) -> Vec<RuntimeCall> {
		let mut inherents = Vec::new();
		inherent::create_inherent::<Timestamp, _>(ext, data, &mut inherents);
		inherents
	}

	fn is_inherent(call: &RuntimeCall) -> bool {
		inherent::is_inherent::<Timestamp, _>(call)
	}

	fn check_inherent(
		ext: &dyn Externalities,
		call: &RuntimeCall,
		data: &InherentData,
		result: &mut CheckInherentsResult,
	) -> bool {
		inherent::check_inherent::<Timestamp, _>(ext, call, data, result)
	}

	fn check_required(
		ext: &dyn Externalities,
		inherents: &[&RuntimeCall],
		data: &InherentData,
		result: &mut CheckInherentsResult,
	) -> bool {
		inherent::check_required::<Timestamp, _>(ext, inherents, data, result)
	}
}

/// We allow `Normal` extrinsics to fill up the block up to 75%, the rest can be used
/// by Operational extrinsics.
const NORMAL_DISPATCH_RATIO: Perbill = Perbill::from_percent(75);

/// Two seconds of compute with no proof size limit.
const MAXIMUM_BLOCK_WEIGHT: Weight =
	Weight::from_parts(WEIGHT_REF_TIME_PER_SECOND.saturating_mul(2), u64::MAX);

parameter_types! {
	pub const Version: RuntimeVersion = VERSION;
	pub const BlockHashCount: BlockNumber = 2400;
	pub RuntimeBlockLength: BlockLength =
		BlockLength::max_with_normal_ratio(5 * 1024 * 1024, NORMAL_DISPATCH_RATIO);
	pub RuntimeBlockWeights: BlockWeights =
		BlockWeights::with_sensible_defaults(MAXIMUM_BLOCK_WEIGHT, NORMAL_DISPATCH_RATIO);
	pub const ExistentialDeposit: Balance = 500;
	pub const TransactionByteFee: Balance = 1;
	pub const OperationalFeeMultiplier: u8 = 5;
	pub const MinimumPeriod: Moment = 1000;
	pub const TargetBlockFullness: Perquintill = Perquintill::from_percent(25);
	pub AdjustmentVariable: Multiplier = Multiplier::saturating_from_rational(75, 1_000_000);
	pub MinimumMultiplier: Multiplier = Multiplier::saturating_from_rational(1, 10u128);
	pub MaximumMultiplier: Multiplier = Bounded::max_value();
}

impl frame_system::Config for Runtime {
	type RuntimeCall = RuntimeCall;
	type RuntimeEvent = RuntimeEvent;
	type Nonce = Nonce;
	type Hash = Hash;
	type Hashing = BlakeTwo256;
	type AccountId = AccountId;
	type Lookup = AccountIdLookup<AccountId, ()>;
	type Block = Block;
	type BlockHashCount = BlockHashCount;
	type BlockWeights = RuntimeBlockWeights;
	type BlockLength = RuntimeBlockLength;
	type DbWeight = RocksDbWeight;
	type Version = Version;
	type PalletInfo = PalletInfo;
	type AccountData = pallet_balances::AccountData<Balance>;
	type OnNewAccount = ();
	type OnKilledAccount = ();
	type SystemWeightInfo = ();
}

impl timestamp::Config for Runtime {
	type Moment = Moment;
	type MinimumPeriod = MinimumPeriod;
}

impl pallet_balances::Config for Runtime {
	type RuntimeEvent = RuntimeEvent;
	type Balance = Balance;
	type ExistentialDeposit = ExistentialDeposit;
	type AccountStore = System;
	type WeightInfo = ();
}

impl pallet_transaction_payment::Config for Runtime {
	type RuntimeEvent = RuntimeEvent;
	type OnChargeTransaction = CurrencyAdapter<Balances, ()>;
	type OperationalFeeMultiplier = OperationalFeeMultiplier;
	type WeightToFee = IdentityFee<Balance>;
	type LengthToFee = ConstantMultiplier<Balance, TransactionByteFee>;
	type FeeMultiplierUpdate = TargetedFeeAdjustment<
		Self,
		TargetBlockFullness,
		AdjustmentVariable,
		MinimumMultiplier,
		MaximumMultiplier,
	>;
}
