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

use super::*;
use crate as pallet_transaction_payment;

use codec::{Decode, Encode};
use frame_support::{
	dispatch::{DispatchInfo, GetDispatchInfo, PostDispatchInfo, UnfilteredDispatchable},
	parameter_types,
	traits::{ConstU64, OnUnbalanced},
};
use frame_system::{limits, pallet_prelude::OriginFor};
use sp_runtime::{
	testing::{Block as TestBlock, TestXt},
	traits::{BlakeTwo256, Dispatchable, IdentityLookup},
	DispatchResultWithInfo, H256,
};

pub type System = frame_system::Pallet<Runtime>;
pub type Balances = pallet_balances::Pallet<Runtime>;
pub type TransactionPayment = pallet_transaction_payment::Pallet<Runtime>;

pub type BalancesCall = pallet_balances::Call<Runtime>;

#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode, scale_info::TypeInfo)]
pub enum RuntimeCall {
	#[codec(index = 0)]
	System(frame_system::Call<Runtime>),
	#[codec(index = 1)]
	Balances(pallet_balances::Call<Runtime>),
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
			RuntimeCall::Balances(call) => call.dispatch_bypass_filter(ext, origin),
		}
	}
}

impl GetDispatchInfo for RuntimeCall {
	fn get_dispatch_info(&self) -> DispatchInfo {
		match self {
			RuntimeCall::System(call) => call.get_dispatch_info(),
			RuntimeCall::Balances(call) => call.get_dispatch_info(),
		}
	}
}

#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode, scale_info::TypeInfo)]
pub enum RuntimeEvent {
	#[codec(index = 0)]
	System(frame_system::Event<Runtime>),
	#[codec(index = 1)]
	Balances(pallet_balances::Event<Runtime>),
	#[codec(index = 2)]
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

pub struct PalletInfo;

impl frame_support::traits::PalletInfo for PalletInfo {
	fn index<P: 'static>() -> Option<usize> {
		let type_id = core::any::TypeId::of::<P>();
		if type_id == core::any::TypeId::of::<System>() {
			return Some(0)
		}
		if type_id == core::any::TypeId::of::<Balances>() {
			return Some(1)
		}
		if type_id == core::any::TypeId::of::<TransactionPayment>() {
			return Some(2)
		}
		None
	}

	fn name<P: 'static>() -> Option<&'static str> {
		let type_id = core::any::TypeId::of::<P>();
		if type_id == core::any::TypeId::of::<System>() {
			return Some("System")
		}
		if type_id == core::any::TypeId::of::<Balances>() {
			return Some("Balances")
		}
		if type_id == core::any::TypeId::of::<TransactionPayment>() {
			return Some("TransactionPayment")
		}
		None
	}
}

pub(crate) const CALL: &<Runtime as frame_system::Config>::RuntimeCall =
	&RuntimeCall::Balances(BalancesCall::transfer_allow_death { dest: 2, value: 69 });

parameter_types! {
	pub(crate) static ExtrinsicBaseWeight: Weight = Weight::zero();
}

pub struct BlockWeights;
impl Get<limits::BlockWeights> for BlockWeights {
	fn get() -> limits::BlockWeights {
		limits::BlockWeights::builder()
			.base_block(Weight::zero())
			.for_class(DispatchClass::all(), |weights| {
				weights.base_extrinsic = ExtrinsicBaseWeight::get();
			})
			.for_class(DispatchClass::non_mandatory(), |weights| {
				weights.max_total = Some(Weight::from_parts(1024, u64::MAX));
			})
			.build_or_panic()
	}
}

parameter_types! {
	pub static WeightToFee: u64 = 1;
	pub static TransactionByteFee: u64 = 1;
	pub static OperationalFeeMultiplier: u8 = 5;
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Runtime;

impl frame_system::Config for Runtime {
	type RuntimeCall = RuntimeCall;
	type RuntimeEvent = RuntimeEvent;
	type Nonce = u64;
	type Hash = H256;
	type Hashing = BlakeTwo256;
	type AccountId = u64;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Block = TestBlock<TestXt<RuntimeCall, ()>>;
	type BlockHashCount = ConstU64<250>;
	type BlockWeights = BlockWeights;
	type BlockLength = ();
	type DbWeight = ();
	type Version = ();
	type PalletInfo = PalletInfo;
	type AccountData = pallet_balances::AccountData<u64>;
	type OnNewAccount = ();
	type OnKilledAccount = ();
	type SystemWeightInfo = ();
}

impl pallet_balances::Config for Runtime {
	type RuntimeEvent = RuntimeEvent;
	type Balance = u64;
	type ExistentialDeposit = ConstU64<1>;
	type AccountStore = System;
	type WeightInfo = ();
}

impl sp_runtime::weights::WeightToFee for WeightToFee {
	type Balance = u64;

	fn weight_to_fee(weight: &Weight) -> Self::Balance {
		weight.ref_time().saturating_mul(Self::get())
	}
}

impl sp_runtime::weights::WeightToFee for TransactionByteFee {
	type Balance = u64;

	fn weight_to_fee(weight: &Weight) -> Self::Balance {
		weight.ref_time().saturating_mul(Self::get())
	}
}

parameter_types! {
	pub(crate) static TipUnbalancedAmount: u64 = 0;
	pub(crate) static FeeUnbalancedAmount: u64 = 0;
}

/// Records the fee and the tip it is handed, in that order.
pub struct DealWithFees;
impl OnUnbalanced<u64> for DealWithFees {
	fn on_unbalanceds(_ext: &mut dyn Externalities, mut fees_then_tips: impl Iterator<Item = u64>) {
		if let Some(fees) = fees_then_tips.next() {
			FeeUnbalancedAmount::mutate(|a| *a += fees);
			if let Some(tips) = fees_then_tips.next() {
				TipUnbalancedAmount::mutate(|a| *a += tips);
			}
		}
	}
}

impl Config for Runtime {
	type RuntimeEvent = RuntimeEvent;
	type OnChargeTransaction = CurrencyAdapter<Balances, DealWithFees>;
	type OperationalFeeMultiplier = OperationalFeeMultiplier;
	type WeightToFee = WeightToFee;
	type LengthToFee = TransactionByteFee;
	type FeeMultiplierUpdate = ();
}
