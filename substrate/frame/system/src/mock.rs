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

use crate::{self as frame_system, *};
use alloc::borrow::Cow;
use codec::{Decode, Encode};
use frame_support::{
	dispatch::{
		DispatchClass, DispatchInfo, GetDispatchInfo, PostDispatchInfo, UnfilteredDispatchable,
	},
	parameter_types,
	traits::{ConstU64, Get, OnKilledAccount},
	weights::RuntimeDbWeight,
};
use sp_io::Externalities;
use sp_runtime::{
	testing::{Block as TestBlock, TestXt},
	traits::{BlakeTwo256, Dispatchable, IdentityLookup},
	version::RuntimeVersion,
	BuildStorage, DispatchResultWithInfo, Perbill, Weight, H256,
};

/// The only module of the mock runtime.
pub type System = frame_system::Pallet<Test>;

#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode, scale_info::TypeInfo)]
pub enum RuntimeCall {
	#[codec(index = 0)]
	System(frame_system::Call<Test>),
}

impl Dispatchable for RuntimeCall {
	type RuntimeOrigin = OriginFor<Test>;
	type Info = DispatchInfo;
	type PostInfo = PostDispatchInfo;

	fn dispatch(
		self,
		ext: &mut dyn Externalities,
		origin: Self::RuntimeOrigin,
	) -> DispatchResultWithInfo<PostDispatchInfo> {
		match self {
			RuntimeCall::System(call) => call.dispatch_bypass_filter(ext, origin),
		}
	}
}

impl GetDispatchInfo for RuntimeCall {
	fn get_dispatch_info(&self) -> DispatchInfo {
		match self {
			RuntimeCall::System(call) => call.get_dispatch_info(),
		}
	}
}

#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode, scale_info::TypeInfo)]
pub enum RuntimeEvent {
	#[codec(index = 0)]
	System(frame_system::Event<Test>),
}

impl From<frame_system::Event<Test>> for RuntimeEvent {
	fn from(event: frame_system::Event<Test>) -> Self {
		RuntimeEvent::System(event)
	}
}

pub struct PalletInfo;

impl frame_support::traits::PalletInfo for PalletInfo {
	fn index<P: 'static>() -> Option<usize> {
		(core::any::TypeId::of::<P>() == core::any::TypeId::of::<System>()).then_some(0)
	}

	fn name<P: 'static>() -> Option<&'static str> {
		(core::any::TypeId::of::<P>() == core::any::TypeId::of::<System>()).then_some("System")
	}
}

const NORMAL_DISPATCH_RATIO: Perbill = Perbill::from_percent(75);
const MAX_BLOCK_WEIGHT: Weight = Weight::from_parts(1024, u64::MAX);

parameter_types! {
	pub Version: RuntimeVersion = RuntimeVersion {
		spec_name: Cow::Borrowed("test"),
		impl_name: Cow::Borrowed("system-test"),
		authoring_version: 1,
		spec_version: 1,
		impl_version: 1,
		transaction_version: 2,
	};
	pub const DbWeight: RuntimeDbWeight = RuntimeDbWeight {
		read: 10,
		write: 100,
	};
	pub RuntimeBlockWeights: limits::BlockWeights = limits::BlockWeights::builder()
		.base_block(Weight::from_parts(10, 0))
		.for_class(DispatchClass::all(), |weights| {
			weights.base_extrinsic = Weight::from_parts(5, 0);
		})
		.for_class(DispatchClass::Normal, |weights| {
			weights.max_total = Some(NORMAL_DISPATCH_RATIO * MAX_BLOCK_WEIGHT);
		})
		.for_class(DispatchClass::Operational, |weights| {
			weights.base_extrinsic = Weight::from_parts(10, 0);
			weights.max_total = Some(MAX_BLOCK_WEIGHT);
			weights.reserved = Some(
				MAX_BLOCK_WEIGHT - NORMAL_DISPATCH_RATIO * MAX_BLOCK_WEIGHT
			);
		})
		.avg_block_initialization(Perbill::from_percent(0))
		.build_or_panic();
	pub RuntimeBlockLength: limits::BlockLength =
		limits::BlockLength::max_with_normal_ratio(1024, NORMAL_DISPATCH_RATIO);
	pub static Killed: Vec<u64> = vec![];
}

pub struct RecordKilled;
impl OnKilledAccount<u64> for RecordKilled {
	fn on_killed_account(_ext: &mut dyn Externalities, who: &u64) {
		Killed::mutate(|r| r.push(*who))
	}
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Test;

impl Config for Test {
	type RuntimeCall = RuntimeCall;
	type RuntimeEvent = RuntimeEvent;
	type Nonce = u64;
	type Hash = H256;
	type Hashing = BlakeTwo256;
	type AccountId = u64;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Block = TestBlock<Extrinsic>;
	type BlockHashCount = ConstU64<10>;
	type BlockWeights = RuntimeBlockWeights;
	type BlockLength = RuntimeBlockLength;
	type DbWeight = DbWeight;
	type Version = Version;
	type PalletInfo = PalletInfo;
	type AccountData = u64;
	type OnNewAccount = ();
	type OnKilledAccount = RecordKilled;
	type SystemWeightInfo = ();
}

/// Extensions exercised by the mock's extrinsics.
pub type TxExtension = (CheckNonZeroSender<Test>, CheckWeight<Test>);

pub type Extrinsic = TestXt<RuntimeCall, TxExtension>;

pub type SysEvent = frame_system::Event<Test>;

/// A simple call, which one doesn't matter.
pub const CALL: &<Test as Config>::RuntimeCall =
	&RuntimeCall::System(frame_system::Call::remark { remark: Vec::new() });

/// Create new externalities for `System` module tests.
pub fn new_test_ext() -> sp_io::TestExternalities {
	let mut ext: sp_io::TestExternalities = frame_system::GenesisConfig::<Test>::default()
		.build_storage()
		.expect("genesis storage builds; qed")
		.into();
	// Add to each test the initial weight of a block
	ext.execute_with(|ext| {
		System::register_extra_weight_unchecked(
			ext,
			<Test as crate::Config>::BlockWeights::get().base_block,
			DispatchClass::Mandatory,
		)
	});
	ext
}
