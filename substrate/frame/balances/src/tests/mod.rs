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

//! Tests for the balances module.

#![cfg(test)]

use crate::{self as pallet_balances, *};
use codec::{Decode, Encode};
use frame_support::{
	dispatch::{DispatchInfo, GetDispatchInfo, PostDispatchInfo, UnfilteredDispatchable},
	parameter_types,
	traits::{ConstU64, Get},
};
use frame_system::pallet_prelude::OriginFor;
use sp_io::Externalities;
use sp_runtime::{
	testing::{Block as TestBlock, TestXt},
	traits::{BlakeTwo256, Dispatchable, IdentityLookup},
	BuildStorage, DispatchResultWithInfo, H256,
};

mod dispatchable_tests;
mod general_tests;

pub type System = frame_system::Pallet<Test>;
pub type Balances = pallet_balances::Pallet<Test>;

#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode, scale_info::TypeInfo)]
pub enum RuntimeCall {
	#[codec(index = 0)]
	System(frame_system::Call<Test>),
	#[codec(index = 1)]
	Balances(pallet_balances::Call<Test>),
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
	System(frame_system::Event<Test>),
	#[codec(index = 1)]
	Balances(pallet_balances::Event<Test>),
}

impl From<frame_system::Event<Test>> for RuntimeEvent {
	fn from(event: frame_system::Event<Test>) -> Self {
		RuntimeEvent::System(event)
	}
}

impl From<pallet_balances::Event<Test>> for RuntimeEvent {
	fn from(event: pallet_balances::Event<Test>) -> Self {
		RuntimeEvent::Balances(event)
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
		None
	}
}

parameter_types! {
	pub static ExistentialDeposit: u64 = 1;
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Test;

impl frame_system::Config for Test {
	type RuntimeCall = RuntimeCall;
	type RuntimeEvent = RuntimeEvent;
	type Nonce = u64;
	type Hash = H256;
	type Hashing = BlakeTwo256;
	type AccountId = u64;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Block = TestBlock<TestXt<RuntimeCall, ()>>;
	type BlockHashCount = ConstU64<250>;
	type BlockWeights = ();
	type BlockLength = ();
	type DbWeight = ();
	type Version = ();
	type PalletInfo = PalletInfo;
	type AccountData = AccountData<u64>;
	type OnNewAccount = ();
	type OnKilledAccount = ();
	type SystemWeightInfo = ();
}

impl Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type Balance = u64;
	type ExistentialDeposit = ExistentialDeposit;
	type AccountStore = System;
	type WeightInfo = ();
}

pub struct ExtBuilder {
	existential_deposit: u64,
	monied: bool,
}

impl Default for ExtBuilder {
	fn default() -> Self {
		Self { existential_deposit: 1, monied: false }
	}
}

impl ExtBuilder {
	pub fn existential_deposit(mut self, existential_deposit: u64) -> Self {
		self.existential_deposit = existential_deposit;
		self
	}

	pub fn monied(mut self, monied: bool) -> Self {
		self.monied = monied;
		if self.existential_deposit == 0 {
			self.existential_deposit = 1;
		}
		self
	}

	pub fn set_associated_consts(&self) {
		ExistentialDeposit::set(self.existential_deposit);
	}

	pub fn build(self) -> sp_io::TestExternalities {
		self.set_associated_consts();
		let mut storage =
			frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
		pallet_balances::GenesisConfig::<Test> {
			balances: if self.monied {
				vec![
					(1, 10 * self.existential_deposit),
					(2, 20 * self.existential_deposit),
					(3, 30 * self.existential_deposit),
					(4, 40 * self.existential_deposit),
					(12, 10 * self.existential_deposit),
				]
			} else {
				vec![]
			},
		}
		.assimilate_storage(&mut storage)
		.unwrap();

		let mut ext = sp_io::TestExternalities::new(storage);
		ext.execute_with(|ext| System::set_block_number(ext, 1));
		ext
	}

	pub fn build_and_execute_with(self, f: impl FnOnce(&mut dyn Externalities)) {
		self.build().execute_with(|ext| {
			f(&mut *ext);
			ensure_ti_valid(ext);
		})
	}
}

/// Check that the total-issuance matches the sum of all accounts' total balances.
pub fn ensure_ti_valid(ext: &dyn Externalities) {
	let sum = frame_system::Account::<Test>::iter(ext)
		.into_iter()
		.map(|(_, info)| info.data.free)
		.sum::<u64>();
	assert_eq!(TotalIssuance::<Test>::get(ext), sum, "Total Issuance wrong");
}

pub fn events(ext: &dyn Externalities) -> Vec<RuntimeEvent> {
	System::events(ext).into_iter().map(|r| r.event).collect()
}

pub fn balances_events(ext: &dyn Externalities) -> Vec<pallet_balances::Event<Test>> {
	events(ext)
		.into_iter()
		.filter_map(|e| if let RuntimeEvent::Balances(inner) = e { Some(inner) } else { None })
		.collect()
}

#[test]
fn existential_deposit_is_taken_from_the_builder() {
	ExtBuilder::default().existential_deposit(7).build_and_execute_with(|_| {
		assert_eq!(<Test as Config>::ExistentialDeposit::get(), 7);
	});
}
