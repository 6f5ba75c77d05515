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

//! Tests of the dispatchable functions.

use super::*;
use frame_support::{assert_noop, assert_ok, assert_storage_noop};
use frame_system::RawOrigin;
use sp_runtime::{traits::BadOrigin, DispatchError, ModuleError};

#[test]
fn transfer_allow_death_works() {
	ExtBuilder::default().monied(true).build_and_execute_with(|ext| {
		assert_ok!(Balances::transfer_allow_death(ext, RawOrigin::Signed(1), 2, 5));
		assert_eq!(Balances::free_balance(ext, &1), 5);
		assert_eq!(Balances::free_balance(ext, &2), 25);
		System::assert_last_event(
			ext,
			RuntimeEvent::Balances(pallet_balances::Event::Transfer { from: 1, to: 2, amount: 5 }),
		);

		assert_ok!(Balances::transfer_allow_death(ext, RawOrigin::Signed(1), 2, 5));
		assert!(!System::account_exists(ext, &1));
	});
}

#[test]
fn transfer_of_zero_is_a_noop() {
	ExtBuilder::default().monied(true).build_and_execute_with(|ext| {
		assert_storage_noop!(
			ext,
			assert_ok!(Balances::transfer_allow_death(ext, RawOrigin::Signed(1), 2, 0))
		);
		// even from an account that holds nothing.
		assert_storage_noop!(
			ext,
			assert_ok!(Balances::transfer_allow_death(ext, RawOrigin::Signed(99), 2, 0))
		);
	});
}

#[test]
fn transfer_requires_a_signed_origin() {
	ExtBuilder::default().monied(true).build_and_execute_with(|ext| {
		assert_noop!(
			ext,
			Balances::transfer_allow_death(ext, RawOrigin::Root, 2, 5),
			BadOrigin
		);
		assert_noop!(
			ext,
			Balances::transfer_keep_alive(ext, RawOrigin::None, 2, 5),
			BadOrigin
		);
	});
}

#[test]
fn transfer_keep_alive_works() {
	ExtBuilder::default().monied(true).build_and_execute_with(|ext| {
		assert_noop!(
			ext,
			Balances::transfer_keep_alive(ext, RawOrigin::Signed(1), 2, 10),
			Error::<Test>::Expendability
		);
		assert_ok!(Balances::transfer_keep_alive(ext, RawOrigin::Signed(1), 2, 9));
		assert_eq!(Balances::free_balance(ext, &1), 1);
		assert_eq!(Balances::free_balance(ext, &2), 29);
	});
}

#[test]
fn force_transfer_works() {
	ExtBuilder::default().monied(true).build_and_execute_with(|ext| {
		assert_noop!(
			ext,
			Balances::force_transfer(ext, RawOrigin::Signed(2), 1, 2, 10),
			BadOrigin
		);
		assert_ok!(Balances::force_transfer(ext, RawOrigin::Root, 1, 2, 10));
		assert!(!System::account_exists(ext, &1));
		assert_eq!(Balances::free_balance(ext, &2), 30);
	});
}

#[test]
fn force_set_balance_adjusts_issuance() {
	ExtBuilder::default()
		.existential_deposit(10)
		.monied(true)
		.build_and_execute_with(|ext| {
			assert_noop!(
				ext,
				Balances::force_set_balance(ext, RawOrigin::Signed(1), 1, 50),
				BadOrigin
			);

			assert_ok!(Balances::force_set_balance(ext, RawOrigin::Root, 1, 50));
			assert_eq!(Balances::free_balance(ext, &1), 50);
			assert_eq!(Balances::total_issuance(ext), 1050);

			assert_ok!(Balances::force_set_balance(ext, RawOrigin::Root, 5, 70));
			assert_eq!(Balances::total_issuance(ext), 1120);
			assert_eq!(System::providers(ext, &5), 1);

			// below the existential deposit the account is wiped out, without dust.
			assert_ok!(Balances::force_set_balance(ext, RawOrigin::Root, 1, 9));
			assert!(!System::account_exists(ext, &1));
			assert_eq!(Balances::total_issuance(ext), 1070);
			System::assert_last_event(
				ext,
				RuntimeEvent::Balances(pallet_balances::Event::BalanceSet { who: 1, free: 0 }),
			);
		});
}

#[test]
fn calls_dispatch_through_the_runtime_call() {
	ExtBuilder::default().monied(true).build_and_execute_with(|ext| {
		let call = RuntimeCall::Balances(pallet_balances::Call::transfer_allow_death {
			dest: 3,
			value: 4,
		});
		assert_eq!(
			call.get_dispatch_info(),
			DispatchInfo {
				weight: <() as WeightInfo>::transfer_allow_death(),
				class: frame_support::dispatch::DispatchClass::Normal,
				pays_fee: frame_support::dispatch::Pays::Yes,
			}
		);
		assert_ok!(call.dispatch(ext, RawOrigin::Signed(1)));
		assert_eq!(Balances::free_balance(ext, &3), 34);

		let failing =
			RuntimeCall::Balances(pallet_balances::Call::transfer_allow_death { dest: 3, value: 11 });
		let err = failing.dispatch(ext, RawOrigin::Signed(1)).unwrap_err();
		assert_eq!(
			err.error,
			DispatchError::Module(ModuleError {
				index: 1,
				error: [2, 0, 0, 0],
				message: Some("InsufficientBalance")
			})
		);
	});
}

#[test]
fn call_encoding_uses_fixed_indices() {
	let transfer = pallet_balances::Call::<Test>::transfer_allow_death { dest: 2, value: 5 };
	let mut expected = vec![0u8];
	expected.extend(2u64.encode());
	expected.extend(5u64.encode());
	assert_eq!(transfer.encode(), expected);

	let keep_alive = pallet_balances::Call::<Test>::transfer_keep_alive { dest: 2, value: 5 };
	assert_eq!(keep_alive.encode()[0], 3);

	let wrapped = RuntimeCall::Balances(keep_alive.clone());
	assert_eq!(&wrapped.encode()[..2], &[1, 3]);
	assert_eq!(RuntimeCall::decode(&mut &wrapped.encode()[..]).unwrap(), wrapped);
}
