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

//! Genesis and account bookkeeping tests.

use super::*;
use frame_support::traits::Currency;
use frame_system::AccountInfo;

#[test]
fn genesis_endows_accounts() {
	ExtBuilder::default().monied(true).build_and_execute_with(|ext| {
		assert_eq!(
			System::account(ext, &3),
			AccountInfo {
				nonce: 0,
				consumers: 0,
				providers: 1,
				sufficients: 0,
				data: AccountData { free: 30 },
			}
		);
		assert_eq!(Balances::total_issuance(ext), 110);
		// genesis does not record events.
		assert!(events(ext).is_empty());
	});
}

#[test]
fn genesis_rejects_balances_below_existential_deposit() {
	ExistentialDeposit::set(10);
	let err = pallet_balances::GenesisConfig::<Test> { balances: vec![(1, 50), (2, 5)] }
		.build_storage()
		.unwrap_err();
	assert!(err.starts_with(
		"the balance of any account should always be at least the existential deposit."
	));
	assert!(err.contains("2 is endowed with 5"));
}

#[test]
fn genesis_rejects_duplicates() {
	ExistentialDeposit::set(1);
	let err = pallet_balances::GenesisConfig::<Test> { balances: vec![(1, 5), (1, 7)] }
		.build_storage()
		.unwrap_err();
	assert_eq!(err, "duplicate balances in genesis.");
}

#[test]
fn rejected_genesis_writes_nothing() {
	ExistentialDeposit::set(10);
	let mut storage = sp_runtime::Storage::default();
	storage.insert(b"untouched".to_vec(), b"value".to_vec());
	let before = storage.clone();
	let config = pallet_balances::GenesisConfig::<Test> { balances: vec![(1, 100), (2, 1)] };
	assert!(config.assimilate_storage(&mut storage).is_err());
	assert_eq!(storage, before);
}

#[test]
fn genesis_config_reads_json() {
	let config: pallet_balances::GenesisConfig<Test> =
		serde_json::from_str(r#"{ "balances": [[1, 100], [2, 50]] }"#).unwrap();
	assert_eq!(config.balances, vec![(1, 100), (2, 50)]);

	let unknown = serde_json::from_str::<pallet_balances::GenesisConfig<Test>>(
		r#"{ "balances": [], "reserved": [] }"#,
	);
	assert!(unknown.is_err());
}

#[test]
fn account_data_lives_in_the_system_account() {
	ExtBuilder::default().build_and_execute_with(|ext| {
		assert_eq!(Balances::deposit_creating(ext, &7, 42), 42);
		assert_eq!(frame_system::Account::<Test>::get(ext, 7).data, AccountData { free: 42 });
		assert_eq!(Balances::account(ext, &7), AccountData { free: 42 });
	});
}

#[test]
fn events_carry_the_block_phase() {
	ExtBuilder::default().monied(true).build_and_execute_with(|ext| {
		System::set_extrinsic_index(ext, 0);
		frame_system::ExecutionPhase::put(ext, frame_system::Phase::ApplyExtrinsic(0));
		assert_eq!(Balances::deposit_creating(ext, &1, 5), 5);
		let record = System::events(ext).pop().unwrap();
		assert_eq!(record.phase, frame_system::Phase::ApplyExtrinsic(0));
		assert_eq!(
			record.event,
			RuntimeEvent::Balances(pallet_balances::Event::Deposit { who: 1, amount: 5 })
		);
	});
}
