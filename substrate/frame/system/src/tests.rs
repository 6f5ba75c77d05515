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

use crate::*;
use frame_support::{
	assert_noop, assert_ok,
	dispatch::{Pays, PostDispatchInfo, WithPostDispatchInfo},
};
use hex_literal::hex;
use mock::{RuntimeCall, RuntimeEvent, *};
use pretty_assertions::assert_eq;
use sp_runtime::{
	traits::{BlakeTwo256, Hash, Header},
	DispatchError, DispatchErrorWithPostInfo, H256,
};

fn root() -> OriginFor<Test> {
	RawOrigin::Root
}

fn signed(who: u64) -> OriginFor<Test> {
	RawOrigin::Signed(who)
}

#[test]
fn storage_keys_follow_the_frame_layout() {
	assert_eq!(
		Number::<Test>::hashed_key(),
		hex!("26aa394eea5630e07c48ae0c9558cef702a5c1b19ab7a04f536c519aca4983ac")
	);
	assert_eq!(
		Account::<Test>::hashed_key_for(1)[..32],
		hex!("26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9")
	);
}

#[test]
fn origin_works() {
	let o = RawOrigin::<u64>::from(Some(10));
	assert_eq!(ensure_signed(o.clone()), Ok(10));
	assert_eq!(ensure_signed_or_root(o.clone()), Ok(Some(10)));
	assert_eq!(ensure_root(o), Err(BadOrigin));
	assert_eq!(ensure_none(RawOrigin::<u64>::from(None)), Ok(()));
	assert_eq!(ensure_signed_or_root(root()), Ok(None));
	assert_eq!(ensure_signed(RawOrigin::<u64>::None), Err(BadOrigin));
}

#[test]
fn unique_datum_works() {
	new_test_ext().execute_with(|ext| {
		assert_eq!(System::block_hash(ext, 0), H256::repeat_byte(69));
		assert_eq!(System::parent_hash(ext), H256::repeat_byte(69));
		assert_eq!(
			LastRuntimeUpgrade::get(ext),
			Some(LastRuntimeUpgradeInfo::from(Version::get()))
		);
		assert_eq!(System::last_runtime_upgrade_spec_version(ext), 1);
	});
}

#[test]
fn stored_map_works() {
	new_test_ext().execute_with(|ext| {
		assert_eq!(System::inc_providers(ext, &0), IncRefStatus::Created);
		assert_ok!(System::insert(ext, &0, 42));
		assert!(!System::is_provider_required(ext, &0));

		assert_eq!(
			Account::<Test>::get(ext, 0),
			AccountInfo { nonce: 0, providers: 1, consumers: 0, sufficients: 0, data: 42 }
		);

		assert_ok!(System::inc_consumers(ext, &0));
		assert!(System::is_provider_required(ext, &0));

		assert_ok!(System::insert(ext, &0, 69));
		assert!(System::is_provider_required(ext, &0));

		System::dec_consumers(ext, &0);
		assert!(!System::is_provider_required(ext, &0));

		assert!(Killed::get().is_empty());
		assert_ok!(System::remove(ext, &0));
		assert_ok!(System::dec_providers(ext, &0));
		assert_eq!(Killed::get(), vec![0u64]);
	});
}

#[test]
fn stored_map_without_references_does_not_create_accounts() {
	new_test_ext().execute_with(|ext| {
		assert_ok!(System::insert(ext, &7, 100));
		assert!(!System::account_exists(ext, &7));
		assert_eq!(<System as StoredMap<_, _>>::get(ext, &7), 0);
	});
}

#[test]
fn provider_ref_handover_to_self_sufficient_ref_works() {
	new_test_ext().execute_with(|ext| {
		assert_eq!(System::inc_providers(ext, &0), IncRefStatus::Created);
		System::inc_account_nonce(ext, 0);
		assert_eq!(System::account_nonce(ext, 0), 1);

		// a second reference coming and going doesn't change anything.
		assert_eq!(System::inc_sufficients(ext, &0), IncRefStatus::Existed);
		assert_eq!(System::dec_sufficients(ext, &0), DecRefStatus::Exists);
		assert_eq!(System::account_nonce(ext, 0), 1);

		// a provider reference coming and going doesn't change anything.
		assert_eq!(System::inc_providers(ext, &0), IncRefStatus::Existed);
		assert_eq!(System::dec_providers(ext, &0).unwrap(), DecRefStatus::Exists);
		assert_eq!(System::account_nonce(ext, 0), 1);

		// decreasing the providers with a self-sufficient present should not delete the account
		assert_eq!(System::inc_sufficients(ext, &0), IncRefStatus::Existed);
		assert_eq!(System::dec_providers(ext, &0).unwrap(), DecRefStatus::Exists);
		assert_eq!(System::account_nonce(ext, 0), 1);

		// decreasing the sufficients should delete the account
		assert_eq!(System::dec_sufficients(ext, &0), DecRefStatus::Reaped);
		assert_eq!(System::account_nonce(ext, 0), 0);
	});
}

#[test]
fn self_sufficient_ref_handover_to_provider_ref_works() {
	new_test_ext().execute_with(|ext| {
		assert_eq!(System::inc_sufficients(ext, &0), IncRefStatus::Created);
		System::inc_account_nonce(ext, 0);
		assert_eq!(System::account_nonce(ext, 0), 1);

		// a second reference coming and going doesn't change anything.
		assert_eq!(System::inc_providers(ext, &0), IncRefStatus::Existed);
		assert_eq!(System::dec_providers(ext, &0).unwrap(), DecRefStatus::Exists);
		assert_eq!(System::account_nonce(ext, 0), 1);

		// a sufficient reference coming and going doesn't change anything.
		assert_eq!(System::inc_sufficients(ext, &0), IncRefStatus::Existed);
		assert_eq!(System::dec_sufficients(ext, &0), DecRefStatus::Exists);
		assert_eq!(System::account_nonce(ext, 0), 1);

		// decreasing the sufficients with a provider present should not delete the account
		assert_eq!(System::inc_providers(ext, &0), IncRefStatus::Existed);
		assert_eq!(System::dec_sufficients(ext, &0), DecRefStatus::Exists);
		assert_eq!(System::account_nonce(ext, 0), 1);

		// decreasing the providers should delete the account
		assert_eq!(System::dec_providers(ext, &0).unwrap(), DecRefStatus::Reaped);
		assert_eq!(System::account_nonce(ext, 0), 0);
	});
}

#[test]
fn sufficient_cannot_support_consumer() {
	new_test_ext().execute_with(|ext| {
		assert_eq!(System::inc_sufficients(ext, &0), IncRefStatus::Created);
		System::inc_account_nonce(ext, 0);
		assert_eq!(System::account_nonce(ext, 0), 1);
		assert_noop!(ext, System::inc_consumers(ext, &0), DispatchError::NoProviders);

		assert_eq!(System::inc_providers(ext, &0), IncRefStatus::Existed);
		assert_ok!(System::inc_consumers(ext, &0));
		assert_noop!(ext, System::dec_providers(ext, &0), DispatchError::ConsumerRemaining);
	});
}

#[test]
fn provider_required_to_support_consumer() {
	new_test_ext().execute_with(|ext| {
		assert_noop!(ext, System::inc_consumers(ext, &0), DispatchError::NoProviders);

		assert_eq!(System::inc_providers(ext, &0), IncRefStatus::Created);
		System::inc_account_nonce(ext, 0);
		assert_eq!(System::account_nonce(ext, 0), 1);

		assert_eq!(System::inc_providers(ext, &0), IncRefStatus::Existed);
		assert_eq!(System::dec_providers(ext, &0).unwrap(), DecRefStatus::Exists);
		assert_eq!(System::account_nonce(ext, 0), 1);

		assert_ok!(System::inc_consumers(ext, &0));
		assert_noop!(ext, System::dec_providers(ext, &0), DispatchError::ConsumerRemaining);

		System::dec_consumers(ext, &0);
		assert_eq!(System::dec_providers(ext, &0).unwrap(), DecRefStatus::Reaped);
		assert_eq!(System::account_nonce(ext, 0), 0);
	});
}

#[test]
fn account_lifecycle_emits_events() {
	new_test_ext().execute_with(|ext| {
		System::set_block_number(ext, 1);
		assert_eq!(System::inc_providers(ext, &5), IncRefStatus::Created);
		System::assert_last_event(ext, SysEvent::NewAccount { account: 5 }.into());
		assert_eq!(System::dec_providers(ext, &5).unwrap(), DecRefStatus::Reaped);
		System::assert_last_event(ext, SysEvent::KilledAccount { account: 5 }.into());
		assert_eq!(Killed::get(), vec![5u64]);
		assert_eq!(System::events(ext).len(), 2);
	});
}

#[test]
fn deposit_event_should_work() {
	new_test_ext().execute_with(|ext| {
		System::reset_events(ext);
		System::initialize(ext, &1, &[0u8; 32].into(), &Default::default());
		System::note_finished_extrinsics(ext);
		System::deposit_event(ext, SysEvent::CodeUpdated);
		System::finalize(ext);
		assert_eq!(
			System::events(ext),
			vec![EventRecord {
				phase: Phase::Finalization,
				event: SysEvent::CodeUpdated.into(),
				topics: vec![],
			}]
		);

		let normal_base = <Test as crate::Config>::BlockWeights::get()
			.get(DispatchClass::Normal)
			.base_extrinsic;

		System::reset_events(ext);
		System::initialize(ext, &2, &[0u8; 32].into(), &Default::default());
		System::deposit_event(ext, SysEvent::NewAccount { account: 32 });
		System::note_finished_initialize(ext);
		System::deposit_event(ext, SysEvent::KilledAccount { account: 42 });
		System::note_applied_extrinsic(ext, &Ok(().into()), Default::default());
		System::note_applied_extrinsic(
			ext,
			&Err(DispatchError::BadOrigin.into()),
			Default::default(),
		);
		System::note_finished_extrinsics(ext);
		System::deposit_event(ext, SysEvent::NewAccount { account: 3 });
		System::finalize(ext);
		assert_eq!(
			System::events(ext),
			vec![
				EventRecord {
					phase: Phase::Initialization,
					event: SysEvent::NewAccount { account: 32 }.into(),
					topics: vec![],
				},
				EventRecord {
					phase: Phase::ApplyExtrinsic(0),
					event: SysEvent::KilledAccount { account: 42 }.into(),
					topics: vec![]
				},
				EventRecord {
					phase: Phase::ApplyExtrinsic(0),
					event: SysEvent::ExtrinsicSuccess {
						dispatch_info: DispatchInfo { weight: normal_base, ..Default::default() }
					}
					.into(),
					topics: vec![]
				},
				EventRecord {
					phase: Phase::ApplyExtrinsic(1),
					event: SysEvent::ExtrinsicFailed {
						dispatch_error: DispatchError::BadOrigin,
						dispatch_info: DispatchInfo { weight: normal_base, ..Default::default() }
					}
					.into(),
					topics: vec![]
				},
				EventRecord {
					phase: Phase::Finalization,
					event: SysEvent::NewAccount { account: 3 }.into(),
					topics: vec![]
				},
			]
		);
		assert_eq!(EventCount::get(ext), 5);
	});
}

#[test]
fn deposit_event_uses_actual_weight_and_pays_fee() {
	new_test_ext().execute_with(|ext| {
		System::reset_events(ext);
		System::initialize(ext, &1, &[0u8; 32].into(), &Default::default());
		System::note_finished_initialize(ext);

		let pre_info = DispatchInfo { weight: Weight::from_parts(1000, 0), ..Default::default() };
		System::note_applied_extrinsic(ext, &Ok(Some(Weight::from_parts(300, 0)).into()), pre_info);
		System::note_applied_extrinsic(ext, &Ok(Some(Weight::from_parts(1000, 0)).into()), pre_info);
		System::note_applied_extrinsic(
			ext,
			&Ok(Some(Weight::from_parts(1200, 0)).into()),
			pre_info,
		);
		System::note_applied_extrinsic(
			ext,
			&Ok((Some(Weight::from_parts(2_500_000, 0)), Pays::No).into()),
			pre_info,
		);
		System::note_applied_extrinsic(ext, &Ok(Pays::No.into()), pre_info);
		System::note_applied_extrinsic(
			ext,
			&Err(DispatchError::BadOrigin.with_weight(Weight::from_parts(999, 0))),
			pre_info,
		);
		System::note_applied_extrinsic(
			ext,
			&Err(DispatchErrorWithPostInfo {
				post_info: PostDispatchInfo {
					actual_weight: Some(Weight::from_parts(800, 0)),
					pays_fee: Pays::No,
				},
				error: DispatchError::BadOrigin,
			}),
			pre_info,
		);

		let base = <Test as crate::Config>::BlockWeights::get()
			.get(DispatchClass::Normal)
			.base_extrinsic;
		let weight = |w: u64| Weight::from_parts(w, 0) + base;
		let success = |w: u64, pays_fee: Pays| -> RuntimeEvent {
			SysEvent::ExtrinsicSuccess {
				dispatch_info: DispatchInfo { weight: weight(w), pays_fee, ..Default::default() },
			}
			.into()
		};
		let failed = |w: u64, pays_fee: Pays| -> RuntimeEvent {
			SysEvent::ExtrinsicFailed {
				dispatch_error: DispatchError::BadOrigin,
				dispatch_info: DispatchInfo { weight: weight(w), pays_fee, ..Default::default() },
			}
			.into()
		};

		let got = System::events(ext).into_iter().map(|r| r.event).collect::<Vec<_>>();
		assert_eq!(
			got,
			vec![
				// actual weight is used
				success(300, Pays::Yes),
				// pre-dispatch weight is the upper bound
				success(1000, Pays::Yes),
				success(1000, Pays::Yes),
				// `Pays::No` is honoured, even above the bound
				success(1000, Pays::No),
				success(1000, Pays::No),
				// failures carry their post info too
				failed(999, Pays::Yes),
				failed(800, Pays::No),
			]
		);
	});
}

#[test]
fn deposit_event_topics() {
	new_test_ext().execute_with(|ext| {
		const BLOCK_NUMBER: u64 = 1;

		System::reset_events(ext);
		System::initialize(ext, &BLOCK_NUMBER, &[0u8; 32].into(), &Default::default());
		System::note_finished_extrinsics(ext);

		let topics = vec![H256::repeat_byte(1), H256::repeat_byte(2), H256::repeat_byte(3)];

		// We deposit a few events with different sets of topics.
		System::deposit_event_indexed(ext, &topics[0..3], SysEvent::NewAccount { account: 1 }.into());
		System::deposit_event_indexed(ext, &topics[0..1], SysEvent::NewAccount { account: 2 }.into());
		System::deposit_event_indexed(ext, &topics[1..2], SysEvent::NewAccount { account: 3 }.into());

		System::finalize(ext);

		// Check that topics are reflected in the event record.
		assert_eq!(
			System::events(ext),
			vec![
				EventRecord {
					phase: Phase::Finalization,
					event: SysEvent::NewAccount { account: 1 }.into(),
					topics: topics[0..3].to_vec(),
				},
				EventRecord {
					phase: Phase::Finalization,
					event: SysEvent::NewAccount { account: 2 }.into(),
					topics: topics[0..1].to_vec(),
				},
				EventRecord {
					phase: Phase::Finalization,
					event: SysEvent::NewAccount { account: 3 }.into(),
					topics: topics[1..2].to_vec(),
				}
			]
		);
	});
}

#[test]
fn events_not_emitted_during_genesis() {
	new_test_ext().execute_with(|ext| {
		// Block Number is zero at genesis
		assert!(System::block_number(ext).is_zero());
		System::on_created_account(ext, 1);
		assert!(System::events(ext).is_empty());
		// Events will be emitted starting on block 1
		System::set_block_number(ext, 1);
		System::on_created_account(ext, 2);
		assert_eq!(System::events(ext).len(), 1);
		assert_eq!(EventCount::get(ext), 1);
	});
}

#[test]
fn prunes_block_hash_mappings() {
	new_test_ext().execute_with(|ext| {
		// simulate import of 15 blocks
		for n in 1..=15 {
			System::reset_events(ext);
			System::initialize(ext, &n, &[n as u8 - 1; 32].into(), &Default::default());

			System::finalize(ext);
		}

		// first 5 block hashes are pruned
		for n in 0..5 {
			assert_eq!(System::block_hash(ext, n), H256::zero());
		}

		// the remaining 10 are kept
		for n in 5..15 {
			assert_eq!(System::block_hash(ext, n), [n as u8; 32].into());
		}
	})
}

#[test]
fn finalize_builds_the_header() {
	new_test_ext().execute_with(|ext| {
		let parent: H256 = [7u8; 32].into();
		System::reset_events(ext);
		System::initialize(ext, &3, &parent, &Default::default());
		System::note_finished_initialize(ext);

		let xts = vec![vec![1u8, 2, 3], vec![4u8]];
		for xt in &xts {
			System::note_extrinsic(ext, xt.clone());
			System::note_applied_extrinsic(ext, &Ok(().into()), Default::default());
		}
		System::note_finished_extrinsics(ext);
		assert_eq!(System::extrinsic_count(ext), 2);
		System::deposit_log(ext, generic::DigestItem::Other(vec![9]));

		let header = System::finalize(ext);
		assert_eq!(*header.number(), 3);
		assert_eq!(*header.parent_hash(), parent);
		assert_eq!(*header.extrinsics_root(), BlakeTwo256::ordered_trie_root(xts.clone()));
		assert_eq!(*header.extrinsics_root(), extrinsics_data_root::<BlakeTwo256>(xts));
		assert_eq!(header.digest().logs(), &[generic::DigestItem::Other(vec![9])]);
		assert_eq!(*header.state_root(), H256::from_slice(&ext.storage_root()));

		// temporary entries are gone, events stay for inspection
		assert!(ExtrinsicData::iter(ext).is_empty());
		assert_eq!(ExtrinsicCount::get(ext), None);
		assert_eq!(AllExtrinsicsLen::get(ext), None);
		assert_eq!(ExecutionPhase::get(ext), None);
		assert_eq!(System::events(ext).len(), 2);
	});
}

#[test]
fn initialize_resets_block_weight() {
	new_test_ext().execute_with(|ext| {
		assert_eq!(
			System::block_weight(ext).total(),
			<Test as crate::Config>::BlockWeights::get().base_block
		);
		System::initialize(ext, &1, &[0u8; 32].into(), &Default::default());
		assert_eq!(System::block_weight(ext).total(), Weight::zero());
		assert_eq!(System::extrinsic_index(ext), Some(0));
		assert_eq!(ExecutionPhase::get(ext), Some(Phase::Initialization));
		assert_eq!(System::block_hash(ext, 0), H256::zero());
	});
}

#[test]
fn remark_works() {
	new_test_ext().execute_with(|ext| {
		assert_ok!(System::remark(ext, signed(1), vec![1, 2, 3]));
		assert_ok!(System::remark(ext, root(), vec![]));
		assert_noop!(ext, System::remark(ext, RawOrigin::None, vec![]), BadOrigin);
	});
}

#[test]
fn remark_with_event_works() {
	new_test_ext().execute_with(|ext| {
		System::set_block_number(ext, 1);
		assert_noop!(ext, System::remark_with_event(ext, root(), vec![1]), BadOrigin);
		assert_ok!(System::remark_with_event(ext, signed(1), b"hello".to_vec()));
		System::assert_last_event(
			ext,
			SysEvent::Remarked { sender: 1, hash: BlakeTwo256::hash(b"hello") }.into(),
		);
	});
}

#[test]
fn set_code_requires_root_and_notes_the_upgrade() {
	new_test_ext().execute_with(|ext| {
		System::set_block_number(ext, 1);
		assert_noop!(ext, System::set_code(ext, signed(1), vec![1, 2]), BadOrigin);

		assert_ok!(System::set_code(ext, root(), vec![1, 2]));
		assert_eq!(unhashed::get_raw(ext, well_known_keys::CODE), Some(vec![1, 2]));
		System::assert_has_event(ext, SysEvent::CodeUpdated.into());
		assert_eq!(
			System::digest(ext).logs(),
			&[generic::DigestItem::RuntimeEnvironmentUpdated]
		);
	});
}

#[test]
fn raw_storage_calls_work() {
	new_test_ext().execute_with(|ext| {
		let items = vec![
			(b"hello".to_vec(), b"world".to_vec()),
			(b":prefix:a".to_vec(), vec![1]),
			(b":prefix:b".to_vec(), vec![2]),
			(b":prefix:c".to_vec(), vec![3]),
		];
		assert_noop!(ext, System::set_storage(ext, signed(1), items.clone()), BadOrigin);
		assert_ok!(System::set_storage(ext, root(), items));
		assert_eq!(unhashed::get_raw(ext, b"hello"), Some(b"world".to_vec()));

		assert_ok!(System::kill_storage(ext, root(), vec![b"hello".to_vec()]));
		assert!(!unhashed::exists(ext, b"hello"));

		assert_ok!(System::kill_prefix(ext, root(), b":prefix:".to_vec(), 2));
		assert_eq!(unhashed::keys_with_prefix(ext, b":prefix:").len(), 1);
		assert_ok!(System::kill_prefix(ext, root(), b":prefix:".to_vec(), 2));
		assert!(unhashed::keys_with_prefix(ext, b":prefix:").is_empty());
	});
}

#[test]
fn authorized_upgrade_flow_works() {
	new_test_ext().execute_with(|ext| {
		System::set_block_number(ext, 1);
		let code = vec![1, 2, 3, 4];
		let hash = BlakeTwo256::hash(&code);

		assert_noop!(
			ext,
			System::apply_authorized_upgrade(ext, signed(1), code.clone()),
			Error::<Test>::NothingAuthorized
		);
		assert_noop!(ext, System::authorize_upgrade(ext, signed(1), hash), BadOrigin);
		assert_ok!(System::authorize_upgrade(ext, root(), hash));
		System::assert_last_event(ext, SysEvent::UpgradeAuthorized { code_hash: hash }.into());
		assert_eq!(AuthorizedUpgrade::<Test>::get(ext), Some(hash));

		assert_noop!(
			ext,
			System::apply_authorized_upgrade(ext, signed(1), vec![9]),
			Error::<Test>::Unauthorized
		);

		// anyone may apply the code, and it is free
		let post = System::apply_authorized_upgrade(ext, RawOrigin::None, code.clone()).unwrap();
		assert_eq!(post, PostDispatchInfo { actual_weight: None, pays_fee: Pays::No });
		assert_eq!(AuthorizedUpgrade::<Test>::get(ext), None);
		assert_eq!(unhashed::get_raw(ext, well_known_keys::CODE), Some(code));
		System::assert_last_event(ext, SysEvent::CodeUpdated.into());
	});
}

#[test]
fn module_errors_carry_the_pallet_index() {
	let err: DispatchError = Error::<Test>::Unauthorized.into();
	match err {
		DispatchError::Module(module) => {
			assert_eq!(module.index, 0);
			assert_eq!(module.error, [1, 0, 0, 0]);
			assert_eq!(module.message, Some("Unauthorized"));
		},
		other => panic!("unexpected error {other:?}"),
	}
}

#[test]
fn authorized_upgrade_is_validated_as_unsigned() {
	new_test_ext().execute_with(|ext| {
		let code = vec![5u8; 8];
		let call = Call::<Test>::apply_authorized_upgrade { code: code.clone() };
		assert_eq!(
			System::validate_unsigned(ext, TransactionSource::External, &call),
			Err(InvalidTransaction::Call.into())
		);

		AuthorizedUpgrade::<Test>::put(ext, BlakeTwo256::hash(&code));
		let valid = System::validate_unsigned(ext, TransactionSource::External, &call).unwrap();
		assert_eq!(valid.priority, 100);
		assert_eq!(valid.provides, vec![BlakeTwo256::hash(&code).as_ref().to_vec()]);
		assert_ok!(<System as ValidateUnsigned>::pre_dispatch(ext, &call));

		let remark = Call::<Test>::remark { remark: vec![] };
		assert_eq!(
			System::validate_unsigned(ext, TransactionSource::External, &remark),
			Err(UnknownTransaction::NoUnsignedValidator.into())
		);
	});
}

#[test]
fn calls_dispatch_through_the_runtime_call() {
	new_test_ext().execute_with(|ext| {
		System::set_block_number(ext, 1);
		let call = RuntimeCall::System(Call::remark_with_event { remark: vec![7] });
		assert_eq!(call.get_dispatch_info().class, DispatchClass::Normal);
		assert_ok!(call.dispatch(ext, signed(4)));
		System::assert_last_event(
			ext,
			SysEvent::Remarked { sender: 4, hash: BlakeTwo256::hash(&[7]) }.into(),
		);

		let call = RuntimeCall::System(Call::set_code { code: vec![] });
		assert_eq!(call.get_dispatch_info().class, DispatchClass::Operational);
		assert_eq!(
			call.dispatch(ext, signed(4)).map_err(|e| e.error),
			Err(DispatchError::BadOrigin)
		);
	});
}

#[test]
fn call_encoding_uses_fixed_indices() {
	assert_eq!(Call::<Test>::remark { remark: vec![] }.encode(), vec![0, 0]);
	assert_eq!(Call::<Test>::set_code { code: vec![] }.encode(), vec![2, 0]);
	assert_eq!(Call::<Test>::remark_with_event { remark: vec![] }.encode(), vec![7, 0]);
	assert_eq!(
		RuntimeCall::System(Call::<Test>::kill_prefix { prefix: vec![], subkeys: 1 }).encode(),
		vec![0, 6, 0, 1, 0, 0, 0]
	);
}

#[test]
fn runtime_upgraded_detection() {
	let last = LastRuntimeUpgradeInfo::from(Version::get());
	let mut current = Version::get();
	assert!(!last.was_upgraded(&current));
	current.spec_version += 1;
	assert!(last.was_upgraded(&current));
	let mut renamed = Version::get();
	renamed.spec_name = "other".into();
	assert!(last.was_upgraded(&renamed));
}
