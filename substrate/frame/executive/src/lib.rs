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

//! # Executive Module
//!
//! The Executive module acts as the orchestration layer for the runtime. It dispatches incoming
//! extrinsic calls to the respective modules in the runtime.
//!
//! ## Overview
//!
//! The executive module is not a typical module providing functionality around a specific
//! feature. It is a cross-cutting framework component for the FRAME modules. It works in
//! conjunction with the `frame_system` module to perform these cross-cutting functions.
//!
//! The Executive module provides functions to:
//!
//! - Check transaction validity.
//! - Initialize a block.
//! - Apply extrinsics.
//! - Execute a block.
//! - Finalize a block.
//! - Check and create the inherents of a block.
//!
//! Every function takes the storage of the block being processed as an explicit
//! [`Externalities`] handle; the executive keeps no state of its own.
//!
//! ### Implementations
//!
//! The Executive module provides the following implementations:
//!
//! - `ExecuteBlock`: Trait that can be used to execute a block.
//! - `Executive`: Type that can be used to make the FRAME available from the runtime.
//!
//! ## Usage
//!
//! The default Substrate node template declares the [`Executive`](./struct.Executive.html) type in
//! its library.
//!
//! ### Example
//!
//! `Executive` type declaration from the node template.
//!
//! ```ignore
//! /// Executive: handles dispatch to the various modules.
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     (),
//!     RuntimeInherents,
//! >;
//! ```
//!
//! ### Custom `OnRuntimeUpgrade` logic
//!
//! You can add custom logic that should be called in your runtime on a runtime upgrade. This is
//! done by setting an optional generic parameter. The custom logic will be called before
//! the on runtime upgrade logic of all modules is called.
//!
//! ```ignore
//! struct CustomOnRuntimeUpgrade;
//! impl frame_support::traits::OnRuntimeUpgrade for CustomOnRuntimeUpgrade {
//!     fn on_runtime_upgrade(ext: &mut dyn Externalities) -> Weight {
//!         // Do whatever you want.
//!         Weight::zero()
//!     }
//! }
//!
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     CustomOnRuntimeUpgrade,
//! >;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use codec::{Codec, Encode};
use core::marker::PhantomData;
use frame_support::{
	dispatch::{DispatchClass, DispatchInfo, GetDispatchInfo, PostDispatchInfo},
	hypothetically,
	inherent::{CheckInherentsResult, InherentData, RuntimeInherents},
	traits::{Get, OnFinalize, OnIdle, OnInitialize, OnRuntimeUpgrade},
};
use frame_system::pallet_prelude::BlockNumberFor;
use sp_io::Externalities;
use sp_runtime::{
	generic::Digest,
	traits::{
		self, Applyable, Checkable, Dispatchable, Extrinsic as ExtrinsicT, Header, One, Saturating,
		ValidateUnsigned, Zero,
	},
	transaction_validity::{InvalidTransaction, TransactionSource, TransactionValidity},
	ApplyExtrinsicResult, Weight,
};


const LOG_TARGET: &str = "runtime::executive";

pub type CheckedOf<E, C> = <E as Checkable<C>>::Checked;
pub type CallOf<E, C> = <CheckedOf<E, C> as Applyable>::Call;
pub type OriginOf<E, C> = <CallOf<E, C> as Dispatchable>::RuntimeOrigin;

/// Something that can execute a given block.
///
/// Executing a block means that all extrinsics in a given block will be executed and the resulting
/// header will be checked against the header of the given block.
pub trait ExecuteBlock<Block> {
	/// Execute the given `block`.
	///
	/// This will execute all extrinsics in the block and check that the resulting header is
	/// correct.
	///
	/// # Panic
	///
	/// Panics when an extrinsics panics or the resulting header doesn't match the expected header.
	fn execute_block(ext: &mut dyn Externalities, block: Block);
}

/// Main entry point for certain runtime actions as e.g. `execute_block`.
///
/// Generic parameters:
/// - `System`: Something that implements `frame_system::Config`
/// - `Block`: The block type of the runtime
/// - `Context`: The context that is used when checking an extrinsic.
/// - `UnsignedValidator`: The unsigned transaction validator of the runtime.
/// - `AllPalletsWithSystem`: Tuple that contains all modules including the system module. Will be
///   used to call hooks e.g. `on_initialize`.
/// - `OnRuntimeUpgrade`: Custom logic that should be called after a runtime upgrade. Modules are
///   already called by `AllPalletsWithSystem`. It will be called before all modules will be called.
/// - `Inherents`: The inherents of the runtime, used to create, position and check them.
pub struct Executive<
	System,
	Block,
	Context,
	UnsignedValidator,
	AllPalletsWithSystem,
	OnRuntimeUpgrade = (),
	Inherents = (),
>(
	PhantomData<(
		System,
		Block,
		Context,
		UnsignedValidator,
		AllPalletsWithSystem,
		OnRuntimeUpgrade,
		Inherents,
	)>,
);

impl<
		System: frame_system::Config,
		Block: traits::Block<Header = frame_system::HeaderFor<System>, Hash = System::Hash>,
		Context: Default,
		UnsignedValidator,
		AllPalletsWithSystem: OnRuntimeUpgrade
			+ OnInitialize<BlockNumberFor<System>>
			+ OnIdle<BlockNumberFor<System>>
			+ OnFinalize<BlockNumberFor<System>>,
		COnRuntimeUpgrade: OnRuntimeUpgrade,
		Inherents: RuntimeInherents<CallOf<Block::Extrinsic, Context>>,
	> ExecuteBlock<Block>
	for Executive<
		System,
		Block,
		Context,
		UnsignedValidator,
		AllPalletsWithSystem,
		COnRuntimeUpgrade,
		Inherents,
	>
where
	Block::Extrinsic: Checkable<Context> + Codec + ExtrinsicT<Call = CallOf<Block::Extrinsic, Context>>,
	CheckedOf<Block::Extrinsic, Context>: Applyable + GetDispatchInfo,
	CallOf<Block::Extrinsic, Context>:
		Dispatchable<Info = DispatchInfo, PostInfo = PostDispatchInfo>,
	OriginOf<Block::Extrinsic, Context>: From<Option<System::AccountId>>,
	UnsignedValidator: ValidateUnsigned<Call = CallOf<Block::Extrinsic, Context>>,
{
	fn execute_block(ext: &mut dyn Externalities, block: Block) {
		Executive::<
			System,
			Block,
			Context,
			UnsignedValidator,
			AllPalletsWithSystem,
			COnRuntimeUpgrade,
			Inherents,
		>::execute_block(ext, block);
	}
}

impl<
		System: frame_system::Config,
		Block: traits::Block<Header = frame_system::HeaderFor<System>, Hash = System::Hash>,
		Context: Default,
		UnsignedValidator,
		AllPalletsWithSystem: OnRuntimeUpgrade
			+ OnInitialize<BlockNumberFor<System>>
			+ OnIdle<BlockNumberFor<System>>
			+ OnFinalize<BlockNumberFor<System>>,
		COnRuntimeUpgrade: OnRuntimeUpgrade,
		Inherents: RuntimeInherents<CallOf<Block::Extrinsic, Context>>,
	>
	Executive<
		System,
		Block,
		Context,
		UnsignedValidator,
		AllPalletsWithSystem,
		COnRuntimeUpgrade,
		Inherents,
	>
where
	Block::Extrinsic: Checkable<Context> + Codec + ExtrinsicT<Call = CallOf<Block::Extrinsic, Context>>,
	CheckedOf<Block::Extrinsic, Context>: Applyable + GetDispatchInfo,
	CallOf<Block::Extrinsic, Context>:
		Dispatchable<Info = DispatchInfo, PostInfo = PostDispatchInfo>,
	OriginOf<Block::Extrinsic, Context>: From<Option<System::AccountId>>,
	UnsignedValidator: ValidateUnsigned<Call = CallOf<Block::Extrinsic, Context>>,
{
	/// Execute all `OnRuntimeUpgrade` of this runtime, and return the aggregate weight.
	pub fn execute_on_runtime_upgrade(ext: &mut dyn Externalities) -> Weight {
		<(COnRuntimeUpgrade, AllPalletsWithSystem) as OnRuntimeUpgrade>::on_runtime_upgrade(ext)
	}

	/// Start the execution of a particular block.
	pub fn initialize_block(ext: &mut dyn Externalities, header: &frame_system::HeaderFor<System>) {
		log::debug!(target: LOG_TARGET, "[{:?}] initializing block", header.number());
		let digests = Self::extract_pre_digest(header);
		Self::initialize_block_impl(ext, header.number(), header.parent_hash(), &digests);
	}

	fn extract_pre_digest(header: &frame_system::HeaderFor<System>) -> Digest {
		let mut digest = <Digest>::default();
		header.digest().logs().iter().for_each(|d| {
			if d.as_pre_runtime().is_some() {
				digest.push(d.clone())
			}
		});
		digest
	}

	fn initialize_block_impl(
		ext: &mut dyn Externalities,
		block_number: &BlockNumberFor<System>,
		parent_hash: &System::Hash,
		digest: &Digest,
	) {
		// Reset events before apply runtime upgrade hook.
		// This is required to preserve events from runtime upgrade hook.
		// This means the format of all the event related storages must always be compatible.
		frame_system::Pallet::<System>::reset_events(ext);

		let mut weight = Weight::zero();
		if Self::runtime_upgraded(&*ext) {
			let current = <System::Version as Get<_>>::get();
			log::info!(target: LOG_TARGET, "running runtime upgrade to {}", current);
			weight = weight.saturating_add(Self::execute_on_runtime_upgrade(ext));

			frame_system::LastRuntimeUpgrade::put(
				ext,
				frame_system::LastRuntimeUpgradeInfo::from(current),
			);
		}
		frame_system::Pallet::<System>::initialize(ext, block_number, parent_hash, digest);
		weight = weight.saturating_add(<AllPalletsWithSystem as OnInitialize<
			BlockNumberFor<System>,
		>>::on_initialize(ext, *block_number));
		weight = weight.saturating_add(<System::BlockWeights as Get<_>>::get().base_block);
		frame_system::Pallet::<System>::register_extra_weight_unchecked(
			ext,
			weight,
			DispatchClass::Mandatory,
		);

		frame_system::Pallet::<System>::note_finished_initialize(ext);
	}

	/// Returns if the runtime has been upgraded, based on [`frame_system::LastRuntimeUpgrade`].
	fn runtime_upgraded(ext: &dyn Externalities) -> bool {
		let last = frame_system::LastRuntimeUpgrade::get(ext);
		let current = <System::Version as Get<_>>::get();

		last.map(|v| v.was_upgraded(&current)).unwrap_or(true)
	}

	fn initial_checks(ext: &dyn Externalities, block: &Block) {
		let header = block.header();

		// Check that `parent_hash` is correct.
		let n = *header.number();
		assert!(
			n > BlockNumberFor::<System>::zero() &&
				frame_system::Pallet::<System>::block_hash(
					ext,
					n - BlockNumberFor::<System>::one()
				) == *header.parent_hash(),
			"Parent hash should be valid.",
		);

		if let Err(i) = Self::ensure_inherents_are_first(block) {
			panic!("Invalid inherent position for extrinsic at index {}", i);
		}
	}

	/// Ensure that all inherents of `block` form an unbroken prefix of its extrinsics.
	///
	/// Returns the number of inherents, or the index of the first inherent found after a
	/// non-inherent extrinsic.
	pub fn ensure_inherents_are_first(block: &Block) -> Result<u32, u32> {
		let mut num_inherents = 0u32;

		for (i, xt) in block.extrinsics().iter().enumerate() {
			if Self::is_inherent(xt) {
				if num_inherents != i as u32 {
					return Err(i as u32)
				}

				num_inherents += 1;
			}
		}

		Ok(num_inherents)
	}

	/// Whether `xt` is an inherent: unsigned and carrying an inherent call.
	pub fn is_inherent(xt: &Block::Extrinsic) -> bool {
		!xt.is_signed().unwrap_or(false) && Inherents::is_inherent(xt.call())
	}

	/// Actually execute all transitions for `block`.
	pub fn execute_block(ext: &mut dyn Externalities, block: Block) {
		Self::initialize_block(ext, block.header());

		// any initial checks
		Self::initial_checks(&*ext, &block);

		// execute extrinsics
		let (header, extrinsics) = block.deconstruct();
		Self::execute_extrinsics_with_book_keeping(ext, extrinsics, *header.number());

		// any final checks
		Self::final_checks(ext, &header);
	}

	/// Execute given extrinsics and take care of post-extrinsics book-keeping.
	fn execute_extrinsics_with_book_keeping(
		ext: &mut dyn Externalities,
		extrinsics: Vec<Block::Extrinsic>,
		block_number: BlockNumberFor<System>,
	) {
		extrinsics.into_iter().for_each(|e| {
			if let Err(e) = Self::apply_extrinsic(ext, e) {
				let err: &'static str = e.into();
				panic!("{}", err)
			}
		});

		// post-extrinsics book-keeping
		frame_system::Pallet::<System>::note_finished_extrinsics(ext);

		Self::idle_and_finalize_hook(ext, block_number);
	}

	/// Finalize the block - it is up the caller to ensure that all header fields are valid
	/// except state-root.
	pub fn finalize_block(ext: &mut dyn Externalities) -> frame_system::HeaderFor<System> {
		frame_system::Pallet::<System>::note_finished_extrinsics(ext);
		let block_number = frame_system::Pallet::<System>::block_number(ext);

		Self::idle_and_finalize_hook(ext, block_number);

		frame_system::Pallet::<System>::finalize(ext)
	}

	fn idle_and_finalize_hook(ext: &mut dyn Externalities, block_number: BlockNumberFor<System>) {
		let weight = frame_system::Pallet::<System>::block_weight(ext);
		let max_weight = <System::BlockWeights as Get<_>>::get().max_block;
		let remaining_weight = max_weight.saturating_sub(weight.total());

		if remaining_weight.all_gt(Weight::zero()) {
			let used_weight = <AllPalletsWithSystem as OnIdle<BlockNumberFor<System>>>::on_idle(
				ext,
				block_number,
				remaining_weight,
			);
			frame_system::Pallet::<System>::register_extra_weight_unchecked(
				ext,
				used_weight,
				DispatchClass::Mandatory,
			);
		}

		<AllPalletsWithSystem as OnFinalize<BlockNumberFor<System>>>::on_finalize(
			ext,
			block_number,
		);
	}

	/// Apply extrinsic outside of the block execution function.
	///
	/// This doesn't attempt to validate anything regarding the block, but it builds a list of uxt
	/// hashes.
	pub fn apply_extrinsic(ext: &mut dyn Externalities, uxt: Block::Extrinsic) -> ApplyExtrinsicResult {
		let encoded = uxt.encode();
		let encoded_len = encoded.len();
		log::trace!(target: LOG_TARGET, "applying extrinsic of {} bytes", encoded_len);

		// Verify that the signature is good.
		let xt = uxt.check(&*ext, &Default::default())?;

		// We don't need to make sure to `note_extrinsic` only after we know it's going to be
		// executed to prevent it from leaking in storage since at this point, it will either
		// execute or panic (and revert storage changes).
		frame_system::Pallet::<System>::note_extrinsic(ext, encoded);

		// AUDIT: Under no circumstances may this function panic from here onwards.

		// Decode parameters and dispatch
		let dispatch_info = xt.get_dispatch_info();
		let r = Applyable::apply::<UnsignedValidator>(xt, ext, &dispatch_info, encoded_len)?;

		// Mandatory(inherents) are not allowed to fail.
		//
		// The entire block should be discarded if an inherent fails to apply. Otherwise
		// it may open an attack vector.
		if r.is_err() && dispatch_info.class == DispatchClass::Mandatory {
			return Err(InvalidTransaction::BadMandatory.into())
		}

		frame_system::Pallet::<System>::note_applied_extrinsic(ext, &r, dispatch_info);

		Ok(r.map(|_| ()).map_err(|e| e.error))
	}

	fn final_checks(ext: &mut dyn Externalities, header: &frame_system::HeaderFor<System>) {
		// remove temporaries
		let new_header = frame_system::Pallet::<System>::finalize(ext);

		// check digest
		assert_eq!(
			header.digest().logs().len(),
			new_header.digest().logs().len(),
			"Number of digest items must match that calculated."
		);
		let items_zip = header.digest().logs().iter().zip(new_header.digest().logs().iter());
		for (header_item, computed_item) in items_zip {
			assert!(header_item == computed_item, "Digest item must match that calculated.");
		}

		// check storage root.
		let storage_root = new_header.state_root();
		assert!(header.state_root() == storage_root, "Storage root must match that calculated.");

		assert!(
			header.extrinsics_root() == new_header.extrinsics_root(),
			"Transaction trie root must be valid.",
		);
	}

	/// Check a given signed transaction for validity. This doesn't execute any
	/// side-effects; it merely checks whether the transaction would panic if it were included or
	/// not.
	///
	/// Changes made to storage are discarded before returning.
	pub fn validate_transaction(
		ext: &mut dyn Externalities,
		source: TransactionSource,
		uxt: Block::Extrinsic,
		block_hash: Block::Hash,
	) -> TransactionValidity {
		hypothetically!(ext, Self::validate_transaction_in_next_block(ext, source, uxt, block_hash))
	}

	fn validate_transaction_in_next_block(
		ext: &mut dyn Externalities,
		source: TransactionSource,
		uxt: Block::Extrinsic,
		block_hash: Block::Hash,
	) -> TransactionValidity {
		let next = frame_system::Pallet::<System>::block_number(ext).saturating_add(One::one());
		frame_system::Pallet::<System>::initialize(ext, &next, &block_hash, &Default::default());

		let encoded_len = uxt.using_encoded(|d| d.len());
		let xt = uxt.check(&*ext, &Default::default())?;
		let dispatch_info = xt.get_dispatch_info();

		if dispatch_info.class == DispatchClass::Mandatory {
			return Err(InvalidTransaction::MandatoryValidation.into())
		}

		xt.validate::<UnsignedValidator>(&*ext, source, &dispatch_info, encoded_len)
	}

	/// Create the inherent extrinsics for the block being built from the given `data`.
	pub fn inherent_extrinsics(ext: &dyn Externalities, data: &InherentData) -> Vec<Block::Extrinsic> {
		Inherents::create_inherents(ext, data)
			.into_iter()
			.map(<Block::Extrinsic as ExtrinsicT>::new_inherent)
			.collect()
	}

	/// Check the inherents of `block` against the environmental `data`.
	///
	/// Only the unsigned inherent prefix of the block is looked at. A fatal error stops the
	/// check immediately, other errors are collected.
	pub fn check_inherents(
		ext: &dyn Externalities,
		block: &Block,
		data: &InherentData,
	) -> CheckInherentsResult {
		let mut result = CheckInherentsResult::new();
		let mut inherents = Vec::new();

		for xt in block.extrinsics() {
			// Inherents are before any other extrinsics.
			// And signed extrinsics are not inherents.
			if !Self::is_inherent(xt) {
				break
			}

			let call = xt.call();
			if Inherents::check_inherent(ext, call, data, &mut result) {
				log::debug!(target: LOG_TARGET, "fatal inherent error, stop checking");
				return result
			}
			inherents.push(call);
		}

		Inherents::check_required(ext, &inherents, data, &mut result);
		result
	}
}
