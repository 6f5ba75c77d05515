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

//! Traits for hooking tasks to events in a blockchain's lifecycle.
//!
//! Every hook is implemented for tuples, so a runtime registers its modules' hooks as one tuple
//! and the executive drives them in declaration order.

use impl_trait_for_tuples::impl_for_tuples;
use sp_io::Externalities;
use sp_runtime::{
	traits::{AtLeast32BitUnsigned, UniqueSaturatedInto},
	Weight,
};

/// The block initialization trait.
///
/// Implementing this lets you express what should happen for your pallet when the block is
/// beginning (right before the first extrinsic is executed).
pub trait OnInitialize<BlockNumber> {
	/// Called at the beginning of the block, before any extrinsic.
	///
	/// Return the non-negotiable weight consumed in the block.
	fn on_initialize(_ext: &mut dyn Externalities, _n: BlockNumber) -> Weight {
		Weight::zero()
	}
}

#[impl_for_tuples(12)]
impl<BlockNumber: Clone> OnInitialize<BlockNumber> for Tuple {
	fn on_initialize(ext: &mut dyn Externalities, n: BlockNumber) -> Weight {
		let mut weight = Weight::zero();
		for_tuples!( #( weight = weight.saturating_add(Tuple::on_initialize(ext, n.clone())); )* );
		weight
	}
}

/// The block finalization trait.
///
/// Implementing this lets you express what should happen for your pallet when the block is ending.
pub trait OnFinalize<BlockNumber> {
	/// Called at the end of the block, after every extrinsic and `on_idle`.
	///
	/// Its weight must have been accounted for during `on_initialize`.
	fn on_finalize(_ext: &mut dyn Externalities, _n: BlockNumber) {}
}

#[impl_for_tuples(12)]
impl<BlockNumber: Clone> OnFinalize<BlockNumber> for Tuple {
	fn on_finalize(ext: &mut dyn Externalities, n: BlockNumber) {
		for_tuples!( #( Tuple::on_finalize(ext, n.clone()); )* );
	}
}

/// The block's on idle trait.
///
/// Implementing this lets you express what should happen for your pallet before
/// block finalization (see `on_finalize` hook) in case any remaining weight is left.
pub trait OnIdle<BlockNumber> {
	/// The block is being finalized.
	/// Implement to have something happen in case there is leftover weight.
	/// Check the passed `remaining_weight` to make sure it is high enough to allow for
	/// your pallet's extra computation.
	///
	/// NOTE: This function is called AFTER ALL extrinsics - including inherent extrinsics -
	/// in a block are applied but before `on_finalize` is executed.
	fn on_idle(
		_ext: &mut dyn Externalities,
		_n: BlockNumber,
		_remaining_weight: Weight,
	) -> Weight {
		Weight::zero()
	}
}

#[impl_for_tuples(12)]
impl<BlockNumber: Copy + AtLeast32BitUnsigned> OnIdle<BlockNumber> for Tuple {
	fn on_idle(ext: &mut dyn Externalities, n: BlockNumber, remaining_weight: Weight) -> Weight {
		let on_idle_functions: &[fn(&mut dyn Externalities, BlockNumber, Weight) -> Weight] =
			&[for_tuples!( #( Tuple::on_idle ),* )];
		let mut weight = Weight::zero();
		let len = on_idle_functions.len();
		if len == 0 {
			return weight
		}
		// Rotate the first pallet served with the block number, so that no pallet is always last.
		let start_index: u32 = (n % (len as u32).into()).unique_saturated_into();
		for on_idle_fn in on_idle_functions.iter().cycle().skip(start_index as usize).take(len) {
			let adjusted_remaining_weight = remaining_weight.saturating_sub(weight);
			weight = weight.saturating_add(on_idle_fn(ext, n, adjusted_remaining_weight));
		}
		weight
	}
}

/// The runtime upgrade trait.
///
/// Implementing this lets you express what should happen when the runtime upgrades,
/// and changes may need to occur to your module.
///
/// The executive calls it at most once per upgrade, before any `on_initialize` of the block that
/// first runs the new code. The returned weight is charged as mandatory.
pub trait OnRuntimeUpgrade {
	/// Perform a module upgrade.
	///
	/// Return the non-negotiable weight consumed for runtime upgrade.
	fn on_runtime_upgrade(_ext: &mut dyn Externalities) -> Weight {
		Weight::zero()
	}
}

#[impl_for_tuples(12)]
impl OnRuntimeUpgrade for Tuple {
	fn on_runtime_upgrade(ext: &mut dyn Externalities) -> Weight {
		let mut weight = Weight::zero();
		for_tuples!( #( weight = weight.saturating_add(Tuple::on_runtime_upgrade(ext)); )* );
		weight
	}
}
