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

//! Weights for the system module.
//!
//! Figures were taken from benchmark runs on reference hardware: `b`, `i` and `p` are the
//! remark length, number of items and number of removed subkeys respectively.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::weights::{RocksDbWeight, Weight};
use sp_runtime::traits::Get;

/// Weight functions needed for the system module.
pub trait WeightInfo {
	fn remark(b: u32) -> Weight;
	fn remark_with_event(b: u32) -> Weight;
	fn set_code() -> Weight;
	fn set_storage(i: u32) -> Weight;
	fn kill_storage(i: u32) -> Weight;
	fn kill_prefix(p: u32) -> Weight;
	fn authorize_upgrade() -> Weight;
	fn apply_authorized_upgrade() -> Weight;
}

/// Weights for the system module using the Substrate node and recommended hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: crate::Config> WeightInfo for SubstrateWeight<T> {
	fn remark(b: u32) -> Weight {
		Weight::from_parts(2_091_000, 0)
			.saturating_add(Weight::from_parts(387, 0).saturating_mul(b.into()))
	}
	fn remark_with_event(b: u32) -> Weight {
		Weight::from_parts(5_997_000, 0)
			.saturating_add(Weight::from_parts(1_732, 0).saturating_mul(b.into()))
	}
	/// Storage: `System::Digest` (r:1 w:1)
	/// Storage: UNKNOWN KEY `0x3a636f6465` (r:0 w:1)
	fn set_code() -> Weight {
		Weight::from_parts(102_442_000, 1485)
			.saturating_add(T::DbWeight::get().reads(1_u64))
			.saturating_add(T::DbWeight::get().writes(2_u64))
	}
	/// Storage: `Skipped::Metadata` (r:0 w:0)
	fn set_storage(i: u32) -> Weight {
		Weight::from_parts(2_012_000, 0)
			.saturating_add(Weight::from_parts(779_491, 0).saturating_mul(i.into()))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(i.into())))
	}
	fn kill_storage(i: u32) -> Weight {
		Weight::from_parts(2_042_000, 0)
			.saturating_add(Weight::from_parts(597_350, 0).saturating_mul(i.into()))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(i.into())))
	}
	fn kill_prefix(p: u32) -> Weight {
		Weight::from_parts(3_872_000, 86)
			.saturating_add(Weight::from_parts(1_130_441, 0).saturating_mul(p.into()))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(p.into())))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(p.into())))
			.saturating_add(Weight::from_parts(0, 70).saturating_mul(p.into()))
	}
	/// Storage: `System::AuthorizedUpgrade` (r:0 w:1)
	fn authorize_upgrade() -> Weight {
		Weight::from_parts(8_731_000, 0).saturating_add(T::DbWeight::get().writes(1_u64))
	}
	/// Storage: `System::AuthorizedUpgrade` (r:1 w:1)
	/// Storage: `System::Digest` (r:1 w:1)
	/// Storage: UNKNOWN KEY `0x3a636f6465` (r:0 w:1)
	fn apply_authorized_upgrade() -> Weight {
		Weight::from_parts(106_128_000, 1518)
			.saturating_add(T::DbWeight::get().reads(2_u64))
			.saturating_add(T::DbWeight::get().writes(3_u64))
	}
}

// For backwards compatibility and tests.
impl WeightInfo for () {
	fn remark(b: u32) -> Weight {
		Weight::from_parts(2_091_000, 0)
			.saturating_add(Weight::from_parts(387, 0).saturating_mul(b.into()))
	}
	fn remark_with_event(b: u32) -> Weight {
		Weight::from_parts(5_997_000, 0)
			.saturating_add(Weight::from_parts(1_732, 0).saturating_mul(b.into()))
	}
	fn set_code() -> Weight {
		Weight::from_parts(102_442_000, 1485)
			.saturating_add(RocksDbWeight::get().reads(1_u64))
			.saturating_add(RocksDbWeight::get().writes(2_u64))
	}
	fn set_storage(i: u32) -> Weight {
		Weight::from_parts(2_012_000, 0)
			.saturating_add(Weight::from_parts(779_491, 0).saturating_mul(i.into()))
			.saturating_add(RocksDbWeight::get().writes((1_u64).saturating_mul(i.into())))
	}
	fn kill_storage(i: u32) -> Weight {
		Weight::from_parts(2_042_000, 0)
			.saturating_add(Weight::from_parts(597_350, 0).saturating_mul(i.into()))
			.saturating_add(RocksDbWeight::get().writes((1_u64).saturating_mul(i.into())))
	}
	fn kill_prefix(p: u32) -> Weight {
		Weight::from_parts(3_872_000, 86)
			.saturating_add(Weight::from_parts(1_130_441, 0).saturating_mul(p.into()))
			.saturating_add(RocksDbWeight::get().reads((1_u64).saturating_mul(p.into())))
			.saturating_add(RocksDbWeight::get().writes((1_u64).saturating_mul(p.into())))
			.saturating_add(Weight::from_parts(0, 70).saturating_mul(p.into()))
	}
	fn authorize_upgrade() -> Weight {
		Weight::from_parts(8_731_000, 0).saturating_add(RocksDbWeight::get().writes(1_u64))
	}
	fn apply_authorized_upgrade() -> Weight {
		Weight::from_parts(106_128_000, 1518)
			.saturating_add(RocksDbWeight::get().reads(2_u64))
			.saturating_add(RocksDbWeight::get().writes(3_u64))
	}
}
