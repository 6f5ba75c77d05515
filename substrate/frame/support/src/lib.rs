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

//! Support code for the runtime.
//!
//! ## Note on Tuple Traits
//!
//! Many of the traits defined in [`traits`] have auto-implementations on tuples as well. Usually,
//! the tuple is a function of number of modules in the runtime. By default, the traits are
//! implemented for tuples of up to 12 elements.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Private exports that are being used by macros.
///
/// The exports are not stable and should not be relied on.
#[doc(hidden)]
pub mod __private {
	pub use alloc::vec::Vec;
	pub use codec;
	pub use log;
	pub use paste;
	pub use sp_io::{self, Externalities};
	pub use sp_runtime::{self, DispatchError, TransactionOutcome};
}

#[macro_use]
pub mod macros;

pub mod dispatch;
pub mod hash;
pub mod inherent;
pub mod storage;
pub mod traits;
pub mod weights;

#[doc(inline)]
pub use crate::{
	dispatch::{DispatchClass, DispatchInfo, Pays, PostDispatchInfo},
	hash::{Blake2_128Concat, Identity, ReversibleStorageHasher, StorageHasher, Twox64Concat},
	storage::{
		types::{OptionQuery, StorageMap, StorageValue, ValueQuery},
		StorageInstance,
	},
};
#[cfg(feature = "std")]
pub use storage::storage_noop_guard::StorageNoopGuard;

pub use sp_runtime::{DispatchError, DispatchResult, MAX_MODULE_ERROR_ENCODED_SIZE};

use codec::{Codec, EncodeLike};
use core::fmt::Debug;
use scale_info::TypeInfo;

/// A type that can be used as a parameter in a dispatchable function.
pub trait Parameter: Codec + EncodeLike + Clone + Eq + Debug + TypeInfo {}
impl<T> Parameter for T where T: Codec + EncodeLike + Clone + Eq + Debug + TypeInfo {}

/// A type that cannot be instantiated.
#[derive(Debug, PartialEq, Eq, Clone, TypeInfo)]
pub enum Never {}

/// Prelude to be used alongside module declarations, for the most common types.
pub mod pallet_prelude {
	pub use crate::{
		dispatch::{
			DispatchClass, DispatchInfo, DispatchResultWithPostInfo, GetDispatchInfo, Pays,
			PostDispatchInfo,
		},
		ensure,
		hash::{Blake2_128Concat, Identity, Twox64Concat},
		storage::{
			types::{OptionQuery, StorageMap, StorageValue, ValueQuery},
			StorageInstance,
		},
		traits::{
			Get, GetDefault, IsSubType, OnFinalize, OnIdle, OnInitialize, OnRuntimeUpgrade,
			PalletInfo,
		},
		DispatchError, Parameter,
	};
	pub use codec::{Decode, Encode, MaxEncodedLen};
	pub use core::marker::PhantomData;
	pub use scale_info::TypeInfo;
	pub use sp_io::Externalities;
	pub use sp_runtime::{
		traits::{MaybeSerializeDeserialize, Member},
		transaction_validity::{
			InvalidTransaction, TransactionSource, TransactionValidity, TransactionValidityError,
			UnknownTransaction, ValidTransaction,
		},
		DispatchResult, Weight,
	};
}
