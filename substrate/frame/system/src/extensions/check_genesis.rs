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

use crate::{pallet_prelude::BlockNumberFor, Config, Pallet};
use codec::{Decode, Encode};
use core::marker::PhantomData;
use scale_info::TypeInfo;
use sp_io::Externalities;
use sp_runtime::{
	traits::{DispatchInfoOf, SignedExtension, Zero},
	transaction_validity::TransactionValidityError,
};

/// Genesis hash check to provide replay protection between different networks.
///
/// # Transaction Validity
///
/// Note that while a transaction with invalid `genesis_hash` will fail to be decoded,
/// the extension does not affect any other fields of `TransactionValidity` directly.
#[derive(Encode, Decode, Clone, Eq, PartialEq, TypeInfo)]
#[scale_info(skip_type_params(T))]
pub struct CheckGenesis<T: Config>(PhantomData<T>);

impl<T: Config> core::fmt::Debug for CheckGenesis<T> {
	#[cfg(feature = "std")]
	fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
		write!(f, "CheckGenesis")
	}

	#[cfg(not(feature = "std"))]
	fn fmt(&self, _: &mut core::fmt::Formatter) -> core::fmt::Result {
		Ok(())
	}
}

impl<T: Config> Default for CheckGenesis<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Config> CheckGenesis<T> {
	/// Creates new `SignedExtension` to check genesis hash.
	pub fn new() -> Self {
		Self(PhantomData)
	}
}

impl<T: Config> SignedExtension for CheckGenesis<T> {
	const IDENTIFIER: &'static str = "CheckGenesis";
	type AccountId = T::AccountId;
	type Call = T::RuntimeCall;
	type AdditionalSigned = T::Hash;
	type Pre = ();

	fn additional_signed(
		&self,
		ext: &dyn Externalities,
	) -> Result<Self::AdditionalSigned, TransactionValidityError> {
		Ok(<Pallet<T>>::block_hash(ext, BlockNumberFor::<T>::zero()))
	}

	fn pre_dispatch(
		self,
		ext: &mut dyn Externalities,
		who: &Self::AccountId,
		call: &Self::Call,
		info: &DispatchInfoOf<Self::Call>,
		len: usize,
	) -> Result<Self::Pre, TransactionValidityError> {
		self.validate(ext, who, call, info, len).map(|_| ())
	}
}
