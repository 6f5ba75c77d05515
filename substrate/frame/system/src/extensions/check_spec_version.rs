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

use crate::{Config, Pallet};
use codec::{Decode, Encode};
use core::marker::PhantomData;
use scale_info::TypeInfo;
use sp_io::Externalities;
use sp_runtime::{
	traits::{DispatchInfoOf, SignedExtension},
	transaction_validity::TransactionValidityError,
};

/// Ensure the specification version registered in the transaction is the same as at present.
///
/// # Transaction Validity
///
/// The transaction with incorrect `spec_version` are considered invalid. The validity
/// is not affected in any other way.
#[derive(Encode, Decode, Clone, Eq, PartialEq, TypeInfo)]
#[scale_info(skip_type_params(T))]
pub struct CheckSpecVersion<T: Config>(PhantomData<T>);

impl<T: Config> core::fmt::Debug for CheckSpecVersion<T> {
	#[cfg(feature = "std")]
	fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
		write!(f, "CheckSpecVersion")
	}

	#[cfg(not(feature = "std"))]
	fn fmt(&self, _: &mut core::fmt::Formatter) -> core::fmt::Result {
		Ok(())
	}
}

impl<T: Config> Default for CheckSpecVersion<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Config> CheckSpecVersion<T> {
	/// Create new `SignedExtension` to check specification version.
	pub fn new() -> Self {
		Self(PhantomData)
	}
}

impl<T: Config> SignedExtension for CheckSpecVersion<T> {
	const IDENTIFIER: &'static str = "CheckSpecVersion";
	type AccountId = T::AccountId;
	type Call = T::RuntimeCall;
	type AdditionalSigned = u32;
	type Pre = ();

	fn additional_signed(
		&self,
		_ext: &dyn Externalities,
	) -> Result<Self::AdditionalSigned, TransactionValidityError> {
		Ok(<Pallet<T>>::runtime_version().spec_version)
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
