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

use crate::Config;
use codec::{Decode, Encode};
use core::marker::PhantomData;
use scale_info::TypeInfo;
use sp_io::Externalities;
use sp_runtime::{
	traits::{DispatchInfoOf, SignedExtension},
	transaction_validity::{
		InvalidTransaction, TransactionValidity, TransactionValidityError, ValidTransaction,
	},
};

/// Check to ensure that the sender is not the zero address.
#[derive(Encode, Decode, Clone, Eq, PartialEq, TypeInfo)]
#[scale_info(skip_type_params(T))]
pub struct CheckNonZeroSender<T>(PhantomData<T>);

impl<T: Config> core::fmt::Debug for CheckNonZeroSender<T> {
	#[cfg(feature = "std")]
	fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
		write!(f, "CheckNonZeroSender")
	}

	#[cfg(not(feature = "std"))]
	fn fmt(&self, _: &mut core::fmt::Formatter) -> core::fmt::Result {
		Ok(())
	}
}

impl<T: Config> Default for CheckNonZeroSender<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Config> CheckNonZeroSender<T> {
	/// Create new `SignedExtension` to check the sender.
	pub fn new() -> Self {
		Self(PhantomData)
	}
}

impl<T: Config> SignedExtension for CheckNonZeroSender<T> {
	const IDENTIFIER: &'static str = "CheckNonZeroSender";
	type AccountId = T::AccountId;
	type Call = T::RuntimeCall;
	type AdditionalSigned = ();
	type Pre = ();

	fn additional_signed(
		&self,
		_ext: &dyn Externalities,
	) -> Result<(), TransactionValidityError> {
		Ok(())
	}

	fn validate(
		&self,
		_ext: &dyn Externalities,
		who: &Self::AccountId,
		_call: &Self::Call,
		_info: &DispatchInfoOf<Self::Call>,
		_len: usize,
	) -> TransactionValidity {
		if who.using_encoded(|d| d.iter().all(|x| *x == 0)) {
			return Err(InvalidTransaction::BadSigner.into())
		}
		Ok(ValidTransaction::default())
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

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mock::{new_test_ext, CALL};
	use frame_support::{assert_ok, dispatch::DispatchInfo};
	use crate::mock::Test;

	#[test]
	fn zero_account_ban_works() {
		new_test_ext().execute_with(|ext| {
			let info = DispatchInfo::default();
			let len = 0_usize;
			assert_eq!(
				CheckNonZeroSender::<Test>::new().validate(ext, &0, CALL, &info, len).unwrap_err(),
				TransactionValidityError::from(InvalidTransaction::BadSigner)
			);
			assert_ok!(CheckNonZeroSender::<Test>::new().validate(ext, &1, CALL, &info, len));
		})
	}

	#[test]
	fn unsigned_calls_are_not_checked() {
		new_test_ext().execute_with(|ext| {
			let info = DispatchInfo::default();
			assert_ok!(<CheckNonZeroSender<Test> as SignedExtension>::validate_unsigned(
				ext, CALL, &info, 0
			));
			assert_ok!(CheckNonZeroSender::<Test>::new().pre_dispatch(ext, &1, CALL, &info, 0));
		})
	}
}
