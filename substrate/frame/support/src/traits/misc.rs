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

//! Smaller traits used in FRAME which don't need their own file.

use impl_trait_for_tuples::impl_for_tuples;
use sp_io::Externalities;
use sp_runtime::traits::Get;

/// Implement `Get` by returning `Default` for any type that implements `Default`.
pub struct GetDefault;
impl<T: Default> Get<T> for GetDefault {
	fn get() -> T {
		T::default()
	}
}

/// Provides information about the pallet itself and its setup in the runtime.
///
/// An implementor should be able to provide information about each pallet that
/// is configured in the runtime.
pub trait PalletInfo {
	/// Convert the given pallet `P` into its index as configured in the runtime.
	fn index<P: 'static>() -> Option<usize>;
	/// Convert the given pallet `P` into its name as configured in the runtime.
	fn name<P: 'static>() -> Option<&'static str>;
}

/// Something that can be checked to be a of sub type `T`.
///
/// This is useful for enums where each variant encapsulates a different sub type, and
/// you need access to these sub types.
///
/// For example, in FRAME, this trait is implemented for the runtime `Call` enum. Pallets use this
/// to check if a certain call is an instance of the local pallet's `Call` enum.
///
/// # Example
///
/// ```
/// # use stf_support::traits::IsSubType;
///
/// enum Test {
///     String(String),
///     U32(u32),
/// }
///
/// impl IsSubType<String> for Test {
///     fn is_sub_type(&self) -> Option<&String> {
///         match self {
///             Self::String(ref r) => Some(r),
///             _ => None,
///         }
///     }
/// }
///
/// impl IsSubType<u32> for Test {
///     fn is_sub_type(&self) -> Option<&u32> {
///         match self {
///             Self::U32(ref r) => Some(r),
///             _ => None,
///         }
///     }
/// }
///
/// fn main() {
///     let data = Test::String("test".into());
///
///     assert_eq!("test", IsSubType::<String>::is_sub_type(&data).unwrap().as_str());
/// }
/// ```
pub trait IsSubType<T> {
	/// Returns `Some(_)` if `self` is a subtype of `T`.
	fn is_sub_type(&self) -> Option<&T>;
}

/// Handler for when a new account has been created.
#[impl_for_tuples(12)]
pub trait OnNewAccount<AccountId> {
	/// A new account `who` has been registered.
	fn on_new_account(ext: &mut dyn Externalities, who: &AccountId);
}

/// The account with the given id was reaped.
#[impl_for_tuples(12)]
pub trait OnKilledAccount<AccountId> {
	/// The account with the given id was reaped.
	fn on_killed_account(ext: &mut dyn Externalities, who: &AccountId);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parameter_types;
	use sp_io::TestExternalities;

	parameter_types! {
		pub static Seen: Vec<u64> = vec![];
	}

	struct Recorder;
	impl OnNewAccount<u64> for Recorder {
		fn on_new_account(_: &mut dyn Externalities, who: &u64) {
			Seen::mutate(|s| s.push(*who));
		}
	}

	struct Writer;
	impl OnNewAccount<u64> for Writer {
		fn on_new_account(ext: &mut dyn Externalities, who: &u64) {
			ext.set_storage(who.to_le_bytes().to_vec(), vec![1]);
		}
	}

	#[test]
	fn account_handlers_compose_as_tuples() {
		TestExternalities::new_empty().execute_with(|ext| {
			<(Recorder, Writer) as OnNewAccount<u64>>::on_new_account(ext, &7);
			<() as OnKilledAccount<u64>>::on_killed_account(ext, &7);
			assert_eq!(Seen::take(), vec![7]);
			assert_eq!(ext.storage(&7u64.to_le_bytes()), Some(vec![1]));
		});
	}

	#[test]
	fn get_default_works() {
		assert_eq!(<GetDefault as Get<u32>>::get(), 0);
		assert_eq!(<GetDefault as Get<Option<u8>>>::get(), None);
	}
}
