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

//! # Timestamp Module
//!
//! Keeps the time of the current block, provided by the block author through an inherent.
//!
//! Every block carries exactly one `set` inherent. Its value must be at least
//! [`Config::MinimumPeriod`] past the previous block's timestamp and must not run more than
//! [`MAX_TIMESTAMP_DRIFT_MILLIS`] ahead of the time the importing node observes.

use codec::{Decode, Encode, MaxEncodedLen};
use core::marker::PhantomData;
use frame_support::{
	dispatch::{
		DispatchClass, DispatchInfo, DispatchResultWithPostInfo, GetDispatchInfo, Pays,
		UnfilteredDispatchable,
	},
	inherent::{InherentData, InherentIdentifier, IsFatalError, ProvideInherent},
	storage_prefix,
	traits::{Get, OnFinalize, OnIdle, OnInitialize, OnRuntimeUpgrade},
	Never, Parameter, StorageValue, ValueQuery,
};
use frame_system::{
	ensure_none,
	pallet_prelude::{BlockNumberFor, OriginFor},
};
use scale_info::TypeInfo;
use sp_io::Externalities;
use sp_runtime::{
	traits::{AtLeast32BitUnsigned, Member, SaturatedConversion, Saturating, Zero},
	Weight,
};

const LOG_TARGET: &str = "runtime::timestamp";

/// The identifier of the timestamp inherent data.
pub const INHERENT_IDENTIFIER: InherentIdentifier = *b"timstap0";

/// How far a block's timestamp may run ahead of the importer's clock, in milliseconds.
pub const MAX_TIMESTAMP_DRIFT_MILLIS: u64 = 30 * 1000;

pub trait Config: frame_system::Config {
	/// Type used for expressing a timestamp.
	type Moment: Parameter
		+ Member
		+ AtLeast32BitUnsigned
		+ Default
		+ Copy
		+ MaxEncodedLen
		+ TypeInfo;

	/// The minimum period between blocks.
	type MinimumPeriod: Get<Self::Moment>;
}

storage_prefix! {
	pub NowPrefix => ("Timestamp", "Now");
	pub DidUpdatePrefix => ("Timestamp", "DidUpdate");
}

/// The current time for the current block.
pub type Now<T> = StorageValue<NowPrefix, <T as Config>::Moment, ValueQuery>;

/// Whether the timestamp has been updated in this block.
///
/// Killed at the end of every block.
pub type DidUpdate = StorageValue<DidUpdatePrefix, bool, ValueQuery>;

/// Dispatchable calls of the Timestamp module.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
#[codec(encode_bound())]
#[codec(decode_bound())]
#[scale_info(skip_type_params(T))]
#[allow(non_camel_case_types)]
pub enum Call<T: Config> {
	#[doc(hidden)]
	#[codec(skip)]
	__Ignore(PhantomData<T>, Never),
	/// Set the current time.
	#[codec(index = 0)]
	set { now: T::Moment },
}

impl<T: Config> GetDispatchInfo for Call<T> {
	fn get_dispatch_info(&self) -> DispatchInfo {
		match self {
			Call::__Ignore(_, never) => match *never {},
			Call::set { .. } => DispatchInfo {
				weight: T::DbWeight::get().reads_writes(2, 1),
				class: DispatchClass::Mandatory,
				pays_fee: Pays::No,
			},
		}
	}
}

impl<T: Config> UnfilteredDispatchable for Call<T> {
	type RuntimeOrigin = OriginFor<T>;

	fn dispatch_bypass_filter(
		self,
		ext: &mut dyn Externalities,
		origin: Self::RuntimeOrigin,
	) -> DispatchResultWithPostInfo {
		frame_support::storage::with_storage_layer(ext, |ext| match self {
			Call::__Ignore(_, never) => match never {},
			Call::set { now } => Pallet::<T>::set(ext, origin, now),
		})
	}
}

/// The Timestamp module.
pub struct Pallet<T>(PhantomData<T>);

impl<T: Config> OnInitialize<BlockNumberFor<T>> for Pallet<T> {
	fn on_initialize(_ext: &mut dyn Externalities, _n: BlockNumberFor<T>) -> Weight {
		// `on_finalize` reads and kills `DidUpdate`.
		T::DbWeight::get().reads_writes(1, 1)
	}
}

impl<T: Config> OnFinalize<BlockNumberFor<T>> for Pallet<T> {
	fn on_finalize(ext: &mut dyn Externalities, _n: BlockNumberFor<T>) {
		assert!(DidUpdate::take(ext), "Timestamp must be updated once in the block");
	}
}

impl<T: Config> OnIdle<BlockNumberFor<T>> for Pallet<T> {}
impl<T: Config> OnRuntimeUpgrade for Pallet<T> {}

impl<T: Config> Pallet<T> {
	/// Set the current time.
	///
	/// Must be dispatched once per block as an unsigned inherent. `now` must be at least
	/// `MinimumPeriod` greater than the last timestamp, unless no timestamp was ever set.
	pub fn set(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		now: T::Moment,
	) -> DispatchResultWithPostInfo {
		ensure_none(origin)?;
		assert!(!DidUpdate::exists(ext), "Timestamp must be updated only once in the block");
		let prev = Now::<T>::get(ext);
		assert!(
			prev.is_zero() || now >= prev.saturating_add(T::MinimumPeriod::get()),
			"Timestamp must increment by at least <MinimumPeriod> between sequential blocks"
		);
		Now::<T>::put(ext, now);
		DidUpdate::put(ext, true);
		log::trace!(target: LOG_TARGET, "timestamp set to {:?}", now);

		Ok(().into())
	}

	/// The current time for the current block.
	pub fn now(ext: &dyn Externalities) -> T::Moment {
		Now::<T>::get(ext)
	}

	/// Set the timestamp to something in particular. Only used for tests.
	#[cfg(feature = "std")]
	pub fn set_timestamp(ext: &mut dyn Externalities, now: T::Moment) {
		Now::<T>::put(ext, now);
		DidUpdate::put(ext, true);
	}
}

/// Errors of the timestamp inherent.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug)]
pub enum InherentError {
	/// The time between the blocks is too short.
	TooEarly,
	/// The block will be valid in the future, but not right now.
	TooFarInFuture,
	/// The block carries no timestamp.
	Missing,
}

impl IsFatalError for InherentError {
	fn is_fatal_error(&self) -> bool {
		match self {
			InherentError::TooEarly | InherentError::Missing => true,
			InherentError::TooFarInFuture => false,
		}
	}
}

fn extract_inherent_data(data: &InherentData) -> Option<u64> {
	data.get_data::<u64>(&INHERENT_IDENTIFIER)
		.expect("Timestamp inherent data not correctly encoded")
}

impl<T: Config> ProvideInherent for Pallet<T> {
	type Call = Call<T>;
	type Error = InherentError;
	const INHERENT_IDENTIFIER: InherentIdentifier = INHERENT_IDENTIFIER;

	fn create_inherent(ext: &dyn Externalities, data: &InherentData) -> Option<Self::Call> {
		let inherent_data = extract_inherent_data(data)?.saturated_into::<T::Moment>();
		let next_time =
			core::cmp::max(inherent_data, Self::now(ext).saturating_add(T::MinimumPeriod::get()));
		Some(Call::set { now: next_time })
	}

	fn is_inherent_required(
		_ext: &dyn Externalities,
		data: &InherentData,
	) -> Result<Option<Self::Error>, Self::Error> {
		Ok(extract_inherent_data(data).map(|_| InherentError::Missing))
	}

	fn check_inherent(
		ext: &dyn Externalities,
		call: &Self::Call,
		data: &InherentData,
	) -> Result<(), Self::Error> {
		let t: u64 = match call {
			Call::set { ref now } => (*now).saturated_into::<u64>(),
			_ => return Ok(()),
		};

		let Some(data) = extract_inherent_data(data) else { return Ok(()) };

		let minimum = Self::now(ext).saturating_add(T::MinimumPeriod::get()).saturated_into::<u64>();
		if t > data.saturating_add(MAX_TIMESTAMP_DRIFT_MILLIS) {
			Err(InherentError::TooFarInFuture)
		} else if t < minimum {
			Err(InherentError::TooEarly)
		} else {
			Ok(())
		}
	}

	fn is_inherent(call: &Self::Call) -> bool {
		matches!(call, Call::set { .. })
	}
}

/// Inherent data carrying `now`, in milliseconds.
pub fn inherent_data(now: u64) -> InherentData {
	let mut data = InherentData::new();
	data.put_data(INHERENT_IDENTIFIER, &now)
		.expect("fresh inherent data holds no timestamp; qed");
	data
}

