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

//! # Balances Module
//!
//! The Balances module keeps the free balance of every account and implements [`Currency`] on
//! top of it, so that other modules (most prominently transaction payment) can move funds.
//!
//! ## Overview
//!
//! Balances are stored inside the system account record through [`Config::AccountStore`]. An
//! account holding a free balance takes a provider reference on the system account: it comes into
//! existence once the balance reaches the existential deposit and is reaped as soon as the balance
//! falls below it. What remains of a reaped balance is burnt as dust.
//!
//! Withdrawals may demand that the account is kept alive
//! ([`ExistenceRequirement::KeepAlive`]). Transaction fees are always withdrawn that way.
//!
//! ### Dispatchable Functions
//!
//! - `transfer_allow_death`: transfer some free balance, possibly reaping the sender.
//! - `force_transfer`: root-only transfer between two arbitrary accounts.
//! - `transfer_keep_alive`: like `transfer_allow_death`, but the sender must stay alive.
//! - `force_set_balance`: root-only overwrite of an account's free balance.
//!
//! A transfer of zero is a successful no-op.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(test)]
mod tests;
pub mod weights;

use alloc::{collections::btree_set::BTreeSet, format, string::String, vec::Vec};
use codec::{Decode, Encode, FullCodec, MaxEncodedLen};
use core::marker::PhantomData;
use frame_support::{
	dispatch::{
		DispatchClass, DispatchInfo, DispatchResultWithPostInfo, GetDispatchInfo, Pays,
		UnfilteredDispatchable,
	},
	ensure, storage_prefix,
	traits::{
		Currency, ExistenceRequirement, Get, OnFinalize, OnIdle, OnInitialize, OnRuntimeUpgrade,
		StoredMap, WithdrawReasons,
	},
	Never, Parameter, StorageValue, ValueQuery,
};
use frame_system::{
	ensure_root, ensure_signed,
	pallet_prelude::{BlockNumberFor, OriginFor},
};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_io::Externalities;
use sp_runtime::{
	traits::{
		AtLeast32BitUnsigned, CheckedAdd, CheckedSub, MaybeSerializeDeserialize, Member,
		Saturating, StaticLookup, Zero,
	},
	ArithmeticError, DispatchError, DispatchResult,
};

#[cfg(feature = "std")]
use sp_runtime::BuildStorage;

pub use weights::WeightInfo;

const LOG_TARGET: &str = "runtime::balances";

type AccountIdLookupOf<T> = <<T as frame_system::Config>::Lookup as StaticLookup>::Source;

pub trait Config: frame_system::Config {
	/// The overarching event type.
	type RuntimeEvent: From<Event<Self>> + Into<<Self as frame_system::Config>::RuntimeEvent>;

	/// The balance of an account.
	type Balance: Parameter
		+ Member
		+ AtLeast32BitUnsigned
		+ FullCodec
		+ Default
		+ Copy
		+ MaybeSerializeDeserialize
		+ MaxEncodedLen
		+ TypeInfo;

	/// The minimum amount required to keep an account open. MUST BE GREATER THAN ZERO!
	type ExistentialDeposit: Get<Self::Balance>;

	/// The means of storing the balances of an account.
	type AccountStore: StoredMap<Self::AccountId, AccountData<Self::Balance>>;

	/// Weight information for extrinsics in this module.
	type WeightInfo: WeightInfo;
}

/// All balance information for an account.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Default, Debug, TypeInfo, MaxEncodedLen)]
pub struct AccountData<Balance> {
	/// Non-reserved part of the balance which the account holder may be able to control.
	pub free: Balance,
}

storage_prefix! {
	pub TotalIssuancePrefix => ("Balances", "TotalIssuance");
}

/// The total units issued in the system.
pub type TotalIssuance<T> = StorageValue<TotalIssuancePrefix, <T as Config>::Balance, ValueQuery>;

/// Event for the Balances module.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
#[scale_info(skip_type_params(T))]
pub enum Event<T: Config> {
	/// An account was created with some free balance.
	Endowed { account: T::AccountId, free_balance: T::Balance },
	/// An account was removed whose balance was non-zero but below ExistentialDeposit,
	/// resulting in an outright loss.
	DustLost { account: T::AccountId, amount: T::Balance },
	/// Transfer succeeded.
	Transfer { from: T::AccountId, to: T::AccountId, amount: T::Balance },
	/// A balance was set by root.
	BalanceSet { who: T::AccountId, free: T::Balance },
	/// Some amount was deposited (e.g. for transaction fees).
	Deposit { who: T::AccountId, amount: T::Balance },
	/// Some amount was withdrawn from the account (e.g. for transaction fees).
	Withdraw { who: T::AccountId, amount: T::Balance },
}

/// Error for the Balances module.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
#[scale_info(skip_type_params(T))]
pub enum Error<T> {
	#[doc(hidden)]
	#[codec(skip)]
	__Ignore(PhantomData<T>, Never),
	/// Balance too low to send value.
	#[codec(index = 2)]
	InsufficientBalance,
	/// Value too low to create account due to existential deposit.
	#[codec(index = 3)]
	ExistentialDeposit,
	/// Transfer/payment would kill account.
	#[codec(index = 4)]
	Expendability,
	/// Beneficiary account must pre-exist.
	#[codec(index = 6)]
	DeadAccount,
}

impl<T: Config> From<Error<T>> for DispatchError {
	fn from(err: Error<T>) -> Self {
		let (index, message) = match err {
			Error::__Ignore(_, never) => match never {},
			Error::InsufficientBalance => (2, "InsufficientBalance"),
			Error::ExistentialDeposit => (3, "ExistentialDeposit"),
			Error::Expendability => (4, "Expendability"),
			Error::DeadAccount => (6, "DeadAccount"),
		};
		frame_support::dispatch::module_error::<T::PalletInfo, Pallet<T>>(index, message)
	}
}

/// Dispatchable calls of the Balances module.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
#[codec(encode_bound())]
#[codec(decode_bound())]
#[scale_info(skip_type_params(T))]
#[allow(non_camel_case_types)]
pub enum Call<T: Config> {
	#[doc(hidden)]
	#[codec(skip)]
	__Ignore(PhantomData<T>, Never),
	/// Transfer some liquid free balance to another account.
	#[codec(index = 0)]
	transfer_allow_death { dest: AccountIdLookupOf<T>, value: T::Balance },
	/// Exactly as `transfer_allow_death`, except the origin must be root and the source account
	/// may be specified.
	#[codec(index = 2)]
	force_transfer { source: AccountIdLookupOf<T>, dest: AccountIdLookupOf<T>, value: T::Balance },
	/// Same as `transfer_allow_death`, but with a check that the transfer will not kill the
	/// origin account.
	#[codec(index = 3)]
	transfer_keep_alive { dest: AccountIdLookupOf<T>, value: T::Balance },
	/// Set the regular balance of a given account.
	#[codec(index = 8)]
	force_set_balance { who: AccountIdLookupOf<T>, new_free: T::Balance },
}

impl<T: Config> GetDispatchInfo for Call<T> {
	fn get_dispatch_info(&self) -> DispatchInfo {
		let weight = match self {
			Call::__Ignore(_, never) => match *never {},
			Call::transfer_allow_death { .. } => T::WeightInfo::transfer_allow_death(),
			Call::force_transfer { .. } => T::WeightInfo::force_transfer(),
			Call::transfer_keep_alive { .. } => T::WeightInfo::transfer_keep_alive(),
			Call::force_set_balance { .. } => T::WeightInfo::force_set_balance(),
		};
		DispatchInfo { weight, class: DispatchClass::Normal, pays_fee: Pays::Yes }
	}
}

impl<T: Config> UnfilteredDispatchable for Call<T> {
	type RuntimeOrigin = OriginFor<T>;

	fn dispatch_bypass_filter(
		self,
		ext: &mut dyn Externalities,
		origin: Self::RuntimeOrigin,
	) -> DispatchResultWithPostInfo {
		frame_support::storage::with_storage_layer(ext, |ext| {
			let result = match self {
				Call::__Ignore(_, never) => match never {},
				Call::transfer_allow_death { dest, value } =>
					Pallet::<T>::transfer_allow_death(ext, origin, dest, value),
				Call::force_transfer { source, dest, value } =>
					Pallet::<T>::force_transfer(ext, origin, source, dest, value),
				Call::transfer_keep_alive { dest, value } =>
					Pallet::<T>::transfer_keep_alive(ext, origin, dest, value),
				Call::force_set_balance { who, new_free } =>
					Pallet::<T>::force_set_balance(ext, origin, who, new_free),
			};
			result.map(Into::into).map_err(Into::into)
		})
	}
}

/// The Balances module.
pub struct Pallet<T>(PhantomData<T>);

impl<T: Config> OnInitialize<BlockNumberFor<T>> for Pallet<T> {}
impl<T: Config> OnIdle<BlockNumberFor<T>> for Pallet<T> {}
impl<T: Config> OnFinalize<BlockNumberFor<T>> for Pallet<T> {}
impl<T: Config> OnRuntimeUpgrade for Pallet<T> {}

// Dispatchables.
impl<T: Config> Pallet<T> {
	/// Transfer some liquid free balance to another account.
	///
	/// If the sender's account is below the existential deposit as a result of the transfer,
	/// the account will be reaped. The dispatch origin for this call must be `Signed` by the
	/// transactor.
	pub fn transfer_allow_death(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		dest: AccountIdLookupOf<T>,
		value: T::Balance,
	) -> DispatchResult {
		let source = ensure_signed(origin)?;
		let dest = T::Lookup::lookup(dest)?;
		<Self as Currency<_>>::transfer(
			ext,
			&source,
			&dest,
			value,
			ExistenceRequirement::AllowDeath,
		)
	}

	/// Exactly as `transfer_allow_death`, except the origin must be root and the source account
	/// may be specified.
	pub fn force_transfer(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		source: AccountIdLookupOf<T>,
		dest: AccountIdLookupOf<T>,
		value: T::Balance,
	) -> DispatchResult {
		ensure_root(origin)?;
		let source = T::Lookup::lookup(source)?;
		let dest = T::Lookup::lookup(dest)?;
		<Self as Currency<_>>::transfer(
			ext,
			&source,
			&dest,
			value,
			ExistenceRequirement::AllowDeath,
		)
	}

	/// Same as the `transfer_allow_death` call, but with a check that the transfer will not
	/// kill the origin account.
	pub fn transfer_keep_alive(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		dest: AccountIdLookupOf<T>,
		value: T::Balance,
	) -> DispatchResult {
		let source = ensure_signed(origin)?;
		let dest = T::Lookup::lookup(dest)?;
		<Self as Currency<_>>::transfer(ext, &source, &dest, value, ExistenceRequirement::KeepAlive)
	}

	/// Set the regular balance of a given account, adjusting the total issuance accordingly.
	///
	/// A balance below the existential deposit wipes the account out. The dispatch origin for
	/// this call is `root`.
	pub fn force_set_balance(
		ext: &mut dyn Externalities,
		origin: OriginFor<T>,
		who: AccountIdLookupOf<T>,
		new_free: T::Balance,
	) -> DispatchResult {
		ensure_root(origin)?;
		let who = T::Lookup::lookup(who)?;
		let existential_deposit = T::ExistentialDeposit::get();

		let wipeout = new_free < existential_deposit;
		let new_free = if wipeout { Zero::zero() } else { new_free };

		let (old_free, _) = Self::try_mutate_account(ext, &who, |account, _is_new| {
			let old_free = account.free;
			account.free = new_free;
			Ok::<_, DispatchError>(old_free)
		})?;

		if new_free > old_free {
			TotalIssuance::<T>::mutate(ext, |t| *t = t.saturating_add(new_free - old_free));
		} else if new_free < old_free {
			TotalIssuance::<T>::mutate(ext, |t| *t = t.saturating_sub(old_free - new_free));
		}

		Self::deposit_event(ext, Event::BalanceSet { who, free: new_free });
		Ok(())
	}
}

impl<T: Config> Pallet<T> {
	/// Get the free balance of an account.
	pub fn free_balance(ext: &dyn Externalities, who: &T::AccountId) -> T::Balance {
		T::AccountStore::get(ext, who).free
	}

	/// The total units issued in the system.
	pub fn total_issuance(ext: &dyn Externalities) -> T::Balance {
		TotalIssuance::<T>::get(ext)
	}

	/// The balance record of an account.
	pub fn account(ext: &dyn Externalities, who: &T::AccountId) -> AccountData<T::Balance> {
		T::AccountStore::get(ext, who)
	}

	fn deposit_event(ext: &mut dyn Externalities, event: Event<T>) {
		frame_system::Pallet::<T>::deposit_event(ext, <T as Config>::RuntimeEvent::from(event));
	}

	/// Mutate an account to some new value, or delete it entirely with `None`. Will enforce
	/// `ExistentialDeposit` law, annulling the account as needed.
	///
	/// `f` gets the account data and whether the account is new. It may fail, in which case
	/// nothing is written.
	///
	/// An account coming into existence takes a provider reference on the system account and
	/// emits `Endowed`; an account falling below the existential deposit gives its reference up,
	/// which reaps it. A non-zero remainder is burnt from the total issuance and returned as the
	/// dust.
	pub fn try_mutate_account<R, E: From<DispatchError>>(
		ext: &mut dyn Externalities,
		who: &T::AccountId,
		f: impl FnOnce(&mut AccountData<T::Balance>, bool) -> Result<R, E>,
	) -> Result<(R, Option<T::Balance>), E> {
		let mut account = T::AccountStore::get(ext, who);
		let is_new = account.free.is_zero();
		let result = f(&mut account, is_new)?;

		let mut dust = None;
		if account.free < T::ExistentialDeposit::get() && !account.free.is_zero() {
			dust = Some(account.free);
			account.free = Zero::zero();
		}

		match (is_new, account.free.is_zero()) {
			(true, true) => {},
			(true, false) => {
				frame_system::Pallet::<T>::inc_providers(ext, who);
				let free_balance = account.free;
				T::AccountStore::insert(ext, who, account)?;
				Self::deposit_event(ext, Event::Endowed { account: who.clone(), free_balance });
			},
			(false, false) => T::AccountStore::insert(ext, who, account)?,
			(false, true) => {
				ensure!(
					frame_system::Pallet::<T>::can_dec_provider(ext, who),
					DispatchError::ConsumerRemaining
				);
				T::AccountStore::remove(ext, who)?;
				frame_system::Pallet::<T>::dec_providers(ext, who)?;
			},
		}

		if let Some(amount) = dust {
			log::debug!(target: LOG_TARGET, "account {:?} reaped, {:?} lost as dust", who, amount);
			TotalIssuance::<T>::mutate(ext, |t| *t = t.saturating_sub(amount));
			Self::deposit_event(ext, Event::DustLost { account: who.clone(), amount });
		}

		Ok((result, dust))
	}
}

impl<T: Config> Currency<T::AccountId> for Pallet<T> {
	type Balance = T::Balance;

	fn total_balance(ext: &dyn Externalities, who: &T::AccountId) -> Self::Balance {
		Self::free_balance(ext, who)
	}

	fn total_issuance(ext: &dyn Externalities) -> Self::Balance {
		TotalIssuance::<T>::get(ext)
	}

	fn minimum_balance() -> Self::Balance {
		T::ExistentialDeposit::get()
	}

	fn free_balance(ext: &dyn Externalities, who: &T::AccountId) -> Self::Balance {
		T::AccountStore::get(ext, who).free
	}

	// Balances are never locked here, so any amount that can be paid can be withdrawn for any
	// reason.
	fn ensure_can_withdraw(
		_ext: &dyn Externalities,
		_who: &T::AccountId,
		_amount: T::Balance,
		_reasons: WithdrawReasons,
		_new_balance: T::Balance,
	) -> DispatchResult {
		Ok(())
	}

	// Transfer some free balance from `transactor` to `dest`, respecting existence requirements.
	// Is a no-op if value to be transferred is zero or the `transactor` is the same as `dest`.
	fn transfer(
		ext: &mut dyn Externalities,
		transactor: &T::AccountId,
		dest: &T::AccountId,
		value: Self::Balance,
		existence_requirement: ExistenceRequirement,
	) -> DispatchResult {
		if value.is_zero() || transactor == dest {
			return Ok(())
		}
		let ed = T::ExistentialDeposit::get();

		// Every check happens before the first write, so a failing transfer leaves no trace.
		let from_balance = Self::free_balance(ext, transactor)
			.checked_sub(&value)
			.ok_or(Error::<T>::InsufficientBalance)?;
		let to_balance = Self::free_balance(ext, dest)
			.checked_add(&value)
			.ok_or(ArithmeticError::Overflow)?;
		ensure!(to_balance >= ed, Error::<T>::ExistentialDeposit);

		let would_be_dead = from_balance < ed;
		ensure!(
			!would_be_dead || existence_requirement == ExistenceRequirement::AllowDeath,
			Error::<T>::Expendability
		);
		ensure!(
			!would_be_dead || frame_system::Pallet::<T>::can_dec_provider(ext, transactor),
			DispatchError::ConsumerRemaining
		);
		Self::ensure_can_withdraw(
			ext,
			transactor,
			value,
			WithdrawReasons::TRANSFER,
			from_balance,
		)?;

		Self::try_mutate_account(ext, transactor, |account, _| -> DispatchResult {
			account.free = from_balance;
			Ok(())
		})?;
		Self::try_mutate_account(ext, dest, |account, _| -> DispatchResult {
			account.free = to_balance;
			Ok(())
		})?;

		Self::deposit_event(
			ext,
			Event::Transfer { from: transactor.clone(), to: dest.clone(), amount: value },
		);
		Ok(())
	}

	fn deposit_creating(
		ext: &mut dyn Externalities,
		who: &T::AccountId,
		value: Self::Balance,
	) -> Self::Balance {
		if value.is_zero() {
			return Zero::zero()
		}
		let minted = Self::try_mutate_account(
			ext,
			who,
			|account, is_new| -> Result<T::Balance, DispatchError> {
				ensure!(!is_new || value >= T::ExistentialDeposit::get(), Error::<T>::ExistentialDeposit);
				account.free = account.free.checked_add(&value).ok_or(ArithmeticError::Overflow)?;
				Ok(value)
			},
		);
		match minted {
			Ok((minted, _)) => {
				TotalIssuance::<T>::mutate(ext, |t| *t = t.saturating_add(minted));
				Self::deposit_event(ext, Event::Deposit { who: who.clone(), amount: minted });
				minted
			},
			Err(_) => Zero::zero(),
		}
	}

	fn deposit_into_existing(
		ext: &mut dyn Externalities,
		who: &T::AccountId,
		value: Self::Balance,
	) -> Result<Self::Balance, DispatchError> {
		if value.is_zero() {
			return Ok(Zero::zero())
		}
		let (minted, _) = Self::try_mutate_account(
			ext,
			who,
			|account, is_new| -> Result<T::Balance, DispatchError> {
				ensure!(!is_new, Error::<T>::DeadAccount);
				account.free = account.free.checked_add(&value).ok_or(ArithmeticError::Overflow)?;
				Ok(value)
			},
		)?;
		TotalIssuance::<T>::mutate(ext, |t| *t = t.saturating_add(minted));
		Self::deposit_event(ext, Event::Deposit { who: who.clone(), amount: minted });
		Ok(minted)
	}

	fn withdraw(
		ext: &mut dyn Externalities,
		who: &T::AccountId,
		value: Self::Balance,
		reasons: WithdrawReasons,
		liveness: ExistenceRequirement,
	) -> Result<Self::Balance, DispatchError> {
		if value.is_zero() {
			return Ok(Zero::zero())
		}
		let new_free = Self::free_balance(ext, who)
			.checked_sub(&value)
			.ok_or(Error::<T>::InsufficientBalance)?;
		Self::ensure_can_withdraw(ext, who, value, reasons, new_free)?;

		let ed = T::ExistentialDeposit::get();
		Self::try_mutate_account(ext, who, |account, _| -> DispatchResult {
			// bail if we need to keep the account alive and this would kill it.
			ensure!(
				liveness == ExistenceRequirement::AllowDeath || new_free >= ed,
				Error::<T>::Expendability
			);
			account.free = new_free;
			Ok(())
		})?;

		TotalIssuance::<T>::mutate(ext, |t| *t = t.saturating_sub(value));
		Self::deposit_event(ext, Event::Withdraw { who: who.clone(), amount: value });
		Ok(value)
	}
}

/// Genesis configuration of the Balances module.
#[derive(Debug)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(
	feature = "std",
	serde(
		rename_all = "camelCase",
		deny_unknown_fields,
		bound(serialize = "", deserialize = "")
	)
)]
pub struct GenesisConfig<T: Config> {
	/// The free balance of every endowed account.
	pub balances: Vec<(T::AccountId, T::Balance)>,
}

impl<T: Config> Default for GenesisConfig<T> {
	fn default() -> Self {
		Self { balances: Default::default() }
	}
}

impl<T: Config> GenesisConfig<T> {
	/// Check the endowments, then write the genesis state of the module.
	///
	/// Nothing is written when an endowment is below the existential deposit or an account
	/// is endowed twice.
	pub fn build(&self, ext: &mut dyn Externalities) -> Result<(), String> {
		let ed = T::ExistentialDeposit::get();
		if let Some((who, balance)) = self.balances.iter().find(|(_, balance)| *balance < ed) {
			return Err(format!(
				"the balance of any account should always be at least the existential deposit. \
				 {:?} is endowed with {:?}, below {:?}",
				who, balance, ed,
			))
		}

		let endowed_accounts =
			self.balances.iter().map(|(x, _)| x).cloned().collect::<BTreeSet<_>>();
		if endowed_accounts.len() != self.balances.len() {
			return Err("duplicate balances in genesis.".into())
		}

		let total = self
			.balances
			.iter()
			.fold(Zero::zero(), |acc: T::Balance, &(_, n)| acc.saturating_add(n));
		TotalIssuance::<T>::put(ext, total);

		for &(ref who, free) in self.balances.iter() {
			frame_system::Pallet::<T>::inc_providers(ext, who);
			T::AccountStore::insert(ext, who, AccountData { free })
				.map_err(|e| format!("could not endow {:?}: {:?}", who, e))?;
		}
		Ok(())
	}
}

#[cfg(feature = "std")]
impl<T: Config> BuildStorage for GenesisConfig<T> {
	fn assimilate_storage(&self, storage: &mut sp_runtime::Storage) -> Result<(), String> {
		let mut ext = sp_io::TestExternalities::new(core::mem::take(storage));
		let built = ext.execute_with(|ext| self.build(ext));
		*storage = ext.into_storage();
		built
	}
}
