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

//! The currency abstraction modules use to move funds around.
//!
//! Imbalances are not tracked as values: withdrawing burns the funds from the total issuance and
//! depositing mints them, so every method leaves the issuance consistent on its own.

use codec::{Decode, Encode, FullCodec, MaxEncodedLen};
use core::fmt::Debug;
use scale_info::TypeInfo;
use sp_io::Externalities;
use sp_runtime::{
	traits::{AtLeast32BitUnsigned, MaybeSerializeDeserialize},
	DispatchError, DispatchResult,
};

/// Whether an account is allowed to be reaped by an operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Encode, Decode, TypeInfo, MaxEncodedLen)]
pub enum ExistenceRequirement {
	/// Operation must not result in the account going out of existence.
	///
	/// Note this implies that if the account never existed in the first place, then the operation
	/// may legitimately leave the account unchanged and still non-existent.
	KeepAlive,
	/// Operation may result in account going out of existence.
	AllowDeath,
}

bitflags::bitflags! {
	/// Reasons for moving funds out of an account.
	#[derive(Encode, Decode, MaxEncodedLen)]
	pub struct WithdrawReasons: u8 {
		/// In order to pay for (system) transaction costs.
		const TRANSACTION_PAYMENT = 0b00000001;
		/// In order to transfer ownership.
		const TRANSFER = 0b00000010;
		/// In order to reserve some funds for a later return or repatriation.
		const RESERVE = 0b00000100;
		/// In order to pay some other (higher-level) fees.
		const FEE = 0b00001000;
		/// In order to tip a validator for transaction inclusion.
		const TIP = 0b00010000;
	}
}

impl WithdrawReasons {
	/// Choose all variants except for `one`.
	///
	/// ```rust
	/// # use stf_support::traits::WithdrawReasons;
	/// # fn main() {
	/// assert_eq!(
	/// 	WithdrawReasons::FEE | WithdrawReasons::TRANSFER | WithdrawReasons::RESERVE | WithdrawReasons::TIP,
	/// 	WithdrawReasons::except(WithdrawReasons::TRANSACTION_PAYMENT),
	/// 	);
	/// # }
	/// ```
	pub fn except(one: WithdrawReasons) -> WithdrawReasons {
		let mut flags = Self::all();
		flags.toggle(one);
		flags
	}
}

/// Abstraction over a fungible assets system.
pub trait Currency<AccountId> {
	/// The balance of an account.
	type Balance: AtLeast32BitUnsigned
		+ FullCodec
		+ Copy
		+ MaybeSerializeDeserialize
		+ Debug
		+ Default
		+ MaxEncodedLen
		+ TypeInfo;

	/// The combined balance of `who`.
	fn total_balance(ext: &dyn Externalities, who: &AccountId) -> Self::Balance;

	/// The total amount of issuance in the system.
	fn total_issuance(ext: &dyn Externalities) -> Self::Balance;

	/// The minimum balance any single account may have. This is equivalent to the `Balances`
	/// module's `ExistentialDeposit`.
	fn minimum_balance() -> Self::Balance;

	/// The 'free' balance of a given account.
	///
	/// This is the only balance that matters in terms of most operations on tokens. It alone
	/// is used to determine the balance when in the contract execution environment. When this
	/// balance falls below the value of `ExistentialDeposit`, then the account is reaped.
	fn free_balance(ext: &dyn Externalities, who: &AccountId) -> Self::Balance;

	/// Returns `Ok` iff the account is able to make a withdrawal of the given amount
	/// for the given reason. Basically, it's just a dry-run of `withdraw`.
	///
	/// `Err(...)` with the reason why not otherwise.
	fn ensure_can_withdraw(
		ext: &dyn Externalities,
		who: &AccountId,
		amount: Self::Balance,
		reasons: WithdrawReasons,
		new_balance: Self::Balance,
	) -> DispatchResult;

	/// Transfer some liquid free balance to another staker.
	///
	/// This is a very high-level function. It will ensure no imbalance in the system remains.
	fn transfer(
		ext: &mut dyn Externalities,
		source: &AccountId,
		dest: &AccountId,
		value: Self::Balance,
		existence_requirement: ExistenceRequirement,
	) -> DispatchResult;

	/// Adds up to `value` to the free balance of `who`. If `who` doesn't exist, it is created.
	///
	/// Infallible. Returns the amount actually minted.
	fn deposit_creating(
		ext: &mut dyn Externalities,
		who: &AccountId,
		value: Self::Balance,
	) -> Self::Balance;

	/// Mints `value` to the free balance of `who`.
	///
	/// If `who` doesn't exist, nothing is done and an `Err` returned.
	fn deposit_into_existing(
		ext: &mut dyn Externalities,
		who: &AccountId,
		value: Self::Balance,
	) -> Result<Self::Balance, DispatchError>;

	/// Removes some free balance from `who` account for `reason` if possible. If `liveness` is
	/// `KeepAlive`, then no less than `ExistentialDeposit` must be left remaining.
	///
	/// This checks any locks, vesting, and liquidity requirements. If the removal is not possible,
	/// then it returns `Err`.
	///
	/// If the operation is successful, this will return the amount burnt.
	fn withdraw(
		ext: &mut dyn Externalities,
		who: &AccountId,
		value: Self::Balance,
		reasons: WithdrawReasons,
		liveness: ExistenceRequirement,
	) -> Result<Self::Balance, DispatchError>;
}

/// Handler for funds that were taken out of circulation by some operation, such as fees.
pub trait OnUnbalanced<Balance> {
	/// Handler for some imbalance. Infallible.
	///
	/// The funds are already burnt when this is called; the default leaves them that way.
	fn on_unbalanced(_ext: &mut dyn Externalities, _amount: Balance) {}

	/// Handler for some imbalances. The different imbalances might have different origins or
	/// meanings, dependent on the context. Will default to simply calling `on_unbalanced` for all
	/// of them. Infallible.
	fn on_unbalanceds(ext: &mut dyn Externalities, amounts: impl Iterator<Item = Balance>) {
		for amount in amounts {
			Self::on_unbalanced(ext, amount);
		}
	}
}

impl<Balance> OnUnbalanced<Balance> for () {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn withdraw_reasons_encode_as_a_byte() {
		let reasons = WithdrawReasons::TRANSACTION_PAYMENT | WithdrawReasons::TIP;
		assert_eq!(reasons.encode(), vec![0b00010001]);
		assert_eq!(WithdrawReasons::decode(&mut &[0b00010001u8][..]).unwrap(), reasons);
		assert!(!WithdrawReasons::except(WithdrawReasons::TIP).contains(WithdrawReasons::TIP));
	}
}
