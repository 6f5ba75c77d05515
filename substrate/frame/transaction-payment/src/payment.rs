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

//! Traits and default implementation for paying transaction fees.

use crate::Config;

use codec::{FullCodec, HasCompact, MaxEncodedLen};
use core::{fmt::Debug, marker::PhantomData};
use frame_support::traits::{Currency, ExistenceRequirement, OnUnbalanced, WithdrawReasons};
use scale_info::TypeInfo;
use sp_io::Externalities;
use sp_runtime::{
	traits::{
		AtLeast32BitUnsigned, CheckedSub, DispatchInfoOf, MaybeSerializeDeserialize,
		PostDispatchInfoOf, Saturating, Zero,
	},
	transaction_validity::{InvalidTransaction, TransactionValidityError},
	FixedPointOperand,
};

type BalanceOf<C, T> = <C as Currency<<T as frame_system::Config>::AccountId>>::Balance;

/// Handle withdrawing, refunding and depositing of transaction fees.
pub trait OnChargeTransaction<T: Config> {
	/// The underlying integer type in which fees are calculated.
	type Balance: AtLeast32BitUnsigned
		+ FullCodec
		+ Copy
		+ MaybeSerializeDeserialize
		+ Debug
		+ Default
		+ MaxEncodedLen
		+ TypeInfo
		+ HasCompact
		+ FixedPointOperand
		+ Send
		+ Sync;

	/// What is kept between withdrawing the fee and correcting it.
	type LiquidityInfo: Default;

	/// Check if the predicted fee from the transaction origin can be withdrawn.
	///
	/// Runs against read-only state, so it is safe to call from transaction validation.
	///
	/// Note: The `fee` already includes the `tip`.
	fn can_withdraw_fee(
		ext: &dyn Externalities,
		who: &T::AccountId,
		call: &T::RuntimeCall,
		dispatch_info: &DispatchInfoOf<T::RuntimeCall>,
		fee: Self::Balance,
		tip: Self::Balance,
	) -> Result<(), TransactionValidityError>;

	/// Before the transaction is executed the payment of the transaction fees
	/// need to be secured.
	///
	/// Note: The `fee` already includes the `tip`.
	fn withdraw_fee(
		ext: &mut dyn Externalities,
		who: &T::AccountId,
		call: &T::RuntimeCall,
		dispatch_info: &DispatchInfoOf<T::RuntimeCall>,
		fee: Self::Balance,
		tip: Self::Balance,
	) -> Result<Self::LiquidityInfo, TransactionValidityError>;

	/// After the transaction was executed the actual fee can be calculated.
	/// This function should refund any overpaid fees and optionally deposit
	/// the corrected amount.
	///
	/// Note: The `fee` already includes the `tip`.
	fn correct_and_deposit_fee(
		ext: &mut dyn Externalities,
		who: &T::AccountId,
		dispatch_info: &DispatchInfoOf<T::RuntimeCall>,
		post_info: &PostDispatchInfoOf<T::RuntimeCall>,
		corrected_fee: Self::Balance,
		tip: Self::Balance,
		already_withdrawn: Self::LiquidityInfo,
	) -> Result<(), TransactionValidityError>;
}

/// Implements the transaction payment for a module implementing the [`Currency`]
/// trait (eg. the balances module) using an unbalance handler (implementing
/// [`OnUnbalanced`]).
///
/// The unbalance handler is given 2 amounts in [`OnUnbalanced::on_unbalanceds`]: `fee` and
/// then `tip`.
pub struct CurrencyAdapter<C, OU>(PhantomData<(C, OU)>);

impl<C, OU> CurrencyAdapter<C, OU> {
	fn withdraw_reasons<Balance: Zero>(tip: &Balance) -> WithdrawReasons {
		if tip.is_zero() {
			WithdrawReasons::TRANSACTION_PAYMENT
		} else {
			WithdrawReasons::TRANSACTION_PAYMENT | WithdrawReasons::TIP
		}
	}
}

impl<T, C, OU> OnChargeTransaction<T> for CurrencyAdapter<C, OU>
where
	T: Config,
	C: Currency<T::AccountId>,
	C::Balance: HasCompact + FixedPointOperand + Send + Sync,
	OU: OnUnbalanced<BalanceOf<C, T>>,
{
	type LiquidityInfo = Option<BalanceOf<C, T>>;
	type Balance = BalanceOf<C, T>;

	fn can_withdraw_fee(
		ext: &dyn Externalities,
		who: &T::AccountId,
		_call: &T::RuntimeCall,
		_dispatch_info: &DispatchInfoOf<T::RuntimeCall>,
		fee: Self::Balance,
		tip: Self::Balance,
	) -> Result<(), TransactionValidityError> {
		if fee.is_zero() {
			return Ok(())
		}

		// Mirrors a `KeepAlive` withdrawal: the payer must stay above the existential deposit.
		let new_balance = C::free_balance(ext, who)
			.checked_sub(&fee)
			.ok_or(InvalidTransaction::Payment)?;
		if new_balance < C::minimum_balance() {
			return Err(InvalidTransaction::Payment.into())
		}
		C::ensure_can_withdraw(ext, who, fee, Self::withdraw_reasons(&tip), new_balance)
			.map_err(|_| InvalidTransaction::Payment.into())
	}

	/// Withdraw the predicted fee from the transaction origin.
	///
	/// Note: The `fee` already includes the `tip`.
	fn withdraw_fee(
		ext: &mut dyn Externalities,
		who: &T::AccountId,
		_call: &T::RuntimeCall,
		_dispatch_info: &DispatchInfoOf<T::RuntimeCall>,
		fee: Self::Balance,
		tip: Self::Balance,
	) -> Result<Self::LiquidityInfo, TransactionValidityError> {
		if fee.is_zero() {
			return Ok(None)
		}

		match C::withdraw(
			ext,
			who,
			fee,
			Self::withdraw_reasons(&tip),
			ExistenceRequirement::KeepAlive,
		) {
			Ok(withdrawn) => Ok(Some(withdrawn)),
			Err(_) => Err(InvalidTransaction::Payment.into()),
		}
	}

	/// Hand the fee and the tip over to the `[OnUnbalanced]` implementation.
	/// Since the predicted fee might have been too high, parts of the fee may
	/// be refunded.
	///
	/// Note: The `corrected_fee` already includes the `tip`.
	fn correct_and_deposit_fee(
		ext: &mut dyn Externalities,
		who: &T::AccountId,
		_dispatch_info: &DispatchInfoOf<T::RuntimeCall>,
		_post_info: &PostDispatchInfoOf<T::RuntimeCall>,
		corrected_fee: Self::Balance,
		tip: Self::Balance,
		already_withdrawn: Self::LiquidityInfo,
	) -> Result<(), TransactionValidityError> {
		if let Some(paid) = already_withdrawn {
			// Calculate how much refund we should return
			let refund_amount = paid.saturating_sub(corrected_fee);
			// refund to the the account that paid the fees. If this fails, the
			// account might have dropped below the existential balance. In
			// that case we don't refund anything.
			let refunded = if refund_amount.is_zero() {
				Zero::zero()
			} else {
				C::deposit_into_existing(ext, who, refund_amount).unwrap_or_else(|_| Zero::zero())
			};
			// what was paid, net of the refund.
			let adjusted_paid = paid.saturating_sub(refunded);
			// Call someone else to handle the fee and the tip separately.
			let tip = tip.min(adjusted_paid);
			let fee = adjusted_paid.saturating_sub(tip);
			OU::on_unbalanceds(ext, [fee, tip].into_iter());
		}
		Ok(())
	}
}
