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

//! Generic implementation of an extrinsic that has passed the verification
//! stage.

use crate::{
	traits::{
		self, DispatchInfoOf, Dispatchable, Member, PostDispatchInfoOf, SignedExtension,
		ValidateUnsigned,
	},
	transaction_validity::{TransactionSource, TransactionValidity},
};
use sp_io::Externalities;

/// Definition of something that the external world might want to say; its existence implies that it
/// has been checked and is good, particularly with regards to the signature.
///
/// This is typically passed into [`traits::Applyable::apply`], which should execute
/// [`CheckedExtrinsic::function`], alongside all other bits and bobs.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct CheckedExtrinsic<AccountId, Call, Extra> {
	/// Who this purports to be from and the number of extrinsics have come before
	/// from the same signer, if anyone (note this is not a signature).
	pub signed: Option<(AccountId, Extra)>,

	/// The function that should be called.
	pub function: Call,
}

impl<AccountId, Call, Extra, RuntimeOrigin> traits::Applyable
	for CheckedExtrinsic<AccountId, Call, Extra>
where
	AccountId: Member,
	Call: Member + Dispatchable<RuntimeOrigin = RuntimeOrigin>,
	Extra: SignedExtension<AccountId = AccountId, Call = Call>,
	RuntimeOrigin: From<Option<AccountId>>,
{
	type Call = Call;

	fn validate<U: ValidateUnsigned<Call = Self::Call>>(
		&self,
		ext: &dyn Externalities,
		source: TransactionSource,
		info: &DispatchInfoOf<Self::Call>,
		len: usize,
	) -> TransactionValidity {
		if let Some((ref id, ref extra)) = self.signed {
			Extra::validate(extra, ext, id, &self.function, info, len)
		} else {
			let valid = Extra::validate_unsigned(ext, &self.function, info, len)?;
			let unsigned_validation = U::validate_unsigned(ext, source, &self.function)?;
			Ok(valid.combine_with(unsigned_validation))
		}
	}

	fn apply<U: ValidateUnsigned<Call = Self::Call>>(
		self,
		ext: &mut dyn Externalities,
		info: &DispatchInfoOf<Self::Call>,
		len: usize,
	) -> crate::ApplyExtrinsicResultWithInfo<PostDispatchInfoOf<Self::Call>> {
		let (maybe_who, maybe_pre) = if let Some((id, extra)) = self.signed {
			let pre = Extra::pre_dispatch(extra, ext, &id, &self.function, info, len)?;
			(Some(id), Some(pre))
		} else {
			Extra::pre_dispatch_unsigned(ext, &self.function, info, len)?;
			U::pre_dispatch(ext, &self.function)?;
			(None, None)
		};
		let res = self.function.dispatch(ext, RuntimeOrigin::from(maybe_who));
		let post_info = match res {
			Ok(info) => info,
			Err(err) => err.post_info,
		};
		Extra::post_dispatch(
			ext,
			maybe_pre,
			info,
			&post_info,
			len,
			&res.map(|_| ()).map_err(|e| e.error),
		)?;
		Ok(res)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		traits::Applyable,
		transaction_validity::{
			InvalidTransaction, TransactionValidityError, UnknownTransaction, ValidTransaction,
		},
		DispatchError, DispatchResultWithInfo,
	};
	use codec::{Decode, Encode};
	use sp_io::TestExternalities;

	const PRE_KEY: &[u8] = b":pre";
	const POST_KEY: &[u8] = b":post";
	const CALL_KEY: &[u8] = b":call";

	#[derive(Encode, Decode, Clone, Debug, PartialEq, Eq)]
	enum Call {
		Succeed,
		Fail,
	}

	impl Dispatchable for Call {
		type RuntimeOrigin = Option<u64>;
		type Info = ();
		type PostInfo = ();

		fn dispatch(
			self,
			ext: &mut dyn Externalities,
			origin: Option<u64>,
		) -> DispatchResultWithInfo<()> {
			ext.set_storage(CALL_KEY.to_vec(), origin.encode());
			match self {
				Call::Succeed => Ok(()),
				Call::Fail => Err(DispatchError::Other("failed").into()),
			}
		}
	}

	#[derive(Encode, Decode, Clone, Debug, PartialEq, Eq)]
	struct Extra;

	impl SignedExtension for Extra {
		const IDENTIFIER: &'static str = "Extra";
		type AccountId = u64;
		type Call = Call;
		type AdditionalSigned = ();
		type Pre = u64;

		fn additional_signed(&self, _: &dyn Externalities) -> Result<(), TransactionValidityError> {
			Ok(())
		}

		fn validate(
			&self,
			_ext: &dyn Externalities,
			who: &u64,
			_call: &Call,
			_info: &(),
			_len: usize,
		) -> TransactionValidity {
			Ok(ValidTransaction { priority: *who, ..Default::default() })
		}

		fn pre_dispatch(
			self,
			ext: &mut dyn Externalities,
			who: &u64,
			_call: &Call,
			_info: &(),
			_len: usize,
		) -> Result<u64, TransactionValidityError> {
			if *who == 0 {
				return Err(InvalidTransaction::BadSigner.into())
			}
			ext.set_storage(PRE_KEY.to_vec(), who.encode());
			Ok(*who)
		}

		fn post_dispatch(
			ext: &mut dyn Externalities,
			pre: Option<u64>,
			_info: &(),
			_post_info: &(),
			_len: usize,
			result: &crate::DispatchResult,
		) -> Result<(), TransactionValidityError> {
			ext.set_storage(POST_KEY.to_vec(), (pre, result.is_ok()).encode());
			Ok(())
		}
	}

	struct Unsigned;

	impl ValidateUnsigned for Unsigned {
		type Call = Call;

		fn validate_unsigned(
			_ext: &dyn Externalities,
			_source: TransactionSource,
			call: &Call,
		) -> TransactionValidity {
			match call {
				Call::Succeed => Ok(ValidTransaction { priority: 3, ..Default::default() }),
				Call::Fail => UnknownTransaction::NoUnsignedValidator.into(),
			}
		}
	}

	type Xt = CheckedExtrinsic<u64, Call, Extra>;

	fn read<T: Decode>(ext: &dyn Externalities, key: &[u8]) -> Option<T> {
		ext.storage(key).and_then(|v| T::decode(&mut &v[..]).ok())
	}

	#[test]
	fn signed_validation_uses_extensions_only() {
		let xt = Xt { signed: Some((5, Extra)), function: Call::Fail };
		TestExternalities::new_empty().execute_with(|ext| {
			let valid = xt.validate::<Unsigned>(ext, TransactionSource::External, &(), 0);
			assert_eq!(valid.map(|v| v.priority), Ok(5));
		});
	}

	#[test]
	fn unsigned_validation_combines_with_validator() {
		TestExternalities::new_empty().execute_with(|ext| {
			let xt = Xt { signed: None, function: Call::Succeed };
			let valid = xt.validate::<Unsigned>(ext, TransactionSource::External, &(), 0);
			assert_eq!(valid.map(|v| v.priority), Ok(3));

			let xt = Xt { signed: None, function: Call::Fail };
			assert_eq!(
				xt.validate::<Unsigned>(ext, TransactionSource::External, &(), 0),
				Err(UnknownTransaction::NoUnsignedValidator.into()),
			);
		});
	}

	#[test]
	fn apply_runs_pre_dispatch_call_and_post_dispatch() {
		TestExternalities::new_empty().execute_with(|ext| {
			let xt = Xt { signed: Some((7, Extra)), function: Call::Fail };
			let res = xt.apply::<Unsigned>(ext, &(), 0).unwrap();
			assert!(res.is_err());
			assert_eq!(read::<u64>(ext, PRE_KEY), Some(7));
			assert_eq!(read::<Option<u64>>(ext, CALL_KEY), Some(Some(7)));
			assert_eq!(read::<(Option<u64>, bool)>(ext, POST_KEY), Some((Some(7), false)));
		});
	}

	#[test]
	fn apply_unsigned_dispatches_with_none_origin() {
		TestExternalities::new_empty().execute_with(|ext| {
			let xt = Xt { signed: None, function: Call::Succeed };
			assert_eq!(xt.apply::<Unsigned>(ext, &(), 0), Ok(Ok(())));
			assert_eq!(read::<Option<u64>>(ext, CALL_KEY), Some(None));
			assert_eq!(read::<(Option<u64>, bool)>(ext, POST_KEY), Some((None, true)));
		});
	}

	#[test]
	fn failed_pre_dispatch_skips_the_call() {
		TestExternalities::new_empty().execute_with(|ext| {
			let xt = Xt { signed: Some((0, Extra)), function: Call::Succeed };
			assert_eq!(
				xt.apply::<Unsigned>(ext, &(), 0),
				Err(InvalidTransaction::BadSigner.into())
			);
			assert!(read::<Option<u64>>(ext, CALL_KEY).is_none());
		});
	}
}
