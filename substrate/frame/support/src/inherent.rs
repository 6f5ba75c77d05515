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

//! Inherent extrinsics: unsigned calls a block author derives from the environment.
//!
//! A module declares its inherent through [`ProvideInherent`]. A runtime lists its inherent
//! modules once in a [`RuntimeInherents`] implementation, usually by calling the helpers of this
//! module for each of them in order.

use crate::traits::IsSubType;
use alloc::vec::Vec;
use codec::Encode;
use sp_io::Externalities;
#[doc(inline)]
pub use sp_runtime::inherents::{
	CheckInherentsResult, InherentData, InherentIdentifier, IsFatalError, MakeFatalError,
};

const LOG_TARGET: &str = "runtime::inherent";

/// A pallet that provides or verifies an inherent extrinsic will implement this trait.
///
/// The pallet may provide an inherent, verify an inherent, or both provide and verify an inherent.
///
/// # Warning
///
/// To check the inherents, the block's extrinsics are scanned from the front until the first
/// signed extrinsic. An inherent placed after a signed extrinsic is never checked here, which is
/// why the executive rejects such blocks outright.
pub trait ProvideInherent {
	/// The call type of the pallet.
	type Call;
	/// The error returned by `check_inherent`.
	type Error: Encode + IsFatalError;
	/// The inherent identifier used by this inherent.
	const INHERENT_IDENTIFIER: InherentIdentifier;

	/// Create an inherent out of the given `InherentData`.
	///
	/// NOTE: All checks necessary to ensure that the inherent is correct and that can be done in
	/// the runtime should happen in the returned `Call`.
	/// E.g. if this provides the timestamp, the call will check that the given timestamp is
	/// increasing the old timestamp by more than a minimum and it will also check that the
	/// timestamp hasn't already been set in the current block.
	fn create_inherent(ext: &dyn Externalities, data: &InherentData) -> Option<Self::Call>;

	/// Determines whether this inherent is required in this block.
	///
	/// - `Ok(None)` indicates that this inherent is not required in this block. The default
	/// implementation returns this.
	///
	/// - `Ok(Some(e))` indicates that this inherent is required in this block. If the block does
	/// not carry it, checking the block reports `e`.
	///
	/// - `Err(_)` indicates that this function failed and further operations should be aborted.
	fn is_inherent_required(
		_ext: &dyn Externalities,
		_: &InherentData,
	) -> Result<Option<Self::Error>, Self::Error> {
		Ok(None)
	}

	/// Check whether the given inherent is valid. Checking the inherent is optional and can be
	/// omitted by using the default implementation.
	///
	/// When checking an inherent, the first parameter represents the inherent that is actually
	/// included in the block by its author. Whereas the second parameter represents the inherent
	/// data that the verifying node calculates.
	///
	/// This is intended to allow for checks that cannot be done within the runtime such as, e.g.,
	/// the timestamp.
	fn check_inherent(
		_ext: &dyn Externalities,
		_: &Self::Call,
		_: &InherentData,
	) -> Result<(), Self::Error> {
		Ok(())
	}

	/// Return whether the call is an inherent call.
	///
	/// NOTE: Signed extrinsics are not inherents, but a signed extrinsic with the given call
	/// variant can be dispatched.
	///
	/// # Warning
	///
	/// Inherents are enforced to be executed before other extrinsics. For this reason,
	/// pallets with unsigned transactions **must ensure** that no unsigned transaction call
	/// is an inherent call, when implementing `ValidateUnsigned::validate_unsigned`.
	/// Otherwise block producers can produce invalid blocks by including them after non inherents.
	fn is_inherent(call: &Self::Call) -> bool;
}

/// The inherents of a whole runtime, over its outer call type.
pub trait RuntimeInherents<RuntimeCall> {
	/// Create every inherent the runtime's modules derive from `data`, in module order.
	fn create_inherents(ext: &dyn Externalities, data: &InherentData) -> Vec<RuntimeCall>;

	/// Whether `call` is the inherent call of one of the modules.
	fn is_inherent(call: &RuntimeCall) -> bool;

	/// Check a single inherent `call` found in a block, recording any error into `result`.
	///
	/// Returns `true` if a fatal error was recorded and checking must stop.
	fn check_inherent(
		ext: &dyn Externalities,
		call: &RuntimeCall,
		data: &InherentData,
		result: &mut CheckInherentsResult,
	) -> bool;

	/// Check that every required inherent is among `inherents`, recording any error into
	/// `result`.
	///
	/// Returns `true` if a fatal error was recorded and checking must stop.
	fn check_required(
		ext: &dyn Externalities,
		inherents: &[&RuntimeCall],
		data: &InherentData,
		result: &mut CheckInherentsResult,
	) -> bool;
}

impl<RuntimeCall> RuntimeInherents<RuntimeCall> for () {
	fn create_inherents(_: &dyn Externalities, _: &InherentData) -> Vec<RuntimeCall> {
		Vec::new()
	}

	fn is_inherent(_: &RuntimeCall) -> bool {
		false
	}

	fn check_inherent(
		_: &dyn Externalities,
		_: &RuntimeCall,
		_: &InherentData,
		_: &mut CheckInherentsResult,
	) -> bool {
		false
	}

	fn check_required(
		_: &dyn Externalities,
		_: &[&RuntimeCall],
		_: &InherentData,
		_: &mut CheckInherentsResult,
	) -> bool {
		false
	}
}

/// Record `error` of inherent `identifier` into `result`, returning whether it is fatal.
///
/// Only one error may be recorded per identifier, and none after a fatal one.
fn record_error<E: Encode + IsFatalError>(
	result: &mut CheckInherentsResult,
	identifier: InherentIdentifier,
	error: &E,
) -> bool {
	// Refused only after a fatal or duplicate error; fatality still reaches the caller below.
	if let Err(e) = result.put_error(identifier, error) {
		log::error!(
			target: LOG_TARGET,
			"Could not record the error of inherent {:?}: {}",
			identifier,
			e,
		);
	}
	error.is_fatal_error()
}

/// Create the inherent of module `P`, if any, and push it onto `inherents`.
pub fn create_inherent<P, RuntimeCall>(
	ext: &dyn Externalities,
	data: &InherentData,
	inherents: &mut Vec<RuntimeCall>,
) where
	P: ProvideInherent,
	RuntimeCall: From<P::Call>,
{
	if let Some(call) = P::create_inherent(ext, data) {
		inherents.push(call.into());
	}
}

/// Whether `call` is the inherent call of module `P`.
pub fn is_inherent<P, RuntimeCall>(call: &RuntimeCall) -> bool
where
	P: ProvideInherent,
	RuntimeCall: IsSubType<P::Call>,
{
	call.is_sub_type().map_or(false, P::is_inherent)
}

/// Check `call` against module `P` if it is one of its inherents.
///
/// Returns `true` if a fatal error was recorded.
pub fn check_inherent<P, RuntimeCall>(
	ext: &dyn Externalities,
	call: &RuntimeCall,
	data: &InherentData,
	result: &mut CheckInherentsResult,
) -> bool
where
	P: ProvideInherent,
	RuntimeCall: IsSubType<P::Call>,
{
	let Some(call) = call.is_sub_type() else { return false };
	if !P::is_inherent(call) {
		return false
	}
	match P::check_inherent(ext, call, data) {
		Ok(()) => false,
		Err(e) => record_error(result, P::INHERENT_IDENTIFIER, &e),
	}
}

/// Check that module `P`'s inherent is among `inherents` if it is required.
///
/// Returns `true` if a fatal error was recorded.
pub fn check_required<P, RuntimeCall>(
	ext: &dyn Externalities,
	inherents: &[&RuntimeCall],
	data: &InherentData,
	result: &mut CheckInherentsResult,
) -> bool
where
	P: ProvideInherent,
	RuntimeCall: IsSubType<P::Call>,
{
	match P::is_inherent_required(ext, data) {
		Ok(None) => false,
		Ok(Some(e)) => {
			let found = inherents.iter().any(|call| is_inherent::<P, RuntimeCall>(call));
			if found {
				false
			} else {
				record_error(result, P::INHERENT_IDENTIFIER, &e)
			}
		},
		Err(e) => record_error(result, P::INHERENT_IDENTIFIER, &e),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use codec::Decode;
	use sp_io::TestExternalities;

	#[derive(Debug, Clone, PartialEq, Eq)]
	enum ModuleCall {
		Set(u64),
		Other,
	}

	#[derive(Debug, Clone, PartialEq, Eq)]
	enum RuntimeCall {
		Module(ModuleCall),
		Unrelated,
	}

	impl From<ModuleCall> for RuntimeCall {
		fn from(call: ModuleCall) -> Self {
			RuntimeCall::Module(call)
		}
	}

	impl IsSubType<ModuleCall> for RuntimeCall {
		fn is_sub_type(&self) -> Option<&ModuleCall> {
			match self {
				RuntimeCall::Module(call) => Some(call),
				_ => None,
			}
		}
	}

	#[derive(Encode, Decode, Debug, PartialEq, Eq)]
	enum Error {
		Mismatch,
		Missing,
	}

	impl IsFatalError for Error {
		fn is_fatal_error(&self) -> bool {
			matches!(self, Error::Missing)
		}
	}

	const ID: InherentIdentifier = *b"testinh0";

	struct Module;
	impl ProvideInherent for Module {
		type Call = ModuleCall;
		type Error = Error;
		const INHERENT_IDENTIFIER: InherentIdentifier = ID;

		fn create_inherent(_: &dyn Externalities, data: &InherentData) -> Option<ModuleCall> {
			data.get_data::<u64>(&ID).ok().flatten().map(ModuleCall::Set)
		}

		fn is_inherent_required(
			_: &dyn Externalities,
			data: &InherentData,
		) -> Result<Option<Error>, Error> {
			Ok(data.get_data::<u64>(&ID).ok().flatten().map(|_| Error::Missing))
		}

		fn check_inherent(
			_: &dyn Externalities,
			call: &ModuleCall,
			data: &InherentData,
		) -> Result<(), Error> {
			let expected = data.get_data::<u64>(&ID).ok().flatten();
			match call {
				ModuleCall::Set(v) if Some(*v) == expected => Ok(()),
				_ => Err(Error::Mismatch),
			}
		}

		fn is_inherent(call: &ModuleCall) -> bool {
			matches!(call, ModuleCall::Set(_))
		}
	}

	fn data_with(v: u64) -> InherentData {
		let mut data = InherentData::new();
		data.put_data(ID, &v).unwrap();
		data
	}

	#[test]
	fn create_and_recognise_inherents() {
		TestExternalities::new_empty().execute_with(|ext| {
			let mut calls = Vec::<RuntimeCall>::new();
			create_inherent::<Module, _>(ext, &InherentData::new(), &mut calls);
			assert!(calls.is_empty());

			create_inherent::<Module, _>(ext, &data_with(7), &mut calls);
			assert_eq!(calls, vec![RuntimeCall::Module(ModuleCall::Set(7))]);

			assert!(is_inherent::<Module, _>(&calls[0]));
			assert!(!is_inherent::<Module, _>(&RuntimeCall::Module(ModuleCall::Other)));
			assert!(!is_inherent::<Module, _>(&RuntimeCall::Unrelated));
		});
	}

	#[test]
	fn mismatching_inherent_is_recorded_once() {
		TestExternalities::new_empty().execute_with(|ext| {
			let data = data_with(7);
			let mut result = CheckInherentsResult::new();
			let call = RuntimeCall::Module(ModuleCall::Set(8));

			assert!(!check_inherent::<Module, _>(ext, &call, &data, &mut result));
			assert!(!result.ok());
			assert_eq!(result.get_error::<Error>(&ID).unwrap(), Some(Error::Mismatch));

			// A second error for the same identifier is refused, the first one stays.
			assert!(!check_inherent::<Module, _>(ext, &call, &data, &mut result));
			assert_eq!(result.into_errors().count(), 1);
		});
	}

	#[test]
	fn matching_inherent_passes() {
		TestExternalities::new_empty().execute_with(|ext| {
			let mut result = CheckInherentsResult::new();
			let call = RuntimeCall::Module(ModuleCall::Set(7));
			assert!(!check_inherent::<Module, _>(ext, &call, &data_with(7), &mut result));
			assert!(!check_required::<Module, _>(ext, &[&call], &data_with(7), &mut result));
			assert!(result.ok());
		});
	}

	#[test]
	fn missing_required_inherent_is_fatal() {
		TestExternalities::new_empty().execute_with(|ext| {
			let mut result = CheckInherentsResult::new();
			let other = RuntimeCall::Unrelated;
			assert!(check_required::<Module, _>(ext, &[&other], &data_with(1), &mut result));
			assert!(result.fatal_error());
			assert_eq!(result.get_error::<Error>(&ID).unwrap(), Some(Error::Missing));

			let mut result = CheckInherentsResult::new();
			assert!(!check_required::<Module, RuntimeCall>(
				ext,
				&[],
				&InherentData::new(),
				&mut result
			));
			assert!(result.ok());
		});
	}
}
