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

//! Entry points of the runtime.
//!
//! The typed functions wrap [`Executive`](crate::Executive) and the fee queries. [`dispatch`]
//! exposes the same functions at the byte level, the way a host calls into the runtime: a method
//! name plus the SCALE encoded argument tuple in, the SCALE encoded result out.

use crate::{
	Balance, Block, Executive, Hash, Header, RuntimeCall, TransactionPayment, UncheckedExtrinsic,
	VERSION,
};
use alloc::{string::String, vec::Vec};
use codec::{Decode, DecodeAll, Encode};
use frame_support::inherent::{CheckInherentsResult, InherentData};
use pallet_transaction_payment::{FeeDetails, RuntimeDispatchInfo};
use sp_io::Externalities;
use sp_runtime::{
	transaction_validity::{TransactionSource, TransactionValidity},
	version::RuntimeVersion,
	ApplyExtrinsicResult,
};

const LOG_TARGET: &str = "runtime::api";

/// Failure to call into the runtime at the byte level.
#[derive(Debug)]
pub enum Error {
	/// No entry point is registered under this name.
	UnknownMethod(String),
	/// The input is not the SCALE encoding of the method's arguments.
	BadInput(codec::Error),
}

impl core::fmt::Display for Error {
	fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
		match self {
			Error::UnknownMethod(method) => write!(f, "Unknown runtime method: {}", method),
			Error::BadInput(e) => write!(f, "Could not decode the method input: {}", e),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub fn version() -> RuntimeVersion {
	VERSION
}

pub fn initialize_block(ext: &mut dyn Externalities, header: &Header) {
	Executive::initialize_block(ext, header)
}

pub fn execute_block(ext: &mut dyn Externalities, block: Block) {
	Executive::execute_block(ext, block)
}

/// Apply `uxt` to the block being built.
///
/// A rejected extrinsic leaves the state exactly as it was before the call.
pub fn apply_extrinsic(
	ext: &mut dyn Externalities,
	uxt: UncheckedExtrinsic,
) -> ApplyExtrinsicResult {
	ext.storage_start_transaction();
	let result = Executive::apply_extrinsic(ext, uxt);
	let closed = if result.is_ok() {
		ext.storage_commit_transaction()
	} else {
		log::debug!(target: LOG_TARGET, "extrinsic rejected, rolling back: {:?}", result);
		ext.storage_rollback_transaction()
	};
	closed.expect("a transaction was started above; qed");
	result
}

pub fn finalize_block(ext: &mut dyn Externalities) -> Header {
	Executive::finalize_block(ext)
}

pub fn inherent_extrinsics(
	ext: &dyn Externalities,
	data: &InherentData,
) -> Vec<UncheckedExtrinsic> {
	Executive::inherent_extrinsics(ext, data)
}

pub fn check_inherents(
	ext: &dyn Externalities,
	block: &Block,
	data: &InherentData,
) -> CheckInherentsResult {
	Executive::check_inherents(ext, block, data)
}

/// Validate `uxt` for inclusion in the block after `block_hash`. Never changes the state.
pub fn validate_transaction(
	ext: &mut dyn Externalities,
	source: TransactionSource,
	uxt: UncheckedExtrinsic,
	block_hash: Hash,
) -> TransactionValidity {
	Executive::validate_transaction(ext, source, uxt, block_hash)
}

pub fn query_info(
	ext: &dyn Externalities,
	uxt: UncheckedExtrinsic,
	len: u32,
) -> RuntimeDispatchInfo<Balance> {
	TransactionPayment::query_info(ext, uxt, len)
}

pub fn query_fee_details(
	ext: &dyn Externalities,
	uxt: UncheckedExtrinsic,
	len: u32,
) -> FeeDetails<Balance> {
	TransactionPayment::query_fee_details(ext, uxt, len)
}

pub fn query_call_info(
	ext: &dyn Externalities,
	call: RuntimeCall,
	len: u32,
) -> RuntimeDispatchInfo<Balance> {
	TransactionPayment::query_call_info(ext, call, len)
}

pub fn query_call_fee_details(
	ext: &dyn Externalities,
	call: RuntimeCall,
	len: u32,
) -> FeeDetails<Balance> {
	TransactionPayment::query_call_fee_details(ext, call, len)
}

fn decode_input<T: Decode>(mut data: &[u8]) -> Result<T, Error> {
	T::decode_all(&mut data).map_err(Error::BadInput)
}

/// Call the entry point `method` with the SCALE encoded arguments in `data`.
pub fn dispatch(
	ext: &mut dyn Externalities,
	method: &str,
	data: &[u8],
) -> Result<Vec<u8>, Error> {
	log::trace!(target: LOG_TARGET, "calling {} with {} bytes of input", method, data.len());

	let output = match method {
		"Core_version" => version().encode(),
		"Core_initialize_block" => {
			let header: Header = decode_input(data)?;
			initialize_block(ext, &header);
			Vec::new()
		},
		"Core_execute_block" => {
			let block: Block = decode_input(data)?;
			execute_block(ext, block);
			Vec::new()
		},
		"BlockBuilder_apply_extrinsic" => {
			let uxt: UncheckedExtrinsic = decode_input(data)?;
			apply_extrinsic(ext, uxt).encode()
		},
		"BlockBuilder_finalize_block" => finalize_block(ext).encode(),
		"BlockBuilder_inherent_extrinsics" => {
			let data: InherentData = decode_input(data)?;
			inherent_extrinsics(&*ext, &data).encode()
		},
		"BlockBuilder_check_inherents" => {
			let (block, data): (Block, InherentData) = decode_input(data)?;
			check_inherents(&*ext, &block, &data).encode()
		},
		"TaggedTransactionQueue_validate_transaction" => {
			let (source, uxt, block_hash): (TransactionSource, UncheckedExtrinsic, Hash) =
				decode_input(data)?;
			validate_transaction(ext, source, uxt, block_hash).encode()
		},
		"TransactionPaymentApi_query_info" => {
			let (uxt, len): (UncheckedExtrinsic, u32) = decode_input(data)?;
			query_info(&*ext, uxt, len).encode()
		},
		"TransactionPaymentApi_query_fee_details" => {
			let (uxt, len): (UncheckedExtrinsic, u32) = decode_input(data)?;
			query_fee_details(&*ext, uxt, len).encode()
		},
		"TransactionPaymentCallApi_query_call_info" => {
			let (call, len): (RuntimeCall, u32) = decode_input(data)?;
			query_call_info(&*ext, call, len).encode()
		},
		"TransactionPaymentCallApi_query_call_fee_details" => {
			let (call, len): (RuntimeCall, u32) = decode_input(data)?;
			query_call_fee_details(&*ext, call, len).encode()
		},
		_ => return Err(Error::UnknownMethod(method.into())),
	};

	Ok(output)
}
