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

//! The genesis state of the runtime, as JSON.

use crate::{keyring::Keyring, Balance, Runtime};
use serde::{Deserialize, Serialize};
use sp_runtime::{BuildStorage, Storage};

/// What every endowed development account starts with.
pub const ENDOWMENT: Balance = 1 << 60;

/// Genesis configuration of every module in the runtime.
///
/// Modules left out of the JSON start from their default configuration.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuntimeGenesisConfig {
	#[serde(default)]
	pub system: frame_system::GenesisConfig<Runtime>,
	#[serde(default)]
	pub balances: pallet_balances::GenesisConfig<Runtime>,
	#[serde(default)]
	pub transaction_payment: pallet_transaction_payment::GenesisConfig<Runtime>,
}

impl RuntimeGenesisConfig {
	/// Parse a genesis configuration from its JSON form.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// The JSON form of this configuration.
	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string_pretty(self)
	}

	/// Alice, Bob and Charlie, each endowed with `balance`.
	pub fn development(balance: Balance) -> Self {
		let endowed = [Keyring::Alice, Keyring::Bob, Keyring::Charlie];
		RuntimeGenesisConfig {
			balances: pallet_balances::GenesisConfig {
				balances: endowed.into_iter().map(|k| (k.to_account_id(), balance)).collect(),
			},
			..Default::default()
		}
	}
}

impl BuildStorage for RuntimeGenesisConfig {
	fn assimilate_storage(&self, storage: &mut Storage) -> Result<(), String> {
		self.system.assimilate_storage(storage)?;
		self.balances.assimilate_storage(storage)?;
		self.transaction_payment.assimilate_storage(storage)?;
		Ok(())
	}
}

/// Build the genesis storage out of a JSON configuration.
pub fn build_state(json: &str) -> Result<Storage, String> {
	RuntimeGenesisConfig::from_json(json)
		.map_err(|e| format!("Invalid JSON blob: {}", e))?
		.build_storage()
}

/// The development genesis storage.
pub fn development_storage() -> Storage {
	RuntimeGenesisConfig::development(ENDOWMENT)
		.build_storage()
		.expect("the development genesis is valid; qed")
}
