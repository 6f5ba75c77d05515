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

//! Traits and associated utilities for use in the FRAME environment.
//!
//! NOTE: If you're looking for `parameter_types`, it has moved in to the top-level module.

pub use sp_runtime::traits::{ConstBool, ConstU128, ConstU16, ConstU32, ConstU64, ConstU8, Get};

mod hooks;
pub use hooks::{OnFinalize, OnIdle, OnInitialize, OnRuntimeUpgrade};

mod misc;
pub use misc::{GetDefault, IsSubType, OnKilledAccount, OnNewAccount, PalletInfo};

mod stored_map;
pub use stored_map::StoredMap;

pub mod tokens;
pub use tokens::{Currency, ExistenceRequirement, OnUnbalanced, WithdrawReasons};
