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

//! Layered change sets sitting in front of a storage backend.

use alloc::{collections::BTreeMap, vec, vec::Vec};

type ChangeSet = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// Pending storage changes, one layer per open storage transaction.
///
/// The bottom layer holds changes that are no longer part of any transaction. A `None` value
/// records a deletion so that it shadows whatever the backend holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayedChanges {
	layers: Vec<ChangeSet>,
}

impl Default for OverlayedChanges {
	fn default() -> Self {
		Self { layers: vec![ChangeSet::new()] }
	}
}

impl OverlayedChanges {
	/// The change recorded for `key`, if any.
	///
	/// `Some(None)` means the key was deleted, `None` means the overlay does not know about it.
	pub fn storage(&self, key: &[u8]) -> Option<Option<&[u8]>> {
		self.layers.iter().rev().find_map(|layer| layer.get(key)).map(|v| v.as_deref())
	}

	/// Record a write (`Some`) or a deletion (`None`) in the innermost layer.
	pub fn set(&mut self, key: Vec<u8>, value: Option<Vec<u8>>) {
		self.top_mut().insert(key, value);
	}

	/// Number of storage transactions currently open.
	pub fn transaction_depth(&self) -> usize {
		self.layers.len() - 1
	}

	/// Open a new layer.
	pub fn start_transaction(&mut self) {
		self.layers.push(ChangeSet::new());
	}

	/// Drop the innermost layer.
	pub fn rollback_transaction(&mut self) -> Result<(), ()> {
		if self.transaction_depth() == 0 {
			return Err(())
		}
		self.layers.pop();
		Ok(())
	}

	/// Merge the innermost layer into the one below it.
	pub fn commit_transaction(&mut self) -> Result<(), ()> {
		if self.transaction_depth() == 0 {
			return Err(())
		}
		let top = self.layers.pop().ok_or(())?;
		self.top_mut().extend(top);
		Ok(())
	}

	/// Every change, innermost layer winning.
	pub fn merged(&self) -> ChangeSet {
		let mut merged = ChangeSet::new();
		for layer in &self.layers {
			merged.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
		}
		merged
	}

	/// Take the committed changes out, leaving an empty overlay.
	///
	/// Fails while a transaction is open.
	pub fn drain_committed(&mut self) -> Result<ChangeSet, ()> {
		if self.transaction_depth() != 0 {
			return Err(())
		}
		Ok(core::mem::take(self.top_mut()))
	}

	fn top_mut(&mut self) -> &mut ChangeSet {
		if self.layers.is_empty() {
			self.layers.push(ChangeSet::new());
		}
		let last = self.layers.len() - 1;
		&mut self.layers[last]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rollback_discards_only_the_innermost_layer() {
		let mut overlay = OverlayedChanges::default();
		overlay.set(b"a".to_vec(), Some(b"1".to_vec()));

		overlay.start_transaction();
		overlay.set(b"a".to_vec(), Some(b"2".to_vec()));
		overlay.set(b"b".to_vec(), None);
		assert_eq!(overlay.storage(b"a"), Some(Some(&b"2"[..])));
		assert_eq!(overlay.storage(b"b"), Some(None));

		assert_eq!(overlay.rollback_transaction(), Ok(()));
		assert_eq!(overlay.storage(b"a"), Some(Some(&b"1"[..])));
		assert_eq!(overlay.storage(b"b"), None);
		assert_eq!(overlay.rollback_transaction(), Err(()));
	}

	#[test]
	fn nested_commit_folds_into_parent() {
		let mut overlay = OverlayedChanges::default();
		overlay.start_transaction();
		overlay.start_transaction();
		overlay.set(b"k".to_vec(), Some(b"v".to_vec()));
		assert_eq!(overlay.transaction_depth(), 2);

		assert_eq!(overlay.commit_transaction(), Ok(()));
		assert_eq!(overlay.storage(b"k"), Some(Some(&b"v"[..])));
		assert!(overlay.drain_committed().is_err());

		// rolling back the outer layer drops the committed inner write too
		assert_eq!(overlay.rollback_transaction(), Ok(()));
		assert_eq!(overlay.storage(b"k"), None);
		assert_eq!(overlay.drain_committed(), Ok(ChangeSet::new()));
	}
}
