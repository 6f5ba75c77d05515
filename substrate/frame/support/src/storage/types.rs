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

//! Storage types to build abstraction on storage, they implements storage traits such as
//! StorageMap and others.

use super::{unhashed, StorageDecodeLength, StorageInstance};
use crate::{
	hash::{ReversibleStorageHasher, StorageHasher},
	traits::{Get, GetDefault},
};
use alloc::vec::Vec;
use codec::{Decode, Encode, EncodeAppend, EncodeLike, FullCodec};
use core::marker::PhantomData;
use sp_io::Externalities;

/// Trait implementing how the storage optional value is converted into the queried type.
///
/// It is implemented by:
/// * `OptionQuery` which converts an optional value to an optional value, used when querying
///   storage returns an optional value.
/// * `ValueQuery` which converts an optional value to a value, used when querying storage returns
///   a value.
pub trait QueryKindTrait<Value, OnEmpty> {
	/// Type returned on query
	type Query: FullCodec + 'static;

	/// Convert an optional value (i.e. some if trie contains the value or none otherwise) to the
	/// query.
	fn from_optional_value_to_query(v: Option<Value>) -> Self::Query;

	/// Convert a query to an optional value.
	fn from_query_to_optional_value(v: Self::Query) -> Option<Value>;
}

/// Implement QueryKindTrait with query being `Option<Value>`
///
/// NOTE: it doesn't support a generic `OnEmpty`. This means only `None` can be
/// returned when no value is found. To use another `OnEmpty` implementation, `ValueQuery` can be
/// used instead.
pub struct OptionQuery;
impl<Value> QueryKindTrait<Value, GetDefault> for OptionQuery
where
	Value: FullCodec + 'static,
{
	type Query = Option<Value>;

	fn from_optional_value_to_query(v: Option<Value>) -> Self::Query {
		// NOTE: OnEmpty is fixed to GetDefault, thus it returns `None` on no value.
		v
	}

	fn from_query_to_optional_value(v: Self::Query) -> Option<Value> {
		v
	}
}

/// Implement QueryKindTrait with query being `Value`
pub struct ValueQuery;
impl<Value, OnEmpty> QueryKindTrait<Value, OnEmpty> for ValueQuery
where
	Value: FullCodec + 'static,
	OnEmpty: Get<Value>,
{
	type Query = Value;

	fn from_optional_value_to_query(v: Option<Value>) -> Self::Query {
		v.unwrap_or_else(|| OnEmpty::get())
	}

	fn from_query_to_optional_value(v: Self::Query) -> Option<Value> {
		Some(v)
	}
}

/// A type representing a *value* in storage. A *storage value* is a single value of a given type
/// stored on-chain.
///
/// For general information regarding the `#[pallet::storage]` attribute, refer to
/// [`StorageInstance`].
///
/// The value is stored under the key `twox_128(PALLET_PREFIX) ++ twox_128(STORAGE_PREFIX)`.
pub struct StorageValue<Prefix, Value, QueryKind = OptionQuery, OnEmpty = GetDefault>(
	PhantomData<(Prefix, Value, QueryKind, OnEmpty)>,
);

impl<Prefix, Value, QueryKind, OnEmpty> StorageValue<Prefix, Value, QueryKind, OnEmpty>
where
	Prefix: StorageInstance,
	Value: FullCodec,
	QueryKind: QueryKindTrait<Value, OnEmpty>,
	OnEmpty: Get<QueryKind::Query> + 'static,
{
	/// Get the storage key.
	pub fn hashed_key() -> [u8; 32] {
		Prefix::prefix_hash()
	}

	/// Does the value (explicitly) exist in storage?
	pub fn exists(ext: &dyn Externalities) -> bool {
		unhashed::exists(ext, &Self::hashed_key())
	}

	/// Load the value from the provided storage instance.
	pub fn get(ext: &dyn Externalities) -> QueryKind::Query {
		QueryKind::from_optional_value_to_query(unhashed::get(ext, &Self::hashed_key()))
	}

	/// Try to get the underlying value from the provided storage instance.
	///
	/// Returns `Ok` if it exists, `Err` if not.
	pub fn try_get(ext: &dyn Externalities) -> Result<Value, ()> {
		unhashed::get(ext, &Self::hashed_key()).ok_or(())
	}

	/// Store a value under this key into the provided storage instance.
	pub fn put<Arg: EncodeLike<Value>>(ext: &mut dyn Externalities, val: Arg) {
		unhashed::put(ext, &Self::hashed_key(), &val)
	}

	/// Store a value under this key into the provided storage instance.
	///
	/// this uses the query type rather than the underlying value.
	pub fn set(ext: &mut dyn Externalities, val: QueryKind::Query) {
		match QueryKind::from_query_to_optional_value(val) {
			Some(ref val) => Self::put(ext, val),
			None => Self::kill(ext),
		}
	}

	/// Mutate the value
	pub fn mutate<R, F: FnOnce(&mut QueryKind::Query) -> R>(ext: &mut dyn Externalities, f: F) -> R {
		let mut val = Self::get(ext);
		let ret = f(&mut val);
		Self::set(ext, val);
		ret
	}

	/// Mutate the value if closure returns `Ok`
	pub fn try_mutate<R, E, F: FnOnce(&mut QueryKind::Query) -> Result<R, E>>(
		ext: &mut dyn Externalities,
		f: F,
	) -> Result<R, E> {
		let mut val = Self::get(ext);
		let ret = f(&mut val);
		if ret.is_ok() {
			Self::set(ext, val);
		}
		ret
	}

	/// Clear the storage value.
	pub fn kill(ext: &mut dyn Externalities) {
		unhashed::kill(ext, &Self::hashed_key())
	}

	/// Take a value from storage, removing it afterwards.
	pub fn take(ext: &mut dyn Externalities) -> QueryKind::Query {
		QueryKind::from_optional_value_to_query(unhashed::take(ext, &Self::hashed_key()))
	}

	/// Append the given item to the value in the storage.
	///
	/// `Value` is required to implement [`EncodeAppend`].
	///
	/// # Warning
	///
	/// If the storage item is not encoded properly, the storage item will be overwritten
	/// and set to `[item]`. Any default value set for the storage item will be ignored
	/// on overwrite.
	pub fn append<Item, EncodeLikeItem>(ext: &mut dyn Externalities, item: EncodeLikeItem)
	where
		Item: Encode,
		Value: EncodeAppend<Item = Item>,
		EncodeLikeItem: EncodeLike<Item>,
	{
		super::append::<Value, _>(ext, &Self::hashed_key(), item)
	}

	/// Read the length of the storage value without decoding the entire value.
	///
	/// `Value` is required to implement [`StorageDecodeLength`].
	///
	/// If the value does not exists or it fails to decode the length, `None` is returned.
	/// Otherwise `Some(len)` is returned.
	pub fn decode_len(ext: &dyn Externalities) -> Option<usize>
	where
		Value: StorageDecodeLength,
	{
		unhashed::get_raw(ext, &Self::hashed_key()).and_then(|v| Value::decode_len(&v).ok())
	}
}

/// A type representing a *map* in storage. A *storage map* is a mapping of keys to values of a
/// given type stored on-chain.
///
/// Each value is stored at `twox_128(PALLET_PREFIX) ++ twox_128(STORAGE_PREFIX) ++
/// Hasher1(encode(key))`.
pub struct StorageMap<Prefix, Hasher, Key, Value, QueryKind = OptionQuery, OnEmpty = GetDefault>(
	PhantomData<(Prefix, Hasher, Key, Value, QueryKind, OnEmpty)>,
);

impl<Prefix, Hasher, Key, Value, QueryKind, OnEmpty>
	StorageMap<Prefix, Hasher, Key, Value, QueryKind, OnEmpty>
where
	Prefix: StorageInstance,
	Hasher: StorageHasher,
	Key: FullCodec,
	Value: FullCodec,
	QueryKind: QueryKindTrait<Value, OnEmpty>,
	OnEmpty: Get<QueryKind::Query> + 'static,
{
	/// The prefix shared by every key of the map.
	pub fn final_prefix() -> [u8; 32] {
		Prefix::prefix_hash()
	}

	/// Get the storage key used to fetch a value corresponding to a specific key.
	pub fn hashed_key_for<KeyArg: EncodeLike<Key>>(key: KeyArg) -> Vec<u8> {
		let prefix = Self::final_prefix();
		let key_hashed = key.using_encoded(Hasher::hash);

		let mut final_key = Vec::with_capacity(prefix.len() + key_hashed.as_ref().len());

		final_key.extend_from_slice(&prefix);
		final_key.extend_from_slice(key_hashed.as_ref());

		final_key
	}

	/// Does the value (explicitly) exist in storage?
	pub fn contains_key<KeyArg: EncodeLike<Key>>(ext: &dyn Externalities, key: KeyArg) -> bool {
		unhashed::exists(ext, &Self::hashed_key_for(key))
	}

	/// Load the value associated with the given key from the map.
	pub fn get<KeyArg: EncodeLike<Key>>(ext: &dyn Externalities, key: KeyArg) -> QueryKind::Query {
		QueryKind::from_optional_value_to_query(unhashed::get(ext, &Self::hashed_key_for(key)))
	}

	/// Try to get the value for the given key from the map.
	///
	/// Returns `Ok` if it exists, `Err` if not.
	pub fn try_get<KeyArg: EncodeLike<Key>>(
		ext: &dyn Externalities,
		key: KeyArg,
	) -> Result<Value, ()> {
		unhashed::get(ext, &Self::hashed_key_for(key)).ok_or(())
	}

	/// Store or remove the value to be associated with `key` so that `get` returns the `query`.
	pub fn set<KeyArg: EncodeLike<Key>>(
		ext: &mut dyn Externalities,
		key: KeyArg,
		q: QueryKind::Query,
	) {
		match QueryKind::from_query_to_optional_value(q) {
			Some(v) => Self::insert(ext, key, v),
			None => Self::remove(ext, key),
		}
	}

	/// Store a value to be associated with the given key from the map.
	pub fn insert<KeyArg: EncodeLike<Key>, ValArg: EncodeLike<Value>>(
		ext: &mut dyn Externalities,
		key: KeyArg,
		val: ValArg,
	) {
		unhashed::put(ext, &Self::hashed_key_for(key), &val)
	}

	/// Remove the value under a key.
	pub fn remove<KeyArg: EncodeLike<Key>>(ext: &mut dyn Externalities, key: KeyArg) {
		unhashed::kill(ext, &Self::hashed_key_for(key))
	}

	/// Mutate the value under a key.
	pub fn mutate<KeyArg: EncodeLike<Key>, R, F: FnOnce(&mut QueryKind::Query) -> R>(
		ext: &mut dyn Externalities,
		key: KeyArg,
		f: F,
	) -> R {
		let final_key = Self::hashed_key_for(key);
		let mut val = QueryKind::from_optional_value_to_query(unhashed::get(ext, &final_key));
		let ret = f(&mut val);
		match QueryKind::from_query_to_optional_value(val) {
			Some(ref val) => unhashed::put(ext, &final_key, val),
			None => unhashed::kill(ext, &final_key),
		}
		ret
	}

	/// Mutate the item, only if an `Ok` value is returned.
	pub fn try_mutate<KeyArg, R, E, F>(ext: &mut dyn Externalities, key: KeyArg, f: F) -> Result<R, E>
	where
		KeyArg: EncodeLike<Key>,
		F: FnOnce(&mut QueryKind::Query) -> Result<R, E>,
	{
		let final_key = Self::hashed_key_for(key);
		let mut val = QueryKind::from_optional_value_to_query(unhashed::get(ext, &final_key));
		let ret = f(&mut val);
		if ret.is_ok() {
			match QueryKind::from_query_to_optional_value(val) {
				Some(ref val) => unhashed::put(ext, &final_key, val),
				None => unhashed::kill(ext, &final_key),
			}
		}
		ret
	}

	/// Mutate the value under a key.
	///
	/// Deletes the item if mutated to a `None`.
	pub fn mutate_exists<KeyArg: EncodeLike<Key>, R, F: FnOnce(&mut Option<Value>) -> R>(
		ext: &mut dyn Externalities,
		key: KeyArg,
		f: F,
	) -> R {
		let final_key = Self::hashed_key_for(key);
		let mut val = unhashed::get(ext, &final_key);
		let ret = f(&mut val);
		match val {
			Some(ref val) => unhashed::put(ext, &final_key, val),
			None => unhashed::kill(ext, &final_key),
		}
		ret
	}

	/// Mutate the item, only if an `Ok` value is returned. Deletes the item if mutated to a `None`.
	/// `f` will always be called with an option representing if the storage item exists (`Some<V>`)
	/// or if the storage item does not exist (`None`), independent of the `QueryType`.
	pub fn try_mutate_exists<KeyArg, R, E, F>(
		ext: &mut dyn Externalities,
		key: KeyArg,
		f: F,
	) -> Result<R, E>
	where
		KeyArg: EncodeLike<Key>,
		F: FnOnce(&mut Option<Value>) -> Result<R, E>,
	{
		let final_key = Self::hashed_key_for(key);
		let mut val = unhashed::get(ext, &final_key);
		let ret = f(&mut val);
		if ret.is_ok() {
			match val {
				Some(ref val) => unhashed::put(ext, &final_key, val),
				None => unhashed::kill(ext, &final_key),
			}
		}
		ret
	}

	/// Take the value under a key.
	pub fn take<KeyArg: EncodeLike<Key>>(ext: &mut dyn Externalities, key: KeyArg) -> QueryKind::Query {
		QueryKind::from_optional_value_to_query(unhashed::take(ext, &Self::hashed_key_for(key)))
	}

	/// Append the given items to the value in the storage.
	///
	/// `Value` is required to implement `codec::EncodeAppend`.
	///
	/// # Warning
	///
	/// If the storage item is not encoded properly, the storage will be overwritten
	/// and set to `[item]`. Any default value set for the storage item will be ignored
	/// on overwrite.
	pub fn append<Item, EncodeLikeItem, KeyArg>(
		ext: &mut dyn Externalities,
		key: KeyArg,
		item: EncodeLikeItem,
	) where
		KeyArg: EncodeLike<Key>,
		Item: Encode,
		Value: EncodeAppend<Item = Item>,
		EncodeLikeItem: EncodeLike<Item>,
	{
		super::append::<Value, _>(ext, &Self::hashed_key_for(key), item)
	}

	/// Remove up to `limit` values of the map, returning how many were removed.
	///
	/// With `None` every value is removed.
	pub fn clear(ext: &mut dyn Externalities, limit: Option<u32>) -> u32 {
		unhashed::clear_prefix(ext, &Self::final_prefix(), limit)
	}
}

impl<Prefix, Hasher, Key, Value, QueryKind, OnEmpty>
	StorageMap<Prefix, Hasher, Key, Value, QueryKind, OnEmpty>
where
	Prefix: StorageInstance,
	Hasher: StorageHasher + ReversibleStorageHasher,
	Key: FullCodec,
	Value: FullCodec,
	QueryKind: QueryKindTrait<Value, OnEmpty>,
	OnEmpty: Get<QueryKind::Query> + 'static,
{
	/// Enumerate all elements in the map in no particular order.
	///
	/// Entries whose key or value fails to decode are skipped.
	pub fn iter(ext: &dyn Externalities) -> Vec<(Key, Value)> {
		let prefix = Self::final_prefix();
		unhashed::keys_with_prefix(ext, &prefix)
			.into_iter()
			.filter_map(|raw_key| {
				let key = Hasher::reverse(&raw_key[prefix.len()..])
					.ok()
					.and_then(|mut k| Key::decode(&mut k).ok())?;
				let value = unhashed::get::<Value>(ext, &raw_key)?;
				Some((key, value))
			})
			.collect()
	}

	/// Enumerate all keys in the map in no particular order.
	pub fn iter_keys(ext: &dyn Externalities) -> Vec<Key> {
		Self::iter(ext).into_iter().map(|(k, _)| k).collect()
	}
}
