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

//! Dispatch system: dispatch classes, static and post-dispatch weight information, and the
//! origin a call is dispatched with.

use crate::traits::PalletInfo;
use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_runtime::{
	generic::{CheckedExtrinsic, UncheckedExtrinsic},
	traits::SignedExtension,
	DispatchError, ModuleError, Weight, MAX_MODULE_ERROR_ENCODED_SIZE,
};
use sp_io::Externalities;

/// The return type of a `Dispatchable` in frame. When returned explicitly from
/// a dispatchable function it allows overriding the default `PostDispatchInfo`
/// returned from a dispatch.
pub type DispatchResultWithPostInfo = sp_runtime::DispatchResultWithInfo<PostDispatchInfo>;

#[doc(inline)]
pub use sp_runtime::DispatchResult;

/// The error type contained in a `DispatchResultWithPostInfo`.
pub type DispatchErrorWithPostInfo = sp_runtime::DispatchErrorWithPostInfo<PostDispatchInfo>;

/// Type that can be dispatched with an origin but without checking the origin filter.
///
/// Implemented by the call enum of every module and by the runtime call that wraps them.
pub trait UnfilteredDispatchable {
	/// The origin type of the runtime.
	type RuntimeOrigin;

	/// Dispatch this call but do not check the filter in origin.
	fn dispatch_bypass_filter(
		self,
		ext: &mut dyn Externalities,
		origin: Self::RuntimeOrigin,
	) -> DispatchResultWithPostInfo;
}

/// Origin for the System pallet.
#[derive(PartialEq, Eq, Clone, Debug, Encode, Decode, TypeInfo, MaxEncodedLen)]
pub enum RawOrigin<AccountId> {
	/// The system itself ordained this dispatch to happen: this is the highest privilege level.
	Root,
	/// It is signed by some public key and we provide the `AccountId`.
	Signed(AccountId),
	/// It is signed by nobody, can be either:
	/// * included and agreed upon by the validators anyway,
	/// * or unsigned transaction validated by a pallet.
	None,
}

impl<AccountId> From<Option<AccountId>> for RawOrigin<AccountId> {
	fn from(s: Option<AccountId>) -> RawOrigin<AccountId> {
		match s {
			Some(who) => RawOrigin::Signed(who),
			None => RawOrigin::None,
		}
	}
}

impl<AccountId> RawOrigin<AccountId> {
	/// Returns `Some` with a reference to the `AccountId` if `self` is `Signed`, `None` otherwise.
	pub fn as_signed(&self) -> Option<&AccountId> {
		match &self {
			Self::Signed(x) => Some(x),
			_ => None,
		}
	}

	/// Returns `true` if `self` is `Root`, `None` otherwise.
	pub fn is_root(&self) -> bool {
		matches!(&self, Self::Root)
	}

	/// Returns `true` if `self` is `None`, `None` otherwise.
	pub fn is_none(&self) -> bool {
		matches!(&self, Self::None)
	}
}

/// A generalized group of dispatch types.
///
/// NOTE whenever upgrading the enum make sure to also update
/// [DispatchClass::all] and [DispatchClass::non_mandatory] helper functions.
#[derive(
	PartialEq, Eq, Clone, Copy, Encode, Decode, Debug, TypeInfo, MaxEncodedLen, Default,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub enum DispatchClass {
	/// A normal dispatch.
	#[default]
	Normal,
	/// An operational dispatch.
	Operational,
	/// A mandatory dispatch. These kinds of dispatch are always included regardless of their
	/// weight, therefore it is critical that they are separately validated to ensure that a
	/// malicious validator cannot craft a valid but impossibly heavy block. Usually this just
	/// means ensuring that the extrinsic can only be included once and that it is always very
	/// light.
	///
	/// Do *NOT* use it for extrinsics that can be heavy.
	///
	/// The only real use case for this is inherent extrinsics that are required to execute in a
	/// block for the block to be valid, and it solves the issue in the case that the block
	/// initialization is sufficiently heavy to mean that those inherents do not fit into the
	/// block. Essentially, we assume that in these exceptional circumstances, it is better to
	/// allow an overweight block to be created than to not allow any block at all to be created.
	Mandatory,
}

impl DispatchClass {
	/// Returns an array containing all dispatch classes.
	pub fn all() -> &'static [DispatchClass] {
		&[DispatchClass::Normal, DispatchClass::Operational, DispatchClass::Mandatory]
	}

	/// Returns an array of all dispatch classes except `Mandatory`.
	pub fn non_mandatory() -> &'static [DispatchClass] {
		&[DispatchClass::Normal, DispatchClass::Operational]
	}
}

/// A trait that represents one or many values of given type.
///
/// Useful to accept as parameter type to let the caller pass either a single value directly
/// or an iterator.
pub trait OneOrMany<T> {
	/// The iterator type.
	type Iter: Iterator<Item = T>;
	/// Convert this item into an iterator.
	fn into_iter(self) -> Self::Iter;
}

impl OneOrMany<DispatchClass> for DispatchClass {
	type Iter = core::iter::Once<DispatchClass>;
	fn into_iter(self) -> Self::Iter {
		core::iter::once(self)
	}
}

impl<'a> OneOrMany<DispatchClass> for &'a [DispatchClass] {
	type Iter = core::iter::Cloned<core::slice::Iter<'a, DispatchClass>>;
	fn into_iter(self) -> Self::Iter {
		self.iter().cloned()
	}
}

/// Explicit enum to denote if a transaction pays fee or not.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Encode, Decode, TypeInfo, MaxEncodedLen, Default)]
pub enum Pays {
	/// Transactor will pay related fees.
	#[default]
	Yes,
	/// Transactor will NOT pay related fees.
	No,
}

impl From<Pays> for PostDispatchInfo {
	fn from(pays_fee: Pays) -> Self {
		Self { actual_weight: None, pays_fee }
	}
}

impl From<bool> for Pays {
	fn from(b: bool) -> Self {
		match b {
			true => Self::Yes,
			false => Self::No,
		}
	}
}

/// A bundle of static information about a call: what it weighs, which class it is in and
/// whether it pays fees.
#[derive(Clone, Copy, Eq, PartialEq, Default, Debug, Encode, Decode, TypeInfo)]
pub struct DispatchInfo {
	/// Weight of this transaction.
	pub weight: Weight,
	/// Class of this transaction.
	pub class: DispatchClass,
	/// Does this transaction pay fees.
	pub pays_fee: Pays,
}

/// A `Dispatchable` function (aka transaction) that can carry some static information along with
/// it.
pub trait GetDispatchInfo {
	/// Return a `DispatchInfo`, containing relevant information of this dispatch.
	///
	/// This is done independently of its encoded size.
	fn get_dispatch_info(&self) -> DispatchInfo;
}

impl GetDispatchInfo for () {
	fn get_dispatch_info(&self) -> DispatchInfo {
		DispatchInfo::default()
	}
}

/// Extract the actual weight from a dispatch result if any or fall back to the default weight.
pub fn extract_actual_weight(result: &DispatchResultWithPostInfo, info: &DispatchInfo) -> Weight {
	match result {
		Ok(post_info) => post_info,
		Err(err) => &err.post_info,
	}
	.calc_actual_weight(info)
}

/// Extract the actual pays_fee from a dispatch result if any or fall back to the default weight.
pub fn extract_actual_pays_fee(result: &DispatchResultWithPostInfo, info: &DispatchInfo) -> Pays {
	match result {
		Ok(post_info) => post_info,
		Err(err) => &err.post_info,
	}
	.pays_fee(info)
}

/// Weight information that is only available post dispatch.
/// NOTE: This can only be used to reduce the weight or fee, not increase it.
#[derive(Clone, Copy, Eq, PartialEq, Default, Debug, Encode, Decode, TypeInfo)]
pub struct PostDispatchInfo {
	/// Actual weight consumed by a call or `None` which stands for the worst case static weight.
	pub actual_weight: Option<Weight>,
	/// Whether this transaction should pay fees when all is said and done.
	pub pays_fee: Pays,
}

impl PostDispatchInfo {
	/// Calculate how much (if any) weight was not used by the `Dispatchable`.
	pub fn calc_unspent(&self, info: &DispatchInfo) -> Weight {
		info.weight - self.calc_actual_weight(info)
	}

	/// Calculate how much weight was actually spent by the `Dispatchable`.
	pub fn calc_actual_weight(&self, info: &DispatchInfo) -> Weight {
		if let Some(actual_weight) = self.actual_weight {
			actual_weight.min(info.weight)
		} else {
			info.weight
		}
	}

	/// Determine if user should actually pay fees at the end of the dispatch.
	pub fn pays_fee(&self, info: &DispatchInfo) -> Pays {
		// If they originally were not paying fees, or the post dispatch info
		// says they should not pay fees, then they don't pay fees.
		// This is because the pre dispatch information must contain the
		// worst case for weight and fees paid.
		if info.pays_fee == Pays::No || self.pays_fee == Pays::No {
			Pays::No
		} else {
			// Otherwise they pay.
			Pays::Yes
		}
	}
}

impl From<()> for PostDispatchInfo {
	fn from(_: ()) -> Self {
		Self { actual_weight: None, pays_fee: Default::default() }
	}
}

impl From<Option<Weight>> for PostDispatchInfo {
	fn from(actual_weight: Option<Weight>) -> Self {
		Self { actual_weight, pays_fee: Default::default() }
	}
}

impl From<(Option<Weight>, Pays)> for PostDispatchInfo {
	fn from(post_weight_info: (Option<Weight>, Pays)) -> Self {
		let (actual_weight, pays_fee) = post_weight_info;
		Self { actual_weight, pays_fee }
	}
}

/// Allows easy conversion from `DispatchError` to `DispatchErrorWithPostInfo` for dispatchables
/// that want to return a custom a posterior weight on error.
pub trait WithPostDispatchInfo {
	/// Call this on your modules custom errors type in order to return a custom weight on error.
	///
	/// # Example
	///
	/// ```ignore
	/// let who = ensure_signed(origin).map_err(|e| e.with_weight(Weight::from_parts(100, 0)))?;
	/// ensure!(who == me, Error::<T>::NotMe.with_weight(200_000));
	/// ```
	fn with_weight(self, actual_weight: Weight) -> DispatchErrorWithPostInfo;
}

impl<T> WithPostDispatchInfo for T
where
	T: Into<DispatchError>,
{
	fn with_weight(self, actual_weight: Weight) -> DispatchErrorWithPostInfo {
		DispatchErrorWithPostInfo {
			post_info: PostDispatchInfo {
				actual_weight: Some(actual_weight),
				pays_fee: Default::default(),
			},
			error: self.into(),
		}
	}
}

/// Implementation for unchecked extrinsic.
impl<Address, Call, Signature, Extra> GetDispatchInfo
	for UncheckedExtrinsic<Address, Call, Signature, Extra>
where
	Call: GetDispatchInfo,
	Extra: SignedExtension,
{
	fn get_dispatch_info(&self) -> DispatchInfo {
		self.function.get_dispatch_info()
	}
}

/// Implementation for checked extrinsic.
impl<AccountId, Call, Extra> GetDispatchInfo for CheckedExtrinsic<AccountId, Call, Extra>
where
	Call: GetDispatchInfo,
{
	fn get_dispatch_info(&self) -> DispatchInfo {
		self.function.get_dispatch_info()
	}
}

/// Implementation for test extrinsic.
#[cfg(feature = "std")]
impl<Call: Encode + GetDispatchInfo, Extra: Encode> GetDispatchInfo
	for sp_runtime::testing::TestXt<Call, Extra>
{
	fn get_dispatch_info(&self) -> DispatchInfo {
		// for testing: weight == size.
		DispatchInfo {
			weight: Weight::from_parts(self.encode().len() as _, 0),
			pays_fee: Pays::Yes,
			class: self.call.get_dispatch_info().class,
		}
	}
}

/// A struct holding value for each `DispatchClass`.
#[derive(Clone, Eq, PartialEq, Default, Debug, Encode, Decode, TypeInfo, MaxEncodedLen)]
pub struct PerDispatchClass<T> {
	/// Value for `Normal` extrinsics.
	normal: T,
	/// Value for `Operational` extrinsics.
	operational: T,
	/// Value for `Mandatory` extrinsics.
	mandatory: T,
}

impl<T> PerDispatchClass<T> {
	/// Create new `PerDispatchClass` with the same value for every class.
	pub fn new(val: impl Fn(DispatchClass) -> T) -> Self {
		Self {
			normal: val(DispatchClass::Normal),
			operational: val(DispatchClass::Operational),
			mandatory: val(DispatchClass::Mandatory),
		}
	}

	/// Get a mutable reference to current value of given class.
	pub fn get_mut(&mut self, class: DispatchClass) -> &mut T {
		match class {
			DispatchClass::Operational => &mut self.operational,
			DispatchClass::Normal => &mut self.normal,
			DispatchClass::Mandatory => &mut self.mandatory,
		}
	}

	/// Get current value for given class.
	pub fn get(&self, class: DispatchClass) -> &T {
		match class {
			DispatchClass::Normal => &self.normal,
			DispatchClass::Operational => &self.operational,
			DispatchClass::Mandatory => &self.mandatory,
		}
	}
}

impl<T: Clone> PerDispatchClass<T> {
	/// Set the value of given class.
	pub fn set(&mut self, new: T, class: impl OneOrMany<DispatchClass>) {
		for class in class.into_iter() {
			*self.get_mut(class) = new.clone();
		}
	}
}

impl PerDispatchClass<Weight> {
	/// Returns the total weight consumed by all extrinsics in the block.
	///
	/// Saturates on overflow.
	pub fn total(&self) -> Weight {
		let mut sum = Weight::zero();
		for class in DispatchClass::all() {
			sum.saturating_accrue(*self.get(*class));
		}
		sum
	}

	/// Add some weight to the given class. Saturates at the numeric bounds.
	pub fn add(mut self, weight: Weight, class: DispatchClass) -> Self {
		self.accrue(weight, class);
		self
	}

	/// Increase the weight of the given class. Saturates at the numeric bounds.
	pub fn accrue(&mut self, weight: Weight, class: DispatchClass) {
		self.get_mut(class).saturating_accrue(weight);
	}

	/// Try to increase the weight of the given class. Saturates at the numeric bounds.
	pub fn checked_accrue(&mut self, weight: Weight, class: DispatchClass) -> Result<(), ()> {
		self.get_mut(class).checked_accrue(weight).ok_or(())
	}

	/// Reduce the weight of the given class. Saturates at the numeric bounds.
	pub fn reduce(&mut self, weight: Weight, class: DispatchClass) {
		self.get_mut(class).saturating_reduce(weight);
	}
}

/// Build the `DispatchError::Module` value of error number `error` raised by module `P`.
///
/// The index is the position of `P` in the runtime, as reported by `PI`.
pub fn module_error<PI: PalletInfo, P: 'static>(error: u8, message: &'static str) -> DispatchError {
	let index = PI::index::<P>().expect("Every active module has an index in the runtime; qed") as u8;
	let mut encoded = [0u8; MAX_MODULE_ERROR_ENCODED_SIZE];
	encoded[0] = error;
	DispatchError::Module(ModuleError { index, error: encoded, message: Some(message) })
}

#[cfg(test)]
mod weight_tests {
	use super::*;
	use sp_runtime::traits::Dispatchable;

	#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
	enum Call {
		Light,
		Heavy,
		Free,
		Op,
	}

	impl GetDispatchInfo for Call {
		fn get_dispatch_info(&self) -> DispatchInfo {
			match self {
				Call::Light => DispatchInfo { weight: Weight::from_parts(1000, 0), ..Default::default() },
				Call::Heavy => DispatchInfo {
					weight: Weight::from_parts(7_000_000, 500),
					..Default::default()
				},
				Call::Free => DispatchInfo {
					weight: Weight::from_parts(1000, 0),
					pays_fee: Pays::No,
					..Default::default()
				},
				Call::Op => DispatchInfo {
					weight: Weight::from_parts(5, 0),
					class: DispatchClass::Operational,
					..Default::default()
				},
			}
		}
	}

	impl Dispatchable for Call {
		type RuntimeOrigin = RawOrigin<u64>;
		type Info = DispatchInfo;
		type PostInfo = PostDispatchInfo;

		fn dispatch(
			self,
			_ext: &mut dyn Externalities,
			origin: Self::RuntimeOrigin,
		) -> DispatchResultWithPostInfo {
			match (self, origin) {
				(Call::Heavy, RawOrigin::Signed(_)) => Ok(Some(Weight::from_parts(500, 20)).into()),
				(Call::Heavy, _) => Err(DispatchError::BadOrigin.with_weight(Weight::from_parts(100, 0))),
				(Call::Free, _) => Ok(Pays::Yes.into()),
				_ => Ok(().into()),
			}
		}
	}

	#[test]
	fn dispatch_classes_are_listed() {
		assert_eq!(DispatchClass::all().len(), 3);
		assert!(!DispatchClass::non_mandatory().contains(&DispatchClass::Mandatory));
		assert_eq!(DispatchClass::default(), DispatchClass::Normal);
	}

	#[test]
	fn extract_actual_weight_works() {
		let ext = &mut sp_io::TestExternalities::new_empty();
		let info = Call::Heavy.get_dispatch_info();

		let ok = Call::Heavy.dispatch(ext, RawOrigin::Signed(1));
		assert_eq!(extract_actual_weight(&ok, &info), Weight::from_parts(500, 20));

		let err = Call::Heavy.dispatch(ext, RawOrigin::None);
		assert_eq!(extract_actual_weight(&err, &info), Weight::from_parts(100, 0));

		let light = Call::Light.get_dispatch_info();
		assert_eq!(extract_actual_weight(&Call::Light.dispatch(ext, RawOrigin::Root), &light), light.weight);
	}

	#[test]
	fn actual_weight_is_capped_by_declared_weight() {
		let info = Call::Light.get_dispatch_info();
		let post: PostDispatchInfo = Some(Weight::from_parts(5000, 10)).into();
		assert_eq!(post.calc_actual_weight(&info), Weight::from_parts(1000, 0));
		assert_eq!(post.calc_unspent(&info), Weight::zero());

		let post: PostDispatchInfo = Some(Weight::from_parts(400, 0)).into();
		assert_eq!(post.calc_unspent(&info), Weight::from_parts(600, 0));
	}

	#[test]
	fn extract_actual_pays_fee_works() {
		let ext = &mut sp_io::TestExternalities::new_empty();
		let free = Call::Free.get_dispatch_info();
		// A call declared free stays free whatever it reports afterwards.
		assert_eq!(extract_actual_pays_fee(&Call::Free.dispatch(ext, RawOrigin::Root), &free), Pays::No);

		let light = Call::Light.get_dispatch_info();
		let waived: DispatchResultWithPostInfo = Ok(Pays::No.into());
		assert_eq!(extract_actual_pays_fee(&waived, &light), Pays::No);
		assert_eq!(extract_actual_pays_fee(&Ok(().into()), &light), Pays::Yes);
	}

	#[test]
	fn per_dispatch_class_accounting() {
		let mut consumed = PerDispatchClass::<Weight>::default();
		consumed.accrue(Weight::from_parts(10, 1), DispatchClass::Normal);
		consumed.accrue(Call::Op.get_dispatch_info().weight, DispatchClass::Operational);
		consumed = consumed.add(Weight::from_parts(1, 1), DispatchClass::Mandatory);
		assert_eq!(consumed.total(), Weight::from_parts(16, 2));

		consumed.reduce(Weight::from_parts(20, 20), DispatchClass::Normal);
		assert_eq!(*consumed.get(DispatchClass::Normal), Weight::zero());

		consumed.accrue(Weight::MAX, DispatchClass::Operational);
		assert_eq!(consumed.checked_accrue(Weight::from_parts(1, 0), DispatchClass::Operational), Err(()));
		assert_eq!(consumed.total(), Weight::MAX);
	}

	#[test]
	fn per_dispatch_class_set_many() {
		let mut limits = PerDispatchClass::new(|_| Some(1u32));
		limits.set(None, DispatchClass::non_mandatory());
		assert_eq!(*limits.get(DispatchClass::Normal), None);
		assert_eq!(*limits.get(DispatchClass::Mandatory), Some(1));
		limits.set(Some(4), DispatchClass::Operational);
		assert_eq!(*limits.get(DispatchClass::Operational), Some(4));
	}

	#[test]
	fn raw_origin_helpers() {
		assert_eq!(RawOrigin::<u64>::from(Some(3)).as_signed(), Some(&3));
		assert!(RawOrigin::<u64>::from(None).is_none());
		assert!(RawOrigin::<u64>::Root.is_root());
	}
}
