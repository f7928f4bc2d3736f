// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Typed views over array objects
//!
//! A [`DataArray`] is an object of kind `DATA_ARRAY` whose payload is a
//! [`DataArrayFFI`](c_bridge_abi::object::DataArrayFFI); an [`ObjectArray`]
//! holds an [`ObjectArrayFFI`](c_bridge_abi::object::ObjectArrayFFI).
//! Releasing an object array releases every element it still holds.

use std::{
	ffi::{CStr, c_void},
	fmt::{self, Debug, Display, Formatter},
	marker::PhantomData,
	ptr::null_mut,
	str,
};

use c_bridge_abi::object::{ObjectDeallocFnFFI, ObjectFFI, RawArrayFFI};
use tracing::trace;

use crate::{
	error::{BridgeError, Result},
	guard,
	kind::ObjectKind,
	object::Object,
	storage,
};

/// Element type of an array object
pub trait ArrayElement: Sized + 'static {
	/// Kind of the array object holding elements of this type
	const KIND: ObjectKind;

	/// Deallocator of arrays created by this implementation
	const DEALLOC: ObjectDeallocFnFFI;
}

impl ArrayElement for u8 {
	const KIND: ObjectKind = ObjectKind::DataArray;
	const DEALLOC: ObjectDeallocFnFFI = dealloc_data_array;
}

impl ArrayElement for Object {
	const KIND: ObjectKind = ObjectKind::ObjectArray;
	const DEALLOC: ObjectDeallocFnFFI = dealloc_object_array;
}

extern "C" fn dealloc_data_array(object: *mut ObjectFFI) {
	guard::boundary("data_array::dealloc", || release::<u8>(object));
}

extern "C" fn dealloc_object_array(object: *mut ObjectFFI) {
	guard::boundary("object_array::dealloc", || release::<Object>(object));
}

fn release<T: ArrayElement>(object: *mut ObjectFFI) {
	let Some(object) = (unsafe { object.as_mut() }) else {
		return;
	};
	if object.payload.is_null() {
		return;
	}

	let payload = object.payload as *mut RawArrayFFI<T>;
	object.payload = null_mut();
	object.dealloc = None;

	let elements = unsafe { storage::from_raw(payload) };
	trace!(kind = %T::KIND, len = elements.len(), "released array");
	drop(elements);
}

/// An array object holding elements of type `T`
#[repr(transparent)]
pub struct GenericArray<T: ArrayElement> {
	object: Object,
	_marker: PhantomData<T>,
}

pub type DataArray = GenericArray<u8>;

pub type ObjectArray = GenericArray<Object>;

impl<T: ArrayElement> GenericArray<T> {
	/// Move `elements` into a new array object
	pub fn from_vec(elements: Vec<T>) -> Self {
		let payload = storage::into_raw(elements) as *mut c_void;
		Self {
			object: unsafe { Object::from_raw_parts(T::KIND, payload, T::DEALLOC) },
			_marker: PhantomData,
		}
	}

	fn payload(&self) -> *mut RawArrayFFI<T> {
		self.object.as_raw().payload as *mut RawArrayFFI<T>
	}

	pub fn len(&self) -> usize {
		self.as_slice().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn as_slice(&self) -> &[T] {
		unsafe { storage::as_slice(self.payload()) }
	}

	pub fn as_slice_mut(&mut self) -> &mut [T] {
		unsafe { storage::as_slice_mut(self.payload()) }
	}

	/// Returns true if the array was allocated by this implementation
	pub fn is_native(&self) -> bool {
		self.object.is_allocated_by(T::DEALLOC)
	}

	/// Move the elements out without copying
	///
	/// Only arrays allocated by this implementation can be taken apart; any
	/// other array is handed back unchanged.
	pub fn move_into_vec(mut self) -> std::result::Result<Vec<T>, Self> {
		if !self.is_native() {
			return Err(self);
		}

		let raw = self.object.as_raw_mut();
		let payload = raw.payload as *mut RawArrayFFI<T>;
		*raw = ObjectFFI::empty();
		if payload.is_null() {
			return Ok(Vec::new());
		}
		Ok(unsafe { storage::from_raw(payload) })
	}

	/// Release the elements now; the array is empty afterwards
	pub fn release(&mut self) {
		self.object.release();
	}

	pub fn as_object(&self) -> &Object {
		&self.object
	}

	pub fn into_object(self) -> Object {
		self.object
	}
}

impl DataArray {
	/// A NUL-terminated UTF-8 message, the encoding used for error payloads
	///
	/// Interior NUL bytes are dropped so the message survives as a C string.
	pub fn from_message(message: impl Display) -> Self {
		let mut bytes = message.to_string().into_bytes();
		bytes.retain(|&b| b != 0);
		bytes.push(0);
		Self::from_vec(bytes)
	}

	/// The bytes as a C string, if they are exactly one NUL-terminated string
	pub fn as_c_str(&self) -> Option<&CStr> {
		CStr::from_bytes_with_nul(self.as_slice()).ok()
	}

	/// The bytes as text, without a trailing NUL
	pub fn message(&self) -> Result<&str> {
		let bytes = self.as_slice();
		let bytes = bytes.strip_suffix(&[0]).unwrap_or(bytes);
		str::from_utf8(bytes).map_err(|_| BridgeError::InvalidMessage)
	}
}

impl<T: ArrayElement> TryFrom<Object> for GenericArray<T> {
	type Error = Object;

	/// Hands the object back if it is empty or not an array of `T`
	fn try_from(object: Object) -> std::result::Result<Self, Object> {
		if object.is_empty() || !object.is_kind(T::KIND) {
			return Err(object);
		}
		Ok(Self {
			object,
			_marker: PhantomData,
		})
	}
}

impl<T: ArrayElement> From<GenericArray<T>> for Object {
	fn from(array: GenericArray<T>) -> Self {
		array.into_object()
	}
}

impl<T: ArrayElement> From<Vec<T>> for GenericArray<T> {
	fn from(elements: Vec<T>) -> Self {
		Self::from_vec(elements)
	}
}

impl From<&[u8]> for DataArray {
	fn from(bytes: &[u8]) -> Self {
		Self::from_vec(bytes.to_vec())
	}
}

impl From<&str> for DataArray {
	fn from(text: &str) -> Self {
		Self::from_vec(text.as_bytes().to_vec())
	}
}

impl<T: ArrayElement + Debug> Debug for GenericArray<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("GenericArray")
			.field("kind", &T::KIND)
			.field("native", &self.is_native())
			.field("elements", &self.as_slice())
			.finish()
	}
}
