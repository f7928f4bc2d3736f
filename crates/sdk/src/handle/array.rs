// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::c_void,
	fmt::{self, Debug, Formatter},
	marker::PhantomData,
	mem,
	ptr::{self, null, null_mut},
	slice,
};

use c_bridge_abi::{
	handle::{ArrayHandleFFI, ArrayU8FFI, OpaqueFFI},
	object::RawArrayFFI,
};
use tracing::trace;

use super::{HandleElement, HandleValue, OpaqueHandle};
use crate::{
	array::DataArray,
	error::{BridgeError, Result},
	guard,
	kind::ObjectKind,
	object::Object,
	storage,
};

fn storage_of<E: HandleElement>(array: *const ArrayHandleFFI<E::Raw>) -> *mut RawArrayFFI<E> {
	match unsafe { array.as_ref() } {
		Some(array) => array.object as *mut RawArrayFFI<E>,
		None => null_mut(),
	}
}

fn release<E: HandleElement>(array: *mut ArrayHandleFFI<E::Raw>) {
	guard::boundary("array_handle::dealloc", || {
		let Some(array) = (unsafe { array.as_mut() }) else {
			return;
		};
		if array.object.is_null() {
			return;
		}

		let raw = array.object as *mut RawArrayFFI<E>;
		array.object = null_mut();

		let elements = unsafe { storage::from_raw(raw) };
		trace!(len = elements.len(), "released array handle");
		drop(elements);
	});
}

fn len<E: HandleElement>(array: *const ArrayHandleFFI<E::Raw>) -> usize {
	guard::boundary("array_handle::len", || unsafe { storage::as_slice(storage_of::<E>(array)) }.len())
}

fn data<E: HandleElement>(array: *const ArrayHandleFFI<E::Raw>) -> *const E::Raw {
	guard::boundary("array_handle::data", || match unsafe { storage_of::<E>(array).as_ref() } {
		Some(raw) => raw.data as *const E::Raw,
		None => null(),
	})
}

fn data_mut<E: HandleElement>(array: *mut ArrayHandleFFI<E::Raw>) -> *mut E::Raw {
	guard::boundary("array_handle::data_mut", || match unsafe { storage_of::<E>(array).as_ref() } {
		Some(raw) => raw.data as *mut E::Raw,
		None => null_mut(),
	})
}

macro_rules! handle_element {
	($element:ty => $raw:ty, $vtable:ident) => {
		mod $vtable {
			use super::*;

			pub(super) extern "C" fn dealloc(array: *mut ArrayHandleFFI<$raw>) {
				release::<$element>(array)
			}

			pub(super) extern "C" fn len(array: *const ArrayHandleFFI<$raw>) -> usize {
				super::len::<$element>(array)
			}

			pub(super) extern "C" fn data(array: *const ArrayHandleFFI<$raw>) -> *const $raw {
				super::data::<$element>(array)
			}

			pub(super) extern "C" fn data_mut(array: *mut ArrayHandleFFI<$raw>) -> *mut $raw {
				super::data_mut::<$element>(array)
			}
		}

		unsafe impl HandleElement for $element {
			type Raw = $raw;

			const DEALLOC: extern "C" fn(*mut ArrayHandleFFI<$raw>) = $vtable::dealloc;
			const LEN: extern "C" fn(*const ArrayHandleFFI<$raw>) -> usize = $vtable::len;
			const DATA: extern "C" fn(*const ArrayHandleFFI<$raw>) -> *const $raw = $vtable::data;
			const DATA_MUT: extern "C" fn(*mut ArrayHandleFFI<$raw>) -> *mut $raw = $vtable::data_mut;
		}
	};
}

handle_element!(u8 => u8, bytes);
handle_element!(ByteArray => ArrayU8FFI, byte_arrays);
handle_element!(OpaqueHandle => OpaqueFFI, opaques);

/// An owned array handle holding elements of type `E`
#[repr(transparent)]
pub struct ArrayHandle<E: HandleElement> {
	raw: ArrayHandleFFI<E::Raw>,
	_marker: PhantomData<E>,
}

/// `array_u8_t`
pub type ByteArray = ArrayHandle<u8>;

/// `array_u8array_t`
pub type ByteArrayArray = ArrayHandle<ByteArray>;

/// `array_opaque_t`
pub type OpaqueArray = ArrayHandle<OpaqueHandle>;

impl<E: HandleElement> ArrayHandle<E> {
	pub fn from_vec(elements: Vec<E>) -> Self {
		Self::with_storage(storage::into_raw(elements) as *mut c_void)
	}

	/// A handle that holds nothing; its length is 0
	pub fn empty() -> Self {
		Self::with_storage(null_mut())
	}

	fn with_storage(object: *mut c_void) -> Self {
		Self {
			raw: ArrayHandleFFI {
				dealloc: E::DEALLOC,
				len: E::LEN,
				data: E::DATA,
				data_mut: E::DATA_MUT,
				object,
			},
			_marker: PhantomData,
		}
	}

	/// Take ownership of a raw handle
	///
	/// # Safety
	/// `raw` must be a valid handle that nobody else releases.
	pub unsafe fn from_raw(raw: ArrayHandleFFI<E::Raw>) -> Self {
		Self {
			raw,
			_marker: PhantomData,
		}
	}

	/// Give up ownership; the caller becomes responsible for releasing the handle
	pub fn into_raw(self) -> ArrayHandleFFI<E::Raw> {
		let raw = self.raw;
		mem::forget(self);
		raw
	}

	pub fn as_raw(&self) -> &ArrayHandleFFI<E::Raw> {
		&self.raw
	}

	pub fn len(&self) -> usize {
		(self.raw.len)(&self.raw)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns true if the handle no longer owns storage
	pub fn is_released(&self) -> bool {
		self.raw.object.is_null()
	}

	pub fn as_slice(&self) -> &[E] {
		let data = (self.raw.data)(&self.raw) as *const E;
		if data.is_null() {
			return &[];
		}
		unsafe { slice::from_raw_parts(data, self.len()) }
	}

	pub fn as_slice_mut(&mut self) -> &mut [E] {
		let len = self.len();
		let data = (self.raw.data_mut)(&mut self.raw) as *mut E;
		if data.is_null() {
			return &mut [];
		}
		unsafe { slice::from_raw_parts_mut(data, len) }
	}

	/// Returns true if the handle was created by this implementation
	pub fn is_native(&self) -> bool {
		ptr::fn_addr_eq(self.raw.dealloc, E::DEALLOC)
	}

	/// Move the elements out without copying; a foreign handle is handed back unchanged
	pub fn move_into_vec(mut self) -> std::result::Result<Vec<E>, Self> {
		if !self.is_native() {
			return Err(self);
		}
		let object = mem::replace(&mut self.raw.object, null_mut());
		if object.is_null() {
			return Ok(Vec::new());
		}
		Ok(unsafe { storage::from_raw(object as *mut RawArrayFFI<E>) })
	}

	/// Release the elements now; the handle is empty afterwards
	pub fn release(&mut self) {
		(self.raw.dealloc)(&mut self.raw);
		self.raw.object = null_mut();
	}
}

impl ByteArray {
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		Self::from_vec(bytes.into())
	}

	/// Move the bytes into a flat data array, copying only if the handle is foreign
	pub fn into_data_array(self) -> DataArray {
		match self.move_into_vec() {
			Ok(bytes) => DataArray::from_vec(bytes),
			Err(foreign) => DataArray::from_vec(foreign.as_slice().to_vec()),
		}
	}

	/// Move the bytes out of a flat data array, copying only if the array is foreign
	pub fn from_data_array(array: DataArray) -> Self {
		match array.move_into_vec() {
			Ok(bytes) => Self::from_vec(bytes),
			Err(foreign) => Self::from_vec(foreign.as_slice().to_vec()),
		}
	}
}

impl<E: HandleElement> Drop for ArrayHandle<E> {
	fn drop(&mut self) {
		self.release();
	}
}

impl<E: HandleElement> Default for ArrayHandle<E> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<E: HandleElement + Debug> Debug for ArrayHandle<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ArrayHandle").field("native", &self.is_native()).field("elements", &self.as_slice()).finish()
	}
}

impl<E: HandleElement> From<Vec<E>> for ArrayHandle<E> {
	fn from(elements: Vec<E>) -> Self {
		Self::from_vec(elements)
	}
}

impl From<&[u8]> for ByteArray {
	fn from(bytes: &[u8]) -> Self {
		Self::from_vec(bytes.to_vec())
	}
}

impl HandleValue for ByteArray {
	type Raw = ArrayU8FFI;

	fn into_raw(self) -> ArrayU8FFI {
		ArrayHandle::into_raw(self)
	}

	unsafe fn from_raw(raw: ArrayU8FFI) -> Self {
		unsafe { ArrayHandle::from_raw(raw) }
	}

	fn empty_raw() -> ArrayU8FFI {
		ByteArray::empty().into_raw()
	}

	fn accepts(object: &Object) -> bool {
		!object.is_empty() && object.is_kind(ObjectKind::DataArray)
	}

	fn into_object(self) -> Object {
		self.into_data_array().into_object()
	}

	fn from_object(object: Object) -> Result<Self> {
		match DataArray::try_from(object) {
			Ok(array) => Ok(Self::from_data_array(array)),
			Err(object) if object.is_empty() => Err(BridgeError::Empty),
			Err(object) => Err(BridgeError::KindMismatch {
				expected: "data array",
				found: object.raw_type(),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::DropCounter;

	#[test]
	fn test_byte_array() {
		let mut array = ByteArray::from_bytes(*b"abcd");
		assert_eq!(array.len(), 4);
		assert!(array.is_native());

		for byte in array.as_slice_mut() {
			*byte = b'0';
		}
		assert_eq!(array.as_slice(), b"0000");
	}

	#[test]
	fn test_vtable_through_raw() {
		let mut raw = ByteArray::from_bytes(vec![1, 2, 3]).into_raw();
		assert_eq!((raw.len)(&raw), 3);
		unsafe {
			*(raw.data_mut)(&mut raw) = 9;
			assert_eq!(*(raw.data)(&raw), 9);
		}

		(raw.dealloc)(&mut raw);
		assert!(raw.object.is_null());
		assert_eq!((raw.len)(&raw), 0);
		assert!((raw.data)(&raw).is_null());
		(raw.dealloc)(&mut raw);
		(raw.dealloc)(ptr::null_mut());
	}

	#[test]
	fn test_empty() {
		let array = ByteArray::empty();
		assert_eq!(array.len(), 0);
		assert!(array.as_slice().is_empty());
		assert!(array.is_released());
		assert_eq!(array.move_into_vec().unwrap(), Vec::<u8>::new());

		let array = ByteArray::from_bytes(Vec::new());
		assert_eq!(array.len(), 0);
		assert!(!array.is_released());
	}

	#[test]
	fn test_nested_release() {
		let inner = vec![ByteArray::from_bytes(*b"a"), ByteArray::from_bytes(*b"bc"), ByteArray::empty()];
		let nested = ByteArrayArray::from_vec(inner);
		assert_eq!(nested.len(), 3);

		let lens: Vec<usize> = nested.as_slice().iter().map(ByteArray::len).collect();
		assert_eq!(lens, vec![1, 2, 0]);
	}

	#[test]
	fn test_opaque_array_releases_each_element() {
		let counter = DropCounter::new();
		let elements = (0..5).map(|i| OpaqueHandle::from_box(Box::new(counter.track(i)))).collect();
		let array = OpaqueArray::from_vec(elements);
		assert_eq!(array.len(), 5);
		assert_eq!(array.as_slice()[3].downcast_ref::<crate::testing::Tracked<i32>>().map(|t| **t), Some(3));

		drop(array);
		assert_eq!(counter.count(), 5);
	}

	#[test]
	fn test_data_array_conversion() {
		let array = ByteArray::from_bytes(*b"xyz");
		let flat = array.into_data_array();
		assert!(flat.is_native());
		assert_eq!(flat.as_slice(), b"xyz");

		let array = ByteArray::from_data_array(flat);
		assert_eq!(array.as_slice(), b"xyz");
	}

	#[test]
	fn test_from_object() {
		let object = DataArray::from("err").into_object();
		assert!(ByteArray::accepts(&object));
		let array = ByteArray::from_object(object).unwrap();
		assert_eq!(array.as_slice(), b"err");

		assert_eq!(ByteArray::from_object(Object::empty()).unwrap_err(), BridgeError::Empty);
	}
}
