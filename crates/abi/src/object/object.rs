// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{ffi::c_void, ptr::null_mut};

use crate::constants::TYPE_OPAQUE;

/// Releases an owned object and everything it transitively owns
///
/// After the call the object's `payload` must not be used anymore.
pub type ObjectDeallocFnFFI = extern "C" fn(object: *mut ObjectFFI);

/// FFI-safe self-describing object (`c_bridge_ffi_object`)
///
/// - `type`: one of the `TYPE_*` constants or a tag with `MASK_CUSTOM` set
/// - `dealloc`: `None` means the holder borrows `payload` and must not free it
/// - `payload`: interpretation depends on `type`; null means empty
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ObjectFFI {
	/// Discriminant tag
	pub r#type: u64,
	/// Deallocator if the object is owned
	pub dealloc: Option<ObjectDeallocFnFFI>,
	/// Underlying storage
	pub payload: *mut c_void,
}

impl ObjectFFI {
	/// Create an empty object
	pub const fn empty() -> Self {
		Self {
			r#type: TYPE_OPAQUE,
			dealloc: None,
			payload: null_mut(),
		}
	}

	/// Check if the object carries no payload
	pub fn is_empty(&self) -> bool {
		self.payload.is_null()
	}

	/// Check if the holder is responsible for releasing the payload
	pub fn is_owned(&self) -> bool {
		self.dealloc.is_some()
	}
}

impl Default for ObjectFFI {
	fn default() -> Self {
		Self::empty()
	}
}

/// FFI-safe contiguous array used as payload of array objects
///
/// `data` is valid for exactly `len` elements.
#[repr(C)]
#[derive(Debug)]
pub struct RawArrayFFI<T> {
	/// Pointer to the first element
	pub data: *mut T,
	/// Number of elements
	pub len: usize,
}

/// Payload of a `TYPE_DATA_ARRAY` object (`c_bridge_data_array`)
pub type DataArrayFFI = RawArrayFFI<u8>;

/// Payload of a `TYPE_OBJECT_ARRAY` object (`c_bridge_object_array`)
pub type ObjectArrayFFI = RawArrayFFI<ObjectFFI>;

impl<T> RawArrayFFI<T> {
	/// Create an empty array
	pub const fn empty() -> Self {
		Self {
			data: null_mut(),
			len: 0,
		}
	}
}
