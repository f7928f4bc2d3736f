// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;

use super::OpaqueFFI;

/// FFI-safe owned array of `T` (`array_u8_t` and friends)
///
/// The pointers returned by `data` and `data_mut` are valid for exactly
/// `len()` elements until the array is released. Callers must not hold a
/// `data` and a `data_mut` view of the same array at the same time.
#[repr(C)]
pub struct ArrayHandleFFI<T> {
	/// Release the array and every element it owns
	///
	/// Must accept a null `array` and an `array` whose `object` is null.
	pub dealloc: extern "C" fn(array: *mut ArrayHandleFFI<T>),

	/// Number of elements, O(1)
	pub len: extern "C" fn(array: *const ArrayHandleFFI<T>) -> usize,

	/// Read-only view of the elements
	pub data: extern "C" fn(array: *const ArrayHandleFFI<T>) -> *const T,

	/// Writable view of the elements
	pub data_mut: extern "C" fn(array: *mut ArrayHandleFFI<T>) -> *mut T,

	/// Underlying storage; null once released or consumed
	pub object: *mut c_void,
}

impl<T> Clone for ArrayHandleFFI<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for ArrayHandleFFI<T> {}

/// A heap-allocated byte array (`array_u8_t`)
pub type ArrayU8FFI = ArrayHandleFFI<u8>;

/// A heap-allocated array of byte arrays (`array_u8array_t`)
pub type ArrayU8ArrayFFI = ArrayHandleFFI<ArrayU8FFI>;

/// A heap-allocated array of opaque values (`array_opaque_t`)
pub type ArrayOpaqueFFI = ArrayHandleFFI<OpaqueFFI>;
