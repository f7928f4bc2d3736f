// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Contiguous element storage shared by every array of both encodings

use std::{ptr, slice};

use c_bridge_abi::object::RawArrayFFI;

/// Move `elements` into a heap-allocated raw array
pub(crate) fn into_raw<T>(elements: Vec<T>) -> *mut RawArrayFFI<T> {
	let boxed: Box<[T]> = elements.into_boxed_slice();
	let len = boxed.len();
	let data = Box::into_raw(boxed) as *mut T;
	Box::into_raw(Box::new(RawArrayFFI {
		data,
		len,
	}))
}

/// Take back ownership of an array created by [`into_raw`]
///
/// # Safety
/// `raw` must come from `into_raw::<T>` and must not be used afterwards.
pub(crate) unsafe fn from_raw<T>(raw: *mut RawArrayFFI<T>) -> Vec<T> {
	let array = unsafe { Box::from_raw(raw) };
	let elements = ptr::slice_from_raw_parts_mut(array.data, array.len);
	unsafe { Box::from_raw(elements) }.into_vec()
}

/// Read-only view of the elements; empty for a null array
///
/// # Safety
/// `raw` must be null or point to a live array whose `data` is valid for `len` elements.
pub(crate) unsafe fn as_slice<'a, T>(raw: *const RawArrayFFI<T>) -> &'a [T] {
	match unsafe { raw.as_ref() } {
		Some(array) if !array.data.is_null() => unsafe { slice::from_raw_parts(array.data, array.len) },
		_ => &[],
	}
}

/// Writable view of the elements; empty for a null array
///
/// # Safety
/// Same as [`as_slice`]; additionally no other view may be alive.
pub(crate) unsafe fn as_slice_mut<'a, T>(raw: *mut RawArrayFFI<T>) -> &'a mut [T] {
	match unsafe { raw.as_mut() } {
		Some(array) if !array.data.is_null() => unsafe { slice::from_raw_parts_mut(array.data, array.len) },
		_ => &mut [],
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_round_trip() {
		let raw = into_raw(vec![1u32, 2, 3]);
		unsafe {
			assert_eq!((*raw).len, 3);
			assert_eq!(as_slice(raw), &[1, 2, 3]);
			as_slice_mut(raw)[1] = 20;
			assert_eq!(from_raw(raw), vec![1, 20, 3]);
		}
	}

	#[test]
	fn test_empty() {
		let raw = into_raw(Vec::<u8>::new());
		unsafe {
			assert_eq!((*raw).len, 0);
			assert!(as_slice(raw).is_empty());
			assert!(from_raw(raw).is_empty());
		}
	}

	#[test]
	fn test_null_views() {
		unsafe {
			assert!(as_slice::<u8>(ptr::null()).is_empty());
			assert!(as_slice_mut::<u8>(ptr::null_mut()).is_empty());
		}
	}
}
