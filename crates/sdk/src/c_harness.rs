// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Drives the C harness in `tests/c/harness.c` against values built here

use std::ffi::{CStr, c_char, c_int};

use c_bridge_abi::{
	constants::TYPE_RUST_BOX,
	handle::{ArrayU8ArrayFFI, ArrayU8FFI, OpaqueFFI, ResultOpaqueU8ArrayFFI},
	object::{ObjectFFI, ResultFFI},
};

use crate::{
	array::{DataArray, ObjectArray},
	handle::{ByteArray, ByteArrayArray, OpaqueHandle, OpaqueResult},
	kind::CustomTag,
	object::Object,
	result::ObjectResult,
	rust_box::RustBox,
	testing::DropCounter,
};

unsafe extern "C" {
	fn harness_array_len(array: *const ArrayU8FFI) -> usize;
	fn harness_array_set0(array: *mut ArrayU8FFI);
	fn harness_nested_total_len(arrays: *const ArrayU8ArrayFFI) -> usize;
	fn harness_nested_release(arrays: *mut ArrayU8ArrayFFI);
	fn harness_result_err_len(result: *mut ResultOpaqueU8ArrayFFI) -> usize;
	fn harness_type_hint(opaque: *const OpaqueFFI) -> *const c_char;
	fn harness_flat_error_len(result: *mut ResultFFI) -> usize;
	fn harness_object_array_len(object: *const ObjectFFI) -> usize;
	fn harness_is_custom(tag: u64) -> c_int;
}

#[test]
fn test_array_set0() {
	let mut raw = ByteArray::from_bytes(*b"abcd").into_raw();
	unsafe {
		assert_eq!(harness_array_len(&raw), 4);
		harness_array_set0(&mut raw);
	}
	let array = unsafe { ByteArray::from_raw(raw) };
	assert_eq!(array.as_slice(), b"0000");
}

#[test]
fn test_nested_release() {
	let nested = ByteArrayArray::from_vec(vec![ByteArray::from_bytes(*b"ab"), ByteArray::from_bytes(*b"cde")]);
	let mut raw = nested.into_raw();
	unsafe {
		assert_eq!(harness_nested_total_len(&raw), 5);
		harness_nested_release(&mut raw);
	}
	assert!(raw.object.is_null());
}

#[test]
fn test_result_err_len() {
	let mut raw = OpaqueResult::err(ByteArray::from_bytes(*b"bad")).into_raw();
	assert_eq!(unsafe { harness_result_err_len(&mut raw) }, 3);
	assert!(raw.object.is_null());

	let counter = DropCounter::new();
	let mut raw = OpaqueResult::ok(OpaqueHandle::from_box(Box::new(counter.track(1)))).into_raw();
	assert_eq!(unsafe { harness_result_err_len(&mut raw) }, usize::MAX);
	assert_eq!(counter.count(), 1);
}

#[test]
fn test_type_hint() {
	let opaque = OpaqueHandle::from_box(Box::new(5u8));
	let hint = unsafe { CStr::from_ptr(harness_type_hint(opaque.as_raw())) };
	assert_eq!(hint, c"Rust::Box<dyn Any + 'static>");
}

#[test]
fn test_flat_error_len() {
	let mut raw = ObjectResult::err_message("timeout").into_raw();
	assert_eq!(unsafe { harness_flat_error_len(&mut raw) }, 7);
	assert!(raw.err.is_empty());

	let mut raw = ObjectResult::ok(RustBox::new(1u8)).into_raw();
	assert_eq!(unsafe { harness_flat_error_len(&mut raw) }, 0);
	assert!(raw.ok.is_empty());
}

#[test]
fn test_object_array_len() {
	let array = ObjectArray::from_vec(vec![DataArray::from("a").into_object(), Object::empty()]);
	assert_eq!(unsafe { harness_object_array_len(array.as_object().as_raw()) }, 2);
}

#[test]
fn test_is_custom() {
	unsafe {
		assert_ne!(harness_is_custom(CustomTag::new(TYPE_RUST_BOX).to_raw()), 0);
		assert_eq!(harness_is_custom(TYPE_RUST_BOX), 0);
	}
}
