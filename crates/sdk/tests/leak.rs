// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Integration tests proving that nested values release completely

use c_bridge_sdk::{
	exports::c_bridge_result_release,
	prelude::*,
	testing::{CountingAllocator, measure},
};

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

/// Runs `f` once to settle one-time initialisation, then measures a second run
fn leaked(f: impl Fn()) -> isize {
	f();
	measure(&f)
}

#[test]
fn test_nested_byte_arrays() {
	let leaked = leaked(|| {
		let inner: Vec<ByteArray> = (0..8u8).map(|i| ByteArray::from_bytes(vec![i; i as usize])).collect();
		let nested = ByteArrayArray::from_vec(inner);
		assert_eq!(nested.len(), 8);
		drop(nested);
	});
	assert_eq!(leaked, 0);
}

#[test]
fn test_nested_byte_arrays_through_raw_dealloc() {
	let leaked = leaked(|| {
		let nested = ByteArrayArray::from_vec(vec![ByteArray::from_bytes(*b"a"), ByteArray::from_bytes(*b"bc")]);
		let mut raw = nested.into_raw();
		(raw.dealloc)(&mut raw);
		(raw.dealloc)(&mut raw);
	});
	assert_eq!(leaked, 0);
}

#[test]
fn test_nested_object_arrays() {
	let leaked = leaked(|| {
		let inner = ObjectArray::from_vec(vec![
			DataArray::from("leaf").into_object(),
			RustBox::new(vec![1u64, 2, 3]).into_object(),
			Object::empty(),
		]);
		let outer = ObjectArray::from_vec(vec![inner.into_object(), DataArray::from_message("x").into_object()]);
		drop(outer);
	});
	assert_eq!(leaked, 0);
}

#[test]
fn test_move_into_vec_keeps_elements_alive() {
	let leaked = leaked(|| {
		let array = ObjectArray::from_vec(vec![DataArray::from("a").into_object(), DataArray::from("b").into_object()]);
		let elements = array.move_into_vec().unwrap();
		assert_eq!(elements.len(), 2);
		let rebuilt = ObjectArray::from_vec(elements);
		drop(rebuilt);
	});
	assert_eq!(leaked, 0);
}

#[test]
fn test_consumed_results() {
	let leaked = leaked(|| {
		let ok = OpaqueResult::ok(OpaqueHandle::from_box(Box::new(String::from("value"))));
		let value = ok.into_result().unwrap().unwrap();
		assert_eq!(value.downcast_ref::<String>().unwrap(), "value");

		let err = OpaqueResult::err(ByteArray::from_bytes(*b"bad"));
		let error = err.into_result().unwrap().unwrap_err();
		assert_eq!(error.len(), 3);
	});
	assert_eq!(leaked, 0);
}

#[test]
fn test_unconsumed_results() {
	let leaked = leaked(|| {
		drop(ByteArrayResult::ok(ByteArray::from_bytes(*b"value")));
		drop(NullResult::err(ByteArray::from_bytes(*b"error")));
		drop(ObjectResult::err_message("flat error"));
	});
	assert_eq!(leaked, 0);
}

#[test]
fn test_flat_result_released_from_c() {
	let leaked = leaked(|| {
		let mut raw = ObjectResult::ok(ObjectArray::from_vec(vec![RustBox::new(1u8).into_object()])).into_raw();
		c_bridge_result_release(&mut raw);
		c_bridge_result_release(&mut raw);
	});
	assert_eq!(leaked, 0);
}

#[test]
fn test_conversion_between_encodings() {
	let leaked = leaked(|| {
		let handle = ByteArray::from_bytes(*b"bytes");
		let object = handle.into_object();
		let handle = ByteArray::from_object(object).unwrap();
		let opaque = OpaqueHandle::from_object(handle.into_object());
		drop(opaque.into_object());
	});
	assert_eq!(leaked, 0);
}
