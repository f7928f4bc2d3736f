// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Functions exported to C
//!
//! Declared in `c_bridge.h`. All of them accept NULL.

use std::{
	ffi::{CStr, c_char},
	mem,
	ptr::null,
};

use c_bridge_abi::{
	constants::{ABI_VERSION, TYPE_DATA_ARRAY},
	object::{DataArrayFFI, ObjectFFI, ResultFFI},
};

use crate::{guard, object::Object, result::ObjectResult, storage};

/// ABI version implemented by this library
#[unsafe(no_mangle)]
pub extern "C" fn c_bridge_abi_version() -> u32 {
	ABI_VERSION
}

/// Release `object` if it is owned and leave it empty
#[unsafe(no_mangle)]
pub extern "C" fn c_bridge_object_release(object: *mut ObjectFFI) {
	guard::boundary("c_bridge_object_release", || {
		let Some(object) = (unsafe { object.as_mut() }) else {
			return;
		};
		drop(unsafe { Object::from_raw(mem::take(object)) });
	});
}

/// Release both sides of `result` and leave it empty
#[unsafe(no_mangle)]
pub extern "C" fn c_bridge_result_release(result: *mut ResultFFI) {
	guard::boundary("c_bridge_result_release", || {
		let Some(result) = (unsafe { result.as_mut() }) else {
			return;
		};
		drop(unsafe { ObjectResult::from_raw(mem::take(result)) });
	});
}

/// `1` if `result` is ok, `0` if it is an error
#[unsafe(no_mangle)]
pub extern "C" fn c_bridge_result_is_ok(result: *const ResultFFI) -> u8 {
	guard::boundary("c_bridge_result_is_ok", || match unsafe { result.as_ref() } {
		Some(result) => result.is_ok() as u8,
		None => guard::violation("c_bridge_result_is_ok", "result is null", || 0),
	})
}

/// The NUL-terminated message carried by an error object, or NULL
///
/// The pointer stays valid until the object is released.
#[unsafe(no_mangle)]
pub extern "C" fn c_bridge_error_message(object: *const ObjectFFI) -> *const c_char {
	guard::boundary("c_bridge_error_message", || {
		let Some(object) = (unsafe { object.as_ref() }) else {
			return null();
		};
		if object.r#type != TYPE_DATA_ARRAY || object.payload.is_null() {
			return null();
		}

		let bytes = unsafe { storage::as_slice(object.payload as *const DataArrayFFI) };
		match CStr::from_bytes_with_nul(bytes) {
			Ok(message) => message.as_ptr(),
			Err(_) => null(),
		}
	})
}
