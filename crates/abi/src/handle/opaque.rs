// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::{c_char, c_void};

/// FFI-safe type-erased owned value (`opaque_t`)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct OpaqueFFI {
	/// Release the owned value
	///
	/// Must accept a null `opaque` and an `opaque` whose `object` is null.
	pub dealloc: extern "C" fn(opaque: *mut OpaqueFFI),

	/// Describe the concrete type for debugging
	///
	/// Returns a NUL-terminated string that is never allocated by the call
	/// and stays valid for the whole lifetime of the handle.
	pub type_hint: extern "C" fn(opaque: *const OpaqueFFI) -> *const c_char,

	/// Underlying storage; null once released or consumed
	pub object: *mut c_void,
}
