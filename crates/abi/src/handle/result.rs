// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;

use super::{ArrayU8FFI, NullFFI, OpaqueFFI};

/// FFI-safe consume-once result (`result_*_t`)
///
/// `is_ok` must be checked before calling exactly one of `into_ok` or
/// `into_err`. Either call, as well as `dealloc`, consumes the result and
/// leaves `object` null.
#[repr(C)]
pub struct ResultHandleFFI<T, E> {
	/// Release whichever side is populated
	///
	/// Must accept a null `result` and a `result` whose `object` is null.
	pub dealloc: extern "C" fn(result: *mut ResultHandleFFI<T, E>),

	/// Consume the result and move the ok value out
	pub into_ok: extern "C" fn(result: *mut ResultHandleFFI<T, E>) -> T,

	/// Consume the result and move the error value out
	pub into_err: extern "C" fn(result: *mut ResultHandleFFI<T, E>) -> E,

	/// `1` if the result is ok, `0` otherwise; does not consume
	pub is_ok: extern "C" fn(result: *const ResultHandleFFI<T, E>) -> u8,

	/// Underlying storage; null once released or consumed
	pub object: *mut c_void,
}

impl<T, E> Clone for ResultHandleFFI<T, E> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T, E> Copy for ResultHandleFFI<T, E> {}

/// A result with `null_t` as value and `array_u8_t` as error (`result_null_u8array_t`)
pub type ResultNullU8ArrayFFI = ResultHandleFFI<NullFFI, ArrayU8FFI>;

/// A result with `opaque_t` as value and `array_u8_t` as error (`result_opaque_u8array_t`)
pub type ResultOpaqueU8ArrayFFI = ResultHandleFFI<OpaqueFFI, ArrayU8FFI>;

/// A result with `array_u8_t` as value and `array_u8_t` as error (`result_u8array_u8array_t`)
pub type ResultU8ArrayU8ArrayFFI = ResultHandleFFI<ArrayU8FFI, ArrayU8FFI>;
