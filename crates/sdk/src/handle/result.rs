// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::c_void,
	fmt::{self, Debug, Formatter},
	mem,
	ptr::null_mut,
};

use c_bridge_abi::handle::ResultHandleFFI;
use tracing::trace;

use super::{ByteArray, HandleValue, Null, OpaqueHandle};
use crate::{
	error::{BridgeError, Result},
	guard,
	result::ObjectResult,
};

/// `result_null_u8array_t`
pub type NullResult = ResultHandle<Null, ByteArray>;

/// `result_opaque_u8array_t`
pub type OpaqueResult = ResultHandle<OpaqueHandle, ByteArray>;

/// `result_u8array_u8array_t`
pub type ByteArrayResult = ResultHandle<ByteArray, ByteArray>;

type RawResult<T, E> = ResultHandleFFI<<T as HandleValue>::Raw, <E as HandleValue>::Raw>;

/// Detach the flat result from the handle, leaving the handle consumed
fn take<T: HandleValue, E: HandleValue>(result: *mut RawResult<T, E>) -> Option<ObjectResult> {
	let result = unsafe { result.as_mut() }?;
	if result.object.is_null() {
		return None;
	}
	let flat = unsafe { Box::from_raw(result.object as *mut ObjectResult) };
	result.object = null_mut();
	Some(*flat)
}

extern "C" fn result_dealloc<T: HandleValue, E: HandleValue>(result: *mut RawResult<T, E>) {
	guard::boundary("result::dealloc", || {
		if let Some(flat) = take::<T, E>(result) {
			trace!(ok = flat.is_ok(), "released result");
			drop(flat);
		}
	});
}

extern "C" fn result_into_ok<T: HandleValue, E: HandleValue>(result: *mut RawResult<T, E>) -> T::Raw {
	const NAME: &str = "result::into_ok";
	guard::boundary(NAME, || {
		let Some(flat) = take::<T, E>(result) else {
			return guard::violation(NAME, "result is null or already consumed", T::empty_raw);
		};
		match flat.into_result() {
			Ok(ok) => match T::from_object(ok) {
				Ok(value) => value.into_raw(),
				Err(err) => guard::violation(NAME, &err.to_string(), T::empty_raw),
			},
			Err(_err) => guard::violation(NAME, "ok value requested from an err result", T::empty_raw),
		}
	})
}

extern "C" fn result_into_err<T: HandleValue, E: HandleValue>(result: *mut RawResult<T, E>) -> E::Raw {
	const NAME: &str = "result::into_err";
	guard::boundary(NAME, || {
		let Some(flat) = take::<T, E>(result) else {
			return guard::violation(NAME, "result is null or already consumed", E::empty_raw);
		};
		match flat.into_result() {
			Err(err) => match E::from_object(err) {
				Ok(error) => error.into_raw(),
				Err(err) => guard::violation(NAME, &err.to_string(), E::empty_raw),
			},
			Ok(_ok) => guard::violation(NAME, "err value requested from an ok result", E::empty_raw),
		}
	})
}

extern "C" fn result_is_ok<T: HandleValue, E: HandleValue>(result: *const RawResult<T, E>) -> u8 {
	const NAME: &str = "result::is_ok";
	guard::boundary(NAME, || {
		let flat = unsafe { result.as_ref() }.and_then(|result| unsafe { (result.object as *const ObjectResult).as_ref() });
		match flat {
			Some(flat) => flat.is_ok() as u8,
			None => guard::violation(NAME, "result is null or already consumed", || 0),
		}
	})
}

/// An owned consume-once result handle
///
/// Exactly one of `into_ok` and `into_err` may be called, once; either call
/// consumes the handle. Dropping an unconsumed handle releases the value it
/// still holds.
#[repr(transparent)]
pub struct ResultHandle<T: HandleValue, E: HandleValue> {
	raw: RawResult<T, E>,
}

impl<T: HandleValue, E: HandleValue> ResultHandle<T, E> {
	pub fn ok(value: T) -> Self {
		Self::wrap(ObjectResult::ok(value.into_object()))
	}

	pub fn err(error: E) -> Self {
		Self::wrap(ObjectResult::err(error.into_object()))
	}

	/// Wrap a flat result whose populated side matches `T` or `E`
	///
	/// The flat result is handed back if it does not fit.
	pub fn from_flat(flat: ObjectResult) -> std::result::Result<Self, ObjectResult> {
		let fits = match flat.as_result() {
			Ok(ok) => T::accepts(ok),
			Err(err) => E::accepts(err),
		};
		if fits { Ok(Self::wrap(flat)) } else { Err(flat) }
	}

	fn wrap(flat: ObjectResult) -> Self {
		Self {
			raw: ResultHandleFFI {
				dealloc: result_dealloc::<T, E>,
				into_ok: result_into_ok::<T, E>,
				into_err: result_into_err::<T, E>,
				is_ok: result_is_ok::<T, E>,
				object: Box::into_raw(Box::new(flat)) as *mut c_void,
			},
		}
	}

	/// Take ownership of a raw handle
	///
	/// # Safety
	/// `raw` must be a valid, unconsumed handle that nobody else releases.
	pub unsafe fn from_raw(raw: RawResult<T, E>) -> Self {
		Self {
			raw,
		}
	}

	/// Give up ownership; the caller becomes responsible for consuming or releasing the handle
	pub fn into_raw(self) -> RawResult<T, E> {
		let raw = self.raw;
		mem::forget(self);
		raw
	}

	pub fn as_raw(&self) -> &RawResult<T, E> {
		&self.raw
	}

	pub fn is_ok(&self) -> Result<bool> {
		match (self.raw.is_ok)(&self.raw) {
			1 => Ok(true),
			0 => Ok(false),
			other => Err(BridgeError::InvalidDiscriminant(other)),
		}
	}

	/// Consume the handle, moving out the populated side
	///
	/// Fails if the producer reports a discriminant other than 0 or 1; the
	/// handle is released in that case.
	pub fn into_result(self) -> Result<std::result::Result<T, E>> {
		let is_ok = self.is_ok()?;
		let mut raw = self.into_raw();
		if is_ok {
			let value = (raw.into_ok)(&mut raw);
			Ok(Ok(unsafe { T::from_raw(value) }))
		} else {
			let error = (raw.into_err)(&mut raw);
			Ok(Err(unsafe { E::from_raw(error) }))
		}
	}

	/// Returns true if the handle was consumed or released
	pub fn is_consumed(&self) -> bool {
		self.raw.object.is_null()
	}

	/// Release the result now without consuming it
	pub fn release(&mut self) {
		(self.raw.dealloc)(&mut self.raw);
		self.raw.object = null_mut();
	}
}

impl<T: HandleValue, E: HandleValue> Drop for ResultHandle<T, E> {
	fn drop(&mut self) {
		self.release();
	}
}

impl<T: HandleValue, E: HandleValue> From<std::result::Result<T, E>> for ResultHandle<T, E> {
	fn from(result: std::result::Result<T, E>) -> Self {
		match result {
			Ok(value) => Self::ok(value),
			Err(error) => Self::err(error),
		}
	}
}

impl<T: HandleValue, E: HandleValue> Debug for ResultHandle<T, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let mut debug = f.debug_struct("ResultHandle");
		if self.is_consumed() {
			debug.field("consumed", &true);
		} else {
			debug.field("ok", &self.is_ok());
		}
		debug.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::{ffi::c_char, ptr};

	use c_bridge_abi::handle::{NullFFI, OpaqueFFI, ResultNullU8ArrayFFI, ResultOpaqueU8ArrayFFI};

	use super::*;
	use crate::{array::DataArray, kind::ObjectKind, object::Object, testing::DropCounter};

	#[test]
	fn test_ok_null() {
		let mut raw: ResultNullU8ArrayFFI = NullResult::ok(Null).into_raw();
		assert_eq!((raw.is_ok)(&raw), 1);

		let value = (raw.into_ok)(&mut raw);
		assert_eq!(value, NullFFI::null());
		assert!(raw.object.is_null());

		(raw.dealloc)(&mut raw);
		(raw.dealloc)(ptr::null_mut());
	}

	#[test]
	fn test_err_opaque() {
		let mut raw: ResultOpaqueU8ArrayFFI = OpaqueResult::err(ByteArray::from_bytes(*b"bad")).into_raw();
		assert_eq!((raw.is_ok)(&raw), 0);
		assert_eq!((raw.is_ok)(&raw), 0);

		let error = (raw.into_err)(&mut raw);
		assert!(raw.object.is_null());
		assert_eq!((error.len)(&error), 3);

		let error = unsafe { ByteArray::from_raw(error) };
		assert_eq!(error.as_slice(), b"bad");
	}

	#[test]
	fn test_into_result() {
		let result = ByteArrayResult::ok(ByteArray::from_bytes(*b"value"));
		assert_eq!(result.is_ok(), Ok(true));
		let value = result.into_result().unwrap().unwrap();
		assert_eq!(value.as_slice(), b"value");

		let result: NullResult = Err(ByteArray::from_bytes(*b"no")).into();
		let error = result.into_result().unwrap().unwrap_err();
		assert_eq!(error.as_slice(), b"no");
	}

	#[test]
	fn test_drop_unconsumed_releases_value() {
		let counter = DropCounter::new();
		let result = OpaqueResult::ok(OpaqueHandle::from_box(Box::new(counter.track(1u8))));
		assert_eq!(counter.count(), 0);
		drop(result);
		assert_eq!(counter.count(), 1);
	}

	#[test]
	fn test_consumed_then_dropped() {
		let counter = DropCounter::new();
		let result = OpaqueResult::ok(OpaqueHandle::from_box(Box::new(counter.track(1u8))));
		let value = result.into_result().unwrap().unwrap();
		assert_eq!(counter.count(), 0);
		drop(value);
		assert_eq!(counter.count(), 1);
	}

	#[test]
	fn test_from_flat() {
		let flat = ObjectResult::err_message("boom");
		let result = ByteArrayResult::from_flat(flat).unwrap();
		let error = result.into_result().unwrap().unwrap_err();
		assert_eq!(error.as_slice(), b"boom\0");

		let flat = ObjectResult::ok(DataArray::from("x"));
		let flat = NullResult::from_flat(flat).unwrap_err();
		assert!(flat.is_ok());

		assert!(NullResult::from_flat(ObjectResult::ok(Object::empty())).is_ok());
	}

	extern "C" fn bogus_is_ok(_result: *const ResultNullU8ArrayFFI) -> u8 {
		7
	}

	#[test]
	fn test_invalid_discriminant() {
		let mut raw = NullResult::ok(Null).into_raw();
		raw.is_ok = bogus_is_ok;
		let result = unsafe { NullResult::from_raw(raw) };
		assert_eq!(result.into_result().unwrap_err(), BridgeError::InvalidDiscriminant(7));
	}

	#[test]
	fn test_opaque_keeps_type_hint() {
		let opaque = OpaqueHandle::new(DataArray::from("conn"), c"example::Connection");
		let cell = opaque.as_raw().object;
		let mut raw = OpaqueResult::ok(opaque).into_raw();

		let value = unsafe { OpaqueHandle::from_raw((raw.into_ok)(&mut raw)) };
		assert!(raw.object.is_null());
		assert_eq!(value.as_raw().object, cell);
		assert_eq!(value.type_hint(), c"example::Connection");
		assert!(value.object().unwrap().is_kind(ObjectKind::DataArray));
	}

	extern "C" fn foreign_dealloc(opaque: *mut OpaqueFFI) {
		let Some(opaque) = (unsafe { opaque.as_mut() }) else {
			return;
		};
		if !opaque.object.is_null() {
			drop(unsafe { Box::from_raw(opaque.object as *mut u64) });
			opaque.object = null_mut();
		}
	}

	extern "C" fn foreign_type_hint(_opaque: *const OpaqueFFI) -> *const c_char {
		c"foreign::Value".as_ptr()
	}

	#[test]
	fn test_foreign_opaque_comes_back_unchanged() {
		let payload = Box::into_raw(Box::new(11u64)) as *mut c_void;
		let foreign = unsafe {
			OpaqueHandle::from_raw(OpaqueFFI {
				dealloc: foreign_dealloc,
				type_hint: foreign_type_hint,
				object: payload,
			})
		};

		let value = OpaqueResult::ok(foreign).into_result().unwrap().unwrap();
		assert!(!value.is_native());
		assert_eq!(value.as_raw().object, payload);
		assert!(ptr::fn_addr_eq(value.as_raw().dealloc, foreign_dealloc as extern "C" fn(*mut OpaqueFFI)));
		assert!(ptr::fn_addr_eq(
			value.as_raw().type_hint,
			foreign_type_hint as extern "C" fn(*const OpaqueFFI) -> *const c_char
		));
		assert_eq!(value.type_hint(), c"foreign::Value");
	}
}
