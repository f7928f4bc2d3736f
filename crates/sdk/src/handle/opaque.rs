// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	ffi::{CStr, c_char, c_void},
	fmt::{self, Debug, Formatter},
	mem,
	ptr::{self, null_mut},
};

use c_bridge_abi::{handle::OpaqueFFI, object::ObjectFFI};
use tracing::trace;

use super::HandleValue;
use crate::{error::Result, guard, kind::ObjectKind, object::Object, rust_box};

const EMPTY_HINT: &CStr = c"<empty>";

/// Storage behind a native opaque handle
struct OpaqueCell {
	object: Object,
	hint: &'static CStr,
}

extern "C" fn opaque_dealloc(opaque: *mut OpaqueFFI) {
	guard::boundary("opaque::dealloc", || {
		let Some(opaque) = (unsafe { opaque.as_mut() }) else {
			return;
		};
		if opaque.object.is_null() {
			return;
		}

		let cell = unsafe { Box::from_raw(opaque.object as *mut OpaqueCell) };
		opaque.object = null_mut();
		trace!(hint = ?cell.hint, "released opaque handle");
		drop(cell);
	});
}

extern "C" fn opaque_type_hint(opaque: *const OpaqueFFI) -> *const c_char {
	guard::boundary("opaque::type_hint", || {
		let cell = unsafe { opaque.as_ref() }.and_then(|opaque| unsafe { (opaque.object as *const OpaqueCell).as_ref() });
		match cell {
			Some(cell) => cell.hint.as_ptr(),
			None => EMPTY_HINT.as_ptr(),
		}
	})
}

/// Releases a native opaque handle that was moved into an object
extern "C" fn native_opaque_dealloc(object: *mut ObjectFFI) {
	guard::boundary("native_opaque::dealloc", || {
		let Some(object) = (unsafe { object.as_mut() }) else {
			return;
		};
		if object.payload.is_null() {
			return;
		}

		let cell = unsafe { Box::from_raw(object.payload as *mut OpaqueCell) };
		object.payload = null_mut();
		object.dealloc = None;
		trace!(hint = ?cell.hint, "released opaque object");
		drop(cell);
	});
}

/// Releases an opaque handle of a foreign producer that was moved into an object
extern "C" fn foreign_opaque_dealloc(object: *mut ObjectFFI) {
	guard::boundary("foreign_opaque::dealloc", || {
		let Some(object) = (unsafe { object.as_mut() }) else {
			return;
		};
		if object.payload.is_null() {
			return;
		}

		let mut opaque = unsafe { Box::from_raw(object.payload as *mut OpaqueFFI) };
		object.payload = null_mut();
		object.dealloc = None;
		(opaque.dealloc)(&mut *opaque);
	});
}

/// An owned type-erased value
#[repr(transparent)]
pub struct OpaqueHandle(OpaqueFFI);

impl OpaqueHandle {
	/// Wrap `object`, reporting `hint` as its type
	pub fn new(object: impl Into<Object>, hint: &'static CStr) -> Self {
		let cell = Box::new(OpaqueCell {
			object: object.into(),
			hint,
		});
		Self(OpaqueFFI {
			dealloc: opaque_dealloc,
			type_hint: opaque_type_hint,
			object: Box::into_raw(cell) as *mut c_void,
		})
	}

	/// Wrap `object`, deriving the type hint from its kind
	///
	/// An object made by [`OpaqueHandle::into_object`] gives back the handle
	/// that went in, foreign vtable and type hint included.
	pub fn from_object(object: impl Into<Object>) -> Self {
		let object = object.into();
		if object.is_empty() {
			return Self::empty();
		}
		if object.is_allocated_by(native_opaque_dealloc) {
			let raw = object.into_raw();
			return Self(OpaqueFFI {
				dealloc: opaque_dealloc,
				type_hint: opaque_type_hint,
				object: raw.payload,
			});
		}
		if object.is_allocated_by(foreign_opaque_dealloc) {
			let raw = object.into_raw();
			let opaque = unsafe { Box::from_raw(raw.payload as *mut OpaqueFFI) };
			return Self(*opaque);
		}
		let hint = object.kind().map(ObjectKind::type_hint).unwrap_or(EMPTY_HINT);
		Self::new(object, hint)
	}

	/// Box a Rust value; the type hint is `Rust::Box<dyn Any + 'static>`
	pub fn from_box<T: Any>(value: Box<T>) -> Self {
		Self::from_object(rust_box::RustBox::from(value))
	}

	/// A handle that holds nothing
	pub const fn empty() -> Self {
		Self(OpaqueFFI {
			dealloc: opaque_dealloc,
			type_hint: opaque_type_hint,
			object: null_mut(),
		})
	}

	/// Take ownership of a raw handle
	///
	/// # Safety
	/// `raw` must be a valid handle that nobody else releases.
	pub unsafe fn from_raw(raw: OpaqueFFI) -> Self {
		Self(raw)
	}

	/// Give up ownership; the caller becomes responsible for releasing the handle
	pub fn into_raw(self) -> OpaqueFFI {
		let raw = self.0;
		mem::forget(self);
		raw
	}

	pub fn as_raw(&self) -> &OpaqueFFI {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.object.is_null()
	}

	/// Returns true if the handle was created by this implementation
	pub fn is_native(&self) -> bool {
		ptr::fn_addr_eq(self.0.dealloc, opaque_dealloc as extern "C" fn(*mut OpaqueFFI))
	}

	pub fn type_hint(&self) -> &CStr {
		let hint = (self.0.type_hint)(&self.0);
		if hint.is_null() {
			return EMPTY_HINT;
		}
		unsafe { CStr::from_ptr(hint) }
	}

	fn cell(&self) -> Option<&OpaqueCell> {
		if !self.is_native() {
			return None;
		}
		unsafe { (self.0.object as *const OpaqueCell).as_ref() }
	}

	fn cell_mut(&mut self) -> Option<&mut OpaqueCell> {
		if !self.is_native() {
			return None;
		}
		unsafe { (self.0.object as *mut OpaqueCell).as_mut() }
	}

	/// The wrapped object of a native handle
	pub fn object(&self) -> Option<&Object> {
		self.cell().map(|cell| &cell.object)
	}

	/// The boxed Rust value, if the handle wraps a `RUST_BOX` created here
	pub fn as_rust_box(&self) -> Option<&dyn Any> {
		self.cell().and_then(|cell| rust_box::any_ref(&cell.object))
	}

	pub fn as_rust_box_mut(&mut self) -> Option<&mut dyn Any> {
		self.cell_mut().and_then(|cell| rust_box::any_mut(&mut cell.object))
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.as_rust_box().and_then(|any| any.downcast_ref())
	}

	pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
		self.as_rust_box_mut().and_then(|any| any.downcast_mut())
	}

	/// Move the value into the flat encoding
	///
	/// The handle becomes an `OPAQUE` object owning the whole handle, so
	/// [`OpaqueHandle::from_object`] restores it unchanged. A foreign handle is
	/// still released through its own deallocator.
	pub fn into_object(mut self) -> Object {
		if self.is_empty() {
			return Object::empty();
		}

		if self.is_native() {
			let payload = mem::replace(&mut self.0.object, null_mut());
			return unsafe { Object::from_raw_parts(ObjectKind::Opaque, payload, native_opaque_dealloc) };
		}

		let payload = Box::into_raw(Box::new(self.into_raw())) as *mut c_void;
		unsafe { Object::from_raw_parts(ObjectKind::Opaque, payload, foreign_opaque_dealloc) }
	}

	/// Release the value now; the handle is empty afterwards
	pub fn release(&mut self) {
		(self.0.dealloc)(&mut self.0);
		self.0.object = null_mut();
	}
}

impl Drop for OpaqueHandle {
	fn drop(&mut self) {
		self.release();
	}
}

impl Default for OpaqueHandle {
	fn default() -> Self {
		Self::empty()
	}
}

impl Debug for OpaqueHandle {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("OpaqueHandle")
			.field("type_hint", &self.type_hint())
			.field("native", &self.is_native())
			.field("empty", &self.is_empty())
			.finish()
	}
}

impl From<Object> for OpaqueHandle {
	fn from(object: Object) -> Self {
		Self::from_object(object)
	}
}

impl HandleValue for OpaqueHandle {
	type Raw = OpaqueFFI;

	fn into_raw(self) -> OpaqueFFI {
		OpaqueHandle::into_raw(self)
	}

	unsafe fn from_raw(raw: OpaqueFFI) -> Self {
		unsafe { OpaqueHandle::from_raw(raw) }
	}

	fn empty_raw() -> OpaqueFFI {
		OpaqueHandle::empty().into_raw()
	}

	fn accepts(_object: &Object) -> bool {
		true
	}

	fn into_object(self) -> Object {
		OpaqueHandle::into_object(self)
	}

	fn from_object(object: Object) -> Result<Self> {
		Ok(OpaqueHandle::from_object(object))
	}
}
