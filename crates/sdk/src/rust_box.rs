// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Boxed Rust values carried through C untouched
//!
//! The payload is a `Box<Box<dyn Any>>`: the outer box gives C a thin
//! pointer, the inner one keeps the vtable. Only the implementation that
//! created a `RUST_BOX` object may look inside it.

use std::{
	any::Any,
	ffi::c_void,
	fmt::{self, Debug, Formatter},
	ptr::null_mut,
};

use c_bridge_abi::object::{ObjectDeallocFnFFI, ObjectFFI};

use crate::{guard, kind::ObjectKind, object::Object};

pub type AnyBox = Box<dyn Any + 'static>;

const DEALLOC: ObjectDeallocFnFFI = dealloc_rust_box;

extern "C" fn dealloc_rust_box(object: *mut ObjectFFI) {
	guard::boundary("rust_box::dealloc", || {
		let Some(object) = (unsafe { object.as_mut() }) else {
			return;
		};
		if object.payload.is_null() {
			return;
		}

		let payload = object.payload as *mut AnyBox;
		object.payload = null_mut();
		object.dealloc = None;
		drop(unsafe { Box::from_raw(payload) });
	});
}

fn is_native(object: &Object) -> bool {
	object.is_kind(ObjectKind::RustBox) && !object.is_empty() && object.is_allocated_by(DEALLOC)
}

/// The boxed value of `object`, if it is a `RUST_BOX` created here
pub(crate) fn any_ref(object: &Object) -> Option<&dyn Any> {
	if !is_native(object) {
		return None;
	}
	let payload = object.as_raw().payload as *const AnyBox;
	Some(unsafe { &**payload })
}

pub(crate) fn any_mut(object: &mut Object) -> Option<&mut dyn Any> {
	if !is_native(object) {
		return None;
	}
	let payload = object.as_raw().payload as *mut AnyBox;
	Some(unsafe { &mut **payload })
}

/// An object of kind `RUST_BOX`
#[repr(transparent)]
pub struct RustBox(Object);

impl RustBox {
	pub fn new<T: Any>(value: T) -> Self {
		Self::from_any(Box::new(value))
	}

	pub fn from_any(value: AnyBox) -> Self {
		let payload = Box::into_raw(Box::new(value)) as *mut c_void;
		Self(unsafe { Object::from_raw_parts(ObjectKind::RustBox, payload, DEALLOC) })
	}

	pub fn as_any(&self) -> &dyn Any {
		let payload = self.0.as_raw().payload as *const AnyBox;
		unsafe { &**payload }
	}

	pub fn as_any_mut(&mut self) -> &mut dyn Any {
		let payload = self.0.as_raw().payload as *mut AnyBox;
		unsafe { &mut **payload }
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.as_any().downcast_ref()
	}

	pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
		self.as_any_mut().downcast_mut()
	}

	/// Move the boxed value out
	pub fn move_into_box(mut self) -> AnyBox {
		let raw = self.0.as_raw_mut();
		let payload = raw.payload as *mut AnyBox;
		*raw = ObjectFFI::empty();
		*unsafe { Box::from_raw(payload) }
	}

	pub fn as_object(&self) -> &Object {
		&self.0
	}

	pub fn into_object(self) -> Object {
		self.0
	}
}

impl TryFrom<Object> for RustBox {
	type Error = Object;

	/// Hands the object back unless it is a non-empty `RUST_BOX` created by this implementation
	fn try_from(object: Object) -> Result<Self, Object> {
		if is_native(&object) {
			Ok(Self(object))
		} else {
			Err(object)
		}
	}
}

impl<T: Any> From<Box<T>> for RustBox {
	fn from(value: Box<T>) -> Self {
		Self::from_any(value)
	}
}

impl From<RustBox> for Object {
	fn from(value: RustBox) -> Self {
		value.into_object()
	}
}

impl Debug for RustBox {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("RustBox").field("type_id", &Any::type_id(self.as_any())).finish()
	}
}
