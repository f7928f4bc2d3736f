// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Owned flat objects

use std::{
	ffi::c_void,
	fmt::{self, Debug, Formatter},
	mem, ptr,
};

use c_bridge_abi::object::{ObjectDeallocFnFFI, ObjectFFI};
use tracing::trace;

use crate::{error::Result, kind::ObjectKind};

/// An object in the flat encoding
///
/// Dropping an owned object runs its deallocator exactly once. Borrowed
/// objects (no deallocator) are never freed. The layout is identical to
/// [`ObjectFFI`], so slices of `Object` can be handed to C as they are.
#[repr(transparent)]
pub struct Object(ObjectFFI);

impl Object {
	/// An object without payload
	pub const fn empty() -> Self {
		Self(ObjectFFI::empty())
	}

	/// Wrap a payload owned by someone else; it is never freed through this object
	pub fn borrowed(kind: ObjectKind, payload: *mut c_void) -> Self {
		Self(ObjectFFI {
			r#type: kind.to_raw(),
			dealloc: None,
			payload,
		})
	}

	/// Create an owned object from its parts
	///
	/// # Safety
	/// `dealloc` must release `payload` and accept the object it is called with.
	pub unsafe fn from_raw_parts(kind: ObjectKind, payload: *mut c_void, dealloc: ObjectDeallocFnFFI) -> Self {
		Self(ObjectFFI {
			r#type: kind.to_raw(),
			dealloc: Some(dealloc),
			payload,
		})
	}

	/// Take ownership of a raw object
	///
	/// # Safety
	/// `raw` must be a valid object that nobody else releases.
	pub unsafe fn from_raw(raw: ObjectFFI) -> Self {
		Self(raw)
	}

	/// Give up ownership; the caller becomes responsible for releasing the object
	pub fn into_raw(self) -> ObjectFFI {
		let raw = self.0;
		mem::forget(self);
		raw
	}

	pub fn as_raw(&self) -> &ObjectFFI {
		&self.0
	}

	pub(crate) fn as_raw_mut(&mut self) -> &mut ObjectFFI {
		&mut self.0
	}

	/// The tag as it appears on the wire
	pub fn raw_type(&self) -> u64 {
		self.0.r#type
	}

	pub fn kind(&self) -> Result<ObjectKind> {
		ObjectKind::from_raw(self.0.r#type)
	}

	pub fn is_kind(&self, kind: ObjectKind) -> bool {
		self.0.r#type == kind.to_raw()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn is_owned(&self) -> bool {
		self.0.is_owned()
	}

	/// Returns true if the object is released by `dealloc`
	pub(crate) fn is_allocated_by(&self, dealloc: ObjectDeallocFnFFI) -> bool {
		self.0.dealloc.is_some_and(|own| ptr::fn_addr_eq(own, dealloc))
	}

	/// Move the object out, leaving an empty one behind
	pub fn take(&mut self) -> Object {
		mem::replace(self, Object::empty())
	}

	/// Release the payload now; the object is empty afterwards
	pub fn release(&mut self) {
		if let (Some(dealloc), false) = (self.0.dealloc, self.0.payload.is_null()) {
			trace!(tag = self.0.r#type, "releasing object");
			dealloc(&mut self.0);
		}
		self.0 = ObjectFFI::empty();
	}
}

impl Drop for Object {
	fn drop(&mut self) {
		self.release();
	}
}

impl Default for Object {
	fn default() -> Self {
		Self::empty()
	}
}

impl Debug for Object {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let mut debug = f.debug_struct("Object");
		match self.kind() {
			Ok(kind) => debug.field("kind", &kind),
			Err(_) => debug.field("type", &self.0.r#type),
		};
		debug.field("owned", &self.is_owned()).field("empty", &self.is_empty()).finish()
	}
}
