// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Capabilities shared by both encodings

use crate::{
	array::{ArrayElement, DataArray, GenericArray},
	error::Result,
	handle::{ArrayHandle, ByteArray, HandleElement, HandleValue, OpaqueHandle, ResultHandle},
	object::Object,
	result::ObjectResult,
};

/// Anything that owns storage and can give it back early
pub trait Release {
	/// Release the storage now; further releases are no-ops
	fn release(&mut self);

	fn is_released(&self) -> bool;
}

/// A contiguous run of bytes
pub trait ByteView {
	fn as_bytes(&self) -> &[u8];

	fn as_bytes_mut(&mut self) -> &mut [u8];

	fn byte_len(&self) -> usize {
		self.as_bytes().len()
	}
}

/// A result that is taken apart exactly once
pub trait Consume: Sized {
	type Ok;
	type Err;

	/// Probe the populated side without consuming; repeated probes agree
	fn is_ok(&self) -> Result<bool>;

	/// Consume `self`; fails only if the producer broke the encoding
	fn consume(self) -> Result<std::result::Result<Self::Ok, Self::Err>>;
}

impl Release for Object {
	fn release(&mut self) {
		Object::release(self)
	}

	fn is_released(&self) -> bool {
		self.is_empty()
	}
}

impl Release for ObjectResult {
	fn release(&mut self) {
		drop(std::mem::take(self));
	}

	fn is_released(&self) -> bool {
		self.as_raw().ok.is_empty() && self.as_raw().err.is_empty()
	}
}

impl<T: ArrayElement> Release for GenericArray<T> {
	fn release(&mut self) {
		GenericArray::release(self)
	}

	fn is_released(&self) -> bool {
		self.as_object().is_empty()
	}
}

impl Release for OpaqueHandle {
	fn release(&mut self) {
		OpaqueHandle::release(self)
	}

	fn is_released(&self) -> bool {
		self.is_empty()
	}
}

impl<E: HandleElement> Release for ArrayHandle<E> {
	fn release(&mut self) {
		ArrayHandle::release(self)
	}

	fn is_released(&self) -> bool {
		ArrayHandle::is_released(self)
	}
}

impl<T: HandleValue, E: HandleValue> Release for ResultHandle<T, E> {
	fn release(&mut self) {
		ResultHandle::release(self)
	}

	fn is_released(&self) -> bool {
		self.is_consumed()
	}
}

impl ByteView for DataArray {
	fn as_bytes(&self) -> &[u8] {
		self.as_slice()
	}

	fn as_bytes_mut(&mut self) -> &mut [u8] {
		self.as_slice_mut()
	}
}

impl ByteView for ByteArray {
	fn as_bytes(&self) -> &[u8] {
		self.as_slice()
	}

	fn as_bytes_mut(&mut self) -> &mut [u8] {
		self.as_slice_mut()
	}
}

impl Consume for ObjectResult {
	type Ok = Object;
	type Err = Object;

	fn is_ok(&self) -> Result<bool> {
		Ok(ObjectResult::is_ok(self))
	}

	fn consume(self) -> Result<std::result::Result<Object, Object>> {
		Ok(self.into_result())
	}
}

impl<T: HandleValue, E: HandleValue> Consume for ResultHandle<T, E> {
	type Ok = T;
	type Err = E;

	fn is_ok(&self) -> Result<bool> {
		ResultHandle::is_ok(self)
	}

	fn consume(self) -> Result<std::result::Result<T, E>> {
		self.into_result()
	}
}
