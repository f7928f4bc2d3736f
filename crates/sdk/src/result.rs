// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Owned flat results

use std::{
	fmt::{self, Debug, Display, Formatter},
	mem,
};

use c_bridge_abi::object::{ObjectFFI, ResultFFI};
use tracing::debug;

use crate::{
	array::DataArray,
	error::{BridgeError, Result},
	object::Object,
};

const UNSPECIFIED_ERROR: &str = "unspecified error";

/// A result in the flat encoding
///
/// The result is ok exactly when the err side carries no payload, so an err
/// result always holds a non-empty error object. Dropping the result
/// releases whatever both sides still hold.
#[repr(transparent)]
pub struct ObjectResult(ResultFFI);

impl ObjectResult {
	pub fn ok(value: impl Into<Object>) -> Self {
		Self(ResultFFI {
			ok: value.into().into_raw(),
			err: ObjectFFI::empty(),
		})
	}

	/// An ok result without a value
	pub const fn ok_empty() -> Self {
		Self(ResultFFI::empty())
	}

	/// An err result; an empty `error` is replaced by a generic message
	pub fn err(error: impl Into<Object>) -> Self {
		let mut error = error.into();
		if error.is_empty() {
			debug!("empty error object replaced by generic message");
			error = DataArray::from_message(UNSPECIFIED_ERROR).into_object();
		}
		Self(ResultFFI {
			ok: ObjectFFI::empty(),
			err: error.into_raw(),
		})
	}

	/// An err result carrying `message` as a NUL-terminated data array
	pub fn err_message(message: impl Display) -> Self {
		Self::err(DataArray::from_message(message))
	}

	/// Take ownership of a raw result
	///
	/// # Safety
	/// Both sides must be valid objects that nobody else releases.
	pub unsafe fn from_raw(raw: ResultFFI) -> Self {
		Self(raw)
	}

	/// Give up ownership; the caller becomes responsible for releasing both sides
	pub fn into_raw(self) -> ResultFFI {
		let raw = self.0;
		mem::forget(self);
		raw
	}

	pub fn as_raw(&self) -> &ResultFFI {
		&self.0
	}

	pub fn is_ok(&self) -> bool {
		self.0.is_ok()
	}

	pub fn is_err(&self) -> bool {
		!self.is_ok()
	}

	/// Borrow the populated side
	pub fn as_result(&self) -> std::result::Result<&Object, &Object> {
		let (ok, err) = self.sides();
		if err.is_empty() { Ok(ok) } else { Err(err) }
	}

	fn sides(&self) -> (&Object, &Object) {
		// Object is a transparent wrapper around ObjectFFI
		let ok = unsafe { &*(&self.0.ok as *const ObjectFFI as *const Object) };
		let err = unsafe { &*(&self.0.err as *const ObjectFFI as *const Object) };
		(ok, err)
	}

	/// Consume the result, releasing the side that is not returned
	pub fn into_result(self) -> std::result::Result<Object, Object> {
		let raw = self.into_raw();
		let ok = unsafe { Object::from_raw(raw.ok) };
		let err = unsafe { Object::from_raw(raw.err) };
		if err.is_empty() { Ok(ok) } else { Err(err) }
	}

	/// Consume the result, decoding the error as a [`BridgeError::Domain`]
	pub fn into_std_result(self) -> Result<Object> {
		self.into_result().map_err(|err| {
			let message = match DataArray::try_from(err) {
				Ok(array) => match array.message() {
					Ok(message) => message.to_string(),
					Err(err) => return err,
				},
				Err(other) => match other.kind() {
					Ok(kind) => format!("{kind} error"),
					Err(err) => return err,
				},
			};
			BridgeError::Domain(message)
		})
	}
}

impl Drop for ObjectResult {
	fn drop(&mut self) {
		let raw = mem::take(&mut self.0);
		drop(unsafe { Object::from_raw(raw.ok) });
		drop(unsafe { Object::from_raw(raw.err) });
	}
}

impl Default for ObjectResult {
	fn default() -> Self {
		Self::ok_empty()
	}
}

impl<T: Into<Object>, E: Into<Object>> From<std::result::Result<T, E>> for ObjectResult {
	fn from(result: std::result::Result<T, E>) -> Self {
		match result {
			Ok(value) => Self::ok(value),
			Err(error) => Self::err(error),
		}
	}
}

impl Debug for ObjectResult {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.as_result() {
			Ok(ok) => f.debug_tuple("Ok").field(ok).finish(),
			Err(err) => f.debug_tuple("Err").field(err).finish(),
		}
	}
}
