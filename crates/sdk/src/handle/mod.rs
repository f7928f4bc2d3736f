// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixed-shape handles
//!
//! Safe owners of the handle structs in [`c_bridge_abi::handle`]. Every
//! handle created here stores its data in the flat encoding (a result handle
//! owns an [`ObjectResult`](crate::result::ObjectResult), an opaque handle
//! owns an [`Object`]), so values move between both families without
//! copying.

mod array;
mod null;
mod opaque;
mod result;

pub use array::{ArrayHandle, ByteArray, ByteArrayArray, OpaqueArray};
pub use null::Null;
pub use opaque::OpaqueHandle;
pub use result::{ByteArrayResult, NullResult, OpaqueResult, ResultHandle};

use c_bridge_abi::handle::ArrayHandleFFI;

use crate::{error::Result, object::Object};

/// A handle type that can be the value of a [`ResultHandle`]
pub trait HandleValue: Sized {
	/// The C layout of the handle
	type Raw;

	/// Give up ownership to C
	fn into_raw(self) -> Self::Raw;

	/// Take ownership of a raw handle
	///
	/// # Safety
	/// `raw` must be a valid handle that nobody else releases.
	unsafe fn from_raw(raw: Self::Raw) -> Self;

	/// A raw handle that holds nothing and is safe to release
	fn empty_raw() -> Self::Raw;

	/// Returns true if `object` can be turned into this handle type
	fn accepts(object: &Object) -> bool;

	/// Move the value into the flat encoding
	fn into_object(self) -> Object;

	/// Build the handle from an object of the flat encoding
	fn from_object(object: Object) -> Result<Self>;
}

/// A handle type that can be stored in an [`ArrayHandle`]
///
/// # Safety
/// `Self` must have the same layout as `Self::Raw`, and the four functions
/// must belong to arrays whose storage holds elements of type `Self`.
pub unsafe trait HandleElement: Sized + 'static {
	/// The C layout of an element
	type Raw;

	const DEALLOC: extern "C" fn(*mut ArrayHandleFFI<Self::Raw>);
	const LEN: extern "C" fn(*const ArrayHandleFFI<Self::Raw>) -> usize;
	const DATA: extern "C" fn(*const ArrayHandleFFI<Self::Raw>) -> *const Self::Raw;
	const DATA_MUT: extern "C" fn(*mut ArrayHandleFFI<Self::Raw>) -> *mut Self::Raw;
}
