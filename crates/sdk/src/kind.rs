// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Closed set of object kinds
//!
//! The integer tag of [`ObjectFFI`](c_bridge_abi::object::ObjectFFI) only
//! exists at the boundary; inside the SDK every tag is parsed into an
//! [`ObjectKind`] first, so an invalid tag cannot flow any further.

use std::{
	ffi::CStr,
	fmt::{self, Display, Formatter},
};

use c_bridge_abi::constants::{
	MASK_CUSTOM, TYPE_DATA_ARRAY, TYPE_OBJECT_ARRAY, TYPE_OPAQUE, TYPE_RUST_BOX, is_custom_type,
};

use crate::error::{BridgeError, Result};

/// A caller-defined tag; the high bit is always set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomTag(u64);

impl CustomTag {
	/// Create a custom tag from its low 63 bits (the high bit of `low` is ignored)
	pub const fn new(low: u64) -> Self {
		Self(MASK_CUSTOM | (low & !MASK_CUSTOM))
	}

	/// Interpret a raw tag; `None` if it lies outside the custom space
	pub const fn from_raw(raw: u64) -> Option<Self> {
		if is_custom_type(raw) {
			Some(Self(raw))
		} else {
			None
		}
	}

	/// The tag as it appears on the wire
	pub const fn to_raw(self) -> u64 {
		self.0
	}

	/// The caller-chosen low 63 bits
	pub const fn low(self) -> u64 {
		self.0 & !MASK_CUSTOM
	}
}

/// Kind of payload carried by an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
	Opaque,
	DataArray,
	ObjectArray,
	RustBox,
	Custom(CustomTag),
}

impl ObjectKind {
	/// Parse a raw tag
	pub const fn from_raw(raw: u64) -> Result<Self> {
		match raw {
			TYPE_OPAQUE => Ok(ObjectKind::Opaque),
			TYPE_DATA_ARRAY => Ok(ObjectKind::DataArray),
			TYPE_OBJECT_ARRAY => Ok(ObjectKind::ObjectArray),
			TYPE_RUST_BOX => Ok(ObjectKind::RustBox),
			_ => match CustomTag::from_raw(raw) {
				Some(tag) => Ok(ObjectKind::Custom(tag)),
				None => Err(BridgeError::UnknownTag(raw)),
			},
		}
	}

	/// The tag as it appears on the wire
	pub const fn to_raw(self) -> u64 {
		match self {
			ObjectKind::Opaque => TYPE_OPAQUE,
			ObjectKind::DataArray => TYPE_DATA_ARRAY,
			ObjectKind::ObjectArray => TYPE_OBJECT_ARRAY,
			ObjectKind::RustBox => TYPE_RUST_BOX,
			ObjectKind::Custom(tag) => tag.to_raw(),
		}
	}

	/// Static description used as type hint of opaque handles
	pub const fn type_hint(self) -> &'static CStr {
		match self {
			ObjectKind::Opaque => c"c_bridge::opaque",
			ObjectKind::DataArray => c"c_bridge::data_array",
			ObjectKind::ObjectArray => c"c_bridge::object_array",
			ObjectKind::RustBox => c"Rust::Box<dyn Any + 'static>",
			ObjectKind::Custom(_) => c"c_bridge::custom",
		}
	}
}

impl Display for ObjectKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ObjectKind::Opaque => f.write_str("opaque"),
			ObjectKind::DataArray => f.write_str("data array"),
			ObjectKind::ObjectArray => f.write_str("object array"),
			ObjectKind::RustBox => f.write_str("rust box"),
			ObjectKind::Custom(tag) => write!(f, "custom(0x{:x})", tag.low()),
		}
	}
}

impl TryFrom<u64> for ObjectKind {
	type Error = BridgeError;

	fn try_from(raw: u64) -> Result<Self> {
		Self::from_raw(raw)
	}
}

impl From<ObjectKind> for u64 {
	fn from(kind: ObjectKind) -> Self {
		kind.to_raw()
	}
}
