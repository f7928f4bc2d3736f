// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Discriminant constants of the flat object encoding
//!
//! These values are part of the binary contract and never change between
//! revisions. Caller-private tags always carry [`MASK_CUSTOM`].

/// Version of the bridge ABI (major << 16 | minor)
pub const ABI_VERSION: u32 = 2u32 << 16;

/// An implementation-defined opaque object
pub const TYPE_OPAQUE: u64 = 0x00;

/// A byte array; the payload is a `DataArrayFFI`
pub const TYPE_DATA_ARRAY: u64 = 0x01;

/// An array of objects; the payload is an `ObjectArrayFFI`
pub const TYPE_OBJECT_ARRAY: u64 = 0x02;

/// A boxed Rust value (`Box<dyn Any>`) owned by the producing side
pub const TYPE_RUST_BOX: u64 = 0x10;

/// Bit reserved for caller-defined tags
pub const MASK_CUSTOM: u64 = 1 << 63;

/// All built-in tags
pub const BUILTIN_TYPES: [u64; 4] = [TYPE_OPAQUE, TYPE_DATA_ARRAY, TYPE_OBJECT_ARRAY, TYPE_RUST_BOX];

/// Returns true if `tag` lies in the caller-defined space
#[inline]
pub const fn is_custom_type(tag: u64) -> bool {
	(tag & MASK_CUSTOM) != 0
}

/// Returns true if `tag` is one of the built-in tags
#[inline]
pub const fn is_builtin_type(tag: u64) -> bool {
	matches!(tag, TYPE_OPAQUE | TYPE_DATA_ARRAY | TYPE_OBJECT_ARRAY | TYPE_RUST_BOX)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tag_values() {
		assert_eq!(TYPE_OPAQUE, 0x00);
		assert_eq!(TYPE_DATA_ARRAY, 0x01);
		assert_eq!(TYPE_OBJECT_ARRAY, 0x02);
		assert_eq!(TYPE_RUST_BOX, 0x10);
		assert_eq!(MASK_CUSTOM, 0x8000_0000_0000_0000);
	}

	#[test]
	fn test_builtin_tags_are_not_custom() {
		for tag in BUILTIN_TYPES {
			assert!(is_builtin_type(tag));
			assert!(!is_custom_type(tag));
		}
	}

	#[test]
	fn test_custom_tags_never_collide() {
		for low in [0u64, 1, 2, 0x10, 0xFFFF, u64::MAX >> 1] {
			let tag = MASK_CUSTOM | low;
			assert!(is_custom_type(tag));
			assert!(!is_builtin_type(tag));
			assert!(!BUILTIN_TYPES.contains(&tag));
		}
	}
}
