// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// FFI-safe unit value (`null_t`)
///
/// Carries a single padding byte because C forbids empty structs.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullFFI {
	/// Padding; always zero
	pub _dummy: u8,
}

impl NullFFI {
	/// The NULL value
	pub const fn null() -> Self {
		Self {
			_dummy: 0,
		}
	}
}
