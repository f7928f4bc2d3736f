// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::ObjectFFI;

/// FFI-safe result pair (`c_bridge_ffi_result`)
///
/// At most one side carries a payload. The result is ok exactly when `err`
/// is empty, which keeps an ok result without value (both sides empty)
/// representable.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ResultFFI {
	/// The ok value
	pub ok: ObjectFFI,
	/// The error value
	pub err: ObjectFFI,
}

impl ResultFFI {
	/// Create a result with both sides empty (an ok result without value)
	pub const fn empty() -> Self {
		Self {
			ok: ObjectFFI::empty(),
			err: ObjectFFI::empty(),
		}
	}

	/// Check if the result holds the ok side
	pub fn is_ok(&self) -> bool {
		self.err.is_empty()
	}
}

impl Default for ResultFFI {
	fn default() -> Self {
		Self::empty()
	}
}
