// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Guards for code running on the C side of the boundary
//!
//! A panic must never unwind into C, and a caller that breaks the contract
//! (consuming a result twice, reading the wrong side) has no Rust error
//! channel to receive a failure on. Both cases are logged and then handled
//! by [`abort`] or by the active [`ViolationPolicy`].

use std::{
	any::Any,
	panic::{AssertUnwindSafe, catch_unwind},
	process::abort,
};

use tracing::error;

use crate::config::{self, ViolationPolicy};

/// Run `f` on behalf of C, aborting the process if it panics
pub fn boundary<R>(name: &'static str, f: impl FnOnce() -> R) -> R {
	match catch_unwind(AssertUnwindSafe(f)) {
		Ok(result) => result,
		Err(panic) => {
			error!(name, panic = panic_message(panic.as_ref()), "Panic in bridge function - aborting");
			abort();
		}
	}
}

/// Report a contract violation by the caller
///
/// Aborts under [`ViolationPolicy::Abort`]; returns `fallback()` under
/// [`ViolationPolicy::Empty`].
pub fn violation<R>(name: &'static str, what: &str, fallback: impl FnOnce() -> R) -> R {
	match config::violation_policy() {
		ViolationPolicy::Abort => {
			error!(name, what, "Contract violation - aborting");
			abort();
		}
		ViolationPolicy::Empty => {
			error!(name, what, "Contract violation - returning empty value");
			fallback()
		}
	}
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
	if let Some(message) = panic.downcast_ref::<&'static str>() {
		message
	} else if let Some(message) = panic.downcast_ref::<String>() {
		message.as_str()
	} else {
		"<non-string panic payload>"
	}
}

#[cfg(test)]
mod tests {
	use std::panic::panic_any;

	use super::*;

	#[test]
	fn test_boundary_returns_value() {
		assert_eq!(boundary("test", || 42), 42);
	}

	#[test]
	fn test_panic_message() {
		let panic = catch_unwind(|| panic!("static message")).unwrap_err();
		assert_eq!(panic_message(panic.as_ref()), "static message");

		let panic = catch_unwind(|| panic!("formatted {}", 7)).unwrap_err();
		assert_eq!(panic_message(panic.as_ref()), "formatted 7");

		let panic = catch_unwind(|| panic_any(7u32)).unwrap_err();
		assert_eq!(panic_message(panic.as_ref()), "<non-string panic payload>");
	}
}
