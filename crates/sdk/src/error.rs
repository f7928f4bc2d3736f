// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Errors reported by the safe Rust side of the bridge
//!
//! Domain errors produced by a callee travel through the err slot of a
//! result; they only become a [`BridgeError::Domain`] when a Rust caller
//! decodes them. Caller contract violations across the C boundary are not
//! errors, see [`crate::guard`].

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
	#[error("unknown object type tag 0x{0:016x}")]
	UnknownTag(u64),

	#[error("expected {expected}, found type tag 0x{found:x}")]
	KindMismatch {
		expected: &'static str,
		found: u64,
	},

	#[error("object is empty")]
	Empty,

	#[error("invalid result discriminant {0}")]
	InvalidDiscriminant(u8),

	#[error("error message is not valid UTF-8")]
	InvalidMessage,

	#[error("{0}")]
	Domain(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(BridgeError::UnknownTag(0x11).to_string(), "unknown object type tag 0x0000000000000011");
		assert_eq!(
			BridgeError::KindMismatch {
				expected: "data array",
				found: 0x10,
			}
			.to_string(),
			"expected data array, found type tag 0x10"
		);
		assert_eq!(BridgeError::Domain("disk full".to_string()).to_string(), "disk full");
	}
}
