// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Testing utilities for code that hands objects across the bridge
//!
//! Ownership bugs at the boundary show up as leaks or double frees, so the
//! helpers here count what is allocated and dropped rather than inspecting
//! values.
//!
//! # Example
//!
//! ```ignore
//! use c_bridge_sdk::testing::*;
//!
//! #[global_allocator]
//! static ALLOCATOR: CountingAllocator = CountingAllocator;
//!
//! #[test]
//! fn test_nested_release() {
//! 	let leaked = measure(|| ObjectArray::from_vec(vec![DataArray::from("abc").into_object()]));
//! 	assert_eq!(leaked, 0);
//! }
//! ```

mod counting;
mod tracked;

pub use counting::{CountingAllocator, live_allocations, measure};
pub use tracked::{DropCounter, Tracked};

/// Install a `trace`-level subscriber writing to the test output
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::new("trace"))
		.with_test_writer()
		.try_init();
}
