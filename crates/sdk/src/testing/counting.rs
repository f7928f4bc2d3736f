// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	alloc::{GlobalAlloc, Layout, System},
	cell::Cell,
};

thread_local! {
	static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn record(delta: isize) {
	let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

/// Global allocator counting live allocations of the current thread
///
/// Install it with `#[global_allocator]` in a test binary, then use
/// [`measure`] around the code under test.
pub struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		let ptr = unsafe { System.alloc(layout) };
		if !ptr.is_null() {
			record(1);
		}
		ptr
	}

	unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
		let ptr = unsafe { System.alloc_zeroed(layout) };
		if !ptr.is_null() {
			record(1);
		}
		ptr
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		unsafe { System.dealloc(ptr, layout) };
		record(-1);
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		unsafe { System.realloc(ptr, layout, new_size) }
	}
}

/// Allocations made minus allocations freed on this thread so far
pub fn live_allocations() -> isize {
	LIVE.try_with(Cell::get).unwrap_or(0)
}

/// Run `f` and report how many of its allocations are still alive afterwards
///
/// The result of `f` is dropped before counting; only meaningful when
/// [`CountingAllocator`] is the global allocator.
pub fn measure<R>(f: impl FnOnce() -> R) -> isize {
	let before = live_allocations();
	drop(f());
	live_allocations() - before
}
