// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ops::{Deref, DerefMut},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

/// Counts how many [`Tracked`] values created from it were dropped
#[derive(Debug, Clone, Default)]
pub struct DropCounter(Arc<AtomicUsize>);

impl DropCounter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn track<T>(&self, value: T) -> Tracked<T> {
		Tracked {
			value,
			counter: self.clone(),
		}
	}

	pub fn count(&self) -> usize {
		self.0.load(Ordering::SeqCst)
	}
}

/// A value that bumps its [`DropCounter`] when dropped
#[derive(Debug)]
pub struct Tracked<T> {
	value: T,
	counter: DropCounter,
}

impl<T> Deref for Tracked<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.value
	}
}

impl<T> DerefMut for Tracked<T> {
	fn deref_mut(&mut self) -> &mut T {
		&mut self.value
	}
}

impl<T> Drop for Tracked<T> {
	fn drop(&mut self) {
		self.counter.0.fetch_add(1, Ordering::SeqCst);
	}
}
