// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Safe Rust side of the C bridge
//!
//! Two encodings cross the boundary:
//!
//! - the flat encoding: a tagged [`Object`] and an [`ObjectResult`] pair,
//! - fixed-shape handles ([`handle`]) with a function-pointer vtable each.
//!
//! Handles are built on top of the flat encoding, so values move between
//! both without copying.

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod array;
pub mod config;
pub mod error;
pub mod exports;
pub mod guard;
pub mod handle;
pub mod kind;
pub mod logging;
pub mod object;
pub mod result;
pub mod rust_box;
mod storage;
pub mod testing;
pub mod traits;

#[cfg(all(test, feature = "c-harness"))]
mod c_harness;

pub use array::{ArrayElement, DataArray, GenericArray, ObjectArray};
pub use c_bridge_abi as abi;
pub use config::{Config, ViolationPolicy};
pub use error::{BridgeError, Result};
pub use kind::{CustomTag, ObjectKind};
pub use object::Object;
pub use result::ObjectResult;
pub use rust_box::RustBox;

pub mod prelude {
	pub use crate::{
		array::{DataArray, ObjectArray},
		error::{BridgeError, Result},
		handle::{
			ByteArray, ByteArrayArray, ByteArrayResult, HandleValue, Null, NullResult, OpaqueArray, OpaqueHandle,
			OpaqueResult,
		},
		kind::{CustomTag, ObjectKind},
		object::Object,
		result::ObjectResult,
		rust_box::RustBox,
		traits::{ByteView, Consume, Release},
	};
}
