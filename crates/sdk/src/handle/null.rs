// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use c_bridge_abi::handle::NullFFI;

use super::HandleValue;
use crate::{
	error::{BridgeError, Result},
	object::Object,
};

/// The unit value; carries no data and needs no release
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Null;

impl HandleValue for Null {
	type Raw = NullFFI;

	fn into_raw(self) -> NullFFI {
		NullFFI::null()
	}

	unsafe fn from_raw(_raw: NullFFI) -> Self {
		Null
	}

	fn empty_raw() -> NullFFI {
		NullFFI::null()
	}

	fn accepts(object: &Object) -> bool {
		object.is_empty()
	}

	fn into_object(self) -> Object {
		Object::empty()
	}

	fn from_object(object: Object) -> Result<Self> {
		if object.is_empty() {
			Ok(Null)
		} else {
			Err(BridgeError::KindMismatch {
				expected: "empty object",
				found: object.raw_type(),
			})
		}
	}
}
