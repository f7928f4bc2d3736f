// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Fixed-shape handle family
//!
//! Every handle bundles an untyped `object` pointer with the function
//! pointers needed to read and release it. Absence of ownership is signalled
//! by a null `object`.

mod array;
mod null;
mod opaque;
mod result;

pub use array::*;
pub use null::*;
pub use opaque::*;
pub use result::*;
