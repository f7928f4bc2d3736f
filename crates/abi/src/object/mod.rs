// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Flat object encoding: one tagged struct for every value, one pair for every result

mod object;
mod result;

pub use object::*;
pub use result::*;
