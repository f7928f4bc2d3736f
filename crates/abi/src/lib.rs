// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for the C bridge
//!
//! This crate provides the stable C layouts used to hand owned values from a
//! producing runtime to a plain C caller. Every struct is both a value and a
//! small vtable: it carries the function pointers needed to read and release
//! its storage. The matching header lives in `include/c_bridge.h`.
//!
//! Two encodings are defined:
//! - [`object`]: the flat encoding, a tagged [`object::ObjectFFI`] plus the
//!   generic [`object::ResultFFI`] pair
//! - [`handle`]: the fixed-shape handles of the first revision (`opaque_t`,
//!   `array_u8_t`, `result_*_t`, ...)

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod constants;
pub mod handle;
pub mod object;
