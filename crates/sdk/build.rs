// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#[cfg(feature = "c-harness")]
fn main() {
	println!("cargo:rerun-if-changed=tests/c/harness.c");
	println!("cargo:rerun-if-changed=../abi/include/c_bridge.h");

	let mut cc = cc::Build::new();
	cc.include("../abi/include");
	cc.file("tests/c/harness.c");
	cc.warnings(true);
	cc.compile("c_bridge_harness");
}

#[cfg(not(feature = "c-harness"))]
fn main() {
	// The C harness is only compiled for its tests
}
