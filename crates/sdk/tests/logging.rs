// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Integration tests for subscriber installation

use c_bridge_sdk::{
	config::{Config, LogFormat},
	logging,
	prelude::*,
};

#[test]
fn test_init_once() {
	let config = Config::builder().log_filter("c_bridge_sdk=trace").log_format(LogFormat::Json).build();
	assert!(logging::init(&config.log));
	assert!(!logging::init(&config.log));
	assert!(!logging::init_from_config());

	// events flow through the installed subscriber
	let array = DataArray::from_message("logged");
	drop(array);
}
