// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Optional `tracing` subscriber for hosts that do not install their own
//!
//! The SDK only emits events through `tracing`; a host embedding the bridge
//! in a larger Rust program keeps its own subscriber and never calls [`init`].

use tracing_subscriber::EnvFilter;

use crate::config::{self, LogConfig, LogFormat};

/// Install a global subscriber configured by `config`
///
/// Returns false if a global subscriber was already installed. An invalid
/// filter directive falls back to `warn`.
pub fn init(config: &LogConfig) -> bool {
	let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("warn"));
	let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

	let result = match config.format {
		LogFormat::Pretty => builder.try_init(),
		LogFormat::Json => builder.json().try_init(),
	};

	result.is_ok()
}

/// Install a global subscriber using the active configuration
pub fn init_from_config() -> bool {
	init(&config::current().log)
}
