// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide bridge configuration
//!
//! The configuration is read from the environment on first use and can be
//! replaced at any time with [`install`].
//!
//! | variable              | values             | default |
//! |-----------------------|--------------------|---------|
//! | `C_BRIDGE_VIOLATION`  | `abort`, `empty`   | `abort` |
//! | `C_BRIDGE_LOG`        | tracing filter     | `warn`  |
//! | `C_BRIDGE_LOG_FORMAT` | `pretty`, `json`   | `pretty`|

use std::sync::LazyLock;

use parking_lot::RwLock;

pub const ENV_VIOLATION: &str = "C_BRIDGE_VIOLATION";
pub const ENV_LOG: &str = "C_BRIDGE_LOG";
pub const ENV_LOG_FORMAT: &str = "C_BRIDGE_LOG_FORMAT";

const DEFAULT_LOG_FILTER: &str = "warn";

static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::from_env()));

/// What happens when a caller breaks the contract across the C boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViolationPolicy {
	/// Log and abort the process
	#[default]
	Abort,
	/// Log and hand back an empty value that is safe to release
	Empty,
}

impl ViolationPolicy {
	fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"abort" => Some(Self::Abort),
			"empty" => Some(Self::Empty),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

impl LogFormat {
	fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"pretty" => Some(Self::Pretty),
			"json" => Some(Self::Json),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
	/// A `tracing_subscriber::EnvFilter` directive
	pub filter: String,
	pub format: LogFormat,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			filter: DEFAULT_LOG_FILTER.to_string(),
			format: LogFormat::default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
	pub violation: ViolationPolicy,
	pub log: LogConfig,
}

impl Config {
	pub fn builder() -> ConfigBuilder {
		ConfigBuilder::new()
	}

	/// Read the configuration from the process environment
	pub fn from_env() -> Self {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Build a configuration from `lookup`; unset or unparsable values fall back to the defaults
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut config = Config::default();

		if let Some(value) = lookup(ENV_VIOLATION) {
			config.violation = ViolationPolicy::parse(&value).unwrap_or_default();
		}

		if let Some(value) = lookup(ENV_LOG) {
			let value = value.trim();
			if !value.is_empty() {
				config.log.filter = value.to_string();
			}
		}

		if let Some(value) = lookup(ENV_LOG_FORMAT) {
			config.log.format = LogFormat::parse(&value).unwrap_or_default();
		}

		config
	}
}

/// Builder for [`Config`]
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
	config: Config,
}

impl ConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn violation(mut self, policy: ViolationPolicy) -> Self {
		self.config.violation = policy;
		self
	}

	pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
		self.config.log.filter = filter.into();
		self
	}

	pub fn log_format(mut self, format: LogFormat) -> Self {
		self.config.log.format = format;
		self
	}

	pub fn build(self) -> Config {
		self.config
	}
}

/// Snapshot of the active configuration
pub fn current() -> Config {
	CONFIG.read().clone()
}

/// The active violation policy
pub fn violation_policy() -> ViolationPolicy {
	CONFIG.read().violation
}

/// Replace the active configuration, returning the previous one
pub fn install(config: Config) -> Config {
	std::mem::replace(&mut *CONFIG.write(), config)
}
