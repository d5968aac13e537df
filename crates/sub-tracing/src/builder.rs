// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tessera_type::{Result, internal_error, return_error};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Configuration for the process-wide `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `level` and `filter` when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingBuilder {
	level: String,
	json: bool,
	with_target: bool,
	with_thread_ids: bool,
	filter: Option<String>,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self {
			level: Level::INFO.to_string(),
			json: false,
			with_target: true,
			with_thread_ids: false,
			filter: None,
		}
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn level(mut self, level: Level) -> Self {
		self.level = level.to_string();
		self
	}

	pub fn json(mut self, json: bool) -> Self {
		self.json = json;
		self
	}

	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	pub fn with_thread_ids(mut self, with_thread_ids: bool) -> Self {
		self.with_thread_ids = with_thread_ids;
		self
	}

	/// Extra `EnvFilter` directives, e.g. `tessera_statement=trace`.
	pub fn filter(mut self, directives: impl Into<String>) -> Self {
		self.filter = Some(directives.into());
		self
	}

	/// Directive string the `EnvFilter` is built from when `RUST_LOG` is
	/// absent.
	pub fn directives(&self) -> String {
		match &self.filter {
			Some(filter) if !filter.is_empty() => format!("{},{}", self.level.to_lowercase(), filter),
			_ => self.level.to_lowercase(),
		}
	}

	fn env_filter(&self) -> Result<EnvFilter> {
		if let Ok(filter) = EnvFilter::try_from_default_env() {
			return Ok(filter);
		}
		EnvFilter::try_new(self.directives())
			.map_err(|err| internal_error!("invalid tracing filter `{}`: {}", self.directives(), err).into())
	}

	/// Installs the subscriber. Fails if one is already installed.
	pub fn init(self) -> Result<()> {
		let filter = self.env_filter()?;
		let builder = fmt()
			.with_env_filter(filter)
			.with_target(self.with_target)
			.with_thread_ids(self.with_thread_ids);

		let installed = if self.json {
			builder.json().try_init()
		} else {
			builder.try_init()
		};

		if let Err(err) = installed {
			return_error!(internal_error!("tracing subscriber already installed: {}", err));
		}
		Ok(())
	}
}
