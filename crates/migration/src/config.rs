// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

pub const DEFAULT_ANNOUNCEMENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
	/// Buffered announcements per subscriber before it starts lagging.
	pub announcement_capacity: usize,
	/// Create the keyspace on first announce instead of failing.
	pub create_missing_keyspaces: bool,
}

impl Default for MigrationConfig {
	fn default() -> Self {
		Self {
			announcement_capacity: DEFAULT_ANNOUNCEMENT_CAPACITY,
			create_missing_keyspaces: false,
		}
	}
}

impl MigrationConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn announcement_capacity(mut self, capacity: usize) -> Self {
		self.announcement_capacity = capacity.max(1);
		self
	}

	pub fn create_missing_keyspaces(mut self, create: bool) -> Self {
		self.create_missing_keyspaces = create;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::MigrationConfig;

	#[test]
	fn test_defaults() {
		let config = MigrationConfig::default();
		assert_eq!(config.announcement_capacity, 64);
		assert!(!config.create_missing_keyspaces);
	}

	#[test]
	fn test_zero_capacity_is_clamped() {
		assert_eq!(MigrationConfig::new().announcement_capacity(0).announcement_capacity, 1);
	}

	#[test]
	fn test_partial_config_falls_back_to_defaults() {
		let config: MigrationConfig = serde_json::from_str(r#"{"create_missing_keyspaces":true}"#).unwrap();
		assert_eq!(config, MigrationConfig::new().create_missing_keyspaces(true));
	}
}
