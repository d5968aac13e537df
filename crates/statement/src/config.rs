// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tessera_core::schema::CompressionCodec;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateTableConfig {
	/// Compression applied to tables that do not specify their own.
	/// Disabled when `None`.
	pub default_compressor: Option<CompressionCodec>,
}

impl CreateTableConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn default_compressor(mut self, codec: CompressionCodec) -> Self {
		self.default_compressor = Some(codec);
		self
	}

	pub fn without_default_compressor(mut self) -> Self {
		self.default_compressor = None;
		self
	}
}
