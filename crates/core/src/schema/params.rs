// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::BTreeMap,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const OPTION_CLASS: &str = "class";
const COMPRESSION_SSTABLE_COMPRESSION: &str = "sstable_compression";
const COMPRESSION_CHUNK_LENGTH_KB: &str = "chunk_length_kb";
const COMPRESSION_CHUNK_LENGTH_IN_KB: &str = "chunk_length_in_kb";
const COMPRESSION_ENABLED: &str = "enabled";

const COMPRESSOR_PACKAGE: &str = "org.apache.cassandra.io.compress.";
const COMPACTION_PACKAGE: &str = "org.apache.cassandra.db.compaction.";

pub const DEFAULT_CHUNK_LENGTH_KB: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionCodec {
	None,
	Lz4,
	Snappy,
	Deflate,
	Zstd,
}

impl CompressionCodec {
	/// Accepts short names (`lz4`), compressor class names (`LZ4Compressor`)
	/// and fully qualified class names. An empty name disables compression.
	pub fn from_class(class: &str) -> Option<Self> {
		let short = class.strip_prefix(COMPRESSOR_PACKAGE).unwrap_or(class);
		match short.to_lowercase().as_str() {
			"" | "none" => Some(CompressionCodec::None),
			"lz4" | "lz4compressor" => Some(CompressionCodec::Lz4),
			"snappy" | "snappycompressor" => Some(CompressionCodec::Snappy),
			"deflate" | "deflatecompressor" => Some(CompressionCodec::Deflate),
			"zstd" | "zstdcompressor" => Some(CompressionCodec::Zstd),
			_ => None,
		}
	}

	pub fn class_name(&self) -> &'static str {
		match self {
			CompressionCodec::None => "",
			CompressionCodec::Lz4 => "LZ4Compressor",
			CompressionCodec::Snappy => "SnappyCompressor",
			CompressionCodec::Deflate => "DeflateCompressor",
			CompressionCodec::Zstd => "ZstdCompressor",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionParameters {
	pub codec: CompressionCodec,
	pub chunk_length_kb: u32,
}

impl CompressionParameters {
	pub fn new(codec: CompressionCodec) -> Self {
		Self {
			codec,
			chunk_length_kb: DEFAULT_CHUNK_LENGTH_KB,
		}
	}

	pub fn none() -> Self {
		Self::new(CompressionCodec::None)
	}

	pub fn is_enabled(&self) -> bool {
		self.codec != CompressionCodec::None
	}

	pub fn from_options(property: &str, options: &BTreeMap<String, String>) -> Result<Self, CatalogError> {
		if let Some(enabled) = options.get(COMPRESSION_ENABLED) {
			match enabled.to_lowercase().as_str() {
				"false" => return Ok(Self::none()),
				"true" => {}
				other => {
					return Err(CatalogError::invalid_property(
						property,
						format!("`enabled` must be true or false, got `{}`", other),
					));
				}
			}
		}

		let class = options
			.get(OPTION_CLASS)
			.or_else(|| options.get(COMPRESSION_SSTABLE_COMPRESSION))
			.ok_or_else(|| CatalogError::invalid_property(property, "missing `class` option"))?;

		let codec = CompressionCodec::from_class(class).ok_or_else(|| {
			CatalogError::invalid_property(property, format!("unknown compressor `{}`", class))
		})?;

		let mut params = Self::new(codec);

		if let Some(chunk) = options.get(COMPRESSION_CHUNK_LENGTH_KB).or_else(|| options.get(COMPRESSION_CHUNK_LENGTH_IN_KB))
		{
			let chunk_length_kb = chunk.parse::<u32>().map_err(|_| {
				CatalogError::invalid_property(property, format!("chunk length `{}` is not a number", chunk))
			})?;
			if chunk_length_kb == 0 || !chunk_length_kb.is_power_of_two() {
				return Err(CatalogError::invalid_property(
					property,
					format!("chunk length must be a power of two, got {}", chunk_length_kb),
				));
			}
			params.chunk_length_kb = chunk_length_kb;
		}

		for key in options.keys() {
			match key.as_str() {
				OPTION_CLASS
				| COMPRESSION_SSTABLE_COMPRESSION
				| COMPRESSION_CHUNK_LENGTH_KB
				| COMPRESSION_CHUNK_LENGTH_IN_KB
				| COMPRESSION_ENABLED => {}
				unknown => {
					return Err(CatalogError::invalid_property(
						property,
						format!("unknown compression option `{}`", unknown),
					));
				}
			}
		}

		Ok(params)
	}
}

impl Display for CompressionParameters {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.is_enabled() {
			write!(f, "{}(chunk_length_kb={})", self.codec.class_name(), self.chunk_length_kb)
		} else {
			f.write_str("none")
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompactionStrategy {
	SizeTiered,
	Leveled,
	TimeWindow,
	Incremental,
}

impl CompactionStrategy {
	pub fn from_class(class: &str) -> Option<Self> {
		let short = class.strip_prefix(COMPACTION_PACKAGE).unwrap_or(class);
		match short {
			"SizeTieredCompactionStrategy" => Some(CompactionStrategy::SizeTiered),
			"LeveledCompactionStrategy" => Some(CompactionStrategy::Leveled),
			"TimeWindowCompactionStrategy" => Some(CompactionStrategy::TimeWindow),
			"IncrementalCompactionStrategy" => Some(CompactionStrategy::Incremental),
			_ => None,
		}
	}

	pub fn class_name(&self) -> &'static str {
		match self {
			CompactionStrategy::SizeTiered => "SizeTieredCompactionStrategy",
			CompactionStrategy::Leveled => "LeveledCompactionStrategy",
			CompactionStrategy::TimeWindow => "TimeWindowCompactionStrategy",
			CompactionStrategy::Incremental => "IncrementalCompactionStrategy",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionParameters {
	pub strategy: CompactionStrategy,
	/// Strategy specific options, passed through untouched.
	pub options: BTreeMap<String, String>,
}

impl CompactionParameters {
	pub fn new(strategy: CompactionStrategy) -> Self {
		Self {
			strategy,
			options: BTreeMap::new(),
		}
	}

	pub fn from_options(property: &str, options: &BTreeMap<String, String>) -> Result<Self, CatalogError> {
		let class = options
			.get(OPTION_CLASS)
			.ok_or_else(|| CatalogError::invalid_property(property, "missing `class` option"))?;

		let strategy = CompactionStrategy::from_class(class).ok_or_else(|| {
			CatalogError::invalid_property(property, format!("unknown compaction strategy `{}`", class))
		})?;

		let options = options
			.iter()
			.filter(|(key, _)| key.as_str() != OPTION_CLASS)
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect();

		Ok(Self {
			strategy,
			options,
		})
	}
}

impl Default for CompactionParameters {
	fn default() -> Self {
		Self::new(CompactionStrategy::SizeTiered)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeysCaching {
	All,
	None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowsCaching {
	None,
	All,
	Count(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachingParameters {
	pub keys: KeysCaching,
	pub rows_per_partition: RowsCaching,
}

impl CachingParameters {
	pub fn from_options(property: &str, options: &BTreeMap<String, String>) -> Result<Self, CatalogError> {
		let mut result = Self::default();

		for (key, value) in options {
			match key.as_str() {
				"keys" => {
					result.keys = match value.to_uppercase().as_str() {
						"ALL" => KeysCaching::All,
						"NONE" => KeysCaching::None,
						_ => {
							return Err(CatalogError::invalid_property(
								property,
								format!("`keys` must be ALL or NONE, got `{}`", value),
							));
						}
					}
				}
				"rows_per_partition" => {
					result.rows_per_partition = match value.to_uppercase().as_str() {
						"ALL" => RowsCaching::All,
						"NONE" => RowsCaching::None,
						count => RowsCaching::Count(count.parse::<u32>().map_err(|_| {
							CatalogError::invalid_property(
								property,
								format!(
									"`rows_per_partition` must be ALL, NONE or a count, got `{}`",
									value
								),
							)
						})?),
					}
				}
				unknown => {
					return Err(CatalogError::invalid_property(
						property,
						format!("unknown caching option `{}`", unknown),
					));
				}
			}
		}

		Ok(result)
	}
}

impl Default for CachingParameters {
	fn default() -> Self {
		Self {
			keys: KeysCaching::All,
			rows_per_partition: RowsCaching::None,
		}
	}
}

/// Storage options of a built schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableParams {
	pub comment: String,
	pub compression: CompressionParameters,
	pub compaction: CompactionParameters,
	pub caching: CachingParameters,
	pub gc_grace_seconds: u32,
	pub default_time_to_live: u32,
	pub bloom_filter_fp_chance: f64,
	pub min_index_interval: u32,
	pub max_index_interval: u32,
	pub memtable_flush_period_in_ms: u32,
	pub speculative_retry: String,
	pub read_repair_chance: f64,
}

impl Default for TableParams {
	fn default() -> Self {
		Self {
			comment: String::new(),
			compression: CompressionParameters::none(),
			compaction: CompactionParameters::default(),
			caching: CachingParameters::default(),
			gc_grace_seconds: 864_000,
			default_time_to_live: 0,
			bloom_filter_fp_chance: 0.01,
			min_index_interval: 128,
			max_index_interval: 2048,
			memtable_flush_period_in_ms: 0,
			speculative_retry: "99PERCENTILE".to_string(),
			read_repair_chance: 0.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::{
		CachingParameters, CompactionParameters, CompactionStrategy, CompressionCodec, CompressionParameters,
		RowsCaching,
	};

	fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
		pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
	}

	#[test]
	fn test_codec_from_class_names() {
		assert_eq!(CompressionCodec::from_class("lz4"), Some(CompressionCodec::Lz4));
		assert_eq!(CompressionCodec::from_class("SnappyCompressor"), Some(CompressionCodec::Snappy));
		assert_eq!(
			CompressionCodec::from_class("org.apache.cassandra.io.compress.DeflateCompressor"),
			Some(CompressionCodec::Deflate)
		);
		assert_eq!(CompressionCodec::from_class(""), Some(CompressionCodec::None));
		assert_eq!(CompressionCodec::from_class("brotli"), None);
	}

	#[test]
	fn test_compression_from_options() {
		let params = CompressionParameters::from_options(
			"compression",
			&options(&[("sstable_compression", "LZ4Compressor"), ("chunk_length_kb", "16")]),
		)
		.unwrap();
		assert_eq!(params.codec, CompressionCodec::Lz4);
		assert_eq!(params.chunk_length_kb, 16);
		assert_eq!(params.to_string(), "LZ4Compressor(chunk_length_kb=16)");
	}

	#[test]
	fn test_compression_disabled() {
		let params = CompressionParameters::from_options("compression", &options(&[("enabled", "false")]))
			.unwrap();
		assert!(!params.is_enabled());
	}

	#[test]
	fn test_compression_rejects_bad_chunk() {
		let err = CompressionParameters::from_options(
			"compression",
			&options(&[("class", "lz4"), ("chunk_length_kb", "12")]),
		)
		.unwrap_err();
		assert!(err.to_string().contains("power of two"));
	}

	#[test]
	fn test_compression_rejects_unknown_option() {
		let err = CompressionParameters::from_options("compression", &options(&[("class", "lz4"), ("level", "3")]))
			.unwrap_err();
		assert!(err.to_string().contains("level"));
	}

	#[test]
	fn test_compaction_keeps_strategy_options() {
		let params = CompactionParameters::from_options(
			"compaction",
			&options(&[("class", "LeveledCompactionStrategy"), ("sstable_size_in_mb", "160")]),
		)
		.unwrap();
		assert_eq!(params.strategy, CompactionStrategy::Leveled);
		assert_eq!(params.options.get("sstable_size_in_mb").map(String::as_str), Some("160"));
		assert!(!params.options.contains_key("class"));
	}

	#[test]
	fn test_caching_rows_count() {
		let params =
			CachingParameters::from_options("caching", &options(&[("rows_per_partition", "100")])).unwrap();
		assert_eq!(params.rows_per_partition, RowsCaching::Count(100));
	}
}
