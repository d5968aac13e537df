// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
	error::CatalogError,
	schema::{
		SchemaBuilder,
		params::{CachingParameters, CompactionParameters, CompressionParameters},
	},
};

pub const KW_COMMENT: &str = "comment";
pub const KW_COMPRESSION: &str = "compression";
pub const KW_COMPACTION: &str = "compaction";
pub const KW_CACHING: &str = "caching";
pub const KW_GC_GRACE_SECONDS: &str = "gc_grace_seconds";
pub const KW_DEFAULT_TIME_TO_LIVE: &str = "default_time_to_live";
pub const KW_BLOOM_FILTER_FP_CHANCE: &str = "bloom_filter_fp_chance";
pub const KW_MIN_INDEX_INTERVAL: &str = "min_index_interval";
pub const KW_MAX_INDEX_INTERVAL: &str = "max_index_interval";
pub const KW_MEMTABLE_FLUSH_PERIOD: &str = "memtable_flush_period_in_ms";
pub const KW_SPECULATIVE_RETRY: &str = "speculative_retry";
pub const KW_READ_REPAIR_CHANCE: &str = "read_repair_chance";

/// Twenty years, the largest TTL a cell may carry.
const MAX_TTL_SECONDS: u32 = 20 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
	String(String),
	Map(BTreeMap<String, String>),
}

impl From<&str> for PropertyValue {
	fn from(value: &str) -> Self {
		PropertyValue::String(value.to_string())
	}
}

impl From<String> for PropertyValue {
	fn from(value: String) -> Self {
		PropertyValue::String(value)
	}
}

impl From<BTreeMap<String, String>> for PropertyValue {
	fn from(value: BTreeMap<String, String>) -> Self {
		PropertyValue::Map(value)
	}
}

impl<const N: usize> From<[(&str, &str); N]> for PropertyValue {
	fn from(value: [(&str, &str); N]) -> Self {
		PropertyValue::Map(value.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
	}
}

impl PropertyValue {
	fn as_string(&self, property: &str) -> Result<&str, CatalogError> {
		match self {
			PropertyValue::String(value) => Ok(value),
			PropertyValue::Map(_) => Err(CatalogError::invalid_property(property, "expected a string value")),
		}
	}

	fn as_map(&self, property: &str) -> Result<&BTreeMap<String, String>, CatalogError> {
		match self {
			PropertyValue::Map(map) => Ok(map),
			PropertyValue::String(_) => Err(CatalogError::invalid_property(property, "expected a map value")),
		}
	}

	fn as_u32(&self, property: &str) -> Result<u32, CatalogError> {
		let value = self.as_string(property)?;
		value.parse::<u32>().map_err(|_| {
			CatalogError::invalid_property(property, format!("`{}` is not a non-negative integer", value))
		})
	}

	fn as_f64(&self, property: &str) -> Result<f64, CatalogError> {
		let value = self.as_string(property)?;
		value.parse::<f64>()
			.map_err(|_| CatalogError::invalid_property(property, format!("`{}` is not a number", value)))
	}
}

/// A validated table option, ready to be applied onto a [`SchemaBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableOption {
	Comment(String),
	Compression(CompressionParameters),
	Compaction(CompactionParameters),
	Caching(CachingParameters),
	GcGraceSeconds(u32),
	DefaultTimeToLive(u32),
	BloomFilterFpChance(f64),
	MinIndexInterval(u32),
	MaxIndexInterval(u32),
	MemtableFlushPeriod(u32),
	SpeculativeRetry(String),
	ReadRepairChance(f64),
}

/// Parsed key/value table options of a `CREATE TABLE ... WITH` clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableProperties {
	properties: BTreeMap<String, PropertyValue>,
}

impl TableProperties {
	pub fn new() -> Self {
		Self::default()
	}

	/// Option names are case-insensitive; setting an option twice keeps the
	/// last value.
	pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> &mut Self {
		self.properties.insert(name.into().to_lowercase(), value.into());
		self
	}

	pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
		self.add_property(name, value);
		self
	}

	pub fn has_property(&self, name: &str) -> bool {
		self.properties.contains_key(&name.to_lowercase())
	}

	pub fn get(&self, name: &str) -> Option<&PropertyValue> {
		self.properties.get(&name.to_lowercase())
	}

	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	pub fn validate(&self) -> Result<(), CatalogError> {
		self.options().map(|_| ())
	}

	/// Validates every option, then applies them in name order.
	pub fn apply_to_builder(&self, builder: &mut SchemaBuilder) -> Result<(), CatalogError> {
		for option in self.options()? {
			builder.with_option(option);
		}
		Ok(())
	}

	fn options(&self) -> Result<Vec<TableOption>, CatalogError> {
		self.properties.iter().map(|(name, value)| parse_option(name, value)).collect()
	}
}

fn parse_option(name: &str, value: &PropertyValue) -> Result<TableOption, CatalogError> {
	let option = match name {
		KW_COMMENT => TableOption::Comment(value.as_string(name)?.to_string()),
		KW_COMPRESSION => TableOption::Compression(CompressionParameters::from_options(name, value.as_map(name)?)?),
		KW_COMPACTION => TableOption::Compaction(CompactionParameters::from_options(name, value.as_map(name)?)?),
		KW_CACHING => TableOption::Caching(CachingParameters::from_options(name, value.as_map(name)?)?),
		KW_GC_GRACE_SECONDS => TableOption::GcGraceSeconds(value.as_u32(name)?),
		KW_DEFAULT_TIME_TO_LIVE => {
			let ttl = value.as_u32(name)?;
			if ttl > MAX_TTL_SECONDS {
				return Err(CatalogError::invalid_property(
					name,
					format!("{} exceeds the maximum of {} seconds", ttl, MAX_TTL_SECONDS),
				));
			}
			TableOption::DefaultTimeToLive(ttl)
		}
		KW_BLOOM_FILTER_FP_CHANCE => {
			let chance = value.as_f64(name)?;
			if !(chance > 0.0 && chance <= 1.0) {
				return Err(CatalogError::invalid_property(
					name,
					format!("{} must be in the range (0, 1]", chance),
				));
			}
			TableOption::BloomFilterFpChance(chance)
		}
		KW_MIN_INDEX_INTERVAL => {
			let interval = value.as_u32(name)?;
			if interval < 1 {
				return Err(CatalogError::invalid_property(name, "must be at least 1"));
			}
			TableOption::MinIndexInterval(interval)
		}
		KW_MAX_INDEX_INTERVAL => TableOption::MaxIndexInterval(value.as_u32(name)?),
		KW_MEMTABLE_FLUSH_PERIOD => TableOption::MemtableFlushPeriod(value.as_u32(name)?),
		KW_SPECULATIVE_RETRY => {
			let retry = value.as_string(name)?;
			if !is_valid_speculative_retry(retry) {
				return Err(CatalogError::invalid_property(
					name,
					format!("`{}` is not one of NONE, ALWAYS, <n>PERCENTILE or <n>ms", retry),
				));
			}
			TableOption::SpeculativeRetry(retry.to_uppercase())
		}
		KW_READ_REPAIR_CHANCE => {
			let chance = value.as_f64(name)?;
			if !(0.0..=1.0).contains(&chance) {
				return Err(CatalogError::invalid_property(
					name,
					format!("{} must be in the range [0, 1]", chance),
				));
			}
			TableOption::ReadRepairChance(chance)
		}
		_ => {
			return Err(CatalogError::UnknownProperty {
				property: name.to_string(),
			});
		}
	};
	Ok(option)
}

fn is_valid_speculative_retry(value: &str) -> bool {
	let upper = value.to_uppercase();
	match upper.as_str() {
		"NONE" | "ALWAYS" => true,
		_ => {
			if let Some(percentile) = upper.strip_suffix("PERCENTILE") {
				percentile.parse::<f64>().map(|p| p > 0.0 && p < 100.0).unwrap_or(false)
			} else if let Some(millis) = upper.strip_suffix("MS") {
				millis.parse::<f64>().map(|ms| ms >= 0.0).unwrap_or(false)
			} else {
				false
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{KW_COMMENT, KW_COMPRESSION, PropertyValue, TableProperties};
	use crate::{
		error::CatalogError,
		schema::{CompressionCodec, SchemaBuilder},
	};

	#[test]
	fn test_last_write_wins() {
		let properties = TableProperties::new()
			.with_property(KW_COMMENT, "first")
			.with_property("COMMENT", "second");
		assert_eq!(properties.get(KW_COMMENT), Some(&PropertyValue::from("second")));
	}

	#[test]
	fn test_has_property_is_case_insensitive() {
		let properties = TableProperties::new().with_property("Compression", [("class", "lz4")]);
		assert!(properties.has_property(KW_COMPRESSION));
		assert!(!properties.has_property(KW_COMMENT));
	}

	#[test]
	fn test_unknown_property() {
		let properties = TableProperties::new().with_property("colour", "blue");
		assert_eq!(
			properties.validate(),
			Err(CatalogError::UnknownProperty {
				property: "colour".to_string()
			})
		);
	}

	#[test]
	fn test_wrong_shape() {
		let properties = TableProperties::new().with_property(KW_COMPRESSION, "lz4");
		assert!(matches!(properties.validate(), Err(CatalogError::InvalidProperty { .. })));

		let properties = TableProperties::new().with_property(KW_COMMENT, [("a", "b")]);
		assert!(matches!(properties.validate(), Err(CatalogError::InvalidProperty { .. })));
	}

	#[test]
	fn test_numeric_validation() {
		for (name, value) in [
			("gc_grace_seconds", "-1"),
			("bloom_filter_fp_chance", "0"),
			("bloom_filter_fp_chance", "1.5"),
			("read_repair_chance", "2"),
			("default_time_to_live", "999999999"),
			("min_index_interval", "0"),
			("speculative_retry", "sometimes"),
		] {
			let properties = TableProperties::new().with_property(name, value);
			assert!(
				matches!(properties.validate(), Err(CatalogError::InvalidProperty { .. })),
				"{} = {} should be rejected",
				name,
				value
			);
		}
	}

	#[test]
	fn test_speculative_retry_forms() {
		for value in ["NONE", "always", "99PERCENTILE", "99.9percentile", "10ms"] {
			let properties = TableProperties::new().with_property("speculative_retry", value);
			assert!(properties.validate().is_ok(), "{} should be accepted", value);
		}
	}

	#[test]
	fn test_apply_to_builder() {
		let properties = TableProperties::new()
			.with_property(KW_COMMENT, "users by id")
			.with_property(KW_COMPRESSION, [("class", "SnappyCompressor")])
			.with_property("gc_grace_seconds", "3600");

		let mut builder = SchemaBuilder::new("ks", "users");
		builder.with_column("id", tessera_type::Type::Uuid, crate::ColumnKind::PartitionKey).unwrap();
		properties.apply_to_builder(&mut builder).unwrap();
		let schema = builder.build().unwrap();

		assert_eq!(schema.params().comment, "users by id");
		assert_eq!(schema.params().compression.codec, CompressionCodec::Snappy);
		assert_eq!(schema.params().gc_grace_seconds, 3600);
	}

	#[test]
	fn test_apply_is_all_or_nothing() {
		let properties = TableProperties::new()
			.with_property(KW_COMMENT, "kept out")
			.with_property("gc_grace_seconds", "soon");

		let mut builder = SchemaBuilder::new("ks", "users");
		builder.with_column("id", tessera_type::Type::Uuid, crate::ColumnKind::PartitionKey).unwrap();
		assert!(properties.apply_to_builder(&mut builder).is_err());

		let schema = builder.build().unwrap();
		assert_eq!(schema.params().comment, "");
	}
}
