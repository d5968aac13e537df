// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::Type;
use tracing::trace;

use crate::{
	error::CatalogError,
	schema::{
		ColumnDefinition, ColumnIdentifier, ColumnKind, KeyType, Schema, TableOption, TableParams,
		params::{CachingParameters, CompactionParameters, CompressionParameters},
		table::{SchemaId, SchemaVersion},
	},
};

/// Accumulates column definitions and table options, then produces an
/// immutable [`Schema`].
///
/// Options left unset fall back to [`TableParams::default`] at build time.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
	keyspace: String,
	table: String,
	columns: Vec<ColumnDefinition>,
	key_validator: Option<KeyType>,
	comparator: Option<KeyType>,
	default_validator: Option<Type>,
	comment: Option<String>,
	compression: Option<CompressionParameters>,
	compaction: Option<CompactionParameters>,
	caching: Option<CachingParameters>,
	gc_grace_seconds: Option<u32>,
	default_time_to_live: Option<u32>,
	bloom_filter_fp_chance: Option<f64>,
	min_index_interval: Option<u32>,
	max_index_interval: Option<u32>,
	memtable_flush_period_in_ms: Option<u32>,
	speculative_retry: Option<String>,
	read_repair_chance: Option<f64>,
}

impl SchemaBuilder {
	pub fn new(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			keyspace: keyspace.into(),
			table: table.into(),
			columns: Vec::new(),
			key_validator: None,
			comparator: None,
			default_validator: None,
			comment: None,
			compression: None,
			compaction: None,
			caching: None,
			gc_grace_seconds: None,
			default_time_to_live: None,
			bloom_filter_fp_chance: None,
			min_index_interval: None,
			max_index_interval: None,
			memtable_flush_period_in_ms: None,
			speculative_retry: None,
			read_repair_chance: None,
		}
	}

	pub fn keyspace(&self) -> &str {
		&self.keyspace
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	pub fn has_column(&self, name: &str) -> bool {
		self.columns.iter().any(|c| c.name() == name)
	}

	pub fn with_column(
		&mut self,
		name: impl Into<ColumnIdentifier>,
		ty: Type,
		kind: ColumnKind,
	) -> Result<&mut Self, CatalogError> {
		self.with_column_definition(ColumnDefinition::new(name, ty, kind))
	}

	/// Key columns without an explicit component index are appended after
	/// the highest component of their kind. Two components of one kind may
	/// not share an index.
	pub fn with_column_definition(&mut self, mut column: ColumnDefinition) -> Result<&mut Self, CatalogError> {
		if self.has_column(column.name()) {
			return Err(CatalogError::DuplicateColumn {
				keyspace: self.keyspace.clone(),
				table: self.table.clone(),
				column: column.name.to_string(),
			});
		}

		if column.kind.is_primary_key() {
			let taken: Vec<u32> =
				self.columns.iter().filter(|c| c.kind == column.kind).filter_map(|c| c.component_index).collect();
			match column.component_index {
				Some(index) if taken.contains(&index) => {
					return Err(CatalogError::DuplicateComponentIndex {
						keyspace: self.keyspace.clone(),
						table: self.table.clone(),
						kind: column.kind,
						index,
					});
				}
				Some(_) => {}
				None => column.component_index = Some(taken.iter().max().map_or(0, |max| max + 1)),
			}
		}

		trace!(column = column.name(), kind = %column.kind, ty = %column.ty, "schema builder column");
		self.columns.push(column);
		Ok(self)
	}

	/// Declared partition key type. Partition key columns bind to a prefix
	/// of its components; without it the key type is derived from them.
	pub fn with_key_validator(&mut self, key_type: KeyType) -> &mut Self {
		self.key_validator = Some(key_type);
		self
	}

	/// Declared clustering type, bound like [`Self::with_key_validator`].
	pub fn with_comparator(&mut self, key_type: KeyType) -> &mut Self {
		self.comparator = Some(key_type);
		self
	}

	pub fn with_default_validator(&mut self, ty: Type) -> &mut Self {
		self.default_validator = Some(ty);
		self
	}

	pub fn with_comment(&mut self, comment: impl Into<String>) -> &mut Self {
		self.comment = Some(comment.into());
		self
	}

	pub fn with_compression(&mut self, compression: CompressionParameters) -> &mut Self {
		self.compression = Some(compression);
		self
	}

	pub fn with_compaction(&mut self, compaction: CompactionParameters) -> &mut Self {
		self.compaction = Some(compaction);
		self
	}

	pub fn with_caching(&mut self, caching: CachingParameters) -> &mut Self {
		self.caching = Some(caching);
		self
	}

	pub fn with_gc_grace_seconds(&mut self, seconds: u32) -> &mut Self {
		self.gc_grace_seconds = Some(seconds);
		self
	}

	pub fn with_default_time_to_live(&mut self, seconds: u32) -> &mut Self {
		self.default_time_to_live = Some(seconds);
		self
	}

	pub fn with_bloom_filter_fp_chance(&mut self, chance: f64) -> &mut Self {
		self.bloom_filter_fp_chance = Some(chance);
		self
	}

	pub fn with_index_interval(&mut self, min: u32, max: u32) -> &mut Self {
		self.min_index_interval = Some(min);
		self.max_index_interval = Some(max);
		self
	}

	pub fn with_memtable_flush_period(&mut self, millis: u32) -> &mut Self {
		self.memtable_flush_period_in_ms = Some(millis);
		self
	}

	pub fn with_speculative_retry(&mut self, retry: impl Into<String>) -> &mut Self {
		self.speculative_retry = Some(retry.into());
		self
	}

	pub fn with_read_repair_chance(&mut self, chance: f64) -> &mut Self {
		self.read_repair_chance = Some(chance);
		self
	}

	pub fn with_option(&mut self, option: TableOption) -> &mut Self {
		match option {
			TableOption::Comment(comment) => self.with_comment(comment),
			TableOption::Compression(compression) => self.with_compression(compression),
			TableOption::Compaction(compaction) => self.with_compaction(compaction),
			TableOption::Caching(caching) => self.with_caching(caching),
			TableOption::GcGraceSeconds(seconds) => self.with_gc_grace_seconds(seconds),
			TableOption::DefaultTimeToLive(seconds) => self.with_default_time_to_live(seconds),
			TableOption::BloomFilterFpChance(chance) => self.with_bloom_filter_fp_chance(chance),
			TableOption::MinIndexInterval(min) => {
				self.min_index_interval = Some(min);
				self
			}
			TableOption::MaxIndexInterval(max) => {
				self.max_index_interval = Some(max);
				self
			}
			TableOption::MemtableFlushPeriod(millis) => self.with_memtable_flush_period(millis),
			TableOption::SpeculativeRetry(retry) => self.with_speculative_retry(retry),
			TableOption::ReadRepairChance(chance) => self.with_read_repair_chance(chance),
		}
	}

	pub fn build(self) -> Result<Schema, CatalogError> {
		let mut partition_key: Vec<ColumnDefinition> =
			self.columns.iter().filter(|c| c.is_partition_key()).cloned().collect();
		partition_key.sort_by_key(|c| c.component_index);

		if partition_key.is_empty() {
			return Err(CatalogError::MissingPartitionKey {
				keyspace: self.keyspace,
				table: self.table,
			});
		}
		let key_validator =
			self.resolve_key_type(self.key_validator.as_ref(), &partition_key, ColumnKind::PartitionKey)?;

		let mut clustering: Vec<ColumnDefinition> =
			self.columns.iter().filter(|c| c.is_clustering()).cloned().collect();
		clustering.sort_by_key(|c| c.component_index);
		let comparator = if clustering.is_empty() {
			self.comparator.clone()
		} else {
			Some(self.resolve_key_type(self.comparator.as_ref(), &clustering, ColumnKind::ClusteringColumn)?)
		};

		let defaults = TableParams::default();
		let params = TableParams {
			comment: self.comment.unwrap_or(defaults.comment),
			compression: self.compression.unwrap_or(defaults.compression),
			compaction: self.compaction.unwrap_or(defaults.compaction),
			caching: self.caching.unwrap_or(defaults.caching),
			gc_grace_seconds: self.gc_grace_seconds.unwrap_or(defaults.gc_grace_seconds),
			default_time_to_live: self.default_time_to_live.unwrap_or(defaults.default_time_to_live),
			bloom_filter_fp_chance: self.bloom_filter_fp_chance.unwrap_or(defaults.bloom_filter_fp_chance),
			min_index_interval: self.min_index_interval.unwrap_or(defaults.min_index_interval),
			max_index_interval: self.max_index_interval.unwrap_or(defaults.max_index_interval),
			memtable_flush_period_in_ms: self
				.memtable_flush_period_in_ms
				.unwrap_or(defaults.memtable_flush_period_in_ms),
			speculative_retry: self.speculative_retry.unwrap_or(defaults.speculative_retry),
			read_repair_chance: self.read_repair_chance.unwrap_or(defaults.read_repair_chance),
		};

		if params.min_index_interval > params.max_index_interval {
			return Err(CatalogError::invalid_property(
				"min_index_interval",
				format!(
					"min_index_interval ({}) must not exceed max_index_interval ({})",
					params.min_index_interval, params.max_index_interval
				),
			));
		}

		let default_validator = self
			.default_validator
			.or_else(|| self.columns.iter().find(|c| c.kind == ColumnKind::CompactValue).map(|c| c.ty))
			.unwrap_or(Type::Blob);

		let mut columns = partition_key;
		columns.extend(clustering);
		columns.extend(self.columns.into_iter().filter(|c| !c.kind.is_primary_key()));

		Ok(Schema {
			id: SchemaId::generate(),
			version: SchemaVersion::generate(),
			keyspace: self.keyspace,
			table: self.table,
			columns,
			params,
			key_validator,
			comparator,
			default_validator,
		})
	}

	/// The declared key type when present, checked against the key columns
	/// bound to it; otherwise the type composed from those columns.
	fn resolve_key_type(
		&self,
		declared: Option<&KeyType>,
		columns: &[ColumnDefinition],
		kind: ColumnKind,
	) -> Result<KeyType, CatalogError> {
		let mismatch = |reason: String| CatalogError::KeyTypeMismatch {
			keyspace: self.keyspace.clone(),
			table: self.table.clone(),
			kind,
			reason,
		};

		let Some(declared) = declared else {
			return KeyType::from_components(columns.iter().map(|c| c.ty).collect())
				.ok_or_else(|| mismatch("no key columns".to_string()));
		};

		let components = declared.components();
		for column in columns {
			let index = column.component_index.unwrap_or_default() as usize;
			match components.get(index) {
				Some(ty) if *ty == column.ty => {}
				Some(ty) => {
					return Err(mismatch(format!(
						"column `{}` is {} but component {} is {}",
						column.name(),
						column.ty,
						index,
						ty
					)));
				}
				None => {
					return Err(mismatch(format!(
						"column `{}` is component {} of a key type with {} component(s)",
						column.name(),
						index,
						components.len()
					)));
				}
			}
		}
		Ok(declared.clone())
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::Type;

	use super::SchemaBuilder;
	use crate::{
		error::CatalogError,
		schema::{ColumnDefinition, ColumnKind, CompressionCodec, CompressionParameters, KeyType},
	};

	#[test]
	fn test_build_without_partition_key_fails() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("v", Type::Utf8, ColumnKind::RegularColumn).unwrap();

		assert_eq!(
			builder.build().unwrap_err(),
			CatalogError::MissingPartitionKey {
				keyspace: "ks".to_string(),
				table: "t".to_string()
			}
		);
	}

	#[test]
	fn test_build_empty_fails() {
		assert!(matches!(
			SchemaBuilder::new("ks", "t").build(),
			Err(CatalogError::MissingPartitionKey { .. })
		));
	}

	#[test]
	fn test_duplicate_column() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("id", Type::Int4, ColumnKind::PartitionKey).unwrap();

		let err = builder.with_column("id", Type::Utf8, ColumnKind::RegularColumn).unwrap_err();
		assert_eq!(
			err,
			CatalogError::DuplicateColumn {
				keyspace: "ks".to_string(),
				table: "t".to_string(),
				column: "id".to_string()
			}
		);
	}

	#[test]
	fn test_columns_ordered_by_kind() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("v", Type::Utf8, ColumnKind::RegularColumn)
			.unwrap()
			.with_column("ck", Type::DateTime, ColumnKind::ClusteringColumn)
			.unwrap()
			.with_column("s", Type::Int4, ColumnKind::StaticColumn)
			.unwrap()
			.with_column("pk", Type::Uuid, ColumnKind::PartitionKey)
			.unwrap();

		let schema = builder.build().unwrap();
		let names: Vec<&str> = schema.columns().iter().map(|c| c.name()).collect();
		assert_eq!(names, vec!["pk", "ck", "v", "s"]);
		assert_eq!(schema.key_validator(), &KeyType::Scalar(Type::Uuid));
		assert_eq!(schema.comparator(), Some(&KeyType::Scalar(Type::DateTime)));
	}

	#[test]
	fn test_explicit_component_index_orders_key() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column_definition(
			ColumnDefinition::new("b", Type::Utf8, ColumnKind::PartitionKey).with_component_index(1),
		)
		.unwrap();
		builder.with_column_definition(
			ColumnDefinition::new("a", Type::Int4, ColumnKind::PartitionKey).with_component_index(0),
		)
		.unwrap();

		let schema = builder.build().unwrap();
		let names: Vec<&str> = schema.partition_key_columns().map(|c| c.name()).collect();
		assert_eq!(names, vec!["a", "b"]);
		assert_eq!(schema.key_validator(), &KeyType::Composite(vec![Type::Int4, Type::Utf8]));
	}

	#[test]
	fn test_defaults_apply_when_unset() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("id", Type::Int4, ColumnKind::PartitionKey).unwrap();
		let schema = builder.build().unwrap();

		assert_eq!(schema.params().gc_grace_seconds, 864_000);
		assert!(!schema.params().compression.is_enabled());
		assert_eq!(schema.default_validator(), Type::Blob);
		assert_eq!(schema.comparator(), None);
	}

	#[test]
	fn test_property_last_write_wins() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("id", Type::Int4, ColumnKind::PartitionKey).unwrap();
		builder.with_compression(CompressionParameters::new(CompressionCodec::Lz4))
			.with_compression(CompressionParameters::new(CompressionCodec::Zstd));

		let schema = builder.build().unwrap();
		assert_eq!(schema.params().compression.codec, CompressionCodec::Zstd);
	}

	#[test]
	fn test_index_interval_bounds() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("id", Type::Int4, ColumnKind::PartitionKey).unwrap();
		builder.with_index_interval(4096, 2048);

		assert!(matches!(builder.build(), Err(CatalogError::InvalidProperty { .. })));
	}

	#[test]
	fn test_compact_value_sets_default_validator() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("id", Type::Int4, ColumnKind::PartitionKey)
			.unwrap()
			.with_column("value", Type::Utf8, ColumnKind::CompactValue)
			.unwrap();

		let schema = builder.build().unwrap();
		assert_eq!(schema.default_validator(), Type::Utf8);
		assert_eq!(schema.compact_value_column().map(|c| c.name()), Some("value"));
	}

	#[test]
	fn test_auto_index_follows_highest_explicit_index() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column_definition(
			ColumnDefinition::new("a", Type::Int4, ColumnKind::PartitionKey).with_component_index(1),
		)
		.unwrap();
		builder.with_column("b", Type::Utf8, ColumnKind::PartitionKey).unwrap();
		builder.with_column_definition(
			ColumnDefinition::new("c", Type::Uuid, ColumnKind::PartitionKey).with_component_index(0),
		)
		.unwrap();

		let schema = builder.build().unwrap();
		let indexes: Vec<(&str, Option<u32>)> =
			schema.partition_key_columns().map(|c| (c.name(), c.component_index)).collect();
		assert_eq!(indexes, vec![("c", Some(0)), ("a", Some(1)), ("b", Some(2))]);
	}

	#[test]
	fn test_duplicate_component_index_rejected() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("a", Type::Int4, ColumnKind::PartitionKey).unwrap();

		let err = builder
			.with_column_definition(
				ColumnDefinition::new("b", Type::Utf8, ColumnKind::PartitionKey).with_component_index(0),
			)
			.unwrap_err();
		assert_eq!(
			err,
			CatalogError::DuplicateComponentIndex {
				keyspace: "ks".to_string(),
				table: "t".to_string(),
				kind: ColumnKind::PartitionKey,
				index: 0
			}
		);

		// clustering positions are counted separately
		builder.with_column_definition(
			ColumnDefinition::new("c", Type::Utf8, ColumnKind::ClusteringColumn).with_component_index(0),
		)
		.unwrap();
	}

	#[test]
	fn test_declared_key_validator_survives_partial_aliases() {
		let declared = KeyType::Composite(vec![Type::Int4, Type::Utf8]);
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("a", Type::Int4, ColumnKind::PartitionKey).unwrap();
		builder.with_key_validator(declared.clone());

		let schema = builder.build().unwrap();
		assert_eq!(schema.key_validator(), &declared);
		assert_eq!(schema.partition_key_columns().count(), 1);
	}

	#[test]
	fn test_declared_key_validator_must_match_columns() {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("a", Type::Utf8, ColumnKind::PartitionKey).unwrap();
		builder.with_key_validator(KeyType::Composite(vec![Type::Int4, Type::Utf8]));

		assert!(matches!(
			builder.build(),
			Err(CatalogError::KeyTypeMismatch {
				kind: ColumnKind::PartitionKey,
				..
			})
		));
	}

	#[test]
	fn test_declared_comparator_kept() {
		let declared = KeyType::Composite(vec![Type::DateTime, Type::Int8]);
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("id", Type::Uuid, ColumnKind::PartitionKey)
			.unwrap()
			.with_column("at", Type::DateTime, ColumnKind::ClusteringColumn)
			.unwrap();
		builder.with_comparator(declared.clone());

		let schema = builder.build().unwrap();
		assert_eq!(schema.comparator(), Some(&declared));
	}
}
