// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod builder;
mod column;
mod key;
mod params;
mod property;
mod table;

pub use builder::SchemaBuilder;
pub use column::{ColumnDefinition, ColumnIdentifier, ColumnKind};
pub use key::KeyType;
pub use params::{
	CachingParameters, CompactionParameters, CompactionStrategy, CompressionCodec, CompressionParameters,
	KeysCaching, RowsCaching, TableParams,
};
pub use property::{
	KW_BLOOM_FILTER_FP_CHANCE, KW_CACHING, KW_COMMENT, KW_COMPACTION, KW_COMPRESSION, KW_DEFAULT_TIME_TO_LIVE,
	KW_GC_GRACE_SECONDS, KW_MAX_INDEX_INTERVAL, KW_MEMTABLE_FLUSH_PERIOD, KW_MIN_INDEX_INTERVAL,
	KW_READ_REPAIR_CHANCE, KW_SPECULATIVE_RETRY, PropertyValue, TableOption, TableProperties,
};
pub use table::{Schema, SchemaId, SchemaVersion};
