// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tessera_type::Type;
use uuid::Uuid;

use crate::schema::{ColumnDefinition, ColumnKind, KeyType, TableParams};

#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaId(pub Uuid);

impl SchemaId {
	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Display for SchemaId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Time ordered, so later versions compare greater.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion(pub Uuid);

impl SchemaVersion {
	pub fn generate() -> Self {
		Self(Uuid::now_v7())
	}
}

impl Display for SchemaVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Immutable description of a table. Built once by
/// [`SchemaBuilder`](crate::schema::SchemaBuilder); later alterations
/// replace it wholesale with a new version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
	pub(crate) id: SchemaId,
	pub(crate) version: SchemaVersion,
	pub(crate) keyspace: String,
	pub(crate) table: String,
	pub(crate) columns: Vec<ColumnDefinition>,
	pub(crate) params: TableParams,
	pub(crate) key_validator: KeyType,
	pub(crate) comparator: Option<KeyType>,
	pub(crate) default_validator: Type,
}

impl Schema {
	pub fn id(&self) -> SchemaId {
		self.id
	}

	pub fn version(&self) -> SchemaVersion {
		self.version
	}

	pub fn keyspace(&self) -> &str {
		&self.keyspace
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	/// Partition key, then clustering columns, then the rest in
	/// declaration order.
	pub fn columns(&self) -> &[ColumnDefinition] {
		&self.columns
	}

	pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
		self.columns.iter().find(|c| c.name() == name)
	}

	pub fn params(&self) -> &TableParams {
		&self.params
	}

	pub fn key_validator(&self) -> &KeyType {
		&self.key_validator
	}

	pub fn comparator(&self) -> Option<&KeyType> {
		self.comparator.as_ref()
	}

	pub fn default_validator(&self) -> Type {
		self.default_validator
	}

	pub fn partition_key_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
		self.columns_of(ColumnKind::PartitionKey)
	}

	pub fn clustering_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
		self.columns_of(ColumnKind::ClusteringColumn)
	}

	pub fn static_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
		self.columns_of(ColumnKind::StaticColumn)
	}

	pub fn regular_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
		self.columns_of(ColumnKind::RegularColumn)
	}

	pub fn compact_value_column(&self) -> Option<&ColumnDefinition> {
		self.columns_of(ColumnKind::CompactValue).next()
	}

	fn columns_of(&self, kind: ColumnKind) -> impl Iterator<Item = &ColumnDefinition> {
		self.columns.iter().filter(move |c| c.kind == kind)
	}
}

impl Display for Schema {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{} ({})", self.keyspace, self.table, self.version)
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::Type;

	use crate::schema::{ColumnKind, SchemaBuilder, table::SchemaVersion};

	#[test]
	fn test_lookups() {
		let mut builder = SchemaBuilder::new("ks", "events");
		builder.with_column("day", Type::Date, ColumnKind::PartitionKey)
			.unwrap()
			.with_column("at", Type::DateTime, ColumnKind::ClusteringColumn)
			.unwrap()
			.with_column("source", Type::Utf8, ColumnKind::StaticColumn)
			.unwrap()
			.with_column("payload", Type::Blob, ColumnKind::RegularColumn)
			.unwrap();
		let schema = builder.build().unwrap();

		assert_eq!(schema.keyspace(), "ks");
		assert_eq!(schema.table(), "events");
		assert_eq!(schema.column("source").map(|c| c.kind), Some(ColumnKind::StaticColumn));
		assert!(schema.column("missing").is_none());
		assert_eq!(schema.partition_key_columns().count(), 1);
		assert_eq!(schema.clustering_columns().count(), 1);
		assert_eq!(schema.static_columns().count(), 1);
		assert_eq!(schema.regular_columns().count(), 1);
		assert!(schema.compact_value_column().is_none());
	}

	#[test]
	fn test_versions_are_ordered() {
		let first = SchemaVersion::generate();
		let second = SchemaVersion::generate();
		assert!(first < second);
	}
}
