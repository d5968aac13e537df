// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	borrow::Borrow,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};
use tessera_type::Type;

/// Name of a column, unique within its table.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnIdentifier(String);

impl ColumnIdentifier {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	pub fn name(&self) -> &str {
		&self.0
	}
}

impl Display for ColumnIdentifier {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for ColumnIdentifier {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for ColumnIdentifier {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<String> for ColumnIdentifier {
	fn from(value: String) -> Self {
		Self(value)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
	PartitionKey,
	ClusteringColumn,
	StaticColumn,
	RegularColumn,
	CompactValue,
}

impl ColumnKind {
	pub fn is_primary_key(&self) -> bool {
		matches!(self, ColumnKind::PartitionKey | ColumnKind::ClusteringColumn)
	}
}

impl Display for ColumnKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ColumnKind::PartitionKey => f.write_str("partition_key"),
			ColumnKind::ClusteringColumn => f.write_str("clustering"),
			ColumnKind::StaticColumn => f.write_str("static"),
			ColumnKind::RegularColumn => f.write_str("regular"),
			ColumnKind::CompactValue => f.write_str("compact_value"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
	pub name: ColumnIdentifier,
	pub ty: Type,
	pub kind: ColumnKind,
	/// Position inside the partition or clustering key.
	pub component_index: Option<u32>,
}

impl ColumnDefinition {
	pub fn new(name: impl Into<ColumnIdentifier>, ty: Type, kind: ColumnKind) -> Self {
		Self {
			name: name.into(),
			ty,
			kind,
			component_index: None,
		}
	}

	pub fn with_component_index(mut self, index: u32) -> Self {
		self.component_index = Some(index);
		self
	}

	pub fn name(&self) -> &str {
		self.name.name()
	}

	pub fn is_partition_key(&self) -> bool {
		self.kind == ColumnKind::PartitionKey
	}

	pub fn is_clustering(&self) -> bool {
		self.kind == ColumnKind::ClusteringColumn
	}

	pub fn is_static(&self) -> bool {
		self.kind == ColumnKind::StaticColumn
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use tessera_type::Type;

	use super::{ColumnDefinition, ColumnIdentifier, ColumnKind};

	#[test]
	fn test_identifier_set_lookup_by_str() {
		let set: HashSet<ColumnIdentifier> = ["a", "b"].into_iter().map(ColumnIdentifier::from).collect();
		assert!(set.contains("a"));
		assert!(!set.contains("c"));
	}

	#[test]
	fn test_definition_flags() {
		let pk = ColumnDefinition::new("id", Type::Uuid, ColumnKind::PartitionKey).with_component_index(0);
		assert!(pk.is_partition_key());
		assert!(pk.kind.is_primary_key());
		assert_eq!(pk.component_index, Some(0));

		let st = ColumnDefinition::new("tag", Type::Utf8, ColumnKind::StaticColumn);
		assert!(st.is_static());
		assert!(!st.kind.is_primary_key());
		assert_eq!(st.name(), "tag");
	}
}
