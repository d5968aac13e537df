// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::event::{Tagged, TaggedEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
	Created,
	Updated,
	Dropped,
}

impl Display for ChangeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ChangeType::Created => f.write_str("CREATED"),
			ChangeType::Updated => f.write_str("UPDATED"),
			ChangeType::Dropped => f.write_str("DROPPED"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
	Keyspace,
	Table,
	Type,
}

impl Display for TargetType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			TargetType::Keyspace => f.write_str("KEYSPACE"),
			TargetType::Table => f.write_str("TABLE"),
			TargetType::Type => f.write_str("TYPE"),
		}
	}
}

/// The object a schema change applies to. `table` is absent for
/// keyspace-level changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaTarget {
	pub keyspace: String,
	pub table: Option<String>,
}

impl Display for SchemaTarget {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.table {
			Some(table) => write!(f, "{}.{}", self.keyspace, table),
			None => f.write_str(&self.keyspace),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaChange {
	pub change: ChangeType,
	pub target: TargetType,
}

impl Tagged for SchemaChange {
	type Kind = ChangeType;
	type Key = SchemaTarget;

	fn kind(&self) -> ChangeType {
		self.change
	}
}

pub type SchemaChangeEvent = TaggedEvent<SchemaChange>;

impl TaggedEvent<SchemaChange> {
	pub fn table_created(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
		Self::table_change(ChangeType::Created, keyspace, table)
	}

	pub fn table_change(change: ChangeType, keyspace: impl Into<String>, table: impl Into<String>) -> Self {
		TaggedEvent::new(
			SchemaTarget {
				keyspace: keyspace.into(),
				table: Some(table.into()),
			},
			SchemaChange {
				change,
				target: TargetType::Table,
			},
		)
	}

	pub fn keyspace_change(change: ChangeType, keyspace: impl Into<String>) -> Self {
		TaggedEvent::new(
			SchemaTarget {
				keyspace: keyspace.into(),
				table: None,
			},
			SchemaChange {
				change,
				target: TargetType::Keyspace,
			},
		)
	}

	pub fn change_type(&self) -> ChangeType {
		self.payload().change
	}

	pub fn target_type(&self) -> TargetType {
		self.payload().target
	}

	pub fn keyspace(&self) -> &str {
		&self.key().keyspace
	}

	pub fn table(&self) -> Option<&str> {
		self.key().table.as_deref()
	}
}

impl Display for TaggedEvent<SchemaChange> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {} {}", self.change_type(), self.target_type(), self.key())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_table_created() {
		let event = SchemaChangeEvent::table_created("ks", "users");
		assert_eq!(event.change_type(), ChangeType::Created);
		assert_eq!(event.kind(), ChangeType::Created);
		assert_eq!(event.target_type(), TargetType::Table);
		assert_eq!(event.keyspace(), "ks");
		assert_eq!(event.table(), Some("users"));
		assert_eq!(event.to_string(), "CREATED TABLE ks.users");
	}

	#[test]
	fn test_keyspace_change_has_no_table() {
		let event = SchemaChangeEvent::keyspace_change(ChangeType::Dropped, "ks");
		assert_eq!(event.target_type(), TargetType::Keyspace);
		assert_eq!(event.table(), None);
		assert_eq!(event.to_string(), "DROPPED KEYSPACE ks");
	}
}
