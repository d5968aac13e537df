// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tessera_type::Type;

use crate::schema::{ColumnDefinition, ColumnIdentifier, ColumnKind};

/// Type of a partition or clustering key, either a single value or a
/// composite of ordered components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
	Scalar(Type),
	Composite(Vec<Type>),
}

impl KeyType {
	/// `None` for an empty component list.
	pub fn from_components(mut components: Vec<Type>) -> Option<Self> {
		match components.len() {
			0 => None,
			1 => components.pop().map(KeyType::Scalar),
			_ => Some(KeyType::Composite(components)),
		}
	}

	pub fn components(&self) -> &[Type] {
		match self {
			KeyType::Scalar(ty) => std::slice::from_ref(ty),
			KeyType::Composite(types) => types,
		}
	}

	pub fn is_composite(&self) -> bool {
		matches!(self, KeyType::Composite(_))
	}

	/// Binds alias `i` to component `i` of this key type.
	///
	/// # Panics
	///
	/// Supplying more aliases than the key type has components is an
	/// invariant violation of the caller, not a user error.
	pub fn decompose(&self, aliases: &[ColumnIdentifier], kind: ColumnKind) -> Vec<ColumnDefinition> {
		let components = self.components();
		assert!(
			aliases.len() <= components.len(),
			"{} {} alias(es) supplied for key type `{}` with {} component(s)",
			aliases.len(),
			kind,
			self,
			components.len()
		);

		aliases.iter()
			.zip(components)
			.enumerate()
			.map(|(index, (alias, ty))| {
				let column = ColumnDefinition::new(alias.clone(), *ty, kind);
				if kind.is_primary_key() {
					column.with_component_index(index as u32)
				} else {
					column
				}
			})
			.collect()
	}
}

impl Display for KeyType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			KeyType::Scalar(ty) => write!(f, "{}", ty),
			KeyType::Composite(types) => {
				let parts: Vec<String> = types.iter().map(|t| t.to_string()).collect();
				write!(f, "composite({})", parts.join(", "))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::Type;

	use super::KeyType;
	use crate::schema::{ColumnIdentifier, ColumnKind};

	fn aliases(names: &[&str]) -> Vec<ColumnIdentifier> {
		names.iter().map(|n| ColumnIdentifier::from(*n)).collect()
	}

	#[test]
	fn test_from_components() {
		assert_eq!(KeyType::from_components(vec![]), None);
		assert_eq!(KeyType::from_components(vec![Type::Int4]), Some(KeyType::Scalar(Type::Int4)));
		assert_eq!(
			KeyType::from_components(vec![Type::Int4, Type::Utf8]),
			Some(KeyType::Composite(vec![Type::Int4, Type::Utf8]))
		);
	}

	#[test]
	fn test_scalar_single_alias() {
		let columns = KeyType::Scalar(Type::Uuid).decompose(&aliases(&["id"]), ColumnKind::PartitionKey);
		assert_eq!(columns.len(), 1);
		assert_eq!(columns[0].name(), "id");
		assert_eq!(columns[0].ty, Type::Uuid);
		assert_eq!(columns[0].kind, ColumnKind::PartitionKey);
	}

	#[test]
	fn test_scalar_no_alias() {
		let columns = KeyType::Scalar(Type::Uuid).decompose(&[], ColumnKind::PartitionKey);
		assert!(columns.is_empty());
	}

	#[test]
	#[should_panic(expected = "alias(es) supplied")]
	fn test_scalar_two_aliases_panics() {
		KeyType::Scalar(Type::Uuid).decompose(&aliases(&["a", "b"]), ColumnKind::PartitionKey);
	}

	#[test]
	fn test_composite_maps_by_position() {
		let key = KeyType::Composite(vec![Type::Int4, Type::Utf8, Type::DateTime]);
		let columns = key.decompose(&aliases(&["bucket", "name"]), ColumnKind::ClusteringColumn);

		assert_eq!(columns.len(), 2);
		assert_eq!(columns[0].name(), "bucket");
		assert_eq!(columns[0].ty, Type::Int4);
		assert_eq!(columns[0].component_index, Some(0));
		assert_eq!(columns[1].name(), "name");
		assert_eq!(columns[1].ty, Type::Utf8);
		assert_eq!(columns[1].component_index, Some(1));
	}

	#[test]
	#[should_panic]
	fn test_composite_too_many_aliases_panics() {
		KeyType::Composite(vec![Type::Int4, Type::Utf8])
			.decompose(&aliases(&["a", "b", "c"]), ColumnKind::PartitionKey);
	}

	#[test]
	fn test_display() {
		assert_eq!(KeyType::Scalar(Type::Int8).to_string(), "bigint");
		assert_eq!(KeyType::Composite(vec![Type::Int8, Type::Utf8]).to_string(), "composite(bigint, text)");
	}
}
