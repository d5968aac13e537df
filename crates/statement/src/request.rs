// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashSet,
	fmt::{Display, Formatter},
};

use indexmap::IndexMap;
use tessera_core::{
	ClientState, ColumnIdentifier, KeyType, TableProperties, Type, error::diagnostic::catalog::keyspace_not_specified,
};
use tessera_type::{Result, return_error};

/// Possibly unqualified `keyspace.table` name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CfName {
	pub keyspace: Option<String>,
	pub table: String,
}

impl CfName {
	pub fn new(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			keyspace: Some(keyspace.into()),
			table: table.into(),
		}
	}

	pub fn unqualified(table: impl Into<String>) -> Self {
		Self {
			keyspace: None,
			table: table.into(),
		}
	}

	/// The explicit keyspace, else the session's current keyspace.
	pub fn resolve_keyspace(&self, state: &ClientState) -> Result<String> {
		match (&self.keyspace, state.keyspace()) {
			(Some(keyspace), _) => Ok(keyspace.clone()),
			(None, Some(keyspace)) => Ok(keyspace.to_string()),
			(None, None) => return_error!(keyspace_not_specified(&self.table)),
		}
	}
}

impl Display for CfName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.keyspace {
			Some(keyspace) => write!(f, "{}.{}", keyspace, self.table),
			None => f.write_str(&self.table),
		}
	}
}

/// Parsed `CREATE TABLE` ready for execution.
#[derive(Debug, Clone)]
pub struct CreateTableRequest {
	pub name: CfName,
	pub properties: TableProperties,
	pub if_not_exists: bool,
	pub static_columns: HashSet<ColumnIdentifier>,
	/// Non-key columns in declaration order.
	pub columns: IndexMap<ColumnIdentifier, Type>,
	pub key_aliases: Vec<ColumnIdentifier>,
	pub key_validator: KeyType,
	pub column_aliases: Vec<ColumnIdentifier>,
	pub comparator: Option<KeyType>,
	pub value_alias: Option<ColumnIdentifier>,
	pub default_validator: Type,
}

impl CreateTableRequest {
	pub fn new(name: CfName) -> Self {
		Self {
			name,
			properties: TableProperties::new(),
			if_not_exists: false,
			static_columns: HashSet::new(),
			columns: IndexMap::new(),
			key_aliases: Vec::new(),
			key_validator: KeyType::Scalar(Type::Blob),
			column_aliases: Vec::new(),
			comparator: None,
			value_alias: None,
			default_validator: Type::Blob,
		}
	}

	pub fn if_not_exists(mut self, if_not_exists: bool) -> Self {
		self.if_not_exists = if_not_exists;
		self
	}

	pub fn with_properties(mut self, properties: TableProperties) -> Self {
		self.properties = properties;
		self
	}

	/// Redeclaring a static column this way makes it regular again.
	pub fn with_column(mut self, name: impl Into<ColumnIdentifier>, ty: Type) -> Self {
		let name = name.into();
		self.static_columns.remove(&name);
		self.columns.insert(name, ty);
		self
	}

	pub fn with_static_column(mut self, name: impl Into<ColumnIdentifier>, ty: Type) -> Self {
		let name = name.into();
		self.static_columns.insert(name.clone());
		self.columns.insert(name, ty);
		self
	}

	/// Partition key aliases bound positionally to the components of
	/// `key_validator`.
	pub fn with_partition_key<I, N>(mut self, aliases: I, key_validator: KeyType) -> Self
	where
		I: IntoIterator<Item = N>,
		N: Into<ColumnIdentifier>,
	{
		self.key_aliases = aliases.into_iter().map(Into::into).collect();
		self.key_validator = key_validator;
		self
	}

	/// Clustering aliases bound positionally to the components of
	/// `comparator`.
	pub fn with_clustering<I, N>(mut self, aliases: I, comparator: KeyType) -> Self
	where
		I: IntoIterator<Item = N>,
		N: Into<ColumnIdentifier>,
	{
		self.column_aliases = aliases.into_iter().map(Into::into).collect();
		self.comparator = Some(comparator);
		self
	}

	pub fn with_value_alias(mut self, alias: impl Into<ColumnIdentifier>) -> Self {
		self.value_alias = Some(alias.into());
		self
	}

	pub fn with_default_validator(mut self, ty: Type) -> Self {
		self.default_validator = ty;
		self
	}
}

#[cfg(test)]
mod tests {
	use tessera_core::{ClientState, ColumnIdentifier, Identity, Type};

	use super::{CfName, CreateTableRequest};

	#[test]
	fn test_resolve_keyspace() {
		let session = ClientState::new(Identity::root()).with_keyspace("current");

		assert_eq!(CfName::new("ks", "t").resolve_keyspace(&session).unwrap(), "ks");
		assert_eq!(CfName::unqualified("t").resolve_keyspace(&session).unwrap(), "current");

		let err = CfName::unqualified("t").resolve_keyspace(&ClientState::new(Identity::root())).unwrap_err();
		assert_eq!(err.code, "CATALOG_002");
	}

	#[test]
	fn test_display() {
		assert_eq!(CfName::new("ks", "t").to_string(), "ks.t");
		assert_eq!(CfName::unqualified("t").to_string(), "t");
	}

	#[test]
	fn test_redeclared_column_is_no_longer_static() {
		let request = CreateTableRequest::new(CfName::new("ks", "t"))
			.with_static_column("x", Type::Int4)
			.with_column("x", Type::Utf8);

		assert!(!request.static_columns.contains(&ColumnIdentifier::from("x")));
		assert_eq!(request.columns.get(&ColumnIdentifier::from("x")), Some(&Type::Utf8));
	}
}
