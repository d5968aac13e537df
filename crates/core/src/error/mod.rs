// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use tessera_type::{Diagnostic, Error, IntoDiagnostic, error};

use crate::schema::ColumnKind;

pub mod diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogObjectKind {
	Keyspace,
	Table,
	Column,
}

impl Display for CatalogObjectKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			CatalogObjectKind::Keyspace => f.write_str("keyspace"),
			CatalogObjectKind::Table => f.write_str("table"),
			CatalogObjectKind::Column => f.write_str("column"),
		}
	}
}

fn qualified(keyspace: &str, name: &str) -> String {
	if keyspace.is_empty() {
		name.to_string()
	} else {
		format!("{}.{}", keyspace, name)
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
	#[error("{kind} `{}` already exists", qualified(.keyspace, .name))]
	AlreadyExists {
		kind: CatalogObjectKind,
		keyspace: String,
		name: String,
	},

	#[error("{kind} `{}` not found", qualified(.keyspace, .name))]
	NotFound {
		kind: CatalogObjectKind,
		keyspace: String,
		name: String,
	},

	#[error("column `{column}` is defined more than once in `{keyspace}.{table}`")]
	DuplicateColumn {
		keyspace: String,
		table: String,
		column: String,
	},

	#[error("table `{keyspace}.{table}` declares no partition key")]
	MissingPartitionKey {
		keyspace: String,
		table: String,
	},

	#[error("invalid value for property `{property}`: {reason}")]
	InvalidProperty {
		property: String,
		reason: String,
	},

	#[error("unknown property `{property}`")]
	UnknownProperty {
		property: String,
	},

	#[error("{kind} component {index} is declared more than once in `{keyspace}.{table}`")]
	DuplicateComponentIndex {
		keyspace: String,
		table: String,
		kind: ColumnKind,
		index: u32,
	},

	#[error("{kind} columns of `{keyspace}.{table}` do not match the declared key type: {reason}")]
	KeyTypeMismatch {
		keyspace: String,
		table: String,
		kind: ColumnKind,
		reason: String,
	},
}

impl CatalogError {
	pub fn table_already_exists(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
		CatalogError::AlreadyExists {
			kind: CatalogObjectKind::Table,
			keyspace: keyspace.into(),
			name: table.into(),
		}
	}

	pub fn keyspace_not_found(keyspace: impl Into<String>) -> Self {
		CatalogError::NotFound {
			kind: CatalogObjectKind::Keyspace,
			keyspace: String::new(),
			name: keyspace.into(),
		}
	}

	pub fn invalid_property(property: impl Into<String>, reason: impl Into<String>) -> Self {
		CatalogError::InvalidProperty {
			property: property.into(),
			reason: reason.into(),
		}
	}
}

impl IntoDiagnostic for CatalogError {
	fn into_diagnostic(self) -> Diagnostic {
		use diagnostic::catalog;

		match self {
			CatalogError::AlreadyExists {
				kind,
				keyspace,
				name,
			} => catalog::already_exists(kind, &qualified(&keyspace, &name)),
			CatalogError::NotFound {
				kind,
				keyspace,
				name,
			} => catalog::not_found(kind, &qualified(&keyspace, &name)),
			CatalogError::DuplicateColumn {
				keyspace,
				table,
				column,
			} => catalog::duplicate_column(&qualified(&keyspace, &table), &column),
			CatalogError::MissingPartitionKey {
				keyspace,
				table,
			} => catalog::missing_partition_key(&qualified(&keyspace, &table)),
			CatalogError::InvalidProperty {
				property,
				reason,
			} => catalog::invalid_property(&property, &reason),
			CatalogError::UnknownProperty {
				property,
			} => catalog::unknown_property(&property),
			CatalogError::DuplicateComponentIndex {
				keyspace,
				table,
				kind,
				index,
			} => catalog::duplicate_component_index(&qualified(&keyspace, &table), kind, index),
			CatalogError::KeyTypeMismatch {
				keyspace,
				table,
				kind,
				reason,
			} => catalog::key_type_mismatch(&qualified(&keyspace, &table), kind, &reason),
		}
	}
}

impl From<CatalogError> for Error {
	fn from(err: CatalogError) -> Self {
		error!(err.into_diagnostic())
	}
}
