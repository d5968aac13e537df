// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::Diagnostic;

use crate::{error::CatalogObjectKind, schema::ColumnKind};

pub fn already_exists(kind: CatalogObjectKind, name: &str) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_001".to_string(),
		statement: None,
		message: format!("{} `{}` already exists", kind, name),
		label: Some(format!("duplicate {} definition", kind)),
		help: Some(format!("choose a different name or use `IF NOT EXISTS` to skip creating the {}", kind)),
		notes: vec![],
		cause: None,
	}
}

/// Recovers `(keyspace, table)` from a diagnostic built by
/// [`already_exists`] for a qualified table name.
pub fn already_existing_table(diagnostic: &Diagnostic) -> Option<(String, String)> {
	if diagnostic.code != "CATALOG_001" {
		return None;
	}
	let name = diagnostic
		.message
		.strip_prefix(&format!("{} `", CatalogObjectKind::Table))?
		.strip_suffix("` already exists")?;
	let (keyspace, table) = name.split_once('.')?;
	Some((keyspace.to_string(), table.to_string()))
}

pub fn not_found(kind: CatalogObjectKind, name: &str) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_002".to_string(),
		statement: None,
		message: format!("{} `{}` not found", kind, name),
		label: Some(format!("unknown {} reference", kind)),
		help: Some(format!("make sure the {} exists before referencing it", kind)),
		notes: vec![],
		cause: None,
	}
}

/// Unqualified name used while the session has no current keyspace.
pub fn keyspace_not_specified(table: &str) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_002".to_string(),
		statement: None,
		message: format!("no keyspace specified for table `{}` and no current keyspace set", table),
		label: Some("unqualified table name".to_string()),
		help: Some("qualify the table name as `keyspace.table` or select a keyspace first".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn duplicate_column(table: &str, column: &str) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_003".to_string(),
		statement: None,
		message: format!("column `{}` is defined more than once in table `{}`", column, table),
		label: Some("duplicate column definition".to_string()),
		help: Some("each column name must be unique within a table".to_string()),
		notes: vec!["key aliases share the namespace of regular and static columns".to_string()],
		cause: None,
	}
}

pub fn missing_partition_key(table: &str) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_004".to_string(),
		statement: None,
		message: format!("table `{}` declares no partition key", table),
		label: Some("invalid schema".to_string()),
		help: Some("declare at least one PRIMARY KEY column".to_string()),
		notes: vec!["the first PRIMARY KEY component is the partition key".to_string()],
		cause: None,
	}
}

pub fn invalid_property(property: &str, reason: &str) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_005".to_string(),
		statement: None,
		message: format!("invalid value for table property `{}`: {}", property, reason),
		label: Some("invalid schema".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn unknown_property(property: &str) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_006".to_string(),
		statement: None,
		message: format!("unknown table property `{}`", property),
		label: Some("not a recognized table option".to_string()),
		help: Some(
			"supported options: comment, compression, compaction, caching, gc_grace_seconds, default_time_to_live, bloom_filter_fp_chance, min_index_interval, max_index_interval, memtable_flush_period_in_ms, speculative_retry, read_repair_chance"
				.to_string(),
		),
		notes: vec![],
		cause: None,
	}
}

pub fn duplicate_component_index(table: &str, kind: ColumnKind, index: u32) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_007".to_string(),
		statement: None,
		message: format!("{} component {} is declared more than once in table `{}`", kind, index, table),
		label: Some("conflicting key position".to_string()),
		help: Some("give every key component of a kind a distinct index".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn key_type_mismatch(table: &str, kind: ColumnKind, reason: &str) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_008".to_string(),
		statement: None,
		message: format!("{} columns of table `{}` do not match the declared key type: {}", kind, table, reason),
		label: Some("invalid schema".to_string()),
		help: Some("key aliases bind positionally to the components of the declared key type".to_string()),
		notes: vec![],
		cause: None,
	}
}
