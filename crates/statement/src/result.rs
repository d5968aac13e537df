// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_core::SchemaChangeEvent;

/// Outcome of executing a schema-altering statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementResult {
	/// The schema changed; the event is for the caller to publish.
	SchemaChange(SchemaChangeEvent),
	/// Nothing changed, e.g. `IF NOT EXISTS` on an existing table.
	Void,
}

impl StatementResult {
	pub fn is_schema_change(&self) -> bool {
		matches!(self, StatementResult::SchemaChange(_))
	}

	pub fn into_event(self) -> Option<SchemaChangeEvent> {
		match self {
			StatementResult::SchemaChange(event) => Some(event),
			StatementResult::Void => None,
		}
	}
}
