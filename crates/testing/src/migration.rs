// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use tessera_core::{AnnounceError, MigrationManager, Schema};
use tessera_type::Error;

/// What the next announcement resolves to.
#[derive(Debug, Clone)]
pub enum Outcome {
	Accept,
	AlreadyExists,
	Fail(Error),
}

#[derive(Debug, Default)]
struct State {
	script: VecDeque<Outcome>,
	announced: Vec<(Arc<Schema>, bool)>,
}

/// Migration manager answering from a script instead of a catalog.
///
/// Each announcement pops the next [`Outcome`]; once the script runs out
/// every announcement is accepted. All calls are recorded, whatever their
/// outcome.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMigrationManager {
	state: Arc<Mutex<State>>,
}

impl ScriptedMigrationManager {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn then(self, outcome: Outcome) -> Self {
		self.state.lock().script.push_back(outcome);
		self
	}

	pub fn then_accept(self) -> Self {
		self.then(Outcome::Accept)
	}

	pub fn then_already_exists(self) -> Self {
		self.then(Outcome::AlreadyExists)
	}

	pub fn then_fail(self, err: impl Into<Error>) -> Self {
		self.then(Outcome::Fail(err.into()))
	}

	/// Every schema announced so far with its `is_local_only` flag.
	pub fn announced(&self) -> Vec<(Arc<Schema>, bool)> {
		self.state.lock().announced.clone()
	}

	pub fn calls(&self) -> usize {
		self.state.lock().announced.len()
	}

	pub fn last_announced(&self) -> Option<Arc<Schema>> {
		self.state.lock().announced.last().map(|(schema, _)| schema.clone())
	}
}

#[async_trait]
impl MigrationManager for ScriptedMigrationManager {
	async fn announce_new_schema(&self, schema: Arc<Schema>, is_local_only: bool) -> Result<(), AnnounceError> {
		let outcome = {
			let mut state = self.state.lock();
			state.announced.push((schema.clone(), is_local_only));
			state.script.pop_front().unwrap_or(Outcome::Accept)
		};

		match outcome {
			Outcome::Accept => Ok(()),
			Outcome::AlreadyExists => Err(AnnounceError::already_exists(schema.keyspace(), schema.table())),
			Outcome::Fail(err) => Err(AnnounceError::Failed(err)),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use tessera_core::{AnnounceError, CatalogError, ColumnKind, MigrationManager, Schema, SchemaBuilder, Type};

	use super::ScriptedMigrationManager;

	fn schema() -> Arc<Schema> {
		let mut builder = SchemaBuilder::new("ks", "t");
		builder.with_column("id", Type::Int8, ColumnKind::PartitionKey).unwrap();
		Arc::new(builder.build().unwrap())
	}

	#[tokio::test]
	async fn test_script_then_accept() {
		let manager = ScriptedMigrationManager::new()
			.then_already_exists()
			.then_fail(CatalogError::keyspace_not_found("ks"));

		assert!(manager.announce_new_schema(schema(), false).await.unwrap_err().is_already_exists());
		match manager.announce_new_schema(schema(), true).await.unwrap_err() {
			AnnounceError::Failed(err) => assert_eq!(err.code, "CATALOG_002"),
			other => panic!("unexpected {other:?}"),
		}
		manager.announce_new_schema(schema(), false).await.unwrap();

		let flags: Vec<bool> = manager.announced().into_iter().map(|(_, local)| local).collect();
		assert_eq!(flags, vec![false, true, false]);
		assert_eq!(manager.calls(), 3);
	}
}
