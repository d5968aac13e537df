// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use tessera_type::Error;

use crate::{CatalogError, error::diagnostic::catalog, schema::Schema};

/// Reason an announcement was not applied.
#[derive(Debug, thiserror::Error)]
pub enum AnnounceError {
	#[error("table `{keyspace}.{table}` already exists")]
	AlreadyExists {
		keyspace: String,
		table: String,
	},

	#[error(transparent)]
	Failed(Error),
}

impl AnnounceError {
	pub fn already_exists(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
		AnnounceError::AlreadyExists {
			keyspace: keyspace.into(),
			table: table.into(),
		}
	}

	/// Also recognizes an already-exists diagnostic reported as a failure.
	pub fn is_already_exists(&self) -> bool {
		match self {
			AnnounceError::AlreadyExists {
				..
			} => true,
			AnnounceError::Failed(err) => err.code == "CATALOG_001",
		}
	}
}

impl From<Error> for AnnounceError {
	fn from(err: Error) -> Self {
		match catalog::already_existing_table(&err) {
			Some((keyspace, table)) => AnnounceError::AlreadyExists {
				keyspace,
				table,
			},
			None => AnnounceError::Failed(err),
		}
	}
}

impl From<CatalogError> for AnnounceError {
	fn from(err: CatalogError) -> Self {
		match err {
			CatalogError::AlreadyExists {
				keyspace,
				name,
				..
			} => AnnounceError::AlreadyExists {
				keyspace,
				table: name,
			},
			err => AnnounceError::Failed(err.into()),
		}
	}
}

impl From<AnnounceError> for Error {
	fn from(err: AnnounceError) -> Self {
		match err {
			AnnounceError::AlreadyExists {
				keyspace,
				table,
			} => CatalogError::table_already_exists(keyspace, table).into(),
			AnnounceError::Failed(err) => err,
		}
	}
}

/// Publishes schema changes to the catalog and, unless local only, to the
/// rest of the cluster.
///
/// Implementations must make the existence check and the publish a single
/// linearizable step: of several concurrent announcements for the same
/// `(keyspace, table)` exactly one succeeds, the rest fail with
/// [`AnnounceError::AlreadyExists`]. Dropping the returned future before it
/// completes must leave nothing published.
#[async_trait]
pub trait MigrationManager: Send + Sync {
	async fn announce_new_schema(&self, schema: Arc<Schema>, is_local_only: bool) -> Result<(), AnnounceError>;
}

/// Observer of applied schema changes.
pub trait MigrationListener: Send + Sync {
	fn on_create_table(&self, schema: &Schema);
}
