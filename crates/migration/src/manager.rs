// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::{BTreeMap, HashMap},
	sync::Arc,
};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tessera_core::{
	CatalogError, Schema,
	interface::{AnnounceError, MigrationListener, MigrationManager},
	schema::SchemaVersion,
};
use tokio::sync::broadcast;
use tracing::{debug, instrument, trace};

use crate::MigrationConfig;

#[derive(Debug, Default)]
struct Keyspace {
	tables: BTreeMap<String, Arc<Schema>>,
}

#[derive(Debug)]
struct Catalog {
	keyspaces: HashMap<String, Keyspace>,
	version: SchemaVersion,
}

struct Inner {
	config: MigrationConfig,
	catalog: Mutex<Catalog>,
	listeners: RwLock<Vec<Arc<dyn MigrationListener>>>,
	announcements: broadcast::Sender<Arc<Schema>>,
}

/// In-memory migration manager.
///
/// Existence check and publish of a table happen under one lock, so of
/// several concurrent announcements for the same name exactly one wins.
/// The lock is never held across an await point.
#[derive(Clone)]
pub struct LocalMigrationManager {
	inner: Arc<Inner>,
}

impl LocalMigrationManager {
	pub fn new(config: MigrationConfig) -> Self {
		let (announcements, _) = broadcast::channel(config.announcement_capacity.max(1));
		Self {
			inner: Arc::new(Inner {
				config,
				catalog: Mutex::new(Catalog {
					keyspaces: HashMap::new(),
					version: SchemaVersion::generate(),
				}),
				listeners: RwLock::new(Vec::new()),
				announcements,
			}),
		}
	}

	pub fn config(&self) -> &MigrationConfig {
		&self.inner.config
	}

	/// Returns `false` if the keyspace already existed.
	#[instrument(name = "migration::keyspace::create", level = "debug", skip(self))]
	pub fn create_keyspace(&self, keyspace: &str) -> bool {
		let mut catalog = self.inner.catalog.lock();
		if catalog.keyspaces.contains_key(keyspace) {
			return false;
		}
		catalog.keyspaces.insert(keyspace.to_string(), Keyspace::default());
		catalog.version = SchemaVersion::generate();
		true
	}

	pub fn has_keyspace(&self, keyspace: &str) -> bool {
		self.inner.catalog.lock().keyspaces.contains_key(keyspace)
	}

	pub fn list_keyspaces(&self) -> Vec<String> {
		let mut keyspaces: Vec<String> = self.inner.catalog.lock().keyspaces.keys().cloned().collect();
		keyspaces.sort();
		keyspaces
	}

	pub fn find_table(&self, keyspace: &str, table: &str) -> Option<Arc<Schema>> {
		self.inner.catalog.lock().keyspaces.get(keyspace).and_then(|ks| ks.tables.get(table).cloned())
	}

	/// Tables of a keyspace ordered by name.
	pub fn list_tables(&self, keyspace: &str) -> Vec<Arc<Schema>> {
		self.inner
			.catalog
			.lock()
			.keyspaces
			.get(keyspace)
			.map(|ks| ks.tables.values().cloned().collect())
			.unwrap_or_default()
	}

	/// Version of the whole catalog; changes on every applied migration.
	pub fn schema_version(&self) -> SchemaVersion {
		self.inner.catalog.lock().version
	}

	pub fn register_listener(&self, listener: Arc<dyn MigrationListener>) {
		self.inner.listeners.write().push(listener);
	}

	/// Schemas announced with `is_local_only == false`.
	pub fn subscribe(&self) -> broadcast::Receiver<Arc<Schema>> {
		self.inner.announcements.subscribe()
	}

	fn apply(&self, schema: &Arc<Schema>) -> Result<(), AnnounceError> {
		let mut catalog = self.inner.catalog.lock();

		if !catalog.keyspaces.contains_key(schema.keyspace()) {
			if !self.inner.config.create_missing_keyspaces {
				return Err(CatalogError::keyspace_not_found(schema.keyspace()).into());
			}
			debug!(keyspace = schema.keyspace(), "creating missing keyspace");
			catalog.keyspaces.insert(schema.keyspace().to_string(), Keyspace::default());
		}

		let Some(keyspace) = catalog.keyspaces.get_mut(schema.keyspace()) else {
			return Err(CatalogError::keyspace_not_found(schema.keyspace()).into());
		};
		if keyspace.tables.contains_key(schema.table()) {
			return Err(AnnounceError::already_exists(schema.keyspace(), schema.table()));
		}
		keyspace.tables.insert(schema.table().to_string(), schema.clone());
		catalog.version = schema.version();
		Ok(())
	}

	fn notify(&self, schema: &Arc<Schema>, is_local_only: bool) {
		let listeners = self.inner.listeners.read().clone();
		for listener in listeners {
			listener.on_create_table(schema);
		}

		if !is_local_only && self.inner.announcements.send(schema.clone()).is_err() {
			trace!("no subscribers for schema announcement");
		}
	}
}

impl Default for LocalMigrationManager {
	fn default() -> Self {
		Self::new(MigrationConfig::default())
	}
}

#[async_trait]
impl MigrationManager for LocalMigrationManager {
	#[instrument(
		name = "migration::table::announce",
		level = "debug",
		skip(self, schema),
		fields(keyspace = %schema.keyspace(), table = %schema.table())
	)]
	async fn announce_new_schema(&self, schema: Arc<Schema>, is_local_only: bool) -> Result<(), AnnounceError> {
		// Hand off to the runtime once; a caller dropping us here publishes nothing.
		tokio::task::yield_now().await;

		self.apply(&schema)?;
		debug!(version = %schema.version(), "schema published");
		self.notify(&schema, is_local_only);
		Ok(())
	}
}
