// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tessera_core::{
	AccessControl, ClientState, ColumnDefinition, ColumnIdentifier, ColumnKind, KeyType,
	MigrationManager, Permission, Schema, SchemaBuilder, SchemaChangeEvent,
	schema::{CompressionParameters, KW_COMPRESSION},
};
use tessera_type::{Result, internal_error, return_error};
use tracing::{debug, instrument, trace};

use crate::{CreateTableConfig, CreateTableRequest, StatementResult, UncheckedAccess};

/// `CREATE TABLE` bound to a resolved keyspace.
pub struct CreateTableStatement {
	keyspace: String,
	request: CreateTableRequest,
	config: CreateTableConfig,
	access: Arc<dyn AccessControl>,
}

impl CreateTableStatement {
	/// Resolves the target keyspace against the session. Permissions are
	/// not enforced until an access control is installed.
	pub fn prepare(request: CreateTableRequest, state: &ClientState) -> Result<Self> {
		let keyspace = request.name.resolve_keyspace(state)?;
		Ok(Self {
			keyspace,
			request,
			config: CreateTableConfig::default(),
			access: Arc::new(UncheckedAccess),
		})
	}

	pub fn with_config(mut self, config: CreateTableConfig) -> Self {
		self.config = config;
		self
	}

	pub fn with_access_control(mut self, access: Arc<dyn AccessControl>) -> Self {
		self.access = access;
		self
	}

	pub fn keyspace(&self) -> &str {
		&self.keyspace
	}

	pub fn column_family(&self) -> &str {
		&self.request.name.table
	}

	pub fn request(&self) -> &CreateTableRequest {
		&self.request
	}

	pub fn check_access(&self, state: &ClientState) -> Result<()> {
		self.access.check_keyspace_access(state, &self.keyspace, Permission::Create)
	}

	/// Validation happens when the schema is built and announced.
	pub fn validate(&self, _state: &ClientState) -> Result<()> {
		Ok(())
	}

	/// Non-key columns in declaration order; static iff marked static.
	pub fn get_columns(&self) -> Vec<ColumnDefinition> {
		self.request
			.columns
			.iter()
			.map(|(name, ty)| {
				let kind = if self.request.static_columns.contains(name) {
					ColumnKind::StaticColumn
				} else {
					ColumnKind::RegularColumn
				};
				trace!(column = name.name(), %kind, "derived column");
				ColumnDefinition::new(name.clone(), *ty, kind)
			})
			.collect()
	}

	/// Populates `builder` with columns, key aliases and table options.
	///
	/// Explicit table properties go last so they override the configured
	/// default compressor.
	pub fn apply_properties_to(&self, builder: &mut SchemaBuilder) -> Result<()> {
		for column in self.get_columns() {
			builder.with_column_definition(column)?;
		}

		let request = &self.request;
		add_column_metadata_from_aliases(
			builder,
			&request.key_aliases,
			&request.key_validator,
			ColumnKind::PartitionKey,
		)?;
		builder.with_key_validator(request.key_validator.clone());

		match &request.comparator {
			Some(comparator) => {
				add_column_metadata_from_aliases(
					builder,
					&request.column_aliases,
					comparator,
					ColumnKind::ClusteringColumn,
				)?;
				builder.with_comparator(comparator.clone());
			}
			None if !request.column_aliases.is_empty() => {
				return_error!(internal_error!(
					"{} clustering alias(es) supplied without a comparator",
					request.column_aliases.len()
				));
			}
			None => {}
		}

		if let Some(alias) = &request.value_alias {
			add_column_metadata_from_aliases(
				builder,
				std::slice::from_ref(alias),
				&KeyType::Scalar(request.default_validator),
				ColumnKind::CompactValue,
			)?;
		}
		builder.with_default_validator(request.default_validator);

		if let Some(codec) = self.config.default_compressor
			&& !request.properties.has_property(KW_COMPRESSION)
		{
			trace!(compressor = codec.class_name(), "applying default compressor");
			builder.with_compression(CompressionParameters::new(codec));
		}

		request.properties.apply_to_builder(builder)?;
		Ok(())
	}

	/// Builds the schema this statement would announce.
	pub fn schema(&self) -> Result<Schema> {
		let mut builder = SchemaBuilder::new(self.keyspace.clone(), self.request.name.table.clone());
		self.apply_properties_to(&mut builder)?;
		Ok(builder.build()?)
	}

	/// Resolves to `true` if the table was created and `false` if it
	/// already existed under `IF NOT EXISTS`.
	#[instrument(
		name = "statement::create_table::announce",
		level = "debug",
		skip(self, manager),
		fields(keyspace = %self.keyspace, table = %self.request.name.table)
	)]
	pub async fn announce_migration(&self, manager: &dyn MigrationManager, is_local_only: bool) -> Result<bool> {
		let schema = Arc::new(self.schema()?);

		match manager.announce_new_schema(schema, is_local_only).await {
			Ok(()) => {
				debug!("table created");
				Ok(true)
			}
			Err(err) if err.is_already_exists() && self.request.if_not_exists => {
				debug!("table already exists, nothing to do");
				Ok(false)
			}
			Err(err) => Err(err.into()),
		}
	}

	pub fn change_event(&self) -> SchemaChangeEvent {
		SchemaChangeEvent::table_created(self.keyspace.clone(), self.request.name.table.clone())
	}

	#[instrument(
		name = "statement::create_table::execute",
		level = "debug",
		skip_all,
		fields(keyspace = %self.keyspace, table = %self.request.name.table)
	)]
	pub async fn execute(&self, state: &ClientState, manager: &dyn MigrationManager) -> Result<StatementResult> {
		self.check_access(state)?;
		self.validate(state)?;

		if self.announce_migration(manager, false).await? {
			Ok(StatementResult::SchemaChange(self.change_event()))
		} else {
			Ok(StatementResult::Void)
		}
	}
}

/// Binds alias `i` to component `i` of `key_type`.
///
/// # Panics
///
/// When there are more aliases than key components.
fn add_column_metadata_from_aliases(
	builder: &mut SchemaBuilder,
	aliases: &[ColumnIdentifier],
	key_type: &KeyType,
	kind: ColumnKind,
) -> Result<()> {
	for column in key_type.decompose(aliases, kind) {
		builder.with_column_definition(column)?;
	}
	Ok(())
}
