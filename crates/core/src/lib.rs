// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod error;
pub mod event;
pub mod interface;
pub mod schema;

pub use error::{CatalogError, CatalogObjectKind};
pub use event::{Event, EventBus, EventListener, SchemaChangeEvent};
pub use interface::{
	AccessControl, AnnounceError, ClientState, Identity, MigrationListener, MigrationManager, Permission,
};
pub use schema::{
	ColumnDefinition, ColumnIdentifier, ColumnKind, KeyType, Schema, SchemaBuilder, TableProperties,
};
pub use tessera_type::{Error, Result, Type};
