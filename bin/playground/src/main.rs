// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::{
	net::{IpAddr, Ipv4Addr},
	sync::Arc,
};

use tessera_core::{
	ClientState, EventBus, EventListener, Identity, KeyType, MigrationListener, Schema, SchemaChangeEvent,
	TableProperties, Type,
	schema::{CompressionCodec, KW_COMMENT},
};
use tessera_migration::{LocalMigrationManager, MigrationConfig};
use tessera_statement::{CfName, CreateTableConfig, CreateTableRequest, CreateTableStatement, StatementResult};
use tessera_streaming::{
	Direction, PlanId, ProgressInfo, SessionInfo, SessionState, StreamEvent, StreamEventExt, StreamSummary,
};
use tessera_sub_tracing::TracingFactory;
use tracing::{Level, info};

struct SchemaChangeLogger;

impl EventListener<SchemaChangeEvent> for SchemaChangeLogger {
	fn on(&self, event: &SchemaChangeEvent) {
		info!("schema change: {}", event);
	}
}

struct StreamLogger;

impl EventListener<StreamEvent> for StreamLogger {
	fn on(&self, event: &StreamEvent) {
		info!(plan = %event.plan_id(), kind = ?event.kind(), "{}", event.payload());
	}
}

struct TableLogger;

impl MigrationListener for TableLogger {
	fn on_create_table(&self, schema: &Schema) {
		info!("published {} with {} column(s)", schema, schema.columns().len());
	}
}

fn events_table() -> CreateTableRequest {
	CreateTableRequest::new(CfName::unqualified("events"))
		.if_not_exists(true)
		.with_partition_key(["day", "bucket"], KeyType::Composite(vec![Type::Date, Type::Int4]))
		.with_clustering(["at"], KeyType::Scalar(Type::DateTime))
		.with_static_column("source", Type::Utf8)
		.with_column("payload", Type::Blob)
		.with_properties(TableProperties::new().with_property(KW_COMMENT, "raw events"))
}

#[tokio::main]
async fn main() -> tessera_type::Result<()> {
	TracingFactory::with_configurator(|builder| builder.level(Level::INFO).with_target(false)).init()?;

	let bus = EventBus::new();
	bus.register::<SchemaChangeEvent, _>(SchemaChangeLogger);
	bus.register::<StreamEvent, _>(StreamLogger);

	let manager = LocalMigrationManager::new(MigrationConfig::new().create_missing_keyspaces(true));
	manager.register_listener(Arc::new(TableLogger));

	let state = ClientState::new(Identity::root()).with_keyspace("demo");
	let config = CreateTableConfig::new().default_compressor(CompressionCodec::Lz4);

	for attempt in 1..=2 {
		let statement = CreateTableStatement::prepare(events_table(), &state)?.with_config(config.clone());
		match statement.execute(&state, &manager).await? {
			StatementResult::SchemaChange(event) => bus.emit(event),
			StatementResult::Void => info!(attempt, "demo.events already exists"),
		}
	}

	let Some(events) = manager.find_table("demo", "events") else {
		return Ok(());
	};
	info!(
		compression = events.params().compression.codec.class_name(),
		comment = %events.params().comment,
		"stored table options"
	);

	let peer = IpAddr::V4(Ipv4Addr::LOCALHOST);
	let plan = PlanId::generate();
	let mut session = SessionInfo::new(
		peer,
		0,
		peer,
		vec![StreamSummary::new(events.id().0, 1, 4096)],
		vec![],
		SessionState::Preparing,
	);
	bus.emit(StreamEvent::prepared(plan, session.clone()));

	for current in [1024, 4096] {
		let progress = ProgressInfo {
			peer,
			session_index: 0,
			file_name: "demo-events-Data.db".to_string(),
			direction: Direction::In,
			current_bytes: current,
			total_bytes: 4096,
		};
		session.update_progress(progress.clone());
		bus.emit(StreamEvent::progress(plan, progress));
	}

	session.state = SessionState::Complete;
	bus.emit(StreamEvent::session_complete(plan, &session));

	Ok(())
}
