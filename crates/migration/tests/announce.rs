// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tessera_core::{ColumnKind, MigrationManager, Schema, SchemaBuilder, Type};
use tessera_migration::LocalMigrationManager;
use tessera_testing::CapturingListener;

fn schema(keyspace: &str, table: &str) -> Arc<Schema> {
	let mut builder = SchemaBuilder::new(keyspace, table);
	builder.with_column("id", Type::Uuid, ColumnKind::PartitionKey)
		.unwrap()
		.with_column("value", Type::Utf8, ColumnKind::RegularColumn)
		.unwrap();
	Arc::new(builder.build().unwrap())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_single_winner() {
	let manager = LocalMigrationManager::default();
	manager.create_keyspace("ks");

	let mut handles = Vec::new();
	for _ in 0..16 {
		let manager = manager.clone();
		handles.push(tokio::spawn(async move { manager.announce_new_schema(schema("ks", "t"), false).await }));
	}

	let mut winners = 0;
	let mut losers = 0;
	for handle in handles {
		match handle.await.unwrap() {
			Ok(()) => winners += 1,
			Err(err) => {
				assert!(err.is_already_exists());
				losers += 1;
			}
		}
	}

	assert_eq!(winners, 1);
	assert_eq!(losers, 15);
	assert_eq!(manager.list_tables("ks").len(), 1);
}

#[tokio::test]
async fn test_non_local_announce_is_broadcast() {
	let manager = LocalMigrationManager::default();
	manager.create_keyspace("ks");
	let mut rx = manager.subscribe();

	let local = schema("ks", "local");
	let pushed = schema("ks", "pushed");
	manager.announce_new_schema(local, true).await.unwrap();
	manager.announce_new_schema(pushed.clone(), false).await.unwrap();

	let received = rx.recv().await.unwrap();
	assert_eq!(received, pushed);
	assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_listeners_see_published_tables_only() {
	let manager = LocalMigrationManager::default();
	manager.create_keyspace("ks");
	let listener = CapturingListener::<Arc<Schema>>::new();
	manager.register_listener(Arc::new(listener.clone()));

	manager.announce_new_schema(schema("ks", "a"), true).await.unwrap();
	manager.announce_new_schema(schema("ks", "a"), true).await.unwrap_err();
	manager.announce_new_schema(schema("missing", "b"), true).await.unwrap_err();

	let tables: Vec<String> = listener.captured().iter().map(|s| s.table().to_string()).collect();
	assert_eq!(tables, vec!["a"]);
}

#[tokio::test]
async fn test_cancelled_announce_publishes_nothing() {
	let manager = LocalMigrationManager::default();
	manager.create_keyspace("ks");
	let mut rx = manager.subscribe();

	tokio::select! {
		biased;
		_ = manager.announce_new_schema(schema("ks", "t"), false) => panic!("announce should not finish on first poll"),
		_ = std::future::ready(()) => {}
	}

	assert!(manager.find_table("ks", "t").is_none());
	assert!(rx.try_recv().is_err());

	// the name is still free afterwards
	manager.announce_new_schema(schema("ks", "t"), false).await.unwrap();
	assert!(manager.find_table("ks", "t").is_some());
}
