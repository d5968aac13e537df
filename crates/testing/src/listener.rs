// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use parking_lot::Mutex;
use tessera_core::{Event, EventListener, MigrationListener, Schema};

/// Records everything it is notified about. Clones share the record.
#[derive(Debug)]
pub struct CapturingListener<T> {
	captured: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for CapturingListener<T> {
	fn clone(&self) -> Self {
		Self {
			captured: self.captured.clone(),
		}
	}
}

impl<T> Default for CapturingListener<T> {
	fn default() -> Self {
		Self {
			captured: Arc::new(Mutex::new(Vec::new())),
		}
	}
}

impl<T: Clone> CapturingListener<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn captured(&self) -> Vec<T> {
		self.captured.lock().clone()
	}

	pub fn len(&self) -> usize {
		self.captured.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.captured.lock().is_empty()
	}

	pub fn clear(&self) {
		self.captured.lock().clear();
	}
}

impl<E: Event> EventListener<E> for CapturingListener<E> {
	fn on(&self, event: &E) {
		self.captured.lock().push(event.clone());
	}
}

impl MigrationListener for CapturingListener<Arc<Schema>> {
	fn on_create_table(&self, schema: &Schema) {
		self.captured.lock().push(Arc::new(schema.clone()));
	}
}
