// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::{Any, TypeId},
	collections::HashMap,
	sync::Arc,
};

use parking_lot::RwLock;

#[macro_use]
pub mod r#macro;
pub mod schema;
pub mod tagged;

pub use schema::{ChangeType, SchemaChange, SchemaChangeEvent, SchemaTarget, TargetType};
pub use tagged::{Tagged, TaggedEvent};

pub trait Event: Any + Send + Sync + Clone + 'static {
	fn as_any(&self) -> &dyn Any;
}

pub trait EventListener<E>: Send + Sync + 'static
where
	E: Event,
{
	fn on(&self, event: &E);
}

type Listeners<E> = Vec<Arc<dyn EventListener<E>>>;

/// Event bus fanning events out to the listeners registered for their type.
///
/// `emit()` runs listeners on the calling thread, outside of the registry
/// lock, so a listener may register or emit without deadlocking.
#[derive(Clone, Default)]
pub struct EventBus {
	listeners: Arc<RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a listener for an event type.
	pub fn register<E, L>(&self, listener: L)
	where
		E: Event,
		L: EventListener<E>,
	{
		let listener: Arc<dyn EventListener<E>> = Arc::new(listener);

		let mut listeners = self.listeners.write();
		let entry = listeners.entry(TypeId::of::<E>()).or_insert_with(|| Box::new(Listeners::<E>::new()));

		if let Some(typed) = entry.downcast_mut::<Listeners<E>>() {
			typed.push(listener);
		}
	}

	/// Emit an event to all registered listeners.
	pub fn emit<E: Event>(&self, event: E) {
		let snapshot: Listeners<E> = {
			let listeners = self.listeners.read();
			match listeners.get(&TypeId::of::<E>()).and_then(|entry| entry.downcast_ref::<Listeners<E>>()) {
				Some(typed) => typed.clone(),
				None => return,
			}
		};

		for listener in snapshot {
			listener.on(&event);
		}
	}

	pub fn listener_count<E: Event>(&self) -> usize {
		self.listeners
			.read()
			.get(&TypeId::of::<E>())
			.and_then(|entry| entry.downcast_ref::<Listeners<E>>())
			.map(Vec::len)
			.unwrap_or(0)
	}
}
