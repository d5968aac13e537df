// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{any::Any, fmt::Debug};

use crate::event::Event;

/// A payload that carries its own discriminant.
///
/// Subsystems describe their events as one sum type implementing this
/// trait and publish them as [`TaggedEvent`]s keyed by an operation
/// identifier.
pub trait Tagged: Clone + Send + Sync + 'static {
	type Kind: Copy + Eq + Debug + Send + Sync + 'static;
	type Key: Clone + Eq + Debug + Send + Sync + 'static;

	fn kind(&self) -> Self::Kind;
}

/// Immutable `(kind, key) + payload` event.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedEvent<P: Tagged> {
	key: P::Key,
	payload: P,
}

impl<P: Tagged> TaggedEvent<P> {
	pub fn new(key: P::Key, payload: P) -> Self {
		Self {
			key,
			payload,
		}
	}

	pub fn kind(&self) -> P::Kind {
		self.payload.kind()
	}

	pub fn key(&self) -> &P::Key {
		&self.key
	}

	pub fn payload(&self) -> &P {
		&self.payload
	}

	pub fn into_parts(self) -> (P::Key, P) {
		(self.key, self.payload)
	}
}

impl<P: Tagged> Event for TaggedEvent<P> {
	fn as_any(&self) -> &dyn Any {
		self
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{Arc, Mutex};

	use super::{Tagged, TaggedEvent};
	use crate::event::{EventBus, EventListener};

	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum JobKind {
		Started,
		Finished,
	}

	#[derive(Debug, Clone, PartialEq)]
	enum JobPayload {
		Started,
		Finished {
			ok: bool,
		},
	}

	impl Tagged for JobPayload {
		type Kind = JobKind;
		type Key = u64;

		fn kind(&self) -> JobKind {
			match self {
				JobPayload::Started => JobKind::Started,
				JobPayload::Finished {
					..
				} => JobKind::Finished,
			}
		}
	}

	#[derive(Default, Clone)]
	struct Recorder(Arc<Mutex<Vec<(u64, JobKind)>>>);

	impl EventListener<TaggedEvent<JobPayload>> for Recorder {
		fn on(&self, event: &TaggedEvent<JobPayload>) {
			self.0.lock().unwrap().push((*event.key(), event.kind()));
		}
	}

	#[test]
	fn test_kind_follows_payload() {
		let event = TaggedEvent::new(
			7,
			JobPayload::Finished {
				ok: true,
			},
		);
		assert_eq!(event.kind(), JobKind::Finished);
		assert_eq!(*event.key(), 7);

		let (key, payload) = event.into_parts();
		assert_eq!(key, 7);
		assert_eq!(
			payload,
			JobPayload::Finished {
				ok: true
			}
		);
	}

	#[test]
	fn test_tagged_events_flow_through_bus() {
		let bus = EventBus::new();
		let recorder = Recorder::default();
		bus.register::<TaggedEvent<JobPayload>, _>(recorder.clone());

		bus.emit(TaggedEvent::new(1, JobPayload::Started));
		bus.emit(TaggedEvent::new(
			1,
			JobPayload::Finished {
				ok: false,
			},
		));

		assert_eq!(*recorder.0.lock().unwrap(), vec![(1, JobKind::Started), (1, JobKind::Finished)]);
	}
}
