// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	net::IpAddr,
};

use serde::{Deserialize, Serialize};
use tessera_core::event::{Tagged, TaggedEvent};

use crate::{PlanId, ProgressInfo, SessionInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamEventKind {
	StreamPrepared,
	StreamComplete,
	FileProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamPayload {
	Prepared(SessionInfo),
	Complete {
		peer: IpAddr,
		success: bool,
		session_index: u32,
	},
	Progress(ProgressInfo),
}

impl Tagged for StreamPayload {
	type Kind = StreamEventKind;
	type Key = PlanId;

	fn kind(&self) -> StreamEventKind {
		match self {
			StreamPayload::Prepared(_) => StreamEventKind::StreamPrepared,
			StreamPayload::Complete {
				..
			} => StreamEventKind::StreamComplete,
			StreamPayload::Progress(_) => StreamEventKind::FileProgress,
		}
	}
}

impl Display for StreamPayload {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			StreamPayload::Prepared(session) => {
				write!(f, "<SessionPrepared {} idx:{}>", session.peer, session.session_index)
			}
			StreamPayload::Complete {
				peer,
				success,
				session_index,
			} => write!(f, "<SessionComplete {} idx:{} success:{}>", peer, session_index, success),
			StreamPayload::Progress(progress) => write!(f, "<ProgressEvent {}>", progress),
		}
	}
}

/// Streaming lifecycle event keyed by the plan it belongs to.
pub type StreamEvent = TaggedEvent<StreamPayload>;

/// Constructors and accessors for [`StreamEvent`].
pub trait StreamEventExt {
	fn prepared(plan_id: PlanId, session: SessionInfo) -> Self;

	/// Successful iff the session reached [`SessionState::Complete`](crate::SessionState::Complete).
	fn session_complete(plan_id: PlanId, session: &SessionInfo) -> Self;

	fn progress(plan_id: PlanId, progress: ProgressInfo) -> Self;

	fn plan_id(&self) -> PlanId;
}

impl StreamEventExt for StreamEvent {
	fn prepared(plan_id: PlanId, session: SessionInfo) -> Self {
		TaggedEvent::new(plan_id, StreamPayload::Prepared(session))
	}

	fn session_complete(plan_id: PlanId, session: &SessionInfo) -> Self {
		TaggedEvent::new(
			plan_id,
			StreamPayload::Complete {
				peer: session.peer,
				success: session.is_success(),
				session_index: session.session_index,
			},
		)
	}

	fn progress(plan_id: PlanId, progress: ProgressInfo) -> Self {
		TaggedEvent::new(plan_id, StreamPayload::Progress(progress))
	}

	fn plan_id(&self) -> PlanId {
		*self.key()
	}
}
