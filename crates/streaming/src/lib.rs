// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod event;
pub mod plan;
pub mod progress;
pub mod session;

pub use event::{StreamEvent, StreamEventExt, StreamEventKind, StreamPayload};
pub use plan::PlanId;
pub use progress::{Direction, ProgressInfo};
pub use session::{SessionInfo, SessionState, StreamSummary};
