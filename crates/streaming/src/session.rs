// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::BTreeMap, net::IpAddr};

use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use crate::progress::{Direction, ProgressInfo};

/// Files and bytes of one table exchanged within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSummary {
	pub table_id: Uuid,
	pub files: u32,
	pub total_size: u64,
}

impl StreamSummary {
	pub fn new(table_id: Uuid, files: u32, total_size: u64) -> Self {
		Self {
			table_id,
			files,
			total_size,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
	Initialized,
	Preparing,
	Streaming,
	WaitComplete,
	Complete,
	Failed,
}

/// Snapshot of one streaming session with a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
	pub peer: IpAddr,
	pub session_index: u32,
	/// Address actually connected to, which may differ from `peer`.
	pub connecting: IpAddr,
	pub receiving_summaries: Vec<StreamSummary>,
	pub sending_summaries: Vec<StreamSummary>,
	pub state: SessionState,
	receiving_files: BTreeMap<String, ProgressInfo>,
	sending_files: BTreeMap<String, ProgressInfo>,
}

impl SessionInfo {
	pub fn new(
		peer: IpAddr,
		session_index: u32,
		connecting: IpAddr,
		receiving_summaries: Vec<StreamSummary>,
		sending_summaries: Vec<StreamSummary>,
		state: SessionState,
	) -> Self {
		Self {
			peer,
			session_index,
			connecting,
			receiving_summaries,
			sending_summaries,
			state,
			receiving_files: BTreeMap::new(),
			sending_files: BTreeMap::new(),
		}
	}

	pub fn is_failed(&self) -> bool {
		self.state == SessionState::Failed
	}

	pub fn is_success(&self) -> bool {
		self.state == SessionState::Complete
	}

	/// Records the latest progress of a file, replacing older reports for
	/// the same file.
	pub fn update_progress(&mut self, progress: ProgressInfo) {
		trace!(file = %progress.file_name, current = progress.current_bytes, "session progress");
		let files = match progress.direction {
			Direction::In => &mut self.receiving_files,
			Direction::Out => &mut self.sending_files,
		};
		files.insert(progress.file_name.clone(), progress);
	}

	pub fn receiving_files(&self) -> impl Iterator<Item = &ProgressInfo> {
		self.receiving_files.values()
	}

	pub fn sending_files(&self) -> impl Iterator<Item = &ProgressInfo> {
		self.sending_files.values()
	}

	pub fn total_files_to_receive(&self) -> u64 {
		total_files(&self.receiving_summaries)
	}

	pub fn total_files_to_send(&self) -> u64 {
		total_files(&self.sending_summaries)
	}

	pub fn total_size_to_receive(&self) -> u64 {
		total_size(&self.receiving_summaries)
	}

	pub fn total_size_to_send(&self) -> u64 {
		total_size(&self.sending_summaries)
	}

	pub fn total_files_received(&self) -> u64 {
		completed_files(&self.receiving_files)
	}

	pub fn total_files_sent(&self) -> u64 {
		completed_files(&self.sending_files)
	}

	pub fn total_size_received(&self) -> u64 {
		transferred_size(&self.receiving_files)
	}

	pub fn total_size_sent(&self) -> u64 {
		transferred_size(&self.sending_files)
	}
}

fn total_files(summaries: &[StreamSummary]) -> u64 {
	summaries.iter().map(|s| s.files as u64).sum()
}

fn total_size(summaries: &[StreamSummary]) -> u64 {
	summaries.iter().map(|s| s.total_size).sum()
}

fn completed_files(files: &BTreeMap<String, ProgressInfo>) -> u64 {
	files.values().filter(|p| p.is_completed()).count() as u64
}

fn transferred_size(files: &BTreeMap<String, ProgressInfo>) -> u64 {
	files.values().map(|p| p.current_bytes).sum()
}
