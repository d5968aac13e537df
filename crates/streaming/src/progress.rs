// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	net::IpAddr,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
	/// Receiving from the peer.
	In,
	/// Sending to the peer.
	Out,
}

/// Transfer progress of a single file within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressInfo {
	pub peer: IpAddr,
	pub session_index: u32,
	pub file_name: String,
	pub direction: Direction,
	pub current_bytes: u64,
	pub total_bytes: u64,
}

impl ProgressInfo {
	pub fn is_completed(&self) -> bool {
		self.current_bytes >= self.total_bytes
	}

	/// Whole percent transferred; an empty file counts as done.
	pub fn percent(&self) -> u64 {
		if self.total_bytes == 0 {
			return 100;
		}
		let current = self.current_bytes.min(self.total_bytes) as u128;
		(current * 100 / self.total_bytes as u128) as u64
	}
}

impl Display for ProgressInfo {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let verb = match self.direction {
			Direction::Out => "sent to",
			Direction::In => "received from",
		};
		write!(
			f,
			"<ProgressInfo {} {}/{} bytes ({}%) {} idx:{}/{}>",
			self.file_name,
			self.current_bytes,
			self.total_bytes,
			self.percent(),
			verb,
			self.session_index,
			self.peer
		)
	}
}

#[cfg(test)]
mod tests {
	use std::net::{IpAddr, Ipv4Addr};

	use super::{Direction, ProgressInfo};

	fn progress(current: u64, total: u64) -> ProgressInfo {
		ProgressInfo {
			peer: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
			session_index: 3,
			file_name: "ks-users-Data.db".to_string(),
			direction: Direction::Out,
			current_bytes: current,
			total_bytes: total,
		}
	}

	#[test]
	fn test_completion() {
		assert!(!progress(10, 100).is_completed());
		assert!(progress(100, 100).is_completed());
		assert!(progress(0, 0).is_completed());
	}

	#[test]
	fn test_percent() {
		assert_eq!(progress(25, 100).percent(), 25);
		assert_eq!(progress(0, 0).percent(), 100);
		assert_eq!(progress(150, 100).percent(), 100);
	}

	#[test]
	fn test_percent_of_huge_file() {
		assert_eq!(progress(u64::MAX / 2, u64::MAX).percent(), 49);
		assert_eq!(progress(u64::MAX, u64::MAX).percent(), 100);
	}

	#[test]
	fn test_display() {
		assert_eq!(
			progress(512, 1024).to_string(),
			"<ProgressInfo ks-users-Data.db 512/1024 bytes (50%) sent to idx:3/10.0.0.2>"
		);

		let mut incoming = progress(1, 4);
		incoming.direction = Direction::In;
		assert!(incoming.to_string().contains("received from idx:3/10.0.0.2"));
	}
}
