// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt;

use serde::{Deserialize, Serialize};

pub type IdentityId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
	Anonymous {},
	System {
		id: IdentityId,
		name: String,
	},
	User {
		id: IdentityId,
		name: String,
	},
}

impl Identity {
	pub fn root() -> Self {
		Self::System {
			id: 0,
			name: "root".to_string(),
		}
	}

	pub fn user(id: IdentityId, name: impl Into<String>) -> Self {
		Self::User {
			id,
			name: name.into(),
		}
	}

	/// System identities bypass permission checks.
	pub fn is_superuser(&self) -> bool {
		matches!(self, Self::System { .. })
	}

	pub fn is_anonymous(&self) -> bool {
		matches!(self, Self::Anonymous {})
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Anonymous {} => "anonymous",
			Self::System {
				name,
				..
			}
			| Self::User {
				name,
				..
			} => name,
		}
	}
}

impl fmt::Display for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Anonymous {} => write!(f, "anonymous"),
			Self::System {
				id,
				..
			} => write!(f, "system:{}", id),
			Self::User {
				id,
				..
			} => write!(f, "user:{}", id),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
	Create,
	Alter,
	Drop,
	Select,
	Modify,
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Permission::Create => f.write_str("CREATE"),
			Permission::Alter => f.write_str("ALTER"),
			Permission::Drop => f.write_str("DROP"),
			Permission::Select => f.write_str("SELECT"),
			Permission::Modify => f.write_str("MODIFY"),
		}
	}
}

/// Per-connection state a statement executes against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientState {
	identity: Identity,
	keyspace: Option<String>,
}

impl ClientState {
	pub fn new(identity: Identity) -> Self {
		Self {
			identity,
			keyspace: None,
		}
	}

	pub fn anonymous() -> Self {
		Self::new(Identity::Anonymous {})
	}

	/// Sets the keyspace unqualified names resolve against.
	pub fn with_keyspace(mut self, keyspace: impl Into<String>) -> Self {
		self.keyspace = Some(keyspace.into());
		self
	}

	pub fn set_keyspace(&mut self, keyspace: impl Into<String>) {
		self.keyspace = Some(keyspace.into());
	}

	pub fn identity(&self) -> &Identity {
		&self.identity
	}

	pub fn keyspace(&self) -> Option<&str> {
		self.keyspace.as_deref()
	}
}

/// Authorization seam for schema-altering statements.
pub trait AccessControl: Send + Sync {
	fn check_keyspace_access(
		&self,
		state: &ClientState,
		keyspace: &str,
		permission: Permission,
	) -> tessera_type::Result<()>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_identity_roles() {
		assert!(Identity::root().is_superuser());
		assert!(!Identity::user(7, "alice").is_superuser());
		assert!(Identity::Anonymous {}.is_anonymous());
		assert_eq!(Identity::user(7, "alice").to_string(), "user:7");
		assert_eq!(Identity::user(7, "alice").name(), "alice");
	}

	#[test]
	fn test_client_state_keyspace() {
		let mut state = ClientState::new(Identity::root());
		assert_eq!(state.keyspace(), None);
		state.set_keyspace("ks");
		assert_eq!(state.keyspace(), Some("ks"));
		assert_eq!(ClientState::anonymous().with_keyspace("other").keyspace(), Some("other"));
	}
}
