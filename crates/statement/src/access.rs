// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use tessera_core::interface::{AccessControl, ClientState, Permission};
use tessera_type::{
	Result,
	error::diagnostic::auth::{anonymous_access, authorization_denied},
	return_error,
};
use tracing::warn;

/// Allows everything. Logs every check so the missing enforcement stays
/// visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncheckedAccess;

impl AccessControl for UncheckedAccess {
	fn check_keyspace_access(&self, state: &ClientState, keyspace: &str, permission: Permission) -> Result<()> {
		warn!(
			identity = %state.identity(),
			keyspace,
			%permission,
			"unimplemented: permissions are not enforced"
		);
		Ok(())
	}
}

/// Enforces explicit `(identity, keyspace, permission)` grants.
///
/// System identities pass every check; anonymous identities fail every
/// check.
#[derive(Debug, Default)]
pub struct GrantedAccess {
	grants: RwLock<HashMap<String, HashSet<(String, Permission)>>>,
}

impl GrantedAccess {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn grant(&self, identity: impl Into<String>, keyspace: impl Into<String>, permission: Permission) {
		self.grants.write().entry(identity.into()).or_default().insert((keyspace.into(), permission));
	}

	/// Returns `true` if the grant was present.
	pub fn revoke(&self, identity: &str, keyspace: &str, permission: Permission) -> bool {
		self.grants
			.write()
			.get_mut(identity)
			.map(|grants| grants.remove(&(keyspace.to_string(), permission)))
			.unwrap_or(false)
	}

	fn is_granted(&self, identity: &str, keyspace: &str, permission: Permission) -> bool {
		self.grants
			.read()
			.get(identity)
			.map(|grants| grants.contains(&(keyspace.to_string(), permission)))
			.unwrap_or(false)
	}
}

impl AccessControl for GrantedAccess {
	fn check_keyspace_access(&self, state: &ClientState, keyspace: &str, permission: Permission) -> Result<()> {
		let identity = state.identity();
		if identity.is_superuser() {
			return Ok(());
		}

		let resource = format!("{} on keyspace `{}`", permission, keyspace);
		if identity.is_anonymous() {
			return_error!(anonymous_access(resource));
		}
		if !self.is_granted(identity.name(), keyspace, permission) {
			return_error!(authorization_denied(resource));
		}
		Ok(())
	}
}
