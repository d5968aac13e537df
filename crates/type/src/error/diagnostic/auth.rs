// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

/// Authorization denied for accessing a resource
pub fn authorization_denied(resource: String) -> Diagnostic {
	Diagnostic {
		code: "AUTH_001".to_string(),
		statement: None,
		message: format!("Authorization denied for resource: {}", resource),
		label: None,
		help: Some("Check your permissions for this resource".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// The caller holds no permission grants at all
pub fn anonymous_access(resource: String) -> Diagnostic {
	Diagnostic {
		code: "AUTH_002".to_string(),
		statement: None,
		message: format!("Anonymous identity cannot access resource: {}", resource),
		label: None,
		help: Some("Authenticate before issuing schema changes".to_string()),
		notes: vec![],
		cause: None,
	}
}
