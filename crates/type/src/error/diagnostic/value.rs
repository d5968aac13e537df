// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

pub fn unknown_type(name: &str) -> Diagnostic {
	Diagnostic {
		code: "TYPE_001".to_string(),
		statement: None,
		message: format!("unknown data type `{}`", name),
		label: Some("not a recognized column type".to_string()),
		help: Some("use one of: boolean, tinyint, smallint, int, bigint, varint, float, double, decimal, text, ascii, blob, date, timestamp, time, duration, uuid, timeuuid, inet, counter".to_string()),
		notes: vec![],
		cause: None,
	}
}
