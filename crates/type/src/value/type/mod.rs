// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Error, error, error::diagnostic::value::unknown_type};

/// All column value types a table can declare
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Bool,
	/// A 1-byte signed integer
	Int1,
	/// A 2-byte signed integer
	Int2,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// An arbitrary precision integer
	Varint,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// An arbitrary precision decimal
	Decimal,
	/// A UTF-8 encoded text.
	Utf8,
	/// US-ASCII text
	Ascii,
	/// A binary large object (BLOB)
	Blob,
	/// A date value (year, month, day)
	Date,
	/// Milliseconds since the epoch, UTC
	DateTime,
	/// A time of day with nanosecond precision
	Time,
	/// A duration in months, days and nanoseconds
	Duration,
	/// Any UUID
	Uuid,
	/// A version 1 (time-based) UUID
	TimeUuid,
	/// An IPv4 or IPv6 address
	Inet,
	/// A distributed 64-bit counter
	Counter,
}

impl Type {
	pub fn is_number(&self) -> bool {
		matches!(
			self,
			Type::Int1
				| Type::Int2 | Type::Int4
				| Type::Int8 | Type::Varint
				| Type::Float4 | Type::Float8
				| Type::Decimal | Type::Counter
		)
	}

	pub fn is_text(&self) -> bool {
		matches!(self, Type::Utf8 | Type::Ascii)
	}

	pub fn is_temporal(&self) -> bool {
		matches!(self, Type::Date | Type::DateTime | Type::Time | Type::Duration)
	}

	pub fn is_uuid(&self) -> bool {
		matches!(self, Type::Uuid | Type::TimeUuid)
	}

	pub fn is_counter(&self) -> bool {
		matches!(self, Type::Counter)
	}

	/// Encoded width in bytes, `None` for variable length types.
	pub fn fixed_size(&self) -> Option<usize> {
		match self {
			Type::Bool | Type::Int1 => Some(1),
			Type::Int2 => Some(2),
			Type::Int4 | Type::Float4 | Type::Date => Some(4),
			Type::Int8 | Type::Float8 | Type::DateTime | Type::Time | Type::Counter => Some(8),
			Type::Uuid | Type::TimeUuid => Some(16),
			Type::Varint | Type::Decimal | Type::Utf8 | Type::Ascii | Type::Blob | Type::Duration | Type::Inet => {
				None
			}
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Bool => f.write_str("boolean"),
			Type::Int1 => f.write_str("tinyint"),
			Type::Int2 => f.write_str("smallint"),
			Type::Int4 => f.write_str("int"),
			Type::Int8 => f.write_str("bigint"),
			Type::Varint => f.write_str("varint"),
			Type::Float4 => f.write_str("float"),
			Type::Float8 => f.write_str("double"),
			Type::Decimal => f.write_str("decimal"),
			Type::Utf8 => f.write_str("text"),
			Type::Ascii => f.write_str("ascii"),
			Type::Blob => f.write_str("blob"),
			Type::Date => f.write_str("date"),
			Type::DateTime => f.write_str("timestamp"),
			Type::Time => f.write_str("time"),
			Type::Duration => f.write_str("duration"),
			Type::Uuid => f.write_str("uuid"),
			Type::TimeUuid => f.write_str("timeuuid"),
			Type::Inet => f.write_str("inet"),
			Type::Counter => f.write_str("counter"),
		}
	}
}

impl FromStr for Type {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"boolean" | "bool" => Ok(Type::Bool),
			"tinyint" => Ok(Type::Int1),
			"smallint" => Ok(Type::Int2),
			"int" => Ok(Type::Int4),
			"bigint" => Ok(Type::Int8),
			"varint" => Ok(Type::Varint),
			"float" => Ok(Type::Float4),
			"double" => Ok(Type::Float8),
			"decimal" => Ok(Type::Decimal),
			"text" | "varchar" => Ok(Type::Utf8),
			"ascii" => Ok(Type::Ascii),
			"blob" => Ok(Type::Blob),
			"date" => Ok(Type::Date),
			"timestamp" => Ok(Type::DateTime),
			"time" => Ok(Type::Time),
			"duration" => Ok(Type::Duration),
			"uuid" => Ok(Type::Uuid),
			"timeuuid" => Ok(Type::TimeUuid),
			"inet" => Ok(Type::Inet),
			"counter" => Ok(Type::Counter),
			_ => Err(error!(unknown_type(s))),
		}
	}
}
