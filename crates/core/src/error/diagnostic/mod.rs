// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Database-level diagnostics.
//!
//! These deal with catalog constructs like keyspaces, tables and their
//! properties. Type-level diagnostics remain in tessera-type.

pub mod catalog;
