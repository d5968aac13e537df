// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod listener;
mod migration;

pub use listener::CapturingListener;
pub use migration::{Outcome, ScriptedMigrationManager};
