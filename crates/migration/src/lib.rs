// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod config;
mod manager;

pub use config::MigrationConfig;
pub use manager::LocalMigrationManager;
