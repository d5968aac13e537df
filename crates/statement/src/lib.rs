// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod access;
pub mod config;
pub mod create_table;
pub mod request;
pub mod result;

pub use access::{GrantedAccess, UncheckedAccess};
pub use config::CreateTableConfig;
pub use create_table::CreateTableStatement;
pub use request::{CfName, CreateTableRequest};
pub use result::StatementResult;
