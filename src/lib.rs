// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Snowflake ADBC Driver for Rust
//!
//! This crate adapts the ADBC (Arrow Database Connectivity) traits from
//! `adbc_core` to Snowflake. It validates Snowflake-specific database
//! options before any connection exists, and maps errors coming back from
//! the Snowflake backend client onto ADBC statuses.
//!
//! ## Overview
//!
//! - [`Driver`] - Entry point for creating databases
//! - [`Database`] - Holds the validated option snapshot
//! - [`Connection`] - Carries the backend client parameters
//! - [`Statement`] - SQL statement state
//! - [`config::configure`] - Option validation
//! - [`error::normalize`] - Backend error mapping
//!
//! ## Example
//!
//! ```ignore
//! use snowflake_adbc::{options, Driver};
//! use adbc_core::options::{OptionDatabase, OptionValue};
//! use adbc_core::{Database as _, Driver as _};
//!
//! let mut driver = Driver::new();
//! let database = driver.new_database_with_opts([
//!     (OptionDatabase::Other(options::ACCOUNT.into()), OptionValue::String("xy12345".into())),
//!     (OptionDatabase::Username, OptionValue::String("alice".into())),
//!     (OptionDatabase::Password, OptionValue::String("...".into())),
//!     (OptionDatabase::Other(options::LOGIN_TIMEOUT.into()), OptionValue::String("30s".into())),
//! ])?;
//! let connection = database.new_connection()?;
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod connection;
pub mod database;
pub mod driver;
pub mod duration;
pub mod error;
pub mod options;
pub mod statement;

pub use config::{configure, ValidatedOptions};
pub use connection::Connection;
pub use database::Database;
pub use driver::{Driver, DriverInfo};
pub use error::{normalize, Error, NormalizedError, Result, SnowflakeErrorHelper};
pub use statement::Statement;
