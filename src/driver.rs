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

//! ADBC Driver implementation for Snowflake.

use crate::database::Database;
use crate::error::SnowflakeErrorHelper;
use adbc_core::error::Result;
use adbc_core::options::{InfoCode, OptionDatabase, OptionValue};
use driverbase::error::ErrorHelper;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub const DRIVER_NAME: &str = "ADBC Snowflake Driver - Rust";
pub const VENDOR_NAME: &str = "Snowflake";

/// Reported when a version could not be determined at build time.
pub const UNKNOWN_VERSION: &str = "(unknown or development build)";

/// Driver-wide metadata reported through `get_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverInfo {
    driver_version: String,
    arrow_version: String,
}

impl DriverInfo {
    /// Creates driver metadata, falling back to [`UNKNOWN_VERSION`] for
    /// missing or empty versions.
    pub fn new(driver_version: Option<&str>, arrow_version: Option<&str>) -> Self {
        let or_unknown = |version: Option<&str>| {
            version
                .filter(|v| !v.is_empty())
                .unwrap_or(UNKNOWN_VERSION)
                .to_string()
        };
        Self {
            driver_version: or_unknown(driver_version),
            arrow_version: or_unknown(arrow_version),
        }
    }

    /// Reads versions from build metadata.
    ///
    /// The Arrow version is the locked `arrow-array` version, stamped by the
    /// build script as `SNOWFLAKE_ADBC_ARROW_VERSION`.
    pub fn detect() -> Self {
        Self::new(
            option_env!("CARGO_PKG_VERSION"),
            option_env!("SNOWFLAKE_ADBC_ARROW_VERSION"),
        )
    }

    /// Returns the process-wide metadata, detected on first use.
    pub fn process() -> Arc<DriverInfo> {
        static INFO: OnceLock<Arc<DriverInfo>> = OnceLock::new();
        INFO.get_or_init(|| Arc::new(DriverInfo::detect())).clone()
    }

    pub fn driver_name(&self) -> &str {
        DRIVER_NAME
    }

    pub fn driver_version(&self) -> &str {
        &self.driver_version
    }

    pub fn arrow_version(&self) -> &str {
        &self.arrow_version
    }

    pub fn vendor_name(&self) -> &str {
        VENDOR_NAME
    }

    /// The info codes `get_info` answers.
    pub fn supported_codes(&self) -> Vec<InfoCode> {
        vec![
            InfoCode::DriverName,
            InfoCode::DriverVersion,
            InfoCode::DriverArrowVersion,
            InfoCode::VendorName,
        ]
    }

    /// Returns the value reported for `code`, or `None` if it is unsupported.
    pub fn value(&self, code: &InfoCode) -> Option<&str> {
        match code {
            InfoCode::DriverName => Some(self.driver_name()),
            InfoCode::DriverVersion => Some(self.driver_version()),
            InfoCode::DriverArrowVersion => Some(self.arrow_version()),
            InfoCode::VendorName => Some(self.vendor_name()),
            _ => None,
        }
    }
}

/// The main entry point for the Snowflake ADBC driver.
///
/// The Driver is responsible for creating Database instances, which in turn
/// create Connections.
#[derive(Debug, Clone)]
pub struct Driver {
    info: Arc<DriverInfo>,
}

impl Driver {
    /// Creates a new Driver instance backed by the process-wide metadata.
    pub fn new() -> Self {
        Self::with_info(DriverInfo::process())
    }

    /// Creates a Driver that reports the given metadata.
    pub fn with_info(info: Arc<DriverInfo>) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &DriverInfo {
        &self.info
    }

    /// Creates a Database from a raw option map.
    ///
    /// The map is copied, so later changes by the caller have no effect on
    /// the returned Database.
    pub fn open_database(&self, opts: &HashMap<String, String>) -> crate::error::Result<Database> {
        Database::configure(self.info.clone(), opts.clone())
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl adbc_core::Driver for Driver {
    type DatabaseType = Database;

    fn new_database(&mut self) -> Result<Self::DatabaseType> {
        Database::configure(self.info.clone(), HashMap::new()).map_err(|e| e.to_adbc())
    }

    fn new_database_with_opts(
        &mut self,
        opts: impl IntoIterator<Item = (OptionDatabase, OptionValue)>,
    ) -> Result<Self::DatabaseType> {
        let mut raw = HashMap::new();
        for (key, value) in opts {
            match value {
                OptionValue::String(s) => {
                    raw.insert(key.as_ref().to_string(), s);
                }
                other => {
                    return Err(SnowflakeErrorHelper::set_invalid_option(&key, &other).to_adbc())
                }
            }
        }
        Database::configure(self.info.clone(), raw).map_err(|e| e.to_adbc())
    }
}
