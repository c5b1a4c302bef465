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

//! Database implementation for the Snowflake ADBC driver.

use crate::config::{self, ValidatedOptions};
use crate::connection::Connection;
use crate::driver::DriverInfo;
use crate::error::SnowflakeErrorHelper;
use crate::options;
use adbc_core::error::Result;
use adbc_core::options::{OptionConnection, OptionDatabase, OptionValue};
use adbc_core::Optionable;
use driverbase::error::ErrorHelper;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Represents a database instance that holds validated connection options.
///
/// The options are an immutable snapshot shared with every Connection
/// created from this Database. Setting another option validates the whole
/// set again and swaps in a new snapshot, leaving existing connections on
/// the one they were created with.
#[derive(Debug, Clone)]
pub struct Database {
    info: Arc<DriverInfo>,
    options: Arc<ValidatedOptions>,
}

impl Database {
    /// Validates `raw` and builds a Database around the result.
    pub(crate) fn configure(
        info: Arc<DriverInfo>,
        raw: HashMap<String, String>,
    ) -> crate::error::Result<Self> {
        let options = config::configure(raw)?;
        tracing::debug!(auth_type = %options.auth_type(), "created Snowflake database");
        Ok(Self {
            info,
            options: Arc::new(options),
        })
    }

    /// Returns the current option snapshot.
    pub fn options(&self) -> &Arc<ValidatedOptions> {
        &self.options
    }

    pub fn driver_info(&self) -> &DriverInfo {
        &self.info
    }

    fn timeout(&self, key: &str) -> Option<Option<Duration>> {
        let timeouts = self.options.timeouts();
        match key {
            options::LOGIN_TIMEOUT => Some(timeouts.login),
            options::REQUEST_TIMEOUT => Some(timeouts.request),
            options::JWT_EXPIRE_TIMEOUT => Some(timeouts.jwt_expire),
            options::CLIENT_TIMEOUT => Some(timeouts.client),
            _ => None,
        }
    }
}

fn not_set(key: &str) -> adbc_core::error::Error {
    SnowflakeErrorHelper::invalid_state()
        .message(format!("option '{key}' is not set"))
        .to_adbc()
}

impl Optionable for Database {
    type Option = OptionDatabase;

    fn set_option(&mut self, key: Self::Option, value: OptionValue) -> Result<()> {
        let value = match value {
            OptionValue::String(value) => value,
            other => return Err(SnowflakeErrorHelper::set_invalid_option(&key, &other).to_adbc()),
        };
        let mut raw = self.options.to_raw();
        raw.insert(key.as_ref().to_string(), value);
        let options = config::configure(raw).map_err(|e| e.to_adbc())?;
        self.options = Arc::new(options);
        Ok(())
    }

    fn get_option_string(&self, key: Self::Option) -> Result<String> {
        let name = key.as_ref();
        if options::scope(name).is_none() {
            return Err(SnowflakeErrorHelper::get_unknown_option(&key).to_adbc());
        }
        if options::is_secret(name) {
            return Err(SnowflakeErrorHelper::invalid_state()
                .message(format!("option '{name}' cannot be read back"))
                .to_adbc());
        }
        if name == options::AUTH_TYPE {
            return Ok(self.options.auth_type().as_str().to_string());
        }
        self.options
            .get(name)
            .map(str::to_string)
            .ok_or_else(|| not_set(name))
    }

    fn get_option_bytes(&self, key: Self::Option) -> Result<Vec<u8>> {
        Err(SnowflakeErrorHelper::get_unknown_option(&key).to_adbc())
    }

    fn get_option_int(&self, key: Self::Option) -> Result<i64> {
        match key.as_ref() {
            options::PORT => self
                .options
                .port()
                .map(i64::from)
                .ok_or_else(|| not_set(options::PORT)),
            _ => Err(SnowflakeErrorHelper::get_unknown_option(&key).to_adbc()),
        }
    }

    /// Timeouts read back as seconds.
    fn get_option_double(&self, key: Self::Option) -> Result<f64> {
        match self.timeout(key.as_ref()) {
            Some(timeout) => timeout
                .map(|d| d.as_secs_f64())
                .ok_or_else(|| not_set(key.as_ref())),
            None => Err(SnowflakeErrorHelper::get_unknown_option(&key).to_adbc()),
        }
    }
}

impl adbc_core::Database for Database {
    type ConnectionType = Connection;

    fn new_connection(&self) -> Result<Self::ConnectionType> {
        Ok(Connection::new(self.info.clone(), self.options.clone()))
    }

    fn new_connection_with_opts(
        &self,
        opts: impl IntoIterator<Item = (OptionConnection, OptionValue)>,
    ) -> Result<Self::ConnectionType> {
        let mut connection = self.new_connection()?;
        for (key, value) in opts {
            connection.set_option(key, value)?;
        }
        Ok(connection)
    }
}
