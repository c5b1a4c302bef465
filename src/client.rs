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

//! Connection parameters handed to the Snowflake backend client.

use crate::auth::{AuthType, Credentials};
use crate::config::{LogLevel, Protocol, Timeouts, ValidatedOptions};
use crate::driver::DriverInfo;

/// Configuration for the backend client.
///
/// This is the single place where validated options are translated into the
/// parameters the backend client understands. Unset fields keep the backend
/// client's own defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub account: Option<String>,
    pub user: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub warehouse: Option<String>,
    pub role: Option<String>,
    pub region: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub protocol: Option<Protocol>,
    /// Connection URI passed through as is.
    pub uri: Option<String>,
    pub authenticator: AuthType,
    pub credentials: Credentials,
    pub timeouts: Timeouts,
    pub application: String,
    /// Skip TLS certificate verification.
    pub insecure_mode: bool,
    pub ocsp_fail_open: Option<bool>,
    pub keep_session_alive: bool,
    pub disable_telemetry: bool,
    pub tracing: Option<LogLevel>,
    pub client_request_mfa_token: bool,
    pub client_store_temporary_credential: bool,
}

impl ClientConfig {
    /// Builds the backend parameters for a new connection.
    pub fn new(options: &ValidatedOptions, info: &DriverInfo) -> Self {
        let owned = |value: Option<&str>| value.map(str::to_string);
        Self {
            account: owned(options.account()),
            user: owned(options.username()),
            database: owned(options.database()),
            schema: owned(options.schema()),
            warehouse: owned(options.warehouse()),
            role: owned(options.role()),
            region: owned(options.region()),
            host: owned(options.host()),
            port: options.port(),
            protocol: options.protocol(),
            uri: owned(options.uri()),
            authenticator: options.auth_type(),
            credentials: options.credentials().clone(),
            timeouts: *options.timeouts(),
            application: options
                .application_name()
                .map(str::to_string)
                .unwrap_or_else(|| default_application(info)),
            insecure_mode: options.tls_skip_verify(),
            ocsp_fail_open: options.ocsp_fail_open(),
            keep_session_alive: options.keep_session_alive(),
            disable_telemetry: options.disable_telemetry(),
            tracing: options.log_level(),
            client_request_mfa_token: options.cache_mfa_token(),
            client_store_temporary_credential: options.store_temp_creds(),
        }
    }
}

fn default_application(info: &DriverInfo) -> String {
    format!("[ADBC][Rust-{}]", info.driver_version())
}
