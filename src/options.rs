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

//! Names of the Snowflake database options.
//!
//! These strings are the external configuration surface of the driver.
//! Callers (profile loaders, CLI flag parsers) must use them verbatim.

use crate::auth::AuthType;

// Standard ADBC keys ---------------------------------------------------------

pub const URI: &str = "uri";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";

// Identity -------------------------------------------------------------------

pub const DATABASE: &str = "adbc.snowflake.sql.db";
pub const SCHEMA: &str = "adbc.snowflake.sql.schema";
pub const WAREHOUSE: &str = "adbc.snowflake.sql.warehouse";
pub const ROLE: &str = "adbc.snowflake.sql.role";
pub const REGION: &str = "adbc.snowflake.sql.region";
pub const ACCOUNT: &str = "adbc.snowflake.sql.account";

// Transport ------------------------------------------------------------------

/// The protocol to use for the connection.
///
/// "http" or "https".
pub const PROTOCOL: &str = "adbc.snowflake.sql.uri.protocol";
pub const PORT: &str = "adbc.snowflake.sql.uri.port";
pub const HOST: &str = "adbc.snowflake.sql.uri.host";
pub const SSL_SKIP_VERIFY: &str = "adbc.snowflake.sql.client_option.tls_skip_verify";
pub const OCSP_FAIL_OPEN_MODE: &str = "adbc.snowflake.sql.client_option.ocsp_fail_open_mode";

// Timing ---------------------------------------------------------------------
//
// Durations use the "300ms", "1.5s", "1m30s" format. A leading minus sign is
// accepted but the absolute value is used.

/// Login retry timeout, excluding network round trip and reading the response.
pub const LOGIN_TIMEOUT: &str = "adbc.snowflake.sql.client_option.login_timeout";
/// Request retry timeout, excluding network round trip and reading the response.
pub const REQUEST_TIMEOUT: &str = "adbc.snowflake.sql.client_option.request_timeout";
/// JWT expiration after timeout.
pub const JWT_EXPIRE_TIMEOUT: &str = "adbc.snowflake.sql.client_option.jwt_expire_timeout";
/// Timeout for network round trip plus reading the response.
pub const CLIENT_TIMEOUT: &str = "adbc.snowflake.sql.client_option.client_timeout";

// Authentication -------------------------------------------------------------

/// The auth type to use for the connection.
///
/// Examples: auth_type::{DEFAULT, OAUTH, ...}.
pub const AUTH_TYPE: &str = "adbc.snowflake.sql.auth_type";
/// Token for OAuth authentication.
pub const AUTH_TOKEN: &str = "adbc.snowflake.sql.client_option.auth_token";
/// Okta URL for native Okta SSO.
pub const AUTH_OKTA_URL: &str = "adbc.snowflake.sql.client_option.okta_url";
/// Path to a file holding the RSA private key used to sign the JWT.
pub const JWT_PRIVATE_KEY: &str = "adbc.snowflake.sql.client_option.jwt_private_key";
pub const JWT_PRIVATE_KEY_PKCS8_VALUE: &str =
    "adbc.snowflake.sql.client_option.jwt_private_key_pkcs8_value";
pub const JWT_PRIVATE_KEY_PKCS8_PASSWORD: &str =
    "adbc.snowflake.sql.client_option.jwt_private_key_pkcs8_password";
pub const CLIENT_ID: &str = "adbc.snowflake.sql.client_option.client_id";
pub const CLIENT_SECRET: &str = "adbc.snowflake.sql.client_option.client_secret";
pub const REFRESH_TOKEN: &str = "adbc.snowflake.sql.client_option.refresh_token";

// Do not set both of these for one runtime.
/// Cache the MFA token in the credential manager.
pub const CLIENT_CACHE_MFA_TOKEN: &str = "adbc.snowflake.sql.client_option.cache_mfa_token";
/// Cache the ID token in the credential manager.
pub const CLIENT_STORE_TEMP_CREDS: &str = "adbc.snowflake.sql.client_option.store_temp_creds";

// Operational ----------------------------------------------------------------

pub const APPLICATION_NAME: &str = "adbc.snowflake.sql.client_option.app_name";
/// Keep the session alive after the connection is closed.
pub const KEEP_SESSION_ALIVE: &str = "adbc.snowflake.sql.client_option.keep_session_alive";
pub const DISABLE_TELEMETRY: &str = "adbc.snowflake.sql.client_option.disable_telemetry";
/// Backend client log level.
pub const LOG_TRACING: &str = "adbc.snowflake.sql.client_option.tracing";

// Statement options ----------------------------------------------------------

/// Query tag attached to queries run by a statement.
pub const STATEMENT_QUERY_TAG: &str = "adbc.snowflake.statement.query_tag";

pub mod auth_type {
    /// General username password authentication
    pub const DEFAULT: &str = "auth_snowflake";
    /// OAuth authentication
    pub const OAUTH: &str = "auth_oauth";
    /// Use a browser to access an FED and perform SSO authentication
    pub const EXTERNAL_BROWSER: &str = "auth_ext_browser";
    /// Native okta URL to perform SSO authentication on Okta
    pub const OKTA: &str = "auth_okta";
    /// Use Jwt to perform authentication
    pub const JWT: &str = "auth_jwt";
    /// Username and password with mfa
    pub const USERNAME_PASSWORD_MFA: &str = "auth_mfa";
}

/// Every database option key.
pub const ALL: &[&str] = &[
    URI,
    USERNAME,
    PASSWORD,
    DATABASE,
    SCHEMA,
    WAREHOUSE,
    ROLE,
    REGION,
    ACCOUNT,
    PROTOCOL,
    PORT,
    HOST,
    SSL_SKIP_VERIFY,
    OCSP_FAIL_OPEN_MODE,
    LOGIN_TIMEOUT,
    REQUEST_TIMEOUT,
    JWT_EXPIRE_TIMEOUT,
    CLIENT_TIMEOUT,
    AUTH_TYPE,
    AUTH_TOKEN,
    AUTH_OKTA_URL,
    JWT_PRIVATE_KEY,
    JWT_PRIVATE_KEY_PKCS8_VALUE,
    JWT_PRIVATE_KEY_PKCS8_PASSWORD,
    CLIENT_ID,
    CLIENT_SECRET,
    REFRESH_TOKEN,
    CLIENT_CACHE_MFA_TOKEN,
    CLIENT_STORE_TEMP_CREDS,
    APPLICATION_NAME,
    KEEP_SESSION_ALIVE,
    DISABLE_TELEMETRY,
    LOG_TRACING,
];

/// Where a recognized option key may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Valid regardless of the authentication mode.
    Universal,
    /// Valid only under the listed authentication modes.
    Modes(&'static [AuthType]),
}

impl Scope {
    /// Returns whether a key with this scope may be set under `mode`.
    pub fn allows(&self, mode: AuthType) -> bool {
        match self {
            Scope::Universal => true,
            Scope::Modes(modes) => modes.contains(&mode),
        }
    }
}

const PASSWORD_MODES: &[AuthType] = &[
    AuthType::Snowflake,
    AuthType::Okta,
    AuthType::UsernamePasswordMfa,
];
const OAUTH_MODES: &[AuthType] = &[AuthType::OAuth];
const OKTA_MODES: &[AuthType] = &[AuthType::Okta];
const JWT_MODES: &[AuthType] = &[AuthType::Jwt];
const MFA_MODES: &[AuthType] = &[AuthType::UsernamePasswordMfa];

/// Looks up the scope of a database option key, or `None` if the key is
/// unknown.
pub fn scope(key: &str) -> Option<Scope> {
    let scope = match key {
        URI | USERNAME | DATABASE | SCHEMA | WAREHOUSE | ROLE | REGION | ACCOUNT | PROTOCOL
        | PORT | HOST | SSL_SKIP_VERIFY | OCSP_FAIL_OPEN_MODE | LOGIN_TIMEOUT
        | REQUEST_TIMEOUT | JWT_EXPIRE_TIMEOUT | CLIENT_TIMEOUT | AUTH_TYPE
        | CLIENT_STORE_TEMP_CREDS | APPLICATION_NAME | KEEP_SESSION_ALIVE
        | DISABLE_TELEMETRY | LOG_TRACING => Scope::Universal,
        PASSWORD => Scope::Modes(PASSWORD_MODES),
        AUTH_TOKEN | CLIENT_ID | CLIENT_SECRET | REFRESH_TOKEN => Scope::Modes(OAUTH_MODES),
        AUTH_OKTA_URL => Scope::Modes(OKTA_MODES),
        JWT_PRIVATE_KEY | JWT_PRIVATE_KEY_PKCS8_VALUE | JWT_PRIVATE_KEY_PKCS8_PASSWORD => {
            Scope::Modes(JWT_MODES)
        }
        CLIENT_CACHE_MFA_TOKEN => Scope::Modes(MFA_MODES),
        _ => return None,
    };
    Some(scope)
}

/// Returns whether the value of `key` must never be logged or echoed back.
pub fn is_secret(key: &str) -> bool {
    matches!(
        key,
        PASSWORD
            | AUTH_TOKEN
            | CLIENT_SECRET
            | REFRESH_TOKEN
            | JWT_PRIVATE_KEY_PKCS8_VALUE
            | JWT_PRIVATE_KEY_PKCS8_PASSWORD
    )
}
