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

//! Validation of Snowflake database options.
//!
//! [`configure`] turns a raw key/value option set into [`ValidatedOptions`].
//! The authentication mode is resolved first. Validation then runs in two
//! passes: every key is checked against that mode, and then the mode's
//! required keys are collected and typed values parsed. Nothing here touches
//! the network.

use crate::auth::{AuthType, Credentials};
use crate::duration;
use crate::error::{Result, SnowflakeErrorHelper};
use crate::options::{self, Scope};
use driverbase::error::ErrorHelper;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// URI scheme used to reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

/// Log level of the backend client, set with [`options::LOG_TRACING`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Off,
}

impl LogLevel {
    const ALL: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Off,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Off => "off",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or(())
    }
}

/// The four timeouts handed to the backend client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub login: Option<Duration>,
    pub request: Option<Duration>,
    pub jwt_expire: Option<Duration>,
    pub client: Option<Duration>,
}

/// A validated, read-only Snowflake option set.
///
/// Built once by [`configure`] and shared behind an `Arc` by the database
/// and every connection created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOptions {
    values: RawOptions,
    credentials: Credentials,
    protocol: Option<Protocol>,
    port: Option<u16>,
    timeouts: Timeouts,
    tls_skip_verify: bool,
    ocsp_fail_open: Option<bool>,
    keep_session_alive: bool,
    disable_telemetry: bool,
    cache_mfa_token: bool,
    store_temp_creds: bool,
    log_level: Option<LogLevel>,
}

/// Validates a raw option set.
///
/// Unknown keys, keys that belong to a different authentication mode, and
/// values that do not parse are all rejected with an error naming the key.
pub fn configure(opts: HashMap<String, String>) -> Result<ValidatedOptions> {
    let mode = match opts.get(options::AUTH_TYPE) {
        Some(value) => value.parse::<AuthType>()?,
        None => AuthType::default(),
    };

    // First pass: every key must be known and allowed under `mode`.
    let mut keys: Vec<&String> = opts.keys().collect();
    keys.sort();
    for key in keys {
        match options::scope(key) {
            None => return Err(unknown_option(key)),
            Some(scope @ Scope::Modes(_)) if !scope.allows(mode) => {
                return Err(SnowflakeErrorHelper::invalid_argument().message(format!(
                    "option '{key}' is not valid for authentication mode '{mode}'"
                )))
            }
            Some(_) => {}
        }
    }

    // Second pass: what `mode` requires.
    let credentials = Credentials::from_options(mode, &opts)?;

    let validated = ValidatedOptions {
        protocol: parse_optional(&opts, options::PROTOCOL, parse_protocol)?,
        port: parse_optional(&opts, options::PORT, parse_port)?,
        timeouts: Timeouts {
            login: parse_optional(&opts, options::LOGIN_TIMEOUT, parse_duration)?,
            request: parse_optional(&opts, options::REQUEST_TIMEOUT, parse_duration)?,
            jwt_expire: parse_optional(&opts, options::JWT_EXPIRE_TIMEOUT, parse_duration)?,
            client: parse_optional(&opts, options::CLIENT_TIMEOUT, parse_duration)?,
        },
        tls_skip_verify: parse_flag(&opts, options::SSL_SKIP_VERIFY)?,
        ocsp_fail_open: parse_optional(&opts, options::OCSP_FAIL_OPEN_MODE, parse_bool)?,
        keep_session_alive: parse_flag(&opts, options::KEEP_SESSION_ALIVE)?,
        disable_telemetry: parse_flag(&opts, options::DISABLE_TELEMETRY)?,
        cache_mfa_token: parse_flag(&opts, options::CLIENT_CACHE_MFA_TOKEN)?,
        store_temp_creds: parse_flag(&opts, options::CLIENT_STORE_TEMP_CREDS)?,
        log_level: parse_optional(&opts, options::LOG_TRACING, parse_log_level)?,
        credentials,
        values: RawOptions(opts),
    };

    if validated.tls_skip_verify {
        tracing::warn!("TLS certificate verification is disabled");
    }
    if validated.caches_both_tokens() {
        tracing::warn!(
            "both '{}' and '{}' are set",
            options::CLIENT_CACHE_MFA_TOKEN,
            options::CLIENT_STORE_TEMP_CREDS
        );
    }
    tracing::debug!(
        auth_type = %mode,
        option_count = validated.values.0.len(),
        "validated Snowflake database options"
    );

    Ok(validated)
}

// Raw options as supplied, with secret values hidden from `Debug`.
#[derive(Clone, PartialEq)]
struct RawOptions(HashMap<String, String>);

impl fmt::Debug for RawOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.0 {
            if options::is_secret(key) {
                map.entry(key, &"****");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

pub(crate) fn unknown_option(key: &str) -> crate::error::Error {
    SnowflakeErrorHelper::invalid_argument().message(format!("unknown database option '{key}'"))
}

fn invalid_value(key: &str, value: &str, reason: impl fmt::Display) -> crate::error::Error {
    // Never echo secrets back in error messages.
    let shown = if options::is_secret(key) { "****" } else { value };
    SnowflakeErrorHelper::invalid_argument()
        .message(format!("invalid value '{shown}' for option '{key}': {reason}"))
}

fn parse_optional<T>(
    opts: &HashMap<String, String>,
    key: &str,
    parse: impl Fn(&str, &str) -> Result<T>,
) -> Result<Option<T>> {
    opts.get(key).map(|value| parse(key, value)).transpose()
}

fn parse_flag(opts: &HashMap<String, String>, key: &str) -> Result<bool> {
    Ok(parse_optional(opts, key, parse_bool)?.unwrap_or(false))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid_value(key, value, "expected 'true' or 'false'")),
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    match value.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(invalid_value(key, value, "expected a port between 1 and 65535")),
    }
}

fn parse_protocol(key: &str, value: &str) -> Result<Protocol> {
    match value {
        "http" => Ok(Protocol::Http),
        "https" => Ok(Protocol::Https),
        _ => Err(invalid_value(key, value, "expected 'http' or 'https'")),
    }
}

fn parse_log_level(key: &str, value: &str) -> Result<LogLevel> {
    value.parse().map_err(|_| {
        let levels: Vec<&str> = LogLevel::ALL.iter().map(LogLevel::as_str).collect();
        invalid_value(key, value, format!("expected one of {}", levels.join(", ")))
    })
}

fn parse_duration(key: &str, value: &str) -> Result<Duration> {
    let parsed = duration::parse_signed(value).map_err(|e| invalid_value(key, value, e))?;
    if parsed.negative {
        // TODO: reject negative timeouts once callers no longer rely on them being accepted.
        tracing::warn!(option = key, value, "negative duration, using its absolute value");
    }
    Ok(parsed.magnitude)
}

impl ValidatedOptions {
    /// Returns the raw value supplied for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.0.get(key).map(String::as_str)
    }

    /// Returns a copy of the raw option set these options were built from.
    pub fn to_raw(&self) -> HashMap<String, String> {
        self.values.0.clone()
    }

    pub fn auth_type(&self) -> AuthType {
        self.credentials.auth_type()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn uri(&self) -> Option<&str> {
        self.get(options::URI)
    }

    pub fn username(&self) -> Option<&str> {
        self.get(options::USERNAME)
    }

    pub fn account(&self) -> Option<&str> {
        self.get(options::ACCOUNT)
    }

    pub fn database(&self) -> Option<&str> {
        self.get(options::DATABASE)
    }

    pub fn schema(&self) -> Option<&str> {
        self.get(options::SCHEMA)
    }

    pub fn warehouse(&self) -> Option<&str> {
        self.get(options::WAREHOUSE)
    }

    pub fn role(&self) -> Option<&str> {
        self.get(options::ROLE)
    }

    pub fn region(&self) -> Option<&str> {
        self.get(options::REGION)
    }

    pub fn host(&self) -> Option<&str> {
        self.get(options::HOST)
    }

    pub fn application_name(&self) -> Option<&str> {
        self.get(options::APPLICATION_NAME)
    }

    pub fn protocol(&self) -> Option<Protocol> {
        self.protocol
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    pub fn tls_skip_verify(&self) -> bool {
        self.tls_skip_verify
    }

    /// `None` leaves the backend client's default in place.
    pub fn ocsp_fail_open(&self) -> Option<bool> {
        self.ocsp_fail_open
    }

    pub fn keep_session_alive(&self) -> bool {
        self.keep_session_alive
    }

    pub fn disable_telemetry(&self) -> bool {
        self.disable_telemetry
    }

    pub fn cache_mfa_token(&self) -> bool {
        self.cache_mfa_token
    }

    pub fn store_temp_creds(&self) -> bool {
        self.store_temp_creds
    }

    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level
    }

    // Both credential caches requested for one runtime.
    fn caches_both_tokens(&self) -> bool {
        self.cache_mfa_token && self.store_temp_creds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{OAuthCredentials, PrivateKey};

    fn opts(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_options_default_to_password_auth() {
        let validated = configure(HashMap::new()).unwrap();
        assert_eq!(validated.auth_type(), AuthType::Snowflake);
        assert_eq!(validated.credentials(), &Credentials::Snowflake { password: None });
        assert_eq!(validated.timeouts(), &Timeouts::default());
        assert!(!validated.tls_skip_verify());
        assert_eq!(validated.ocsp_fail_open(), None);
    }

    #[test]
    fn test_identity_options() {
        let validated = configure(opts(&[
            (options::ACCOUNT, "xy12345"),
            (options::DATABASE, "ANALYTICS"),
            (options::SCHEMA, "PUBLIC"),
            (options::WAREHOUSE, "COMPUTE_WH"),
            (options::ROLE, "SYSADMIN"),
            (options::REGION, "us-east-1"),
            (options::USERNAME, "alice"),
            (options::PASSWORD, "hunter2"),
        ]))
        .unwrap();
        assert_eq!(validated.account(), Some("xy12345"));
        assert_eq!(validated.database(), Some("ANALYTICS"));
        assert_eq!(validated.schema(), Some("PUBLIC"));
        assert_eq!(validated.warehouse(), Some("COMPUTE_WH"));
        assert_eq!(validated.role(), Some("SYSADMIN"));
        assert_eq!(validated.region(), Some("us-east-1"));
        assert_eq!(validated.username(), Some("alice"));
        assert_eq!(validated.credentials().password(), Some("hunter2"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let key = "adbc.snowflake.sql.client_option.no_such_thing";
        let err = configure(opts(&[(options::ACCOUNT, "xy12345"), (key, "1")])).unwrap_err();
        assert!(format!("{err}").contains(key));
        assert_eq!(
            err.to_adbc().status,
            adbc_core::error::Status::InvalidArguments
        );
    }

    #[test]
    fn test_login_timeout_parses() {
        let validated = configure(opts(&[(options::LOGIN_TIMEOUT, "1.5s")])).unwrap();
        assert_eq!(
            validated.timeouts().login,
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_login_timeout_rejects_garbage() {
        let err = configure(opts(&[(options::LOGIN_TIMEOUT, "banana")])).unwrap_err();
        let display = format!("{err}");
        assert!(display.contains(options::LOGIN_TIMEOUT));
        assert!(display.contains("banana"));
    }

    #[test]
    fn test_negative_durations_use_absolute_value() {
        for key in [
            options::LOGIN_TIMEOUT,
            options::REQUEST_TIMEOUT,
            options::JWT_EXPIRE_TIMEOUT,
            options::CLIENT_TIMEOUT,
        ] {
            let negative = configure(opts(&[(key, "-300ms")])).unwrap();
            let positive = configure(opts(&[(key, "300ms")])).unwrap();
            assert_eq!(negative.timeouts(), positive.timeouts(), "{key}");
        }
    }

    #[test]
    fn test_jwt_expire_timeout_under_default_mode() {
        let validated = configure(opts(&[(options::JWT_EXPIRE_TIMEOUT, "-300ms")])).unwrap();
        assert_eq!(validated.auth_type(), AuthType::Snowflake);
        assert_eq!(
            validated.timeouts().jwt_expire,
            Some(Duration::from_millis(300))
        );
    }

    #[test]
    fn test_store_temp_creds_under_default_mode() {
        let validated = configure(opts(&[
            (options::CLIENT_STORE_TEMP_CREDS, "true"),
            (options::PASSWORD, "hunter2"),
        ]))
        .unwrap();
        assert_eq!(validated.auth_type(), AuthType::Snowflake);
        assert!(validated.store_temp_creds());
        assert!(!validated.caches_both_tokens());
    }

    #[test]
    fn test_keys_for_other_modes_are_rejected() {
        let err = configure(opts(&[(options::AUTH_TOKEN, "tok")])).unwrap_err();
        let display = format!("{err}");
        assert!(display.contains(options::AUTH_TOKEN));
        assert!(display.contains(options::auth_type::DEFAULT));

        let err = configure(opts(&[
            (options::AUTH_TYPE, options::auth_type::OAUTH),
            (options::AUTH_TOKEN, "tok"),
            (options::JWT_PRIVATE_KEY, "/keys/rsa.p8"),
        ]))
        .unwrap_err();
        assert!(format!("{err}").contains(options::JWT_PRIVATE_KEY));

        let err = configure(opts(&[
            (options::AUTH_TYPE, options::auth_type::JWT),
            (options::JWT_PRIVATE_KEY, "/keys/rsa.p8"),
            (options::PASSWORD, "hunter2"),
        ]))
        .unwrap_err();
        assert!(format!("{err}").contains(options::PASSWORD));
    }

    // Options each mode needs before any other key can be checked.
    fn mode_requirements(mode: AuthType) -> &'static [(&'static str, &'static str)] {
        match mode {
            AuthType::OAuth => &[(options::AUTH_TOKEN, "tok")],
            AuthType::Okta => &[(options::AUTH_OKTA_URL, "https://x.okta.com")],
            AuthType::Jwt => &[(options::JWT_PRIVATE_KEY, "/keys/rsa.p8")],
            AuthType::Snowflake | AuthType::ExternalBrowser | AuthType::UsernamePasswordMfa => &[],
        }
    }

    fn valid_value(key: &str) -> &'static str {
        match key {
            options::LOGIN_TIMEOUT
            | options::REQUEST_TIMEOUT
            | options::JWT_EXPIRE_TIMEOUT
            | options::CLIENT_TIMEOUT => "300ms",
            options::SSL_SKIP_VERIFY
            | options::OCSP_FAIL_OPEN_MODE
            | options::KEEP_SESSION_ALIVE
            | options::DISABLE_TELEMETRY
            | options::CLIENT_CACHE_MFA_TOKEN
            | options::CLIENT_STORE_TEMP_CREDS => "true",
            options::PORT => "443",
            options::PROTOCOL => "https",
            options::LOG_TRACING => "warn",
            _ => "value",
        }
    }

    fn with_mode(mode: AuthType, key: &str) -> HashMap<String, String> {
        let mut set = opts(mode_requirements(mode));
        set.insert(options::AUTH_TYPE.into(), mode.as_str().into());
        set.insert(key.into(), valid_value(key).into());
        set
    }

    #[test]
    fn test_universal_keys_accepted_under_every_mode() {
        for key in options::ALL.iter().copied() {
            if key == options::AUTH_TYPE || options::scope(key) != Some(Scope::Universal) {
                continue;
            }
            for mode in AuthType::ALL {
                let validated = configure(with_mode(mode, key))
                    .unwrap_or_else(|e| panic!("{key} under {mode}: {e}"));
                assert_eq!(validated.auth_type(), mode);
                assert_eq!(validated.get(key), Some(valid_value(key)));
            }
        }
    }

    #[test]
    fn test_mode_specific_keys_rejected_under_other_modes() {
        for key in options::ALL.iter().copied() {
            let Some(scope @ Scope::Modes(_)) = options::scope(key) else {
                continue;
            };
            for mode in AuthType::ALL.into_iter().filter(|mode| !scope.allows(*mode)) {
                let err = configure(with_mode(mode, key)).unwrap_err();
                let display = format!("{err}");
                assert!(display.contains(key), "{display}");
                assert!(display.contains(mode.as_str()), "{display}");
            }
        }
    }

    #[test]
    fn test_invalid_auth_type() {
        let err = configure(opts(&[(options::AUTH_TYPE, "auth_kerberos")])).unwrap_err();
        assert!(format!("{err}").contains("auth_kerberos"));
    }

    #[test]
    fn test_mode_requirements() {
        assert!(configure(opts(&[(options::AUTH_TYPE, options::auth_type::OAUTH)])).is_err());
        assert!(configure(opts(&[(options::AUTH_TYPE, options::auth_type::JWT)])).is_err());
        assert!(configure(opts(&[(options::AUTH_TYPE, options::auth_type::OKTA)])).is_err());

        let validated = configure(opts(&[
            (options::AUTH_TYPE, options::auth_type::OAUTH),
            (options::AUTH_TOKEN, "tok"),
            (options::CLIENT_STORE_TEMP_CREDS, "true"),
        ]))
        .unwrap();
        assert_eq!(
            validated.credentials(),
            &Credentials::OAuth(OAuthCredentials::Token(crate::auth::Secret::new("tok")))
        );
        assert!(validated.store_temp_creds());

        let validated = configure(opts(&[
            (options::AUTH_TYPE, options::auth_type::JWT),
            (options::JWT_PRIVATE_KEY, "/keys/rsa.p8"),
        ]))
        .unwrap();
        assert_eq!(
            validated.credentials(),
            &Credentials::Jwt(PrivateKey::File("/keys/rsa.p8".into()))
        );
    }

    #[test]
    fn test_typed_values() {
        let validated = configure(opts(&[
            (options::PROTOCOL, "http"),
            (options::PORT, "8080"),
            (options::HOST, "localhost"),
            (options::SSL_SKIP_VERIFY, "true"),
            (options::OCSP_FAIL_OPEN_MODE, "false"),
            (options::KEEP_SESSION_ALIVE, "true"),
        ]))
        .unwrap();
        assert_eq!(validated.protocol(), Some(Protocol::Http));
        assert_eq!(validated.port(), Some(8080));
        assert_eq!(validated.host(), Some("localhost"));
        assert!(validated.tls_skip_verify());
        assert_eq!(validated.ocsp_fail_open(), Some(false));
        assert!(validated.keep_session_alive());
    }

    #[test]
    fn test_invalid_typed_values() {
        for (key, value) in [
            (options::PROTOCOL, "ftp"),
            (options::PORT, "0"),
            (options::PORT, "70000"),
            (options::PORT, "eighty"),
            (options::SSL_SKIP_VERIFY, "yes"),
            (options::LOG_TRACING, "verbose"),
        ] {
            let err = configure(opts(&[(key, value)])).unwrap_err();
            let display = format!("{err}");
            assert!(display.contains(key), "{display}");
            assert!(display.contains(value), "{display}");
        }
    }

    #[test]
    fn test_mfa_caching_flag() {
        let validated = configure(opts(&[
            (options::AUTH_TYPE, options::auth_type::USERNAME_PASSWORD_MFA),
            (options::CLIENT_CACHE_MFA_TOKEN, "true"),
            (options::PASSWORD, "hunter2"),
        ]))
        .unwrap();
        assert!(validated.cache_mfa_token());
        assert!(!validated.store_temp_creds());
        assert!(!validated.caches_both_tokens());
    }

    #[test]
    fn test_both_credential_caches_are_flagged() {
        let validated = configure(opts(&[
            (options::AUTH_TYPE, options::auth_type::USERNAME_PASSWORD_MFA),
            (options::CLIENT_CACHE_MFA_TOKEN, "true"),
            (options::CLIENT_STORE_TEMP_CREDS, "true"),
        ]))
        .unwrap();
        assert!(validated.cache_mfa_token());
        assert!(validated.store_temp_creds());
        assert!(validated.caches_both_tokens());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let validated = configure(opts(&[(options::PASSWORD, "hunter2")])).unwrap();
        assert!(!format!("{validated:?}").contains("hunter2"));
    }

    #[test]
    fn test_raw_values_are_kept() {
        let input = opts(&[(options::LOGIN_TIMEOUT, "-2s"), (options::ACCOUNT, "xy12345")]);
        let validated = configure(input.clone()).unwrap();
        assert_eq!(validated.get(options::LOGIN_TIMEOUT), Some("-2s"));
        assert_eq!(validated.to_raw(), input);
    }
}
