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

//! Authentication modes for the Snowflake ADBC driver.

pub mod jwt;
pub mod oauth;

pub use jwt::PrivateKey;
pub use oauth::OAuthCredentials;

use crate::error::{Result, SnowflakeErrorHelper};
use crate::options::{self, auth_type};
use driverbase::error::ErrorHelper;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The authentication mode selected by [`options::AUTH_TYPE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// Username and password.
    #[default]
    Snowflake,
    OAuth,
    /// SSO through a browser window.
    ExternalBrowser,
    /// Native Okta SSO.
    Okta,
    /// Key pair authentication with a signed JWT.
    Jwt,
    UsernamePasswordMfa,
}

impl AuthType {
    pub const ALL: [AuthType; 6] = [
        AuthType::Snowflake,
        AuthType::OAuth,
        AuthType::ExternalBrowser,
        AuthType::Okta,
        AuthType::Jwt,
        AuthType::UsernamePasswordMfa,
    ];

    /// Returns the option value that selects this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::Snowflake => auth_type::DEFAULT,
            AuthType::OAuth => auth_type::OAUTH,
            AuthType::ExternalBrowser => auth_type::EXTERNAL_BROWSER,
            AuthType::Okta => auth_type::OKTA,
            AuthType::Jwt => auth_type::JWT,
            AuthType::UsernamePasswordMfa => auth_type::USERNAME_PASSWORD_MFA,
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        AuthType::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                SnowflakeErrorHelper::invalid_argument().message(format!(
                    "invalid value '{s}' for option '{}'",
                    options::AUTH_TYPE
                ))
            })
    }
}

/// Mode-specific secrets resolved from the option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Snowflake { password: Option<Secret> },
    OAuth(OAuthCredentials),
    ExternalBrowser,
    Okta { url: String, password: Option<Secret> },
    Jwt(PrivateKey),
    UsernamePasswordMfa { password: Option<Secret> },
}

impl Credentials {
    /// Collects the credentials required by `mode` from already scoped options.
    ///
    /// Fails when a key the mode needs is missing.
    pub fn from_options(mode: AuthType, opts: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| opts.get(key).cloned();
        let password = get(options::PASSWORD).map(Secret::new);

        match mode {
            AuthType::Snowflake => Ok(Credentials::Snowflake { password }),
            AuthType::OAuth => OAuthCredentials::from_options(opts).map(Credentials::OAuth),
            AuthType::ExternalBrowser => Ok(Credentials::ExternalBrowser),
            AuthType::Okta => {
                let url = get(options::AUTH_OKTA_URL)
                    .ok_or_else(|| missing(mode, options::AUTH_OKTA_URL))?;
                Ok(Credentials::Okta { url, password })
            }
            AuthType::Jwt => PrivateKey::from_options(opts).map(Credentials::Jwt),
            AuthType::UsernamePasswordMfa => Ok(Credentials::UsernamePasswordMfa { password }),
        }
    }

    /// Returns the mode these credentials belong to.
    pub fn auth_type(&self) -> AuthType {
        match self {
            Credentials::Snowflake { .. } => AuthType::Snowflake,
            Credentials::OAuth(_) => AuthType::OAuth,
            Credentials::ExternalBrowser => AuthType::ExternalBrowser,
            Credentials::Okta { .. } => AuthType::Okta,
            Credentials::Jwt(_) => AuthType::Jwt,
            Credentials::UsernamePasswordMfa { .. } => AuthType::UsernamePasswordMfa,
        }
    }

    /// Returns the password, for the modes that use one.
    pub fn password(&self) -> Option<&str> {
        match self {
            Credentials::Snowflake { password }
            | Credentials::Okta { password, .. }
            | Credentials::UsernamePasswordMfa { password } => {
                password.as_ref().map(Secret::expose)
            }
            _ => None,
        }
    }
}

pub(crate) fn missing(mode: AuthType, key: &str) -> crate::error::Error {
    SnowflakeErrorHelper::invalid_argument()
        .message(format!("authentication mode '{mode}' requires option '{key}'"))
}

/// A string that never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}
