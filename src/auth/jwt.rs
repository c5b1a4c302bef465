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

//! Key pair (JWT) authentication.

use super::{missing, AuthType, Secret};
use crate::error::{Result, SnowflakeErrorHelper};
use crate::options;
use driverbase::error::ErrorHelper;
use std::collections::HashMap;
use std::path::PathBuf;

/// Private key material used to sign the login JWT.
///
/// The key is only located here; reading and decoding it is left to the
/// backend client at connect time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateKey {
    /// Path to a PEM file holding a PKCS1 RSA private key.
    File(PathBuf),
    /// A PKCS8 key passed inline, optionally encrypted.
    Pkcs8 {
        value: Secret,
        password: Option<Secret>,
    },
}

impl PrivateKey {
    pub(crate) fn from_options(opts: &HashMap<String, String>) -> Result<Self> {
        let path = opts.get(options::JWT_PRIVATE_KEY);
        let value = opts.get(options::JWT_PRIVATE_KEY_PKCS8_VALUE);
        let password = opts.get(options::JWT_PRIVATE_KEY_PKCS8_PASSWORD);

        match (path, value) {
            (Some(_), Some(_)) => Err(SnowflakeErrorHelper::invalid_argument().message(format!(
                "options '{}' and '{}' cannot both be set",
                options::JWT_PRIVATE_KEY,
                options::JWT_PRIVATE_KEY_PKCS8_VALUE
            ))),
            (Some(_), None) if password.is_some() => {
                Err(SnowflakeErrorHelper::invalid_argument().message(format!(
                    "option '{}' is only valid together with '{}'",
                    options::JWT_PRIVATE_KEY_PKCS8_PASSWORD,
                    options::JWT_PRIVATE_KEY_PKCS8_VALUE
                )))
            }
            (Some(path), None) => Ok(PrivateKey::File(PathBuf::from(path))),
            (None, Some(value)) => Ok(PrivateKey::Pkcs8 {
                value: Secret::new(value.as_str()),
                password: password.map(|p| Secret::new(p.as_str())),
            }),
            (None, None) => Err(missing(AuthType::Jwt, options::JWT_PRIVATE_KEY)),
        }
    }
}
