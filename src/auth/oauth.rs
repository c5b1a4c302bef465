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

//! OAuth authentication.

use super::{missing, AuthType, Secret};
use crate::error::{Result, SnowflakeErrorHelper};
use crate::options;
use driverbase::error::ErrorHelper;
use std::collections::HashMap;

/// Credentials for `auth_oauth`.
///
/// Either a ready-made access token, or a client registration plus a refresh
/// token that the backend client exchanges for an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthCredentials {
    Token(Secret),
    RefreshToken {
        client_id: String,
        client_secret: Secret,
        refresh_token: Secret,
    },
}

impl OAuthCredentials {
    pub(crate) fn from_options(opts: &HashMap<String, String>) -> Result<Self> {
        if let Some(token) = opts.get(options::AUTH_TOKEN) {
            return Ok(OAuthCredentials::Token(Secret::new(token.as_str())));
        }

        match (
            opts.get(options::CLIENT_ID),
            opts.get(options::CLIENT_SECRET),
            opts.get(options::REFRESH_TOKEN),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Ok(OAuthCredentials::RefreshToken {
                    client_id: client_id.clone(),
                    client_secret: Secret::new(client_secret.as_str()),
                    refresh_token: Secret::new(refresh_token.as_str()),
                })
            }
            (None, None, None) => Err(missing(AuthType::OAuth, options::AUTH_TOKEN)),
            _ => Err(SnowflakeErrorHelper::invalid_argument().message(format!(
                "authentication mode '{}' requires all of '{}', '{}' and '{}' when '{}' is not set",
                AuthType::OAuth,
                options::CLIENT_ID,
                options::CLIENT_SECRET,
                options::REFRESH_TOKEN,
                options::AUTH_TOKEN,
            ))),
        }
    }

    /// Returns the access token, if one was configured directly.
    pub fn token(&self) -> Option<&str> {
        match self {
            OAuthCredentials::Token(token) => Some(token.expose()),
            OAuthCredentials::RefreshToken { .. } => None,
        }
    }
}
