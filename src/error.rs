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

//! Error types for the Snowflake ADBC driver.
//!
//! Configuration errors use the driverbase error framework, like the other
//! driverbase drivers. Errors coming back from the backend client are mapped
//! onto the ADBC taxonomy by [`normalize`], which keeps the vendor code and
//! SQLSTATE the backend reported.

use adbc_core::error::Status;
use driverbase::error::ErrorHelper;
use std::fmt;

/// Error helper for Snowflake driver errors.
///
/// This type implements the driverbase `ErrorHelper` trait to provide
/// consistent error formatting with the driver name prefix.
#[derive(Clone)]
pub struct SnowflakeErrorHelper;

impl ErrorHelper for SnowflakeErrorHelper {
    const NAME: &'static str = "Snowflake";
}

/// The error type for Snowflake ADBC driver operations.
pub type Error = driverbase::error::Error<SnowflakeErrorHelper>;

/// A convenient alias for Results with Snowflake errors.
pub type Result<T> = std::result::Result<T, Error>;

/// SQLSTATE the backend reports when a table or other object does not exist.
pub const SQLSTATE_OBJECT_NOT_FOUND: &str = "42S02";

/// A five byte SQLSTATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SqlState([u8; 5]);

impl SqlState {
    /// Builds a SQLSTATE from the backend's string form.
    ///
    /// Returns `None` for an empty string. Longer strings are truncated on a
    /// character boundary and shorter ones zero padded.
    pub fn from_backend(state: &str) -> Option<Self> {
        if state.is_empty() {
            return None;
        }
        let mut bytes = [0u8; 5];
        let mut len = state.len().min(5);
        while !state.is_char_boundary(len) {
            len -= 1;
        }
        bytes[..len].copy_from_slice(&state.as_bytes()[..len]);
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 5] {
        &self.0
    }

    /// Returns the SQLSTATE as text, without zero padding.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(5);
        std::str::from_utf8(&self.0[..end]).unwrap_or("")
    }
}

impl fmt::Display for SqlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error as reported by the Snowflake backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnowflakeError {
    pub number: i32,
    pub sql_state: String,
    pub query_id: String,
    pub message: String,
}

impl fmt::Display for SnowflakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.number)?;
        if !self.sql_state.is_empty() {
            write!(f, " ({})", self.sql_state)?;
        }
        if !self.query_id.is_empty() {
            write!(f, ": {}", self.query_id)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for SnowflakeError {}

/// A backend failure mapped onto the ADBC error taxonomy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct NormalizedError {
    pub status: Status,
    pub message: String,
    /// Backend error number, when the backend reported one.
    pub vendor_code: Option<i32>,
    pub sql_state: Option<SqlState>,
}

impl NormalizedError {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            vendor_code: None,
            sql_state: None,
        }
    }
}

impl From<NormalizedError> for adbc_core::error::Error {
    fn from(err: NormalizedError) -> Self {
        let mut adbc = adbc_core::error::Error::with_message_and_status(err.message, err.status);
        adbc.vendor_code = err.vendor_code.unwrap_or(0);
        if let Some(state) = err.sql_state {
            for (dst, src) in adbc.sqlstate.iter_mut().zip(state.as_bytes()) {
                *dst = *src as _;
            }
        }
        adbc
    }
}

/// The shapes an error can have when it crosses back from the backend client.
#[derive(Debug)]
pub enum BackendError {
    /// Already mapped by an inner layer.
    Normalized(NormalizedError),
    Snowflake(SnowflakeError),
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl From<NormalizedError> for BackendError {
    fn from(err: NormalizedError) -> Self {
        BackendError::Normalized(err)
    }
}

impl From<SnowflakeError> for BackendError {
    fn from(err: SnowflakeError) -> Self {
        BackendError::Snowflake(err)
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::Other(Box::new(err))
    }
}

impl From<String> for BackendError {
    fn from(message: String) -> Self {
        BackendError::Other(message.into())
    }
}

/// Maps a backend error onto the ADBC taxonomy, using `status` unless the
/// error says otherwise.
///
/// `None` maps to `None`. An already normalized error only gets its status
/// replaced. A backend error keeps its message, number and SQLSTATE, and is
/// always classified [`Status::NotFound`] when its SQLSTATE is
/// [`SQLSTATE_OBJECT_NOT_FOUND`].
pub fn normalize(status: Status, err: Option<BackendError>) -> Option<NormalizedError> {
    err.map(|err| normalize_shape(status, err))
}

fn normalize_shape(status: Status, err: BackendError) -> NormalizedError {
    match err {
        BackendError::Normalized(mut e) => {
            e.status = status;
            e
        }
        BackendError::Snowflake(e) => {
            let status = if e.sql_state == SQLSTATE_OBJECT_NOT_FOUND {
                Status::NotFound
            } else {
                status
            };
            NormalizedError {
                status,
                message: e.to_string(),
                vendor_code: Some(e.number),
                sql_state: SqlState::from_backend(&e.sql_state),
            }
        }
        BackendError::Other(e) => NormalizedError::new(status, e.to_string()),
    }
}

/// Extension for normalizing the error side of backend client results.
pub trait NormalizeExt<T> {
    fn normalize_err(self, status: Status) -> std::result::Result<T, NormalizedError>;
}

impl<T, E: Into<BackendError>> NormalizeExt<T> for std::result::Result<T, E> {
    fn normalize_err(self, status: Status) -> std::result::Result<T, NormalizedError> {
        self.map_err(|e| normalize_shape(status, e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_missing() -> SnowflakeError {
        SnowflakeError {
            number: 2003,
            sql_state: "42S02".into(),
            query_id: "01b2-0000".into(),
            message: "Object 'FOO' does not exist or not authorized.".into(),
        }
    }

    #[test]
    fn test_error_display() {
        let error = SnowflakeErrorHelper::invalid_argument().message("invalid account name");
        let display = format!("{error}");
        assert!(display.contains("Snowflake"));
        assert!(display.contains("invalid account name"));
    }

    #[test]
    fn test_error_to_adbc() {
        let error = SnowflakeErrorHelper::not_implemented().message("bulk ingest");
        let adbc_error = error.to_adbc();
        assert_eq!(adbc_error.status, Status::NotImplemented);
        assert!(adbc_error.message.contains("Snowflake"));
    }

    #[test]
    fn test_snowflake_error_display() {
        assert_eq!(
            table_missing().to_string(),
            "002003 (42S02): 01b2-0000: Object 'FOO' does not exist or not authorized."
        );
        let bare = SnowflakeError {
            number: 390100,
            sql_state: String::new(),
            query_id: String::new(),
            message: "Incorrect username or password was specified.".into(),
        };
        assert_eq!(
            bare.to_string(),
            "390100: Incorrect username or password was specified."
        );
    }

    #[test]
    fn test_normalize_none_is_none() {
        for status in [Status::Internal, Status::NotFound, Status::Unknown] {
            assert_eq!(normalize(status, None), None);
        }
    }

    #[test]
    fn test_normalize_not_found_override() {
        for status in [Status::Internal, Status::IO, Status::InvalidArguments] {
            let err = normalize(status, Some(table_missing().into())).unwrap();
            assert_eq!(err.status, Status::NotFound);
            assert_eq!(err.vendor_code, Some(2003));
            assert_eq!(err.sql_state.unwrap().as_str(), "42S02");
            assert!(err.message.contains("does not exist"));
        }
    }

    #[test]
    fn test_normalize_backend_error_keeps_default_status() {
        let err = SnowflakeError {
            number: 1003,
            sql_state: "42000".into(),
            query_id: String::new(),
            message: "SQL compilation error".into(),
        };
        let normalized = normalize(Status::InvalidArguments, Some(err.clone().into())).unwrap();
        assert_eq!(normalized.status, Status::InvalidArguments);
        assert_eq!(normalized.message, err.to_string());
        assert_eq!(normalized.vendor_code, Some(1003));
        assert_eq!(normalized.sql_state, SqlState::from_backend("42000"));
    }

    #[test]
    fn test_normalize_retags_normalized_error() {
        let inner = NormalizedError {
            status: Status::NotFound,
            message: "table gone".into(),
            vendor_code: Some(0),
            sql_state: SqlState::from_backend("42S02"),
        };
        let outer = normalize(Status::Internal, Some(inner.clone().into())).unwrap();
        assert_eq!(outer.status, Status::Internal);
        assert_eq!(outer.message, inner.message);
        assert_eq!(outer.vendor_code, inner.vendor_code);
        assert_eq!(outer.sql_state, inner.sql_state);
    }

    #[test]
    fn test_normalize_other_error_has_no_diagnostics() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let err = normalize(Status::IO, Some(io.into())).unwrap();
        assert_eq!(err.status, Status::IO);
        assert_eq!(err.message, "connection reset");
        assert_eq!(err.vendor_code, None);
        assert_eq!(err.sql_state, None);
    }

    #[test]
    fn test_empty_sql_state_is_absent() {
        let err = SnowflakeError {
            number: 0,
            sql_state: String::new(),
            query_id: String::new(),
            message: "oops".into(),
        };
        let normalized = normalize(Status::Unknown, Some(err.into())).unwrap();
        assert_eq!(normalized.vendor_code, Some(0));
        assert_eq!(normalized.sql_state, None);
    }

    #[test]
    fn test_sql_state_truncates_and_pads() {
        assert_eq!(SqlState::from_backend("42S02XYZ").unwrap().as_str(), "42S02");
        let split = SqlState::from_backend("4200é").unwrap();
        assert_eq!(split.as_str(), "4200");
        assert_eq!(split.as_bytes(), b"4200\0");
        let short = SqlState::from_backend("HY").unwrap();
        assert_eq!(short.as_bytes(), &[b'H', b'Y', 0, 0, 0]);
        assert_eq!(short.to_string(), "HY");
    }

    #[test]
    fn test_normalize_ext() {
        let ok: std::result::Result<u8, SnowflakeError> = Ok(7);
        assert_eq!(ok.normalize_err(Status::Internal).unwrap(), 7);

        let failed: std::result::Result<u8, SnowflakeError> = Err(table_missing());
        let err = failed.normalize_err(Status::Internal).unwrap_err();
        assert_eq!(err.status, Status::NotFound);
    }

    #[test]
    fn test_normalized_error_into_adbc() {
        let adbc: adbc_core::error::Error =
            normalize(Status::Internal, Some(table_missing().into()))
                .unwrap()
                .into();
        assert_eq!(adbc.status, Status::NotFound);
        assert_eq!(adbc.vendor_code, 2003);
        assert_eq!(adbc.sqlstate[0] as u8, b'4');
        assert_eq!(adbc.sqlstate[4] as u8, b'2');

        let bare: adbc_core::error::Error = NormalizedError::new(Status::IO, "reset").into();
        assert_eq!(bare.vendor_code, 0);
        assert!(bare.sqlstate.iter().all(|b| *b == 0));
    }
}
