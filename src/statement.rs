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

//! Statement implementation for the Snowflake ADBC driver.

use crate::error::SnowflakeErrorHelper;
use crate::options;
use adbc_core::error::Result;
use adbc_core::options::{OptionStatement, OptionValue};
use adbc_core::Optionable;
use arrow_array::{RecordBatch, RecordBatchIterator, RecordBatchReader};
use arrow_schema::{ArrowError, Schema};
use driverbase::error::ErrorHelper;

type EmptyReader =
    RecordBatchIterator<std::vec::IntoIter<std::result::Result<RecordBatch, ArrowError>>>;

/// A SQL statement created from a Connection.
///
/// Query text and the query tag are recorded here; running them is the
/// backend client's job.
#[derive(Debug, Default)]
pub struct Statement {
    query: Option<String>,
    query_tag: Option<String>,
}

impl Statement {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the current SQL query.
    pub fn sql_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn query_tag(&self) -> Option<&str> {
        self.query_tag.as_deref()
    }

    fn require_query(&self, operation: &str) -> Result<&str> {
        self.query.as_deref().ok_or_else(|| {
            SnowflakeErrorHelper::invalid_state()
                .message(format!("{operation}: no SQL query has been set"))
                .to_adbc()
        })
    }
}

fn backend_required(operation: &str) -> adbc_core::error::Error {
    SnowflakeErrorHelper::not_implemented()
        .message(format!("{operation} requires a backend session"))
        .to_adbc()
}

impl Optionable for Statement {
    type Option = OptionStatement;

    fn set_option(&mut self, key: Self::Option, value: OptionValue) -> Result<()> {
        match (key.as_ref(), value) {
            (options::STATEMENT_QUERY_TAG, OptionValue::String(tag)) => {
                self.query_tag = Some(tag);
                Ok(())
            }
            (options::STATEMENT_QUERY_TAG, other) => {
                Err(SnowflakeErrorHelper::set_invalid_option(&key, &other).to_adbc())
            }
            _ => Err(SnowflakeErrorHelper::set_unknown_option(&key).to_adbc()),
        }
    }

    fn get_option_string(&self, key: Self::Option) -> Result<String> {
        match key.as_ref() {
            options::STATEMENT_QUERY_TAG => Ok(self.query_tag.clone().unwrap_or_default()),
            _ => Err(SnowflakeErrorHelper::get_unknown_option(&key).to_adbc()),
        }
    }

    fn get_option_bytes(&self, key: Self::Option) -> Result<Vec<u8>> {
        Err(SnowflakeErrorHelper::get_unknown_option(&key).to_adbc())
    }

    fn get_option_int(&self, key: Self::Option) -> Result<i64> {
        Err(SnowflakeErrorHelper::get_unknown_option(&key).to_adbc())
    }

    fn get_option_double(&self, key: Self::Option) -> Result<f64> {
        Err(SnowflakeErrorHelper::get_unknown_option(&key).to_adbc())
    }
}

impl adbc_core::Statement for Statement {
    fn set_sql_query(&mut self, query: impl AsRef<str>) -> Result<()> {
        self.query = Some(query.as_ref().to_string());
        Ok(())
    }

    fn set_substrait_plan(&mut self, _plan: impl AsRef<[u8]>) -> Result<()> {
        Err(SnowflakeErrorHelper::not_implemented()
            .message("Substrait plans")
            .to_adbc())
    }

    fn prepare(&mut self) -> Result<()> {
        self.require_query("prepare")?;
        Err(backend_required("prepare"))
    }

    fn get_parameter_schema(&self) -> Result<Schema> {
        Err(backend_required("get_parameter_schema"))
    }

    fn bind(&mut self, _batch: RecordBatch) -> Result<()> {
        Err(backend_required("bind"))
    }

    fn bind_stream(&mut self, _stream: Box<dyn RecordBatchReader + Send>) -> Result<()> {
        Err(backend_required("bind_stream"))
    }

    fn execute(&mut self) -> Result<impl RecordBatchReader + Send> {
        self.require_query("execute")?;
        Err::<EmptyReader, _>(backend_required("execute"))
    }

    fn execute_update(&mut self) -> Result<Option<i64>> {
        self.require_query("execute_update")?;
        Err(backend_required("execute_update"))
    }

    fn execute_schema(&mut self) -> Result<Schema> {
        self.require_query("execute_schema")?;
        Err(backend_required("execute_schema"))
    }

    fn execute_partitions(&mut self) -> Result<adbc_core::PartitionedResult> {
        self.require_query("execute_partitions")?;
        Err(backend_required("execute_partitions"))
    }

    fn cancel(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbc_core::error::Status;
    use adbc_core::Statement as _;

    fn query_tag() -> OptionStatement {
        OptionStatement::Other(options::STATEMENT_QUERY_TAG.into())
    }

    #[test]
    fn test_statement_set_query() {
        let mut stmt = Statement::new();
        stmt.set_sql_query("SELECT 1").unwrap();
        assert_eq!(stmt.sql_query(), Some("SELECT 1"));
    }

    #[test]
    fn test_statement_execute_without_query() {
        let mut stmt = Statement::new();
        let err = stmt.execute_update().unwrap_err();
        assert_eq!(err.status, Status::InvalidState);
    }

    #[test]
    fn test_statement_execute_needs_backend() {
        let mut stmt = Statement::new();
        stmt.set_sql_query("SELECT 1").unwrap();
        let err = stmt.execute_update().unwrap_err();
        assert_eq!(err.status, Status::NotImplemented);
    }

    #[test]
    fn test_statement_query_tag() {
        let mut stmt = Statement::new();
        assert_eq!(stmt.get_option_string(query_tag()).unwrap(), "");
        stmt.set_option(query_tag(), OptionValue::String("nightly".into()))
            .unwrap();
        assert_eq!(stmt.query_tag(), Some("nightly"));
        assert_eq!(stmt.get_option_string(query_tag()).unwrap(), "nightly");
        assert!(stmt.set_option(query_tag(), OptionValue::Int(1)).is_err());
    }

    #[test]
    fn test_statement_unknown_option() {
        let mut stmt = Statement::new();
        assert!(stmt
            .set_option(
                OptionStatement::Other("adbc.snowflake.statement.bogus".into()),
                OptionValue::String("x".into())
            )
            .is_err());
    }
}
