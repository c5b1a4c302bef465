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

//! Connection implementation for the Snowflake ADBC driver.

use crate::client::ClientConfig;
use crate::config::ValidatedOptions;
use crate::driver::DriverInfo;
use crate::error::SnowflakeErrorHelper;
use crate::statement::Statement;
use adbc_core::error::Result;
use adbc_core::options::{InfoCode, ObjectDepth, OptionConnection, OptionValue};
use adbc_core::Optionable;
use arrow_array::{RecordBatch, RecordBatchIterator, RecordBatchReader};
use arrow_schema::{ArrowError, Schema};
use driverbase::error::ErrorHelper;
use std::collections::HashSet;
use std::sync::Arc;

/// A connection to Snowflake.
///
/// Holds the option snapshot of the Database it came from and the backend
/// client parameters derived from it.
#[derive(Debug)]
pub struct Connection {
    info: Arc<DriverInfo>,
    options: Arc<ValidatedOptions>,
    client: ClientConfig,
    auto_commit: bool,
}

/// Type alias for our empty reader used in stub implementations.
type EmptyReader =
    RecordBatchIterator<std::vec::IntoIter<std::result::Result<RecordBatch, ArrowError>>>;

impl Connection {
    pub(crate) fn new(info: Arc<DriverInfo>, options: Arc<ValidatedOptions>) -> Self {
        let client = ClientConfig::new(&options, &info);
        tracing::debug!(
            account = client.account.as_deref().unwrap_or_default(),
            authenticator = %client.authenticator,
            "created Snowflake connection"
        );
        Self {
            info,
            options,
            client,
            auto_commit: true,
        }
    }

    /// Returns the option snapshot this connection was created with.
    pub fn options(&self) -> &Arc<ValidatedOptions> {
        &self.options
    }

    /// Returns the parameters for the backend client.
    pub fn client_config(&self) -> &ClientConfig {
        &self.client
    }

    pub fn auto_commit(&self) -> bool {
        self.auto_commit
    }
}

fn backend_required(operation: &str) -> adbc_core::error::Error {
    SnowflakeErrorHelper::not_implemented()
        .message(format!("{operation} requires a backend session"))
        .to_adbc()
}

impl Optionable for Connection {
    type Option = OptionConnection;

    fn set_option(&mut self, key: Self::Option, value: OptionValue) -> Result<()> {
        match (&key, &value) {
            (OptionConnection::AutoCommit, OptionValue::String(v)) if v == "true" => {
                self.auto_commit = true;
                Ok(())
            }
            (OptionConnection::AutoCommit, OptionValue::String(v)) if v == "false" => {
                self.auto_commit = false;
                Ok(())
            }
            (OptionConnection::AutoCommit, _) => {
                Err(SnowflakeErrorHelper::set_invalid_option(&key, &value).to_adbc())
            }
            _ => Err(SnowflakeErrorHelper::set_unknown_option(&key).to_adbc()),
        }
    }

    fn get_option_string(&self, key: Self::Option) -> Result<String> {
        match key {
            OptionConnection::AutoCommit => Ok(self.auto_commit.to_string()),
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

impl adbc_core::Connection for Connection {
    type StatementType = Statement;

    fn new_statement(&mut self) -> Result<Self::StatementType> {
        Ok(Statement::new())
    }

    fn cancel(&mut self) -> Result<()> {
        Ok(())
    }

    fn get_info(&self, codes: Option<HashSet<InfoCode>>) -> Result<impl RecordBatchReader + Send> {
        use driverbase::InfoBuilder;

        let mut builder = InfoBuilder::new();
        let wanted = |code: &InfoCode| codes.as_ref().map_or(true, |c| c.contains(code));

        for code in self.info.supported_codes() {
            if !wanted(&code) {
                continue;
            }
            if let Some(value) = self.info.value(&code) {
                builder.add_string(code as u32, value);
            }
        }

        Ok(builder.build())
    }

    fn get_objects(
        &self,
        _depth: ObjectDepth,
        _catalog: Option<&str>,
        _db_schema: Option<&str>,
        _table_name: Option<&str>,
        _table_type: Option<Vec<&str>>,
        _column_name: Option<&str>,
    ) -> Result<impl RecordBatchReader + Send> {
        Err::<EmptyReader, _>(backend_required("get_objects"))
    }

    fn get_table_schema(
        &self,
        _catalog: Option<&str>,
        _db_schema: Option<&str>,
        _table_name: &str,
    ) -> Result<Schema> {
        Err(backend_required("get_table_schema"))
    }

    fn get_table_types(&self) -> Result<impl RecordBatchReader + Send> {
        Err::<EmptyReader, _>(backend_required("get_table_types"))
    }

    fn read_partition(
        &self,
        _partition: impl AsRef<[u8]>,
    ) -> Result<impl RecordBatchReader + Send> {
        Err::<EmptyReader, _>(backend_required("read_partition"))
    }

    fn commit(&mut self) -> Result<()> {
        if self.auto_commit {
            return Err(SnowflakeErrorHelper::invalid_state()
                .message("cannot commit when autocommit is enabled")
                .to_adbc());
        }
        Err(backend_required("commit"))
    }

    fn rollback(&mut self) -> Result<()> {
        if self.auto_commit {
            return Err(SnowflakeErrorHelper::invalid_state()
                .message("cannot rollback when autocommit is enabled")
                .to_adbc());
        }
        Err(backend_required("rollback"))
    }

    fn get_statistic_names(&self) -> Result<impl RecordBatchReader + Send> {
        Err::<EmptyReader, _>(backend_required("get_statistic_names"))
    }

    fn get_statistics(
        &self,
        _catalog: Option<&str>,
        _db_schema: Option<&str>,
        _table_name: Option<&str>,
        _approximate: bool,
    ) -> Result<impl RecordBatchReader + Send> {
        Err::<EmptyReader, _>(backend_required("get_statistics"))
    }
}
