//! # Table Statement Builder
//!
//! Generates the `STORED BY ... TBLPROPERTIES(...)` fragment that backs a Hive
//! table with a search-cluster resource. Property order is fixed: `resource`,
//! caller extras, `host` (remote, when set), `port` (remote).

use crate::config::{ConnectionHints, ExecutionMode, ResolvedConfig};
use crate::constants::table;
use tracing::warn;

/// Builds mode-aware table-definition fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementBuilder {
    mode: ExecutionMode,
    hints: ConnectionHints,
    storage_handler: String,
    omit_empty_port: bool,
}

impl StatementBuilder {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            mode: config.mode.clone(),
            hints: config.hints.clone(),
            storage_handler: config.storage_handler.clone(),
            omit_empty_port: config.omit_empty_port,
        }
    }

    /// Fragment for a table backed by `resource_name`.
    ///
    /// Extras are appended verbatim. In remote mode the `port` property is
    /// emitted even when no port is configured, producing `'port'=''`, unless
    /// `suite.omit_empty_port` is set.
    pub fn build_table_clause<S: AsRef<str>>(
        &self,
        resource_name: &str,
        extra_properties: &[S],
    ) -> String {
        let mut clause = format!(
            "STORED BY '{}' TBLPROPERTIES('{}' = '{}' ",
            self.storage_handler,
            table::RESOURCE_PROPERTY,
            resource_name
        );

        for property in extra_properties {
            clause.push(',');
            clause.push_str(property.as_ref());
        }

        if self.mode.is_remote() {
            if let Some(host) = self.hints.host_with_text() {
                clause.push_str(&format!(",'{}'='{}' ", table::HOST_PROPERTY, host));
            }

            let port = self.hints.port_or_empty();
            if port.is_empty() {
                if self.omit_empty_port {
                    clause.push(')');
                    return clause;
                }
                // TODO: make omit_empty_port the default once remote suites always configure es.port
                warn!(
                    resource = %resource_name,
                    "No search-cluster port configured; emitting an empty port property"
                );
            }
            clause.push_str(&format!(",'{}'='{}'", table::PORT_PROPERTY, port));
        }

        clause.push(')');
        clause
    }
}

/// `LOAD DATA` statement that moves the file at `uri` into `table`
pub fn load_data_statement(uri: &str, table: &str) -> String {
    format!("LOAD DATA INPATH '{uri}' OVERWRITE INTO TABLE {table}")
}

/// `ADD JAR` statement making a qualified archive visible to the current session
pub fn add_jar_statement(uri: &str) -> String {
    format!("ADD JAR {uri}")
}
