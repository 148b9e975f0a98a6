//! Embedded engine, remote client, and factory fakes.

use super::{EventLog, MockBehavior, MockStorage};
use async_trait::async_trait;
use hive_search_suite::{
    BackendFactory, EmbeddedEngine, RemoteClient, ResolvedConfig, StatementOutput,
};
use std::sync::Arc;

pub struct MockEngine {
    log: EventLog,
    behavior: MockBehavior,
}

impl MockEngine {
    fn check(&self, statement: &str) -> anyhow::Result<()> {
        if self.behavior.failing_statements.iter().any(|s| s == statement) {
            anyhow::bail!("FAILED: Execution Error, return code 1 from DDLTask");
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddedEngine for MockEngine {
    async fn start(&mut self) -> anyhow::Result<()> {
        self.log.record("engine.start");
        if self.behavior.backend_fails_start {
            anyhow::bail!("metastore could not be initialized");
        }
        Ok(())
    }

    async fn execute(&mut self, statement: &str) -> anyhow::Result<StatementOutput> {
        self.log.record(format!("engine.execute {statement}"));
        self.check(statement)?;
        Ok(StatementOutput::new(vec!["OK".to_string()]))
    }

    async fn stop(&mut self) -> anyhow::Result<()> {
        self.log.record("engine.stop");
        if self.behavior.backend_fails_stop {
            anyhow::bail!("embedded engine stop interrupted");
        }
        Ok(())
    }
}

pub struct MockClient {
    log: EventLog,
    behavior: MockBehavior,
    storage: Arc<MockStorage>,
}

#[async_trait]
impl RemoteClient for MockClient {
    async fn connect(&mut self, target: &str) -> anyhow::Result<()> {
        self.log.record(format!("client.connect {target}"));
        if self.behavior.backend_fails_start {
            anyhow::bail!("Could not open client transport with JDBC Uri: {target}");
        }
        Ok(())
    }

    async fn execute(&mut self, statement: &str) -> anyhow::Result<StatementOutput> {
        self.log.record(format!("client.execute {statement}"));
        if self.behavior.failing_statements.iter().any(|s| s == statement) {
            anyhow::bail!("Error while processing statement: FAILED");
        }

        if let Some(rest) = statement.strip_prefix("LOAD DATA INPATH '") {
            let uri = rest.split('\'').next().unwrap_or_default();
            self.storage.consume_uri(uri)?;
        }

        Ok(StatementOutput::new(vec!["OK".to_string()]))
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.log.record("client.close");
        if self.behavior.backend_fails_stop {
            anyhow::bail!("connection reset while closing");
        }
        Ok(())
    }
}

pub struct MockBackends {
    log: EventLog,
    behavior: MockBehavior,
    storage: Arc<MockStorage>,
}

impl MockBackends {
    pub fn new(log: EventLog, behavior: MockBehavior, storage: Arc<MockStorage>) -> Self {
        Self {
            log,
            behavior,
            storage,
        }
    }
}

impl BackendFactory for MockBackends {
    fn embedded(&self, _config: &ResolvedConfig) -> anyhow::Result<Box<dyn EmbeddedEngine>> {
        self.log.record("factory.embedded");
        Ok(Box::new(MockEngine {
            log: self.log.clone(),
            behavior: self.behavior.clone(),
        }))
    }

    fn remote(&self, target: &str) -> anyhow::Result<Box<dyn RemoteClient>> {
        self.log.record(format!("factory.remote {target}"));
        Ok(Box::new(MockClient {
            log: self.log.clone(),
            behavior: self.behavior.clone(),
            storage: self.storage.clone(),
        }))
    }
}
