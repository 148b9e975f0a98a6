//! Shared fakes for suite integration tests.
//!
//! Every fake appends to one [`EventLog`] so tests can assert ordering across
//! the search cluster, the backend, and distributed storage.

#![allow(dead_code)]

pub mod mock_backends;
pub mod mock_storage;
pub mod strategies;

pub use mock_backends::*;
pub use mock_storage::*;

use async_trait::async_trait;
use hive_search_suite::{ExternalResource, SuiteCollaborators};
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered record of every call made to a fake
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn record(&self, event: impl Into<String>) {
        self.events.lock().push(event.into());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events.lock().iter().filter(|e| e.as_str() == event).count()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events.lock().iter().position(|e| e == event)
    }

    pub fn contains(&self, event: &str) -> bool {
        self.position(event).is_some()
    }
}

/// Failure switches shared by all fakes of one harness
#[derive(Debug, Default, Clone)]
pub struct MockBehavior {
    pub cluster_fails_start: bool,
    pub cluster_fails_stop: bool,
    pub backend_fails_start: bool,
    pub backend_fails_stop: bool,
    /// Statements the backend rejects
    pub failing_statements: Vec<String>,
    pub storage_rejects_classpath: bool,
    /// Number of copies storage accepts before refusing; `None` is unlimited
    pub storage_copy_budget: Option<usize>,
}

/// Stand-in for the search-cluster startup fixture
pub struct MockSearchCluster {
    log: EventLog,
    behavior: MockBehavior,
}

impl MockSearchCluster {
    pub fn new(log: EventLog, behavior: MockBehavior) -> Self {
        Self { log, behavior }
    }
}

#[async_trait]
impl ExternalResource for MockSearchCluster {
    fn name(&self) -> &str {
        "search-cluster"
    }

    async fn before(&mut self) -> anyhow::Result<()> {
        self.log.record("search-cluster.before");
        if self.behavior.cluster_fails_start {
            anyhow::bail!("search cluster failed to bind port 9200");
        }
        Ok(())
    }

    async fn after(&mut self) -> anyhow::Result<()> {
        self.log.record("search-cluster.after");
        if self.behavior.cluster_fails_stop {
            anyhow::bail!("search cluster node did not shut down");
        }
        Ok(())
    }
}

/// One set of fakes sharing a log, a storage, and failure switches
pub struct MockHarness {
    pub log: EventLog,
    pub storage: Arc<MockStorage>,
    pub behavior: MockBehavior,
}

impl MockHarness {
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::default())
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        let log = EventLog::default();
        let storage = Arc::new(MockStorage::new(log.clone(), behavior.clone()));
        Self {
            log,
            storage,
            behavior,
        }
    }

    /// Collaborators for a remote-capable context
    pub fn collaborators(&self) -> SuiteCollaborators {
        SuiteCollaborators {
            search_cluster: Box::new(MockSearchCluster::new(
                self.log.clone(),
                self.behavior.clone(),
            )),
            backends: Box::new(MockBackends::new(
                self.log.clone(),
                self.behavior.clone(),
                self.storage.clone(),
            )),
            storage: Some(self.storage.clone()),
        }
    }

    /// Collaborators without distributed storage
    pub fn local_collaborators(&self) -> SuiteCollaborators {
        SuiteCollaborators {
            storage: None,
            ..self.collaborators()
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.log.snapshot()
    }
}

pub fn init_test_logging() {
    hive_search_suite::logging::init_structured_logging();
}
