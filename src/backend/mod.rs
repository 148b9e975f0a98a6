//! # Query Engine Backends
//!
//! The suite talks to Hive through exactly one [`BackendHandle`], either an
//! in-process engine or a client connected to a separately deployed cluster.
//! The engine and client implementations are external; they plug in through
//! [`EmbeddedEngine`], [`RemoteClient`], and a [`BackendFactory`] that builds
//! whichever one the resolved [`ExecutionMode`] asks for.

use crate::config::{ExecutionMode, ResolvedConfig};
use crate::error::{SuiteError, SuiteResult};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Rows returned by a single statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementOutput {
    pub rows: Vec<String>,
}

impl StatementOutput {
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }
}

impl fmt::Display for StatementOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows.join("\n"))
    }
}

/// Query engine running inside the test process
#[async_trait]
pub trait EmbeddedEngine: Send {
    async fn start(&mut self) -> anyhow::Result<()>;

    async fn execute(&mut self, statement: &str) -> anyhow::Result<StatementOutput>;

    async fn stop(&mut self) -> anyhow::Result<()>;
}

/// Client for a query engine deployed as a separate cluster
#[async_trait]
pub trait RemoteClient: Send {
    /// Open a connection to the named cluster
    async fn connect(&mut self, target: &str) -> anyhow::Result<()>;

    async fn execute(&mut self, statement: &str) -> anyhow::Result<StatementOutput>;

    async fn close(&mut self) -> anyhow::Result<()>;
}

/// Builds the backend implementation for a mode
pub trait BackendFactory: Send + Sync {
    fn embedded(&self, config: &ResolvedConfig) -> anyhow::Result<Box<dyn EmbeddedEngine>>;

    fn remote(&self, target: &str) -> anyhow::Result<Box<dyn RemoteClient>>;
}

/// The one query-engine backend of a suite run
pub enum BackendHandle {
    Embedded {
        engine: Box<dyn EmbeddedEngine>,
    },
    Remote {
        client: Box<dyn RemoteClient>,
        target: String,
    },
}

/// Backend shared between the suite context and its lifecycle wrapper
pub type SharedBackend = Arc<Mutex<BackendHandle>>;

impl BackendHandle {
    /// Build the handle matching the resolved mode. Nothing is started yet.
    pub fn for_mode(config: &ResolvedConfig, factory: &dyn BackendFactory) -> SuiteResult<Self> {
        match &config.mode {
            ExecutionMode::Local => {
                let engine = factory
                    .embedded(config)
                    .map_err(|e| SuiteError::setup("embedded backend", e))?;
                Ok(Self::Embedded { engine })
            }
            ExecutionMode::Remote { target } => {
                let client = factory
                    .remote(target)
                    .map_err(|e| SuiteError::setup(format!("remote backend {target}"), e))?;
                Ok(Self::Remote {
                    client,
                    target: target.clone(),
                })
            }
        }
    }

    pub fn into_shared(self) -> SharedBackend {
        Arc::new(Mutex::new(self))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Embedded { .. } => "embedded",
            Self::Remote { .. } => "remote",
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Embedded { .. } => None,
            Self::Remote { target, .. } => Some(target),
        }
    }

    /// Start the engine or connect the client. Call once per suite.
    pub async fn start(&mut self) -> SuiteResult<()> {
        let result = match self {
            Self::Embedded { engine } => engine.start().await,
            Self::Remote { client, target } => client.connect(target).await,
        };
        result.map_err(|e| SuiteError::setup(self.describe(), e))?;

        info!(backend = self.kind(), target = self.target(), "Backend started");
        Ok(())
    }

    /// Submit one statement and wait for its result
    pub async fn execute(&mut self, statement: &str) -> SuiteResult<StatementOutput> {
        debug!(backend = self.kind(), statement = %statement, "Executing statement");

        let result = match self {
            Self::Embedded { engine } => engine.execute(statement).await,
            Self::Remote { client, .. } => client.execute(statement).await,
        };
        result.map_err(|e| SuiteError::statement(statement, e))
    }

    /// Release the backend. The error is for the caller to log, not to propagate.
    pub async fn stop(&mut self) -> SuiteResult<()> {
        let result = match self {
            Self::Embedded { engine } => engine.stop().await,
            Self::Remote { client, .. } => client.close().await,
        };
        result.map_err(|e| SuiteError::teardown(self.describe(), e))?;

        info!(backend = self.kind(), target = self.target(), "Backend stopped");
        Ok(())
    }

    fn describe(&self) -> String {
        match self {
            Self::Embedded { .. } => "embedded backend".to_string(),
            Self::Remote { target, .. } => format!("remote backend {target}"),
        }
    }
}

impl fmt::Debug for BackendHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded { .. } => f
                .debug_struct("Embedded")
                .field("engine", &"EmbeddedEngine")
                .finish(),
            Self::Remote { target, .. } => f
                .debug_struct("Remote")
                .field("client", &"RemoteClient")
                .field("target", target)
                .finish(),
        }
    }
}
