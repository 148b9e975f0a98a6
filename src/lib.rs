#![allow(clippy::doc_markdown)] // Allow technical terms like HiveServer2, HDFS in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Hive Search Suite
//!
//! Lifecycle orchestration for integration suites that exercise Hive tables
//! backed by a search cluster.
//!
//! ## Overview
//!
//! The same suite runs either against an embedded, in-process Hive or against
//! a separately deployed Hive cluster reached through a client. This crate
//! decides which, starts the search cluster and the query engine in nested
//! order, stages test artifacts in distributed storage when the engine is
//! remote, and generates the `STORED BY ... TBLPROPERTIES(...)` fragments
//! tests use to create search-backed tables.
//!
//! The engine, the client, the search-cluster fixture, and the distributed
//! filesystem are external. They plug in through traits.
//!
//! ## Module Organization
//!
//! - [`config`] - Settings loading and mode resolution
//! - [`backend`] - Embedded/remote backend handle
//! - [`lifecycle`] - Ordered resource chain with best-effort teardown
//! - [`provisioning`] - Distributed storage staging and classpath registration
//! - [`statements`] - Table-definition fragments
//! - [`suite`] - Suite context and runner
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hive_search_suite::config::TestSettings;
//! use hive_search_suite::suite::{SuiteCollaborators, SuiteContext};
//!
//! # async fn example(collaborators: SuiteCollaborators) -> Result<(), Box<dyn std::error::Error>> {
//! let settings = TestSettings::load()?;
//! let mut ctx = SuiteContext::from_settings(&settings, collaborators)?;
//!
//! ctx.setup().await?;
//! let ddl = format!(
//!     "CREATE EXTERNAL TABLE artists (id BIGINT, name STRING) {}",
//!     ctx.table_clause("radio/artists", &["'es.mapping.names'='id:_id'"])
//! );
//! ctx.execute(&ddl).await?;
//! ctx.teardown().await;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod constants;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod provisioning;
pub mod statements;
pub mod suite;

pub use backend::{
    BackendFactory, BackendHandle, EmbeddedEngine, RemoteClient, SharedBackend, StatementOutput,
};
pub use config::{
    resolve, ConnectionHints, ExecutionMode, ResolvedConfig, SettingsLoader, TestSettings,
};
pub use error::{SuiteError, SuiteResult};
pub use lifecycle::{BackendLifecycle, ExternalResource, ResourceChain};
pub use provisioning::{ArtifactPaths, DistributedStorage, Provisioner, ResourceRegistration};
pub use statements::StatementBuilder;
pub use suite::{SuiteCase, SuiteCollaborators, SuiteContext, SuitePhase, SuiteReport, SuiteRunner};
