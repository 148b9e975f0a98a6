//! # Suite Context
//!
//! The orchestration context for one suite run. It owns the resolved
//! configuration, the single backend handle, the resource chain
//! (search cluster first, backend second), and in remote mode the
//! provisioner and the current artifact registrations.
//!
//! ## Lifecycle
//!
//! ```text
//! new()                  resolve mode, build backend handle and chain
//! setup()                acquire chain, provision support jar (remote)
//! prepare_data_artifact  before each consuming test (remote: copy + ADD JAR)
//! execute / table_clause used by tests
//! teardown()             release chain in reverse, errors suppressed
//! ```

mod runner;

pub use runner::{CaseOutcome, CaseStatus, SuiteCase, SuiteReport, SuiteRunner};

use crate::backend::{BackendFactory, BackendHandle, SharedBackend, StatementOutput};
use crate::config::{resolve, ExecutionMode, ResolvedConfig, TestSettings};
use crate::error::{SuiteError, SuiteResult};
use crate::lifecycle::{BackendLifecycle, ExternalResource, ResourceChain};
use crate::provisioning::{ArtifactPaths, DistributedStorage, Provisioner, ResourceRegistration};
use crate::statements::{add_jar_statement, StatementBuilder};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

/// External systems the suite sequences but does not implement
pub struct SuiteCollaborators {
    /// Starts and stops the search cluster; acquired before the backend
    pub search_cluster: Box<dyn ExternalResource>,
    pub backends: Box<dyn BackendFactory>,
    /// Required in remote mode, ignored in local mode
    pub storage: Option<Arc<dyn DistributedStorage>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitePhase {
    Created,
    Ready,
    TornDown,
}

pub struct SuiteContext {
    run_id: Uuid,
    config: ResolvedConfig,
    statements: StatementBuilder,
    backend: SharedBackend,
    chain: ResourceChain,
    provisioner: Option<Provisioner>,
    support_artifact: Option<ResourceRegistration>,
    data_artifact: Option<ResourceRegistration>,
    phase: SuitePhase,
}

impl SuiteContext {
    /// Resolve settings and build the context
    pub fn from_settings(
        settings: &TestSettings,
        collaborators: SuiteCollaborators,
    ) -> SuiteResult<Self> {
        let config = resolve(settings)?;
        Self::new(config, collaborators)
    }

    pub fn new(config: ResolvedConfig, collaborators: SuiteCollaborators) -> SuiteResult<Self> {
        let SuiteCollaborators {
            search_cluster,
            backends,
            storage,
        } = collaborators;

        let provisioner = match (&config.mode, storage) {
            (ExecutionMode::Local, storage) => {
                if storage.is_some() {
                    debug!("Local mode ignores the distributed storage collaborator");
                }
                None
            }
            (ExecutionMode::Remote { .. }, Some(storage)) => Some(Provisioner::new(
                storage,
                ArtifactPaths::from_settings(&config.artifacts),
            )),
            (ExecutionMode::Remote { target }, None) => {
                return Err(SuiteError::setup(
                    "distributed storage",
                    format!("remote mode ({target}) requires a distributed storage collaborator"),
                ));
            }
        };

        let backend = BackendHandle::for_mode(&config, backends.as_ref())?.into_shared();
        let chain = ResourceChain::new(vec![
            search_cluster,
            Box::new(BackendLifecycle::new(backend.clone())),
        ]);

        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, mode = %config.mode, resources = ?chain.names(), "Suite context created");

        Ok(Self {
            run_id,
            statements: StatementBuilder::new(&config),
            config,
            backend,
            chain,
            provisioner,
            support_artifact: None,
            data_artifact: None,
            phase: SuitePhase::Created,
        })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn mode(&self) -> &ExecutionMode {
        &self.config.mode
    }

    pub fn is_local(&self) -> bool {
        self.config.mode.is_local()
    }

    pub fn phase(&self) -> SuitePhase {
        self.phase
    }

    /// Support jar registration; `None` in local mode or before setup
    pub fn support_artifact(&self) -> Option<&ResourceRegistration> {
        self.support_artifact.as_ref()
    }

    /// Start the search cluster and backend, then provision the support jar.
    ///
    /// A failure after the chain was acquired releases it before returning.
    pub async fn setup(&mut self) -> SuiteResult<()> {
        if self.phase != SuitePhase::Created {
            return Err(SuiteError::InvalidState(format!(
                "suite setup requires a fresh context, phase is {:?}",
                self.phase
            )));
        }

        info!(run_id = %self.run_id, mode = %self.config.mode, "Suite setup starting");

        if let Err(e) = self.chain.acquire().await {
            self.phase = SuitePhase::TornDown;
            return Err(e);
        }

        if let Some(provisioner) = &self.provisioner {
            match provisioner.provision_support_artifact().await {
                Ok(registration) => self.support_artifact = Some(registration),
                Err(e) => {
                    warn!(run_id = %self.run_id, error = %e, "Support artifact provisioning failed, tearing down");
                    self.teardown().await;
                    return Err(e);
                }
            }
        }

        self.phase = SuitePhase::Ready;
        info!(run_id = %self.run_id, "Suite setup complete");
        Ok(())
    }

    /// Make the sample data file available to the next consuming test.
    ///
    /// Remote mode copies it into distributed storage again and registers the
    /// support jar with the session. Local mode reads the file in place.
    pub async fn prepare_data_artifact(&mut self) -> SuiteResult<()> {
        self.ensure_ready("prepare the data artifact")?;

        let Some(provisioner) = &self.provisioner else {
            debug!(run_id = %self.run_id, "Local mode reads the data artifact in place");
            return Ok(());
        };

        let registration = provisioner.provision_data_artifact().await?;
        self.data_artifact = Some(registration);

        let support = self.support_artifact.as_ref().ok_or_else(|| {
            SuiteError::InvalidState("support artifact missing after setup".to_string())
        })?;
        let statement = add_jar_statement(support.uri());
        let output = self
            .backend
            .lock()
            .await
            .execute(&statement)
            .await
            .map_err(|e| SuiteError::provisioning("add jar", support.remote_path(), e))?;

        info!(run_id = %self.run_id, output = %output, "Support artifact added to session");
        Ok(())
    }

    /// Forget the data registration once a test has loaded (moved) it
    pub fn mark_data_artifact_consumed(&mut self) {
        if self.data_artifact.take().is_some() {
            debug!(run_id = %self.run_id, "Data artifact consumed");
        }
    }

    /// URI of the sample data file for `LOAD DATA`.
    ///
    /// Local mode points at the local file; remote mode at the qualified copy,
    /// which only exists between [`Self::prepare_data_artifact`] and consumption.
    pub fn data_artifact_uri(&self) -> SuiteResult<String> {
        if self.is_local() {
            return local_file_uri(&self.config.artifacts.data_artifact);
        }

        self.data_artifact
            .as_ref()
            .map(|registration| registration.uri().to_string())
            .ok_or_else(|| {
                SuiteError::InvalidState(
                    "data artifact is not provisioned for this test".to_string(),
                )
            })
    }

    /// Table-definition fragment for a search-cluster resource
    pub fn table_clause<S: AsRef<str>>(&self, resource_name: &str, extra_properties: &[S]) -> String {
        self.statements
            .build_table_clause(resource_name, extra_properties)
    }

    /// Submit one statement through the backend
    pub async fn execute(&self, statement: &str) -> SuiteResult<StatementOutput> {
        self.ensure_ready("execute statements")?;
        self.backend.lock().await.execute(statement).await
    }

    /// Release everything in reverse order. Runs at most once and never fails.
    pub async fn teardown(&mut self) {
        if self.phase == SuitePhase::TornDown && !self.chain.is_acquired() {
            debug!(run_id = %self.run_id, "Suite already torn down");
            return;
        }

        info!(run_id = %self.run_id, "Suite teardown starting");
        self.chain.release().await;
        self.support_artifact = None;
        self.data_artifact = None;
        self.phase = SuitePhase::TornDown;
        info!(run_id = %self.run_id, "Suite teardown complete");
    }

    fn ensure_ready(&self, action: &str) -> SuiteResult<()> {
        if self.phase == SuitePhase::Ready {
            Ok(())
        } else {
            Err(SuiteError::InvalidState(format!(
                "cannot {action} while suite is {:?}",
                self.phase
            )))
        }
    }
}

fn local_file_uri(path: &Path) -> SuiteResult<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|dir| dir.join(path))
            .map_err(|e| {
                SuiteError::InvalidState(format!(
                    "cannot resolve {} against the working directory: {e}",
                    path.display()
                ))
            })?
    };

    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| {
            SuiteError::InvalidState(format!(
                "{} cannot be expressed as a file URI",
                absolute.display()
            ))
        })
}
