//! # Artifact Provisioning
//!
//! Remote-mode only. Copies the support jar and the sample data file into
//! distributed storage so the remote engine's executors can see them, and
//! registers the jar on the distributed classpath.
//!
//! The data file has to be copied again before every test that loads it:
//! `LOAD DATA INPATH` moves the remote copy into the table's warehouse
//! directory, so a registration is only good for one consumption.

mod registration;

pub use registration::ResourceRegistration;

use crate::config::ArtifactSettings;
use crate::constants::artifacts;
use crate::error::{SuiteError, SuiteResult};
use crate::logging::log_provisioning_operation;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Shared filesystem reachable from every node of the remote cluster
#[async_trait]
pub trait DistributedStorage: Send + Sync {
    /// Copy a local file to `remote`, replacing anything already there
    async fn copy_from_local(&self, local: &Path, remote: &str) -> anyhow::Result<()>;

    /// Fully-qualified, cluster-addressable URI for `remote`
    async fn qualify(&self, remote: &str) -> anyhow::Result<String>;

    /// Make the archive at `remote` loadable by the engine's executors
    async fn add_to_classpath(&self, remote: &str) -> anyhow::Result<()>;
}

/// Source and destination of every provisioned artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub support_local: PathBuf,
    pub support_remote: String,
    pub data_local: PathBuf,
    pub data_remote: String,
}

impl ArtifactPaths {
    /// Configured local paths paired with the fixed distributed-storage paths
    pub fn from_settings(settings: &ArtifactSettings) -> Self {
        Self {
            support_local: settings.support_artifact.clone(),
            support_remote: artifacts::REMOTE_SUPPORT_ARTIFACT.to_string(),
            data_local: settings.data_artifact.clone(),
            data_remote: artifacts::REMOTE_DATA_ARTIFACT.to_string(),
        }
    }
}

/// Copies artifacts into distributed storage and registers them
pub struct Provisioner {
    storage: Arc<dyn DistributedStorage>,
    paths: ArtifactPaths,
}

impl Provisioner {
    pub fn new(storage: Arc<dyn DistributedStorage>, paths: ArtifactPaths) -> Self {
        Self { storage, paths }
    }

    /// Copy the support jar, qualify it, and put it on the distributed classpath.
    ///
    /// Runs once during suite setup, before any test.
    pub async fn provision_support_artifact(&self) -> SuiteResult<ResourceRegistration> {
        let registration = self
            .stage(&self.paths.support_local, &self.paths.support_remote)
            .await?;

        self.storage
            .add_to_classpath(registration.remote_path())
            .await
            .map_err(|e| {
                SuiteError::provisioning(
                    "classpath registration",
                    registration.remote_path(),
                    e.context("Cannot provision Hive"),
                )
            })?;

        info!(uri = %registration.uri(), "Support artifact registered on distributed classpath");
        Ok(registration)
    }

    /// Copy the sample data file and qualify it.
    ///
    /// Must run before every test that consumes the data file.
    pub async fn provision_data_artifact(&self) -> SuiteResult<ResourceRegistration> {
        let registration = self
            .stage(&self.paths.data_local, &self.paths.data_remote)
            .await?;

        info!(uri = %registration.uri(), "Data artifact provisioned");
        Ok(registration)
    }

    async fn stage(&self, local: &Path, remote: &str) -> SuiteResult<ResourceRegistration> {
        let local_display = local.display().to_string();

        if let Err(e) = self.storage.copy_from_local(local, remote).await {
            log_provisioning_operation("copy", &local_display, remote, "failed");
            return Err(SuiteError::provisioning(
                "copy",
                remote,
                e.context(format!("copying {local_display}")),
            ));
        }
        log_provisioning_operation("copy", &local_display, remote, "ok");

        let uri = self
            .storage
            .qualify(remote)
            .await
            .map_err(|e| SuiteError::provisioning("qualify", remote, e))?;

        Ok(ResourceRegistration::qualified(local, remote, uri))
    }
}
