//! # Resource Lifecycle
//!
//! Nested acquisition of external resources for a suite run. Resources are
//! acquired in list order and released in reverse; a failed acquisition
//! unwinds whatever was already acquired before the error propagates.
//! Releasing is best-effort: every failure is logged and discarded so that
//! teardown never hides an earlier test failure.

mod backend_resource;

pub use backend_resource::BackendLifecycle;

use crate::error::{SuiteError, SuiteResult};
use crate::logging::log_resource_operation;
use async_trait::async_trait;
use tracing::{debug, error, warn};

/// Something that must be set up before a suite and torn down after it
#[async_trait]
pub trait ExternalResource: Send + Sync {
    /// Name used in logs and setup errors
    fn name(&self) -> &str;

    async fn before(&mut self) -> anyhow::Result<()>;

    async fn after(&mut self) -> anyhow::Result<()>;
}

/// Ordered resources with nested acquire/release semantics
pub struct ResourceChain {
    resources: Vec<Box<dyn ExternalResource>>,
    /// Count of leading resources whose `before()` succeeded
    acquired: usize,
}

impl ResourceChain {
    pub fn new(resources: Vec<Box<dyn ExternalResource>>) -> Self {
        Self {
            resources,
            acquired: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired > 0
    }

    pub fn names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name()).collect()
    }

    /// Run every `before()` in order.
    ///
    /// On the first failure the already-acquired resources are released in
    /// reverse order and the failure is returned. The failing resource's own
    /// `after()` is not called.
    pub async fn acquire(&mut self) -> SuiteResult<()> {
        if self.acquired > 0 {
            return Err(SuiteError::InvalidState(
                "resource chain is already acquired".to_string(),
            ));
        }

        for index in 0..self.resources.len() {
            let resource = &mut self.resources[index];
            let name = resource.name().to_string();
            debug!(resource = %name, position = index, "Acquiring resource");

            let outcome = resource.before().await;
            if let Err(e) = outcome {
                error!(resource = %name, error = %format!("{e:#}"), "Resource acquisition failed, unwinding chain");
                log_resource_operation(&name, "before", "failed", Some(&format!("{e:#}")));
                self.release().await;
                return Err(SuiteError::setup(name, e));
            }

            self.acquired = index + 1;
            log_resource_operation(&name, "before", "ok", None);
        }

        Ok(())
    }

    /// Run `after()` in reverse order for every acquired resource.
    ///
    /// Never fails; each error is logged and discarded. Calling it again, or
    /// on a chain that was never acquired, does nothing.
    pub async fn release(&mut self) {
        while self.acquired > 0 {
            self.acquired -= 1;
            let resource = &mut self.resources[self.acquired];
            let name = resource.name().to_string();
            debug!(resource = %name, position = self.acquired, "Releasing resource");

            match resource.after().await {
                Ok(()) => log_resource_operation(&name, "after", "ok", None),
                Err(e) => {
                    let failure = SuiteError::teardown(&name, e);
                    warn!(resource = %name, error = %failure, "Suppressing teardown failure");
                    log_resource_operation(&name, "after", "suppressed", Some(&failure.to_string()));
                }
            }
        }
    }
}

impl Drop for ResourceChain {
    fn drop(&mut self) {
        if self.acquired > 0 {
            warn!(
                acquired = self.acquired,
                "Resource chain dropped while still acquired; external resources were not released"
            );
        }
    }
}
