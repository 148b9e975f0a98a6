use super::ExternalResource;
use crate::backend::SharedBackend;
use crate::constants::bootstrap;
use async_trait::async_trait;
use tracing::{info, warn};

/// Chain entry that starts the backend and prepares the scratch database.
///
/// `before()` starts the backend, then drops, creates, and selects the
/// scratch database; if a bootstrap statement fails the backend is stopped
/// again before the error is returned. `after()` drops the scratch database
/// and stops the backend, and both steps always run.
pub struct BackendLifecycle {
    name: String,
    backend: SharedBackend,
}

impl BackendLifecycle {
    pub fn new(backend: SharedBackend) -> Self {
        Self {
            name: "hive".to_string(),
            backend,
        }
    }
}

#[async_trait]
impl ExternalResource for BackendLifecycle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn before(&mut self) -> anyhow::Result<()> {
        let mut backend = self.backend.lock().await;
        backend.start().await?;

        for statement in bootstrap::STATEMENTS {
            if let Err(e) = backend.execute(statement).await {
                if let Err(stop_error) = backend.stop().await {
                    warn!(error = %stop_error, "Backend did not stop after failed bootstrap");
                }
                return Err(e.into());
            }
        }

        info!(
            backend = backend.kind(),
            database = bootstrap::SCRATCH_DATABASE,
            "Scratch database ready"
        );
        Ok(())
    }

    async fn after(&mut self) -> anyhow::Result<()> {
        let mut backend = self.backend.lock().await;

        let dropped = backend.execute(bootstrap::DROP_SCRATCH_DATABASE).await;
        if let Err(e) = &dropped {
            warn!(error = %e, "Failed to drop scratch database, stopping backend anyway");
        }

        let stopped = backend.stop().await;

        match (dropped, stopped) {
            (Ok(_), Ok(())) => Ok(()),
            (Err(drop_error), Ok(())) => Err(drop_error.into()),
            (Ok(_), Err(stop_error)) => Err(stop_error.into()),
            (Err(drop_error), Err(stop_error)) => {
                Err(anyhow::Error::new(stop_error).context(format!("after {drop_error}")))
            }
        }
    }
}
