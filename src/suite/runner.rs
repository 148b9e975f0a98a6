use super::SuiteContext;
use crate::error::SuiteResult;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{error, info};
use uuid::Uuid;

/// One test of the suite
#[async_trait]
pub trait SuiteCase: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the test loads (and thereby moves) the sample data file
    fn consumes_data_artifact(&self) -> bool {
        false
    }

    async fn run(&self, ctx: &SuiteContext) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub name: String,
    pub status: CaseStatus,
    pub duration: Duration,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

/// Results of a completed suite run
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub run_id: Uuid,
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, name: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

/// Runs cases in order against one suite context.
///
/// Setup and provisioning failures abort the run; case failures are recorded
/// and the run continues. Teardown always happens.
#[derive(Default)]
pub struct SuiteRunner {
    cases: Vec<Box<dyn SuiteCase>>,
}

impl SuiteRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case(mut self, case: impl SuiteCase + 'static) -> Self {
        self.cases.push(Box::new(case));
        self
    }

    pub async fn run(&self, ctx: &mut SuiteContext) -> SuiteResult<SuiteReport> {
        ctx.setup().await?;

        let mut outcomes = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            if case.consumes_data_artifact() {
                if let Err(e) = ctx.prepare_data_artifact().await {
                    error!(case = case.name(), error = %e, "Provisioning failed, aborting suite");
                    ctx.teardown().await;
                    return Err(e);
                }
            }

            let started = Instant::now();
            let result = case.run(ctx).await;
            let duration = started.elapsed();

            if case.consumes_data_artifact() {
                ctx.mark_data_artifact_consumed();
            }

            let status = match result {
                Ok(()) => {
                    info!(case = case.name(), elapsed_ms = duration.as_millis() as u64, "Case passed");
                    CaseStatus::Passed
                }
                Err(e) => {
                    let message = format!("{e:#}");
                    error!(case = case.name(), error = %message, "Case failed");
                    CaseStatus::Failed(message)
                }
            };

            outcomes.push(CaseOutcome {
                name: case.name().to_string(),
                status,
                duration,
            });
        }

        ctx.teardown().await;

        let report = SuiteReport {
            run_id: ctx.run_id(),
            outcomes,
        };
        info!(
            run_id = %report.run_id,
            passed = report.passed(),
            failed = report.failed(),
            "Suite finished"
        );
        Ok(report)
    }
}
