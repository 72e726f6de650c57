// src/health/checker.rs
use crate::health::HealthReport;
use crate::probe::ProbeRunner;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Evaluates the configured probes and the version probe for one request.
pub struct HealthChecker {
    runner: Arc<dyn ProbeRunner>,
    probes: Arc<[String]>,
    version_command: String,
}

impl HealthChecker {
    pub fn new(
        runner: Arc<dyn ProbeRunner>,
        probes: Arc<[String]>,
        version_command: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            probes,
            version_command: version_command.into(),
        }
    }

    /// Runs every probe in order, stopping at the first failure, then the
    /// version probe regardless of the outcome.
    pub async fn check(&self) -> HealthReport {
        let error = self.first_failure().await;
        let version = self.version().await;

        HealthReport {
            healthy: error.is_none(),
            version,
            error,
        }
    }

    async fn first_failure(&self) -> Option<String> {
        for (index, command) in self.probes.iter().enumerate() {
            match self.runner.run(command).await {
                Ok(_) => debug!(index, command = %command, "probe passed"),
                Err(e) => {
                    info!(index, command = %command, error = %e, "service unhealthy");
                    return Some(e.to_string());
                }
            }
        }
        None
    }

    async fn version(&self) -> String {
        match self.runner.run(&self.version_command).await {
            Ok(version) => version,
            Err(e) => {
                warn!(command = %self.version_command, error = %e, "version probe failed");
                let detail = if e.output().is_empty() {
                    e.to_string()
                } else {
                    e.output().to_string()
                };
                format!("error:{}", detail)
            }
        }
    }
}
