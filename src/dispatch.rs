//! Sequential job dispatch.
use crate::batch::BatchEntry;
use crate::config::JobConfig;
use crate::engine::{EngineError, ImportEngine, JobReport};

/// Runs jobs against the import engine, one at a time.
pub struct Dispatcher<'a> {
    engine: &'a dyn ImportEngine,
}

impl<'a> Dispatcher<'a> {
    pub fn new(engine: &'a dyn ImportEngine) -> Self {
        Self { engine }
    }

    /// Runs exactly one job and returns its report unmodified.
    pub fn run_one(&self, config: &JobConfig) -> Result<JobReport, EngineError> {
        self.engine.import(config)
    }

    /// Runs every batch entry in order. A batch plan names independent jobs,
    /// so a failed report is recorded and the loop keeps going; only an
    /// engine abort stops it.
    pub fn run_batch(
        &self,
        base: &JobConfig,
        entries: &[BatchEntry],
    ) -> Result<Vec<JobReport>, EngineError> {
        let mut reports = Vec::with_capacity(entries.len());
        for entry in entries {
            let config = base.for_batch_entry(entry);
            let report = self.run_one(&config)?;
            if !report.is_success_recursive() {
                tracing::debug!(job_type = %entry.job_type, "batch entry failed, continuing");
            }
            reports.push(report);
        }
        Ok(reports)
    }
}
