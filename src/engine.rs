//! Import-engine boundary and per-job reports.
use crate::config::JobConfig;
use thiserror::Error;

/// The engine's verdict and counters for one completed job. Produced once per
/// job and only read thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub import_type: String,
    pub expected_count: u64,
    pub imported_count: u64,
    pub elapsed_ms: f64,
    pub is_success: bool,
    /// Non-empty when the engine ran composite sub-jobs for this job.
    pub sub_reports: Vec<JobReport>,
}

impl JobReport {
    /// A zero-count failure report for a job that could not run at all.
    pub fn failed(import_type: &str) -> Self {
        Self {
            import_type: import_type.to_string(),
            expected_count: 0,
            imported_count: 0,
            elapsed_ms: 0.0,
            is_success: false,
            sub_reports: Vec::new(),
        }
    }

    /// True only if this report and every descendant sub-report succeeded.
    pub fn is_success_recursive(&self) -> bool {
        self.is_success && self.sub_reports.iter().all(JobReport::is_success_recursive)
    }
}

/// Abort channel out of the engine. Only produced when the job configuration
/// set `throw_on_error`; in the default mode failures surface as failed
/// reports instead. The orchestrator never catches these.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no importer registered for import type \"{import_type}\"")]
    UnknownType { import_type: String },
    #[error("importer \"{import_type}\" failed: {reason}")]
    ImporterFailed {
        import_type: String,
        reason: anyhow::Error,
    },
}

/// The opaque import capability this orchestrator drives. Called once per
/// job; nothing but the returned report is inspected.
pub trait ImportEngine {
    fn import(&self, config: &JobConfig) -> Result<JobReport, EngineError>;
}
