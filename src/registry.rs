//! Composite import engine over registered importers.
//!
//! Mirrors the collection model of the upstream import module: leaf importers
//! register under a type name plus group memberships, the registry selects
//! them per job configuration, and every job yields one composite report with
//! the leaf reports nested underneath.
use crate::command::{DEFAULT_IMPORT_GROUP, DEFAULT_IMPORT_TYPE};
use crate::config::{JobConfig, ReaderConfig};
use crate::engine::{EngineError, ImportEngine, JobReport};
use std::time::Instant;

/// Counters a leaf importer hands back for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportCounts {
    /// Data sets found in the source window.
    pub expected: u64,
    /// Data sets actually imported.
    pub imported: u64,
}

/// One registered import capability.
pub trait Importer {
    /// Type name this importer is registered under.
    fn import_type(&self) -> &str;
    /// Groups this importer belongs to; the "full" group always selects it.
    fn groups(&self) -> &[String];
    /// Imports from the given source description and reports counters. An
    /// error here becomes a failed leaf report, or an engine abort when the
    /// job set `throw_on_error`.
    fn run(&self, reader: Option<&ReaderConfig>) -> anyhow::Result<ImportCounts>;
}

/// Registry of leaf importers acting as the [`ImportEngine`].
#[derive(Default)]
pub struct ImporterRegistry {
    importers: Vec<Box<dyn Importer>>,
    fallback: Option<Box<dyn Importer>>,
}

impl ImporterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a leaf importer. Registration order is execution order for
    /// full-import runs. The shipped binary wires only the fallback; this is
    /// the seam an embedding application registers its own importers through.
    #[allow(dead_code)]
    pub fn register(mut self, importer: Box<dyn Importer>) -> Self {
        self.importers.push(importer);
        self
    }

    /// Installs a catch-all importer used when a job names a type nothing is
    /// registered under but the configuration points at a concrete source
    /// file.
    pub fn with_fallback(mut self, importer: Box<dyn Importer>) -> Self {
        self.fallback = Some(importer);
        self
    }

    fn find(&self, import_type: &str) -> Option<&dyn Importer> {
        self.importers
            .iter()
            .find(|importer| importer.import_type() == import_type)
            .map(Box::as_ref)
    }

    fn run_leaf(
        &self,
        importer: &dyn Importer,
        import_type: &str,
        config: &JobConfig,
    ) -> Result<JobReport, EngineError> {
        let started = Instant::now();
        match importer.run(config.reader.as_ref()) {
            Ok(counts) => Ok(JobReport {
                import_type: import_type.to_string(),
                expected_count: counts.expected,
                imported_count: counts.imported,
                elapsed_ms: elapsed_ms_since(started),
                is_success: counts.imported == counts.expected,
                sub_reports: Vec::new(),
            }),
            Err(reason) => {
                if config.throw_on_error {
                    return Err(EngineError::ImporterFailed {
                        import_type: import_type.to_string(),
                        reason,
                    });
                }
                tracing::warn!(import_type, error = %reason, "importer failed");
                Ok(JobReport::failed(import_type))
            }
        }
    }
}

impl ImportEngine for ImporterRegistry {
    fn import(&self, config: &JobConfig) -> Result<JobReport, EngineError> {
        let started = Instant::now();
        let mut sub_reports = Vec::new();

        if config.import_type == DEFAULT_IMPORT_TYPE {
            for importer in &self.importers {
                if !selected_by_group(importer.as_ref(), &config.import_group) {
                    continue;
                }
                let import_type = importer.import_type().to_string();
                sub_reports.push(self.run_leaf(importer.as_ref(), &import_type, config)?);
            }
        } else if let Some(importer) = self.find(&config.import_type) {
            sub_reports.push(self.run_leaf(importer, &config.import_type, config)?);
        } else if let Some(fallback) = self.fallback.as_deref().filter(|_| names_a_source(config))
        {
            sub_reports.push(self.run_leaf(fallback, &config.import_type, config)?);
        } else {
            if config.throw_on_error {
                return Err(EngineError::UnknownType {
                    import_type: config.import_type.clone(),
                });
            }
            tracing::warn!(import_type = %config.import_type, "no importer registered");
            sub_reports.push(JobReport::failed(&config.import_type));
        }

        let is_success = sub_reports.iter().all(|report| report.is_success);
        Ok(JobReport {
            import_type: config.import_type.clone(),
            expected_count: sub_reports.iter().map(|report| report.expected_count).sum(),
            imported_count: sub_reports.iter().map(|report| report.imported_count).sum(),
            elapsed_ms: elapsed_ms_since(started),
            is_success,
            sub_reports,
        })
    }
}

fn selected_by_group(importer: &dyn Importer, import_group: &str) -> bool {
    import_group == DEFAULT_IMPORT_GROUP
        || importer.groups().iter().any(|group| group == import_group)
}

fn names_a_source(config: &JobConfig) -> bool {
    config
        .reader
        .as_ref()
        .is_some_and(|reader| reader.file_name.is_some())
}

fn elapsed_ms_since(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
