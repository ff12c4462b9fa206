//! Top-level control flow: validate, dispatch, aggregate, map to an exit
//! status.
//!
//! Error handling follows a strict split: validation failures are recovered
//! locally into a printed message and a failure outcome; a batch definition
//! that cannot be loaded and an engine abort both propagate as errors and
//! terminate the run with no further jobs.
use crate::batch::BatchSource;
use crate::cli::ImportArgs;
use crate::command::CommandSpec;
use crate::config::JobConfig;
use crate::dispatch::Dispatcher;
use crate::engine::ImportEngine;
use crate::report::{self, status_label};
use crate::validate;
use anyhow::{Context, Result};
use std::path::Path;

/// Terminal state of one orchestrated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failure,
}

impl RunOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, RunOutcome::Success)
    }

    fn from_success(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

pub fn run(
    spec: &CommandSpec,
    args: &ImportArgs,
    engine: &dyn ImportEngine,
    batch_source: &dyn BatchSource,
) -> Result<RunOutcome> {
    if let Err(error) = validate::check_mode_conflict(args.importer.is_some(), args.config.is_some())
    {
        eprintln!("{error}");
        return Ok(RunOutcome::Failure);
    }

    let import_type = spec.resolve_import_type(args.importer.as_deref());
    let base = JobConfig::from_args(args, &import_type);
    let dispatcher = Dispatcher::new(engine);

    let reports = if let Some(config_path) = &args.config {
        // The batch definition is read once, up front, before any job runs.
        let entries = batch_source
            .load(Path::new(config_path))
            .with_context(|| format!("load batch definition {config_path}"))?;
        tracing::debug!(path = %config_path, entries = entries.len(), "batch plan loaded");
        println!("Start configured import");
        dispatcher.run_batch(&base, &entries)?
    } else {
        if let Err(error) = validate::check_group_and_type(&base) {
            eprintln!("{error}");
            return Ok(RunOutcome::Failure);
        }
        println!("Start \"{import_type}\" import");
        vec![dispatcher.run_one(&base)?]
    };

    let summary = report::aggregate(&reports);
    for line in &summary.lines {
        println!("{line}");
    }
    println!("---------------------------------");
    println!(
        "Overall Import status: {}",
        status_label(summary.overall_success)
    );

    Ok(RunOutcome::from_success(summary.overall_success))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{BatchEntry, ConfigLoadError};
    use crate::engine::{EngineError, JobReport};
    use clap::Parser;
    use std::cell::RefCell;

    struct CountingEngine {
        calls: RefCell<Vec<JobConfig>>,
        fail_types: Vec<String>,
        abort: bool,
    }

    impl CountingEngine {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_types: Vec::new(),
                abort: false,
            }
        }

        fn failing_on(mut self, import_type: &str) -> Self {
            self.fail_types.push(import_type.to_string());
            self
        }

        fn aborting(mut self) -> Self {
            self.abort = true;
            self
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl ImportEngine for CountingEngine {
        fn import(&self, config: &JobConfig) -> Result<JobReport, EngineError> {
            self.calls.borrow_mut().push(config.clone());
            if self.abort {
                return Err(EngineError::ImporterFailed {
                    import_type: config.import_type.clone(),
                    reason: anyhow::anyhow!("scripted abort"),
                });
            }
            if self.fail_types.contains(&config.import_type) {
                return Ok(JobReport::failed(&config.import_type));
            }
            Ok(JobReport {
                import_type: config.import_type.clone(),
                expected_count: 1,
                imported_count: 1,
                elapsed_ms: 0.1,
                is_success: true,
                sub_reports: Vec::new(),
            })
        }
    }

    struct FixedBatchSource {
        entries: Vec<BatchEntry>,
    }

    impl BatchSource for FixedBatchSource {
        fn load(&self, _path: &Path) -> Result<Vec<BatchEntry>, ConfigLoadError> {
            Ok(self.entries.clone())
        }
    }

    struct BrokenBatchSource;

    impl BatchSource for BrokenBatchSource {
        fn load(&self, path: &Path) -> Result<Vec<BatchEntry>, ConfigLoadError> {
            Err(ConfigLoadError::Io {
                path: path.display().to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    fn args(argv: &[&str]) -> ImportArgs {
        let mut full = vec!["data-import"];
        full.extend_from_slice(argv);
        ImportArgs::parse_from(full)
    }

    fn no_batch() -> FixedBatchSource {
        FixedBatchSource {
            entries: Vec::new(),
        }
    }

    fn batch(pairs: &[(&str, &str)]) -> FixedBatchSource {
        FixedBatchSource {
            entries: pairs
                .iter()
                .map(|(job_type, source)| BatchEntry {
                    job_type: job_type.to_string(),
                    source: source.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn mode_conflict_fails_without_touching_the_engine() {
        let engine = CountingEngine::new();
        let outcome = run(
            &CommandSpec::default_binding(),
            &args(&["category", "-c", "import.yml"]),
            &engine,
            &no_batch(),
        )
        .expect("run completes");

        assert_eq!(outcome, RunOutcome::Failure);
        assert_eq!(engine.call_count(), 0);
    }

    #[test]
    fn group_and_type_conflict_fails_without_touching_the_engine() {
        let engine = CountingEngine::new();
        let outcome = run(
            &CommandSpec::default_binding(),
            &args(&["category", "-g", "partners"]),
            &engine,
            &no_batch(),
        )
        .expect("run completes");

        assert_eq!(outcome, RunOutcome::Failure);
        assert_eq!(engine.call_count(), 0);
    }

    #[test]
    fn single_run_resolves_type_and_succeeds() {
        let engine = CountingEngine::new();
        let outcome = run(
            &CommandSpec::default_binding(),
            &args(&["category"]),
            &engine,
            &no_batch(),
        )
        .expect("run completes");

        assert_eq!(outcome, RunOutcome::Success);
        let calls = engine.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].import_type, "category");
        assert!(calls[0].reader.is_some());
    }

    #[test]
    fn bound_command_runs_its_importer_without_a_positional() {
        let engine = CountingEngine::new();
        let outcome = run(
            &CommandSpec::named("data:import:product"),
            &args(&[]),
            &engine,
            &no_batch(),
        )
        .expect("run completes");

        assert_eq!(outcome, RunOutcome::Success);
        assert_eq!(engine.calls.borrow()[0].import_type, "product");
    }

    #[test]
    fn batch_with_one_failure_is_an_overall_failure() {
        let engine = CountingEngine::new().failing_on("product");
        let outcome = run(
            &CommandSpec::default_binding(),
            &args(&["-c", "import.yml"]),
            &engine,
            &batch(&[("category", "a.csv"), ("product", "b.csv")]),
        )
        .expect("run completes");

        assert_eq!(outcome, RunOutcome::Failure);
        assert_eq!(engine.call_count(), 2, "failure does not stop the batch");
    }

    #[test]
    fn batch_all_successful_is_an_overall_success() {
        let engine = CountingEngine::new();
        let outcome = run(
            &CommandSpec::default_binding(),
            &args(&["-c", "import.yml"]),
            &engine,
            &batch(&[("category", "a.csv"), ("product", "b.csv")]),
        )
        .expect("run completes");

        assert_eq!(outcome, RunOutcome::Success);
    }

    #[test]
    fn unloadable_batch_definition_aborts_before_any_job() {
        let engine = CountingEngine::new();
        let result = run(
            &CommandSpec::default_binding(),
            &args(&["-c", "missing.yml"]),
            &engine,
            &BrokenBatchSource,
        );

        assert!(result.is_err());
        assert_eq!(engine.call_count(), 0);
    }

    #[test]
    fn engine_abort_propagates_uncaught() {
        let engine = CountingEngine::new().aborting();
        let result = run(
            &CommandSpec::default_binding(),
            &args(&["category", "-t"]),
            &engine,
            &no_batch(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn repeated_runs_are_idempotent() {
        let engine = CountingEngine::new();
        let arguments = args(&["category"]);
        let first = run(
            &CommandSpec::default_binding(),
            &arguments,
            &engine,
            &no_batch(),
        )
        .expect("first run");
        let second = run(
            &CommandSpec::default_binding(),
            &arguments,
            &engine,
            &no_batch(),
        )
        .expect("second run");

        assert_eq!(first, second);
        let calls = engine.calls.borrow();
        assert_eq!(calls[0], calls[1], "identical configurations both times");
    }
}
