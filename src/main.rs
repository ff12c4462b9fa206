//! `data-import`: runs one or many data-import jobs sequentially and folds
//! their reports into a single process exit status.
use clap::Parser;
use std::process::ExitCode;

mod batch;
mod cli;
mod command;
mod config;
mod dispatch;
mod engine;
mod orchestrator;
mod reader;
mod registry;
mod report;
mod validate;

use batch::YamlBatchSource;
use cli::ImportArgs;
use command::CommandSpec;
use reader::DelimitedFileImporter;
use registry::ImporterRegistry;

fn main() -> ExitCode {
    init_tracing();

    let invocation = std::env::args().next().unwrap_or_default();
    let spec = CommandSpec::from_invocation(&invocation);
    let args = ImportArgs::parse();

    // The delimited-file importer is the registry fallback so any job that
    // names a concrete source file is serviceable out of the box.
    let engine = ImporterRegistry::new().with_fallback(Box::new(DelimitedFileImporter::new()));

    match orchestrator::run(&spec, &args, &engine, &YamlBatchSource) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
