//! CLI argument surface for the import orchestrator.
//!
//! Parsing is kept thin: these are the raw option values as passed on the
//! command line. Normalization into a job configuration happens in
//! [`crate::config`], where the conditional reader-attachment rule lives.
use crate::command::DEFAULT_IMPORT_GROUP;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "data-import",
    version,
    about = "Runs data-import jobs and reports one aggregated outcome",
    after_help = "Examples:\n  data-import                            Run the full import\n  data-import category -f category.csv   Run one importer against one file\n  data-import --group partners           Run every importer in a group\n  data-import --config import.yml        Run an ordered batch of jobs"
)]
pub struct ImportArgs {
    /// Import type to execute; when omitted the full import runs
    pub importer: Option<String>,

    /// Allow the import engine to abort the whole run on the first error
    #[arg(
        short = 't',
        long,
        value_name = "VALUE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "1"
    )]
    pub throw_exception: Option<String>,

    /// Source file to import from
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file_name: Option<String>,

    /// Record offset to start importing from
    #[arg(short = 'o', long, value_name = "N")]
    pub offset: Option<u64>,

    /// Maximum number of records to import
    #[arg(short = 'l', long, value_name = "N")]
    pub limit: Option<u64>,

    /// Field delimiter used by the source file
    #[arg(short = 'd', long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Quoting character used by the source file
    #[arg(short = 'e', long, value_name = "CHAR")]
    pub enclosure: Option<char>,

    /// Escape character used by the source file
    #[arg(short = 's', long, value_name = "CHAR")]
    pub escape: Option<char>,

    /// Whether the first row of the source file is a header row
    #[arg(
        short = 'r',
        long,
        value_name = "BOOL",
        action = clap::ArgAction::Set,
        default_value = "1",
        value_parser = parse_bool_flag
    )]
    pub has_header: bool,

    /// Import group: a coarse selector for a subset of importers
    #[arg(short = 'g', long, value_name = "GROUP", default_value = DEFAULT_IMPORT_GROUP)]
    pub group: String,

    /// Batch-definition file describing an ordered list of jobs
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<String>,
}

/// Accepts the spellings the original tooling accepted: `0`/`1` as well as
/// `true`/`false`.
fn parse_bool_flag(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("expected 0, 1, true, or false, got {other:?}")),
    }
}
