//! Normalized job configuration values.
//!
//! [`JobConfig`] and [`ReaderConfig`] are immutable value objects: built once
//! from the CLI surface (or derived once per batch entry) and then only read.
use crate::batch::BatchEntry;
use crate::cli::ImportArgs;

/// One job request, as handed to the import engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub import_type: String,
    pub import_group: String,
    /// When set the engine may abort the whole run on the first failure
    /// instead of returning a failure report.
    pub throw_on_error: bool,
    /// Present only when a concrete source was explicitly requested.
    pub reader: Option<ReaderConfig>,
}

/// How to read one structured input source. Dialect defaults (delimiter,
/// enclosure, escape) are supplied by the reader itself, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    pub file_name: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub delimiter: Option<char>,
    pub enclosure: Option<char>,
    pub escape: Option<char>,
    pub has_header: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            file_name: None,
            offset: None,
            limit: None,
            delimiter: None,
            enclosure: None,
            escape: None,
            has_header: true,
        }
    }
}

impl JobConfig {
    /// Builds the configuration for one invocation from the raw CLI options
    /// and the already-resolved import type.
    pub fn from_args(args: &ImportArgs, import_type: &str) -> Self {
        // A reader is attached only when a concrete source was named. An
        // unconditional reader would signal "explicit source" to the engine
        // even for full, unscoped runs.
        let reader = if args.importer.is_some() || args.file_name.is_some() {
            Some(ReaderConfig {
                file_name: args.file_name.clone(),
                offset: args.offset,
                limit: args.limit,
                delimiter: args.delimiter,
                enclosure: args.enclosure,
                escape: args.escape,
                has_header: args.has_header,
            })
        } else {
            None
        };

        Self {
            import_type: import_type.to_string(),
            import_group: args.group.clone(),
            throw_on_error: args.throw_exception.is_some(),
            reader,
        }
    }

    /// Derives the configuration for one batch entry: the base configuration
    /// with the entry's job type and source file swapped in. The base is left
    /// untouched so entries cannot leak overrides into each other.
    pub fn for_batch_entry(&self, entry: &BatchEntry) -> Self {
        let mut derived = self.clone();
        derived.import_type = entry.job_type.clone();
        let mut reader = derived.reader.take().unwrap_or_default();
        reader.file_name = Some(entry.source.clone());
        derived.reader = Some(reader);
        derived
    }
}
