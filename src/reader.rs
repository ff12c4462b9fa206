//! Built-in importer for delimited text sources.
//!
//! This is the catch-all leaf: given a reader configuration naming a file, it
//! walks the records the configured window selects and counts how many parse
//! at the expected field width. It deliberately knows nothing about job types
//! or destinations; the registry supplies the type name per job.
use crate::command::DEFAULT_IMPORT_GROUP;
use crate::config::ReaderConfig;
use crate::registry::{ImportCounts, Importer};
use anyhow::{anyhow, Context, Result};

/// Type name the importer registers under when used as a regular importer.
pub const FILE_IMPORT_TYPE: &str = "file";

const DEFAULT_DELIMITER: char = ',';
const DEFAULT_ENCLOSURE: char = '"';

pub struct DelimitedFileImporter {
    groups: Vec<String>,
}

impl DelimitedFileImporter {
    pub fn new() -> Self {
        Self {
            groups: vec![DEFAULT_IMPORT_GROUP.to_string()],
        }
    }
}

impl Default for DelimitedFileImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer for DelimitedFileImporter {
    fn import_type(&self) -> &str {
        FILE_IMPORT_TYPE
    }

    fn groups(&self) -> &[String] {
        &self.groups
    }

    fn run(&self, reader: Option<&ReaderConfig>) -> Result<ImportCounts> {
        let reader = reader.ok_or_else(|| anyhow!("a source file is required"))?;
        let file_name = reader
            .file_name
            .as_deref()
            .ok_or_else(|| anyhow!("no source file named in reader configuration"))?;

        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(dialect_byte(
                reader.delimiter.unwrap_or(DEFAULT_DELIMITER),
                "delimiter",
            )?)
            .quote(dialect_byte(
                reader.enclosure.unwrap_or(DEFAULT_ENCLOSURE),
                "enclosure",
            )?)
            .has_headers(reader.has_header)
            .flexible(true);
        if let Some(escape) = reader.escape {
            builder.escape(Some(dialect_byte(escape, "escape")?));
        }
        let mut records = builder
            .from_path(file_name)
            .with_context(|| format!("open source file {file_name}"))?;

        // With a header row its width is the contract every record must meet;
        // without one the first record seen sets it.
        let mut expected_width = if reader.has_header {
            Some(records.headers().context("read header row")?.len())
        } else {
            None
        };

        let offset = reader.offset.unwrap_or(0);
        let mut expected = 0u64;
        let mut imported = 0u64;
        for (index, record) in records.records().enumerate() {
            if (index as u64) < offset {
                continue;
            }
            if reader.limit.is_some_and(|limit| expected >= limit) {
                break;
            }
            let record =
                record.with_context(|| format!("read record {index} of {file_name}"))?;
            expected += 1;
            let width_matches = match expected_width {
                Some(width) => record.len() == width,
                None => {
                    expected_width = Some(record.len());
                    true
                }
            };
            if width_matches {
                imported += 1;
            } else {
                tracing::debug!(file_name, index, "record width mismatch, skipped");
            }
        }
        Ok(ImportCounts { expected, imported })
    }
}

fn dialect_byte(value: char, what: &str) -> Result<u8> {
    if value.is_ascii() {
        Ok(value as u8)
    } else {
        Err(anyhow!("{what} must be an ASCII character, got {value:?}"))
    }
}
