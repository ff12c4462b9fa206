//! Batch-definition loading.
//!
//! A batch plan is an ordered list of jobs defined outside the CLI, in a YAML
//! file:
//!
//! ```yaml
//! version: 1
//! actions:
//!   - data_entity: category
//!     source: data/import/category.csv
//!   - data_entity: product
//!     source: data/import/product.csv
//! ```
//!
//! File order is execution order. A file that cannot be read or parsed is a
//! fatal error for the whole run, never a per-entry failure. An empty action
//! list is valid and simply runs zero jobs.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// One job of a batch plan: which importer to run against which source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub job_type: String,
    pub source: String,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot read batch definition {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed batch definition {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Produces the ordered job sequence a batch-definition file describes.
pub trait BatchSource {
    fn load(&self, path: &Path) -> Result<Vec<BatchEntry>, ConfigLoadError>;
}

#[derive(Debug, Deserialize)]
struct BatchDocument {
    #[serde(default)]
    actions: Vec<BatchAction>,
}

#[derive(Debug, Deserialize)]
struct BatchAction {
    data_entity: String,
    source: String,
}

/// Default [`BatchSource`] reading the YAML format above.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlBatchSource;

impl BatchSource for YamlBatchSource {
    fn load(&self, path: &Path) -> Result<Vec<BatchEntry>, ConfigLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let document: BatchDocument =
            serde_yaml::from_str(&text).map_err(|source| ConfigLoadError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(document
            .actions
            .into_iter()
            .map(|action| BatchEntry {
                job_type: action.data_entity,
                source: action.source,
            })
            .collect())
    }
}
