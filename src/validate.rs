//! Pre-dispatch checks for contradictory invocation modes.
//!
//! Both checks run before any job; either failure maps to the error exit code
//! without the engine ever being invoked.
use crate::command::{DEFAULT_IMPORT_GROUP, DEFAULT_IMPORT_TYPE};
use crate::config::JobConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A single named job and a whole batch plan are incompatible requests.
    #[error("a batch-definition file cannot be used when an importer is specified")]
    ModeConflict,
    /// "Run job X" and "run group Y" are alternative selection strategies;
    /// only the "full" sentinel on either axis tolerates a non-default value
    /// on the other.
    #[error("no import group (except \"full\") can be used when an import type is specified")]
    GroupTypeConflict,
}

/// Rejects a positional importer argument combined with the batch-file option.
pub fn check_mode_conflict(
    importer_given: bool,
    config_given: bool,
) -> Result<(), ValidationError> {
    if importer_given && config_given {
        return Err(ValidationError::ModeConflict);
    }
    Ok(())
}

/// Rejects a specific import type combined with a non-default import group.
pub fn check_group_and_type(config: &JobConfig) -> Result<(), ValidationError> {
    if config.import_type != DEFAULT_IMPORT_TYPE && config.import_group != DEFAULT_IMPORT_GROUP {
        return Err(ValidationError::GroupTypeConflict);
    }
    Ok(())
}
