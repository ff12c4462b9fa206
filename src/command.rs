//! Command identity and import-type resolution.
//!
//! The binary can be installed under its default name or symlinked as a
//! job-bound alias such as `data:import:category`. A [`CommandSpec`] captures
//! that identity once, at binding time, so no later step has to probe argv
//! again to learn which job the invocation asks for.
use std::path::Path;

/// Bare command name of the default (full-import) binding.
pub const DEFAULT_COMMAND_NAME: &str = "data:import";

/// Sentinel import type meaning "run everything registered".
pub const DEFAULT_IMPORT_TYPE: &str = "full";

/// Sentinel import group selecting all importers.
pub const DEFAULT_IMPORT_GROUP: &str = "full";

const DEFAULT_DESCRIPTION: &str =
    "Executes the registered importers (full import). Install this binary under \
     an alias like \"data:import:category\" to bind it to a single importer.";

/// Identity of one command binding: the name it was invoked under and a
/// human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
}

impl CommandSpec {
    /// The default binding that runs the full import when no job is named.
    pub fn default_binding() -> Self {
        Self {
            name: DEFAULT_COMMAND_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }

    /// A job-bound binding whose name encodes the import type as its last
    /// `:`-delimited segment.
    pub fn named(name: &str) -> Self {
        let import_type = last_segment(name);
        Self {
            name: name.to_string(),
            description: format!("Executes the \"{import_type}\" importer."),
        }
    }

    /// Derives the binding from a raw invocation path (argv0). A basename
    /// containing `:` is treated as a job-bound alias; anything else maps to
    /// the default binding.
    pub fn from_invocation(invocation: &str) -> Self {
        let name = Path::new(invocation)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.contains(':') {
            Self::named(&name)
        } else {
            Self::default_binding()
        }
    }

    /// Resolves the requested import type. Precedence: a non-empty positional
    /// argument wins; the default binding resolves to the full import;
    /// otherwise the bound name's last `:`-delimited segment is the type.
    /// Every invocation resolves to some type; there is no error path.
    pub fn resolve_import_type(&self, positional: Option<&str>) -> String {
        if let Some(argument) = positional {
            if !argument.is_empty() {
                return argument.to_string();
            }
        }
        if self.name == DEFAULT_COMMAND_NAME {
            return DEFAULT_IMPORT_TYPE.to_string();
        }
        last_segment(&self.name).to_string()
    }
}

fn last_segment(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}
