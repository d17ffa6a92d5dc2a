use std::path::PathBuf;

use thiserror::Error;

use crate::Polarity;

/// Errors surfaced by `ignora`.
///
/// Malformed patterns are not errors: they compile best-effort. Failures only
/// come from reading rule sources, listing directories, or a rule set too large
/// for the regex engine's configured limits.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read rule file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown text encoding '{label}'")]
    UnknownEncoding { label: String },

    #[error("rule file {} is not valid {encoding}", path.display())]
    Decode { path: PathBuf, encoding: &'static str },

    #[error("couldn't find the parent directory for rule file {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to list directory {}: {source}", root.display())]
    Listing {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("compiled {polarity} rules exceed regex limits: {source}")]
    Regex {
        polarity: Polarity,
        #[source]
        source: regex::Error,
    },
}
