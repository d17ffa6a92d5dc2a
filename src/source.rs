//! Rule-file reading.
//!
//! The engine only ever sees text; this module turns a file in a named
//! encoding into that text. I/O failures are passed through untouched.

use crate::Error;
use encoding_rs::Encoding;
use std::path::Path;

/// Read the rule file at `path`, decoding it with the encoding named by
/// `label` (WHATWG labels: `"utf-8"`, `"utf-16le"`, `"latin1"`, ...).
///
/// A byte-order mark, when present, takes precedence over `label`.
pub fn read_rules(path: &Path, label: &str) -> Result<String, Error> {
    let encoding =
        Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| Error::UnknownEncoding { label: label.to_string() })?;

    let bytes = std::fs::read(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;

    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(Error::Decode { path: path.to_path_buf(), encoding: used.name() });
    }

    tracing::debug!(path = %path.display(), encoding = used.name(), bytes = bytes.len(), "read rule file");
    Ok(text.into_owned())
}
