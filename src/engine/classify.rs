//! Rule classification.
//!
//! Splits raw rule-file content into the two ordered line lists the matcher
//! builder consumes. Nothing is validated here; every surviving line is handed
//! to the compiler as-is.

/// Pattern lines of one rule file, split by polarity, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLines {
    /// Ignore lines, unmodified.
    pub positive: Vec<String>,
    /// Re-include lines with the leading `!` removed.
    pub negative: Vec<String>,
}

/// Classify `content` into ignore and re-include lines.
///
/// `\r\n`, `\r` and `\n` all break lines. Lines are trimmed; blank lines and
/// lines starting with `#` are dropped.
pub fn classify(content: &str) -> ClassifiedLines {
    let mut lines = ClassifiedLines::default();

    // A `\r\n` pair yields an empty piece between the two, which is dropped below.
    for raw in content.split(['\r', '\n']) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.strip_prefix('!') {
            Some(rest) => lines.negative.push(rest.to_string()),
            None => lines.positive.push(line.to_string()),
        }
    }

    tracing::debug!(positive = lines.positive.len(), negative = lines.negative.len(), "classified rule lines");
    lines
}
