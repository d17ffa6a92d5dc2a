//! Matcher construction.
//!
//! One [`Matcher`] per polarity: the pattern lines are sorted, compiled one by
//! one, and joined into a single alternation for the cheap "does anything
//! match" probe. The individual regexes are kept for the longest-match
//! comparison, which the merged alternation cannot answer.
//!
//! ## Invariants
//!
//! - `Matcher::rules` is sorted by pattern line (byte order) and the merged
//!   regex lists the same fragments in the same order, so compiling the same
//!   text twice yields byte-identical sources.
//! - An empty matcher's merged regex never matches and `rules` is empty.

use super::compiler::{BracketMode, CompiledPattern, compile_pattern_with};
use super::decision::LongestMatch;
use crate::{Error, Options, PatternFlags, Polarity, Range};
use regex::{Regex, RegexBuilder};

/// Merged source for a polarity without any lines: an empty class.
const NEVER_MATCHES: &str = r"[^\x00-\x{10FFFF}]";

/// One pattern line and its compiled regex.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pattern: CompiledPattern,
    regex: Regex,
}

impl CompiledRule {
    /// The pattern line this rule was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern.line
    }

    /// The regex fragment (identical to `regex().as_str()`).
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    pub fn flags(&self) -> PatternFlags {
        self.pattern.flags
    }

    pub fn compiled(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Span of the leftmost match against a normalized path.
    pub fn find(&self, path: &str) -> Option<Range> {
        self.regex.find(path).map(|m| Range { start: m.start(), end: m.end() })
    }
}

/// All rules of one polarity: a merged alternation plus the individual rules.
#[derive(Debug, Clone)]
pub struct Matcher {
    polarity: Polarity,
    merged: Regex,
    rules: Vec<CompiledRule>,
}

impl Matcher {
    /// Build a matcher from pattern lines (in any order).
    ///
    /// A fragment the regex engine rejects is recompiled with its brackets
    /// escaped; only a rule set that overflows `options.size_limit` fails.
    pub(crate) fn build(polarity: Polarity, lines: &[String], options: &Options) -> Result<Self, Error> {
        if lines.is_empty() {
            let merged = build_regex(NEVER_MATCHES, options).map_err(|source| Error::Regex { polarity, source })?;
            return Ok(Matcher { polarity, merged, rules: Vec::new() });
        }

        let mut sorted: Vec<&str> = lines.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        let mut rules = Vec::with_capacity(sorted.len());
        for line in sorted {
            rules.push(compile_rule(polarity, line, options)?);
        }

        let merged_source =
            rules.iter().map(|r| format!("(?:{})", r.source())).collect::<Vec<_>>().join("|");
        let merged = build_regex(&merged_source, options).map_err(|source| Error::Regex { polarity, source })?;

        tracing::debug!(%polarity, rules = rules.len(), merged = merged.as_str(), "built matcher");

        Ok(Matcher { polarity, merged, rules })
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Source of the merged alternation regex.
    pub fn merged_source(&self) -> &str {
        self.merged.as_str()
    }

    pub fn merged(&self) -> &Regex {
        &self.merged
    }

    /// Sources of the individual regexes, in sorted pattern order.
    pub fn individual_sources(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(CompiledRule::source)
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether any rule of this polarity matches the normalized path.
    pub fn is_match(&self, path: &str) -> bool {
        self.merged.is_match(path)
    }

    /// The individual rule with the longest match (in characters) against the
    /// normalized path.
    ///
    /// On equal lengths the first rule in sorted order is kept.
    pub fn longest_match(&self, path: &str) -> Option<LongestMatch<'_>> {
        let mut best: Option<LongestMatch<'_>> = None;

        for (index, rule) in self.rules.iter().enumerate() {
            let Some(range) = rule.find(path) else {
                continue;
            };
            let chars = path[range.start..range.end].chars().count();
            if best.as_ref().is_none_or(|b| b.chars < chars) {
                best = Some(LongestMatch { index, rule, range, chars });
            }
        }

        best
    }
}

fn compile_rule(polarity: Polarity, line: &str, options: &Options) -> Result<CompiledRule, Error> {
    let pattern = compile_pattern_with(line, BracketMode::Verbatim);
    match build_regex(&pattern.fragment, options) {
        Ok(regex) => Ok(CompiledRule { pattern, regex }),
        Err(err) => {
            tracing::warn!(pattern = line, fragment = %pattern.fragment, error = %err, "treating brackets as literal text");
            let pattern = compile_pattern_with(line, BracketMode::Literal);
            let regex = build_regex(&pattern.fragment, options).map_err(|source| Error::Regex { polarity, source })?;
            Ok(CompiledRule { pattern, regex })
        }
    }
}

fn build_regex(source: &str, options: &Options) -> Result<Regex, regex::Error> {
    let mut builder = RegexBuilder::new(source);
    if let Some(limit) = options.size_limit {
        builder.size_limit(limit);
    }
    builder.build()
}
