//! Verdict resolution.
//!
//! Both matchers are probed with their merged regex. When only one polarity
//! (or none) hits, the verdict follows directly. When both hit, the merged
//! alternation cannot tell which rule matched, so every individual regex is
//! run and the polarity with the longer matched span wins:
//!
//! ```text
//! accept_hit  deny_hit   accepts                    denies
//!   false      false      true                       false
//!   true       false      true                       false
//!   false      true       false                      true
//!   true       true       accept_len >= deny_len     accept_len < deny_len
//! ```
//!
//! Lengths are counted in characters, not bytes. Ties favor acceptance.
//! This approximates git's "last matching line wins" well for the usual
//! shapes (a broad directory deny with a narrower re-include) but is not a reimplementation of it. Two rules of the same
//! polarity with equal lengths are not ordered any further.

use super::compiled_rules::{CompiledRule, Matcher};
use crate::{Query, Range};
use std::borrow::Cow;

/// The widest individual match of one polarity.
#[derive(Debug, Clone, Copy)]
pub struct LongestMatch<'m> {
    /// Index into the matcher's sorted rules.
    pub index: usize,
    pub rule: &'m CompiledRule,
    /// Matched span inside the normalized path, in bytes.
    pub range: Range,
    /// Length of the matched span in characters.
    pub chars: usize,
}

impl LongestMatch<'_> {
    /// Length in characters; the overlap comparison uses this, not the byte span.
    pub fn len(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Overlap<'m> {
    accept: Option<LongestMatch<'m>>,
    deny: Option<LongestMatch<'m>>,
}

impl Overlap<'_> {
    fn accept_len(&self) -> usize {
        self.accept.map_or(0, |m| m.len())
    }

    fn deny_len(&self) -> usize {
        self.deny.map_or(0, |m| m.len())
    }
}

/// Result of probing one path against both matchers.
#[derive(Debug, Clone)]
pub struct Evaluation<'m> {
    path: String,
    accept_hit: bool,
    deny_hit: bool,
    overlap: Option<Overlap<'m>>,
}

impl<'m> Evaluation<'m> {
    /// Probe `path` and, when both polarities hit, resolve the overlap.
    ///
    /// `positives` holds the ignore rules, `negatives` the re-include rules.
    pub fn run(path: &str, positives: &'m Matcher, negatives: &'m Matcher, backslash_separators: bool) -> Self {
        let mut eval = Self::probe(path, positives, negatives, backslash_separators);

        if eval.accept_hit && eval.deny_hit {
            let overlap = Overlap { accept: negatives.longest_match(&eval.path), deny: positives.longest_match(&eval.path) };
            tracing::trace!(
                path = %eval.path,
                accept_len = overlap.accept_len(),
                deny_len = overlap.deny_len(),
                "resolved overlapping rules"
            );
            eval.overlap = Some(overlap);
        }

        eval
    }

    /// Probe `path` with the merged regexes only.
    ///
    /// Enough for [`Query::Inspects`]; `accepts`/`denies` on a probe that hit
    /// both polarities report a tie (acceptance).
    pub fn probe(path: &str, positives: &'m Matcher, negatives: &'m Matcher, backslash_separators: bool) -> Self {
        let path = normalize(path, backslash_separators).into_owned();
        let accept_hit = negatives.is_match(&path);
        let deny_hit = positives.is_match(&path);

        Evaluation { path, accept_hit, deny_hit, overlap: None }
    }

    /// The normalized path that was tested.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether any re-include rule matched.
    pub fn accept_hit(&self) -> bool {
        self.accept_hit
    }

    /// Whether any ignore rule matched.
    pub fn deny_hit(&self) -> bool {
        self.deny_hit
    }

    /// Both polarities matched and the longest-match comparison decided.
    pub fn is_overlap(&self) -> bool {
        self.overlap.is_some()
    }

    pub fn accept_match(&self) -> Option<&LongestMatch<'m>> {
        self.overlap.as_ref().and_then(|o| o.accept.as_ref())
    }

    pub fn deny_match(&self) -> Option<&LongestMatch<'m>> {
        self.overlap.as_ref().and_then(|o| o.deny.as_ref())
    }

    pub fn accepts(&self) -> bool {
        match &self.overlap {
            Some(overlap) => overlap.accept_len() >= overlap.deny_len(),
            None if self.accept_hit && self.deny_hit => true,
            None => self.accept_hit || !self.deny_hit,
        }
    }

    pub fn denies(&self) -> bool {
        match &self.overlap {
            Some(overlap) => overlap.accept_len() < overlap.deny_len(),
            None if self.accept_hit && self.deny_hit => false,
            None => !self.accept_hit && self.deny_hit,
        }
    }

    pub fn inspects(&self) -> bool {
        self.accept_hit || self.deny_hit
    }

    pub fn verdict(&self, query: Query) -> bool {
        match query {
            Query::Accepts => self.accepts(),
            Query::Denies => self.denies(),
            Query::Inspects => self.inspects(),
        }
    }
}

/// Bring a caller path into the shape every fragment expects: `/` separators
/// and a leading `/`.
pub(crate) fn normalize(path: &str, backslash_separators: bool) -> Cow<'_, str> {
    let path: Cow<'_, str> =
        if backslash_separators && path.contains('\\') { Cow::Owned(path.replace('\\', "/")) } else { Cow::Borrowed(path) };

    if path.starts_with('/') { path } else { Cow::Owned(format!("/{path}")) }
}
