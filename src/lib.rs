extern crate self as ignora;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod listing;
mod source;

pub use api::{GitignoreMatcher, Options, Partition, partition_directory, partition_rule_file};
pub use engine::{
    ClassifiedLines, CompiledPattern, CompiledRule, Evaluation, LongestMatch, MatchEvidence, Matcher,
    MismatchObserver, MismatchReport, classify, compile_pattern,
};
pub use error::Error;
pub use listing::{DirectoryLister, WalkDirLister};
pub use source::read_rules;

// --- Shared types -------------------------------------------------------------

bitflags::bitflags! {
    /// Attributes derived from a pattern line while it is compiled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PatternFlags: u8 {
        /// Anchored to the directory holding the rule file (leading or inner `/`).
        const ROOTED         = 1 << 0;
        /// Matches directories and their contents only (trailing `/` or `/**`).
        const DIRECTORY_ONLY = 1 << 1;
    }
}

/// Which side of the rule file a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Plain lines: matching paths are ignored.
    Ignore,
    /// `!`-prefixed lines: matching paths are re-included.
    Reinclude,
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Ignore => f.write_str("ignore"),
            Polarity::Reinclude => f.write_str("re-include"),
        }
    }
}

/// The three verdict queries a [`GitignoreMatcher`] answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Accepts,
    Denies,
    Inspects,
}

impl Query {
    /// Lower-case query name, as used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Query::Accepts => "accepts",
            Query::Denies => "denies",
            Query::Inspects => "inspects",
        }
    }

    /// The boolean combination of the merged hits used by this query.
    ///
    /// For `Accepts` and `Denies` this is the non-overlap formula; when both
    /// polarities hit, the longest-match comparison replaces it.
    pub fn formula(self) -> &'static str {
        match self {
            Query::Accepts => "(Accept || !Deny)",
            Query::Denies => "(!Accept && Deny)",
            Query::Inspects => "(Accept || Deny)",
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A byte span inside a normalized path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Range {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
