//! Mismatch diagnostics.
//!
//! When a caller states the verdict it expected and the engine disagrees, a
//! [`MismatchReport`] gathers everything needed to see why: both merged
//! regexes, whether each hit, which individual rule produced the winning
//! length, and the formula that combined them. The report goes to a
//! registered [`MismatchObserver`], or to the `tracing` log when there is none.
//!
//! Nothing here feeds back into the verdict.

use super::compiled_rules::Matcher;
use super::decision::{Evaluation, LongestMatch};
use crate::Query;

/// Receives reports for queries whose result contradicted the caller's
/// expectation. Called synchronously from the query.
pub trait MismatchObserver: Send + Sync {
    fn on_mismatch(&self, report: &MismatchReport<'_>);
}

impl<F> MismatchObserver for F
where
    F: Fn(&MismatchReport<'_>) + Send + Sync,
{
    fn on_mismatch(&self, report: &MismatchReport<'_>) {
        self(report)
    }
}

/// One polarity's share of a verdict.
#[derive(Debug, Clone, Copy)]
pub struct MatchEvidence<'m> {
    /// Source of the polarity's merged regex.
    pub merged: &'m str,
    /// Whether the merged regex matched.
    pub hit: bool,
    /// The winning individual rule, when the overlap comparison ran.
    pub winner: Option<LongestMatch<'m>>,
}

impl MatchEvidence<'_> {
    /// The text matched by the winning rule inside `path`.
    pub fn matched_text<'p>(&self, path: &'p str) -> Option<&'p str> {
        self.winner.and_then(|w| path.get(w.range.start..w.range.end))
    }
}

/// Everything known about a query whose result differed from the expectation.
#[derive(Debug, Clone)]
pub struct MismatchReport<'m> {
    pub query: Query,
    /// The normalized path.
    pub input: &'m str,
    pub expected: bool,
    /// Re-include side.
    pub accept: MatchEvidence<'m>,
    /// Ignore side.
    pub deny: MatchEvidence<'m>,
    pub formula: &'static str,
    pub actual: bool,
}

impl<'m> MismatchReport<'m> {
    pub(crate) fn new(
        query: Query,
        eval: &'m Evaluation<'m>,
        expected: bool,
        positives: &'m Matcher,
        negatives: &'m Matcher,
    ) -> Self {
        MismatchReport {
            query,
            input: eval.path(),
            expected,
            accept: MatchEvidence {
                merged: negatives.merged_source(),
                hit: eval.accept_hit(),
                winner: eval.accept_match().copied(),
            },
            deny: MatchEvidence { merged: positives.merged_source(), hit: eval.deny_hit(), winner: eval.deny_match().copied() },
            formula: query.formula(),
            actual: eval.verdict(query),
        }
    }

    /// Log the report at `warn` level; used when no observer is registered.
    pub(crate) fn log(&self) {
        tracing::warn!(
            query = self.query.name(),
            input = self.input,
            expected = self.expected,
            accept_re = self.accept.merged,
            accept_test = self.accept.hit,
            accept_match = self.accept.matched_text(self.input),
            deny_re = self.deny.merged,
            deny_test = self.deny.hit,
            deny_match = self.deny.matched_text(self.input),
            combine = self.formula,
            actual = self.actual,
            "verdict differs from expectation"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Options, Polarity};

    #[test]
    fn report_carries_winning_rules() {
        let opts = Options::default();
        let pos = Matcher::build(Polarity::Ignore, &["nonexistent".to_string()], &opts).unwrap();
        let neg = Matcher::build(Polarity::Reinclude, &["/nonexistent/foo".to_string()], &opts).unwrap();
        let eval = Evaluation::run("nonexistent/foo/bar", &pos, &neg, true);

        let report = MismatchReport::new(Query::Denies, &eval, true, &pos, &neg);
        assert_eq!(report.input, "/nonexistent/foo/bar");
        assert!(!report.actual);
        assert_eq!(report.formula, "(!Accept && Deny)");
        assert_eq!(report.accept.merged, r"(?:^\/nonexistent\/foo(?:$|\/))");
        assert_eq!(report.accept.matched_text(report.input), Some("/nonexistent/foo/"));
        assert_eq!(report.deny.matched_text(report.input), Some("/nonexistent/"));
        assert_eq!(report.deny.winner.unwrap().rule.pattern(), "nonexistent");
    }

    #[test]
    fn closures_are_observers() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = AtomicUsize::new(0);
        let observer = |_: &MismatchReport<'_>| {
            calls.fetch_add(1, Ordering::SeqCst);
        };

        let opts = Options::default();
        let pos = Matcher::build(Polarity::Ignore, &[], &opts).unwrap();
        let neg = Matcher::build(Polarity::Reinclude, &[], &opts).unwrap();
        let eval = Evaluation::probe("x", &pos, &neg, true);
        observer.on_mismatch(&MismatchReport::new(Query::Inspects, &eval, true, &pos, &neg));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
