use crate::engine::{self, Evaluation, Matcher, MismatchObserver, MismatchReport};
use crate::listing::{DirectoryLister, WalkDirLister};
use crate::{Error, Polarity, Query};
use std::path::Path;
use std::sync::Arc;

/// Options that affect how rules are compiled and paths are read.
#[derive(Debug, Clone)]
pub struct Options {
    /// Upper bound, in bytes, on each compiled regex (individual or merged).
    /// `None` keeps the `regex` crate default.
    pub size_limit: Option<usize>,
    /// Treat `\` in queried paths as a separator.
    pub backslash_separators: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { size_limit: None, backslash_separators: true }
    }
}

/// Paths of a directory tree split by verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub accepted: Vec<String>,
    pub denied: Vec<String>,
}

/// A compiled rule file.
///
/// Built once from rule text; afterwards every query is a read-only
/// computation, so a matcher can be shared across threads freely.
///
/// # Example
/// ```
/// use ignora::GitignoreMatcher;
///
/// let rules = GitignoreMatcher::new("node_modules\n!node_modules/keep").unwrap();
/// assert!(rules.denies("node_modules/other"));
/// assert!(rules.accepts("node_modules/keep"));
/// assert!(rules.inspects("node_modules/keep"));
/// assert!(!rules.inspects("src/lib.rs"));
/// ```
#[derive(Clone)]
pub struct GitignoreMatcher {
    positives: Matcher,
    negatives: Matcher,
    backslash_separators: bool,
    observer: Option<Arc<dyn MismatchObserver>>,
}

impl std::fmt::Debug for GitignoreMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitignoreMatcher")
            .field("positives", &self.positives.merged_source())
            .field("negatives", &self.negatives.merged_source())
            .field("backslash_separators", &self.backslash_separators)
            .field("observer", &self.observer.as_ref().map(|_| "<observer>"))
            .finish()
    }
}

impl GitignoreMatcher {
    /// Compile `content` with default [`Options`].
    pub fn new(content: &str) -> Result<Self, Error> {
        Self::with_options(content, &Options::default())
    }

    /// Compile `content`.
    ///
    /// Malformed lines never fail; the only error is a rule set that exceeds
    /// `options.size_limit`.
    pub fn with_options(content: &str, options: &Options) -> Result<Self, Error> {
        let lines = engine::classify(content);
        let positives = Matcher::build(Polarity::Ignore, &lines.positive, options)?;
        let negatives = Matcher::build(Polarity::Reinclude, &lines.negative, options)?;

        Ok(GitignoreMatcher { positives, negatives, backslash_separators: options.backslash_separators, observer: None })
    }

    /// Read and compile a rule file stored in the encoding named by
    /// `encoding` (a WHATWG label such as `"utf-8"` or `"utf-16le"`).
    pub fn from_file(path: &Path, encoding: &str, options: &Options) -> Result<Self, Error> {
        let content = crate::source::read_rules(path, encoding)?;
        Self::with_options(&content, options)
    }

    /// Attach an observer for the `*_expecting` queries.
    pub fn with_observer(mut self, observer: impl MismatchObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Ignore rules.
    pub fn positives(&self) -> &Matcher {
        &self.positives
    }

    /// Re-include rules.
    pub fn negatives(&self) -> &Matcher {
        &self.negatives
    }

    /// Evaluate `path` fully, overlap resolution included.
    pub fn evaluate(&self, path: &str) -> Evaluation<'_> {
        Evaluation::run(path, &self.positives, &self.negatives, self.backslash_separators)
    }

    /// Whether `path` is kept.
    pub fn accepts(&self, path: &str) -> bool {
        self.evaluate(path).accepts()
    }

    /// Whether `path` is ignored.
    pub fn denies(&self, path: &str) -> bool {
        self.evaluate(path).denies()
    }

    /// Whether any rule, of either polarity, matches `path`.
    pub fn inspects(&self, path: &str) -> bool {
        Evaluation::probe(path, &self.positives, &self.negatives, self.backslash_separators).inspects()
    }

    /// [`accepts`](Self::accepts), reporting to the observer when the result
    /// is not `expected`.
    pub fn accepts_expecting(&self, path: &str, expected: bool) -> bool {
        self.query_expecting(Query::Accepts, path, expected)
    }

    pub fn denies_expecting(&self, path: &str, expected: bool) -> bool {
        self.query_expecting(Query::Denies, path, expected)
    }

    pub fn inspects_expecting(&self, path: &str, expected: bool) -> bool {
        self.query_expecting(Query::Inspects, path, expected)
    }

    fn query_expecting(&self, query: Query, path: &str, expected: bool) -> bool {
        let eval = match query {
            Query::Inspects => Evaluation::probe(path, &self.positives, &self.negatives, self.backslash_separators),
            Query::Accepts | Query::Denies => self.evaluate(path),
        };
        let actual = eval.verdict(query);

        if actual != expected {
            let report = MismatchReport::new(query, &eval, expected, &self.positives, &self.negatives);
            match &self.observer {
                Some(observer) => observer.on_mismatch(&report),
                None => report.log(),
            }
        }

        actual
    }

    /// Keep the accepted paths of `paths`, in order.
    pub fn accepted<I, S>(&self, paths: I) -> Vec<S>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths.into_iter().filter(|p| self.accepts(p.as_ref())).collect()
    }

    /// Keep the denied paths of `paths`, in order.
    pub fn denied<I, S>(&self, paths: I) -> Vec<S>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths.into_iter().filter(|p| self.denies(p.as_ref())).collect()
    }

    /// Accepted entries of the listing of `dir`.
    pub fn accepted_in(&self, lister: &impl DirectoryLister, dir: &Path) -> Result<Vec<String>, Error> {
        Ok(self.accepted(lister.list(dir)?))
    }

    /// Denied entries of the listing of `dir`.
    pub fn denied_in(&self, lister: &impl DirectoryLister, dir: &Path) -> Result<Vec<String>, Error> {
        Ok(self.denied(lister.list(dir)?))
    }

    /// Split the listing of `dir` by verdict, evaluating each entry once.
    pub fn partition_in(&self, lister: &impl DirectoryLister, dir: &Path) -> Result<Partition, Error> {
        let mut partition = Partition::default();

        for path in lister.list(dir)? {
            let eval = self.evaluate(&path);
            let (accepts, denies) = (eval.accepts(), eval.denies());
            if accepts {
                partition.accepted.push(path.clone());
            }
            if denies {
                partition.denied.push(path);
            }
        }

        tracing::debug!(
            dir = %dir.display(),
            accepted = partition.accepted.len(),
            denied = partition.denied.len(),
            "partitioned directory"
        );
        Ok(partition)
    }
}

/// Compile `content` and split the files under `dir` by verdict.
pub fn partition_directory(content: &str, dir: &Path, options: &Options) -> Result<Partition, Error> {
    GitignoreMatcher::with_options(content, options)?.partition_in(&WalkDirLister::default(), dir)
}

/// Read the rule file at `rule_path` and split the files under `dir` by
/// verdict. Without `dir`, the rule file's own directory is scanned.
pub fn partition_rule_file(
    rule_path: &Path,
    encoding: &str,
    dir: Option<&Path>,
    options: &Options,
) -> Result<Partition, Error> {
    let dir = match dir {
        Some(dir) => dir,
        None => scan_root_for(rule_path)?,
    };

    GitignoreMatcher::from_file(rule_path, encoding, options)?.partition_in(&WalkDirLister::default(), dir)
}

/// The directory holding `rule_path`.
///
/// A bare file name resolves to the current directory.
pub(crate) fn scan_root_for(rule_path: &Path) -> Result<&Path, Error> {
    match rule_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(Path::new(".")),
        Some(parent) => Ok(parent),
        None => Err(Error::DirectoryNotFound { path: rule_path.to_path_buf() }),
    }
}
