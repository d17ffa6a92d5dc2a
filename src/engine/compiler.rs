//! Pattern compiler.
//!
//! Turns one gitignore pattern line into a regex fragment for the `regex`
//! crate, plus the [`PatternFlags`] derived along the way.
//!
//! ## Fragment shape
//!
//! Every fragment assumes the tested path starts with `/` (the decision
//! engine guarantees it):
//!
//! ```text
//!   prefix          body                       suffix
//!   ^\/   rooted    transpiled pattern text    \/        directory-only
//!   \/    floating  [bracket] copied verbatim  (?:$|\/)  entry or its contents
//! ```
//!
//! ## Order matters
//!
//! Leading `/`, trailing `/`, bracket extraction, then the rewrite table in
//! [`REWRITES`] order. Each rewrite runs over the whole segment before the
//! next one starts; swapping two of them corrupts the output (for example the
//! `/**/` rewrite must see the stars before the single-star rewrite eats them).

use crate::PatternFlags;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// How bracket expressions (`[a-z]`) are carried into the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BracketMode {
    /// Copy the bracket contents as a regex character class.
    Verbatim,
    /// Treat brackets as ordinary text (escaped). Used when a verbatim class is
    /// rejected by the regex engine.
    Literal,
}

/// Output of the compiler for a single pattern line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    /// The trimmed pattern line (without any `!` marker).
    pub line: String,
    /// Regex fragment matching a `/`-prefixed path.
    pub fragment: String,
    pub flags: PatternFlags,
    /// Whether bracket expressions were escaped instead of copied.
    pub literal_brackets: bool,
}

impl CompiledPattern {
    pub fn is_rooted(&self) -> bool {
        self.flags.contains(PatternFlags::ROOTED)
    }

    pub fn is_directory_only(&self) -> bool {
        self.flags.contains(PatternFlags::DIRECTORY_ONLY)
    }
}

/// Compile `line` with bracket expressions copied verbatim.
///
/// Never fails: odd input yields an odd but well-formed fragment. Whether the
/// fragment compiles is checked by the matcher builder, which falls back to
/// [`BracketMode::Literal`].
///
/// ```
/// use ignora::compile_pattern;
///
/// let p = compile_pattern("a/**/b");
/// assert_eq!(p.fragment, r"^\/a(?:\/|(?:\/.+\/))b(?:$|\/)");
/// assert!(p.is_rooted());
/// ```
pub fn compile_pattern(line: &str) -> CompiledPattern {
    compile_pattern_with(line, BracketMode::Verbatim)
}

pub(crate) fn compile_pattern_with(line: &str, mode: BracketMode) -> CompiledPattern {
    let mut flags = PatternFlags::empty();
    let mut rest = line;

    if let Some(stripped) = rest.strip_prefix('/') {
        flags.insert(PatternFlags::ROOTED);
        rest = stripped;
    }

    if let Some(stripped) = rest.strip_suffix('/') {
        flags.insert(PatternFlags::DIRECTORY_ONLY);
        rest = stripped;
    }

    let mut body = String::with_capacity(rest.len() * 2);

    if mode == BracketMode::Verbatim {
        let range_re = regex!(r"^((?:[^\[\\]|(?:\\.))*)\[((?:[^\]\\]|(?:\\.))*)\]");
        while let Some(caps) = range_re.captures(rest) {
            let before = caps.get(1).map_or("", |m| m.as_str());
            let class = caps.get(2).map_or("", |m| m.as_str());
            let consumed = caps.get(0).map_or(0, |m| m.end());

            // A separator before or between brackets anchors the pattern.
            if before.contains('/') {
                flags.insert(PatternFlags::ROOTED);
            }

            body.push_str(&transpile(before, &mut flags));
            body.push('[');
            push_class(&mut body, class);
            body.push(']');

            rest = &rest[consumed..];
        }
    }

    if !rest.trim().is_empty() {
        if rest.contains('/') {
            flags.insert(PatternFlags::ROOTED);
        }
        body.push_str(&transpile(rest, &mut flags));
    }

    let prefix = if flags.contains(PatternFlags::ROOTED) { r"^\/" } else { r"\/" };
    let suffix = if flags.contains(PatternFlags::DIRECTORY_ONLY) { r"\/" } else { r"(?:$|\/)" };

    let mut fragment = String::with_capacity(prefix.len() + body.len() + suffix.len());
    fragment.push_str(prefix);
    fragment.push_str(&body);
    fragment.push_str(suffix);

    tracing::trace!(pattern = line, %fragment, ?flags, ?mode, "compiled pattern");

    CompiledPattern { line: line.to_string(), fragment, flags, literal_brackets: mode == BracketMode::Literal }
}

// --- Rewrite table -------------------------------------------------------------

enum Replace {
    /// `regex` replacement template (`$1`, `$0`, ...).
    Template(&'static str),
    /// Computed replacement, for rewrites that must look at what they matched.
    With(fn(&Captures<'_>) -> String),
}

struct Rewrite {
    name: &'static str,
    find: &'static Regex,
    replace: Replace,
    /// A hit upgrades the pattern to directory-only.
    forces_directory: bool,
}

impl Rewrite {
    fn apply(&self, text: &str, flags: &mut PatternFlags) -> String {
        if self.forces_directory && self.find.is_match(text) {
            // `a/**` must match directory `a` itself as well as everything below it.
            flags.insert(PatternFlags::DIRECTORY_ONLY);
        }

        match &self.replace {
            Replace::Template(template) => self.find.replace_all(text, *template).into_owned(),
            Replace::With(f) => self.find.replace_all(text, *f).into_owned(),
        }
    }
}

static REWRITES: Lazy<[Rewrite; 10]> = Lazy::new(|| {
    [
        // Drop escapes; everything that needs one gets it back in the next step.
        Rewrite { name: "unescape", find: regex!(r"\\(.)"), replace: Replace::Template("$1"), forces_directory: false },
        Rewrite {
            name: "escape-meta",
            find: regex!(r"[\-\[\]\{\}\(\)\+\.\\\^\$\|]"),
            replace: Replace::Template(r"\$0"),
            forces_directory: false,
        },
        Rewrite { name: "question", find: regex!(r"\?"), replace: Replace::Template("[^/]"), forces_directory: false },
        Rewrite {
            name: "inner-double-star",
            find: regex!(r"/\*\*/"),
            replace: Replace::Template("(?:/|(?:/.+/))"),
            forces_directory: false,
        },
        Rewrite {
            name: "leading-double-star",
            find: regex!(r"^\*\*/"),
            replace: Replace::Template("(?:|(?:.+/))"),
            forces_directory: false,
        },
        Rewrite {
            name: "trailing-double-star",
            find: regex!(r"/\*\*$"),
            replace: Replace::Template("(?:|(?:/.+))"),
            forces_directory: true,
        },
        Rewrite { name: "double-star", find: regex!(r"\*\*"), replace: Replace::Template(".*"), forces_directory: false },
        // `a/*` matches `a/b` and `a/b/` but never `a` or `a/`.
        Rewrite {
            name: "slash-star",
            find: regex!(r"/\*(/|$)"),
            replace: Replace::Template("/[^/]+$1"),
            forces_directory: false,
        },
        Rewrite {
            name: "single-star",
            find: regex!(r"\\.|\.\*|\*"),
            replace: Replace::With(single_star),
            forces_directory: false,
        },
        Rewrite { name: "slash", find: regex!("/"), replace: Replace::Template(r"\/"), forces_directory: false },
    ]
});

/// Replace a bare `*`, leaving escape pairs and the `.*` from `**` alone.
fn single_star(caps: &Captures<'_>) -> String {
    match &caps[0] {
        "*" => "[^/]*".to_string(),
        other => other.to_string(),
    }
}

/// Copy bracket contents into a regex class. A bare `[` would open a nested
/// class and `&&` / `~~` are set operators in `regex`; all three are escaped
/// so they stay ordinary members.
fn push_class(body: &mut String, class: &str) {
    let mut chars = class.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                body.push(c);
                if let Some(next) = chars.next() {
                    body.push(next);
                }
            }
            '[' | '&' | '~' => {
                body.push('\\');
                body.push(c);
            }
            _ => body.push(c),
        }
    }
}

/// Transpile a bracket-free run of pattern text.
fn transpile(text: &str, flags: &mut PatternFlags) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = text.to_string();
    for rewrite in REWRITES.iter() {
        let next = rewrite.apply(&out, flags);
        if next != out {
            tracing::trace!(rewrite = rewrite.name, from = %out, to = %next, "rewrite");
        }
        out = next;
    }
    out
}
