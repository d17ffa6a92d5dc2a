use ignora::{Evaluation, GitignoreMatcher, LongestMatch, Matcher, Query};
use std::path::Path;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_report(rules_path: &Path, matcher: &GitignoreMatcher, paths: &[String], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Rules: {}", rules_path.display()), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Ignore ━━━", ansi::GRAY));
    print_matcher(matcher.positives(), &palette);

    println!("\n{}", palette.paint("━━━ Re-include ━━━", ansi::GRAY));
    print_matcher(matcher.negatives(), &palette);

    if paths.is_empty() {
        println!();
        return;
    }

    println!("\n{}", palette.paint("━━━ Paths ━━━", ansi::GRAY));
    for path in paths {
        print_evaluation(&matcher.evaluate(path), &palette);
    }
    println!();
}

fn print_matcher(matcher: &Matcher, palette: &ansi::Palette) {
    if matcher.is_empty() {
        println!("{}", palette.dim("  No rules"));
        return;
    }

    for (idx, rule) in matcher.rules().iter().enumerate() {
        let mut notes = Vec::new();
        if rule.compiled().is_rooted() {
            notes.push("rooted");
        }
        if rule.compiled().is_directory_only() {
            notes.push("dir-only");
        }
        if rule.compiled().literal_brackets {
            notes.push("literal brackets");
        }

        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(rule.pattern(), ansi::GREEN)),
            palette.dim("│"),
            palette.paint(rule.source(), ansi::YELLOW),
        );
        if !notes.is_empty() {
            println!("      {}", palette.dim(notes.join(", ")));
        }
    }
    println!("  {} {}", palette.dim("merged:"), palette.dim(matcher.merged_source()));
}

fn print_evaluation(eval: &Evaluation<'_>, palette: &ansi::Palette) {
    println!("\n  {}", palette.bold(eval.path()));
    println!(
        "    {} {}  {} {}",
        palette.dim("accept hit:"),
        fmt_hit(eval.accept_hit(), palette),
        palette.dim("│ deny hit:"),
        fmt_hit(eval.deny_hit(), palette),
    );

    if eval.is_overlap() {
        println!("    {} {}", palette.dim("accept winner:"), fmt_winner(eval.accept_match(), eval.path(), palette));
        println!("    {} {}", palette.dim("deny winner:  "), fmt_winner(eval.deny_match(), eval.path(), palette));
        println!("    {} {}", palette.dim("combine:"), palette.paint("accept_len >= deny_len", ansi::BLUE));
    } else {
        println!("    {} {}", palette.dim("combine:"), palette.paint(Query::Accepts.formula(), ansi::BLUE));
    }

    let verdict = if eval.denies() { palette.paint("deny", ansi::RED) } else { palette.paint("accept", ansi::GREEN) };
    println!("    {} {}", palette.dim("verdict:"), palette.bold(verdict));
}

fn fmt_hit(hit: bool, palette: &ansi::Palette) -> String {
    if hit { palette.paint("✓", ansi::GREEN) } else { palette.dim("✗") }
}

fn fmt_winner(winner: Option<&LongestMatch<'_>>, path: &str, palette: &ansi::Palette) -> String {
    let Some(winner) = winner else {
        return palette.dim("none");
    };

    let text = path.get(winner.range.start..winner.range.end).unwrap_or_default();
    format!(
        "{} {} {}",
        palette.paint(winner.rule.pattern(), ansi::CYAN),
        palette.paint(format!("span {}..{}", winner.range.start, winner.range.end), ansi::YELLOW),
        palette.dim(format!("\"{}\"", text)),
    )
}
