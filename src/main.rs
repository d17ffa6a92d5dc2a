mod debug_report;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ignora::{Error, GitignoreMatcher, Options, partition_rule_file};
use serde::Serialize;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "IGNORA_LOG";

#[derive(Parser)]
#[command(name = "ignora", version, about = "Evaluate paths against gitignore rules")]
struct Cli {
    /// Log matcher construction and verdicts at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RuleSource {
    /// Rule file to compile.
    #[arg(short, long, default_value = ".gitignore")]
    rules: PathBuf,

    /// Text encoding of the rule file (WHATWG label).
    #[arg(short, long, default_value = "utf-8")]
    encoding: String,
}

impl RuleSource {
    fn load(&self) -> Result<GitignoreMatcher, Error> {
        GitignoreMatcher::from_file(&self.rules, &self.encoding, &Options::default())
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the verdict for each path; exits with 1 if any path is denied.
    Check {
        #[command(flatten)]
        source: RuleSource,

        #[arg(long, value_enum, default_value_t = Format::Human)]
        format: Format,

        /// Paths to check (directories with a trailing `/`).
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// List the accepted files of a directory tree.
    Scan {
        #[command(flatten)]
        source: RuleSource,

        /// Directory to scan. Defaults to the directory holding the rule file.
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// List denied files instead.
        #[arg(long)]
        denied: bool,
    },

    /// Show the compiled rules and how each path was decided.
    Explain {
        #[command(flatten)]
        source: RuleSource,

        /// Force ANSI color output.
        #[arg(long, conflicts_with = "no_color")]
        color: bool,

        /// Disable ANSI color output.
        #[arg(long)]
        no_color: bool,

        paths: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Serialize)]
struct Verdict<'a> {
    path: &'a str,
    accepts: bool,
    denies: bool,
    inspects: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ignora=debug" } else { "ignora=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(command: Command) -> Result<ExitCode, Error> {
    match command {
        Command::Check { source, format, paths } => {
            let matcher = source.load()?;
            let verdicts: Vec<_> = paths
                .iter()
                .map(|path| {
                    let eval = matcher.evaluate(path);
                    Verdict { path, accepts: eval.accepts(), denies: eval.denies(), inspects: eval.inspects() }
                })
                .collect();

            match format {
                Format::Human => {
                    for v in &verdicts {
                        println!("{}\t{}", if v.denies { "deny" } else { "accept" }, v.path);
                    }
                }
                Format::Json => match serde_json::to_string_pretty(&verdicts) {
                    Ok(json) => println!("{json}"),
                    Err(err) => {
                        eprintln!("error: failed to serialize verdicts: {err}");
                        return Ok(ExitCode::from(2));
                    }
                },
            }

            let any_denied = verdicts.iter().any(|v| v.denies);
            Ok(if any_denied { ExitCode::from(1) } else { ExitCode::SUCCESS })
        }
        Command::Scan { source, dir, denied } => {
            let partition = partition_rule_file(&source.rules, &source.encoding, dir.as_deref(), &Options::default())?;
            let listed = if denied { &partition.denied } else { &partition.accepted };
            for path in listed {
                println!("{path}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Explain { source, color, no_color, paths } => {
            let matcher = source.load()?;
            let color = if color {
                true
            } else if no_color {
                false
            } else {
                io::stdout().is_terminal()
            };

            debug_report::print_report(&source.rules, &matcher, &paths, color);
            Ok(ExitCode::SUCCESS)
        }
    }
}
