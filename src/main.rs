use std::collections::HashSet;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tidyup::comments::Mode;
use tidyup::logging::{LogConfig, init_logging};
use tidyup::walk::{DEFAULT_EXTENSIONS, WalkOptions};
use tidyup::{Config, run_with_config};
use tracing::level_filters::LevelFilter;

/// clean-comments - strip noise `//` comments from a JS/TS/CSS project.
///
/// Runs as a dry run unless `--execute` is given.
#[derive(Parser, Debug)]
#[command(
    name = "clean-comments",
    author,
    version,
    about = "Remove low-value // comments from JavaScript, TypeScript and stylesheet sources",
    long_about = r#"Remove low-value single-line (//) comments from a project.

By default it:
  • only reports what it would remove (pass --execute to write)
  • keeps directives, TODO/FIXME notes, licences, URLs, lists and separators
  • keeps comments mentioning security, performance, config, APIs or routes
  • removes whole-line comments that merely narrate the code ("create component")
  • skips node_modules, dist, build and other generated directories

Typical usage:
  clean-comments
  clean-comments src --execute
  clean-comments --aggressive --execute
"#
)]
struct Args {
    /// Project directory (or single file) to clean. Defaults to current directory.
    #[arg(value_name = "PATH", default_value = ".")]
    path: PathBuf,

    /// Write the changes. Without this flag nothing on disk is modified.
    #[arg(long = "execute")]
    execute: bool,

    /// Remove every comment, including trailing comments after code.
    ///
    /// No preserve rule applies in this mode. Review the dry run first.
    #[arg(long = "aggressive")]
    aggressive: bool,

    /// File extensions to clean (e.g. js, tsx). Defaults to js, jsx, ts, tsx,
    /// css, scss and sass.
    ///
    /// Can be repeated or comma-separated.
    #[arg(
        short = 't',
        long = "type",
        alias = "ext",
        value_name = "EXT",
        action = ArgAction::Append,
        value_delimiter = ','
    )]
    exts: Vec<String>,

    /// Additional glob patterns to exclude (files or directories), relative
    /// to PATH, e.g. `--exclude 'src/vendor/**'`.
    #[arg(
        long = "exclude",
        short = 'E',
        value_name = "GLOB",
        action = ArgAction::Append,
        value_delimiter = ','
    )]
    excludes: Vec<String>,

    /// Disable reading .gitignore / .ignore / git exclude files.
    #[arg(long = "no-gitignore")]
    no_gitignore: bool,

    /// Follow symbolic links during traversal.
    #[arg(long = "follow-symlinks")]
    follow_symlinks: bool,

    /// Print a JSON report instead of the text summary.
    #[arg(long = "json")]
    json: bool,

    /// -v lists every removal and logs progress, -vv logs each decision.
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let level = args.verbosity.tracing_level_filter();
    init_logging(
        &LogConfig::from_level(level, args.verbosity.is_present())
            .with_ansi(io::stderr().is_terminal()),
    );

    // Normalise extensions to lowercase, no leading dot.
    let mut ext_set = HashSet::new();
    for e in &args.exts {
        let norm = e.trim().trim_start_matches('.').to_ascii_lowercase();
        if !norm.is_empty() {
            ext_set.insert(norm);
        }
    }

    if ext_set.is_empty() {
        if !args.exts.is_empty() {
            bail!("No valid extensions provided (after normalisation).");
        }
        ext_set = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
    }

    let cfg = Config {
        path: args.path,
        dry_run: !args.execute,
        mode: if args.aggressive {
            Mode::Aggressive
        } else {
            Mode::Normal
        },
        walk: WalkOptions {
            exts: ext_set,
            excludes: args.excludes,
            follow_symlinks: args.follow_symlinks,
            no_gitignore: args.no_gitignore,
        },
        json: args.json,
        verbose: level >= LevelFilter::INFO,
    };

    run_with_config(cfg)?;
    Ok(())
}
