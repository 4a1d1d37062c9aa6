use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tidyup::logging::{LogConfig, init_logging};
use tidyup::version::semver::Bump;
use tidyup::version::{Action, VersionConfig, VersionOutcome, run_with_config};

/// update-version - keep package.json, tauri.conf.json and Cargo.toml on the
/// same version.
#[derive(Parser, Debug)]
#[command(
    name = "update-version",
    author,
    version,
    about = "Synchronise the version across package.json, src-tauri/tauri.conf.json and src-tauri/Cargo.toml",
    long_about = r#"Synchronise the version of a Tauri project.

Without options it shows the current versions and asks, interactively,
for a new version or an increment. Missing files are skipped.

Typical usage:
  update-version
  update-version --bump patch --yes
  update-version --set 2.0.0-beta.1
  update-version --check
"#
)]
struct Args {
    /// Project root containing package.json and src-tauri/.
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Set this exact version (semantic versioning, e.g. 1.0.2).
    #[arg(long = "set", value_name = "VERSION", conflicts_with_all = ["bump", "check"])]
    set: Option<String>,

    /// Increment the current package.json version.
    #[arg(long = "bump", value_name = "PART", conflicts_with = "check")]
    bump: Option<Bump>,

    /// Do not ask for confirmation.
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Only print the versions; exit with status 1 when they disagree.
    #[arg(long = "check")]
    check: bool,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() {
    match run() {
        Ok(VersionOutcome::Inconsistent) => std::process::exit(1),
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<VersionOutcome> {
    let args = Args::parse();

    init_logging(
        &LogConfig::from_level(
            args.verbosity.tracing_level_filter(),
            args.verbosity.is_present(),
        )
        .with_ansi(io::stderr().is_terminal()),
    );

    let action = match (args.set, args.bump, args.check) {
        (Some(version), _, _) => Action::Set(version),
        (None, Some(kind), _) => Action::Bump(kind),
        (None, None, true) => Action::Check,
        (None, None, false) => Action::Interactive,
    };

    let cfg = VersionConfig {
        root: args.root,
        action,
        assume_yes: args.yes,
    };

    run_with_config(&cfg, io::stdin().lock(), io::stdout().lock())
}
