//! Keep the version number of a Tauri project in sync across
//! `package.json`, `src-tauri/tauri.conf.json` and `src-tauri/Cargo.toml`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use encoding_rs::UTF_8;
use tracing::{debug, info, warn};

pub mod prompt;
pub mod semver;
pub mod targets;

use self::prompt::{Outcome, Prompter};
use self::semver::Bump;
use self::targets::{CurrentVersion, Target};
use crate::source;

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Menu-driven selection on stdin.
    Interactive,
    Set(String),
    Bump(Bump),
    /// Report only, never write.
    Check,
}

/// Configuration passed from the CLI layer (bin/update_version.rs).
#[derive(Debug)]
pub struct VersionConfig {
    pub root: PathBuf,
    pub action: Action,
    /// Skip the confirmation prompt for `Set` and `Bump`.
    pub assume_yes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOutcome {
    Updated(String),
    /// Nothing was written (cancelled, exited or end of input).
    Unchanged,
    Consistent,
    Inconsistent,
}

pub fn run_with_config<R: BufRead, W: Write>(
    cfg: &VersionConfig,
    input: R,
    mut output: W,
) -> Result<VersionOutcome> {
    let root = &cfg.root;
    let versions = targets::current_versions(root)?;
    if versions.is_empty() {
        bail!(
            "No version files found under {} (looked for {})",
            root.display(),
            Target::ALL.map(Target::relative_path).join(", ")
        );
    }

    print_versions(&mut output, &versions)?;
    let consistent = targets::is_consistent(&versions);
    if !consistent {
        warn!("version files disagree");
        writeln!(output, "\nWarning: the versions above are not consistent")?;
    }

    let base = targets::base_version(&versions);
    debug!(base = %base, action = ?cfg.action, "resolved base version");

    let outcome = match &cfg.action {
        Action::Check => {
            return Ok(if consistent {
                VersionOutcome::Consistent
            } else {
                VersionOutcome::Inconsistent
            });
        }
        Action::Interactive => Prompter::new(input, &mut output, base).run()?,
        Action::Set(version) => {
            let version = semver::validate(version)?.to_string();
            confirm(cfg, input, &mut output, &base, version)?
        }
        Action::Bump(kind) => {
            let version = semver::bump(&base, *kind)?;
            writeln!(output, "\n{kind} increment: {base} -> {version}")?;
            confirm(cfg, input, &mut output, &base, version)?
        }
    };

    let Outcome::Apply(version) = outcome else {
        return Ok(VersionOutcome::Unchanged);
    };

    writeln!(output, "\nUpdating version to {version}...")?;

    // Prepare every file before writing any, so a bad target cannot leave
    // the project half-updated.
    let mut planned = Vec::with_capacity(versions.len());
    for current in &versions {
        let target = current.target;
        let contents = target
            .updated_contents(root, &version)
            .with_context(|| format!("Failed to update {}", target.label()))?;
        match contents {
            Some(contents) => planned.push((target, contents)),
            None => {
                warn!(file = target.relative_path(), "no version of its own, skipped");
                writeln!(output, "Skipped {}: no version of its own", target.label())?;
            }
        }
    }

    for (target, contents) in &planned {
        source::store(&target.path_in(root), contents, UTF_8)
            .with_context(|| format!("Failed to update {}", target.label()))?;
        info!(file = target.relative_path(), version = %version, "updated");
        writeln!(output, "Updated {}: {version}", target.label())?;
    }

    print_next_steps(&mut output, &version)?;
    output.flush()?;
    Ok(VersionOutcome::Updated(version))
}

fn confirm<R: BufRead, W: Write>(
    cfg: &VersionConfig,
    input: R,
    output: W,
    base: &str,
    version: String,
) -> Result<Outcome> {
    if cfg.assume_yes {
        return Ok(Outcome::Apply(version));
    }
    Ok(Prompter::new(input, output, base).confirm(&version)?)
}

fn print_versions(out: &mut impl Write, versions: &[CurrentVersion]) -> Result<()> {
    writeln!(out, "Current versions:")?;
    for current in versions {
        writeln!(
            out,
            "  {:<16} {}",
            format!("{}:", current.target.label()),
            current.display_version()
        )?;
    }
    Ok(())
}

fn print_next_steps(out: &mut impl Write, version: &str) -> Result<()> {
    writeln!(out, "\nVersion updated to {version}")?;
    writeln!(out, "\nNext steps:")?;
    writeln!(out, "1. Build the release: npm run tauri:build")?;
    writeln!(out, "2. Write the release notes: RELEASE_{version}.md")?;
    writeln!(out, "3. Update the version in README.md if it is mentioned")?;
    writeln!(out, "4. Commit and tag:")?;
    writeln!(out, "   git add .")?;
    writeln!(out, "   git commit -m 'chore: bump version to {version}'")?;
    writeln!(out, "   git tag v{version}")?;
    writeln!(out, "   git push && git push --tags")?;
    Ok(())
}
