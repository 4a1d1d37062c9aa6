use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{error, info, info_span, warn};

pub mod comments;
pub mod error;
pub mod logging;
pub mod report;
pub mod source;
pub mod version;
pub mod walk;

use crate::comments::{Classifier, Mode, RemovalLogEntry, RuleSet};
use crate::walk::{WalkOptions, collect_files, make_display_path};

/// Configuration passed from the CLI layer (main.rs) into the cleaner.
#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub dry_run: bool,
    pub mode: Mode,
    pub walk: WalkOptions,
    pub json: bool,
    /// Print every removal instead of the first few per file.
    pub verbose: bool,
}

/// Counters for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub comments_removed: usize,
}

/// Removals recorded for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub removals: Vec<RemovalLogEntry>,
}

/// Everything one cleaning run needs: the compiled rules, the mode and the
/// counters. Created once per invocation.
#[derive(Debug)]
pub struct RunContext {
    classifier: Classifier,
    mode: Mode,
    dry_run: bool,
    summary: RunSummary,
}

impl RunContext {
    pub fn new(mode: Mode, dry_run: bool) -> Result<Self> {
        let rules = RuleSet::compile().context("Failed to compile comment rules")?;
        Ok(Self {
            classifier: Classifier::new(rules),
            mode,
            dry_run,
            summary: RunSummary::default(),
        })
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Clean one file and return what was removed from it.
    ///
    /// Unreadable files and failed writes are logged and count as untouched.
    pub fn clean_file(&mut self, path: &Path, display_path: &str) -> Vec<RemovalLogEntry> {
        let _span = info_span!("file", path = display_path).entered();
        self.summary.files_scanned += 1;

        let file = match source::load(path) {
            Ok(file) => file,
            Err(err) => {
                warn!("skipping: {err}");
                return Vec::new();
            }
        };

        let rewrite = comments::process_str(&file.text, &self.classifier, self.mode);
        if !rewrite.changed() {
            return Vec::new();
        }

        if !self.dry_run
            && let Err(err) = source::store(path, &rewrite.content(), file.encoding)
        {
            error!("changes discarded: {err}");
            return Vec::new();
        }

        self.summary.files_modified += 1;
        self.summary.comments_removed += rewrite.removals.len();
        info!(
            removed = rewrite.removals.len(),
            dry_run = self.dry_run,
            "cleaned"
        );

        rewrite.removals
    }
}

pub fn run_with_config(cfg: Config) -> Result<RunSummary> {
    // Canonicalise the root so running from arbitrary working dirs is reliable.
    let root = match cfg.path.canonicalize() {
        Ok(p) => p,
        Err(e) => bail!("Project path does not exist: {} ({e})", cfg.path.display()),
    };

    let files = collect_files(&root, &cfg.walk)?;
    let mut ctx = RunContext::new(cfg.mode, cfg.dry_run)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut exts: Vec<&str> = cfg.walk.exts.iter().map(String::as_str).collect();
    exts.sort_unstable();

    if !cfg.json {
        report::print_header(&mut out, &root, cfg.dry_run, &exts, files.len())?;
    }

    let mut reports = Vec::new();
    for path in &files {
        let display_path = make_display_path(&root, path);
        let removals = ctx.clean_file(path, &display_path);
        if removals.is_empty() {
            continue;
        }

        let file_report = FileReport {
            path: display_path,
            removals,
        };
        if !cfg.json {
            report::print_file(&mut out, &file_report, cfg.dry_run, cfg.verbose)?;
        }
        reports.push(file_report);
    }

    let summary = ctx.summary();
    if cfg.json {
        report::print_json(&mut out, &root, cfg.mode, cfg.dry_run, &summary, &reports)?;
    } else {
        report::print_summary(&mut out, &summary, cfg.dry_run)?;
    }
    out.flush()?;

    Ok(summary)
}
