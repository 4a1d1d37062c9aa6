//! Human-readable and JSON output of a cleaning run.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::comments::Mode;
use crate::{FileReport, RunSummary};

/// Removals shown per file unless running verbose.
pub const MAX_LISTED_REMOVALS: usize = 5;

fn dry_run_tag(dry_run: bool) -> &'static str {
    if dry_run { "[dry run] " } else { "" }
}

pub fn print_header(
    out: &mut impl Write,
    root: &Path,
    dry_run: bool,
    exts: &[&str],
    file_count: usize,
) -> Result<()> {
    writeln!(out, "{}Cleaning project: {}", dry_run_tag(dry_run), root.display())?;
    let exts: Vec<String> = exts.iter().map(|e| format!(".{e}")).collect();
    writeln!(out, "Supported file types: {}", exts.join(", "))?;
    writeln!(out)?;
    writeln!(out, "Found {file_count} files to process")?;
    writeln!(out)?;
    Ok(())
}

pub fn print_file(
    out: &mut impl Write,
    report: &FileReport,
    dry_run: bool,
    show_all: bool,
) -> Result<()> {
    let count = report.removals.len();
    writeln!(out, "{}Processed file: {}", dry_run_tag(dry_run), report.path)?;
    writeln!(out, "  removed {count} comment line(s):")?;

    let shown = if show_all {
        count
    } else {
        count.min(MAX_LISTED_REMOVALS)
    };
    for entry in &report.removals[..shown] {
        writeln!(out, "    - line {}: {}", entry.line, entry.text)?;
    }
    if shown < count {
        writeln!(out, "    ... and {} more", count - shown)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn print_summary(out: &mut impl Write, summary: &RunSummary, dry_run: bool) -> Result<()> {
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "{}Done!", dry_run_tag(dry_run))?;
    writeln!(out, "Files scanned: {}", summary.files_scanned)?;
    writeln!(out, "Files modified: {}", summary.files_modified)?;
    writeln!(out, "Comment lines removed: {}", summary.comments_removed)?;

    if dry_run {
        writeln!(out)?;
        writeln!(out, "This was a dry run, no files were changed.")?;
        writeln!(out, "Re-run with --execute to apply the changes.")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: String,
    mode: Mode,
    dry_run: bool,
    summary: &'a RunSummary,
    files: &'a [FileReport],
}

pub fn print_json(
    out: &mut impl Write,
    root: &Path,
    mode: Mode,
    dry_run: bool,
    summary: &RunSummary,
    files: &[FileReport],
) -> Result<()> {
    let report = JsonReport {
        root: root.to_string_lossy().into_owned(),
        mode,
        dry_run,
        summary,
        files,
    };
    let json = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::{Disposition, RemovalLogEntry};

    fn file_report(count: usize) -> FileReport {
        FileReport {
            path: "src/app.js".to_string(),
            removals: (1..=count)
                .map(|line| RemovalLogEntry {
                    line,
                    text: format!("// create {line}"),
                    removed: format!("// create {line}"),
                    disposition: Disposition::DropWholeLine,
                })
                .collect(),
        }
    }

    fn render(report: &FileReport, show_all: bool) -> String {
        let mut buf = Vec::new();
        print_file(&mut buf, report, true, show_all).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn long_removal_lists_are_truncated() {
        let text = render(&file_report(8), false);
        assert!(text.starts_with("[dry run] Processed file: src/app.js\n"));
        assert!(text.contains("removed 8 comment line(s)"));
        assert!(text.contains("line 5: // create 5"));
        assert!(!text.contains("line 6:"));
        assert!(text.contains("... and 3 more"));
    }

    #[test]
    fn verbose_lists_everything() {
        let text = render(&file_report(8), true);
        assert!(text.contains("line 8: // create 8"));
        assert!(!text.contains("more"));
    }

    #[test]
    fn summary_mentions_execute_only_on_dry_run() {
        let summary = RunSummary {
            files_scanned: 3,
            files_modified: 1,
            comments_removed: 2,
        };
        let mut dry = Vec::new();
        print_summary(&mut dry, &summary, true).unwrap();
        let dry = String::from_utf8(dry).unwrap();
        assert!(dry.contains("Comment lines removed: 2"));
        assert!(dry.contains("--execute"));

        let mut real = Vec::new();
        print_summary(&mut real, &summary, false).unwrap();
        assert!(!String::from_utf8(real).unwrap().contains("--execute"));
    }

    #[test]
    fn json_report_is_parseable() {
        let mut buf = Vec::new();
        let summary = RunSummary {
            files_scanned: 1,
            files_modified: 1,
            comments_removed: 2,
        };
        print_json(
            &mut buf,
            Path::new("/p"),
            Mode::Aggressive,
            false,
            &summary,
            &[file_report(2)],
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["mode"], "aggressive");
        assert_eq!(value["summary"]["comments_removed"], 2);
        assert_eq!(value["files"][0]["removals"][1]["disposition"], "drop_whole_line");
    }
}
