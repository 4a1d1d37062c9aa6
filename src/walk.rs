//! Candidate file discovery for the comment cleaner.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use tracing::warn;

/// Extensions cleaned when no `--type` is given.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "css", "scss", "sass"];

/// Directory names that are never descended into.
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
    ".nuxt",
    "public",
    "static",
    "__pycache__",
];

/// File names that are never touched, whatever their extension.
pub const EXCLUDED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    ".gitignore",
    ".eslintrc.js",
    ".prettierrc.js",
];

/// How to walk the project tree.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub exts: HashSet<String>,
    pub excludes: Vec<String>,
    pub follow_symlinks: bool,
    pub no_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            exts: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excludes: Vec::new(),
            follow_symlinks: false,
            no_gitignore: false,
        }
    }
}

/// Collect every file under `root` the cleaner should look at, sorted by path.
///
/// Unreadable directory entries are logged and skipped.
pub fn collect_files(root: &Path, opts: &WalkOptions) -> Result<Vec<PathBuf>> {
    let exclude_globset = build_exclude_globset(&opts.excludes)?;

    let mut builder = WalkBuilder::new(root);
    builder.follow_links(opts.follow_symlinks);

    // Helps avoid edge cases where process CWD is invalid and global ignores need a base.
    builder.current_dir(root.to_path_buf());

    if opts.no_gitignore {
        builder
            .git_ignore(false)
            .git_exclude(false)
            .git_global(false)
            .ignore(false);
    } else {
        builder
            .git_ignore(true)
            .git_exclude(true)
            .git_global(true)
            .ignore(true)
            .require_git(false);
    }

    // Values moved into the 'static filter closure must be owned separately.
    let root_for_filter = root.to_path_buf();

    builder.filter_entry(move |entry: &DirEntry| {
        if entry.depth() == 0 {
            return true;
        }

        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        let name = entry.file_name().to_string_lossy();
        let name: &str = &name;
        if is_dir && EXCLUDED_DIRS.contains(&name) {
            return false;
        }
        if !is_dir && EXCLUDED_FILES.contains(&name) {
            return false;
        }

        // Apply user exclude globs, relative to the root.
        if let Some(ref gs) = exclude_globset {
            let path = entry.path();
            let rel = path.strip_prefix(&root_for_filter).unwrap_or(path);
            let rel_norm = normalize_for_matching(rel);

            if gs.is_match(&rel_norm) {
                return false;
            }

            // If this is a directory, also try a trailing slash to make patterns
            // like `tests/**` able to prune the whole subtree early.
            if is_dir && !rel_norm.ends_with('/') {
                let rel_dir = format!("{rel_norm}/");
                if gs.is_match(&rel_dir) {
                    return false;
                }
            }
        }

        true
    });

    let mut files = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!("walk error: {err}");
                continue;
            }
        };

        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }

        if matches_ext(entry.path(), &opts.exts) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Compile the `--exclude` globs. `None` when there are none to apply.
fn build_exclude_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    let mut builder = GlobSetBuilder::new();
    let mut any = false;

    for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        let glob = Glob::new(pattern)
            .with_context(|| format!("Invalid --exclude glob pattern: {pattern}"))?;
        builder.add(glob);
        any = true;
    }

    if !any {
        return Ok(None);
    }
    let set = builder
        .build()
        .context("Failed to build exclude glob set")?;
    Ok(Some(set))
}

/// Whether `path` has one of the cleaned extensions (stored lowercase).
pub fn matches_ext(path: &Path, exts: &HashSet<String>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| exts.contains(&ext.to_ascii_lowercase()))
}

/// Path shown in the report: relative to the project root, `/`-separated.
///
/// Cleaning a single file reports just its file name.
pub fn make_display_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => normalize_for_matching(rel),
        Ok(_) => path
            .file_name()
            .map_or_else(|| normalize_for_matching(path), |name| name.to_string_lossy().into_owned()),
        Err(_) => normalize_for_matching(path),
    }
}

/// `/`-separated form used both for glob matching and for display.
fn normalize_for_matching(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn matches_ext_is_case_insensitive_and_requires_extension() {
        let opts = WalkOptions::default();

        assert!(matches_ext(Path::new("App.TSX"), &opts.exts));
        assert!(matches_ext(Path::new("dir/site.scss"), &opts.exts));
        assert!(!matches_ext(Path::new("README"), &opts.exts));
        assert!(!matches_ext(Path::new("script.py"), &opts.exts));
    }

    #[test]
    fn display_path_is_relative_and_slash_separated() {
        let root = Path::new("/project");
        assert_eq!(
            make_display_path(root, Path::new("/project/src/app.js")),
            "src/app.js"
        );
        assert_eq!(
            make_display_path(Path::new("/project/app.js"), Path::new("/project/app.js")),
            "app.js"
        );
    }

    #[test]
    fn collect_skips_excluded_dirs_files_and_globs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for rel in [
            "src/app.js",
            "src/b.ts",
            "src/gen/out.js",
            "node_modules/pkg/index.js",
            "dist/bundle.js",
            ".eslintrc.js",
            "notes.md",
        ] {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "// x\n").unwrap();
        }

        let opts = WalkOptions {
            excludes: vec!["src/gen/**".to_string()],
            ..WalkOptions::default()
        };
        let files: Vec<String> = collect_files(root, &opts)
            .unwrap()
            .iter()
            .map(|p| make_display_path(root, p))
            .collect();

        assert_eq!(files, vec!["src/app.js", "src/b.ts"]);
    }

    #[test]
    fn blank_exclude_patterns_are_ignored() {
        let patterns = vec!["  ".to_string(), String::new()];
        assert!(build_exclude_globset(&patterns).unwrap().is_none());
    }

    #[test]
    fn invalid_glob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let opts = WalkOptions {
            excludes: vec!["a[".to_string()],
            ..WalkOptions::default()
        };
        assert!(collect_files(dir.path(), &opts).is_err());
    }
}
