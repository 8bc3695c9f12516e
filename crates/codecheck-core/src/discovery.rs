//! File discovery and path filtering.

use crate::pattern::{CompileErrors, Pattern};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Include/exclude regexes applied to root-relative paths.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PathFilter {
    /// Compiles include and exclude regexes.
    ///
    /// # Errors
    ///
    /// Returns every compile failure if any regex is invalid.
    pub fn compile<I, E>(include: I, exclude: E) -> Result<Self, CompileErrors>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let mut errors = CompileErrors::default();
        let include = include
            .into_iter()
            .enumerate()
            .filter_map(|(i, p)| errors.compile(format!("scan.filter[{i}]"), p.as_ref()))
            .collect();
        let exclude = exclude
            .into_iter()
            .enumerate()
            .filter_map(|(i, p)| errors.compile(format!("scan.exclude[{i}]"), p.as_ref()))
            .collect();
        errors.into_result(Self { include, exclude })
    }

    /// Tests whether a root-relative path is selected.
    ///
    /// A path is selected when it matches at least one include regex (or there
    /// are none) and matches no exclude regex.
    #[must_use]
    pub fn selects(&self, relative: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| p.is_match(relative));
        included && !self.exclude.iter().any(|p| p.is_match(relative))
    }
}

/// Returns `path` relative to `root`, or `path` itself if it is outside `root`.
///
/// When `root` is the file itself, the result is its file name.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => path
            .file_name()
            .map_or_else(|| path.to_path_buf(), PathBuf::from),
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

/// Renders a relative path with `/` separators for regex matching.
#[must_use]
pub fn path_key(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Walks `root` and returns the selected files, sorted.
///
/// Hidden files are visited; `.git` directories are not. Entries that cannot
/// be walked are logged and skipped.
#[must_use]
pub fn discover(root: &Path, filter: &PathFilter, respect_gitignore: bool) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(respect_gitignore)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore)
        .git_exclude(respect_gitignore)
        .parents(respect_gitignore)
        .require_git(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let key = path_key(&relative_path(root, entry.path()));
        if filter.selects(&key) {
            files.push(entry.into_path());
        } else {
            debug!("Excluding: {}", key);
        }
    }

    files.sort();
    files.dedup();
    files
}
