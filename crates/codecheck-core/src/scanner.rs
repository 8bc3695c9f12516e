//! Scan driver: runs every rule over every selected file.

use crate::comments::{self, CommentMap};
use crate::config::Config;
use crate::discovery::{self, PathFilter};
use crate::matcher;
use crate::pattern::CompileErrors;
use crate::position;
use crate::rule::RuleSet;
use crate::types::{FileError, Finding, ScanReport};

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that prevent a scan from starting.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("Scan root does not exist: {}", .0.display())]
    #[diagnostic(code(codecheck::scan::root))]
    RootNotFound(PathBuf),

    /// IO error resolving the scan root.
    #[error("IO error: {0}")]
    #[diagnostic(code(codecheck::scan::io))]
    Io(#[from] io::Error),

    /// At least one configured pattern failed to compile.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileErrors),
}

/// Builder for configuring a [`Scanner`].
#[derive(Default)]
pub struct ScannerBuilder {
    root: Option<PathBuf>,
    config: Option<Config>,
    exclude_patterns: Vec<String>,
}

impl ScannerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to scan.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds an exclude regex on top of the configured ones.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude regexes.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Compiles every pattern and builds the scanner.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Compile`] with every failure if any comment, rule,
    /// filter, or exclude pattern is invalid, or an error if the root is
    /// missing.
    pub fn build(self) -> Result<Scanner, ScanError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };
        if !root.exists() {
            return Err(ScanError::RootNotFound(root));
        }

        let config = self.config.unwrap_or_default();
        let mut errors = CompileErrors::default();

        let rules = RuleSet::compile(&config).unwrap_or_else(|e| {
            errors.extend(e);
            RuleSet::default()
        });
        let excludes = config.scan.exclude.iter().chain(&self.exclude_patterns);
        let filter = PathFilter::compile(&config.scan.filter, excludes).unwrap_or_else(|e| {
            errors.extend(e);
            PathFilter::default()
        });

        let scanner = errors.into_result(Scanner {
            root,
            rules,
            filter,
            respect_gitignore: config.scan.respect_gitignore,
        })?;
        Ok(scanner)
    }
}

/// Runs a compiled [`RuleSet`] over the files under a root.
///
/// Use [`Scanner::builder()`] to construct an instance.
pub struct Scanner {
    root: PathBuf,
    rules: RuleSet,
    filter: PathFilter,
    respect_gitignore: bool,
}

impl Scanner {
    /// Creates a new builder for configuring a scanner.
    #[must_use]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// Returns the root directory being scanned.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the compiled rules.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the selected files, sorted.
    #[must_use]
    pub fn discover(&self) -> Vec<PathBuf> {
        discovery::discover(&self.root, &self.filter, self.respect_gitignore)
    }

    /// Discovers, reads and checks every selected file.
    #[must_use]
    pub fn scan(&self) -> ScanReport {
        info!("Starting scan at {:?}", self.root);
        let files = self.discover();
        info!(
            "Found {} files to check against {} rules",
            files.len(),
            self.rules.rules().len()
        );

        let sources = files.into_iter().map(|path| {
            let relative = discovery::relative_path(&self.root, &path);
            (relative, read_source(&path))
        });
        let report = scan_sources(&self.rules, sources);

        info!(
            "Scan complete: {} findings in {} files ({} unreadable)",
            report.findings.len(),
            report.files_checked,
            report.errors.len()
        );
        report
    }

    /// Checks in-memory sources with this scanner's rules.
    #[must_use]
    pub fn scan_sources<I, N>(&self, sources: I) -> ScanReport
    where
        I: IntoIterator<Item = (N, io::Result<String>)>,
        N: Into<PathBuf>,
    {
        scan_sources(&self.rules, sources)
    }
}

/// Reads a file, replacing invalid UTF-8 rather than failing.
fn read_source(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("{} is not valid UTF-8, checking lossily", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

/// Checks a sequence of `(file name, content)` pairs.
///
/// Findings come out in file order, then rule order, then match order. A
/// source that failed to read becomes a [`FileError`] and the remaining
/// sources are still checked.
#[must_use]
pub fn scan_sources<I, N>(rules: &RuleSet, sources: I) -> ScanReport
where
    I: IntoIterator<Item = (N, io::Result<String>)>,
    N: Into<PathBuf>,
{
    let mut report = ScanReport::new();
    for (name, content) in sources {
        let file = name.into();
        match content {
            Ok(content) => {
                debug!("Checking: {}", file.display());
                report.findings.extend(check_content(rules, &file, &content));
                report.files_checked += 1;
            }
            Err(e) => {
                warn!("Failed to read {}: {}", file.display(), e);
                report.errors.push(FileError {
                    file,
                    message: e.to_string(),
                });
            }
        }
    }
    report
}

/// Checks one file's content against every rule.
///
/// Comment regions are located once and shared by all rules.
#[must_use]
pub fn check_content(rules: &RuleSet, file: &Path, content: &str) -> Vec<Finding> {
    if rules.is_empty() {
        return Vec::new();
    }

    let comment_map = rules
        .comment()
        .map_or_else(CommentMap::empty, |p| comments::locate(content, p));

    let mut findings = Vec::new();
    for rule in rules.rules() {
        for occurrence in matcher::evaluate(content, rule, &comment_map) {
            let pos = position::resolve(content, occurrence.start);
            findings.push(Finding {
                file: file.to_path_buf(),
                line: pos.line,
                column: pos.column,
                rule: rule.name().to_string(),
                severity: rule.severity(),
                message: rule.message().to_string(),
                line_text: pos.line_text.to_string(),
                matched: occurrence.text.to_string(),
            });
        }
    }
    findings
}
