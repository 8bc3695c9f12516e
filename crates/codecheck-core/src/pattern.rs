//! Pattern compilation.
//!
//! A [`Pattern`] is a regular expression compiled once at configuration load
//! and shared read-only for the whole scan.

use miette::Diagnostic;
use regex::Regex;
use std::fmt;

/// A half-open byte range `[start, end)` of one match in some content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
}

impl Span {
    /// Length of the span in bytes. Zero for empty matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for zero-length matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A pattern string that failed to compile.
#[derive(Debug, Clone, thiserror::Error, Diagnostic)]
#[error("invalid pattern `{pattern}`: {reason}")]
#[diagnostic(code(codecheck::pattern::invalid))]
pub struct PatternError {
    /// The raw pattern source.
    pub pattern: String,
    /// Why the regex engine rejected it.
    pub reason: String,
}

/// A [`PatternError`] tagged with the configuration entry that owns the pattern.
#[derive(Debug, Clone, thiserror::Error, Diagnostic)]
#[error("{owner}: {error}")]
#[diagnostic(code(codecheck::pattern::invalid))]
pub struct CompileError {
    /// Owning entry, e.g. `scan.comment` or `rules[2] (no-unwrap)`.
    pub owner: String,
    /// The compile failure.
    pub error: PatternError,
}

/// Every compile failure of one configuration.
///
/// Patterns are compiled all together so that every bad pattern is reported
/// in one run; scanning only starts when this list is empty.
#[derive(Debug, Clone, Default, thiserror::Error, Diagnostic)]
#[error("{} pattern(s) failed to compile", .errors.len())]
#[diagnostic(
    code(codecheck::config::patterns),
    help("no files are scanned until every configured pattern compiles")
)]
pub struct CompileErrors {
    /// Individual failures, in configuration order.
    #[related]
    pub errors: Vec<CompileError>,
}

impl CompileErrors {
    /// Compiles `source`, recording a failure under `owner`.
    pub fn compile(&mut self, owner: impl Into<String>, source: &str) -> Option<Pattern> {
        match Pattern::compile(source) {
            Ok(pattern) => Some(pattern),
            Err(error) => {
                self.errors.push(CompileError {
                    owner: owner.into(),
                    error,
                });
                None
            }
        }
    }

    /// Returns true if nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Merges failures recorded elsewhere.
    pub fn extend(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    /// `Ok(value)` when nothing failed, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one pattern failed to compile.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A compiled regular expression plus its raw source.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    compiled: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the source is not a valid regular expression.
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let compiled = Regex::new(source).map_err(|e| PatternError {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: source.to_string(),
            compiled,
        })
    }

    /// Returns every match span, left to right, non-overlapping.
    ///
    /// Zero-length matches are included.
    #[must_use]
    pub fn find_all(&self, content: &str) -> Vec<Span> {
        self.compiled
            .find_iter(content)
            .map(|m| Span {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    /// Returns the text of every match, in the same order as [`Self::find_all`].
    #[must_use]
    pub fn find_all_text<'c>(&self, content: &'c str) -> Vec<&'c str> {
        self.compiled
            .find_iter(content)
            .map(|m| m.as_str())
            .collect()
    }

    /// Tests whether the pattern matches anywhere in `haystack`.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.compiled.is_match(haystack)
    }

    /// Returns the raw pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
