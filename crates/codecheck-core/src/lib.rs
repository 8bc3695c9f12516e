//! # codecheck-core
//!
//! Core engine for the codecheck pattern linter.
//!
//! Given a directory tree, file selection regexes and a list of forbidden
//! pattern rules, the engine reports every place a forbidden pattern occurs,
//! optionally skipping occurrences inside comment regions.
//!
//! - [`Pattern`] compiles and runs a single regex
//! - [`comments::locate`] finds comment regions once per file
//! - [`matcher::evaluate`] applies one rule and drops commented matches
//! - [`position::resolve`] turns a byte offset into line, line text and column
//! - [`Scanner`] orchestrates discovery, reading and checking
//!
//! ## Example
//!
//! ```ignore
//! use codecheck_core::{Config, Scanner};
//!
//! let config = Config::from_file("codecheck.toml".as_ref())?;
//! let scanner = Scanner::builder().root(".").config(config).build()?;
//!
//! for finding in scanner.scan().findings {
//!     print!("{}", finding.format());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod comments;
mod config;
pub mod discovery;
pub mod legacy;
pub mod matcher;
mod pattern;
pub mod position;
mod rule;
mod scanner;
mod types;

pub use comments::{CommentMap, Interval};
pub use config::{Config, ConfigError, RuleConfig, ScanConfig};
pub use matcher::MatchOccurrence;
pub use pattern::{CompileError, CompileErrors, Pattern, PatternError, Span};
pub use position::Position;
pub use rule::{CompiledRule, RuleSet};
pub use scanner::{check_content, scan_sources, ScanError, Scanner, ScannerBuilder};
pub use types::{FileError, Finding, ScanReport, Severity};
