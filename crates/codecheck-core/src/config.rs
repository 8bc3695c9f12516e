//! Configuration types for codecheck.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Findings at or above this severity make the run fail.
    /// When unset, findings never fail the run.
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// File selection and comment settings.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Forbidden-pattern rules, evaluated in order.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Returns the effective name of every rule, in order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<String> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, r)| r.effective_name(i))
            .collect()
    }

    /// Keeps only the rules whose effective name is in `names`.
    ///
    /// Returns the requested names that matched no rule.
    pub fn retain_rules(&mut self, names: &[&str]) -> Vec<String> {
        let effective = self.rule_names();
        let unknown = names
            .iter()
            .filter(|n| !effective.iter().any(|e| e == *n))
            .map(|n| (*n).to_string())
            .collect();

        // Pin effective names so positional names survive the filtering.
        self.rules = std::mem::take(&mut self.rules)
            .into_iter()
            .zip(effective)
            .filter(|(_, name)| names.contains(&name.as_str()))
            .map(|(mut rule, name)| {
                rule.name = Some(name);
                rule
            })
            .collect();
        unknown
    }
}

/// File selection and comment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Regex matching comment regions. Absent or empty means no comments.
    #[serde(default)]
    pub comment: Option<String>,

    /// Regexes on root-relative paths; a file is selected if any matches.
    /// Empty selects every file.
    #[serde(default)]
    pub filter: Vec<String>,

    /// Regexes on root-relative paths; a file matching any is dropped.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect `.gitignore` files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            comment: None,
            filter: Vec::new(),
            exclude: Vec::new(),
            respect_gitignore: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One forbidden-pattern rule as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Rule name; defaults to `rule-<index>`.
    #[serde(default)]
    pub name: Option<String>,

    /// Regex describing the forbidden text.
    pub pattern: String,

    /// Message printed for each finding.
    pub message: String,

    /// Skip matches that start inside a comment region.
    #[serde(default = "default_true")]
    pub exclude_comments: bool,

    /// Severity of findings from this rule.
    #[serde(default)]
    pub severity: Severity,

    /// Whether this rule is evaluated.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl RuleConfig {
    /// Creates an enabled error-level rule that skips comments.
    #[must_use]
    pub fn new(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: None,
            pattern: pattern.into(),
            message: message.into(),
            exclude_comments: true,
            severity: Severity::Error,
            enabled: true,
        }
    }

    /// Returns the configured name, or `rule-<index>` when unnamed.
    #[must_use]
    pub fn effective_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("rule-{}", index + 1))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading a config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(codecheck::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in a config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(codecheck::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.scan.respect_gitignore);
        assert!(config.scan.comment.is_none());
        assert!(config.rules.is_empty());
        assert!(config.fail_on.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail_on = "warning"

[scan]
comment = '//[^\n]*'
filter = ['\.rs$']
exclude = ['(^|/)target/']

[[rules]]
name = "no-unwrap"
pattern = '\.unwrap\(\)'
message = "avoid unwrap"
severity = "warning"

[[rules]]
pattern = "TODO"
message = "unfinished work"
exclude_comments = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.fail_on, Some(Severity::Warning));
        assert_eq!(config.scan.comment.as_deref(), Some(r"//[^\n]*"));
        assert_eq!(config.scan.filter, vec![r"\.rs$".to_string()]);
        assert_eq!(config.rules.len(), 2);

        let first = &config.rules[0];
        assert!(first.exclude_comments);
        assert!(first.enabled);
        assert_eq!(first.severity, Severity::Warning);

        let second = &config.rules[1];
        assert!(!second.exclude_comments);
        assert_eq!(second.severity, Severity::Error);
        assert_eq!(config.rule_names(), vec!["no-unwrap", "rule-2"]);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Config::parse("[[rules]]\nmessage = 'no pattern'").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_retain_rules_keeps_order_and_names() {
        let mut config = Config::new();
        config.rules.push(RuleConfig::new("a", "A"));
        config.rules.push(RuleConfig::new("b", "B"));
        config.rules.push(RuleConfig {
            name: Some("named".to_string()),
            ..RuleConfig::new("c", "C")
        });

        let unknown = config.retain_rules(&["named", "rule-2", "missing"]);
        assert_eq!(unknown, vec!["missing".to_string()]);
        assert_eq!(config.rule_names(), vec!["rule-2", "named"]);
        assert_eq!(config.rules[0].pattern, "b");
    }
}
