//! Loader for the two-file JSON configuration format.
//!
//! ```text
//! .synconfig.json   {"comment": "...", "filter": [...], "exclude": [...]}
//! .rules.json       [{"rule": "...", "message": "...", "comment": false}, ...]
//! ```
//!
//! The per-rule `comment` flag means "also report matches inside comments"
//! and defaults to `true`. It is inverted into [`RuleConfig::exclude_comments`]
//! on load.

use crate::config::{Config, ConfigError, RuleConfig, ScanConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the scan settings, relative to the scan root.
pub const SYNCONFIG_FILE: &str = ".synconfig.json";

/// File name of the rule list, relative to the scan root.
pub const RULES_FILE: &str = ".rules.json";

#[derive(Debug, Deserialize)]
struct SynConfigDto {
    #[serde(default, alias = "Comment")]
    comment: String,
    #[serde(default, alias = "Filter")]
    filter: Vec<String>,
    #[serde(default, alias = "Exclude")]
    exclude: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LegacyRuleDto {
    #[serde(alias = "Rule")]
    rule: String,
    #[serde(alias = "Message")]
    message: String,
    #[serde(default, alias = "Comment")]
    comment: Option<bool>,
}

/// Returns the rules file that sits next to a synconfig file.
#[must_use]
pub fn rules_path_for(synconfig: &Path) -> PathBuf {
    synconfig
        .parent()
        .map_or_else(|| PathBuf::from(RULES_FILE), |dir| dir.join(RULES_FILE))
}

/// Loads a synconfig file and the rules file next to it.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed.
pub fn from_files(synconfig: &Path, rules: &Path) -> Result<Config, ConfigError> {
    let read = |path: &Path| {
        std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    };
    parse(&read(synconfig)?, &read(rules)?)
}

/// Parses the contents of a synconfig file and a rules file.
///
/// # Errors
///
/// Returns an error if either document is not valid for its format.
pub fn parse(synconfig: &str, rules: &str) -> Result<Config, ConfigError> {
    let scan: SynConfigDto = serde_json::from_str(synconfig).map_err(|e| ConfigError::Parse {
        message: format!("{SYNCONFIG_FILE}: {e}"),
    })?;
    let rules: Vec<LegacyRuleDto> =
        serde_json::from_str(rules).map_err(|e| ConfigError::Parse {
            message: format!("{RULES_FILE}: {e}"),
        })?;

    let rules = rules
        .into_iter()
        .enumerate()
        .map(|(i, dto)| {
            let include_comments = dto.comment.unwrap_or_else(|| {
                warn!(
                    "rule {} in {} has no `comment` flag; matches inside comments will be reported",
                    i + 1,
                    RULES_FILE
                );
                true
            });
            RuleConfig {
                exclude_comments: !include_comments,
                ..RuleConfig::new(dto.rule, dto.message)
            }
        })
        .collect();

    Ok(Config {
        fail_on: None,
        scan: ScanConfig {
            comment: Some(scan.comment).filter(|c| !c.is_empty()),
            filter: scan.filter,
            exclude: scan.exclude,
            respect_gitignore: false,
        },
        rules,
    })
}
