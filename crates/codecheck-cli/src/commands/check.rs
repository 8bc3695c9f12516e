//! Check command implementation.

use anyhow::{Context, Result};
use codecheck_core::{ScanError, Scanner, Severity};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::{OutputFormat, EXIT_CONFIG_ERROR, EXIT_FINDINGS, EXIT_SUCCESS};

/// Runs the check command and returns the process exit status.
///
/// Every pattern is compiled before any file is read; a single bad pattern
/// aborts the run with no findings.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    fail_on: Option<Severity>,
    source: &ConfigSource,
) -> Result<u8> {
    let mut config = source.load()?;

    if let Some(filter) = rules_filter {
        let rule_names: Vec<&str> = filter.split(',').map(str::trim).collect();
        for name in config.retain_rules(&rule_names) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    let fail_on = fail_on.or(config.fail_on);

    let scanner = match Scanner::builder()
        .root(path)
        .config(config)
        .excludes(exclude)
        .build()
    {
        Ok(scanner) => scanner,
        Err(e @ ScanError::Compile(_)) => {
            eprintln!("{:?}", miette::Report::new(e));
            return Ok(EXIT_CONFIG_ERROR);
        }
        Err(e) => return Err(e).context("Failed to build scanner"),
    };

    tracing::info!(
        "Scanning {:?} with {} rules",
        scanner.root(),
        scanner.rules().rules().len()
    );

    let report = scanner.scan();
    super::output::print(&report, format)?;

    if fail_on.is_some_and(|threshold| report.has_findings_at(threshold)) {
        return Ok(EXIT_FINDINGS);
    }
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(config: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("codecheck.toml"), config).unwrap();
        fs::write(tmp.path().join("main.rs"), "fn main() { x.unwrap(); }\n").unwrap();
        tmp
    }

    fn run_in(tmp: &TempDir, fail_on: Option<Severity>) -> u8 {
        let source = ConfigSource::Project(tmp.path().join("codecheck.toml"));
        run(
            tmp.path(),
            OutputFormat::Compact,
            None,
            Vec::new(),
            fail_on,
            &source,
        )
        .unwrap()
    }

    const UNWRAP_RULE: &str = r#"
[[rules]]
pattern = '\.unwrap\(\)'
message = "avoid unwrap"
severity = "warning"
"#;

    #[test]
    fn findings_alone_do_not_fail() {
        let tmp = project(UNWRAP_RULE);
        assert_eq!(run_in(&tmp, None), EXIT_SUCCESS);
    }

    #[test]
    fn fail_on_threshold_fails_the_run() {
        let tmp = project(UNWRAP_RULE);
        assert_eq!(run_in(&tmp, Some(Severity::Warning)), EXIT_FINDINGS);
        assert_eq!(run_in(&tmp, Some(Severity::Error)), EXIT_SUCCESS);
    }

    #[test]
    fn invalid_pattern_exits_with_config_error() {
        let tmp = project(
            r#"
[[rules]]
pattern = '(unclosed'
message = "broken"
"#,
        );
        assert_eq!(run_in(&tmp, None), EXIT_CONFIG_ERROR);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = project("[[rules]]\npattern = 1\n");
        let source = ConfigSource::Project(tmp.path().join("codecheck.toml"));
        let result = run(
            tmp.path(),
            OutputFormat::Text,
            None,
            Vec::new(),
            None,
            &source,
        );
        assert!(result.is_err());
    }
}
