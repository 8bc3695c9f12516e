//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "codecheck.toml";

const DEFAULT_CONFIG: &str = r#"# codecheck configuration

# Exit with status 1 when a finding reaches this severity.
# fail_on = "warning"

[scan]
# Regex matching comments in the scanned files. Matches of rules with
# exclude_comments = true are skipped when they fall inside a comment.
comment = '//[^\n]*|/\*(?s:.*?)\*/'

# Regexes on '/'-separated paths relative to the scan root.
# A file is scanned when it matches any filter (or no filters are set)
# and no exclude.
filter = ['\.rs$']
exclude = ['^target/', '(^|/)generated/']

# Respect .gitignore files
respect_gitignore = true

[[rules]]
name = "no-unwrap"
pattern = '\.unwrap\(\)'
message = "propagate the error instead of calling unwrap()"
severity = "error"

[[rules]]
name = "no-todo"
pattern = 'TODO'
message = "unfinished work"
severity = "warning"
# TODO markers live in comments, so report them there too.
exclude_comments = false

# [[rules]]
# name = "no-dbg"
# pattern = 'dbg!\('
# message = "remove debug output"
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = write_config(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules");
    println!("  2. Run: codecheck check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codecheck_core::{Config, RuleSet};
    use tempfile::TempDir;

    #[test]
    fn template_parses_and_compiles() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.rule_names(), vec!["no-unwrap", "no-todo"]);
        assert!(config.fail_on.is_none());

        let rules = RuleSet::compile(&config).unwrap();
        assert!(rules.comment().is_some());
        assert_eq!(rules.rules().len(), 2);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_NAME), "# mine").unwrap();

        let err = write_config(tmp.path(), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(CONFIG_NAME)).unwrap(),
            "# mine"
        );

        write_config(tmp.path(), true).unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(CONFIG_NAME)).unwrap(),
            DEFAULT_CONFIG
        );
    }
}
