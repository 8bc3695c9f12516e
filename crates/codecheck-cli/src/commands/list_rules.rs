//! List rules command implementation.

use anyhow::Result;
use codecheck_core::Config;

use crate::config_resolver::ConfigSource;

/// Runs the list-rules command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = source.load()?;

    match source.path() {
        Some(path) => println!("Rules from {}:\n", path.display()),
        None => println!("No configuration found.\n"),
    }
    print!("{}", render(&config));

    println!("\nUse --rules to run a subset, e.g.:");
    println!("  codecheck check --rules no-unwrap,no-todo");
    Ok(())
}

fn render(config: &Config) -> String {
    let mut out = format!(
        "{:<20} {:<9} {:<9} Pattern\n",
        "Name", "Severity", "Comments"
    );
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for (index, rule) in config.rules.iter().enumerate() {
        let comments = if rule.exclude_comments { "skip" } else { "report" };
        let mut name = rule.effective_name(index);
        if !rule.enabled {
            name.push_str(" (off)");
        }
        out.push_str(&format!(
            "{:<20} {:<9} {:<9} {}\n",
            name, rule.severity, comments, rule.pattern
        ));
    }

    if let Some(comment) = &config.scan.comment {
        out.push_str(&format!("\nComment pattern: {comment}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use codecheck_core::{RuleConfig, Severity};

    #[test]
    fn renders_one_row_per_rule() {
        let mut config = Config::new();
        config.scan.comment = Some("//.*".to_string());
        config.rules.push(RuleConfig {
            name: Some("no-todo".to_string()),
            exclude_comments: false,
            severity: Severity::Warning,
            ..RuleConfig::new("TODO", "unfinished work")
        });
        config.rules.push(RuleConfig {
            enabled: false,
            ..RuleConfig::new("dbg!", "leftover debug")
        });

        let table = render(&config);
        let rows: Vec<&str> = table.lines().collect();

        assert!(rows[0].starts_with("Name"));
        assert!(rows[2].starts_with("no-todo"));
        assert!(rows[2].contains("warning"));
        assert!(rows[2].contains("report"));
        assert!(rows[2].ends_with("TODO"));
        assert!(rows[3].starts_with("rule-2 (off)"));
        assert!(rows[3].contains("skip"));
        assert!(table.ends_with("Comment pattern: //.*\n"));
    }

    #[test]
    fn empty_config_renders_header_only() {
        let table = render(&Config::new());
        assert_eq!(table.lines().count(), 2);
    }
}
