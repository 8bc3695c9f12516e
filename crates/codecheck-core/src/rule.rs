//! Compiled rules.
//!
//! ```text
//! Config (TOML / legacy JSON)
//!   ↓ RuleSet::compile()   every pattern compiled once, errors accumulated
//! RuleSet { comment, rules }
//!   ↓ shared by reference
//! Scanner
//! ```

use crate::config::Config;
use crate::pattern::{CompileErrors, Pattern};
use crate::types::Severity;
use tracing::debug;

/// One forbidden-pattern check whose pattern compiled successfully.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    name: String,
    pattern: Pattern,
    message: String,
    exclude_comments: bool,
    severity: Severity,
}

impl CompiledRule {
    /// Creates a rule from an already compiled pattern.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: Pattern, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern,
            message: message.into(),
            exclude_comments: true,
            severity: Severity::Error,
        }
    }

    /// Sets whether matches inside comments are skipped.
    #[must_use]
    pub fn with_exclude_comments(mut self, exclude: bool) -> Self {
        self.exclude_comments = exclude;
        self
    }

    /// Sets the severity of findings from this rule.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the finding message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if matches inside comments are skipped.
    #[must_use]
    pub fn exclude_comments(&self) -> bool {
        self.exclude_comments
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// The comment pattern and every enabled rule of one configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    comment: Option<Pattern>,
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Builds a rule set from already compiled parts.
    #[must_use]
    pub fn new(comment: Option<Pattern>, rules: Vec<CompiledRule>) -> Self {
        Self { comment, rules }
    }

    /// Compiles the comment pattern and every enabled rule.
    ///
    /// Disabled rules are skipped and never compiled.
    ///
    /// # Errors
    ///
    /// Returns every compile failure if at least one pattern is invalid.
    /// A partial rule set is never returned.
    pub fn compile(config: &Config) -> Result<Self, CompileErrors> {
        let mut errors = CompileErrors::default();

        let comment = config
            .scan
            .comment
            .as_deref()
            .filter(|c| !c.is_empty())
            .and_then(|c| errors.compile("scan.comment", c));

        let mut rules = Vec::with_capacity(config.rules.len());
        for (index, rule) in config.rules.iter().enumerate() {
            let name = rule.effective_name(index);
            if !rule.enabled {
                debug!("Skipping disabled rule: {}", name);
                continue;
            }
            let owner = format!("rules[{index}] ({name})");
            if let Some(pattern) = errors.compile(owner, &rule.pattern) {
                rules.push(
                    CompiledRule::new(name, pattern, rule.message.clone())
                        .with_exclude_comments(rule.exclude_comments)
                        .with_severity(rule.severity),
                );
            }
        }

        errors.into_result(Self { comment, rules })
    }

    /// Returns the comment pattern, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&Pattern> {
        self.comment.as_ref()
    }

    /// Returns the rules in configuration order.
    #[must_use]
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Returns true if there are no rules to evaluate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
