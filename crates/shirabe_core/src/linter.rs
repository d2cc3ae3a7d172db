//! The public lint/fix contract.
//!
//! Orchestrates rule execution, finding normalization, and fix
//! application. No state is retained between calls: each lint pass is a
//! pure function of the document plus the registered rule set, and the
//! document is never mutated in place.

use tracing::debug;

use shirabe_diagnostic::{Finding, Position, Severity, Span};

use crate::config::LinterConfig;
use crate::engine::{self, RULE_FAILURE_ID, Rule};
use crate::error::LinterError;
use crate::fixer;
use crate::line_index::LineIndex;
use crate::normalize::normalize;
use crate::result::LintResult;
use crate::rules;

/// The lint engine runner.
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
    parallel: bool,
}

impl Linter {
    /// Creates a linter with the built-in rules selected and configured
    /// by `config`. Fails on unknown rule identifiers or malformed
    /// per-rule options.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let rules = rules::build_rules(&config)?;
        Ok(Self {
            rules,
            parallel: config.parallel,
        })
    }

    /// Creates a linter over an explicit ordered rule set. Registration
    /// order is the order given here.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            rules,
            parallel: false,
        }
    }

    /// Runs rules across the rayon thread pool. Output is identical to
    /// the sequential path.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the registered rules, in registration order.
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Lints a document, producing normalized findings and summary
    /// counts.
    pub fn lint_text(&self, source: &str) -> LintResult {
        let index = LineIndex::new(source);
        let outcomes = if self.parallel {
            engine::run_rules_parallel(&self.rules, source)
        } else {
            engine::run_rules(&self.rules, source)
        };

        let mut findings = Vec::new();
        for outcome in outcomes {
            for violation in outcome.violations {
                findings.push(normalize(violation, outcome.convention, &index));
            }
            if let Some(error) = outcome.error {
                findings.push(Finding::new(
                    RULE_FAILURE_ID,
                    Severity::Error,
                    format!("Rule '{}' failed: {}", outcome.rule_id, error),
                    Span::empty(0),
                    Position::new(0, 0),
                ));
            }
        }

        let fixable = fixer::count_fixable(source, &findings);
        debug!(
            total = findings.len(),
            fixable, "lint pass complete"
        );
        LintResult::new(findings, fixable)
    }

    /// Applies the conflict-free subset of the findings' fixes and
    /// returns the corrected document. Callers may pre-filter the
    /// findings, e.g. to a chosen severity.
    pub fn apply_fixes(&self, source: &str, findings: &[Finding]) -> String {
        fixer::apply_fixes_to_content(source, findings).fixed_content
    }
}
