//! Lint pass result.

use serde::{Deserialize, Serialize};

use shirabe_diagnostic::{Finding, Severity};

/// The assembled result of one lint pass over a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintResult {
    /// All findings, in rule registration order and per-rule emission
    /// order.
    pub findings: Vec<Finding>,

    /// Total number of findings.
    pub total_issues: usize,

    /// Number of findings offering a present, span-valid fix. Counted
    /// before overlap rejection: "fix offered", not "fix applied".
    pub fixable_issues: usize,
}

impl LintResult {
    /// Assembles a result from normalized findings.
    pub fn new(findings: Vec<Finding>, fixable_issues: usize) -> Self {
        Self {
            total_issues: findings.len(),
            findings,
            fixable_issues,
        }
    }

    /// Returns true if any finding has error severity.
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|finding| finding.severity == Severity::Error)
    }
}
