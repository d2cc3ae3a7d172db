//! Rule execution engine.
//!
//! Runs every registered rule over the document in registration order and
//! collects raw violations. A failing rule is isolated: whatever it
//! already emitted is kept, the failure is recorded, and the next rule
//! still runs.

use rayon::prelude::*;
use tracing::{debug, warn};

use shirabe_diagnostic::{Convention, RawViolation};

use crate::error::RuleError;

/// Rule identifier used for synthetic findings produced when a rule
/// capability fails mid-scan.
pub const RULE_FAILURE_ID: &str = "engine/rule-failure";

/// A pluggable rule capability.
///
/// Rules are independent pure readers of the document: `scan` must not
/// mutate shared state, which is what allows [`run_rules_parallel`] to
/// execute them across worker threads.
pub trait Rule: Send + Sync {
    /// The rule's identifier, reported on every violation.
    fn id(&self) -> &str;

    /// The coordinate convention this rule reports in.
    fn convention(&self) -> Convention {
        Convention::ZERO_BASED
    }

    /// Scans the document, emitting violations into `sink` as they are
    /// found. Returning an error aborts this rule only; violations
    /// already emitted are kept.
    fn scan(&self, source: &str, sink: &mut ViolationSink) -> Result<(), RuleError>;
}

/// Collector for one rule's emitted violations.
#[derive(Debug, Default)]
pub struct ViolationSink {
    violations: Vec<RawViolation>,
}

impl ViolationSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one violation.
    pub fn report(&mut self, violation: RawViolation) {
        self.violations.push(violation);
    }

    /// Returns the number of violations emitted so far.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if nothing has been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consumes the sink, returning the violations in emission order.
    pub fn into_violations(self) -> Vec<RawViolation> {
        self.violations
    }
}

/// What one rule produced: its emitted violations in emission order, plus
/// the failure that cut the scan short, if any.
#[derive(Debug)]
pub struct RuleOutcome {
    /// The rule's identifier.
    pub rule_id: String,
    /// The rule's declared coordinate convention.
    pub convention: Convention,
    /// Violations emitted before completion or failure.
    pub violations: Vec<RawViolation>,
    /// The failure that aborted this rule, if it did not complete.
    pub error: Option<RuleError>,
}

/// Runs all rules sequentially, in registration order.
pub fn run_rules(rules: &[Box<dyn Rule>], source: &str) -> Vec<RuleOutcome> {
    rules.iter().map(|rule| run_one(rule.as_ref(), source)).collect()
}

/// Runs all rules across the rayon thread pool.
///
/// Per-rule output is buffered and collected back in registration order,
/// so results are byte-identical to the sequential path.
pub fn run_rules_parallel(rules: &[Box<dyn Rule>], source: &str) -> Vec<RuleOutcome> {
    rules
        .par_iter()
        .map(|rule| run_one(rule.as_ref(), source))
        .collect()
}

fn run_one(rule: &dyn Rule, source: &str) -> RuleOutcome {
    let mut sink = ViolationSink::new();
    let error = rule.scan(source, &mut sink).err();

    match &error {
        Some(err) => warn!(
            rule_id = rule.id(),
            kept = sink.len(),
            "rule failed mid-scan: {err}"
        ),
        None => debug!(rule_id = rule.id(), count = sink.len(), "rule completed"),
    }

    RuleOutcome {
        rule_id: rule.id().to_string(),
        convention: rule.convention(),
        violations: sink.into_violations(),
        error,
    }
}
