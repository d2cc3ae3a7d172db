//! no-todo rule: disallow TODO/FIXME comments in text.
//!
//! Detects common task markers like TODO, FIXME, and XXX that should be
//! resolved before committing. Reports in 0-based coordinates. No fix:
//! resolving a task marker is not something a rewrite can do.

use serde::Deserialize;

use shirabe_diagnostic::{RawViolation, Severity};

use crate::engine::{Rule, ViolationSink};
use crate::error::RuleError;

pub const RULE_ID: &str = "no-todo";

/// Default patterns to detect.
const DEFAULT_PATTERNS: &[&str] = &["TODO:", "TODO ", "FIXME:", "FIXME ", "XXX:", "XXX "];

/// Configuration for the no-todo rule.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NoTodoConfig {
    /// Patterns to detect (default: TODO:, FIXME:, XXX:).
    pub patterns: Vec<String>,
    /// Lines containing any of these substrings are skipped.
    pub ignore_patterns: Vec<String>,
    /// Case-sensitive matching (default: false).
    pub case_sensitive: bool,
}

impl NoTodoConfig {
    fn effective_patterns(&self) -> Vec<String> {
        if self.patterns.is_empty() {
            DEFAULT_PATTERNS.iter().map(|s| (*s).to_string()).collect()
        } else {
            self.patterns.clone()
        }
    }

    fn should_ignore(&self, line: &str) -> bool {
        self.ignore_patterns.iter().any(|p| line.contains(p))
    }
}

/// Flags task markers left in the text.
pub struct NoTodo {
    patterns: Vec<String>,
    config: NoTodoConfig,
    severity: Severity,
}

impl NoTodo {
    /// Creates the rule with the given options and optional severity
    /// override.
    pub fn new(config: NoTodoConfig, severity: Option<Severity>) -> Self {
        Self {
            patterns: config.effective_patterns(),
            config,
            severity: severity.unwrap_or(Severity::Error),
        }
    }
}

impl Rule for NoTodo {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn scan(&self, source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
        for (line_no, line) in source.lines().enumerate() {
            if self.config.should_ignore(line) {
                continue;
            }

            let mut matches: Vec<(usize, &str)> = Vec::new();
            for pattern in &self.patterns {
                for column in find_matches(line, pattern, self.config.case_sensitive) {
                    matches.push((column, pattern));
                }
            }
            matches.sort_by_key(|(column, _)| *column);

            for (column, pattern) in matches {
                let marker = pattern.trim_end_matches([':', ' ']);
                sink.report(
                    RawViolation::new(
                        RULE_ID,
                        self.severity,
                        format!("Found {marker}"),
                        line_no as u32,
                        column as u32,
                    )
                    .with_end(line_no as u32, (column + pattern.len()) as u32),
                );
            }
        }
        Ok(())
    }
}

/// Returns the byte columns where `needle` occurs in `haystack`.
fn find_matches(haystack: &str, needle: &str, case_sensitive: bool) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    (0..=haystack.len() - needle.len())
        .filter(|&i| {
            let window = &haystack[i..i + needle.len()];
            if case_sensitive {
                window == needle
            } else {
                window.eq_ignore_ascii_case(needle)
            }
        })
        .collect()
}
