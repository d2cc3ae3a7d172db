//! trailing-whitespace rule: disallow whitespace at line ends.
//!
//! Reports in 0-based coordinates with exclusive fix ends (the canonical
//! convention) and offers a deletion fix.

use shirabe_diagnostic::{RawViolation, Severity, Span};

use crate::engine::{Rule, ViolationSink};
use crate::error::RuleError;

pub const RULE_ID: &str = "trailing-whitespace";

/// Flags spaces or tabs before a line break and offers to delete them.
pub struct TrailingWhitespace {
    severity: Severity,
}

impl TrailingWhitespace {
    /// Creates the rule with an optional severity override.
    pub fn new(severity: Option<Severity>) -> Self {
        Self {
            severity: severity.unwrap_or(Severity::Error),
        }
    }
}

impl Rule for TrailingWhitespace {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn scan(&self, source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
        let mut line_start = 0usize;
        for (line_no, segment) in source.split_inclusive('\n').enumerate() {
            let content = segment
                .strip_suffix('\n')
                .map(|s| s.strip_suffix('\r').unwrap_or(s))
                .unwrap_or(segment);
            let trimmed = content.trim_end_matches([' ', '\t']);

            if trimmed.len() < content.len() {
                let ws_start = line_start + trimmed.len();
                let ws_end = line_start + content.len();
                sink.report(
                    RawViolation::new(
                        RULE_ID,
                        self.severity,
                        "Trailing whitespace",
                        line_no as u32,
                        trimmed.len() as u32,
                    )
                    .with_end(line_no as u32, content.len() as u32)
                    .with_fix(Span::new(ws_start as u32, ws_end as u32), ""),
                );
            }

            line_start += segment.len();
        }
        Ok(())
    }
}
