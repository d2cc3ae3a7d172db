//! Rule-side report types.
//!
//! Rules report violations in whatever coordinate convention they were
//! written against (1-based lines, inclusive fix ends, ...). Each rule
//! declares that convention; the normalizer in `shirabe_core` translates
//! every report into canonical coordinates.

use serde::{Deserialize, Serialize};

use crate::{Severity, Span};

/// The coordinate convention a rule reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convention {
    /// First line number (0 or 1).
    pub line_base: u32,
    /// First column number (0 or 1).
    pub column_base: u32,
    /// Whether fix span ends are inclusive (the end offset names the last
    /// byte of the span rather than one past it).
    pub inclusive_fix_end: bool,
}

impl Convention {
    /// Canonical convention: 0-based lines and columns, exclusive fix ends.
    pub const ZERO_BASED: Convention = Convention {
        line_base: 0,
        column_base: 0,
        inclusive_fix_end: false,
    };

    /// 1-based lines and columns, exclusive fix ends.
    pub const ONE_BASED: Convention = Convention {
        line_base: 1,
        column_base: 1,
        inclusive_fix_end: false,
    };

    /// Marks fix span ends as inclusive.
    pub const fn with_inclusive_fix_end(mut self) -> Self {
        self.inclusive_fix_end = true;
        self
    }
}

impl Default for Convention {
    fn default() -> Self {
        Self::ZERO_BASED
    }
}

/// A raw violation as reported by a rule, before normalization.
///
/// Line/column are in the reporting rule's own [`Convention`]; the
/// optional fix span is in absolute byte offsets (inclusive or exclusive
/// end per the convention).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawViolation {
    /// The rule's self-reported identifier.
    pub rule_id: String,

    /// Severity level, passed through verbatim.
    #[serde(default)]
    pub severity: Severity,

    /// The violation message, passed through verbatim.
    pub message: String,

    /// Start line in the rule's convention.
    pub line: u32,

    /// Start column in the rule's convention.
    pub column: u32,

    /// End line, if the rule reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,

    /// End column, if the rule reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,

    /// Byte span of the proposed fix, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_span: Option<Span>,

    /// Replacement text of the proposed fix. Empty means deletion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_text: Option<String>,
}

impl RawViolation {
    /// Creates a new violation at the given line/column.
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            line,
            column,
            end_line: None,
            end_column: None,
            fix_span: None,
            fix_text: None,
        }
    }

    /// Sets the end line/column.
    pub fn with_end(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    /// Sets a proposed fix.
    pub fn with_fix(mut self, span: Span, text: impl Into<String>) -> Self {
        self.fix_span = Some(span);
        self.fix_text = Some(text.into());
        self
    }
}
