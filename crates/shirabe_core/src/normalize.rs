//! Finding normalization.
//!
//! Converts a rule's raw violation, reported in whatever coordinate
//! convention the rule declares, into a canonical [`Finding`] with an
//! absolute-offset span and a 0-based position. Malformed coordinates
//! never escape: the finding's own span is clamped into the document, and
//! an invalid fix is discarded while the finding itself is kept.

use tracing::warn;

use shirabe_diagnostic::{Convention, Finding, Fix, RawViolation, Span};

use crate::line_index::LineIndex;

/// Note appended to a finding's message when its proposed fix had to be
/// discarded.
pub const INVALID_FIX_NOTE: &str = " (invalid fix discarded)";

/// Normalizes one raw violation into a canonical finding.
///
/// The rule's identifier, message, and severity pass through verbatim,
/// except that a discarded fix appends [`INVALID_FIX_NOTE`] to the
/// message.
pub fn normalize(violation: RawViolation, convention: Convention, index: &LineIndex) -> Finding {
    let RawViolation {
        rule_id,
        severity,
        mut message,
        line,
        column,
        end_line,
        end_column,
        fix_span,
        fix_text,
    } = violation;

    let start = resolve_offset(index, convention, line, column);
    let end = match (end_line, end_column) {
        (Some(end_line), Some(end_column)) => {
            Some(resolve_offset(index, convention, end_line, end_column))
        }
        _ => None,
    };
    // A coordinate the index rejected taints the whole report: the
    // finding survives at the clamped location, but its fix does not.
    let coordinates_resolved = start.is_ok() && end.is_none_or(|end| end.is_ok());
    let start = start.unwrap_or_else(|clamped| clamped);
    let end = end.map_or(start, |end| end.unwrap_or_else(|clamped| clamped).max(start));
    let position = index.position_at(start);

    let fix = match fix_span {
        Some(span) => {
            let canonical = if coordinates_resolved {
                canonical_fix_span(index, convention, span)
            } else {
                None
            };
            match canonical {
                Some(span) => Some(Fix::new(span, fix_text.unwrap_or_default())),
                None => {
                    warn!(
                        rule_id,
                        start = span.start,
                        end = span.end,
                        "discarding fix with unresolvable coordinates or invalid span"
                    );
                    message.push_str(INVALID_FIX_NOTE);
                    None
                }
            }
        }
        None => None,
    };

    let mut finding = Finding::new(rule_id, severity, message, Span::new(start, end), position);
    if let Some(fix) = fix {
        finding = finding.with_fix(fix);
    }
    finding
}

/// Maps a rule-native line/column to an absolute offset. `Ok` is a
/// resolved offset; `Err` carries the clamped fallback for coordinates
/// the index rejected, so the caller can keep the finding while treating
/// the report as tainted.
fn resolve_offset(
    index: &LineIndex,
    convention: Convention,
    line: u32,
    column: u32,
) -> Result<u32, u32> {
    // Underflow means the rule reported below its own base (e.g. line 0
    // under a 1-based convention); clamp to the document start.
    let line = line.saturating_sub(convention.line_base);
    let column = column.saturating_sub(convention.column_base);

    match index.position_to_offset(shirabe_diagnostic::Position::new(line, column)) {
        Ok(offset) => Ok(offset),
        Err(_) => match index.line_end(line) {
            // Column ran past the line: clamp to the line end.
            Some(end) => Err(end),
            // Line ran past the document: clamp to the document end.
            None => Err(index.len()),
        },
    }
}

/// Translates a fix span to the canonical exclusive-end form and
/// validates it. Returns `None` for any span the fix applier could not
/// apply safely.
fn canonical_fix_span(index: &LineIndex, convention: Convention, span: Span) -> Option<Span> {
    let end = if convention.inclusive_fix_end {
        span.end.checked_add(1)?
    } else {
        span.end
    };
    let span = Span::new(span.start, end);

    let source = index.source();
    let valid = span.start <= span.end
        && span.end <= index.len()
        && source.is_char_boundary(span.start as usize)
        && source.is_char_boundary(span.end as usize);
    valid.then_some(span)
}
