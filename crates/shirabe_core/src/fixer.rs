//! Fix application.
//!
//! Selects a maximal conflict-free subset of proposed fixes and splices
//! them into a new document. Fixes are sorted by `(start, end)` with the
//! original order as the stable tie-break, then merged in one forward
//! pass over the document: a fix that starts before the cursor overlaps
//! an already-accepted fix and is rejected. Earliest-start-wins, with no
//! combination search; the result is deterministic for a given input
//! order.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use shirabe_diagnostic::{Finding, Fix, Span};

use crate::error::LinterError;

/// Result of applying fixes to a document.
#[derive(Debug)]
pub struct FixOutcome {
    /// The corrected document.
    pub fixed_content: String,
    /// Number of fixes accepted and applied.
    pub fixes_applied: usize,
    /// Whether any fix was applied.
    pub modified: bool,
}

impl FixOutcome {
    /// A result indicating no changes were made.
    pub fn unchanged(content: String) -> Self {
        Self {
            fixed_content: content,
            fixes_applied: 0,
            modified: false,
        }
    }
}

/// Returns true if the span can be safely spliced out of `source`:
/// ordered bounds, inside the document, and on char boundaries.
pub fn is_valid_fix_span(source: &str, span: Span) -> bool {
    let (start, end) = (span.start as usize, span.end as usize);
    start <= end
        && end <= source.len()
        && source.is_char_boundary(start)
        && source.is_char_boundary(end)
}

/// Counts findings carrying a present, span-valid fix.
///
/// This is the "fix offered" count, taken before overlap rejection; it is
/// independent of how many fixes the applier later accepts.
pub fn count_fixable(source: &str, findings: &[Finding]) -> usize {
    findings
        .iter()
        .filter(|finding| {
            finding
                .fix
                .as_ref()
                .is_some_and(|fix| is_valid_fix_span(source, fix.span))
        })
        .count()
}

/// Applies the conflict-free subset of the findings' fixes to `source`.
///
/// Findings without a fix, or with a span the document cannot honor, are
/// skipped without error. The original document is never mutated.
pub fn apply_fixes_to_content(source: &str, findings: &[Finding]) -> FixOutcome {
    let mut candidates: Vec<&Fix> = findings
        .iter()
        .filter_map(|finding| finding.fix.as_ref())
        .filter(|fix| {
            let valid = is_valid_fix_span(source, fix.span);
            if !valid {
                warn!(
                    start = fix.span.start,
                    end = fix.span.end,
                    len = source.len(),
                    "skipping fix with invalid span"
                );
            }
            valid
        })
        .collect();

    if candidates.is_empty() {
        return FixOutcome::unchanged(source.to_string());
    }

    // Stable sort keeps the original relative order for fixes that share
    // both bounds, so the accepted subset does not depend on rule
    // registration order beyond the findings' own order.
    candidates.sort_by_key(|fix| (fix.span.start, fix.span.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0usize;
    let mut applied = 0usize;

    for fix in candidates {
        let start = fix.span.start as usize;
        let end = fix.span.end as usize;

        if start < cursor {
            debug!(
                start = fix.span.start,
                end = fix.span.end,
                cursor,
                "rejecting overlapping fix"
            );
            continue;
        }

        output.push_str(&source[cursor..start]);
        output.push_str(&fix.text);
        cursor = end;
        applied += 1;
    }

    output.push_str(&source[cursor..]);

    FixOutcome {
        fixed_content: output,
        fixes_applied: applied,
        modified: applied > 0,
    }
}

/// Applies fixes to a file and writes the result back if it changed.
pub fn apply_fixes_to_file(path: &Path, findings: &[Finding]) -> Result<FixOutcome, LinterError> {
    let content = fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    let outcome = apply_fixes_to_content(&content, findings);

    if outcome.modified {
        fs::write(path, &outcome.fixed_content)
            .map_err(|e| LinterError::file(format!("Failed to write {}: {}", path.display(), e)))?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shirabe_diagnostic::{Position, Severity};

    fn finding_with_fix(start: u32, end: u32, replacement: &str) -> Finding {
        Finding::new(
            "test-rule",
            Severity::Error,
            "test message",
            Span::new(start, end),
            Position::new(0, start),
        )
        .with_fix(Fix::new(Span::new(start, end), replacement))
    }

    fn finding_without_fix(start: u32, end: u32) -> Finding {
        Finding::new(
            "test-rule",
            Severity::Error,
            "test message",
            Span::new(start, end),
            Position::new(0, start),
        )
    }

    #[test]
    fn no_findings_returns_source_unchanged() {
        let outcome = apply_fixes_to_content("Hello World", &[]);
        assert_eq!(outcome.fixed_content, "Hello World");
        assert_eq!(outcome.fixes_applied, 0);
        assert!(!outcome.modified);
    }

    #[test]
    fn apply_single_fix() {
        let outcome = apply_fixes_to_content("Hello World", &[finding_with_fix(0, 5, "Hi")]);
        assert_eq!(outcome.fixed_content, "Hi World");
        assert_eq!(outcome.fixes_applied, 1);
        assert!(outcome.modified);
    }

    #[test]
    fn apply_multiple_disjoint_fixes() {
        let findings = vec![
            finding_with_fix(6, 11, "Earth"),
            finding_with_fix(0, 5, "Hi"),
        ];
        let outcome = apply_fixes_to_content("Hello World", &findings);
        assert_eq!(outcome.fixed_content, "Hi Earth");
        assert_eq!(outcome.fixes_applied, 2);
    }

    #[test]
    fn apply_delete_fix() {
        let outcome = apply_fixes_to_content("Hello World", &[finding_with_fix(5, 11, "")]);
        assert_eq!(outcome.fixed_content, "Hello");
    }

    #[test]
    fn apply_insert_fix() {
        let outcome = apply_fixes_to_content("HelloWorld", &[finding_with_fix(5, 5, " ")]);
        assert_eq!(outcome.fixed_content, "Hello World");
    }

    #[test]
    fn findings_without_fix_are_skipped() {
        let findings = vec![finding_without_fix(0, 5), finding_with_fix(6, 11, "Earth")];
        let outcome = apply_fixes_to_content("Hello World", &findings);
        assert_eq!(outcome.fixed_content, "Hello Earth");
        assert_eq!(outcome.fixes_applied, 1);
    }

    #[test]
    fn overlapping_fixes_keep_earliest_start() {
        // [5,10) and [7,12) overlap: only the one starting at 5 applies.
        let findings = vec![finding_with_fix(7, 12, "B"), finding_with_fix(5, 10, "A")];
        let outcome = apply_fixes_to_content("0123456789abcdef", &findings);
        assert_eq!(outcome.fixed_content, "01234Aabcdef");
        assert_eq!(outcome.fixes_applied, 1);
    }

    #[test]
    fn nested_fix_is_rejected() {
        let findings = vec![finding_with_fix(0, 10, "outer"), finding_with_fix(2, 5, "inner")];
        let outcome = apply_fixes_to_content("0123456789rest", &findings);
        assert_eq!(outcome.fixed_content, "outerrest");
        assert_eq!(outcome.fixes_applied, 1);
    }

    #[test]
    fn same_start_prefers_shorter_span() {
        let findings = vec![finding_with_fix(0, 8, "LONG"), finding_with_fix(0, 3, "S")];
        let outcome = apply_fixes_to_content("0123456789", &findings);
        // Sorted by (start, end): [0,3) comes first and wins.
        assert_eq!(outcome.fixed_content, "S3456789");
        assert_eq!(outcome.fixes_applied, 1);
    }

    #[test]
    fn identical_spans_keep_first_in_input_order() {
        let findings = vec![finding_with_fix(0, 3, "first"), finding_with_fix(0, 3, "second")];
        let outcome = apply_fixes_to_content("abcdef", &findings);
        assert_eq!(outcome.fixed_content, "firstdef");
        assert_eq!(outcome.fixes_applied, 1);
    }

    #[test]
    fn touching_fixes_both_apply() {
        let findings = vec![finding_with_fix(0, 5, "a"), finding_with_fix(5, 10, "b")];
        let outcome = apply_fixes_to_content("0123456789", &findings);
        assert_eq!(outcome.fixed_content, "ab");
        assert_eq!(outcome.fixes_applied, 2);
    }

    #[test]
    fn zero_width_fixes_at_same_offset_both_apply() {
        let findings = vec![finding_with_fix(5, 5, "A"), finding_with_fix(5, 5, "B")];
        let outcome = apply_fixes_to_content("HelloWorld", &findings);
        assert_eq!(outcome.fixed_content, "HelloABWorld");
        assert_eq!(outcome.fixes_applied, 2);
    }

    #[test]
    fn invalid_span_is_skipped_without_panic() {
        let outcome = apply_fixes_to_content("Hello", &[finding_with_fix(0, 100, "Hi")]);
        assert_eq!(outcome.fixed_content, "Hello");
        assert_eq!(outcome.fixes_applied, 0);
    }

    #[test]
    fn reversed_span_is_skipped_without_panic() {
        let finding = finding_without_fix(0, 0).with_fix(Fix::new(Span::new(7, 3), "x"));
        let outcome = apply_fixes_to_content("Hello World", &[finding]);
        assert_eq!(outcome.fixed_content, "Hello World");
        assert_eq!(outcome.fixes_applied, 0);
    }

    #[test]
    fn non_char_boundary_span_is_skipped() {
        // "東" is 3 bytes; offset 1 is inside it.
        let finding = finding_without_fix(0, 0).with_fix(Fix::new(Span::new(1, 3), ""));
        let outcome = apply_fixes_to_content("東京", &[finding]);
        assert_eq!(outcome.fixed_content, "東京");
        assert_eq!(outcome.fixes_applied, 0);
    }

    #[test]
    fn multibyte_delete() {
        // Delete the doubled "に" at bytes [9, 12).
        let outcome = apply_fixes_to_content("東京にに行く", &[finding_with_fix(9, 12, "")]);
        assert_eq!(outcome.fixed_content, "東京に行く");
    }

    #[test]
    fn content_outside_fixes_is_conserved() {
        let source = "aaa bbb ccc ddd";
        let findings = vec![finding_with_fix(4, 7, "XY"), finding_with_fix(12, 15, "Z")];
        let outcome = apply_fixes_to_content(source, &findings);
        assert_eq!(outcome.fixed_content, "aaa XY ccc Z");
    }

    #[test]
    fn count_fixable_ignores_overlap() {
        let source = "0123456789abcdef";
        let findings = vec![finding_with_fix(5, 10, "A"), finding_with_fix(7, 12, "B")];
        // Both fixes are offered even though only one can be applied.
        assert_eq!(count_fixable(source, &findings), 2);
        assert_eq!(apply_fixes_to_content(source, &findings).fixes_applied, 1);
    }

    #[test]
    fn count_fixable_excludes_invalid_spans() {
        let source = "Hello";
        let findings = vec![finding_with_fix(0, 100, "x"), finding_with_fix(0, 2, "y")];
        assert_eq!(count_fixable(source, &findings), 1);
    }

    #[test]
    fn apply_fixes_to_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "Hello World").unwrap();

        let outcome = apply_fixes_to_file(&path, &[finding_with_fix(0, 5, "Hi")]).unwrap();
        assert!(outcome.modified);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Hi World");
    }

    #[test]
    fn apply_fixes_to_file_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = apply_fixes_to_file(&path, &[]).unwrap_err();
        assert!(matches!(err, LinterError::File(_)));
    }
}
