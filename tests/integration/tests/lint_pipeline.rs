//! End-to-end tests for the lint/fix pipeline.
//!
//! Exercises the full path through rule execution, normalization, and
//! fix application, without going through the CLI.

use pretty_assertions::assert_eq;

use shirabe_core::{
    Convention, Finding, Fix, Linter, LinterConfig, Position, RULE_FAILURE_ID, RawViolation, Rule,
    RuleError, RuleOption, Severity, Span, ViolationSink,
};

fn default_linter() -> Linter {
    Linter::new(LinterConfig::new()).unwrap()
}

#[test]
fn doubled_word_is_found_and_fixed() {
    let source = "The the quick fox.";
    let linter = default_linter();

    let result = linter.lint_text(source);
    let doubled: Vec<&Finding> = result
        .findings
        .iter()
        .filter(|f| f.rule_id == "no-doubled-word")
        .collect();
    assert_eq!(doubled.len(), 1);
    assert_eq!(doubled[0].position, Position::new(0, 4));
    assert!(doubled[0].fix.is_some());

    let fixed = linter.apply_fixes(source, &result.findings);
    assert_eq!(fixed, "The quick fox.");
}

#[test]
fn overlapping_fixes_offer_two_apply_one() {
    struct OverlapRule;

    impl Rule for OverlapRule {
        fn id(&self) -> &str {
            "overlap"
        }

        fn scan(&self, _source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
            sink.report(
                RawViolation::new("overlap", Severity::Error, "first", 0, 5)
                    .with_fix(Span::new(5, 10), "A"),
            );
            sink.report(
                RawViolation::new("overlap", Severity::Error, "second", 0, 7)
                    .with_fix(Span::new(7, 12), "B"),
            );
            Ok(())
        }
    }

    let source = "0123456789abcdef";
    let linter = Linter::with_rules(vec![Box::new(OverlapRule)]);
    let result = linter.lint_text(source);

    // Both findings carry a fix offer, but only the earlier span wins.
    assert_eq!(result.total_issues, 2);
    assert_eq!(result.fixable_issues, 2);
    assert_eq!(linter.apply_fixes(source, &result.findings), "01234Aabcdef");
}

#[test]
fn failing_rule_keeps_emitted_output_and_isolates_the_failure() {
    struct FlakyRule;

    impl Rule for FlakyRule {
        fn id(&self) -> &str {
            "flaky"
        }

        fn scan(&self, _source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
            sink.report(RawViolation::new("flaky", Severity::Warning, "emitted", 0, 0));
            Err(RuleError::new("scanner blew up"))
        }
    }

    struct SteadyRule;

    impl Rule for SteadyRule {
        fn id(&self) -> &str {
            "steady"
        }

        fn scan(&self, _source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
            sink.report(RawViolation::new("steady", Severity::Info, "fine", 0, 1));
            Ok(())
        }
    }

    let linter = Linter::with_rules(vec![Box::new(FlakyRule), Box::new(SteadyRule)]);
    let result = linter.lint_text("some document\n");

    let ids: Vec<&str> = result.findings.iter().map(|f| f.rule_id.as_str()).collect();
    assert_eq!(ids, ["flaky", RULE_FAILURE_ID, "steady"]);

    let synthetic = &result.findings[1];
    assert_eq!(synthetic.severity, Severity::Error);
    assert!(synthetic.message.contains("flaky"));
    assert!(synthetic.message.contains("scanner blew up"));
}

#[test]
fn one_based_conventions_normalize_to_canonical_coordinates() {
    struct OneBasedRule;

    impl Rule for OneBasedRule {
        fn id(&self) -> &str {
            "one-based"
        }

        fn convention(&self) -> Convention {
            Convention::ONE_BASED
        }

        fn scan(&self, _source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
            // Line 2, column 3 in this rule's own coordinates.
            sink.report(RawViolation::new("one-based", Severity::Warning, "here", 2, 3));
            Ok(())
        }
    }

    let linter = Linter::with_rules(vec![Box::new(OneBasedRule)]);
    let result = linter.lint_text("first\nsecond\n");

    assert_eq!(result.findings[0].position, Position::new(1, 2));
    // Byte offset of 'c' in "second".
    assert_eq!(result.findings[0].span, Span::new(8, 8));
}

#[test]
fn clean_document_round_trips_unchanged() {
    let source = "A quick brown fox jumps over a lazy dog.\n";
    let linter = default_linter();

    let result = linter.lint_text(source);
    assert_eq!(result.total_issues, 0);
    assert_eq!(linter.apply_fixes(source, &result.findings), source);
}

#[test]
fn fix_pass_converges_on_clean_document() {
    let source = "The the quick fox.   \nTODO: trailing line  \n";
    let linter = default_linter();

    let first = linter.lint_text(source);
    let once = linter.apply_fixes(source, &first.findings);

    let second = linter.lint_text(&once);
    let twice = linter.apply_fixes(&once, &second.findings);

    // A second pass over already-fixed text changes nothing.
    let third = linter.lint_text(&twice);
    assert_eq!(linter.apply_fixes(&twice, &third.findings), twice);
    assert_eq!(third.fixable_issues, 0);
}

#[test]
fn disabled_rule_reports_nothing() {
    let config = LinterConfig::new().with_rule("no-todo", RuleOption::Enabled(false));
    let linter = Linter::new(config).unwrap();

    let result = linter.lint_text("TODO: left in on purpose\n");
    assert!(result.findings.iter().all(|f| f.rule_id != "no-todo"));
}

#[test]
fn severity_override_downgrades_errors() {
    let config = LinterConfig::new().with_rule("no-todo", RuleOption::Severity("warning".into()));
    let linter = Linter::new(config).unwrap();

    let result = linter.lint_text("TODO: later\n");
    let todo = result
        .findings
        .iter()
        .find(|f| f.rule_id == "no-todo")
        .unwrap();
    assert_eq!(todo.severity, Severity::Warning);
    assert!(!result.has_errors());
}

#[test]
fn findings_serialize_with_lowercase_severity() {
    let linter = default_linter();
    let result = linter.lint_text("TODO: check serialization\n");

    let json = serde_json::to_value(&result.findings).unwrap();
    let first = &json[0];
    assert_eq!(first["severity"], "error");
    assert_eq!(first["rule_id"], "no-todo");
    assert!(first.get("fix").is_none());
}

#[test]
fn invalid_fix_is_discarded_but_the_finding_survives() {
    struct BadFixRule;

    impl Rule for BadFixRule {
        fn id(&self) -> &str {
            "bad-fix"
        }

        fn scan(&self, source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
            let len = source.len() as u32;
            sink.report(
                RawViolation::new("bad-fix", Severity::Error, "broken", 0, 0)
                    .with_fix(Span::new(0, len + 10), ""),
            );
            Ok(())
        }
    }

    let source = "short";
    let linter = Linter::with_rules(vec![Box::new(BadFixRule)]);
    let result = linter.lint_text(source);

    assert_eq!(result.total_issues, 1);
    assert_eq!(result.fixable_issues, 0);
    assert!(result.findings[0].fix.is_none());
    assert!(result.findings[0].message.contains("invalid fix discarded"));
    assert_eq!(linter.apply_fixes(source, &result.findings), source);
}

#[test]
fn manual_fix_filtering_respects_caller_selection() {
    let source = "The the quick fox. TODO: later\n";
    let linter = default_linter();
    let result = linter.lint_text(source);

    // Apply only warnings and below; the doubled-word error stays put.
    let config = LinterConfig::new().with_rule(
        "no-doubled-word",
        RuleOption::Severity("warning".into()),
    );
    let downgraded = Linter::new(config).unwrap();
    let result2 = downgraded.lint_text(source);
    let warnings: Vec<Finding> = result2
        .findings
        .iter()
        .filter(|f| f.severity <= Severity::Warning)
        .cloned()
        .collect();

    let fixed = downgraded.apply_fixes(source, &warnings);
    assert_eq!(fixed, "The quick fox. TODO: later\n");

    // Full set behaves the same as when nothing was filtered.
    let all = linter.apply_fixes(source, &result.findings);
    assert_eq!(all, "The quick fox. TODO: later\n");
}

#[test]
fn fixes_never_split_multibyte_characters() {
    struct EmojiRule;

    impl Rule for EmojiRule {
        fn id(&self) -> &str {
            "emoji"
        }

        fn scan(&self, _source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
            // Offset 1 lands inside the 4-byte emoji.
            sink.report(
                RawViolation::new("emoji", Severity::Error, "inside", 0, 0)
                    .with_fix(Span::new(1, 3), "x"),
            );
            // A whole-character replacement is fine.
            sink.report(
                RawViolation::new("emoji", Severity::Error, "whole", 0, 0)
                    .with_fix(Span::new(0, 4), "ok"),
            );
            Ok(())
        }
    }

    let source = "\u{1F980} rust";
    let linter = Linter::with_rules(vec![Box::new(EmojiRule)]);
    let result = linter.lint_text(source);

    assert_eq!(result.fixable_issues, 1);
    assert_eq!(linter.apply_fixes(source, &result.findings), "ok rust");
}

#[test]
fn empty_document_yields_empty_result() {
    let linter = default_linter();
    let result = linter.lint_text("");
    assert_eq!(result.total_issues, 0);
    assert_eq!(result.fixable_issues, 0);
    assert_eq!(linter.apply_fixes("", &result.findings), "");
}

#[test]
fn fix_builders_describe_insertions_and_deletions() {
    let source = "abcdef";
    let findings = vec![
        Finding::new("x", Severity::Error, "del", Span::new(0, 2), Position::new(0, 0))
            .with_fix(Fix::delete(Span::new(0, 2))),
        Finding::new("x", Severity::Error, "ins", Span::new(4, 4), Position::new(0, 4))
            .with_fix(Fix::insert(4, "XY")),
    ];

    let linter = Linter::with_rules(vec![]);
    assert_eq!(linter.apply_fixes(source, &findings), "cdXYef");
}
