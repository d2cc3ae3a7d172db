//! no-doubled-word rule: disallow the same word twice in a row.
//!
//! Reports in 1-based line/column coordinates with inclusive fix span
//! ends; the normalizer translates to canonical coordinates.

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

use shirabe_diagnostic::{Convention, RawViolation, Severity, Span};

use crate::engine::{Rule, ViolationSink};
use crate::error::RuleError;

use super::position_in;

pub const RULE_ID: &str = "no-doubled-word";

/// Configuration for the no-doubled-word rule.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NoDoubledWordConfig {
    /// Words allowed to repeat (case-insensitive), e.g. "had" for
    /// "had had".
    pub allow: Vec<String>,
}

/// Detects a word immediately repeated across whitespace and offers a
/// fix deleting the second occurrence.
pub struct NoDoubledWord {
    config: NoDoubledWordConfig,
    severity: Severity,
}

impl NoDoubledWord {
    /// Creates the rule with the given options and optional severity
    /// override.
    pub fn new(config: NoDoubledWordConfig, severity: Option<Severity>) -> Self {
        Self {
            config,
            severity: severity.unwrap_or(Severity::Error),
        }
    }

    fn is_allowed(&self, word: &str) -> bool {
        self.config
            .allow
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(word))
    }
}

impl Rule for NoDoubledWord {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn convention(&self) -> Convention {
        Convention::ONE_BASED.with_inclusive_fix_end()
    }

    fn scan(&self, source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
        let words: Vec<(usize, &str)> = source
            .split_word_bound_indices()
            .filter(|(_, word)| word.chars().next().is_some_and(char::is_alphanumeric))
            .collect();

        for pair in words.windows(2) {
            let [(prev_start, prev), (start, word)] = pair else {
                continue;
            };
            let (prev_start, start) = (*prev_start, *start);

            if word.to_lowercase() != prev.to_lowercase() || self.is_allowed(word) {
                continue;
            }

            // Only flag repeats separated by whitespace alone; "the, the"
            // is not a doubled word.
            let gap = &source[prev_start + prev.len()..start];
            if gap.is_empty() || !gap.chars().all(char::is_whitespace) {
                continue;
            }

            let word_end = start + word.len();
            let trailing_ws = source[word_end..]
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .count();

            // Delete the second word plus its trailing spacing, or the
            // gap before it when the word ends the line.
            let (del_start, del_end) = if trailing_ws > 0 {
                (start, word_end + trailing_ws)
            } else {
                (prev_start + prev.len(), word_end)
            };

            let (line, column) = position_in(source, start);
            sink.report(
                RawViolation::new(
                    RULE_ID,
                    self.severity,
                    format!("Found doubled word \"{word}\""),
                    line + 1,
                    column + 1,
                )
                .with_end(line + 1, column + word.len() as u32 + 1)
                .with_fix(Span::new(del_start as u32, del_end as u32 - 1), ""),
            );
        }

        Ok(())
    }
}
