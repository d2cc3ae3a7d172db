//! sentence-length rule: warn about overly long sentences.
//!
//! Reports in 0-based coordinates. Sentences are delimited by `.`, `!`,
//! or `?` and never span lines; length is counted in characters, not
//! bytes.

use serde::Deserialize;

use shirabe_diagnostic::{RawViolation, Severity};

use crate::engine::{Rule, ViolationSink};
use crate::error::RuleError;

pub const RULE_ID: &str = "sentence-length";

const DEFAULT_MAX_LENGTH: usize = 100;

/// Configuration for the sentence-length rule.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SentenceLengthConfig {
    /// Maximum sentence length in characters.
    pub max_length: usize,
}

impl Default for SentenceLengthConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Warns when a sentence exceeds the configured length.
pub struct SentenceLength {
    config: SentenceLengthConfig,
    severity: Severity,
}

impl SentenceLength {
    /// Creates the rule with the given options and optional severity
    /// override.
    pub fn new(config: SentenceLengthConfig, severity: Option<Severity>) -> Self {
        Self {
            config,
            severity: severity.unwrap_or(Severity::Warning),
        }
    }
}

impl Rule for SentenceLength {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn scan(&self, source: &str, sink: &mut ViolationSink) -> Result<(), RuleError> {
        for (line_no, line) in source.lines().enumerate() {
            for (start, sentence) in sentences(line) {
                let length = sentence.chars().count();
                if length <= self.config.max_length {
                    continue;
                }
                sink.report(
                    RawViolation::new(
                        RULE_ID,
                        self.severity,
                        format!(
                            "Sentence exceeds {} characters ({} found)",
                            self.config.max_length, length
                        ),
                        line_no as u32,
                        start as u32,
                    )
                    .with_end(line_no as u32, (start + sentence.len()) as u32),
                );
            }
        }
        Ok(())
    }
}

/// Splits one line into sentences, yielding `(byte column, text)` pairs
/// with surrounding whitespace trimmed.
fn sentences(line: &str) -> Vec<(usize, &str)> {
    let mut result = Vec::new();
    let mut start = 0usize;
    for (idx, c) in line.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            push_trimmed(&mut result, line, start, idx + c.len_utf8());
            start = idx + c.len_utf8();
        }
    }
    push_trimmed(&mut result, line, start, line.len());
    result
}

fn push_trimmed<'a>(result: &mut Vec<(usize, &'a str)>, line: &'a str, start: usize, end: usize) {
    let raw = &line[start..end];
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        let leading = raw.len() - raw.trim_start().len();
        result.push((start + leading, trimmed));
    }
}
