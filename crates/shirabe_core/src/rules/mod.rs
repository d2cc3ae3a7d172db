//! Built-in rules.
//!
//! Each rule is an independent capability implementing [`Rule`] and
//! declaring its own coordinate convention; the engine does not care
//! which convention a rule was written against.

mod no_doubled_word;
mod no_todo;
mod sentence_length;
mod trailing_whitespace;

pub use no_doubled_word::{NoDoubledWord, NoDoubledWordConfig};
pub use no_todo::{NoTodo, NoTodoConfig};
pub use sentence_length::{SentenceLength, SentenceLengthConfig};
pub use trailing_whitespace::TrailingWhitespace;

use serde::de::DeserializeOwned;

use shirabe_diagnostic::Severity;

use crate::config::LinterConfig;
use crate::engine::Rule;
use crate::error::LinterError;

/// Identifiers of all built-in rules, in registration order.
pub const BUILTIN_RULE_IDS: &[&str] = &[
    no_doubled_word::RULE_ID,
    no_todo::RULE_ID,
    sentence_length::RULE_ID,
    trailing_whitespace::RULE_ID,
];

/// Builds the enabled built-in rules for a configuration.
///
/// Fails on unknown rule identifiers, unparseable option bags, and
/// unrecognized severity strings; rules the config does not mention run
/// with their defaults. Registration order is [`BUILTIN_RULE_IDS`] order.
pub fn build_rules(config: &LinterConfig) -> Result<Vec<Box<dyn Rule>>, LinterError> {
    for rule_id in config.rules.keys() {
        if !BUILTIN_RULE_IDS.contains(&rule_id.as_str()) {
            return Err(LinterError::config(format!("unknown rule \"{rule_id}\"")));
        }
    }

    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    for &rule_id in BUILTIN_RULE_IDS {
        let option = config.rule_option(rule_id);
        if option.is_some_and(|o| !o.is_enabled()) {
            continue;
        }
        let severity = match option {
            Some(option) => option.severity_override()?,
            None => None,
        };
        let options = option
            .map(|o| o.options())
            .unwrap_or(serde_json::Value::Null);
        rules.push(build_rule(rule_id, options, severity)?);
    }
    Ok(rules)
}

fn build_rule(
    rule_id: &str,
    options: serde_json::Value,
    severity: Option<Severity>,
) -> Result<Box<dyn Rule>, LinterError> {
    match rule_id {
        no_doubled_word::RULE_ID => Ok(Box::new(NoDoubledWord::new(
            parse_options(rule_id, options)?,
            severity,
        ))),
        no_todo::RULE_ID => Ok(Box::new(NoTodo::new(
            parse_options(rule_id, options)?,
            severity,
        ))),
        sentence_length::RULE_ID => Ok(Box::new(SentenceLength::new(
            parse_options(rule_id, options)?,
            severity,
        ))),
        trailing_whitespace::RULE_ID => Ok(Box::new(TrailingWhitespace::new(severity))),
        other => Err(LinterError::config(format!("unknown rule \"{other}\""))),
    }
}

fn parse_options<T: DeserializeOwned + Default>(
    rule_id: &str,
    options: serde_json::Value,
) -> Result<T, LinterError> {
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options)
        .map_err(|e| LinterError::config(format!("invalid options for \"{rule_id}\": {e}")))
}

/// Computes the 0-based byte line/column of an offset. Rules use this to
/// produce their native coordinates; the engine never sees it.
pub(crate) fn position_in(source: &str, offset: usize) -> (u32, u32) {
    let mut line = 0u32;
    let mut line_start = 0usize;
    for (idx, byte) in source.as_bytes()[..offset].iter().enumerate() {
        if *byte == b'\n' {
            line += 1;
            line_start = idx + 1;
        }
    }
    (line, (offset - line_start) as u32)
}
