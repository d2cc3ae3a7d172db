//! # shirabe_core
//!
//! Core lint engine for Shirabe.
//!
//! This crate provides:
//! - The [`Linter`] runner (`lint_text` / `apply_fixes`)
//! - The rule execution engine with per-rule failure isolation
//! - Finding normalization into canonical coordinates
//! - Conflict-free fix application
//! - Built-in rules and their configuration
//!
//! ## Example
//!
//! ```rust
//! use shirabe_core::{Linter, LinterConfig};
//!
//! let linter = Linter::new(LinterConfig::new())?;
//! let result = linter.lint_text("The the quick fox.");
//! let fixed = linter.apply_fixes("The the quick fox.", &result.findings);
//! assert_eq!(fixed, "The quick fox.");
//! # Ok::<(), shirabe_core::LinterError>(())
//! ```

mod config;
mod engine;
mod error;
mod fixer;
mod line_index;
mod linter;
mod normalize;
mod result;
pub mod rules;

pub use config::{LinterConfig, RuleOption};
pub use engine::{RULE_FAILURE_ID, Rule, RuleOutcome, ViolationSink, run_rules, run_rules_parallel};
pub use error::{LinterError, PositionError, RuleError};
pub use fixer::{
    FixOutcome, apply_fixes_to_content, apply_fixes_to_file, count_fixable, is_valid_fix_span,
};
pub use line_index::LineIndex;
pub use linter::Linter;
pub use normalize::{INVALID_FIX_NOTE, normalize};
pub use result::LintResult;

pub use shirabe_diagnostic::{
    Convention, Finding, Fix, Location, Position, RawViolation, Severity, Span,
};
