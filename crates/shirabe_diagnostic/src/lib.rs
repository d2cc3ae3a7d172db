//! # shirabe_diagnostic
//!
//! Diagnostic types for Shirabe.
//!
//! This crate provides the canonical coordinate system and the value
//! objects every other crate agrees on:
//!
//! - [`Span`]: absolute byte offsets into the document
//! - [`Position`] / [`Location`]: 0-based line/column coordinates
//! - [`Finding`]: one normalized rule violation with an optional [`Fix`]
//! - [`RawViolation`] / [`Convention`]: the rule-side report contract,
//!   in whatever indexing convention the rule declares

mod finding;
mod span;
mod violation;

pub use finding::{Finding, Fix, Severity};
pub use span::{Location, Position, Span};
pub use violation::{Convention, RawViolation};
