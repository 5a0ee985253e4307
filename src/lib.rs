//! # rpnexpr
//!
//! rpnexpr validates, evaluates and symbolically differentiates mathematical
//! expressions given as postfix (reverse Polish) token sequences.
//!
//! ```
//! use rpnexpr::Expression;
//!
//! let mut expr = Expression::from_postfix("x sin").unwrap();
//! expr.set_variable("x", 0.0).unwrap();
//!
//! let slope = expr.derivative("x").unwrap();
//! assert_eq!(slope.evaluate().unwrap(), 1.0);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Provides unified error types for reading and evaluating expressions.
///
/// This module defines all errors that can be raised while reading postfix
/// text, evaluating or differentiating a sequence, or binding variables.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (reader, evaluator,
///   differentiator, bindings).
/// - Carries the offending names, symbols and positions for reporting.
pub mod error;
/// Postfix expressions and the algorithms that operate on them.
///
/// This module contains the token model, the builtin registry, the postfix
/// reader, and the validator, evaluator and differentiator. It exposes the
/// [`Expression`] type as the main entry point.
///
/// # Responsibilities
/// - Represents expressions as immutable postfix token sequences.
/// - Validates stack balance without failing.
/// - Evaluates sequences, synchronously or on a task runner.
/// - Produces derivative sequences with respect to a variable.
pub mod expression;

pub use error::{ExpressionError, ReadError};
pub use expression::{core::Expression, validator::ValidationResult};
