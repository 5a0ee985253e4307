/// The expression type and its public operations.
///
/// Ties the token sequence, variable environment and reserved function
/// names together and exposes validation, evaluation and differentiation.
pub mod core;
/// Symbolic differentiation of postfix sequences.
///
/// The differentiator rewrites a sequence into a new sequence for its
/// derivative, recursing into the operands of every operator and function.
///
/// # Responsibilities
/// - Dispatches on the top level token of a sequence.
/// - Implements one rule per supported operator and function.
/// - Rewrites roots, exponentials, `ceil` and `%` into forms with known rules.
pub mod derivative;
/// Variable bindings and builtin constants.
pub mod env;
/// The stack machine that computes the value of a sequence.
pub mod evaluator;
/// Reading postfix text into tokens.
///
/// The reader accepts text that is already in postfix order, such as
/// `3 4 +`. It does not parse infix notation.
pub mod reader;
/// Builtin operators and functions with their numeric implementations.
pub mod registry;
/// Asynchronous evaluation on caller supplied task runners.
pub mod runner;
/// Splitting operator prefixes into operand sequences.
pub mod segment;
/// The token type shared by every stage.
///
/// Defines numbers, variables, operators and functions as they appear in a
/// postfix sequence, along with their textual form.
pub mod token;
/// Structural validation of postfix sequences.
///
/// The validator reports every problem it can find without failing, so it can
/// be used to diagnose an expression before evaluating it.
pub mod validator;
