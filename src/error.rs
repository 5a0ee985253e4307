/// Postfix reading errors.
///
/// Defines the errors that can occur while turning postfix text into tokens,
/// such as unrecognized characters.
pub mod read_error;
/// Expression errors.
///
/// Contains all error types that can be raised while evaluating or
/// differentiating an expression, or while binding its variables.
pub mod expression_error;

pub use expression_error::ExpressionError;
pub use read_error::ReadError;
