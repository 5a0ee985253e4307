use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while reading postfix text.
pub enum ReadError {
    /// Found a character sequence that is not a number, name or operator.
    #[error("Error at position {position}: Unexpected token '{token}'.")]
    UnexpectedToken {
        /// The offending slice of the input.
        token:    String,
        /// Byte offset of the token in the input.
        position: usize,
    },
}
