use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while evaluating, differentiating or
/// configuring an expression.
pub enum ExpressionError {
    /// A variable was referenced without a bound value.
    #[error("No value has been set for the variable '{name}'.")]
    UnboundVariable {
        /// The name of the variable.
        name: String,
    },
    /// An operator found fewer operands on the stack than its arity.
    #[error("Invalid number of operands available for operator '{symbol}'.")]
    OperandCount {
        /// The operator symbol.
        symbol: char,
    },
    /// A function found fewer arguments on the stack than its arity.
    #[error("Invalid number of arguments available for function '{name}'.")]
    ArgumentCount {
        /// The function name.
        name: String,
    },
    /// Evaluation finished with more than one value on the stack.
    #[error("{count} values left on the stack. The expression arity is malformed.")]
    LeftoverOperands {
        /// How many values were left.
        count: usize,
    },
    /// Evaluation finished without producing a value.
    #[error("The expression is empty.")]
    EmptyExpression,
    /// The differentiator met an operator or function it has no rule for.
    #[error("Differentiation of '{construct}' is not supported.")]
    UnsupportedConstruct {
        /// Postfix rendering of the offending token.
        construct: String,
    },
    /// Tried to differentiate with respect to a builtin constant.
    #[error("Cannot differentiate with respect to '{name}' because it is a constant.")]
    ConstantDifferentiation {
        /// The constant name.
        name: String,
    },
    /// The expression failed structural validation.
    #[error("The expression is invalid: {}.", errors.join("; "))]
    InvalidExpression {
        /// Every diagnostic reported by the validator.
        errors: Vec<String>,
    },
    /// Tried to bind a variable whose name belongs to a function.
    #[error("The variable name '{name}' is invalid. A function with the same name exists.")]
    InvalidVariableName {
        /// The rejected name.
        name: String,
    },
    /// An asynchronous evaluation was dropped before it produced a result.
    #[error("The evaluation task was dropped before it completed.")]
    EvaluationAbandoned,
}
