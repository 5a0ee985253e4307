use crate::{
    error::ExpressionError,
    expression::{env::Environment, token::Token},
};

/// Result type used by the evaluator and the differentiator.
///
/// All fallible expression operations return either a value of type `T` or
/// an `ExpressionError` describing the failure.
pub type EvalResult<T> = Result<T, ExpressionError>;

/// Evaluates a postfix sequence with a value stack.
///
/// Tokens are processed left to right. Numbers and variables push a value;
/// operators and functions pop their operands and push the result. Binary
/// operators receive `[left, right]` where `right` is the value that was on
/// top of the stack.
///
/// # Errors
/// - [`ExpressionError::UnboundVariable`] for a variable missing from `env`.
/// - [`ExpressionError::OperandCount`] or
///   [`ExpressionError::ArgumentCount`] when the stack holds fewer values
///   than an operator or function needs.
/// - [`ExpressionError::LeftoverOperands`] when more than one value remains.
/// - [`ExpressionError::EmptyExpression`] when no value was produced.
///
/// # Example
/// ```
/// use rpnexpr::expression::{env::Environment, evaluator::evaluate, reader::read_postfix};
///
/// let tokens = read_postfix("5 2 -", &[]).unwrap();
/// assert_eq!(evaluate(&tokens, &Environment::default()).unwrap(), 3.0);
/// ```
pub fn evaluate(tokens: &[Token], env: &Environment) -> EvalResult<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Number(value) => stack.push(*value),
            Token::Variable(name) => {
                let value =
                    env.get(name)
                       .ok_or_else(|| ExpressionError::UnboundVariable { name: name.clone() })?;
                stack.push(value);
            },
            Token::Operator(op) => {
                let args = pop_args(&mut stack, op.arity()).ok_or(ExpressionError::OperandCount { symbol:
                                                                                                 op.symbol() })?;
                stack.push(op.apply(&args));
            },
            Token::Function(func) => {
                let args = pop_args(&mut stack, func.arity()).ok_or_else(|| {
                               ExpressionError::ArgumentCount { name: func.name().to_string() }
                           })?;
                stack.push(func.apply(&args));
            },
        }
    }

    match stack.len() {
        0 => Err(ExpressionError::EmptyExpression),
        1 => Ok(stack[0]),
        count => Err(ExpressionError::LeftoverOperands { count }),
    }
}

/// Removes the top `count` values, returned in the order they were pushed.
fn pop_args(stack: &mut Vec<f64>, count: usize) -> Option<Vec<f64>> {
    let start = stack.len().checked_sub(count)?;
    Some(stack.split_off(start))
}
