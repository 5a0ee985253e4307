/// Differentiation rules for operators.
///
/// Implements the sum, difference, product, quotient and power rules, and
/// the rewrite of `%` into `abs`, `floor` and `signum`.
pub mod operator;

/// Differentiation rules for functions.
///
/// Applies the chain rule for every supported builtin function and rewrites
/// roots, exponentials, `pow` and `ceil` into forms with known rules.
pub mod function;

use crate::{
    error::ExpressionError,
    expression::{
        evaluator::EvalResult,
        registry::builtin_function,
        segment::segment,
        token::{Operator, Token},
    },
};

/// Differentiates a postfix sequence with respect to `var`.
///
/// Dispatches on the last token, which is the top level operation of the
/// sequence. Numbers and foreign variables differentiate to `0`, `var` itself
/// to `1`. The output is not simplified, so it can contain terms such as
/// `0 x *`.
///
/// The sequence is expected to be stack balanced.
///
/// # Errors
/// Returns [`ExpressionError::UnsupportedConstruct`] for an operator or
/// function without a differentiation rule, and
/// [`ExpressionError::EmptyExpression`] for an empty sequence.
///
/// # Example
/// ```
/// use rpnexpr::expression::{derivative::differentiate, reader::read_postfix, token::render};
///
/// let tokens = read_postfix("x 3 +", &[]).unwrap();
/// assert_eq!(render(&differentiate(&tokens, "x").unwrap()), "1 0 +");
/// ```
pub fn differentiate(tokens: &[Token], var: &str) -> EvalResult<Vec<Token>> {
    let Some((last, prefix)) = tokens.split_last() else {
        return Err(ExpressionError::EmptyExpression);
    };

    match last {
        Token::Number(_) => Ok(vec![Token::Number(0.0)]),
        Token::Variable(name) => Ok(vec![Token::Number(if name == var { 1.0 } else { 0.0 })]),
        Token::Operator(op) => {
            let (left, right) = segment(prefix, op.arity());
            operator::differentiate(*op, left, right, var)
        },
        Token::Function(func) => function::differentiate(func, prefix, var),
    }
}

/// Tests whether any token of `tokens` refers to the variable `var`.
pub(crate) fn depends_on(tokens: &[Token], var: &str) -> bool {
    tokens.iter()
          .any(|token| matches!(token, Token::Variable(name) if name == var))
}

pub(crate) fn unsupported(token: &Token) -> ExpressionError {
    ExpressionError::UnsupportedConstruct { construct: token.to_string() }
}

/// Incremental builder for postfix output.
///
/// Rules are written in the same order the tokens appear, for example the
/// product rule reads `.tokens(da).tokens(b).op(MUL)...`.
#[derive(Debug, Default)]
pub(crate) struct Postfix(Vec<Token>);

impl Postfix {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn tokens(mut self, tokens: &[Token]) -> Self {
        self.0.extend_from_slice(tokens);
        self
    }

    pub(crate) fn number(mut self, value: f64) -> Self {
        self.0.push(Token::Number(value));
        self
    }

    pub(crate) fn variable(mut self, name: &str) -> Self {
        self.0.push(Token::variable(name));
        self
    }

    pub(crate) fn op(mut self, op: Operator) -> Self {
        self.0.push(Token::Operator(op));
        self
    }

    /// Appends a call to the builtin function `name`.
    pub(crate) fn call(mut self, name: &str) -> EvalResult<Self> {
        let func = builtin_function(name).ok_or_else(|| {
                       ExpressionError::UnsupportedConstruct { construct: name.to_string() }
                   })?;
        self.0.push(Token::Function(func));
        Ok(self)
    }

    pub(crate) fn token(mut self, token: Token) -> Self {
        self.0.push(token);
        self
    }

    pub(crate) fn build(self) -> Vec<Token> {
        self.0
    }
}
