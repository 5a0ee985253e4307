use std::fmt::{self, Display};

use ordered_float::OrderedFloat;

/// Numeric implementation shared by operators and functions.
///
/// Receives the operands in their original left-to-right order. Unary
/// operators receive a one-element slice, binary operators `[left, right]`.
pub type ApplyFn = fn(&[f64]) -> f64;

/// An operator such as `+` or unary `-`.
///
/// Operators are identified by their symbol and arity; the same symbol may
/// exist as both a unary and a binary operator.
#[derive(Debug, Clone, Copy)]
pub struct Operator {
    symbol: char,
    arity:  usize,
    apply:  ApplyFn,
}

impl Operator {
    /// Creates a new operator.
    ///
    /// # Example
    /// ```
    /// use rpnexpr::expression::token::Operator;
    ///
    /// let times = Operator::new('*', 2, |args| args[0] * args[1]);
    /// assert_eq!(times.apply(&[3.0, 4.0]), 12.0);
    /// ```
    #[must_use]
    pub const fn new(symbol: char, arity: usize, apply: ApplyFn) -> Self {
        Self { symbol,
               arity,
               apply }
    }

    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Applies the operator to its operands.
    #[must_use]
    pub fn apply(&self, args: &[f64]) -> f64 {
        (self.apply)(args)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.arity == other.arity
    }
}

/// A named function such as `sin` or a caller-defined custom function.
#[derive(Debug, Clone)]
pub struct Function {
    name:  String,
    arity: usize,
    apply: ApplyFn,
}

impl Function {
    /// Creates a new function.
    ///
    /// # Example
    /// ```
    /// use rpnexpr::expression::token::Function;
    ///
    /// let avg = Function::new("avg", 2, |args| (args[0] + args[1]) / 2.0);
    /// assert_eq!(avg.name(), "avg");
    /// assert_eq!(avg.apply(&[1.0, 3.0]), 2.0);
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, arity: usize, apply: ApplyFn) -> Self {
        Self { name: name.into(),
               arity,
               apply }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Applies the function to its arguments.
    #[must_use]
    pub fn apply(&self, args: &[f64]) -> f64 {
        (self.apply)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arity == other.arity
    }
}

/// A single element of a postfix expression.
///
/// Tokens are produced by a reader (see
/// [`reader`](crate::expression::reader)) or by the differentiator and are
/// never modified afterwards.
#[derive(Debug, Clone)]
pub enum Token {
    /// A numeric literal.
    Number(f64),
    /// A reference to a variable by name.
    Variable(String),
    /// A unary or binary operator.
    Operator(Operator),
    /// A function call consuming `arity` values.
    Function(Function),
}

impl Token {
    /// Shorthand for a variable token.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Returns how many values the token leaves on the stack minus how many it
    /// consumes.
    ///
    /// # Example
    /// ```
    /// use rpnexpr::expression::{registry::builtin_operator, token::Token};
    ///
    /// assert_eq!(Token::Number(1.0).stack_effect(), 1);
    /// let plus = builtin_operator('+', 2).unwrap();
    /// assert_eq!(Token::Operator(plus).stack_effect(), -1);
    /// ```
    #[must_use]
    pub fn stack_effect(&self) -> isize {
        match self {
            Self::Number(_) | Self::Variable(_) => 1,
            Self::Operator(op) => 1 - arity_as_isize(op.arity()),
            Self::Function(func) => 1 - arity_as_isize(func.arity()),
        }
    }
}

fn arity_as_isize(arity: usize) -> isize {
    isize::try_from(arity).unwrap_or(isize::MAX)
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Self::Variable(a), Self::Variable(b)) => a == b,
            (Self::Operator(a), Self::Operator(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for Token {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Operator> for Token {
    fn from(value: Operator) -> Self {
        Self::Operator(value)
    }
}

impl From<Function> for Token {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Operator(op) => match (op.symbol(), op.arity()) {
                ('-', 1) => write!(f, "neg"),
                ('+', 1) => write!(f, "pos"),
                (symbol, _) => write!(f, "{symbol}"),
            },
            Self::Function(func) => write!(f, "{}", func.name()),
        }
    }
}

/// Renders a token sequence as space separated postfix text.
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    let parts: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    parts.join(" ")
}
