use std::{collections::HashSet, fmt};

use log::debug;

use crate::{
    error::{ExpressionError, ReadError},
    expression::{
        derivative::differentiate,
        env::{Environment, is_constant},
        evaluator::{EvalResult, evaluate},
        reader::read_postfix,
        registry::is_builtin_function,
        runner::{PendingEvaluation, TaskRunner, schedule},
        token::{Function, Token, render},
        validator::{ValidationResult, validate},
    },
};

/// A postfix expression together with its variable bindings.
///
/// The token sequence never changes after construction; only the bindings
/// can be modified. `Clone` produces a fully independent copy, which is the
/// way to hand an expression to another thread while keeping the original
/// mutable.
///
/// ## Usage
///
/// ```
/// use rpnexpr::Expression;
///
/// let mut expr = Expression::from_postfix("x 2 ^").unwrap();
/// expr.set_variable("x", 3.0).unwrap();
/// assert_eq!(expr.evaluate().unwrap(), 9.0);
///
/// let mut slope = expr.derivative("x").unwrap();
/// assert_eq!(slope.evaluate().unwrap(), 6.0);
/// slope.set_variable("x", -1.0).unwrap();
/// assert_eq!(slope.evaluate().unwrap(), -2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    tokens:         Vec<Token>,
    env:            Environment,
    function_names: HashSet<String>,
}

impl Expression {
    /// Creates an expression from postfix tokens with the default constants
    /// bound.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_functions(tokens, HashSet::new())
    }

    /// Creates an expression whose custom function names may not be used as
    /// variables.
    #[must_use]
    pub fn with_functions(tokens: Vec<Token>, function_names: HashSet<String>) -> Self {
        Self { tokens,
               env: Environment::with_constants(),
               function_names }
    }

    /// Reads an expression from postfix text using only builtin functions.
    ///
    /// # Errors
    /// Returns a [`ReadError`] if the text contains an unknown character.
    pub fn from_postfix(source: &str) -> Result<Self, ReadError> {
        Self::from_postfix_with(source, &[])
    }

    /// Reads an expression from postfix text, resolving `functions` before
    /// the builtins.
    ///
    /// # Errors
    /// Returns a [`ReadError`] if the text contains an unknown character.
    ///
    /// # Example
    /// ```
    /// use rpnexpr::{Expression, expression::token::Function};
    ///
    /// let avg = Function::new("avg", 2, |args| (args[0] + args[1]) / 2.0);
    /// let mut expr = Expression::from_postfix_with("2 4 avg", &[avg]).unwrap();
    ///
    /// assert_eq!(expr.evaluate().unwrap(), 3.0);
    /// assert!(expr.set_variable("avg", 1.0).is_err());
    /// ```
    pub fn from_postfix_with(source: &str, functions: &[Function]) -> Result<Self, ReadError> {
        let tokens = read_postfix(source, functions)?;
        let names = functions.iter().map(|f| f.name().to_string()).collect();
        Ok(Self::with_functions(tokens, names))
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.env.get(name)
    }

    /// Returns every binding, the default constants included.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    /// Binds `name` to `value`.
    ///
    /// # Errors
    /// Returns [`ExpressionError::InvalidVariableName`] if `name` is a
    /// builtin or custom function name.
    pub fn set_variable(&mut self, name: &str, value: f64) -> EvalResult<&mut Self> {
        self.check_variable_name(name)?;
        self.env.set(name, value);
        Ok(self)
    }

    /// Binds every `(name, value)` pair.
    ///
    /// All names are checked before anything is bound, so a rejected name
    /// leaves the bindings untouched.
    ///
    /// # Errors
    /// Returns [`ExpressionError::InvalidVariableName`] for the first name
    /// that belongs to a function.
    pub fn set_variables<I, S>(&mut self, variables: I) -> EvalResult<&mut Self>
        where I: IntoIterator<Item = (S, f64)>,
              S: Into<String>
    {
        let variables: Vec<(String, f64)> =
            variables.into_iter()
                     .map(|(name, value)| (name.into(), value))
                     .collect();

        for (name, _) in &variables {
            self.check_variable_name(name)?;
        }
        for (name, value) in variables {
            self.env.set(name, value);
        }
        Ok(self)
    }

    fn check_variable_name(&self, name: &str) -> EvalResult<()> {
        if self.function_names.contains(name) || is_builtin_function(name) {
            return Err(ExpressionError::InvalidVariableName { name: name.to_string() });
        }
        Ok(())
    }

    /// Validates the expression, including that every variable is bound.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        self.validate_with(true)
    }

    /// Validates the stack balance, and bound variables if
    /// `check_variables_set` is true.
    #[must_use]
    pub fn validate_with(&self, check_variables_set: bool) -> ValidationResult {
        validate(&self.tokens, &self.env, check_variables_set)
    }

    /// Evaluates the expression with the current bindings.
    ///
    /// # Errors
    /// See [`evaluate`](crate::expression::evaluator::evaluate).
    pub fn evaluate(&self) -> EvalResult<f64> {
        evaluate(&self.tokens, &self.env)
    }

    /// Evaluates a snapshot of the expression on `runner`.
    ///
    /// Bindings changed after this call do not affect the scheduled
    /// evaluation.
    ///
    /// # Example
    /// ```
    /// use rpnexpr::{Expression, expression::runner::ThreadSpawner};
    ///
    /// let expr = Expression::from_postfix("3 4 +").unwrap();
    /// let pending = expr.evaluate_async(&ThreadSpawner);
    /// assert_eq!(pending.wait().unwrap(), 7.0);
    /// ```
    pub fn evaluate_async<R: TaskRunner + ?Sized>(&self, runner: &R) -> PendingEvaluation {
        debug!("scheduling evaluation of `{self}`");
        let snapshot = self.clone();
        schedule(runner, move || snapshot.evaluate())
    }

    /// Differentiates the expression with respect to `variable`.
    ///
    /// Every other variable is treated as a constant. The result carries a
    /// copy of the current bindings and custom function names.
    ///
    /// # Errors
    /// - [`ExpressionError::InvalidExpression`] if the expression is not stack
    ///   balanced.
    /// - [`ExpressionError::ConstantDifferentiation`] if `variable` is one of
    ///   the builtin constants.
    /// - [`ExpressionError::UnsupportedConstruct`] for operators or functions
    ///   without a differentiation rule.
    pub fn derivative(&self, variable: &str) -> EvalResult<Self> {
        let validation = self.validate_with(false);
        if !validation.valid {
            return Err(ExpressionError::InvalidExpression { errors: validation.errors });
        }

        if is_constant(variable) {
            return Err(ExpressionError::ConstantDifferentiation { name: variable.to_string() });
        }

        debug!("differentiating `{self}` with respect to {variable}");
        let tokens = differentiate(&self.tokens, variable)?;

        Ok(Self { tokens,
                  env: self.env.clone(),
                  function_names: self.function_names.clone() })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(&self.tokens))
    }
}
