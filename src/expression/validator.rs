use crate::expression::{env::Environment, token::Token};

/// Outcome of a structural check of a token sequence.
///
/// `errors` lists every problem found, in the order they were detected. A
/// valid result always carries an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid:  bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// The result shared by every successful validation.
    pub const SUCCESS: Self = Self { valid:  true,
                                     errors: Vec::new(), };

    fn from_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::SUCCESS
        } else {
            Self { valid: false,
                   errors }
        }
    }
}

/// Checks that a postfix sequence is stack balanced.
///
/// The check simulates the operand stack depth instead of evaluating: every
/// number or variable adds one value, and an operator or function of arity
/// `k` removes `k - 1`, so a nullary one adds a value and a unary one leaves
/// the depth alone. The depth has to stay at least one after every token and
/// be exactly one at the end.
///
/// With `check_variables_set`, every variable missing from `env` is reported
/// as well. Scanning stops at the first point where the simulated stack runs
/// empty, since nothing after it can be diagnosed meaningfully.
///
/// # Example
/// ```
/// use rpnexpr::expression::{env::Environment, reader::read_postfix, validator::validate};
///
/// let tokens = read_postfix("3 +", &[]).unwrap();
/// let result = validate(&tokens, &Environment::default(), true);
///
/// assert!(!result.valid);
/// assert_eq!(result.errors, vec!["too many operators".to_string()]);
/// ```
#[must_use]
pub fn validate(tokens: &[Token], env: &Environment, check_variables_set: bool) -> ValidationResult {
    let mut errors = Vec::new();

    if check_variables_set {
        for token in tokens {
            if let Token::Variable(name) = token
               && !env.contains(name)
            {
                errors.push(format!("variable '{name}' has not been set"));
            }
        }
    }

    if tokens.is_empty() {
        errors.push("empty expression".to_string());
        return ValidationResult::from_errors(errors);
    }

    let mut count: usize = 0;
    for token in tokens {
        if let Token::Function(func) = token
           && func.arity() > count
        {
            errors.push(format!("insufficient arguments for function '{}'", func.name()));
        }
        count = count.saturating_add_signed(token.stack_effect());

        if count < 1 {
            errors.push("too many operators".to_string());
            return ValidationResult::from_errors(errors);
        }
    }

    if count > 1 {
        errors.push("too many operands".to_string());
    }

    ValidationResult::from_errors(errors)
}
