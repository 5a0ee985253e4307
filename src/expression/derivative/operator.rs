use log::trace;

use crate::expression::{
    derivative::{Postfix, depends_on, differentiate as diff, unsupported},
    evaluator::EvalResult,
    registry::{ADD, DIV, MUL, NEG, POS, POW, SUB},
    token::{Operator, Token},
};

/// Differentiates `left op right` with respect to `var`.
///
/// For unary operators `right` is empty and `left` is the operand.
///
/// # Errors
/// Returns an unsupported construct error for operators without a rule.
pub fn differentiate(op: Operator,
                     left: &[Token],
                     right: &[Token],
                     var: &str)
                     -> EvalResult<Vec<Token>> {
    match (op.symbol(), op.arity()) {
        ('+', 1) => Ok(Postfix::new().tokens(&diff(left, var)?).op(POS).build()),
        ('-', 1) => Ok(Postfix::new().tokens(&diff(left, var)?).op(NEG).build()),
        ('+', 2) => sum(left, right, var, ADD),
        ('-', 2) => sum(left, right, var, SUB),
        ('*', 2) => product(left, right, var),
        ('/', 2) => quotient(left, right, var),
        ('^', 2) => power(left, right, var),
        ('%', 2) => {
            let rewritten = rewrite_modulo(left, right)?;
            diff(&rewritten, var)
        },
        _ => Err(unsupported(&Token::Operator(op))),
    }
}

/// `d(a) d(b) ±`
fn sum(a: &[Token], b: &[Token], var: &str, op: Operator) -> EvalResult<Vec<Token>> {
    Ok(Postfix::new().tokens(&diff(a, var)?)
                     .tokens(&diff(b, var)?)
                     .op(op)
                     .build())
}

/// `d(a)*b + a*d(b)`
fn product(a: &[Token], b: &[Token], var: &str) -> EvalResult<Vec<Token>> {
    Ok(Postfix::new().tokens(&diff(a, var)?)
                     .tokens(b)
                     .op(MUL)
                     .tokens(a)
                     .tokens(&diff(b, var)?)
                     .op(MUL)
                     .op(ADD)
                     .build())
}

/// `(d(a)*b - a*d(b)) / b^2`
fn quotient(a: &[Token], b: &[Token], var: &str) -> EvalResult<Vec<Token>> {
    Ok(Postfix::new().tokens(&diff(a, var)?)
                     .tokens(b)
                     .op(MUL)
                     .tokens(a)
                     .tokens(&diff(b, var)?)
                     .op(MUL)
                     .op(SUB)
                     .tokens(b)
                     .number(2.0)
                     .op(POW)
                     .op(DIV)
                     .build())
}

/// Differentiates `a^b`.
///
/// A constant exponent uses the power rule `b * a^(b-1) * d(a)` and a
/// constant base the exponential rule `a^b * ln(a) * d(b)`. Only when both
/// sides depend on `var` is the general form
/// `a^(b-1) * (b*d(a) + a*ln(a)*d(b))` emitted. The special cases keep `ln`
/// away from negative bases, where it would turn a finite result into NaN.
fn power(a: &[Token], b: &[Token], var: &str) -> EvalResult<Vec<Token>> {
    if !depends_on(b, var) {
        return Ok(Postfix::new().tokens(b)
                                .tokens(a)
                                .tokens(b)
                                .number(1.0)
                                .op(SUB)
                                .op(POW)
                                .op(MUL)
                                .tokens(&diff(a, var)?)
                                .op(MUL)
                                .build());
    }

    if !depends_on(a, var) {
        return Ok(Postfix::new().tokens(a)
                                .tokens(b)
                                .op(POW)
                                .tokens(a)
                                .call("log")?
                                .op(MUL)
                                .tokens(&diff(b, var)?)
                                .op(MUL)
                                .build());
    }

    Ok(Postfix::new().tokens(a)
                     .tokens(b)
                     .number(1.0)
                     .op(SUB)
                     .op(POW)
                     .tokens(b)
                     .tokens(&diff(a, var)?)
                     .op(MUL)
                     .tokens(a)
                     .tokens(a)
                     .call("log")?
                     .op(MUL)
                     .tokens(&diff(b, var)?)
                     .op(MUL)
                     .op(ADD)
                     .op(MUL)
                     .build())
}

/// Rewrites `a % b` as `abs(a - b*floor(a/b)) * signum(a)`.
///
/// The form agrees with `%` for a non-negative dividend. Its derivative goes
/// through the `floor` and `signum` placeholders, so it is NaN wherever `a / b`
/// is an integer.
pub(crate) fn rewrite_modulo(a: &[Token], b: &[Token]) -> EvalResult<Vec<Token>> {
    trace!("rewriting modulo into floor form");
    Ok(Postfix::new().tokens(a)
                     .tokens(b)
                     .tokens(a)
                     .tokens(b)
                     .op(DIV)
                     .call("floor")?
                     .op(MUL)
                     .op(SUB)
                     .call("abs")?
                     .tokens(a)
                     .call("signum")?
                     .op(MUL)
                     .build())
}
