use std::f64::consts::{LN_2, LN_10};

use log::trace;

use crate::expression::{
    derivative::{Postfix, differentiate as diff, unsupported},
    evaluator::EvalResult,
    registry::{ADD, DIV, MUL, NEG, POW, SUB},
    token::{Function, Token},
};

/// Name of the placeholder used as the derivative of `signum`.
pub const DELTA: &str = "delta";
/// Name of the placeholder used as the derivative of `floor`.
pub const FLOOR_SLOPE: &str = "floor_slope";

/// Placeholder derivative of `signum`.
///
/// Evaluates to `0` away from the origin and to `+inf` at it. This stands in
/// for the Dirac delta and is not a distribution.
///
/// # Example
/// ```
/// use rpnexpr::expression::derivative::function::delta;
///
/// let delta = delta();
/// assert_eq!(delta.apply(&[2.0]), 0.0);
/// assert_eq!(delta.apply(&[0.0]), f64::INFINITY);
/// ```
#[must_use]
pub fn delta() -> Function {
    Function::new(DELTA, 1, |args| if args[0] == 0.0 { f64::INFINITY } else { 0.0 })
}

/// Placeholder derivative of `floor`: `0` at non-integers, NaN at integers.
#[must_use]
pub fn floor_slope() -> Function {
    Function::new(FLOOR_SLOPE, 1, |args| if args[0].fract() == 0.0 { f64::NAN } else { 0.0 })
}

/// Differentiates `func(args)` with respect to `var`.
///
/// `args` is the token sequence preceding the function token. Functions that
/// have an equivalent operator form are rewritten and differentiated again;
/// the others apply the chain rule `d(u) * f'(u)`.
///
/// # Errors
/// Returns an unsupported construct error for functions without a rule, and
/// for any function whose arity does not match its rule.
pub fn differentiate(func: &Function, args: &[Token], var: &str) -> EvalResult<Vec<Token>> {
    match (func.name(), func.arity()) {
        ("pow", 2) => diff(&rewrite_pow(args), var),
        (_, 1) => unary(func, args, var),
        _ => Err(unsupported(&Token::Function(func.clone()))),
    }
}

fn unary(func: &Function, u: &[Token], var: &str) -> EvalResult<Vec<Token>> {
    let outer = match func.name() {
        "sqrt" => return diff(&rewrite_root(u, 1.0 / 2.0), var),
        "cbrt" => return diff(&rewrite_root(u, 1.0 / 3.0), var),
        "exp" | "expm1" => return diff(&rewrite_exponential(u), var),
        "ceil" => return diff(&rewrite_ceil(u)?, var),
        "sin" => Postfix::new().tokens(u).call("cos")?,
        "cos" => Postfix::new().tokens(u).call("sin")?.op(NEG),
        "tan" => reciprocal_square(u, "cos")?,
        "asin" => inverse_sine(u)?,
        "acos" => inverse_sine(u)?.op(NEG),
        "atan" => Postfix::new().number(1.0)
                                .tokens(u)
                                .number(2.0)
                                .op(POW)
                                .number(1.0)
                                .op(ADD)
                                .op(DIV),
        "sinh" => Postfix::new().tokens(u).call("cosh")?,
        "cosh" => Postfix::new().tokens(u).call("sinh")?,
        "tanh" => reciprocal_square(u, "cosh")?,
        "log" => Postfix::new().number(1.0).tokens(u).op(DIV),
        "log2" => Postfix::new().number(1.0)
                                .tokens(u)
                                .number(LN_2)
                                .op(MUL)
                                .op(DIV),
        "log10" => Postfix::new().number(1.0)
                                 .tokens(u)
                                 .number(LN_10)
                                 .op(MUL)
                                 .op(DIV),
        "log1p" => Postfix::new().number(1.0)
                                 .tokens(u)
                                 .number(1.0)
                                 .op(ADD)
                                 .op(DIV),
        "abs" => Postfix::new().tokens(u).call("signum")?,
        "signum" => Postfix::new().tokens(u).token(Token::Function(delta())),
        "floor" => Postfix::new().tokens(u).token(Token::Function(floor_slope())),
        _ => return Err(unsupported(&Token::Function(func.clone()))),
    };

    Ok(Postfix::new().tokens(&diff(u, var)?)
                     .tokens(&outer.build())
                     .op(MUL)
                     .build())
}

/// `1 / f(u)^2`
fn reciprocal_square(u: &[Token], name: &str) -> EvalResult<Postfix> {
    Ok(Postfix::new().number(1.0)
                     .tokens(u)
                     .call(name)?
                     .number(2.0)
                     .op(POW)
                     .op(DIV))
}

/// `1 / sqrt(1 - u^2)`
fn inverse_sine(u: &[Token]) -> EvalResult<Postfix> {
    Ok(Postfix::new().number(1.0)
                     .number(1.0)
                     .tokens(u)
                     .number(2.0)
                     .op(POW)
                     .op(SUB)
                     .call("sqrt")?
                     .op(DIV))
}

/// Rewrites a root of `u` as `u^exponent`.
pub(crate) fn rewrite_root(u: &[Token], exponent: f64) -> Vec<Token> {
    trace!("rewriting root as power {exponent}");
    Postfix::new().tokens(u).number(exponent).op(POW).build()
}

/// Rewrites `exp(u)` as `e^u`.
///
/// `expm1(u)` shares the rewrite since it only differs by a constant.
pub(crate) fn rewrite_exponential(u: &[Token]) -> Vec<Token> {
    trace!("rewriting exponential as power of e");
    Postfix::new().variable("e").tokens(u).op(POW).build()
}

/// Rewrites `pow(a, b)` as `a^b`.
pub(crate) fn rewrite_pow(args: &[Token]) -> Vec<Token> {
    trace!("rewriting pow as operator");
    Postfix::new().tokens(args).op(POW).build()
}

/// Rewrites `ceil(u)` as `-floor(-u)`.
pub(crate) fn rewrite_ceil(u: &[Token]) -> EvalResult<Vec<Token>> {
    trace!("rewriting ceil through floor");
    Ok(Postfix::new().tokens(u)
                     .op(NEG)
                     .call("floor")?
                     .op(NEG)
                     .build())
}
