use crate::expression::token::{ApplyFn, Function, Operator};

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the number of arguments,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  ApplyFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin function.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"    => { arity: 1, func: |args| args[0].sin() },
    "cos"    => { arity: 1, func: |args| args[0].cos() },
    "tan"    => { arity: 1, func: |args| args[0].tan() },
    "asin"   => { arity: 1, func: |args| args[0].asin() },
    "acos"   => { arity: 1, func: |args| args[0].acos() },
    "atan"   => { arity: 1, func: |args| args[0].atan() },
    "sinh"   => { arity: 1, func: |args| args[0].sinh() },
    "cosh"   => { arity: 1, func: |args| args[0].cosh() },
    "tanh"   => { arity: 1, func: |args| args[0].tanh() },
    "abs"    => { arity: 1, func: |args| args[0].abs() },
    "log"    => { arity: 1, func: |args| args[0].ln() },
    "log2"   => { arity: 1, func: |args| args[0].log2() },
    "log10"  => { arity: 1, func: |args| args[0].log10() },
    "log1p"  => { arity: 1, func: |args| args[0].ln_1p() },
    "ceil"   => { arity: 1, func: |args| args[0].ceil() },
    "floor"  => { arity: 1, func: |args| args[0].floor() },
    "sqrt"   => { arity: 1, func: |args| args[0].sqrt() },
    "cbrt"   => { arity: 1, func: |args| args[0].cbrt() },
    "pow"    => { arity: 2, func: |args| args[0].powf(args[1]) },
    "exp"    => { arity: 1, func: |args| args[0].exp() },
    "expm1"  => { arity: 1, func: |args| args[0].exp_m1() },
    "signum" => { arity: 1, func: |args| signum(args[0]) },
}

/// Sign of a value with `signum(0) == 0`.
///
/// Unlike [`f64::signum`], zero is returned unchanged. NaN stays NaN.
fn signum(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Binary `+`.
pub const ADD: Operator = Operator::new('+', 2, |args| args[0] + args[1]);
/// Binary `-`.
pub const SUB: Operator = Operator::new('-', 2, |args| args[0] - args[1]);
/// Binary `*`.
pub const MUL: Operator = Operator::new('*', 2, |args| args[0] * args[1]);
/// Binary `/`.
pub const DIV: Operator = Operator::new('/', 2, |args| args[0] / args[1]);
/// Binary `^`.
pub const POW: Operator = Operator::new('^', 2, |args| args[0].powf(args[1]));
/// Binary `%`, with the sign of the dividend.
pub const MOD: Operator = Operator::new('%', 2, |args| args[0] % args[1]);
/// Unary `+`.
pub const POS: Operator = Operator::new('+', 1, |args| args[0]);
/// Unary `-`.
pub const NEG: Operator = Operator::new('-', 1, |args| -args[0]);

static OPERATOR_TABLE: &[Operator] = &[ADD, SUB, MUL, DIV, POW, MOD, POS, NEG];

/// Looks up a builtin function by name.
///
/// # Example
/// ```
/// use rpnexpr::expression::registry::builtin_function;
///
/// let sqrt = builtin_function("sqrt").unwrap();
/// assert_eq!(sqrt.apply(&[9.0]), 3.0);
/// assert!(builtin_function("nope").is_none());
/// ```
#[must_use]
pub fn builtin_function(name: &str) -> Option<Function> {
    BUILTIN_TABLE.iter()
                 .find(|b| b.name == name)
                 .map(|b| Function::new(b.name, b.arity, b.func))
}

/// Tests whether `name` belongs to a builtin function.
#[must_use]
pub fn is_builtin_function(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

/// Looks up a builtin operator by symbol and arity.
///
/// # Example
/// ```
/// use rpnexpr::expression::registry::builtin_operator;
///
/// let neg = builtin_operator('-', 1).unwrap();
/// assert_eq!(neg.apply(&[2.0]), -2.0);
/// assert!(builtin_operator('*', 1).is_none());
/// ```
#[must_use]
pub fn builtin_operator(symbol: char, arity: usize) -> Option<Operator> {
    OPERATOR_TABLE.iter()
                  .find(|op| op.symbol() == symbol && op.arity() == arity)
                  .copied()
}
