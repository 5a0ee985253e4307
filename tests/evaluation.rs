use std::f64::consts::{E, PI};

use rpnexpr::{
    Expression, ExpressionError, ReadError, ValidationResult,
    expression::{
        env::GOLDEN_RATIO,
        registry::ADD,
        runner::{Task, TaskRunner, ThreadSpawner},
        token::{Function, Operator, Token},
    },
};

fn eval(src: &str) -> Result<f64, ExpressionError> {
    Expression::from_postfix(src).unwrap_or_else(|e| panic!("Failed to read '{src}': {e}"))
                                 .evaluate()
}

fn assert_value(src: &str, expected: f64) {
    match eval(src) {
        Ok(v) => assert!((v - expected).abs() <= 1e-12 * (1.0 + expected.abs()),
                         "'{src}' evaluated to {v}, expected {expected}"),
        Err(e) => panic!("'{src}' failed: {e}"),
    }
}

fn validation(src: &str) -> ValidationResult {
    Expression::from_postfix(src).unwrap().validate()
}

#[test]
fn basic_arithmetic() {
    assert_value("3 4 +", 7.0);
    assert_value("5 2 -", 3.0);
    assert_value("2 3 ^", 8.0);
    assert_value("6 4 *", 24.0);
    assert_value("9 2 /", 4.5);
    assert_value("7 2 %", 1.0);
    assert_value("-7 2 %", -1.0);
}

#[test]
fn binary_operands_keep_their_order() {
    assert_value("10 4 -", 6.0);
    assert_value("1 2 /", 0.5);
    assert_value("2 10 pow", 1024.0);
    assert_value("3 4 + 2 *", 14.0);
    assert_value("3 4 2 * +", 11.0);
}

#[test]
fn unary_operators() {
    assert_value("2 neg", -2.0);
    assert_value("2 pos", 2.0);
    assert_value("3 neg neg", 3.0);
    assert_value("1 2 neg -", 3.0);
}

#[test]
fn builtin_functions() {
    assert_value("0 sin", 0.0);
    assert_value("0 cos", 1.0);
    assert_value("9 sqrt", 3.0);
    assert_value("27 cbrt", 3.0);
    assert_value("-4.5 abs", 4.5);
    assert_value("8 log2", 3.0);
    assert_value("1000 log10", 3.0);
    assert_value("2.5 floor", 2.0);
    assert_value("2.5 ceil", 3.0);
    assert_value("-3 signum", -1.0);
    assert_value("0 signum", 0.0);
    assert_value("1 exp", E);
}

#[test]
fn constants_are_bound_by_default() {
    assert_value("pi", PI);
    assert_value("π", PI);
    assert_value("e", E);
    assert_value("φ", GOLDEN_RATIO);
    assert_value("pi 2 / sin", 1.0);
}

#[test]
fn custom_function_arguments_arrive_in_order() {
    let lerp = Function::new("lerp", 3, |args| args[0] + (args[1] - args[0]) * args[2]);
    let expr = Expression::from_postfix_with("10 20 0.25 lerp", &[lerp]).unwrap();
    assert_eq!(expr.evaluate().unwrap(), 12.5);
}

#[test]
fn nullary_custom_function() {
    let answer = Function::new("answer", 0, |_| 42.0);
    let expr = Expression::from_postfix_with("answer 2 /", &[answer]).unwrap();
    assert!(expr.validate().valid);
    assert_eq!(expr.evaluate().unwrap(), 21.0);
}

#[test]
fn custom_operator_arities_agree_with_validation() {
    let sum3 = Operator::new('?', 3, |args| args[0] + args[1] + args[2]);
    let one = Operator::new('k', 0, |_| 1.0);

    let ternary = Expression::new(vec![Token::Number(1.0),
                                       Token::Number(2.0),
                                       Token::Number(3.0),
                                       Token::Operator(sum3)]);
    assert_eq!(ternary.validate(), ValidationResult::SUCCESS);
    assert_eq!(ternary.evaluate().unwrap(), 6.0);

    let nullary = Expression::new(vec![Token::Number(1.0),
                                       Token::Operator(one),
                                       Token::Operator(ADD)]);
    assert_eq!(nullary.validate(), ValidationResult::SUCCESS);
    assert_eq!(nullary.evaluate().unwrap(), 2.0);

    let short = Expression::new(vec![Token::Number(1.0), Token::Number(2.0), Token::Operator(sum3)]);
    assert_eq!(short.validate().errors, vec!["too many operators"]);
    assert_eq!(short.evaluate(), Err(ExpressionError::OperandCount { symbol: '?' }));
}

#[test]
fn evaluation_errors() {
    assert_eq!(eval("x 1 +"),
               Err(ExpressionError::UnboundVariable { name: "x".to_string() }));
    assert_eq!(eval("1 +"), Err(ExpressionError::OperandCount { symbol: '+' }));
    assert_eq!(eval("neg"), Err(ExpressionError::OperandCount { symbol: '-' }));
    assert_eq!(eval("sin"),
               Err(ExpressionError::ArgumentCount { name: "sin".to_string() }));
    assert_eq!(eval("2 pow"),
               Err(ExpressionError::ArgumentCount { name: "pow".to_string() }));
    assert_eq!(eval("1 2"), Err(ExpressionError::LeftoverOperands { count: 2 }));
    assert_eq!(eval(""), Err(ExpressionError::EmptyExpression));
}

#[test]
fn validation_reports_too_many_operators_without_failing() {
    let result = validation("3 +");
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["too many operators"]);
}

#[test]
fn validation_reports_too_many_operands() {
    let result = validation("1 2 3 +");
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["too many operands"]);
}

#[test]
fn validation_reports_insufficient_function_arguments() {
    let result = validation("2 pow");
    assert!(!result.valid);
    assert_eq!(result.errors,
               vec!["insufficient arguments for function 'pow'", "too many operators"]);
}

#[test]
fn validation_reports_every_unbound_variable() {
    let expr = Expression::from_postfix("x y + x *").unwrap();

    let result = expr.validate();
    assert!(!result.valid);
    assert_eq!(result.errors,
               vec!["variable 'x' has not been set",
                    "variable 'y' has not been set",
                    "variable 'x' has not been set"]);

    assert_eq!(expr.validate_with(false), ValidationResult::SUCCESS);
}

#[test]
fn validation_stops_when_the_stack_runs_empty() {
    let result = validation("1 + + 2 3 4");
    assert_eq!(result.errors, vec!["too many operators"]);
}

#[test]
fn validation_of_empty_expression() {
    let result = validation("");
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["empty expression"]);
}

#[test]
fn valid_expression_shares_success_result() {
    assert_eq!(validation("3 4 + 2 *"), ValidationResult::SUCCESS);
    assert!(ValidationResult::SUCCESS.errors.is_empty());
}

#[test]
fn variables_can_be_bound_and_overwritten() {
    let mut expr = Expression::from_postfix("x y *").unwrap();
    expr.set_variable("x", 3.0).unwrap().set_variable("y", 4.0).unwrap();
    assert_eq!(expr.evaluate().unwrap(), 12.0);

    expr.set_variables([("x", 5.0), ("y", 2.0)]).unwrap();
    assert_eq!(expr.evaluate().unwrap(), 10.0);
}

#[test]
fn function_names_are_not_valid_variables() {
    let mut expr = Expression::from_postfix("x").unwrap();
    assert_eq!(expr.set_variable("sin", 1.0).map(|_| ()),
               Err(ExpressionError::InvalidVariableName { name: "sin".to_string() }));

    let double = Function::new("double", 1, |args| args[0] * 2.0);
    let mut custom = Expression::from_postfix_with("x double", &[double]).unwrap();
    assert!(matches!(custom.set_variable("double", 1.0),
                     Err(ExpressionError::InvalidVariableName { .. })));
}

#[test]
fn environment_lists_constants_and_bindings() {
    let mut expr = Expression::from_postfix("x").unwrap();
    expr.set_variable("x", 2.0).unwrap();

    let mut names: Vec<&str> = expr.environment().iter().map(|(name, _)| name).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["e", "pi", "x", "π", "φ"]);
    assert!(expr.environment().iter().any(|binding| binding == ("x", 2.0)));
}

#[test]
fn rejected_variable_batch_binds_nothing() {
    let mut expr = Expression::from_postfix("x").unwrap();
    let result = expr.set_variables([("x", 1.0), ("cos", 2.0)]);
    assert!(result.is_err());
    assert_eq!(expr.variable("x"), None);
}

#[test]
fn copies_have_independent_bindings() {
    let mut original = Expression::from_postfix("x 1 +").unwrap();
    original.set_variable("x", 1.0).unwrap();

    let mut copy = original.clone();
    copy.set_variable("x", 10.0).unwrap();

    assert_eq!(original.variable("x"), Some(1.0));
    assert_eq!(original.evaluate().unwrap(), 2.0);
    assert_eq!(copy.evaluate().unwrap(), 11.0);
}

#[test]
fn display_renders_postfix_text() {
    let expr = Expression::from_postfix("x  2 ^\t3 neg *").unwrap();
    assert_eq!(expr.to_string(), "x 2 ^ 3 neg *");
}

#[test]
fn reader_errors() {
    assert_eq!(Expression::from_postfix("3 $"),
               Err(ReadError::UnexpectedToken { token:    "$".to_string(),
                                                position: 2, }));
}

#[test]
fn reader_accepts_negative_and_special_literals() {
    assert_value("-3 2 *", -6.0);
    assert_value(".5 2 *", 1.0);
    assert_value("1e3 1 +", 1001.0);
    assert_eq!(eval("inf neg").unwrap(), f64::NEG_INFINITY);
    assert!(eval("NaN").unwrap().is_nan());
}

#[test]
fn async_evaluation_on_rayon_pool() {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    let mut expr = Expression::from_postfix("x 2 *").unwrap();
    expr.set_variable("x", 21.0).unwrap();

    let pending = expr.evaluate_async(&pool);
    assert_eq!(pending.wait().unwrap(), 42.0);
}

#[test]
fn async_evaluation_uses_a_snapshot() {
    let mut expr = Expression::from_postfix("x 1 +").unwrap();
    expr.set_variable("x", 1.0).unwrap();

    let pending = expr.evaluate_async(&ThreadSpawner);
    expr.set_variable("x", 100.0).unwrap();

    assert_eq!(pending.wait().unwrap(), 2.0);
}

#[test]
fn async_evaluation_propagates_failures() {
    let expr = Expression::from_postfix("y 1 +").unwrap();
    assert_eq!(expr.evaluate_async(&ThreadSpawner).wait(),
               Err(ExpressionError::UnboundVariable { name: "y".to_string() }));
}

struct Discard;

impl TaskRunner for Discard {
    fn execute(&self, _task: Task) {}
}

#[test]
fn dropped_task_is_reported() {
    let expr = Expression::from_postfix("1").unwrap();
    let pending = expr.evaluate_async(&Discard);
    assert_eq!(pending.try_wait(), Some(Err(ExpressionError::EvaluationAbandoned)));
    assert_eq!(pending.wait(), Err(ExpressionError::EvaluationAbandoned));
}
