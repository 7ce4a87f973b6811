use sexpress::{Error, env::Environment, interpreter::interpret, value::Value};

fn eval(src: &str) -> Result<Value, Error> {
    let mut env = Environment::new();
    interpret(src, &mut env)
}

fn eval_ok(src: &str) -> Value {
    eval(src).unwrap_or_else(|e| panic!("{:?} failed: {}", src, e))
}

#[test]
fn integer_chains_fold_left_to_right() {
    assert!(matches!(eval_ok("(+ 1 2 3 4)"), Value::Int(10)));
    assert!(matches!(eval_ok("(- 20 5 3 2)"), Value::Int(10)));
    assert!(matches!(eval_ok("(* 2 3 4)"), Value::Int(24)));
    assert!(matches!(eval_ok("(/ 100 5 2)"), Value::Int(10)));
}

#[test]
fn nested_forms_compose_innermost_first() {
    assert!(matches!(eval_ok("(+ 1 (* 2 3))"), Value::Int(7)));
    assert!(matches!(eval_ok("(* (+ 1 2) (- 5 3))"), Value::Int(6)));
    assert!(matches!(eval_ok("(+ (* 2 3) (- 10 (/ 8 2)))"), Value::Int(12)));
}

#[test]
fn division_stays_exact_when_it_can() {
    assert!(matches!(eval_ok("(/ 20 4)"), Value::Int(5)));
    assert!(matches!(eval_ok("(/ 7 2)"), Value::Float(x) if x == 3.5));
    assert!(matches!(eval_ok("(/ 7.0 2)"), Value::Float(x) if x == 3.5));
}

#[test]
fn division_by_zero_fails_for_any_operand_types() {
    assert!(matches!(eval("(/ 10 0)"), Err(Error::DivisionByZero)));
    assert!(matches!(eval("(/ 10 0.0)"), Err(Error::DivisionByZero)));
    assert!(matches!(eval("(/ 10.0 0)"), Err(Error::DivisionByZero)));
    assert!(matches!(eval("(/ 100 5 0 2)"), Err(Error::DivisionByZero)));
}

#[test]
fn float_operands_promote_the_result() {
    assert!(matches!(eval_ok("(+ 1 2.5)"), Value::Float(x) if x == 3.5));
    assert!(matches!(eval_ok("(* 2.0 3)"), Value::Float(x) if x == 6.0));
    assert!(matches!(eval_ok("(- 5 0.5)"), Value::Float(x) if x == 4.5));
}

#[test]
fn comparisons_yield_one_or_zero() {
    assert!(matches!(eval_ok("(> 10 5)"), Value::Int(1)));
    assert!(matches!(eval_ok("(< 10 5)"), Value::Int(0)));
    assert!(matches!(eval_ok("(>= 5 5)"), Value::Int(1)));
    assert!(matches!(eval_ok("(<= 5 4)"), Value::Int(0)));
    assert!(matches!(eval_ok("(= 3 3)"), Value::Int(1)));
    assert!(matches!(eval_ok("(= 3 4)"), Value::Int(0)));
    // mixed operands compare numerically
    assert!(matches!(eval_ok("(= 1 1.0)"), Value::Int(1)));
    assert!(matches!(eval_ok("(< 1 1.5)"), Value::Int(1)));
}

#[test]
fn conditionals_follow_numeric_truthiness() {
    assert!(matches!(eval_ok("(if (> 10 5) 1 0)"), Value::Int(1)));
    assert!(matches!(eval_ok("(if (< 10 5) 1 0)"), Value::Int(0)));
    assert!(matches!(eval_ok("(if 7 1 2)"), Value::Int(1)));
    assert!(matches!(eval_ok("(if 0 1 2)"), Value::Int(2)));
    assert!(matches!(eval_ok("(if 0.0 1 2)"), Value::Int(2)));
}

#[test]
fn untaken_branch_never_runs() {
    let mut env = Environment::new();
    interpret("(define flag 1)", &mut env).unwrap();
    let v = interpret("(if flag (define taken 10) (define skipped 20))", &mut env).unwrap();
    assert!(matches!(v, Value::Int(10)));
    assert!(matches!(interpret("taken", &mut env), Ok(Value::Int(10))));
    // the else branch's definition must not have applied
    assert!(matches!(
        interpret("skipped", &mut env),
        Err(Error::UndefinedVariable { name }) if name.as_ref() == "skipped"
    ));
}

#[test]
fn define_returns_the_bound_value_and_rebinds() {
    let mut env = Environment::new();
    assert!(matches!(interpret("(define counter 0)", &mut env), Ok(Value::Int(0))));
    for _ in 0..3 {
        interpret("(define counter (+ counter 1))", &mut env).unwrap();
    }
    assert!(matches!(interpret("counter", &mut env), Ok(Value::Int(3))));
}

#[test]
fn bare_atoms_evaluate_at_top_level() {
    let mut env = Environment::new();
    interpret("(define x 42)", &mut env).unwrap();
    assert!(matches!(interpret("x", &mut env), Ok(Value::Int(42))));
    assert!(matches!(eval_ok("5"), Value::Int(5)));
    assert!(matches!(eval_ok("2.5"), Value::Float(x) if x == 2.5));
}

#[test]
fn definitions_in_argument_position_apply_left_to_right() {
    let mut env = Environment::new();
    let v = interpret("(+ (define a 3) a)", &mut env).unwrap();
    assert!(matches!(v, Value::Int(6)));
}

#[test]
fn multiple_forms_evaluate_in_order() {
    assert!(matches!(eval_ok("(define x 2) (define y 3) (* x y)"), Value::Int(6)));
}

#[test]
fn undefined_variables_are_hard_errors() {
    assert!(matches!(
        eval("mystery"),
        Err(Error::UndefinedVariable { name }) if name.as_ref() == "mystery"
    ));
    assert!(matches!(
        eval("(+ 1 ghost)"),
        Err(Error::UndefinedVariable { name }) if name.as_ref() == "ghost"
    ));
}

#[test]
fn unbalanced_parens_are_syntax_errors() {
    assert!(matches!(eval("(+ 1 2"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(+ 1 2))"), Err(Error::Syntax { .. })));
    assert!(matches!(eval(")"), Err(Error::Syntax { .. })));
}

#[test]
fn malformed_numbers_are_syntax_errors() {
    assert!(matches!(eval("1.2.3"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("12a"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(+ 1 9999999999999999999999)"), Err(Error::Syntax { .. })));
}

#[test]
fn empty_input_is_a_syntax_error() {
    assert!(matches!(eval(""), Err(Error::Syntax { .. })));
    assert!(matches!(eval("   \n\t"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("; only a comment"), Err(Error::Syntax { .. })));
}

#[test]
fn bad_forms_are_syntax_errors() {
    assert!(matches!(eval("()"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(1 2 3)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(frobnicate 1 2)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(if 1 2)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(if 1 2 3 4)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(define x)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(define 3 4)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(define x 1 2)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(define if 3)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(define + 3)"), Err(Error::Syntax { .. })));
}

#[test]
fn operator_arity_is_checked_at_build_time() {
    assert!(matches!(eval("(+ 1)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(- 5)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(> 1 2 3)"), Err(Error::Syntax { .. })));
    assert!(matches!(eval("(= 1)"), Err(Error::Syntax { .. })));
}

#[test]
fn comments_and_signed_literals_lex() {
    assert!(matches!(eval_ok("; setup\n(+ 1 2) ; trailing"), Value::Int(3)));
    assert!(matches!(eval_ok("(+ -3 +3)"), Value::Int(0)));
    assert!(matches!(eval_ok("(- -5 5)"), Value::Int(-10)));
}

#[test]
fn pure_expressions_are_idempotent() {
    let mut env = Environment::new();
    interpret("(define x 4)", &mut env).unwrap();
    let first = interpret("(* x (+ x 1))", &mut env).unwrap();
    let second = interpret("(* x (+ x 1))", &mut env).unwrap();
    assert_eq!(first, second);
    assert!(matches!(first, Value::Int(20)));
}
