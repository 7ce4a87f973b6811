use crate::{Error, env::Environment, expr::{BuiltinOp, Expr}, value::Value};

/// Evaluate one expression against an environment: structural case
/// analysis over the expression variants, recursing into children.
pub fn eval_expr(expr: &Expr, env: &mut Environment) -> Result<Value, Error> {
    match expr {
        Expr::Literal { value } => Ok(*value),
        Expr::Reference { name } => env.lookup(name),
        Expr::Definition { name, value } => {
            let result = eval_expr(value, env)?;
            env.define(name.clone(), result);
            Ok(result)
        }
        // only the taken branch runs; the other may contain definitions
        // that must not apply
        Expr::Conditional { test, then_branch, else_branch } => {
            if eval_expr(test, env)?.truthy() {
                eval_expr(then_branch, env)
            } else {
                eval_expr(else_branch, env)
            }
        }
        Expr::Application { op, args } => eval_application(*op, args, env),
    }
}

// Arguments evaluate left to right before the operator applies; the
// order is observable through definitions in argument position.
fn eval_application(op: BuiltinOp, args: &[Expr], env: &mut Environment) -> Result<Value, Error> {
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(eval_expr(arg, env)?);
    }
    use BuiltinOp::*;
    match op {
        Add => Ok(fold(&values, |a, b| a + b)),
        Sub => Ok(fold(&values, |a, b| a - b)),
        Mul => Ok(fold(&values, |a, b| a * b)),
        Div => {
            let mut acc = values[0];
            for v in &values[1..] {
                acc = (acc / *v)?;
            }
            Ok(acc)
        }
        Gt => Ok(Value::from(values[0] > values[1])),
        Lt => Ok(Value::from(values[0] < values[1])),
        Ge => Ok(Value::from(values[0] >= values[1])),
        Le => Ok(Value::from(values[0] <= values[1])),
        Eq => Ok(Value::from(values[0] == values[1])),
    }
}

// arity is checked at build time: arithmetic and comparison operators
// both have at least two arguments here
fn fold(values: &[Value], f: impl Fn(Value, Value) -> Value) -> Value {
    let mut acc = values[0];
    for v in &values[1..] {
        acc = f(acc, *v);
    }
    acc
}
