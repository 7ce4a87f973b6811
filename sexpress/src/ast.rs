use crate::{Error, expr::{BuiltinOp, Expr}, parser::SExpr, value::Value};

/// Turn a read form into a typed expression, dispatching on the head
/// symbol of each sequence.
pub fn build(form: &SExpr) -> Result<Expr, Error> {
    match form {
        SExpr::Int(n) => Ok(Expr::Literal { value: Value::Int(*n) }),
        SExpr::Float(x) => Ok(Expr::Literal { value: Value::Float(*x) }),
        SExpr::Symbol(name) => Ok(Expr::Reference { name: name.clone() }),
        SExpr::List(items) => build_form(items, form),
    }
}

fn build_form(items: &[SExpr], form: &SExpr) -> Result<Expr, Error> {
    let head = match items.first() {
        Some(SExpr::Symbol(s)) => s,
        Some(_) => return Err(Error::syntax_no_pos(
            format!("head of form {} is not a keyword or operator", form))),
        None => return Err(Error::syntax_no_pos("empty form '()'")),
    };
    let rest = &items[1..];
    match head.as_ref() {
        "define" => build_define(rest, form),
        "if" => build_if(rest, form),
        op => match op.parse::<BuiltinOp>() {
            Ok(op) => build_application(op, rest, form),
            Err(_) => Err(Error::syntax_no_pos(format!("unknown operator '{}' in {}", op, form))),
        }
    }
}

fn build_define(rest: &[SExpr], form: &SExpr) -> Result<Expr, Error> {
    match rest {
        [SExpr::Symbol(name), value] => {
            // a binding named after a keyword or operator could never
            // be applied, so reject it up front
            if is_reserved(name) {
                return Err(Error::syntax_no_pos(format!("cannot define reserved name '{}'", name)));
            }
            Ok(Expr::Definition { name: name.clone(), value: Box::new(build(value)?) })
        }
        [_, _] => Err(Error::syntax_no_pos(
            format!("define target in {} is not a symbol", form))),
        _ => Err(Error::syntax_no_pos(
            format!("define takes a symbol and one expression, got {}", form))),
    }
}

fn build_if(rest: &[SExpr], form: &SExpr) -> Result<Expr, Error> {
    match rest {
        [test, then_branch, else_branch] => Ok(Expr::Conditional {
            test: Box::new(build(test)?),
            then_branch: Box::new(build(then_branch)?),
            else_branch: Box::new(build(else_branch)?),
        }),
        _ => Err(Error::syntax_no_pos(
            format!("if takes a test and two branches, got {}", form))),
    }
}

fn build_application(op: BuiltinOp, rest: &[SExpr], form: &SExpr) -> Result<Expr, Error> {
    if op.is_variadic() {
        if rest.len() < 2 {
            return Err(Error::syntax_no_pos(
                format!("operator {} takes at least two arguments, got {}", op, form)));
        }
    } else if rest.len() != 2 {
        return Err(Error::syntax_no_pos(
            format!("operator {} takes exactly two arguments, got {}", op, form)));
    }
    let mut args = Vec::with_capacity(rest.len());
    for item in rest {
        args.push(build(item)?);
    }
    Ok(Expr::Application { op, args })
}

fn is_reserved(name: &str) -> bool {
    matches!(name, "define" | "if") || name.parse::<BuiltinOp>().is_ok()
}
