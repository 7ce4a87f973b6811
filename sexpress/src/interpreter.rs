use crate::{Error, ast, env::Environment, eval::eval_expr, lexer::Lexer, parser::Parser, value::Value};

/// Run a source string against an environment: lex, read, build and
/// evaluate each top-level form in order. The value of the last form is
/// the value of the input.
pub fn interpret(src: &str, env: &mut Environment) -> Result<Value, Error> {
    let mut lexer = Lexer::new(src);
    lexer.lex()?;
    let mut parser = Parser::new(lexer.into_tokens());
    let forms = parser.parse()?;
    // parse() rejects empty input, so the loop always assigns
    let mut result = Value::Int(0);
    for form in &forms {
        let expr = ast::build(form)?;
        result = eval_expr(&expr, env)?;
    }
    Ok(result)
}
