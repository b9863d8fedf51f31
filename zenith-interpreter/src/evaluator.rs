use std::io::Write;

use log::trace;
use zenith_core::ast::{
    BlockStatement, Expression, ForStatement, IfStatement, Program, Statement, VarDeclStatement,
    WhileStatement,
};
use zenith_core::lexer::{Token, TokenKind};

use crate::environment::Environment;
use crate::error::{RuntimeError, TypeError};
use crate::value::Value;

/// Runs every top-level statement against `environment`, writing `display`
/// output to `output`. Stops at the first runtime error.
pub fn eval_program(
    program: &Program,
    environment: &Environment<'_>,
    output: &mut dyn Write,
) -> Result<(), RuntimeError> {
    for statement in &program.statements {
        eval_statement(statement, environment, output)?;
    }
    Ok(())
}

fn eval_statement(
    statement: &Statement,
    environment: &Environment<'_>,
    output: &mut dyn Write,
) -> Result<(), RuntimeError> {
    trace!("executing {}", statement);
    match statement {
        Statement::Print(expression) => eval_print_statement(expression, environment, output),
        Statement::VarDecl(statement) => eval_var_decl_statement(statement, environment),
        Statement::Block(block) => eval_block_statement(block, environment, output),
        Statement::If(statement) => eval_if_statement(statement, environment, output),
        Statement::While(statement) => eval_while_statement(statement, environment, output),
        Statement::For(statement) => eval_for_statement(statement, environment, output),
        Statement::Expression(expression) => {
            eval_expression(expression, environment)?;
            Ok(())
        }
    }
}

fn eval_print_statement(
    expression: &Expression,
    environment: &Environment<'_>,
    output: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let value = eval_expression(expression, environment)?;
    writeln!(output, "{}", value)?;
    Ok(())
}

fn eval_var_decl_statement(
    statement: &VarDeclStatement,
    environment: &Environment<'_>,
) -> Result<(), RuntimeError> {
    let name = &statement.name;
    let value = eval_expression(&statement.initializer, environment)?;

    if !value.has_type(statement.declared_type) {
        return Err(TypeError::DeclaredTypeMismatch {
            name: name.lexeme.clone(),
            declared: statement.declared_type,
            found: value.type_name(),
        }
        .at(name.line));
    }

    trace!("define {} = {}", name.lexeme, value);
    environment
        .define(name.lexeme.clone(), value)
        .map_err(|error| error.at(name.line))
}

fn eval_block_statement(
    block: &BlockStatement,
    environment: &Environment<'_>,
    output: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let scope = Environment::new_enclosed(environment);
    for statement in &block.statements {
        eval_statement(statement, &scope, output)?;
    }
    Ok(())
}

fn eval_if_statement(
    statement: &IfStatement,
    environment: &Environment<'_>,
    output: &mut dyn Write,
) -> Result<(), RuntimeError> {
    if eval_expression(&statement.condition, environment)?.is_truthy() {
        eval_block_statement(&statement.then_branch, environment, output)
    } else if let Some(else_branch) = &statement.else_branch {
        eval_statement(else_branch, environment, output)
    } else {
        Ok(())
    }
}

fn eval_while_statement(
    statement: &WhileStatement,
    environment: &Environment<'_>,
    output: &mut dyn Write,
) -> Result<(), RuntimeError> {
    while eval_expression(&statement.condition, environment)?.is_truthy() {
        eval_block_statement(&statement.body, environment, output)?;
    }
    Ok(())
}

fn eval_for_statement(
    statement: &ForStatement,
    environment: &Environment<'_>,
    output: &mut dyn Write,
) -> Result<(), RuntimeError> {
    eval_expression(&statement.initializer, environment)?;
    while eval_expression(&statement.condition, environment)?.is_truthy() {
        eval_block_statement(&statement.body, environment, output)?;
        eval_expression(&statement.increment, environment)?;
    }
    Ok(())
}

fn eval_expression(
    expression: &Expression,
    environment: &Environment<'_>,
) -> Result<Value, RuntimeError> {
    match expression {
        Expression::Literal(token) => Value::from_literal(token)
            .ok_or_else(|| TypeError::InvalidLiteral(token.lexeme.clone()).at(token.line)),
        Expression::Identifier(name) => environment
            .get(&name.lexeme)
            .map_err(|error| error.at(name.line)),
        Expression::Assignment { name, value } => {
            let value = eval_expression(value, environment)?;
            trace!("assign {} = {}", name.lexeme, value);
            environment
                .assign(&name.lexeme, value.clone())
                .map_err(|error| error.at(name.line))?;
            Ok(value)
        }
        Expression::Unary { operator, operand } => {
            let operand = eval_expression(operand, environment)?;
            eval_unary_operation(operator, operand)
        }
        Expression::Binary {
            operator,
            left,
            right,
        } => match operator.kind {
            TokenKind::And => {
                let left = eval_expression(left, environment)?;
                if !left.is_truthy() {
                    return Ok(left);
                }
                eval_expression(right, environment)
            }
            TokenKind::Or => {
                let left = eval_expression(left, environment)?;
                if left.is_truthy() {
                    return Ok(left);
                }
                eval_expression(right, environment)
            }
            _ => {
                let left = eval_expression(left, environment)?;
                let right = eval_expression(right, environment)?;
                eval_binary_operation(operator, left, right)
            }
        },
    }
}

fn eval_unary_operation(operator: &Token, operand: Value) -> Result<Value, RuntimeError> {
    match (operator.kind, &operand) {
        (TokenKind::Bang, _) => Ok(Value::Bool(!operand.is_truthy())),
        (TokenKind::Minus, Value::Int(value)) => value.checked_neg().map(Value::Int).ok_or_else(
            || {
                TypeError::IntegerOverflow {
                    operator: operator.lexeme.clone(),
                }
                .at(operator.line)
            },
        ),
        _ => Err(TypeError::OperandTypeMismatch {
            operator: operator.lexeme.clone(),
            expected: "int",
            found: operand.type_name().to_owned(),
        }
        .at(operator.line)),
    }
}

fn eval_binary_operation(
    operator: &Token,
    left: Value,
    right: Value,
) -> Result<Value, RuntimeError> {
    let overflow = || {
        TypeError::IntegerOverflow {
            operator: operator.lexeme.clone(),
        }
        .at(operator.line)
    };
    let mismatch = |expected: &'static str| {
        TypeError::OperandTypeMismatch {
            operator: operator.lexeme.clone(),
            expected,
            found: format!("{} and {}", left.type_name(), right.type_name()),
        }
        .at(operator.line)
    };

    match (operator.kind, &left, &right) {
        (TokenKind::Plus, Value::Int(l), Value::Int(r)) => {
            l.checked_add(*r).map(Value::Int).ok_or_else(overflow)
        }
        (TokenKind::Plus, Value::String(l), Value::String(r)) => {
            Ok(Value::String(format!("{}{}", l, r)))
        }
        (TokenKind::Plus, _, _) => Err(mismatch("two ints or two strings")),
        (TokenKind::Minus, Value::Int(l), Value::Int(r)) => {
            l.checked_sub(*r).map(Value::Int).ok_or_else(overflow)
        }
        (TokenKind::Asterisk, Value::Int(l), Value::Int(r)) => {
            l.checked_mul(*r).map(Value::Int).ok_or_else(overflow)
        }
        (TokenKind::Slash, Value::Int(_), Value::Int(0)) => {
            Err(TypeError::DivisionByZero.at(operator.line))
        }
        (TokenKind::Slash, Value::Int(l), Value::Int(r)) => {
            l.checked_div(*r).map(Value::Int).ok_or_else(overflow)
        }
        (TokenKind::GreaterThan, Value::Int(l), Value::Int(r)) => Ok(Value::Bool(l > r)),
        (TokenKind::GreaterEqual, Value::Int(l), Value::Int(r)) => Ok(Value::Bool(l >= r)),
        (TokenKind::LessThan, Value::Int(l), Value::Int(r)) => Ok(Value::Bool(l < r)),
        (TokenKind::LessEqual, Value::Int(l), Value::Int(r)) => Ok(Value::Bool(l <= r)),
        (TokenKind::Equal, _, _) => Ok(Value::Bool(left == right)),
        (TokenKind::NotEqual, _, _) => Ok(Value::Bool(left != right)),
        _ => Err(mismatch("two ints")),
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io::{self, Write};
    use std::sync::Arc;

    use zenith_core::ast::DeclaredType;
    use zenith_core::lexer::scan_tokens;
    use zenith_core::parser::Parser;

    use crate::environment::Environment;
    use crate::error::{NameError, RuntimeError, TypeError};

    fn run(input: &str) -> (String, Result<(), RuntimeError>) {
        let tokens = scan_tokens(input).unwrap();
        let program = Parser::new(tokens).parse_program().unwrap();
        let mut output = Vec::new();
        let result = super::eval_program(&program, &Environment::new(), &mut output);

        (String::from_utf8(output).unwrap(), result)
    }

    fn test_output(inputs: Vec<(&str, &str)>) {
        for (input, expected) in inputs {
            let (output, result) = run(input);

            assert_eq!(result, Ok(()), "program: {}", input);
            assert_eq!(output, expected, "program: {}", input);
        }
    }

    fn test_errors(inputs: Vec<(&str, RuntimeError)>) {
        for (input, expected) in inputs {
            let (_, result) = run(input);

            assert_eq!(result, Err(expected), "program: {}", input);
        }
    }

    #[test]
    fn test_literal() {
        let inputs = vec![
            ("display(5);", "5\n"),
            ("display(-5);", "-5\n"),
            ("display(true);", "true\n"),
            ("display(false);", "false\n"),
            ("display(\"hello\");", "hello\n"),
            ("display(\"\");", "\n"),
            ("display('c');", "c\n"),
            ("display(null);", "null\n"),
        ];

        test_output(inputs);
    }

    #[test]
    fn test_arithmetic() {
        let inputs = vec![
            ("display(2 + 3 * 4);", "14\n"),
            ("display((2 + 3) * 4);", "20\n"),
            ("display(10 - 2 - 3);", "5\n"),
            ("display(7 / 2);", "3\n"),
            ("display(-7 / 2);", "-3\n"),
            ("display(--5);", "5\n"),
            ("display(\"ab\" + \"cd\");", "abcd\n"),
        ];

        test_output(inputs);
    }

    #[test]
    fn test_comparison_and_equality() {
        let inputs = vec![
            ("display(1 < 2);", "true\n"),
            ("display(2 <= 2);", "true\n"),
            ("display(1 > 2);", "false\n"),
            ("display(3 >= 4);", "false\n"),
            ("display(1 == 1);", "true\n"),
            ("display(1 != 1);", "false\n"),
            ("display(1 == true);", "false\n"),
            ("display(0 == false);", "false\n"),
            ("display(null == null);", "true\n"),
            ("display(\"zen\" == \"zen\");", "true\n"),
            ("display('a' != 'b');", "true\n"),
            ("display('a' == \"a\");", "false\n"),
        ];

        test_output(inputs);
    }

    #[test]
    fn test_truthiness() {
        let inputs = vec![
            ("display(!0);", "false\n"),
            ("display(!\"\");", "false\n"),
            ("display(!null);", "true\n"),
            ("display(!!true);", "true\n"),
            ("if (0) { display(\"zero is truthy\"); }", "zero is truthy\n"),
            ("if (null) { display(1); } else { display(2); }", "2\n"),
        ];

        test_output(inputs);
    }

    #[test]
    fn test_logical_operators() {
        let inputs = vec![
            ("display(1 and 2);", "2\n"),
            ("display(null and 2);", "null\n"),
            ("display(false or \"fallback\");", "fallback\n"),
            ("display(0 or 1);", "0\n"),
            ("display(false and missing);", "false\n"),
            ("display(true or missing);", "true\n"),
            (
                "int n = 0; false and (n = 1); true or (n = 2); display(n);",
                "0\n",
            ),
            ("int n = 0; true and (n = 1); display(n);", "1\n"),
        ];

        test_output(inputs);
    }

    #[test]
    fn test_declarations_and_assignment() {
        let inputs = vec![
            ("int a = 5; display(a);", "5\n"),
            ("int a = 5 * 5; int b = a + 1; display(b);", "26\n"),
            ("string s = \"x\"; s = s + \"y\"; display(s);", "xy\n"),
            ("int a = 0; int b = 0; a = b = 3; display(a); display(b);", "3\n3\n"),
            ("int a = 1; display(a = 2);", "2\n"),
            ("bool done = 1 > 2; display(done);", "false\n"),
            ("char c = 'q'; display(c);", "q\n"),
            ("int x = 1; x = \"retyped\"; display(x);", "retyped\n"),
        ];

        test_output(inputs);
    }

    #[test]
    fn test_scoping() {
        let inputs = vec![
            (
                "int x = 1; { int x = 2; display(x); } display(x);",
                "2\n1\n",
            ),
            ("int x = 1; { x = 2; } display(x);", "2\n"),
            ("{ int x = 1; } { int x = 2; display(x); }", "2\n"),
            (
                "int x = 1; { int y = x + 1; { display(x + y); } }",
                "3\n",
            ),
        ];

        test_output(inputs);
    }

    #[test]
    fn test_control_flow() {
        let inputs = vec![
            ("if (1 < 2) { display(\"yes\"); }", "yes\n"),
            ("if (1 > 2) { display(\"yes\"); }", ""),
            (
                "int x = 5; if (x < 3) { display(1); } else if (x < 10) { display(2); } else { display(3); }",
                "2\n",
            ),
            (
                "int i = 0; while (i < 3) { int sq = i * i; display(sq); i = i + 1; }",
                "0\n1\n4\n",
            ),
            ("while (false) { display(1); }", ""),
            (
                "int i = 0; for (i = 0; i < 3; i = i + 1) { display(i); } display(i);",
                "0\n1\n2\n3\n",
            ),
            (
                "int total = 0; int i = 0; for (i = 1; i <= 4; i = i + 1) { total = total + i; } display(total);",
                "10\n",
            ),
        ];

        test_output(inputs);
    }

    #[test]
    fn test_name_errors() {
        let inputs = vec![
            (
                "display(x);",
                NameError::UndefinedVariable("x".into()).at(1),
            ),
            ("y = 1;", NameError::UndefinedVariable("y".into()).at(1)),
            (
                "int x = 1;\nint x = 2;",
                NameError::Redeclaration("x".into()).at(2),
            ),
            (
                "{ int inner = 1; }\ndisplay(inner);",
                NameError::UndefinedVariable("inner".into()).at(2),
            ),
        ];

        test_errors(inputs);
    }

    #[test]
    fn test_type_errors() {
        let inputs = vec![
            (
                "int x = \"five\";",
                TypeError::DeclaredTypeMismatch {
                    name: "x".into(),
                    declared: DeclaredType::Int,
                    found: "string",
                }
                .at(1),
            ),
            (
                "char c = \"c\";",
                TypeError::DeclaredTypeMismatch {
                    name: "c".into(),
                    declared: DeclaredType::Char,
                    found: "string",
                }
                .at(1),
            ),
            (
                "bool b = null;",
                TypeError::DeclaredTypeMismatch {
                    name: "b".into(),
                    declared: DeclaredType::Bool,
                    found: "null",
                }
                .at(1),
            ),
            ("\n\ndisplay(10 / 0);", TypeError::DivisionByZero.at(3)),
            (
                "display(1 + \"a\");",
                TypeError::OperandTypeMismatch {
                    operator: "+".into(),
                    expected: "two ints or two strings",
                    found: "int and string".to_owned(),
                }
                .at(1),
            ),
            (
                "display(\"a\" < \"b\");",
                TypeError::OperandTypeMismatch {
                    operator: "<".into(),
                    expected: "two ints",
                    found: "string and string".to_owned(),
                }
                .at(1),
            ),
            (
                "display(-true);",
                TypeError::OperandTypeMismatch {
                    operator: "-".into(),
                    expected: "int",
                    found: "bool".to_owned(),
                }
                .at(1),
            ),
            (
                "display(9223372036854775807 + 1);",
                TypeError::IntegerOverflow {
                    operator: "+".into(),
                }
                .at(1),
            ),
        ];

        test_errors(inputs);
    }

    #[test]
    fn test_output_before_error_is_kept() {
        let (output, result) = run("display(1);\ndisplay(missing);\ndisplay(3);");

        assert_eq!(output, "1\n");
        assert_eq!(
            result,
            Err(NameError::UndefinedVariable("missing".into()).at(2))
        );
    }

    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_failure_keeps_io_error() {
        let tokens = scan_tokens("int x = 1;\ndisplay(x);").unwrap();
        let program = Parser::new(tokens).parse_program().unwrap();
        let error = super::eval_program(&program, &Environment::new(), &mut ClosedOutput)
            .unwrap_err();

        assert!(matches!(error, RuntimeError::Output(_)));
        assert_eq!(
            error.to_string(),
            "IOError: could not write output: output closed"
        );

        let source = error.source().unwrap();
        let io_error = source.downcast_ref::<Arc<io::Error>>().unwrap();
        assert_eq!(io_error.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_error_rendering() {
        let inputs = vec![
            (
                "display(x);",
                "[line 1] NameError: Undefined variable 'x'.",
            ),
            (
                "int a = 1;\nint a = 2;",
                "[line 2] NameError: Redeclaration of variable 'a'.",
            ),
            (
                "int x = \"five\";",
                "[line 1] TypeError: Cannot initialize 'x' of type int with a value of type string.",
            ),
            ("display(1 / 0);", "[line 1] TypeError: Division by zero."),
        ];

        for (input, expected) in inputs {
            let (_, result) = run(input);
            let error = result.unwrap_err();

            assert_eq!(error.to_string(), expected);
        }
    }
}
