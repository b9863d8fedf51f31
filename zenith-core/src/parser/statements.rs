use crate::ast::{
    BlockStatement, DeclaredType, ForStatement, IfStatement, Statement, VarDeclStatement,
    WhileStatement,
};
use crate::lexer::TokenKind;
use crate::parser::expressions::parse_expression;
use crate::parser::{ParseError, Parser};

pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let token = parser.current();
    if let Some(declared_type) = DeclaredType::from_token_kind(token.kind) {
        parser.advance();
        return Ok(Statement::VarDecl(parse_var_decl_statement(
            parser,
            declared_type,
        )?));
    }

    match token.kind {
        TokenKind::Print => Ok(Statement::Print(parse_print_statement(parser)?)),
        TokenKind::If => Ok(Statement::If(parse_if_statement(parser)?)),
        TokenKind::While => Ok(Statement::While(parse_while_statement(parser)?)),
        TokenKind::For => Ok(Statement::For(parse_for_statement(parser)?)),
        TokenKind::LBrace => Ok(Statement::Block(parse_block_statement(parser)?)),
        _ => Ok(Statement::Expression(parse_expression_statement(parser)?)),
    }
}

fn parse_var_decl_statement(
    parser: &mut Parser,
    declared_type: DeclaredType,
) -> Result<VarDeclStatement, ParseError> {
    let name = parser.parse_ident("after type keyword")?;
    parser.expect_token(TokenKind::Assign, "in variable declaration")?;
    let initializer = parse_expression(parser)?;
    parser.expect_token(TokenKind::SemiColon, "after variable declaration")?;

    Ok(VarDeclStatement {
        declared_type,
        name,
        initializer,
    })
}

fn parse_print_statement(parser: &mut Parser) -> Result<crate::ast::Expression, ParseError> {
    parser.expect_token(TokenKind::Print, "to start display statement")?;
    parser.expect_token(TokenKind::LParen, "after 'display'")?;
    let value = parse_expression(parser)?;
    parser.expect_token(TokenKind::RParen, "after display argument")?;
    parser.expect_token(TokenKind::SemiColon, "after display statement")?;

    Ok(value)
}

fn parse_if_statement(parser: &mut Parser) -> Result<IfStatement, ParseError> {
    parser.expect_token(TokenKind::If, "to start if statement")?;
    parser.expect_token(TokenKind::LParen, "after 'if'")?;
    let condition = parse_expression(parser)?;
    parser.expect_token(TokenKind::RParen, "after if condition")?;

    let then_branch = parse_block_statement(parser)?;

    let else_branch = if parser.match_token(TokenKind::Else).is_some() {
        let branch = if parser.check(TokenKind::If) {
            Statement::If(parse_if_statement(parser)?)
        } else {
            Statement::Block(parse_block_statement(parser)?)
        };
        Some(Box::new(branch))
    } else {
        None
    };

    Ok(IfStatement {
        condition,
        then_branch,
        else_branch,
    })
}

fn parse_while_statement(parser: &mut Parser) -> Result<WhileStatement, ParseError> {
    parser.expect_token(TokenKind::While, "to start while statement")?;
    parser.expect_token(TokenKind::LParen, "after 'while'")?;
    let condition = parse_expression(parser)?;
    parser.expect_token(TokenKind::RParen, "after while condition")?;
    let body = parse_block_statement(parser)?;

    Ok(WhileStatement { condition, body })
}

// The clauses are plain expressions: a loop cannot declare its own counter.
fn parse_for_statement(parser: &mut Parser) -> Result<ForStatement, ParseError> {
    parser.expect_token(TokenKind::For, "to start for statement")?;
    parser.expect_token(TokenKind::LParen, "after 'for'")?;
    let initializer = parse_expression(parser)?;
    parser.expect_token(TokenKind::SemiColon, "after for initializer")?;
    let condition = parse_expression(parser)?;
    parser.expect_token(TokenKind::SemiColon, "after for condition")?;
    let increment = parse_expression(parser)?;
    parser.expect_token(TokenKind::RParen, "after for clauses")?;
    let body = parse_block_statement(parser)?;

    Ok(ForStatement {
        initializer,
        condition,
        increment,
        body,
    })
}

fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    parser.expect_token(TokenKind::LBrace, "to start block")?;

    let mut statements = Vec::new();
    while !parser.check(TokenKind::RBrace) && !parser.check(TokenKind::EndOfInput) {
        statements.push(parse_statement(parser)?);
    }
    parser.expect_token(TokenKind::RBrace, "to close block")?;

    Ok(BlockStatement { statements })
}

fn parse_expression_statement(parser: &mut Parser) -> Result<crate::ast::Expression, ParseError> {
    let expression = parse_expression(parser)?;
    parser.expect_token(TokenKind::SemiColon, "after expression")?;

    Ok(expression)
}
