use std::fmt::Display;

use crate::lexer::{Token, TokenKind};

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Print(Expression),
    VarDecl(VarDeclStatement),
    Block(BlockStatement),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Expression(Expression),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DeclaredType {
    Int,
    String,
    Bool,
    Char,
}

impl DeclaredType {
    pub fn from_token_kind(kind: TokenKind) -> Option<DeclaredType> {
        match kind {
            TokenKind::TypeInt => Some(DeclaredType::Int),
            TokenKind::TypeString => Some(DeclaredType::String),
            TokenKind::TypeBool => Some(DeclaredType::Bool),
            TokenKind::TypeChar => Some(DeclaredType::Char),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            DeclaredType::Int => "int",
            DeclaredType::String => "string",
            DeclaredType::Bool => "bool",
            DeclaredType::Char => "char",
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct VarDeclStatement {
    pub declared_type: DeclaredType,
    pub name: Token,
    pub initializer: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: BlockStatement,
    /// Either a `Statement::Block` or a chained `Statement::If`.
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: BlockStatement,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ForStatement {
    pub initializer: Expression,
    pub condition: Expression,
    pub increment: Expression,
    pub body: BlockStatement,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Literal(Token),
    Identifier(Token),
    Unary {
        operator: Token,
        operand: Box<Expression>,
    },
    Binary {
        operator: Token,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Assignment {
        name: Token,
        value: Box<Expression>,
    },
}

#[derive(Debug, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for VarDeclStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} = {};",
            self.declared_type.keyword(),
            self.name.lexeme,
            self.initializer
        )
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for statement in &self.statements {
            write!(f, " {}", statement)?;
        }
        write!(f, " }}")
    }
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.then_branch)?;
        if let Some(else_branch) = &self.else_branch {
            write!(f, " else {}", else_branch)?;
        }
        Ok(())
    }
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.body)
    }
}

impl Display for ForStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "for ({}; {}; {}) {}",
            self.initializer, self.condition, self.increment, self.body
        )
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Literal(token) => write!(f, "{}", token.lexeme),
            Identifier(name) => write!(f, "{}", name.lexeme),
            Unary { operator, operand } => write!(f, "({}{})", operator.lexeme, operand),
            Binary {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator.lexeme, right),
            Assignment { name, value } => write!(f, "({} = {})", name.lexeme, value),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            Print(expression) => write!(f, "display({});", expression),
            VarDecl(statement) => write!(f, "{}", statement),
            Block(block) => write!(f, "{}", block),
            If(statement) => write!(f, "{}", statement),
            While(statement) => write!(f, "{}", statement),
            For(statement) => write!(f, "{}", statement),
            Expression(expression) => write!(f, "{};", expression),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}
