//! # 表达式解析器
//!
//! 优先级从低到高：
//!
//! ```text
//! expr           ::= or_logical
//! or_logical     ::= and_logical ( 'or' and_logical )*
//! and_logical    ::= equality ( 'and' equality )*
//! equality       ::= comparison ( ('=='|'~=') comparison )*
//! comparison     ::= addition ( ('>'|'>='|'<'|'<=') addition )*
//! addition       ::= multiplication ( ('+'|'-') multiplication )*
//! multiplication ::= modulo ( ('*'|'/') modulo )*
//! modulo         ::= unary ( '%' unary )*
//! unary          ::= ('~'|'-'|'+') unary | exponent
//! exponent       ::= primary ( '^' exponent )?
//! primary        ::= INTEGER | FLOAT | TRUE | FALSE | STRING | '(' expr ')'
//! ```
//!
//! `^` 右结合，其余二元运算左结合。
//!
//! 括号、前缀运算符与 `^` 的递归都计入嵌套深度，超过
//! [`MAX_NESTING`](super::MAX_NESTING) 时报错而不是耗尽栈。

use super::Parser;
use crate::error::ParseError;
use crate::script::ast::Node;
use crate::token::TokenKind;

impl Parser {
    pub(super) fn expression(&mut self) -> Result<Node, ParseError> {
        self.or_logical()
    }

    /// 解析 or 表达式（最低优先级）
    fn or_logical(&mut self) -> Result<Node, ParseError> {
        let mut expr = self.and_logical()?;
        while let Some(op) = self.match_any(&[TokenKind::Or]) {
            let right = self.and_logical()?;
            expr = Node::logical(op, expr, right);
        }
        Ok(expr)
    }

    fn and_logical(&mut self) -> Result<Node, ParseError> {
        let mut expr = self.equality()?;
        while let Some(op) = self.match_any(&[TokenKind::And]) {
            let right = self.equality()?;
            expr = Node::logical(op, expr, right);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Node, ParseError> {
        let mut expr = self.comparison()?;
        while let Some(op) = self.match_any(&[TokenKind::Eq, TokenKind::Ne]) {
            let right = self.comparison()?;
            expr = Node::binary(op, expr, right);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Node, ParseError> {
        let mut expr = self.addition()?;
        while let Some(op) = self.match_any(&[
            TokenKind::Gt,
            TokenKind::Ge,
            TokenKind::Lt,
            TokenKind::Le,
        ]) {
            let right = self.addition()?;
            expr = Node::binary(op, expr, right);
        }
        Ok(expr)
    }

    fn addition(&mut self) -> Result<Node, ParseError> {
        let mut expr = self.multiplication()?;
        while let Some(op) = self.match_any(&[TokenKind::Plus, TokenKind::Minus]) {
            let right = self.multiplication()?;
            expr = Node::binary(op, expr, right);
        }
        Ok(expr)
    }

    fn multiplication(&mut self) -> Result<Node, ParseError> {
        let mut expr = self.modulo()?;
        while let Some(op) = self.match_any(&[TokenKind::Star, TokenKind::Slash]) {
            let right = self.modulo()?;
            expr = Node::binary(op, expr, right);
        }
        Ok(expr)
    }

    fn modulo(&mut self) -> Result<Node, ParseError> {
        let mut expr = self.unary()?;
        while let Some(op) = self.match_any(&[TokenKind::Mod]) {
            let right = self.unary()?;
            expr = Node::binary(op, expr, right);
        }
        Ok(expr)
    }

    /// 前缀运算符可以叠加，例如 `~-5`
    fn unary(&mut self) -> Result<Node, ParseError> {
        if let Some(op) = self.match_any(&[TokenKind::Not, TokenKind::Minus, TokenKind::Plus]) {
            let operand = self.nested(op.line, Self::unary)?;
            return Ok(Node::unary(op, operand));
        }
        self.exponent()
    }

    /// 右结合：`2^3^2` 解析为 `2^(3^2)`
    fn exponent(&mut self) -> Result<Node, ParseError> {
        let base = self.primary()?;
        if let Some(op) = self.match_any(&[TokenKind::Caret]) {
            let power = self.nested(op.line, Self::exponent)?;
            return Ok(Node::binary(op, base, power));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let Some(tok) = self.advance() else {
            return Err(ParseError::UnexpectedEof {
                expected: "表达式".to_string(),
                line: self.last_line(),
            });
        };

        let line = tok.line;
        match tok.kind {
            TokenKind::Integer => match tok.lexeme.parse::<i64>() {
                Ok(value) => Ok(Node::Integer { value, line }),
                // 超出 i64 的整数直接按浮点数保存，求值时本来也会加宽
                Err(_) => parse_float(&tok.lexeme, line),
            },
            TokenKind::Float => parse_float(&tok.lexeme, line),
            TokenKind::True => Ok(Node::Bool { value: true, line }),
            TokenKind::False => Ok(Node::Bool { value: false, line }),
            TokenKind::String => Ok(Node::String {
                value: strip_quotes(&tok.lexeme).to_string(),
                line,
            }),
            TokenKind::LParen => {
                let expr = self.nested(line, Self::expression)?;
                self.expect(TokenKind::RParen)?;
                Ok(Node::grouping(expr, line))
            }
            _ => {
                // 回退，让调用方看到原 token
                self.current -= 1;
                Err(ParseError::ExpectedExpression {
                    found: tok.lexeme,
                    line,
                })
            }
        }
    }
}

fn parse_float(lexeme: &str, line: usize) -> Result<Node, ParseError> {
    let value = lexeme
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            lexeme: lexeme.to_string(),
            line,
        })?;
    Ok(Node::Float { value, line })
}

/// 去掉字符串 lexeme 两端的引号
fn strip_quotes(lexeme: &str) -> &str {
    if lexeme.len() >= 2 {
        &lexeme[1..lexeme.len() - 1]
    } else {
        lexeme
    }
}
