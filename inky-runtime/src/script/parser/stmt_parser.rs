//! # 语句解析器
//!
//! ```text
//! stmt       ::= print_stmt | if_stmt
//! print_stmt ::= ('print' | 'println') expr
//! if_stmt    ::= 'if' expr 'then' stmt* ( 'else' stmt* )? 'end'
//! ```
//!
//! `while` / `for` / `func` / `:=` 只有 token，没有语句形式。

use super::Parser;
use crate::error::ParseError;
use crate::script::ast::{Node, Stmts};
use crate::token::TokenKind;

impl Parser {
    /// 解析一条语句
    ///
    /// 当前 token 无法开始语句（包括输入结束）时返回 `Ok(None)`，且不消费任何 token。
    pub fn parse_statement(&mut self) -> Result<Option<Node>, ParseError> {
        if self.is_at_end() {
            return Ok(None);
        }

        if self.check(TokenKind::Print) || self.check(TokenKind::Println) {
            return self.print_stmt().map(Some);
        }
        if let Some(tok) = self.peek().filter(|t| t.kind == TokenKind::If) {
            let line = tok.line;
            return self.nested(line, Self::if_stmt).map(Some);
        }

        Ok(None)
    }

    fn print_stmt(&mut self) -> Result<Node, ParseError> {
        let keyword = self.match_any(&[TokenKind::Print, TokenKind::Println]);
        let (end, line) = match keyword {
            Some(tok) if tok.kind == TokenKind::Println => ("\n", tok.line),
            Some(tok) => ("", tok.line),
            None => ("", self.last_line()),
        };

        let value = self.expression()?;
        Ok(Node::PrintStmt {
            value: Box::new(value),
            end: end.to_string(),
            line,
        })
    }

    fn if_stmt(&mut self) -> Result<Node, ParseError> {
        let keyword = self.expect(TokenKind::If)?;
        let test = self.expression()?;
        self.expect(TokenKind::Then)?;

        let then_block = self.block()?;
        let else_block = match self.match_any(&[TokenKind::Else]) {
            Some(_) => Some(self.block()?),
            None => None,
        };
        self.expect(TokenKind::End)?;

        Ok(Node::IfStmt {
            test: Box::new(test),
            then_block,
            else_block,
            line: keyword.line,
        })
    }

    /// 连续解析语句，直到遇到无法开始语句的 token（如 `else` / `end`）
    fn block(&mut self) -> Result<Stmts, ParseError> {
        let line = self.peek().map_or_else(|| self.last_line(), |t| t.line);
        let mut stmts = Vec::new();
        while let Some(stmt) = self.parse_statement()? {
            stmts.push(stmt);
        }
        Ok(Stmts::new(stmts, line))
    }
}
