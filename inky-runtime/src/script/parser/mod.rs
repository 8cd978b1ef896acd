//! # Parser 模块
//!
//! 手写递归下降解析器：`Vec<Token>` → AST。
//!
//! ## 架构
//!
//! ```text
//! tokens → [语句层: stmt_parser] → Stmts
//!                  │
//!                  └─► [表达式层: expr_parser] → Node
//! ```
//!
//! 单游标、无回溯、一个 token 的向前看。
//!
//! ## 模块结构
//!
//! - `helpers`: 游标操作（peek / advance / expect）与嵌套深度
//! - `expr_parser`: 表达式优先级链
//! - `stmt_parser`: 语句与语句块

mod expr_parser;
mod helpers;
mod stmt_parser;


use tracing::debug;

use crate::error::ParseError;
use crate::script::ast::{Node, Stmts};
use crate::token::Token;

/// 最大嵌套深度（括号、前缀运算符、`^` 链与 `if` 各计一层）
pub const MAX_NESTING: usize = 128;

/// 语法解析器
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    /// 创建新的解析器
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// 解析完整程序
    ///
    /// ```text
    /// program ::= stmt*
    /// ```
    ///
    /// 返回值总是 `Node::Stmts`。遇到无法开始语句的 token 时，
    /// 如果它后面还有内容，返回 `ParseError::UnexpectedToken`。
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let line = self.peek().map_or(1, |t| t.line);
        let mut stmts = Vec::new();
        while let Some(stmt) = self.parse_statement()? {
            stmts.push(stmt);
        }

        if let Some(tok) = self.peek() {
            return Err(ParseError::UnexpectedToken {
                lexeme: tok.lexeme.clone(),
                line: tok.line,
            });
        }

        debug!(statements = stmts.len(), "语法解析完成");
        Ok(Node::Stmts(Stmts::new(stmts, line)))
    }

    /// 将整个 token 流解析为单个表达式
    ///
    /// 表达式之后残留的 token 视为错误。
    pub fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let expr = self.expression()?;
        if let Some(tok) = self.peek() {
            return Err(ParseError::UnexpectedToken {
                lexeme: tok.lexeme.clone(),
                line: tok.line,
            });
        }
        Ok(expr)
    }
}

/// 便捷函数：解析 token 序列为程序
pub fn parse(tokens: Vec<Token>) -> Result<Node, ParseError> {
    Parser::new(tokens).parse()
}
