//! # Engine 模块
//!
//! 逐行前端使用的完整流水线。
//!
//! ## 执行模型
//!
//! ```text
//! run_source(source) -> Outcome
//! ```
//!
//! 1. 词法扫描；没有任何 token（空行、纯注释）时返回 `Outcome::Empty`
//! 2. 首个 token 为 `print` / `println` / `if` 时按程序解析并执行
//! 3. 否则按单个表达式解析并求值，返回其值
//!
//! 每次调用互相独立，出错时不返回部分结果。

use std::io::Write;

use tracing::debug;

use crate::error::{InkyResult, ParseError};
use crate::lexer::tokenize;
use crate::runtime::interpreter::Interpreter;
use crate::script::Parser;
use crate::script::ast::Node;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// 一次执行的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 没有可执行的内容
    Empty,
    /// 表达式的值
    Value(Value),
    /// 语句已执行（输出已写入输出端）
    Executed,
}

/// token 序列是否以语句关键字开头
pub fn starts_statement(tokens: &[Token]) -> bool {
    tokens.first().is_some_and(|t| {
        matches!(
            t.kind,
            TokenKind::Print | TokenKind::Println | TokenKind::If
        )
    })
}

/// 按首个 token 选择程序或表达式进行解析
///
/// 空 token 序列返回 `Ok(None)`。
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Option<Node>, ParseError> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let is_program = starts_statement(&tokens);
    let mut parser = Parser::new(tokens);
    let node = if is_program {
        parser.parse()?
    } else {
        parser.parse_expression()?
    };
    Ok(Some(node))
}

/// 扫描、解析并执行一段源码
pub fn run_source<W: Write>(
    source: &str,
    interpreter: &mut Interpreter<W>,
) -> InkyResult<Outcome> {
    let tokens = tokenize(source)?;
    let Some(node) = parse_tokens(tokens)? else {
        return Ok(Outcome::Empty);
    };

    let outcome = match interpreter.evaluate(&node) {
        Ok(Some(value)) => Outcome::Value(value),
        Ok(None) => Outcome::Executed,
        Err(e) => {
            debug!(error = %e, "求值失败");
            return Err(e.into());
        }
    };
    Ok(outcome)
}
