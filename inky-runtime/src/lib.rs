//! # Inky Runtime
//!
//! inky 语言的核心库：词法扫描、递归下降解析与树遍历解释。
//!
//! ## 架构概述
//!
//! 三个阶段都是纯变换，阶段之间没有共享的可变状态：
//!
//! ```text
//! 源码 ──tokenize──► Vec<Token> ──Parser──► Node ──Interpreter──► Value / 输出
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! use inky_runtime::{Interpreter, Outcome, run_source};
//!
//! let mut interpreter = Interpreter::new(std::io::stdout());
//! match run_source("2 ^ 3 ^ 2", &mut interpreter)? {
//!     Outcome::Value(value) => println!("{}: {}", value.kind(), value),
//!     Outcome::Executed | Outcome::Empty => {}
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`token`]：Token 定义
//! - [`lexer`]：词法扫描器
//! - [`script`]：AST 与解析器
//! - [`runtime`]：解释器与逐行流水线
//! - [`value`]：运行时值
//! - [`pretty`]：树形图与源码格式化
//! - [`error`]：错误类型定义

pub mod error;
pub mod lexer;
pub mod pretty;
pub mod runtime;
pub mod script;
pub mod token;
pub mod value;

// 重导出核心类型
pub use error::{InkyError, InkyResult, LexError, ParseError, RuntimeError};
pub use lexer::tokenize;
pub use pretty::{pretty_print, to_source};
pub use runtime::{
    Interpreter, Outcome, evaluate_expr, parse_tokens, run_source, starts_statement,
};
pub use script::{Node, Parser, Stmts, parse};
pub use token::{Token, TokenKind};
pub use value::{Value, ValueKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let tokens = tokenize("println 1 + 1").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Println);

        let program = parse(tokens).unwrap();
        let mut interpreter = Interpreter::new(Vec::new());
        assert_eq!(interpreter.evaluate(&program).unwrap(), None);
        assert_eq!(interpreter.into_output(), b"2\n");
    }
}
