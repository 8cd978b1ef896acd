//! # Script 模块
//!
//! 语法相关功能，包括 AST 定义和解析器实现。
//!
//! ## 模块结构
//!
//! - [`ast`]：抽象语法树定义
//! - [`parser`]：递归下降解析器

pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::{Parser, parse};
