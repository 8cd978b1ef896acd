//! # Runtime 模块
//!
//! 解释执行。
//!
//! ## 模块结构
//!
//! - [`interpreter`]：树遍历解释器
//! - [`engine`]：扫描 → 解析 → 执行的逐行流水线

pub mod engine;
pub mod interpreter;

pub use engine::{Outcome, parse_tokens, run_source, starts_statement};
pub use interpreter::{Interpreter, evaluate_expr};
