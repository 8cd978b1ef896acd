//! # Error 模块
//!
//! 定义 inky-runtime 中使用的错误类型。
//!
//! 三个阶段各自一种错误，全部带行号：
//!
//! - [`LexError`]：词法扫描
//! - [`ParseError`]：语法解析
//! - [`RuntimeError`]：求值

use thiserror::Error;

/// 词法错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// 字符串字面量直到输入结束都没有闭合
    #[error("第 {line} 行：字符串未闭合")]
    UnterminatedString { line: usize },

    /// 无法识别的字符
    #[error("第 {line} 行：意外字符 '{ch}'")]
    UnexpectedCharacter { ch: char, line: usize },
}


/// 解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 期望某个 token，实际遇到另一个
    #[error("第 {line} 行：期望 {expected}，实际为 '{found}'")]
    ExpectedToken {
        expected: String,
        found: String,
        line: usize,
    },

    /// 期望某个 token，但 token 已耗尽
    #[error("第 {line} 行：期望 {expected}，但输入已结束")]
    UnexpectedEof { expected: String, line: usize },

    /// 需要表达式的位置出现了其他 token
    #[error("第 {line} 行：期望表达式，实际为 '{found}'")]
    ExpectedExpression { found: String, line: usize },

    /// 无法作为语句或表达式剩余部分的 token
    #[error("第 {line} 行：无法解析的 token '{lexeme}'")]
    UnexpectedToken { lexeme: String, line: usize },

    /// 数字字面量无法解析
    #[error("第 {line} 行：无法解析数字 '{lexeme}'")]
    InvalidNumber { lexeme: String, line: usize },

    /// 括号、前缀运算符或 `if` 嵌套过深
    #[error("第 {line} 行：嵌套超过 {limit} 层")]
    NestingTooDeep { limit: usize, line: usize },
}


/// 运行时错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// 二元运算符的操作数类型不合法
    #[error("第 {line} 行：运算符 '{op}' 不支持 {left} 与 {right}")]
    TypeMismatch {
        op: String,
        left: String,
        right: String,
        line: usize,
    },

    /// 一元运算符的操作数类型不合法
    #[error("第 {line} 行：一元运算符 '{op}' 不支持 {operand}")]
    UnaryTypeMismatch {
        op: String,
        operand: String,
        line: usize,
    },

    /// 除数（或取模的右操作数）为零
    #[error("第 {line} 行：除以零")]
    DivisionByZero { line: usize },

    /// 条件表达式不是布尔值
    #[error("第 {line} 行：期望布尔表达式，实际为 {actual}")]
    ExpectedBoolean { actual: String, line: usize },

    /// AST 中出现了解释器不认识的运算符
    #[error("第 {line} 行：不支持的运算符 '{op}'")]
    UnsupportedOperator { op: String, line: usize },

    /// 无法求值的节点
    #[error("第 {line} 行：无法求值的节点 {node}")]
    UnsupportedNode { node: String, line: usize },

    /// 输出写入失败
    #[error("输出失败: {message}")]
    Output { message: String },
}

/// inky-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InkyError {
    /// 词法错误
    #[error("词法错误: {0}")]
    Lex(#[from] LexError),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),

    /// 运行时错误
    #[error("运行时错误: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Result 类型别名
pub type InkyResult<T> = Result<T, InkyError>;
