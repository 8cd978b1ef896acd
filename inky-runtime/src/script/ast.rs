//! # AST 模块
//!
//! 定义 inky 的抽象语法树（Abstract Syntax Tree）。
//!
//! ## 设计说明
//!
//! - 节点集合是封闭的 `enum`，新增节点会迫使解析器、解释器、格式化器同步处理
//! - 每个节点都带有引入它的 token 的行号，用于错误报告
//! - 父节点独占子节点（树，而非图）

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// 语法树节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// 整数字面量
    Integer { value: i64, line: usize },

    /// 浮点数字面量
    Float { value: f64, line: usize },

    /// 布尔字面量
    Bool { value: bool, line: usize },

    /// 字符串字面量（已去掉两端引号）
    String { value: String, line: usize },

    /// 二元运算：算术、比较、相等
    BinOp {
        op: Token,
        left: Box<Node>,
        right: Box<Node>,
        line: usize,
    },

    /// 一元运算：`~` `-` `+`
    UnOp {
        op: Token,
        operand: Box<Node>,
        line: usize,
    },

    /// 逻辑运算：`and` `or`（短路）
    LogicalOp {
        op: Token,
        left: Box<Node>,
        right: Box<Node>,
        line: usize,
    },

    /// 括号分组
    Grouping { value: Box<Node>, line: usize },

    /// 标识符
    ///
    /// 当前版本没有变量存储，解释器遇到时报告错误。
    Identifier { name: String, line: usize },

    /// 赋值语句 `name := expr`
    ///
    /// 同上，仅保留节点形状。
    AssignStmt {
        left: Box<Node>,
        right: Box<Node>,
        line: usize,
    },

    /// 输出语句
    ///
    /// `end` 是值之后追加的行终止符：`print` 为空串，`println` 为 `"\n"`。
    PrintStmt {
        value: Box<Node>,
        end: String,
        line: usize,
    },

    /// 条件语句
    ///
    /// `else_block` 为 `None` 表示没有 else 分支，与空的 else 块不同。
    IfStmt {
        test: Box<Node>,
        then_block: Stmts,
        else_block: Option<Stmts>,
        line: usize,
    },

    /// 语句序列
    Stmts(Stmts),
}

/// 语句序列，按顺序执行
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stmts {
    pub stmts: Vec<Node>,
    pub line: usize,
}

impl Stmts {
    pub fn new(stmts: Vec<Node>, line: usize) -> Self {
        Self { stmts, line }
    }
}

impl Node {
    /// 节点所在行号
    pub fn line(&self) -> usize {
        match self {
            Node::Integer { line, .. }
            | Node::Float { line, .. }
            | Node::Bool { line, .. }
            | Node::String { line, .. }
            | Node::BinOp { line, .. }
            | Node::UnOp { line, .. }
            | Node::LogicalOp { line, .. }
            | Node::Grouping { line, .. }
            | Node::Identifier { line, .. }
            | Node::AssignStmt { line, .. }
            | Node::PrintStmt { line, .. }
            | Node::IfStmt { line, .. } => *line,
            Node::Stmts(stmts) => stmts.line,
        }
    }

    /// 节点类型名
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Integer { .. } => "Integer",
            Node::Float { .. } => "Float",
            Node::Bool { .. } => "Bool",
            Node::String { .. } => "String",
            Node::BinOp { .. } => "BinOp",
            Node::UnOp { .. } => "UnOp",
            Node::LogicalOp { .. } => "LogicalOp",
            Node::Grouping { .. } => "Grouping",
            Node::Identifier { .. } => "Identifier",
            Node::AssignStmt { .. } => "AssignStmt",
            Node::PrintStmt { .. } => "PrintStmt",
            Node::IfStmt { .. } => "IfStmt",
            Node::Stmts(_) => "Stmts",
        }
    }

    /// 是否为语句节点
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::AssignStmt { .. } | Node::PrintStmt { .. } | Node::IfStmt { .. } | Node::Stmts(_)
        )
    }

    pub fn binary(op: Token, left: Node, right: Node) -> Self {
        let line = op.line;
        Self::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            line,
        }
    }

    pub fn unary(op: Token, operand: Node) -> Self {
        let line = op.line;
        Self::UnOp {
            op,
            operand: Box::new(operand),
            line,
        }
    }

    pub fn logical(op: Token, left: Node, right: Node) -> Self {
        let line = op.line;
        Self::LogicalOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            line,
        }
    }

    pub fn grouping(value: Node, line: usize) -> Self {
        Self::Grouping {
            value: Box::new(value),
            line,
        }
    }
}
