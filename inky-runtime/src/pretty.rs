//! # Pretty 模块
//!
//! 语法树的两种文本形式：
//!
//! - [`pretty_print`]：带分支线的树形图，用于调试输出
//! - [`to_source`]：可重新解析的源码
//!
//! ## 树形图格式
//!
//! ```text
//! ● BinOp: "+"
//! ├── ● Integer: 2
//! └── ● BinOp: "*"
//!     ├── ● Integer: 3
//!     └── ● Integer: 4
//! ```

use crate::script::ast::{Node, Stmts};

/// 树形图中的一项
enum Item<'a> {
    Node(&'a Node),
    /// 带标题的语句块（if 的 then / else 分支）
    Block(&'static str, &'a Stmts),
    /// 没有子节点的说明行
    Note(String),
}

/// 渲染为树形图
pub fn pretty_print(node: &Node) -> String {
    let mut lines = Vec::new();
    build_tree_lines(&Item::Node(node), "", "", &mut lines);
    lines.join("\n")
}

fn describe<'a>(item: &Item<'a>) -> (String, Vec<Item<'a>>) {
    let node = match item {
        Item::Node(node) => *node,
        Item::Block(title, stmts) => {
            return (
                format!("● {}", title),
                stmts.stmts.iter().map(Item::Node).collect(),
            );
        }
        Item::Note(text) => return (text.clone(), Vec::new()),
    };

    match node {
        Node::Integer { value, .. } => (format!("● Integer: {}", value), Vec::new()),
        Node::Float { value, .. } => (format!("● Float: {}", float_text(*value)), Vec::new()),
        Node::Bool { value, .. } => (format!("● Bool: {}", value), Vec::new()),
        Node::String { value, .. } => (format!("● String: {}", value), Vec::new()),
        Node::BinOp {
            op, left, right, ..
        } => (
            format!("● BinOp: {:?}", op.lexeme),
            vec![Item::Node(left), Item::Node(right)],
        ),
        Node::UnOp { op, operand, .. } => (
            format!("● UnOp: {:?}", op.lexeme),
            vec![Item::Node(operand)],
        ),
        Node::LogicalOp {
            op, left, right, ..
        } => (
            format!("● LogicalOp: {:?}", op.lexeme),
            vec![Item::Node(left), Item::Node(right)],
        ),
        Node::Grouping { value, .. } => ("● Grouping".to_string(), vec![Item::Node(value)]),
        Node::Identifier { name, .. } => (format!("● Identifier: {}", name), Vec::new()),
        Node::AssignStmt { left, right, .. } => (
            "● AssignStmt".to_string(),
            vec![Item::Node(left), Item::Node(right)],
        ),
        Node::PrintStmt { value, end, .. } => (
            format!("● PrintStmt: {:?}", end),
            vec![Item::Node(value)],
        ),
        Node::IfStmt {
            test,
            then_block,
            else_block,
            ..
        } => {
            let else_item = match else_block {
                Some(block) => Item::Block("Else", block),
                None => Item::Note("● Else: <none>".to_string()),
            };
            (
                "● IfStmt".to_string(),
                vec![Item::Node(test), Item::Block("Then", then_block), else_item],
            )
        }
        Node::Stmts(stmts) => (
            "● Stmts".to_string(),
            stmts.stmts.iter().map(Item::Node).collect(),
        ),
    }
}

fn build_tree_lines(
    item: &Item<'_>,
    prefix: &str,
    children_prefix: &str,
    lines: &mut Vec<String>,
) {
    let (desc, children) = describe(item);
    lines.push(format!("{}{}", prefix, desc));

    let count = children.len();
    for (i, child) in children.iter().enumerate() {
        if i + 1 < count {
            build_tree_lines(
                child,
                &format!("{}├── ", children_prefix),
                &format!("{}│   ", children_prefix),
                lines,
            );
        } else {
            build_tree_lines(
                child,
                &format!("{}└── ", children_prefix),
                &format!("{}    ", children_prefix),
                lines,
            );
        }
    }
}

/// 渲染为可重新解析的源码
///
/// 复合表达式一律加括号，因此重新解析后结构只多出 `Grouping`，求值结果不变。
pub fn to_source(node: &Node) -> String {
    match node {
        Node::Integer { value, .. } => value.to_string(),
        Node::Float { value, .. } => float_text(*value),
        Node::Bool { value, .. } => value.to_string(),
        Node::String { value, .. } => {
            let quote = if value.contains('"') { '\'' } else { '"' };
            format!("{quote}{value}{quote}")
        }
        Node::BinOp {
            op, left, right, ..
        }
        | Node::LogicalOp {
            op, left, right, ..
        } => format!("({} {} {})", to_source(left), op.lexeme, to_source(right)),
        Node::UnOp { op, operand, .. } => format!("({}{})", op.lexeme, to_source(operand)),
        Node::Grouping { value, .. } => format!("({})", to_source(value)),
        Node::Identifier { name, .. } => name.clone(),
        Node::AssignStmt { left, right, .. } => {
            format!("{} := {}", to_source(left), to_source(right))
        }
        Node::PrintStmt { value, end, .. } => {
            let keyword = if end.is_empty() { "print" } else { "println" };
            format!("{} {}", keyword, to_source(value))
        }
        Node::IfStmt {
            test,
            then_block,
            else_block,
            ..
        } => {
            let mut out = format!("if {} then\n", to_source(test));
            push_block(&mut out, then_block);
            if let Some(block) = else_block {
                out.push_str("else\n");
                push_block(&mut out, block);
            }
            out.push_str("end");
            out
        }
        Node::Stmts(stmts) => stmts
            .stmts
            .iter()
            .map(to_source)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// 浮点数总是带小数点，与整数区分，重新扫描时也仍是浮点数
fn float_text(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn push_block(out: &mut String, block: &Stmts) {
    for stmt in &block.stmts {
        for line in to_source(stmt).lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
}
