//! # Interpreter 模块
//!
//! 树遍历解释器。
//!
//! ## 设计原则
//!
//! - 表达式求值是**无副作用**的纯函数，见 [`evaluate_expr`]
//! - 语句只通过输出端产生副作用，见 [`Interpreter`]
//! - 每次求值都重新遍历语法树，不缓存结果
//! - 错误带**行号**，并且一旦出错不返回部分结果

use std::io::{self, Write};

use crate::error::RuntimeError;
use crate::script::ast::{Node, Stmts};
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// 语句解释器
///
/// 持有 `print` / `println` 的输出端。除此之外没有任何状态，
/// 多次调用之间完全独立。
pub struct Interpreter<W: Write = io::Stdout> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    /// 创建新的解释器
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// 输出端
    pub fn output(&self) -> &W {
        &self.out
    }

    /// 输出端（可写）
    ///
    /// 前端借此在同一输出端上打印提示符与结果。
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// 取回输出端
    pub fn into_output(self) -> W {
        self.out
    }

    /// 对任意节点求值
    ///
    /// 表达式返回 `Some(value)`；语句只产生副作用，返回 `None`。
    pub fn evaluate(&mut self, node: &Node) -> Result<Option<Value>, RuntimeError> {
        if node.is_statement() {
            self.execute(node)?;
            Ok(None)
        } else {
            evaluate_expr(node).map(Some)
        }
    }

    /// 执行语句
    ///
    /// 传入表达式时求值后丢弃结果。
    pub fn execute(&mut self, node: &Node) -> Result<(), RuntimeError> {
        match node {
            Node::Stmts(stmts) => self.execute_block(stmts),

            Node::PrintStmt { value, end, .. } => {
                let value = evaluate_expr(value)?;
                write!(self.out, "{}{}", value, end)
                    .and_then(|_| self.out.flush())
                    .map_err(|e| RuntimeError::Output {
                        message: e.to_string(),
                    })
            }

            Node::IfStmt {
                test,
                then_block,
                else_block,
                line,
            } => {
                if evaluate_to_bool(test, *line)? {
                    self.execute_block(then_block)
                } else if let Some(block) = else_block {
                    self.execute_block(block)
                } else {
                    Ok(())
                }
            }

            Node::AssignStmt { line, .. } => Err(RuntimeError::UnsupportedNode {
                node: node.kind_name().to_string(),
                line: *line,
            }),

            expr => evaluate_expr(expr).map(|_| ()),
        }
    }

    fn execute_block(&mut self, block: &Stmts) -> Result<(), RuntimeError> {
        for stmt in &block.stmts {
            self.execute(stmt)?;
        }
        Ok(())
    }
}

/// 对表达式求值
///
/// # 返回
///
/// 求值结果（`Value`）或错误。语句节点与 `Identifier` 无法求值，返回
/// `RuntimeError::UnsupportedNode`。
pub fn evaluate_expr(node: &Node) -> Result<Value, RuntimeError> {
    match node {
        Node::Integer { value, .. } => Ok(Value::Number(*value as f64)),
        Node::Float { value, .. } => Ok(Value::Number(*value)),
        Node::String { value, .. } => Ok(Value::String(value.clone())),
        Node::Bool { value, .. } => Ok(Value::Bool(*value)),

        Node::Grouping { value, .. } => evaluate_expr(value),

        Node::BinOp {
            op, left, right, ..
        } => {
            let left = evaluate_expr(left)?;
            let right = evaluate_expr(right)?;
            binary(op, left, right)
        }

        Node::UnOp { op, operand, .. } => {
            let operand = evaluate_expr(operand)?;
            unary(op, operand)
        }

        Node::LogicalOp {
            op, left, right, ..
        } => logical(op, left, right),

        Node::Identifier { .. }
        | Node::AssignStmt { .. }
        | Node::PrintStmt { .. }
        | Node::IfStmt { .. }
        | Node::Stmts(_) => Err(RuntimeError::UnsupportedNode {
            node: node.kind_name().to_string(),
            line: node.line(),
        }),
    }
}

/// 对条件表达式求值并要求结果为布尔值
///
/// 错误报告在 `line`（`if` 关键字所在行）。
fn evaluate_to_bool(node: &Node, line: usize) -> Result<bool, RuntimeError> {
    match evaluate_expr(node)? {
        Value::Bool(b) => Ok(b),
        other => Err(RuntimeError::ExpectedBoolean {
            actual: other.kind().to_string(),
            line,
        }),
    }
}

fn type_mismatch(op: &Token, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        op: op.lexeme.clone(),
        left: left.kind().to_string(),
        right: right.kind().to_string(),
        line: op.line,
    }
}

fn binary(op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match op.kind {
        // 任一侧为字符串时拼接优先于加法
        TokenKind::Plus => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::String(format!("{}{}", left, right)))
            }
            _ => Err(type_mismatch(op, &left, &right)),
        },

        TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Mod
        | TokenKind::Caret => {
            let (Value::Number(a), Value::Number(b)) = (&left, &right) else {
                return Err(type_mismatch(op, &left, &right));
            };
            let (a, b) = (*a, *b);
            let result = match op.kind {
                TokenKind::Minus => a - b,
                TokenKind::Star => a * b,
                TokenKind::Slash | TokenKind::Mod if b == 0.0 => {
                    return Err(RuntimeError::DivisionByZero { line: op.line });
                }
                TokenKind::Slash => a / b,
                // f64 的 % 是截断取余，符号跟随被除数
                TokenKind::Mod => a % b,
                _ => a.powf(b),
            };
            Ok(Value::Number(result))
        }

        TokenKind::Gt | TokenKind::Ge | TokenKind::Lt | TokenKind::Le => {
            let ordering = match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                _ => return Err(type_mismatch(op, &left, &right)),
            };
            // NaN 参与的比较一律为 false
            let result = ordering.is_some_and(|ord| match op.kind {
                TokenKind::Gt => ord.is_gt(),
                TokenKind::Ge => ord.is_ge(),
                TokenKind::Lt => ord.is_lt(),
                _ => ord.is_le(),
            });
            Ok(Value::Bool(result))
        }

        TokenKind::Eq | TokenKind::Ne => {
            let equal = match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => a == b,
                (Value::String(a), Value::String(b)) => a == b,
                (Value::Bool(a), Value::Bool(b)) => a == b,
                _ => return Err(type_mismatch(op, &left, &right)),
            };
            let result = if op.kind == TokenKind::Eq {
                equal
            } else {
                !equal
            };
            Ok(Value::Bool(result))
        }

        _ => Err(RuntimeError::UnsupportedOperator {
            op: op.lexeme.clone(),
            line: op.line,
        }),
    }
}

fn unary(op: &Token, operand: Value) -> Result<Value, RuntimeError> {
    let mismatch = |operand: &Value| RuntimeError::UnaryTypeMismatch {
        op: op.lexeme.clone(),
        operand: operand.kind().to_string(),
        line: op.line,
    };

    match (op.kind, &operand) {
        (TokenKind::Minus, Value::Number(n)) => Ok(Value::Number(-n)),
        (TokenKind::Plus, Value::Number(n)) => Ok(Value::Number(*n)),
        // `~` 对布尔取反，对数字取负
        (TokenKind::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (TokenKind::Not, Value::Number(n)) => Ok(Value::Number(-n)),
        (TokenKind::Minus | TokenKind::Plus | TokenKind::Not, other) => Err(mismatch(other)),
        _ => Err(RuntimeError::UnsupportedOperator {
            op: op.lexeme.clone(),
            line: op.line,
        }),
    }
}

/// 短路求值
///
/// 左操作数只有在恰好是 `Bool(true)` 时才算真；`and` 的右操作数原样返回。
fn logical(op: &Token, left: &Node, right: &Node) -> Result<Value, RuntimeError> {
    let left_true = evaluate_expr(left)? == Value::Bool(true);
    match op.kind {
        TokenKind::And if left_true => evaluate_expr(right),
        TokenKind::And => Ok(Value::Bool(false)),
        TokenKind::Or if left_true => Ok(Value::Bool(true)),
        TokenKind::Or => evaluate_expr(right),
        _ => Err(RuntimeError::UnsupportedOperator {
            op: op.lexeme.clone(),
            line: op.line,
        }),
    }
}
