//! # 游标辅助函数
//!
//! 解析器对 token 序列的基本操作。

use super::{MAX_NESTING, Parser};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

impl Parser {
    /// 查看当前 token，不前进
    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    /// 上一个已消费的 token
    pub(super) fn previous(&self) -> Option<&Token> {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// 当前 token 是否为指定类型
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    /// 消费并返回当前 token
    pub(super) fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.current).cloned()?;
        self.current += 1;
        Some(tok)
    }

    /// 当前 token 属于 `kinds` 之一时消费并返回它
    pub(super) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        let matched = self.peek().is_some_and(|t| kinds.contains(&t.kind));
        if matched { self.advance() } else { None }
    }

    /// 要求当前 token 为指定类型
    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.peek() {
            Some(tok) if tok.kind == kind => {
                let tok = tok.clone();
                self.current += 1;
                Ok(tok)
            }
            Some(tok) => Err(ParseError::ExpectedToken {
                expected: kind.describe().to_string(),
                found: tok.lexeme.clone(),
                line: tok.line,
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: kind.describe().to_string(),
                line: self.last_line(),
            }),
        }
    }

    /// 最后一个 token 的行号，用于输入提前结束时的错误
    pub(super) fn last_line(&self) -> usize {
        self.previous()
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    /// 在加深一层嵌套的情况下运行 `f`
    pub(super) fn nested<T>(
        &mut self,
        line: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                line,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
