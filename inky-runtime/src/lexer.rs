//! # Lexer 模块
//!
//! 单遍扫描器：源码文本 → `Vec<Token>`。
//!
//! ## 扫描规则
//!
//! - 空白（空格、制表符、`\r`）跳过，`\n` 只增加行号
//! - `#` 与 `--` 为行注释
//! - 双字符运算符向前看一个字符：`>=` `<=` `~=` `==` `:=` `>>` `<<`
//! - 单独的 `=` 不产生 token
//! - 标识符按最长匹配扫描后再查关键字表
//! - 字符串以 `"` 或 `'` 开始，lexeme 保留两端引号

use tracing::trace;

use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// 扫描源码，返回 token 序列
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Scanner::new(source).scan()?;
    trace!(count = tokens.len(), "词法扫描完成");
    Ok(tokens)
}

/// 扫描游标
///
/// `start` 是当前 token 的起始字节位置，`current` 是下一个待读字节位置。
#[derive(Debug, Clone, Copy)]
struct Cursor {
    start: usize,
    current: usize,
    line: usize,
    start_line: usize,
}

impl Cursor {
    fn new() -> Self {
        Self {
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
        }
    }

    /// 开始一个新 token
    fn mark(&mut self) {
        self.start = self.current;
        self.start_line = self.line;
    }
}

struct Scanner<'a> {
    source: &'a str,
    cursor: Cursor,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(),
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Result<Vec<Token>, LexError> {
        while !self.is_at_end() {
            self.cursor.mark();
            self.scan_token()?;
        }
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        let Some(c) = self.advance() else {
            return Ok(());
        };

        match c {
            '\n' => self.cursor.line += 1,
            ' ' | '\t' | '\r' => {}
            '#' => self.skip_line_comment(),
            '(' => self.add_token(TokenKind::LParen),
            ')' => self.add_token(TokenKind::RParen),
            '{' => self.add_token(TokenKind::LCurly),
            '}' => self.add_token(TokenKind::RCurly),
            '[' => self.add_token(TokenKind::LSquar),
            ']' => self.add_token(TokenKind::RSquar),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '+' => self.add_token(TokenKind::Plus),
            '-' => {
                if self.match_char('-') {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Minus);
                }
            }
            '*' => self.add_token(TokenKind::Star),
            '/' => self.add_token(TokenKind::Slash),
            '^' => self.add_token(TokenKind::Caret),
            '%' => self.add_token(TokenKind::Mod),
            ';' => self.add_token(TokenKind::Semicolon),
            '?' => self.add_token(TokenKind::Question),
            ':' => {
                let kind = if self.match_char('=') {
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::Ge
                } else if self.match_char('>') {
                    TokenKind::GtGt
                } else {
                    TokenKind::Gt
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::Le
                } else if self.match_char('<') {
                    TokenKind::LtLt
                } else {
                    TokenKind::Lt
                };
                self.add_token(kind);
            }
            '=' => {
                // 单独的 '=' 不构成 token
                if self.match_char('=') {
                    self.add_token(TokenKind::Eq);
                }
            }
            '~' => {
                let kind = if self.match_char('=') {
                    TokenKind::Ne
                } else {
                    TokenKind::Not
                };
                self.add_token(kind);
            }
            '"' | '\'' => self.scan_string(c)?,
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => self.scan_identifier(),
            other => {
                return Err(LexError::UnexpectedCharacter {
                    ch: other,
                    line: self.cursor.line,
                });
            }
        }

        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.cursor.current >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.cursor.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.cursor.current..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor.current += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.cursor.current += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = &self.source[self.cursor.start..self.cursor.current];
        self.tokens
            .push(Token::new(kind, lexeme, self.cursor.start_line));
    }

    /// 跳到行尾，换行符留给主循环计数
    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn scan_number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let is_fraction =
            self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if is_fraction {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            self.add_token(TokenKind::Float);
        } else {
            self.add_token(TokenKind::Integer);
        }
    }

    fn scan_string(&mut self, quote: char) -> Result<(), LexError> {
        loop {
            match self.advance() {
                Some(c) if c == quote => break,
                Some('\n') => self.cursor.line += 1,
                Some(_) => {}
                None => {
                    return Err(LexError::UnterminatedString {
                        line: self.cursor.start_line,
                    });
                }
            }
        }
        self.add_token(TokenKind::String);
        Ok(())
    }

    fn scan_identifier(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.source[self.cursor.start..self.cursor.current];
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }
}
