//! # Token 模块
//!
//! 词法单元定义。Token 由扫描器一次性产生，之后不可变。

use serde::{Deserialize, Serialize};

/// Token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // 单字符
    LParen,
    RParen,
    LCurly,
    RCurly,
    LSquar,
    RSquar,
    Comma,
    Dot,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Mod,
    Colon,
    Semicolon,
    Question,
    Not,
    Gt,
    Lt,

    // 双字符
    Ge,
    Le,
    Ne,
    Eq,
    Assign,
    GtGt,
    LtLt,

    // 字面量
    Identifier,
    String,
    Integer,
    Float,

    // 关键字
    If,
    Then,
    Else,
    True,
    False,
    And,
    Or,
    While,
    Do,
    For,
    Func,
    Null,
    End,
    Print,
    Println,
    Ret,
}

impl TokenKind {
    /// 查找关键字表
    ///
    /// 标识符扫描结束后调用，命中则返回关键字类型。
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "while" => TokenKind::While,
            "do" => TokenKind::Do,
            "for" => TokenKind::For,
            "func" => TokenKind::Func,
            "null" => TokenKind::Null,
            "end" => TokenKind::End,
            "print" => TokenKind::Print,
            "println" => TokenKind::Println,
            "ret" => TokenKind::Ret,
            _ => return None,
        };
        Some(kind)
    }

    /// 用于错误信息的可读描述
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LCurly => "'{'",
            TokenKind::RCurly => "'}'",
            TokenKind::LSquar => "'['",
            TokenKind::RSquar => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Caret => "'^'",
            TokenKind::Mod => "'%'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Question => "'?'",
            TokenKind::Not => "'~'",
            TokenKind::Gt => "'>'",
            TokenKind::Lt => "'<'",
            TokenKind::Ge => "'>='",
            TokenKind::Le => "'<='",
            TokenKind::Ne => "'~='",
            TokenKind::Eq => "'=='",
            TokenKind::Assign => "':='",
            TokenKind::GtGt => "'>>'",
            TokenKind::LtLt => "'<<'",
            TokenKind::Identifier => "标识符",
            TokenKind::String => "字符串",
            TokenKind::Integer => "整数",
            TokenKind::Float => "浮点数",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::For => "'for'",
            TokenKind::Func => "'func'",
            TokenKind::Null => "'null'",
            TokenKind::End => "'end'",
            TokenKind::Print => "'print'",
            TokenKind::Println => "'println'",
            TokenKind::Ret => "'ret'",
        }
    }
}

/// 词法单元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// 类型
    pub kind: TokenKind,
    /// 源码中的原始文本
    pub lexeme: String,
    /// 起始行号（从 1 开始）
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?}, {})", self.kind, self.lexeme, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("println"), Some(TokenKind::Println));
        assert_eq!(TokenKind::keyword("ret"), Some(TokenKind::Ret));
        assert_eq!(TokenKind::keyword("If"), None);
        assert_eq!(TokenKind::keyword("printer"), None);
    }

    #[test]
    fn test_token_display() {
        let tok = Token::new(TokenKind::String, "\"hi\"", 2);
        assert_eq!(tok.to_string(), r#"(String, "\"hi\"", 2)"#);
    }
}
