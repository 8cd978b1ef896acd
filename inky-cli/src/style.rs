//! 终端配色

/// ANSI 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Blue,
    Cyan,
    Green,
    Yellow,
    Red,
    White,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Blue => "\x1b[94m",
            Color::Cyan => "\x1b[96m",
            Color::Green => "\x1b[92m",
            Color::Yellow => "\x1b[93m",
            Color::Red => "\x1b[91m",
            Color::White => "\x1b[0m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// 着色器
///
/// 关闭时原样返回文本，便于测试与管道输出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// 不着色
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, color: Color, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", color.code(), text, RESET)
        } else {
            text.to_string()
        }
    }
}
