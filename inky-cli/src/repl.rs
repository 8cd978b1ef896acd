//! # REPL 模块
//!
//! 交互式前端：逐行读取 → 扫描 → 解析 → 执行 → 打印结果。
//!
//! 每一行互不影响。任何阶段的错误只打印出来，循环继续。
//!
//! ## 点命令
//!
//! - `.exit` / `.quit`：退出
//! - `.help`：帮助
//! - `.clear`：清屏
//! - `.tokens` / `.ast`：切换诊断输出

use std::io::{self, BufRead, Write};

use inky_runtime::{
    InkyError, Interpreter, Node, Token, parse_tokens, pretty_print, tokenize,
};
use tracing::debug;

use crate::config::CliConfig;
use crate::style::{Color, Palette};

/// 点命令
#[derive(Debug, Clone, PartialEq, Eq)]
enum DotCommand {
    Exit,
    Help,
    Clear,
    ToggleTokens,
    ToggleAst,
    Unknown(String),
}

impl DotCommand {
    fn parse(input: &str) -> Option<Self> {
        let name = input.strip_prefix('.')?.trim();
        let command = match name {
            "exit" | "quit" => DotCommand::Exit,
            "help" => DotCommand::Help,
            "clear" => DotCommand::Clear,
            "tokens" => DotCommand::ToggleTokens,
            "ast" => DotCommand::ToggleAst,
            other => DotCommand::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// 记录输出是否停在行首的输出端
///
/// `print` 不换行时，REPL 据此在提示符前补一个换行。
struct LineTracker<W> {
    inner: W,
    at_line_start: bool,
}

impl<W: Write> Write for LineTracker<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        if let Some(&last) = buf[..n].last() {
            self.at_line_start = last == b'\n';
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// 交互式解释器
pub struct Repl<R: BufRead, W: Write> {
    reader: R,
    interpreter: Interpreter<LineTracker<W>>,
    palette: Palette,
    prompt: String,
    show_tokens: bool,
    show_ast: bool,
    running: bool,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    /// 创建新的 REPL
    pub fn new(reader: R, out: W, config: &CliConfig, palette: Palette) -> Self {
        Self {
            reader,
            interpreter: Interpreter::new(LineTracker {
                inner: out,
                at_line_start: true,
            }),
            palette,
            prompt: config.prompt.clone(),
            show_tokens: config.show_tokens,
            show_ast: config.show_ast,
            running: false,
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.interpreter.into_output().inner
    }

    /// 主循环，读到 EOF 或 `.exit` 时返回
    pub fn run(&mut self) -> io::Result<()> {
        self.running = true;
        self.print_welcome()?;

        let mut line = String::new();
        while self.running {
            let prompt = self.palette.paint(Color::Cyan, &self.prompt);
            write!(self.out(), "{}", prompt)?;
            self.out().flush()?;

            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                writeln!(self.out())?;
                break;
            }
            // 终端回显了用户的回车
            self.out().at_line_start = true;

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            match DotCommand::parse(input) {
                Some(command) => self.handle_command(command)?,
                None => self.evaluate(input)?,
            }
        }

        Ok(())
    }

    fn out(&mut self) -> &mut LineTracker<W> {
        self.interpreter.output_mut()
    }

    fn print_welcome(&mut self) -> io::Result<()> {
        let p = self.palette;
        let banner = format!(
            "{}{}{}{}",
            p.paint(Color::Cyan, "  ╭────── "),
            p.paint(Color::Green, "✧ Inky Language "),
            p.paint(Color::Yellow, concat!("v", env!("CARGO_PKG_VERSION"), " ✧")),
            p.paint(Color::Cyan, " ──────╮"),
        );
        let hint = format!(
            "{}输入 {} 查看命令，{} 退出",
            p.paint(Color::Blue, "  ▸ "),
            p.paint(Color::Green, ".help"),
            p.paint(Color::Red, ".exit"),
        );
        let out = self.out();
        writeln!(out)?;
        writeln!(out, "{}", banner)?;
        writeln!(out, "{}", hint)?;
        writeln!(out)
    }

    fn print_help(&mut self) -> io::Result<()> {
        let p = self.palette;
        let out = self.interpreter.output_mut();
        writeln!(out, "{}", p.paint(Color::Yellow, "REPL 命令:"))?;
        writeln!(out, "  {}          显示本帮助", p.paint(Color::Green, ".help"))?;
        writeln!(
            out,
            "  {}, {}   退出",
            p.paint(Color::Green, ".exit"),
            p.paint(Color::Green, ".quit")
        )?;
        writeln!(out, "  {}         清屏", p.paint(Color::Green, ".clear"))?;
        writeln!(out, "  {}        切换 token 列表输出", p.paint(Color::Green, ".tokens"))?;
        writeln!(out, "  {}           切换语法树输出", p.paint(Color::Green, ".ast"))?;
        writeln!(out)?;
        writeln!(out, "{}", p.paint(Color::Yellow, "示例:"))?;
        writeln!(out, "  {}", p.paint(Color::Blue, "2 + 3 * 4"))?;
        writeln!(out, "  {}", p.paint(Color::Blue, "\"hello\" + \" \" + \"world\""))?;
        writeln!(out, "  {}", p.paint(Color::Blue, "2 > 1 and 3 < 4"))?;
        writeln!(
            out,
            "  {}",
            p.paint(Color::Blue, "if 2^10 > 1000 then println \"big\" end")
        )
    }

    fn handle_command(&mut self, command: DotCommand) -> io::Result<()> {
        match command {
            DotCommand::Exit => {
                self.running = false;
                writeln!(self.out(), "再见！")
            }
            DotCommand::Help => self.print_help(),
            DotCommand::Clear => write!(self.out(), "\x1b[H\x1b[2J"),
            DotCommand::ToggleTokens => {
                self.show_tokens = !self.show_tokens;
                let state = on_off(self.show_tokens);
                writeln!(self.out(), "token 输出: {}", state)
            }
            DotCommand::ToggleAst => {
                self.show_ast = !self.show_ast;
                let state = on_off(self.show_ast);
                writeln!(self.out(), "语法树输出: {}", state)
            }
            DotCommand::Unknown(name) => writeln!(self.out(), "未知命令: {}", name),
        }
    }

    /// 执行一行输入
    fn evaluate(&mut self, input: &str) -> io::Result<()> {
        let tokens = match tokenize(input) {
            Ok(tokens) => tokens,
            Err(e) => return self.report(e.into()),
        };
        if self.show_tokens {
            self.print_tokens(&tokens)?;
        }

        let node = match parse_tokens(tokens) {
            Ok(Some(node)) => node,
            Ok(None) => return Ok(()),
            Err(e) => return self.report(e.into()),
        };
        if self.show_ast {
            self.print_ast(&node)?;
        }

        match self.interpreter.evaluate(&node) {
            Ok(Some(value)) => {
                let text = format!("{}: {}", value.kind(), value);
                let text = self.palette.paint(Color::White, &text);
                writeln!(self.out(), "{}", text)
            }
            // 程序输出没有以换行结尾时补一个，避免提示符接在后面
            Ok(None) if !self.interpreter.output().at_line_start => writeln!(self.out()),
            Ok(None) => Ok(()),
            Err(e) => self.report(e.into()),
        }
    }

    fn print_tokens(&mut self, tokens: &[Token]) -> io::Result<()> {
        let out = self.out();
        for token in tokens {
            writeln!(out, "{}", token)?;
        }
        Ok(())
    }

    fn print_ast(&mut self, node: &Node) -> io::Result<()> {
        let tree = pretty_print(node);
        writeln!(self.out(), "{}", tree)
    }

    fn report(&mut self, error: InkyError) -> io::Result<()> {
        debug!(error = %error, "输入行执行失败");
        let text = self.palette.paint(Color::Red, &error.to_string());
        if !self.out().at_line_start {
            writeln!(self.out())?;
        }
        writeln!(self.out(), "{}", text)
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "开" } else { "关" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> String {
        session_with(input, &CliConfig::default())
    }

    fn session_with(input: &str, config: &CliConfig) -> String {
        let mut repl = Repl::new(
            Cursor::new(input.to_string()),
            Vec::new(),
            config,
            Palette::plain(),
        );
        repl.run().unwrap();
        String::from_utf8(repl.into_output()).unwrap()
    }

    #[test]
    fn test_dot_command_parse() {
        assert_eq!(DotCommand::parse(".quit"), Some(DotCommand::Exit));
        assert_eq!(DotCommand::parse(". help"), Some(DotCommand::Help));
        assert_eq!(
            DotCommand::parse(".foo"),
            Some(DotCommand::Unknown("foo".to_string()))
        );
        assert_eq!(DotCommand::parse("1 + 1"), None);
    }

    #[test]
    fn test_expression_results() {
        let out = session("2 + 3 * 4\n\"n=\" + 5\n~true\n");
        assert!(out.contains("Number: 14"));
        assert!(out.contains("String: n=5"));
        assert!(out.contains("Bool: false"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let out = session("1 / 0\n\"abc\n(1 + 2\n5 == '5'\n1 + 1\n");
        assert!(out.contains("除以零"));
        assert!(out.contains("字符串未闭合"));
        assert!(out.contains("解析错误"));
        assert!(out.contains("运行时错误"));
        assert!(out.contains("Number: 2"));
    }

    #[test]
    fn test_statements_print_output() {
        let out = session("println 'hello'\nprint 'a' + 1\n");
        assert!(out.contains("hello\n"));
        assert!(out.contains("a1\n"));
    }

    #[test]
    fn test_exit_stops_reading() {
        let out = session(".exit\n1 + 1\n");
        assert!(out.contains("再见！"));
        assert!(!out.contains("Number: 2"));
    }

    #[test]
    fn test_comment_only_line_is_skipped() {
        let out = session("# nothing here\n");
        assert!(!out.contains("错误"));
    }

    #[test]
    fn test_toggle_diagnostics() {
        let out = session(".tokens\n.ast\n1 + 2\n");
        assert!(out.contains("token 输出: 开"));
        assert!(out.contains("(Integer, \"1\", 1)"));
        assert!(out.contains("● BinOp: \"+\""));
        assert!(out.contains("Number: 3"));
    }

    #[test]
    fn test_config_prompt_and_flags() {
        let config = CliConfig {
            prompt: "~> ".to_string(),
            show_ast: true,
            ..CliConfig::default()
        };
        let out = session_with("7\n", &config);
        assert!(out.contains("~> "));
        assert!(out.contains("● Integer: 7"));
    }

    #[test]
    fn test_help_and_unknown_command() {
        let out = session(".help\n.nope\n");
        assert!(out.contains(".clear"));
        assert!(out.contains("未知命令: nope"));
    }

    #[test]
    fn test_newline_added_only_when_output_is_open() {
        let config = CliConfig {
            prompt: "P>".to_string(),
            ..CliConfig::default()
        };
        let input = "if 1 < 2 then println 'yes' end\nprint 1 println 2\nprint 'x'\nif false then print 1 end\n";
        let out = session_with(input, &config);
        assert!(out.ends_with("P>yes\nP>12\nP>x\nP>P>\n"), "{:?}", out);
    }

    #[test]
    fn test_error_after_partial_output_starts_new_line() {
        let out = session("print 1 print 1 / 0\n");
        assert!(out.contains("1\n运行时错误"), "{:?}", out);
    }
}
