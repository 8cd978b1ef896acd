//! # Batch 模块
//!
//! `inky run <file>`：一次性处理整个文件。
//!
//! 默认依次打印源码、token 列表与语法树，再执行。
//! `--quiet` 只保留程序输出，`--json` 以 JSON 输出 token 与语法树。

use std::io::Write;

use anyhow::{Context, Result};
use inky_runtime::{Interpreter, Node, Token, parse_tokens, pretty_print, tokenize};
use tracing::info;

use crate::style::{Color, Palette};

/// 批处理选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// 只输出程序结果
    pub quiet: bool,
    /// 诊断信息使用 JSON
    pub json: bool,
}

/// 处理一段完整源码
pub fn run<W: Write>(
    source: &str,
    options: &BatchOptions,
    palette: &Palette,
    out: &mut W,
) -> Result<()> {
    if !options.quiet {
        section(out, palette, "Source")?;
        writeln!(out, "{}", source)?;
    }

    let tokens = tokenize(source)?;
    info!(count = tokens.len(), "扫描完成");
    if !options.quiet {
        section(out, palette, "Lexer")?;
        print_tokens(out, &tokens, options.json)?;
    }

    let Some(node) = parse_tokens(tokens)? else {
        info!("没有可执行的内容");
        return Ok(());
    };
    if !options.quiet {
        section(out, palette, "AST")?;
        print_ast(out, &node, options.json)?;
        section(out, palette, "Output")?;
    }

    let result = {
        let mut interpreter = Interpreter::new(&mut *out);
        interpreter.evaluate(&node)?
    };
    if let Some(value) = result {
        writeln!(out, "{}", palette.paint(Color::White, &format!("{}: {}", value.kind(), value)))?;
    }
    info!("执行完成");

    Ok(())
}

fn section<W: Write>(out: &mut W, palette: &Palette, title: &str) -> Result<()> {
    let header = format!("=== {} ===", title);
    writeln!(out, "{}", palette.paint(Color::Green, &header))?;
    Ok(())
}

fn print_tokens<W: Write>(out: &mut W, tokens: &[Token], json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(tokens).context("token 序列化失败")?;
        writeln!(out, "{}", text)?;
    } else {
        for token in tokens {
            writeln!(out, "{}", token)?;
        }
    }
    Ok(())
}

fn print_ast<W: Write>(out: &mut W, node: &Node, json: bool) -> Result<()> {
    let text = if json {
        serde_json::to_string_pretty(node).context("语法树序列化失败")?
    } else {
        pretty_print(node)
    };
    writeln!(out, "{}", text)?;
    Ok(())
}
