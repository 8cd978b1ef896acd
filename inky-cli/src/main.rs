//! # Inky CLI
//!
//! inky 语言的命令行前端。
//!
//! ## 用法
//!
//! ```bash
//! # 交互式 REPL（默认）
//! cargo run -p inky-cli
//! cargo run -p inky-cli -- repl --tokens --ast
//!
//! # 批处理一个文件
//! cargo run -p inky-cli -- run scripts/demo.inky
//! cargo run -p inky-cli -- run scripts/demo.inky --quiet
//! cargo run -p inky-cli -- -vv run scripts/demo.inky --json
//! ```

mod batch;
mod config;
mod repl;
mod style;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level, info};

use batch::BatchOptions;
use config::{CliConfig, DEFAULT_CONFIG_FILE};
use repl::Repl;
use style::{Color, Palette};

#[derive(Parser)]
#[command(name = "inky")]
#[command(about = "inky 语言解释器 - 交互式 REPL 与文件批处理")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 配置文件路径（默认：inky.json）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 日志详细程度（-v info，-vv debug，-vvv trace）
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// 关闭彩色输出
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 启动交互式 REPL
    Repl {
        /// 每行打印 token 列表
        #[arg(long)]
        tokens: bool,

        /// 每行打印语法树
        #[arg(long)]
        ast: bool,
    },

    /// 扫描、解析并执行一个文件
    Run {
        /// 源文件路径
        file: PathBuf,

        /// 只输出程序结果
        #[arg(short, long)]
        quiet: bool,

        /// 以 JSON 输出 token 与语法树
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path, true),
        None => CliConfig::load(DEFAULT_CONFIG_FILE, false),
    };
    if cli.no_color {
        config.color = false;
    }

    let palette = Palette::new(config.color_enabled());
    init_logging(log_level(&config, cli.verbose), palette);

    let result = match cli.command {
        None => run_repl(&config, palette),
        Some(Commands::Repl { tokens, ast }) => {
            config.show_tokens |= tokens;
            config.show_ast |= ast;
            run_repl(&config, palette)
        }
        Some(Commands::Run { file, quiet, json }) => {
            run_file(&file, &BatchOptions { quiet, json }, palette)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", palette.paint(Color::Red, &format!("❌ {:#}", e)));
            ExitCode::from(1)
        }
    }
}

/// 命令行 `-v` 优先于配置文件
fn log_level(config: &CliConfig, verbose: u8) -> Level {
    match verbose {
        0 => config.tracing_level(),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_logging(level: Level, palette: Palette) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(palette.is_enabled())
        .without_time()
        .init();
}

fn run_repl(config: &CliConfig, palette: Palette) -> Result<()> {
    let stdin = io::stdin();
    let mut repl = Repl::new(stdin.lock(), io::stdout(), config, palette);
    repl.run().context("REPL 输入输出失败")
}

fn run_file(path: &Path, options: &BatchOptions, palette: Palette) -> Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("无法读取源文件: {:?}", path))?;
    info!(path = ?path, "开始执行");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    batch::run(&source, options, &palette, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::parse_from(["inky", "-vv", "run", "demo.inky", "--quiet"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Run { file, quiet, json }) => {
                assert_eq!(file, PathBuf::from("demo.inky"));
                assert!(quiet);
                assert!(!json);
            }
            _ => panic!("期望 run 子命令"),
        }
    }

    #[test]
    fn test_default_is_repl() {
        let cli = Cli::parse_from(["inky", "--no-color"]);
        assert!(cli.command.is_none());
        assert!(cli.no_color);
    }

    #[test]
    fn test_log_level_priority() {
        let config = CliConfig {
            log_level: "error".to_string(),
            ..CliConfig::default()
        };
        assert_eq!(log_level(&config, 0), Level::ERROR);
        assert_eq!(log_level(&config, 1), Level::INFO);
        assert_eq!(log_level(&config, 5), Level::TRACE);
    }

    #[test]
    fn test_run_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_file(
            &dir.path().join("missing.inky"),
            &BatchOptions::default(),
            Palette::plain(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("无法读取源文件"));
    }
}
