//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 inky-runtime 覆盖率
//! - `script-check`: 检查 .inky 脚本（词法与语法）

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use inky_runtime::{InkyError, parse, tokenize};
use walkdir::WalkDir;

/// 默认脚本目录（相对于 workspace root）
const SCRIPTS_DIR: &str = "scripts";

/// 脚本扩展名
const SCRIPT_EXT: &str = "inky";

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let step = format!("cargo {}", args.join(" "));
    run(&step, Command::new("cargo").args(args))
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            cargo(&["fmt", "--all", "--", "--check"])?;
            cargo(&["clippy", "--workspace", "--all-targets"])?;
            cargo(&["test", "--workspace"])?;
        }
        "cov-runtime" => {
            if !Command::new("cargo")
                .args(["llvm-cov", "--version"])
                .status()
                .is_ok_and(|s| s.success())
            {
                anyhow::bail!(
                    "cargo llvm-cov 不可用。\n请先安装：cargo install cargo-llvm-cov"
                );
            }
            cargo(&["llvm-cov", "-p", "inky-runtime", "--html"])?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "script-check" => {
            let path = args.next();
            script_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => print_help(),
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-runtime     运行 inky-runtime 覆盖率报告
  script-check    检查脚本文件

SCRIPT-CHECK:
  cargo xtask script-check [path]

  不带参数：检查 scripts/ 下所有 .inky 文件
  带路径参数：检查指定文件或目录
"#
    );
}

//=============================================================================
// script-check 命令实现
//=============================================================================

/// 单个脚本的检查结果
#[derive(Debug)]
struct ScriptReport {
    path: PathBuf,
    error: Option<String>,
}

fn script_check(path: Option<&str>) -> anyhow::Result<()> {
    let root = PathBuf::from(path.unwrap_or(SCRIPTS_DIR));
    let files = if root.is_file() {
        vec![root]
    } else if root.is_dir() {
        collect_script_files(&root)
    } else {
        anyhow::bail!(
            "路径不存在: {}\n请在 workspace 根目录运行，或指定脚本路径",
            root.display()
        );
    };

    if files.is_empty() {
        eprintln!("未找到脚本文件（.{SCRIPT_EXT}）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个脚本文件...\n", files.len());
    let reports: Vec<ScriptReport> = files.into_iter().map(check_script_file).collect();

    let mut error_count = 0;
    for report in &reports {
        if let Some(error) = &report.error {
            eprintln!("[ERROR] {}: {}", report.path.display(), error);
            error_count += 1;
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个脚本", reports.len());
    if error_count > 0 {
        eprintln!("❌ {} 个错误", error_count);
        anyhow::bail!("脚本检查发现错误");
    }
    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

/// 递归收集目录下的脚本文件，按路径排序
fn collect_script_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == SCRIPT_EXT))
        .collect();
    files.sort();
    files
}

fn check_script_file(path: PathBuf) -> ScriptReport {
    let error = match std::fs::read_to_string(&path) {
        Ok(content) => check_source(&content).err().map(|e| e.to_string()),
        Err(e) => Some(format!("无法读取文件 - {}", e)),
    };
    ScriptReport { path, error }
}

/// 脚本按程序解析，不执行
fn check_source(content: &str) -> Result<(), InkyError> {
    let tokens = tokenize(content)?;
    parse(tokens)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_check_source() {
        assert!(check_source("println 1 + 1\nif true then print 'x' end").is_ok());
        assert!(matches!(check_source("print 'abc"), Err(InkyError::Lex(_))));
        assert!(matches!(check_source("print (1"), Err(InkyError::Parse(_))));
    }

    #[test]
    fn test_collect_and_check() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("ok.inky"), "println 'ok'").unwrap();
        fs::write(nested.join("bad.inky"), "print").unwrap();
        fs::write(dir.path().join("notes.txt"), "print").unwrap();

        let files = collect_script_files(dir.path());
        assert_eq!(files.len(), 2);

        let reports: Vec<_> = files.into_iter().map(check_script_file).collect();
        let failed: Vec<_> = reports.iter().filter(|r| r.error.is_some()).collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].path.ends_with("nested/bad.inky"));
    }
}
