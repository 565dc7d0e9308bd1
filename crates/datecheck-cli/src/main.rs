use anyhow::{Context, Result};
use clap::Parser;
use datecheck_core::{find_invalid_dates, fix_dates, iter_markdown_files, CheckOptions, Mode, RunStats, Violation};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "datecheck", version, about = "Check or fix YYYY年MM月DD日 date formatting in Markdown files.")]
struct Cli {
    /// 待扫描的文件或目录（默认 docs/）
    paths: Vec<PathBuf>,

    /// 原地改写文件，使月/日补零为两位
    #[arg(long)]
    fix: bool,

    /// 仅检查（未指定 --fix 时的默认行为）
    #[arg(long)]
    check: bool,

    /// 检查模式下以 JSON 数组输出违规项
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    // 日志写到 stderr，stdout 只留给报告（RUST_LOG=debug 查看细节）
    init_tracing();
    let cli = Cli::parse();

    let opts = CheckOptions::default();
    let paths = opts.resolve_paths(cli.paths);
    let files: Vec<PathBuf> = iter_markdown_files(&paths, &opts).collect();
    if files.is_empty() {
        eprintln!("No Markdown files found for the provided paths.");
        return Ok(ExitCode::SUCCESS);
    }
    info!(files = files.len(), "discovered markdown files");

    let mode = Mode::from_flags(cli.fix, cli.check);
    let mut stats = RunStats::default();
    let code = match mode {
        Mode::Fix => run_fix(&files, &mut stats)?,
        Mode::Check => run_check(&files, cli.json, &mut stats)?,
    };

    info!(
        ?mode,
        files_scanned = stats.files_scanned,
        files_changed = stats.files_changed,
        violations = stats.violations,
        "finished"
    );
    Ok(code)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 修复模式：总是返回 0
fn run_fix(files: &[PathBuf], stats: &mut RunStats) -> Result<ExitCode> {
    let mut changed = Vec::new();
    for path in files {
        stats.files_scanned += 1;
        if fix_dates(path).with_context(|| format!("fix {}", path.display()))? {
            changed.push(path);
        }
    }
    stats.files_changed = changed.len();

    if changed.is_empty() {
        println!("No changes were necessary.");
    } else {
        for path in changed {
            println!("Fixed date formatting: {}", path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// 检查模式：存在违规返回 1
fn run_check(files: &[PathBuf], json: bool, stats: &mut RunStats) -> Result<ExitCode> {
    let mut violations: Vec<Violation> = Vec::new();
    for path in files {
        stats.files_scanned += 1;
        let found = find_invalid_dates(path).with_context(|| format!("scan {}", path.display()))?;
        debug!(path = %path.display(), count = found.len(), "scanned");
        violations.extend(found);
    }
    stats.violations = violations.len();

    if json {
        println!("{}", serde_json::to_string_pretty(&violations).context("serialize violations")?);
        return Ok(exit_for(&violations));
    }

    if violations.is_empty() {
        println!("All checked dates use YYYY年MM月DD日 format.");
    } else {
        println!("Invalid date format detected (expected YYYY年MM月DD日):");
        for v in &violations {
            println!("  {v}");
        }
    }
    Ok(exit_for(&violations))
}

fn exit_for(violations: &[Violation]) -> ExitCode {
    if violations.is_empty() { ExitCode::SUCCESS } else { ExitCode::from(1) }
}
