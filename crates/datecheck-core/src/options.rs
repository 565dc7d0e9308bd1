//! 运行选项与统计信息
use std::path::PathBuf;

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 只报告违规（默认）
    Check,
    /// 原地改写为补零格式
    Fix,
}

impl Mode {
    /// 由命令行开关推导模式：`--fix` 优先，`--check` 仅作说明
    pub fn from_flags(fix: bool, _check: bool) -> Self {
        if fix { Mode::Fix } else { Mode::Check }
    }
}

/// 检查选项
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// 参与处理的扩展名（不含点，大小写敏感）
    pub extensions: Vec<String>,
    /// 未给出路径时使用的默认输入
    pub default_paths: Vec<PathBuf>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "mdx".to_string()],
            default_paths: vec![PathBuf::from("docs")],
        }
    }
}

impl CheckOptions {
    /// 用户未指定路径时回退到默认路径
    pub fn resolve_paths(&self, paths: Vec<PathBuf>) -> Vec<PathBuf> {
        if paths.is_empty() { self.default_paths.clone() } else { paths }
    }
}

/// 单次运行的统计信息（便于 CLI 打印日志）
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub violations: usize,
}
