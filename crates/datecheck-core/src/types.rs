//! 公共类型（对外暴露）
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// 违规项：月或日未补零到两位的日期
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: PathBuf,
    /// 行号（从 1 开始）
    pub line: usize,
    /// 原始匹配文本，如 `2025年8月3日`
    pub value: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.value)
    }
}
