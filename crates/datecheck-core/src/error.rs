//! 错误类型
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateCheckError {
    /// 读写文件失败（权限、磁盘等环境问题），不做恢复
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DateCheckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, DateCheckError>;
