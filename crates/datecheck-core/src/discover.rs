//! Markdown 文件发现
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::options::CheckOptions;

/// 扩展名是否在允许列表中（大小写敏感）
pub fn is_eligible(path: &Path, opts: &CheckOptions) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => opts.extensions.iter().any(|e| e == ext),
        None => false,
    }
}

/// 按输入顺序惰性产出待处理文件
/// - 文件：扩展名符合即产出
/// - 目录：递归遍历，目录内按文件名排序，保证输出可复现
/// - 既不是文件也不是目录的路径直接跳过
///
/// 每次调用都会重新遍历文件系统。
pub fn iter_markdown_files<'a>(
    paths: &'a [PathBuf],
    opts: &'a CheckOptions,
) -> impl Iterator<Item = PathBuf> + 'a {
    paths.iter().flat_map(move |root| -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        if root.is_file() {
            if is_eligible(root, opts) {
                return Box::new(std::iter::once(root.clone()));
            }
            return Box::new(std::iter::empty());
        }
        if root.is_dir() {
            let walk = WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(e) => Some(e),
                    Err(err) => {
                        debug!(%err, "skip unreadable entry");
                        None
                    }
                })
                .filter(|e| e.path().is_file())
                .map(|e| e.into_path())
                .filter(move |p| is_eligible(p, opts));
            return Box::new(walk);
        }
        debug!(path = %root.display(), "skip missing path");
        Box::new(std::iter::empty())
    })
}
