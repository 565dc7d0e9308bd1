//! 文档日期格式检查库
//!
//! 设计要点：
//! - 只处理 Markdown（`.md` / `.mdx`）文件，目录递归遍历。
//! - 读取时按固定顺序尝试多种编码，最终以有损解码兜底，不因解码失败报错。
//! - 检查模式只读；修复模式仅在内容变化时整体覆盖写回。

mod decode;
mod discover;
mod error;
mod fix;
mod options;
mod pattern;
mod scan;
mod types;

pub use decode::{read_text_with_fallback, DecodedText, SourceEncoding};
pub use discover::{is_eligible, iter_markdown_files};
pub use error::{DateCheckError, Result};
pub use fix::{fix_dates, fix_text};
pub use options::{CheckOptions, Mode, RunStats};
pub use pattern::{date_pattern, DateToken};
pub use scan::{find_invalid_dates, find_invalid_dates_in};
pub use types::Violation;
