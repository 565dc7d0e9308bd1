//! 检查：定位未补零的日期
use std::path::Path;

use crate::decode::read_text_with_fallback;
use crate::error::Result;
use crate::pattern::{date_pattern, DateToken};
use crate::types::Violation;

/// 扫描单个文件，按文件顺序（自上而下、行内自左向右）返回违规项
pub fn find_invalid_dates(path: &Path) -> Result<Vec<Violation>> {
    let decoded = read_text_with_fallback(path)?;
    Ok(find_invalid_dates_in(&decoded.text)
        .into_iter()
        .map(|(line, value)| Violation { path: path.to_path_buf(), line, value })
        .collect())
}

/// 在文本中查找违规日期，返回 `(行号, 匹配文本)`，行号从 1 开始
pub fn find_invalid_dates_in(text: &str) -> Vec<(usize, String)> {
    let re = date_pattern();
    let mut out = Vec::new();
    for (idx, line) in split_lines(text).enumerate() {
        for caps in re.captures_iter(line) {
            let token = DateToken::from_captures(&caps);
            if !token.is_padded() {
                out.push((idx + 1, token.raw.to_string()));
            }
        }
    }
    out
}

/// 通用换行切分：`\r\n`、`\n`、`\r` 以及 Unicode 行分隔符。
/// 末尾换行不会产生额外的空行。
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((i, c)) => {
                let line = &rest[..i];
                let mut next = i + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
