//! 容错文本读取（编码回退链）
use encoding_rs::{Encoding, EUC_JP, SHIFT_JIS, UTF_8};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{DateCheckError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 读取时实际采用的编码；修复模式按此编码写回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    /// 带 BOM 的 UTF-8，写回时保留 BOM
    Utf8Bom,
    /// Shift_JIS（含 CP932 扩展）
    ShiftJis,
    EucJp,
    /// 所有编码均失败，按 UTF-8 有损解码（无法解码的字节替换为 U+FFFD）
    Utf8Lossy,
}

impl SourceEncoding {
    pub(crate) fn encoding(self) -> &'static Encoding {
        match self {
            SourceEncoding::Utf8 | SourceEncoding::Utf8Bom | SourceEncoding::Utf8Lossy => UTF_8,
            SourceEncoding::ShiftJis => SHIFT_JIS,
            SourceEncoding::EucJp => EUC_JP,
        }
    }

    /// 解码过程是否没有替换任何字节
    pub fn is_lossless(self) -> bool {
        !matches!(self, SourceEncoding::Utf8Lossy)
    }

    /// 按该编码编码文本；有损解码的文本按 UTF-8 编码。
    /// 目标编码无法表示其中任一字符时返回 None。
    ///
    /// Shift_JIS / EUC-JP 的编码器不保证还原解码前的字节（NEC 重复字符、外字等），
    /// 修复这类文件时应直接在原始字节上替换，见 `fix_dates`。
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            SourceEncoding::Utf8 | SourceEncoding::Utf8Lossy => Some(text.as_bytes().to_vec()),
            SourceEncoding::Utf8Bom => {
                let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
                out.extend_from_slice(UTF8_BOM);
                out.extend_from_slice(text.as_bytes());
                Some(out)
            }
            other => {
                let (bytes, _, unmappable) = other.encoding().encode(text);
                if unmappable { None } else { Some(bytes.into_owned()) }
            }
        }
    }
}

/// 解码结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: SourceEncoding,
}

/// 读取整个文件并解码；解码失败不报错，只有 I/O 错误向上传递
pub fn read_text_with_fallback(path: &Path) -> Result<DecodedText> {
    read_source(path).map(|(_, decoded)| decoded)
}

/// 同时返回原始字节与解码结果，供修复模式在原始字节上改写
pub(crate) fn read_source(path: &Path) -> Result<(Vec<u8>, DecodedText)> {
    let bytes = std::fs::read(path).map_err(|e| DateCheckError::io(path, e))?;
    let decoded = decode_bytes(&bytes);
    if !decoded.encoding.is_lossless() {
        warn!(path = %path.display(), "no encoding matched, decoded lossily");
    } else {
        debug!(path = %path.display(), encoding = ?decoded.encoding, "decoded");
    }
    Ok((bytes, decoded))
}

/// 依次尝试：UTF-8 → 带 BOM 的 UTF-8 → Shift_JIS → EUC-JP → 有损 UTF-8
pub(crate) fn decode_bytes(bytes: &[u8]) -> DecodedText {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        if let Ok(text) = std::str::from_utf8(rest) {
            return DecodedText { text: text.to_owned(), encoding: SourceEncoding::Utf8Bom };
        }
    } else if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedText { text: text.to_owned(), encoding: SourceEncoding::Utf8 };
    }

    for candidate in [SourceEncoding::ShiftJis, SourceEncoding::EucJp] {
        if let Some(text) = candidate.encoding().decode_without_bom_handling_and_without_replacement(bytes) {
            return DecodedText { text: text.into_owned(), encoding: candidate };
        }
    }

    DecodedText {
        text: String::from_utf8_lossy(bytes).into_owned(),
        encoding: SourceEncoding::Utf8Lossy,
    }
}
