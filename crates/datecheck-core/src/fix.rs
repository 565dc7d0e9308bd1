//! 修复：将日期改写为补零格式
use encoding_rs::Encoding;
use regex::Captures;
use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::decode::{read_source, SourceEncoding};
use crate::error::{DateCheckError, Result};
use crate::pattern::{date_pattern, DateToken};

/// 将文本中所有日期替换为 `YYYY年MM月DD日`；已补零的日期保持不变
pub fn fix_text(text: &str) -> Cow<'_, str> {
    let fixed = date_pattern().replace_all(text, |caps: &Captures<'_>| DateToken::from_captures(caps).canonical());
    // replace_all 只要有匹配就会分配新串，这里把“内容未变”收敛回 Borrowed
    match fixed {
        Cow::Owned(s) if s == text => Cow::Borrowed(text),
        other => other,
    }
}

/// 修复单个文件，内容有变化时整体覆盖写回并返回 true
///
/// UTF-8（含 BOM）按文本改写后写回；Shift_JIS / EUC-JP 直接在原始字节上替换日期，
/// 日期以外的字节原样保留；仅能有损解码的文件以 UTF-8 写回。
pub fn fix_dates(path: &Path) -> Result<bool> {
    let (raw, decoded) = read_source(path)?;
    let bytes = match decoded.encoding {
        SourceEncoding::ShiftJis | SourceEncoding::EucJp => match fix_encoded_bytes(&raw, decoded.encoding) {
            Cow::Borrowed(_) => None,
            Cow::Owned(b) => Some(b),
        },
        encoding => match fix_text(&decoded.text) {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) => {
                if !encoding.is_lossless() {
                    warn!(path = %path.display(), "rewriting lossily decoded file as UTF-8");
                }
                Some(encoding.encode(&s).unwrap_or_else(|| s.into_bytes()))
            }
        },
    };

    let Some(bytes) = bytes else {
        debug!(path = %path.display(), "unchanged");
        return Ok(false);
    };
    std::fs::write(path, bytes).map_err(|e| DateCheckError::io(path, e))?;
    debug!(path = %path.display(), encoding = ?decoded.encoding, "rewritten");
    Ok(true)
}

/// 在多字节编码的原始字节上改写日期。
///
/// Shift_JIS 与 EUC-JP 的尾字节都不会落在 ASCII 数字区间，数字之后必然是字符边界，
/// 因此字节级匹配与解码后文本上的匹配一一对应。
fn fix_encoded_bytes(raw: &[u8], source: SourceEncoding) -> Cow<'_, [u8]> {
    let pattern = encoded_pattern(source);
    let fixed = pattern.regex.replace_all(raw, |caps: &regex::bytes::Captures<'_>| {
        let mut out = Vec::with_capacity(caps.get(0).map_or(0, |m| m.len()) + 2);
        out.extend_from_slice(&caps[1]);
        out.extend_from_slice(&pattern.year);
        push_pad2(&mut out, &caps[2]);
        out.extend_from_slice(&pattern.month);
        push_pad2(&mut out, &caps[3]);
        out.extend_from_slice(&pattern.day);
        out
    });
    match fixed {
        Cow::Owned(b) if b == raw => Cow::Borrowed(raw),
        other => other,
    }
}

fn push_pad2(out: &mut Vec<u8>, digits: &[u8]) {
    if digits.len() == 1 {
        out.push(b'0');
    }
    out.extend_from_slice(digits);
}

/// 按目标编码编译的字节级日期正则及分隔符字节
struct EncodedPattern {
    regex: regex::bytes::Regex,
    year: Vec<u8>,
    month: Vec<u8>,
    day: Vec<u8>,
}

impl EncodedPattern {
    fn build(encoding: &'static Encoding) -> Self {
        let sep = |s: &str| encoding.encode(s).0.into_owned();
        let (year, month, day) = (sep("年"), sep("月"), sep("日"));
        let hex = |bytes: &[u8]| bytes.iter().map(|b| format!("\\x{b:02X}")).collect::<String>();
        let pat = format!(
            r"(?-u)(20[0-9]{{2}}){}([0-9]{{1,2}}){}([0-9]{{1,2}}){}",
            hex(&year),
            hex(&month),
            hex(&day)
        );
        let regex = regex::bytes::Regex::new(&pat).expect("encoded date regex is valid");
        Self { regex, year, month, day }
    }
}

fn encoded_pattern(source: SourceEncoding) -> &'static EncodedPattern {
    static SJIS_PATTERN: OnceLock<EncodedPattern> = OnceLock::new();
    static EUC_PATTERN: OnceLock<EncodedPattern> = OnceLock::new();
    let cell = match source {
        SourceEncoding::EucJp => &EUC_PATTERN,
        _ => &SJIS_PATTERN,
    };
    cell.get_or_init(|| EncodedPattern::build(source.encoding()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::read_text_with_fallback;
    use encoding_rs::{EUC_JP, SHIFT_JIS};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn pads_month_and_day() {
        assert_eq!(fix_text("更新日期：2025年8月3日"), "更新日期：2025年08月03日");
        assert_eq!(fix_text("见 2024年12月1日。"), "见 2024年12月01日。");
    }

    #[test]
    fn padded_text_is_borrowed() {
        let text = "2025年08月03日 is valid.";
        assert!(matches!(fix_text(text), Cow::Borrowed(_)));
        assert!(matches!(fix_text("no dates here"), Cow::Borrowed(_)));
    }

    #[test]
    fn fixing_is_idempotent() {
        let once = fix_text("a 2024年1月2日 b 2024年3月04日\nc 2099年9月9日").into_owned();
        assert_eq!(once, "a 2024年01月02日 b 2024年03月04日\nc 2099年09月09日");
        assert!(matches!(fix_text(&once), Cow::Borrowed(_)));
    }

    #[test]
    fn rewrites_file_only_when_changed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.md");
        fs::write(&path, "更新日期：2025年8月3日\r\n其他内容\n").unwrap();

        assert!(fix_dates(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "更新日期：2025年08月03日\r\n其他内容\n");

        let before = fs::metadata(&path).unwrap().modified().unwrap();
        assert!(!fix_dates(&path).unwrap());
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn keeps_shift_jis_encoding() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sjis.md");
        let (bytes, _, _) = SHIFT_JIS.encode("日付：2025年8月3日\n");
        fs::write(&path, &bytes).unwrap();

        assert!(fix_dates(&path).unwrap());
        let written = fs::read(&path).unwrap();
        let (expected, _, _) = SHIFT_JIS.encode("日付：2025年08月03日\n");
        assert_eq!(written, expected.into_owned());
        assert_eq!(read_text_with_fallback(&path).unwrap().encoding, SourceEncoding::ShiftJis);
    }

    #[test]
    fn keeps_utf8_bom() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bom.md");
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice("2025年8月3日".as_bytes());
        fs::write(&path, &bytes).unwrap();

        assert!(fix_dates(&path).unwrap());
        let written = fs::read(&path).unwrap();
        assert!(written.starts_with(b"\xEF\xBB\xBF"));
        assert_eq!(&written[3..], "2025年08月03日".as_bytes());
    }

    fn sjis(text: &str) -> Vec<u8> {
        SHIFT_JIS.encode(text).0.into_owned()
    }

    #[test]
    fn shift_jis_user_defined_chars_survive() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("eudc.md");
        let mut bytes = vec![0xF0, 0x40];
        bytes.extend(sjis(" 2025年8月3日\n"));
        fs::write(&path, &bytes).unwrap();

        assert!(fix_dates(&path).unwrap());
        let mut expected = vec![0xF0, 0x40];
        expected.extend(sjis(" 2025年08月03日\n"));
        assert_eq!(fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn shift_jis_nec_row13_bytes_survive() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nec.md");
        // 0x8790 与 0x81E0 都解码为 ≒，写回必须保留原字节
        let mut bytes = vec![0x87, 0x90];
        bytes.extend(sjis("2024年1月2日"));
        fs::write(&path, &bytes).unwrap();

        assert!(fix_dates(&path).unwrap());
        let mut expected = vec![0x87, 0x90];
        expected.extend(sjis("2024年01月02日"));
        assert_eq!(fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn euc_jp_file_is_fixed_in_place() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("euc.md");
        // 8F B0 A1 为 JIS X 0212 字符（丂），编码器无法还原
        let mut bytes = vec![0x8F, 0xB0, 0xA1];
        bytes.extend(EUC_JP.encode("筐 2025年8月3日").0.iter());
        fs::write(&path, &bytes).unwrap();
        assert_eq!(read_text_with_fallback(&path).unwrap().encoding, SourceEncoding::EucJp);

        assert!(fix_dates(&path).unwrap());
        let mut expected = vec![0x8F, 0xB0, 0xA1];
        expected.extend(EUC_JP.encode("筐 2025年08月03日").0.iter());
        assert_eq!(fs::read(&path).unwrap(), expected);
        assert!(!fix_dates(&path).unwrap());
    }

    #[test]
    fn lossy_file_is_rewritten_as_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.md");
        let mut bytes = vec![0xFF];
        bytes.extend_from_slice("2025年8月3日".as_bytes());
        fs::write(&path, &bytes).unwrap();

        assert!(fix_dates(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "\u{FFFD}2025年08月03日");
    }

    #[test]
    fn padded_shift_jis_file_is_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ok.md");
        let mut bytes = vec![0xF0, 0x40];
        bytes.extend(sjis("2025年08月03日"));
        fs::write(&path, &bytes).unwrap();

        assert!(!fix_dates(&path).unwrap());
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }
}
