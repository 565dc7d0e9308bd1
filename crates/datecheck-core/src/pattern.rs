//! 日期模式 `YYYY年M月D日`
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// 年份限定 2000–2099，月/日为 1–2 位 ASCII 数字；不校验取值范围
const DATE_REGEX: &str = r"(20[0-9]{2})年([0-9]{1,2})月([0-9]{1,2})日";

/// 全局共享的已编译正则
pub fn date_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_REGEX).expect("date regex is valid"))
}

/// 一次日期匹配
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken<'t> {
    pub year: &'t str,
    pub month: &'t str,
    pub day: &'t str,
    pub raw: &'t str,
}

impl<'t> DateToken<'t> {
    pub fn from_captures(caps: &Captures<'t>) -> Self {
        Self {
            year: caps.get(1).map_or("", |m| m.as_str()),
            month: caps.get(2).map_or("", |m| m.as_str()),
            day: caps.get(3).map_or("", |m| m.as_str()),
            raw: caps.get(0).map_or("", |m| m.as_str()),
        }
    }

    /// 月和日是否都是两位
    pub fn is_padded(&self) -> bool {
        self.month.chars().count() == 2 && self.day.chars().count() == 2
    }

    /// 补零后的规范写法
    pub fn canonical(&self) -> String {
        format!("{}年{}月{}日", self.year, pad2(self.month), pad2(self.day))
    }
}

// 模式保证 1–2 位数字，单字符补一个 0 即可
fn pad2(s: &str) -> String {
    if s.len() == 1 { format!("0{s}") } else { s.to_string() }
}
