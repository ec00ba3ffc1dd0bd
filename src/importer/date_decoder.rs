// ==========================================
// Latam 看板系统 - 日期解码器
// ==========================================
// 格式: Date(Y,M,D)，M 为 0 起始月份（0 = 一月），D 为 1 起始日
// 红线: 解码失败返回"当前时刻"，不得中断整批归一化
// ==========================================

use chrono::{Days, Months, NaiveDate, NaiveDateTime, Utc};

/// 日期编码前缀
pub const DATE_PREFIX: &str = "Date(";

/// 解码日期，失败时回退为当前时刻（UTC，无时区偏移）
///
/// # 示例
/// ```
/// use latam_dashboard::importer::date_decoder::decode;
/// let date = decode("Date(2025,0,15)");
/// assert_eq!(date.format("%Y-%m-%d").to_string(), "2025-01-15");
/// ```
pub fn decode(text: &str) -> NaiveDateTime {
    decode_opt(text).unwrap_or_else(now)
}

/// 解码日期，失败时返回 None
///
/// 失败情形:
/// - 空文本或缺少 `Date(` 前缀
/// - 数字分量不是恰好 3 个
/// - 顺延后超出可表示的日期范围
///
/// 越界的月份/日按日历顺延: `Date(2025,1,30)` → 2025-03-02，
/// `Date(2025,12,1)` → 2026-01-01，日为 0 表示上月最后一天
pub fn decode_opt(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() || !text.starts_with(DATE_PREFIX) {
        return None;
    }

    let parts: Vec<u32> = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>())
        .collect::<Result<_, _>>()
        .ok()?;

    let [year, month_index, day] = parts.as_slice() else {
        return None;
    };

    let year = i32::try_from(*year).ok()?;
    let month_start = NaiveDate::from_ymd_opt(year, 1, 1)?.checked_add_months(Months::new(*month_index))?;
    let date = match day.checked_sub(1) {
        Some(offset) => month_start.checked_add_days(Days::new(u64::from(offset)))?,
        None => month_start.checked_sub_days(Days::new(1))?,
    };
    date.and_hms_opt(0, 0, 0)
}

/// 回退时刻
fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
