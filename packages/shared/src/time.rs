//! Time helpers.
//!
//! Timestamps are Unix milliseconds. The `HH:mm:ss` display string is derived
//! from them and never used for ordering.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Get current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as `HH:mm:ss` in the given time zone.
///
/// Returns `None` when the timestamp is outside chrono's representable range.
pub fn format_time_of_day<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let utc: DateTime<Utc> = DateTime::from_timestamp_millis(millis)?;
    Some(utc.with_timezone(tz).format("%H:%M:%S").to_string())
}

/// Format a Unix timestamp (milliseconds) as `HH:mm:ss` in the server's local time zone.
pub fn format_local_time_of_day(millis: i64) -> Option<String> {
    format_time_of_day(millis, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_time_of_day_utc() {
        // テスト項目: UTC で HH:mm:ss 形式に変換できる
        // given (前提条件): 2023-01-01T12:34:56.789Z
        let millis = 1_672_576_496_789;

        // when (操作):
        let result = format_time_of_day(millis, &Utc);

        // then (期待する結果):
        assert_eq!(result.as_deref(), Some("12:34:56"));
    }

    #[test]
    fn test_format_time_of_day_with_offset() {
        // テスト項目: タイムゾーンのオフセットが反映される
        // given (前提条件): UTC 23:00 は JST (UTC+9) で 08:00
        let millis = 1_672_614_000_000; // 2023-01-01T23:00:00Z
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();

        // when (操作):
        let result = format_time_of_day(millis, &jst);

        // then (期待する結果):
        assert_eq!(result.as_deref(), Some("08:00:00"));
    }

    #[test]
    fn test_format_time_of_day_out_of_range() {
        // テスト項目: 範囲外のタイムスタンプは None になる
        // when (操作):
        let result = format_time_of_day(i64::MAX, &Utc);

        // then (期待する結果):
        assert!(result.is_none());
    }

    #[test]
    fn test_now_millis_is_recent() {
        // テスト項目: 現在時刻が 2023 年以降のミリ秒で返る
        // then (期待する結果):
        assert!(now_millis() > 1_672_531_200_000);
    }
}
