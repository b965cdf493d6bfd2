//! 时间工具函数 — 营业时间窗口
//!
//! 门店营业时间以 "HH:MM" 字符串存储；跨夜窗口（close < open）
//! 视为越过午夜。repository 层只接收 `i64` Unix millis。

use super::{AppError, AppResult};

/// 解析 "HH:MM" 为当日分钟数 (0..1440)
pub fn parse_hhmm(value: &str) -> AppResult<u32> {
    let (h, m) = value
        .split_once(':')
        .ok_or_else(|| AppError::validation(format!("Invalid time format: {value}")))?;
    let hour: u32 = h
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid time format: {value}")))?;
    let minute: u32 = m
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid time format: {value}")))?;
    if hour > 23 || minute > 59 {
        return Err(AppError::validation(format!("Invalid time format: {value}")));
    }
    Ok(hour * 60 + minute)
}

/// 当前 UTC 时刻的当日分钟数
pub fn minute_of_day_now() -> u32 {
    use chrono::Timelike;
    let now = chrono::Utc::now();
    now.hour() * 60 + now.minute()
}

/// 判断营业窗口是否包含给定时刻
///
/// `open == close` 视为全天营业；`close < open` 为跨夜窗口。
pub fn window_contains(open: u32, close: u32, minute: u32) -> bool {
    if open == close {
        return true;
    }
    if open < close {
        (open..close).contains(&minute)
    } else {
        // Overnight: e.g. 18:00-02:00
        minute >= open || minute < close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("09:30").unwrap(), 570);
        assert_eq!(parse_hhmm("00:00").unwrap(), 0);
        assert_eq!(parse_hhmm("23:59").unwrap(), 1439);
        assert!(parse_hhmm("24:00").is_err());
        assert!(parse_hhmm("9h30").is_err());
    }

    #[test]
    fn test_daytime_window() {
        let open = parse_hhmm("09:00").unwrap();
        let close = parse_hhmm("22:00").unwrap();
        assert!(window_contains(open, close, parse_hhmm("12:00").unwrap()));
        assert!(!window_contains(open, close, parse_hhmm("22:00").unwrap()));
        assert!(!window_contains(open, close, parse_hhmm("03:00").unwrap()));
    }

    #[test]
    fn test_overnight_window() {
        let open = parse_hhmm("18:00").unwrap();
        let close = parse_hhmm("02:00").unwrap();
        assert!(window_contains(open, close, parse_hhmm("23:30").unwrap()));
        assert!(window_contains(open, close, parse_hhmm("01:00").unwrap()));
        assert!(!window_contains(open, close, parse_hhmm("03:00").unwrap()));
        assert!(!window_contains(open, close, parse_hhmm("12:00").unwrap()));
    }

    #[test]
    fn test_all_day_window() {
        assert!(window_contains(0, 0, 1200));
    }
}
