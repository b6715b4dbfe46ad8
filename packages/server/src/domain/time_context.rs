//! 時間帯コンテキスト（時間帯・曜日・週末・プライムタイム）

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};
use stagehand_shared::time::timestamp_to_local;

use super::value_object::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

/// ある時点のローカル時刻から導出したコンテキスト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeContext {
    pub hour: u32,
    pub time_of_day: TimeOfDay,
    pub weekday: Weekday,
    pub is_weekend: bool,
    pub is_prime_time: bool,
}

impl TimeContext {
    const PRIME_TIME_START: u32 = 19;
    const PRIME_TIME_END: u32 = 22;

    pub fn from_local<Tz: TimeZone>(local: &DateTime<Tz>) -> Self {
        let hour = local.hour();
        let weekday = local.weekday();
        Self {
            hour,
            time_of_day: TimeOfDay::from_hour(hour),
            weekday,
            is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            is_prime_time: (Self::PRIME_TIME_START..=Self::PRIME_TIME_END).contains(&hour),
        }
    }

    /// UTC からのオフセット（時間）を指定して、タイムスタンプから作る
    pub fn at(timestamp: Timestamp, utc_offset_hours: i32) -> Self {
        Self::from_local(&timestamp_to_local(timestamp.value(), utc_offset_hours))
    }

    /// 英語の曜日名（"Monday" など）
    pub fn day_of_week(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    /// `{timeContext}` に入る文言
    pub fn phrase(&self) -> &'static str {
        if self.is_prime_time {
            "in prime time"
        } else {
            "having a great time"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_utc(rfc3339: &str) -> TimeContext {
        let parsed = DateTime::parse_from_rfc3339(rfc3339).unwrap();
        TimeContext::from_local(&parsed)
    }

    #[test]
    fn test_time_of_day_boundaries() {
        // テスト項目: 12 時・17 時・21 時を境に時間帯が変わる
        // given (前提条件):
        let hours = [0, 11, 12, 16, 17, 20, 21, 23];

        // when (操作):
        let result: Vec<TimeOfDay> = hours.iter().map(|h| TimeOfDay::from_hour(*h)).collect();

        // then (期待する結果):
        assert_eq!(
            result,
            vec![
                TimeOfDay::Morning,
                TimeOfDay::Morning,
                TimeOfDay::Afternoon,
                TimeOfDay::Afternoon,
                TimeOfDay::Evening,
                TimeOfDay::Evening,
                TimeOfDay::Night,
                TimeOfDay::Night,
            ]
        );
    }

    #[test]
    fn test_weekend_prime_time() {
        // テスト項目: 土曜 20 時は週末かつプライムタイム
        // given (前提条件):
        // 2024-06-15 は土曜日

        // when (操作):
        let context = at_utc("2024-06-15T20:30:00+00:00");

        // then (期待する結果):
        assert!(context.is_weekend);
        assert!(context.is_prime_time);
        assert_eq!(context.day_of_week(), "Saturday");
        assert_eq!(context.phrase(), "in prime time");
    }

    #[test]
    fn test_weekday_morning() {
        // テスト項目: 水曜 9 時は平日・プライムタイム外
        // given (前提条件):

        // when (操作):
        let context = at_utc("2024-06-12T09:00:00+00:00");

        // then (期待する結果):
        assert!(!context.is_weekend);
        assert!(!context.is_prime_time);
        assert_eq!(context.time_of_day, TimeOfDay::Morning);
        assert_eq!(context.day_of_week(), "Wednesday");
    }

    #[test]
    fn test_offset_shifts_local_hour() {
        // テスト項目: UTC オフセットがローカル時刻に反映される
        // given (前提条件):
        // 2024-06-12T12:00:00Z
        let timestamp = Timestamp::new(1_718_193_600_000);

        // when (操作):
        let context = TimeContext::at(timestamp, 9);

        // then (期待する結果):
        assert_eq!(context.hour, 21);
        assert_eq!(context.time_of_day, TimeOfDay::Night);
    }
}
