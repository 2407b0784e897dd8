//! Display formatting for the countdown and its wall-clock end time

use chrono::{TimeZone, Timelike};

/// Render whole seconds remaining as `MM:SS`.
///
/// Minutes are taken modulo one hour, so `3600` renders as `00:00`.
pub fn format_time_left(seconds_left: u64) -> String {
    let minutes = (seconds_left % 3600) / 60;
    let seconds = seconds_left % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Render a time of day as 12-hour `H:MM` without an AM/PM marker.
pub fn format_wall_time<T: Timelike>(time: &T) -> String {
    format!("{}:{:02}", twelve_hour(time.hour()), time.minute())
}

/// Render an epoch-millisecond timestamp as `H:MM` in the given time zone.
///
/// Returns `None` when the timestamp is outside the representable range.
pub fn format_end_time<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> Option<String> {
    tz.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|end| format_wall_time(&end))
}

/// 15 -> 3, with both midnight and noon shown as 12
fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime, Utc};

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn time_left_boundaries() {
        assert_eq!(format_time_left(0), "00:00");
        assert_eq!(format_time_left(3), "00:03");
        assert_eq!(format_time_left(59), "00:59");
        assert_eq!(format_time_left(60), "01:00");
        assert_eq!(format_time_left(600), "10:00");
        assert_eq!(format_time_left(1800), "30:00");
        assert_eq!(format_time_left(3599), "59:59");
    }

    #[test]
    fn time_left_wraps_at_one_hour() {
        assert_eq!(format_time_left(3600), "00:00");
        assert_eq!(format_time_left(3661), "01:01");
    }

    #[test]
    fn wall_time_hour_conversion() {
        assert_eq!(format_wall_time(&at(0, 0)), "12:00");
        assert_eq!(format_wall_time(&at(12, 30)), "12:30");
        assert_eq!(format_wall_time(&at(13, 0)), "1:00");
        assert_eq!(format_wall_time(&at(23, 59)), "11:59");
        assert_eq!(format_wall_time(&at(9, 5)), "9:05");
    }

    #[test]
    fn end_time_uses_the_given_zone() {
        // 2021-01-01T00:05:00Z
        let ts = 1_609_459_500_000;
        assert_eq!(format_end_time(ts, &Utc).as_deref(), Some("12:05"));

        let plus_one = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(format_end_time(ts, &plus_one).as_deref(), Some("1:05"));

        let minus_one = FixedOffset::west_opt(3600).unwrap();
        assert_eq!(format_end_time(ts, &minus_one).as_deref(), Some("11:05"));
    }

    #[test]
    fn end_time_out_of_range() {
        assert_eq!(format_end_time(i64::MAX, &Utc), None);
    }
}
