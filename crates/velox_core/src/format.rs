//! Display formatting for timestamps and counters.

use chrono::DateTime;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Short age label for `created_at` relative to `now` (both epoch ms).
///
/// Future timestamps read as `Just now`. Anything a week or older falls back
/// to an absolute UTC date such as `Oct 7, 2026`.
pub fn format_relative_time(created_at_ms: i64, now_ms: i64) -> String {
    let age = now_ms.saturating_sub(created_at_ms).max(0);
    let minutes = age / MINUTE_MS;
    let hours = age / HOUR_MS;
    let days = age / DAY_MS;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        format_date(created_at_ms)
    }
}

/// `Mon D, YYYY` in UTC; empty for out-of-range timestamps.
pub fn format_date(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Groups digits with commas, e.g. `152,840`.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{format_date, format_number, format_relative_time, DAY_MS, HOUR_MS, MINUTE_MS};

    // 2026-10-14T12:00:00Z
    const NOW: i64 = 1_791_979_200_000;

    #[test]
    fn relative_labels_follow_age_buckets() {
        assert_eq!(format_relative_time(NOW - 30_000, NOW), "Just now");
        assert_eq!(format_relative_time(NOW + 5_000, NOW), "Just now");
        assert_eq!(format_relative_time(NOW - 5 * MINUTE_MS, NOW), "5m ago");
        assert_eq!(format_relative_time(NOW - 2 * HOUR_MS, NOW), "2h ago");
        assert_eq!(format_relative_time(NOW - 3 * DAY_MS, NOW), "3d ago");
        assert_eq!(format_relative_time(NOW - 7 * DAY_MS, NOW), "Oct 7, 2026");
    }

    #[test]
    fn date_uses_short_month() {
        assert_eq!(format_date(NOW), "Oct 14, 2026");
    }

    #[test]
    fn numbers_are_grouped() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(2_847), "2,847");
        assert_eq!(format_number(152_840), "152,840");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }
}
