//! src/util/humanize.rs

use chrono::{DateTime, Local};

/// Scale a byte count by powers of 1024, one decimal place above bytes.
pub fn human_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let units: [&'static str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value: f64 = bytes as f64;
    let mut unit_idx: usize = 0;

    while value >= 1024.0 && unit_idx < units.len() - 1 {
        value /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, units[unit_idx])
    } else {
        format!("{:.1} {}", value, units[unit_idx])
    }
}

/// Relative phrasing for a past timestamp ("just now", "5 minutes ago").
pub fn time_ago(when: DateTime<Local>) -> String {
    time_ago_at(when, Local::now())
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub(crate) fn time_ago_at(when: DateTime<Local>, now: DateTime<Local>) -> String {
    let secs: i64 = now.signed_duration_since(when).num_seconds().max(0);

    if secs < 60 {
        return "just now".to_string();
    }

    let mins: i64 = secs / 60;
    if mins < 60 {
        return format!("{} minute{} ago", mins, plural(mins));
    }

    let hours: i64 = mins / 60;
    if hours < 24 {
        return format!("{} hour{} ago", hours, plural(hours));
    }

    let days: i64 = hours / 24;
    if days < 30 {
        return format!("{} day{} ago", days, plural(days));
    }

    let months: i64 = days / 30;
    if months < 12 {
        return format!("{} month{} ago", months, plural(months));
    }

    let years: i64 = months / 12;
    format!("{} year{} ago", years, plural(years))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_human_size_zero() {
        assert_eq!(human_size(0), "0 Bytes");
    }

    #[test]
    fn test_human_size_scaling() {
        assert_eq!(human_size(512), "512 Bytes");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(1_073_741_824), "1.0 GB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_human_size_caps_at_gb() {
        // 2 TiB still renders in GB, the largest supported unit.
        assert_eq!(human_size(2048 * 1024 * 1024 * 1024), "2048.0 GB");
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Local::now();
        assert_eq!(time_ago_at(now, now), "just now");
        assert_eq!(time_ago_at(now - Duration::seconds(59), now), "just now");
        assert_eq!(time_ago_at(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(
            time_ago_at(now - Duration::minutes(5), now),
            "5 minutes ago"
        );
        assert_eq!(time_ago_at(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(time_ago_at(now - Duration::days(2), now), "2 days ago");
        assert_eq!(time_ago_at(now - Duration::days(65), now), "2 months ago");
    }

    #[test]
    fn test_time_ago_future_clamps_to_now() {
        let now = Local::now();
        assert_eq!(time_ago_at(now + Duration::minutes(5), now), "just now");
    }
}
