// src/utils/time.rs

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Utc};

/// Bounds of the current calendar day in server-local time, as UTC instants.
/// Daily quest caps roll over at local midnight.
pub fn local_day_bounds() -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = Local::now().date_naive().and_time(NaiveTime::MIN);
    let start = match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        // Local midnight skipped by a DST transition; fall back to now.
        None => Utc::now(),
    };
    (start, start + Duration::days(1) - Duration::seconds(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_window_spans_just_under_24_hours() {
        let (start, end) = local_day_bounds();
        assert_eq!(end - start, Duration::days(1) - Duration::seconds(1));
        let now = Utc::now();
        assert!(start <= now && now <= end);
    }
}
