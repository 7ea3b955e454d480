//! Fixed-width, boundary-aligned time buckets.
//!
//! A bucket boundary is computed by truncating the timestamp to the bucket
//! granularity: a 10-minute bucket is `floor(minutes_since_epoch / 10) * 10`.
//! This is not a sliding window. Two events nine minutes apart can land in
//! different buckets if they straddle a boundary; the reference system's
//! thresholds were calibrated against this truncation, so it is kept
//! exactly.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Minutes since the Unix epoch, floored to `width`-minute alignment.
pub fn aligned_bucket(ts: DateTime<Utc>, width: i64) -> i64 {
    debug_assert!(width > 0);
    let minutes = ts.timestamp().div_euclid(60);
    minutes.div_euclid(width) * width
}

/// Calendar-day key (`YYYY-MM-DD`) in the supplied local offset.
pub fn day_key(ts: DateTime<Utc>, tz: FixedOffset) -> String {
    ts.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// Hour key (`YYYY-MM-DDTHH`) in the supplied local offset.
pub fn hour_key(ts: DateTime<Utc>, tz: FixedOffset) -> String {
    ts.with_timezone(&tz).format("%Y-%m-%dT%H").to_string()
}

/// Hour of day (0-23) in the supplied local offset.
pub fn local_hour(ts: DateTime<Utc>, tz: FixedOffset) -> u32 {
    ts.with_timezone(&tz).hour()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 25, h, m, 0).unwrap()
    }

    fn utc_fix() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn aligned_bucket_truncates_to_boundary() {
        // 10:00 and 10:09 share a 10-minute bucket; 10:10 starts a new one.
        assert_eq!(aligned_bucket(at(10, 0), 10), aligned_bucket(at(10, 9), 10));
        assert_ne!(aligned_bucket(at(10, 9), 10), aligned_bucket(at(10, 10), 10));
    }

    #[test]
    fn straddling_events_split_even_when_close() {
        // 9 minutes apart across a boundary: different buckets, by design.
        assert_ne!(aligned_bucket(at(10, 8), 10), aligned_bucket(at(10, 17), 10));
    }

    #[test]
    fn aligned_bucket_is_multiple_of_width() {
        let b = aligned_bucket(at(13, 37), 5);
        assert_eq!(b % 5, 0);
    }

    #[test]
    fn pre_epoch_timestamps_still_align() {
        let ts = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 30).unwrap();
        let b = aligned_bucket(ts, 10);
        assert_eq!(b % 10, 0);
        assert!(b < 0);
    }

    #[test]
    fn day_key_respects_offset() {
        // 23:30 UTC is already the next day at UTC+2.
        let ts = at(23, 30);
        assert_eq!(day_key(ts, utc_fix()), "2026-08-25");
        let plus2 = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(day_key(ts, plus2), "2026-08-26");
    }

    #[test]
    fn hour_key_includes_date() {
        assert_eq!(hour_key(at(7, 45), utc_fix()), "2026-08-25T07");
    }

    #[test]
    fn local_hour_shifts_with_offset() {
        let minus5 = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(local_hour(at(3, 0), utc_fix()), 3);
        assert_eq!(local_hour(at(3, 0), minus5), 22);
    }
}
