use chrono::{DateTime, Utc};

/// 100ns intervals between 1601-01-01 and 1970-01-01.
const UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;
const TICKS_PER_SECOND: i64 = 10_000_000;

/// Converts a FILETIME tick count into a UTC timestamp.
///
/// Negative tick counts are not valid file times and yield `None`.
pub fn filetime_to_utc(ticks: i64) -> Option<DateTime<Utc>> {
    if ticks < 0 {
        return None;
    }
    let since_unix = ticks - UNIX_EPOCH_TICKS;
    let secs = since_unix.div_euclid(TICKS_PER_SECOND);
    let nanos = since_unix.rem_euclid(TICKS_PER_SECOND) * 100;
    DateTime::from_timestamp(secs, nanos as u32)
}

/// Converts a UTC timestamp back into FILETIME ticks.
///
/// Returns `None` for timestamps a 64-bit tick count cannot represent.
pub fn utc_to_filetime(time: DateTime<Utc>) -> Option<i64> {
    time.timestamp()
        .checked_mul(TICKS_PER_SECOND)?
        .checked_add(i64::from(time.timestamp_subsec_nanos() / 100))?
        .checked_add(UNIX_EPOCH_TICKS)
}

/// Like [`utc_to_filetime`], saturating at the ends of the tick range.
pub fn utc_to_filetime_saturating(time: DateTime<Utc>) -> i64 {
    utc_to_filetime(time).unwrap_or(if time.timestamp() < 0 { i64::MIN } else { i64::MAX })
}
