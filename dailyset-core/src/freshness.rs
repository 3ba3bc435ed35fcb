//! Staleness boundary computation
//!
//! The cached daily set goes stale at a fixed hour of day in a configured
//! IANA time zone. Boundaries are derived from real zone rules, so the
//! UTC offset follows daylight-saving transitions.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Today's refresh boundary: the current date in `tz` at `refresh_hour`:00.
///
/// Recomputed from wall-clock time on every check, never persisted.
pub fn stale_boundary(now: DateTime<Utc>, tz: Tz, refresh_hour: u32) -> DateTime<Utc> {
    let today = now.with_timezone(&tz).date_naive();
    local_at_hour(tz, today, refresh_hour).with_timezone(&Utc)
}

/// The next refresh boundary strictly after `now` (today's if still ahead,
/// otherwise tomorrow's). Used by the daily scheduler.
pub fn next_boundary(now: DateTime<Utc>, tz: Tz, refresh_hour: u32) -> DateTime<Utc> {
    let today = now.with_timezone(&tz).date_naive();
    let boundary = local_at_hour(tz, today, refresh_hour).with_timezone(&Utc);
    if boundary > now {
        boundary
    } else {
        let tomorrow = today.succ_opt().unwrap_or(today);
        local_at_hour(tz, tomorrow, refresh_hour).with_timezone(&Utc)
    }
}

/// Whether the persisted refresh timestamp predates the boundary.
///
/// A missing timestamp is maximally stale. Otherwise the set is stale only
/// once the boundary has passed and the timestamp is strictly before it.
pub fn is_stale(
    last_refresh: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    boundary: DateTime<Utc>,
) -> bool {
    match last_refresh {
        None => true,
        Some(ts) => now >= boundary && ts < boundary,
    }
}

/// Resolve a local wall-clock hour on a given date to an instant.
///
/// An ambiguous local time (clocks fell back) resolves to the earlier
/// instant; a skipped local time (clocks sprang forward) advances one hour.
fn local_at_hour(tz: Tz, date: NaiveDate, hour: u32) -> DateTime<Tz> {
    match tz.with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let shifted = NaiveDateTime::new(date, chrono::NaiveTime::default())
                + Duration::hours(i64::from(hour) + 1);
            match tz.from_local_datetime(&shifted) {
                LocalResult::Single(t) => t,
                LocalResult::Ambiguous(earliest, _) => earliest,
                LocalResult::None => tz.from_utc_datetime(&shifted),
            }
        }
    }
}
