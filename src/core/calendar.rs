/// Calendar days and the clock the store reads them from.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of the persisted day marker, e.g. "Sun Oct 18 2026".
const DAY_KEY_FORMAT: &str = "%a %b %d %Y";

/// A calendar day. The daily quest set is valid for exactly one `DayKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey(pub NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The string written to storage. Only ever compared for equality
    /// against a later day's marker; never parsed back.
    pub fn marker(&self) -> String {
        self.to_string()
    }

    /// True when `stored` is the marker of this day.
    pub fn matches_marker(&self, stored: &str) -> bool {
        self.marker() == stored
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

/// Source of "now". Injected into the store so tests can pin the date.
pub trait Clock {
    /// Today's calendar day.
    fn today(&self) -> DayKey;

    /// Milliseconds since the Unix epoch, used for generated IDs.
    fn now_millis(&self) -> i64;
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DayKey {
        DayKey(Local::now().date_naive())
    }

    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Midnight of the given day.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> DayKey {
        DayKey(self.now.date())
    }

    fn now_millis(&self) -> i64 {
        self.now.and_utc().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn marker_format() {
        let key = DayKey::new(date(2026, 10, 18));
        assert_eq!(key.marker(), "Sun Oct 18 2026");
        assert_eq!(DayKey::new(date(2026, 3, 4)).marker(), "Wed Mar 04 2026");
    }

    #[test]
    fn matches_marker_is_exact() {
        let key = DayKey::new(date(2026, 10, 18));
        assert!(key.matches_marker("Sun Oct 18 2026"));
        assert!(!key.matches_marker("Mon Oct 19 2026"));
        assert!(!key.matches_marker("2026-10-18"));
    }

    #[test]
    fn day_keys_order_by_date() {
        let a = DayKey::new(date(2026, 10, 18));
        let b = DayKey::new(date(2026, 10, 19));
        assert!(a < b);
        assert_eq!(a, DayKey::new(date(2026, 10, 18)));
    }

    #[test]
    fn fixed_clock_reports_its_day() {
        let clock = FixedClock::on(date(2026, 1, 2));
        assert_eq!(clock.today(), DayKey::new(date(2026, 1, 2)));
        let later = FixedClock::new(date(2026, 1, 2).and_hms_opt(23, 59, 0).unwrap());
        assert_eq!(later.today(), clock.today());
        assert!(later.now_millis() > clock.now_millis());
    }
}
