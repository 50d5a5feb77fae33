//! DateTime display utilities.
//!
//! Wrappers for formatting timestamps and run durations in a consistent,
//! human-readable way using the system timezone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A `Timestamp` reference formatted in the system timezone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Wall-clock time between two timestamps, shown with millisecond precision
/// (e.g. `12.345s`).
pub struct Elapsed<'a> {
    pub start: &'a Timestamp,
    pub end: &'a Timestamp,
}

impl fmt::Display for Elapsed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self
            .end
            .as_millisecond()
            .saturating_sub(self.start.as_millisecond())
            .max(0);
        write!(f, "{}.{:03}s", millis / 1000, millis % 1000)
    }
}
