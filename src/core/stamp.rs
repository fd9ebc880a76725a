//! Timestamp formatting
//!
//! The date format is a plain token string, not a strftime pattern: the
//! literal substrings `YYYY`, `MM`, `DD`, `HH`, `mm` and `ss` are each
//! replaced at most once, in that fixed order, and everything else passes
//! through unchanged.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

/// Source of the current moment, injectable for tests
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Render `moment` through the token format string
///
/// Month, day, hour (24h), minute and second are zero-padded to two digits;
/// the year is written as-is. Tokens absent from the format are simply not
/// emitted.
pub fn format_timestamp(moment: NaiveDateTime, format: &str) -> String {
    let substitutions = [
        ("YYYY", moment.year().to_string()),
        ("MM", format!("{:02}", moment.month())),
        ("DD", format!("{:02}", moment.day())),
        ("HH", format!("{:02}", moment.hour())),
        ("mm", format!("{:02}", moment.minute())),
        ("ss", format!("{:02}", moment.second())),
    ];

    let mut out = format.to_string();
    for (token, value) in substitutions {
        out = out.replacen(token, &value, 1);
    }
    out
}
