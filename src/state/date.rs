/// Day-granularity calendar dates
///
/// The APOD archive is addressed by calendar day only, so this wraps
/// `chrono::NaiveDate` and never carries a time-of-day or timezone.

use chrono::{Days, NaiveDate, Utc};
use rand::Rng;
use std::fmt;

/// Wire format used by the APOD API (`YYYY-MM-DD`)
const ISO_FORMAT: &str = "%Y-%m-%d";

/// A calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// First day published in the archive (1995-06-16)
    pub const EPOCH: CalendarDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
        Some(date) => CalendarDate(date),
        None => panic!("invalid epoch"),
    };

    /// Build a date from year/month/day, `None` if the day doesn't exist
    #[cfg(test)]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    /// Earliest and latest days chrono can represent
    #[cfg(test)]
    pub const MIN: CalendarDate = CalendarDate(NaiveDate::MIN);
    #[cfg(test)]
    pub const MAX: CalendarDate = CalendarDate(NaiveDate::MAX);

    /// Today's UTC calendar day.
    ///
    /// The archive publishes by UTC day, so a local date ahead of UTC would
    /// ask for an entry that doesn't exist yet. Only the application shell
    /// calls this; the navigator gets `today` injected so it stays deterministic.
    pub fn today() -> Self {
        CalendarDate(Utc::now().date_naive())
    }

    /// Parse a `YYYY-MM-DD` string
    pub fn parse_iso(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
            .ok()
            .map(CalendarDate)
    }

    /// Format as `YYYY-MM-DD`
    pub fn to_iso(&self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    /// The day before, `None` at chrono's lower bound
    pub fn previous_day(&self) -> Option<Self> {
        self.0.pred_opt().map(CalendarDate)
    }

    /// The day after, `None` at chrono's upper bound
    pub fn next_day(&self) -> Option<Self> {
        self.0.succ_opt().map(CalendarDate)
    }

    /// Whole days from `other` to `self` (negative if `self` is earlier)
    pub fn days_since(&self, other: CalendarDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    /// Draw a day uniformly from `[EPOCH, today - 1]`, both ends inclusive.
    ///
    /// Falls back to `EPOCH` when that range is empty.
    pub fn random_before<R: Rng + ?Sized>(today: CalendarDate, rng: &mut R) -> Self {
        let last = match today.previous_day() {
            Some(day) => day,
            None => return Self::EPOCH,
        };

        let span = last.days_since(Self::EPOCH);
        if span <= 0 {
            return Self::EPOCH;
        }

        let offset = rng.gen_range(0..=span) as u64;
        Self::EPOCH
            .0
            .checked_add_days(Days::new(offset))
            .map(CalendarDate)
            .unwrap_or(Self::EPOCH)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}
