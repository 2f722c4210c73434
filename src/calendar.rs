//! Rate calendar - the window of dates the rate source can answer for

use chrono::{Duration, Local, NaiveDate};

/// First day of the NBP historical archive (table A)
pub fn nbp_history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2002, 1, 2).unwrap_or(NaiveDate::MIN)
}

/// Textual pattern dates are entered in
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Closed range of dates a rate can be requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

/// Why a date falls outside the supported range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeViolation {
    BeforeHistory(NaiveDate),
    InFuture(NaiveDate),
}

impl SupportedRange {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self { first, last }
    }

    /// NBP history start up to `today`
    pub fn until(today: NaiveDate) -> Self {
        Self::new(nbp_history_start(), today)
    }

    /// NBP history start up to the local system date
    pub fn until_today() -> Self {
        Self::until(Local::now().date_naive())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    pub fn check(&self, date: NaiveDate) -> std::result::Result<(), RangeViolation> {
        if date < self.first {
            Err(RangeViolation::BeforeHistory(self.first))
        } else if date > self.last {
            Err(RangeViolation::InFuture(self.last))
        } else {
            Ok(())
        }
    }
}

/// The calendar day before `date`, or None at chrono's minimum date
pub fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_history_start() {
        assert_eq!(nbp_history_start(), date(2002, 1, 2));
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let range = SupportedRange::until(date(2024, 6, 30));
        assert!(range.contains(date(2002, 1, 2)));
        assert!(range.contains(date(2024, 6, 30)));
        assert!(!range.contains(date(2002, 1, 1)));
        assert!(!range.contains(date(2024, 7, 1)));
    }

    #[test]
    fn test_range_violation_kinds() {
        let range = SupportedRange::until(date(2024, 6, 30));
        assert_eq!(
            range.check(date(2001, 12, 31)),
            Err(RangeViolation::BeforeHistory(nbp_history_start()))
        );
        assert_eq!(
            range.check(date(2025, 1, 1)),
            Err(RangeViolation::InFuture(date(2024, 6, 30)))
        );
        assert_eq!(range.check(date(2010, 5, 5)), Ok(()));
    }

    #[test]
    fn test_previous_day_crosses_boundaries() {
        assert_eq!(previous_day(date(2024, 3, 1)), Some(date(2024, 2, 29)));
        assert_eq!(previous_day(date(2024, 1, 1)), Some(date(2023, 12, 31)));
        assert_eq!(previous_day(NaiveDate::MIN), None);
    }

    #[test]
    fn test_until_today_ends_today() {
        let range = SupportedRange::until_today();
        assert_eq!(range.first, nbp_history_start());
        assert!(range.last >= date(2024, 1, 1));
    }
}
