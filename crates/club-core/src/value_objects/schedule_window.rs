//! Calendar window used when listing schedules

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DomainError;

/// Half-open `[start, end)` window of local date-times.
///
/// A schedule falls inside the window when it starts before `end` and has
/// not finished before `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ScheduleWindow {
    /// Explicit window; `start` must not be after `end`
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    /// The whole calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: first_of_next_month(first).and_time(NaiveTime::MIN),
        }
    }

    /// Resolve optional query bounds.
    ///
    /// - both bounds: midnight of each, validated
    /// - start only: from that day to the end of its month
    /// - otherwise: the month containing `today`
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        match (start, end) {
            (Some(start), Some(end)) => {
                Self::new(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
            }
            (Some(start), None) => Self::new(
                start.and_time(NaiveTime::MIN),
                first_of_next_month(start).and_time(NaiveTime::MIN),
            ),
            _ => Ok(Self::month_of(today)),
        }
    }

    #[inline]
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end >= self.start
    }
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        day(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults_to_current_month() {
        let window = ScheduleWindow::resolve(None, None, day(2025, 2, 14)).unwrap();
        assert_eq!(window.start, at(2025, 2, 1, 0));
        assert_eq!(window.end, at(2025, 3, 1, 0));
    }

    #[test]
    fn test_end_only_is_ignored() {
        let window = ScheduleWindow::resolve(None, Some(day(2025, 9, 9)), day(2025, 4, 2)).unwrap();
        assert_eq!(window, ScheduleWindow::month_of(day(2025, 4, 2)));
    }

    #[test]
    fn test_start_only_runs_to_end_of_month() {
        let window = ScheduleWindow::resolve(Some(day(2025, 12, 20)), None, day(2025, 1, 1)).unwrap();
        assert_eq!(window.start, at(2025, 12, 20, 0));
        assert_eq!(window.end, at(2026, 1, 1, 0));
    }

    #[test]
    fn test_explicit_range_is_validated() {
        let err = ScheduleWindow::resolve(Some(day(2025, 5, 2)), Some(day(2025, 5, 1)), day(2025, 5, 1))
            .unwrap_err();
        assert!(err.is_validation());

        let same_day = ScheduleWindow::resolve(Some(day(2025, 5, 1)), Some(day(2025, 5, 1)), day(2025, 5, 1));
        assert!(same_day.is_ok());
    }

    #[test]
    fn test_overlap_rules() {
        let window = ScheduleWindow::month_of(day(2025, 6, 10));
        // spans into the month from May
        assert!(window.overlaps(at(2025, 5, 30, 9), at(2025, 6, 1, 0)));
        // ended before the month
        assert!(!window.overlaps(at(2025, 5, 30, 9), at(2025, 5, 31, 23)));
        // starts exactly at the exclusive end
        assert!(!window.overlaps(at(2025, 7, 1, 0), at(2025, 7, 1, 2)));
        assert!(window.overlaps(at(2025, 6, 30, 23), at(2025, 7, 2, 0)));
    }
}
