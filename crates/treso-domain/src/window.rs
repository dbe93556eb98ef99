//! Half-open date intervals used for projections and reporting.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Defines a `[start, end)` reporting window.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end <= start {
            return Err(DateWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Window of `days` days beginning at `start`. Fails when the end falls outside the
    /// representable calendar.
    pub fn starting_at(start: NaiveDate, days: u32) -> Result<Self, DateWindowError> {
        let end = start
            .checked_add_signed(Duration::days(i64::from(days)))
            .ok_or(DateWindowError::InvalidRange)?;
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Splits the window into consecutive chunks of `width` days. The last chunk is
    /// clipped to the window end.
    pub fn split(&self, width: u32) -> Vec<DateWindow> {
        let width = Duration::days(i64::from(width.max(1)));
        let mut chunks = Vec::new();
        let mut cursor = self.start;
        while cursor < self.end {
            let next = cursor
                .checked_add_signed(width)
                .map_or(self.end, |next| next.min(self.end));
            chunks.push(DateWindow {
                start: cursor,
                end: next,
            });
            cursor = next;
        }
        chunks
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateWindow`] values.
pub enum DateWindowError {
    InvalidRange,
}

impl fmt::Display for DateWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindowError::InvalidRange => f.write_str("date window end must be after start"),
        }
    }
}

impl std::error::Error for DateWindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_empty_range() {
        let day = date(2024, 5, 1);
        assert_eq!(DateWindow::new(day, day), Err(DateWindowError::InvalidRange));
    }

    #[test]
    fn contains_is_half_open() {
        let window = DateWindow::new(date(2024, 5, 1), date(2024, 5, 8)).unwrap();
        assert!(window.contains(date(2024, 5, 1)));
        assert!(window.contains(date(2024, 5, 7)));
        assert!(!window.contains(date(2024, 5, 8)));
    }

    #[test]
    fn split_clips_last_chunk() {
        let window = DateWindow::starting_at(date(2024, 5, 1), 30).unwrap();
        let chunks = window.split(7);
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0].end, date(2024, 5, 8));
        assert_eq!(chunks[4].start, date(2024, 5, 29));
        assert_eq!(chunks[4].end, date(2024, 5, 31));
        assert_eq!(chunks[4].days(), 2);
    }

    #[test]
    fn window_past_the_calendar_end_is_rejected() {
        let day = date(2024, 6, 3);
        assert_eq!(
            DateWindow::starting_at(day, u32::MAX),
            Err(DateWindowError::InvalidRange)
        );
        assert_eq!(
            DateWindow::starting_at(NaiveDate::MAX, 1),
            Err(DateWindowError::InvalidRange)
        );
    }

    #[test]
    fn split_stops_at_the_calendar_end() {
        let start = NaiveDate::MAX - Duration::days(3);
        let window = DateWindow::new(start, NaiveDate::MAX).unwrap();
        let chunks = window.split(u32::MAX);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].end, NaiveDate::MAX);
    }
}
