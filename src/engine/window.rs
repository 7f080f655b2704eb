// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar windows and the clock used to resolve "current" periods.
//!
//! The engine never reads the wall clock. Callers turn a [`Clock`] reading
//! into an explicit [`Window`] here and pass that in.

use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar day from the system clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("Unknown period '{}', expected week|month|year", other)),
        }
    }
}

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Sunday through Saturday around `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let start = week_start(date);
        Self::new(start, start + Duration::days(6))
    }

    pub fn month_of(date: NaiveDate) -> Self {
        let start = month_start(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self::new(start, end)
    }

    pub fn year_of(date: NaiveDate) -> Self {
        let start = date.with_ordinal(1).unwrap_or(date);
        let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
        Self::new(start, end)
    }

    pub fn for_period(period: Period, date: NaiveDate) -> Self {
        match period {
            Period::Week => Self::week_of(date),
            Period::Month => Self::month_of(date),
            Period::Year => Self::year_of(date),
        }
    }

    pub fn current(period: Period, clock: &dyn Clock) -> Self {
        Self::for_period(period, clock.today())
    }

    /// Window for a `YYYY-MM` month string.
    pub fn parse_month(month: &str) -> Option<Self> {
        NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
            .ok()
            .map(Self::month_of)
    }
}

/// The Sunday that starts the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2024-05-15 is a Wednesday
        assert_eq!(week_start(ymd(2024, 5, 15)), ymd(2024, 5, 12));
        assert_eq!(week_start(ymd(2024, 5, 12)), ymd(2024, 5, 12));
        assert_eq!(week_start(ymd(2024, 5, 18)), ymd(2024, 5, 12));

        let w = Window::week_of(ymd(2024, 5, 15));
        assert_eq!(w, Window::new(ymd(2024, 5, 12), ymd(2024, 5, 18)));
    }

    #[test]
    fn month_window_handles_leap_february() {
        assert_eq!(
            Window::month_of(ymd(2024, 2, 10)),
            Window::new(ymd(2024, 2, 1), ymd(2024, 2, 29))
        );
        assert_eq!(
            Window::month_of(ymd(2023, 12, 31)),
            Window::new(ymd(2023, 12, 1), ymd(2023, 12, 31))
        );
    }

    #[test]
    fn current_uses_injected_clock() {
        let clock = FixedClock(ymd(2024, 5, 20));
        assert_eq!(
            Window::current(Period::Month, &clock),
            Window::new(ymd(2024, 5, 1), ymd(2024, 5, 31))
        );
        assert_eq!(
            Window::current(Period::Year, &clock),
            Window::new(ymd(2024, 1, 1), ymd(2024, 12, 31))
        );
    }

    #[test]
    fn contains_is_inclusive() {
        let w = Window::new(ymd(2024, 5, 1), ymd(2024, 5, 31));
        assert!(w.contains(ymd(2024, 5, 1)));
        assert!(w.contains(ymd(2024, 5, 31)));
        assert!(!w.contains(ymd(2024, 6, 1)));
    }

    #[test]
    fn parse_month_rejects_garbage() {
        assert_eq!(
            Window::parse_month("2024-05"),
            Some(Window::new(ymd(2024, 5, 1), ymd(2024, 5, 31)))
        );
        assert_eq!(Window::parse_month("2024-13"), None);
        assert!("fortnight".parse::<Period>().is_err());
    }
}
