//! Month and year grid construction.
//!
//! Weeks start on Sunday. A month grid is the month's days padded with
//! the tail of the previous month and the head of the next one so that
//! every row holds exactly seven dates.

use chrono::{Datelike, Days, NaiveDate};

use crate::event::Event;
use crate::filter::{CategoryFilter, events_for_month, filter_events_for_day};

pub const DAYS_PER_WEEK: usize = 7;

/// The dates shown for one month, padding included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
    /// Padding days taken from the previous month
    pub leading: usize,
    /// Padding days taken from the next month
    pub trailing: usize,
    pub dates: Vec<NaiveDate>,
}

impl MonthGrid {
    /// Build the grid for the month containing `reference`.
    pub fn for_date(reference: NaiveDate) -> Self {
        let first = reference - Days::new(u64::from(reference.day0()));
        let month_days: Vec<NaiveDate> = first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .collect();
        let last = month_days.last().copied().unwrap_or(first);

        // Padding stops short at the ends of the representable calendar.
        let before: Vec<NaiveDate> = (1..=u64::from(first.weekday().num_days_from_sunday()))
            .rev()
            .filter_map(|n| first.checked_sub_days(Days::new(n)))
            .collect();
        let after: Vec<NaiveDate> = (1..=u64::from(6 - last.weekday().num_days_from_sunday()))
            .filter_map(|n| last.checked_add_days(Days::new(n)))
            .collect();
        let leading = before.len();
        let trailing = after.len();

        let mut dates = Vec::with_capacity(leading + month_days.len() + trailing);
        dates.extend(before);
        dates.extend(month_days);
        dates.extend(after);

        MonthGrid {
            year: first.year(),
            month: first.month(),
            leading,
            trailing,
            dates,
        }
    }

    /// The grid split into Sunday-to-Saturday weeks.
    pub fn rows(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.dates.chunks(DAYS_PER_WEEK)
    }

    pub fn row_count(&self) -> usize {
        self.dates.len() / DAYS_PER_WEEK
    }

    /// Only the days that belong to the month itself.
    pub fn month_days(&self) -> &[NaiveDate] {
        &self.dates[self.leading..self.dates.len() - self.trailing]
    }

    pub fn first_day(&self) -> NaiveDate {
        self.dates[self.leading]
    }

    pub fn in_current_month(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Ordered grid dates for the month containing `reference`.
pub fn build_month_grid(reference: NaiveDate) -> Vec<NaiveDate> {
    MonthGrid::for_date(reference).dates
}

/// One rendered cell of the month view.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell<'a> {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub events: Vec<&'a Event>,
}

/// Grid cells for the month containing `reference`, each carrying its
/// filtered events.
pub fn build_month_cells<'a>(
    reference: NaiveDate,
    events: &'a [Event],
    filter: &CategoryFilter,
) -> Vec<CalendarCell<'a>> {
    let grid = MonthGrid::for_date(reference);

    grid.dates
        .iter()
        .map(|&date| CalendarCell {
            date,
            in_current_month: grid.in_current_month(date),
            events: filter_events_for_day(events, date, filter),
        })
        .collect()
}

/// A month as shown in the year view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    /// 1-based month number
    pub month: u32,
    pub first_day: NaiveDate,
    pub grid: MonthGrid,
    /// Filtered events dated inside the month (padding days excluded)
    pub event_count: usize,
}

/// January through December of `year`.
pub fn build_year_months(
    year: i32,
    events: &[Event],
    filter: &CategoryFilter,
) -> Vec<MonthSummary> {
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|first_day| MonthSummary {
            month: first_day.month(),
            first_day,
            grid: MonthGrid::for_date(first_day),
            event_count: events_for_month(events, year, first_day.month(), filter).len(),
        })
        .collect()
}
