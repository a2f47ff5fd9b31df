//! View mode and the reference/selected date pair shared by all views.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which rendering consumes the shared dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Month => "month",
            ViewMode::Year => "year",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "month" => Ok(ViewMode::Month),
            "year" => Ok(ViewMode::Year),
            other => Err(format!("Unknown view '{}'. Expected day, month or year", other)),
        }
    }
}

/// Navigation state of the calendar screen.
///
/// `reference_date` picks the month (or year) on display; `selected_date`
/// is the highlighted day and drives the day view. Changing the mode
/// leaves both untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub reference_date: NaiveDate,
    pub selected_date: NaiveDate,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        ViewState {
            mode: ViewMode::default(),
            reference_date: today,
            selected_date: today,
        }
    }

    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Day-of-month is clamped, so Jan 31 steps to the last day of February.
    pub fn next_month(&mut self) {
        if let Some(date) = self.reference_date.checked_add_months(Months::new(1)) {
            self.reference_date = date;
        }
    }

    pub fn prev_month(&mut self) {
        if let Some(date) = self.reference_date.checked_sub_months(Months::new(1)) {
            self.reference_date = date;
        }
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.reference_date = today;
        self.selected_date = today;
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Year-view click: select the first of `month` in the displayed year.
    pub fn select_month(&mut self, month: u32) {
        if let Some(first) = NaiveDate::from_ymd_opt(self.reference_date.year(), month, 1) {
            self.selected_date = first;
            self.reference_date = first;
        }
    }

    pub fn year(&self) -> i32 {
        self.reference_date.year()
    }
}
