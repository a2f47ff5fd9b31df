//! Parsing of dates and times typed on the command line.

use anyhow::{Context, Result};
use calgrid_core::event::parse_wall_clock;
use calgrid_core::CalGridError;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a day: `YYYY-MM-DD`, `today`, `tomorrow` or `yesterday`.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let relative = match input.trim().to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => None,
    };
    if let Some(day) = relative {
        return Ok(day);
    }

    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| CalGridError::InvalidDate(input.to_string()).into())
}

/// The given day, or today when none was passed.
pub fn resolve_day(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match input {
        Some(s) => parse_day(s, today),
        None => Ok(today),
    }
}

/// Parse `HH:MM`.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .with_context(|| format!("Invalid time '{}'. Expected HH:MM", input))
}

/// Combine a day argument with an optional time; no time means midnight.
pub fn parse_start(day: &str, time: Option<&str>, today: NaiveDate) -> Result<NaiveDateTime> {
    let day = parse_day(day, today)?;
    let time = match time {
        Some(t) => parse_time(t)?,
        None => NaiveTime::MIN,
    };
    Ok(day.and_time(time))
}

/// Parse an end timestamp: a relative day word or anything the store accepts.
pub fn parse_end(input: &str, today: NaiveDate) -> Result<NaiveDateTime> {
    if let Some(dt) = parse_wall_clock(input) {
        return Ok(dt);
    }
    Ok(parse_day(input, today)?.and_time(NaiveTime::MIN))
}
