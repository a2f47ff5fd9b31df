use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::filter::filter_events_for_day;
use calgrid_core::grid::build_year_months;
use calgrid_core::view::{ViewMode, ViewState};
use calgrid_core::CategoryFilter;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use crate::render::render_year;

/// Twelve mini months of `year`, or the month view of one of them.
pub async fn run(
    config: &CalgridConfig,
    year: Option<i32>,
    month: Option<u32>,
    today: NaiveDate,
    filter: CategoryFilter,
) -> Result<()> {
    let year = year.unwrap_or_else(|| today.year());
    let Some(first_day) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        anyhow::bail!("Year {} is out of range", year);
    };

    if let Some(month) = month {
        let mut state = ViewState::new(first_day).with_mode(ViewMode::Year);
        state.select_month(month);
        state.set_mode(ViewMode::Month);
        return super::month::run(config, state, today, filter).await;
    }

    let store = super::load_store(config).await?;
    let events = store.snapshot();

    let months = build_year_months(year, &events, &filter);
    let has_events = |day: NaiveDate| !filter_events_for_day(&events, day, &filter).is_empty();
    println!("{}", render_year(year, &months, has_events, today));

    let total: usize = months.iter().map(|m| m.event_count).sum();
    println!();
    println!("{}", format!("{} events in {}", total, year).dimmed());

    if let Some(note) = super::filter_note(&filter) {
        println!("{}", note.dimmed());
    }

    Ok(())
}
