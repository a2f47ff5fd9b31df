use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::filter::filter_events_for_day;
use calgrid_core::CategoryFilter;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::render_day;

pub async fn run(config: &CalgridConfig, date: NaiveDate, filter: CategoryFilter) -> Result<()> {
    let store = super::load_store(config).await?;
    let events = store.snapshot();

    let day_events = filter_events_for_day(&events, date, &filter);
    println!("{}", render_day(date, &day_events));

    if let Some(note) = super::filter_note(&filter) {
        println!("{}", note.dimmed());
    }

    Ok(())
}
