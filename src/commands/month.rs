use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::filter::filter_events_for_day;
use calgrid_core::grid::build_month_cells;
use calgrid_core::view::ViewState;
use calgrid_core::CategoryFilter;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::{render_event_list, render_month};

/// Step the displayed month `offset` months forward (or back when negative).
/// The selected day stays where it was.
pub fn navigate(state: &mut ViewState, offset: i32) {
    for _ in 0..offset.unsigned_abs() {
        if offset > 0 {
            state.next_month();
        } else {
            state.prev_month();
        }
    }
}

/// Month grid for `state.reference_date`, with the selected day's events below.
pub async fn run(
    config: &CalgridConfig,
    state: ViewState,
    today: NaiveDate,
    filter: CategoryFilter,
) -> Result<()> {
    let store = super::load_store(config).await?;
    let events = store.snapshot();

    let cells = build_month_cells(state.reference_date, &events, &filter);
    println!(
        "{}",
        render_month(&cells, state.reference_date, state.selected_date, today)
    );

    if let Some(note) = super::filter_note(&filter) {
        println!("{}", note.dimmed());
    }

    println!();
    let selected = filter_events_for_day(&events, state.selected_date, &filter);
    let heading = state.selected_date.format("%A, %B %-d, %Y").to_string();
    println!("{}", render_event_list(&heading, &selected));

    Ok(())
}
