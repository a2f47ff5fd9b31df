use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::view::{ViewMode, ViewState};
use chrono::NaiveDate;

/// Render today in the configured (or overridden) view.
pub async fn run(config: &CalgridConfig, view: Option<ViewMode>, today: NaiveDate) -> Result<()> {
    let state = ViewState::new(today).with_mode(view.unwrap_or(config.default_view));
    let filter = config.default_filter();

    match state.mode {
        ViewMode::Day => super::day::run(config, state.selected_date, filter).await,
        ViewMode::Month => super::month::run(config, state, today, filter).await,
        ViewMode::Year => super::year::run(config, Some(state.year()), None, today, filter).await,
    }
}
