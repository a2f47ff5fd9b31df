pub mod add;
pub mod categories;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod list;
pub mod month;
pub mod show;
pub mod year;

use anyhow::{Context, Result};
use calgrid_core::config::CalgridConfig;
use calgrid_core::store::EventStore;
use calgrid_core::{Category, CategoryFilter};

/// Open the events file named in the config.
pub async fn load_store(config: &CalgridConfig) -> Result<EventStore> {
    let path = config.events_path();
    tracing::debug!(path = %path.display(), "opening events file");
    EventStore::open(&path)
        .await
        .with_context(|| format!("Could not load events from {}", path.display()))
}

/// Categories from the command line win; otherwise the configured default.
pub fn resolve_filter(categories: Vec<Category>, config: &CalgridConfig) -> CategoryFilter {
    if categories.is_empty() {
        config.default_filter()
    } else {
        categories.into_iter().collect()
    }
}

/// Line describing the active filter, if any.
pub fn filter_note(filter: &CategoryFilter) -> Option<String> {
    if filter.is_empty() {
        return None;
    }
    let names: Vec<_> = filter.iter().map(|c| c.as_str()).collect();
    Some(format!("Filtered to: {}", names.join(", ")))
}
