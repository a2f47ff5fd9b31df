use anyhow::{Context, Result};
use calgrid_core::config::CalgridConfig;
use calgrid_core::{Category, Event};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::dates::{parse_day, parse_end, parse_time};

/// Fields to change; `None` leaves a field as it is.
pub struct EditArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub end: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub all_day: Option<bool>,
}

pub async fn run(config: &CalgridConfig, id: &str, args: EditArgs, today: NaiveDate) -> Result<()> {
    let mut store = super::load_store(config).await?;

    let current = store
        .get(id)
        .cloned()
        .with_context(|| format!("Event '{}' not found. See `calgrid list` for ids", id))?;

    let updated = apply_edits(current, args, today)?;
    store.update(updated.clone())?;
    store.save().await?;

    println!("{} {}", "Updated".yellow(), updated.render());
    Ok(())
}

fn apply_edits(mut event: Event, args: EditArgs, today: NaiveDate) -> Result<Event> {
    if let Some(title) = args.title {
        event.title = title;
    }
    if let Some(date) = args.date {
        let day = parse_day(&date, today)?;
        event.date = day.and_time(event.date.time());
    }
    if let Some(time) = args.time {
        event.date = event.date.date().and_time(parse_time(&time)?);
    }
    if let Some(end) = args.end {
        event.end_date = if end.trim().is_empty() {
            None
        } else {
            Some(parse_end(&end, today)?)
        };
    }
    if let Some(category) = args.category {
        event.category = category;
    }
    if let Some(description) = args.description {
        event.description = Some(description).filter(|d| !d.trim().is_empty());
    }
    if let Some(location) = args.location {
        event.location = Some(location).filter(|l| !l.trim().is_empty());
    }
    if let Some(all_day) = args.all_day {
        event.all_day = all_day;
    }

    Ok(event)
}
