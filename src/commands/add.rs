use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::{Category, NewEvent};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::dates::{parse_end, parse_start};

pub struct AddArgs {
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub end: Option<String>,
    pub category: Category,
    pub description: Option<String>,
    pub location: Option<String>,
    pub all_day: bool,
}

pub async fn run(config: &CalgridConfig, args: AddArgs, today: NaiveDate) -> Result<()> {
    let new = build_new_event(args, today)?;

    let mut store = super::load_store(config).await?;
    let event = store.add(new)?;
    store.save().await?;

    println!("{} {}", "Created".green(), event.render());
    println!("  {}", event.id.dimmed());
    Ok(())
}

fn build_new_event(args: AddArgs, today: NaiveDate) -> Result<NewEvent> {
    if args.all_day && args.time.is_some() {
        anyhow::bail!("An all-day event cannot have a start time");
    }

    let date = parse_start(&args.date, args.time.as_deref(), today)?;
    let end_date = args.end.as_deref().map(|e| parse_end(e, today)).transpose()?;

    Ok(NewEvent {
        title: args.title,
        date,
        end_date,
        category: args.category,
        description: non_empty(args.description),
        location: non_empty(args.location),
        all_day: args.all_day,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
