use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::filter::search_events;
use calgrid_core::CategoryFilter;
use owo_colors::OwoColorize;

use crate::render::paint;

/// Admin listing of every event, optionally searched and filtered.
pub async fn run(
    config: &CalgridConfig,
    search: Option<&str>,
    filter: CategoryFilter,
    json: bool,
) -> Result<()> {
    let store = super::load_store(config).await?;
    let events = store.snapshot();
    let matching = search_events(&events, search.unwrap_or(""), &filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&matching)?);
        return Ok(());
    }

    if matching.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &matching {
        let when = if event.has_time() {
            event.date.format("%b %-d, %Y %H:%M").to_string()
        } else {
            event.date.format("%b %-d, %Y").to_string()
        };

        println!(
            "{} {} {} {}",
            paint(calgrid_core::Event::color(event), "▌"),
            event.title.bold(),
            when.dimmed(),
            format!("({})", event.category.label()).dimmed()
        );
        if let Some(desc) = &event.description {
            println!("  {}", desc);
        }
        if let Some(location) = &event.location {
            println!("  {}", format!("@ {}", location).dimmed());
        }
        println!("  {}", event.id.dimmed());
    }

    Ok(())
}
