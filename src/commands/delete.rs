use anyhow::{Context, Result};
use calgrid_core::config::CalgridConfig;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

pub async fn run(config: &CalgridConfig, id: &str, yes: bool) -> Result<()> {
    let mut store = super::load_store(config).await?;

    let title = store
        .get(id)
        .map(|e| e.title.clone())
        .with_context(|| format!("Event '{}' not found. See `calgrid list` for ids", id))?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete \"{}\"? This action cannot be undone.",
                title
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    store.delete(id)?;
    store.save().await?;

    println!("{} {}", "Deleted".red(), title);
    Ok(())
}
