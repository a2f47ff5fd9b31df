use std::path::PathBuf;

use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::view::ViewMode;
use calgrid_core::Category;
use owo_colors::OwoColorize;

use crate::render::Render;

/// Settings to write back to the config file.
#[derive(Debug, Default)]
pub struct ConfigArgs {
    pub events_file: Option<PathBuf>,
    pub default_view: Option<ViewMode>,
    pub categories: Vec<Category>,
    pub clear_categories: bool,
}

impl ConfigArgs {
    fn has_changes(&self) -> bool {
        self.events_file.is_some()
            || self.default_view.is_some()
            || !self.categories.is_empty()
            || self.clear_categories
    }
}

/// Apply `args` on top of `config`. Given categories replace the list.
pub fn apply_changes(config: &mut CalgridConfig, args: ConfigArgs) {
    if let Some(events_file) = args.events_file {
        config.events_file = events_file;
    }
    if let Some(view) = args.default_view {
        config.default_view = view;
    }
    if args.clear_categories {
        config.default_categories.clear();
    }
    if !args.categories.is_empty() {
        config.default_categories = args.categories;
        config.default_categories.dedup();
    }
}

/// Show the active configuration, saving any changes first.
pub fn run(config: &CalgridConfig, args: ConfigArgs) -> Result<()> {
    let config_path = CalgridConfig::config_path()?;

    let config = if args.has_changes() {
        let mut on_disk = CalgridConfig::load_file(&config_path)?;
        apply_changes(&mut on_disk, args);
        on_disk.save(&config_path)?;
        tracing::info!(path = %config_path.display(), "saved config");
        println!("{} {}", "Saved".green(), config_path.display());
        println!();

        CalgridConfig::load_from(&config_path)?
    } else {
        config.clone()
    };

    println!("{}", "Paths".bold());
    println!("  Config:      {}", config_path.display());
    println!("  Events:      {}", config.events_path().display());

    println!();
    println!("{}", "Defaults".bold());
    println!("  View:        {}", config.default_view);
    let categories = if config.default_categories.is_empty() {
        "all".dimmed().to_string()
    } else {
        config
            .default_categories
            .iter()
            .map(|c| c.render())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("  Categories:  {}", categories);

    Ok(())
}
