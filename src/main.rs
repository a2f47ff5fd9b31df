mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::view::{ViewMode, ViewState};
use calgrid_core::Category;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(version, about = "Month, day and year calendar grids for your events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid
    Month {
        /// Any date inside the month (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(short, long)]
        date: Option<String>,

        /// Show the month after (repeat to go further)
        #[arg(short, long, action = ArgAction::Count, conflicts_with = "prev")]
        next: u8,

        /// Show the month before (repeat to go further)
        #[arg(short, long, action = ArgAction::Count)]
        prev: u8,

        /// Only show these categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<Category>,
    },
    /// Show a single day hour by hour
    Day {
        /// Day to show (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(short, long)]
        date: Option<String>,

        /// Only show these categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<Category>,
    },
    /// Show all twelve months of a year
    Year {
        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Open one month of the year (1-12) in the month view
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Only show these categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<Category>,
    },
    /// Show today in the configured default view
    Show {
        /// Override the configured view (day, month or year)
        #[arg(short, long)]
        view: Option<ViewMode>,
    },
    /// List and search all events
    List {
        /// Match against title and description (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only list these categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<Category>,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new event
    Add {
        /// Event title
        #[arg(short, long)]
        title: String,

        /// Event day (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(short, long)]
        date: String,

        /// Start time (HH:MM)
        #[arg(long)]
        time: Option<String>,

        /// End of a ranged event (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long, default_value = "meeting")]
        category: Category,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Mark the event as lasting all day
        #[arg(long)]
        all_day: bool,
    },
    /// Change fields of an existing event
    Edit {
        /// Event id (see `calgrid list`)
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        /// New day (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(short, long)]
        date: Option<String>,

        /// New start time (HH:MM)
        #[arg(long)]
        time: Option<String>,

        /// New end (YYYY-MM-DD or YYYY-MM-DDTHH:MM, empty string clears it)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        category: Option<Category>,

        /// New description (empty string clears it)
        #[arg(long)]
        description: Option<String>,

        /// New location (empty string clears it)
        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        all_day: Option<bool>,
    },
    /// Delete an event
    Delete {
        /// Event id (see `calgrid list`)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List event categories and their colors
    Categories,
    /// Show or change the configuration
    Config {
        /// Where events are stored
        #[arg(long)]
        events_file: Option<PathBuf>,

        /// View used by `calgrid show` (day, month or year)
        #[arg(long)]
        default_view: Option<ViewMode>,

        /// Categories shown when none are given (repeatable, replaces the list)
        #[arg(short, long = "category")]
        categories: Vec<Category>,

        /// Show all categories by default
        #[arg(long, conflicts_with = "categories")]
        clear_categories: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = CalgridConfig::load()?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Month {
            date,
            next,
            prev,
            categories,
        } => {
            let date = utils::dates::resolve_day(date.as_deref(), today)?;
            let mut state = ViewState::new(date);
            commands::month::navigate(&mut state, i32::from(next) - i32::from(prev));
            let filter = commands::resolve_filter(categories, &config);
            commands::month::run(&config, state, today, filter).await
        }
        Commands::Day { date, categories } => {
            let date = utils::dates::resolve_day(date.as_deref(), today)?;
            let filter = commands::resolve_filter(categories, &config);
            commands::day::run(&config, date, filter).await
        }
        Commands::Year {
            year,
            month,
            categories,
        } => {
            let filter = commands::resolve_filter(categories, &config);
            commands::year::run(&config, year, month, today, filter).await
        }
        Commands::Show { view } => commands::show::run(&config, view, today).await,
        Commands::List {
            search,
            categories,
            json,
        } => {
            let filter = commands::resolve_filter(categories, &config);
            commands::list::run(&config, search.as_deref(), filter, json).await
        }
        Commands::Add {
            title,
            date,
            time,
            end,
            category,
            description,
            location,
            all_day,
        } => {
            let args = commands::add::AddArgs {
                title,
                date,
                time,
                end,
                category,
                description,
                location,
                all_day,
            };
            commands::add::run(&config, args, today).await
        }
        Commands::Edit {
            id,
            title,
            date,
            time,
            end,
            category,
            description,
            location,
            all_day,
        } => {
            let args = commands::edit::EditArgs {
                title,
                date,
                time,
                end,
                category,
                description,
                location,
                all_day,
            };
            commands::edit::run(&config, &id, args, today).await
        }
        Commands::Delete { id, yes } => commands::delete::run(&config, &id, yes).await,
        Commands::Categories => {
            commands::categories::run();
            Ok(())
        }
        Commands::Config {
            events_file,
            default_view,
            categories,
            clear_categories,
        } => {
            let args = commands::config::ConfigArgs {
                events_file,
                default_view,
                categories,
                clear_categories,
            };
            commands::config::run(&config, args)
        }
    }
}

/// Logs go to stderr so rendered grids and `--json` output stay clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
