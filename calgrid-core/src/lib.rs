//! Core of calgrid: the month/year grid engine and event filtering,
//! plus the event model, snapshot store and configuration around it.
//!
//! - `grid` builds padded month grids and year summaries
//! - `filter` selects events by day, hour, month, category and text
//! - `view` holds the day/month/year view state
//! - `store` owns the event collection and hands out immutable snapshots

pub mod category;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod grid;
pub mod store;
pub mod view;

pub use category::{Category, CategoryColor};
pub use error::{CalGridError, CalGridResult};
pub use event::{Event, NewEvent};
pub use filter::CategoryFilter;
