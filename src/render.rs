//! Terminal rendering for calgrid views.
//!
//! Extension traits and helpers that turn calgrid-core values into
//! colored text using owo_colors.

use calgrid_core::filter::{filter_events_for_hour, ALL_DAY_ANCHOR_HOUR};
use calgrid_core::grid::{CalendarCell, MonthSummary, DAYS_PER_WEEK};
use calgrid_core::{Category, CategoryColor, Event};
use chrono::{Datelike, NaiveDate, Timelike};
use owo_colors::OwoColorize;

/// Width of one month-view cell, in characters
const CELL_WIDTH: usize = 12;

/// Event titles shown per month-view cell before collapsing into "+N more"
const EVENTS_PER_CELL: usize = 2;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAY_INITIALS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        paint(Category::color(*self), self.label())
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let time = format_time(self);
        let tag = format!("[{}]", self.category);
        format!("{} {} {}", time, paint(self.color(), &self.title), tag.dimmed())
    }
}

/// Apply the terminal color for a category color tag.
pub fn paint(color: CategoryColor, text: &str) -> String {
    match color {
        CategoryColor::Blue => text.blue().to_string(),
        CategoryColor::Purple => text.magenta().to_string(),
        CategoryColor::Red => text.red().to_string(),
        CategoryColor::Yellow => text.yellow().to_string(),
        CategoryColor::Gray => text.bright_black().to_string(),
    }
}

/// "10:30", or "all-day" for events without a specific time
pub fn format_time(event: &Event) -> String {
    if event.has_time() {
        format!("{:>7}", event.date.format("%H:%M"))
    } else {
        "all-day".to_string()
    }
}

/// Cut `text` to `width` characters, marking the cut with "…".
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate(text, width), width = width)
}

/// Month grid: one block of lines per week.
pub fn render_month(
    cells: &[CalendarCell<'_>],
    reference: NaiveDate,
    selected: NaiveDate,
    today: NaiveDate,
) -> String {
    let mut lines = Vec::new();

    let title = reference.format("%B %Y").to_string();
    let total_width = CELL_WIDTH * DAYS_PER_WEEK;
    lines.push(format!("{:^width$}", title, width = total_width).bold().to_string());
    lines.push(
        WEEKDAYS
            .iter()
            .map(|d| pad(d, CELL_WIDTH))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in cells.chunks(DAYS_PER_WEEK) {
        lines.push(
            week.iter()
                .map(|cell| render_day_number(cell, selected, today))
                .collect(),
        );

        for slot in 0..=EVENTS_PER_CELL {
            let row: Vec<String> = week.iter().map(|cell| render_cell_slot(cell, slot)).collect();
            if row.iter().any(|s| !s.trim().is_empty()) {
                lines.push(row.concat());
            }
        }
    }

    lines.join("\n")
}

fn render_day_number(cell: &CalendarCell<'_>, selected: NaiveDate, today: NaiveDate) -> String {
    let label = if cell.date == selected {
        format!("[{}]", cell.date.day())
    } else {
        format!(" {}", cell.date.day())
    };
    let padded = pad(&label, CELL_WIDTH);

    if cell.date == today {
        padded.reversed().to_string()
    } else if !cell.in_current_month {
        padded.dimmed().to_string()
    } else if cell.date == selected {
        padded.bold().to_string()
    } else {
        padded
    }
}

/// Text for line `slot` under a day number: an event title, the overflow
/// marker, or blank padding.
fn render_cell_slot(cell: &CalendarCell<'_>, slot: usize) -> String {
    let blank = " ".repeat(CELL_WIDTH);

    if slot < EVENTS_PER_CELL {
        return match cell.events.get(slot) {
            Some(event) => {
                let text = pad(&format!(" {}", event.title), CELL_WIDTH);
                if cell.in_current_month {
                    paint(Event::color(event), &text)
                } else {
                    text.dimmed().to_string()
                }
            }
            None => blank,
        };
    }

    let hidden = cell.events.len().saturating_sub(EVENTS_PER_CELL);
    if hidden > 0 {
        pad(&format!(" +{} more", hidden), CELL_WIDTH)
            .dimmed()
            .to_string()
    } else {
        blank
    }
}

/// Event list under a heading, sorted as given.
pub fn render_event_list(heading: &str, events: &[&Event]) -> String {
    let mut lines = vec![heading.bold().to_string()];

    if events.is_empty() {
        lines.push(format!("  {}", "No events scheduled for this day".dimmed()));
    } else {
        for event in events {
            lines.push(format!("  {}", event.render()));
            if let Some(desc) = &event.description {
                lines.push(format!("          {}", desc.dimmed()));
            }
        }
    }

    lines.join("\n")
}

/// Day view: one row per hour with the events that start in it.
pub fn render_day(day: NaiveDate, day_events: &[&Event]) -> String {
    let mut lines = vec![day.format("%A, %B %-d, %Y").to_string().bold().to_string()];

    for hour in 0..24 {
        let label = format!("{:02}:00", hour);
        let events = filter_events_for_hour(day_events, hour);

        if events.is_empty() {
            lines.push(label.dimmed().to_string());
            continue;
        }

        for (i, event) in events.iter().enumerate() {
            let gutter = if i == 0 { label.clone() } else { " ".repeat(label.len()) };
            let marker = if event.all_day && hour == ALL_DAY_ANCHOR_HOUR {
                "all-day ".dimmed().to_string()
            } else if event.date.minute() != 0 {
                format!(":{:02}    ", event.date.minute()).dimmed().to_string()
            } else {
                " ".repeat(8)
            };
            let mut line = format!("{}  {}{}", gutter, marker, paint(Event::color(event), &event.title));
            if let Some(location) = &event.location {
                line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
            }
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Year view: mini months three to a row, each with its event count.
pub fn render_year(
    year: i32,
    months: &[MonthSummary],
    has_events: impl Fn(NaiveDate) -> bool,
    today: NaiveDate,
) -> String {
    const MINI_WIDTH: usize = 3 * DAYS_PER_WEEK;
    const GAP: &str = "    ";

    let mut lines = vec![format!("{:^width$}", year, width = MINI_WIDTH * 3 + GAP.len() * 2)
        .bold()
        .to_string()];

    for chunk in months.chunks(3) {
        let blocks: Vec<Vec<String>> = chunk
            .iter()
            .map(|m| render_mini_month(m, &has_events, today, MINI_WIDTH))
            .collect();
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);

        lines.push(String::new());
        for row in 0..height {
            let parts: Vec<String> = blocks
                .iter()
                .map(|b| b.get(row).cloned().unwrap_or_else(|| " ".repeat(MINI_WIDTH)))
                .collect();
            lines.push(parts.join(GAP));
        }
    }

    lines.join("\n")
}

fn render_mini_month(
    summary: &MonthSummary,
    has_events: &impl Fn(NaiveDate) -> bool,
    today: NaiveDate,
    width: usize,
) -> Vec<String> {
    let mut block = Vec::new();

    let name = summary.first_day.format("%B").to_string();
    block.push(pad(&name, width).bold().to_string());
    block.push(
        WEEKDAY_INITIALS
            .iter()
            .map(|d| format!("{:>2} ", d))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in summary.grid.rows() {
        let line: String = week
            .iter()
            .map(|&date| {
                if !summary.grid.in_current_month(date) {
                    return "   ".to_string();
                }
                let text = format!("{:>2} ", date.day());
                if date == today {
                    text.reversed().to_string()
                } else if has_events(date) {
                    text.blue().bold().to_string()
                } else {
                    text
                }
            })
            .collect();
        block.push(line);
    }

    let count = match summary.event_count {
        0 => String::new(),
        1 => "1 event".to_string(),
        n => format!("{} events", n),
    };
    block.push(pad(&count, width).dimmed().to_string());

    block
}
