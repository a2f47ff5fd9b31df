//! Event selection by day, hour, month, category and text.
//!
//! All functions borrow the event slice and return references in a
//! deterministic order: ascending by timestamp, ties kept in input order.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::category::Category;
use crate::event::Event;

/// Hour row that all-day events are listed under in the day view.
pub const ALL_DAY_ANCHOR_HOUR: u32 = 0;

/// Set of allowed categories. An empty filter allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    allowed: BTreeSet<Category>,
}

impl CategoryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn allows(&self, category: Category) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&category)
    }

    /// Add the category if absent, remove it if present.
    pub fn toggle(&mut self, category: Category) {
        if !self.allowed.remove(&category) {
            self.allowed.insert(category);
        }
    }

    pub fn clear(&mut self) {
        self.allowed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.allowed.iter().copied()
    }
}

impl FromIterator<Category> for CategoryFilter {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        CategoryFilter {
            allowed: iter.into_iter().collect(),
        }
    }
}

/// Stable sort by timestamp.
pub fn sort_by_date(events: &mut [&Event]) {
    events.sort_by_key(|e| e.date);
}

/// Events dated on `day` whose category passes `filter`.
pub fn filter_events_for_day<'a>(
    events: &'a [Event],
    day: NaiveDate,
    filter: &CategoryFilter,
) -> Vec<&'a Event> {
    let mut matching: Vec<&Event> = events
        .iter()
        .filter(|e| e.day() == day && filter.allows(e.category))
        .collect();
    sort_by_date(&mut matching);
    matching
}

/// Select the events listed in one hour row of a day.
///
/// Timed events match on their hour. All-day events appear once, in the
/// [`ALL_DAY_ANCHOR_HOUR`] row, regardless of their stored time-of-day.
pub fn filter_events_for_hour<'a>(day_events: &[&'a Event], hour: u32) -> Vec<&'a Event> {
    day_events
        .iter()
        .copied()
        .filter(|e| {
            if e.all_day {
                hour == ALL_DAY_ANCHOR_HOUR
            } else {
                e.hour() == hour
            }
        })
        .collect()
}

/// Events dated within the given month (1-based) of `year`.
pub fn events_for_month<'a>(
    events: &'a [Event],
    year: i32,
    month: u32,
    filter: &CategoryFilter,
) -> Vec<&'a Event> {
    let mut matching: Vec<&Event> = events
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month && filter.allows(e.category))
        .collect();
    sort_by_date(&mut matching);
    matching
}

/// Admin listing: case-insensitive match on title or description.
///
/// An empty query matches every event.
pub fn search_events<'a>(
    events: &'a [Event],
    query: &str,
    filter: &CategoryFilter,
) -> Vec<&'a Event> {
    let needle = query.trim().to_lowercase();

    let mut matching: Vec<&Event> = events
        .iter()
        .filter(|e| filter.allows(e.category))
        .filter(|e| {
            needle.is_empty()
                || e.title.to_lowercase().contains(&needle)
                || e.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect();
    sort_by_date(&mut matching);
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn event(id: &str, date: NaiveDateTime, category: Category) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            date,
            end_date: None,
            category,
            description: None,
            location: None,
            all_day: false,
        }
    }

    fn july_4() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn holiday_filter_keeps_only_the_holiday() {
        let events = vec![
            event("a", at(2024, 7, 4, 0, 0), Category::Holiday),
            event("b", at(2024, 7, 4, 10, 0), Category::Meeting),
        ];
        let filter: CategoryFilter = [Category::Holiday].into_iter().collect();

        let result = filter_events_for_day(&events, july_4(), &filter);
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn empty_filter_returns_every_event_on_the_day() {
        let events = vec![
            event("a", at(2024, 7, 4, 0, 0), Category::Holiday),
            event("b", at(2024, 7, 4, 10, 0), Category::Meeting),
            event("c", at(2024, 7, 5, 10, 0), Category::Meeting),
            event("d", at(2024, 7, 4, 18, 0), Category::Other),
        ];

        let result = filter_events_for_day(&events, july_4(), &CategoryFilter::all());
        assert_eq!(ids(&result), vec!["a", "b", "d"]);
    }

    #[test]
    fn meeting_filter_excludes_other_categories() {
        let events = vec![
            event("a", at(2024, 7, 4, 8, 0), Category::Personal),
            event("b", at(2024, 7, 4, 9, 0), Category::Meeting),
            event("c", at(2024, 7, 4, 11, 0), Category::Reminder),
        ];
        let filter: CategoryFilter = [Category::Meeting].into_iter().collect();

        let result = filter_events_for_day(&events, july_4(), &filter);
        assert!(result.iter().all(|e| e.category == Category::Meeting));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn day_results_sorted_by_time_with_stable_ties() {
        let events = vec![
            event("late", at(2024, 7, 4, 17, 0), Category::Meeting),
            event("tie-1", at(2024, 7, 4, 9, 0), Category::Meeting),
            event("early", at(2024, 7, 4, 7, 30), Category::Meeting),
            event("tie-2", at(2024, 7, 4, 9, 0), Category::Personal),
        ];

        let first = filter_events_for_day(&events, july_4(), &CategoryFilter::all());
        let second = filter_events_for_day(&events, july_4(), &CategoryFilter::all());

        assert_eq!(ids(&first), vec!["early", "tie-1", "tie-2", "late"]);
        assert_eq!(first, second);
    }

    #[test]
    fn day_filter_does_not_touch_input_order() {
        let events = vec![
            event("b", at(2024, 7, 4, 12, 0), Category::Meeting),
            event("a", at(2024, 7, 4, 8, 0), Category::Meeting),
        ];
        let before = events.clone();

        let _ = filter_events_for_day(&events, july_4(), &CategoryFilter::all());
        assert_eq!(events, before);
    }

    #[test]
    fn hour_filter_matches_timed_events_on_hour() {
        let events = vec![
            event("a", at(2024, 7, 4, 10, 0), Category::Meeting),
            event("b", at(2024, 7, 4, 10, 45), Category::Meeting),
            event("c", at(2024, 7, 4, 11, 0), Category::Meeting),
        ];
        let day = filter_events_for_day(&events, july_4(), &CategoryFilter::all());

        assert_eq!(ids(&filter_events_for_hour(&day, 10)), vec!["a", "b"]);
        assert_eq!(ids(&filter_events_for_hour(&day, 11)), vec!["c"]);
        assert!(filter_events_for_hour(&day, 12).is_empty());
    }

    #[test]
    fn all_day_event_appears_once_at_anchor_hour() {
        let mut all_day = event("fair", at(2024, 7, 4, 14, 0), Category::Personal);
        all_day.all_day = true;
        let events = vec![all_day];
        let day = filter_events_for_day(&events, july_4(), &CategoryFilter::all());

        let rows: Vec<u32> = (0..24)
            .filter(|h| !filter_events_for_hour(&day, *h).is_empty())
            .collect();
        assert_eq!(rows, vec![ALL_DAY_ANCHOR_HOUR]);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut filter = CategoryFilter::all();
        filter.toggle(Category::Holiday);
        assert!(filter.allows(Category::Holiday));
        assert!(!filter.allows(Category::Meeting));
        assert_eq!(filter.len(), 1);

        filter.toggle(Category::Holiday);
        assert!(filter.is_empty());
        assert!(filter.allows(Category::Meeting));
    }

    #[test]
    fn clear_allows_everything_again() {
        let mut filter: CategoryFilter = [Category::Reminder, Category::Other].into_iter().collect();
        filter.clear();
        for category in Category::ALL {
            assert!(filter.allows(category));
        }
    }

    #[test]
    fn month_selection_spans_whole_month_only() {
        let events = vec![
            event("june", at(2024, 6, 30, 9, 0), Category::Meeting),
            event("first", at(2024, 7, 1, 0, 0), Category::Meeting),
            event("last", at(2024, 7, 31, 23, 59), Category::Meeting),
            event("aug", at(2024, 8, 1, 0, 0), Category::Meeting),
            event("prev-year", at(2023, 7, 15, 0, 0), Category::Meeting),
        ];

        let result = events_for_month(&events, 2024, 7, &CategoryFilter::all());
        assert_eq!(ids(&result), vec!["first", "last"]);
    }

    #[test]
    fn search_matches_title_or_description() {
        let mut with_desc = event("a", at(2024, 7, 2, 9, 0), Category::Meeting);
        with_desc.description = Some("Discuss the LAUNCH strategy".into());
        let mut titled = event("b", at(2024, 7, 1, 9, 0), Category::Personal);
        titled.title = "Launch party".into();
        let unrelated = event("c", at(2024, 7, 3, 9, 0), Category::Meeting);
        let events = vec![with_desc, titled, unrelated];

        let result = search_events(&events, "launch", &CategoryFilter::all());
        assert_eq!(ids(&result), vec!["b", "a"]);

        let meetings: CategoryFilter = [Category::Meeting].into_iter().collect();
        let result = search_events(&events, "launch", &meetings);
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn empty_search_lists_everything_sorted() {
        let events = vec![
            event("b", at(2024, 7, 2, 9, 0), Category::Meeting),
            event("a", at(2024, 7, 1, 9, 0), Category::Meeting),
        ];
        let result = search_events(&events, "  ", &CategoryFilter::all());
        assert_eq!(ids(&result), vec!["a", "b"]);
    }
}
