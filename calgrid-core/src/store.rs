//! Event collection with copy-on-write snapshots.
//!
//! The store is the only place events are created, changed or removed.
//! Readers take a [`Snapshot`]; a mutation swaps in a new snapshot and
//! never edits one that has already been handed out.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::error::{CalGridError, CalGridResult};
use crate::event::{Event, NewEvent};

/// Immutable view of the event collection at one point in time.
pub type Snapshot = Arc<[Event]>;

/// Events persisted as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
    events: Snapshot,
}

impl EventStore {
    /// Load the store from `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> CalGridResult<Self> {
        let path = path.into();

        let events: Vec<Event> = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                CalGridError::Serialization(format!(
                    "Failed to parse events from {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "events file missing, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        info!(path = %path.display(), count = events.len(), "loaded events");
        Ok(Self::from_events(path, events))
    }

    pub fn from_events(path: impl Into<PathBuf>, events: Vec<Event>) -> Self {
        EventStore {
            path: path.into(),
            events: events.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Insert a new event under a freshly generated id.
    pub fn add(&mut self, new: NewEvent) -> CalGridResult<Event> {
        validate(&new.title, new.date, new.end_date)?;

        let event = Event::from_new(uuid::Uuid::new_v4().to_string(), new);
        let mut next = self.events.to_vec();
        next.push(event.clone());
        self.events = next.into();

        debug!(id = %event.id, category = %event.category, "added event");
        Ok(event)
    }

    /// Replace the stored event that has the same id.
    pub fn update(&mut self, event: Event) -> CalGridResult<()> {
        validate(&event.title, event.date, event.end_date)?;

        let Some(index) = self.position(&event.id) else {
            warn!(id = %event.id, "update for unknown event");
            return Err(CalGridError::EventNotFound(event.id));
        };

        debug!(id = %event.id, "updated event");
        let mut next = self.events.to_vec();
        next[index] = event;
        self.events = next.into();
        Ok(())
    }

    /// Remove an event, returning it.
    pub fn delete(&mut self, id: &str) -> CalGridResult<Event> {
        let Some(index) = self.position(id) else {
            warn!(id, "delete for unknown event");
            return Err(CalGridError::EventNotFound(id.to_string()));
        };

        let mut next = self.events.to_vec();
        let removed = next.remove(index);
        self.events = next.into();

        debug!(id, "deleted event");
        Ok(removed)
    }

    /// Write the current snapshot to disk, creating parent directories.
    pub async fn save(&self) -> CalGridResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(&*self.events)?;
        tokio::fs::write(&self.path, content).await?;

        info!(path = %self.path.display(), count = self.events.len(), "saved events");
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }
}

fn validate(title: &str, date: NaiveDateTime, end_date: Option<NaiveDateTime>) -> CalGridResult<()> {
    if title.trim().is_empty() {
        return Err(CalGridError::InvalidEvent("Event title is required".into()));
    }
    if let Some(end) = end_date {
        if end < date {
            return Err(CalGridError::InvalidEvent(format!(
                "End {} is before start {}",
                end, date
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn new_event(title: &str, date: NaiveDateTime, category: Category) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            date,
            end_date: None,
            category,
            description: None,
            location: None,
            all_day: false,
        }
    }

    fn empty_store() -> EventStore {
        EventStore::from_events("events.json", Vec::new())
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut store = empty_store();
        let a = store.add(new_event("A", at(2024, 7, 4, 9), Category::Meeting)).unwrap();
        let b = store.add(new_event("B", at(2024, 7, 4, 9), Category::Meeting)).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a.id), Some(&a));
    }

    #[test]
    fn add_rejects_blank_title() {
        let mut store = empty_store();
        let err = store.add(new_event("   ", at(2024, 7, 4, 9), Category::Other)).unwrap_err();
        assert!(matches!(err, CalGridError::InvalidEvent(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_end_before_start() {
        let mut store = empty_store();
        let mut new = new_event("Trip", at(2024, 7, 4, 9), Category::Personal);
        new.end_date = Some(at(2024, 7, 3, 9));
        assert!(matches!(store.add(new), Err(CalGridError::InvalidEvent(_))));
    }

    #[test]
    fn mutations_do_not_touch_existing_snapshots() {
        let mut store = empty_store();
        let event = store.add(new_event("A", at(2024, 7, 4, 9), Category::Meeting)).unwrap();
        let before = store.snapshot();

        let mut changed = event.clone();
        changed.title = "Renamed".into();
        store.update(changed).unwrap();
        store.add(new_event("B", at(2024, 7, 5, 9), Category::Meeting)).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].title, "A");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&event.id).unwrap().title, "Renamed");
    }

    #[test]
    fn update_unknown_id_fails() {
        let mut store = empty_store();
        let ghost = Event::from_new("ghost".into(), new_event("X", at(2024, 7, 4, 9), Category::Other));
        let err = store.update(ghost).unwrap_err();
        assert!(matches!(err, CalGridError::EventNotFound(id) if id == "ghost"));
    }

    #[test]
    fn delete_removes_and_returns_event() {
        let mut store = empty_store();
        let a = store.add(new_event("A", at(2024, 7, 4, 9), Category::Meeting)).unwrap();
        let b = store.add(new_event("B", at(2024, 7, 4, 10), Category::Meeting)).unwrap();
        let snapshot = store.snapshot();

        let removed = store.delete(&a.id).unwrap();
        assert_eq!(removed, a);
        assert_eq!(store.events(), &[b]);
        assert_eq!(snapshot.len(), 2);

        assert!(matches!(store.delete(&a.id), Err(CalGridError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::open(dir.path().join("events.json")).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn save_then_open_restores_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.json");

        let mut store = EventStore::open(&path).await.unwrap();
        let mut new = new_event("Independence Day", at(2024, 7, 4, 0), Category::Holiday);
        new.description = Some("National Holiday".into());
        new.all_day = true;
        let added = store.add(new).unwrap();
        store.save().await.unwrap();

        let reopened = EventStore::open(&path).await.unwrap();
        assert_eq!(reopened.events(), &[added]);
    }

    #[tokio::test]
    async fn open_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = EventStore::open(&path).await.unwrap_err();
        assert!(matches!(err, CalGridError::Serialization(_)));
    }
}
