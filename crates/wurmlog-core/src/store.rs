//! The latest fully-parsed event sequence for one log file.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::event::Event;

/// Holds the current parse of a log file and answers date queries.
///
/// Events live behind an `Arc<[Event]>`. `replace` swaps the whole
/// sequence at once and `snapshot` hands out a clone of the `Arc`, so a
/// consumer holding a snapshot sees either the old or the new sequence
/// in full, never a partial mix.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Arc<[Event]>,
}

impl EventStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly parsed event sequence.
    pub fn replace(&mut self, events: Vec<Event>) {
        self.events = events.into();
    }

    /// The current sequence, shared.
    pub fn snapshot(&self) -> Arc<[Event]> {
        Arc::clone(&self.events)
    }

    /// Events on the given calendar date, in store order.
    pub fn events_on_date(&self, date: NaiveDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| event.date() == date)
            .cloned()
            .collect()
    }

    /// Dates present in the store, most recent first.
    pub fn distinct_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.events.iter().map(Event::date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates.reverse();
        dates
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
