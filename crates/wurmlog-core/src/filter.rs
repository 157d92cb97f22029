//! Narrowing an event sequence to a date, session, and clock range.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::session::Session;

/// An inclusive clock-time range within one date.
///
/// Bounds never cross midnight; an inverted range matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

/// Keep events on `date` whose clock time falls inside the session and
/// range bounds, all inclusive. `None` leaves that constraint off.
pub fn filter_events(
    events: &[Event],
    date: NaiveDate,
    session: Option<&Session>,
    range: Option<&TimeRange>,
) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.date() == date)
        .filter(|event| {
            session.is_none_or(|s| {
                let t = event.time();
                s.start <= t && t <= s.end
            })
        })
        .filter(|event| {
            range.is_none_or(|r| {
                let t = event.time();
                r.from <= t && t <= r.to
            })
        })
        .cloned()
        .collect()
}
