//! Session segmentation by idle gaps.
//!
//! A session is a maximal run of one date's events in which no two
//! consecutive events are further apart than a gap threshold. Sessions
//! partition the date's events: ordered, non-overlapping, nothing left
//! over. They are recomputed on demand and never stored.

use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Gap threshold (minutes) for the session table and selector.
pub const DEFAULT_SESSION_GAP_MINUTES: u32 = 30;

/// Gap threshold (minutes) for the trailing run behind a rate window.
/// Deliberately much tighter than the session threshold; the two are
/// configured independently.
pub const DEFAULT_RUN_GAP_MINUTES: u32 = 1;

/// One contiguous run of play, bounded by its first and last event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Clock time of the run's first event.
    pub start: NaiveTime,

    /// Clock time of the run's last event (inclusive).
    pub end: NaiveTime,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Split one date's events into sessions.
///
/// Events must be sorted by timestamp ascending and share a calendar
/// date. Two consecutive events exactly `gap_minutes` apart stay in the
/// same session; one second more starts a new one.
pub fn sessions(events: &[Event], gap_minutes: u32) -> Vec<Session> {
    let gap = Duration::minutes(i64::from(gap_minutes));
    let mut out = Vec::new();

    let Some(first) = events.first() else {
        return out;
    };

    let mut start = first.time();
    let mut last = first.timestamp;

    for event in &events[1..] {
        if event.timestamp - last > gap {
            out.push(Session {
                start,
                end: last.time(),
            });
            start = event.time();
        }
        last = event.timestamp;
    }

    out.push(Session {
        start,
        end: last.time(),
    });
    out
}
