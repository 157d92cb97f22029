//! The skill-gain event record.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single skill increase reported by the game client.
///
/// One `Event` corresponds to one log line of the form
/// `[12:34:56] Mining increased by 0,0215 to 45,1098`, stamped with the
/// date announced by the most recent `Logging started` line above it.
/// Timestamps are naive: the log is written in the player's local clock
/// and carries no timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Date of the enclosing log section plus the line's wall-clock time.
    pub timestamp: NaiveDateTime,

    /// Skill name exactly as the game prints it (e.g. "Mining", "Blades").
    pub skill: String,

    /// Gain reported by this line.
    pub increase: f64,

    /// Cumulative skill value after the gain.
    pub total_after: f64,
}

impl Event {
    /// Calendar date of the event.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Wall-clock time of the event.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }
}
