//! Trailing-window rate extraction for a single skill.
//!
//! Answers "how fast is this skill gaining right now": walk backward from
//! the most recent gain to collect the current burst of activity (the
//! trailing run), clip it to a window, and differentiate consecutive
//! totals into gain-per-hour points.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Gain per hour between two consecutive events, stamped with the later
/// event's timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub timestamp: NaiveDateTime,
    pub rate: f64,
}

/// One endpoint of the windowed slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryPoint {
    pub timestamp: NaiveDateTime,
    pub total_after: f64,
}

/// First and last event of the windowed slice, for the compact
/// "start → end" label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub start: SummaryPoint,
    pub end: SummaryPoint,
}

/// Full extractor output. `points` can be empty when every consecutive
/// pair was zero-duration; the summary is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    pub points: Vec<RatePoint>,
    pub summary: WindowSummary,
}

/// Extract the trailing rate series for `skill` from a session's events.
///
/// Events must be in chronological order. The trailing run accumulates
/// backward from the most recent matching event while consecutive gaps
/// stay within `run_gap_minutes`; the run is then clipped to the last
/// `window_minutes`. Returns `None` when fewer than two events remain —
/// there is nothing to differentiate.
pub fn rate_window(
    session_events: &[Event],
    skill: &str,
    window_minutes: u32,
    run_gap_minutes: u32,
) -> Option<RateSeries> {
    let matches: Vec<&Event> = session_events
        .iter()
        .filter(|event| event.skill == skill)
        .collect();

    let run = trailing_run(&matches, run_gap_minutes);
    let newest = run.last()?;

    let window_start = newest.timestamp - Duration::minutes(i64::from(window_minutes));
    let begin = run.partition_point(|event| event.timestamp < window_start);
    let windowed = &run[begin..];

    let [first, .., last] = windowed else {
        return None;
    };

    let points = windowed
        .windows(2)
        .filter_map(|pair| {
            let hours = hours_between(pair[0].timestamp, pair[1].timestamp);
            // A zero-duration pair has no defined rate; drop it.
            if hours > 0.0 {
                Some(RatePoint {
                    timestamp: pair[1].timestamp,
                    rate: (pair[1].total_after - pair[0].total_after) / hours,
                })
            } else {
                None
            }
        })
        .collect();

    Some(RateSeries {
        points,
        summary: WindowSummary {
            start: SummaryPoint {
                timestamp: first.timestamp,
                total_after: first.total_after,
            },
            end: SummaryPoint {
                timestamp: last.timestamp,
                total_after: last.total_after,
            },
        },
    })
}

/// Accumulate the trailing run, newest first, stopping at the first gap
/// over the threshold; returned in chronological order.
fn trailing_run<'a>(matches: &[&'a Event], run_gap_minutes: u32) -> Vec<&'a Event> {
    let gap = Duration::minutes(i64::from(run_gap_minutes));
    let mut run: Vec<&Event> = Vec::new();

    for &event in matches.iter().rev() {
        if let Some(&oldest) = run.last() {
            if oldest.timestamp - event.timestamp > gap {
                break;
            }
        }
        run.push(event);
    }

    run.reverse();
    run
}

#[allow(clippy::cast_precision_loss)]
fn hours_between(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    (b - a).num_seconds() as f64 / 3600.0
}
