//! Shared utilities for command implementations.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveTime};

use wurmlog_core::{Event, EventStore, Session, TimeRange, parse_bytes, sessions};

/// Reads a skill log from disk and parses it into events.
///
/// Lines that are not skill gains are dropped during parsing; an error here
/// means the file could not be read or decoded at all.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let events = parse_bytes(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(events)
}

/// Reads a skill log into a fresh event store.
pub fn load_store(path: &Path) -> Result<EventStore> {
    let mut store = EventStore::new();
    store.replace(load_events(path)?);
    Ok(store)
}

/// Parses a `--date` argument.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{raw}' (expected YYYY-MM-DD)"))
}

/// Parses a `--from` / `--to` clock argument.
pub fn parse_clock(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .with_context(|| format!("invalid time '{raw}' (expected HH:MM)"))
}

/// Builds the optional clock-time range from the `--from` / `--to` pair.
pub fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<Option<TimeRange>> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Some(TimeRange {
            from: parse_clock(from)?,
            to: parse_clock(to)?,
        })),
        (None, None) => Ok(None),
        _ => bail!("--from and --to must be given together"),
    }
}

/// Picks the date to analyze: an explicit `--date`, else the newest in the log.
pub fn resolve_date(store: &EventStore, date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(raw) => parse_date(raw),
        None => store
            .distinct_dates()
            .first()
            .copied()
            .context("log contains no skill events"),
    }
}

/// Outcome of resolving a 1-based `--session` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChoice {
    /// No selector given; the whole day qualifies.
    WholeDay,
    /// The selector matched a session.
    Selected(Session),
    /// The selector points past the day's session list; nothing qualifies.
    OutOfRange,
}

/// Resolves a `--session` selector against one date's events.
pub fn choose_session(day: &[Event], selector: Option<usize>, gap_minutes: u32) -> SessionChoice {
    let Some(number) = selector else {
        return SessionChoice::WholeDay;
    };
    let list = sessions(day, gap_minutes);
    match number.checked_sub(1).and_then(|index| list.get(index)) {
        Some(found) => SessionChoice::Selected(*found),
        None => {
            tracing::debug!(
                requested = number,
                available = list.len(),
                "session selector out of range"
            );
            SessionChoice::OutOfRange
        }
    }
}
