//! Decoding and parsing of `_Skills` log files.
//!
//! The game writes an append-only text log. A section header announces the
//! date, then each gain line carries only a wall-clock time:
//!
//! ```text
//! Logging started 2024-03-15
//! [10:13:47] Mining increased by 0,0092 to 31,4319
//! ```
//!
//! Parsing is tolerant: chat lines, malformed lines, and gain lines with
//! invalid times or numbers are skipped, never fatal. Only undecodable
//! bytes abort a parse.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1251, WINDOWS_1252};
use regex::{Captures, Regex};
use thiserror::Error;

use crate::event::Event;

/// Matches the section header the game writes when logging (re)starts.
/// Trailing text after the date is ignored.
static DATE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Logging started (\d{4}-\d{2}-\d{2})").unwrap());

/// Matches a skill gain line. The decimal separator is `,` on most client
/// locales and `.` on others, so both are captured.
static GAIN_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{2}):(\d{2}):(\d{2})\] (.+?) increased by ([\d.,]+) to ([\d.,]+)").unwrap()
});

/// Decode candidates, tried in order. Logs from Russian-locale clients are
/// typically windows-1251; windows-1252 is the final single-byte fallback.
const CANDIDATE_ENCODINGS: [&Encoding; 3] = [UTF_8, WINDOWS_1251, WINDOWS_1252];

/// The bytes matched none of the supported log encodings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("log is not valid UTF-8, windows-1251, or windows-1252")]
pub struct DecodeError;

/// Decode raw log bytes into text.
///
/// Each candidate encoding is tried strictly (no replacement characters);
/// the first one that decodes the whole input wins. Borrowed output when
/// the input is already valid UTF-8.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, DecodeError> {
    for encoding in CANDIDATE_ENCODINGS {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            tracing::trace!(encoding = encoding.name(), len = bytes.len(), "decoded log");
            return Ok(text);
        }
    }
    Err(DecodeError)
}

/// Parse decoded log text into events, in file order.
///
/// Gain lines are stamped with the date from the most recent section
/// header. Lines that precede any header have no date and are dropped.
pub fn parse_lines(text: &str) -> Vec<Event> {
    let mut events = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for line in text.lines() {
        if let Some(caps) = DATE_LINE_RE.captures(line) {
            match NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") {
                Ok(date) => current_date = Some(date),
                Err(error) => {
                    tracing::debug!(line, %error, "skipping section header with invalid date");
                }
            }
            continue;
        }

        let Some(caps) = GAIN_LINE_RE.captures(line) else {
            continue;
        };

        let Some(date) = current_date else {
            tracing::debug!(line, "dropping gain line before any section header");
            continue;
        };

        match event_from_captures(date, &caps) {
            Some(event) => events.push(event),
            None => tracing::debug!(line, "skipping gain line with invalid time or number"),
        }
    }

    events
}

/// Decode and parse raw log bytes in one step.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<Event>, DecodeError> {
    let text = decode(bytes)?;
    Ok(parse_lines(&text))
}

fn event_from_captures(date: NaiveDate, caps: &Captures<'_>) -> Option<Event> {
    let hour = caps[1].parse().ok()?;
    let minute = caps[2].parse().ok()?;
    let second = caps[3].parse().ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;

    Some(Event {
        timestamp: date.and_time(time),
        skill: caps[4].to_string(),
        increase: parse_number(&caps[5])?,
        total_after: parse_number(&caps[6])?,
    })
}

/// Parse a captured number, normalizing the comma decimal separator.
fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse().ok()
}
