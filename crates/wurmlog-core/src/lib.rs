//! Core domain logic for the Wurm Online skill log analyzer.
//!
//! This crate contains the fundamental types and logic for:
//! - Parsing: decoding and tokenizing `_Skills` log files into events
//! - Sessions: splitting a day's events into play sessions by idle gaps
//! - Filtering: narrowing events to a date, session, and time-of-day range
//! - Aggregation: per-skill gain totals for a filtered slice
//! - Rates: trailing-window gain-per-hour series for a single skill

pub mod aggregate;
pub mod event;
pub mod filter;
pub mod parse;
pub mod rate;
pub mod session;
pub mod store;

pub use aggregate::{AggregateRow, aggregate};
pub use event::Event;
pub use filter::{TimeRange, filter_events};
pub use parse::{DecodeError, parse_bytes, parse_lines};
pub use rate::{RatePoint, RateSeries, SummaryPoint, WindowSummary, rate_window};
pub use session::{DEFAULT_RUN_GAP_MINUTES, DEFAULT_SESSION_GAP_MINUTES, Session, sessions};
pub use store::EventStore;
