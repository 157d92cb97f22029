//! Wurm Online skill log analyzer CLI.
//!
//! The `wurmlog` binary reads a player's `_Skills` event log and answers
//! questions about it: which dates it covers, how the play time splits into
//! sessions, what was gained, and how fast a skill is climbing right now.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, RateArgs, ReportArgs, SessionsArgs, WatchArgs};
pub use config::Config;
