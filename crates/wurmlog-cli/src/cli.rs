//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::report::SortOrder;

/// Wurm Online skill log analyzer.
///
/// Reads a player's `_Skills` event log and reports the dates it covers,
/// the play sessions of a day, aggregated skill gains, and live
/// gain-per-hour rates.
#[derive(Debug, Parser)]
#[command(name = "wurmlog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the dates present in a skill log, newest first.
    Dates {
        /// Path to the game's skill log file.
        log: PathBuf,
    },

    /// List the play sessions of one date.
    Sessions(SessionsArgs),

    /// Aggregate skill gains for a date, session, or time range.
    Report(ReportArgs),

    /// Gain-per-hour series for one skill's trailing run of activity.
    Rate(RateArgs),

    /// Re-run the analysis whenever the game appends to the log.
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// Path to the game's skill log file.
    pub log: PathBuf,

    /// Date to analyze, YYYY-MM-DD (default: newest date in the log).
    #[arg(long)]
    pub date: Option<String>,

    /// Idle minutes that split two sessions.
    #[arg(long)]
    pub gap: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Path to the game's skill log file.
    pub log: PathBuf,

    /// Date to analyze, YYYY-MM-DD (default: newest date in the log).
    #[arg(long)]
    pub date: Option<String>,

    /// 1-based session number from `wurmlog sessions`.
    #[arg(long)]
    pub session: Option<usize>,

    /// Idle minutes that split two sessions.
    #[arg(long)]
    pub gap: Option<u32>,

    /// Start of a clock-time range, HH:MM (inclusive).
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// End of a clock-time range, HH:MM (inclusive).
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Row order of the gains table.
    #[arg(long, value_enum, default_value_t = SortOrder::Increase)]
    pub sort: SortOrder,

    /// Output as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RateArgs {
    /// Path to the game's skill log file.
    pub log: PathBuf,

    /// Skill name, exactly as the game prints it.
    #[arg(long)]
    pub skill: String,

    /// Date to analyze, YYYY-MM-DD (default: newest date in the log).
    #[arg(long)]
    pub date: Option<String>,

    /// 1-based session number from `wurmlog sessions`.
    #[arg(long)]
    pub session: Option<usize>,

    /// Idle minutes that split two sessions.
    #[arg(long)]
    pub gap: Option<u32>,

    /// Trailing window length in minutes.
    #[arg(long)]
    pub window: Option<u32>,

    /// Largest idle gap tolerated inside the trailing run, in minutes.
    #[arg(long)]
    pub run_gap: Option<u32>,

    /// Output as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Path to the game's skill log file.
    pub log: PathBuf,

    /// Pin the analysis to one date instead of following the newest.
    #[arg(long)]
    pub date: Option<String>,

    /// 1-based session number from `wurmlog sessions`.
    #[arg(long)]
    pub session: Option<usize>,

    /// Idle minutes that split two sessions.
    #[arg(long)]
    pub gap: Option<u32>,

    /// Track a live rate window for this skill (repeatable).
    #[arg(long)]
    pub skill: Vec<String>,

    /// Trailing window length in minutes.
    #[arg(long)]
    pub window: Option<u32>,

    /// Largest idle gap tolerated inside the trailing run, in minutes.
    #[arg(long)]
    pub run_gap: Option<u32>,

    /// Poll period in seconds.
    #[arg(long)]
    pub poll: Option<u64>,
}
