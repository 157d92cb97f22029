//! Watch command implementation.
//!
//! Polls the log file's modification time and re-runs the whole analysis
//! from a fresh parse whenever the game appends. A refresh that fails to
//! read or decode keeps the previous snapshot on screen.

use std::io::Write;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use chrono::Local;

use wurmlog_core::EventStore;

use crate::Config;
use crate::cli::WatchArgs;
use crate::commands::rate::{RateRequest, format_rate, generate_rate_data};
use crate::commands::report::{ReportRequest, SortOrder, format_report, generate_report_data};
use crate::commands::util;

/// One live rate view registered for the watch loop.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub skill: String,
    pub window_minutes: u32,
    pub run_gap_minutes: u32,
}

/// Static parts of the watch output, resolved once at startup.
#[derive(Debug)]
struct View {
    /// `--date` pins the analysis; otherwise each refresh follows the
    /// newest date in the log.
    pinned_date: Option<chrono::NaiveDate>,
    session: Option<usize>,
    gap_minutes: u32,
    contexts: Vec<AnalysisContext>,
}

pub fn run<W: Write>(writer: &mut W, args: &WatchArgs, config: &Config) -> Result<()> {
    let poll = Duration::from_secs(args.poll.unwrap_or(config.poll_secs));
    let view = View {
        pinned_date: args.date.as_deref().map(util::parse_date).transpose()?,
        session: args.session,
        gap_minutes: args.gap.unwrap_or(config.session_gap_minutes),
        contexts: args
            .skill
            .iter()
            .map(|skill| AnalysisContext {
                skill: skill.clone(),
                window_minutes: args.window.unwrap_or(config.window_minutes),
                run_gap_minutes: args.run_gap.unwrap_or(config.run_gap_minutes),
            })
            .collect(),
    };

    let mut store = EventStore::new();
    let mut last_modified: Option<SystemTime> = None;

    loop {
        match std::fs::metadata(&args.log).and_then(|meta| meta.modified()) {
            Ok(modified) if last_modified != Some(modified) => {
                match util::load_events(&args.log) {
                    Ok(events) => {
                        store.replace(events);
                        last_modified = Some(modified);
                        writeln!(writer, "--- {} ---", Local::now().format("%H:%M:%S"))?;
                        refresh(writer, &store, &view)?;
                        writer.flush()?;
                    }
                    Err(error) => {
                        tracing::warn!(%error, "reload failed, keeping previous events");
                    }
                }
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%error, path = %args.log.display(), "cannot stat log file");
            }
        }

        std::thread::sleep(poll);
    }
}

/// Renders one full analysis pass against the current snapshot.
fn refresh<W: Write>(writer: &mut W, store: &EventStore, view: &View) -> Result<()> {
    if store.is_empty() {
        writeln!(writer, "No skill events yet.")?;
        return Ok(());
    }
    let Some(date) = view
        .pinned_date
        .or_else(|| store.distinct_dates().first().copied())
    else {
        return Ok(());
    };

    let report = generate_report_data(
        store,
        &ReportRequest {
            date,
            session: view.session,
            gap_minutes: view.gap_minutes,
            range: None,
            sort: SortOrder::Increase,
        },
    );
    write!(writer, "{}", format_report(&report))?;

    for context in &view.contexts {
        let data = generate_rate_data(
            store,
            &RateRequest {
                skill: context.skill.clone(),
                date,
                session: view.session,
                gap_minutes: view.gap_minutes,
                window_minutes: context.window_minutes,
                run_gap_minutes: context.run_gap_minutes,
            },
        );
        // A window without enough events stays quiet until it fills.
        if data.series.is_none() {
            continue;
        }
        writeln!(writer)?;
        write!(writer, "{}", format_rate(&data))?;
    }
    Ok(())
}
