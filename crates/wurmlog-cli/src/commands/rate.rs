//! Rate command implementation.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use wurmlog_core::{EventStore, RateSeries, filter_events, rate_window};

use crate::Config;
use crate::cli::RateArgs;
use crate::commands::util::{self, SessionChoice};

/// Resolved inputs of one rate extraction.
#[derive(Debug, Clone)]
pub struct RateRequest {
    pub skill: String,
    pub date: NaiveDate,
    pub session: Option<usize>,
    pub gap_minutes: u32,
    pub window_minutes: u32,
    pub run_gap_minutes: u32,
}

/// Everything the rate renderers need.
#[derive(Debug)]
pub struct RateData {
    pub skill: String,
    pub date: NaiveDate,
    pub window_minutes: u32,
    pub run_gap_minutes: u32,
    /// `None` when fewer than two windowed events exist for the skill.
    pub series: Option<RateSeries>,
}

#[derive(Debug, Serialize)]
struct JsonRate<'a> {
    skill: &'a str,
    date: NaiveDate,
    window_minutes: u32,
    run_gap_minutes: u32,
    series: Option<&'a RateSeries>,
}

/// Narrows one date's events per the request and extracts the rate series.
pub fn generate_rate_data(store: &EventStore, request: &RateRequest) -> RateData {
    let day = store.events_on_date(request.date);

    let events = match util::choose_session(&day, request.session, request.gap_minutes) {
        SessionChoice::OutOfRange => Vec::new(),
        SessionChoice::WholeDay => filter_events(&day, request.date, None, None),
        SessionChoice::Selected(session) => filter_events(&day, request.date, Some(&session), None),
    };

    let series = rate_window(
        &events,
        &request.skill,
        request.window_minutes,
        request.run_gap_minutes,
    );

    RateData {
        skill: request.skill.clone(),
        date: request.date,
        window_minutes: request.window_minutes,
        run_gap_minutes: request.run_gap_minutes,
        series,
    }
}

/// Renders the rate series as text.
pub fn format_rate(data: &RateData) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "Rate for {} on {} (window {}m, run gap {}m)",
        data.skill, data.date, data.window_minutes, data.run_gap_minutes
    )
    .unwrap();
    writeln!(output).unwrap();

    let Some(series) = &data.series else {
        writeln!(
            output,
            "Not enough recent {} events to compute a rate.",
            data.skill
        )
        .unwrap();
        return output;
    };

    if series.points.is_empty() {
        writeln!(output, "No rate points: the window's events share one timestamp.").unwrap();
    } else {
        for point in &series.points {
            writeln!(
                output,
                "  {}  {:>10.4}/h",
                point.timestamp.format("%H:%M:%S"),
                point.rate
            )
            .unwrap();
        }
    }
    writeln!(output).unwrap();

    writeln!(
        output,
        "Window: {} ({:.4}) -> {} ({:.4})",
        series.summary.start.timestamp.format("%H:%M:%S"),
        series.summary.start.total_after,
        series.summary.end.timestamp.format("%H:%M:%S"),
        series.summary.end.total_after,
    )
    .unwrap();
    output
}

/// Renders the rate series as pretty-printed JSON.
pub fn format_rate_json(data: &RateData) -> Result<String> {
    let rate = JsonRate {
        skill: &data.skill,
        date: data.date,
        window_minutes: data.window_minutes,
        run_gap_minutes: data.run_gap_minutes,
        series: data.series.as_ref(),
    };
    Ok(serde_json::to_string_pretty(&rate)?)
}

pub fn run<W: Write>(writer: &mut W, args: &RateArgs, config: &Config) -> Result<()> {
    let store = util::load_store(&args.log)?;
    if store.is_empty() {
        writeln!(writer, "No skill events found in {}", args.log.display())?;
        return Ok(());
    }

    let request = RateRequest {
        skill: args.skill.clone(),
        date: util::resolve_date(&store, args.date.as_deref())?,
        session: args.session,
        gap_minutes: args.gap.unwrap_or(config.session_gap_minutes),
        window_minutes: args.window.unwrap_or(config.window_minutes),
        run_gap_minutes: args.run_gap.unwrap_or(config.run_gap_minutes),
    };

    let data = generate_rate_data(&store, &request);
    if args.json {
        writeln!(writer, "{}", format_rate_json(&data)?)?;
    } else {
        write!(writer, "{}", format_rate(&data))?;
    }
    Ok(())
}
