//! Report command implementation.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use wurmlog_core::{AggregateRow, EventStore, Session, TimeRange, aggregate, filter_events};

use crate::Config;
use crate::cli::ReportArgs;
use crate::commands::util::{self, SessionChoice};

// ========== Report Data Structures ==========

/// Row order of the rendered gains table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Largest total gain first, ties by first appearance in the log.
    Increase,
    /// Skill name, ascending.
    Name,
    /// Highest current skill value first.
    Value,
}

/// Resolved inputs of one report.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub date: NaiveDate,
    pub session: Option<usize>,
    pub gap_minutes: u32,
    pub range: Option<TimeRange>,
    pub sort: SortOrder,
}

/// Everything the report renderers need.
#[derive(Debug)]
pub struct ReportData {
    pub date: NaiveDate,
    /// The `--session` selector as given, if any.
    pub session_index: Option<usize>,
    /// The session the selector resolved to, if it was in range.
    pub session: Option<Session>,
    pub range: Option<TimeRange>,
    pub rows: Vec<AggregateRow>,
    pub event_count: usize,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<&'a Session>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<&'a TimeRange>,
    rows: &'a [AggregateRow],
    event_count: usize,
}

// ========== Report Generation ==========

/// Filters one date's events per the request and aggregates them by skill.
pub fn generate_report_data(store: &EventStore, request: &ReportRequest) -> ReportData {
    let day = store.events_on_date(request.date);

    let (session, filtered) = match util::choose_session(&day, request.session, request.gap_minutes)
    {
        SessionChoice::OutOfRange => (None, Vec::new()),
        SessionChoice::WholeDay => (
            None,
            filter_events(&day, request.date, None, request.range.as_ref()),
        ),
        SessionChoice::Selected(session) => (
            Some(session),
            filter_events(&day, request.date, Some(&session), request.range.as_ref()),
        ),
    };

    let mut rows = aggregate(&filtered);
    match request.sort {
        SortOrder::Increase => {}
        SortOrder::Name => rows.sort_by(|a, b| a.skill.cmp(&b.skill)),
        SortOrder::Value => rows.sort_by(|a, b| b.last_total_after.total_cmp(&a.last_total_after)),
    }

    ReportData {
        date: request.date,
        session_index: request.session,
        session,
        range: request.range,
        rows,
        event_count: filtered.len(),
    }
}

// ========== Report Formatting ==========

/// Renders the gains table.
pub fn format_report(data: &ReportData) -> String {
    let mut output = String::new();

    let mut title = format!("Skill gains on {}", data.date);
    if let Some(number) = data.session_index {
        match data.session {
            Some(session) => write!(title, ", session {number} ({session})").unwrap(),
            None => write!(title, ", session {number} (not found)").unwrap(),
        }
    }
    if let Some(range) = &data.range {
        write!(
            title,
            ", {} to {}",
            range.from.format("%H:%M"),
            range.to.format("%H:%M")
        )
        .unwrap();
    }
    writeln!(output, "{title}").unwrap();
    writeln!(output).unwrap();

    if data.rows.is_empty() {
        writeln!(output, "No skill gains match the selection.").unwrap();
        return output;
    }

    writeln!(output, "{:<24}{:>10}{:>12}", "Skill", "Gained", "Value").unwrap();
    writeln!(output, "{}", "-".repeat(46)).unwrap();
    for row in &data.rows {
        writeln!(
            output,
            "{:<24}{:>10.4}{:>12.4}",
            row.skill, row.total_increase, row.last_total_after
        )
        .unwrap();
    }
    writeln!(output).unwrap();

    let skill_noun = if data.rows.len() == 1 { "skill" } else { "skills" };
    let event_noun = if data.event_count == 1 {
        "event"
    } else {
        "events"
    };
    writeln!(
        output,
        "{} {skill_noun}, {} {event_noun}",
        data.rows.len(),
        data.event_count
    )
    .unwrap();
    output
}

/// Renders the report as pretty-printed JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let report = JsonReport {
        date: data.date,
        session: data.session.as_ref(),
        range: data.range.as_ref(),
        rows: &data.rows,
        event_count: data.event_count,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Command Entry ==========

pub fn run<W: Write>(writer: &mut W, args: &ReportArgs, config: &Config) -> Result<()> {
    let store = util::load_store(&args.log)?;
    if store.is_empty() {
        writeln!(writer, "No skill events found in {}", args.log.display())?;
        return Ok(());
    }

    let request = ReportRequest {
        date: util::resolve_date(&store, args.date.as_deref())?,
        session: args.session,
        gap_minutes: args.gap.unwrap_or(config.session_gap_minutes),
        range: util::parse_range(args.from.as_deref(), args.to.as_deref())?,
        sort: args.sort,
    };

    let data = generate_report_data(&store, &request);
    if args.json {
        writeln!(writer, "{}", format_report_json(&data)?)?;
    } else {
        write!(writer, "{}", format_report(&data))?;
    }
    Ok(())
}
