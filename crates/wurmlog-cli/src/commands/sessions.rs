//! Sessions command implementation.

use std::io::Write;

use anyhow::Result;

use wurmlog_core::sessions;

use crate::Config;
use crate::cli::SessionsArgs;
use crate::commands::util;

/// Lists one date's play sessions, numbered for use with `--session`.
pub fn run<W: Write>(writer: &mut W, args: &SessionsArgs, config: &Config) -> Result<()> {
    let store = util::load_store(&args.log)?;
    if store.is_empty() {
        writeln!(writer, "No skill events found in {}", args.log.display())?;
        return Ok(());
    }

    let date = util::resolve_date(&store, args.date.as_deref())?;
    let gap_minutes = args.gap.unwrap_or(config.session_gap_minutes);
    let day = store.events_on_date(date);
    let list = sessions(&day, gap_minutes);

    if list.is_empty() {
        writeln!(writer, "No skill events on {date}")?;
        return Ok(());
    }

    writeln!(writer, "Sessions on {date} (gap {gap_minutes}m)")?;
    for (index, session) in list.iter().enumerate() {
        writeln!(writer, "{:3}. {session}", index + 1)?;
    }
    Ok(())
}
