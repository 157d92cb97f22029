//! Dates command implementation.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::commands::util;

/// Lists every date covered by the log, newest first.
pub fn run<W: Write>(writer: &mut W, log: &Path) -> Result<()> {
    let store = util::load_store(log)?;
    if store.is_empty() {
        writeln!(writer, "No skill events found in {}", log.display())?;
        return Ok(());
    }

    for date in store.distinct_dates() {
        writeln!(writer, "{date}")?;
    }
    Ok(())
}
