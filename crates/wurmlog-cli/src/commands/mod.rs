//! CLI subcommand implementations.

pub mod dates;
pub mod rate;
pub mod report;
pub mod sessions;
pub mod util;
pub mod watch;
