//! Per-skill gain totals over a filtered event slice.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Accumulated result for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub skill: String,

    /// Sum of all `increase` values in the slice.
    pub total_increase: f64,

    /// `total_after` of the skill's last event in the slice.
    pub last_total_after: f64,

    /// Rank of the skill's first appearance in the slice, 0-based.
    /// The documented tie-break for equal totals.
    pub first_seen: usize,
}

/// Aggregate a filtered slice into one row per skill, sorted by
/// `total_increase` descending, ties broken by ascending `first_seen`.
///
/// "Last" rides on the slice being in chronological order.
pub fn aggregate(events: &[Event]) -> Vec<AggregateRow> {
    let mut rows: HashMap<&str, AggregateRow> = HashMap::new();

    for event in events {
        let next_rank = rows.len();
        let row = rows
            .entry(event.skill.as_str())
            .or_insert_with(|| AggregateRow {
                skill: event.skill.clone(),
                total_increase: 0.0,
                last_total_after: event.total_after,
                first_seen: next_rank,
            });
        row.total_increase += event.increase;
        row.last_total_after = event.total_after;
    }

    let mut out: Vec<AggregateRow> = rows.into_values().collect();
    out.sort_by(|a, b| {
        b.total_increase
            .total_cmp(&a.total_increase)
            .then(a.first_seen.cmp(&b.first_seen))
    });
    out
}
