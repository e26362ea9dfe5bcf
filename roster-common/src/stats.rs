//! Statistics aggregation for the dashboard

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Record;

/// Counts by category over the full record set
///
/// Categories are counted verbatim; "Delhi" and "delhi" are separate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStats {
    pub total_records: usize,
    /// Number of distinct hobby values
    pub unique_hobbies: usize,
    pub by_gender: BTreeMap<String, usize>,
    pub by_place: BTreeMap<String, usize>,
    /// One count per hobby entry on each record
    pub by_hobby: BTreeMap<String, usize>,
}

/// Tally gender, place and hobby counts in a single pass
pub fn aggregate(records: &[Record]) -> RecordStats {
    let mut stats = RecordStats {
        total_records: records.len(),
        ..RecordStats::default()
    };

    for record in records {
        tally(&mut stats.by_gender, &record.person.gender);
        tally(&mut stats.by_place, &record.person.place);
        for hobby in &record.person.hobbies {
            tally(&mut stats.by_hobby, hobby);
        }
    }

    stats.unique_hobbies = stats.by_hobby.len();
    stats
}

fn tally(counts: &mut BTreeMap<String, usize>, value: &str) {
    if value.is_empty() {
        return;
    }
    *counts.entry(value.to_string()).or_insert(0) += 1;
}
