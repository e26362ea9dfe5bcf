//! Facet options: the distinct values each filterable field currently takes

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::Record;

/// Distinct non-empty values in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    pub genders: Vec<String>,
    pub places: Vec<String>,
    pub hobbies: Vec<String>,
}

/// Derive facet options from the full, unfiltered record set
pub fn options(records: &[Record]) -> FacetOptions {
    let mut genders = Distinct::default();
    let mut places = Distinct::default();
    let mut hobbies = Distinct::default();

    for record in records {
        genders.push(&record.person.gender);
        places.push(&record.person.place);
        for hobby in &record.person.hobbies {
            hobbies.push(hobby);
        }
    }

    FacetOptions {
        genders: genders.values,
        places: places.values,
        hobbies: hobbies.values,
    }
}

#[derive(Default)]
struct Distinct {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl Distinct {
    fn push(&mut self, value: &str) {
        if !value.is_empty() && self.seen.insert(value.to_string()) {
            self.values.push(value.to_string());
        }
    }
}
