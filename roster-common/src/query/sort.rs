//! Column sorting for the table view

use serde::{Deserialize, Serialize};

use crate::model::Record;

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Email,
    Phone1,
    Phone2,
    Hobbies,
    Place,
    Gender,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort column (or none) and direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }
}

impl SortField {
    /// Lower-cased string form used as the sort key; absent values are ""
    pub fn key(&self, record: &Record) -> String {
        let p = &record.person;
        match self {
            SortField::Name => record.display_name(),
            SortField::Email => p.email.clone(),
            SortField::Phone1 => p.phone1.clone(),
            SortField::Phone2 => p.phone2.clone().unwrap_or_default(),
            SortField::Hobbies => p.hobbies.join(","),
            SortField::Place => p.place.clone(),
            SortField::Gender => p.gender.clone(),
        }
        .to_lowercase()
    }
}

/// Stable sort in place; equal keys keep their prior relative order
pub fn sort_records(records: &mut Vec<&Record>, spec: &SortSpec) {
    let Some(field) = spec.field else {
        return;
    };

    let mut keyed: Vec<(String, &Record)> = records.drain(..).map(|r| (field.key(r), r)).collect();
    keyed.sort_by(|(a, _), (b, _)| match spec.direction {
        SortDirection::Asc => a.cmp(b),
        SortDirection::Desc => b.cmp(a),
    });
    records.extend(keyed.into_iter().map(|(_, r)| r));
}
