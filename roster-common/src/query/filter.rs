//! Filter criteria and per-record matching
//!
//! Every clause is AND-combined and evaluated in a fixed order; a record is
//! rejected as soon as one clause fails. An empty clause matches everything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::Record;

/// Combined filter criteria for the table view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Case-insensitive substring over all record fields
    pub global_search: String,
    pub text_search: TextSearch,
    pub exact_matches: ExactMatches,
    pub hobbies: HobbyFilter,
    pub phone: PhoneFilter,
}

/// Text field a `TextSearch` applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    #[default]
    Name,
    Email,
    Place,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOperator {
    #[default]
    Contains,
    StartsWith,
    Equals,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSearch {
    pub field: TextField,
    pub operator: TextOperator,
    pub value: String,
}

/// Case-sensitive equality on gender and place; empty means "any"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactMatches {
    pub gender: String,
    pub place: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HobbyMatch {
    #[default]
    Any,
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HobbyFilter {
    pub values: BTreeSet<String>,
    pub match_type: HobbyMatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneField {
    #[default]
    Phone1,
    Phone2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneMatch {
    #[default]
    Contains,
    StartsWith,
    EndsWith,
    Equals,
}

/// Digit-only comparison on one of the phone fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneFilter {
    pub field: PhoneField,
    pub match_type: PhoneMatch,
    pub number: String,
}

impl FilterSpec {
    /// True when no clause is active
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_global(record)
            && self.text_search.matches(record)
            && self.exact_matches.matches(record)
            && self.hobbies.matches(record)
            && self.phone.matches(record)
    }

    fn matches_global(&self, record: &Record) -> bool {
        if self.global_search.is_empty() {
            return true;
        }
        searchable_text(record)
            .to_lowercase()
            .contains(&self.global_search.to_lowercase())
    }
}

impl TextSearch {
    fn matches(&self, record: &Record) -> bool {
        if self.value.is_empty() {
            return true;
        }
        let field_value = match self.field {
            TextField::Name => record.display_name(),
            TextField::Email => record.person.email.clone(),
            TextField::Place => record.person.place.clone(),
        }
        .to_lowercase();
        let needle = self.value.to_lowercase();

        match self.operator {
            TextOperator::Contains => field_value.contains(&needle),
            TextOperator::StartsWith => field_value.starts_with(&needle),
            TextOperator::Equals => field_value == needle,
        }
    }
}

impl ExactMatches {
    fn matches(&self, record: &Record) -> bool {
        (self.gender.is_empty() || record.person.gender == self.gender)
            && (self.place.is_empty() || record.person.place == self.place)
    }
}

impl HobbyFilter {
    fn matches(&self, record: &Record) -> bool {
        if self.values.is_empty() {
            return true;
        }
        let has = |hobby: &String| record.person.hobbies.contains(hobby);
        match self.match_type {
            HobbyMatch::All => self.values.iter().all(has),
            HobbyMatch::Any => self.values.iter().any(has),
        }
    }
}

impl PhoneFilter {
    fn matches(&self, record: &Record) -> bool {
        if self.number.is_empty() {
            return true;
        }
        // A number with no digits at all cannot match anything
        let wanted = digits(&self.number);
        if wanted.is_empty() {
            return false;
        }
        let phone = match self.field {
            PhoneField::Phone1 => digits(&record.person.phone1),
            PhoneField::Phone2 => record.person.phone2.as_deref().map(digits).unwrap_or_default(),
        };

        match self.match_type {
            PhoneMatch::Contains => phone.contains(&wanted),
            PhoneMatch::StartsWith => phone.starts_with(&wanted),
            PhoneMatch::EndsWith => phone.ends_with(&wanted),
            PhoneMatch::Equals => phone == wanted,
        }
    }
}

/// All field values of a record, space-joined, in table column order
///
/// Absent values contribute an empty string; hobbies are comma-joined.
pub fn searchable_text(record: &Record) -> String {
    let p = &record.person;
    [
        record.display_name(),
        p.email.clone(),
        p.phone1.clone(),
        p.phone2.clone().unwrap_or_default(),
        p.hobbies.join(","),
        p.place.clone(),
        p.gender.clone(),
        record.id.to_string(),
    ]
    .join(" ")
}

fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}
