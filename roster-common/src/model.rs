//! Person record model
//!
//! A `Person` is the set of user-entered fields; a `Record` is a `Person`
//! that the store has accepted and assigned an id to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned record identifier
///
/// Generated once at insert time (UUID v4) and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Person fields as entered by an admin or read from an import row
///
/// Also serves as the insert candidate handed to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone1: String,
    #[serde(default)]
    pub phone2: Option<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    pub place: String,
    pub gender: String,
}

impl Person {
    /// First, middle and last name joined by single spaces, skipping absent parts
    pub fn display_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Empty optional strings become `None`
    pub fn normalized(mut self) -> Self {
        self.middle_name = self.middle_name.filter(|s| !s.is_empty());
        self.phone2 = self.phone2.filter(|s| !s.is_empty());
        self
    }
}

/// A stored person record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub person: Person,
}

impl Record {
    pub fn new(id: RecordId, person: Person) -> Self {
        Self { id, person }
    }

    pub fn display_name(&self) -> String {
        self.person.display_name()
    }
}
