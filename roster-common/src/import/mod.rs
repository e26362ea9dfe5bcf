//! Batch import pipeline
//!
//! `parse` turns delimited text into positional rows, failing the whole batch
//! on any structural problem. Field-level checks live in [`validate`] and are
//! collected per row instead of aborting.

pub mod validate;

pub use validate::{FieldError, RecordValidator, ValidatedBatch, ValidationRules};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::debug;

use crate::model::Person;

/// Required header row, in exact order
pub const COLUMNS: [&str; 9] = [
    "firstName",
    "middleName",
    "lastName",
    "email",
    "phone1",
    "phone2",
    "hobbies",
    "place",
    "gender",
];

/// Column separator
pub const DELIMITER: u8 = b',';

/// Separator between hobbies inside the hobbies column
pub const HOBBY_DELIMITER: char = ';';

/// Structural failure that rejects a batch before validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Batch is empty: expected a header row")]
    Empty,

    #[error("Header mismatch: expected \"{expected}\", found \"{found}\"")]
    HeaderMismatch { expected: String, found: String },

    #[error("Row {row}: expected {expected} columns, found {found}")]
    ColumnCount { row: usize, expected: usize, found: usize },

    #[error("Malformed batch: {0}")]
    Malformed(String),
}

/// One data row with its 1-based position (header excluded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row: usize,
    pub person: Person,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBatch {
    pub rows: Vec<RawRow>,
}

impl ParsedBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse a delimited-text payload
///
/// Empty and whitespace-only lines are dropped; a line of empty cells is
/// still a row. The header must match exactly. Data cells are trimmed; an
/// empty middle name or second phone becomes `None` and an empty hobbies
/// cell an empty list.
pub fn parse(raw: &str) -> Result<ParsedBatch, FormatError> {
    let content = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(DELIMITER)
        .from_reader(content.as_bytes());

    let mut lines = reader.records();

    let header = match lines.next() {
        Some(line) => line.map_err(|e| FormatError::Malformed(e.to_string()))?,
        None => return Err(FormatError::Empty),
    };
    if !header.iter().eq(COLUMNS.iter().copied()) {
        return Err(FormatError::HeaderMismatch {
            expected: COLUMNS.join(","),
            found: header.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut rows = Vec::new();
    for (index, line) in lines.enumerate() {
        let row = index + 1;
        let record = line.map_err(|e| FormatError::Malformed(format!("row {row}: {e}")))?;
        if record.len() != COLUMNS.len() {
            return Err(FormatError::ColumnCount {
                row,
                expected: COLUMNS.len(),
                found: record.len(),
            });
        }
        rows.push(RawRow {
            row,
            person: person_from_cells(&record),
        });
    }

    debug!(rows = rows.len(), "Parsed import batch");
    Ok(ParsedBatch { rows })
}

/// Render persons as a batch payload that `parse` accepts
///
/// Values containing a delimiter do not survive the trip.
pub fn serialize(persons: &[Person]) -> String {
    let delimiter = char::from(DELIMITER).to_string();
    let hobby_delimiter = HOBBY_DELIMITER.to_string();

    let mut lines = vec![COLUMNS.join(&delimiter)];
    for p in persons {
        let cells = [
            p.first_name.clone(),
            p.middle_name.clone().unwrap_or_default(),
            p.last_name.clone(),
            p.email.clone(),
            p.phone1.clone(),
            p.phone2.clone().unwrap_or_default(),
            p.hobbies.join(&hobby_delimiter),
            p.place.clone(),
            p.gender.clone(),
        ];
        lines.push(cells.join(&delimiter));
    }
    lines.join("\n")
}

fn person_from_cells(record: &StringRecord) -> Person {
    let cell = |i: usize| record.get(i).unwrap_or_default().trim().to_string();
    let optional = |i: usize| Some(cell(i)).filter(|s| !s.is_empty());

    let hobbies_cell = cell(6);
    let hobbies = if hobbies_cell.is_empty() {
        Vec::new()
    } else {
        hobbies_cell
            .split(HOBBY_DELIMITER)
            .map(|h| h.trim().to_string())
            .collect()
    };

    Person {
        first_name: cell(0),
        middle_name: optional(1),
        last_name: cell(2),
        email: cell(3),
        phone1: cell(4),
        phone2: optional(5),
        hobbies,
        place: cell(7),
        gender: cell(8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "firstName,middleName,lastName,email,phone1,phone2,hobbies,place,gender";

    #[test]
    fn test_parse_single_row() {
        let raw = format!("{HEADER}\nAnn,,Lee,ann@gmail.com,1234567890,,chess; reading ,Delhi,Female\n");
        let batch = parse(&raw).unwrap();

        assert_eq!(batch.len(), 1);
        let row = &batch.rows[0];
        assert_eq!(row.row, 1);
        assert_eq!(row.person.first_name, "Ann");
        assert_eq!(row.person.middle_name, None);
        assert_eq!(row.person.phone2, None);
        assert_eq!(row.person.hobbies, ["chess", "reading"]);
        assert_eq!(row.person.gender, "Female");
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let raw = format!("\r\n{HEADER}\r\n\r\n   \r\nA,,B,a@gmail.com,1234567890,,,Delhi,Male\r\n\r\n");
        let batch = parse(&raw).unwrap();
        assert_eq!(batch.len(), 1);
        assert!(batch.rows[0].person.hobbies.is_empty());
    }

    #[test]
    fn test_parse_keeps_row_of_empty_cells() {
        let raw = format!("{HEADER}\n,,,,,,,,\n");
        let batch = parse(&raw).unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch.rows[0].row, 1);
        assert_eq!(batch.rows[0].person, Person::default());
    }

    #[test]
    fn test_parse_rejects_short_row_of_empty_cells() {
        let raw = format!("{HEADER}\n,,\n");
        assert_eq!(
            parse(&raw),
            Err(FormatError::ColumnCount {
                row: 1,
                expected: 9,
                found: 3
            })
        );
    }

    #[test]
    fn test_parse_header_must_match_exactly() {
        let raw = " firstName ,middleName,lastName,email,phone1,phone2,hobbies,place,gender\n";
        assert!(matches!(parse(raw), Err(FormatError::HeaderMismatch { .. })));
    }

    #[test]
    fn test_parse_header_only_is_empty_batch() {
        let batch = parse(HEADER).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse(""), Err(FormatError::Empty));
        assert_eq!(parse("\n\n  \n"), Err(FormatError::Empty));
    }

    #[test]
    fn test_parse_rejects_reordered_header() {
        let raw = "middleName,firstName,lastName,email,phone1,phone2,hobbies,place,gender\n";
        assert!(matches!(parse(raw), Err(FormatError::HeaderMismatch { .. })));
    }

    #[test]
    fn test_parse_rejects_short_header() {
        let raw = "firstName,middleName,lastName,email,phone1,phone2,hobbies,place\n";
        assert!(matches!(parse(raw), Err(FormatError::HeaderMismatch { .. })));
    }

    #[test]
    fn test_parse_rejects_wrong_column_count_in_any_row() {
        let raw = format!(
            "{HEADER}\nA,,B,a@gmail.com,1234567890,,,Delhi,Male\nC,D,c@gmail.com,1234567890,,,Delhi,Male\n"
        );
        assert_eq!(
            parse(&raw),
            Err(FormatError::ColumnCount {
                row: 2,
                expected: 9,
                found: 8
            })
        );
    }

    #[test]
    fn test_serialize_then_parse() {
        let persons = vec![
            Person {
                first_name: "Ann".to_string(),
                middle_name: Some("M".to_string()),
                last_name: "Lee".to_string(),
                email: "ann@gmail.com".to_string(),
                phone1: "1234567890".to_string(),
                phone2: Some("0987654321".to_string()),
                hobbies: vec!["chess".to_string(), "art".to_string()],
                place: "Delhi".to_string(),
                gender: "Female".to_string(),
            },
            Person {
                first_name: "Bob".to_string(),
                last_name: "Ray".to_string(),
                email: "bob@gmail.com".to_string(),
                phone1: "1111111111".to_string(),
                place: "Kerala".to_string(),
                gender: "Male".to_string(),
                ..Person::default()
            },
        ];

        let parsed = parse(&serialize(&persons)).unwrap();
        let round: Vec<Person> = parsed.rows.into_iter().map(|r| r.person).collect();
        assert_eq!(round, persons);
    }
}
