//! Per-row field validation for import batches and single creates

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ParsedBatch;
use crate::error::{Error, Result};
use crate::model::Person;

/// Configurable field rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Only addresses at this domain are accepted
    pub email_domain: String,
    /// Allowed places; empty allows any non-empty value
    pub places: Vec<String>,
    /// Allowed genders; empty allows any non-empty value
    pub genders: Vec<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            email_domain: "gmail.com".to_string(),
            places: vec!["Kerala".to_string(), "Tamil Nadu".to_string(), "Delhi".to_string()],
            genders: vec!["Male".to_string(), "Female".to_string(), "Other".to_string()],
        }
    }
}

/// A single offending field in a single row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub row: usize,
    /// Column name as it appears in the batch header
    pub field: String,
    pub message: String,
}

/// Rows that passed every check, plus every error found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedBatch {
    pub accepted: Vec<Person>,
    pub errors: Vec<FieldError>,
}

impl ValidatedBatch {
    /// True when no row produced an error
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compiled validation rules
#[derive(Debug, Clone)]
pub struct RecordValidator {
    rules: ValidationRules,
    email_shape: Regex,
    email_domain: Regex,
    phone: Regex,
}

impl RecordValidator {
    pub fn new(rules: &ValidationRules) -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| Error::Config(format!("Invalid validation pattern: {e}")))
        };

        Ok(Self {
            email_shape: compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?,
            email_domain: compile(&format!(
                r"^[a-zA-Z0-9._%+-]+@{}$",
                regex::escape(&rules.email_domain)
            ))?,
            phone: compile(r"^\d{10}$")?,
            rules: rules.clone(),
        })
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validate every row independently
    pub fn validate(&self, batch: &ParsedBatch) -> ValidatedBatch {
        let mut result = ValidatedBatch::default();
        for raw in &batch.rows {
            let errors = self.check(raw.row, &raw.person);
            if errors.is_empty() {
                result.accepted.push(raw.person.clone());
            } else {
                result.errors.extend(errors);
            }
        }
        result
    }

    /// All field errors for one person, at most one per field
    pub fn check(&self, row: usize, person: &Person) -> Vec<FieldError> {
        let checks = [
            ("firstName", required(&person.first_name, "First name")),
            ("lastName", required(&person.last_name, "Last name")),
            ("email", self.check_email(&person.email)),
            ("phone1", self.check_phone(&person.phone1, "Phone 1")),
            ("phone2", self.check_phone_optional(person.phone2.as_deref())),
            ("hobbies", check_hobbies(&person.hobbies)),
            ("place", member(&person.place, "Place", &self.rules.places)),
            ("gender", member(&person.gender, "Gender", &self.rules.genders)),
        ];

        checks
            .into_iter()
            .filter_map(|(field, outcome)| {
                outcome.err().map(|message| FieldError {
                    row,
                    field: field.to_string(),
                    message,
                })
            })
            .collect()
    }

    fn check_email(&self, email: &str) -> std::result::Result<(), String> {
        required(email, "Email")?;
        if !self.email_shape.is_match(email) {
            return Err("Email is not a valid address".to_string());
        }
        if !self.email_domain.is_match(email) {
            return Err(format!("Email must be a @{} address", self.rules.email_domain));
        }
        Ok(())
    }

    fn check_phone(&self, phone: &str, label: &str) -> std::result::Result<(), String> {
        required(phone, label)?;
        if !self.phone.is_match(phone) {
            return Err(format!("{label} must be exactly 10 digits"));
        }
        Ok(())
    }

    fn check_phone_optional(&self, phone: Option<&str>) -> std::result::Result<(), String> {
        match phone {
            Some(p) if !p.is_empty() => self.check_phone(p, "Phone 2"),
            _ => Ok(()),
        }
    }
}

fn required(value: &str, label: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{label} is required"))
    } else {
        Ok(())
    }
}

fn check_hobbies(hobbies: &[String]) -> std::result::Result<(), String> {
    if hobbies.iter().any(|h| h.trim().is_empty()) {
        Err("Hobby is required".to_string())
    } else {
        Ok(())
    }
}

fn member(value: &str, label: &str, allowed: &[String]) -> std::result::Result<(), String> {
    required(value, label)?;
    if !allowed.is_empty() && !allowed.iter().any(|a| a == value) {
        return Err(format!("{label} must be one of: {}", allowed.join(", ")));
    }
    Ok(())
}
