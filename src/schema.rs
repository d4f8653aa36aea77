//! The fixed two-field schema every dummy payload is validated against.
//!
//! Shared by the CRUD endpoints and the bulk import pipeline so both apply
//! identical rules: `name` is a required non-blank string of at most
//! [`NAME_MAX_LEN`] characters, `description` is optional and scalar values are
//! coerced to text.

use crate::import::record::{RawRecord, RawValue};
use crate::models::NewDummy;
use std::fmt;
use thiserror::Error;

pub const NAME_MAX_LEN: usize = 255;

/// A single field-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every reason a record failed validation, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }
}

/// Validate a raw record into a [`NewDummy`].
pub fn load(record: &RawRecord) -> Result<NewDummy, ValidationError> {
    if let RawRecord::NotAnObject(value) = record {
        return Err(ValidationError::single(
            "record",
            format!("record must be an object, got {}", value.kind()),
        ));
    }

    let mut errors = Vec::new();

    let name = match load_name(record.field("name")) {
        Ok(name) => Some(name),
        Err(message) => {
            errors.push(FieldError {
                field: "name",
                message,
            });
            None
        }
    };

    let description = match load_description(record.field("description")) {
        Ok(description) => description,
        Err(message) => {
            errors.push(FieldError {
                field: "description",
                message,
            });
            None
        }
    };

    match name {
        Some(name) if errors.is_empty() => Ok(NewDummy { name, description }),
        _ => Err(ValidationError { errors }),
    }
}

/// Validate a JSON request body into a [`NewDummy`].
pub fn load_json(body: serde_json::Value) -> Result<NewDummy, ValidationError> {
    load(&RawRecord::from(body))
}

fn load_name(value: Option<&RawValue>) -> Result<String, String> {
    match value {
        None | Some(RawValue::Null) => Err("name required".to_string()),
        Some(RawValue::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Err("name required".to_string())
            } else if trimmed.chars().count() > NAME_MAX_LEN {
                Err(format!("name must be at most {NAME_MAX_LEN} characters"))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(other) => Err(format!("name must be a string, got {}", other.kind())),
    }
}

fn load_description(value: Option<&RawValue>) -> Result<Option<String>, String> {
    match value {
        None | Some(RawValue::Null) => Ok(None),
        Some(RawValue::Text(text)) if text.is_empty() => Ok(None),
        Some(RawValue::Text(text)) => Ok(Some(text.clone())),
        Some(RawValue::Number(number)) => Ok(Some(number.to_string())),
        Some(RawValue::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(format!("description must be a string, got {}", other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_name_and_description() {
        let record: RawRecord = [("name", "Alice"), ("description", "Engineer")]
            .into_iter()
            .collect();
        let dummy = load(&record).expect("valid record");
        assert_eq!(dummy, NewDummy::new("Alice", Some("Engineer".into())));
    }

    #[test]
    fn empty_name_is_required() {
        let record: RawRecord = [("name", ""), ("description", "Manager")]
            .into_iter()
            .collect();
        let err = load(&record).expect_err("missing name");
        assert_eq!(err.to_string(), "name required");
    }

    #[test]
    fn blank_description_becomes_none() {
        let record: RawRecord = [("name", "Bob"), ("description", "")].into_iter().collect();
        assert_eq!(load(&record).expect("valid").description, None);
    }

    #[test]
    fn name_is_trimmed_and_length_checked() {
        let dummy = load_json(json!({"name": "  Carol  "})).expect("valid");
        assert_eq!(dummy.name, "Carol");

        let err = load_json(json!({"name": "x".repeat(NAME_MAX_LEN + 1)})).expect_err("too long");
        assert_eq!(err.to_string(), "name must be at most 255 characters");
    }

    #[test]
    fn scalar_descriptions_are_coerced() {
        let dummy = load_json(json!({"name": "n", "description": 42})).expect("valid");
        assert_eq!(dummy.description.as_deref(), Some("42"));

        let dummy = load_json(json!({"name": "n", "description": true})).expect("valid");
        assert_eq!(dummy.description.as_deref(), Some("true"));
    }

    #[test]
    fn collects_errors_for_every_field() {
        let err = load_json(json!({"name": 7, "description": ["a"]})).expect_err("invalid");
        assert_eq!(err.errors.len(), 2);
        assert_eq!(
            err.to_string(),
            "name must be a string, got number; description must be a string, got list"
        );
    }

    #[test]
    fn non_objects_are_rejected() {
        let err = load_json(json!("just a string")).expect_err("not an object");
        assert_eq!(err.to_string(), "record must be an object, got string");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let dummy = load_json(json!({"name": "n", "colour": "blue"})).expect("valid");
        assert_eq!(dummy, NewDummy::new("n", None));
    }
}
