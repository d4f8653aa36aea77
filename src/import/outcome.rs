//! Import results and their classification.

use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

/// A record that could not be imported, keyed by its position in the upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecordError {
    /// Zero-based position of the record in the uploaded sequence.
    pub index: usize,
    pub error: String,
}

/// Overall classification of a completed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    /// Every record was imported.
    Complete,
    /// Some records were imported and some failed.
    Partial,
    /// No record was imported.
    Failed,
}

/// Result of an import run whose upload decoded successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub succeeded: usize,
    pub errors: Vec<RecordError>,
}

impl ImportOutcome {
    /// Number of records attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.errors.len()
    }

    pub fn status(&self) -> ImportStatus {
        match (self.succeeded, self.errors.is_empty()) {
            (_, true) => ImportStatus::Complete,
            (0, false) => ImportStatus::Failed,
            _ => ImportStatus::Partial,
        }
    }

    pub fn message(&self) -> String {
        match self.status() {
            ImportStatus::Complete => {
                format!("{} records imported successfully.", self.succeeded)
            }
            ImportStatus::Partial | ImportStatus::Failed => format!(
                "{} records imported, {} errors.",
                self.succeeded,
                self.errors.len()
            ),
        }
    }

    pub(crate) fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub(crate) fn record_error(&mut self, index: usize, error: impl Into<String>) {
        self.errors.push(RecordError {
            index,
            error: error.into(),
        });
    }
}

/// JSON body returned by the import endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImportReport {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<RecordError>>,
}

impl ImportReport {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

impl From<ImportOutcome> for ImportReport {
    fn from(outcome: ImportOutcome) -> Self {
        let message = outcome.message();
        let errors = (!outcome.errors.is_empty()).then_some(outcome.errors);
        Self { message, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(succeeded: usize, failed: usize) -> ImportOutcome {
        let mut outcome = ImportOutcome {
            succeeded,
            ..Default::default()
        };
        for index in 0..failed {
            outcome.record_error(index, "name required");
        }
        outcome
    }

    #[test]
    fn classifies_by_successes_and_errors() {
        assert_eq!(outcome(3, 0).status(), ImportStatus::Complete);
        assert_eq!(outcome(0, 0).status(), ImportStatus::Complete);
        assert_eq!(outcome(2, 1).status(), ImportStatus::Partial);
        assert_eq!(outcome(0, 2).status(), ImportStatus::Failed);
    }

    #[test]
    fn messages_report_counts() {
        assert_eq!(outcome(3, 0).message(), "3 records imported successfully.");
        assert_eq!(outcome(2, 1).message(), "2 records imported, 1 errors.");
        assert_eq!(outcome(0, 2).message(), "0 records imported, 2 errors.");
    }

    #[test]
    fn report_omits_errors_on_full_success() {
        let report = ImportReport::from(outcome(1, 0));
        let body = serde_json::to_value(&report).expect("serializes");
        assert_eq!(body, serde_json::json!({"message": "1 records imported successfully."}));
    }
}
