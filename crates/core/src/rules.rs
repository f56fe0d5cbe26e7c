//! Validation outcome types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fields::FieldId;

/// Status shown when the form is rejected.
pub const STATUS_REJECTED: &str = "Please fix the errors above before submitting.";

/// Status shown when the form is accepted.
pub const STATUS_ACCEPTED: &str =
    "Registration successful! You may download the submitted data below.";

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Empty or missing.
    Required,
    /// Present but fails its pattern.
    Malformed,
    /// Well-formed but rejected by a reference table.
    Disallowed,
    /// Does not equal the field it must repeat.
    Mismatch,
    /// A choice control with nothing chosen.
    Unselected,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldViolation {
    pub field: FieldId,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: FieldId, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// Verdict for one field. `message` is empty when the field is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldResult {
    pub field: FieldId,
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ViolationKind>,
}

impl FieldResult {
    pub fn ok(field: FieldId) -> Self {
        Self {
            field,
            valid: true,
            message: String::new(),
            kind: None,
        }
    }

    pub fn from_outcome(field: FieldId, outcome: Result<(), FieldViolation>) -> Self {
        match outcome {
            Ok(()) => Self::ok(field),
            Err(v) => Self {
                field,
                valid: false,
                message: v.message,
                kind: Some(v.kind),
            },
        }
    }
}

/// Aggregated result of running every field validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormReport {
    pub is_valid: bool,
    pub results: Vec<FieldResult>,
}

impl FormReport {
    pub fn from_results(results: Vec<FieldResult>) -> Self {
        Self {
            is_valid: results.iter().all(|r| r.valid),
            results,
        }
    }

    /// Failing fields mapped to their messages.
    pub fn errors(&self) -> BTreeMap<FieldId, &str> {
        self.results
            .iter()
            .filter(|r| !r.valid)
            .map(|r| (r.field, r.message.as_str()))
            .collect()
    }

    pub fn result(&self, field: FieldId) -> Option<&FieldResult> {
        self.results.iter().find(|r| r.field == field)
    }

    /// Form-level status line.
    pub fn status(&self) -> &'static str {
        if self.is_valid {
            STATUS_ACCEPTED
        } else {
            STATUS_REJECTED
        }
    }
}
