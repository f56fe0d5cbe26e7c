//! The finalized registration snapshot and its downloadable export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::config::FormConfig;
use crate::error::CoreError;
use crate::fields::FormInput;
use crate::form::{CALLING_CODE_RE, EMAIL_RE};
use crate::types::Timestamp;

/// MIME type of an exported record.
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Placeholder used in the export file name when the first name is empty.
const ANONYMOUS_NAME: &str = "user";

/// A validated registration.
///
/// Only [`crate::form::FormValidator::submit`] builds one from form
/// input. Parsing one back from JSON re-checks its integrity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecordFields")]
#[non_exhaustive]
pub struct RegistrationRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub country: String,
    pub state: String,
    pub city: Option<String>,
    pub created_at: Timestamp,
}

/// A record ready to be offered as a file download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content: String,
    pub mime_type: &'static str,
}

impl RegistrationRecord {
    /// Snapshot input that has already passed full validation.
    pub(crate) fn from_valid_input(
        input: &FormInput,
        config: &FormConfig,
        created_at: Timestamp,
    ) -> Self {
        Self {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email.trim().to_string(),
            country_code: input.country_code.trim().to_string(),
            phone: input.phone.trim().to_string(),
            dob: input.dob,
            gender: input.gender.clone().filter(|_| config.has_gender()),
            country: input.country.clone(),
            state: input.state.clone(),
            city: config
                .city_enabled
                .then(|| input.city.trim().to_string()),
            created_at,
        }
    }

    /// Parse an exported record, rejecting one that fails its integrity
    /// check.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| match e.classify() {
            Category::Data => CoreError::Validation(e.to_string()),
            _ => CoreError::Serialization(e),
        })
    }

    /// `registration_<firstName>_<YYYY-MM-DD-HH-MM-SS>.json`, UTC.
    pub fn file_name(&self) -> String {
        let who = if self.first_name.is_empty() {
            ANONYMOUS_NAME
        } else {
            &self.first_name
        };
        format!(
            "registration_{who}_{}.json",
            self.created_at.format("%Y-%m-%d-%H-%M-%S")
        )
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn export(&self) -> Result<ExportArtifact, CoreError> {
        Ok(ExportArtifact {
            file_name: self.file_name(),
            content: self.to_json_pretty()?,
            mime_type: EXPORT_MIME_TYPE,
        })
    }
}

// ---------------------------------------------------------------------------
// Integrity check on import
// ---------------------------------------------------------------------------

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    #[validate(custom(function = "not_blank"))]
    first_name: String,
    #[validate(custom(function = "not_blank"))]
    last_name: String,
    #[validate(regex(path = *EMAIL_RE))]
    email: String,
    #[validate(regex(path = *CALLING_CODE_RE))]
    country_code: String,
    #[validate(custom(function = "not_blank"))]
    phone: String,
    #[serde(default)]
    dob: Option<NaiveDate>,
    #[serde(default)]
    gender: Option<String>,
    #[validate(custom(function = "not_blank"))]
    country: String,
    #[validate(custom(function = "not_blank"))]
    state: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    city: Option<String>,
    created_at: Timestamp,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl TryFrom<RecordFields> for RegistrationRecord {
    type Error = ValidationErrors;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        fields.validate()?;
        Ok(Self {
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            country_code: fields.country_code,
            phone: fields.phone,
            dob: fields.dob,
            gender: fields.gender,
            country: fields.country,
            state: fields.state,
            city: fields.city,
            created_at: fields.created_at,
        })
    }
}
