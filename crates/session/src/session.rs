//! Event-driven form session.
//!
//! Holds the live values of every control. Each change runs the changed
//! field's rule and the rules that depend on it, then the quick submit
//! gate, in that order.

use chrono::Utc;
use regform_core::{
    ExportArtifact, FieldId, FieldResult, FieldValue, FormInput, FormReport, FormValidator,
    PasswordStrength, RegistrationRecord,
};
use serde::Serialize;

use crate::error::SessionResult;

/// What the presentation layer should re-render after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldUpdate {
    /// Verdicts for the changed field and its dependents, in run order.
    pub results: Vec<FieldResult>,
    /// New meter reading, when the password changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<PasswordStrength>,
    /// Rebuilt state options, when the country changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_options: Option<Vec<String>>,
    pub submit_enabled: bool,
}

impl FieldUpdate {
    pub fn result(&self, field: FieldId) -> Option<&FieldResult> {
        self.results.iter().find(|r| r.field == field)
    }
}

/// An accepted registration, ready for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub record: RegistrationRecord,
    pub artifact: ExportArtifact,
    pub status: &'static str,
}

/// Result of pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(Box<Submission>),
    Rejected(FormReport),
}

/// Live state of one registration form.
#[derive(Debug, Clone)]
pub struct FormSession {
    validator: FormValidator,
    input: FormInput,
    submitted: bool,
}

impl FormSession {
    pub fn new(validator: FormValidator) -> Self {
        tracing::debug!(
            countries = validator.countries().len(),
            city_enabled = validator.config().city_enabled,
            gender_options = validator.config().gender_options.len(),
            "Form session started",
        );
        Self {
            validator,
            input: FormInput::default(),
            submitted: false,
        }
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    /// Country options, alphabetical.
    pub fn countries(&self) -> Vec<&str> {
        self.validator.countries()
    }

    /// State options for the currently selected country.
    pub fn state_options(&self) -> Vec<&str> {
        self.validator.states_for(&self.input.country)
    }

    /// Whether the submit control is currently enabled.
    pub fn submit_enabled(&self) -> bool {
        !self.submitted && self.validator.check_form_state(&self.input)
    }

    /// Apply a control change and re-run the affected rules.
    pub fn field_changed(
        &mut self,
        field: FieldId,
        value: FieldValue,
    ) -> SessionResult<FieldUpdate> {
        let country_before = self.input.country.clone();
        self.input.set(field, value)?;
        self.submitted = false;

        let mut state_options = None;
        if field == FieldId::Country {
            // The state select is rebuilt for the new country, which drops
            // whatever was selected before.
            if self.input.country != country_before {
                self.input.state.clear();
            }
            state_options = Some(
                self.state_options()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            );
        }

        let results: Vec<FieldResult> = self
            .dependents(field)
            .into_iter()
            .map(|f| self.validator.validate_field(f, &self.input))
            .collect();

        let strength = (field == FieldId::Password)
            .then(|| self.validator.password_strength(&self.input));

        let submit_enabled = self.submit_enabled();

        tracing::debug!(
            field = %field,
            failing = results.iter().filter(|r| !r.valid).count(),
            submit_enabled,
            "Field changed",
        );

        Ok(FieldUpdate {
            results,
            strength,
            state_options,
            submit_enabled,
        })
    }

    /// Rules to run, in order, when `field` changes.
    fn dependents(&self, field: FieldId) -> Vec<FieldId> {
        match field {
            FieldId::Dob => Vec::new(),
            FieldId::Country => vec![FieldId::Country, FieldId::State],
            FieldId::Password if !self.input.confirm_password.is_empty() => {
                vec![FieldId::Password, FieldId::ConfirmPassword]
            }
            other => vec![other],
        }
    }

    /// Run every rule without submitting.
    pub fn validate_all(&self) -> FormReport {
        self.validator.validate_all(&self.input)
    }

    /// Clear every control and every message.
    pub fn reset(&mut self) -> FieldUpdate {
        self.input = FormInput::default();
        self.submitted = false;
        tracing::debug!("Form reset");
        FieldUpdate {
            results: FieldId::VALIDATED.into_iter().map(FieldResult::ok).collect(),
            strength: Some(self.validator.password_strength(&self.input)),
            state_options: Some(Vec::new()),
            submit_enabled: self.submit_enabled(),
        }
    }

    /// Submit, stamping the record with the current time.
    pub fn submit(&mut self) -> SessionResult<SubmitOutcome> {
        self.submit_at(Utc::now())
    }

    /// Submit with an explicit creation time. An accepted submission keeps
    /// the submit control disabled until the next change.
    pub fn submit_at(&mut self, now: chrono::DateTime<Utc>) -> SessionResult<SubmitOutcome> {
        let record = match self.validator.submit(&self.input, now) {
            Ok(record) => record,
            Err(report) => {
                tracing::info!(failing = report.errors().len(), "Registration rejected");
                return Ok(SubmitOutcome::Rejected(report));
            }
        };

        let artifact = record.export()?;
        self.submitted = true;
        tracing::info!(
            file_name = %artifact.file_name,
            country = %record.country,
            "Registration accepted",
        );
        Ok(SubmitOutcome::Accepted(Box::new(Submission {
            record,
            artifact,
            status: regform_core::rules::STATUS_ACCEPTED,
        })))
    }
}
