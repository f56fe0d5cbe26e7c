//! The registration form validator. Pure logic: every method is a function
//! of the supplied [`FormInput`] and the injected reference data.
//!
//! There are two tiers of checks:
//!
//! - [`FormValidator::validate_all`] runs every field rule and is the only
//!   gate for building a [`RegistrationRecord`].
//! - [`FormValidator::check_form_state`] is the cheap per-keystroke gate for
//!   the submit control. It checks presence plus three shape patterns and
//!   skips the reference-table lookups and password strength, so it may pass
//!   input that full validation later rejects.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::FormConfig;
use crate::error::CoreError;
use crate::fields::{FieldId, FormInput};
use crate::password::{self, PasswordStrength};
use crate::record::RegistrationRecord;
use crate::reference::ReferenceData;
use crate::rules::{FieldResult, FieldViolation, FormReport, ViolationKind};
use crate::types::Timestamp;

/// `local@domain.tld`, no whitespace, TLD of two or more characters.
pub const EMAIL_PATTERN: &str = r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]{2,}$";

/// `+` followed by one to four ASCII digits.
pub const CALLING_CODE_PATTERN: &str = r"^\+[0-9]{1,4}$";

pub(crate) static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

pub(crate) static CALLING_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CALLING_CODE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Shape checks
// ---------------------------------------------------------------------------

/// Whether `email` has the `local@domain.tld` shape.
pub fn is_email_shape(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whether `code` is `+` followed by 1-4 digits.
pub fn is_calling_code_shape(code: &str) -> bool {
    CALLING_CODE_RE.is_match(code)
}

/// Strip spaces, hyphens and parentheses from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect()
}

/// Domain part of an email address: everything after the last `@`.
pub fn email_domain(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain)
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Validates the registration form against injected reference data.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    config: FormConfig,
    reference: ReferenceData,
}

impl FormValidator {
    pub fn new(config: FormConfig, reference: ReferenceData) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self { config, reference })
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    // -- Phone shape depends on config, so it lives on the validator --------

    /// Whether `phone`, once separators are stripped, is all digits and
    /// within the configured length range.
    pub fn is_phone_shape(&self, phone: &str) -> bool {
        let digits = normalize_phone(phone);
        (self.config.phone_min_digits..=self.config.phone_max_digits).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
    }

    // -- Country / state cascade --------------------------------------------

    /// Country options, alphabetical.
    pub fn countries(&self) -> Vec<&str> {
        self.reference.countries.countries()
    }

    /// State options for `country`, alphabetical; empty when the country is
    /// empty or unknown.
    pub fn states_for(&self, country: &str) -> Vec<&str> {
        self.reference.countries.states_for(country)
    }

    // -- Per-field rules -----------------------------------------------------

    pub fn validate_first_name(&self, input: &FormInput) -> Result<(), FieldViolation> {
        require_text(FieldId::FirstName, &input.first_name, "First name is required")
    }

    pub fn validate_last_name(&self, input: &FormInput) -> Result<(), FieldViolation> {
        require_text(FieldId::LastName, &input.last_name, "Last name is required")
    }

    pub fn validate_email(&self, input: &FormInput) -> Result<(), FieldViolation> {
        let email = input.email.trim();
        require_text(FieldId::Email, email, "Email is required")?;
        if !is_email_shape(email) {
            return Err(FieldViolation::new(
                FieldId::Email,
                ViolationKind::Malformed,
                "Invalid email format",
            ));
        }
        let disposable = email_domain(email)
            .is_some_and(|domain| self.reference.disposable_domains.contains(domain));
        if disposable {
            return Err(FieldViolation::new(
                FieldId::Email,
                ViolationKind::Disallowed,
                "Disposable email addresses are not allowed",
            ));
        }
        Ok(())
    }

    pub fn validate_country_code(&self, input: &FormInput) -> Result<(), FieldViolation> {
        let code = input.country_code.trim();
        require_text(FieldId::CountryCode, code, "Country code is required")?;
        if !is_calling_code_shape(code) {
            return Err(FieldViolation::new(
                FieldId::CountryCode,
                ViolationKind::Malformed,
                "Use format +<country code>, e.g. +1, +91",
            ));
        }
        if !self.reference.calling_codes.contains(code) {
            return Err(FieldViolation::new(
                FieldId::CountryCode,
                ViolationKind::Disallowed,
                format!("Unrecognized country code: {code}. Use a correct calling code like +1, +91."),
            ));
        }
        Ok(())
    }

    pub fn validate_phone(&self, input: &FormInput) -> Result<(), FieldViolation> {
        let phone = input.phone.trim();
        require_text(FieldId::Phone, phone, "Phone is required")?;
        if !self.is_phone_shape(phone) {
            return Err(FieldViolation::new(
                FieldId::Phone,
                ViolationKind::Malformed,
                format!(
                    "Enter a valid phone number ({}-{} digits) without country code",
                    self.config.phone_min_digits, self.config.phone_max_digits
                ),
            ));
        }
        Ok(())
    }

    pub fn validate_country(&self, input: &FormInput) -> Result<(), FieldViolation> {
        require_choice(FieldId::Country, &input.country, "Country is required")
    }

    /// The state must be chosen and must belong to the selected country.
    pub fn validate_state(&self, input: &FormInput) -> Result<(), FieldViolation> {
        require_choice(FieldId::State, &input.state, "State is required")?;
        if !self.reference.countries.has_state(&input.country, &input.state) {
            return Err(FieldViolation::new(
                FieldId::State,
                ViolationKind::Disallowed,
                format!("{} is not a state of {}", input.state, input.country),
            ));
        }
        Ok(())
    }

    /// Passes when the form has no city field.
    pub fn validate_city(&self, input: &FormInput) -> Result<(), FieldViolation> {
        if !self.config.city_enabled {
            return Ok(());
        }
        require_text(FieldId::City, &input.city, "City is required")
    }

    /// Passes when the form has no gender control.
    pub fn validate_gender(&self, input: &FormInput) -> Result<(), FieldViolation> {
        if !self.config.has_gender() {
            return Ok(());
        }
        let selected = input
            .gender
            .as_deref()
            .is_some_and(|g| self.config.gender_options.iter().any(|o| o == g));
        if !selected {
            return Err(FieldViolation::new(
                FieldId::Gender,
                ViolationKind::Unselected,
                "Please select your gender",
            ));
        }
        Ok(())
    }

    pub fn validate_password(&self, input: &FormInput) -> Result<(), FieldViolation> {
        if input.password.is_empty() {
            return Err(FieldViolation::new(
                FieldId::Password,
                ViolationKind::Required,
                "Password is required",
            ));
        }
        if password::score(&input.password) < self.config.min_password_score {
            return Err(FieldViolation::new(
                FieldId::Password,
                ViolationKind::Malformed,
                "Password is weak: make it longer and include uppercase, number, and symbol",
            ));
        }
        Ok(())
    }

    pub fn validate_confirm_password(&self, input: &FormInput) -> Result<(), FieldViolation> {
        if input.confirm_password.is_empty() {
            return Err(FieldViolation::new(
                FieldId::ConfirmPassword,
                ViolationKind::Required,
                "Please confirm password",
            ));
        }
        if input.confirm_password != input.password {
            return Err(FieldViolation::new(
                FieldId::ConfirmPassword,
                ViolationKind::Mismatch,
                "Passwords do not match",
            ));
        }
        Ok(())
    }

    pub fn validate_terms(&self, input: &FormInput) -> Result<(), FieldViolation> {
        if !input.terms {
            return Err(FieldViolation::new(
                FieldId::Terms,
                ViolationKind::Unselected,
                "You must accept terms & conditions",
            ));
        }
        Ok(())
    }

    // -- Dispatch and aggregate ---------------------------------------------

    /// Run the rule for one field. Fields without a rule always pass.
    pub fn validate_field(&self, field: FieldId, input: &FormInput) -> FieldResult {
        let outcome = match field {
            FieldId::FirstName => self.validate_first_name(input),
            FieldId::LastName => self.validate_last_name(input),
            FieldId::Email => self.validate_email(input),
            FieldId::CountryCode => self.validate_country_code(input),
            FieldId::Phone => self.validate_phone(input),
            FieldId::Dob => Ok(()),
            FieldId::Country => self.validate_country(input),
            FieldId::State => self.validate_state(input),
            FieldId::City => self.validate_city(input),
            FieldId::Gender => self.validate_gender(input),
            FieldId::Password => self.validate_password(input),
            FieldId::ConfirmPassword => self.validate_confirm_password(input),
            FieldId::Terms => self.validate_terms(input),
        };
        FieldResult::from_outcome(field, outcome)
    }

    /// Run every field rule. Never stops at the first failure, so the
    /// report carries a message for every failing field.
    pub fn validate_all(&self, input: &FormInput) -> FormReport {
        FormReport::from_results(
            FieldId::VALIDATED
                .into_iter()
                .map(|field| self.validate_field(field, input))
                .collect(),
        )
    }

    pub fn is_form_valid(&self, input: &FormInput) -> bool {
        self.validate_all(input).is_valid
    }

    /// Cheap gate for enabling the submit control: every required control
    /// filled plus the email, calling-code and phone shapes.
    pub fn check_form_state(&self, input: &FormInput) -> bool {
        let gender_chosen = !self.config.has_gender() || input.gender.is_some();
        let city_filled = !self.config.city_enabled || !input.city.trim().is_empty();

        let required_present = !input.first_name.trim().is_empty()
            && !input.last_name.trim().is_empty()
            && !input.email.trim().is_empty()
            && !input.country_code.trim().is_empty()
            && !input.phone.trim().is_empty()
            && !input.country.is_empty()
            && !input.state.is_empty()
            && city_filled
            && !input.password.is_empty()
            && !input.confirm_password.is_empty()
            && input.terms
            && gender_chosen;

        required_present
            && is_email_shape(input.email.trim())
            && is_calling_code_shape(input.country_code.trim())
            && self.is_phone_shape(input.phone.trim())
    }

    pub fn password_strength(&self, input: &FormInput) -> PasswordStrength {
        PasswordStrength::of(&input.password)
    }

    /// Validate everything and, if it all passes, snapshot the input as a
    /// [`RegistrationRecord`] stamped with `created_at`.
    pub fn submit(
        &self,
        input: &FormInput,
        created_at: Timestamp,
    ) -> Result<RegistrationRecord, FormReport> {
        let report = self.validate_all(input);
        if !report.is_valid {
            return Err(report);
        }
        Ok(RegistrationRecord::from_valid_input(
            input,
            &self.config,
            created_at,
        ))
    }
}

fn require_text(field: FieldId, value: &str, message: &str) -> Result<(), FieldViolation> {
    if value.trim().is_empty() {
        return Err(FieldViolation::new(field, ViolationKind::Required, message));
    }
    Ok(())
}

fn require_choice(field: FieldId, value: &str, message: &str) -> Result<(), FieldViolation> {
    if value.is_empty() {
        return Err(FieldViolation::new(field, ViolationKind::Unselected, message));
    }
    Ok(())
}
