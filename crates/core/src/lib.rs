//! `regform-core`: validation rules for the registration form.
//!
//! Pure logic with no I/O and no logging. The presentation layer supplies a
//! [`fields::FormInput`]; [`form::FormValidator`] answers with per-field
//! verdicts, the quick submit gate, password strength, and, once every rule
//! passes, a [`record::RegistrationRecord`] ready for export.

pub mod config;
pub mod error;
pub mod fields;
pub mod form;
pub mod password;
pub mod record;
pub mod reference;
pub mod rules;
pub mod types;

pub use config::FormConfig;
pub use error::CoreError;
pub use fields::{FieldId, FieldValue, FormInput};
pub use form::FormValidator;
pub use password::PasswordStrength;
pub use record::{ExportArtifact, RegistrationRecord};
pub use reference::{CallingCodes, CountryStates, DisposableDomains, ReferenceData};
pub use rules::{FieldResult, FieldViolation, FormReport, ViolationKind};
