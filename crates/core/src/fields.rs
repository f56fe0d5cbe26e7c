//! Form fields and the values a caller supplies for them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier of every control on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    CountryCode,
    Phone,
    Dob,
    Country,
    State,
    City,
    Gender,
    Password,
    ConfirmPassword,
    Terms,
}

impl FieldId {
    /// Fields that have a validator, in the order they are reported.
    pub const VALIDATED: [FieldId; 12] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::CountryCode,
        FieldId::Phone,
        FieldId::Country,
        FieldId::State,
        FieldId::City,
        FieldId::Gender,
        FieldId::Password,
        FieldId::ConfirmPassword,
        FieldId::Terms,
    ];

    /// The control's id on the form, e.g. `confirmPassword`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::CountryCode => "countryCode",
            Self::Phone => "phone",
            Self::Dob => "dob",
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::Gender => "gender",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Terms => "terms",
        }
    }

    /// Parse a control id.
    pub fn from_str_id(s: &str) -> Result<Self, CoreError> {
        Self::VALIDATED
            .into_iter()
            .chain([Self::Dob])
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new value for one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text inputs.
    Text(String),
    /// Checkboxes.
    Flag(bool),
    /// Selects and radio groups; `None` is "nothing selected".
    Choice(Option<String>),
    /// Date inputs; `None` is "left blank".
    Date(Option<NaiveDate>),
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
            Self::Choice(_) => "choice",
            Self::Date(_) => "date",
        }
    }
}

/// Current values of every control on the form.
///
/// Selects use an empty string for "nothing selected", like the
/// placeholder option of an HTML select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub country: String,
    pub state: String,
    pub city: String,
    pub password: String,
    pub confirm_password: String,
    pub terms: bool,
}

impl FormInput {
    /// Store `value` into `field`, rejecting values of the wrong kind.
    pub fn set(&mut self, field: FieldId, value: FieldValue) -> Result<(), CoreError> {
        match (field, value) {
            (FieldId::FirstName, FieldValue::Text(v)) => self.first_name = v,
            (FieldId::LastName, FieldValue::Text(v)) => self.last_name = v,
            (FieldId::Email, FieldValue::Text(v)) => self.email = v,
            (FieldId::CountryCode, FieldValue::Text(v)) => self.country_code = v,
            (FieldId::Phone, FieldValue::Text(v)) => self.phone = v,
            (FieldId::City, FieldValue::Text(v)) => self.city = v,
            (FieldId::Password, FieldValue::Text(v)) => self.password = v,
            (FieldId::ConfirmPassword, FieldValue::Text(v)) => self.confirm_password = v,
            (FieldId::Country, FieldValue::Choice(v)) => self.country = v.unwrap_or_default(),
            (FieldId::State, FieldValue::Choice(v)) => self.state = v.unwrap_or_default(),
            (FieldId::Gender, FieldValue::Choice(v)) => self.gender = v,
            (FieldId::Dob, FieldValue::Date(v)) => self.dob = v,
            (FieldId::Terms, FieldValue::Flag(v)) => self.terms = v,
            (field, value) => {
                return Err(CoreError::FieldType {
                    field: field.as_str(),
                    got: value.kind(),
                })
            }
        }
        Ok(())
    }
}
