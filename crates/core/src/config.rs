//! Form configuration.
//!
//! Tunable knobs for the rule set and the shape of the form being
//! validated. Every field has a default matching the stock registration
//! form, so an empty JSON object is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::password::MAX_SCORE;

/// Default minimum password score required to pass.
pub const DEFAULT_MIN_PASSWORD_SCORE: u8 = 3;

/// Default minimum digit count of a local phone number.
pub const DEFAULT_PHONE_MIN_DIGITS: usize = 6;

/// Default maximum digit count of a local phone number.
pub const DEFAULT_PHONE_MAX_DIGITS: usize = 12;

/// Configuration for a [`crate::form::FormValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Minimum strength score (0..=4) a password needs to pass.
    pub min_password_score: u8,
    /// Minimum digits in the phone number after separators are stripped.
    pub phone_min_digits: usize,
    /// Maximum digits in the phone number after separators are stripped.
    pub phone_max_digits: usize,
    /// Whether the form has a city field at all.
    pub city_enabled: bool,
    /// Values of the gender radio group. Empty means the form has no
    /// gender control and the gender rule always passes.
    pub gender_options: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_password_score: DEFAULT_MIN_PASSWORD_SCORE,
            phone_min_digits: DEFAULT_PHONE_MIN_DIGITS,
            phone_max_digits: DEFAULT_PHONE_MAX_DIGITS,
            city_enabled: true,
            gender_options: vec!["male".into(), "female".into(), "other".into()],
        }
    }
}

impl FormConfig {
    /// Parse a configuration from JSON and check it for consistency.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations no input could ever satisfy.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.min_password_score > MAX_SCORE {
            return Err(CoreError::Config(format!(
                "min_password_score must be at most {MAX_SCORE} (got {})",
                self.min_password_score
            )));
        }
        if self.phone_min_digits == 0 {
            return Err(CoreError::Config(
                "phone_min_digits must be at least 1".to_string(),
            ));
        }
        if self.phone_min_digits > self.phone_max_digits {
            return Err(CoreError::Config(format!(
                "phone_min_digits ({}) exceeds phone_max_digits ({})",
                self.phone_min_digits, self.phone_max_digits
            )));
        }
        if self.gender_options.iter().any(|g| g.trim().is_empty()) {
            return Err(CoreError::Config(
                "gender_options must not contain blank values".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the form has a gender radio group.
    pub fn has_gender(&self) -> bool {
        !self.gender_options.is_empty()
    }
}
