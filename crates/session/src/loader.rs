//! Reading reference data and form configuration from disk.
//!
//! The country dataset is optional: a missing, unreadable, malformed or
//! empty file degrades to the built-in two-country fallback with a warning.
//! A configuration file, when given, must be valid.

use std::path::Path;

use regform_core::{CountryStates, FormConfig, FormValidator, ReferenceData};

use crate::error::{SessionError, SessionResult};

fn read(path: &Path) -> SessionResult<String> {
    std::fs::read_to_string(path).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a country dataset, failing on any problem.
pub fn try_load_country_states(path: &Path) -> SessionResult<CountryStates> {
    let json = read(path)?;
    Ok(CountryStates::from_json_str(&json)?)
}

/// Load a country dataset, substituting the built-in fallback when the
/// dataset is absent or unusable.
pub fn load_country_states(path: Option<&Path>) -> CountryStates {
    let Some(path) = path else {
        tracing::debug!("No country dataset configured, using built-in fallback");
        return CountryStates::fallback();
    };

    match try_load_country_states(path) {
        Ok(data) if !data.is_empty() => {
            tracing::info!(
                path = %path.display(),
                countries = data.countries().len(),
                "Loaded country dataset",
            );
            data
        }
        Ok(_) => {
            tracing::warn!(
                path = %path.display(),
                "Country dataset is empty, using built-in fallback",
            );
            CountryStates::fallback()
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Country dataset unusable, using built-in fallback",
            );
            CountryStates::fallback()
        }
    }
}

/// Load a form configuration. `None` yields the defaults.
pub fn load_form_config(path: Option<&Path>) -> SessionResult<FormConfig> {
    match path {
        Some(path) => Ok(FormConfig::from_json_str(&read(path)?)?),
        None => Ok(FormConfig::default()),
    }
}

/// Build a validator from optional configuration and country files, with
/// the built-in disposable-domain and calling-code lists.
pub fn build_validator(
    config_path: Option<&Path>,
    countries_path: Option<&Path>,
) -> SessionResult<FormValidator> {
    let config = load_form_config(config_path)?;
    let reference = ReferenceData::with_countries(Some(load_country_states(countries_path)));
    Ok(FormValidator::new(config, reference)?)
}
