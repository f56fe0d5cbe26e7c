//! Reference data consulted by the validator.
//!
//! Three read-only tables: the country → state (→ city) cascade, email
//! domains known for throwaway inboxes, and the curated set of accepted
//! calling codes. They are built once and shared by every validation call.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::error::CoreError;
use crate::form::is_calling_code_shape;

// ---------------------------------------------------------------------------
// Built-in datasets
// ---------------------------------------------------------------------------

/// Country data used when no external dataset is supplied.
const FALLBACK_COUNTRIES: &[(&str, &[&str])] = &[
    ("India", &["Maharashtra", "Karnataka", "Delhi"]),
    ("United States", &["California", "New York", "Texas"]),
];

/// Known disposable email providers. Not exhaustive.
pub const DEFAULT_DISPOSABLE_DOMAINS: &[&str] = &[
    "mailinator.com",
    "10minutemail.com",
    "guerrillamail.com",
    "trashmail.com",
    "tempmail.com",
    "guerrillamail.net",
    "getnada.com",
    "dispostable.com",
    "yopmail.com",
    "spamgourmet.com",
    "maildrop.cc",
    "mintemail.com",
    "throwawaymail.com",
    "moakt.com",
    "tempr.email",
    "trashmail.net",
    "spam4.me",
    "mail-temp.net",
    "anonymbox.com",
    "fakeinbox.com",
];

/// Curated set of common E.164 calling codes.
pub const DEFAULT_CALLING_CODES: &[&str] = &[
    "+1", "+7", "+20", "+27", "+30", "+31", "+32", "+33", "+34", "+36", "+39", "+40", "+41",
    "+43", "+44", "+46", "+47", "+48", "+49", "+52", "+55", "+61", "+62", "+63", "+64", "+65",
    "+66", "+81", "+82", "+84", "+86", "+90", "+91", "+94", "+98", "+212", "+218", "+234",
    "+254", "+256", "+260", "+351", "+353", "+358", "+370", "+371", "+372", "+380", "+385",
    "+420", "+421", "+880", "+962", "+966", "+971",
];

// ---------------------------------------------------------------------------
// Country / state cascade
// ---------------------------------------------------------------------------

/// Mapping of country → state → cities.
///
/// Backed by ordered maps, so every listing comes out alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryStates {
    countries: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

/// One country in an external dataset. Both the nested
/// `{"states": {"<state>": [cities]}}` shape and a flat list of state names
/// are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum CountryEntry {
    Flat(Vec<String>),
    Nested {
        #[serde(default)]
        states: BTreeMap<String, Vec<String>>,
    },
}

impl CountryStates {
    /// The built-in two-country dataset.
    pub fn fallback() -> Self {
        FALLBACK_COUNTRIES
            .iter()
            .map(|(country, states)| (*country, states.iter().copied()))
            .collect()
    }

    /// Use `data` unless it is missing or empty, otherwise the fallback.
    pub fn or_fallback(data: Option<Self>) -> Self {
        match data {
            Some(data) if !data.is_empty() => data,
            _ => Self::fallback(),
        }
    }

    /// Parse an external dataset.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let raw: BTreeMap<String, CountryEntry> =
            serde_json::from_str(json).map_err(|e| CoreError::ReferenceData(e.to_string()))?;

        let mut data = Self::default();
        for (country, entry) in raw {
            let country = country.trim();
            if country.is_empty() {
                return Err(CoreError::ReferenceData(
                    "country names must not be blank".to_string(),
                ));
            }
            let states = data.countries.entry(country.to_string()).or_default();
            match entry {
                CountryEntry::Flat(names) => {
                    for state in names {
                        states.entry(state.trim().to_string()).or_default();
                    }
                }
                CountryEntry::Nested { states: nested } => {
                    for (state, cities) in nested {
                        states
                            .entry(state.trim().to_string())
                            .or_default()
                            .extend(cities.into_iter().map(|c| c.trim().to_string()));
                    }
                }
            }
            if states.keys().any(String::is_empty) {
                return Err(CoreError::ReferenceData(format!(
                    "state names of {country} must not be blank"
                )));
            }
        }
        Ok(data)
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Country names, alphabetical.
    pub fn countries(&self) -> Vec<&str> {
        self.countries.keys().map(String::as_str).collect()
    }

    /// States of `country`, alphabetical. Empty for an unknown or empty
    /// country.
    pub fn states_for(&self, country: &str) -> Vec<&str> {
        self.countries
            .get(country)
            .map(|states| states.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `state` is one of the states listed for `country`.
    pub fn has_state(&self, country: &str, state: &str) -> bool {
        self.countries
            .get(country)
            .is_some_and(|states| states.contains_key(state))
    }

    /// Cities listed for a state, alphabetical.
    pub fn cities_for(&self, country: &str, state: &str) -> Vec<&str> {
        self.countries
            .get(country)
            .and_then(|states| states.get(state))
            .map(|cities| cities.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl<C, S, I> FromIterator<(C, I)> for CountryStates
where
    C: Into<String>,
    S: Into<String>,
    I: IntoIterator<Item = S>,
{
    fn from_iter<T: IntoIterator<Item = (C, I)>>(iter: T) -> Self {
        let countries = iter
            .into_iter()
            .map(|(country, states)| {
                let states = states
                    .into_iter()
                    .map(|s| (s.into(), BTreeSet::new()))
                    .collect();
                (country.into(), states)
            })
            .collect();
        Self { countries }
    }
}

// ---------------------------------------------------------------------------
// Disposable domains
// ---------------------------------------------------------------------------

/// Email domains rejected outright. Stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisposableDomains(BTreeSet<String>);

impl DisposableDomains {
    pub fn new<I, S>(domains: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for domain in domains {
            let domain = domain.as_ref().trim().to_ascii_lowercase();
            if domain.is_empty() || domain.contains('@') {
                return Err(CoreError::ReferenceData(format!(
                    "'{domain}' is not a valid email domain"
                )));
            }
            set.insert(domain);
        }
        Ok(Self(set))
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, domain: &str) -> bool {
        self.0.contains(&domain.to_ascii_lowercase())
    }
}

impl Default for DisposableDomains {
    fn default() -> Self {
        Self(
            DEFAULT_DISPOSABLE_DOMAINS
                .iter()
                .map(|d| (*d).to_string())
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Calling codes
// ---------------------------------------------------------------------------

/// Accepted `+`-prefixed calling codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallingCodes(BTreeSet<String>);

impl CallingCodes {
    /// Build from a list of codes; each must look like `+` and 1-4 digits.
    pub fn new<I, S>(codes: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for code in codes {
            let code = code.as_ref().trim();
            if !is_calling_code_shape(code) {
                return Err(CoreError::ReferenceData(format!(
                    "'{code}' is not a calling code (expected + and 1-4 digits)"
                )));
            }
            set.insert(code.to_string());
        }
        Ok(Self(set))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }
}

impl Default for CallingCodes {
    fn default() -> Self {
        Self(DEFAULT_CALLING_CODES.iter().map(|c| (*c).to_string()).collect())
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// All reference tables, injected into the validator at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    pub countries: CountryStates,
    pub disposable_domains: DisposableDomains,
    pub calling_codes: CallingCodes,
}

impl ReferenceData {
    /// Built-in tables with the given country data, falling back to the
    /// built-in countries when `countries` is missing or empty.
    pub fn with_countries(countries: Option<CountryStates>) -> Self {
        Self {
            countries: CountryStates::or_fallback(countries),
            ..Self::default()
        }
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            countries: CountryStates::fallback(),
            disposable_domains: DisposableDomains::default(),
            calling_codes: CallingCodes::default(),
        }
    }
}
