//! End-to-end tests: fill the form, validate, submit, export, re-import.

use assert_matches::assert_matches;
use chrono::{NaiveDate, TimeZone, Utc};
use regform_core::{
    CoreError, CountryStates, FieldId, FormConfig, FormInput, FormValidator, ReferenceData,
    RegistrationRecord, ViolationKind,
};

fn filled_form() -> FormInput {
    FormInput {
        first_name: "Maya".into(),
        last_name: "Okafor".into(),
        email: "maya.okafor@example.com".into(),
        country_code: "+1".into(),
        phone: "(415) 555-0134".into(),
        dob: NaiveDate::from_ymd_opt(1990, 7, 21),
        gender: Some("female".into()),
        country: "United States".into(),
        state: "California".into(),
        city: "Oakland".into(),
        password: "Sunset#2024".into(),
        confirm_password: "Sunset#2024".into(),
        terms: true,
    }
}

// ---------------------------------------------------------------------------
// Test: accepted submission produces an exportable record
// ---------------------------------------------------------------------------

/// A fully valid form yields a record whose export file name and JSON
/// content match the download format, and the content parses back into the
/// same record.
#[test]
fn accepted_submission_exports_and_reimports() {
    let validator = FormValidator::default();
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

    let record = validator
        .submit(&filled_form(), at)
        .expect("filled form should be accepted");
    let artifact = record.export().expect("export should succeed");

    assert_eq!(
        artifact.file_name,
        "registration_Maya_2025-01-02-03-04-05.json"
    );
    let json: serde_json::Value =
        serde_json::from_str(&artifact.content).expect("content is JSON");
    assert_eq!(json["firstName"], "Maya");
    assert_eq!(json["phone"], "(415) 555-0134");
    assert_eq!(json["dob"], "1990-07-21");
    assert_eq!(json["city"], "Oakland");
    assert_eq!(json["createdAt"], "2025-01-02T03:04:05Z");

    let back = RegistrationRecord::from_json(&artifact.content).expect("re-import");
    assert_eq!(back, record);
}

// ---------------------------------------------------------------------------
// Test: unusual but well-shaped emails survive export
// ---------------------------------------------------------------------------

/// Addresses the form's email rule accepts, including ones with characters
/// a stricter RFC check would refuse, come back from their own export.
#[test]
fn accepted_emails_survive_reimport() {
    let validator = FormValidator::default();
    let long_local = format!("{}@example.com", "m".repeat(70));
    for email in [
        "maya@my_company.com",
        "a<b@example.com",
        "maya@example.co_uk",
        long_local.as_str(),
    ] {
        let form = FormInput {
            email: email.into(),
            ..filled_form()
        };
        let record = validator
            .submit(&form, Utc::now())
            .unwrap_or_else(|report| panic!("{email} rejected: {:?}", report.errors()));
        let artifact = record.export().unwrap();
        let back = RegistrationRecord::from_json(&artifact.content)
            .unwrap_or_else(|e| panic!("{email} did not re-import: {e}"));
        assert_eq!(back, record);
    }
}

// ---------------------------------------------------------------------------
// Test: rejected submission surfaces every error at once
// ---------------------------------------------------------------------------

/// Several broken fields are all reported in a single pass, each with the
/// message the form shows beside it.
#[test]
fn rejected_submission_reports_all_errors() {
    let validator = FormValidator::default();
    let form = FormInput {
        email: "maya@yopmail.com".into(),
        country_code: "1".into(),
        phone: "555".into(),
        confirm_password: "sunset#2024".into(),
        ..filled_form()
    };

    let report = validator.submit(&form, Utc::now()).unwrap_err();
    let errors = report.errors();
    assert_eq!(errors.len(), 4);
    assert_eq!(
        errors[&FieldId::Email],
        "Disposable email addresses are not allowed"
    );
    assert_eq!(
        errors[&FieldId::CountryCode],
        "Use format +<country code>, e.g. +1, +91"
    );
    assert_eq!(
        errors[&FieldId::Phone],
        "Enter a valid phone number (6-12 digits) without country code"
    );
    assert_eq!(errors[&FieldId::ConfirmPassword], "Passwords do not match");
    assert_eq!(
        report.status(),
        "Please fix the errors above before submitting."
    );
}

// ---------------------------------------------------------------------------
// Test: injected reference data and layout
// ---------------------------------------------------------------------------

/// An external country dataset in the nested shape drives the cascade, and a
/// form without city or gender controls leaves those out of the record.
#[test]
fn injected_dataset_and_layout() {
    let countries = CountryStates::from_json_str(
        r#"{ "Kenya": { "states": { "Nairobi": ["Westlands"], "Mombasa": [] } } }"#,
    )
    .expect("dataset parses");
    let config = FormConfig::from_json_str(r#"{"city_enabled": false, "gender_options": []}"#)
        .expect("config parses");
    let validator =
        FormValidator::new(config, ReferenceData::with_countries(Some(countries))).unwrap();

    assert_eq!(validator.countries(), vec!["Kenya"]);
    assert_eq!(validator.states_for("Kenya"), vec!["Mombasa", "Nairobi"]);

    let form = FormInput {
        country_code: "+254".into(),
        phone: "712 345678".into(),
        country: "Kenya".into(),
        state: "Nairobi".into(),
        city: String::new(),
        gender: None,
        ..filled_form()
    };
    assert!(validator.check_form_state(&form));
    let record = validator.submit(&form, Utc::now()).expect("accepted");
    assert_eq!(record.city, None);
    assert_eq!(record.gender, None);

    // The built-in states no longer apply.
    let stale = FormInput {
        country: "United States".into(),
        state: "California".into(),
        ..form
    };
    let report = validator.validate_all(&stale);
    assert_eq!(
        report.result(FieldId::State).and_then(|r| r.kind),
        Some(ViolationKind::Disallowed)
    );
}

// ---------------------------------------------------------------------------
// Test: tampered exports are refused
// ---------------------------------------------------------------------------

/// Editing an exported file to blank a required value makes it unreadable as
/// a record.
#[test]
fn tampered_export_is_refused() {
    let record = FormValidator::default()
        .submit(&filled_form(), Utc::now())
        .unwrap();
    let mut json: serde_json::Value = serde_json::to_value(&record).unwrap();
    json["state"] = serde_json::json!("");

    assert_matches!(
        RegistrationRecord::from_json(&json.to_string()),
        Err(CoreError::Validation(_))
    );
}
