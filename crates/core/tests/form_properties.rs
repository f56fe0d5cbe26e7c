//! Property tests for the registration validator.
//!
//! Inputs are assembled from small pools of good and bad values per field so
//! that every combination of passing and failing rules gets exercised.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use proptest::sample::select;
use regform_core::{FieldId, FormInput, FormValidator, RegistrationRecord};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[A-Za-z]{1,12}",
    ]
}

/// Addresses of the `local@domain.tld` shape built from characters outside
/// the usual RFC subset, with local parts well past 64 characters.
fn shaped_email_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9._<>+!#%&'*/=?^`{|}~-]{1,80}@[a-z0-9_-]{1,16}\\.[a-z0-9_]{2,6}"
}

fn email_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        select(vec![
            "",
            "plainaddress",
            "a@b",
            "a@b.co",
            "user@mailinator.com",
            "someone@example.org",
        ])
        .prop_map(str::to_string),
        shaped_email_strategy(),
    ]
}

fn calling_code_strategy() -> impl Strategy<Value = String> {
    select(vec!["", "91", "+91", "+1", "+9999", "+12345"]).prop_map(str::to_string)
}

fn phone_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[0-9]{1,5}",
        "[0-9]{3}-[0-9]{3}-[0-9]{4}",
        "\\([0-9]{3}\\) [0-9]{6}",
        "[0-9]{13,15}",
    ]
}

fn location_strategy() -> impl Strategy<Value = (String, String)> {
    select(vec![
        ("", ""),
        ("India", ""),
        ("India", "Delhi"),
        ("India", "Texas"),
        ("United States", "Texas"),
        ("Atlantis", "Delhi"),
    ])
    .prop_map(|(c, s)| (c.to_string(), s.to_string()))
}

fn password_strategy() -> impl Strategy<Value = (String, String)> {
    (
        select(vec!["", "abcdefgh", "Abcdefgh", "Abcdefg1", "Abcdefg1!"]),
        any::<bool>(),
    )
        .prop_map(|(pw, confirm_matches)| {
            let confirm = if confirm_matches {
                pw.to_string()
            } else {
                format!("{pw}x")
            };
            (pw.to_string(), confirm)
        })
}

fn input_strategy() -> impl Strategy<Value = FormInput> {
    (
        (name_strategy(), name_strategy(), email_strategy()),
        (calling_code_strategy(), phone_strategy(), location_strategy()),
        (
            name_strategy(),
            proptest::option::of(select(vec!["male", "female", "robot"])),
            password_strategy(),
            any::<bool>(),
        ),
    )
        .prop_map(
            |(
                (first_name, last_name, email),
                (country_code, phone, (country, state)),
                (city, gender, (password, confirm_password), terms),
            )| FormInput {
                first_name,
                last_name,
                email,
                country_code,
                phone,
                dob: None,
                gender: gender.map(str::to_string),
                country,
                state,
                city,
                password,
                confirm_password,
                terms,
            },
        )
}

/// A form that passes every rule with the default reference data.
fn valid_input() -> FormInput {
    FormInput {
        first_name: "Ines".into(),
        last_name: "Duarte".into(),
        email: "ines@example.org".into(),
        country_code: "+91".into(),
        phone: "98765 43210".into(),
        dob: None,
        gender: Some("female".into()),
        country: "India".into(),
        state: "Delhi".into(),
        city: "New Delhi".into(),
        password: "Abcdefg1!".into(),
        confirm_password: "Abcdefg1!".into(),
        terms: true,
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// The aggregate verdict is exactly the conjunction of every field rule,
    /// and the report always carries one result per validated field.
    #[test]
    fn form_valid_iff_every_field_valid(input in input_strategy()) {
        let v = FormValidator::default();
        let report = v.validate_all(&input);

        prop_assert_eq!(report.results.len(), FieldId::VALIDATED.len());
        let every_field = FieldId::VALIDATED
            .iter()
            .all(|f| v.validate_field(*f, &input).valid);
        prop_assert_eq!(report.is_valid, every_field);
        prop_assert_eq!(v.is_form_valid(&input), every_field);
    }

    /// Whenever full validation passes, the quick gate has already opened.
    #[test]
    fn full_validity_implies_quick_gate(input in input_strategy()) {
        let v = FormValidator::default();
        if v.is_form_valid(&input) {
            prop_assert!(v.check_form_state(&input));
        }
    }

    /// The quick gate never opens while a required control is blank.
    #[test]
    fn quick_gate_closed_when_a_required_field_is_blank(input in input_strategy()) {
        let v = FormValidator::default();
        let any_blank = input.first_name.trim().is_empty()
            || input.last_name.trim().is_empty()
            || input.email.trim().is_empty()
            || input.country_code.trim().is_empty()
            || input.phone.trim().is_empty()
            || input.country.is_empty()
            || input.state.is_empty()
            || input.city.trim().is_empty()
            || input.password.is_empty()
            || input.confirm_password.is_empty()
            || !input.terms
            || input.gender.is_none();
        if any_blank {
            prop_assert!(!v.check_form_state(&input));
        }
    }

    /// A record exists only for fully valid input, and survives a JSON
    /// round trip unchanged.
    #[test]
    fn submitted_records_round_trip(input in input_strategy(), secs in 0i64..4_000_000_000) {
        let v = FormValidator::default();
        let created_at = Utc.timestamp_opt(secs, 0).unwrap();
        match v.submit(&input, created_at) {
            Ok(record) => {
                prop_assert!(v.is_form_valid(&input));
                let json = record.to_json_pretty().unwrap();
                let back = RegistrationRecord::from_json(&json).unwrap();
                prop_assert_eq!(back, record);
            }
            Err(report) => {
                prop_assert!(!report.is_valid);
                prop_assert!(!report.errors().is_empty());
            }
        }
    }

    /// Every email the form rule accepts is also accepted when the exported
    /// record is read back.
    #[test]
    fn accepted_emails_round_trip(email in shaped_email_strategy()) {
        let v = FormValidator::default();
        let input = FormInput { email, ..valid_input() };
        prop_assume!(v.validate_field(FieldId::Email, &input).valid);

        let created_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let record = v.submit(&input, created_at);
        prop_assert!(record.is_ok(), "rejected: {:?}", record.as_ref().err().map(|r| r.errors()));
        let record = record.unwrap();
        let back = RegistrationRecord::from_json(&record.export().unwrap().content);
        prop_assert!(back.is_ok(), "re-import failed: {:?}", back.as_ref().err());
        prop_assert_eq!(back.unwrap(), record);
    }
}
