/// Faults that are not validation outcomes.
///
/// A field that fails its rule is reported as data (see
/// [`crate::rules::FieldViolation`]); these variants cover everything that
/// stops the validator from doing its job at all.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid reference data: {0}")]
    ReferenceData(String),

    #[error("Invalid form configuration: {0}")]
    Config(String),

    #[error("Field {field} does not accept a {got} value")]
    FieldType {
        field: &'static str,
        got: &'static str,
    },

    #[error("Unknown form field '{0}'")]
    UnknownField(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
