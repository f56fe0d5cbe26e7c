//! Password strength scoring.
//!
//! A password earns one point each for being at least
//! [`MIN_STRONG_LENGTH`] characters long, containing an ASCII uppercase
//! letter, containing an ASCII digit, and containing anything that is not
//! an ASCII letter or digit.

use serde::Serialize;

/// Highest score a password can reach.
pub const MAX_SCORE: u8 = 4;

/// Length that earns the length point, counted in Unicode scalar values.
/// A browser's `String.length` counts UTF-16 units instead, so a password
/// of four emoji reaches 8 there but only 4 here.
pub const MIN_STRONG_LENGTH: usize = 8;

/// Meter labels indexed by score.
pub const STRENGTH_LABELS: [&str; 5] = ["—", "Very weak", "Weak", "Good", "Strong"];

/// Score a password from 0 to [`MAX_SCORE`].
pub fn score(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    let mut score = 0;
    if password.chars().count() >= MIN_STRONG_LENGTH {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    score
}

/// Meter label for a score, clamped to the last label.
pub fn label(score: u8) -> &'static str {
    let idx = usize::from(score).min(STRENGTH_LABELS.len() - 1);
    STRENGTH_LABELS[idx]
}

/// Score plus label, as shown by the strength meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub label: &'static str,
}

impl PasswordStrength {
    /// Evaluate a password.
    pub fn of(password: &str) -> Self {
        let score = score(password);
        Self {
            score,
            label: label(score),
        }
    }

    /// Text for the meter caption, e.g. `Strength: Good`.
    pub fn meter_text(&self) -> String {
        format!("Strength: {}", self.label)
    }
}
