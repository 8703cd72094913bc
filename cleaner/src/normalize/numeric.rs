// Numeric-string normalization: turns human-written numbers with mixed
// thousands/decimal separators into f64 values.
use std::sync::LazyLock;

use regex::Regex;
use tracing::{dispatcher, error, Dispatch};

use super::digits::to_ascii_digits;
use crate::error::CleanerError;

// A separator followed by two or more digits at the very end marks the decimal part.
// A single trailing digit ("12.3") does not qualify and is read as grouping.
static DOT_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d{2,}$").expect("DOT_DECIMAL regex should compile"));
static COMMA_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\d{2,}$").expect("COMMA_DECIMAL regex should compile"));

/// Normalizes numeric text into `Option<f64>`.
///
/// `Ok(None)` means the value is absent or is not a number under the
/// separator rules. `Err(CleanerError::InvalidNumber)` means the text passed
/// validation but could not be built into a finite float; that case is
/// logged at error level through the normalizer's dispatcher first.
#[derive(Debug, Clone)]
pub struct NumericNormalizer {
    dispatch: Dispatch,
}

impl NumericNormalizer {
    /// Uses the dispatcher that is the default at construction time.
    pub fn new() -> Self {
        Self::with_dispatch(dispatcher::get_default(|d| d.clone()))
    }

    pub fn with_dispatch(dispatch: Dispatch) -> Self {
        NumericNormalizer { dispatch }
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn normalize(&self, value: Option<&str>, allow_negative: bool) -> Result<Option<f64>, CleanerError> {
        // Absent input is absent output, never an error
        let Some(raw) = value else {
            return Ok(None);
        };

        let trimmed = raw.trim();

        // Digit and sign checks run on a copy without separators; failing them
        // means "not a number", which is reported as None rather than an error.
        if !passes_validation(trimmed, allow_negative) {
            return Ok(None);
        }

        // Decide which separator (if any) is the decimal point by looking at the
        // trimmed text, not at the stripped validation copy.
        let candidate = if DOT_DECIMAL.is_match(trimmed) {
            // "1,234.56" -> "1234.56"
            trimmed.replace([',', ' '], "")
        } else if COMMA_DECIMAL.is_match(trimmed) {
            // "1.234,56" -> "1234.56"
            trimmed.replace(['.', ' '], "").replace(',', ".")
        } else {
            // No decimal group: every separator is grouping ("12.3" -> "123").
            trimmed.replace([' ', '.', ','], "")
        };

        // Digits from other scripts ("١٢٣", "１２３") are read as their ASCII values.
        // Numeric characters that are not decimal digits ("1²") survive this
        // and make the parse below fail.
        let candidate = to_ascii_digits(&candidate);

        match candidate.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
            // Too many digits parse to infinity instead of failing
            Ok(_) => Err(self.invalid(trimmed, "value is out of range for f64")),
            Err(e) => Err(self.invalid(trimmed, &e.to_string())),
        }
    }

    fn invalid(&self, value: &str, reason: &str) -> CleanerError {
        dispatcher::with_default(&self.dispatch, || {
            error!(value = %value, reason = %reason, "'{}' is not a valid number.", value);
        });
        CleanerError::InvalidNumber {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Default for NumericNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

// Checks the validation copy: the trimmed text with spaces, commas and
// periods removed must be all numeric, with at most a leading '-' when
// negatives are allowed.
fn passes_validation(trimmed: &str, allow_negative: bool) -> bool {
    let cleaned: String = trimmed.chars().filter(|c| !matches!(c, ' ' | ',' | '.')).collect();

    // Only a leading '-' is tolerated, and only when negatives are allowed
    let digits = if allow_negative {
        cleaned.strip_prefix('-').unwrap_or(&cleaned)
    } else if cleaned.contains('-') {
        return false;
    } else {
        cleaned.as_str()
    };

    // Unicode numeric, so superscripts and fractions pass here and are
    // rejected later by the float parse.
    !digits.is_empty() && digits.chars().all(char::is_numeric)
}

/// Convenience wrapper using a normalizer bound to the current default dispatcher.
pub fn normalize(value: Option<&str>, allow_negative: bool) -> Result<Option<f64>, CleanerError> {
    NumericNormalizer::new().normalize(value, allow_negative)
}
