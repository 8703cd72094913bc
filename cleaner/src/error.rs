use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    // Text passed digit/sign validation but could not be built into a finite f64.
    // Plain "not a number" input is not an error: it normalizes to None.
    #[error("'{value}' is not a valid number: {reason}")]
    InvalidNumber { value: String, reason: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // Wraps errors from the anyhow-based CSV and timestamp helpers.
    #[error(transparent)]
    Processing(#[from] anyhow::Error),
}

impl CleanerError {
    pub fn is_invalid_number(&self) -> bool {
        matches!(self, CleanerError::InvalidNumber { .. })
    }
}
