// Column-level numeric normalization over a `Table`.
use shared::models::{Cell, Table};
use tracing::{debug, dispatcher, error};

use super::digits::is_decimal_digit;
use super::numeric::NumericNormalizer;
use crate::error::CleanerError;

pub const DEFAULT_ALLOWED_CHARS: [char; 2] = [',', '.'];

/// Keeps decimal digits (any script) and the characters in `allowed`; drops
/// everything else (currency symbols, units, stray spaces, fractions).
pub fn keep_numeric_and_allowed_chars(text: &str, allowed: &[char]) -> String {
    text.chars().filter(|&c| is_decimal_digit(c) || allowed.contains(&c)).collect()
}

// The minus sign always survives filtering so the sign policy can reject it.
fn kept_chars(allowed_chars: &[char]) -> Vec<char> {
    let mut kept = allowed_chars.to_vec();
    if !kept.contains(&'-') {
        kept.push('-');
    }
    kept
}

/// Filters and normalizes the cells of named columns in place. `Text`
/// cells become `Number` or `Null`; `Null` and `Number` cells are left as
/// they are.
#[derive(Debug, Clone)]
pub struct ColumnNormalizer {
    normalizer: NumericNormalizer,
    columns: Vec<String>,
    kept_chars: Vec<char>,
    allow_negative: bool,
}

impl ColumnNormalizer {
    pub fn new(normalizer: NumericNormalizer, columns: Vec<String>) -> Self {
        ColumnNormalizer {
            normalizer,
            columns,
            kept_chars: kept_chars(&DEFAULT_ALLOWED_CHARS),
            allow_negative: false,
        }
    }

    pub fn with_allowed_chars(mut self, allowed_chars: Vec<char>) -> Self {
        self.kept_chars = kept_chars(&allowed_chars);
        self
    }

    pub fn with_allow_negative(mut self, allow_negative: bool) -> Self {
        self.allow_negative = allow_negative;
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn normalize_cell(&self, cell: &Cell) -> Result<Cell, CleanerError> {
        match cell {
            Cell::Text(text) => {
                let filtered = keep_numeric_and_allowed_chars(text, &self.kept_chars);
                let value = self.normalizer.normalize(Some(&filtered), self.allow_negative)?;
                Ok(Cell::from(value))
            }
            Cell::Null | Cell::Number(_) => Ok(cell.clone()),
        }
    }

    /// Normalizes the configured columns.
    pub fn apply(&self, table: &mut Table) -> Result<(), CleanerError> {
        self.normalize_columns(table, &self.columns)
    }

    /// Normalizes `columns` of `table`. Nothing is written unless every
    /// cell of every listed column normalizes without error.
    pub fn normalize_columns<S: AsRef<str>>(&self, table: &mut Table, columns: &[S]) -> Result<(), CleanerError> {
        dispatcher::with_default(self.normalizer.dispatch(), || -> Result<(), CleanerError> {
            let mut normalized: Vec<(&str, Vec<Cell>)> = Vec::with_capacity(columns.len());

            for name in columns {
                let name: &str = name.as_ref();
                let column = table
                    .column(name)
                    .ok_or_else(|| CleanerError::UnknownColumn(name.to_string()))?;

                let mut cells = Vec::with_capacity(column.cells.len());
                for (row, cell) in column.cells.iter().enumerate() {
                    match self.normalize_cell(cell) {
                        Ok(c) => cells.push(c),
                        Err(e) => {
                            error!(column = %name, row, "Failed to normalize numeric column: {}", e);
                            return Err(e);
                        }
                    }
                }
                normalized.push((name, cells));
            }

            for (name, cells) in normalized {
                let nulls = cells.iter().filter(|c| c.is_null()).count();
                debug!(column = %name, rows = cells.len(), nulls, "Normalized numeric column");
                if let Some(column) = table.column_mut(name) {
                    column.cells = cells;
                }
            }
            Ok(())
        })
    }
}
