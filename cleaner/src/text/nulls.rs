// Placeholder-to-null substitution for table cells.
use shared::models::{Cell, Table};

use crate::error::CleanerError;
use crate::pipeline::TableStep;

/// Trimmed, lower-cased text values that mean "no value".
pub const NULL_PLACEHOLDERS: [&str; 3] = ["", "-", "n/a"];

pub fn is_null_placeholder(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    NULL_PLACEHOLDERS.contains(&normalized.as_str())
}

/// Replaces placeholder text with `Cell::Null` and trims all other text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCoalescer;

impl NullCoalescer {
    pub fn coalesce(cell: Cell) -> Cell {
        match cell {
            Cell::Text(text) if is_null_placeholder(&text) => Cell::Null,
            Cell::Text(text) => Cell::Text(text.trim().to_string()),
            other => other,
        }
    }
}

impl TableStep for NullCoalescer {
    fn name(&self) -> &str {
        "coalesce_nulls"
    }

    fn apply(&self, table: &mut Table) -> Result<(), CleanerError> {
        for cell in table.cells_mut() {
            *cell = Self::coalesce(std::mem::replace(cell, Cell::Null));
        }
        Ok(())
    }
}
