// Numeric normalization: single values and table columns.
pub mod column;
pub mod digits;
pub mod numeric;

pub use column::{keep_numeric_and_allowed_chars, ColumnNormalizer, DEFAULT_ALLOWED_CHARS};
pub use numeric::{normalize, NumericNormalizer};
