// Plain text transforms applied before numeric normalization.
pub mod nulls;
pub mod sanitize;

pub use nulls::{is_null_placeholder, NullCoalescer, NULL_PLACEHOLDERS};
pub use sanitize::{decode_entities, TextSanitizer};
