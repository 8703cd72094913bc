// Cleaner library root
// Text sanitation and numeric normalization for scraped tabular data.

pub mod config;
pub mod data;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod text;

#[cfg(test)]
mod test_support;

pub use config::CleanerSettings;
pub use error::CleanerError;
pub use normalize::{ColumnNormalizer, NumericNormalizer};
pub use pipeline::{clean_csv_file, CleaningPipeline, TableStep};
pub use text::{NullCoalescer, TextSanitizer};
