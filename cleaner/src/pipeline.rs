// Ordered cleaning steps over a table.
use shared::models::Table;
use std::path::Path;
use tracing::{debug, dispatcher, info};

use crate::config::CleanerSettings;
use crate::data::csv_table::{load_table_from_csv, save_table_to_csv};
use crate::error::CleanerError;
use crate::normalize::{ColumnNormalizer, NumericNormalizer};
use crate::text::{NullCoalescer, TextSanitizer};

// Common trait for every in-place table transform
pub trait TableStep: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, table: &mut Table) -> Result<(), CleanerError>;
}

impl TableStep for ColumnNormalizer {
    fn name(&self) -> &str {
        "normalize_numeric_columns"
    }

    fn apply(&self, table: &mut Table) -> Result<(), CleanerError> {
        ColumnNormalizer::apply(self, table)
    }
}

pub struct CleaningPipeline {
    steps: Vec<Box<dyn TableStep>>,
    normalizer: NumericNormalizer,
}

impl CleaningPipeline {
    /// An empty pipeline logging through `normalizer`'s dispatcher.
    pub fn new(normalizer: NumericNormalizer) -> Self {
        CleaningPipeline {
            steps: Vec::new(),
            normalizer,
        }
    }

    /// sanitize text -> coalesce placeholders -> normalize numeric columns,
    /// skipping whatever the settings turn off.
    pub fn from_settings(settings: &CleanerSettings, normalizer: NumericNormalizer) -> Self {
        let mut pipeline = Self::new(normalizer.clone());
        if settings.sanitize_text {
            pipeline = pipeline.with_step(TextSanitizer);
        }
        if settings.coalesce_nulls {
            pipeline = pipeline.with_step(NullCoalescer);
        }
        if !settings.numeric_columns.is_empty() {
            let columns = ColumnNormalizer::new(normalizer, settings.numeric_columns.clone())
                .with_allowed_chars(settings.allowed_chars.clone())
                .with_allow_negative(settings.allow_negative);
            pipeline = pipeline.with_step(columns);
        }
        pipeline
    }

    pub fn with_step(mut self, step: impl TableStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Runs every step in order and stops at the first failure.
    pub fn run(&self, table: &mut Table) -> Result<(), CleanerError> {
        dispatcher::with_default(self.normalizer.dispatch(), || -> Result<(), CleanerError> {
            for step in &self.steps {
                debug!(step = step.name(), "Running cleaning step");
                step.apply(table)?;
            }
            info!(
                steps = self.steps.len(),
                rows = table.row_count(),
                columns = table.columns().len(),
                "Table cleaned"
            );
            Ok(())
        })
    }
}

/// Loads `input`, cleans it with the pipeline described by `settings` and
/// writes the result to `output`. Returns the number of data rows.
pub fn clean_csv_file(
    settings: &CleanerSettings,
    normalizer: NumericNormalizer,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<usize, CleanerError> {
    let delimiter = settings.delimiter_byte()?;
    let mut table = load_table_from_csv(input, delimiter)?;

    let pipeline = CleaningPipeline::from_settings(settings, normalizer);
    pipeline.run(&mut table)?;

    save_table_to_csv(output, &table, delimiter)?;
    Ok(table.row_count())
}
