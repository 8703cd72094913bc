// Tabular data sources.
pub mod csv_table;
