// Table model and small helpers shared across the workspace.
pub mod models;
pub mod utils;

pub use models::{Cell, Column, Table};
