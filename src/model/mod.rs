// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod codec;
pub mod grid;

// Re-export types so code using `crate::model::Grid` still works
pub use codec::{DateStringCodec, EditInput};
pub use grid::{CellValue, ColumnDef, ColumnType, DateFilter, Grid, Record};
