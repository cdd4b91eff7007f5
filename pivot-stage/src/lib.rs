//! FILENAME: pivot-stage/src/lib.rs
//! Pivot stage for the grid row model.
//!
//! This crate provides the row-pivoting stage as a standalone module,
//! separate from the shared row/column model. It depends on `grid-model`
//! only for shared types (RowTree, Column, ColumnModel, ChangedPath).
//!
//! Layers:
//! - `unique_values`: The distinct pivot values seen per level (WHAT changed)
//! - `stage`: Bucketing engine and change detector (HOW we recompute)
//! - `col_defs`: Secondary column-definition generation (WHAT we install)

pub mod col_defs;
pub mod stage;
pub mod unique_values;

pub use col_defs::{create_pivot_column_defs, PivotColDefResult};
pub use stage::{PivotStage, StageExecuteParams};
pub use unique_values::UniqueValues;
