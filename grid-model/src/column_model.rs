//! FILENAME: grid-model/src/column_model.rs
//! PURPOSE: Column configuration state consulted by the row-model stages.
//! CONTEXT: Holds the pivot mode flag, the ordered pivot and value column
//! descriptors, and the currently installed secondary (pivot-derived) column
//! definitions. One instance exists per grid session, owned by the
//! orchestrator and passed to stages by reference.

use serde::{Deserialize, Serialize};

use crate::column::{ColGroupChild, Column, ColumnEventReason};

/// Column model state for one grid session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnModel {
    pivot_mode: bool,
    pivot_columns: Vec<Column>,
    value_columns: Vec<Column>,
    secondary_columns: Option<Vec<ColGroupChild>>,
    last_secondary_reason: Option<ColumnEventReason>,
}

impl ColumnModel {
    pub fn new() -> Self {
        ColumnModel::default()
    }

    pub fn set_pivot_mode(&mut self, pivot_mode: bool) {
        self.pivot_mode = pivot_mode;
    }

    /// Whether the pivot stage should bucket rows. Pivot mode can be active
    /// with zero pivot columns configured (the degenerate case where buckets
    /// are cleared rather than computed).
    pub fn is_pivot_active(&self) -> bool {
        self.pivot_mode
    }

    pub fn set_pivot_columns(&mut self, columns: Vec<Column>) {
        self.pivot_columns = columns;
    }

    /// Ordered pivot columns; order determines bucketing nesting depth.
    pub fn pivot_columns(&self) -> &[Column] {
        &self.pivot_columns
    }

    pub fn set_value_columns(&mut self, columns: Vec<Column>) {
        self.value_columns = columns;
    }

    /// Ordered aggregation (value) columns.
    pub fn value_columns(&self) -> &[Column] {
        &self.value_columns
    }

    pub fn is_secondary_columns_present(&self) -> bool {
        self.secondary_columns.is_some()
    }

    /// Installs (or removes, with None) the secondary column definitions.
    pub fn set_secondary_columns(
        &mut self,
        definitions: Option<Vec<ColGroupChild>>,
        reason: ColumnEventReason,
    ) {
        self.secondary_columns = definitions;
        self.last_secondary_reason = Some(reason);
    }

    pub fn secondary_columns(&self) -> Option<&[ColGroupChild]> {
        self.secondary_columns.as_deref()
    }

    /// The reason recorded with the most recent secondary-column change.
    pub fn last_secondary_reason(&self) -> Option<ColumnEventReason> {
        self.last_secondary_reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::AggFunc;

    #[test]
    fn test_pivot_mode_flag() {
        let mut model = ColumnModel::new();
        assert!(!model.is_pivot_active());
        model.set_pivot_mode(true);
        assert!(model.is_pivot_active());
    }

    #[test]
    fn test_columns_keep_order() {
        let mut model = ColumnModel::new();
        model.set_pivot_columns(vec![Column::new("country"), Column::new("year")]);
        model.set_value_columns(vec![
            Column::new_value("gold", AggFunc::Sum),
            Column::new_value("silver", AggFunc::Max),
        ]);

        let pivot_ids: Vec<&str> = model.pivot_columns().iter().map(|c| c.col_id.as_str()).collect();
        assert_eq!(pivot_ids, vec!["country", "year"]);

        let value_ids: Vec<&str> = model.value_columns().iter().map(|c| c.col_id.as_str()).collect();
        assert_eq!(value_ids, vec!["gold", "silver"]);
    }

    #[test]
    fn test_secondary_columns_install_and_remove() {
        let mut model = ColumnModel::new();
        assert!(!model.is_secondary_columns_present());

        model.set_secondary_columns(Some(Vec::new()), ColumnEventReason::RowModelUpdated);
        assert!(model.is_secondary_columns_present());
        assert_eq!(
            model.last_secondary_reason(),
            Some(ColumnEventReason::RowModelUpdated)
        );

        model.set_secondary_columns(None, ColumnEventReason::Api);
        assert!(!model.is_secondary_columns_present());
        assert_eq!(model.last_secondary_reason(), Some(ColumnEventReason::Api));
    }
}
