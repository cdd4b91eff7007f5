//! FILENAME: grid-model/src/column.rs
//! PURPOSE: Column descriptors and column-definition types.
//! CONTEXT: `Column` is the runtime descriptor the row-model stages consult
//! (pivot columns, aggregation/value columns). `ColDef`/`ColGroupDef` are the
//! serializable definitions produced for secondary (pivot-derived) columns
//! and consumed by downstream column assembly.

use serde::{Deserialize, Serialize};

/// Supported aggregation functions for value columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggFunc {
    Sum,
    Min,
    Max,
    Count,
    Avg,
    First,
    Last,
}

impl AggFunc {
    /// Stable identifier used in configuration hashes and generated headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggFunc::Sum => "sum",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::Count => "count",
            AggFunc::Avg => "avg",
            AggFunc::First => "first",
            AggFunc::Last => "last",
        }
    }
}

impl Default for AggFunc {
    fn default() -> Self {
        AggFunc::Sum
    }
}

/// A runtime column descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique column identifier.
    pub col_id: String,

    /// The row-data field this column reads from, if any.
    pub field: Option<String>,

    /// The aggregation function configured for this column (value columns).
    pub agg_func: Option<AggFunc>,
}

impl Column {
    /// Creates a plain column whose field matches its id.
    pub fn new(col_id: &str) -> Self {
        Column {
            col_id: col_id.to_string(),
            field: Some(col_id.to_string()),
            agg_func: None,
        }
    }

    /// Creates a value column with an aggregation function.
    pub fn new_value(col_id: &str, agg_func: AggFunc) -> Self {
        Column {
            col_id: col_id.to_string(),
            field: Some(col_id.to_string()),
            agg_func: Some(agg_func),
        }
    }
}

/// Why a secondary-column installation happened. Recorded by the column
/// model so listeners can distinguish row-model driven updates from direct
/// API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnEventReason {
    RowModelUpdated,
    Api,
}

/// A leaf column definition generated from pivot bucketing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColDef {
    /// Unique id, derived from the pivot key path and the value column.
    pub col_id: String,

    /// Display header (e.g. "sum(gold)").
    pub header_name: String,

    /// The pivot key path that produced this column, outermost first.
    pub pivot_keys: Vec<String>,

    /// The source value column this definition aggregates.
    pub pivot_value_column: Option<String>,

    /// The aggregation function carried over from the value column.
    pub agg_func: Option<AggFunc>,
}

/// A group of secondary columns, one per pivot key at a nesting level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColGroupDef {
    /// Unique group id, derived from the pivot key path.
    pub group_id: String,

    /// Display header (the pivot key).
    pub header_name: String,

    /// Nested groups or leaf definitions.
    pub children: Vec<ColGroupChild>,
}

/// A child within a secondary column group tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColGroupChild {
    Group(ColGroupDef),
    Col(ColDef),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agg_func_identifiers() {
        assert_eq!(AggFunc::Sum.as_str(), "sum");
        assert_eq!(AggFunc::Min.as_str(), "min");
        assert_eq!(AggFunc::Max.as_str(), "max");
        assert_eq!(AggFunc::Count.as_str(), "count");
        assert_eq!(AggFunc::Avg.as_str(), "avg");
        assert_eq!(AggFunc::First.as_str(), "first");
        assert_eq!(AggFunc::Last.as_str(), "last");
    }

    #[test]
    fn test_new_column_field_defaults_to_id() {
        let col = Column::new("country");
        assert_eq!(col.col_id, "country");
        assert_eq!(col.field.as_deref(), Some("country"));
        assert_eq!(col.agg_func, None);
    }

    #[test]
    fn test_new_value_column() {
        let col = Column::new_value("gold", AggFunc::Sum);
        assert_eq!(col.col_id, "gold");
        assert_eq!(col.agg_func, Some(AggFunc::Sum));
    }

    #[test]
    fn test_col_def_serialization_roundtrip() {
        let def = ColDef {
            col_id: "pivot_US_gold".to_string(),
            header_name: "sum(gold)".to_string(),
            pivot_keys: vec!["US".to_string()],
            pivot_value_column: Some("gold".to_string()),
            agg_func: Some(AggFunc::Sum),
        };

        let json = serde_json::to_string(&def).unwrap();
        let back: ColDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
