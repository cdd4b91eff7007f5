//! FILENAME: grid-model/src/value.rs
//! PURPOSE: Defines the data values a grid row can carry.
//! CONTEXT: This file contains the `CellValue` enum and the `RowData` record
//! that leaf rows hold. It is designed to be lightweight as large datasets
//! produce one `RowData` per data row.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Represents a single data value within a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    /// Renders the value as a grouping key string.
    /// Numbers drop unnecessary decimal places so `2000.0` and a source
    /// value of `2000` land in the same bucket.
    pub fn grouping_key(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

/// The field -> value record carried by a leaf data row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    fields: FxHashMap<String, CellValue>,
}

impl RowData {
    pub fn new() -> Self {
        RowData {
            fields: FxHashMap::default(),
        }
    }

    /// Sets a field value, replacing any previous value for that field.
    pub fn set(&mut self, field: &str, value: CellValue) {
        self.fields.insert(field.to_string(), value);
    }

    /// Gets a field value. Absent fields return None.
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
