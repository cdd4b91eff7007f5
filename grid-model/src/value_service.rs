//! FILENAME: grid-model/src/value_service.rs
//! PURPOSE: Resolves a row node's value for a column.
//! CONTEXT: Stages never reach into row data directly; they ask the value
//! service for a grouping key. A missing value (no field on the column, no
//! data on the node, or the field absent from the record) is a valid result,
//! reported as None.

use crate::column::Column;
use crate::row_node::RowNode;
use crate::value::CellValue;

/// Value lookup for row-model stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueService;

impl ValueService {
    pub fn new() -> Self {
        ValueService
    }

    /// Returns the grouping key of `node` for `column`, or None when the
    /// value is missing. Empty cells count as missing.
    pub fn get_key_for_node(&self, column: &Column, node: &RowNode) -> Option<String> {
        let field = column.field.as_deref()?;
        let data = node.data.as_ref()?;
        match data.get(field) {
            None | Some(CellValue::Empty) => None,
            Some(value) => Some(value.grouping_key()),
        }
    }
}
