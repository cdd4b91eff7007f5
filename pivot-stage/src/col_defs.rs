//! FILENAME: pivot-stage/src/col_defs.rs
//! PURPOSE: Builds secondary column definitions from pivot unique values.
//! CONTEXT: Each distinct key at a pivot level becomes a column group; the
//! terminal level carries one leaf definition per value column. Keys are
//! walked in sorted order so the generated definitions depend only on the
//! unique-values content, never on discovery order.

use grid_model::{ColDef, ColGroupChild, ColGroupDef, Column};
use smallvec::SmallVec;

use crate::unique_values::UniqueValues;

/// Key path accumulated while walking the unique-values structure.
type KeyPath = SmallVec<[String; 4]>;

/// The generated secondary column definitions.
///
/// `group_defs` is the nested tree installed on the column model;
/// `flat_defs` is the flat list of leaf definitions in generation order,
/// kept for downstream column-model assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotColDefResult {
    pub group_defs: Vec<ColGroupChild>,
    pub flat_defs: Vec<ColDef>,
}

/// Generates secondary column definitions for the given unique values and
/// value columns. An empty structure yields empty lists.
pub fn create_pivot_column_defs(
    unique_values: &UniqueValues,
    value_columns: &[Column],
) -> PivotColDefResult {
    let mut flat_defs = Vec::new();
    let mut path = KeyPath::new();
    let group_defs = build_level(unique_values, value_columns, &mut path, &mut flat_defs);
    PivotColDefResult {
        group_defs,
        flat_defs,
    }
}

/// Builds the definitions for one pivot level, recursing into non-terminal
/// keys. `path` holds the keys above this level, outermost first.
fn build_level(
    level: &UniqueValues,
    value_columns: &[Column],
    path: &mut KeyPath,
    flat_defs: &mut Vec<ColDef>,
) -> Vec<ColGroupChild> {
    let mut children = Vec::new();

    for key in level.sorted_keys() {
        let nested = match level.child(key) {
            Some(nested) => nested,
            None => continue,
        };

        path.push(key.clone());

        let group_children = if nested.is_empty() {
            // terminal level: one leaf definition per value column
            value_columns
                .iter()
                .map(|value_column| {
                    let def = leaf_col_def(path, value_column);
                    flat_defs.push(def.clone());
                    ColGroupChild::Col(def)
                })
                .collect()
        } else {
            build_level(nested, value_columns, path, flat_defs)
        };

        children.push(ColGroupChild::Group(ColGroupDef {
            group_id: group_id(path),
            header_name: key.clone(),
            children: group_children,
        }));

        path.pop();
    }

    children
}

fn group_id(path: &[String]) -> String {
    format!("pivot_{}", path.join("_"))
}

fn leaf_col_def(path: &[String], value_column: &Column) -> ColDef {
    let col_id = format!("pivot_{}_{}", path.join("_"), value_column.col_id);
    let header_name = match value_column.agg_func {
        Some(func) => format!("{}({})", func.as_str(), value_column.col_id),
        None => value_column.col_id.clone(),
    };
    ColDef {
        col_id,
        header_name,
        pivot_keys: path.to_vec(),
        pivot_value_column: Some(value_column.col_id.clone()),
        agg_func: value_column.agg_func,
    }
}
