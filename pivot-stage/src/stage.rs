//! FILENAME: pivot-stage/src/stage.rs
//! PURPOSE: The pivot stage - row bucketing and change detection.
//! CONTEXT: Runs once per recomputation cycle, after grouping and filtering.
//! When pivoting is active it rebuilds the nested bucket mapping on every
//! leaf group, accumulates the distinct values per pivot level, and compares
//! the result (plus the aggregation configuration) against the previous
//! execution's snapshot. Any difference regenerates the secondary column
//! definitions and forces a full re-aggregation pass.

use grid_model::{
    ChangedPath, ChildrenMapped, ColDef, Column, ColumnEventReason, ColumnModel, RowNodeId,
    RowTree, ValueService,
};
use log::debug;
use rustc_hash::FxHashMap;

use crate::col_defs::{create_pivot_column_defs, PivotColDefResult};
use crate::unique_values::UniqueValues;

/// Input for one stage execution.
pub struct StageExecuteParams<'a> {
    /// The row tree being recomputed.
    pub tree: &'a mut RowTree,

    /// Root of the traversal (normally the tree root).
    pub row_node: RowNodeId,

    /// Re-aggregation scope tracker, when the caller maintains one.
    pub changed_path: Option<&'a mut ChangedPath>,
}

/// The pivot stage. One instance per grid session; the snapshot it keeps
/// between executions (unique values and configuration hashes) is what makes
/// change detection possible.
#[derive(Debug, Clone, Default)]
pub struct PivotStage {
    unique_values: UniqueValues,
    pivot_column_defs: Vec<ColDef>,
    aggregation_columns_hash_last_time: Option<String>,
    aggregation_funcs_hash_last_time: Option<String>,
}

impl PivotStage {
    pub fn new() -> Self {
        PivotStage::default()
    }

    /// Single public entry point, called once per recomputation cycle.
    pub fn execute(
        &mut self,
        column_model: &mut ColumnModel,
        value_service: &ValueService,
        params: StageExecuteParams,
    ) {
        let StageExecuteParams {
            tree,
            row_node,
            changed_path,
        } = params;

        if column_model.is_pivot_active() {
            self.execute_pivot_on(column_model, value_service, tree, row_node, changed_path);
        } else {
            self.execute_pivot_off(column_model, changed_path);
        }
    }

    /// The flat pivot column definitions generated by the last execution.
    /// Empty before the first pivot-active execution and after a pivot-off
    /// reset.
    pub fn pivot_column_defs(&self) -> &[ColDef] {
        &self.pivot_column_defs
    }

    /// The unique-values snapshot of the last execution.
    pub fn unique_values(&self) -> &UniqueValues {
        &self.unique_values
    }

    fn execute_pivot_off(
        &mut self,
        column_model: &mut ColumnModel,
        changed_path: Option<&mut ChangedPath>,
    ) {
        self.aggregation_columns_hash_last_time = None;
        self.aggregation_funcs_hash_last_time = None;
        self.unique_values.clear();
        self.pivot_column_defs.clear();

        if column_model.is_secondary_columns_present() {
            debug!("pivot off: removing secondary columns");
            column_model.set_secondary_columns(None, ColumnEventReason::RowModelUpdated);
            // removing pivot columns invalidates path-based incremental
            // aggregation, so the next pass must visit the whole tree
            if let Some(changed_path) = changed_path {
                changed_path.set_inactive();
            }
        }
    }

    fn execute_pivot_on(
        &mut self,
        column_model: &mut ColumnModel,
        value_service: &ValueService,
        tree: &mut RowTree,
        root: RowNodeId,
        changed_path: Option<&mut ChangedPath>,
    ) {
        let new_unique_values =
            self.bucket_up_row_nodes(column_model, value_service, tree, root);

        let unique_values_changed = self.set_unique_values(new_unique_values);

        let aggregation_columns = column_model.value_columns();
        let aggregation_columns_hash = aggregation_columns
            .iter()
            .map(|column| column.col_id.as_str())
            .collect::<Vec<_>>()
            .join("#");
        let aggregation_funcs_hash = aggregation_columns
            .iter()
            .map(|column| column.agg_func.map(|func| func.as_str()).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("#");

        let aggregation_columns_changed = self.aggregation_columns_hash_last_time.as_deref()
            != Some(aggregation_columns_hash.as_str());
        let aggregation_funcs_changed = self.aggregation_funcs_hash_last_time.as_deref()
            != Some(aggregation_funcs_hash.as_str());
        self.aggregation_columns_hash_last_time = Some(aggregation_columns_hash);
        self.aggregation_funcs_hash_last_time = Some(aggregation_funcs_hash);

        if unique_values_changed || aggregation_columns_changed || aggregation_funcs_changed {
            let PivotColDefResult {
                group_defs,
                flat_defs,
            } = create_pivot_column_defs(&self.unique_values, aggregation_columns);
            debug!(
                "pivot columns regenerated: {} groups, {} leaf columns",
                group_defs.len(),
                flat_defs.len()
            );
            self.pivot_column_defs = flat_defs;
            column_model.set_secondary_columns(Some(group_defs), ColumnEventReason::RowModelUpdated);
            // the secondary column set changed, so aggregation has to visit
            // the whole tree again rather than only the changed paths
            if let Some(changed_path) = changed_path {
                changed_path.set_inactive();
            }
        }
    }

    /// Replaces the stored unique values when the new structure differs.
    /// Comparison is structural over the nested mapping; key discovery order
    /// cannot influence the result.
    fn set_unique_values(&mut self, new_values: UniqueValues) -> bool {
        if new_values != self.unique_values {
            self.unique_values = new_values;
            true
        } else {
            false
        }
    }

    /// Finds all leaf groups under `root` and buckets each one. Returns the
    /// unique values accumulated across every leaf group visited.
    fn bucket_up_row_nodes(
        &self,
        column_model: &ColumnModel,
        value_service: &ValueService,
        tree: &mut RowTree,
        root: RowNodeId,
    ) -> UniqueValues {
        let mut unique_values = UniqueValues::new();

        let mut leaf_groups = Vec::new();
        collect_leaf_groups(tree, root, &mut leaf_groups);

        for node_id in leaf_groups {
            self.bucket_row_node(
                column_model,
                value_service,
                tree,
                node_id,
                &mut unique_values,
            );
        }

        unique_values
    }

    /// Buckets one leaf group's filtered children and writes the result to
    /// the node (and its sibling, when present). With no pivot columns
    /// configured the mapping is cleared instead.
    fn bucket_row_node(
        &self,
        column_model: &ColumnModel,
        value_service: &ValueService,
        tree: &mut RowTree,
        node_id: RowNodeId,
        unique_values: &mut UniqueValues,
    ) {
        let pivot_columns = column_model.pivot_columns();

        let mapped = if pivot_columns.is_empty() {
            None
        } else {
            let children = tree.node(node_id).children_after_filter.clone();
            Some(self.bucket_children(
                value_service,
                tree,
                &children,
                pivot_columns,
                0,
                unique_values,
            ))
        };

        let sibling = tree.node(node_id).sibling;
        if let Some(sibling_id) = sibling {
            tree.node_mut(sibling_id).children_mapped = mapped.clone();
        }
        tree.node_mut(node_id).children_mapped = mapped;
    }

    /// Groups `children` by their value for the pivot column at
    /// `pivot_index`, preserving each child's relative order within its
    /// bucket, then recurses one level deeper until the last pivot column.
    ///
    /// `unique_values` is the accumulator for this nesting level, threaded
    /// through the recursion explicitly; it is the single mutation channel
    /// of an otherwise pure function.
    fn bucket_children(
        &self,
        value_service: &ValueService,
        tree: &RowTree,
        children: &[RowNodeId],
        pivot_columns: &[Column],
        pivot_index: usize,
        unique_values: &mut UniqueValues,
    ) -> ChildrenMapped {
        let pivot_column = &pivot_columns[pivot_index];

        let mut mapped_children: FxHashMap<String, Vec<RowNodeId>> = FxHashMap::default();
        for &child_id in children {
            // a missing value is valid data and forms its own bucket
            let key = value_service
                .get_key_for_node(pivot_column, tree.node(child_id))
                .unwrap_or_default();
            unique_values.ensure(&key);
            mapped_children.entry(key).or_default().push(child_id);
        }

        if pivot_index == pivot_columns.len() - 1 {
            ChildrenMapped::Groups(
                mapped_children
                    .into_iter()
                    .map(|(key, rows)| (key, ChildrenMapped::Rows(rows)))
                    .collect(),
            )
        } else {
            let mut result = FxHashMap::default();
            for (key, bucket) in mapped_children {
                let nested_unique_values = unique_values.ensure(&key);
                let nested = self.bucket_children(
                    value_service,
                    tree,
                    &bucket,
                    pivot_columns,
                    pivot_index + 1,
                    nested_unique_values,
                );
                result.insert(key, nested);
            }
            ChildrenMapped::Groups(result)
        }
    }
}

/// Depth-first descent collecting every leaf group under `node_id`.
fn collect_leaf_groups(tree: &RowTree, node_id: RowNodeId, out: &mut Vec<RowNodeId>) {
    let node = tree.node(node_id);
    if node.leaf_group {
        out.push(node_id);
    } else {
        for &child in &node.children_after_filter {
            collect_leaf_groups(tree, child, out);
        }
    }
}
