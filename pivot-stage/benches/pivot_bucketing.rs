//! FILENAME: pivot-stage/benches/pivot_bucketing.rs
//! Benchmarks for the bucketing and change-detection pass.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grid_model::{AggFunc, CellValue, Column, ColumnModel, RowData, RowTree, ValueService};
use pivot_stage::{PivotStage, StageExecuteParams};

const COUNTRIES: [&str; 8] = ["US", "FR", "GB", "DE", "JP", "AU", "CN", "BR"];
const YEARS: [f64; 4] = [2000.0, 2004.0, 2008.0, 2012.0];

fn build_tree(leaf_groups: usize, rows_per_group: usize) -> RowTree {
    let mut tree = RowTree::new();
    for g in 0..leaf_groups {
        let group = tree.add_group(tree.root(), &format!("group-{}", g), true);
        for r in 0..rows_per_group {
            let mut data = RowData::new();
            data.set(
                "country",
                CellValue::Text(COUNTRIES[(g + r) % COUNTRIES.len()].to_string()),
            );
            data.set("year", CellValue::Number(YEARS[r % YEARS.len()]));
            data.set("gold", CellValue::Number((r % 5) as f64));
            tree.add_leaf_row(group, data);
        }
    }
    tree
}

fn pivot_model() -> ColumnModel {
    let mut model = ColumnModel::new();
    model.set_pivot_mode(true);
    model.set_pivot_columns(vec![Column::new("country"), Column::new("year")]);
    model.set_value_columns(vec![Column::new_value("gold", AggFunc::Sum)]);
    model
}

fn bench_bucketing(c: &mut Criterion) {
    let value_service = ValueService::new();

    c.bench_function("bucket 10x100 rows, 2 pivot levels", |b| {
        let mut tree = build_tree(10, 100);
        let mut model = pivot_model();
        let mut stage = PivotStage::new();
        b.iter(|| {
            let root = tree.root();
            stage.execute(
                &mut model,
                &value_service,
                StageExecuteParams {
                    tree: &mut tree,
                    row_node: root,
                    changed_path: None,
                },
            );
            black_box(stage.pivot_column_defs().len())
        })
    });

    c.bench_function("bucket 100x100 rows, 2 pivot levels", |b| {
        let mut tree = build_tree(100, 100);
        let mut model = pivot_model();
        let mut stage = PivotStage::new();
        b.iter(|| {
            let root = tree.root();
            stage.execute(
                &mut model,
                &value_service,
                StageExecuteParams {
                    tree: &mut tree,
                    row_node: root,
                    changed_path: None,
                },
            );
            black_box(stage.pivot_column_defs().len())
        })
    });
}

criterion_group!(benches, bench_bucketing);
criterion_main!(benches);
