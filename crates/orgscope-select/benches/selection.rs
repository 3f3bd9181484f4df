use criterion::{black_box, criterion_group, criterion_main, Criterion};

use orgscope_select::{selection_state_for, toggle, visible_nodes, ExpansionSet, SearchQuery, SelectionState, TriStateView};
use orgscope_test_utils::{flat, uniform_tree};
use orgscope_tree::flatten;

const FANOUT: [usize; 7] = [1, 3, 3, 3, 3, 3, 2];

fn bench_flatten(c: &mut Criterion) {
    let tree = uniform_tree(FANOUT);

    c.bench_function("flatten_uniform", |b| {
        b.iter(|| flatten(black_box(&tree)).unwrap());
    });
}

fn bench_tri_state(c: &mut Criterion) {
    let table = flat(&uniform_tree(FANOUT));
    // Every other role selected
    let selected: SelectionState = table.roles().step_by(2).map(|n| n.composite_id).collect();

    c.bench_function("tri_state_view", |b| {
        b.iter(|| TriStateView::compute(black_box(&table), black_box(&selected)).unwrap());
    });

    c.bench_function("tri_state_per_node", |b| {
        b.iter(|| {
            for node in &table {
                selection_state_for(&table, &node.composite_id, &selected).unwrap();
            }
        });
    });
}

fn bench_toggle_root(c: &mut Criterion) {
    let table = flat(&uniform_tree(FANOUT));
    let root = table.root().unwrap().composite_id;
    let empty = SelectionState::new();

    c.bench_function("toggle_root", |b| {
        b.iter(|| toggle(black_box(&table), black_box(&root), &empty).unwrap());
    });
}

fn bench_search(c: &mut Criterion) {
    let table = flat(&uniform_tree(FANOUT));
    let expanded = ExpansionSet::root_only(&table);
    let query = SearchQuery::new("report");

    c.bench_function("visible_nodes_search", |b| {
        b.iter(|| visible_nodes(black_box(&table), &expanded, black_box(&query)).len());
    });
}

criterion_group!(benches, bench_flatten, bench_tri_state, bench_toggle_root, bench_search);
criterion_main!(benches);
