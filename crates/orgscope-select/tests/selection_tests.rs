use orgscope_select::{
    descendant_role_ids, descendant_role_set, is_visible, selection_state_for, toggle,
    visible_nodes, ExpansionSet, SearchQuery, SelectionEngine, SelectionState, TriState,
    TriStateView,
};
use orgscope_test_utils::{flat, id, leaf_only_tree, sample_tree};
use orgscope_tree::{CompositeId, FlatNode, FlatTree, NodeKind, TreeError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn roles(ids: &[i64]) -> SelectionState {
    ids.iter().copied().map(CompositeId::role).collect()
}

#[test]
fn leaf_only_select_then_deselect() {
    let table = flat(&leaf_only_tree());
    let site = id(NodeKind::Site, 1);

    let selected = toggle(&table, &site, &SelectionState::new()).unwrap();
    assert_eq!(selected, roles(&[10, 11]));

    let cleared = toggle(&table, &site, &selected).unwrap();
    assert!(cleared.is_empty());
}

#[test]
fn partial_display_for_one_of_two() {
    let table = flat(&leaf_only_tree());
    let site = id(NodeKind::Site, 1);

    let state = selection_state_for(&table, &site, &roles(&[10])).unwrap();
    assert_eq!(state, TriState::Partial);
}

#[test]
fn tri_state_none_partial_full() {
    let table = flat(&sample_tree());
    let crew = id(NodeKind::WorkGroup, 12);
    // Supervisor 100 with reports 101 and 102, plus metallurgist 103
    assert_eq!(
        descendant_role_set(&table, &crew).unwrap(),
        [100, 101, 102, 103].into_iter().map(CompositeId::role).collect::<BTreeSet<_>>()
    );

    assert_eq!(selection_state_for(&table, &crew, &roles(&[])).unwrap(), TriState::None);
    assert_eq!(selection_state_for(&table, &crew, &roles(&[101])).unwrap(), TriState::Partial);
    assert_eq!(
        selection_state_for(&table, &crew, &roles(&[100, 101, 102, 103])).unwrap(),
        TriState::Full
    );
}

#[test]
fn partial_toggle_selects_the_rest() {
    let table = flat(&leaf_only_tree());
    let crew = id(NodeKind::WorkGroup, 1);

    let selected = toggle(&table, &crew, &roles(&[10])).unwrap();
    assert_eq!(selected, roles(&[10, 11]));
}

#[test]
fn toggle_role_does_not_cascade_to_reports() {
    let table = flat(&sample_tree());
    let supervisor = CompositeId::role(100);

    let selected = toggle(&table, &supervisor, &SelectionState::new()).unwrap();
    assert_eq!(selected, roles(&[100]));
    assert_eq!(
        selection_state_for(&table, &id(NodeKind::WorkGroup, 12), &selected).unwrap(),
        TriState::Partial
    );
}

#[test]
fn toggle_without_roles_is_noop() {
    let table = flat(&sample_tree());
    let start = roles(&[200]);

    let empty_region = toggle(&table, &id(NodeKind::Region, 3), &start).unwrap();
    assert_eq!(empty_region, start);

    let unknown = toggle(&table, &id(NodeKind::Site, 999), &start).unwrap();
    assert_eq!(unknown, start);
    assert_eq!(
        selection_state_for(&table, &id(NodeKind::Site, 999), &start).unwrap(),
        TriState::None
    );
}

#[test]
fn view_matches_per_node_state() {
    let table = flat(&sample_tree());
    let selected = roles(&[101, 103, 104, 200]);
    let view = TriStateView::compute(&table, &selected).unwrap();

    assert_eq!(view.len(), table.len());
    for node in &table {
        let expected = selection_state_for(&table, &node.composite_id, &selected).unwrap();
        assert_eq!(view.state(&node.composite_id), expected, "mismatch at {}", node.composite_id);
    }

    assert_eq!(view.state(&id(NodeKind::AssetGroup, 11)), TriState::Partial);
    assert_eq!(view.state(&id(NodeKind::WorkGroup, 13)), TriState::Full);
    assert_eq!(view.state(&id(NodeKind::BusinessUnit, 2)), TriState::Full);
    assert_eq!(view.state(&id(NodeKind::Region, 3)), TriState::None);
    assert!(!view.is_selectable(&id(NodeKind::AssetGroup, 31)));

    let counts = view.counts(&id(NodeKind::Company, 1));
    assert_eq!((counts.selected, counts.total), (4, 7));
}

#[test]
fn engine_resolves_numeric_ids() {
    let table = flat(&sample_tree());
    let mut engine = SelectionEngine::new();

    assert!(engine.toggle(&table, &id(NodeKind::Site, 20)).unwrap());
    assert!(engine.toggle(&table, &id(NodeKind::WorkGroup, 13)).unwrap());
    assert!(!engine.toggle(&table, &id(NodeKind::Region, 3)).unwrap());

    assert_eq!(engine.resolve_numeric(&table), vec![104, 200]);
    assert_eq!(engine.state_for(&table, &id(NodeKind::BusinessUnit, 2)).unwrap(), TriState::Full);
}

#[test]
fn engine_drops_ids_from_other_trees() {
    let table = flat(&leaf_only_tree());
    let mut engine = SelectionEngine::with_selection(roles(&[10, 500]));

    assert_eq!(engine.resolve_numeric(&table), vec![10]);
    assert_eq!(engine.retain_known(&table), 1);
    assert_eq!(engine.selected(), &roles(&[10]));
}

#[test]
fn decoded_selection_holds_only_roles() {
    let table = flat(&leaf_only_tree());

    let mixed = serde_json::from_str::<SelectionState>(r#"["site-1","role-10"]"#);
    assert!(mixed.is_err());

    let decoded: SelectionState = serde_json::from_str(r#"["role-10","role-11"]"#).unwrap();
    let engine = SelectionEngine::with_selection(decoded);
    assert_eq!(engine.resolve_numeric(&table), vec![10, 11]);
}

#[test]
fn resolve_numeric_skips_rows_that_are_not_roles() {
    // A hand-built table whose role key points at a site row
    let mislabelled = FlatNode {
        composite_id: CompositeId::role(7),
        numeric_id: 7,
        name: "Plant".into(),
        kind: NodeKind::Site,
        depth: 0,
        display_path: "Plant".into(),
        parent: None,
        has_children: false,
    };
    let table = FlatTree::from_nodes([mislabelled]).unwrap();
    let engine = SelectionEngine::with_selection(roles(&[7]));
    assert!(engine.resolve_numeric(&table).is_empty());
}

#[test]
fn cyclic_links_surface_as_errors() {
    let site = id(NodeKind::Site, 1);
    let group = id(NodeKind::AssetGroup, 1);
    let row = |composite_id: CompositeId, parent: CompositeId| FlatNode {
        composite_id,
        numeric_id: composite_id.numeric_id(),
        name: composite_id.to_string(),
        kind: composite_id.kind(),
        depth: 1,
        display_path: composite_id.to_string(),
        parent: Some(parent),
        has_children: true,
    };
    let table = FlatTree::from_nodes([row(site, group), row(group, site)]).unwrap();

    assert!(matches!(
        descendant_role_ids(&table, &site),
        Err(TreeError::CyclicHierarchy { .. })
    ));
    assert!(matches!(
        toggle(&table, &site, &SelectionState::new()),
        Err(TreeError::CyclicHierarchy { .. })
    ));
    assert!(matches!(
        TriStateView::compute(&table, &SelectionState::new()),
        Err(TreeError::CyclicHierarchy { .. })
    ));
}

#[test]
fn search_bypasses_collapsed_ancestors() {
    let table = flat(&leaf_only_tree());
    let fitter = table.get(&CompositeId::role(11)).unwrap();
    let collapsed = ExpansionSet::root_only(&table);

    assert!(is_visible(&table, fitter, &collapsed, &SearchQuery::new("fitter")));
    assert!(!is_visible(&table, fitter, &collapsed, &SearchQuery::new("")));
    assert!(!is_visible(&table, fitter, &collapsed, &SearchQuery::new("welder")));
}

#[test]
fn one_collapsed_ancestor_hides_node() {
    let table = flat(&leaf_only_tree());
    let fitter = CompositeId::role(11);

    let mut expanded = ExpansionSet::new();
    expanded.expand_all(&table);
    assert!(is_visible(&table, table.get(&fitter).unwrap(), &expanded, &SearchQuery::default()));

    expanded.collapse(&id(NodeKind::Region, 1));
    assert!(!is_visible(&table, table.get(&fitter).unwrap(), &expanded, &SearchQuery::default()));
    // Root stays visible regardless
    assert!(is_visible(&table, table.root().unwrap(), &ExpansionSet::new(), &SearchQuery::default()));
}

#[test]
fn expand_to_reveals_node() {
    let table = flat(&sample_tree());
    let driver = CompositeId::role(200);

    let mut expanded = ExpansionSet::root_only(&table);
    expanded.expand_to(&table, &driver);
    assert!(is_visible(&table, table.get(&driver).unwrap(), &expanded, &SearchQuery::default()));
}

#[test]
fn visible_rows_follow_display_order() {
    let table = flat(&leaf_only_tree());
    let expanded = ExpansionSet::root_only(&table);

    let rows: Vec<String> = visible_nodes(&table, &expanded, &SearchQuery::default())
        .iter()
        .map(|n| n.composite_id.to_string())
        .collect();
    assert_eq!(rows, vec!["company-1".to_string(), "business_unit-1".to_string()]);

    let searched: Vec<String> = visible_nodes(&table, &expanded, &SearchQuery::new("role"))
        .iter()
        .map(|n| n.composite_id.to_string())
        .collect();
    assert_eq!(
        searched,
        vec!["company-1".to_string(), "role-10".to_string(), "role-11".to_string()]
    );
}

fn all_roles(table: &FlatTree) -> Vec<CompositeId> {
    table.roles().map(|n| n.composite_id).collect()
}

fn node_ids(table: &FlatTree) -> Vec<CompositeId> {
    table.ids().copied().collect()
}

proptest! {
    #[test]
    fn prop_descendants_are_exactly_the_subtree_roles(index in 0usize..64) {
        let table = flat(&sample_tree());
        let ids = node_ids(&table);
        let node = ids[index % ids.len()];

        let found = descendant_role_set(&table, &node).unwrap();
        let expected: BTreeSet<CompositeId> = if node.is_role() {
            BTreeSet::from([node])
        } else {
            all_roles(&table)
                .into_iter()
                .filter(|role| table.ancestors_of(role).unwrap().contains(&node))
                .collect()
        };
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_cascade_adds_or_removes_exactly_the_scope(
        index in 0usize..64,
        mask in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let table = flat(&sample_tree());
        let ids = node_ids(&table);
        let node = ids[index % ids.len()];

        let start: SelectionState = all_roles(&table)
            .into_iter()
            .zip(mask)
            .filter_map(|(role, keep)| keep.then_some(role))
            .collect();
        let scope = descendant_role_set(&table, &node).unwrap();
        let before = selection_state_for(&table, &node, &start).unwrap();
        let after = toggle(&table, &node, &start).unwrap();

        let expected: BTreeSet<CompositeId> = if before == TriState::Full {
            start.ids().difference(&scope).copied().collect()
        } else {
            start.ids().union(&scope).copied().collect()
        };
        prop_assert_eq!(after.ids(), &expected);

        if !scope.is_empty() {
            let flipped = selection_state_for(&table, &node, &after).unwrap();
            prop_assert_eq!(
                flipped,
                if before == TriState::Full { TriState::None } else { TriState::Full }
            );
        }
    }
}
