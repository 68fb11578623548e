//! Tests for the FamilyTree forest manager

use kintree::domain::{DomainError, FamilyTree, NodeId, VIRTUAL_ROOT_ID};

fn id(n: i64) -> NodeId {
    NodeId::Int(n)
}

/// Root(0) -> Grandma(1) -> Mom(2) -> Me(3)
fn family_chain() -> FamilyTree {
    let mut tree = FamilyTree::new("ROOT");
    tree.insert(id(1), "Grandma", &VIRTUAL_ROOT_ID).unwrap();
    tree.insert(id(2), "Mom", &id(1)).unwrap();
    tree.insert(id(3), "Me", &id(2)).unwrap();
    tree
}

// ============================================================
// Scenario Tests (build, move, delete, cycle)
// ============================================================

#[test]
fn given_family_chain_when_querying_then_matches_expected_shape() {
    let tree = family_chain();

    assert_eq!(
        tree.depth_first(&VIRTUAL_ROOT_ID).unwrap(),
        vec![id(0), id(1), id(2), id(3)]
    );
    assert_eq!(tree.max_depth(&VIRTUAL_ROOT_ID).unwrap(), 4);
    assert_eq!(tree.count_descendants(&VIRTUAL_ROOT_ID).unwrap(), 3);
}

#[test]
fn given_family_chain_when_moving_me_to_root_then_counts_drop() {
    let mut tree = family_chain();

    tree.move_subtree(&id(3), &VIRTUAL_ROOT_ID).unwrap();

    assert_eq!(tree.lookup(&id(3)).unwrap().parent, Some(id(0)));
    assert_eq!(tree.count_descendants(&id(1)).unwrap(), 1);
    assert_eq!(tree.max_depth(&VIRTUAL_ROOT_ID).unwrap(), 3);
}

#[test]
fn given_moved_me_when_deleting_grandma_then_me_survives() {
    let mut tree = family_chain();
    tree.move_subtree(&id(3), &VIRTUAL_ROOT_ID).unwrap();

    tree.delete_subtree(&id(1)).unwrap();

    assert!(tree.lookup(&id(1)).is_none());
    assert!(tree.lookup(&id(2)).is_none());
    assert!(tree.lookup(&id(3)).is_some());
}

#[test]
fn given_family_chain_when_attaching_grandma_under_me_then_cycle_detected() {
    let mut tree = family_chain();

    let err = tree.attach(&id(3), &id(1)).unwrap_err();

    assert!(matches!(err, DomainError::CycleDetected { .. }));
}

// ============================================================
// Precondition / Atomicity Tests
// ============================================================

#[test]
fn given_self_attach_when_applied_then_fails_and_tree_unchanged() {
    let mut tree = family_chain();
    let before = tree.to_records();

    let err = tree.attach(&id(2), &id(2)).unwrap_err();

    assert_eq!(err, DomainError::SelfParent(id(2)));
    assert_eq!(tree.to_records(), before);
}

#[test]
fn given_cycle_attach_when_applied_then_fails_and_tree_unchanged() {
    let mut tree = family_chain();
    let before = tree.to_records();

    assert!(tree.attach(&id(3), &id(1)).is_err());

    assert_eq!(tree.to_records(), before);
    tree.verify_invariants().unwrap();
}

#[test]
fn given_unknown_ids_when_mutating_then_unknown_node() {
    let mut tree = family_chain();

    assert_eq!(
        tree.attach(&id(99), &id(1)).unwrap_err(),
        DomainError::UnknownNode(id(99))
    );
    assert_eq!(
        tree.rename(&id(99), "ghost").unwrap_err(),
        DomainError::UnknownNode(id(99))
    );
    assert_eq!(
        tree.delete_subtree(&id(99)).unwrap_err(),
        DomainError::UnknownNode(id(99))
    );
}

#[test]
fn given_root_when_deleting_then_rejected() {
    let mut tree = family_chain();
    assert_eq!(
        tree.delete_subtree(&VIRTUAL_ROOT_ID).unwrap_err(),
        DomainError::CannotDeleteRoot
    );
}

// ============================================================
// Deletion Accounting Tests
// ============================================================

#[test]
fn given_subtree_when_deleted_then_exactly_descendants_plus_one_removed() {
    let mut tree = family_chain();
    tree.insert(id(4), "Sibling", &id(2)).unwrap();
    tree.insert(id(5), "Cousin", &id(1)).unwrap();

    let removed = tree.count_descendants(&id(2)).unwrap() + 1;
    let before = tree.len();

    tree.delete_subtree(&id(2)).unwrap();

    assert_eq!(tree.len(), before - removed);
    for gone in [id(2), id(3), id(4)] {
        assert!(tree.lookup(&gone).is_none());
    }
    assert!(tree.lookup(&id(5)).is_some());
    tree.verify_invariants().unwrap();
}

// ============================================================
// Traversal Agreement Tests
// ============================================================

#[test]
fn given_branching_tree_when_traversing_then_dfs_and_bfs_agree_on_set() {
    let mut tree = family_chain();
    tree.insert(id(4), "Aunt", &id(1)).unwrap();
    tree.insert(id(5), "Uncle", &VIRTUAL_ROOT_ID).unwrap();

    let dfs = tree.depth_first(&VIRTUAL_ROOT_ID).unwrap();
    let bfs = tree.breadth_first(&VIRTUAL_ROOT_ID).unwrap();

    let mut dfs_sorted: Vec<String> = dfs.iter().map(|i| i.to_string()).collect();
    let mut bfs_sorted: Vec<String> = bfs.iter().map(|i| i.to_string()).collect();
    dfs_sorted.sort();
    bfs_sorted.sort();
    assert_eq!(dfs_sorted, bfs_sorted);
    assert_ne!(dfs, bfs);
}

#[test]
fn given_any_traversal_then_parents_come_before_descendants() {
    let mut tree = family_chain();
    tree.insert(id(4), "Aunt", &id(1)).unwrap();

    for order in [
        tree.depth_first(&VIRTUAL_ROOT_ID).unwrap(),
        tree.breadth_first(&VIRTUAL_ROOT_ID).unwrap(),
    ] {
        let pos = |node: &NodeId| order.iter().position(|o| o == node).unwrap();
        for person in tree.iter() {
            if let Some(parent) = &person.parent {
                assert!(
                    pos(parent) < pos(&person.id),
                    "parent {} must precede {}",
                    parent,
                    person.id
                );
            }
        }
    }
}

#[test]
fn given_descendant_count_then_matches_dfs_visit_count() {
    let mut tree = family_chain();
    tree.insert(id(4), "Aunt", &id(1)).unwrap();

    for person in tree.iter().map(|p| p.id.clone()).collect::<Vec<_>>() {
        assert_eq!(
            tree.count_descendants(&person).unwrap() + 1,
            tree.depth_first(&person).unwrap().len()
        );
    }
}

// ============================================================
// Depth Tests
// ============================================================

#[test]
fn given_lone_node_when_child_attached_then_depth_grows_to_two() {
    let mut tree = FamilyTree::new("ROOT");
    tree.insert(id(1), "solo", &VIRTUAL_ROOT_ID).unwrap();
    assert_eq!(tree.max_depth(&id(1)).unwrap(), 1);

    tree.insert(id(2), "kid", &id(1)).unwrap();
    assert_eq!(tree.max_depth(&id(1)).unwrap(), 2);
}

// ============================================================
// Invariant Sequences
// ============================================================

#[test]
fn given_arbitrary_valid_operations_then_invariants_hold_after_each() {
    let mut tree = FamilyTree::new("ROOT");
    tree.insert(id(1), "a", &VIRTUAL_ROOT_ID).unwrap();
    tree.verify_invariants().unwrap();
    tree.insert(id(2), "b", &id(1)).unwrap();
    tree.verify_invariants().unwrap();
    tree.insert(NodeId::Text("c".into()), "c", &id(2)).unwrap();
    tree.verify_invariants().unwrap();
    tree.move_subtree(&id(2), &VIRTUAL_ROOT_ID).unwrap();
    tree.verify_invariants().unwrap();
    tree.attach(&id(2), &id(1)).unwrap();
    tree.verify_invariants().unwrap();
    tree.rename(&NodeId::Text("c".into()), "renamed").unwrap();
    tree.verify_invariants().unwrap();
    tree.delete_subtree(&id(2)).unwrap();
    tree.verify_invariants().unwrap();
    // Deleting "b" took "c" and the re-attached "a" with it
    assert_eq!(tree.len(), 1);
}

// ============================================================
// Round-trip Tests
// ============================================================

#[test]
fn given_built_forest_when_round_tripping_then_structure_identical() {
    let mut tree = family_chain();
    tree.insert(NodeId::Text("tia".into()), "Aunt", &id(1)).unwrap();
    tree.move_subtree(&id(3), &VIRTUAL_ROOT_ID).unwrap();

    let rebuilt = FamilyTree::from_records(tree.to_records(), "ROOT");

    assert_eq!(rebuilt, tree);
    assert_eq!(
        rebuilt.depth_first(&VIRTUAL_ROOT_ID).unwrap(),
        tree.depth_first(&VIRTUAL_ROOT_ID).unwrap()
    );
}

#[test]
fn given_records_missing_root_when_rebuilding_then_root_synthesized() {
    let tree = FamilyTree::from_records(Vec::new(), "ROOT");
    let root = tree.lookup(&VIRTUAL_ROOT_ID).unwrap();
    assert_eq!(root.name, "ROOT");
    assert_eq!(tree.len(), 1);
    tree.verify_invariants().unwrap();
}
