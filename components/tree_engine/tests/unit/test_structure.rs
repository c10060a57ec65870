//! Structural operations: insert, remove, navigation

use core_types::{AttributeId, AttributeValue, NodeId, NodeType, Position, TreeError};
use tree_engine::{ArenaTree, Backend};

fn new_nodes(tree: &mut ArenaTree, count: usize) -> Vec<NodeId> {
    (0..count).map(|_| tree.create_node().unwrap()).collect()
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_created_node_is_detached() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();

    assert_eq!(tree.parent(node).unwrap(), None);
    assert_eq!(tree.first_child(node).unwrap(), None);
    assert_eq!(tree.child_count(node).unwrap(), 0);
    assert!(tree.is_root(node).unwrap());
    assert!(tree.is_leaf(node).unwrap());
    assert_eq!(tree.node_type(node).unwrap(), NodeType(0));
}

#[test]
fn test_is_empty_needs_no_children_and_no_attributes() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 2);
    assert!(tree.is_empty(n[0]).unwrap());

    tree.insert_child(n[0], n[1], Position::Append).unwrap();
    assert!(!tree.is_empty(n[0]).unwrap());
    assert!(tree.is_empty(n[1]).unwrap());

    tree.set_attribute(n[1], AttributeId(1), AttributeValue::Boolean(true))
        .unwrap();
    assert!(tree.is_leaf(n[1]).unwrap());
    assert!(!tree.is_empty(n[1]).unwrap());

    tree.clear_attributes(n[1]).unwrap();
    assert!(tree.is_empty(n[1]).unwrap());
    assert_eq!(tree.is_empty(NodeId(9)), Err(TreeError::InvalidNode(NodeId(9))));
}

#[test]
fn test_created_ids_are_distinct() {
    let mut tree = ArenaTree::new();
    let nodes = new_nodes(&mut tree, 4);
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_node_type_set_get() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();
    tree.set_node_type(node, NodeType(7)).unwrap();
    assert_eq!(tree.node_type(node).unwrap(), NodeType(7));
}

// ============================================================================
// Insert
// ============================================================================

#[test]
fn test_append_sets_parent_and_is_last() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 4);
    tree.insert_child(n[0], n[1], Position::Append).unwrap();
    tree.insert_child(n[0], n[2], Position::Append).unwrap();
    tree.insert_child(n[0], n[3], Position::Append).unwrap();

    assert_eq!(tree.parent(n[3]).unwrap(), Some(n[0]));
    let children = tree.children(n[0]).unwrap();
    assert_eq!(children, vec![n[1], n[2], n[3]]);
    assert_eq!(children.iter().filter(|c| **c == n[3]).count(), 1);
    assert_eq!(tree.last_child(n[0]).unwrap(), Some(n[3]));
}

#[test]
fn test_prepend() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 3);
    tree.insert_child(n[0], n[1], Position::Append).unwrap();
    tree.insert_child(n[0], n[2], Position::Prepend).unwrap();

    assert_eq!(tree.children(n[0]).unwrap(), vec![n[2], n[1]]);
    assert_eq!(tree.first_child(n[0]).unwrap(), Some(n[2]));
}

#[test]
fn test_insert_at_ordinal() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 5);
    tree.insert_child(n[0], n[1], Position::At(0)).unwrap();
    tree.insert_child(n[0], n[2], Position::At(1)).unwrap();
    tree.insert_child(n[0], n[3], Position::At(1)).unwrap();
    tree.insert_child(n[0], n[4], Position::At(0)).unwrap();

    assert_eq!(tree.children(n[0]).unwrap(), vec![n[4], n[1], n[3], n[2]]);
    assert_eq!(tree.child_index(n[0], n[3]).unwrap(), 2);
}

#[test]
fn test_insert_at_past_end_fails() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 2);
    assert_eq!(
        tree.insert_child(n[0], n[1], Position::At(1)),
        Err(TreeError::PositionOutOfRange { index: 1, len: 0 })
    );
    assert_eq!(tree.parent(n[1]).unwrap(), None);
}

#[test]
fn test_insert_before_sibling() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 4);
    tree.insert_child(n[0], n[1], Position::Append).unwrap();
    tree.insert_child(n[0], n[2], Position::Append).unwrap();
    tree.insert_child(n[0], n[3], Position::Before(n[2])).unwrap();

    assert_eq!(tree.children(n[0]).unwrap(), vec![n[1], n[3], n[2]]);
    assert_eq!(tree.previous_sibling(n[2]).unwrap(), Some(n[3]));
}

#[test]
fn test_insert_before_non_child_fails() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 3);
    assert_eq!(
        tree.insert_child(n[0], n[1], Position::Before(n[2])),
        Err(TreeError::NotAChild {
            parent: n[0],
            child: n[2],
        })
    );
}

#[test]
fn test_insert_unknown_ids() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();
    let ghost = NodeId(99);
    assert_eq!(
        tree.insert_child(node, ghost, Position::Append),
        Err(TreeError::InvalidNode(ghost))
    );
    assert_eq!(
        tree.insert_child(ghost, node, Position::Append),
        Err(TreeError::InvalidNode(ghost))
    );
}

#[test]
fn test_insert_already_attached() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 3);
    tree.insert_child(n[0], n[2], Position::Append).unwrap();
    assert_eq!(
        tree.insert_child(n[1], n[2], Position::Append),
        Err(TreeError::AlreadyAttached {
            child: n[2],
            parent: n[0],
        })
    );
    assert_eq!(tree.parent(n[2]).unwrap(), Some(n[0]));
    assert_eq!(tree.child_count(n[1]).unwrap(), 0);
}

#[test]
fn test_cycle_rejected_and_tree_unchanged() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 2);
    tree.insert_child(n[0], n[1], Position::Append).unwrap();

    assert_eq!(
        tree.insert_child(n[1], n[0], Position::Append),
        Err(TreeError::CycleDetected {
            parent: n[1],
            child: n[0],
        })
    );
    assert_eq!(tree.parent(n[0]).unwrap(), None);
    assert_eq!(tree.parent(n[1]).unwrap(), Some(n[0]));
    assert_eq!(tree.children(n[0]).unwrap(), vec![n[1]]);
    assert_eq!(tree.child_count(n[1]).unwrap(), 0);
}

#[test]
fn test_self_insert_is_cycle() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();
    assert!(matches!(
        tree.insert_child(node, node, Position::Append),
        Err(TreeError::CycleDetected { .. })
    ));
}

#[test]
fn test_deep_cycle_rejected() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 4);
    tree.insert_child(n[0], n[1], Position::Append).unwrap();
    tree.insert_child(n[1], n[2], Position::Append).unwrap();
    tree.insert_child(n[2], n[3], Position::Append).unwrap();

    assert!(matches!(
        tree.insert_child(n[3], n[0], Position::Append),
        Err(TreeError::CycleDetected { .. })
    ));
}

// ============================================================================
// Remove
// ============================================================================

#[test]
fn test_remove_destroys_subtree() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 5);
    tree.insert_child(n[0], n[1], Position::Append).unwrap();
    tree.insert_child(n[1], n[2], Position::Append).unwrap();
    tree.insert_child(n[1], n[3], Position::Append).unwrap();
    tree.insert_child(n[3], n[4], Position::Append).unwrap();

    tree.remove_child(n[0], n[1]).unwrap();

    for destroyed in &n[1..] {
        assert!(!tree.contains(*destroyed));
        assert_eq!(
            tree.parent(*destroyed),
            Err(TreeError::InvalidNode(*destroyed))
        );
        assert_eq!(
            tree.next_sibling(*destroyed),
            Err(TreeError::InvalidNode(*destroyed))
        );
    }
    assert!(tree.is_leaf(n[0]).unwrap());
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_remove_non_child_fails() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 3);
    tree.insert_child(n[0], n[1], Position::Append).unwrap();
    tree.insert_child(n[1], n[2], Position::Append).unwrap();

    assert_eq!(
        tree.remove_child(n[0], n[2]),
        Err(TreeError::NotAChild {
            parent: n[0],
            child: n[2],
        })
    );
    assert!(tree.contains(n[2]));
}

#[test]
fn test_remove_then_reinsert_is_invalid() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 2);
    tree.insert_child(n[0], n[1], Position::Append).unwrap();
    tree.remove_child(n[0], n[1]).unwrap();
    assert_eq!(
        tree.insert_child(n[0], n[1], Position::Append),
        Err(TreeError::InvalidNode(n[1]))
    );
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_none_is_not_error() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();
    assert_eq!(tree.next_sibling(node), Ok(None));
    assert_eq!(tree.previous_sibling(node), Ok(None));
    assert_eq!(tree.parent(node), Ok(None));
    assert_eq!(tree.first_child(node), Ok(None));
}

#[test]
fn test_navigation_unknown_node_fails() {
    let tree = ArenaTree::new();
    assert_eq!(tree.first_child(NodeId(0)), Err(TreeError::InvalidNode(NodeId(0))));
    assert_eq!(tree.child_count(NodeId(0)), Err(TreeError::InvalidNode(NodeId(0))));
}

#[test]
fn test_count_matches_enumeration() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 6);
    for child in &n[1..] {
        tree.insert_child(n[0], *child, Position::Prepend).unwrap();
    }
    tree.remove_child(n[0], n[3]).unwrap();

    let count = tree.child_count(n[0]).unwrap();
    assert_eq!(count, tree.children(n[0]).unwrap().len());
    assert_eq!(count, 4);
}

#[test]
fn test_child_index_of_non_child() {
    let mut tree = ArenaTree::new();
    let n = new_nodes(&mut tree, 2);
    assert!(matches!(
        tree.child_index(n[0], n[1]),
        Err(TreeError::NotAChild { .. })
    ));
}
