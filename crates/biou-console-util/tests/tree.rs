// crates/biou-console-util/tests/tree.rs
// ============================================================================
// Module: Tree Conversion Tests
// Description: Flat list to tree, tree to flat list, and node search.
// Purpose: Ensure orphans are dropped and cycles cannot recurse forever.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use biou_console_util::TreeOptions;
use biou_console_util::array_to_tree;
use biou_console_util::build_tree;
use biou_console_util::find_node;
use biou_console_util::tree_to_array;
use serde_json::Value;
use serde_json::json;

#[test]
fn orphan_is_dropped() {
    let items = vec![
        json!({"id": 1, "parentId": null}),
        json!({"id": 2, "parentId": 1}),
        json!({"id": 3, "parentId": 99}),
    ];
    let tree = array_to_tree(&items, &TreeOptions::default());
    assert_eq!(
        tree,
        vec![json!({"id": 1, "parentId": null, "children": [
            {"id": 2, "parentId": 1, "children": []}
        ]})]
    );
}

#[test]
fn report_lists_orphaned_ids() {
    let items = vec![json!({"id": 1, "parentId": null}), json!({"id": 3, "parentId": 99})];
    let report = build_tree(&items, &TreeOptions::default());
    assert_eq!(report.roots.len(), 1);
    assert_eq!(report.orphaned_ids, vec![json!(3)]);
}

#[test]
fn record_without_parent_field_is_dropped_with_its_subtree() {
    let items = vec![
        json!({"id": 1}),
        json!({"id": 2, "parentId": 1}),
        json!({"id": 5, "parentId": null}),
    ];
    let report = build_tree(&items, &TreeOptions::default());
    assert_eq!(report.roots, vec![json!({"id": 5, "parentId": null, "children": []})]);
    assert_eq!(report.orphaned_ids, vec![json!(1)]);
}

#[test]
fn custom_keys_and_root_value() {
    let options = TreeOptions {
        id_key: "code".to_string(),
        parent_id_key: "parent".to_string(),
        children_key: "items".to_string(),
        root_value: json!(0),
    };
    let items = vec![json!({"code": "a", "parent": 0}), json!({"code": "b", "parent": "a"})];
    let tree = array_to_tree(&items, &options);
    assert_eq!(tree[0]["items"][0]["code"], json!("b"));
}

#[test]
fn cycles_and_self_parents_terminate() {
    let items = vec![
        json!({"id": 1, "parentId": null}),
        json!({"id": 2, "parentId": 3}),
        json!({"id": 3, "parentId": 2}),
        json!({"id": 4, "parentId": 4}),
    ];
    let tree = array_to_tree(&items, &TreeOptions::default());
    assert_eq!(tree, vec![json!({"id": 1, "parentId": null, "children": []})]);
}

#[test]
fn flatten_is_preorder_without_children() {
    let tree = vec![json!({"id": 1, "children": [
        {"id": 2, "children": [{"id": 3, "children": []}]},
        {"id": 4}
    ]})];
    let flat = tree_to_array(&tree, "children");
    let ids: Vec<Value> = flat.iter().map(|node| node["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2), json!(3), json!(4)]);
    assert!(flat.iter().all(|node| node.get("children").is_none()));
}

#[test]
fn find_node_searches_depth_first() {
    let tree = vec![
        json!({"id": 1, "name": "root", "children": [{"id": 2, "name": "leaf", "children": []}]}),
        json!({"id": 3, "name": "leaf", "children": []}),
    ];
    let found = find_node(&tree, |node| node["name"] == "leaf", "children");
    assert_eq!(found.map(|node| node["id"].clone()), Some(json!(2)));
    assert!(find_node(&tree, |node| node["id"] == 9, "children").is_none());
}
