// crates/biou-console-util/src/tree.rs
// ============================================================================
// Module: Tree Shaping
// Description: Convert flat id/parentId lists to nested trees and back.
// Purpose: Build menu, permission, and department hierarchies from API lists.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Records are JSON objects carrying an id field and a parent id field (names
//! configurable through [`TreeOptions`]). [`array_to_tree`] first indexes every
//! record by id, then attaches each record to its parent in a second pass.
//!
//! Invariants:
//! - A record whose parent id equals [`TreeOptions::root_value`] is a root.
//! - A record whose parent id is not in the index, or that has no parent id
//!   field at all, is dropped without error; [`build_tree`] lists those ids
//!   in [`TreeReport::orphaned_ids`].
//! - Ids compare by exact JSON value, so `1` and `"1"` are different ids.
//! - A record is never emitted inside its own subtree, so parent cycles
//!   terminate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Field names and root marker used by the tree helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeOptions {
    /// Field holding a record's identity.
    pub id_key: String,
    /// Field holding the parent's identity.
    pub parent_id_key: String,
    /// Field that receives the nested children array.
    pub children_key: String,
    /// Parent id value that marks a root record.
    pub root_value: Value,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            id_key: "id".to_string(),
            parent_id_key: "parentId".to_string(),
            children_key: "children".to_string(),
            root_value: Value::Null,
        }
    }
}

/// Result of [`build_tree`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreeReport {
    /// Root records with their nested children.
    pub roots: Vec<Value>,
    /// Ids of records whose parent was not found or not declared.
    pub orphaned_ids: Vec<Value>,
}

// ============================================================================
// SECTION: Flat to Nested
// ============================================================================

/// Nests `items` under their parents; orphaned records are dropped.
#[must_use]
pub fn array_to_tree(items: &[Value], options: &TreeOptions) -> Vec<Value> {
    build_tree(items, options).roots
}

/// Nests `items` under their parents and reports dropped orphans.
#[must_use]
pub fn build_tree(items: &[Value], options: &TreeOptions) -> TreeReport {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        index.insert(identity(field(item, &options.id_key)), position);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    let mut roots = Vec::new();
    let mut orphaned_ids = Vec::new();
    for item in items {
        let id = field(item, &options.id_key);
        let Some(&own) = index.get(&identity(id)) else {
            continue;
        };
        match item.get(&options.parent_id_key) {
            Some(parent) if *parent == options.root_value => roots.push(own),
            Some(parent) => match index.get(&identity(parent)) {
                Some(&parent_position) => children[parent_position].push(own),
                None => orphaned_ids.push(id.clone()),
            },
            None => orphaned_ids.push(id.clone()),
        }
    }

    let mut on_path = vec![false; items.len()];
    let roots = roots
        .into_iter()
        .map(|root| materialize(root, items, &children, &options.children_key, &mut on_path))
        .collect();
    TreeReport {
        roots,
        orphaned_ids,
    }
}

/// Returns the field value, or `null` when absent.
fn field<'a>(item: &'a Value, key: &str) -> &'a Value {
    item.get(key).unwrap_or(&Value::Null)
}

/// Canonical lookup key for an id value.
fn identity(value: &Value) -> String {
    value.to_string()
}

/// Clones the record at `position` with its children nested beneath it.
fn materialize(
    position: usize,
    items: &[Value],
    children: &[Vec<usize>],
    children_key: &str,
    on_path: &mut [bool],
) -> Value {
    on_path[position] = true;
    let mut nested = Vec::with_capacity(children[position].len());
    for &child in &children[position] {
        if !on_path[child] {
            nested.push(materialize(child, items, children, children_key, on_path));
        }
    }
    on_path[position] = false;

    let mut node = items[position].clone();
    if let Value::Object(fields) = &mut node {
        fields.insert(children_key.to_string(), Value::Array(nested));
    }
    node
}

// ============================================================================
// SECTION: Nested to Flat
// ============================================================================

/// Flattens `tree` in depth-first pre-order, removing the children field.
#[must_use]
pub fn tree_to_array(tree: &[Value], children_key: &str) -> Vec<Value> {
    let mut out = Vec::new();
    flatten_into(tree, children_key, &mut out);
    out
}

/// Appends `nodes` and their descendants to `out`.
fn flatten_into(nodes: &[Value], children_key: &str, out: &mut Vec<Value>) {
    for node in nodes {
        let mut record = node.clone();
        let nested = match &mut record {
            Value::Object(fields) => fields.remove(children_key),
            _ => None,
        };
        out.push(record);
        if let Some(Value::Array(nested)) = nested
            && !nested.is_empty()
        {
            flatten_into(&nested, children_key, out);
        }
    }
}

// ============================================================================
// SECTION: Search
// ============================================================================

/// Returns the first node (pre-order) matching `predicate`.
pub fn find_node<'a, P>(tree: &'a [Value], predicate: P, children_key: &str) -> Option<&'a Value>
where
    P: Fn(&Value) -> bool,
{
    find_in(tree, &predicate, children_key)
}

/// Recursive worker for [`find_node`].
fn find_in<'a, P>(nodes: &'a [Value], predicate: &P, children_key: &str) -> Option<&'a Value>
where
    P: Fn(&Value) -> bool,
{
    for node in nodes {
        if predicate(node) {
            return Some(node);
        }
        if let Some(Value::Array(nested)) = node.get(children_key)
            && let Some(found) = find_in(nested, predicate, children_key)
        {
            return Some(found);
        }
    }
    None
}
