// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use super::field::ValidatedField;

/// A node of the selection tree describing what was requested beneath the
/// currently resolving field. The data layer walks it to decide how many
/// levels of relations to eager-load.
///
/// The root carries no name and sits at depth 0; requested fields start at
/// depth 1. Only the depth-to-children mapping is contractual; the data layer
/// asks "does this path exist below me", never "in what order".
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionNode {
    pub name: Option<String>,
    pub depth: usize,
    pub children: HashMap<String, SelectionNode>,
}

impl SelectionNode {
    /// Build a fresh tree from the field's sub-selection. A field with no
    /// sub-selection yields an empty root, not an error. Each invocation
    /// re-walks the field and produces an equivalent but distinct tree.
    pub fn collect(field: &ValidatedField) -> SelectionNode {
        SelectionNode {
            name: None,
            depth: 0,
            children: collect_children(&field.subfields, 1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The node at the given path below this one, if the path was requested.
    pub fn lookup(&self, path: &[&str]) -> Option<&SelectionNode> {
        match path.split_first() {
            Some((name, rest)) => self.children.get(*name)?.lookup(rest),
            None => Some(self),
        }
    }
}

fn collect_children(
    subfields: &[ValidatedField],
    depth: usize,
) -> HashMap<String, SelectionNode> {
    subfields
        .iter()
        .map(|field| {
            (
                field.name.clone(),
                SelectionNode {
                    name: Some(field.name.clone()),
                    depth,
                    children: collect_children(&field.subfields, depth + 1),
                },
            )
        })
        .collect()
}
