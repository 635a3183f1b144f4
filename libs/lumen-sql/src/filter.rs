// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;

/// A single conjunctive predicate: a clause template carrying the data
/// layer's parameter placeholder syntax verbatim (`"name = ?"`) and the value
/// bound to it.
///
/// Filters are combined with AND only, in the order they were accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub clause: String,
    pub value: Value,
}

impl Filter {
    pub fn new(clause: impl Into<String>, value: Value) -> Self {
        Self {
            clause: clause.into(),
            value,
        }
    }
}
