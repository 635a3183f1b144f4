// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;

use common::value::Val;

/// A field as handed to the engine by the hosting execution engine: name
/// resolved, arguments normalized, sub-selection flattened. The engine never
/// sees the query document itself.
#[derive(Debug, Clone, Default)]
pub struct ValidatedField {
    pub alias: Option<String>,
    /// The name of the field.
    pub name: String,
    /// The arguments to the field, empty if no arguments are provided.
    pub arguments: IndexMap<String, Val>,

    /// The subfields being selected in this field, if it is an object. Empty
    /// if no fields are being selected.
    pub subfields: Vec<ValidatedField>,

    /// Whether the schema declares this field's type non-nullable. Drives the
    /// denial shape of ownership-based authorization.
    pub non_null: bool,
}

impl ValidatedField {
    pub fn output_name(&self) -> String {
        self.alias.as_ref().unwrap_or(&self.name).to_string()
    }
}
