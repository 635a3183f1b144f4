// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationKind {
    #[default]
    Query,
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryShape {
    #[default]
    List,
    One,
    /// Accepted by the selector, but no dispatch behavior is defined; the
    /// dispatcher fails fast rather than falling through to `List`.
    Count,
    /// Same as [`QueryShape::Count`].
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationShape {
    #[default]
    Create,
    Update,
}

/// Chooses the one canonical data-access operation a field dispatches.
/// Exactly one of `query_shape`/`mutation_shape` is meaningful, selected by
/// `kind`; the other keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationSelector {
    pub kind: OperationKind,
    pub query_shape: QueryShape,
    pub mutation_shape: MutationShape,
}

impl OperationSelector {
    pub fn query(shape: QueryShape) -> Self {
        Self {
            kind: OperationKind::Query,
            query_shape: shape,
            ..Default::default()
        }
    }

    pub fn mutation(shape: MutationShape) -> Self {
        Self {
            kind: OperationKind::Mutation,
            mutation_shape: shape,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_query_list_and_mutation_create() {
        let selector = OperationSelector::default();
        assert_eq!(selector.kind, OperationKind::Query);
        assert_eq!(selector.query_shape, QueryShape::List);
        assert_eq!(selector.mutation_shape, MutationShape::Create);
    }
}
