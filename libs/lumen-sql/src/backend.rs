// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::{Filter, Limit, Offset};

/// Opaque name of the entity or collection an operation targets. The engine
/// only ever displays it and passes it through; a backend maps it to a table,
/// a collection, or whatever its storage calls the thing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetHandle {
    name: String,
}

impl TargetHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for TargetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Error, Debug)]
pub enum DataAccessError {
    /// The storage layer rejected a write (uniqueness, non-null, foreign
    /// key). The constraint name is surfaced to the caller.
    #[error("violates constraint `{constraint}`")]
    ConstraintViolation { constraint: String },

    #[error("unknown target `{0}`")]
    UnknownTarget(String),

    #[error("unsupported filter clause `{0}`")]
    UnsupportedClause(String),

    #[error("{0}")]
    Delegate(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// The capability set a storage layer exposes to the operation dispatcher.
///
/// Rows cross the boundary as `serde_json::Value` objects. Filters are
/// conjunctive and must be applied in slice order.
#[async_trait]
pub trait DataBackend: Send + Sync {
    /// Multi-row fetch with optional limit/offset.
    async fn fetch_many(
        &self,
        target: &TargetHandle,
        filters: &[Filter],
        limit: Option<Limit>,
        offset: Option<Offset>,
    ) -> Result<Vec<Value>, DataAccessError>;

    /// Single-row fetch. `None` when no row matches; the caller decides
    /// whether that is an error.
    async fn fetch_first(
        &self,
        target: &TargetHandle,
        filters: &[Filter],
    ) -> Result<Option<Value>, DataAccessError>;

    /// Insert a new row populated from `payload`, returning the stored row.
    async fn insert(
        &self,
        target: &TargetHandle,
        payload: &IndexMap<String, Value>,
    ) -> Result<Value, DataAccessError>;

    /// Partial update keyed by the target's key attribute carried in
    /// `payload`. `None` when no row matches the key.
    async fn update(
        &self,
        target: &TargetHandle,
        payload: &IndexMap<String, Value>,
    ) -> Result<Option<Value>, DataAccessError>;
}
