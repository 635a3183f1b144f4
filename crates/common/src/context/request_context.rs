// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Mutex;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

use lumen_sql::Filter;

use crate::value::Val;

/// Pagination constraint accumulated for the currently resolving field.
///
/// `size == 0` means "no limit applied, page ignored".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub size: i64,
}

/// The constraint set drained from a [`RequestContext`] immediately before
/// dispatch. Owning a snapshot means the dispatcher never observes another
/// field's half-accumulated state.
#[derive(Debug, Default)]
pub struct Constraints {
    pub filters: Vec<Filter>,
    pub pagination: Option<Pagination>,
    pub payload: Option<IndexMap<String, Val>>,
}

#[derive(Default)]
struct ContextState {
    user_id: Option<i64>,
    filters: Vec<Filter>,
    pagination: Option<Pagination>,
    payload: Option<IndexMap<String, Val>>,
}

/// Per-request constraint accumulator, created empty when a request arrives
/// and threaded by reference through every directive invoked while resolving
/// that request.
///
/// Sibling fields of one request may resolve concurrently, so the mutable
/// state sits behind a mutex; every operation is a short, CPU-bound critical
/// section.
#[derive(Default)]
pub struct RequestContext {
    state: Mutex<ContextState>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the authenticated identity. The first non-zero id wins; a
    /// conflicting second call is ignored. A zero id means anonymous and is
    /// never recorded.
    pub fn set_user_id(&self, user_id: i64) {
        if user_id == 0 {
            return;
        }
        let mut state = self.state.lock().unwrap();
        match state.user_id {
            None => state.user_id = Some(user_id),
            Some(existing) if existing == user_id => (),
            Some(existing) => {
                warn!(existing, rejected = user_id, "identity already set; ignoring");
            }
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.state.lock().unwrap().user_id
    }

    /// Append a conjunctive predicate. No deduplication; insertion order is
    /// preserved all the way to the data layer.
    pub fn add_filter(&self, clause: impl Into<String>, value: Value) {
        self.state
            .lock()
            .unwrap()
            .filters
            .push(Filter::new(clause, value));
    }

    /// Merge into the pagination pair. Setting only `page` preserves a
    /// previously set `size` and vice versa, so the page and size directives
    /// compose regardless of their declaration order.
    pub fn set_pagination(&self, page: Option<i64>, size: Option<i64>) {
        let mut state = self.state.lock().unwrap();
        let pagination = state
            .pagination
            .get_or_insert(Pagination { page: 1, size: 0 });
        if let Some(page) = page {
            pagination.page = page;
        }
        if let Some(size) = size {
            pagination.size = size;
        }
    }

    /// Set the mutation payload. Last writer wins; only one payload-building
    /// directive is expected per field.
    pub fn set_payload(&self, payload: IndexMap<String, Val>) {
        self.state.lock().unwrap().payload = Some(payload);
    }

    /// Drain the accumulated constraints for dispatch. The identity is not
    /// part of the snapshot and survives for later fields of the same
    /// request.
    pub fn take_constraints(&self) -> Constraints {
        let mut state = self.state.lock().unwrap();
        Constraints {
            filters: std::mem::take(&mut state.filters),
            pagination: state.pagination.take(),
            payload: state.payload.take(),
        }
    }
}
