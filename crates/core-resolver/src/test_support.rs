// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use common::context::RequestContext;
use common::value::Val;

use crate::ResolutionError;
use crate::field_resolver::FieldResolver;
use crate::validation::field::ValidatedField;

/// Terminal resolver that returns a fixed value and counts how often the
/// chain actually reached it.
pub struct RecordingResolver {
    value: Val,
    invocations: AtomicUsize,
}

impl RecordingResolver {
    pub fn returning(value: Val) -> Self {
        Self {
            value,
            invocations: AtomicUsize::new(0),
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FieldResolver for RecordingResolver {
    async fn resolve_field<'a>(
        &'a self,
        _field: &'a ValidatedField,
        _parent: Option<&'a Val>,
        _request_context: &'a RequestContext,
    ) -> Result<Val, ResolutionError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.clone())
    }
}
