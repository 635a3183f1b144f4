// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;

use common::context::RequestContext;
use common::value::Val;

use crate::validation::field::ValidatedField;
use crate::ResolutionError;

/// The base resolver a directive chain bottoms out in: given the
/// already-resolved field and its parent value, produce the field's value.
#[async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve_field<'a>(
        &'a self,
        field: &'a ValidatedField,
        parent: Option<&'a Val>,
        request_context: &'a RequestContext,
    ) -> Result<Val, ResolutionError>;
}
