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

use crate::directive::{Continuation, Directive, DirectiveArguments};
use crate::validation::field::ValidatedField;
use crate::ResolutionError;

/// `@create` / `@update`: captures the field's full argument map as the
/// mutation payload. Whether the dispatcher inserts or updates is decided by
/// the field's operation selector, not here.
pub struct InputDirective;

#[async_trait]
impl Directive for InputDirective {
    async fn resolve<'a>(
        &'a self,
        request_context: &'a RequestContext,
        _parent: Option<&'a Val>,
        field: &'a ValidatedField,
        _arguments: &'a DirectiveArguments,
        next: Continuation<'a>,
    ) -> Result<Val, ResolutionError> {
        request_context.set_payload(field.arguments.clone());
        next.proceed(request_context).await
    }
}
