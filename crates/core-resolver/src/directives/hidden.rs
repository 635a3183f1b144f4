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

/// `@hidden`: the field stays in the schema and its chain still runs, but
/// clients always receive null.
pub struct HiddenDirective;

#[async_trait]
impl Directive for HiddenDirective {
    async fn resolve<'a>(
        &'a self,
        request_context: &'a RequestContext,
        _parent: Option<&'a Val>,
        _field: &'a ValidatedField,
        _arguments: &'a DirectiveArguments,
        next: Continuation<'a>,
    ) -> Result<Val, ResolutionError> {
        let _ = next.proceed(request_context).await;
        Ok(Val::Null)
    }
}
