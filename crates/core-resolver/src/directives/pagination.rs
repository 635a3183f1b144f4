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

use super::field_key_value;
use crate::directive::{Continuation, Directive, DirectiveArguments};
use crate::validation::field::ValidatedField;
use crate::ResolutionError;

/// The pagination half a directive contributes. `page` and `size` are
/// declared independently (typically on two arguments of the same field) and
/// merge commutatively in the request context.
fn int_argument(field: &ValidatedField) -> Result<i64, ResolutionError> {
    let (_, value) = field_key_value(field)?;
    match value {
        Val::Number(n) => n.as_i64().ok_or(ResolutionError::InvalidArgument {
            field: field.name.clone(),
            argument: field.name.clone(),
            expected: "Int",
        }),
        _ => Err(ResolutionError::InvalidArgument {
            field: field.name.clone(),
            argument: field.name.clone(),
            expected: "Int",
        }),
    }
}

/// `@page`: records the 1-based page number.
pub struct PageDirective;

#[async_trait]
impl Directive for PageDirective {
    async fn resolve<'a>(
        &'a self,
        request_context: &'a RequestContext,
        _parent: Option<&'a Val>,
        field: &'a ValidatedField,
        _arguments: &'a DirectiveArguments,
        next: Continuation<'a>,
    ) -> Result<Val, ResolutionError> {
        let page = int_argument(field)?;
        request_context.set_pagination(Some(page), None);
        next.proceed(request_context).await
    }
}

/// `@size`: records the page size; zero means unbounded.
pub struct SizeDirective;

#[async_trait]
impl Directive for SizeDirective {
    async fn resolve<'a>(
        &'a self,
        request_context: &'a RequestContext,
        _parent: Option<&'a Val>,
        field: &'a ValidatedField,
        _arguments: &'a DirectiveArguments,
        next: Continuation<'a>,
    ) -> Result<Val, ResolutionError> {
        let size = int_argument(field)?;
        request_context.set_pagination(None, Some(size));
        next.proceed(request_context).await
    }
}
