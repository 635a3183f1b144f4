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

/// `@eq`: appends an equality predicate for the field's argument value. The
/// predicate column defaults to the field's own name; a `key` directive
/// argument overrides it.
pub struct EqDirective;

#[async_trait]
impl Directive for EqDirective {
    async fn resolve<'a>(
        &'a self,
        request_context: &'a RequestContext,
        _parent: Option<&'a Val>,
        field: &'a ValidatedField,
        arguments: &'a DirectiveArguments,
        next: Continuation<'a>,
    ) -> Result<Val, ResolutionError> {
        let (key, value) = field_key_value(field)?;
        let key = match arguments.get("key") {
            Some(Val::String(key)) => key.as_str(),
            Some(_) => {
                return Err(ResolutionError::InvalidArgument {
                    field: field.name.clone(),
                    argument: "key".to_owned(),
                    expected: "String",
                });
            }
            None => key,
        };

        let value: serde_json::Value =
            value
                .clone()
                .try_into()
                .map_err(|_| ResolutionError::InvalidArgument {
                    field: field.name.clone(),
                    argument: field.name.clone(),
                    expected: "a bindable scalar",
                })?;
        request_context.add_filter(format!("{key} = ?"), value);

        next.proceed(request_context).await
    }
}
