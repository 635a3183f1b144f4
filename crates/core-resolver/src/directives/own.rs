// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use tracing::error;

use common::context::RequestContext;
use common::value::{Val, ValNumber};

use crate::directive::{Continuation, Directive, DirectiveArguments};
use crate::validation::field::ValidatedField;
use crate::ResolutionError;

/// `@own(field: "...")`: field-level ownership authorization. The named
/// attribute on the *parent* object identifies the owning user; anyone else
/// sees a denial value instead of the field's result.
///
/// The denial value follows the schema's nullability contract: an empty
/// string for a non-nullable field, null otherwise. Denial is a value, never
/// an error.
pub struct OwnDirective;

fn denial(field: &ValidatedField) -> Val {
    if field.non_null {
        Val::String(String::new())
    } else {
        Val::Null
    }
}

/// Owner id from the parent attribute. Parent objects frequently pass
/// through a generic serialization step that turns integers into floats, so
/// floats are accepted and truncated.
fn coerce_owner_id(value: &ValNumber) -> Option<i64> {
    match value {
        ValNumber::I64(n) => Some(*n),
        ValNumber::U64(n) => i64::try_from(*n).ok(),
        ValNumber::F64(n) => Some(*n as i64),
    }
}

#[async_trait]
impl Directive for OwnDirective {
    async fn resolve<'a>(
        &'a self,
        request_context: &'a RequestContext,
        parent: Option<&'a Val>,
        field: &'a ValidatedField,
        arguments: &'a DirectiveArguments,
        next: Continuation<'a>,
    ) -> Result<Val, ResolutionError> {
        let Some(user_id) = request_context.user_id() else {
            return Ok(denial(field));
        };

        let result = next.proceed(request_context).await?;
        if result == Val::Null {
            return Ok(Val::Null);
        }

        let Some(attribute) = arguments.get("field").and_then(Val::as_str) else {
            return Err(ResolutionError::InvalidArgument {
                field: field.name.clone(),
                argument: "field".to_owned(),
                expected: "the owner attribute name",
            });
        };

        let Some(owner) = parent.and_then(|parent| parent.get(attribute)) else {
            return Ok(denial(field));
        };

        match owner {
            Val::Number(n) => match coerce_owner_id(n) {
                Some(owner_id) if owner_id == user_id => Ok(result),
                _ => Ok(denial(field)),
            },
            other => {
                error!(
                    field = %field.name,
                    attribute,
                    "invalid owner attribute type: expected a numeric id, got {other}"
                );
                Ok(denial(field))
            }
        }
    }
}
