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

const DEFAULT_MESSAGE: &str = "unauthorized";

/// `@auth`: rejects the field outright when the request carries no
/// authenticated identity. The rest of the chain never runs. An optional
/// `msg` directive argument customizes the denial message.
pub struct AuthDirective;

#[async_trait]
impl Directive for AuthDirective {
    async fn resolve<'a>(
        &'a self,
        request_context: &'a RequestContext,
        _parent: Option<&'a Val>,
        _field: &'a ValidatedField,
        arguments: &'a DirectiveArguments,
        next: Continuation<'a>,
    ) -> Result<Val, ResolutionError> {
        if request_context.user_id().is_none() {
            let message = arguments
                .get("msg")
                .and_then(Val::as_str)
                .unwrap_or(DEFAULT_MESSAGE);
            return Err(ResolutionError::Unauthorized(message.to_owned()));
        }
        next.proceed(request_context).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::directive::{DirectiveChain, DirectiveDeclaration, DirectiveRegistry};
    use crate::test_support::RecordingResolver;

    fn chain(declaration: DirectiveDeclaration) -> (DirectiveChain, Arc<RecordingResolver>) {
        let mut registry = DirectiveRegistry::new();
        registry.register("auth", Arc::new(AuthDirective));
        let terminal = Arc::new(RecordingResolver::returning(Val::Bool(true)));
        let chain = registry.bind(&[declaration], terminal.clone()).unwrap();
        (chain, terminal)
    }

    #[tokio::test]
    async fn anonymous_request_never_reaches_the_continuation() {
        let (chain, terminal) = chain(DirectiveDeclaration::new("auth"));

        let err = chain
            .resolve(&ValidatedField::default(), None, &RequestContext::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ResolutionError::Unauthorized(msg) if msg == "unauthorized"));
        assert_eq!(terminal.invocations(), 0);
    }

    #[tokio::test]
    async fn directive_message_is_carried_in_the_denial() {
        let (chain, _) = chain(
            DirectiveDeclaration::new("auth")
                .with_argument("msg", Val::String("log in first".into())),
        );

        let err = chain
            .resolve(&ValidatedField::default(), None, &RequestContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ResolutionError::Unauthorized(msg) if msg == "log in first"));
    }

    #[tokio::test]
    async fn authenticated_request_passes_through() {
        let (chain, terminal) = chain(DirectiveDeclaration::new("auth"));

        let context = RequestContext::new();
        context.set_user_id(42);
        let result = chain
            .resolve(&ValidatedField::default(), None, &context)
            .await
            .unwrap();

        assert_eq!(result, Val::Bool(true));
        assert_eq!(terminal.invocations(), 1);
    }
}
