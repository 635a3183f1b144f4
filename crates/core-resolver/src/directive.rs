// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;

use common::context::RequestContext;
use common::value::Val;

use crate::ResolutionError;
use crate::field_resolver::FieldResolver;
use crate::validation::field::ValidatedField;

/// Arguments declared on a directive in the schema, fixed at binding time.
pub type DirectiveArguments = IndexMap<String, Val>;

/// A named interceptor participating in a field's resolution chain.
///
/// An implementation must either call `next.proceed(..)`, optionally
/// transforming the value or error it returns, or return without it, which
/// aborts the remainder of the chain for this field. Directive instances are
/// shared across requests and hold no per-request state; anything mutable
/// lives in the [`RequestContext`].
#[async_trait]
pub trait Directive: Send + Sync {
    async fn resolve<'a>(
        &'a self,
        request_context: &'a RequestContext,
        parent: Option<&'a Val>,
        field: &'a ValidatedField,
        arguments: &'a DirectiveArguments,
        next: Continuation<'a>,
    ) -> Result<Val, ResolutionError>;
}

/// A directive name with its schema-declared arguments, as it appears on a
/// field definition, or on one of the field's arguments, in which case the
/// directive joins the field's chain but extracts values under the argument's
/// name.
#[derive(Debug, Clone)]
pub struct DirectiveDeclaration {
    pub name: String,
    /// The argument the directive is attached to, when declared on an
    /// argument rather than on the field itself.
    pub argument: Option<String>,
    pub arguments: DirectiveArguments,
}

impl DirectiveDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
            arguments: DirectiveArguments::new(),
        }
    }

    /// Attach the directive to one of the field's arguments; the directive
    /// then sees a field view named after that argument.
    pub fn on_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: Val) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }
}

struct BoundDirective {
    directive: Arc<dyn Directive>,
    argument: Option<String>,
    arguments: DirectiveArguments,
}

/// The not-yet-run suffix of a field's chain, ending in the terminal
/// resolver. Consumed by `proceed`, so a directive can run the rest of the
/// chain at most once.
pub struct Continuation<'a> {
    remaining: &'a [BoundDirective],
    /// Field views for argument-attached directives, parallel to
    /// `remaining`; `None` means the directive sees the field itself.
    views: &'a [Option<ValidatedField>],
    terminal: &'a dyn FieldResolver,
    field: &'a ValidatedField,
    parent: Option<&'a Val>,
}

impl<'a> Continuation<'a> {
    pub async fn proceed(
        self,
        request_context: &RequestContext,
    ) -> Result<Val, ResolutionError> {
        match (self.remaining.split_first(), self.views.split_first()) {
            (Some((bound, remaining)), Some((view, views))) => {
                bound
                    .directive
                    .resolve(
                        request_context,
                        self.parent,
                        view.as_ref().unwrap_or(self.field),
                        &bound.arguments,
                        Continuation {
                            remaining,
                            views,
                            ..self
                        },
                    )
                    .await
            }
            _ => {
                self.terminal
                    .resolve_field(self.field, self.parent, request_context)
                    .await
            }
        }
    }
}

/// One schema field's effective resolver: the declared directives in
/// declaration order, terminating in the field's base resolver. Built once
/// at schema-binding time and shared across requests.
pub struct DirectiveChain {
    directives: Vec<BoundDirective>,
    terminal: Arc<dyn FieldResolver>,
}

impl std::fmt::Debug for DirectiveChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveChain")
            .field("directives", &self.directives.len())
            .finish_non_exhaustive()
    }
}

impl DirectiveChain {
    pub async fn resolve(
        &self,
        field: &ValidatedField,
        parent: Option<&Val>,
        request_context: &RequestContext,
    ) -> Result<Val, ResolutionError> {
        let views: Vec<Option<ValidatedField>> = self
            .directives
            .iter()
            .map(|bound| {
                bound.argument.as_ref().map(|argument| ValidatedField {
                    alias: None,
                    name: argument.clone(),
                    arguments: field.arguments.clone(),
                    subfields: Vec::new(),
                    non_null: field.non_null,
                })
            })
            .collect();

        Continuation {
            remaining: &self.directives,
            views: &views,
            terminal: self.terminal.as_ref(),
            field,
            parent,
        }
        .proceed(request_context)
        .await
    }
}

/// Name-to-directive registry. Lookups happen once, at schema-binding time;
/// the resolution hot path never dispatches on strings.
#[derive(Default)]
pub struct DirectiveRegistry {
    directives: HashMap<String, Arc<dyn Directive>>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in directive under its schema name.
    pub fn with_builtins() -> Self {
        use crate::directives::*;

        let mut registry = Self::new();
        registry.register("eq", Arc::new(EqDirective));
        registry.register("page", Arc::new(PageDirective));
        registry.register("size", Arc::new(SizeDirective));
        // create and update share the payload-capturing directive; the
        // mutation shape is chosen by the field's terminal resolver
        let input = Arc::new(InputDirective);
        registry.register("create", input.clone());
        registry.register("update", input);
        registry.register("hidden", Arc::new(HiddenDirective));
        registry.register("auth", Arc::new(AuthDirective));
        registry.register("own", Arc::new(OwnDirective));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, directive: Arc<dyn Directive>) {
        self.directives.insert(name.into(), directive);
    }

    /// Resolve the directives declared on a field into its fixed chain.
    pub fn bind(
        &self,
        declarations: &[DirectiveDeclaration],
        terminal: Arc<dyn FieldResolver>,
    ) -> Result<DirectiveChain, ResolutionError> {
        let directives = declarations
            .iter()
            .map(|declaration| {
                let directive = self
                    .directives
                    .get(&declaration.name)
                    .ok_or_else(|| ResolutionError::UnknownDirective(declaration.name.clone()))?;
                Ok(BoundDirective {
                    directive: directive.clone(),
                    argument: declaration.argument.clone(),
                    arguments: declaration.arguments.clone(),
                })
            })
            .collect::<Result<Vec<_>, ResolutionError>>()?;

        Ok(DirectiveChain {
            directives,
            terminal,
        })
    }
}
