// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! End-to-end resolution: JWT-authenticated request context, per-field
//! directive chains bound from the builtin registry, and dispatch against the
//! in-memory backend.
//!
//! The conceptual schema:
//!
//! ```graphql
//! type Query {
//!   concerts(venue_id: Int @eq, page: Int @page, size: Int @size): [Concert!]
//!   concert(id: Int @eq): Concert @auth
//! }
//! type Mutation {
//!   createConcert(id: Int, title: String, owner_id: Int): Concert @auth @create
//! }
//! type Concert {
//!   notes: String! @own(field: "owner_id")
//! }
//! ```

use std::sync::Arc;

use serde_json::json;

use common::context::{JwtAuthenticator, RequestContext};
use common::env::{Environment, MapEnvironment};
use common::env_const::LUMEN_JWT_SECRET;
use common::http::Headers;
use common::value::Val;
use core_resolver::validation::field::ValidatedField;
use core_resolver::validation::selection::SelectionNode;
use core_resolver::{
    Continuation, Directive, DirectiveArguments, DirectiveChain, DirectiveDeclaration,
    DirectiveRegistry, FieldResolver, ResolutionError,
};
use database_resolver::{DatabaseResolver, MutationShape, OperationSelector, QueryShape};
use lumen_sql::{DataBackend, MemoryBackend, TargetHandle};

fn seeded_backend() -> Arc<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend.define("concerts", "id");
    backend
        .seed(
            "concerts",
            vec![
                json!({"id": 1, "title": "Galactic", "venue_id": 10, "owner_id": 7, "notes": "warmup at 6"}),
                json!({"id": 2, "title": "Mesmerizing", "venue_id": 10, "owner_id": 9, "notes": "invoice pending"}),
                json!({"id": 3, "title": "Touring", "venue_id": 11, "owner_id": 7, "notes": ""}),
            ],
        )
        .unwrap();
    Arc::new(backend)
}

struct Schema {
    concerts: DirectiveChain,
    concert: DirectiveChain,
    create_concert: DirectiveChain,
    notes: DirectiveChain,
}

/// Leaf resolver for plain attribute fields: reads the attribute named like
/// the field off the parent object.
struct ParentAttributeResolver;

#[async_trait::async_trait]
impl FieldResolver for ParentAttributeResolver {
    async fn resolve_field<'a>(
        &'a self,
        field: &'a ValidatedField,
        parent: Option<&'a Val>,
        _request_context: &'a RequestContext,
    ) -> Result<Val, ResolutionError> {
        Ok(parent
            .and_then(|parent| parent.get(&field.name))
            .cloned()
            .unwrap_or(Val::Null))
    }
}

fn bind_schema(registry: &DirectiveRegistry, backend: Arc<MemoryBackend>) -> Schema {
    let target = TargetHandle::new("concerts");

    let concerts = registry
        .bind(
            &[
                DirectiveDeclaration::new("eq").on_argument("venue_id"),
                DirectiveDeclaration::new("page").on_argument("page"),
                DirectiveDeclaration::new("size").on_argument("size"),
            ],
            Arc::new(DatabaseResolver::new(
                backend.clone(),
                target.clone(),
                OperationSelector::query(QueryShape::List),
            )),
        )
        .unwrap();

    let concert = registry
        .bind(
            &[
                DirectiveDeclaration::new("auth"),
                DirectiveDeclaration::new("eq").on_argument("id"),
            ],
            Arc::new(DatabaseResolver::new(
                backend.clone(),
                target.clone(),
                OperationSelector::query(QueryShape::One),
            )),
        )
        .unwrap();

    let create_concert = registry
        .bind(
            &[
                DirectiveDeclaration::new("auth"),
                DirectiveDeclaration::new("create"),
            ],
            Arc::new(DatabaseResolver::new(
                backend,
                target,
                OperationSelector::mutation(MutationShape::Create),
            )),
        )
        .unwrap();

    let notes = registry
        .bind(
            &[DirectiveDeclaration::new("own")
                .with_argument("field", Val::String("owner_id".into()))],
            Arc::new(ParentAttributeResolver),
        )
        .unwrap();

    Schema {
        concerts,
        concert,
        create_concert,
        notes,
    }
}

/// A request context authenticated the way a real request would be: token
/// issued by the authenticator, carried in the Authorization header,
/// validated and populated before any directive runs.
fn authenticated_context(env: &dyn Environment, user_id: i64) -> RequestContext {
    let authenticator = JwtAuthenticator::from_env(env).expect("secret is configured");
    let token = authenticator.issue_token(user_id).unwrap();

    let mut headers = Headers::new();
    headers.insert("Authorization".into(), format!("Bearer {token}"));

    let context = RequestContext::new();
    authenticator.populate_identity(&headers, &context).unwrap();
    context
}

fn test_env() -> MapEnvironment {
    MapEnvironment::from([(LUMEN_JWT_SECRET, "integration-secret")])
}

#[tokio::test]
async fn filtered_paginated_list() {
    common::logging_tracing::init();

    let registry = DirectiveRegistry::with_builtins();
    let schema = bind_schema(&registry, seeded_backend());

    // concerts(venue_id: 10, page: 2, size: 1): the second page of one
    let field = ValidatedField {
        name: "concerts".to_owned(),
        arguments: [
            ("venue_id".to_owned(), Val::Number(10i64.into())),
            ("page".to_owned(), Val::Number(2i64.into())),
            ("size".to_owned(), Val::Number(1i64.into())),
        ]
        .into_iter()
        .collect(),
        ..Default::default()
    };

    let context = RequestContext::new();
    let result = schema
        .concerts
        .resolve(&field, None, &context)
        .await
        .unwrap();

    match result {
        Val::List(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(
                rows[0].get("title").and_then(Val::as_str),
                Some("Mesmerizing")
            );
        }
        other => panic!("expected a list, got {other}"),
    }
}

#[tokio::test]
async fn single_row_query_requires_authentication() {
    let registry = DirectiveRegistry::with_builtins();
    let schema = bind_schema(&registry, seeded_backend());

    let field = ValidatedField {
        name: "concert".to_owned(),
        arguments: [("id".to_owned(), Val::Number(2i64.into()))]
            .into_iter()
            .collect(),
        ..Default::default()
    };

    // anonymous: the auth directive aborts before any data access
    let err = schema
        .concert
        .resolve(&field, None, &RequestContext::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::Unauthorized(_)));

    // authenticated: resolves the row
    let context = authenticated_context(&test_env(), 7);
    let result = schema.concert.resolve(&field, None, &context).await.unwrap();
    assert_eq!(
        result.get("title").and_then(Val::as_str),
        Some("Mesmerizing")
    );
}

#[tokio::test]
async fn missing_row_surfaces_as_a_field_error() {
    let registry = DirectiveRegistry::with_builtins();
    let schema = bind_schema(&registry, seeded_backend());

    let field = ValidatedField {
        name: "concert".to_owned(),
        arguments: [("id".to_owned(), Val::Number(404i64.into()))]
            .into_iter()
            .collect(),
        ..Default::default()
    };

    let context = authenticated_context(&test_env(), 7);
    let err = schema
        .concert
        .resolve(&field, None, &context)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn create_mutation_round_trips() {
    let registry = DirectiveRegistry::with_builtins();
    let backend = seeded_backend();
    let schema = bind_schema(&registry, backend.clone());

    let field = ValidatedField {
        name: "createConcert".to_owned(),
        arguments: [
            ("id".to_owned(), Val::Number(4i64.into())),
            ("title".to_owned(), Val::String("Encore".into())),
            ("owner_id".to_owned(), Val::Number(7i64.into())),
        ]
        .into_iter()
        .collect(),
        ..Default::default()
    };

    let context = authenticated_context(&test_env(), 7);
    let created = schema
        .create_concert
        .resolve(&field, None, &context)
        .await
        .unwrap();
    assert_eq!(created.get("title").and_then(Val::as_str), Some("Encore"));

    let stored = backend
        .fetch_first(
            &TargetHandle::new("concerts"),
            &[lumen_sql::Filter::new("id = ?", json!(4))],
        )
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn ownership_gates_the_notes_field() {
    let registry = DirectiveRegistry::with_builtins();
    let schema = bind_schema(&registry, seeded_backend());

    let field = ValidatedField {
        name: "notes".to_owned(),
        non_null: true,
        ..Default::default()
    };
    let owned: Val = json!({"id": 1, "owner_id": 7, "notes": "warmup at 6"}).into();
    let foreign: Val = json!({"id": 2, "owner_id": 9, "notes": "invoice pending"}).into();

    let context = authenticated_context(&test_env(), 7);

    let visible = schema
        .notes
        .resolve(&field, Some(&owned), &context)
        .await
        .unwrap();
    assert_eq!(visible, Val::String("warmup at 6".into()));

    let denied = schema
        .notes
        .resolve(&field, Some(&foreign), &context)
        .await
        .unwrap();
    assert_eq!(denied, Val::String(String::new()));
}

#[tokio::test]
async fn sibling_field_failure_does_not_poison_the_request() {
    let registry = DirectiveRegistry::with_builtins();
    let schema = bind_schema(&registry, seeded_backend());

    let context = authenticated_context(&test_env(), 7);

    // first sibling fails: the eq directive cannot extract its value
    let broken = ValidatedField {
        name: "concert".to_owned(),
        ..Default::default()
    };
    let err = schema
        .concert
        .resolve(&broken, None, &context)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::KeyValue(_)));

    // the next sibling of the same request still resolves (size 0: unbounded)
    let field = ValidatedField {
        name: "concerts".to_owned(),
        arguments: [
            ("venue_id".to_owned(), Val::Number(11i64.into())),
            ("page".to_owned(), Val::Number(1i64.into())),
            ("size".to_owned(), Val::Number(0i64.into())),
        ]
        .into_iter()
        .collect(),
        ..Default::default()
    };
    let result = schema
        .concerts
        .resolve(&field, None, &context)
        .await
        .unwrap();
    match result {
        Val::List(rows) => assert_eq!(rows.len(), 1),
        other => panic!("expected a list, got {other}"),
    }
}

#[test]
fn selection_tree_guides_eager_loading() {
    // concerts { title venue { name } }
    let field = ValidatedField {
        name: "concerts".to_owned(),
        subfields: vec![
            ValidatedField {
                name: "title".to_owned(),
                ..Default::default()
            },
            ValidatedField {
                name: "venue".to_owned(),
                subfields: vec![ValidatedField {
                    name: "name".to_owned(),
                    ..Default::default()
                }],
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let tree = SelectionNode::collect(&field);
    assert!(tree.lookup(&["venue"]).is_some_and(|n| n.depth == 1));
    assert!(tree.lookup(&["venue", "name"]).is_some_and(|n| n.depth == 2));
    assert!(tree.lookup(&["owner"]).is_none());
}

/// Custom directives registered alongside the builtins participate in the
/// same chains.
#[tokio::test]
async fn custom_directives_compose_with_builtins() {
    struct TenantDirective;

    #[async_trait::async_trait]
    impl Directive for TenantDirective {
        async fn resolve<'a>(
            &'a self,
            request_context: &'a RequestContext,
            _parent: Option<&'a Val>,
            _field: &'a ValidatedField,
            arguments: &'a DirectiveArguments,
            next: Continuation<'a>,
        ) -> Result<Val, ResolutionError> {
            let venue = arguments
                .get("venue")
                .and_then(|v| match v {
                    Val::Number(n) => n.as_i64(),
                    _ => None,
                })
                .unwrap_or(0);
            request_context.add_filter("venue_id = ?", json!(venue));
            next.proceed(request_context).await
        }
    }

    let mut registry = DirectiveRegistry::with_builtins();
    registry.register("tenant", Arc::new(TenantDirective));

    let chain = registry
        .bind(
            &[DirectiveDeclaration::new("tenant")
                .with_argument("venue", Val::Number(10i64.into()))],
            Arc::new(DatabaseResolver::new(
                seeded_backend(),
                TargetHandle::new("concerts"),
                OperationSelector::default(),
            )),
        )
        .unwrap();

    let result = chain
        .resolve(&ValidatedField::default(), None, &RequestContext::new())
        .await
        .unwrap();
    match result {
        Val::List(rows) => assert_eq!(rows.len(), 2),
        other => panic!("expected a list, got {other}"),
    }
}
