// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use common::context::{Constraints, RequestContext};
use common::value::Val;
use core_resolver::validation::field::ValidatedField;
use core_resolver::{FieldResolver, ResolutionError};
use lumen_sql::{DataAccessError, DataBackend, Limit, Offset, TargetHandle};

use crate::database_execution_error::DatabaseExecutionError;
use crate::operation::{MutationShape, OperationKind, OperationSelector, QueryShape};

/// Drain the request's accumulated constraints and execute exactly one
/// data-access call against `target`, chosen by `selector`.
///
/// Queries consume filters and pagination; mutations consume only the
/// payload. Every failure is returned for the hosting execution engine to
/// surface as a field error.
pub async fn resolve_operation(
    request_context: &RequestContext,
    target: &TargetHandle,
    selector: OperationSelector,
    backend: &dyn DataBackend,
) -> Result<Value, DatabaseExecutionError> {
    let constraints = request_context.take_constraints();
    debug!(entity = %target, ?selector, "dispatching data operation");

    match selector.kind {
        OperationKind::Query => resolve_query(constraints, target, selector, backend).await,
        OperationKind::Mutation => resolve_mutation(constraints, target, selector, backend).await,
    }
}

async fn resolve_query(
    constraints: Constraints,
    target: &TargetHandle,
    selector: OperationSelector,
    backend: &dyn DataBackend,
) -> Result<Value, DatabaseExecutionError> {
    let Constraints {
        filters,
        pagination,
        ..
    } = constraints;

    match selector.query_shape {
        QueryShape::List => {
            let (limit, offset) = match pagination {
                Some(pagination) if pagination.size > 0 => (
                    Some(Limit(pagination.size)),
                    Some(Offset((pagination.page - 1) * pagination.size)),
                ),
                _ => (None, None),
            };
            let rows = backend.fetch_many(target, &filters, limit, offset).await?;
            Ok(Value::Array(rows))
        }
        QueryShape::One => backend
            .fetch_first(target, &filters)
            .await?
            .ok_or(DatabaseExecutionError::NotFound),
        QueryShape::Count => Err(DatabaseExecutionError::Unsupported("count")),
        QueryShape::Sum => Err(DatabaseExecutionError::Unsupported("sum")),
    }
}

async fn resolve_mutation(
    constraints: Constraints,
    target: &TargetHandle,
    selector: OperationSelector,
    backend: &dyn DataBackend,
) -> Result<Value, DatabaseExecutionError> {
    let payload = constraints
        .payload
        .ok_or_else(|| DatabaseExecutionError::Generic("mutation payload is not set".to_owned()))?;
    let payload = payload
        .into_iter()
        .map(|(key, value)| {
            let value: Value = value.try_into().map_err(|_| {
                DatabaseExecutionError::Generic(format!("could not convert input value for `{key}`"))
            })?;
            Ok((key, value))
        })
        .collect::<Result<IndexMap<_, _>, DatabaseExecutionError>>()?;

    match selector.mutation_shape {
        MutationShape::Create => backend
            .insert(target, &payload)
            .await
            .map_err(reject_constraint),
        MutationShape::Update => backend
            .update(target, &payload)
            .await
            .map_err(reject_constraint)?
            .ok_or(DatabaseExecutionError::NotFound),
    }
}

fn reject_constraint(err: DataAccessError) -> DatabaseExecutionError {
    match err {
        DataAccessError::ConstraintViolation { .. } => DatabaseExecutionError::Validation(err),
        other => DatabaseExecutionError::Backend(other),
    }
}

/// The terminal resolver a schema field's directive chain bottoms out in,
/// fixed at schema-binding time: which backend, which target, which
/// operation.
pub struct DatabaseResolver {
    backend: Arc<dyn DataBackend>,
    target: TargetHandle,
    selector: OperationSelector,
}

impl DatabaseResolver {
    pub fn new(backend: Arc<dyn DataBackend>, target: TargetHandle, selector: OperationSelector) -> Self {
        Self {
            backend,
            target,
            selector,
        }
    }
}

#[async_trait]
impl FieldResolver for DatabaseResolver {
    async fn resolve_field<'a>(
        &'a self,
        _field: &'a ValidatedField,
        _parent: Option<&'a Val>,
        request_context: &'a RequestContext,
    ) -> Result<Val, ResolutionError> {
        let value = resolve_operation(
            request_context,
            &self.target,
            self.selector,
            self.backend.as_ref(),
        )
        .await
        .map_err(|err| {
            ResolutionError::Delegate(Box::new(err) as Box<dyn std::error::Error + Send + Sync>)
        })?;
        Ok(value.into())
    }
}
