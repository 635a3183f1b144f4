// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{DataAccessError, DataBackend, Filter, Limit, Offset, TargetHandle};

/// In-memory [`DataBackend`] used by tests and local scaffolding.
///
/// Each defined target holds a flat list of object rows and the name of its
/// key attribute. Only equality clauses of the form `"<column> = ?"` are
/// understood, which is the only clause shape the built-in directives emit.
#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<HashMap<String, MemoryTable>>,
}

struct MemoryTable {
    key: String,
    rows: Vec<Map<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target with the given key attribute.
    pub fn define(&self, target: &str, key: &str) {
        self.tables.lock().unwrap().insert(
            target.to_owned(),
            MemoryTable {
                key: key.to_owned(),
                rows: vec![],
            },
        );
    }

    /// Bulk-load object rows into a defined target, bypassing constraint
    /// checks.
    pub fn seed(&self, target: &str, rows: Vec<Value>) -> Result<(), DataAccessError> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .get_mut(target)
            .ok_or_else(|| DataAccessError::UnknownTarget(target.to_owned()))?;
        for row in rows {
            match row {
                Value::Object(row) => table.rows.push(row),
                other => {
                    return Err(DataAccessError::Delegate(
                        format!("cannot seed non-object row: {other}").into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Column name of an equality clause, or an error for any other shape.
fn clause_column(clause: &str) -> Result<&str, DataAccessError> {
    clause
        .strip_suffix(" = ?")
        .filter(|column| !column.is_empty())
        .ok_or_else(|| DataAccessError::UnsupportedClause(clause.to_owned()))
}

/// Equality across numeric representations: a filter value deserialized as
/// `1.0` must match a stored `1`.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => match (left.as_f64(), right.as_f64()) {
            (Some(left), Some(right)) => left == right,
            _ => left == right,
        },
        _ => left == right,
    }
}

fn matches(row: &Map<String, Value>, filters: &[Filter]) -> Result<bool, DataAccessError> {
    for filter in filters {
        let column = clause_column(&filter.clause)?;
        let matched = row
            .get(column)
            .is_some_and(|stored| values_equal(stored, &filter.value));
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

#[async_trait]
impl DataBackend for MemoryBackend {
    async fn fetch_many(
        &self,
        target: &TargetHandle,
        filters: &[Filter],
        limit: Option<Limit>,
        offset: Option<Offset>,
    ) -> Result<Vec<Value>, DataAccessError> {
        let tables = self.tables.lock().unwrap();
        let table = tables
            .get(target.name())
            .ok_or_else(|| DataAccessError::UnknownTarget(target.to_string()))?;

        let mut selected = vec![];
        for row in &table.rows {
            if matches(row, filters)? {
                selected.push(Value::Object(row.clone()));
            }
        }

        let offset = offset.map(|Offset(o)| o.max(0) as usize).unwrap_or(0);
        let limit = limit.map(|Limit(l)| l.max(0) as usize).unwrap_or(usize::MAX);
        debug!(
            entity = %target,
            total = selected.len(),
            offset,
            "fetching rows"
        );

        Ok(selected.into_iter().skip(offset).take(limit).collect())
    }

    async fn fetch_first(
        &self,
        target: &TargetHandle,
        filters: &[Filter],
    ) -> Result<Option<Value>, DataAccessError> {
        let tables = self.tables.lock().unwrap();
        let table = tables
            .get(target.name())
            .ok_or_else(|| DataAccessError::UnknownTarget(target.to_string()))?;

        for row in &table.rows {
            if matches(row, filters)? {
                return Ok(Some(Value::Object(row.clone())));
            }
        }
        Ok(None)
    }

    async fn insert(
        &self,
        target: &TargetHandle,
        payload: &IndexMap<String, Value>,
    ) -> Result<Value, DataAccessError> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .get_mut(target.name())
            .ok_or_else(|| DataAccessError::UnknownTarget(target.to_string()))?;

        let key_value = payload.get(&table.key).filter(|v| !v.is_null()).ok_or(
            DataAccessError::ConstraintViolation {
                constraint: format!("{}_{}_not_null", target.name(), table.key),
            },
        )?;

        let duplicate = table
            .rows
            .iter()
            .any(|row| row.get(&table.key).is_some_and(|v| values_equal(v, key_value)));
        if duplicate {
            return Err(DataAccessError::ConstraintViolation {
                constraint: format!("{}_{}_key", target.name(), table.key),
            });
        }

        let row: Map<String, Value> = payload
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        table.rows.push(row.clone());
        Ok(Value::Object(row))
    }

    async fn update(
        &self,
        target: &TargetHandle,
        payload: &IndexMap<String, Value>,
    ) -> Result<Option<Value>, DataAccessError> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .get_mut(target.name())
            .ok_or_else(|| DataAccessError::UnknownTarget(target.to_string()))?;

        // A payload without the key attribute cannot locate a row; the caller
        // reports that as a missing target entity.
        let Some(key_value) = payload.get(&table.key) else {
            return Ok(None);
        };

        let key = table.key.clone();
        for row in &mut table.rows {
            if row.get(&key).is_some_and(|v| values_equal(v, key_value)) {
                for (k, v) in payload {
                    row.insert(k.clone(), v.clone());
                }
                return Ok(Some(Value::Object(row.clone())));
            }
        }
        Ok(None)
    }
}
