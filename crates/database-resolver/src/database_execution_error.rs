// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use lumen_sql::DataAccessError;

/// A dispatch failure. Surfaces as a field error; nothing at this layer is
/// retried.
#[derive(Error, Debug)]
pub enum DatabaseExecutionError {
    #[error("{0}")]
    Generic(String),

    #[error("not found")]
    NotFound,

    /// The storage layer rejected a create; the violated constraint rides
    /// along as the source.
    #[error("invalid mutation input")]
    Validation(#[source] DataAccessError),

    #[error("unsupported query shape `{0}`")]
    Unsupported(&'static str),

    #[error(transparent)]
    Backend(#[from] DataAccessError),
}
