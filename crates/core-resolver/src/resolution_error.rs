// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

/// An error raised while running a field's directive chain. Aborts only the
/// current field's resolution; sibling fields are unaffected.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("cannot resolve key/value for field `{0}`")]
    KeyValue(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("no directive registered for `{0}`")]
    UnknownDirective(String),

    #[error("invalid `{argument}` argument on field `{field}`: expected {expected}")]
    InvalidArgument {
        field: String,
        argument: String,
        expected: &'static str,
    },

    #[error("{0}")]
    Delegate(#[from] Box<dyn std::error::Error + Send + Sync>),
}
