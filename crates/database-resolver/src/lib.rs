// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The operation dispatcher: translates a finalized request context plus an
//! operation selector into exactly one data-access call.

mod database_execution_error;
mod operation;
mod resolver;

pub use database_execution_error::DatabaseExecutionError;
pub use operation::{MutationShape, OperationKind, OperationSelector, QueryShape};
pub use resolver::{resolve_operation, DatabaseResolver};
