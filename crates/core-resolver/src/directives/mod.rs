// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The built-in directives: constraint builders (`eq`, `page`, `size`,
//! `create`/`update`), field hiding, and the two authorization directives.

mod auth;
mod filter;
mod hidden;
mod mutation;
mod own;
mod pagination;

pub use auth::AuthDirective;
pub use filter::EqDirective;
pub use hidden::HiddenDirective;
pub use mutation::InputDirective;
pub use own::OwnDirective;
pub use pagination::{PageDirective, SizeDirective};

use common::value::Val;

use crate::ResolutionError;
use crate::validation::field::ValidatedField;

/// The raw argument bound to the field under the field's own name, the
/// convention every constraint directive follows for its default key/value.
fn field_key_value(field: &ValidatedField) -> Result<(&str, &Val), ResolutionError> {
    field
        .arguments
        .get(field.name.as_str())
        .map(|value| (field.name.as_str(), value))
        .ok_or_else(|| ResolutionError::KeyValue(field.name.clone()))
}
