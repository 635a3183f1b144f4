// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The directive-driven resolution engine.
//!
//! Schema fields carry declared directives. At schema-binding time the
//! [`DirectiveRegistry`] resolves the declared names into a fixed, ordered
//! [`DirectiveChain`] per field, terminating in the field's base
//! [`FieldResolver`]. At request time the chain runs in declaration order;
//! each directive may extend the request's constraint accumulator, abort the
//! chain, or post-process the result flowing back up.

mod directive;
pub mod directives;
mod field_resolver;
mod resolution_error;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use directive::{
    Continuation, Directive, DirectiveArguments, DirectiveChain, DirectiveDeclaration,
    DirectiveRegistry,
};
pub use field_resolver::FieldResolver;
pub use resolution_error::ResolutionError;
