// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The data-access seam consumed by the resolution engine.
//!
//! Defines the constraint fragments that accumulate during field resolution
//! ([`Filter`], [`Limit`], [`Offset`]), the opaque [`TargetHandle`] naming the
//! entity or collection an operation runs against, and the [`DataBackend`]
//! capability set the operation dispatcher drives. The engine never builds
//! SQL itself; a backend interprets the accumulated fragments however its
//! storage layer requires.

mod backend;
mod filter;
mod limit;
mod memory;
mod offset;

pub use backend::{DataAccessError, DataBackend, TargetHandle};
pub use filter::Filter;
pub use limit::Limit;
pub use memory::MemoryBackend;
pub use offset::Offset;
