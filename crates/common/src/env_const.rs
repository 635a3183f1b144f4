// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// Log filter, same conventions as `RUST_LOG`.
pub const LUMEN_LOG: &str = "LUMEN_LOG";

/// HMAC secret for JWT validation and issuance. Unset disables
/// authentication.
pub const LUMEN_JWT_SECRET: &str = "LUMEN_JWT_SECRET";
