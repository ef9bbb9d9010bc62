/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Error taxonomy for the store: parsing, loading and execution failures.

use thiserror::Error;

/// Every fallible outcome the store can surface to a caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A resource literal was not wrapped in `<...>` or `"..."`.
    #[error("malformed resource {name:?}: must be enclosed in <> or \"\"")]
    MalformedResource { name: String },

    /// N-Triples input was not a multiple of four whitespace-separated
    /// tokens, or a triple was missing its `.` terminator.
    #[error("malformed N-Triples input: {reason}")]
    MalformedTriples { reason: String },

    /// A BGP query string failed to parse.
    #[error("malformed query: {reason}")]
    MalformedQuery { reason: String },

    /// `decode` was called with an ID that was never issued by `encode`.
    #[error("unknown resource id {id}")]
    UnknownResource { id: u32 },

    /// The executor reached a leaf solution missing a projected variable.
    /// Indicates a planner or parser bug; never triggered by well-formed
    /// queries (a projection referencing a variable absent from every
    /// pattern is rejected at parse time as `MalformedQuery` instead).
    #[error("projected variable ?{variable} is unbound at the leaf")]
    UnboundProjection { variable: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
