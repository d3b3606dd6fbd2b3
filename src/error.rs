// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! The crate-wide error type.
//!
//! Mirrors the taxonomy of error kinds exposed at the external boundary,
//! minus the kinds that have no meaning once that boundary is a plain Rust
//! API rather than a C ABI (`NULL_POINTER`, `INVALID_HANDLE` have no
//! referent here — there are no raw pointers or opaque handles to be
//! invalid).

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DggsError>;

#[derive(Debug, Error)]
pub enum DggsError {
    /// An invariant was violated: an out-of-range coordinate, a negative
    /// accuracy, an empty cell set passed where one or more cells are
    /// required, an unsupported shape/geometry combination, a point that
    /// classifies to no icosahedron face, or a coordinate-conversion
    /// failure. Carries a human-readable message, matching the source's
    /// practice of forwarding the failing layer's message verbatim.
    #[error("{0}")]
    ModelError(String),

    /// A cell ID string exceeded the maximum serialised length.
    #[error("cell id exceeds maximum length of {max} characters: {actual}")]
    CellIdTooLong { actual: usize, max: usize },

    /// A parameter was individually well-typed but not acceptable given the
    /// surrounding call — e.g. `BoundingCell` invoked on cells that do not
    /// share a common face.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// An operation accepted by the external interface's enum but not
    /// implemented by this core (kept for API symmetry with the source
    /// taxonomy; this crate never constructs it).
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Reserved for parity with the source error taxonomy's
    /// `MEMORY_ALLOCATION_FAILURE` kind. Safe Rust has no allocation-failure
    /// recovery path comparable to the original's; retained so callers
    /// migrating from the C ABI recognise the full kind set.
    #[error("memory allocation failure")]
    MemoryAllocationFailure,

    /// Catch-all for failures that do not fit another kind.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl DggsError {
    pub fn model<S: Into<String>>(message: S) -> Self {
        DggsError::ModelError(message.into())
    }

    pub fn invalid_param<S: Into<String>>(message: S) -> Self {
        DggsError::InvalidParam(message.into())
    }
}
