//! Query boundary toward the underlying display system.
//!
//! The selector consumes exactly three read-only operations: count the
//! candidates matching a specification, retrieve them, and read a single
//! attribute of one candidate. Live EGL backends and captured
//! [`DisplayProfile`](crate::display::profile::DisplayProfile) tables both
//! implement [`ConfigQuery`]; tests use profile-backed fixtures.

use thiserror::Error;

use crate::display::attribs::{AttribSpec, ConfigAttrib};

/// Error raised by the display system while servicing a config query.
///
/// Opaque to the selector: a failed query is terminal for the attempt,
/// with no retry and no fallback pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("display config query failed: {message}")]
pub struct QueryError {
    message: String,
}

impl QueryError {
    /// Wrap a backend failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Backend failure description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Read-only configuration queries against a display system.
///
/// Candidate handles are owned by the display system. The selector never
/// stores one beyond the selection call; callers receive the chosen handle
/// and hand it straight to surface creation.
pub trait ConfigQuery {
    /// Opaque candidate configuration handle.
    type Candidate: Clone;

    /// Number of candidates matching `spec`.
    ///
    /// Each entry of `spec` is a lower bound on the candidate's value for
    /// that attribute.
    fn config_count(&self, spec: &AttribSpec) -> Result<usize, QueryError>;

    /// Up to `max` candidates matching `spec`, in display-system order.
    ///
    /// The order is platform-defined and not guaranteed stable across
    /// systems; callers must not assume any ranking.
    fn configs(&self, spec: &AttribSpec, max: usize) -> Result<Vec<Self::Candidate>, QueryError>;

    /// Value of `attrib` for `candidate`, or `None` when the candidate
    /// does not report it.
    fn config_attrib(&self, candidate: &Self::Candidate, attrib: ConfigAttrib) -> Option<i32>;
}
