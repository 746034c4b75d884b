//! Display configuration selection.
//!
//! Two-pass filter over the candidate configurations a display system
//! offers:
//!
//! 1. Query the candidate count with the full specification (anti-aliasing
//!    hints included when requested).
//! 2. Zero candidates → drop the anti-aliasing hints and query again.
//!    Anti-aliased rendering is preferred, but plain rendering beats
//!    failing outright.
//! 3. Retrieve the candidates and linear-scan them in returned order:
//!    skip any whose depth or stencil size is below the requested minimum,
//!    accept the first whose color sizes equal the request exactly.
//!
//! First match wins; there is no secondary scoring. Selection is a pure
//! function of the request and the candidate set, invoked once during
//! surface setup on whichever thread owns the rendering context.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::display::attribs::ConfigAttrib;
use crate::display::query::{ConfigQuery, QueryError};
use crate::display::request::ConfigRequest;

/// Terminal failure of configuration selection.
///
/// Both kinds abort the caller's surface setup; there is no retry beyond
/// the built-in anti-aliasing fallback pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The underlying query call itself failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Queries succeeded but returned zero usable candidates
    #[error("no display config matches the requested attributes")]
    NoMatchingConfig,
}

/// A successful selection.
#[derive(Debug, Clone)]
pub struct Selection<C> {
    config: C,
    multisampled: bool,
}

impl<C> Selection<C> {
    /// The chosen candidate handle.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Consume the selection, yielding the candidate handle.
    pub fn into_config(self) -> C {
        self.config
    }

    /// Whether the anti-aliasing hints survived (false after the
    /// graceful-degradation pass, or when never requested).
    pub fn is_multisampled(&self) -> bool {
        self.multisampled
    }
}

/// Attribute readback of a chosen candidate, for logs and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    /// Red channel bits
    pub red: i32,
    /// Green channel bits
    pub green: i32,
    /// Blue channel bits
    pub blue: i32,
    /// Alpha channel bits
    pub alpha: i32,
    /// Depth buffer bits
    pub depth: i32,
    /// Stencil buffer bits
    pub stencil: i32,
    /// Multisample buffer count
    pub sample_buffers: i32,
    /// Samples per pixel
    pub samples: i32,
}

/// Select the best-matching display configuration for `request`.
///
/// Returns the first candidate (in display-system order) whose depth and
/// stencil sizes meet the requested minimums and whose color sizes equal
/// the request exactly. Read-only against the display system; calling
/// again with an unchanged candidate set yields the same result.
pub fn select_config<D: ConfigQuery>(
    request: &ConfigRequest,
    display: &D,
) -> Result<Selection<D::Candidate>, SelectionError> {
    let mut spec = request.attrib_spec();
    let mut multisampled = request.multisampling().is_some();

    let mut count = display.config_count(&spec)?;

    if count == 0 && multisampled {
        debug!("no anti-aliased configs available, retrying without multisampling");
        spec = request.base_spec();
        multisampled = false;
        count = display.config_count(&spec)?;
    }

    if count == 0 {
        warn!("display system offered no configs for the requested attributes");
        return Err(SelectionError::NoMatchingConfig);
    }

    let candidates = display.configs(&spec, count)?;
    debug!(count = candidates.len(), multisampled, "scanning candidate configs");

    for candidate in candidates {
        // Absent attributes read as zero.
        let depth = attrib_or_zero(display, &candidate, ConfigAttrib::DepthSize);
        let stencil = attrib_or_zero(display, &candidate, ConfigAttrib::StencilSize);

        if depth < request.depth() || stencil < request.stencil() {
            continue;
        }

        let red = attrib_or_zero(display, &candidate, ConfigAttrib::RedSize);
        let green = attrib_or_zero(display, &candidate, ConfigAttrib::GreenSize);
        let blue = attrib_or_zero(display, &candidate, ConfigAttrib::BlueSize);
        let alpha = attrib_or_zero(display, &candidate, ConfigAttrib::AlphaSize);

        if red == request.red()
            && green == request.green()
            && blue == request.blue()
            && alpha == request.alpha()
        {
            return Ok(Selection {
                config: candidate,
                multisampled,
            });
        }
    }

    warn!("no candidate config satisfied the depth/stencil minimums and exact color sizes");
    Err(SelectionError::NoMatchingConfig)
}

/// Read back the full attribute set of a candidate for reporting.
pub fn summarize<D: ConfigQuery>(display: &D, candidate: &D::Candidate) -> ConfigSummary {
    ConfigSummary {
        red: attrib_or_zero(display, candidate, ConfigAttrib::RedSize),
        green: attrib_or_zero(display, candidate, ConfigAttrib::GreenSize),
        blue: attrib_or_zero(display, candidate, ConfigAttrib::BlueSize),
        alpha: attrib_or_zero(display, candidate, ConfigAttrib::AlphaSize),
        depth: attrib_or_zero(display, candidate, ConfigAttrib::DepthSize),
        stencil: attrib_or_zero(display, candidate, ConfigAttrib::StencilSize),
        sample_buffers: attrib_or_zero(display, candidate, ConfigAttrib::SampleBuffers),
        samples: attrib_or_zero(display, candidate, ConfigAttrib::Samples),
    }
}

fn attrib_or_zero<D: ConfigQuery>(
    display: &D,
    candidate: &D::Candidate,
    attrib: ConfigAttrib,
) -> i32 {
    display.config_attrib(candidate, attrib).unwrap_or(0)
}
