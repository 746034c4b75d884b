//! Remote-display presentation lifecycle.
//!
//! Keeps a presentation alive on a remote display and hands its rendering
//! surface to an external renderer:
//!
//! ```text
//! PresentationManager
//!   ├─> PresentationHost (window toolkit: show/dismiss on the display)
//!   ├─> display::select_config (surface format negotiation)
//!   └─> SurfaceSink (publication to the external renderer)
//! ```
//!
//! Both traits are host seams: the window toolkit and the surface
//! transport belong to the embedding host. Tests use in-memory
//! implementations.

pub mod manager;
pub mod surface;

use thiserror::Error;

pub use manager::PresentationManager;
pub use surface::{SurfaceDescriptor, SurfacePhase, SurfaceTracker};

use crate::display::SelectionError;

/// Identity and mode of a remote display offered by the casting session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDisplay {
    /// Display identifier assigned by the session
    pub id: u64,
    /// Human-readable display name
    pub name: String,
    /// Display mode width in pixels
    pub width: u32,
    /// Display mode height in pixels
    pub height: u32,
}

/// Failure of presentation setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    /// The display was removed between discovery and show
    #[error("display {0} is no longer valid")]
    InvalidDisplay(String),

    /// Selecting a rendering configuration for the surface failed
    #[error("rendering configuration selection failed: {0}")]
    Selection(#[from] SelectionError),
}

/// Window-toolkit integration that shows presentations on remote displays.
///
/// Implemented by embedding hosts; the manager drives it with strict
/// at-most-one-presentation semantics.
pub trait PresentationHost {
    /// Show a presentation on `display`.
    ///
    /// Fails with [`PresentationError::InvalidDisplay`] when the display
    /// has been removed since it was offered.
    fn show(&mut self, display: &RemoteDisplay) -> Result<(), PresentationError>;

    /// Dismiss the currently shown presentation. Must tolerate being
    /// called when nothing is shown.
    fn dismiss(&mut self);
}

/// Consumer of the published rendering surface.
///
/// Transport to the external renderer (and retraction on teardown) is
/// owned by the host; the manager guarantees publish/retract pairing.
pub trait SurfaceSink {
    /// A surface is ready for the renderer.
    fn publish(&mut self, surface: &SurfaceDescriptor);

    /// The previously published surface is no longer valid.
    fn retract(&mut self);
}
