//! Rendering surface lifecycle.
//!
//! The presentation shows placeholder content until the external renderer
//! delivers its first frame into the published surface, and falls back to
//! the placeholder when the backing texture is lost. The texture itself is
//! owned by the host toolkit; this layer only tracks the state and builds
//! the descriptor handed to the renderer.

use serde::Serialize;

use crate::display::ConfigSummary;

/// Descriptor of the rendering surface handed to the external renderer.
///
/// Carries the fixed buffer size applied at publication time and the
/// display configuration selected for the surface. Transport to the
/// renderer is owned by the host (see [`SurfaceSink`](super::SurfaceSink)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurfaceDescriptor {
    /// Buffer width in pixels
    pub width: u32,
    /// Buffer height in pixels
    pub height: u32,
    /// Selected display configuration
    pub config: ConfigSummary,
    /// Whether the configuration is multisampled
    pub multisampled: bool,
}

/// Lifecycle phase of the presentation's rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfacePhase {
    /// Backing texture not yet available; placeholder shown
    #[default]
    Waiting,
    /// Surface published to the renderer, no frame delivered yet
    Published,
    /// Renderer frames arriving; live content shown
    Live,
    /// Backing texture lost; placeholder shown again
    Lost,
}

/// Tracks the surface phase and the placeholder/live visibility that
/// follows from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceTracker {
    phase: SurfacePhase,
}

impl SurfaceTracker {
    /// New tracker in the waiting phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// The surface was published to the renderer.
    pub fn published(&mut self) {
        self.phase = SurfacePhase::Published;
    }

    /// A frame was rendered into the surface. Returns true when this
    /// flipped the presentation from placeholder to live content.
    pub fn updated(&mut self) -> bool {
        let was_placeholder = self.placeholder_visible();
        self.phase = SurfacePhase::Live;
        was_placeholder
    }

    /// The backing texture was destroyed. Returns true when live content
    /// was being shown. The texture is not released by this layer.
    pub fn destroyed(&mut self) -> bool {
        let was_live = self.phase == SurfacePhase::Live;
        self.phase = SurfacePhase::Lost;
        was_live
    }

    /// Whether the placeholder content is currently shown.
    pub fn placeholder_visible(&self) -> bool {
        self.phase != SurfacePhase::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_shown_until_first_frame() {
        let mut tracker = SurfaceTracker::new();
        assert!(tracker.placeholder_visible());

        tracker.published();
        assert!(tracker.placeholder_visible());

        assert!(tracker.updated());
        assert!(!tracker.placeholder_visible());
        assert_eq!(tracker.phase(), SurfacePhase::Live);
    }

    #[test]
    fn test_destroyed_restores_placeholder() {
        let mut tracker = SurfaceTracker::new();
        tracker.published();
        tracker.updated();

        assert!(tracker.destroyed());
        assert!(tracker.placeholder_visible());
        assert_eq!(tracker.phase(), SurfacePhase::Lost);
    }

    #[test]
    fn test_repeated_updates_flip_visibility_once() {
        let mut tracker = SurfaceTracker::new();
        tracker.published();

        assert!(tracker.updated());
        assert!(!tracker.updated());
    }

    #[test]
    fn test_destroy_before_live_reports_no_change() {
        let mut tracker = SurfaceTracker::new();
        tracker.published();

        assert!(!tracker.destroyed());
        assert!(tracker.placeholder_visible());
    }
}
