//! Presentation lifecycle management.
//!
//! At most one presentation is active at a time. Presenting on a new
//! display dismisses any existing presentation first; dismissing with
//! nothing active is a no-op. A show failure (the display was removed
//! between discovery and show) tears the half-created presentation back
//! down and leaves the manager with no active presentation.

use tracing::{debug, error, info, warn};

use crate::display::{select_config, summarize, ConfigQuery, ConfigRequest};
use crate::presentation::surface::{SurfaceDescriptor, SurfaceTracker};
use crate::presentation::{PresentationError, PresentationHost, RemoteDisplay, SurfaceSink};

/// Owns the single active presentation and its surface flow.
pub struct PresentationManager<H, S> {
    host: H,
    sink: S,
    request: ConfigRequest,
    buffer_size: (u32, u32),
    active: Option<ActivePresentation>,
}

struct ActivePresentation {
    display: RemoteDisplay,
    tracker: SurfaceTracker,
    published: bool,
}

impl<H: PresentationHost, S: SurfaceSink> PresentationManager<H, S> {
    /// Create a manager with the rendering request and the fixed buffer
    /// size applied to published surfaces.
    pub fn new(host: H, sink: S, request: ConfigRequest, buffer_size: (u32, u32)) -> Self {
        Self {
            host,
            sink,
            request,
            buffer_size,
            active: None,
        }
    }

    /// Whether a presentation is currently shown.
    pub fn is_presenting(&self) -> bool {
        self.active.is_some()
    }

    /// The display currently presented on, if any.
    pub fn current_display(&self) -> Option<&RemoteDisplay> {
        self.active.as_ref().map(|a| &a.display)
    }

    /// Whether the active presentation is showing placeholder content.
    /// `None` when nothing is presented.
    pub fn placeholder_visible(&self) -> Option<bool> {
        self.active.as_ref().map(|a| a.tracker.placeholder_visible())
    }

    /// Show a presentation on `display`, replacing any active one.
    pub fn present(&mut self, display: RemoteDisplay) -> Result<(), PresentationError> {
        self.dismiss();

        match self.host.show(&display) {
            Ok(()) => {
                let dpy = &display;
                info!(display = %dpy.name, "presentation shown");
                self.active = Some(ActivePresentation {
                    display,
                    tracker: SurfaceTracker::new(),
                    published: false,
                });
                Ok(())
            }
            Err(e) => {
                let dpy = &display;
                error!(display = %dpy.name, "unable to show presentation, display was removed");
                self.host.dismiss();
                Err(e)
            }
        }
    }

    /// Dismiss the active presentation, retracting any published surface.
    /// No-op when nothing is presented.
    pub fn dismiss(&mut self) {
        if let Some(active) = self.active.take() {
            if active.published {
                self.sink.retract();
            }
            self.host.dismiss();
            info!(display = %active.display.name, "presentation dismissed");
        }
    }

    /// The presentation's backing texture became available.
    ///
    /// Selects the display configuration for the surface, applies the
    /// fixed buffer size, and publishes the descriptor to the sink. On
    /// selection failure the presentation stays up showing placeholder
    /// content and the error propagates for the host to surface.
    pub fn surface_available<D: ConfigQuery>(
        &mut self,
        display_configs: &D,
        texture_width: u32,
        texture_height: u32,
    ) -> Result<(), PresentationError> {
        let Some(active) = self.active.as_mut() else {
            warn!("surface became available with no active presentation");
            return Ok(());
        };

        debug!(
            texture_width,
            texture_height, "surface texture available, selecting display config"
        );

        let selection = select_config(&self.request, display_configs)?;
        let config = summarize(display_configs, selection.config());

        // The published buffer uses the configured fixed size, not the
        // texture's current dimensions.
        let descriptor = SurfaceDescriptor {
            width: self.buffer_size.0,
            height: self.buffer_size.1,
            config,
            multisampled: selection.is_multisampled(),
        };

        self.sink.publish(&descriptor);
        active.tracker.published();
        active.published = true;

        info!(
            width = descriptor.width,
            height = descriptor.height,
            multisampled = descriptor.multisampled,
            "surface published to renderer"
        );
        Ok(())
    }

    /// A frame was rendered into the published surface.
    pub fn surface_updated(&mut self) {
        if let Some(active) = self.active.as_mut() {
            if active.tracker.updated() {
                debug!("first frame rendered, hiding placeholder");
            }
        }
    }

    /// The backing texture was lost.
    pub fn surface_destroyed(&mut self) {
        if let Some(active) = self.active.as_mut() {
            if active.tracker.destroyed() {
                debug!("surface lost, showing placeholder");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::profile::{CandidateConfig, DisplayProfile};
    use crate::display::SelectionError;

    #[derive(Default)]
    struct RecordingHost {
        shows: u32,
        dismisses: u32,
        fail_next_show: bool,
    }

    impl PresentationHost for RecordingHost {
        fn show(&mut self, display: &RemoteDisplay) -> Result<(), PresentationError> {
            if self.fail_next_show {
                return Err(PresentationError::InvalidDisplay(display.name.clone()));
            }
            self.shows += 1;
            Ok(())
        }

        fn dismiss(&mut self) {
            self.dismisses += 1;
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        published: Vec<SurfaceDescriptor>,
        retracts: u32,
    }

    impl SurfaceSink for RecordingSink {
        fn publish(&mut self, surface: &SurfaceDescriptor) {
            self.published.push(*surface);
        }

        fn retract(&mut self) {
            self.retracts += 1;
        }
    }

    fn tv(name: &str) -> RemoteDisplay {
        RemoteDisplay {
            id: 1,
            name: name.into(),
            width: 1920,
            height: 1080,
        }
    }

    fn eight_bit_profile() -> DisplayProfile {
        DisplayProfile {
            name: None,
            configs: vec![CandidateConfig {
                red: 8,
                green: 8,
                blue: 8,
                alpha: 8,
                depth: 16,
                stencil: 0,
                sample_buffers: 0,
                samples: 0,
            }],
        }
    }

    fn manager() -> PresentationManager<RecordingHost, RecordingSink> {
        PresentationManager::new(
            RecordingHost::default(),
            RecordingSink::default(),
            ConfigRequest::new(),
            (1024, 1024),
        )
    }

    #[test]
    fn test_present_replaces_active_presentation() {
        let mut mgr = manager();

        mgr.present(tv("tv-1")).unwrap();
        mgr.present(tv("tv-2")).unwrap();

        assert_eq!(mgr.host.shows, 2);
        assert_eq!(mgr.host.dismisses, 1);
        assert_eq!(mgr.current_display().unwrap().name, "tv-2");
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut mgr = manager();
        mgr.present(tv("tv")).unwrap();

        mgr.dismiss();
        mgr.dismiss();

        assert_eq!(mgr.host.dismisses, 1);
        assert!(!mgr.is_presenting());
    }

    #[test]
    fn test_show_failure_tears_down_and_leaves_nothing_active() {
        let mut mgr = manager();
        mgr.host.fail_next_show = true;

        let err = mgr.present(tv("gone")).unwrap_err();
        assert!(matches!(err, PresentationError::InvalidDisplay(_)));
        assert_eq!(mgr.host.dismisses, 1);
        assert!(!mgr.is_presenting());
    }

    #[test]
    fn test_surface_available_publishes_descriptor() {
        let mut mgr = manager();
        mgr.present(tv("tv")).unwrap();

        mgr.surface_available(&eight_bit_profile(), 800, 600).unwrap();

        assert_eq!(mgr.sink.published.len(), 1);
        let descriptor = &mgr.sink.published[0];
        // Fixed buffer size, not the texture dimensions.
        assert_eq!((descriptor.width, descriptor.height), (1024, 1024));
        assert_eq!(descriptor.config.red, 8);
        assert_eq!(mgr.placeholder_visible(), Some(true));
    }

    #[test]
    fn test_dismiss_retracts_published_surface() {
        let mut mgr = manager();
        mgr.present(tv("tv")).unwrap();
        mgr.surface_available(&eight_bit_profile(), 1024, 1024).unwrap();

        mgr.dismiss();
        assert_eq!(mgr.sink.retracts, 1);

        // Nothing published on the second (no-op) dismiss.
        mgr.dismiss();
        assert_eq!(mgr.sink.retracts, 1);
    }

    #[test]
    fn test_dismiss_without_publication_skips_retract() {
        let mut mgr = manager();
        mgr.present(tv("tv")).unwrap();

        mgr.dismiss();
        assert_eq!(mgr.sink.retracts, 0);
    }

    #[test]
    fn test_selection_failure_keeps_placeholder_up() {
        let mut mgr = manager();
        mgr.present(tv("tv")).unwrap();

        let empty = DisplayProfile::default();
        let err = mgr.surface_available(&empty, 1024, 1024).unwrap_err();

        assert!(matches!(
            err,
            PresentationError::Selection(SelectionError::NoMatchingConfig)
        ));
        assert!(mgr.is_presenting());
        assert_eq!(mgr.placeholder_visible(), Some(true));
        assert!(mgr.sink.published.is_empty());
    }

    #[test]
    fn test_update_and_destroy_toggle_placeholder() {
        let mut mgr = manager();
        mgr.present(tv("tv")).unwrap();
        mgr.surface_available(&eight_bit_profile(), 1024, 1024).unwrap();

        mgr.surface_updated();
        assert_eq!(mgr.placeholder_visible(), Some(false));

        mgr.surface_destroyed();
        assert_eq!(mgr.placeholder_visible(), Some(true));
    }

    #[test]
    fn test_surface_events_without_presentation_are_ignored() {
        let mut mgr = manager();

        mgr.surface_available(&eight_bit_profile(), 1024, 1024).unwrap();
        mgr.surface_updated();
        mgr.surface_destroyed();

        assert!(mgr.sink.published.is_empty());
        assert!(mgr.placeholder_visible().is_none());
    }
}
