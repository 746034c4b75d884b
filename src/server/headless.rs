//! Headless host seams.
//!
//! Stand-ins for the window toolkit and the surface transport when the
//! server runs without either (replay mode, diagnostics). They log every
//! transition instead of touching a real display.

use tracing::info;

use crate::presentation::{
    PresentationError, PresentationHost, RemoteDisplay, SurfaceDescriptor, SurfaceSink,
};

/// Presentation host that always succeeds and only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessHost;

impl PresentationHost for HeadlessHost {
    fn show(&mut self, display: &RemoteDisplay) -> Result<(), PresentationError> {
        let dpy = display;
        info!(
            display = %dpy.name,
            width = dpy.width,
            height = dpy.height,
            "showing presentation (headless)"
        );
        Ok(())
    }

    fn dismiss(&mut self) {
        info!("dismissing presentation (headless)");
    }
}

/// Surface sink that logs publications instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessSink;

impl SurfaceSink for HeadlessSink {
    fn publish(&mut self, surface: &SurfaceDescriptor) {
        info!(
            width = surface.width,
            height = surface.height,
            red = surface.config.red,
            green = surface.config.green,
            blue = surface.config.blue,
            alpha = surface.config.alpha,
            depth = surface.config.depth,
            stencil = surface.config.stencil,
            multisampled = surface.multisampled,
            "surface published (headless)"
        );
    }

    fn retract(&mut self) {
        info!("surface retracted (headless)");
    }
}
