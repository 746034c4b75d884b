//! Presentation server.
//!
//! Orchestrates the presentation lifecycle against a stream of
//! remote-display events:
//!
//! ```text
//! PresentationServer
//!   ├─> DisplayEventSource (embedding host channel, or replay script)
//!   ├─> PresentationManager (show/dismiss, surface publication)
//!   └─> DisplayProfile (config table queried at surface setup)
//! ```
//!
//! # Threading model
//!
//! Single tokio task: events are handled strictly in arrival order, so the
//! at-most-one-presentation invariant needs no locking. Shutdown is a
//! `tokio::sync::broadcast` channel in the same shape the rest of the
//! stack uses.
//!
//! Session negotiation with the casting framework is the embedding host's
//! job; the server only consumes the resulting event stream.

pub mod headless;
pub mod replay;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::display::DisplayProfile;
use crate::presentation::{PresentationHost, PresentationManager, RemoteDisplay, SurfaceSink};

/// Remote-display and surface events delivered to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// The casting session granted a display to present on
    DisplayAvailable(RemoteDisplay),
    /// The remote display went away
    DisplayRemoved,
    /// The presentation's backing texture became ready
    SurfaceAvailable {
        /// Texture width in pixels
        width: u32,
        /// Texture height in pixels
        height: u32,
    },
    /// A frame was rendered into the published surface
    SurfaceUpdated,
    /// The backing texture was lost
    SurfaceDestroyed,
}

/// Source of display events.
///
/// Embedding hosts wrap their callback plumbing in this trait; the
/// bundled implementations are [`ChannelSource`] and
/// [`replay::ReplaySource`].
#[async_trait]
pub trait DisplayEventSource: Send {
    /// Next event, or `None` when the session has ended.
    async fn next_event(&mut self) -> Option<DisplayEvent>;
}

/// Event source backed by a tokio channel, for embedding hosts.
pub struct ChannelSource {
    rx: mpsc::Receiver<DisplayEvent>,
}

impl ChannelSource {
    /// Wrap a receiver whose sender side lives in the host's callbacks.
    pub fn new(rx: mpsc::Receiver<DisplayEvent>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl DisplayEventSource for ChannelSource {
    async fn next_event(&mut self) -> Option<DisplayEvent> {
        self.rx.recv().await
    }
}

/// Presentation server.
///
/// Consumes display events until the source ends or shutdown is
/// broadcast, then dismisses any active presentation.
pub struct PresentationServer<H, S> {
    manager: PresentationManager<H, S>,
    display_configs: DisplayProfile,
    shutdown_tx: broadcast::Sender<()>,
}

impl<H, S> PresentationServer<H, S>
where
    H: PresentationHost + Send,
    S: SurfaceSink + Send,
{
    /// Create a server from configuration plus the host seams.
    ///
    /// `display_configs` is the configuration table queried when a surface
    /// becomes available (a captured profile here; embedding hosts that
    /// can reach the live display system drive [`PresentationManager`]
    /// directly instead).
    pub fn new(config: &Config, host: H, sink: S, display_configs: DisplayProfile) -> Self {
        let manager = PresentationManager::new(
            host,
            sink,
            config.rendering.to_request(),
            (config.surface.width, config.surface.height),
        );
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            manager,
            display_configs,
            shutdown_tx,
        }
    }

    /// Sender half of the shutdown broadcast channel.
    pub fn shutdown_sender(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Run the event loop. Consumes self.
    pub async fn run(mut self, mut source: impl DisplayEventSource) -> Result<()> {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        info!("presentation server started");

        loop {
            tokio::select! {
                event = source.next_event() => {
                    match event {
                        Some(event) => self.handle_event(event),
                        None => {
                            info!("display event source ended");
                            break;
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("shutdown requested");
                    break;
                }
            }
        }

        // Leave no presentation behind on the remote display.
        self.manager.dismiss();
        info!("presentation server stopped");
        Ok(())
    }

    fn handle_event(&mut self, event: DisplayEvent) {
        debug!(?event, "display event");
        match event {
            DisplayEvent::DisplayAvailable(display) => {
                if let Err(e) = self.manager.present(display) {
                    error!("presentation setup failed: {e}");
                }
            }
            DisplayEvent::DisplayRemoved => self.manager.dismiss(),
            DisplayEvent::SurfaceAvailable { width, height } => {
                if let Err(e) = self
                    .manager
                    .surface_available(&self.display_configs, width, height)
                {
                    error!("rendering surface setup abandoned: {e}");
                }
            }
            DisplayEvent::SurfaceUpdated => self.manager.surface_updated(),
            DisplayEvent::SurfaceDestroyed => self.manager.surface_destroyed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::display::profile::CandidateConfig;
    use crate::presentation::{PresentationError, SurfaceDescriptor};

    #[derive(Clone, Default)]
    struct SharedHost {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl PresentationHost for SharedHost {
        fn show(&mut self, display: &RemoteDisplay) -> Result<(), PresentationError> {
            self.log.lock().unwrap().push(format!("show {}", display.name));
            Ok(())
        }

        fn dismiss(&mut self) {
            self.log.lock().unwrap().push("dismiss".into());
        }
    }

    #[derive(Clone, Default)]
    struct SharedSink {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl SurfaceSink for SharedSink {
        fn publish(&mut self, surface: &SurfaceDescriptor) {
            self.log
                .lock()
                .unwrap()
                .push(format!("publish {}x{}", surface.width, surface.height));
        }

        fn retract(&mut self) {
            self.log.lock().unwrap().push("retract".into());
        }
    }

    fn test_profile() -> DisplayProfile {
        DisplayProfile {
            name: Some("test".into()),
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

    fn tv() -> RemoteDisplay {
        RemoteDisplay {
            id: 7,
            name: "tv".into(),
            width: 1920,
            height: 1080,
        }
    }

    #[tokio::test]
    async fn test_run_drives_full_presentation_flow() {
        let host = SharedHost::default();
        let sink = SharedSink::default();
        let host_log = host.log.clone();
        let sink_log = sink.log.clone();

        let config = Config::default_config();
        let server = PresentationServer::new(&config, host, sink, test_profile());

        let (tx, rx) = mpsc::channel(8);
        tx.send(DisplayEvent::DisplayAvailable(tv())).await.unwrap();
        tx.send(DisplayEvent::SurfaceAvailable {
            width: 1024,
            height: 1024,
        })
        .await
        .unwrap();
        tx.send(DisplayEvent::SurfaceUpdated).await.unwrap();
        tx.send(DisplayEvent::DisplayRemoved).await.unwrap();
        drop(tx);

        server.run(ChannelSource::new(rx)).await.unwrap();

        assert_eq!(
            *host_log.lock().unwrap(),
            vec!["show tv".to_string(), "dismiss".to_string()]
        );
        assert_eq!(
            *sink_log.lock().unwrap(),
            vec!["publish 1024x1024".to_string(), "retract".to_string()]
        );
    }

    #[tokio::test]
    async fn test_shutdown_dismisses_active_presentation() {
        let host = SharedHost::default();
        let host_log = host.log.clone();

        let config = Config::default_config();
        let server =
            PresentationServer::new(&config, host, SharedSink::default(), test_profile());
        let shutdown = server.shutdown_sender();

        // Keep the sender alive so the source never ends on its own; only
        // the shutdown broadcast can stop this run.
        let (tx, rx) = mpsc::channel(8);
        tx.send(DisplayEvent::DisplayAvailable(tv())).await.unwrap();

        let handle = tokio::spawn(server.run(ChannelSource::new(rx)));
        // Let the server consume the event before signalling shutdown.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        shutdown.send(()).unwrap();
        handle.await.unwrap().unwrap();
        drop(tx);

        let log = host_log.lock().unwrap();
        assert_eq!(*log, vec!["show tv".to_string(), "dismiss".to_string()]);
    }

    #[tokio::test]
    async fn test_selection_failure_leaves_presentation_up() {
        let host = SharedHost::default();
        let sink = SharedSink::default();
        let host_log = host.log.clone();
        let sink_log = sink.log.clone();

        let config = Config::default_config();
        // Empty profile: surface setup must fail, presentation stays up.
        let server =
            PresentationServer::new(&config, host, sink, DisplayProfile::default());

        let (tx, rx) = mpsc::channel(8);
        tx.send(DisplayEvent::DisplayAvailable(tv())).await.unwrap();
        tx.send(DisplayEvent::SurfaceAvailable {
            width: 1024,
            height: 1024,
        })
        .await
        .unwrap();
        drop(tx);

        server.run(ChannelSource::new(rx)).await.unwrap();

        assert!(sink_log.lock().unwrap().is_empty());
        // Dismissed only at server stop, not by the failed surface setup.
        assert_eq!(
            *host_log.lock().unwrap(),
            vec!["show tv".to_string(), "dismiss".to_string()]
        );
    }
}
