//! Scripted display-event replay.
//!
//! A replay script is a TOML file describing a timed sequence of
//! remote-display and surface events. The default run mode feeds a script
//! through the server, which exercises the full presentation flow without
//! a casting session. Scripts are local files; nothing here speaks to
//! other processes.
//!
//! ```toml
//! [[event]]
//! kind = "display_available"
//! id = 1
//! name = "living-room-tv"
//! width = 1920
//! height = 1080
//!
//! [[event]]
//! kind = "surface_available"
//! after_ms = 50
//! width = 1024
//! height = 1024
//! ```

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::presentation::RemoteDisplay;
use crate::server::{DisplayEvent, DisplayEventSource};

/// Error loading a replay script from disk.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read
    #[error("failed to read replay script {path}: {source}")]
    Io {
        /// Path that was attempted
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The script file is not valid TOML
    #[error("failed to parse replay script {path}: {source}")]
    Parse {
        /// Path that was attempted
        path: String,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// One scripted event, delivered `after_ms` after the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Delay before delivery, in milliseconds
    #[serde(default)]
    pub after_ms: u64,

    /// The event itself
    #[serde(flatten)]
    pub event: ScriptEvent,
}

/// Script-level event kinds, mirroring [`DisplayEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// A remote display was granted
    DisplayAvailable {
        /// Display identifier
        id: u64,
        /// Display name
        name: String,
        /// Mode width in pixels
        width: u32,
        /// Mode height in pixels
        height: u32,
    },
    /// The remote display went away
    DisplayRemoved,
    /// The presentation's backing texture became ready
    SurfaceAvailable {
        /// Texture width in pixels
        width: u32,
        /// Texture height in pixels
        height: u32,
    },
    /// A frame was rendered into the surface
    SurfaceUpdated,
    /// The backing texture was lost
    SurfaceDestroyed,
}

impl From<ScriptEvent> for DisplayEvent {
    fn from(event: ScriptEvent) -> Self {
        match event {
            ScriptEvent::DisplayAvailable {
                id,
                name,
                width,
                height,
            } => DisplayEvent::DisplayAvailable(RemoteDisplay {
                id,
                name,
                width,
                height,
            }),
            ScriptEvent::DisplayRemoved => DisplayEvent::DisplayRemoved,
            ScriptEvent::SurfaceAvailable { width, height } => {
                DisplayEvent::SurfaceAvailable { width, height }
            }
            ScriptEvent::SurfaceUpdated => DisplayEvent::SurfaceUpdated,
            ScriptEvent::SurfaceDestroyed => DisplayEvent::SurfaceDestroyed,
        }
    }
}

/// A parsed replay script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Scripted events in delivery order
    #[serde(rename = "event", default)]
    pub events: Vec<ScriptedEvent>,
}

impl ReplayScript {
    /// Load a script from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ScriptError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Number of scripted events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the script contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Event source that delivers a script with its recorded pacing.
pub struct ReplaySource {
    pending: VecDeque<ScriptedEvent>,
}

impl ReplaySource {
    /// Create a source from a parsed script.
    pub fn new(script: ReplayScript) -> Self {
        Self {
            pending: script.events.into(),
        }
    }
}

#[async_trait]
impl DisplayEventSource for ReplaySource {
    async fn next_event(&mut self) -> Option<DisplayEvent> {
        let scripted = self.pending.pop_front()?;
        if scripted.after_ms > 0 {
            tokio::time::sleep(Duration::from_millis(scripted.after_ms)).await;
        }
        debug!(event = ?scripted.event, "replaying scripted event");
        Some(scripted.event.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_toml() {
        let script: ReplayScript = toml::from_str(
            r#"
            [[event]]
            kind = "display_available"
            id = 1
            name = "living-room-tv"
            width = 1920
            height = 1080

            [[event]]
            kind = "surface_available"
            after_ms = 50
            width = 1024
            height = 1024

            [[event]]
            kind = "surface_updated"

            [[event]]
            kind = "display_removed"
            after_ms = 100
            "#,
        )
        .unwrap();

        assert_eq!(script.len(), 4);
        assert_eq!(script.events[0].after_ms, 0);
        assert_eq!(script.events[1].after_ms, 50);
        assert_eq!(
            script.events[2].event,
            ScriptEvent::SurfaceUpdated
        );
        assert_eq!(script.events[3].event, ScriptEvent::DisplayRemoved);
    }

    #[test]
    fn test_empty_script_parses() {
        let script: ReplayScript = toml::from_str("").unwrap();
        assert!(script.is_empty());
    }

    #[tokio::test]
    async fn test_source_delivers_events_in_order_then_ends() {
        let script: ReplayScript = toml::from_str(
            r#"
            [[event]]
            kind = "surface_available"
            width = 1024
            height = 1024

            [[event]]
            kind = "surface_destroyed"
            "#,
        )
        .unwrap();

        let mut source = ReplaySource::new(script);

        assert_eq!(
            source.next_event().await,
            Some(DisplayEvent::SurfaceAvailable {
                width: 1024,
                height: 1024
            })
        );
        assert_eq!(
            source.next_event().await,
            Some(DisplayEvent::SurfaceDestroyed)
        );
        assert_eq!(source.next_event().await, None);
    }
}
