//! Configuration type definitions.
//!
//! Plain serde structs grouped by concern. Every field has a default so a
//! partial (or absent) config file still yields a runnable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::display::{ConfigRequest, Multisampling};

/// Published surface buffer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Fixed buffer width applied at publication time
    pub width: u32,
    /// Fixed buffer height applied at publication time
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

/// Requested rendering attributes for the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Red channel bits (exact match required)
    pub red_bits: i32,
    /// Green channel bits (exact match required)
    pub green_bits: i32,
    /// Blue channel bits (exact match required)
    pub blue_bits: i32,
    /// Alpha channel bits (exact match required)
    pub alpha_bits: i32,
    /// Minimum depth buffer bits
    pub depth_bits: i32,
    /// Minimum stencil buffer bits
    pub stencil_bits: i32,
    /// Request multisampled anti-aliasing
    pub multisampling: bool,
    /// Samples per pixel when multisampling
    pub samples: i32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
            depth_bits: 16,
            stencil_bits: 0,
            multisampling: true,
            samples: 4,
        }
    }
}

impl RenderingConfig {
    /// Build the selector request these settings describe.
    pub fn to_request(&self) -> ConfigRequest {
        let request = ConfigRequest::new()
            .with_color(self.red_bits, self.green_bits, self.blue_bits, self.alpha_bits)
            .with_depth(self.depth_bits)
            .with_stencil(self.stencil_bits);

        if self.multisampling {
            request.with_multisampling(Multisampling {
                sample_buffers: 1,
                samples: self.samples,
            })
        } else {
            request
        }
    }
}

/// Event/profile sources for the server run mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Replay script driving the run mode
    pub script: Option<PathBuf>,
    /// Display profile queried at surface setup
    pub profile: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log directory (in addition to stdout)
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}
