//! Captured display configuration tables.
//!
//! A [`DisplayProfile`] is a TOML-described table of the candidate
//! configurations a display system exposes. It implements [`ConfigQuery`]
//! with the native matching rule (every requested attribute is a lower
//! bound), so selection against a profile behaves exactly like selection
//! against the live system that the profile was captured from.
//!
//! Profiles drive the `--select-config` dry run and the replay provider,
//! and serve as fixtures in tests.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::attribs::{AttribSpec, ConfigAttrib};
use crate::display::query::{ConfigQuery, QueryError};

/// Error loading a display profile from disk.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile file could not be read
    #[error("failed to read display profile {path}: {source}")]
    Io {
        /// Path that was attempted
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The profile file is not valid TOML
    #[error("failed to parse display profile {path}: {source}")]
    Parse {
        /// Path that was attempted
        path: String,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// One candidate configuration in a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateConfig {
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
    #[serde(default)]
    pub sample_buffers: i32,
    /// Samples per pixel
    #[serde(default)]
    pub samples: i32,
}

impl CandidateConfig {
    /// Value of `attrib` for this candidate.
    pub fn attrib(&self, attrib: ConfigAttrib) -> i32 {
        match attrib {
            ConfigAttrib::RedSize => self.red,
            ConfigAttrib::GreenSize => self.green,
            ConfigAttrib::BlueSize => self.blue,
            ConfigAttrib::AlphaSize => self.alpha,
            ConfigAttrib::DepthSize => self.depth,
            ConfigAttrib::StencilSize => self.stencil,
            ConfigAttrib::SampleBuffers => self.sample_buffers,
            ConfigAttrib::Samples => self.samples,
        }
    }

    /// Whether this candidate satisfies every lower bound in `spec`.
    fn matches(&self, spec: &AttribSpec) -> bool {
        spec.entries()
            .iter()
            .all(|(attrib, value)| self.attrib(*attrib) >= *value)
    }
}

/// A captured table of display configurations.
///
/// Candidates keep their table order when queried. Live display systems
/// return platform-defined order instead; nothing downstream may rely on
/// either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayProfile {
    /// Optional human-readable label for reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Candidate configurations, in capture order
    #[serde(rename = "config", default)]
    pub configs: Vec<CandidateConfig>,
}

impl DisplayProfile {
    /// Load a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ProfileError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Profile label for reports, falling back to a generic one.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed display profile")
    }

    fn matching<'a>(
        &'a self,
        spec: &'a AttribSpec,
    ) -> impl Iterator<Item = &'a CandidateConfig> + 'a {
        self.configs.iter().filter(move |c| c.matches(spec))
    }
}

impl ConfigQuery for DisplayProfile {
    type Candidate = CandidateConfig;

    fn config_count(&self, spec: &AttribSpec) -> Result<usize, QueryError> {
        Ok(self.matching(spec).count())
    }

    fn configs(&self, spec: &AttribSpec, max: usize) -> Result<Vec<CandidateConfig>, QueryError> {
        Ok(self.matching(spec).take(max).copied().collect())
    }

    fn config_attrib(&self, candidate: &CandidateConfig, attrib: ConfigAttrib) -> Option<i32> {
        Some(candidate.attrib(attrib))
    }
}
