//! Requested rendering configuration.
//!
//! A [`ConfigRequest`] captures the attributes the renderer needs from the
//! display system: color channel depths, depth/stencil buffer sizes, and
//! optional multisampled anti-aliasing. Requests are immutable once built;
//! selection is a pure function of the request and the candidate set.

use crate::display::attribs::{AttribSpec, ConfigAttrib};

/// Multisampling hints appended to the preferred attribute specification.
///
/// The display system interprets both values as minimums. Defaults request
/// one multisample buffer with 4x anti-aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multisampling {
    /// Number of multisample buffers (at least)
    pub sample_buffers: i32,
    /// Samples per pixel (at least)
    pub samples: i32,
}

impl Default for Multisampling {
    fn default() -> Self {
        Self {
            sample_buffers: 1,
            samples: 4,
        }
    }
}

/// Desired display configuration attributes.
///
/// Defaults: 8 bits per color channel, 16-bit depth buffer, no stencil,
/// no multisampling. Color sizes must match a candidate exactly; depth and
/// stencil are minimums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRequest {
    red: i32,
    green: i32,
    blue: i32,
    alpha: i32,
    depth: i32,
    stencil: i32,
    multisampling: Option<Multisampling>,
}

impl Default for ConfigRequest {
    fn default() -> Self {
        Self {
            red: 8,
            green: 8,
            blue: 8,
            alpha: 8,
            depth: 16,
            stencil: 0,
            multisampling: None,
        }
    }
}

impl ConfigRequest {
    /// Request with the default attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color channel sizes (exact-match on selection).
    #[must_use]
    pub fn with_color(mut self, red: i32, green: i32, blue: i32, alpha: i32) -> Self {
        self.red = red;
        self.green = green;
        self.blue = blue;
        self.alpha = alpha;
        self
    }

    /// Set the minimum depth buffer size.
    #[must_use]
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the minimum stencil buffer size.
    #[must_use]
    pub fn with_stencil(mut self, stencil: i32) -> Self {
        self.stencil = stencil;
        self
    }

    /// Request multisampled anti-aliasing.
    #[must_use]
    pub fn with_multisampling(mut self, multisampling: Multisampling) -> Self {
        self.multisampling = Some(multisampling);
        self
    }

    /// Requested red channel size.
    pub fn red(&self) -> i32 {
        self.red
    }

    /// Requested green channel size.
    pub fn green(&self) -> i32 {
        self.green
    }

    /// Requested blue channel size.
    pub fn blue(&self) -> i32 {
        self.blue
    }

    /// Requested alpha channel size.
    pub fn alpha(&self) -> i32 {
        self.alpha
    }

    /// Requested minimum depth buffer size.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Requested minimum stencil buffer size.
    pub fn stencil(&self) -> i32 {
        self.stencil
    }

    /// Requested multisampling hints, if anti-aliasing is desired.
    pub fn multisampling(&self) -> Option<Multisampling> {
        self.multisampling
    }

    /// Full attribute specification, including the anti-aliasing hints
    /// when multisampling is requested.
    pub fn attrib_spec(&self) -> AttribSpec {
        let mut spec = self.base_spec();
        if let Some(ms) = self.multisampling {
            spec.push(ConfigAttrib::SampleBuffers, ms.sample_buffers);
            spec.push(ConfigAttrib::Samples, ms.samples);
        }
        spec
    }

    /// Attribute specification without the anti-aliasing hints, used for
    /// the graceful-degradation query pass.
    pub fn base_spec(&self) -> AttribSpec {
        AttribSpec::new()
            .with(ConfigAttrib::RedSize, self.red)
            .with(ConfigAttrib::GreenSize, self.green)
            .with(ConfigAttrib::BlueSize, self.blue)
            .with(ConfigAttrib::AlphaSize, self.alpha)
            .with(ConfigAttrib::DepthSize, self.depth)
            .with(ConfigAttrib::StencilSize, self.stencil)
    }
}
