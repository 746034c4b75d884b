//! Display configuration attributes and specification lists.
//!
//! Attribute identifiers carry the native EGL codes so a built
//! specification list can be handed to `eglChooseConfig` unchanged by a
//! live backend. Profile-backed backends interpret the same identifiers
//! symbolically.

/// Terminator for raw attribute lists (`EGL_NONE`).
pub const ATTRIB_NONE: i32 = 0x3038;

/// Attribute identifiers understood by the display system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ConfigAttrib {
    /// Bits of the red channel of the color buffer
    RedSize = 0x3024,
    /// Bits of the green channel of the color buffer
    GreenSize = 0x3023,
    /// Bits of the blue channel of the color buffer
    BlueSize = 0x3022,
    /// Bits of the alpha channel of the color buffer
    AlphaSize = 0x3021,
    /// Bits of the depth buffer
    DepthSize = 0x3025,
    /// Bits of the stencil buffer
    StencilSize = 0x3026,
    /// Number of multisample buffers
    SampleBuffers = 0x3032,
    /// Samples per pixel
    Samples = 0x3031,
}

impl ConfigAttrib {
    /// Native attribute code as passed to the display system.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// An ordered attribute specification list for config queries.
///
/// Entries are (attribute, minimum value) pairs in insertion order. The
/// display system treats each entry as a lower bound when matching
/// candidates; the exact-match policy for color sizes is applied by the
/// selector afterwards, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttribSpec {
    entries: Vec<(ConfigAttrib, i32)>,
}

impl AttribSpec {
    /// Create an empty specification list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute/value pair, builder style.
    #[must_use]
    pub fn with(mut self, attrib: ConfigAttrib, value: i32) -> Self {
        self.entries.push((attrib, value));
        self
    }

    /// Append an attribute/value pair.
    pub fn push(&mut self, attrib: ConfigAttrib, value: i32) {
        self.entries.push((attrib, value));
    }

    /// Requested value for `attrib`, if present in the list.
    pub fn get(&self, attrib: ConfigAttrib) -> Option<i32> {
        self.entries
            .iter()
            .find(|(a, _)| *a == attrib)
            .map(|(_, v)| *v)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(ConfigAttrib, i32)] {
        &self.entries
    }

    /// Raw interleaved id/value list, `EGL_NONE`-terminated, as consumed
    /// by a live EGL backend.
    pub fn to_raw(&self) -> Vec<i32> {
        let mut raw = Vec::with_capacity(self.entries.len() * 2 + 1);
        for (attrib, value) in &self.entries {
            raw.push(attrib.code());
            raw.push(*value);
        }
        raw.push(ATTRIB_NONE);
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_list_is_interleaved_and_terminated() {
        let spec = AttribSpec::new()
            .with(ConfigAttrib::RedSize, 8)
            .with(ConfigAttrib::DepthSize, 16);

        assert_eq!(
            spec.to_raw(),
            vec![0x3024, 8, 0x3025, 16, ATTRIB_NONE],
        );
    }

    #[test]
    fn test_get_returns_requested_value() {
        let spec = AttribSpec::new().with(ConfigAttrib::StencilSize, 4);

        assert_eq!(spec.get(ConfigAttrib::StencilSize), Some(4));
        assert_eq!(spec.get(ConfigAttrib::RedSize), None);
    }

    #[test]
    fn test_empty_spec_is_just_the_terminator() {
        assert_eq!(AttribSpec::new().to_raw(), vec![ATTRIB_NONE]);
    }
}
