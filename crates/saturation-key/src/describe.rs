//! Static description of the effect: what a host needs to register it.

use std::fmt;

use crate::image::{BitDepth, Components, PixelFormat};

/// Name of the threshold parameter.
pub const THRESHOLD_PARAM: &str = "saturation";

/// The clips the effect reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipId {
    /// The single input clip
    Source,
    /// The rendered output clip
    Output,
}

impl ClipId {
    pub const fn name(self) -> &'static str {
        match self {
            ClipId::Source => "Source",
            ClipId::Output => "Output",
        }
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contexts the effect can be instantiated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// One input clip, one output clip
    Filter,
}

/// Definition of a double-valued parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub default: f64,
}

/// Everything the host is told about the effect before creating instances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectDescriptor {
    pub identifier: &'static str,
    pub version: (u32, u32),
    pub label: &'static str,
    pub grouping: &'static str,
    pub contexts: &'static [Context],
    pub pixel_depths: &'static [BitDepth],
    pub components: &'static [Components],
    /// Whether source and output may differ in bit depth
    pub supports_multiple_clip_depths: bool,
    pub clips: &'static [ClipId],
    pub params: &'static [ParamDescriptor],
}

impl EffectDescriptor {
    /// Look up a parameter definition by name.
    pub fn param(&self, name: &str) -> Option<&ParamDescriptor> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Whether clips in `format` can be rendered.
    pub fn supports(&self, format: PixelFormat) -> bool {
        self.pixel_depths.contains(&format.depth) && self.components.contains(&format.components)
    }
}

pub const SATURATION_EFFECT: EffectDescriptor = EffectDescriptor {
    identifier: "satkey.SaturationDebug",
    version: (1, 0),
    label: "Saturation debug",
    grouping: "Saturation debug",
    contexts: &[Context::Filter],
    pixel_depths: &[BitDepth::U8],
    components: &[Components::Rgba],
    supports_multiple_clip_depths: false,
    clips: &[ClipId::Source, ClipId::Output],
    params: &[ParamDescriptor {
        name: THRESHOLD_PARAM,
        label: "Saturation",
        hint: "The saturation at which and below pixels will turn black",
        default: 0.02,
    }],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_param_defaults() {
        let param = SATURATION_EFFECT.param(THRESHOLD_PARAM).unwrap();
        assert_eq!(param.default, 0.02);
        assert_eq!(param.label, "Saturation");
        assert!(SATURATION_EFFECT.param("gain").is_none());
    }

    #[test]
    fn test_supports_only_rgba8() {
        assert!(SATURATION_EFFECT.supports(PixelFormat::RGBA8));
        assert!(!SATURATION_EFFECT.supports(PixelFormat::new(BitDepth::U16, Components::Rgba)));
        assert!(!SATURATION_EFFECT.supports(PixelFormat::new(BitDepth::U8, Components::Rgb)));
    }

    #[test]
    fn test_clip_names() {
        assert_eq!(ClipId::Source.to_string(), "Source");
        assert_eq!(ClipId::Output.name(), "Output");
    }
}
