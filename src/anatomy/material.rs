//! Kleuren en PBR-materialen voor de anatomische lagen.

use core::fmt;

use serde::Serialize;

/// RGB-kleur met componenten in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Self = Self::from_hex(0x00_0000);

    /// Bouwt een kleur uit een `0xRRGGBB`-waarde.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f64 / 255.0,
            g: ((hex >> 8) & 0xFF) as f64 / 255.0,
            b: (hex & 0xFF) as f64 / 255.0,
        }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[must_use]
    pub fn to_hex(self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    #[must_use]
    pub fn is_black(self) -> bool {
        self.to_hex() == 0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.to_hex())
    }
}

/// Standaard PBR-materiaal zoals de host-renderer het verwacht.
///
/// De defaults volgen die renderer: wit, volledig ruw, niet metallisch,
/// ondoorzichtig, zonder emissie en met tone mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f64,
    pub opacity: f64,
    pub transparent: bool,
    pub roughness: f64,
    pub metalness: f64,
    pub tone_mapped: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xFF_FFFF),
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            opacity: 1.0,
            transparent: false,
            roughness: 1.0,
            metalness: 0.0,
            tone_mapped: true,
        }
    }
}

impl Material {
    #[must_use]
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn roughness(mut self, roughness: f64) -> Self {
        self.roughness = roughness;
        self
    }

    #[must_use]
    pub fn metalness(mut self, metalness: f64) -> Self {
        self.metalness = metalness;
        self
    }

    /// Maakt het materiaal doorschijnend met de gegeven dekking.
    #[must_use]
    pub fn translucent(mut self, opacity: f64) -> Self {
        self.transparent = true;
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn emissive(mut self, color: Color, intensity: f64) -> Self {
        self.emissive = color;
        self.emissive_intensity = intensity;
        self
    }

    #[must_use]
    pub fn without_tone_mapping(mut self) -> Self {
        self.tone_mapped = false;
        self
    }

    /// Geeft aan of het materiaal zichtbaar oplicht.
    #[must_use]
    pub fn is_glowing(&self) -> bool {
        !self.emissive.is_black() && self.emissive_intensity > 0.0
    }
}

/// Serialiseerbare vorm van [`Material`] voor de JS-host.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MaterialExport {
    pub color: [f64; 3],
    pub emissive: [f64; 3],
    pub emissive_intensity: f64,
    pub opacity: f64,
    pub transparent: bool,
    pub roughness: f64,
    pub metalness: f64,
    pub tone_mapped: bool,
}

impl From<Material> for MaterialExport {
    fn from(material: Material) -> Self {
        Self {
            color: material.color.to_array(),
            emissive: material.emissive.to_array(),
            emissive_intensity: material.emissive_intensity,
            opacity: material.opacity,
            transparent: material.transparent,
            roughness: material.roughness,
            metalness: material.metalness,
            tone_mapped: material.tone_mapped,
        }
    }
}
