use crate::Result;
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;
use ohno::bail;
use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB color with an alpha channel.
///
/// Parses from `RRGGBB` or `RRGGBBAA` hex with an optional leading `#`.
/// Query parameters arrive without the `#`, theme files carry it. An 8-digit
/// value splits into the color and a separate opacity, matching how the
/// rendered SVG expresses transparency (`fill` + `fill-opacity`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    rgb: Srgb<u8>,
    alpha: f32,
}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: Srgb::new(r, g, b),
            alpha: 1.0,
        }
    }

    /// The color as a `#rrggbb` hex string, alpha excluded.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb.red, self.rgb.green, self.rgb.blue)
    }

    /// Opacity in `0.0..=1.0`, emitted as a separate SVG attribute.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.alpha
    }
}

impl FromStr for Color {
    type Err = ohno::AppError;

    #[expect(clippy::cast_possible_truncation, reason = "intentional byte extraction from packed hex value")]
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);

        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("invalid color '{s}': expected hex digits");
        }

        match hex.len() {
            6 => {
                let v = u32::from_str_radix(hex, 16)?;
                Ok(Self {
                    rgb: Srgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8),
                    alpha: 1.0,
                })
            }
            8 => {
                let v = u32::from_str_radix(hex, 16)?;
                Ok(Self {
                    rgb: Srgb::new((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8),
                    alpha: f32::from(v as u8) / 255.0,
                })
            }
            _ => bail!("invalid color '{s}': expected 6 or 8 hex digits"),
        }
    }
}

impl Display for Color {
    #[expect(clippy::cast_possible_truncation, reason = "alpha is clamped to 0..=255 before the cast")]
    #[expect(clippy::cast_sign_loss, reason = "alpha is non-negative")]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.rgb.red, self.rgb.green, self.rgb.blue)?;
        if self.alpha < 1.0 {
            write!(f, "{:02x}", (self.alpha * 255.0).round().clamp(0.0, 255.0) as u8)?;
        }
        Ok(())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
