use std::fmt;
use std::str::FromStr;

/// Straight (non-premultiplied) RGBA color with every component in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component.
    pub red: f32,
    /// Green component.
    pub green: f32,
    /// Blue component.
    pub blue: f32,
    /// Opacity, `0.0` being fully transparent.
    pub alpha: f32,
}

/// A color string that is neither `clear` nor six hex digits.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{value}")]
pub struct ParseColorError {
    value: String,
}

impl ParseColorError {
    /// The rejected input, verbatim.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Color {
    /// Fully transparent black, what `clear` resolves to.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a color from unit range components.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Color { red, green, blue, alpha }
    }

    /// Creates an opaque color from byte components.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Color::new(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
            1.0,
        )
    }

    /// Moves every color channel toward zero by `fraction`, leaving alpha
    /// untouched. `0.0` returns the color unchanged, `1.0` returns black.
    #[must_use]
    pub fn blend_toward_black(self, fraction: f32) -> Self {
        let keep = 1.0 - fraction.clamp(0.0, 1.0);
        Color {
            red: self.red * keep,
            green: self.green * keep,
            blue: self.blue * keep,
            alpha: self.alpha,
        }
    }

    /// Same color with a different opacity.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color { alpha, ..self }
    }

    /// Linear interpolation between `self` (at `t = 0`) and `other`.
    #[must_use]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Color {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
            alpha: mix(self.alpha, other.alpha),
        }
    }

    /// Converts to 8-bit RGBA, rounding to the nearest byte.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba8(self) -> image::Rgba<u8> {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        image::Rgba([byte(self.red), byte(self.green), byte(self.blue), byte(self.alpha)])
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "clear" {
            return Ok(Color::TRANSPARENT);
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || ParseColorError { value: s.to_owned() };
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let rgb = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        let [_, red, green, blue] = rgb.to_be_bytes();
        Ok(Color::from_rgb8(red, green, blue))
    }
}

/// Parses `clear` or a six digit hex color with an optional leading `#`.
///
/// # Errors
/// Returns [`ParseColorError`] for anything else.
pub fn parse_color(s: &str) -> Result<Color, ParseColorError> {
    s.parse()
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha == 0.0 {
            return f.write_str("clear");
        }

        let image::Rgba([r, g, b, a]) = self.to_rgba8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")?;
        if a != u8::MAX {
            write!(f, " ({:.0}% opaque)", self.alpha * 100.0)?;
        }
        Ok(())
    }
}
