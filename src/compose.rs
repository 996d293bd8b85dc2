//! The icon rendering pipeline: background, drop shadow, glyph, and the
//! optional reversed gradient fill.

use image::GrayImage;

use crate::canvas::{Canvas, Paint, RadialGradient};
use crate::color::Color;
use crate::error::Error;
use crate::font::GlyphRasterizer;

/// Side length of the square output canvas, in pixels.
pub const CANVAS_SIZE: u32 = 512;
/// Glyph point size relative to the canvas height.
pub const GLYPH_SCALE: f32 = 0.7;
/// How far gradients darken their base color toward black.
pub const GRADIENT_DARKEN: f32 = 0.7;
/// Background gradient radius relative to the larger canvas side.
pub const BACKGROUND_RADIUS: f32 = 0.75;
/// Blur radius of the drop shadow, in pixels.
pub const SHADOW_BLUR_RADIUS: f32 = 10.0;
/// Drop shadow offset in y-up canvas units: right and down by five.
pub const SHADOW_OFFSET: (f32, f32) = (5.0, -5.0);

/// Point size the glyph is rendered at.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn glyph_point_size() -> f32 {
    CANVAS_SIZE as f32 * GLYPH_SCALE
}

/// Fully resolved description of one icon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconStyle {
    /// The glyph to draw.
    pub glyph: char,
    /// Canvas color. Paints the background normally; in reversed mode it is
    /// the translucent underlay of the glyph.
    pub fill: Color,
    /// Glyph color. Flat normally; the center of the glyph's gradient in
    /// reversed mode.
    pub ink: Color,
    /// Whether colors fade toward black away from the center.
    pub gradient: bool,
    /// Render the glyph as a gradient-filled mask over a transparent canvas.
    pub reversed: bool,
}

impl IconStyle {
    fn darken_fraction(&self) -> f32 {
        if self.gradient {
            GRADIENT_DARKEN
        } else {
            0.0
        }
    }
}

/// Renders `style` onto a fresh [`CANVAS_SIZE`] square canvas.
///
/// # Errors
/// [`Error::Render`] if the glyph cannot be measured or rasterized.
#[allow(clippy::cast_precision_loss)]
pub fn compose<R: GlyphRasterizer + ?Sized>(
    style: &IconStyle,
    glyphs: &R,
) -> Result<Canvas, Error> {
    let size = CANVAS_SIZE as f32;
    let center = (size / 2.0, size / 2.0);
    let mut canvas = Canvas::new(CANVAS_SIZE, CANVAS_SIZE);

    if !style.reversed {
        let background = if style.gradient {
            Paint::Radial(RadialGradient {
                center,
                radius: size * BACKGROUND_RADIUS,
                inner: style.fill,
                outer: style.fill.blend_toward_black(GRADIENT_DARKEN),
            })
        } else {
            Paint::Solid(style.fill)
        };
        canvas.fill(&background);
    }

    let metrics = glyphs.measure(style.glyph)?;
    let origin = (
        (size - metrics.advance_width) / 2.0,
        (size - metrics.height()) / 2.0,
    );
    log::debug!(
        "Glyph U+{:04X} measures {:.1}x{:.1}, drawn at ({:.1}, {:.1})",
        style.glyph as u32,
        metrics.advance_width,
        metrics.height(),
        origin.0,
        origin.1
    );

    let mut mask = GrayImage::new(CANVAS_SIZE, CANVAS_SIZE);
    glyphs.draw_mask(style.glyph, origin, &mut mask)?;

    let shadow = shadow_mask(style.glyph, origin, glyphs)?;
    let shadow_color = if style.reversed {
        Color::BLACK
    } else {
        Color::BLACK.with_alpha(0.8)
    };
    canvas.fill_mask(&shadow, &Paint::Solid(shadow_color));

    if style.reversed {
        let underlay = style.fill.with_alpha(style.fill.alpha * 0.5);
        canvas.fill_mask(&mask, &Paint::Solid(underlay));

        // Normalized gradient space runs from the center to the far corner.
        let corner = (center.0 * center.0 + center.1 * center.1).sqrt();
        let gradient = RadialGradient {
            center,
            radius: corner,
            inner: style.ink,
            outer: style.ink.blend_toward_black(style.darken_fraction()),
        };
        canvas.fill_mask(&mask, &Paint::Radial(gradient));
    } else {
        canvas.fill_mask(&mask, &Paint::Solid(style.ink));
    }

    Ok(canvas)
}

fn shadow_mask<R: GlyphRasterizer + ?Sized>(
    glyph: char,
    origin: (f32, f32),
    glyphs: &R,
) -> Result<GrayImage, Error> {
    let mut shadow = GrayImage::new(CANVAS_SIZE, CANVAS_SIZE);
    let offset = (origin.0 + SHADOW_OFFSET.0, origin.1 - SHADOW_OFFSET.1);
    glyphs.draw_mask(glyph, offset, &mut shadow)?;

    // A blur radius covers roughly two standard deviations.
    Ok(image::imageops::blur(&shadow, SHADOW_BLUR_RADIUS / 2.0))
}
