use image::{GrayImage, RgbaImage};

use crate::color::Color;

/// Radial gradient from `inner` at `center` to `outer` at `radius`, padded
/// with `outer` beyond it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    /// Center in pixel coordinates.
    pub center: (f32, f32),
    /// Distance at which `outer` is reached. Must be positive.
    pub radius: f32,
    /// Color at the center.
    pub inner: Color,
    /// Color at `radius` and beyond.
    pub outer: Color,
}

impl RadialGradient {
    /// Color of the gradient at the given point.
    #[must_use]
    pub fn color_at(&self, x: f32, y: f32) -> Color {
        let dx = x - self.center.0;
        let dy = y - self.center.1;
        let t = if self.radius > 0.0 {
            (dx * dx + dy * dy).sqrt() / self.radius
        } else {
            1.0
        };
        self.inner.lerp(self.outer, t)
    }
}

/// What a drawing operation fills pixels with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// One color everywhere.
    Solid(Color),
    /// Color depending on the pixel position.
    Radial(RadialGradient),
}

impl Paint {
    fn color_at(&self, x: u32, y: u32) -> Color {
        match self {
            Paint::Solid(color) => *color,
            // Sample at the pixel center.
            #[allow(clippy::cast_precision_loss)]
            Paint::Radial(gradient) => gradient.color_at(x as f32 + 0.5, y as f32 + 0.5),
        }
    }
}

/// Fixed size RGBA drawing surface.
///
/// Pixels are stored as straight alpha 8-bit RGBA, which is also what ends up
/// in the PNG.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Creates a fully transparent canvas.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Canvas { pixels: RgbaImage::new(width, height) }
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Replaces every pixel with `paint`, ignoring what was there before.
    pub fn fill(&mut self, paint: &Paint) {
        for (x, y, pixel) in self.pixels.enumerate_pixels_mut() {
            *pixel = paint.color_at(x, y).to_rgba8();
        }
    }

    /// Composites `paint` over the canvas wherever `mask` has coverage.
    ///
    /// `mask` must have the same dimensions as the canvas; coverage `255`
    /// means the paint is applied at its full opacity.
    pub fn fill_mask(&mut self, mask: &GrayImage, paint: &Paint) {
        debug_assert_eq!(mask.dimensions(), self.pixels.dimensions());

        for (x, y, pixel) in self.pixels.enumerate_pixels_mut() {
            let Some(coverage) = mask.get_pixel_checked(x, y).map(|p| p.0[0]) else {
                continue;
            };
            if coverage == 0 {
                continue;
            }

            let source = paint.color_at(x, y);
            let source = source.with_alpha(source.alpha * f32::from(coverage) / 255.0);
            *pixel = source_over(source, to_color(*pixel)).to_rgba8();
        }
    }

    /// Borrows the underlying image.
    #[must_use]
    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }
}

fn to_color(pixel: image::Rgba<u8>) -> Color {
    let [r, g, b, a] = pixel.0;
    Color::from_rgb8(r, g, b).with_alpha(f32::from(a) / 255.0)
}

/// Porter-Duff source-over on straight alpha colors.
fn source_over(source: Color, dest: Color) -> Color {
    let alpha = source.alpha + dest.alpha * (1.0 - source.alpha);
    if alpha <= 0.0 {
        return Color::TRANSPARENT;
    }

    let blend = |s: f32, d: f32| (s * source.alpha + d * dest.alpha * (1.0 - source.alpha)) / alpha;
    Color::new(
        blend(source.red, dest.red),
        blend(source.green, dest.green),
        blend(source.blue, dest.blue),
        alpha,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_mask(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, image::Luma([255]))
    }

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = Canvas::new(4, 4);
        assert_eq!(canvas.as_image().get_pixel(2, 2).0, [0, 0, 0, 0]);
        assert_eq!((canvas.width(), canvas.height()), (4, 4));
    }

    #[test]
    fn gradient_goes_from_inner_to_outer() {
        let gradient = RadialGradient {
            center: (50.0, 50.0),
            radius: 50.0,
            inner: Color::from_rgb8(255, 255, 255),
            outer: Color::BLACK,
        };
        assert_eq!(gradient.color_at(50.0, 50.0), gradient.inner);
        assert_eq!(gradient.color_at(100.0, 50.0), Color::BLACK);
        assert_eq!(gradient.color_at(150.0, 150.0), Color::BLACK);

        let halfway = gradient.color_at(75.0, 50.0);
        assert!((halfway.red - 0.5).abs() < 1e-6);
    }

    #[test]
    fn opaque_paint_replaces_destination() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(&Paint::Solid(Color::from_rgb8(255, 0, 0)));
        canvas.fill_mask(&full_mask(2, 2), &Paint::Solid(Color::from_rgb8(0, 0, 255)));
        assert_eq!(canvas.as_image().get_pixel(1, 1).0, [0, 0, 255, 255]);
    }

    #[test]
    fn uncovered_pixels_are_untouched() {
        let mut canvas = Canvas::new(2, 1);
        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(0, 0, image::Luma([255]));
        canvas.fill_mask(&mask, &Paint::Solid(Color::BLACK));

        assert_eq!(canvas.as_image().get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(canvas.as_image().get_pixel(1, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn translucent_paint_over_transparent_keeps_color() {
        let mut canvas = Canvas::new(1, 1);
        let white = Color::from_rgb8(255, 255, 255).with_alpha(0.5);
        canvas.fill_mask(&full_mask(1, 1), &Paint::Solid(white));
        assert_eq!(canvas.as_image().get_pixel(0, 0).0, [255, 255, 255, 128]);
    }

    #[test]
    fn partial_coverage_mixes_with_background() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill(&Paint::Solid(Color::BLACK));
        let mask = GrayImage::from_pixel(1, 1, image::Luma([128]));
        canvas.fill_mask(&mask, &Paint::Solid(Color::from_rgb8(255, 255, 255)));

        let [r, g, b, a] = canvas.as_image().get_pixel(0, 0).0;
        assert_eq!((r, g, b, a), (128, 128, 128, 255));
    }
}
