//! Font registration, lookup, and glyph rasterization.
//!
//! Font files are registered with a [`fontdb`] database and looked up by
//! family name, the same way a platform font system would. Glyphs are then
//! rasterized with [`rusttype`].

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use image::GrayImage;
use rusttype::{point, Font, Scale};

use crate::error::Error;

/// Horizontal and vertical extent of a single glyph's line box, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal advance of the glyph.
    pub advance_width: f32,
    /// Distance from the baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box, usually
    /// negative.
    pub descent: f32,
}

impl GlyphMetrics {
    /// Height of the line box.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.ascent - self.descent
    }
}

/// Something that can measure a glyph and rasterize its coverage.
///
/// The compositor only talks to fonts through this trait.
pub trait GlyphRasterizer {
    /// Measures `glyph`'s line box.
    ///
    /// # Errors
    /// [`Error::Render`] if the glyph cannot be measured, e.g. because the
    /// font has no glyph for it.
    fn measure(&self, glyph: char) -> Result<GlyphMetrics, Error>;

    /// Rasterizes `glyph` into `mask` with the top-left corner of its line
    /// box at `origin`. Coverage is merged with what `mask` already holds;
    /// parts falling outside the mask are clipped.
    ///
    /// # Errors
    /// Same as [`GlyphRasterizer::measure`].
    fn draw_mask(
        &self,
        glyph: char,
        origin: (f32, f32),
        mask: &mut GrayImage,
    ) -> Result<(), Error>;
}

/// A font resolved at a fixed point size.
pub struct IconFont {
    font: Font<'static>,
    family: String,
    point_size: f32,
    scale: Scale,
}

impl IconFont {
    /// Wraps raw font data. `point_size` is em based, like in most
    /// typesetting systems.
    ///
    /// # Errors
    /// [`Error::FontLoad`] if the data is not a usable font.
    pub fn from_data(
        data: Vec<u8>,
        index: u32,
        family: &str,
        point_size: f32,
    ) -> Result<Self, Error> {
        let font = Font::try_from_vec_and_index(data, index).ok_or_else(|| {
            Error::FontLoad(format!("failed to parse font data for '{family}'"))
        })?;

        // rusttype scales so that ascent - descent spans the requested pixel
        // height, so convert from em units first.
        let units_per_em = f32::from(font.units_per_em());
        if units_per_em <= 0.0 {
            return Err(Error::FontLoad(format!("'{family}' has no units per em")));
        }
        let unscaled = font.v_metrics_unscaled();
        let height = point_size * (unscaled.ascent - unscaled.descent) / units_per_em;

        Ok(IconFont {
            font,
            family: family.to_owned(),
            point_size,
            scale: Scale::uniform(height),
        })
    }

    /// Family name the font was resolved by.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Em based size the font was resolved at.
    #[must_use]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Number of glyphs in the font.
    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.font.glyph_count()
    }

    /// Whether the font maps `glyph` to anything but `.notdef`.
    #[must_use]
    pub fn has_glyph(&self, glyph: char) -> bool {
        self.font.glyph(glyph).id().0 != 0
    }

    fn missing_glyph(&self, glyph: char) -> Error {
        Error::Render(format!(
            "font '{}' has no glyph for U+{:04X}",
            self.family, glyph as u32
        ))
    }
}

impl GlyphRasterizer for IconFont {
    fn measure(&self, glyph: char) -> Result<GlyphMetrics, Error> {
        if !self.has_glyph(glyph) {
            return Err(self.missing_glyph(glyph));
        }

        let rusttype::VMetrics { ascent, descent, .. } = self.font.v_metrics(self.scale);
        let h_metrics = self.font.glyph(glyph).scaled(self.scale).h_metrics();
        let advance_width = h_metrics.advance_width;
        Ok(GlyphMetrics { advance_width, ascent, descent })
    }

    fn draw_mask(
        &self,
        glyph: char,
        origin: (f32, f32),
        mask: &mut GrayImage,
    ) -> Result<(), Error> {
        if !self.has_glyph(glyph) {
            return Err(self.missing_glyph(glyph));
        }

        let ascent = self.font.v_metrics(self.scale).ascent;
        let glyph = self
            .font
            .glyph(glyph)
            .scaled(self.scale)
            .positioned(point(origin.0, origin.1 + ascent));

        // Whitespace-like glyphs have no outline and nothing to draw.
        let Some(bounding_box) = glyph.pixel_bounding_box() else {
            return Ok(());
        };

        let (width, height) = mask.dimensions();
        glyph.draw(|x, y, v| {
            let x = i64::from(bounding_box.min.x) + i64::from(x);
            let y = i64::from(bounding_box.min.y) + i64::from(y);
            let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
                return;
            };
            if x >= width || y >= height {
                return;
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            let pixel = mask.get_pixel_mut(x, y);
            pixel.0[0] = pixel.0[0].max(value);
        });

        Ok(())
    }
}

/// Process-scoped set of registered fonts.
///
/// Registering the same file twice is harmless: the second call is a no-op.
pub struct FontRegistry {
    db: fontdb::Database,
    registered: HashSet<PathBuf>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    /// Creates an empty registry. System fonts are never loaded.
    #[must_use]
    pub fn new() -> Self {
        FontRegistry {
            db: fontdb::Database::new(),
            registered: HashSet::new(),
        }
    }

    /// Reads and registers the font file at `path`.
    ///
    /// # Errors
    /// [`Error::FontNotFound`] if the file does not exist,
    /// [`Error::FontLoad`] if it cannot be read or contains no usable face.
    pub fn register_file(&mut self, path: &Path) -> Result<(), Error> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if self.registered.contains(&key) {
            log::debug!("'{}' is already registered", path.display());
            return Ok(());
        }

        let data = read_font_file(path)?;
        let faces = self.register_data(data)?;
        log::debug!("Registered {faces} face(s) from '{}'", path.display());

        self.registered.insert(key);
        Ok(())
    }

    /// Registers in-memory font data, returning how many faces it added.
    ///
    /// # Errors
    /// [`Error::FontLoad`] if the data contains no usable face.
    pub fn register_data(&mut self, data: Vec<u8>) -> Result<usize, Error> {
        let before = self.db.len();
        self.db.load_font_data(data);

        let added = self.db.len() - before;
        if added == 0 {
            return Err(Error::FontLoad("no usable font face found in font data".to_owned()));
        }
        Ok(added)
    }

    /// Family names of all registered faces, sorted and deduplicated.
    #[must_use]
    pub fn families(&self) -> Vec<String> {
        let mut families = Vec::new();
        for face in self.db.faces() {
            families.extend(face.families.iter().map(|(name, _)| name.clone()));
        }
        families.sort();
        families.dedup();
        families
    }

    /// Looks up a registered face by exact family name and sizes it.
    ///
    /// # Errors
    /// [`Error::FontLoad`] if no registered face has that family name or its
    /// data cannot be parsed.
    pub fn resolve(&self, family: &str, point_size: f32) -> Result<IconFont, Error> {
        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            ..fontdb::Query::default()
        };

        let Some(id) = self.db.query(&query) else {
            return Err(Error::FontLoad(format!(
                "no font named '{family}' is registered (found: {})",
                self.families().join(", ")
            )));
        };

        self.db
            .with_face_data(id, |data, index| {
                IconFont::from_data(data.to_vec(), index, family, point_size)
            })
            .ok_or_else(|| Error::FontLoad(format!("font data for '{family}' is unavailable")))?
    }
}

/// Registers the font file at `path` and resolves `family` from it.
///
/// # Errors
/// See [`FontRegistry::register_file`] and [`FontRegistry::resolve`].
pub fn load_font(path: &Path, family: &str, point_size: f32) -> Result<IconFont, Error> {
    let mut registry = FontRegistry::new();
    registry.register_file(path)?;
    registry.resolve(family, point_size)
}

/// Reads a font file, telling a missing file apart from other failures.
///
/// # Errors
/// [`Error::FontNotFound`] if the file does not exist, [`Error::FontLoad`]
/// for any other read failure.
pub fn read_font_file(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FontNotFound { path: path.to_path_buf() },
        _ => Error::FontLoad(format!("failed to read '{}': {e}", path.display())),
    })
}

/// All codepoints `font` maps to a glyph other than `.notdef`, ascending.
#[must_use]
pub fn supported_codepoints(font: &Font<'_>) -> Vec<char> {
    (0..=u32::from(char::MAX))
        .filter_map(char::from_u32)
        .filter(|&c| font.glyph(c).id().0 != 0)
        .collect()
}
