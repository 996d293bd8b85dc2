//! Renders single glyphs from icon fonts into PNG images.
//!
//! # Usage
//! ```no_run
//! # fn test() -> Result<(), glyph_icons::Error> {
//! use std::path::Path;
//! use glyph_icons::{compose, glyph_point_size, load_font, write_png, Color, IconStyle};
//!
//! let font = load_font(Path::new("FontAwesome.ttf"), "FontAwesome", glyph_point_size())?;
//! let style = IconStyle {
//!     glyph: '\u{f10b}',
//!     fill: "3498db".parse().unwrap(),
//!     ink: Color::from_rgb8(255, 255, 255),
//!     gradient: true,
//!     reversed: false,
//! };
//! let canvas = compose(&style, &font)?;
//! write_png(&canvas, Path::new("icon.png"))?;
//! # Ok(())
//! # }
//! ```
//!
//! The `bin` feature (on by default) adds the command line front ends:
//! `glyph-icon`, `icon-page` and `list-glyphs`.

#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

mod canvas;
mod color;
mod compose;
mod error;
mod font;
mod output;
pub mod page;

pub use canvas::{Canvas, Paint, RadialGradient};
pub use color::{parse_color, Color, ParseColorError};
pub use compose::{
    compose, glyph_point_size, IconStyle, BACKGROUND_RADIUS, CANVAS_SIZE, GLYPH_SCALE,
    GRADIENT_DARKEN, SHADOW_BLUR_RADIUS, SHADOW_OFFSET,
};
pub use error::Error;
pub use font::{
    load_font, read_font_file, supported_codepoints, FontRegistry, GlyphMetrics, GlyphRasterizer,
    IconFont,
};
pub use output::{encode_png, write_atomic, write_png};

#[cfg(feature = "bin")]
mod cli;

#[cfg(feature = "bin")]
#[cfg_attr(docs_rs, doc(cfg(feature = "bin")))]
pub use cli::{parse_codepoint, run, Config, Parsed};
