use std::io;
use std::path::PathBuf;

use crate::color::ParseColorError;

/// Everything that can stop an icon from being produced.
///
/// All variants are terminal: the binaries report the message and exit with
/// status 1.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad or missing command line flag, missing flag value, wrong number of
    /// positional arguments, or an undecodable codepoint.
    #[error("{0}")]
    InvalidArgument(String),

    /// A color argument that is neither `clear` nor six hex digits.
    #[error("Invalid {field} format: {source}")]
    InvalidColor {
        /// Name of the option the color came from, as the user typed it.
        field: &'static str,
        /// What was wrong with the value.
        #[source]
        source: ParseColorError,
    },

    /// The font file does not exist.
    #[error("Font file not found: {}", path.display())]
    FontNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The font file exists but could not be registered or resolved.
    #[error("Error loading font: {0}")]
    FontLoad(String),

    /// Compositing could not be carried out, e.g. a glyph could not be
    /// measured.
    #[error("Render error: {0}")]
    Render(String),

    /// Encoding or writing an output file failed.
    #[error("Error saving file {}: {source}", path.display())]
    Io {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
