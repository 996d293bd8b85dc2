use std::io::{self, Write};
use std::path::Path;

use image::ImageEncoder;

use crate::canvas::Canvas;
use crate::error::Error;

/// Encodes the canvas as an RGBA PNG.
///
/// # Errors
/// Whatever the PNG encoder reports.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, image::ImageError> {
    let image = canvas.as_image();
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Encodes the canvas and writes it to `path`, replacing any existing file.
///
/// # Errors
/// [`Error::Io`] if encoding or writing fails. No partial file is left
/// behind in that case.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), Error> {
    let bytes = encode_png(canvas).map_err(|e| Error::io(path, io::Error::other(e)))?;
    write_atomic(path, &bytes)
}

/// Writes `bytes` to a temporary file next to `path` and renames it into
/// place once complete.
///
/// # Errors
/// [`Error::Io`] if any step fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(path, e))?;
    file.write_all(bytes).map_err(|e| Error::io(path, e))?;

    // Temporary files are private; outputs should get the usual permissions.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| Error::io(path, e))?;
    }

    file.persist(path).map_err(|e| Error::io(path, e.error))?;
    log::debug!("Wrote {} bytes to '{}'", bytes.len(), path.display());
    Ok(())
}
