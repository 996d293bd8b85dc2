#![cfg(feature = "bin")]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSans.ttf");
const FAMILY: &str = "DejaVu Sans";
const STAR: &str = "2605";

/// A scratch directory holding `DejaVu Sans.ttf`, used as working directory.
fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(FONT, dir.path().join(format!("{FAMILY}.ttf"))).unwrap();
    dir
}

fn glyph_icon(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_glyph-icon"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn render(dir: &Path, extra: &[&str]) -> image::RgbaImage {
    let mut args = vec![STAR, "3498db", "--font-name", FAMILY, "--output", "icon.png"];
    args.extend_from_slice(extra);

    let output = glyph_icon(dir, &args);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    image::open(dir.join("icon.png")).unwrap().to_rgba8()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn png_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "png"))
        .collect()
}

#[test]
fn no_arguments_prints_help_and_fails() {
    let dir = workspace();
    let output = glyph_icon(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--font-name"));
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn help_succeeds() {
    let dir = workspace();
    let output = glyph_icon(dir.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--no-gradient"));
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn unknown_option_fails() {
    let dir = workspace();
    let output = glyph_icon(dir.path(), &[STAR, "--bogus"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown option"));
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn too_many_positionals_fail() {
    let dir = workspace();
    let output = glyph_icon(dir.path(), &[STAR, "3498db", "ffffff"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Too many positional arguments"));
}

#[test]
fn renders_centered_icon() {
    let dir = workspace();
    let args = [STAR, "3498db", "--font-name", FAMILY, "--output", "icon.png"];
    let output = glyph_icon(dir.path(), &args);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Icon saved as:"));

    let image = image::open(dir.path().join("icon.png")).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (512, 512));
    assert_eq!(image.get_pixel(256, 256).0, [255, 255, 255, 255]);
}

#[test]
fn default_output_name() {
    let dir = workspace();
    let output = glyph_icon(dir.path(), &[STAR, "--font-name", FAMILY]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(dir.path().join("output.png").exists());
}

#[test]
fn gradient_background_varies() {
    let dir = workspace();
    let image = render(dir.path(), &[]);
    assert_ne!(image.get_pixel(0, 0), image.get_pixel(256, 2));
}

#[test]
fn flat_background_without_gradient() {
    let dir = workspace();
    let image = render(dir.path(), &["--no-gradient"]);
    assert_eq!(image.get_pixel(0, 0), image.get_pixel(511, 511));
    assert_eq!(image.get_pixel(0, 0).0, [0x34, 0x98, 0xdb, 255]);
}

#[test]
fn reversed_fills_glyph_with_gradient() {
    let dir = workspace();
    let image = render(dir.path(), &["--reversed"]);

    assert_eq!(image.get_pixel(0, 0).0[3], 0);
    assert_eq!(image.get_pixel(511, 0).0[3], 0);

    let center = image.get_pixel(256, 256).0;
    assert_eq!(center[3], 255);
    assert_ne!(center, [255, 255, 255, 255]);
}

#[test]
fn verbose_prints_configuration() {
    let dir = workspace();
    let output = glyph_icon(dir.path(), &[STAR, "--font-name", FAMILY, "--verbose"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration:"));
    assert!(stdout.contains("Canvas fill: #3498db, glyph: #ffffff"));
    assert!(stdout.contains("Font: 'DejaVu Sans' at 358.4pt"));
}

#[test]
fn verbose_shows_swapped_colors_when_reversed() {
    let dir = workspace();
    let args = [
        STAR, "000000", "--font-name", FAMILY, "--font-color", "clear", "--reversed", "--verbose",
    ];
    let output = glyph_icon(dir.path(), &args);
    assert!(output.status.success(), "{}", stderr(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Canvas fill: clear, glyph: #000000"), "{stdout}");
}

#[test]
fn missing_font_file_fails() {
    let dir = workspace();
    let output = glyph_icon(dir.path(), &[STAR, "--font-name", "Nowhere"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Font file not found"));
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn family_name_mismatch_fails() {
    let dir = workspace();
    std::fs::copy(FONT, dir.path().join("FontAwesome.ttf")).unwrap();
    let output = glyph_icon(dir.path(), &[STAR]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error loading font"));
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn invalid_color_fails() {
    let dir = workspace();
    let output = glyph_icon(dir.path(), &[STAR, "12345", "--font-name", FAMILY]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid base color format: 12345"));
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn missing_glyph_fails_without_output() {
    let dir = workspace();
    let output = glyph_icon(dir.path(), &["10fffd", "--font-name", FAMILY]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Render error"));
    assert!(png_files(dir.path()).is_empty());
}
