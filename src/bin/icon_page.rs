use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use glyph_icons::page::{icon_codes, render_page, FontFace};
use glyph_icons::write_atomic;

/// Builds an HTML page previewing every icon code listed in a text file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Newline separated list of hex icon codes
    input_file: PathBuf,
    /// Path to where the HTML page should be written
    output_file: PathBuf,
    /// Font family, optionally with the font file's extension, e.g. `tabler-icons.woff`
    font_family: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Usage errors exit 1 like every other failure; clap alone would use 2.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // clap's rendering already carries the usage line.
                eprint!("❌ {e}");
                std::process::exit(1);
            }
        },
    };

    let Ok(text) = std::fs::read_to_string(&args.input_file) else {
        eprintln!("Cannot read file {}", args.input_file.display());
        std::process::exit(1);
    };

    let face = FontFace::from_arg(&args.font_family);
    let codes: Vec<&str> = icon_codes(&text).collect();
    log::info!("{} icon codes for '{}'", codes.len(), face.family);

    let html = render_page(&face, codes);
    if let Err(e) = write_atomic(&args.output_file, html.as_bytes()) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }

    println!("File {} has been generated.", args.output_file.display());
}
