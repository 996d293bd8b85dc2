use std::fmt::Write;
use std::path::PathBuf;

use clap::Parser;
use rusttype::Font;

use glyph_icons::{read_font_file, supported_codepoints, write_atomic, Error};

/// Lists every codepoint a font has a glyph for, one hex code per line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the font file to inspect
    font_path: PathBuf,
    /// Path to where the list should be written
    #[arg(short, long, default_value = "supported_chars.txt")]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    match list(&args) {
        Ok(count) => println!("{count}"),
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

fn list(args: &Args) -> Result<usize, Error> {
    let data = read_font_file(&args.font_path)?;
    let font = Font::try_from_vec(data)
        .ok_or_else(|| Error::FontLoad(format!("failed to parse '{}'", args.font_path.display())))?;

    let codepoints = supported_codepoints(&font);
    let mut listing = String::with_capacity(codepoints.len() * 5);
    for c in &codepoints {
        let _ = writeln!(listing, "{:x}", u32::from(*c));
    }

    write_atomic(&args.output, listing.as_bytes())?;
    Ok(codepoints.len())
}
