use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

use crate::color::Color;
use crate::compose::{compose, glyph_point_size, IconStyle};
use crate::error::Error;
use crate::font::FontRegistry;
use crate::output::write_png;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Renders a single icon font glyph onto a colored canvas and saves it as PNG",
    long_about = None,
    override_usage = "glyph-icon [OPTIONS] <icon-unicode-hex> <base-color-hex>"
)]
struct Args {
    /// Unicode codepoint of the icon in hex, then the base color in hex
    #[arg(value_name = "ARGS")]
    positional: Vec<String>,
    /// Font family name; the font is read from `<NAME>.ttf` in the current directory
    #[arg(long, value_name = "NAME", default_value = "FontAwesome")]
    font_name: String,
    /// Path to where the PNG should be written
    #[arg(long, value_name = "FILE", default_value = "output.png")]
    output: PathBuf,
    /// Disable the gradient background
    #[arg(long)]
    no_gradient: bool,
    /// Swap base and font colors and fill the glyph with a gradient instead
    #[arg(long)]
    reversed: bool,
    /// Glyph color in hex, or `clear`
    #[arg(long, value_name = "COLOR", default_value = "ffffff")]
    font_color: String,
    /// Print the resolved configuration and font info
    #[arg(long)]
    verbose: bool,
}

/// Settings for one `glyph-icon` run, exactly as given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Font family name, also the stem of the font file.
    pub font_name: String,
    /// Where the PNG is written, relative to the current directory.
    pub output: PathBuf,
    /// Whether colors fade toward black away from the center.
    pub gradient: bool,
    /// Canvas color, or the glyph gradient color when reversed.
    pub base_color: String,
    /// Glyph color, or the canvas color when reversed.
    pub font_color: String,
    /// Hex codepoint of the glyph.
    pub codepoint: String,
    /// Print the configuration and font details while running.
    pub verbose: bool,
    /// Render the glyph as a gradient-filled mask.
    pub reversed: bool,
}

/// Result of reading the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parsed {
    /// Render an icon with this configuration.
    Render(Config),
    /// Print this text and exit successfully, e.g. for `--help`.
    Print(String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            font_name: "FontAwesome".to_owned(),
            output: PathBuf::from("output.png"),
            gradient: true,
            base_color: "3498db".to_owned(),
            font_color: "ffffff".to_owned(),
            codepoint: "f00".to_owned(),
            verbose: false,
            reversed: false,
        }
    }
}

impl Config {
    /// Parses a full command line, program name included.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for an empty command line, unknown options,
    /// options missing their value, and more than two positional arguments.
    pub fn from_args<I, T>(args: I) -> Result<Parsed, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.len() <= 1 {
            return Err(Error::InvalidArgument("No arguments given".to_owned()));
        }

        let args = match Args::try_parse_from(args) {
            Ok(args) => args,
            Err(e) => return classify(&e),
        };

        let mut positional = args.positional.into_iter();
        let defaults = Config::default();
        let codepoint = positional.next().unwrap_or(defaults.codepoint);
        let base_color = positional.next().unwrap_or(defaults.base_color);
        if positional.next().is_some() {
            return Err(Error::InvalidArgument("Too many positional arguments".to_owned()));
        }

        Ok(Parsed::Render(Config {
            font_name: args.font_name,
            output: args.output,
            gradient: !args.no_gradient,
            base_color,
            font_color: args.font_color,
            codepoint,
            verbose: args.verbose,
            reversed: args.reversed,
        }))
    }

    /// Help text for the command line.
    #[must_use]
    pub fn help() -> String {
        use clap::CommandFactory;
        Args::command().render_help().to_string()
    }

    /// Font file the family is loaded from.
    #[must_use]
    pub fn font_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.ttf", self.font_name))
    }

    /// Resolves colors and the glyph.
    ///
    /// Colors are parsed under the names the user gave them and only then
    /// swapped for reversed mode.
    ///
    /// # Errors
    /// [`Error::InvalidColor`] for a malformed color,
    /// [`Error::InvalidArgument`] for a malformed codepoint.
    pub fn style(&self) -> Result<IconStyle, Error> {
        let base = self
            .base_color
            .parse::<Color>()
            .map_err(|source| Error::InvalidColor { field: "base color", source })?;
        let font = self
            .font_color
            .parse::<Color>()
            .map_err(|source| Error::InvalidColor { field: "font color", source })?;
        let (fill, ink) = if self.reversed { (font, base) } else { (base, font) };

        Ok(IconStyle {
            glyph: parse_codepoint(&self.codepoint)?,
            fill,
            ink,
            gradient: self.gradient,
            reversed: self.reversed,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        writeln!(f, "Configuration:")?;
        writeln!(f, "  font name:  {} ({})", self.font_name, self.font_path().display())?;
        writeln!(f, "  output:     {}", self.output.display())?;
        writeln!(f, "  icon:       {}", self.codepoint)?;
        writeln!(f, "  base color: {}", self.base_color)?;
        writeln!(f, "  font color: {}", self.font_color)?;
        writeln!(f, "  gradient:   {}", yes_no(self.gradient))?;
        write!(f, "  reversed:   {}", yes_no(self.reversed))
    }
}

fn classify(e: &clap::Error) -> Result<Parsed, Error> {
    let invalid_arg = || match e.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.clone(),
        _ => String::new(),
    };

    let message = match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            return Ok(Parsed::Print(e.to_string()));
        }
        ErrorKind::UnknownArgument => format!("Unknown option: {}", invalid_arg()),
        ErrorKind::InvalidValue => format!("Missing value for option: {}", invalid_arg()),
        _ => {
            let rendered = e.to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            first_line.trim_start_matches("error: ").to_owned()
        }
    };
    Err(Error::InvalidArgument(message))
}

/// Decodes a hex codepoint such as `f00` or `1F600`.
///
/// # Errors
/// [`Error::InvalidArgument`] if the string is not hex or not a Unicode
/// scalar value.
pub fn parse_codepoint(s: &str) -> Result<char, Error> {
    let hex = s.trim();
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidArgument(format!("Invalid icon codepoint: {s}")));
    }

    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| Error::InvalidArgument(format!("{hex} is not a valid Unicode codepoint")))
}

/// Renders the icon described by `config` and writes it, returning the
/// absolute path of the written file.
///
/// # Errors
/// Any [`Error`]: colors and codepoint are checked before the font is
/// loaded, and nothing is written unless rendering succeeded.
pub fn run(config: &Config) -> Result<PathBuf, Error> {
    let style = config.style()?;
    if config.verbose {
        println!("{config}");
        println!("Canvas fill: {}, glyph: {}", style.fill, style.ink);
    }

    let mut fonts = FontRegistry::new();
    fonts.register_file(&config.font_path())?;
    let font = fonts.resolve(&config.font_name, glyph_point_size())?;
    if config.verbose {
        println!(
            "Font: '{}' at {:.1}pt, {} glyphs",
            font.family(),
            font.point_size(),
            font.glyph_count()
        );
    }

    let canvas = compose(&style, &font)?;

    let output = absolute(&config.output)?;
    write_png(&canvas, &output)?;
    log::info!("Rendered U+{:04X} into '{}'", style.glyph as u32, output.display());
    Ok(output)
}

fn absolute(path: &Path) -> Result<PathBuf, Error> {
    let current_dir = std::env::current_dir().map_err(|e| Error::io(path, e))?;
    Ok(current_dir.join(path))
}
