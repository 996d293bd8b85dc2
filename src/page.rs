//! Static HTML preview page for a list of icon codes.

use std::fmt::Write;

/// Font face referenced by the preview page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFace {
    /// CSS family name, also the file stem.
    pub family: String,
    /// File extension without the dot.
    pub extension: String,
}

impl FontFace {
    /// Splits `tabler-icons.woff` into family `tabler-icons` and extension
    /// `woff`. Without an extension, `ttf` is assumed.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        let mut parts = arg.split('.').filter(|part| !part.is_empty());
        let family = parts.next().unwrap_or(arg).to_owned();
        let extension = parts.next().unwrap_or("ttf").to_owned();
        FontFace { family, extension }
    }

    /// File name the page loads the font from.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.family, self.extension)
    }
}

/// Non-empty, trimmed lines of `text`.
pub fn icon_codes(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Renders the preview page with one box per code.
#[must_use]
pub fn render_page<'a>(face: &FontFace, codes: impl IntoIterator<Item = &'a str>) -> String {
    let family = &face.family;
    let file = face.file_name();

    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{family} Icons</title>
    <style>
        @font-face {{
            font-family: '{family}';
            src: url('{file}') format('truetype');
        }}
        body {{
            font-family: Arial, sans-serif;
            text-align: center;
        }}
        .box {{
            display: inline-block;
            margin: 10px;
            padding: 10px;
            border: 1px solid #ddd;
            background-color: #3498db;
        }}
        .icon {{
            font-family: '{family}';
            font-size: 36px;
            color: #fff;
        }}
        .code {{
            display: inline-block;
            font-size: 16px;
            color: #fff;
            font-family: monospace;
        }}
    </style>
</head>
<body>
    <h1>{family} Icon List</h1>
"#
    );

    for code in codes {
        // Writing into a String cannot fail.
        let _ = write!(html, r#"<div class="box"><span class="icon">&#x{code};<br>"#);
        let _ = write!(html, r#"<span class="code">{code}</span></div>"#);
    }

    html.push_str("</body>\n</html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_font_argument() {
        assert_eq!(
            FontFace::from_arg("tabler-icons.woff"),
            FontFace { family: "tabler-icons".into(), extension: "woff".into() }
        );
        assert_eq!(FontFace::from_arg("FontAwesome").file_name(), "FontAwesome.ttf");
    }

    #[test]
    fn skips_blank_lines() {
        let codes: Vec<_> = icon_codes("f00\n\n  f01b \r\n\t\nea01").collect();
        assert_eq!(codes, ["f00", "f01b", "ea01"]);
    }

    #[test]
    fn one_box_per_code() {
        let face = FontFace::from_arg("FontAwesome");
        let html = render_page(&face, icon_codes("f00\nf01b\n"));

        assert_eq!(html.matches(r#"<div class="box">"#).count(), 2);
        assert!(html.contains("&#xf01b;<br><span class=\"code\">f01b</span>"));
        assert!(html.contains("src: url('FontAwesome.ttf') format('truetype');"));
        assert!(html.contains("<title>FontAwesome Icons</title>"));
        assert!(html.ends_with("</body>\n</html>"));
    }
}
