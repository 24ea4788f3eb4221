use once_cell::sync::Lazy;
use ratatui::style::Color;
use ratatui::style::Style;
use syntect::highlighting::Color as SyntectColor;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

pub static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

static THEME: Lazy<Theme> = Lazy::new(|| {
    let mut themes = ThemeSet::load_defaults();
    return themes
        .themes
        .remove("base16-ocean.dark")
        .unwrap_or_default();
});

pub struct Syntaxes {}

impl Syntaxes {
    /// Resolves a code fence language tag, falling back to plain text.
    pub fn get(name: &str) -> &'static SyntaxReference {
        let name = name.trim();
        if name.is_empty() {
            return SYNTAX_SET.find_syntax_plain_text();
        }

        return SYNTAX_SET
            .find_syntax_by_token(name)
            .unwrap_or_else(|| return SYNTAX_SET.find_syntax_plain_text());
    }

    pub fn theme() -> &'static Theme {
        return &THEME;
    }

    pub fn translate_colour(colour: SyntectColor) -> Option<Color> {
        if colour.a == 0 {
            return None;
        }

        return Some(Color::Rgb(colour.r, colour.g, colour.b));
    }

    /// Style of the ``` lines around a code block.
    pub fn fence_style() -> Style {
        return Style {
            fg: Some(Color::DarkGray),
            ..Style::default()
        };
    }
}
