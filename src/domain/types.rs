use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_FONT_SIZE: &str = "96px";

/// Colour values applied across the stylesheet of one rendered document.
///
/// Palettes are fixed per theme and never derived from user input, so their
/// values are interpolated verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background colour.
    pub background: &'static str,
    /// Heading and footer text colour.
    pub foreground: &'static str,
    /// Colour of `<strong>` emphasis inside the heading.
    pub accent: &'static str,
    /// Colour of the decorative background dot pattern.
    pub radial: &'static str,
}

const LIGHT: Palette = Palette {
    background: "white",
    foreground: "#000000",
    accent: "#2442D8",
    radial: "lightgray",
};

const DARK: Palette = Palette {
    background: "#000000",
    foreground: "white",
    accent: "#FFBAB9",
    radial: "dimgray",
};

/// Rendering theme. Unrecognized parameter values fall back to `Light`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Resolve a raw query-parameter value. Anything other than the
    /// recognized themes silently maps to the light palette.
    pub fn from_param(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            other => {
                if !other.is_empty() {
                    debug!(theme = other, "unrecognized theme, falling back to light");
                }
                Theme::Light
            }
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        Self::from_param(&value)
    }
}

/// Parsed request driving one render call.
///
/// Instances arrive fully defaulted from the upstream query parser; the
/// serde defaults mirror that parser so request fixtures and the dump binary
/// can omit fields the same way the HTTP layer does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardRequest {
    /// Raw user-supplied text; may contain markdown or plain text. Untrusted.
    pub text: String,
    pub theme: Theme,
    /// Selects markdown rendering over plain sanitization for `text`.
    pub md: bool,
    /// CSS length for the heading, e.g. `"75px"`. Untrusted.
    #[serde(alias = "fontSize")]
    pub font_size: String,
    /// Ordered logo image sources; sequence order is display order. Untrusted.
    pub images: Vec<String>,
}

impl Default for CardRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            theme: Theme::Light,
            md: false,
            font_size: DEFAULT_FONT_SIZE.to_string(),
            images: Vec::new(),
        }
    }
}

impl CardRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_markdown(mut self, md: bool) -> Self {
        self.md = md;
        self
    }

    pub fn with_font_size(mut self, font_size: impl Into<String>) -> Self {
        self.font_size = font_size.into();
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_theme_falls_back_to_light() {
        assert_eq!(Theme::from_param("dark"), Theme::Dark);
        assert_eq!(Theme::from_param("light"), Theme::Light);
        assert_eq!(Theme::from_param("solarized"), Theme::Light);
        assert_eq!(Theme::from_param(""), Theme::Light);
    }

    #[test]
    fn palettes_carry_the_fixed_colour_table() {
        let light = Theme::Light.palette();
        assert_eq!(light.background, "white");
        assert_eq!(light.accent, "#2442D8");

        let dark = Theme::Dark.palette();
        assert_eq!(dark.background, "#000000");
        assert_eq!(dark.foreground, "white");
        assert_eq!(dark.accent, "#FFBAB9");
        assert_eq!(dark.radial, "dimgray");
    }

    #[test]
    fn request_deserializes_with_upstream_defaults() {
        let request: CardRequest =
            serde_json::from_str(r#"{"text":"hello"}"#).expect("request parses");
        assert_eq!(request.text, "hello");
        assert_eq!(request.theme, Theme::Light);
        assert!(!request.md);
        assert_eq!(request.font_size, "96px");
        assert!(request.images.is_empty());
    }

    #[test]
    fn request_accepts_camel_case_font_size_and_unknown_theme() {
        let request: CardRequest =
            serde_json::from_str(r#"{"text":"x","theme":"banana","fontSize":"40px"}"#)
                .expect("request parses");
        assert_eq!(request.theme, Theme::Light);
        assert_eq!(request.font_size, "40px");
    }
}
