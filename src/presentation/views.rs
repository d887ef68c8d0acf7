use askama::Template;

use crate::application::render::RenderError;
use crate::domain::types::Palette;
use crate::infra::assets::FontAssets;

/// Fixed skeleton for one rendered card document.
///
/// `heading_html` and `logo_strip` are inserted raw: both are produced by
/// the pipeline's sanitizing stages and are the only fields allowed to carry
/// markup. `font_size` arrives pre-escaped because it lands inside the
/// stylesheet, where askama's HTML escaping would be the wrong tool.
#[derive(Template)]
#[template(path = "card.html")]
pub struct CardTemplate<'a> {
    pub palette: Palette,
    pub font_size: String,
    pub heading_html: String,
    pub logo_strip: String,
    pub fonts: &'a FontAssets,
    pub brand: &'a str,
}

pub fn render_template<T: Template>(template: T) -> Result<String, RenderError> {
    template.render().map_err(|err| RenderError::Template {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Theme;

    #[test]
    fn template_interpolates_every_field() {
        let fonts = FontAssets::from_bytes(b"r", b"b", b"h");
        let template = CardTemplate {
            palette: Theme::Dark.palette(),
            font_size: "75px".to_string(),
            heading_html: "<strong>hi</strong>".to_string(),
            logo_strip: "<img class=\"logo\" alt=\"Generated Image\" src=\"a.png\"/>".to_string(),
            fonts: &fonts,
            brand: "thefuture.build",
        };

        let html = render_template(template).expect("template renders");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("background: #000000;"));
        assert!(html.contains("font-size: 75px;"));
        assert!(html.contains("<div class=\"heading\"><strong>hi</strong></div>"));
        assert!(html.contains("src=\"a.png\""));
        assert!(html.contains("<p class=\"url\">thefuture.build</p>"));
    }

    #[test]
    fn brand_text_is_escaped_by_the_template() {
        let fonts = FontAssets::from_bytes(b"r", b"b", b"h");
        let template = CardTemplate {
            palette: Theme::Light.palette(),
            font_size: "96px".to_string(),
            heading_html: String::new(),
            logo_strip: String::new(),
            fonts: &fonts,
            brand: "<evil>",
        };

        let html = render_template(template).expect("template renders");
        assert!(!html.contains("<evil>"));
        assert!(html.contains("&lt;evil&gt;"));
    }
}
