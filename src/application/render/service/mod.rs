mod config;
mod emoji;
mod markdown;
mod sanitize;

use crate::application::render::types::{
    EmojiRender, MarkdownRender, RenderError, RenderService, SanitizeText,
};
use crate::config::CardSettings;
use crate::domain::types::CardRequest;
use crate::infra::assets::FontAssets;
use crate::presentation::views::{CardTemplate, render_template};

pub use emoji::TwemojiRenderer;
pub use markdown::ComrakMarkdown;
pub use sanitize::EntityEscaper;

/// Default rendering pipeline: Comrak markdown, Ammonia entity escaping and
/// Twemoji-style emoji substitution, composed over the fixed card template.
pub struct CardRenderService {
    markdown: Box<dyn MarkdownRender>,
    emoji: Box<dyn EmojiRender>,
    sanitizer: Box<dyn SanitizeText>,
    fonts: FontAssets,
    brand: String,
}

impl CardRenderService {
    /// Construct the default pipeline around previously loaded font assets.
    pub fn new(fonts: FontAssets, settings: &CardSettings) -> Self {
        Self::from_parts(
            Box::new(ComrakMarkdown::new()),
            Box::new(TwemojiRenderer::new(
                &settings.emoji_asset_base,
                &settings.emoji_folder,
                &settings.emoji_ext,
            )),
            Box::new(EntityEscaper),
            fonts,
            settings.brand.clone(),
        )
    }

    /// Assemble a service from explicit collaborators. Intended for tests
    /// that substitute one stage without touching the rest of the pipeline.
    pub fn from_parts(
        markdown: Box<dyn MarkdownRender>,
        emoji: Box<dyn EmojiRender>,
        sanitizer: Box<dyn SanitizeText>,
        fonts: FontAssets,
        brand: String,
    ) -> Self {
        Self {
            markdown,
            emoji,
            sanitizer,
            fonts,
            brand,
        }
    }
}

impl RenderService for CardRenderService {
    fn render(&self, request: &CardRequest) -> Result<String, RenderError> {
        let body = if request.md {
            self.markdown.render(&request.text)?
        } else {
            self.sanitizer.sanitize(&request.text)
        };
        let heading_html = self.emoji.render(&body)?;

        let template = CardTemplate {
            palette: request.theme.palette(),
            font_size: self.sanitizer.sanitize(&request.font_size),
            heading_html,
            logo_strip: build_logo_strip(&request.images, self.sanitizer.as_ref()),
            fonts: &self.fonts,
            brand: &self.brand,
        };
        render_template(template)
    }
}

/// Builds the header strip: one `<img class="logo">` per source, with a plus
/// separator between consecutive images and never before the first.
fn build_logo_strip(images: &[String], sanitizer: &dyn SanitizeText) -> String {
    let mut strip = String::new();
    for (index, src) in images.iter().enumerate() {
        if index > 0 {
            strip.push_str("<div class=\"plus\">+</div>");
        }
        strip.push_str("<img class=\"logo\" alt=\"Generated Image\" src=\"");
        strip.push_str(&sanitizer.sanitize(src));
        strip.push_str("\"/>");
    }
    strip
}
