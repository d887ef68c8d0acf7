use comrak::{Arena, format_html, parse_document};

use crate::application::render::types::{MarkdownRender, RenderError};

use super::config::{build_fragment_sanitizer, default_options};

/// Comrak-backed markdown collaborator.
///
/// The rendered fragment is cleaned by a fixed allow-list before it leaves
/// this stage; markdown source is semi-trusted formatting input, distinct
/// from the fully escaped plain-text path.
pub struct ComrakMarkdown {
    options: comrak::Options<'static>,
    sanitizer: ammonia::Builder<'static>,
}

impl ComrakMarkdown {
    pub fn new() -> Self {
        Self {
            options: default_options(),
            sanitizer: build_fragment_sanitizer(),
        }
    }
}

impl Default for ComrakMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRender for ComrakMarkdown {
    fn render(&self, source: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, source, &self.options);

        let mut html = String::new();
        format_html(root, &self.options, &mut html).map_err(|err| RenderError::Markdown {
            message: err.to_string(),
        })?;

        Ok(self.sanitizer.clean(&html).to_string())
    }
}
