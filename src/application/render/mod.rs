//! Card rendering pipeline.
//!
//! The pipeline is intentionally pure: it accepts a parsed request, produces
//! a deterministic HTML document, and surfaces structured errors. Given the
//! same request and the same font assets it returns byte-identical output.

mod service;
mod types;

pub use service::{CardRenderService, ComrakMarkdown, EntityEscaper, TwemojiRenderer};
pub use types::{EmojiRender, MarkdownRender, RenderError, RenderService, SanitizeText};
