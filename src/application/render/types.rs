use thiserror::Error;

use crate::domain::types::CardRequest;

/// Structured errors surfaced by the rendering pipeline. Collaborator
/// failures propagate unchanged; producing a partially sanitized document
/// would be a security defect, so there is no fallback rendering.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
    #[error("emoji substitution failed: {message}")]
    Emoji { message: String },
    #[error("document template rendering failed: {message}")]
    Template { message: String },
}

/// Converts markdown source into an HTML fragment. Recognized syntax becomes
/// well-formed markup; raw angle brackets the converter does not interpret
/// are entity-escaped.
pub trait MarkdownRender: Send + Sync {
    fn render(&self, source: &str) -> Result<String, RenderError>;
}

/// Replaces emoji scalar sequences in an HTML fragment with inline
/// `<img class="emoji">` tags. Must be idempotent on input containing no
/// emoji, returning it unchanged.
pub trait EmojiRender: Send + Sync {
    fn render(&self, source: &str) -> Result<String, RenderError>;
}

/// Escapes arbitrary untrusted text so the result is safe to interpolate
/// into HTML element content, attribute values, or CSS property values.
/// Infallible over valid UTF-8, including the empty string.
pub trait SanitizeText: Send + Sync {
    fn sanitize(&self, source: &str) -> String;
}

/// Trait exposed by the rendering pipeline. Implementations must be pure and
/// deterministic: given the same request, they return identical output or
/// errors.
pub trait RenderService: Send + Sync {
    fn render(&self, request: &CardRequest) -> Result<String, RenderError>;
}
