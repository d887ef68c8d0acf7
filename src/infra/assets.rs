//! Embedded font asset loading.

use std::{fs, path::Path};

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::config::FontSettings;

use super::error::InfraError;

/// Base64 payloads for the three fonts embedded into every rendered
/// document: regular and bold truetype body weights, plus the opentype
/// heading weight.
///
/// Loaded once at startup and immutable afterwards, so a single instance can
/// be shared across arbitrarily many concurrent render calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAssets {
    pub regular: String,
    pub bold: String,
    pub heading: String,
}

impl FontAssets {
    /// Read and encode the configured font files.
    ///
    /// Any missing or unreadable file is fatal: callers must not serve
    /// render requests without fonts.
    pub fn load(settings: &FontSettings) -> Result<Self, InfraError> {
        Ok(Self {
            regular: read_encoded(&settings.regular)?,
            bold: read_encoded(&settings.bold)?,
            heading: read_encoded(&settings.heading)?,
        })
    }

    /// Build assets from font bytes already in memory. Used by tests and by
    /// embedders that carry the font binaries themselves.
    pub fn from_bytes(regular: &[u8], bold: &[u8], heading: &[u8]) -> Self {
        Self {
            regular: STANDARD.encode(regular),
            bold: STANDARD.encode(bold),
            heading: STANDARD.encode(heading),
        }
    }
}

fn read_encoded(path: &Path) -> Result<String, InfraError> {
    let bytes = fs::read(path)
        .map_err(|err| InfraError::assets(path.display().to_string(), err.to_string()))?;
    Ok(STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn from_bytes_encodes_each_payload() {
        let fonts = FontAssets::from_bytes(b"regular", b"bold", b"heading");
        assert_eq!(fonts.regular, "cmVndWxhcg==");
        assert_eq!(fonts.bold, "Ym9sZA==");
        assert_eq!(fonts.heading, "aGVhZGluZw==");
    }

    #[test]
    fn load_reports_the_missing_path() {
        let settings = FontSettings {
            regular: PathBuf::from("definitely/not/here.ttf"),
            bold: PathBuf::from("also/missing.ttf"),
            heading: PathBuf::from("gone.otf"),
        };

        let err = FontAssets::load(&settings).expect_err("missing fonts are fatal");
        assert!(err.to_string().contains("definitely/not/here.ttf"));
    }
}
