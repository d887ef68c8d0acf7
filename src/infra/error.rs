use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("font asset `{path}` could not be loaded: {message}")]
    Assets { path: String, message: String },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn assets(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Assets {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
