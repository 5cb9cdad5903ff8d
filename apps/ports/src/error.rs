use thiserror::Error;

/// Failure at the boundary between the ports and the browser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("no window: {0}")]
    NoWindow(String),

    #[error("element #{0} not found")]
    ElementNotFound(String),

    #[error("animation frame: {0}")]
    Frame(String),

    #[error("object url: {0}")]
    ObjectUrl(String),

    #[error("image decode failed: {0}")]
    ImageDecode(String),

    #[error("download: {0}")]
    Download(String),

    #[error("invalid config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PortError {
    fn from(e: serde_json::Error) -> Self {
        PortError::Config(e.to_string())
    }
}
