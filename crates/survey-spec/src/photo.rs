use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque destination for a photo that is about to be captured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PhotoLocator(String);

impl PhotoLocator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhotoLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("failed to prepare photo destination: {0}")]
    Io(#[from] std::io::Error),
    #[error("photo destination unavailable: {0}")]
    Unavailable(String),
}

/// External capability that allocates a fresh destination for a captured photo.
pub trait PhotoLocatorProvider {
    fn new_locator(&mut self) -> Result<PhotoLocator, PhotoError>;
}
