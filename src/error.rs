use thiserror::Error;

/// Errors that can occur while fetching, decoding or caching recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Transport-level failure talking to the server
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with something other than 200 OK
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    /// Payload was not valid JSON or did not match the recipe schema
    #[error("Failed to decode recipes: {0}")]
    Decode(#[from] serde_json::Error),

    /// Disk cache I/O failure
    #[error("Cache error: {0}")]
    Cache(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// No recipe with the requested uuid
    #[error("No recipe with uuid {0}")]
    NotFound(String),
}

impl RecipeError {
    /// Whether the failure came from talking to the server rather than from the payload
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            RecipeError::Network(_) | RecipeError::UnexpectedStatus(_)
        )
    }
}
