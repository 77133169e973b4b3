use serde::{Deserialize, Serialize};

/// A single recipe entry from the feed.
///
/// Required fields must be present as JSON strings. The two link fields are
/// optional and stay `None` when the key is missing, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub cuisine: String,
    pub name: String,
    pub photo_url_large: String,
    pub photo_url_small: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Identifier from the feed, not checked for UUID format or uniqueness
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

impl Recipe {
    /// Image shown in the grid cell
    pub fn thumbnail_url(&self) -> &str {
        &self.photo_url_small
    }

    /// Image shown in the detail view
    pub fn hero_url(&self) -> &str {
        &self.photo_url_large
    }
}

/// Top-level object of the recipe feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipes: Vec<Recipe>,
}
