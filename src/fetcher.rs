use crate::decoder::decode_recipes;
use crate::error::RecipeError;
use crate::model::Recipe;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};

/// Location of the recipe feed
pub const RECIPES_URL: &str = "https://d3jbb8n5wk0qxi.cloudfront.net/recipes.json";

/// Fetches the recipe feed from a fixed endpoint.
///
/// One GET per call: no retries, no timeout override, no caching.
pub struct RecipeFetcher {
    client: Client,
    endpoint: String,
}

impl RecipeFetcher {
    pub fn new() -> Result<Self, RecipeError> {
        Self::with_endpoint(RECIPES_URL)
    }

    #[doc(hidden)]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, RecipeError> {
        let client = Client::builder()
            .user_agent(concat!("recipe-fetch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and decode the feed.
    ///
    /// Anything other than a 200 response is reported as
    /// [`RecipeError::UnexpectedStatus`], including other 2xx codes.
    pub async fn fetch(&self) -> Result<Vec<Recipe>, RecipeError> {
        debug!("Fetching recipes from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Recipe feed returned status {}", status);
            return Err(RecipeError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        let recipes = decode_recipes(&body)?;
        info!("Fetched {} recipes", recipes.len());
        Ok(recipes)
    }
}
