use crate::cache::ImageCache;
use crate::error::RecipeError;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::sync::Arc;

/// Downloads recipe photos through a shared [`ImageCache`]
pub struct ImageLoader {
    client: Client,
    cache: Arc<ImageCache>,
}

impl ImageLoader {
    pub fn new(cache: Arc<ImageCache>) -> Result<Self, RecipeError> {
        let client = Client::builder()
            .user_agent(concat!("recipe-fetch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, cache })
    }

    pub fn cache(&self) -> &Arc<ImageCache> {
        &self.cache
    }

    /// Return the image bytes for `url`, downloading them on a cache miss.
    ///
    /// A download that cannot be cached is still returned.
    pub async fn load(&self, url: &str) -> Result<Vec<u8>, RecipeError> {
        if let Some(bytes) = self.cache.get(url).await {
            return Ok(bytes);
        }

        debug!("Downloading image {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!("Image {} returned status {}", url, status);
            return Err(RecipeError::UnexpectedStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?.to_vec();
        if let Err(e) = self.cache.insert(url, bytes.clone()).await {
            warn!("Could not cache image {}: {}", url, e);
        }
        Ok(bytes)
    }
}
