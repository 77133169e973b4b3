pub mod cache;
pub mod config;
pub mod decoder;
pub mod error;
pub mod fetcher;
pub mod images;
pub mod model;
pub mod view;

pub use cache::{CacheConfig, ImageCache};
pub use crate::config::AppConfig;
pub use decoder::{decode_recipe, decode_recipes, decode_response};
pub use error::RecipeError;
pub use fetcher::{RecipeFetcher, RECIPES_URL};
pub use images::ImageLoader;
pub use model::{Recipe, RecipeResponse};

/// Fetch the recipe feed from the default endpoint.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_fetch::RecipeError> {
/// for recipe in recipe_fetch::fetch_recipes().await? {
///     println!("{} ({})", recipe.name, recipe.cuisine);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_recipes() -> Result<Vec<Recipe>, RecipeError> {
    RecipeFetcher::new()?.fetch().await
}

/// Find a recipe by its uuid
pub fn find_recipe<'a>(recipes: &'a [Recipe], uuid: &str) -> Result<&'a Recipe, RecipeError> {
    recipes
        .iter()
        .find(|recipe| recipe.uuid == uuid)
        .ok_or_else(|| RecipeError::NotFound(uuid.to_string()))
}
