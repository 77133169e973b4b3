use crate::error::RecipeError;
use crate::model::{Recipe, RecipeResponse};
use log::debug;

/// Decode a full feed payload.
///
/// Decoding is all or nothing: one malformed record fails the whole payload.
pub fn decode_response(bytes: &[u8]) -> Result<RecipeResponse, RecipeError> {
    let response: RecipeResponse = serde_json::from_slice(bytes)?;
    debug!("Decoded {} recipes", response.recipes.len());
    Ok(response)
}

/// Decode a feed payload and return its recipes in feed order
pub fn decode_recipes(bytes: &[u8]) -> Result<Vec<Recipe>, RecipeError> {
    decode_response(bytes).map(|response| response.recipes)
}

/// Decode a single recipe object
pub fn decode_recipe(bytes: &[u8]) -> Result<Recipe, RecipeError> {
    let recipe: Recipe = serde_json::from_slice(bytes)?;
    debug!("Decoded recipe {}", recipe.uuid);
    Ok(recipe)
}
