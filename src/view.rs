//! Plain-text rendering of the recipe grid and detail view

use crate::error::RecipeError;
use crate::find_recipe;
use crate::model::Recipe;

const GUTTER: &str = "  ";

/// Shown instead of the grid when the feed has no recipes
pub const EMPTY_STATE: &str = "No recipes available\n";

/// Render the detail view for `uuid` when given, otherwise the grid.
///
/// An unknown uuid is an error whether or not the feed is empty.
pub fn render(recipes: &[Recipe], uuid: Option<&str>) -> Result<String, RecipeError> {
    match uuid {
        Some(uuid) => Ok(render_detail(find_recipe(recipes, uuid)?)),
        None if recipes.is_empty() => Ok(EMPTY_STATE.to_string()),
        None => Ok(render_grid(recipes)),
    }
}

/// Render recipes as a two-column grid, one "name (cuisine)" cell each, in feed order
pub fn render_grid(recipes: &[Recipe]) -> String {
    let cells: Vec<String> = recipes
        .iter()
        .map(|recipe| format!("{} ({})", recipe.name, recipe.cuisine))
        .collect();

    let width = cells
        .iter()
        .step_by(2)
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in cells.chunks(2) {
        match row {
            [left, right] => out.push_str(&format!("{left:<width$}{GUTTER}{right}\n")),
            [left] => out.push_str(&format!("{left}\n")),
            _ => {}
        }
    }
    out
}

/// Render the detail view for a single recipe
pub fn render_detail(recipe: &Recipe) -> String {
    let mut out = format!(
        "{}\n{}\nPhoto: {}\n",
        recipe.name,
        recipe.cuisine,
        recipe.hero_url()
    );
    if let Some(source_url) = &recipe.source_url {
        out.push_str(&format!("Source: {source_url}\n"));
    }
    if let Some(youtube_url) = &recipe.youtube_url {
        out.push_str(&format!("Video: {youtube_url}\n"));
    }
    out
}
