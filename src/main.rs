use log::{error, info, warn};
use recipe_fetch::view::{render, EMPTY_STATE};
use recipe_fetch::{AppConfig, ImageCache, ImageLoader, Recipe, RecipeFetcher};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "Usage: recipe-fetch [--cache-images] [UUID]";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut cache_images = false;
    let mut uuid = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--cache-images" => cache_images = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            other if uuid.is_none() && !other.starts_with('-') => uuid = Some(other.to_string()),
            other => return Err(format!("Unexpected argument: {}\n{}", other, USAGE).into()),
        }
    }

    let config = AppConfig::load()?;

    let recipes = match RecipeFetcher::new()?.fetch().await {
        Ok(recipes) => recipes,
        Err(e) => {
            if e.is_network() {
                warn!("Recipe feed unreachable, check the connection and try again");
            } else {
                warn!("Recipe feed could not be read");
            }
            print!("{}", EMPTY_STATE);
            return Err(e.into());
        }
    };

    print!("{}", render(&recipes, uuid.as_deref())?);

    if cache_images {
        let cache = Arc::new(ImageCache::open(config.cache).await?);
        warm_thumbnails(&ImageLoader::new(cache)?, &recipes).await;
    }

    Ok(())
}

async fn warm_thumbnails(loader: &ImageLoader, recipes: &[Recipe]) {
    let mut loaded = 0;
    for recipe in recipes {
        match loader.load(recipe.thumbnail_url()).await {
            Ok(_) => loaded += 1,
            Err(e) => warn!("Skipping thumbnail for {}: {}", recipe.name, e),
        }
    }
    info!(
        "Cached {}/{} thumbnails ({} bytes in memory)",
        loaded,
        recipes.len(),
        loader.cache().memory_usage().await
    );
}
