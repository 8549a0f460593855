use anyhow::{bail, Result};
use larder_core::{
    CachingClient, FavoritesStore, FileStore, KeyValueStore, LarderConfig, SpoonacularClient,
    ThemeStore,
};
use std::sync::Arc;

use crate::search::run_search;
use crate::{FavoritesAction, ThemeAction};

fn store(config: &LarderConfig) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::new(&config.data_dir))
}

fn report_persist_failure(favorites: &FavoritesStore) {
    if let (Some(advisory), Some(e)) = (favorites.advisory(), favorites.last_persist_error()) {
        eprintln!("warning: {} ({})", advisory, e);
    }
}

pub async fn favorites(
    client: Arc<SpoonacularClient<CachingClient>>,
    config: &LarderConfig,
    action: FavoritesAction,
) -> Result<()> {
    let mut favorites = FavoritesStore::load(store(config));

    match action {
        FavoritesAction::List => {
            if favorites.is_empty() {
                println!("No favorites saved");
            }
            for recipe in favorites.list() {
                println!("{}", recipe.title);
                println!("      {}", recipe.ingredients.join(", "));
            }
        }
        FavoritesAction::Add { ingredients, title } => {
            let outcome = run_search(client, config, &ingredients).await;
            let Some(found) = outcome
                .matches
                .into_iter()
                .find(|m| m.title().eq_ignore_ascii_case(&title))
            else {
                bail!("No recipe titled '{}' among the matches", title);
            };

            let saved_title = found.recipe.title.clone();
            if favorites.add(found.recipe) {
                println!("Saved {}", saved_title);
            } else {
                println!("{} is already a favorite", saved_title);
            }
            report_persist_failure(&favorites);
        }
        FavoritesAction::Remove { title } => {
            if !favorites.remove(&title) {
                bail!("'{}' is not a favorite", title);
            }
            println!("Removed {}", title);
            report_persist_failure(&favorites);
        }
        FavoritesAction::Clear => {
            let count = favorites.len();
            favorites.clear_all();
            println!("Removed {} favorites", count);
            report_persist_failure(&favorites);
        }
    }
    Ok(())
}

pub fn theme(config: &LarderConfig, action: ThemeAction) {
    let mut theme = ThemeStore::load(store(config));
    match action {
        ThemeAction::Show => println!("{}", theme.current()),
        ThemeAction::Toggle => {
            println!("{}", theme.toggle());
            if let Some(advisory) = theme.advisory() {
                eprintln!("warning: {}", advisory);
            }
        }
    }
}
