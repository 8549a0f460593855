use anyhow::Result;
use larder_core::{
    catalog, CachingClient, IngredientSuggester, IngredientSuggestion, LarderConfig,
    RecipeFinder, RecipeMatch, SearchOutcome, SelectedIngredients, SpoonacularClient,
    ToggleOutcome,
};
use std::sync::Arc;

/// Build a selection from command-line names, warning about any past the cap.
pub fn select(names: &[String], max: usize) -> Vec<String> {
    let mut selection = SelectedIngredients::new(max);
    for name in names {
        if selection.contains(name) {
            continue;
        }
        match selection.toggle(name) {
            ToggleOutcome::Ignored => eprintln!("warning: ignoring blank ingredient name"),
            outcome => {
                if let Some(advisory) = outcome.advisory(max) {
                    eprintln!("warning: {} (ignoring {})", advisory, name);
                }
            }
        }
    }
    selection.snapshot()
}

pub async fn run_search(
    client: Arc<SpoonacularClient<CachingClient>>,
    config: &LarderConfig,
    names: &[String],
) -> SearchOutcome {
    let selected = select(names, config.max_ingredients);
    let finder = RecipeFinder::with_remote(client, config);
    finder.find_matching_recipes(&selected).await
}

pub async fn find(
    client: Arc<SpoonacularClient<CachingClient>>,
    config: &LarderConfig,
    names: &[String],
) -> Result<()> {
    let outcome = run_search(client, config, names).await;

    if let Some(advisory) = outcome.advisory {
        eprintln!("warning: {}", advisory);
    }
    if let Some(source) = outcome.source {
        tracing::info!(source, degraded = outcome.degraded, "search finished");
    }

    for m in &outcome.matches {
        print_match(m);
    }
    Ok(())
}

fn print_match(m: &RecipeMatch) {
    println!(
        "{:>3}%  {} ({}/{} ingredients)",
        m.match_percentage,
        m.title(),
        m.match_count,
        m.recipe.ingredients.len()
    );
    println!("      uses: {}", m.matched_ingredients.join(", "));
}

pub async fn suggest(client: Arc<SpoonacularClient<CachingClient>>, query: Option<&str>) {
    let suggester = IngredientSuggester::new(client);

    let suggestions = match query {
        Some(q) => {
            let outcome = suggester.suggest(q).await;
            if let Some(advisory) = outcome.advisory {
                eprintln!("warning: {}", advisory);
            }
            outcome.suggestions
        }
        None => suggester.popular(catalog::BROWSE_DEFAULT).await,
    };

    print_suggestions(suggestions);
}

/// Expanded catalog entries by name or category. No query lists the first page.
pub fn browse(query: Option<&str>) -> Vec<IngredientSuggestion> {
    catalog::browse(query.unwrap_or(""))
}

pub fn print_suggestions(suggestions: Vec<IngredientSuggestion>) {
    for s in suggestions {
        match s.category {
            Some(category) => println!("{}  [{}]", s.name, category),
            None => println!("{}", s.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_skips_blank_and_duplicate_names() {
        let selected = select(&names(&["", "Chicken", "  ", "chicken", "Garlic"]), 5);
        assert_eq!(selected, vec!["Chicken", "Garlic"]);
    }

    #[test]
    fn test_select_stops_at_cap() {
        let selected = select(&names(&["Egg", "Rice", "Onion", "Garlic", "Milk", "Beef"]), 5);
        assert_eq!(selected.len(), 5);
        assert!(!selected.contains(&"Beef".to_string()));
    }

    #[test]
    fn test_browse_by_category_and_default_page() {
        let protein = browse(Some("protein"));
        assert!(!protein.is_empty());
        assert!(protein
            .iter()
            .all(|s| s.category.as_deref() == Some("Protein") || s.name.to_lowercase().contains("protein")));

        assert_eq!(browse(None).len(), catalog::BROWSE_DEFAULT);
    }
}
