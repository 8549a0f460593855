//! End-to-end tests for recipe search against a mocked recipe API.
//!
//! API payloads live in `fixtures/` and mirror real Spoonacular responses.

use larder_core::{
    Advisory, IngredientSuggester, LarderConfig, MockClient, MockResponse, RecipeFinder,
    SearchSession, SpoonacularClient,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

fn selection(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn finder(mock: MockClient, api_key: Option<&str>) -> (Arc<MockClient>, RecipeFinder) {
    let http = Arc::new(mock);
    let config = LarderConfig {
        api_key: api_key.map(String::from),
        base_url: "https://api.example.com".to_string(),
        ..LarderConfig::default()
    };
    let client = SpoonacularClient::new(http.clone(), &config.base_url, config.api_key.clone());
    (http, RecipeFinder::with_remote(Arc::new(client), &config))
}

#[tokio::test]
async fn remote_results_are_scored_with_substring_rule() {
    let mock = MockClient::new().with_json(
        "/recipes/findByIngredients",
        &fixture("find_by_ingredients_chicken_garlic.json"),
    );
    let (_, finder) = finder(mock, Some("k"));

    let outcome = finder
        .find_matching_recipes(&selection(&["Chicken", "Garlic"]))
        .await;

    assert_eq!(outcome.source, Some("spoonacular"));
    assert!(!outcome.degraded);
    assert!(outcome.advisory.is_none());

    let summary: Vec<(&str, usize, u8)> = outcome
        .matches
        .iter()
        .map(|m| (m.title(), m.match_count, m.match_percentage))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Garlic Chicken Skillet", 2, 70),
            ("Roasted Garlic Hummus", 1, 40),
            ("Chicken Noodle Soup", 1, 32),
        ]
    );
    assert_eq!(
        outcome.matches[0].matched_ingredients,
        vec!["chicken breast", "garlic"]
    );
}

#[tokio::test]
async fn unconfigured_api_falls_back_without_requests() {
    let (http, finder) = finder(MockClient::new(), None);

    let outcome = finder
        .find_matching_recipes(&selection(&["Chicken", "Rice", "Garlic"]))
        .await;

    assert!(http.requests().await.is_empty());
    assert_eq!(outcome.source, Some("catalog"));
    assert!(outcome.advisory.is_none());
    assert_eq!(outcome.matches[0].title(), "Garlic Butter Chicken & Rice");
    assert_eq!(outcome.matches[0].match_percentage, 88);
}

#[tokio::test]
async fn invalid_key_falls_back_with_advisory() {
    let (_, finder) = finder(MockClient::new().with_status("/recipes/", 401), Some("bad"));

    let outcome = finder.find_matching_recipes(&selection(&["Egg"])).await;

    assert_eq!(outcome.advisory, Some(Advisory::InvalidCredential));
    assert_eq!(outcome.source, Some("catalog"));
    assert!(outcome.degraded);
    assert!(!outcome.matches.is_empty());
}

#[tokio::test]
async fn server_errors_and_timeouts_fall_back_silently() {
    for response in [
        MockResponse::Status(500),
        MockResponse::Timeout,
        MockResponse::NetworkError("connection refused".to_string()),
    ] {
        let (_, finder) = finder(
            MockClient::new().with_response("/recipes/", response),
            Some("k"),
        );
        let outcome = finder.find_matching_recipes(&selection(&["Egg"])).await;
        assert!(outcome.advisory.is_none());
        assert!(outcome.degraded);
        assert_eq!(outcome.source, Some("catalog"));
    }
}

#[tokio::test]
async fn empty_api_answer_falls_back_to_catalog() {
    let (_, finder) = finder(
        MockClient::new().with_json("/recipes/findByIngredients", "[]"),
        Some("k"),
    );

    let outcome = finder.find_matching_recipes(&selection(&["Avocado"])).await;
    assert_eq!(outcome.source, Some("catalog"));
    assert!(outcome
        .matches
        .iter()
        .any(|m| m.title() == "Avocado Toast"));
}

#[tokio::test]
async fn unrelated_api_recipes_fall_back_to_catalog() {
    let (http, finder) = finder(
        MockClient::new().with_json(
            "/recipes/findByIngredients",
            &fixture("find_by_ingredients_unrelated.json"),
        ),
        Some("k"),
    );

    let outcome = finder.find_matching_recipes(&selection(&["Egg"])).await;

    assert_eq!(http.requests().await.len(), 1);
    assert_eq!(outcome.source, Some("catalog"));
    assert!(!outcome.degraded);
    assert!(outcome.advisory.is_none());
    assert!(outcome
        .matches
        .iter()
        .any(|m| m.title() == "Spinach Mushroom Omelette"));
    assert!(outcome.matches.iter().all(|m| m.title() != "Easy Lemonade"));
}

#[tokio::test]
async fn blank_selection_entries_never_reach_the_api() {
    let (http, finder) = finder(
        MockClient::new().with_json(
            "/recipes/findByIngredients",
            &fixture("find_by_ingredients_chicken_garlic.json"),
        ),
        Some("k"),
    );

    let outcome = finder
        .find_matching_recipes(&selection(&["", "Chicken", "  ", "Garlic"]))
        .await;

    let requests = http.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains("ingredients=Chicken%2CGarlic&"));
    assert_eq!(outcome.matches[0].title(), "Garlic Chicken Skillet");
    assert_eq!(outcome.matches[0].match_percentage, 70);
    assert!(outcome.matches.iter().all(|m| m.title() != "Plain Water"));
}

#[tokio::test]
async fn ranking_invariants_hold_for_many_selections() {
    let finder = RecipeFinder::offline(9);
    let selections = [
        vec!["Egg"],
        vec!["Onion", "Garlic"],
        vec!["Beef", "Potato", "Carrot"],
        vec!["Milk", "Flour", "Sugar", "Egg", "Butter"],
        vec!["tomato", "BASIL"],
    ];

    for names in selections {
        let selected = selection(&names);
        let outcome = finder.find_matching_recipes(&selected).await;
        let again = finder.find_matching_recipes(&selected).await;
        assert_eq!(outcome, again, "search is not deterministic for {:?}", names);

        assert!(outcome.matches.len() <= 9);
        for m in &outcome.matches {
            assert!(m.match_count > 0);
            assert!(m.match_percentage <= 100);
            assert_eq!(m.match_count, m.matched_ingredients.len());
        }
        for pair in outcome.matches.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.match_count > b.match_count
                    || (a.match_count == b.match_count
                        && a.match_percentage >= b.match_percentage),
                "{:?} out of order",
                names
            );
        }
    }
}

#[tokio::test(start_paused = true)]
async fn slow_superseded_search_does_not_overwrite_newer_results() {
    let slow = r#"[{"id":1,"title":"Slow Eggs","usedIngredients":[{"name":"egg"}],"missedIngredients":[],"usedIngredientCount":1}]"#;
    let fast = r#"[{"id":2,"title":"Spinach Frittata","usedIngredients":[{"name":"egg"},{"name":"spinach"}],"missedIngredients":[],"usedIngredientCount":2}]"#;

    let mock = MockClient::new()
        .with_delayed_response(
            "ingredients=Egg&",
            MockResponse::Json(slow.to_string()),
            Duration::from_secs(2),
        )
        .with_json("ingredients=Egg%2CSpinach", fast);
    let (http, finder) = finder(mock, Some("k"));
    let session = SearchSession::new(Arc::new(finder), Duration::from_millis(300));

    let first = session.selection_changed(selection(&["Egg"]));
    // Let the first search clear the debounce window and go out.
    tokio::time::sleep(Duration::from_millis(400)).await;
    let second = session.selection_changed(selection(&["Egg", "Spinach"]));

    second.await.unwrap();
    assert_eq!(session.current().matches[0].title(), "Spinach Frittata");

    first.await.unwrap();
    let state = session.current();
    assert_eq!(state.selection, selection(&["Egg", "Spinach"]));
    assert_eq!(state.matches[0].title(), "Spinach Frittata");
    assert_eq!(http.requests().await.len(), 2);
}

#[tokio::test]
async fn suggestions_come_from_api_when_healthy() {
    let http = Arc::new(
        MockClient::new().with_json("/food/ingredients/search", &fixture("ingredient_search_tom.json")),
    );
    let client = SpoonacularClient::new(http, "https://api.example.com", Some("k".to_string()));
    let suggester = IngredientSuggester::new(Arc::new(client));

    let outcome = suggester.suggest("tom").await;
    let names: Vec<&str> = outcome.suggestions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["tomato", "cherry tomato", "tomato paste"]);
    assert!(!outcome.degraded);
}
