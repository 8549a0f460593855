pub mod catalog;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod http;
pub mod matching;
pub mod selection;
pub mod session;
pub mod source;
pub mod spoonacular;
pub mod storage;
pub mod suggest;
pub mod theme;
pub mod types;

pub use config::{ConfigError, LarderConfig, Profile};
pub use debounce::{Debouncer, QueryTicket, QueryTracker};
pub use engine::{RecipeFinder, SearchOutcome};
pub use error::{FetchError, SourceError, StorageError};
pub use favorites::FavoritesStore;
pub use http::{CachingClient, CachingClientBuilder, HttpClient, HttpResponse, MockClient, MockResponse};
pub use matching::{rank, MatchRule, ScoringPolicy, Weights};
pub use selection::{SelectedIngredients, ToggleOutcome};
pub use session::{SearchSession, SearchState};
pub use source::{RecipeSource, RemoteRecipeSource, StaticCatalogSource};
pub use spoonacular::{RemoteIngredient, RemoteRecipe, SpoonacularClient};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use suggest::{IngredientSuggester, SuggestionOutcome};
pub use theme::{ThemePreference, ThemeStore};
pub use types::{Advisory, Ingredient, IngredientSuggestion, Recipe, RecipeMatch};
