//! Recipe scoring and ranking.
//!
//! A recipe is scored on two fractions: how much of its own ingredient list
//! the selection covers, and how much of the selection it uses. The weighted
//! blend of the two becomes an integer match percentage.

use crate::types::{Recipe, RecipeMatch};

/// How a recipe ingredient is compared with a selected ingredient name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Case-insensitive equality. Used for catalog data, which shares
    /// canonical display names with the selection.
    Exact,
    /// Either lower-cased name contains the other, so "chicken" matches
    /// "chicken breast". Used for API data.
    Contains,
}

impl MatchRule {
    /// `selected` must already be lower-cased and non-empty.
    fn matches(self, ingredient: &str, selected: &str) -> bool {
        let ingredient = ingredient.trim().to_lowercase();
        if ingredient.is_empty() || selected.is_empty() {
            return false;
        }
        match self {
            MatchRule::Exact => ingredient == selected,
            MatchRule::Contains => ingredient.contains(selected) || selected.contains(&ingredient),
        }
    }
}

/// Blend of recipe coverage and selection usage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub coverage: f64,
    pub usage: f64,
    /// Lowest percentage reported for a kept match.
    pub floor: u8,
}

impl Weights {
    pub const EQUAL: Weights = Weights {
        coverage: 0.5,
        usage: 0.5,
        floor: 0,
    };

    /// API ingredient lists are less reliable than their titles suggest,
    /// so coverage carries more weight than usage.
    pub const COVERAGE_BIASED: Weights = Weights {
        coverage: 0.6,
        usage: 0.4,
        floor: 1,
    };

    pub fn percentage(&self, coverage: f64, usage: f64) -> u8 {
        let blended = (coverage * self.coverage + usage * self.usage) * 100.0;
        let rounded = blended.round().clamp(0.0, 100.0) as u8;
        rounded.max(self.floor)
    }
}

/// Everything needed to score candidates from one source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub rule: MatchRule,
    pub weights: Weights,
}

impl ScoringPolicy {
    pub const STATIC: ScoringPolicy = ScoringPolicy {
        rule: MatchRule::Exact,
        weights: Weights::EQUAL,
    };

    pub const REMOTE: ScoringPolicy = ScoringPolicy {
        rule: MatchRule::Contains,
        weights: Weights::COVERAGE_BIASED,
    };
}

/// Score a single recipe. Returns `None` when nothing matched or the
/// selection is empty.
pub fn score(selected: &[String], recipe: &Recipe, policy: &ScoringPolicy) -> Option<RecipeMatch> {
    let selected_lower = lowered(selected);
    if selected_lower.is_empty() {
        return None;
    }
    score_lowered(&selected_lower, recipe, policy)
}

/// Trimmed, lower-cased selection with blank names dropped.
fn lowered(selected: &[String]) -> Vec<String> {
    selected
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn score_lowered(
    selected_lower: &[String],
    recipe: &Recipe,
    policy: &ScoringPolicy,
) -> Option<RecipeMatch> {
    let matched_ingredients: Vec<String> = recipe
        .ingredients
        .iter()
        .filter(|ingredient| {
            selected_lower
                .iter()
                .any(|selected| policy.rule.matches(ingredient, selected))
        })
        .cloned()
        .collect();

    let match_count = matched_ingredients.len();
    if match_count == 0 {
        return None;
    }

    let coverage = match_count as f64 / recipe.ingredients.len().max(1) as f64;
    let usage = match_count as f64 / selected_lower.len() as f64;

    Some(RecipeMatch {
        recipe: recipe.clone(),
        match_count,
        matched_ingredients,
        match_percentage: policy.weights.percentage(coverage, usage),
    })
}

/// Score, filter, sort and cap a candidate pool.
///
/// Ordering is by match count, then percentage, both descending. The sort is
/// stable, so fully tied recipes keep their candidate order.
pub fn rank(
    selected: &[String],
    candidates: &[Recipe],
    policy: &ScoringPolicy,
    max_results: usize,
) -> Vec<RecipeMatch> {
    let selected_lower = lowered(selected);
    if selected_lower.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<RecipeMatch> = candidates
        .iter()
        .filter_map(|recipe| score_lowered(&selected_lower, recipe, policy))
        .collect();

    matches.sort_by(|a, b| {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| b.match_percentage.cmp(&a.match_percentage))
    });
    matches.truncate(max_results);
    matches
}
