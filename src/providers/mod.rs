mod edamam;
mod factory;
mod fixture;
pub mod http;
mod mealdb;
pub mod normalize;

pub use edamam::EdamamSource;
pub use factory::{ProviderFactory, ProviderKind};
pub use fixture::StaticSource;
pub use mealdb::MealDbSource;

use crate::error::RecipeError;
use crate::model::Recipe;
use async_trait::async_trait;

/// Unified capability for every recipe data source, live or static
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the provider name (e.g., "edamam", "mealdb")
    fn provider_name(&self) -> &str;

    /// Keyword search. An empty hit list is `Ok(vec![])`, not an error.
    async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipeError>;

    /// Id lookup. `Ok(None)` when the provider has no usable match.
    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, RecipeError>;

    /// Verify required settings without touching the network
    fn check_config(&self) -> Result<(), RecipeError> {
        Ok(())
    }

    /// Probe the provider with a throwaway search
    async fn health_check(&self) -> bool {
        self.search("test").await.is_ok()
    }
}

/// Trimmed, non-empty argument or `InvalidInput`
pub(crate) fn require_input<'a>(value: &'a str, what: &str) -> Result<&'a str, RecipeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecipeError::InvalidInput(format!("{} cannot be empty", what)));
    }
    Ok(trimmed)
}

/// Keep only records that satisfy the id/title invariant
pub(crate) fn is_complete(recipe: &Recipe) -> bool {
    !recipe.id.trim().is_empty() && !recipe.title.trim().is_empty()
}
