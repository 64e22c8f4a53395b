use crate::builder::RecipeFinderBuilder;
use crate::error::RecipeError;
use crate::model::Recipe;
use crate::providers::RecipeSource;
use log::{debug, info};

/// The single entry point a presentation layer talks to
///
/// Validates caller input and delegates to exactly one [`RecipeSource`].
/// Failures from the source are passed through unchanged.
pub struct RecipeFinder {
    source: Box<dyn RecipeSource>,
}

impl RecipeFinder {
    /// Wrap an already constructed source
    pub fn new(source: Box<dyn RecipeSource>) -> Self {
        RecipeFinder { source }
    }

    /// Creates a new builder for configuring a finder
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }

    pub fn provider_name(&self) -> &str {
        self.source.provider_name()
    }

    /// Search for recipes matching `query`
    ///
    /// A blank query means the user has not typed anything yet: the result is
    /// empty and no request is made.
    pub async fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>, RecipeError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank query, skipping search");
            return Ok(Vec::new());
        }

        let recipes = self.source.search(query).await?;
        info!(
            "Found {} recipes for '{}' via {}",
            recipes.len(),
            query,
            self.provider_name()
        );
        Ok(recipes)
    }

    /// Fetch a single recipe; an unknown id is [`RecipeError::NotFound`]
    pub async fn get_recipe(&self, id: &str) -> Result<Recipe, RecipeError> {
        match self.source.lookup(id).await? {
            Some(recipe) => Ok(recipe),
            None => Err(RecipeError::NotFound(id.trim().to_string())),
        }
    }

    pub async fn check_health(&self) -> bool {
        self.source.health_check().await
    }
}
