use crate::error::RecipeError;
use crate::model::Recipe;
use crate::providers::normalize::clean_lines;
use crate::providers::{is_complete, require_input, RecipeSource};
use async_trait::async_trait;

/// Fixed in-memory recipe list for offline and demo use
pub struct StaticSource {
    recipes: Vec<Recipe>,
}

impl StaticSource {
    /// The built-in sample recipes
    pub fn new() -> Self {
        Self::with_recipes(sample_recipes())
    }

    /// A static source over caller-supplied records
    ///
    /// Blank ingredient lines are removed and records without id or title dropped.
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        StaticSource {
            recipes: recipes
                .into_iter()
                .map(|mut recipe| {
                    recipe.ingredients = clean_lines(&recipe.ingredients);
                    recipe
                })
                .filter(is_complete)
                .collect(),
        }
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new()
    }
}

fn sample(id: &str, title: &str, ingredients: &[&str], steps: &[&str], image: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        image_url: image.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        instructions: steps.join("\n"),
        ..Default::default()
    }
}

fn sample_recipes() -> Vec<Recipe> {
    vec![
        sample(
            "spaghetti-carbonara",
            "Spaghetti Carbonara",
            &["Spaghetti", "Eggs", "Parmesan", "Pancetta", "Pepper"],
            &[
                "Cook spaghetti until al dente.",
                "Fry pancetta until crispy.",
                "Whisk eggs and cheese together.",
                "Combine all with drained pasta.",
            ],
            "/carbonara.jpg",
        ),
        sample(
            "veggie-curry",
            "Veggie Curry",
            &["Potato", "Carrot", "Peas", "Curry Powder", "Coconut Milk"],
            &[
                "Sauté veggies in oil.",
                "Add curry powder and cook briefly.",
                "Pour in coconut milk and simmer.",
                "Serve with rice.",
            ],
            "/veggie-curry.jpg",
        ),
    ]
}

#[async_trait]
impl RecipeSource for StaticSource {
    fn provider_name(&self) -> &str {
        "static"
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipeError> {
        let needle = require_input(query, "Search query")?.to_lowercase();
        Ok(self
            .recipes
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, RecipeError> {
        let id = require_input(id, "Recipe id")?;
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
