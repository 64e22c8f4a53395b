//! # recipe-finder
//!
//! Search and look up recipes from a third-party recipe API (Edamam or
//! TheMealDB) or from a static in-memory list, behind one normalized
//! [`Recipe`] model.
//!
//! ```no_run
//! use recipe_finder::{ProviderKind, RecipeFinder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let finder = RecipeFinder::builder()
//!     .provider(ProviderKind::MealDb)
//!     .build()?;
//!
//! for recipe in finder.search_recipes("beef").await? {
//!     println!("{} ({})", recipe.title, recipe.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod finder;
pub mod model;
pub mod providers;
pub mod session;

pub use builder::RecipeFinderBuilder;
pub use config::FinderConfig;
pub use error::{RecipeError, RejectionReason};
pub use finder::RecipeFinder;
pub use model::Recipe;
pub use providers::{ProviderKind, RecipeSource};
pub use session::{SearchOutcome, SearchSession};

/// Search with the provider selected by the loaded configuration
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = recipe_finder::search_recipes("pasta").await?;
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(query: &str) -> Result<Vec<Recipe>, RecipeError> {
    RecipeFinder::builder().build()?.search_recipes(query).await
}

/// Look up one recipe with the provider selected by the loaded configuration
pub async fn get_recipe(id: &str) -> Result<Recipe, RecipeError> {
    RecipeFinder::builder().build()?.get_recipe(id).await
}
